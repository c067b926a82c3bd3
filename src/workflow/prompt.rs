//! # 交互式选择
//!
//! 通过 `LineSource` 读取用户输入，终端与脚本化输入共用同一套逻辑。
//! 交互模式下输入无效会重新提问；非交互模式（stdin 不是终端或给定 `--select`）
//! 直接返回 `Input` 错误。
//!
//! ## 依赖关系
//! - 被 `commands/import.rs` 使用
//! - 使用 `workflow/selection.rs`, `utils/output.rs`
//! - 使用 `console` crate

use super::selection::{parse_confirmation, parse_selection};
use crate::error::{GdtError, Result};
use crate::utils::output;

use console::Term;
use std::io::{BufRead, IsTerminal};

/// 输入来源
pub trait LineSource {
    /// 显示提示并读取一行，输入结束时返回 None
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn is_interactive(&self) -> bool;
}

/// 终端输入，stdin 不是终端时按行读取 stdin
pub struct TermSource {
    term: Term,
    interactive: bool,
}

impl TermSource {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term() && std::io::stdin().is_terminal();
        TermSource { term, interactive }
    }
}

impl Default for TermSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TermSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let io_err = |e: std::io::Error| GdtError::Input(format!("failed to read input: {}", e));

        if self.interactive {
            self.term.write_str(prompt).map_err(io_err)?;
            return self.term.read_line().map(Some).map_err(io_err);
        }

        let mut line = String::new();
        let n = std::io::stdin().lock().read_line(&mut line).map_err(io_err)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end().to_string()))
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// 预先写好的输入序列
#[cfg(test)]
pub struct ScriptedSource {
    lines: std::collections::VecDeque<String>,
    interactive: bool,
}

#[cfg(test)]
impl ScriptedSource {
    /// 模拟终端：无效输入会被重新提问
    pub fn interactive(lines: &[&str]) -> Self {
        ScriptedSource {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            interactive: true,
        }
    }

    /// 模拟管道输入
    pub fn piped(lines: &[&str]) -> Self {
        ScriptedSource {
            interactive: false,
            ..Self::interactive(lines)
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
impl LineSource for ScriptedSource {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

const SELECT_PROMPT: &str = "Which ones would you like to add? ([a]ll, [n]one, e.g. 1,3-5): ";

/// 候选记录选择器
pub struct Selector<'a> {
    source: &'a mut dyn LineSource,

    /// `--select` 给定的选择，存在时不再提问
    preset: Option<String>,
}

impl<'a> Selector<'a> {
    pub fn new(source: &'a mut dyn LineSource, preset: Option<String>) -> Self {
        Selector { source, preset }
    }

    /// 从 `count` 个候选中选择，返回 0-based 下标
    pub fn select(&mut self, count: usize) -> Result<Vec<usize>> {
        if let Some(preset) = &self.preset {
            return parse_selection(preset, count);
        }
        self.ask(SELECT_PROMPT, |line| parse_selection(line, count))
    }

    /// 单个候选时的 y/N 确认
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        if let Some(preset) = &self.preset {
            return Ok(!parse_selection(preset, 1)?.is_empty());
        }
        self.ask(&format!("{} [y/N]: ", question), parse_confirmation)
    }

    fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let line = self
                .source
                .read_line(prompt)?
                .ok_or_else(|| GdtError::Input("no selection given".to_string()))?;

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) if self.source.is_interactive() => {
                    output::print_warning(&format!("{}, please try again", e));
                }
                Err(e) => return Err(e),
            }
        }
    }
}
