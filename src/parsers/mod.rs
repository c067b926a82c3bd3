//! # 解析器模块
//!
//! 提供 CP2K 原生格式的基组与赝势解析器及写出器。
//!
//! 文件按记录边界（元素符号 + 名称的头行）切分为条目，惰性逐条解析；
//! 单个条目格式错误只产生一条 `ParseError`，不会中断其余条目。
//!
//! ## 依赖关系
//! - 被 `registry.rs` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: cp2k_basis, cp2k_pseudo

pub mod cp2k_basis;
pub mod cp2k_pseudo;

use crate::error::{GdtError, ParseError, Result};
use crate::models::Record;

use regex::Regex;
use std::fs;
use std::iter::{Enumerate, Peekable};
use std::path::Path;
use std::str::Lines;

/// 惰性记录序列
pub type RecordIter<'a> = Box<dyn Iterator<Item = std::result::Result<Record, ParseError>> + 'a>;

/// 读取输入文件
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GdtError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|e| GdtError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 将记录写为 CP2K 格式
pub fn to_cp2k(record: &Record, comment: &str) -> String {
    match record {
        Record::BasisSet(b) => cp2k_basis::write_basis_set(b, comment),
        Record::Pseudo(p) => cp2k_pseudo::write_pseudo(p, comment),
    }
}

/// 去掉行内 `#` 注释
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// ─────────────────────────────────────────────────────────────
// 条目切分
// ─────────────────────────────────────────────────────────────

/// 文件中的一个条目（头行 + 数据行）
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// 头行行号（1 起）
    pub line: usize,
    pub element: &'a str,
    pub identifiers: Vec<&'a str>,
    /// (行号, 去注释后的内容)
    pub body: Vec<(usize, &'a str)>,
}

impl<'a> Entry<'a> {
    /// 用于错误信息的条目标识
    pub fn section(&self) -> String {
        match self.identifiers.first() {
            Some(name) => format!("{} {}", self.element, name),
            None => self.element.to_string(),
        }
    }

    pub fn error(&self, line: usize, reason: impl Into<String>) -> ParseError {
        ParseError::new(self.section(), line, reason)
    }

    pub fn tokens(&self) -> Tokens<'a> {
        Tokens::new(&self.body)
    }
}

/// 按头行切分文本的惰性迭代器
///
/// 头行之前出现的数据行作为一个错误条目返回。
pub struct EntryIter<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    header: &'a Regex,
    element: Option<&'a str>,
}

impl<'a> EntryIter<'a> {
    /// `header` 需包含 `element` 与 `names` 两个命名捕获组
    pub fn new(content: &'a str, header: &'a Regex, element: Option<&'a str>) -> Self {
        EntryIter {
            lines: content.lines().enumerate().peekable(),
            header,
            element,
        }
    }

    /// 收集数据行直到下一个头行
    fn collect_body(&mut self) -> Vec<(usize, &'a str)> {
        let mut body = Vec::new();
        while let Some((idx, raw)) = self.lines.peek().copied() {
            let line = strip_comment(raw);
            if line.trim().is_empty() {
                self.lines.next();
                continue;
            }
            if self.header.is_match(line) {
                break;
            }
            body.push((idx + 1, line));
            self.lines.next();
        }
        body
    }
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = std::result::Result<Entry<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, raw) = self.lines.next()?;
            let line = strip_comment(raw);
            if line.trim().is_empty() {
                continue;
            }

            let Some(caps) = self.header.captures(line) else {
                // 头行之前的游离数据：整体作为一个错误条目
                let _ = self.collect_body();
                return Some(Err(ParseError::new(
                    "<no header>",
                    idx + 1,
                    "data found outside of an entry",
                )));
            };

            let element = caps.name("element").map(|m| m.as_str()).unwrap_or("");
            let identifiers: Vec<&'a str> = caps
                .name("names")
                .map(|m| m.as_str().split_whitespace().collect())
                .unwrap_or_default();
            let body = self.collect_body();

            if let Some(wanted) = self.element {
                if !wanted.eq_ignore_ascii_case(element) {
                    continue;
                }
            }

            return Some(Ok(Entry {
                line: idx + 1,
                element,
                identifiers,
                body,
            }));
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 数据记号流
// ─────────────────────────────────────────────────────────────

/// 条目数据部分的空白分隔记号流，允许数值跨行书写
pub struct Tokens<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(body: &[(usize, &'a str)]) -> Self {
        let items: Vec<(usize, &'a str)> = body
            .iter()
            .flat_map(|(line, text)| text.split_whitespace().map(move |t| (*line, t)))
            .collect();
        let last_line = body.last().map(|(l, _)| *l).unwrap_or(0);
        Tokens {
            items,
            pos: 0,
            last_line,
        }
    }

    /// 当前位置所在的行号
    pub fn line(&self) -> usize {
        self.items
            .get(self.pos)
            .map(|(l, _)| *l)
            .unwrap_or(self.last_line)
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.items.get(self.pos).map(|(_, t)| *t)
    }

    pub fn next_str(&mut self, what: &str) -> std::result::Result<&'a str, String> {
        match self.peek() {
            Some(t) => {
                self.pos += 1;
                Ok(t)
            }
            None => Err(format!("unexpected end of entry, expected {}", what)),
        }
    }

    pub fn next_u32(&mut self, what: &str) -> std::result::Result<u32, String> {
        let tok = self.next_str(what)?;
        tok.parse::<u32>()
            .map_err(|_| format!("expected {} (integer), found '{}'", what, tok))
    }

    /// 解析浮点数，兼容 Fortran 的 `D` 指数
    pub fn next_f64(&mut self, what: &str) -> std::result::Result<f64, String> {
        let tok = self.next_str(what)?;
        let normalized = tok.replace(['D', 'd'], "E");
        normalized
            .parse::<f64>()
            .map_err(|_| format!("expected {} (number), found '{}'", what, tok))
    }

    pub fn next_f64s(&mut self, n: usize, what: &str) -> std::result::Result<Vec<f64>, String> {
        (0..n).map(|_| self.next_f64(what)).collect()
    }

    /// 未消费的第一个记号
    pub fn remaining(&self) -> Option<(usize, &'a str)> {
        self.items.get(self.pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static HEADER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*(?P<element>[A-Za-z]{1,3})\s+(?P<names>\S.*)$").unwrap());

    #[test]
    fn test_entry_split_with_comments() {
        let content = "# header comment\n\
                       H  A B\n\
                       1\n\
                       \n\
                       He C # trailing\n\
                       2 3\n";
        let entries: Vec<_> = EntryIter::new(content, &HEADER, None)
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].element, "H");
        assert_eq!(entries[0].identifiers, vec!["A", "B"]);
        assert_eq!(entries[0].body.len(), 1);
        assert_eq!(entries[1].identifiers, vec!["C"]);
        assert_eq!(entries[1].line, 5);
    }

    #[test]
    fn test_entry_element_filter() {
        let content = "H A\n1\nHe B\n2\nH C\n3\n";
        let entries: Vec<_> = EntryIter::new(content, &HEADER, Some("h"))
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.element == "H"));
    }

    #[test]
    fn test_orphan_data_is_error() {
        let content = "1 2 3\nH A\n1\n";
        let results: Vec<_> = EntryIter::new(content, &HEADER, None).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_tokens_fortran_exponent() {
        let body = vec![(3, "1.5D+01  2"), (4, "-0.25")];
        let mut tokens = Tokens::new(&body);
        assert_eq!(tokens.next_f64("x").unwrap(), 15.0);
        assert_eq!(tokens.next_u32("n").unwrap(), 2);
        assert_eq!(tokens.line(), 4);
        assert_eq!(tokens.next_f64("c").unwrap(), -0.25);
        assert!(tokens.next_f64("missing").is_err());
        assert!(tokens.remaining().is_none());
    }
}
