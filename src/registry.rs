//! # 数据类型注册表
//!
//! 启动时构建的静态注册表：记录类型 -> {解析器, 写出函数, 支持的子命令}。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/`, `models/record.rs`

use crate::cli::data::SourceFormat;
use crate::error::{GdtError, Result};
use crate::models::DataKind;
use crate::models::Record;
use crate::parsers::{self, cp2k_basis, cp2k_pseudo, RecordIter};

/// 解析函数：原始文本 + 可选元素过滤 -> 惰性记录序列
pub type ParseFn = for<'a> fn(&'a str, Option<&'a str>) -> RecordIter<'a>;

/// 写出函数：记录 + 注释行 -> CP2K 文本
pub type WriteFn = fn(&Record, &str) -> String;

/// 某一记录类型的行为描述
pub struct KindSpec {
    pub kind: DataKind,

    /// 各输入格式对应的解析器
    pub parsers: &'static [(SourceFormat, ParseFn)],

    pub write: WriteFn,

    /// 该类型支持的子命令
    pub commands: &'static [&'static str],
}

impl KindSpec {
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn parser(&self, format: SourceFormat) -> Result<ParseFn> {
        self.parsers
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, p)| *p)
            .ok_or_else(|| {
                GdtError::Input(format!("format '{}' is not supported for {}", format, self.tag()))
            })
    }

    /// 检查子命令是否可用
    pub fn ensure_command(&self, command: &str) -> Result<()> {
        if self.commands.contains(&command) {
            Ok(())
        } else {
            Err(GdtError::Input(format!(
                "'{}' is not available for {}",
                command,
                self.tag()
            )))
        }
    }
}

static BASISSET: KindSpec = KindSpec {
    kind: DataKind::BasisSet,
    parsers: &[(SourceFormat::Cp2k, cp2k_basis::parse_records)],
    write: parsers::to_cp2k,
    commands: &["import", "list", "dump", "uncontract"],
};

static PSEUDO: KindSpec = KindSpec {
    kind: DataKind::Pseudo,
    parsers: &[(SourceFormat::Cp2k, cp2k_pseudo::parse_records)],
    write: parsers::to_cp2k,
    commands: &["import", "list", "dump"],
};

/// 注册表
pub struct Registry;

impl Registry {
    /// 内置的全部记录类型
    pub fn builtin() -> Self {
        Registry
    }

    pub fn get(&self, kind: DataKind) -> &'static KindSpec {
        match kind {
            DataKind::BasisSet => &BASISSET,
            DataKind::Pseudo => &PSEUDO,
        }
    }
}
