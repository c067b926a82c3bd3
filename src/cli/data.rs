//! # basisset / pseudo 子命令 CLI 定义
//!
//! 两种记录类型共用同一组子命令参数，可用的子命令由注册表决定：
//! - `import`: 从文件导入
//! - `list`: 列出已存储的记录
//! - `dump`: 以 CP2K 格式导出
//! - `uncontract`: 生成非收缩基组（仅基组）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/` 相应模块

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 主命令
// ─────────────────────────────────────────────────────────────

/// basisset / pseudo 主命令参数
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// basisset / pseudo 子命令
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Import records from a file
    Import(ImportArgs),

    /// List stored records
    List(ListArgs),

    /// Print stored records in CP2K format
    Dump(DumpArgs),

    /// Create an uncontracted copy of a stored basis set
    Uncontract(UncontractArgs),
}

impl DataCommands {
    pub fn name(&self) -> &'static str {
        match self {
            DataCommands::Import(_) => "import",
            DataCommands::List(_) => "list",
            DataCommands::Dump(_) => "dump",
            DataCommands::Uncontract(_) => "uncontract",
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 枚举选项
// ─────────────────────────────────────────────────────────────

/// 输入文件格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// CP2K BASIS_SET / GTH_POTENTIALS format
    #[default]
    Cp2k,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Cp2k => write!(f, "cp2k"),
        }
    }
}

/// 重复记录的处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum DuplicateHandling {
    /// Silently skip records already in the store
    #[default]
    Ignore,
    /// Abort the import if any record is already in the store
    Error,
    /// Store duplicates as a new version
    New,
}

// ─────────────────────────────────────────────────────────────
// 子命令参数
// ─────────────────────────────────────────────────────────────

/// import 子命令参数
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// File to import from
    pub file: PathBuf,

    /// Only consider records for the given element
    #[arg(long)]
    pub sym: Option<String>,

    /// Only consider records carrying all given tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Format of the input file
    #[arg(long, value_enum, default_value_t = SourceFormat::Cp2k)]
    pub format: SourceFormat,

    /// How to handle records which are already in the store
    #[arg(long, value_enum, default_value_t = DuplicateHandling::Ignore)]
    pub duplicates: DuplicateHandling,

    /// Non-interactive selection (e.g. 'a', 'n', '1,3-5')
    #[arg(long)]
    pub select: Option<String>,

    /// Add imported records to this group (created if missing)
    #[arg(long)]
    pub group: Option<String>,
}

/// list 子命令参数
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Filter by element
    #[arg(long)]
    pub sym: Option<String>,

    /// Filter by name (any alias)
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by tags (all must be present)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Also write the listed rows to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// dump 子命令参数
#[derive(Args, Debug, Clone, Default)]
pub struct DumpArgs {
    /// Record IDs or UUIDs to dump (all matching records if omitted)
    pub identifiers: Vec<String>,

    /// Filter by element
    #[arg(long)]
    pub sym: Option<String>,

    /// Filter by tags (all must be present)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// uncontract 子命令参数
#[derive(Args, Debug, Clone)]
pub struct UncontractArgs {
    /// ID or UUID of the basis set
    pub identifier: String,
}
