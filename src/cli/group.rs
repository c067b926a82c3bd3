//! # group 子命令 CLI 定义
//!
//! 记录分组的创建、成员维护与查看。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/group.rs`

use clap::{Args, Subcommand, ValueEnum};

use crate::models::DataKind;

/// group 主命令参数
#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommands,
}

/// 分组可容纳的记录类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum GroupKind {
    /// Gaussian basis sets
    Basisset,
    /// Gaussian pseudopotentials
    Pseudo,
}

impl From<GroupKind> for DataKind {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Basisset => DataKind::BasisSet,
            GroupKind::Pseudo => DataKind::Pseudo,
        }
    }
}

/// group 子命令
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Create an empty group
    Create {
        /// Group name
        name: String,

        /// Kind of records the group holds
        #[arg(long, value_enum)]
        kind: GroupKind,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Add records to a group
    Add {
        /// Group name
        name: String,

        /// Record IDs or UUIDs
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Remove records from a group
    Remove {
        /// Group name
        name: String,

        /// Record IDs or UUIDs
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// List all groups
    List,

    /// Show the records of a group, keyed by element
    Show {
        /// Group name
        name: String,

        /// Only show (and require) these elements
        #[arg(long = "sym")]
        elements: Vec<String>,
    },
}
