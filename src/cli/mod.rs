//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `basisset`: 高斯基组（import, list, dump, uncontract）
//! - `pseudo`: 高斯赝势（import, list, dump）
//! - `group`: 记录分组管理
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: data, group

pub mod data;
pub mod group;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// gdt - 高斯基组与赝势数据管理工具
#[derive(Parser)]
#[command(name = "gdt")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Manage Gaussian basis sets and pseudopotentials", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the record store
    #[arg(long, global = true, env = "GDT_STORE", default_value = "gaussian-datatypes.json")]
    pub store: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Manage Gaussian basis sets
    Basisset(data::DataArgs),

    /// Manage Gaussian pseudopotentials
    Pseudo(data::DataArgs),

    /// Manage groups of basis sets or pseudopotentials
    Group(group::GroupArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "gdt", "basisset", "list", "--sym", "He", "--store", "x.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.store, PathBuf::from("x.json"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Basisset(_)));
    }
}
