//! # gdt - 高斯基组与赝势数据管理工具
//!
//! 从 CP2K 格式文件导入高斯基组和 GTH 赝势，去重后交互式选择入库，
//! 并支持列出、导出与分组管理。
//!
//! ## 子命令
//! - `basisset` - 高斯基组
//!   - `import` / `list` / `dump` / `uncontract`
//! - `pseudo` - 高斯赝势
//!   - `import` / `list` / `dump`
//! - `group` - 分组管理
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── registry.rs (记录类型注册表)
//!   │     ├── workflow/   (去重、选择、提示)
//!   │     ├── store/      (记录存储)
//!   │     ├── parsers/    (CP2K 格式解析与写出)
//!   │     └── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod registry;
mod store;
mod utils;
mod workflow;

#[cfg(test)]
mod testdata;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }
    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
