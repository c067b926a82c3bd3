//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。存储句柄在这里打开，显式传给每个命令，
//! 命令结束后（无论成功与否）统一落盘关闭。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `registry.rs`, `store/`, `workflow/`
//! - 子模块: import, list, dump, uncontract, group

pub mod dump;
pub mod group;
pub mod import;
pub mod list;
pub mod uncontract;

use crate::cli::data::DataCommands;
use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::models::DataKind;
use crate::registry::{KindSpec, Registry};
use crate::store::{JsonStore, RecordStore};
use crate::workflow::{LineSource, TermSource};

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let mut store = JsonStore::open(&cli.store)?;
    log::debug!("using store {}", store.path().display());

    let mut input = TermSource::new();
    let result = run_with(cli.command, &mut store, &mut input);

    // 已提交的记录即使命令失败也要落盘
    let closed = store.close();
    result.and(closed)
}

/// 在给定的存储与输入源上执行命令
pub fn run_with(
    cmd: Commands,
    store: &mut dyn RecordStore,
    input: &mut dyn LineSource,
) -> Result<()> {
    let registry = Registry::builtin();
    match cmd {
        Commands::Basisset(args) => {
            run_data(registry.get(DataKind::BasisSet), args.command, store, input)
        }
        Commands::Pseudo(args) => run_data(registry.get(DataKind::Pseudo), args.command, store, input),
        Commands::Group(args) => group::execute(args.command, store),
    }
}

fn run_data(
    spec: &KindSpec,
    cmd: DataCommands,
    store: &mut dyn RecordStore,
    input: &mut dyn LineSource,
) -> Result<()> {
    spec.ensure_command(cmd.name())?;

    match cmd {
        DataCommands::Import(args) => import::execute(spec, args, store, input).map(|_| ()),
        DataCommands::List(args) => list::execute(spec.kind, &args, store).map(|_| ()),
        DataCommands::Dump(args) => dump::execute(spec, &args, store),
        DataCommands::Uncontract(args) => uncontract::execute(&args, store).map(|_| ()),
    }
}
