//! # import 命令实现
//!
//! 从 CP2K 格式文件导入基组或赝势。
//!
//! ## 流程
//! - 惰性解析文件，格式错误的条目给出警告后跳过
//! - 按元素与标签过滤
//! - 按 `--duplicates` 策略处理已存在的记录
//! - 列出候选并由用户选择（或 `--select` 预先指定）
//! - 逐条提交，单条失败不影响其余记录
//!
//! ## 依赖关系
//! - 使用 `cli/data.rs` 定义的参数
//! - 使用 `registry.rs`, `workflow/`, `store/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::data::ImportArgs;
use crate::error::{GdtError, Result};
use crate::models::{GaussianRecord, Group, Record, StoredRecord};
use crate::parsers;
use crate::registry::KindSpec;
use crate::store::RecordStore;
use crate::utils::{output, progress};
use crate::workflow::{ExistingRecordIndex, LineSource, Selector};

use tabled::{Table, Tabled};

/// 候选记录表格行
#[derive(Debug, Clone, Tabled)]
struct CandidateRow {
    #[tabled(rename = "Nr.")]
    nr: usize,
    #[tabled(rename = "Sym")]
    sym: String,
    #[tabled(rename = "Names")]
    names: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Val. e⁻")]
    valence: String,
    #[tabled(rename = "Version")]
    version: u32,
}

impl CandidateRow {
    fn new(nr: usize, record: &Record) -> Self {
        CandidateRow {
            nr,
            sym: record.element().to_string(),
            names: record.names_display(),
            tags: record.tags().join(" "),
            valence: record.valence_summary(),
            version: record.version(),
        }
    }
}

/// 导入结果统计
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub committed: Vec<StoredRecord>,

    /// 因已存在而跳过的记录数
    pub skipped: usize,

    /// 格式错误的条目数
    pub malformed: usize,
}

/// 执行 import 命令
pub fn execute(
    spec: &KindSpec,
    args: ImportArgs,
    store: &mut dyn RecordStore,
    input: &mut dyn LineSource,
) -> Result<ImportSummary> {
    let kind = spec.kind;
    let parse = spec.parser(args.format)?;
    let content = parsers::read_source(&args.file)?;

    let mut summary = ImportSummary::default();

    // 解析
    let pb = progress::create_spinner(&format!("Parsing {}", args.file.display()));
    let mut candidates: Vec<Record> = Vec::new();
    for result in parse(&content, args.sym.as_deref()) {
        match result {
            Ok(record) => {
                if record.has_tags(&args.tags) {
                    candidates.push(record);
                }
            }
            Err(e) => {
                summary.malformed += 1;
                pb.suspend(|| output::print_warning(&e.to_string()));
            }
        }
    }
    pb.finish_and_clear();

    log::info!(
        "parsed {} candidate(s) from {} ({} malformed)",
        candidates.len(),
        args.file.display(),
        summary.malformed
    );

    // 去重
    let before = candidates.len();
    let (candidates, dropped) =
        ExistingRecordIndex::new(&*store).apply(candidates, args.duplicates)?;
    summary.skipped = dropped;
    if dropped > 0 {
        log::info!("{} of {} candidate(s) already stored", dropped, before);
    }

    if candidates.is_empty() {
        output::print_info(&format!(
            "No valid {} found in the given file matching the given criteria",
            kind.plural()
        ));
        return Ok(summary);
    }

    // 选择
    let mut selector = Selector::new(input, args.select.clone());
    let selected: Vec<usize> = if candidates.len() == 1 {
        let only = &candidates[0];
        let question = format!(
            "Add a {} for '{}' from '{}'?",
            kind,
            only.element(),
            only.name()
        );
        if selector.confirm(&question)? {
            vec![0]
        } else {
            Vec::new()
        }
    } else {
        output::print_info(&format!("{} {} found:", candidates.len(), kind.plural()));
        let rows: Vec<CandidateRow> = candidates
            .iter()
            .enumerate()
            .map(|(i, r)| CandidateRow::new(i + 1, r))
            .collect();
        println!("{}", Table::new(&rows));
        selector.select(candidates.len())?
    };

    if selected.is_empty() {
        output::print_info(&format!("No {} selected, nothing to add", kind.plural()));
        return Ok(summary);
    }

    // 目标分组先检查，避免提交后才发现类型不符
    if let Some(name) = &args.group {
        match store.group(name) {
            Ok(group) if group.kind != kind => {
                return Err(GdtError::Input(format!(
                    "group '{}' holds {}, not {}",
                    name,
                    group.kind.plural(),
                    kind.plural()
                )));
            }
            Ok(_) => {}
            Err(GdtError::GroupNotFound(_)) => {
                store.create_group(Group::new(name.clone(), kind))?;
                output::print_info(&format!("Created group '{}'", name));
            }
            Err(e) => return Err(e),
        }
    }

    // 提交
    let pb = progress::create_progress_bar(selected.len() as u64, "Storing");
    let mut failed = 0;
    let mut chosen: Vec<Option<Record>> = candidates.into_iter().map(Some).collect();

    for idx in &selected {
        let Some(record) = chosen[*idx].take() else {
            continue;
        };
        let label = format!(
            "Adding {} for '{}' from '{}' (version {})",
            kind,
            record.element(),
            record.name(),
            record.version()
        );

        match store.create(record) {
            Ok(stored) => {
                pb.suspend(|| output::print_commit(&label, true));
                // 已提交的记录保留，分组失败只计入失败数
                if let Some(name) = &args.group {
                    if let Err(e) = store.add_to_group(name, stored.pk) {
                        pb.suspend(|| {
                            output::print_error(&format!(
                                "Could not add pk {} to group '{}': {}",
                                stored.pk, name, e
                            ))
                        });
                        failed += 1;
                    }
                }
                summary.committed.push(stored);
            }
            Err(GdtError::DuplicateRecord { .. }) => {
                pb.suspend(|| output::print_skip(&format!("{}: already stored", label)));
                summary.skipped += 1;
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_commit(&label, false);
                    output::print_error(&e.to_string());
                });
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        return Err(GdtError::Store(format!(
            "{} of {} selected {} could not be stored or grouped",
            failed,
            selected.len(),
            kind.plural()
        )));
    }

    output::print_done(&format!(
        "Added {} {}",
        summary.committed.len(),
        kind.plural()
    ));
    Ok(summary)
}
