//! # dump 命令实现
//!
//! 将已存储的记录以 CP2K 格式输出到 stdout 或文件。
//!
//! ## 依赖关系
//! - 使用 `cli/data.rs` 定义的参数
//! - 使用 `store/`, `registry.rs`

use crate::cli::data::DumpArgs;
use crate::error::{GdtError, Result};
use crate::models::{DataKind, GaussianRecord, StoredRecord};
use crate::registry::KindSpec;
use crate::store::{QueryFilter, RecordStore};
use crate::utils::output;

use std::fs;

/// 按标识符或过滤条件选出记录
fn collect(kind: DataKind, args: &DumpArgs, store: &dyn RecordStore) -> Result<Vec<StoredRecord>> {
    if args.identifiers.is_empty() {
        let mut filter = QueryFilter::new().tags(&args.tags);
        if let Some(sym) = &args.sym {
            filter = filter.element(sym.as_str());
        }
        return store.query(kind, &filter);
    }

    args.identifiers
        .iter()
        .map(|id| store.resolve(kind, id))
        .collect()
}

/// 生成 CP2K 文本
pub fn render(spec: &KindSpec, args: &DumpArgs, store: &dyn RecordStore) -> Result<(String, usize)> {
    let records = collect(spec.kind, args, store)?;

    let text: String = records
        .iter()
        .map(|stored| {
            let comment = format!(
                "{} {} version {} uuid {}",
                stored.record.element(),
                stored.record.name(),
                stored.record.version(),
                stored.uuid
            );
            (spec.write)(&stored.record, &comment)
        })
        .collect();

    Ok((text, records.len()))
}

/// 执行 dump 命令
pub fn execute(spec: &KindSpec, args: &DumpArgs, store: &dyn RecordStore) -> Result<()> {
    let kind = spec.kind;
    let (text, count) = render(spec, args, store)?;

    if count == 0 {
        output::print_warning(&format!("No {} found.", kind.plural()));
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, text).map_err(|e| GdtError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_success(&format!(
                "Wrote {} {} to '{}'",
                count,
                kind.plural(),
                path.display()
            ));
        }
        None => print!("{}", text),
    }

    Ok(())
}
