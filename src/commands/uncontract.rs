//! # uncontract 命令实现
//!
//! 由已存储的基组生成非收缩基组并存储。
//!
//! ## 依赖关系
//! - 使用 `cli/data.rs` 定义的参数
//! - 使用 `store/`, `workflow/dedup.rs`

use crate::cli::data::UncontractArgs;
use crate::error::{GdtError, Result};
use crate::models::{DataKind, GaussianRecord, Record, StoredRecord};
use crate::store::RecordStore;
use crate::utils::output;
use crate::workflow::ExistingRecordIndex;

/// 执行 uncontract 命令，已存在时返回 None
pub fn execute(args: &UncontractArgs, store: &mut dyn RecordStore) -> Result<Option<StoredRecord>> {
    let source = store.resolve(DataKind::BasisSet, &args.identifier)?;
    let basis = source
        .record
        .as_basisset()
        .ok_or(GdtError::KindMismatch {
            pk: source.pk,
            expected: DataKind::BasisSet,
            found: source.record.kind(),
        })?;

    let uncontracted: Record = basis.uncontracted().into();

    if ExistingRecordIndex::new(&*store).is_duplicate(&uncontracted)? {
        output::print_skip(&format!(
            "{} for '{}' from '{}' already exists",
            DataKind::BasisSet,
            uncontracted.element(),
            uncontracted.name()
        ));
        return Ok(None);
    }

    let stored = store.create(uncontracted)?;
    output::print_success(&format!(
        "Stored '{}' for '{}' as ID {}",
        stored.record.name(),
        stored.record.element(),
        stored.pk
    ));
    Ok(Some(stored))
}
