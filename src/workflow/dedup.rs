//! # 已存在记录索引
//!
//! 判断候选记录是否已在存储中，以及同名记录的最新版本。
//!
//! ## 依赖关系
//! - 被 `commands/import.rs`, `commands/uncontract.rs` 使用
//! - 使用 `store/`

use crate::cli::data::DuplicateHandling;
use crate::error::{GdtError, Result};
use crate::models::{GaussianRecord, Record, StoredRecord};
use crate::store::{QueryFilter, RecordStore};

/// 对存储的只读视图
pub struct ExistingRecordIndex<'s> {
    store: &'s dyn RecordStore,
}

impl<'s> ExistingRecordIndex<'s> {
    pub fn new(store: &'s dyn RecordStore) -> Self {
        ExistingRecordIndex { store }
    }

    /// 同类型、同元素且共享任一名称的已存记录
    fn related(
        &self,
        candidate: &dyn GaussianRecord,
        version: Option<u32>,
    ) -> Result<Vec<StoredRecord>> {
        let mut filter = QueryFilter::new().element(candidate.element());
        if let Some(v) = version {
            filter = filter.version(v);
        }
        Ok(self
            .store
            .query(candidate.kind(), &filter)?
            .into_iter()
            .filter(|r| r.record.shares_name_with(candidate))
            .collect())
    }

    /// 存储中已有同版本、共享名称的记录
    pub fn is_duplicate(&self, candidate: &dyn GaussianRecord) -> Result<bool> {
        Ok(!self
            .related(candidate, Some(candidate.version()))?
            .is_empty())
    }

    /// 共享名称的记录中最高的版本号，不存在时为 None
    pub fn latest_version(&self, candidate: &dyn GaussianRecord) -> Result<Option<u32>> {
        Ok(self
            .related(candidate, None)?
            .iter()
            .map(|r| r.record.version())
            .max())
    }

    /// 按处理策略过滤候选记录
    ///
    /// `Ignore` 丢弃重复项；`Error` 遇到重复项立即失败；
    /// `New` 保留重复项并把版本设为最新版本加一。
    /// 返回保留的候选与被丢弃的数量。
    pub fn apply(
        &self,
        candidates: Vec<Record>,
        handling: DuplicateHandling,
    ) -> Result<(Vec<Record>, usize)> {
        let mut kept = Vec::with_capacity(candidates.len());
        let mut dropped = 0;

        for mut candidate in candidates {
            if !self.is_duplicate(&candidate)? {
                kept.push(candidate);
                continue;
            }

            match handling {
                DuplicateHandling::Ignore => {
                    log::debug!(
                        "skipping existing {} {} v{}",
                        candidate.element(),
                        candidate.name(),
                        candidate.version()
                    );
                    dropped += 1;
                }
                DuplicateHandling::Error => {
                    return Err(GdtError::DuplicateRecord {
                        kind: candidate.kind(),
                        element: candidate.element().to_string(),
                        name: candidate.name().to_string(),
                        version: candidate.version(),
                    });
                }
                DuplicateHandling::New => {
                    let latest = self.latest_version(&candidate)?.unwrap_or(0);
                    candidate.set_version(latest + 1);
                    kept.push(candidate);
                }
            }
        }

        Ok((kept, dropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BasisSet;
    use crate::parsers::cp2k_basis;
    use crate::store::MemoryStore;
    use crate::testdata;

    fn dzvp() -> BasisSet {
        cp2k_basis::parse_basis_sets(testdata::BASIS_DZVP_H, None)
            .next()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_committed_record_is_duplicate() {
        let mut store = MemoryStore::new();
        let basis = dzvp();
        assert!(!ExistingRecordIndex::new(&store).is_duplicate(&basis).unwrap());

        store.create(basis.clone().into()).unwrap();
        let index = ExistingRecordIndex::new(&store);
        assert!(index.is_duplicate(&basis).unwrap());
        assert_eq!(index.latest_version(&basis).unwrap(), Some(1));
    }

    #[test]
    fn test_alias_match() {
        let mut store = MemoryStore::new();
        store.create(dzvp().into()).unwrap();

        // 只带别名的候选也算重复
        let mut candidate = dzvp();
        candidate.names = vec!["DZVP-MOLOPT-GTH".to_string()];
        assert!(ExistingRecordIndex::new(&store).is_duplicate(&candidate).unwrap());

        let mut other = dzvp();
        other.names = vec!["DZVP-MOLOPT-SR-GTH".to_string()];
        assert!(!ExistingRecordIndex::new(&store).is_duplicate(&other).unwrap());

        let mut other_element = dzvp();
        other_element.element = "He".to_string();
        assert!(!ExistingRecordIndex::new(&store)
            .is_duplicate(&other_element)
            .unwrap());
    }

    #[test]
    fn test_version_aware() {
        let mut store = MemoryStore::new();
        store.create(dzvp().into()).unwrap();

        let mut v2 = dzvp();
        v2.version = 2;
        let index = ExistingRecordIndex::new(&store);
        assert!(!index.is_duplicate(&v2).unwrap());
        assert_eq!(index.latest_version(&v2).unwrap(), Some(1));
    }

    #[test]
    fn test_apply_strategies() {
        let mut store = MemoryStore::new();
        store.create(dzvp().into()).unwrap();
        let index = ExistingRecordIndex::new(&store);

        let (kept, dropped) = index
            .apply(vec![dzvp().into()], DuplicateHandling::Ignore)
            .unwrap();
        assert!(kept.is_empty());
        assert_eq!(dropped, 1);

        assert!(matches!(
            index.apply(vec![dzvp().into()], DuplicateHandling::Error),
            Err(GdtError::DuplicateRecord { .. })
        ));

        let (kept, dropped) = index
            .apply(vec![dzvp().into()], DuplicateHandling::New)
            .unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(kept[0].version(), 2);
    }
}
