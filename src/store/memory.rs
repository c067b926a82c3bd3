//! # 内存存储
//!
//! `RecordStore` 的内存实现，同时作为 JSON 文件存储的数据容器。
//!
//! ## 依赖关系
//! - 被 `store/json.rs` 包装
//! - 被测试直接使用

use super::{QueryFilter, RecordStore};
use crate::error::{GdtError, Result};
use crate::models::{DataKind, GaussianRecord, Group, Record, StoredRecord};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_format() -> u32 {
    1
}

/// 可序列化的存储内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default = "default_format")]
    pub format: u32,

    /// 下一个可分配的主键
    pub next_pk: u64,

    #[serde(default)]
    pub records: Vec<StoredRecord>,

    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Default for StoreData {
    fn default() -> Self {
        StoreData {
            format: default_format(),
            next_pk: 1,
            records: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        MemoryStore { data }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut Group> {
        self.data
            .groups
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| GdtError::GroupNotFound(name.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn query(&self, kind: DataKind, filter: &QueryFilter) -> Result<Vec<StoredRecord>> {
        Ok(self
            .data
            .records
            .iter()
            .filter(|r| r.record.kind() == kind && filter.matches(&r.record))
            .cloned()
            .collect())
    }

    fn create(&mut self, record: Record) -> Result<StoredRecord> {
        record.validate()?;

        let exists = self.data.records.iter().any(|r| {
            r.record.kind() == record.kind()
                && r.record.element() == record.element()
                && r.record.name() == record.name()
                && r.record.version() == record.version()
        });
        if exists {
            return Err(GdtError::DuplicateRecord {
                kind: record.kind(),
                element: record.element().to_string(),
                name: record.name().to_string(),
                version: record.version(),
            });
        }

        let stored = StoredRecord {
            pk: self.data.next_pk,
            uuid: Uuid::new_v4(),
            created: Utc::now(),
            record,
        };
        self.data.next_pk += 1;

        log::debug!(
            "created {} pk={} ({} {} v{})",
            stored.record.kind(),
            stored.pk,
            stored.record.element(),
            stored.record.name(),
            stored.record.version()
        );

        self.data.records.push(stored.clone());
        Ok(stored)
    }

    fn get(&self, pk: u64) -> Result<StoredRecord> {
        self.data
            .records
            .iter()
            .find(|r| r.pk == pk)
            .cloned()
            .ok_or_else(|| GdtError::Store(format!("no record with pk {}", pk)))
    }

    fn create_group(&mut self, group: Group) -> Result<()> {
        if self.data.groups.iter().any(|g| g.name == group.name) {
            return Err(GdtError::GroupExists(group.name));
        }
        log::debug!("created group '{}' ({})", group.name, group.kind.tag());
        self.data.groups.push(group);
        Ok(())
    }

    fn group(&self, name: &str) -> Result<Group> {
        self.data
            .groups
            .iter()
            .find(|g| g.name == name)
            .cloned()
            .ok_or_else(|| GdtError::GroupNotFound(name.to_string()))
    }

    fn groups(&self) -> Result<Vec<Group>> {
        Ok(self.data.groups.clone())
    }

    fn add_to_group(&mut self, name: &str, pk: u64) -> Result<bool> {
        let record = self.get(pk)?;
        let group = self.group_mut(name)?;
        record.expect_kind(group.kind)?;
        Ok(group.add(pk))
    }

    fn remove_from_group(&mut self, name: &str, pk: u64) -> Result<bool> {
        let group = self.group_mut(name)?;
        Ok(group.remove(pk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{cp2k_basis, cp2k_pseudo};
    use crate::testdata;

    fn he_basis() -> Vec<Record> {
        cp2k_basis::parse_basis_sets(testdata::BASIS_HE_PAIR, Some("He"))
            .map(|r| r.unwrap().into())
            .collect()
    }

    #[test]
    fn test_create_assigns_identity() {
        let mut store = MemoryStore::new();
        let records = he_basis();

        let a = store.create(records[0].clone()).unwrap();
        let b = store.create(records[1].clone()).unwrap();
        assert_eq!(a.pk, 1);
        assert_eq!(b.pk, 2);
        assert_ne!(a.uuid, b.uuid);
        assert_eq!(store.get(2).unwrap().record, records[1]);
    }

    #[test]
    fn test_uniqueness_on_canonical_name() {
        let mut store = MemoryStore::new();
        let record = he_basis().remove(0);

        store.create(record.clone()).unwrap();
        let err = store.create(record.clone()).unwrap_err();
        assert!(matches!(err, GdtError::DuplicateRecord { version: 1, .. }));

        // 新版本可以创建
        let mut v2 = record;
        v2.set_version(2);
        assert!(store.create(v2).is_ok());
    }

    #[test]
    fn test_query_by_kind_and_name() {
        let mut store = MemoryStore::new();
        for r in he_basis() {
            store.create(r).unwrap();
        }
        for p in cp2k_pseudo::parse_pseudos(testdata::GTH_POTENTIALS, Some("He")) {
            store.create(p.unwrap().into()).unwrap();
        }

        let basis = store
            .query(DataKind::BasisSet, &QueryFilter::new().element("He"))
            .unwrap();
        assert_eq!(basis.len(), 2);

        let pseudo = store
            .query(DataKind::Pseudo, &QueryFilter::new().name("GTH-PBE"))
            .unwrap();
        assert_eq!(pseudo.len(), 1);
        assert_eq!(pseudo[0].record.name(), "GTH-PBE-q2");
    }

    #[test]
    fn test_group_kind_enforced() {
        let mut store = MemoryStore::new();
        let basis = store.create(he_basis().remove(0)).unwrap();

        store
            .create_group(Group::new("pseudos", DataKind::Pseudo))
            .unwrap();
        assert!(matches!(
            store.add_to_group("pseudos", basis.pk),
            Err(GdtError::KindMismatch { .. })
        ));
        assert!(matches!(
            store.create_group(Group::new("pseudos", DataKind::Pseudo)),
            Err(GdtError::GroupExists(_))
        ));

        store
            .create_group(Group::new("bases", DataKind::BasisSet))
            .unwrap();
        assert!(store.add_to_group("bases", basis.pk).unwrap());
        assert!(!store.add_to_group("bases", basis.pk).unwrap());
        assert_eq!(store.group_members("bases").unwrap().len(), 1);
        assert!(store.remove_from_group("bases", basis.pk).unwrap());
        assert!(store.add_to_group("missing", basis.pk).is_err());
    }
}
