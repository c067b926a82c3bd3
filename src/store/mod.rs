//! # 存储模块
//!
//! 记录持久化层的抽象与实现。命令通过显式传入的存储句柄访问数据，
//! 不存在进程级全局状态。
//!
//! ## 依赖关系
//! - 被 `workflow/` 和 `commands/` 使用
//! - 使用 `models/`
//! - 子模块: memory, json

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::error::{GdtError, Result};
use crate::models::{DataKind, GaussianRecord, Group, Record, StoredRecord};

/// 查询条件，所有字段为可选并按与逻辑组合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilter {
    pub element: Option<String>,

    /// 匹配任一名称（含别名）
    pub name: Option<String>,

    /// 必须全部包含
    pub tags: Vec<String>,

    pub version: Option<u32>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tags(mut self, tags: &[String]) -> Self {
        self.tags = tags.to_vec();
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn matches(&self, record: &dyn GaussianRecord) -> bool {
        if let Some(element) = &self.element {
            if !record.element().eq_ignore_ascii_case(element) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !record.names().iter().any(|n| n == name) {
                return false;
            }
        }
        if let Some(version) = self.version {
            if record.version() != version {
                return false;
            }
        }
        record.has_tags(&self.tags)
    }
}

/// 记录存储接口
pub trait RecordStore {
    /// 按条件查询某类记录，按主键升序返回
    fn query(&self, kind: DataKind, filter: &QueryFilter) -> Result<Vec<StoredRecord>>;

    /// 创建记录；(类型, 元素, 规范名称, 版本) 已存在时返回 `DuplicateRecord`
    fn create(&mut self, record: Record) -> Result<StoredRecord>;

    fn get(&self, pk: u64) -> Result<StoredRecord>;

    fn create_group(&mut self, group: Group) -> Result<()>;

    fn group(&self, name: &str) -> Result<Group>;

    fn groups(&self) -> Result<Vec<Group>>;

    /// 向分组加入记录，已是成员时返回 false
    fn add_to_group(&mut self, name: &str, pk: u64) -> Result<bool>;

    /// 从分组移除记录，不是成员时返回 false
    fn remove_from_group(&mut self, name: &str, pk: u64) -> Result<bool>;

    /// 将未落盘的修改写出
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// 分组成员（按加入顺序）
    fn group_members(&self, name: &str) -> Result<Vec<StoredRecord>> {
        self.group(name)?
            .members
            .iter()
            .map(|pk| self.get(*pk))
            .collect()
    }

    /// 按主键或 UUID（可为前缀）定位记录，空标识符返回 `Input` 错误
    fn resolve(&self, kind: DataKind, identifier: &str) -> Result<StoredRecord> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(GdtError::Input("empty record identifier".to_string()));
        }

        // 纯数字先按主键查找，找不到再按 UUID 前缀匹配
        if let Ok(pk) = identifier.parse::<u64>() {
            if let Ok(found) = self.get(pk) {
                found.expect_kind(kind)?;
                return Ok(found);
            }
        }

        let prefix = identifier.to_lowercase();
        let mut matches: Vec<StoredRecord> = self
            .query(kind, &QueryFilter::new())?
            .into_iter()
            .filter(|r| r.uuid.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Err(GdtError::RecordNotFound {
                kind,
                identifier: identifier.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            n => Err(GdtError::Input(format!(
                "identifier '{}' is ambiguous ({} matches)",
                identifier, n
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::cp2k_basis;
    use crate::testdata;

    #[test]
    fn test_filter_matches_alias() {
        let basis = cp2k_basis::parse_basis_sets(testdata::BASIS_DZVP_H, None)
            .next()
            .unwrap()
            .unwrap();

        assert!(QueryFilter::new().element("h").matches(&basis));
        assert!(QueryFilter::new().name("DZVP-MOLOPT-GTH").matches(&basis));
        assert!(!QueryFilter::new().name("DZVP").matches(&basis));
        assert!(QueryFilter::new()
            .tags(&["MOLOPT".to_string(), "q1".to_string()])
            .matches(&basis));
        assert!(!QueryFilter::new().version(2).matches(&basis));
    }

    #[test]
    fn test_resolve_by_pk_and_uuid() {
        let mut store = MemoryStore::new();
        let basis = cp2k_basis::parse_basis_sets(testdata::BASIS_DZVP_H, None)
            .next()
            .unwrap()
            .unwrap();
        let stored = store.create(basis.into()).unwrap();

        let by_pk = store.resolve(DataKind::BasisSet, &stored.pk.to_string()).unwrap();
        assert_eq!(by_pk.uuid, stored.uuid);

        let prefix = &stored.uuid.to_string()[..8];
        let by_uuid = store.resolve(DataKind::BasisSet, prefix).unwrap();
        assert_eq!(by_uuid.pk, stored.pk);

        assert!(matches!(
            store.resolve(DataKind::Pseudo, &stored.pk.to_string()),
            Err(GdtError::KindMismatch { .. })
        ));
        assert!(matches!(
            store.resolve(DataKind::BasisSet, "999999999"),
            Err(GdtError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_identifier() {
        let mut store = MemoryStore::new();
        let basis = cp2k_basis::parse_basis_sets(testdata::BASIS_DZVP_H, None)
            .next()
            .unwrap()
            .unwrap();
        store.create(basis.into()).unwrap();

        for identifier in ["", "   "] {
            assert!(matches!(
                store.resolve(DataKind::BasisSet, identifier),
                Err(GdtError::Input(_))
            ));
        }
    }

    #[test]
    fn test_resolve_numeric_uuid_prefix() {
        let mut seed = MemoryStore::new();
        let basis = cp2k_basis::parse_basis_sets(testdata::BASIS_DZVP_H, None)
            .next()
            .unwrap()
            .unwrap();
        seed.create(basis.into()).unwrap();

        let mut data = seed.data().clone();
        data.records[0].uuid =
            uuid::Uuid::parse_str("12345678-9abc-4def-8123-456789abcdef").unwrap();
        let store = MemoryStore::from_data(data);

        // pk 1 仍按主键解析
        assert_eq!(store.resolve(DataKind::BasisSet, "1").unwrap().pk, 1);

        let found = store.resolve(DataKind::BasisSet, "12345678").unwrap();
        assert_eq!(found.pk, 1);
        assert!(matches!(
            store.resolve(DataKind::BasisSet, "87654321"),
            Err(GdtError::RecordNotFound { .. })
        ));
    }
}
