//! # 分组模型
//!
//! 同一类型记录的有序命名集合，用于按来源文件或项目组织导入结果。
//! 记录与分组为多对多关系。
//!
//! ## 依赖关系
//! - 被 `store/` 和 `commands/group.rs` 使用
//! - 使用 `models/record.rs`

use super::record::{DataKind, GaussianRecord, StoredRecord};
use crate::error::{GdtError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 记录分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,

    pub kind: DataKind,

    #[serde(default)]
    pub description: Option<String>,

    /// 成员主键，保持加入顺序且不重复
    #[serde(default)]
    pub members: Vec<u64>,
}

impl Group {
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Group {
            name: name.into(),
            kind,
            description: None,
            members: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// 加入成员，已存在时返回 false
    pub fn add(&mut self, pk: u64) -> bool {
        if self.members.contains(&pk) {
            false
        } else {
            self.members.push(pk);
            true
        }
    }

    /// 移除成员，不存在时返回 false
    pub fn remove(&mut self, pk: u64) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != pk);
        self.members.len() != before
    }
}

/// 按元素归类分组成员
///
/// `elements` 为空时返回全部元素；指定的元素没有任何记录时报错。
pub fn by_element(
    group: &Group,
    records: Vec<StoredRecord>,
    elements: &[String],
) -> Result<BTreeMap<String, Vec<StoredRecord>>> {
    let mut map: BTreeMap<String, Vec<StoredRecord>> = BTreeMap::new();

    for rec in records {
        let element = rec.record.element().to_string();
        if elements.is_empty() || elements.iter().any(|e| e.eq_ignore_ascii_case(&element)) {
            map.entry(element).or_default().push(rec);
        }
    }

    for wanted in elements {
        if !map.keys().any(|k| k.eq_ignore_ascii_case(wanted)) {
            return Err(GdtError::RecordNotFound {
                kind: group.kind,
                identifier: format!("element {} in group '{}'", wanted, group.name),
            });
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_ordered_unique() {
        let mut g = Group::new("test", DataKind::Pseudo);
        assert!(g.add(3));
        assert!(g.add(1));
        assert!(!g.add(3));
        assert_eq!(g.members, vec![3, 1]);

        assert!(g.remove(3));
        assert!(!g.remove(3));
        assert_eq!(g.members, vec![1]);
    }

    #[test]
    fn test_by_element_missing() {
        let g = Group::new("empty", DataKind::Pseudo);
        let err = by_element(&g, vec![], &["Li".to_string()]);
        assert!(err.is_err());
        assert!(by_element(&g, vec![], &[]).unwrap().is_empty());
    }
}
