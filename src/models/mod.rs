//! # 数据模型模块
//!
//! 定义基组、赝势、分组以及共享的记录抽象。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `store/` 和 `commands/` 使用
//! - 子模块: basisset, pseudo, record, group, element

pub mod basisset;
pub mod element;
pub mod group;
pub mod pseudo;
pub mod record;

pub use basisset::{BasisBlock, BasisSet, Shell};
pub use group::Group;
pub use pseudo::{LocalPart, NlccTerm, Projector, Pseudopotential};
pub use record::{DataKind, GaussianRecord, Record, StoredRecord};

use once_cell::sync::Lazy;
use regex::Regex;

static VALENCE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^q(\d+)$").unwrap());

/// 由头行的标识符得到 (名称, 标签)
///
/// 最长的标识符作为规范名称（部分库用 `<NAME>-qN` 标明价电子数），
/// 其余按出现顺序作为别名；标签为规范名称按 `-` 拆分。
pub fn names_and_tags(mut identifiers: Vec<String>) -> (Vec<String>, Vec<String>) {
    // 稳定排序，等长时保持原顺序
    identifiers.sort_by_key(|i| std::cmp::Reverse(i.len()));

    let mut names: Vec<String> = Vec::with_capacity(identifiers.len());
    for ident in identifiers {
        if !names.contains(&ident) {
            names.push(ident);
        }
    }

    let tags = names
        .first()
        .map(|n| n.split('-').filter(|t| !t.is_empty()).map(String::from).collect())
        .unwrap_or_default();

    (names, tags)
}

/// 从标签中提取价电子数 `qN`
///
/// 出现多个互相矛盾的 `q` 标签时全部忽略。
pub fn valence_tag(tags: &[String]) -> Option<u32> {
    let mut found: Option<u32> = None;
    for tag in tags {
        let Some(caps) = VALENCE_TAG.captures(tag) else {
            continue;
        };
        let Ok(n) = caps[1].parse::<u32>() else {
            continue;
        };
        match found {
            None => found = Some(n),
            Some(prev) if prev != n => return None,
            Some(_) => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_names_longest_first() {
        let (names, tags) = names_and_tags(strings(&["DZVP-MOLOPT-GTH", "DZVP-MOLOPT-GTH-q1"]));
        assert_eq!(names, strings(&["DZVP-MOLOPT-GTH-q1", "DZVP-MOLOPT-GTH"]));
        assert_eq!(tags, strings(&["DZVP", "MOLOPT", "GTH", "q1"]));
    }

    #[test]
    fn test_names_dedup() {
        let (names, _) = names_and_tags(strings(&["SZV", "SZV"]));
        assert_eq!(names, strings(&["SZV"]));
    }

    #[test]
    fn test_valence_tag() {
        assert_eq!(valence_tag(&strings(&["GTH", "PBE", "q4"])), Some(4));
        assert_eq!(valence_tag(&strings(&["GTH", "PBE"])), None);
        assert_eq!(valence_tag(&strings(&["q1", "q1"])), Some(1));
        assert_eq!(valence_tag(&strings(&["q1", "q3"])), None);
    }
}
