//! # 通用记录模型
//!
//! 基组与赝势共享的抽象：记录类型、公共访问 trait、带身份的已存储记录。
//!
//! ## 依赖关系
//! - 被 `store/`, `workflow/`, `commands/` 使用
//! - 使用 `models/basisset.rs`, `models/pseudo.rs`

use super::basisset::BasisSet;
use super::pseudo::Pseudopotential;
use crate::error::{GdtError, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    BasisSet,
    Pseudo,
}

impl DataKind {
    /// 命令行/存储中使用的短标签
    pub fn tag(&self) -> &'static str {
        match self {
            DataKind::BasisSet => "basisset",
            DataKind::Pseudo => "pseudo",
        }
    }

    /// 复数形式的显示名称
    pub fn plural(&self) -> &'static str {
        match self {
            DataKind::BasisSet => "Gaussian Basis Sets",
            DataKind::Pseudo => "Gaussian Pseudopotentials",
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKind::BasisSet => write!(f, "Gaussian Basis Set"),
            DataKind::Pseudo => write!(f, "Gaussian Pseudopotential"),
        }
    }
}

/// 基组与赝势的公共接口
pub trait GaussianRecord {
    fn kind(&self) -> DataKind;

    fn element(&self) -> &str;

    /// 全部名称，第一个为规范名称，其余为别名
    fn names(&self) -> &[String];

    fn tags(&self) -> &[String];

    fn version(&self) -> u32;

    fn set_version(&mut self, version: u32);

    /// 价电子信息的简短表示（用于表格输出）
    fn valence_summary(&self) -> String;

    /// 检查记录自身的一致性
    fn validate(&self) -> Result<()>;

    /// 规范名称
    fn name(&self) -> &str {
        self.names().first().map(String::as_str).unwrap_or("")
    }

    /// 是否与另一条记录共享任一名称（含别名）
    fn shares_name_with(&self, other: &dyn GaussianRecord) -> bool {
        self.names().iter().any(|n| other.names().contains(n))
    }

    /// 是否包含所有给定标签
    fn has_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.tags().contains(t))
    }

    /// 名称列表的显示形式
    fn names_display(&self) -> String {
        self.names().join(", ")
    }
}

/// 两种记录的统一容器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    BasisSet(BasisSet),
    Pseudo(Pseudopotential),
}

impl Record {
    fn inner(&self) -> &dyn GaussianRecord {
        match self {
            Record::BasisSet(b) => b,
            Record::Pseudo(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn GaussianRecord {
        match self {
            Record::BasisSet(b) => b,
            Record::Pseudo(p) => p,
        }
    }

    pub fn as_basisset(&self) -> Option<&BasisSet> {
        match self {
            Record::BasisSet(b) => Some(b),
            Record::Pseudo(_) => None,
        }
    }
}

impl GaussianRecord for Record {
    fn kind(&self) -> DataKind {
        self.inner().kind()
    }

    fn element(&self) -> &str {
        self.inner().element()
    }

    fn names(&self) -> &[String] {
        self.inner().names()
    }

    fn tags(&self) -> &[String] {
        self.inner().tags()
    }

    fn version(&self) -> u32 {
        self.inner().version()
    }

    fn set_version(&mut self, version: u32) {
        self.inner_mut().set_version(version)
    }

    fn valence_summary(&self) -> String {
        self.inner().valence_summary()
    }

    fn validate(&self) -> Result<()> {
        self.inner().validate()
    }
}

impl From<BasisSet> for Record {
    fn from(b: BasisSet) -> Self {
        Record::BasisSet(b)
    }
}

impl From<Pseudopotential> for Record {
    fn from(p: Pseudopotential) -> Self {
        Record::Pseudo(p)
    }
}

/// 已持久化的记录（带身份信息），创建后不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// 存储分配的递增主键
    pub pk: u64,

    pub uuid: Uuid,

    pub created: DateTime<Utc>,

    pub record: Record,
}

impl StoredRecord {
    /// 校验记录类型
    pub fn expect_kind(&self, kind: DataKind) -> Result<&Self> {
        if self.record.kind() == kind {
            Ok(self)
        } else {
            Err(GdtError::KindMismatch {
                pk: self.pk,
                expected: kind,
                found: self.record.kind(),
            })
        }
    }
}

/// 记录校验失败的快捷构造
pub(crate) fn invalid(record: &dyn GaussianRecord, reason: impl Into<String>) -> GdtError {
    GdtError::Validation {
        kind: record.kind(),
        name: format!("{} {}", record.element(), record.name()),
        reason: reason.into(),
    }
}
