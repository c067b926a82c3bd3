//! # 高斯赝势数据模型
//!
//! GTH 型赝势：各角动量价电子数、局域部分、可选的非线性芯校正 (NLCC)
//! 以及非局域投影子。
//!
//! ## 依赖关系
//! - 被 `parsers/cp2k_pseudo.rs` 和 `commands/` 使用
//! - 使用 `models/record.rs`, `models/element.rs`

use super::element;
use super::record::{invalid, DataKind, GaussianRecord};
use crate::error::Result;

use serde::{Deserialize, Serialize};

/// 局域部分：r_loc 与 C_i 系数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalPart {
    pub r: f64,
    pub coefficients: Vec<f64>,
}

/// 非线性芯校正项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlccTerm {
    pub r: f64,
    pub coefficients: Vec<f64>,
}

/// 某一角动量的非局域投影子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projector {
    pub r: f64,

    /// 投影子个数
    pub nproj: u32,

    /// h 矩阵上三角，按行展开，长度为 nproj*(nproj+1)/2
    pub coefficients: Vec<f64>,
}

impl Projector {
    pub fn expected_len(nproj: u32) -> usize {
        let n = nproj as usize;
        n * (n + 1) / 2
    }

    /// 按行拆分上三角：第 i 行有 nproj - i 个元素
    pub fn rows(&self) -> Vec<&[f64]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for width in (1..=self.nproj as usize).rev() {
            let end = (start + width).min(self.coefficients.len());
            rows.push(&self.coefficients[start..end]);
            start = end;
        }
        rows
    }
}

/// 高斯赝势
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pseudopotential {
    pub element: String,

    /// 名称列表，第一个为规范名称
    pub names: Vec<String>,

    pub tags: Vec<String>,

    /// 各角动量 (s, p, d, ...) 的价电子数
    pub n_el: Vec<u32>,

    pub version: u32,

    pub local: LocalPart,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nlcc: Vec<NlccTerm>,

    pub non_local: Vec<Projector>,
}

impl Pseudopotential {
    /// 价电子总数，求和溢出时为 None
    pub fn n_valence(&self) -> Option<u32> {
        self.n_el.iter().try_fold(0u32, |acc, &n| acc.checked_add(n))
    }
}

impl GaussianRecord for Pseudopotential {
    fn kind(&self) -> DataKind {
        DataKind::Pseudo
    }

    fn element(&self) -> &str {
        &self.element
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn valence_summary(&self) -> String {
        self.n_el
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn validate(&self) -> Result<()> {
        if element::atomic_number(&self.element).is_none() {
            return Err(invalid(self, format!("unknown element '{}'", self.element)));
        }
        if self.names.is_empty() || self.names.iter().any(|n| n.is_empty()) {
            return Err(invalid(self, "names must be non-empty"));
        }
        if self.version < 1 {
            return Err(invalid(self, "version must be >= 1"));
        }
        if self.n_el.is_empty() {
            return Err(invalid(self, "missing electron configuration"));
        }

        let n_valence = self
            .n_valence()
            .ok_or_else(|| invalid(self, "electron configuration overflows"))?;

        if let Some(q) = super::valence_tag(&self.tags) {
            if q != n_valence {
                return Err(invalid(
                    self,
                    format!(
                        "q{} tag does not match electron configuration (sum = {})",
                        q, n_valence
                    ),
                ));
            }
        }

        for (i, proj) in self.non_local.iter().enumerate() {
            let expected = Projector::expected_len(proj.nproj);
            if proj.coefficients.len() != expected {
                return Err(invalid(
                    self,
                    format!(
                        "projector {} expects {} coefficients, found {}",
                        i + 1,
                        expected,
                        proj.coefficients.len()
                    ),
                ));
            }
        }

        Ok(())
    }
}
