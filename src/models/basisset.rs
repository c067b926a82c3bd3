//! # 高斯基组数据模型
//!
//! 描述单个元素的 GTO 基组：名称/别名、标签、价电子数、版本以及收缩系数块。
//!
//! ## 依赖关系
//! - 被 `parsers/cp2k_basis.rs` 和 `commands/` 使用
//! - 使用 `models/record.rs`, `models/element.rs`

use super::element;
use super::record::{invalid, DataKind, GaussianRecord};
use crate::error::Result;

use serde::{Deserialize, Serialize};

/// 单个角动量壳层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shell {
    /// 角量子数 l
    pub l: u32,
    /// 该 l 共用同一组指数的收缩数
    pub contractions: u32,
}

/// 基组中的一个系数块（共享指数的一组壳层）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisBlock {
    /// 主量子数
    pub n: u32,

    /// l = lmin..=lmax 的壳层
    pub shells: Vec<Shell>,

    /// 每行：指数 + 每个收缩的系数
    pub coefficients: Vec<Vec<f64>>,
}

impl BasisBlock {
    pub fn lmin(&self) -> u32 {
        self.shells.first().map(|s| s.l).unwrap_or(0)
    }

    pub fn lmax(&self) -> u32 {
        self.shells.last().map(|s| s.l).unwrap_or(0)
    }

    /// 收缩总数（即每行系数个数）
    pub fn n_contractions(&self) -> usize {
        self.shells.iter().map(|s| s.contractions as usize).sum()
    }

    pub fn n_exponents(&self) -> usize {
        self.coefficients.len()
    }
}

/// 高斯基组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    /// 元素符号
    pub element: String,

    /// 名称列表，第一个为规范名称
    pub names: Vec<String>,

    /// 由规范名称按 `-` 拆分得到的标签
    pub tags: Vec<String>,

    /// 价电子数（未知时为 None）
    pub n_el: Option<u32>,

    /// 版本号，从 1 开始
    pub version: u32,

    pub blocks: Vec<BasisBlock>,
}

impl BasisSet {
    /// 生成非收缩基组：每个指数单独成块，系数为 1.0
    pub fn uncontracted(&self) -> BasisSet {
        let blocks = self
            .blocks
            .iter()
            .flat_map(|block| {
                let shells: Vec<Shell> = block
                    .shells
                    .iter()
                    .map(|s| Shell {
                        l: s.l,
                        contractions: 1,
                    })
                    .collect();

                block.coefficients.iter().map(move |row| {
                    let exponent = row.first().copied().unwrap_or_default();
                    let mut new_row = vec![exponent];
                    new_row.extend(std::iter::repeat(1.0).take(shells.len()));
                    BasisBlock {
                        n: block.n,
                        shells: shells.clone(),
                        coefficients: vec![new_row],
                    }
                })
            })
            .collect();

        let mut tags = self.tags.clone();
        tags.push("uncont".to_string());

        BasisSet {
            element: self.element.clone(),
            names: self.names.iter().map(|n| format!("{}-uncont", n)).collect(),
            tags,
            n_el: self.n_el,
            version: 1,
            blocks,
        }
    }
}

impl GaussianRecord for BasisSet {
    fn kind(&self) -> DataKind {
        DataKind::BasisSet
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
        self.n_el.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
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
        if self.blocks.is_empty() {
            return Err(invalid(self, "basis set contains no blocks"));
        }

        for (i, block) in self.blocks.iter().enumerate() {
            if block.shells.is_empty() {
                return Err(invalid(self, format!("block {} has no shells", i + 1)));
            }
            // l 必须连续递增
            if block
                .shells
                .windows(2)
                .any(|w| w[1].l != w[0].l + 1)
            {
                return Err(invalid(
                    self,
                    format!("block {} has non-consecutive angular momenta", i + 1),
                ));
            }
            if block.coefficients.is_empty() {
                return Err(invalid(self, format!("block {} has no exponents", i + 1)));
            }
            let width = block.n_contractions() + 1;
            if let Some(row) = block.coefficients.iter().find(|r| r.len() != width) {
                return Err(invalid(
                    self,
                    format!(
                        "block {} expects {} values per row, found {}",
                        i + 1,
                        width,
                        row.len()
                    ),
                ));
            }
        }

        Ok(())
    }
}
