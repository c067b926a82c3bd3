//! # CP2K 基组格式解析器
//!
//! 解析与写出 CP2K 的 `BASIS_*` 文件格式。
//!
//! ## 格式说明
//! ```text
//! Element  Name  [Alias ...]
//! nset                                  (基组包含的块数)
//! n  lmin  lmax  nexp  nshell(lmin) ... nshell(lmax)
//! exp(1)   c(1,1) ... c(1,nshell_total)
//! ...
//! exp(nexp) ...
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `registry.rs` 使用
//! - 使用 `models/basisset.rs`

use super::{Entry, EntryIter, RecordIter};
use crate::error::ParseError;
use crate::models::element;
use crate::models::{names_and_tags, valence_tag, BasisBlock, BasisSet, GaussianRecord, Record, Shell};

use once_cell::sync::Lazy;
use regex::Regex;

/// 条目头行：元素符号后跟一个或多个名称
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<element>[a-zA-Z]{1,3})\s+(?P<names>\S.*?)\s*$").unwrap());

/// 惰性解析基组文件，`element` 不为空时只解析该元素
pub fn parse_basis_sets<'a>(
    content: &'a str,
    element: Option<&'a str>,
) -> impl Iterator<Item = Result<BasisSet, ParseError>> + 'a {
    EntryIter::new(content, &HEADER, element).map(|entry| entry.and_then(|e| parse_entry(&e)))
}

/// 注册表使用的统一入口
pub fn parse_records<'a>(content: &'a str, element: Option<&'a str>) -> RecordIter<'a> {
    Box::new(parse_basis_sets(content, element).map(|r| r.map(Record::from)))
}

/// 解析单个条目
pub fn parse_entry(entry: &Entry) -> Result<BasisSet, ParseError> {
    let symbol = element::canonical_symbol(entry.element)
        .ok_or_else(|| entry.error(entry.line, format!("unknown element '{}'", entry.element)))?;

    if entry.identifiers.is_empty() {
        return Err(entry.error(entry.line, "missing basis set name"));
    }

    let (names, tags) = names_and_tags(entry.identifiers.iter().map(|s| s.to_string()).collect());

    // 显式 qN 优先；ALL/ALLELECTRON 表示全电子基组
    let mut n_el = valence_tag(&tags);
    if n_el.is_none() && tags.iter().any(|t| t == "ALL" || t == "ALLELECTRON") {
        n_el = element::atomic_number(symbol);
    }

    let mut tokens = entry.tokens();
    let fail = |tokens: &super::Tokens, reason: String| entry.error(tokens.line(), reason);

    let n_blocks = tokens
        .next_u32("number of sets")
        .map_err(|r| fail(&tokens, r))?;

    let mut blocks = Vec::new();

    for _ in 0..n_blocks {
        let n = tokens
            .next_u32("principal quantum number")
            .map_err(|r| fail(&tokens, r))?;
        let lmin = tokens.next_u32("lmin").map_err(|r| fail(&tokens, r))?;
        let lmax = tokens.next_u32("lmax").map_err(|r| fail(&tokens, r))?;
        let nexp = tokens
            .next_u32("number of exponents")
            .map_err(|r| fail(&tokens, r))?;

        if lmax < lmin {
            return Err(fail(&tokens, format!("lmax ({}) < lmin ({})", lmax, lmin)));
        }

        let mut shells = Vec::new();
        for l in lmin..=lmax {
            let contractions = tokens
                .next_u32("number of contractions")
                .map_err(|r| fail(&tokens, r))?;
            shells.push(Shell { l, contractions });
        }

        let width = 1 + shells.iter().map(|s| s.contractions as usize).sum::<usize>();
        let mut coefficients = Vec::new();
        for _ in 0..nexp {
            let row = tokens
                .next_f64s(width, "exponent/coefficient")
                .map_err(|r| fail(&tokens, r))?;
            coefficients.push(row);
        }

        blocks.push(BasisBlock {
            n,
            shells,
            coefficients,
        });
    }

    if let Some((line, tok)) = tokens.remaining() {
        return Err(entry.error(line, format!("unexpected trailing data '{}'", tok)));
    }

    let basis = BasisSet {
        element: symbol.to_string(),
        names,
        tags,
        n_el,
        version: 1,
        blocks,
    };

    basis
        .validate()
        .map_err(|e| entry.error(entry.line, e.to_string()))?;

    Ok(basis)
}

/// 带符号位占位的定点格式（正数前补空格）
fn fmt_signed(value: f64, width: usize, precision: usize) -> String {
    let s = if value.is_sign_negative() {
        format!("{:.*}", precision, value)
    } else {
        format!(" {:.*}", precision, value)
    };
    format!("{:>width$}", s, width = width)
}

/// 将基组写为 CP2K 格式
pub fn write_basis_set(basis: &BasisSet, comment: &str) -> String {
    let mut out = String::new();

    if !comment.is_empty() {
        out.push_str(&format!("# {}\n", comment));
    }

    out.push_str(&format!("{} {}\n", basis.element, basis.names.join(" ")));
    out.push_str(&format!("{}\n", basis.blocks.len()));

    for block in &basis.blocks {
        let counts: Vec<String> = block
            .shells
            .iter()
            .map(|s| s.contractions.to_string())
            .collect();
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            block.n,
            block.lmin(),
            block.lmax(),
            block.n_exponents(),
            counts.join(" ")
        ));

        for row in &block.coefficients {
            let (exponent, coeffs) = match row.split_first() {
                Some(split) => split,
                None => continue,
            };
            let coeffs: Vec<String> = coeffs.iter().map(|c| fmt_signed(*c, 14, 12)).collect();
            out.push_str(&format!("{:>18.12} {}\n", exponent, coeffs.join(" ")));
        }
    }

    out
}
