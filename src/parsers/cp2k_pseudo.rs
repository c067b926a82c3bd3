//! # CP2K GTH 赝势格式解析器
//!
//! 解析与写出 CP2K 的 `GTH_POTENTIALS` 文件格式。
//!
//! ## 格式说明
//! ```text
//! Element  Name  [Alias ...]
//! n_elec(s)  n_elec(p)  n_elec(d)  ...
//! r_loc   nexp_ppl   cexp_ppl(1) ... cexp_ppl(nexp_ppl)
//! [NLCC  n_nlcc
//!  r_core  n_core  c_core(1) ... c_core(n_core)]
//! nprj
//! r(1)    nprj_ppnl(1)   ((hprj_ppnl(1,i,j),j=i,nprj_ppnl(1)),i=1,nprj_ppnl(1))
//! ...
//! ```
//! 非局域部分的上三角矩阵可以跨行书写。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `registry.rs` 使用
//! - 使用 `models/pseudo.rs`

use super::{Entry, EntryIter, RecordIter, Tokens};
use crate::error::ParseError;
use crate::models::element;
use crate::models::{
    names_and_tags, GaussianRecord, LocalPart, NlccTerm, Projector, Pseudopotential, Record,
};

use once_cell::sync::Lazy;
use regex::Regex;

/// 条目头行：1~2 个字母的元素符号，避免误匹配 `NLCC` 行
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<element>[A-Z][a-z]?)\s+(?P<names>\S.*?)\s*$").unwrap());

/// 惰性解析赝势文件
pub fn parse_pseudos<'a>(
    content: &'a str,
    element: Option<&'a str>,
) -> impl Iterator<Item = Result<Pseudopotential, ParseError>> + 'a {
    EntryIter::new(content, &HEADER, element).map(|entry| entry.and_then(|e| parse_entry(&e)))
}

/// 注册表使用的统一入口
pub fn parse_records<'a>(content: &'a str, element: Option<&'a str>) -> RecordIter<'a> {
    Box::new(parse_pseudos(content, element).map(|r| r.map(Record::from)))
}

/// 解析单个条目
pub fn parse_entry(entry: &Entry) -> Result<Pseudopotential, ParseError> {
    let symbol = element::canonical_symbol(entry.element)
        .ok_or_else(|| entry.error(entry.line, format!("unknown element '{}'", entry.element)))?;

    if entry.identifiers.is_empty() {
        return Err(entry.error(entry.line, "missing pseudopotential name"));
    }

    let (names, tags) = names_and_tags(entry.identifiers.iter().map(|s| s.to_string()).collect());

    // 电子组态独占一行，个数不定
    let (config_line, config_text) = entry
        .body
        .first()
        .copied()
        .ok_or_else(|| entry.error(entry.line, "missing electron configuration"))?;

    let n_el = config_text
        .split_whitespace()
        .map(|t| t.parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| entry.error(config_line, format!("invalid electron configuration '{}'", config_text.trim())))?;

    let mut tokens = Tokens::new(&entry.body[1..]);
    let fail = |tokens: &Tokens, reason: String| entry.error(tokens.line(), reason);

    // 局域部分
    let r_loc = tokens.next_f64("r_loc").map_err(|r| fail(&tokens, r))?;
    let nexp = tokens.next_u32("nexp_ppl").map_err(|r| fail(&tokens, r))?;
    let local_coeffs = tokens
        .next_f64s(nexp as usize, "cexp_ppl")
        .map_err(|r| fail(&tokens, r))?;

    // 可选的 NLCC 部分
    let mut nlcc = Vec::new();
    if tokens
        .peek()
        .map(|t| t.eq_ignore_ascii_case("NLCC"))
        .unwrap_or(false)
    {
        tokens.next_str("NLCC").map_err(|r| fail(&tokens, r))?;
        let n_terms = tokens.next_u32("n_nlcc").map_err(|r| fail(&tokens, r))?;
        for _ in 0..n_terms {
            let r = tokens.next_f64("r_core").map_err(|r| fail(&tokens, r))?;
            let n = tokens.next_u32("n_core").map_err(|r| fail(&tokens, r))?;
            let coefficients = tokens
                .next_f64s(n as usize, "c_core")
                .map_err(|r| fail(&tokens, r))?;
            nlcc.push(NlccTerm { r, coefficients });
        }
    }

    // 非局域投影子
    let nprj = tokens.next_u32("nprj").map_err(|r| fail(&tokens, r))?;
    let mut non_local = Vec::new();
    for _ in 0..nprj {
        let r = tokens.next_f64("r").map_err(|r| fail(&tokens, r))?;
        let nproj = tokens.next_u32("nprj_ppnl").map_err(|r| fail(&tokens, r))?;
        let coefficients = tokens
            .next_f64s(Projector::expected_len(nproj), "hprj_ppnl")
            .map_err(|r| fail(&tokens, r))?;
        non_local.push(Projector {
            r,
            nproj,
            coefficients,
        });
    }

    if let Some((line, tok)) = tokens.remaining() {
        return Err(entry.error(line, format!("unexpected trailing data '{}'", tok)));
    }

    let pseudo = Pseudopotential {
        element: symbol.to_string(),
        names,
        tags,
        n_el,
        version: 1,
        local: LocalPart {
            r: r_loc,
            coefficients: local_coeffs,
        },
        nlcc,
        non_local,
    };

    pseudo
        .validate()
        .map_err(|e| entry.error(entry.line, e.to_string()))?;

    Ok(pseudo)
}

fn fmt_float(value: f64) -> String {
    format!("{:>15.8}", value)
}

fn fmt_int(value: impl std::fmt::Display) -> String {
    format!("{:>5}", value)
}

/// 将赝势写为 CP2K 格式
pub fn write_pseudo(pseudo: &Pseudopotential, comment: &str) -> String {
    let mut out = String::new();

    if !comment.is_empty() {
        out.push_str(&format!("# {}\n", comment));
    }

    out.push_str(&format!("{} {}\n", pseudo.element, pseudo.names.join(" ")));

    for n in &pseudo.n_el {
        out.push_str(&fmt_int(n));
    }
    out.push('\n');

    out.push_str(&fmt_float(pseudo.local.r));
    out.push_str(&fmt_int(pseudo.local.coefficients.len()));
    for c in &pseudo.local.coefficients {
        out.push_str(&fmt_float(*c));
    }
    out.push('\n');

    if !pseudo.nlcc.is_empty() {
        out.push_str(&format!("NLCC{}\n", fmt_int(pseudo.nlcc.len())));
        for term in &pseudo.nlcc {
            out.push_str(&fmt_float(term.r));
            out.push_str(&fmt_int(term.coefficients.len()));
            for c in &term.coefficients {
                out.push_str(&fmt_float(*c));
            }
            out.push('\n');
        }
    }

    out.push_str(&fmt_int(pseudo.non_local.len()));
    out.push('\n');

    for proj in &pseudo.non_local {
        out.push_str(&fmt_float(proj.r));
        out.push_str(&fmt_int(proj.nproj));

        let rows = proj.rows();
        if rows.is_empty() {
            out.push('\n');
        }
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                // 对齐到上三角矩阵的第 i 列
                out.push_str(&" ".repeat(20 + 15 * i));
            }
            for c in row.iter() {
                out.push_str(&fmt_float(*c));
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    fn parse_all() -> Vec<Pseudopotential> {
        parse_pseudos(testdata::GTH_POTENTIALS, None)
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_parse_file() {
        let pseudos = parse_all();
        assert_eq!(pseudos.len(), 5);

        let he = &pseudos[1];
        assert_eq!(he.element, "He");
        assert_eq!(he.names, vec!["GTH-PBE-q2", "GTH-PBE"]);
        assert_eq!(he.tags, vec!["GTH", "PBE", "q2"]);
        assert_eq!(he.n_el, vec![2]);
        assert_eq!(he.local.coefficients, vec![-9.12214383, 1.70270770]);
        assert!(he.non_local.is_empty());
    }

    #[test]
    fn test_parse_multiline_projector() {
        let pseudos = parse_all();
        let li = pseudos.iter().find(|p| p.element == "Li").unwrap();
        assert_eq!(li.non_local.len(), 2);
        assert_eq!(li.non_local[0].nproj, 2);
        assert_eq!(li.non_local[0].coefficients, vec![0.18915810, 4.32456052, -5.55556070]);
        assert_eq!(li.non_local[1].coefficients, vec![0.00119000]);
    }

    #[test]
    fn test_parse_nlcc() {
        let pseudos = parse_all();
        let c = pseudos.iter().find(|p| p.element == "C").unwrap();
        assert_eq!(c.n_el, vec![2, 2]);
        assert_eq!(c.nlcc.len(), 1);
        assert_eq!(c.nlcc[0].coefficients, vec![1.16952366]);
        assert_eq!(c.non_local[1].nproj, 0);
        assert!(c.non_local[1].coefficients.is_empty());
    }

    #[test]
    fn test_valence_mismatch_is_recoverable() {
        let content = "He GTH-BAD-q3\n    2\n 0.2 2 -9.1 1.7\n 0\n\
                       H GTH-PBE-q1\n    1\n 0.2 2 -4.1 0.7\n 0\n";
        let results: Vec<_> = parse_pseudos(content, None).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap_err().section, "He GTH-BAD-q3");
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_oversized_counts_are_errors() {
        let content = "He GTH-HUGE-PRJ\n    2\n 0.2 0\n 4294967295\n\
                       He GTH-HUGE-LOCAL\n    2\n 0.2 4294967295 -9.1\n 0\n\
                       H GTH-PBE-q1\n    1\n 0.2 2 -4.1 0.7\n 0\n";
        let results: Vec<_> = parse_pseudos(content, None).collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap_err().section, "He GTH-HUGE-PRJ");
        assert_eq!(results[1].as_ref().unwrap_err().section, "He GTH-HUGE-LOCAL");
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_valence_overflow_is_error() {
        let content = "He GTH-PBE-q2\n 4294967295 3\n 0.2 0\n 0\n\
                       H GTH-PBE-q1\n    1\n 0.2 2 -4.1 0.7\n 0\n";
        let results: Vec<_> = parse_pseudos(content, None).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap_err().section, "He GTH-PBE-q2");
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_round_trip() {
        for original in parse_all() {
            let text = write_pseudo(&original, "");
            let reparsed = parse_pseudos(&text, None).next().unwrap().unwrap();
            assert_eq!(reparsed, original, "round trip failed:\n{}", text);
        }
    }
}
