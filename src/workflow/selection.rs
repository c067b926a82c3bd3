//! # 选择语法解析
//!
//! 将用户输入解析为候选记录的下标集合。
//!
//! ## 语法
//! - 以 `n` 开头：不选
//! - 以 `a` 开头：全选
//! - 逗号分隔的序号或闭区间 `i-j`（从 1 开始，忽略空白）
//!
//! 结果为从 0 开始、升序、去重的下标。
//!
//! ## 依赖关系
//! - 被 `workflow/prompt.rs` 使用

use crate::error::{GdtError, Result};

/// 解析选择字符串
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = compact.to_lowercase();

    if lower.starts_with('n') {
        return Ok(Vec::new());
    }
    if lower.starts_with('a') {
        return Ok((0..count).collect());
    }
    if compact.is_empty() {
        return Err(GdtError::Input("empty selection".to_string()));
    }

    let mut indices = Vec::new();
    for item in compact.split(',') {
        match item.split_once('-') {
            Some((start, end)) => {
                let start = parse_index(start, count)?;
                let end = parse_index(end, count)?;
                if start > end {
                    return Err(GdtError::Input(format!("invalid range '{}'", item)));
                }
                indices.extend(start..=end);
            }
            None => indices.push(parse_index(item, count)?),
        }
    }

    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

/// 解析单个 1-based 序号，返回 0-based 下标
fn parse_index(token: &str, count: usize) -> Result<usize> {
    let n: usize = token
        .parse()
        .map_err(|_| GdtError::Input(format!("'{}' is not a number", token)))?;

    if n == 0 || n > count {
        return Err(GdtError::Input(format!(
            "{} is out of range (1-{})",
            n, count
        )));
    }
    Ok(n - 1)
}

/// 解析 y/N 确认，空输入为否
pub fn parse_confirmation(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "" | "n" | "no" => Ok(false),
        other => Err(GdtError::Input(format!("please answer y or n, not '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_range() {
        assert_eq!(parse_selection("2,4", 5).unwrap(), vec![1, 3]);
        assert_eq!(parse_selection("1-3", 5).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_selection(" 4 , 1 - 2, 2 ", 5).unwrap(), vec![0, 1, 3]);
        assert_eq!(parse_selection("3-3", 3).unwrap(), vec![2]);
    }

    #[test]
    fn test_all_and_none() {
        assert_eq!(parse_selection("a", 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_selection("All", 2).unwrap(), vec![0, 1]);
        assert!(parse_selection("n", 3).unwrap().is_empty());
        assert!(parse_selection("none", 3).unwrap().is_empty());
    }

    #[test]
    fn test_invalid() {
        for input in ["", "0", "6", "x", "3-1", "1,,2", "1-", "-2"] {
            assert!(
                matches!(parse_selection(input, 5), Err(GdtError::Input(_))),
                "accepted '{}'",
                input
            );
        }
    }

    #[test]
    fn test_confirmation() {
        assert!(parse_confirmation("Y").unwrap());
        assert!(parse_confirmation(" yes ").unwrap());
        assert!(!parse_confirmation("").unwrap());
        assert!(!parse_confirmation("n").unwrap());
        assert!(parse_confirmation("maybe").is_err());
    }
}
