//! # 统一错误处理模块
//!
//! 定义 gdt 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `models::DataKind` 标注记录类型

use crate::models::DataKind;
use thiserror::Error;

/// 单条记录的解析错误
///
/// `section` 标识出错的条目（元素 + 名称），解析器在记录边界处恢复，
/// 一条错误不会中断同一文件中其余条目的解析。
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Malformed entry '{section}' (line {line}): {reason}")]
pub struct ParseError {
    pub section: String,
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(section: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        ParseError {
            section: section.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// gdt 统一错误类型
#[derive(Error, Debug)]
pub enum GdtError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析与校验
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid {kind} '{name}': {reason}")]
    Validation {
        kind: DataKind,
        name: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 存储错误
    // ─────────────────────────────────────────────────────────────
    #[error("{kind} already exists for element={element}, name={name}, version={version}")]
    DuplicateRecord {
        kind: DataKind,
        element: String,
        name: String,
        version: u32,
    },

    #[error("No {kind} found for '{identifier}'")]
    RecordNotFound { kind: DataKind, identifier: String },

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group already exists: {0}")]
    GroupExists(String),

    #[error("Record {pk} is a {found}, expected a {expected}")]
    KindMismatch {
        pk: u64,
        expected: DataKind,
        found: DataKind,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Corrupt store file: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 用户输入
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    Input(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GdtError>;
