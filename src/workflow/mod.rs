//! # 导入流程模块
//!
//! 导入流程中与存储和用户交互相关的部分：去重、选择语法、提示输入。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `store/`, `models/`
//! - 子模块: dedup, selection, prompt

pub mod dedup;
pub mod prompt;
pub mod selection;

pub use dedup::ExistingRecordIndex;
pub use prompt::{LineSource, Selector, TermSource};

#[cfg(test)]
pub use prompt::ScriptedSource;
