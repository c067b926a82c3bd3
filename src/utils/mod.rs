//! # 工具函数模块
//!
//! 提供美化输出、日志、进度条等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `workflow/` 模块使用
//! - 子模块: output, logging, progress

pub mod logging;
pub mod output;
pub mod progress;
