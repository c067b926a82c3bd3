//! # 日志输出
//!
//! `log` 门面的终端实现，输出样式与 `utils::output` 一致，写到 stderr。
//! 默认只显示警告和错误，`-v` 打开 info，`-vv` 打开 debug。
//!
//! ## 依赖关系
//! - 被 `main.rs` 初始化
//! - 使用 `log`, `colored` crate

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "[ERR]".red().bold(),
            Level::Warn => "[WARN]".yellow().bold(),
            Level::Info => "[*]".blue().bold(),
            Level::Debug => "[DEBUG]".dimmed(),
            Level::Trace => "[TRACE]".dimmed(),
        };
        eprintln!("{} {}", tag, record.args());
    }

    fn flush(&self) {}
}

/// 由 `-v` 次数得到日志级别
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 安装日志器，重复调用时保留第一次安装的实例
pub fn init(verbosity: u8) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_for(verbosity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
