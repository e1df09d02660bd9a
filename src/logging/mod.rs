//! 日志初始化.
//!
//! 解码库通过 `log` 门面输出日志, 这里由 tracing-subscriber 统一接管:
//! 控制台层与按日期命名的文件层, 文件写入走 tracing-appender 的非阻塞写线程.
//! 存在 tokio 运行时时会启动维护任务, 负责跨日翻滚、压缩与过期清理.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

mod task;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 文件层过滤表达式 (EnvFilter 语法, 如 `info,mpeg3_codec=debug`)
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    pub retention_days: i64,
    /// 压缩非当天的历史日志
    pub compress_history: bool,
    pub cleanup_interval_seconds: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_prefix: "mpeg3".to_string(),
            retention_days: 30,
            compress_history: true,
            cleanup_interval_seconds: 3600,
        }
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// 安装全局订阅器, 每个进程只能成功调用一次
pub fn init(config: LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("创建日志目录失败, path={}", config.directory))?;

    let rotate_requested = Arc::new(AtomicBool::new(false));
    let file_appender = CurrentFileWriter::new(
        Path::new(&config.directory),
        &config.file_prefix,
        Arc::clone(&rotate_requested),
    )?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD.set(guard).ok();

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let file_filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("无效的日志级别: {}", config.level))?;

    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(ConsoleFormatter)
        .with_filter(console_filter);

    let file_layer = fmt::Layer::default()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(file_filter);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("全局日志订阅器已被初始化")?;

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => task::spawn_log_maintenance_task(&handle, config, rotate_requested),
        Err(_) => tracing::warn!("当前没有 tokio 运行时, 日志翻滚与清理未启动"),
    }

    Ok(())
}

/// 始终写入当天日志文件, 维护任务跨日后置位 `rotate_requested` 触发重新打开
struct CurrentFileWriter {
    directory: PathBuf,
    prefix: String,
    rotate_requested: Arc<AtomicBool>,
    file: File,
}

impl CurrentFileWriter {
    fn new(directory: &Path, prefix: &str, rotate_requested: Arc<AtomicBool>) -> Result<Self> {
        let today = Local::now().date_naive();
        let file_path = build_current_log_path(directory, prefix, today);
        let file = open_append_file(&file_path)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
            rotate_requested,
            file,
        })
    }

    fn reopen_current_file(&mut self) -> std::io::Result<()> {
        let today = Local::now().date_naive();
        let file_path = build_current_log_path(&self.directory, &self.prefix, today);
        self.file = open_append_file(&file_path).map_err(std::io::Error::other)?;
        Ok(())
    }
}

impl Write for CurrentFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.rotate_requested.swap(false, Ordering::AcqRel) {
            self.reopen_current_file()?;
        }
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

fn open_append_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("打开日志文件失败, path={}", path.display()))
}

pub(crate) fn build_current_log_path(directory: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    directory.join(format!("{}.{}.log", prefix, date.format("%Y-%m-%d")))
}

fn write_timestamp(writer: &mut Writer<'_>) -> std::fmt::Result {
    let now = Local::now();
    write!(
        writer,
        "[{:02}-{:02} {:02}:{:02}:{:02}.{:03}] ",
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.timestamp_subsec_millis()
    )
}

struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write_timestamp(&mut writer)?;
        let color = match *meta.level() {
            tracing::Level::ERROR => "\x1b[31m",
            tracing::Level::WARN => "\x1b[33m",
            tracing::Level::INFO => "\x1b[32m",
            _ => "\x1b[34m",
        };
        write!(
            writer,
            "{}{:5}\x1b[0m {} > ",
            color,
            meta.level().to_string(),
            meta.target()
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// 文件格式带源码位置, 便于定位切片错误
struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write_timestamp(&mut writer)?;
        write!(
            writer,
            "{:5} {}:{} > ",
            meta.level().to_string(),
            meta.file().unwrap_or("unknown"),
            meta.line().unwrap_or(0)
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_current_log_path() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6);
        match date {
            Some(date) => {
                let path = build_current_log_path(Path::new("logs"), "mpeg3", date);
                assert_eq!(path, PathBuf::from("logs/mpeg3.2026-02-06.log"));
            }
            None => panic!("测试日期初始化失败"),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config: LoggingConfig = match serde_json::from_str(r#"{ "level": "debug" }"#) {
            Ok(config) => config,
            Err(err) => panic!("解析日志配置失败: {}", err),
        };
        assert_eq!(config.level, "debug");
        assert_eq!(config.file_prefix, "mpeg3");
        assert_eq!(config.retention_days, 30);
        assert!(config.compress_history);
    }
}
