//! 日志维护任务: 跨日翻滚、历史压缩与过期清理.

use super::{LoggingConfig, build_current_log_path};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};
use tokio::runtime::Handle;
use tracing::{debug, error};

pub(super) fn spawn_log_maintenance_task(
    handle: &Handle,
    config: LoggingConfig,
    rotate_requested: Arc<AtomicBool>,
) {
    handle.spawn(async move {
        let mut cleanup_interval =
            tokio::time::interval(Duration::from_secs(config.cleanup_interval_seconds.max(1)));
        let mut next_rollover_at = next_rollover_or_retry(Local::now());

        loop {
            tokio::select! {
                _ = cleanup_interval.tick() => {
                    if let Err(err) = cleanup_logs(&config) {
                        error!("清理日志失败: {:#}", err);
                    }
                }
                _ = tokio::time::sleep_until(next_rollover_at) => {
                    match ensure_current_log_file(&config) {
                        Ok(path) => {
                            debug!("日志翻滚到 {}", path.display());
                            rotate_requested.store(true, Ordering::Release);
                        }
                        Err(err) => error!("日志翻滚失败: {:#}", err),
                    }
                    if let Err(err) = cleanup_logs(&config) {
                        error!("翻滚后清理日志失败: {:#}", err);
                    }
                    next_rollover_at = next_rollover_or_retry(Local::now());
                }
            }
        }
    });
}

fn next_rollover_or_retry(now: DateTime<Local>) -> tokio::time::Instant {
    compute_next_rollover(now).unwrap_or_else(|err| {
        error!("计算下一次翻滚时间失败: {:#}", err);
        tokio::time::Instant::now() + Duration::from_secs(1)
    })
}

/// 创建当天的空日志文件 (已存在则不变)
fn ensure_current_log_file(config: &LoggingConfig) -> Result<PathBuf> {
    let directory = Path::new(&config.directory);
    fs::create_dir_all(directory)?;
    let today = Local::now().date_naive();
    let current_path = build_current_log_path(directory, &config.file_prefix, today);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&current_path)
        .with_context(|| format!("创建当前日志文件失败, path={}", current_path.display()))?;
    Ok(current_path)
}

fn cleanup_logs(config: &LoggingConfig) -> Result<()> {
    let directory = Path::new(&config.directory);
    if !directory.exists() {
        return Ok(());
    }

    let today = Local::now().date_naive();
    let cutoff = today - ChronoDuration::days(config.retention_days);

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some((date, compressed)) = parse_rotated_log_name(&file_name, &config.file_prefix)
        else {
            continue;
        };
        let file_path = entry.path();

        if date < cutoff {
            let _ = fs::remove_file(&file_path);
            continue;
        }
        if config.compress_history && !compressed && date < today {
            if let Err(err) = compress_to_gz(&file_path) {
                error!("压缩历史日志失败: {:#}", err);
            }
        }
    }

    Ok(())
}

fn compress_to_gz(path: &Path) -> Result<()> {
    let gz_path = PathBuf::from(format!("{}.gz", path.display()));
    if gz_path.exists() {
        return Ok(());
    }

    let mut input =
        File::open(path).with_context(|| format!("打开待压缩日志失败, path={}", path.display()))?;
    let output = File::create(&gz_path)
        .with_context(|| format!("创建压缩日志失败, path={}", gz_path.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;
    fs::remove_file(path)
        .with_context(|| format!("删除已压缩日志失败, path={}", path.display()))?;
    Ok(())
}

/// 解析 `<prefix>.<YYYY-MM-DD>.log[.gz]`, 返回日期与是否已压缩
fn parse_rotated_log_name(file_name: &str, prefix: &str) -> Option<(NaiveDate, bool)> {
    let rest = file_name.strip_prefix(prefix)?.strip_prefix('.')?;
    let (date_part, compressed) = match rest.strip_suffix(".log.gz") {
        Some(date_part) => (date_part, true),
        None => (rest.strip_suffix(".log")?, false),
    };
    if date_part.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    Some((date, compressed))
}

fn compute_next_rollover(now: DateTime<Local>) -> Result<tokio::time::Instant> {
    let next_date = now.date_naive() + ChronoDuration::days(1);
    let next_midnight = next_date
        .and_hms_opt(0, 0, 0)
        .context("计算下一次日志翻滚时间失败")?;
    let next_local = Local
        .from_local_datetime(&next_midnight)
        .earliest()
        .context("转换本地时间失败")?;
    let system_time = SystemTime::from(next_local.with_timezone(&Utc));
    let duration = system_time
        .duration_since(SystemTime::now())
        .unwrap_or(Duration::ZERO);
    Ok(tokio::time::Instant::now() + duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, LoggingConfig) {
        let temp_dir = match TempDir::new() {
            Ok(temp_dir) => temp_dir,
            Err(err) => panic!("创建临时目录失败: {}", err),
        };
        let config = LoggingConfig {
            directory: temp_dir.path().to_string_lossy().to_string(),
            file_prefix: "decoder".to_string(),
            retention_days: 7,
            ..LoggingConfig::default()
        };
        (temp_dir, config)
    }

    fn write_file(path: &Path, content: &[u8]) {
        let mut file = match File::create(path) {
            Ok(file) => file,
            Err(err) => panic!("创建文件失败: {}", err),
        };
        assert!(file.write_all(content).is_ok(), "写入文件失败");
    }

    #[test]
    fn test_parse_rotated_log_name() {
        let prefix = "decoder";
        assert_eq!(
            parse_rotated_log_name("decoder.2026-02-06.log", prefix),
            NaiveDate::from_ymd_opt(2026, 2, 6).map(|d| (d, false))
        );
        assert_eq!(
            parse_rotated_log_name("decoder.2026-02-06.log.gz", prefix),
            NaiveDate::from_ymd_opt(2026, 2, 6).map(|d| (d, true))
        );
        assert!(parse_rotated_log_name("decoder.log", prefix).is_none());
        assert!(parse_rotated_log_name("other.2026-02-06.log", prefix).is_none());
        assert!(parse_rotated_log_name("decoder.2026-2-6.log", prefix).is_none());
    }

    #[test]
    fn test_ensure_current_log_file_creates_empty_file() {
        let (_temp_dir, config) = temp_config();
        let path = match ensure_current_log_file(&config) {
            Ok(path) => path,
            Err(err) => panic!("创建当前日志文件失败: {:#}", err),
        };
        let today = Local::now().date_naive();
        assert_eq!(
            path,
            build_current_log_path(Path::new(&config.directory), "decoder", today)
        );
        let metadata = match path.metadata() {
            Ok(metadata) => metadata,
            Err(err) => panic!("读取当前日志元数据失败: {}", err),
        };
        assert_eq!(metadata.len(), 0);
    }

    #[test]
    fn test_cleanup_removes_expired_and_compresses_history() {
        let (_temp_dir, config) = temp_config();
        let directory = Path::new(&config.directory);
        let today = Local::now().date_naive();
        let path_for = |days_ago: i64| {
            build_current_log_path(directory, "decoder", today - ChronoDuration::days(days_ago))
        };
        let expired = path_for(30);
        let yesterday = path_for(1);
        let current = path_for(0);
        let unrelated = directory.join("notes.txt");
        write_file(&expired, b"old");
        write_file(&yesterday, b"yesterday");
        write_file(&current, b"today");
        write_file(&unrelated, b"keep");

        let result = cleanup_logs(&config);
        assert!(result.is_ok(), "清理失败: {:?}", result.err());

        assert!(!expired.exists(), "过期日志应被删除");
        assert!(!yesterday.exists(), "历史日志应被压缩后删除");
        assert!(current.exists(), "当天日志保持不变");
        assert!(unrelated.exists(), "无关文件保持不变");

        let gz_path = PathBuf::from(format!("{}.gz", yesterday.display()));
        let file = match File::open(&gz_path) {
            Ok(file) => file,
            Err(err) => panic!("压缩日志不存在: {}", err),
        };
        let mut content = String::new();
        assert!(GzDecoder::new(file).read_to_string(&mut content).is_ok());
        assert_eq!(content, "yesterday");
    }

    #[test]
    fn test_next_rollover_is_within_a_day() {
        let at = compute_next_rollover(Local::now());
        let at = match at {
            Ok(at) => at,
            Err(err) => panic!("计算翻滚时间失败: {:#}", err),
        };
        let wait = at.saturating_duration_since(tokio::time::Instant::now());
        assert!(wait <= Duration::from_secs(25 * 3600));
    }
}
