//! 配置文件加载测试.

use std::fs;

use mpeg3::Mpeg3Config;
use tempfile::TempDir;

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().expect("创建临时目录失败");
    let path = dir.path().join("mpeg3.json");
    fs::write(
        &path,
        r#"{
            "video": { "cpus": 8, "frame_cache_enabled": true },
            "audio": { "downmix_mono": true },
            "logging": { "level": "debug", "directory": "/tmp/mpeg3-logs" }
        }"#,
    )
    .expect("写入配置失败");

    let config = Mpeg3Config::load(&path).expect("加载配置失败");
    assert_eq!(config.video.cpus, 8);
    assert!(config.video.frame_cache_enabled);
    assert_eq!(config.video.frame_cache_bytes, 64 * 1024 * 1024);
    assert!(config.audio.downmix_mono);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_prefix, "mpeg3");
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().expect("创建临时目录失败");
    let path = dir.path().join("absent.json");
    let err = Mpeg3Config::load(&path).expect_err("不存在的文件应加载失败");
    assert!(
        format!("{:#}", err).contains("absent.json"),
        "错误信息应包含路径: {:#}",
        err
    );
}

#[test]
fn test_config_round_trip_through_json() {
    let mut config = Mpeg3Config::default();
    config.video.cpus = 3;
    config.logging.retention_days = 5;
    let text = config.to_json().expect("序列化失败");
    let parsed = Mpeg3Config::from_json(&text).expect("解析失败");
    assert_eq!(parsed.video, config.video);
    assert_eq!(parsed.logging, config.logging);
}
