//! 应用级配置: 解码器与日志配置的组合, 可从 JSON 加载.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codec::{AudioConfig, VideoConfig};
use crate::logging::LoggingConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Mpeg3Config {
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub logging: LoggingConfig,
}

impl Mpeg3Config {
    /// 从 JSON 文本解析, 缺省字段取默认值
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("解析配置 JSON 失败")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败, path={}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("配置文件无效, path={}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("序列化配置失败")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Mpeg3Config::from_json(r#"{ "video": { "cpus": 4 } }"#);
        let config = match config {
            Ok(config) => config,
            Err(err) => panic!("解析失败: {:#}", err),
        };
        assert_eq!(config.video.cpus, 4);
        assert_eq!(config.video.frame_cache_bytes, VideoConfig::default().frame_cache_bytes);
        assert!(!config.audio.downmix_mono);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = Mpeg3Config::from_json(r#"{ "video": { "cpus": "many" } }"#);
        assert!(result.is_err(), "类型错误的字段应解析失败");
    }
}
