//! 解码器配置.

use serde::{Deserialize, Serialize};

/// 视频解码配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// 切片工作线程数 (受可用并行度与上限约束)
    pub cpus: usize,
    /// 帧缓存容量 (字节)
    pub frame_cache_bytes: usize,
    /// 是否启用帧缓存
    pub frame_cache_enabled: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            cpus: 1,
            frame_cache_bytes: 64 * 1024 * 1024,
            frame_cache_enabled: false,
        }
    }
}

/// 音频解码配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// 立体声下混为单声道
    pub downmix_mono: bool,
}
