//! # mpeg3
//!
//! 纯 Rust 实现的 MPEG 基本流解码核心.
//!
//! - **视频**: MPEG-1/MPEG-2 (4:2:0/4:2:2/4:4:4), 切片级多线程解码, 可选帧缓存
//! - **音频**: MPEG-1/2 Layer II/III, 含位储备与联合立体声
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use mpeg3::codec::{Decoder, VideoConfig, VideoDecoder};
//! use mpeg3::core::MemorySource;
//!
//! let data = std::fs::read("movie.m1v").unwrap();
//! let config = VideoConfig { cpus: 4, ..VideoConfig::default() };
//! let mut dec = VideoDecoder::new(MemorySource::new(data), config);
//! while let Some(frame) = dec.decode_frame().unwrap() {
//!     let frame = frame.into_video().unwrap();
//!     println!("帧 {}: {}x{}", frame.frame_number, frame.width, frame.height);
//! }
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `mpeg3-core` | 错误类型、字节源、位游标 |
//! | `mpeg3-codec` | 视频与音频解码器 |

pub mod config;
pub mod logging;

/// 核心类型与工具
pub use mpeg3_core as core;

/// 视频与音频解码器
pub use mpeg3_codec as codec;

pub use config::Mpeg3Config;

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
