//! # mpeg3-codec
//!
//! MPEG 基本流解码核心: 切片并行的 MPEG-1/2 视频解码器与 Layer III 音频解码器.
//!
//! 两个解码器都从 [`ByteSource`](mpeg3_core::ByteSource) 拉取数据, 实现统一的 [`Decoder`] trait.
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use mpeg3_codec::{AudioConfig, AudioDecoder, Decoder};
//! use mpeg3_core::MemorySource;
//!
//! let data = std::fs::read("track.mp3").unwrap();
//! let mut dec = AudioDecoder::new(MemorySource::new(data), AudioConfig::default());
//! while let Some(frame) = dec.decode_frame().unwrap() {
//!     let pcm = frame.into_audio().unwrap();
//!     println!("{} 个采样", pcm.nb_samples());
//! }
//! ```

pub mod audio;
pub mod cache;
pub mod config;
pub mod decoder;
pub mod frame;
pub mod video;
mod vlc;

// 重导出常用类型
pub use audio::{AudioDecoder, AudioStats};
pub use cache::{CachedFrame, FrameCache, PlaneSizes};
pub use config::{AudioConfig, VideoConfig};
pub use decoder::Decoder;
pub use frame::{AudioFrame, Frame, PictureType, VideoFrame};
pub use video::{VideoDecoder, VideoStats};
