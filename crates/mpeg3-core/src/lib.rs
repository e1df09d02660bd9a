//! # mpeg3-core
//!
//! mpeg3 核心库: 统一错误类型、拉取式字节源、位游标与码流构造工具.
//!
//! 视频切片解码和 Layer III 音频解码都只通过 [`BitCursor`] 读取码流.

pub mod bitcursor;
pub mod bitwriter;
pub mod chroma;
pub mod error;
pub mod rational;
pub mod source;

// 重导出常用类型
pub use bitcursor::{BitCursor, Direction};
pub use bitwriter::BitWriter;
pub use chroma::ChromaFormat;
pub use error::{Mpeg3Error, Mpeg3Result};
pub use rational::Rational;
pub use source::{ByteSource, MemorySource, ReaderSource, SliceSource};
