//! 解码后的帧数据.
//!
//! 视频帧为按编码尺寸存储的 Y/Cb/Cr 平面, 音频帧为平面浮点 PCM.

use std::fmt;
use std::sync::Arc;

use mpeg3_core::{ChromaFormat, Rational};

/// 图像编码类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PictureType {
    /// 帧内编码
    #[default]
    I,
    /// 前向预测
    P,
    /// 双向预测
    B,
    /// 仅 DC 的 MPEG-1 图像
    D,
}

impl PictureType {
    /// 由 picture_coding_type 构造 (1..=4)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::I),
            2 => Some(Self::P),
            3 => Some(Self::B),
            4 => Some(Self::D),
            _ => None,
        }
    }

    /// 是否为参考图像 (I/P)
    pub fn is_reference(self) -> bool {
        matches!(self, Self::I | Self::P)
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::I => "I",
            Self::P => "P",
            Self::B => "B",
            Self::D => "D",
        };
        f.write_str(s)
    }
}

/// 视频帧
///
/// 平面按编码尺寸 (16 的倍数) 存储, `display_width`/`display_height` 为序列头中的显示尺寸.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// 输出顺序的帧序号
    pub frame_number: u64,
    /// 图像类型
    pub picture_type: PictureType,
    /// 编码宽度 (亮度平面行宽)
    pub width: u32,
    /// 编码高度
    pub height: u32,
    /// 显示宽度
    pub display_width: u32,
    /// 显示高度
    pub display_height: u32,
    /// 色度格式
    pub chroma_format: ChromaFormat,
    /// 帧率
    pub frame_rate: Rational,
    /// 亮度平面
    pub y: Arc<[u8]>,
    /// Cb 平面
    pub cb: Arc<[u8]>,
    /// Cr 平面
    pub cr: Arc<[u8]>,
}

impl VideoFrame {
    /// 色度平面尺寸
    pub fn chroma_size(&self) -> (u32, u32) {
        let (w, h) = self
            .chroma_format
            .chroma_size(self.width as usize, self.height as usize);
        (w as u32, h as u32)
    }

    /// 读取亮度样本
    pub fn luma_at(&self, x: u32, y: u32) -> u8 {
        self.y[(y * self.width + x) as usize]
    }
}

/// 音频帧 (平面浮点 PCM, 标称范围 [-1, 1])
#[derive(Debug, Clone, Default)]
pub struct AudioFrame {
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 声道数
    pub channels: u32,
    /// 每声道一个采样序列
    pub samples: Vec<Vec<f32>>,
}

impl AudioFrame {
    /// 每声道采样数
    pub fn nb_samples(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }
}

/// 帧 (视频帧或音频帧的统一包装)
#[derive(Debug, Clone)]
pub enum Frame {
    /// 视频帧
    Video(VideoFrame),
    /// 音频帧
    Audio(AudioFrame),
}

impl Frame {
    /// 取出视频帧
    pub fn into_video(self) -> Option<VideoFrame> {
        match self {
            Self::Video(v) => Some(v),
            Self::Audio(_) => None,
        }
    }

    /// 取出音频帧
    pub fn into_audio(self) -> Option<AudioFrame> {
        match self {
            Self::Audio(a) => Some(a),
            Self::Video(_) => None,
        }
    }
}
