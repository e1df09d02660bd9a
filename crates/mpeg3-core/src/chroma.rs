//! 色度采样格式.

use std::fmt;

/// 色度采样格式 (sequence_extension 中的 chroma_format)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChromaFormat {
    /// 4:2:0, 色度水平与垂直减半
    #[default]
    Yuv420,
    /// 4:2:2, 色度仅水平减半
    Yuv422,
    /// 4:4:4, 无色度减采样
    Yuv444,
}

impl ChromaFormat {
    /// 由 2 位码值解析, 0 为保留值
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Yuv420),
            2 => Some(Self::Yuv422),
            3 => Some(Self::Yuv444),
            _ => None,
        }
    }

    /// 每个宏块的 8x8 块数 (4 个亮度块 + 色度块)
    pub const fn block_count(self) -> usize {
        match self {
            Self::Yuv420 => 6,
            Self::Yuv422 => 8,
            Self::Yuv444 => 12,
        }
    }

    /// 色度水平方向是否减半
    pub const fn half_width(self) -> bool {
        !matches!(self, Self::Yuv444)
    }

    /// 色度垂直方向是否减半
    pub const fn half_height(self) -> bool {
        matches!(self, Self::Yuv420)
    }

    /// 给定亮度尺寸时的色度平面尺寸
    pub const fn chroma_size(self, width: usize, height: usize) -> (usize, usize) {
        let w = if self.half_width() { width / 2 } else { width };
        let h = if self.half_height() { height / 2 } else { height };
        (w, h)
    }
}

impl fmt::Display for ChromaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yuv420 => "4:2:0",
            Self::Yuv422 => "4:2:2",
            Self::Yuv444 => "4:4:4",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chroma_geometry() {
        assert_eq!(ChromaFormat::Yuv420.chroma_size(352, 288), (176, 144));
        assert_eq!(ChromaFormat::Yuv422.chroma_size(720, 480), (360, 480));
        assert_eq!(ChromaFormat::Yuv444.chroma_size(64, 32), (64, 32));
        assert_eq!(ChromaFormat::Yuv422.block_count(), 8);
        assert_eq!(ChromaFormat::from_code(0), None);
    }
}
