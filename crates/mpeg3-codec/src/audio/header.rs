//! MPEG 音频帧头解析.
//!
//! 帧头布局 (32 位): `AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM`
//! 同步字 11 位, 版本 2 位, 层 2 位, CRC 保护 1 位, 码率 4 位, 采样率 2 位,
//! 填充 1 位, 私有位 1 位, 声道模式 2 位, 模式扩展 2 位, 版权/原始 2 位, 加重 2 位.

use mpeg3_core::{Mpeg3Error, Mpeg3Result};

/// 帧头长度 (字节)
pub const HEADER_BYTES: usize = 4;

/// MPEG 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    /// MPEG-1
    Mpeg1,
    /// MPEG-2 低采样率扩展
    Mpeg2,
    /// 非官方 MPEG-2.5
    Mpeg25,
}

/// 音频层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Layer I
    I,
    /// Layer II
    II,
    /// Layer III
    III,
}

/// 声道模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// 立体声
    Stereo,
    /// 联合立体声 (MS / 强度立体声)
    JointStereo,
    /// 双声道
    DualChannel,
    /// 单声道
    Mono,
}

/// 音频帧头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// 帧头后跟随 16 位 CRC
    pub has_crc: bool,
    /// 码率 (bit/s)
    pub bitrate: u32,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    pub padding: bool,
    pub mode: ChannelMode,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: u8,
    /// 整帧字节数 (含帧头)
    pub frame_size: usize,
    sample_rate_index: usize,
}

impl FrameHeader {
    /// 解析 4 字节帧头
    ///
    /// 自由格式 (码率索引 0) 返回 [`Mpeg3Error::Unsupported`].
    pub fn parse(header: u32) -> Mpeg3Result<Self> {
        if header & 0xFFE0_0000 != 0xFFE0_0000 {
            return Err(Mpeg3Error::InvalidData("音频同步字无效".into()));
        }

        let version = match (header >> 19) & 0x3 {
            3 => MpegVersion::Mpeg1,
            2 => MpegVersion::Mpeg2,
            0 => MpegVersion::Mpeg25,
            _ => return Err(Mpeg3Error::InvalidData("保留的 MPEG 版本".into())),
        };
        let layer = match (header >> 17) & 0x3 {
            3 => Layer::I,
            2 => Layer::II,
            1 => Layer::III,
            _ => return Err(Mpeg3Error::InvalidData("保留的音频层".into())),
        };
        let has_crc = (header >> 16) & 0x1 == 0;

        let bitrate_index = ((header >> 12) & 0xF) as usize;
        if bitrate_index == 15 {
            return Err(Mpeg3Error::InvalidData("无效的码率索引".into()));
        }
        if bitrate_index == 0 {
            return Err(Mpeg3Error::Unsupported("自由格式码率".into()));
        }
        let rate_code = ((header >> 10) & 0x3) as usize;
        if rate_code == 3 {
            return Err(Mpeg3Error::InvalidData("无效的采样率索引".into()));
        }

        let padding = (header >> 9) & 0x1 == 1;
        let mode = match (header >> 6) & 0x3 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };
        let mode_extension = ((header >> 4) & 0x3) as u8;
        let copyright = (header >> 3) & 0x1 == 1;
        let original = (header >> 2) & 0x1 == 1;
        let emphasis = (header & 0x3) as u8;

        let sample_rate_index = match version {
            MpegVersion::Mpeg1 => rate_code,
            MpegVersion::Mpeg2 => 3 + rate_code,
            MpegVersion::Mpeg25 => 6 + rate_code,
        };
        let sample_rate = SAMPLE_RATES[sample_rate_index];
        let bitrate = lookup_bitrate(version, layer, bitrate_index) * 1000;

        let pad = usize::from(padding);
        let frame_size = match (layer, version) {
            (Layer::I, _) => (12 * bitrate / sample_rate) as usize * 4 + pad * 4,
            (Layer::II, _) | (Layer::III, MpegVersion::Mpeg1) => {
                (144 * bitrate / sample_rate) as usize + pad
            }
            (Layer::III, _) => (72 * bitrate / sample_rate) as usize + pad,
        };

        Ok(Self {
            version,
            layer,
            has_crc,
            bitrate,
            sample_rate,
            padding,
            mode,
            mode_extension,
            copyright,
            original,
            emphasis,
            frame_size,
            sample_rate_index,
        })
    }

    /// 是否为低采样率帧 (MPEG-2 / 2.5: 每帧一个颗粒)
    pub fn is_lsf(&self) -> bool {
        self.version != MpegVersion::Mpeg1
    }

    /// 声道数
    pub fn channels(&self) -> usize {
        if self.mode == ChannelMode::Mono { 1 } else { 2 }
    }

    /// 每帧颗粒数
    pub fn granules(&self) -> usize {
        if self.is_lsf() { 1 } else { 2 }
    }

    /// 每声道采样数
    pub fn samples_per_frame(&self) -> usize {
        match self.layer {
            Layer::I => 384,
            Layer::II => 1152,
            Layer::III => 576 * self.granules(),
        }
    }

    /// Layer III 侧信息字节数
    pub fn side_info_size(&self) -> usize {
        match (self.is_lsf(), self.channels()) {
            (false, 1) => 17,
            (false, _) => 32,
            (true, 1) => 9,
            (true, _) => 17,
        }
    }

    /// 主数据字节数 (帧内, 不含位储备)
    pub fn main_data_size(&self) -> usize {
        let crc = if self.has_crc { 2 } else { 0 };
        self.frame_size
            .saturating_sub(HEADER_BYTES + crc + self.side_info_size())
    }

    /// 采样率索引 (0..9, 与比例因子频带表对应)
    pub fn sample_rate_index(&self) -> usize {
        self.sample_rate_index
    }

    /// 联合立体声下的 MS 立体声
    pub fn ms_stereo(&self) -> bool {
        self.mode == ChannelMode::JointStereo && self.mode_extension & 0x2 != 0
    }

    /// 联合立体声下的强度立体声
    pub fn intensity_stereo(&self) -> bool {
        self.mode == ChannelMode::JointStereo && self.mode_extension & 0x1 != 0
    }
}

const SAMPLE_RATES: [u32; 9] = [
    44100, 48000, 32000, 22050, 24000, 16000, 11025, 12000, 8000,
];

fn lookup_bitrate(version: MpegVersion, layer: Layer, index: usize) -> u32 {
    // kbps
    const V1_L1: [u32; 15] = [
        0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448,
    ];
    const V1_L2: [u32; 15] = [
        0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384,
    ];
    const V1_L3: [u32; 15] = [
        0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320,
    ];
    const V2_L1: [u32; 15] = [
        0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256,
    ];
    const V2_L23: [u32; 15] = [
        0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160,
    ];

    match (version, layer) {
        (MpegVersion::Mpeg1, Layer::I) => V1_L1[index],
        (MpegVersion::Mpeg1, Layer::II) => V1_L2[index],
        (MpegVersion::Mpeg1, Layer::III) => V1_L3[index],
        (_, Layer::I) => V2_L1[index],
        (_, _) => V2_L23[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mpeg1_layer3() {
        // 128 kbps, 44.1 kHz, 无 CRC, 立体声
        let h = FrameHeader::parse(0xFFFB_9000).expect("解析失败");
        assert_eq!(h.version, MpegVersion::Mpeg1);
        assert_eq!(h.layer, Layer::III);
        assert!(!h.has_crc);
        assert_eq!(h.bitrate, 128_000);
        assert_eq!(h.sample_rate, 44100);
        assert_eq!(h.frame_size, 417);
        assert_eq!(h.channels(), 2);
        assert_eq!(h.side_info_size(), 32);
        assert_eq!(h.main_data_size(), 417 - 4 - 32);
        assert_eq!(h.samples_per_frame(), 1152);
    }

    #[test]
    fn test_parse_lsf_mono() {
        // MPEG-2, 64 kbps, 22.05 kHz, 单声道, 填充
        let h = FrameHeader::parse(0xFFF3_82C0).expect("解析失败");
        assert_eq!(h.version, MpegVersion::Mpeg2);
        assert!(h.is_lsf());
        assert_eq!(h.sample_rate, 22050);
        assert_eq!(h.sample_rate_index(), 3);
        assert_eq!(h.frame_size, 72 * 64_000 / 22050 + 1);
        assert_eq!(h.channels(), 1);
        assert_eq!(h.side_info_size(), 9);
        assert_eq!(h.samples_per_frame(), 576);
    }

    #[test]
    fn test_layer2_recognized() {
        // MPEG-1 Layer II, 192 kbps, 48 kHz
        let h = FrameHeader::parse(0xFFFD_A400).expect("解析失败");
        assert_eq!(h.layer, Layer::II);
        assert_eq!(h.frame_size, 144 * 192_000 / 48000);
    }

    #[test]
    fn test_free_format_unsupported() {
        let err = FrameHeader::parse(0xFFFB_0000).unwrap_err();
        assert!(matches!(err, Mpeg3Error::Unsupported(_)), "自由格式应拒绝");
    }

    #[test]
    fn test_invalid_headers() {
        assert!(FrameHeader::parse(0x1234_5678).is_err());
        assert!(FrameHeader::parse(0xFFFB_F000).is_err(), "码率索引 15");
        assert!(FrameHeader::parse(0xFFFB_9C00).is_err(), "采样率索引 3");
        assert!(FrameHeader::parse(0xFFF9_9000).is_err(), "保留的层");
    }

    #[test]
    fn test_joint_stereo_flags() {
        let h = FrameHeader::parse(0xFFFB_9060).expect("解析失败");
        assert_eq!(h.mode, ChannelMode::JointStereo);
        assert!(h.ms_stereo());
        assert!(!h.intensity_stereo());
    }
}
