//! 序列/GOP/图像头与扩展解析.
//!
//! 所有解析函数假设起始码 (32 位) 已被消费.

use log::{debug, warn};
use mpeg3_core::{BitCursor, ByteSource, ChromaFormat, Mpeg3Error, Mpeg3Result, Rational};

use super::tables::{
    ALTERNATE_SCAN, DEFAULT_INTRA_MATRIX, DEFAULT_NON_INTRA_MATRIX, NON_LINEAR_QUANT_SCALE,
    ZIGZAG_SCAN,
};
use crate::frame::PictureType;

pub(super) const PICTURE_START_CODE: u8 = 0x00;
pub(super) const SLICE_START_MIN: u8 = 0x01;
pub(super) const SLICE_START_MAX: u8 = 0xAF;
pub(super) const USER_DATA_START_CODE: u8 = 0xB2;
pub(super) const SEQUENCE_HEADER_CODE: u8 = 0xB3;
pub(super) const EXTENSION_START_CODE: u8 = 0xB5;
pub(super) const SEQUENCE_END_CODE: u8 = 0xB7;
pub(super) const GROUP_START_CODE: u8 = 0xB8;

const EXT_SEQUENCE: u32 = 1;
const EXT_SEQUENCE_DISPLAY: u32 = 2;
const EXT_QUANT_MATRIX: u32 = 3;
const EXT_SEQUENCE_SCALABLE: u32 = 5;
const EXT_PICTURE_CODING: u32 = 8;

/// 是否为切片起始码
pub(super) fn is_slice_code(code: u8) -> bool {
    (SLICE_START_MIN..=SLICE_START_MAX).contains(&code)
}

/// 按之字形顺序读取 64 个量化矩阵元素, 存为自然顺序
fn read_matrix<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<[u8; 64]> {
    let mut m = [0u8; 64];
    for &pos in ZIGZAG_SCAN.iter() {
        let v = bc.getbits(8) as u8;
        if v == 0 {
            return Err(Mpeg3Error::InvalidData("量化矩阵元素为 0".into()));
        }
        m[pos as usize] = v;
    }
    Ok(m)
}

/// 四个量化矩阵 (自然顺序)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantMatrices {
    pub intra: [u8; 64],
    pub non_intra: [u8; 64],
    pub chroma_intra: [u8; 64],
    pub chroma_non_intra: [u8; 64],
}

impl Default for QuantMatrices {
    fn default() -> Self {
        Self {
            intra: DEFAULT_INTRA_MATRIX,
            non_intra: DEFAULT_NON_INTRA_MATRIX,
            chroma_intra: DEFAULT_INTRA_MATRIX,
            chroma_non_intra: DEFAULT_NON_INTRA_MATRIX,
        }
    }
}

/// 序列头
#[derive(Debug, Clone)]
pub struct SequenceHeader {
    pub horizontal_size: u32,
    pub vertical_size: u32,
    pub aspect_ratio_code: u8,
    pub frame_rate_code: u8,
    /// 单位 400 bit/s
    pub bit_rate: u32,
    pub vbv_buffer_size: u32,
    pub constrained: bool,
    pub matrices: QuantMatrices,
}

impl SequenceHeader {
    pub(super) fn parse<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<Self> {
        let horizontal_size = bc.getbits(12);
        let vertical_size = bc.getbits(12);
        let aspect_ratio_code = bc.getbits(4) as u8;
        let frame_rate_code = bc.getbits(4) as u8;
        let bit_rate = bc.getbits(18);
        bc.getbits(1); // marker
        let vbv_buffer_size = bc.getbits(10);
        let constrained = bc.get1bit();

        let mut matrices = QuantMatrices::default();
        if bc.get1bit() {
            matrices.intra = read_matrix(bc)?;
        }
        if bc.get1bit() {
            matrices.non_intra = read_matrix(bc)?;
        }
        matrices.chroma_intra = matrices.intra;
        matrices.chroma_non_intra = matrices.non_intra;

        if horizontal_size == 0 || vertical_size == 0 {
            return Err(Mpeg3Error::InvalidData(format!(
                "序列头尺寸无效: {}x{}",
                horizontal_size, vertical_size
            )));
        }
        if bc.has_error() {
            return Err(Mpeg3Error::InvalidData("序列头被截断".into()));
        }
        debug!(
            "序列头: {}x{}, frame_rate_code={}, bit_rate={}",
            horizontal_size,
            vertical_size,
            frame_rate_code,
            bit_rate * 400
        );
        Ok(Self {
            horizontal_size,
            vertical_size,
            aspect_ratio_code,
            frame_rate_code,
            bit_rate,
            vbv_buffer_size,
            constrained,
            matrices,
        })
    }
}

/// 序列扩展 (MPEG-2)
#[derive(Debug, Clone, Copy)]
pub struct SequenceExtension {
    pub profile_and_level: u8,
    pub progressive_sequence: bool,
    pub chroma_format: ChromaFormat,
    pub low_delay: bool,
    pub frame_rate_ext_n: u8,
    pub frame_rate_ext_d: u8,
}

/// 时间可分级的图像复用参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureMux {
    pub to_progressive_sequence: bool,
    pub order: u8,
    pub factor: u8,
}

/// 可分级层的类型与参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalableLayer {
    DataPartitioning,
    Spatial {
        /// 下层预测图像尺寸
        lower_width: u16,
        lower_height: u16,
        /// 上采样因子 (m, n), 水平与垂直
        horizontal: (u8, u8),
        vertical: (u8, u8),
    },
    Snr,
    Temporal {
        picture_mux: Option<PictureMux>,
    },
}

/// 序列可分级扩展 (增强层码流)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceScalableExtension {
    pub layer_id: u8,
    pub layer: ScalableLayer,
}

impl SequenceScalableExtension {
    fn parse<S: ByteSource>(bc: &mut BitCursor<S>) -> Self {
        let mode = bc.getbits(2);
        let layer_id = bc.getbits(4) as u8;
        let layer = match mode {
            0 => ScalableLayer::DataPartitioning,
            1 => {
                let lower_width = bc.getbits(14) as u16;
                bc.getbits(1); // marker
                let lower_height = bc.getbits(14) as u16;
                let h_m = bc.getbits(5) as u8;
                let h_n = bc.getbits(5) as u8;
                let v_m = bc.getbits(5) as u8;
                let v_n = bc.getbits(5) as u8;
                ScalableLayer::Spatial {
                    lower_width,
                    lower_height,
                    horizontal: (h_m, h_n),
                    vertical: (v_m, v_n),
                }
            }
            2 => ScalableLayer::Snr,
            _ => {
                let mux_enable = bc.get1bit();
                let to_progressive_sequence = mux_enable && bc.get1bit();
                let mux = PictureMux {
                    to_progressive_sequence,
                    order: bc.getbits(3) as u8,
                    factor: bc.getbits(3) as u8,
                };
                ScalableLayer::Temporal {
                    picture_mux: mux_enable.then_some(mux),
                }
            }
        };
        Self { layer_id, layer }
    }

    /// 本层能否脱离下层单独解码
    ///
    /// 时间可分级增强层沿用基本层的宏块语法; 空间、SNR 与数据分割增强层
    /// 需要下层的预测或系数, 无法单独重建.
    pub fn decodable_alone(&self) -> bool {
        matches!(self.layer, ScalableLayer::Temporal { .. })
    }
}

/// GOP 头
#[derive(Debug, Clone, Copy, Default)]
pub struct GopHeader {
    /// 25 位时间码
    pub time_code: u32,
    pub closed_gop: bool,
    pub broken_link: bool,
}

impl GopHeader {
    pub(super) fn parse<S: ByteSource>(bc: &mut BitCursor<S>) -> Self {
        let time_code = bc.getbits(25);
        let closed_gop = bc.get1bit();
        let broken_link = bc.get1bit();
        debug!(
            "GOP: time_code={:#x}, closed={}, broken_link={}",
            time_code, closed_gop, broken_link
        );
        Self {
            time_code,
            closed_gop,
            broken_link,
        }
    }
}

/// 图像结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PictureStructure {
    TopField,
    BottomField,
    #[default]
    Frame,
}

impl PictureStructure {
    fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::TopField),
            2 => Some(Self::BottomField),
            3 => Some(Self::Frame),
            _ => None,
        }
    }

    /// 场图像的场奇偶性 (顶场 0, 底场 1)
    pub fn parity(self) -> usize {
        match self {
            Self::BottomField => 1,
            _ => 0,
        }
    }

    pub fn is_field(self) -> bool {
        self != Self::Frame
    }
}

/// 图像头
#[derive(Debug, Clone, Copy)]
pub struct PictureHeader {
    pub temporal_reference: u16,
    pub picture_type: PictureType,
    pub vbv_delay: u16,
    pub full_pel_forward: bool,
    pub forward_f_code: u8,
    pub full_pel_backward: bool,
    pub backward_f_code: u8,
}

impl PictureHeader {
    pub(super) fn parse<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<Self> {
        let temporal_reference = bc.getbits(10) as u16;
        let code = bc.getbits(3);
        let picture_type = PictureType::from_code(code).ok_or_else(|| {
            Mpeg3Error::InvalidData(format!("无效的 picture_coding_type: {}", code))
        })?;
        let vbv_delay = bc.getbits(16) as u16;
        let mut header = Self {
            temporal_reference,
            picture_type,
            vbv_delay,
            full_pel_forward: false,
            forward_f_code: 1,
            full_pel_backward: false,
            backward_f_code: 1,
        };
        if matches!(picture_type, PictureType::P | PictureType::B) {
            header.full_pel_forward = bc.get1bit();
            header.forward_f_code = bc.getbits(3) as u8;
        }
        if picture_type == PictureType::B {
            header.full_pel_backward = bc.get1bit();
            header.backward_f_code = bc.getbits(3) as u8;
        }
        // extra_information_picture
        while bc.get1bit() {
            bc.getbits(8);
            if bc.has_error() {
                break;
            }
        }
        debug!(
            "图像头: type={}, temporal_reference={}",
            picture_type, temporal_reference
        );
        Ok(header)
    }
}

/// 图像编码扩展 (MPEG-2)
#[derive(Debug, Clone, Copy)]
pub struct PictureCodingExtension {
    /// [方向][水平/垂直]
    pub f_code: [[u8; 2]; 2],
    pub intra_dc_precision: u8,
    pub picture_structure: PictureStructure,
    pub top_field_first: bool,
    pub frame_pred_frame_dct: bool,
    pub concealment_motion_vectors: bool,
    pub q_scale_type: bool,
    pub intra_vlc_format: bool,
    pub alternate_scan: bool,
    pub repeat_first_field: bool,
    pub progressive_frame: bool,
}

/// 解析结果: 扩展起始码之后的内容
#[derive(Debug, Clone)]
pub(super) enum Extension {
    Sequence(SequenceExtension),
    QuantMatrix {
        intra: Option<[u8; 64]>,
        non_intra: Option<[u8; 64]>,
        chroma_intra: Option<[u8; 64]>,
        chroma_non_intra: Option<[u8; 64]>,
    },
    PictureCoding(PictureCodingExtension),
    SequenceScalable(SequenceScalableExtension),
    /// 解析但不使用的扩展 (显示扩展、版权扩展等)
    Ignored(u32),
}

impl Extension {
    pub(super) fn parse<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<Self> {
        let id = bc.getbits(4);
        match id {
            EXT_SEQUENCE => {
                let profile_and_level = bc.getbits(8) as u8;
                let progressive_sequence = bc.get1bit();
                let chroma_code = bc.getbits(2);
                let chroma_format = ChromaFormat::from_code(chroma_code).ok_or_else(|| {
                    Mpeg3Error::InvalidData(format!("保留的 chroma_format: {}", chroma_code))
                })?;
                let h_ext = bc.getbits(2);
                let v_ext = bc.getbits(2);
                let _bit_rate_ext = bc.getbits(12);
                bc.getbits(1); // marker
                let _vbv_ext = bc.getbits(8);
                let low_delay = bc.get1bit();
                let frame_rate_ext_n = bc.getbits(2) as u8;
                let frame_rate_ext_d = bc.getbits(5) as u8;
                if h_ext != 0 || v_ext != 0 {
                    return Err(Mpeg3Error::Unsupported(format!(
                        "超过 4095 的图像尺寸扩展: h={}, v={}",
                        h_ext, v_ext
                    )));
                }
                debug!(
                    "序列扩展: profile_level={:#x}, progressive={}, chroma={}",
                    profile_and_level, progressive_sequence, chroma_format
                );
                Ok(Self::Sequence(SequenceExtension {
                    profile_and_level,
                    progressive_sequence,
                    chroma_format,
                    low_delay,
                    frame_rate_ext_n,
                    frame_rate_ext_d,
                }))
            }
            EXT_QUANT_MATRIX => {
                let mut load = || -> Mpeg3Result<Option<[u8; 64]>> {
                    if bc.get1bit() {
                        read_matrix(bc).map(Some)
                    } else {
                        Ok(None)
                    }
                };
                let intra = load()?;
                let non_intra = load()?;
                let chroma_intra = load()?;
                let chroma_non_intra = load()?;
                Ok(Self::QuantMatrix {
                    intra,
                    non_intra,
                    chroma_intra,
                    chroma_non_intra,
                })
            }
            EXT_PICTURE_CODING => {
                let mut f_code = [[0u8; 2]; 2];
                for dir in f_code.iter_mut() {
                    for fc in dir.iter_mut() {
                        *fc = bc.getbits(4) as u8;
                    }
                }
                let intra_dc_precision = bc.getbits(2) as u8;
                let code = bc.getbits(2);
                let picture_structure = PictureStructure::from_code(code).ok_or_else(|| {
                    Mpeg3Error::InvalidData("picture_structure 为保留值 0".into())
                })?;
                let ext = PictureCodingExtension {
                    f_code,
                    intra_dc_precision,
                    picture_structure,
                    top_field_first: bc.get1bit(),
                    frame_pred_frame_dct: bc.get1bit(),
                    concealment_motion_vectors: bc.get1bit(),
                    q_scale_type: bc.get1bit(),
                    intra_vlc_format: bc.get1bit(),
                    alternate_scan: bc.get1bit(),
                    repeat_first_field: bc.get1bit(),
                    progressive_frame: {
                        let _chroma_420_type = bc.get1bit();
                        bc.get1bit()
                    },
                };
                if bc.get1bit() {
                    // composite_display_flag
                    bc.getbits(20);
                }
                Ok(Self::PictureCoding(ext))
            }
            EXT_SEQUENCE_SCALABLE => {
                let ext = SequenceScalableExtension::parse(bc);
                debug!("序列可分级扩展: layer_id={}, {:?}", ext.layer_id, ext.layer);
                Ok(Self::SequenceScalable(ext))
            }
            EXT_SEQUENCE_DISPLAY => Ok(Self::Ignored(id)),
            other => {
                warn!("忽略扩展 id={}", other);
                Ok(Self::Ignored(other))
            }
        }
    }
}

/// 序列级状态 (序列头 + 可选序列扩展)
#[derive(Debug, Clone)]
pub(super) struct SequenceState {
    pub header: SequenceHeader,
    pub extension: Option<SequenceExtension>,
    /// 增强层码流的可分级扩展
    pub scalable: Option<SequenceScalableExtension>,
    /// 当前生效的量化矩阵 (可被量化矩阵扩展覆盖)
    pub matrices: QuantMatrices,
}

impl SequenceState {
    pub fn new(header: SequenceHeader) -> Self {
        let matrices = header.matrices;
        Self {
            header,
            extension: None,
            scalable: None,
            matrices,
        }
    }

    pub fn is_mpeg2(&self) -> bool {
        self.extension.is_some()
    }

    pub fn chroma_format(&self) -> ChromaFormat {
        self.extension
            .map_or(ChromaFormat::Yuv420, |e| e.chroma_format)
    }

    pub fn progressive_sequence(&self) -> bool {
        self.extension.map_or(true, |e| e.progressive_sequence)
    }

    /// 宏块列数
    pub fn mb_width(&self) -> usize {
        (self.header.horizontal_size as usize).div_ceil(16)
    }

    /// 整帧宏块行数 (隔行 MPEG-2 序列按 32 行对齐)
    pub fn mb_height(&self) -> usize {
        let h = self.header.vertical_size as usize;
        if self.is_mpeg2() && !self.progressive_sequence() {
            2 * h.div_ceil(32)
        } else {
            h.div_ceil(16)
        }
    }

    pub fn frame_rate(&self) -> Rational {
        let (n, d) = self
            .extension
            .map_or((0, 0), |e| (e.frame_rate_ext_n, e.frame_rate_ext_d));
        Rational::from_frame_rate_code(self.header.frame_rate_code, n, d)
    }

    /// 应用量化矩阵扩展
    pub fn apply_quant_matrix_extension(
        &mut self,
        intra: Option<[u8; 64]>,
        non_intra: Option<[u8; 64]>,
        chroma_intra: Option<[u8; 64]>,
        chroma_non_intra: Option<[u8; 64]>,
    ) {
        if let Some(m) = intra {
            self.matrices.intra = m;
            self.matrices.chroma_intra = m;
        }
        if let Some(m) = non_intra {
            self.matrices.non_intra = m;
            self.matrices.chroma_non_intra = m;
        }
        if let Some(m) = chroma_intra {
            self.matrices.chroma_intra = m;
        }
        if let Some(m) = chroma_non_intra {
            self.matrices.chroma_non_intra = m;
        }
    }
}

/// 单幅图像的解码参数, 在切片工作线程间只读共享
#[derive(Debug, Clone)]
pub struct PictureParams {
    pub mpeg2: bool,
    pub picture_type: PictureType,
    pub structure: PictureStructure,
    /// 是否为场对中的第二场
    pub second_field: bool,
    pub chroma_format: ChromaFormat,
    /// 宏块列数
    pub mb_width: usize,
    /// 本图像的宏块行数 (场图像为整帧的一半)
    pub mb_height: usize,
    /// 编码高度 (整帧, 像素)
    pub coded_height: usize,
    /// [方向][水平/垂直]
    pub f_code: [[u8; 2]; 2],
    /// MPEG-1 full_pel 标志, 按方向
    pub full_pel: [bool; 2],
    pub intra_dc_precision: u8,
    pub top_field_first: bool,
    pub frame_pred_frame_dct: bool,
    pub concealment_motion_vectors: bool,
    pub q_scale_type: bool,
    pub intra_vlc_format: bool,
    pub matrices: QuantMatrices,
    pub scan: &'static [u8; 64],
}

impl PictureParams {
    pub(super) fn new(
        seq: &SequenceState,
        header: &PictureHeader,
        coding: Option<&PictureCodingExtension>,
        second_field: bool,
    ) -> Self {
        let mpeg2 = seq.is_mpeg2();
        let frame_mb_height = seq.mb_height();
        let mut params = Self {
            mpeg2,
            picture_type: header.picture_type,
            structure: PictureStructure::Frame,
            second_field,
            chroma_format: seq.chroma_format(),
            mb_width: seq.mb_width(),
            mb_height: frame_mb_height,
            coded_height: frame_mb_height * 16,
            f_code: [
                [header.forward_f_code; 2],
                [header.backward_f_code; 2],
            ],
            full_pel: [header.full_pel_forward, header.full_pel_backward],
            intra_dc_precision: 0,
            top_field_first: true,
            frame_pred_frame_dct: true,
            concealment_motion_vectors: false,
            q_scale_type: false,
            intra_vlc_format: false,
            matrices: seq.matrices,
            scan: &ZIGZAG_SCAN,
        };
        if let (true, Some(ext)) = (mpeg2, coding) {
            params.structure = ext.picture_structure;
            params.f_code = ext.f_code;
            params.full_pel = [false; 2];
            params.intra_dc_precision = ext.intra_dc_precision;
            params.top_field_first = ext.top_field_first;
            params.frame_pred_frame_dct = ext.frame_pred_frame_dct;
            params.concealment_motion_vectors = ext.concealment_motion_vectors;
            params.q_scale_type = ext.q_scale_type;
            params.intra_vlc_format = ext.intra_vlc_format;
            if ext.alternate_scan {
                params.scan = &ALTERNATE_SCAN;
            }
            if ext.picture_structure.is_field() {
                params.mb_height = frame_mb_height / 2;
            }
        }
        params
    }

    /// 宏块总数
    pub fn mb_count(&self) -> usize {
        self.mb_width * self.mb_height
    }

    /// 由 quantiser_scale_code 求量化步长 (MPEG-2 单位, MPEG-1 为 2 倍码值)
    pub fn quantiser_scale(&self, code: u8) -> i32 {
        if self.q_scale_type {
            i32::from(NON_LINEAR_QUANT_SCALE[usize::from(code & 31)])
        } else {
            i32::from(code) * 2
        }
    }
}
