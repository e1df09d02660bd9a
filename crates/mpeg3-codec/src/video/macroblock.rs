//! 宏块头与 DCT 系数解码.

use bitflags::bitflags;
use log::trace;
use mpeg3_core::{BitCursor, ByteSource, ChromaFormat, Mpeg3Error, Mpeg3Result};

use super::headers::PictureStructure;
use super::slice::{SliceDecoder, has_motion};
use super::vlc::{
    CoeffTable, DCT_EOB, DCT_ESCAPE, decode_cbp, decode_coeff, decode_dc_differential,
    decode_mb_type,
};
use crate::frame::PictureType;

bitflags! {
    /// 宏块类型标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MacroblockType: u8 {
        const QUANT = 0x10;
        const MOTION_FORWARD = 0x08;
        const MOTION_BACKWARD = 0x04;
        const PATTERN = 0x02;
        const INTRA = 0x01;
    }
}

/// 运动补偿类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionKind {
    /// 帧预测 (帧图像) 或 MPEG-1
    #[default]
    Frame,
    /// 场预测
    Field,
    /// 16x8 预测 (仅场图像)
    Sixteen8,
    /// dual prime (仅 P 图像)
    DualPrime,
}

/// 宏块的运动信息
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionState {
    pub kind: MotionKind,
    /// 仅含 MOTION_FORWARD / MOTION_BACKWARD
    pub directions: MacroblockType,
    /// [r][方向][水平/垂直], 半像素单位; 场预测的垂直分量为场内单位
    pub vectors: [[[i32; 2]; 2]; 2],
    /// [r][方向] 参考场奇偶性
    pub field_select: [[usize; 2]; 2],
    /// dual prime 推导出的异奇偶性矢量
    /// 帧图像: [0] 顶场自底场, [1] 底场自顶场; 场图像只用 [0]
    pub dual_prime: [[i32; 2]; 2],
}

impl MotionState {
    /// 零矢量前向预测 (P 图像跳过宏块与无运动补偿宏块)
    pub fn zero_forward(structure: PictureStructure) -> Self {
        let mut m = Self {
            directions: MacroblockType::MOTION_FORWARD,
            ..Self::default()
        };
        if structure.is_field() {
            m.kind = MotionKind::Field;
            m.field_select[0][0] = structure.parity();
        }
        m
    }
}

/// 解码后的宏块, 交给重建阶段后即丢弃
pub(super) struct Macroblock {
    pub mb_type: MacroblockType,
    pub motion: MotionState,
    /// 帧图像中的场 DCT
    pub field_dct: bool,
    /// 编码块模式, 第 0 块对应最高位
    pub cbp: u16,
    pub blocks: [[i32; 64]; 12],
}

impl Default for Macroblock {
    fn default() -> Self {
        Self {
            mb_type: MacroblockType::empty(),
            motion: MotionState::default(),
            field_dct: false,
            cbp: 0,
            blocks: [[0; 64]; 12],
        }
    }
}

impl Macroblock {
    /// 第 `block` 块是否编码
    pub fn is_coded(&self, block: usize, block_count: usize) -> bool {
        self.cbp & (1 << (block_count - 1 - block)) != 0
    }
}

impl SliceDecoder<'_> {
    fn read_motion_type<S: ByteSource>(&self, bc: &mut BitCursor<S>) -> Mpeg3Result<MotionKind> {
        let p = self.params;
        if p.structure == PictureStructure::Frame {
            if p.frame_pred_frame_dct {
                return Ok(MotionKind::Frame);
            }
            match bc.getbits(2) {
                1 => Ok(MotionKind::Field),
                2 => Ok(MotionKind::Frame),
                3 => Ok(MotionKind::DualPrime),
                _ => Err(Mpeg3Error::InvalidData("frame_motion_type 为保留值 0".into())),
            }
        } else {
            match bc.getbits(2) {
                1 => Ok(MotionKind::Field),
                2 => Ok(MotionKind::Sixteen8),
                3 => Ok(MotionKind::DualPrime),
                _ => Err(Mpeg3Error::InvalidData("field_motion_type 为保留值 0".into())),
            }
        }
    }

    /// 解码宏块头与所有编码块, 结果存入 `self.mb`
    pub(super) fn decode_macroblock<S: ByteSource>(
        &mut self,
        bc: &mut BitCursor<S>,
    ) -> Mpeg3Result<()> {
        let p = self.params;
        let mb_type = decode_mb_type(bc, p.picture_type)?;
        let intra = mb_type.contains(MacroblockType::INTRA);
        let concealment = intra && p.concealment_motion_vectors;

        let mut motion = MotionState::zero_forward(p.structure);
        motion.directions =
            mb_type & (MacroblockType::MOTION_FORWARD | MacroblockType::MOTION_BACKWARD);
        // 帧内宏块的隐藏矢量不带 motion_type: 帧图像按帧矢量, 场图像按场矢量
        if p.mpeg2 && has_motion(mb_type) {
            motion.kind = self.read_motion_type(bc)?;
        }

        let field_dct = p.mpeg2
            && p.structure == PictureStructure::Frame
            && !p.frame_pred_frame_dct
            && mb_type.intersects(MacroblockType::INTRA | MacroblockType::PATTERN)
            && bc.get1bit();

        if mb_type.contains(MacroblockType::QUANT) {
            let code = bc.getbits(5) as u8;
            self.quantiser_scale = p.quantiser_scale(code);
        }

        if mb_type.contains(MacroblockType::MOTION_FORWARD) || concealment {
            self.decode_motion_vectors(bc, 0, &mut motion)?;
        }
        if mb_type.contains(MacroblockType::MOTION_BACKWARD) {
            self.decode_motion_vectors(bc, 1, &mut motion)?;
        }
        if concealment {
            bc.getbits(1); // marker
        }

        if intra {
            if !concealment {
                self.reset_pmv();
            }
            motion.directions = MacroblockType::empty();
        } else {
            self.reset_dc_predictors();
            if p.picture_type == PictureType::P
                && !mb_type.contains(MacroblockType::MOTION_FORWARD)
            {
                // 无运动补偿的 P 宏块
                self.reset_pmv();
                motion = MotionState::zero_forward(p.structure);
            }
        }

        let block_count = p.chroma_format.block_count();
        let cbp = if intra {
            (1u16 << block_count) - 1
        } else if mb_type.contains(MacroblockType::PATTERN) {
            let base = u16::from(decode_cbp(bc)?);
            match p.chroma_format {
                ChromaFormat::Yuv420 => base,
                ChromaFormat::Yuv422 => (base << 2) | bc.getbits(2) as u16,
                ChromaFormat::Yuv444 => (base << 6) | bc.getbits(6) as u16,
            }
        } else {
            0
        };

        self.mb.mb_type = mb_type;
        self.mb.field_dct = field_dct;
        self.mb.cbp = cbp;
        for block in 0..block_count {
            if cbp & (1 << (block_count - 1 - block)) != 0 {
                self.decode_block(bc, block, intra)?;
            }
        }
        if p.picture_type == PictureType::D {
            bc.getbits(1); // end_of_macroblock
        }
        self.mb.motion = motion;
        self.prev_motion = motion;
        trace!("宏块: type={:?}, cbp={:#x}, motion={:?}", mb_type, cbp, motion.kind);
        Ok(())
    }

    /// 解码一个 8x8 块的系数并反量化到 `self.mb.blocks[block]` (自然顺序)
    ///
    /// 帧内块的 DC 减去 1024, 重建时以 128 为中心写回.
    fn decode_block<S: ByteSource>(
        &mut self,
        bc: &mut BitCursor<S>,
        block: usize,
        intra: bool,
    ) -> Mpeg3Result<()> {
        let p = self.params;
        let luma = block < 4;
        let coeffs = &mut self.mb.blocks[block];
        coeffs.fill(0);

        let matrix = match (intra, luma) {
            (true, true) => &p.matrices.intra,
            (true, false) => &p.matrices.chroma_intra,
            (false, true) => &p.matrices.non_intra,
            (false, false) => &p.matrices.chroma_non_intra,
        };
        let qs = self.quantiser_scale;

        let mut i = 0usize;
        let table = if intra {
            let cc = if luma { 0 } else { 1 + (block & 1) };
            let diff = decode_dc_differential(bc, luma)?;
            self.dc_pred[cc] += diff;
            coeffs[0] = if p.mpeg2 {
                self.dc_pred[cc] << (3 - u32::from(p.intra_dc_precision))
            } else {
                self.dc_pred[cc] * 8
            };
            i = 1;
            if p.picture_type == PictureType::D {
                // D 图像只有 DC 系数
                coeffs[0] -= 1024;
                return Ok(());
            }
            if p.mpeg2 && p.intra_vlc_format {
                CoeffTable::B15
            } else {
                CoeffTable::B14
            }
        } else {
            CoeffTable::B14
        };

        let mut sum = coeffs[0];
        loop {
            let (run, level) = if !intra && i == 0 && bc.showbits(1) == 1 {
                // 非帧内块首系数: '1s' 表示 run=0, level=1
                bc.getbits(1);
                (0usize, if bc.get1bit() { -1 } else { 1 })
            } else {
                let rl = decode_coeff(bc, table)?;
                if rl == DCT_EOB {
                    break;
                }
                if rl == DCT_ESCAPE {
                    let run = bc.getbits(6) as usize;
                    (run, escape_level(bc, p.mpeg2)?)
                } else {
                    let level = i32::from(rl.level);
                    let level = if bc.get1bit() { -level } else { level };
                    (usize::from(rl.run), level)
                }
            };
            i += run;
            if i > 63 {
                return Err(Mpeg3Error::InvalidData(format!(
                    "系数下标 {} 越界 (块 {})",
                    i, block
                )));
            }
            let pos = usize::from(p.scan[i]);
            let w = i32::from(matrix[pos]);
            let value = dequantize(level, w, qs, intra, p.mpeg2);
            coeffs[pos] = value;
            sum += value;
            i += 1;
        }

        if p.mpeg2 && sum & 1 == 0 {
            // 失配控制
            coeffs[63] ^= 1;
        }
        if intra {
            coeffs[0] -= 1024;
        }
        Ok(())
    }
}

/// 转义码的幅值: MPEG-1 为 8 位 (0 与 -128 再接 8 位), MPEG-2 为 12 位有符号数
fn escape_level<S: ByteSource>(bc: &mut BitCursor<S>, mpeg2: bool) -> Mpeg3Result<i32> {
    if mpeg2 {
        let level = bc.getbits_signed(12);
        if level == 0 || level == -2048 {
            return Err(Mpeg3Error::InvalidData(format!(
                "转义幅值非法: {}",
                level
            )));
        }
        return Ok(level);
    }
    let level = bc.getbits_signed(8);
    match level {
        0 => Ok(bc.getbits(8) as i32),
        -128 => Ok(bc.getbits(8) as i32 - 256),
        l => Ok(l),
    }
}

/// 反量化一个 AC (或非帧内) 系数, 结果饱和到 [-2048, 2047]
///
/// `qs` 为 MPEG-2 单位的量化步长. MPEG-1 额外做奇数化.
#[inline]
fn dequantize(level: i32, w: i32, qs: i32, intra: bool, mpeg2: bool) -> i32 {
    let magnitude = level.abs();
    let mut value = if intra {
        (magnitude * w * qs) / 16
    } else {
        ((2 * magnitude + 1) * w * qs) / 32
    };
    if !mpeg2 && value & 1 == 0 && value != 0 {
        value -= 1;
    }
    let value = if level < 0 { -value } else { value };
    value.clamp(-2048, 2047)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpeg1_dequant_oddification() {
        // 帧内: 2*8*16/16 = 16 -> 奇数化为 15
        assert_eq!(dequantize(2, 16, 8, true, false), 15);
        assert_eq!(dequantize(-2, 16, 8, true, false), -15);
        // 非帧内: (2*1+1)*16*4/32 = 6 -> 5
        assert_eq!(dequantize(1, 16, 4, false, false), 5);
    }

    #[test]
    fn test_mpeg2_dequant_and_saturation() {
        assert_eq!(dequantize(1, 16, 4, false, true), 6);
        assert_eq!(dequantize(3, 19, 10, true, true), 35);
        assert_eq!(dequantize(2000, 83, 112, true, true), 2047);
        assert_eq!(dequantize(-2000, 83, 112, false, true), -2048);
    }

    #[test]
    fn test_escape_levels() {
        use mpeg3_core::{BitWriter, MemorySource};
        let mut bw = BitWriter::new();
        bw.put_bits(0, 8);
        bw.put_bits(200, 8);
        bw.put_bits(0x80, 8);
        bw.put_bits(0x10, 8);
        bw.put_signed(-5, 8);
        bw.put_signed(-700, 12);
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        assert_eq!(escape_level(&mut bc, false).unwrap(), 200);
        assert_eq!(escape_level(&mut bc, false).unwrap(), 16 - 256);
        assert_eq!(escape_level(&mut bc, false).unwrap(), -5);
        assert_eq!(escape_level(&mut bc, true).unwrap(), -700);
    }

    #[test]
    fn test_zero_forward_in_field_picture() {
        let m = MotionState::zero_forward(PictureStructure::BottomField);
        assert_eq!(m.kind, MotionKind::Field);
        assert_eq!(m.field_select[0][0], 1);
        assert!(m.directions.contains(MacroblockType::MOTION_FORWARD));
    }
}
