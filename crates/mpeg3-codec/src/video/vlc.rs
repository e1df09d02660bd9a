//! MPEG-1/2 视频 VLC 解码.
//!
//! 各码表在首次使用时由 [`super::tables`] 构建为两级查找表, 之后只读共享.

use std::sync::OnceLock;

use mpeg3_core::{BitCursor, ByteSource, Mpeg3Error, Mpeg3Result};

use super::macroblock::MacroblockType;
use super::tables;
use crate::frame::PictureType;
use crate::vlc::Vlc;

/// DCT 系数游程/幅值对 (幅值不含符号)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunLevel {
    pub run: u8,
    pub level: u8,
}

/// 构造游程/幅值对
pub(super) const fn rl(run: u8, level: u8) -> RunLevel {
    RunLevel { run, level }
}

/// 块结束码
pub(super) const DCT_EOB: RunLevel = rl(0xFF, 0);
/// 转义码
pub(super) const DCT_ESCAPE: RunLevel = rl(0xFE, 0);

struct VideoVlcs {
    mb_addr_inc: Vlc<u8>,
    mb_type_i: Vlc<u8>,
    mb_type_p: Vlc<u8>,
    mb_type_b: Vlc<u8>,
    cbp: Vlc<u8>,
    motion_code: Vlc<i8>,
    dmvector: Vlc<i8>,
    dc_luma: Vlc<u8>,
    dc_chroma: Vlc<u8>,
    dct_b14: Vlc<RunLevel>,
    dct_b15: Vlc<RunLevel>,
}

static VLCS: OnceLock<VideoVlcs> = OnceLock::new();

fn vlcs() -> &'static VideoVlcs {
    VLCS.get_or_init(|| VideoVlcs {
        mb_addr_inc: Vlc::build(&tables::MB_ADDR_INC, 8),
        mb_type_i: Vlc::build(&tables::MB_TYPE_I, 2),
        mb_type_p: Vlc::build(&tables::MB_TYPE_P, 6),
        mb_type_b: Vlc::build(&tables::MB_TYPE_B, 6),
        cbp: Vlc::build(&tables::CODED_BLOCK_PATTERN, 9),
        motion_code: Vlc::build(&tables::MOTION_CODE, 8),
        dmvector: Vlc::build(&tables::DMVECTOR, 2),
        dc_luma: Vlc::build(&tables::DC_SIZE_LUMA, 9),
        dc_chroma: Vlc::build(&tables::DC_SIZE_CHROMA, 10),
        dct_b14: Vlc::build(&tables::DCT_COEFF_B14, 8),
        dct_b15: Vlc::build(&tables::DCT_COEFF_B15, 8),
    })
}

fn invalid(what: &str, bit_position: u64) -> Mpeg3Error {
    Mpeg3Error::InvalidData(format!("无效的{}码字 (位 {})", what, bit_position))
}

/// 宏块地址增量 (可能为填充码或转义码)
pub(super) fn decode_mb_addr_inc<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<u8> {
    vlcs()
        .mb_addr_inc
        .decode(bc)
        .ok_or_else(|| invalid("宏块地址增量", bc.bit_position()))
}

/// 宏块类型
pub(super) fn decode_mb_type<S: ByteSource>(
    bc: &mut BitCursor<S>,
    picture_type: PictureType,
) -> Mpeg3Result<MacroblockType> {
    let v = vlcs();
    let table = match picture_type {
        PictureType::I => &v.mb_type_i,
        PictureType::P => &v.mb_type_p,
        PictureType::B => &v.mb_type_b,
        PictureType::D => {
            // D 图像只有帧内 DC 宏块, 类型码固定为 '1'
            return if bc.get1bit() {
                Ok(MacroblockType::INTRA)
            } else {
                Err(invalid("D 图像宏块类型", bc.bit_position()))
            };
        }
    };
    table
        .decode(bc)
        .map(MacroblockType::from_bits_truncate)
        .ok_or_else(|| invalid("宏块类型", bc.bit_position()))
}

/// 编码块模式 (4:2:0 的 6 位部分)
pub(super) fn decode_cbp<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<u8> {
    vlcs()
        .cbp
        .decode(bc)
        .ok_or_else(|| invalid("编码块模式", bc.bit_position()))
}

/// 运动码 (-16..=16)
pub(super) fn decode_motion_code<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<i32> {
    vlcs()
        .motion_code
        .decode(bc)
        .map(i32::from)
        .ok_or_else(|| invalid("运动码", bc.bit_position()))
}

/// dual prime 差分矢量 (-1, 0, 1)
pub(super) fn decode_dmvector<S: ByteSource>(bc: &mut BitCursor<S>) -> Mpeg3Result<i32> {
    vlcs()
        .dmvector
        .decode(bc)
        .map(i32::from)
        .ok_or_else(|| invalid("dmvector", bc.bit_position()))
}

/// 帧内 DC 差分 (含 dct_dc_size 与差分值)
pub(super) fn decode_dc_differential<S: ByteSource>(
    bc: &mut BitCursor<S>,
    luma: bool,
) -> Mpeg3Result<i32> {
    let v = vlcs();
    let table = if luma { &v.dc_luma } else { &v.dc_chroma };
    let size = u32::from(
        table
            .decode(bc)
            .ok_or_else(|| invalid("DC 尺寸", bc.bit_position()))?,
    );
    if size == 0 {
        return Ok(0);
    }
    let raw = bc.getbits(size) as i32;
    // 最高位为 0 表示负值
    if raw >> (size - 1) == 0 {
        Ok(raw - (1 << size) + 1)
    } else {
        Ok(raw)
    }
}

/// DCT 系数码表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CoeffTable {
    /// B.14 (MPEG-1 与非帧内块)
    B14,
    /// B.15 (MPEG-2 帧内且 intra_vlc_format = 1)
    B15,
}

/// 解码一个系数码字 (不含符号位), 可能返回 [`DCT_EOB`] 或 [`DCT_ESCAPE`]
#[inline]
pub(super) fn decode_coeff<S: ByteSource>(
    bc: &mut BitCursor<S>,
    table: CoeffTable,
) -> Mpeg3Result<RunLevel> {
    let v = vlcs();
    let vlc = match table {
        CoeffTable::B14 => &v.dct_b14,
        CoeffTable::B15 => &v.dct_b15,
    };
    vlc.decode(bc)
        .ok_or_else(|| invalid("DCT 系数", bc.bit_position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpeg3_core::{BitWriter, MemorySource};

    fn cursor(bw: BitWriter) -> BitCursor<MemorySource> {
        BitCursor::new(MemorySource::new(bw.finish()))
    }

    #[test]
    fn test_mb_addr_inc_codes() {
        let mut bw = BitWriter::new();
        bw.put_code("1");
        bw.put_code("0000 0001 000");
        bw.put_code("0000 0011 000");
        bw.put_code("0000 0001 111");
        bw.put_code("0000 0101 11");
        let mut bc = cursor(bw);
        assert_eq!(decode_mb_addr_inc(&mut bc).unwrap(), 1);
        assert_eq!(decode_mb_addr_inc(&mut bc).unwrap(), tables::MBA_ESCAPE);
        assert_eq!(decode_mb_addr_inc(&mut bc).unwrap(), 33);
        assert_eq!(decode_mb_addr_inc(&mut bc).unwrap(), tables::MBA_STUFFING);
        assert_eq!(decode_mb_addr_inc(&mut bc).unwrap(), 16);
    }

    #[test]
    fn test_mb_type_per_picture() {
        let mut bw = BitWriter::new();
        bw.put_code("01");
        bw.put_code("1");
        bw.put_code("0000 10");
        let mut bc = cursor(bw);
        assert_eq!(
            decode_mb_type(&mut bc, PictureType::I).unwrap(),
            MacroblockType::QUANT | MacroblockType::INTRA
        );
        assert_eq!(
            decode_mb_type(&mut bc, PictureType::P).unwrap(),
            MacroblockType::MOTION_FORWARD | MacroblockType::PATTERN
        );
        assert_eq!(
            decode_mb_type(&mut bc, PictureType::B).unwrap(),
            MacroblockType::QUANT | MacroblockType::MOTION_BACKWARD | MacroblockType::PATTERN
        );
    }

    #[test]
    fn test_invalid_mb_type_is_error() {
        let mut bc = BitCursor::new(MemorySource::new(vec![0x00, 0x00]));
        assert!(decode_mb_type(&mut bc, PictureType::P).is_err(), "全零应为无效码字");
    }

    #[test]
    fn test_dc_differential_sign() {
        let mut bw = BitWriter::new();
        // 亮度 size=3 ('101'), 差分 '010' -> -5
        bw.put_code("101");
        bw.put_code("010");
        // 色度 size=2 ('10'), 差分 '11' -> 3
        bw.put_code("10");
        bw.put_code("11");
        // 亮度 size=0 ('100')
        bw.put_code("100");
        let mut bc = cursor(bw);
        assert_eq!(decode_dc_differential(&mut bc, true).unwrap(), -5);
        assert_eq!(decode_dc_differential(&mut bc, false).unwrap(), 3);
        assert_eq!(decode_dc_differential(&mut bc, true).unwrap(), 0);
    }

    #[test]
    fn test_coeff_tables_differ() {
        let mut bw = BitWriter::new();
        bw.put_code("0110");
        bw.put_code("0110");
        let mut bc = cursor(bw);
        // B.14 中 '011' 为 run=1 level=1, 剩余 '0' 留给下一个码字
        assert_eq!(decode_coeff(&mut bc, CoeffTable::B14).unwrap(), rl(1, 1));
        bc.getbits(1);
        assert_eq!(decode_coeff(&mut bc, CoeffTable::B15).unwrap(), DCT_EOB);
    }

    #[test]
    fn test_motion_code_and_dmvector() {
        let mut bw = BitWriter::new();
        bw.put_code("0000 0011 001");
        bw.put_code("011");
        bw.put_code("11");
        bw.put_code("0");
        let mut bc = cursor(bw);
        assert_eq!(decode_motion_code(&mut bc).unwrap(), -16);
        assert_eq!(decode_motion_code(&mut bc).unwrap(), -1);
        assert_eq!(decode_dmvector(&mut bc).unwrap(), -1);
        assert_eq!(decode_dmvector(&mut bc).unwrap(), 0);
    }
}
