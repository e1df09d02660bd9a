//! Layer III Huffman 频谱解码.
//!
//! 大值区最多分三个区域, 每个区域由 `table_select` 选表; 其后是 count1 四元组区,
//! 一直读到 `part2_3_length` 用完.

use std::sync::OnceLock;

use mpeg3_core::{BitCursor, ByteSource, Mpeg3Error, Mpeg3Result};

use crate::vlc::Vlc;

use super::scalefactors::BandLayout;
use super::side_info::GranuleInfo;
use super::tables::*;

/// 一个颗粒的频谱线数
pub const GRANULE_LINES: usize = 576;

struct HuffmanTables {
    /// 按表号索引 (0..16), 表 0/4/14 为空
    big: Vec<Option<Vlc<u8>>>,
    count1: [Vlc<u8>; 2],
}

fn tables() -> &'static HuffmanTables {
    static TABLES: OnceLock<HuffmanTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let sources: [(usize, &[(u32, u8, u8)]); 15] = [
            (1, &HUFF_1),
            (2, &HUFF_2),
            (3, &HUFF_3),
            (5, &HUFF_5),
            (6, &HUFF_6),
            (7, &HUFF_7),
            (8, &HUFF_8),
            (9, &HUFF_9),
            (10, &HUFF_10),
            (11, &HUFF_11),
            (12, &HUFF_12),
            (13, &HUFF_13),
            (15, &HUFF_15),
            (16, &HUFF_16),
            (24, &HUFF_24),
        ];
        let mut big: Vec<Option<Vlc<u8>>> = (0..25).map(|_| None).collect();
        for (id, codes) in sources {
            big[id] = Some(Vlc::build(codes, 8));
        }
        HuffmanTables {
            big,
            count1: [Vlc::build(&COUNT1_A, 4), Vlc::build(&COUNT1_B, 4)],
        }
    })
}

/// 表号 16..23 共用表 16, 24..31 共用表 24, 区别只在 linbits
fn big_value_table(select: u8) -> Option<&'static Vlc<u8>> {
    let id = match select {
        0..=15 => usize::from(select),
        16..=23 => 16,
        _ => 24,
    };
    tables().big.get(id).and_then(Option::as_ref)
}

/// 大值区的区域边界 (系数下标)
pub fn region_bounds(gi: &GranuleInfo, layout: &BandLayout) -> [usize; 2] {
    let big = (gi.big_values as usize * 2).min(GRANULE_LINES);
    let r1 = layout.boundary(gi.region0_count as usize + 1);
    let r2 = if gi.window_switching {
        GRANULE_LINES
    } else {
        layout.boundary((gi.region0_count + gi.region1_count) as usize + 2)
    };
    [r1.min(big), r2.min(big)]
}

#[inline]
fn read_value<S: ByteSource>(bc: &mut BitCursor<S>, magnitude: u32, linbits: u32) -> i32 {
    let mut v = magnitude;
    if linbits > 0 && v == 15 {
        v += bc.getbits(linbits);
    }
    if v != 0 && bc.get1bit() {
        -(v as i32)
    } else {
        v as i32
    }
}

/// 解码一个颗粒的量化频谱
///
/// `end` 为本颗粒 part2_3 数据结束的绝对位位置. 返回最后一个可能非零的谱线位置,
/// 之后的谱线均为 0.
pub fn read_spectrum<S: ByteSource>(
    bc: &mut BitCursor<S>,
    gi: &GranuleInfo,
    layout: &BandLayout,
    end: u64,
    out: &mut [i32; GRANULE_LINES],
) -> Mpeg3Result<usize> {
    out.fill(0);
    let big = (gi.big_values as usize * 2).min(GRANULE_LINES);
    let [r1, r2] = region_bounds(gi, layout);

    let mut pos = 0;
    while pos < big {
        let region = if pos < r1 {
            0
        } else if pos < r2 {
            1
        } else {
            2
        };
        let select = gi.table_select[region];
        if select == 0 {
            // 表 0: 整个区域为零, 不占位
            pos = match region {
                0 => r1,
                1 => r2,
                _ => big,
            }
            .max(pos + 2)
            .min(big);
            continue;
        }
        let table = big_value_table(select).ok_or_else(|| {
            Mpeg3Error::InvalidData(format!("无效的 Huffman 表 {}", select))
        })?;
        let symbol = table
            .decode(bc)
            .ok_or_else(|| Mpeg3Error::InvalidData("无效的大值 Huffman 码字".into()))?;
        let linbits = LINBITS[usize::from(select)];
        out[pos] = read_value(bc, u32::from(symbol >> 4), linbits);
        out[pos + 1] = read_value(bc, u32::from(symbol & 0xF), linbits);
        pos += 2;
    }

    let count1 = &tables().count1[usize::from(gi.count1table_select)];
    while pos + 4 <= GRANULE_LINES && bc.bit_position() < end {
        let Some(quad) = count1.decode(bc) else {
            return Err(Mpeg3Error::InvalidData("无效的 count1 码字".into()));
        };
        let mut values = [0i32; 4];
        for (k, v) in values.iter_mut().enumerate() {
            if quad & (8 >> k) != 0 {
                *v = if bc.get1bit() { -1 } else { 1 };
            }
        }
        // 越过数据末尾的四元组丢弃
        if bc.bit_position() > end {
            break;
        }
        out[pos..pos + 4].copy_from_slice(&values);
        pos += 4;
    }

    Ok(pos)
}
