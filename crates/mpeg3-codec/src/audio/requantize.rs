//! 反量化: 将 Huffman 解码的整数谱线转换为浮点频谱.
//!
//! `xr = sign(is) · |is|^(4/3) · 2^(q/4)`, 其中
//! `q = global_gain − 210 − 8·subblock_gain − 4·mult·(scalefac + preflag·pretab)`,
//! `mult` 为 0.5 或 1 (scalefac_scale).

use std::sync::OnceLock;

use super::huffman::GRANULE_LINES;
use super::scalefactors::{BandKind, BandLayout, ScaleFactors};
use super::side_info::GranuleInfo;
use super::tables::PRETAB;

/// |is| 的最大值: 15 + 2^13 - 1
const POW43_TABLE_SIZE: usize = 8207;

/// 2^(q/4) 表覆盖的 q 范围
const GAIN_MIN: i32 = -400;
const GAIN_TABLE_SIZE: usize = 512;

fn pow43_table() -> &'static [f32] {
    static TABLE: OnceLock<Vec<f32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..POW43_TABLE_SIZE)
            .map(|i| (i as f64).powf(4.0 / 3.0) as f32)
            .collect()
    })
}

fn gain_table() -> &'static [f32] {
    static TABLE: OnceLock<Vec<f32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..GAIN_TABLE_SIZE)
            .map(|i| 2f64.powf(f64::from(i as i32 + GAIN_MIN) / 4.0) as f32)
            .collect()
    })
}

/// |v|^(4/3)
#[inline]
pub fn pow43(v: i32) -> f32 {
    let table = pow43_table();
    let a = v.unsigned_abs() as usize;
    table.get(a).copied().unwrap_or_else(|| (a as f32).powf(4.0 / 3.0))
}

/// 2^(q/4)
#[inline]
pub fn gain(q: i32) -> f32 {
    let idx = (q - GAIN_MIN).clamp(0, GAIN_TABLE_SIZE as i32 - 1);
    gain_table()[idx as usize]
}

/// 反量化一个颗粒单声道
///
/// `nonzero` 之后的谱线直接置零.
pub fn requantize(
    gi: &GranuleInfo,
    sf: &ScaleFactors,
    layout: &BandLayout,
    is: &[i32; GRANULE_LINES],
    nonzero: usize,
    xr: &mut [f32; GRANULE_LINES],
) {
    xr.fill(0.0);
    let shift = if gi.scalefac_scale { 4 } else { 2 };
    let base = gi.global_gain as i32 - 210;

    for (entry, range) in layout.entries() {
        if range.start >= nonzero {
            break;
        }
        let scalefac = i32::from(sf.values[entry]);
        let q = match layout.kind(entry) {
            BandKind::Long { band } => {
                let pre = if sf.preflag { i32::from(PRETAB[band]) } else { 0 };
                base - shift * (scalefac + pre)
            }
            BandKind::Short { window, .. } => {
                base - 8 * i32::from(gi.subblock_gain[window]) - shift * scalefac
            }
        };
        let g = gain(q);
        let end = range.end.min(nonzero);
        for i in range.start..end {
            let v = is[i];
            if v != 0 {
                let m = pow43(v) * g;
                xr[i] = if v < 0 { -m } else { m };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::header::FrameHeader;

    fn layout(gi: &GranuleInfo) -> BandLayout {
        BandLayout::new(gi, &FrameHeader::parse(0xFFFB_90C0).expect("解析失败"))
    }

    #[test]
    fn test_power_tables() {
        assert_eq!(pow43(0), 0.0);
        assert_eq!(pow43(1), 1.0);
        assert!((pow43(-8) - 16.0).abs() < 1e-4);
        assert!((pow43(9000) - 9000f32.powf(4.0 / 3.0)).abs() / pow43(9000) < 1e-5);
        assert_eq!(gain(0), 1.0);
        assert!((gain(4) - 2.0).abs() < 1e-6);
        assert!((gain(-8) - 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_long_block_gain_and_preflag() {
        let gi = GranuleInfo {
            global_gain: 214,
            scalefac_scale: true,
            ..Default::default()
        };
        let mut sf = ScaleFactors {
            preflag: true,
            ..Default::default()
        };
        sf.values[0] = 1;
        let mut is = [0i32; GRANULE_LINES];
        is[0] = 1;
        is[1] = -8;
        is[200] = 1; // 频带 11 起 pretab=1
        let mut xr = [0f32; GRANULE_LINES];
        let l = layout(&gi);
        requantize(&gi, &sf, &l, &is, GRANULE_LINES, &mut xr);
        // q = 4 - 4·1 = 0
        assert!((xr[0] - 1.0).abs() < 1e-6);
        assert!((xr[1] + 16.0).abs() < 1e-4);
        let band = l.entries().find(|(_, r)| r.contains(&200)).map(|(e, _)| e);
        let pre = band.map_or(0, |b| i32::from(PRETAB[b]));
        assert!((xr[200] - gain(4 - 4 * pre)).abs() < 1e-6);
    }

    #[test]
    fn test_short_block_subblock_gain() {
        let gi = GranuleInfo {
            global_gain: 210,
            window_switching: true,
            block_type: 2,
            subblock_gain: [0, 1, 0],
            ..Default::default()
        };
        let mut is = [0i32; GRANULE_LINES];
        is[0] = 1; // 频带 0 窗口 0
        is[4] = 1; // 频带 0 窗口 1
        let mut xr = [0f32; GRANULE_LINES];
        requantize(&gi, &ScaleFactors::default(), &layout(&gi), &is, 8, &mut xr);
        assert!((xr[0] - 1.0).abs() < 1e-6);
        assert!((xr[4] - 0.25).abs() < 1e-6, "subblock_gain=1 衰减 2^-2");
    }
}
