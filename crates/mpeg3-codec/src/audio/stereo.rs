//! 联合立体声重建.
//!
//! MS 立体声: `L = (M + S)/√2`, `R = (M − S)/√2`.
//! 强度立体声只作用于右声道最后一个非零频带之上 (短块按窗口分别判断),
//! 位置取自右声道比例因子; 非法位置的频带退化为 MS (或保持不变).

use std::f32::consts::FRAC_1_SQRT_2;
use std::sync::OnceLock;

use super::header::FrameHeader;
use super::huffman::GRANULE_LINES;
use super::scalefactors::{BandKind, BandLayout, ScaleFactors};

/// 强度立体声比例表
struct IntensityTables {
    /// MPEG-1: is_pos 0..=6, `(k_l, k_r)`
    mpeg1: [(f32, f32); 7],
    /// LSF: `[intensity_scale][is_pos]`
    lsf: [[(f32, f32); 32]; 2],
}

fn intensity_tables() -> &'static IntensityTables {
    static TABLES: OnceLock<IntensityTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut mpeg1 = [(0.0, 1.0); 7];
        for (pos, k) in mpeg1.iter_mut().enumerate() {
            *k = if pos == 6 {
                (1.0, 0.0)
            } else {
                let r = (pos as f64 * std::f64::consts::PI / 12.0).tan();
                ((r / (1.0 + r)) as f32, (1.0 / (1.0 + r)) as f32)
            };
        }

        let mut lsf = [[(1.0, 1.0); 32]; 2];
        for (scale, row) in lsf.iter_mut().enumerate() {
            let io = if scale == 0 { 2f64.powf(-0.25) } else { 0.5f64.sqrt() };
            for (pos, k) in row.iter_mut().enumerate().skip(1) {
                let p = io.powi(((pos + 1) / 2) as i32) as f32;
                *k = if pos % 2 == 1 { (p, 1.0) } else { (1.0, p) };
            }
        }
        IntensityTables { mpeg1, lsf }
    })
}

fn mid_side(left: &mut [f32], right: &mut [f32]) {
    for (l, r) in left.iter_mut().zip(right.iter_mut()) {
        let m = *l;
        let s = *r;
        *l = (m + s) * FRAC_1_SQRT_2;
        *r = (m - s) * FRAC_1_SQRT_2;
    }
}

/// 对一个颗粒的左右声道做联合立体声处理
pub fn process(
    header: &FrameHeader,
    layout: &BandLayout,
    right_sf: &ScaleFactors,
    left: &mut [f32; GRANULE_LINES],
    right: &mut [f32; GRANULE_LINES],
) {
    let ms = header.ms_stereo();
    if !header.intensity_stereo() {
        if ms {
            mid_side(left, right);
        }
        return;
    }

    let tables = intensity_tables();
    let lsf = header.is_lsf();
    // 0..3 为短块窗口, 3 为长块
    let mut nonzero_found = [false; 4];

    for entry in (0..layout.len()).rev() {
        let range = layout.range(entry);
        let slot = match layout.kind(entry) {
            BandKind::Long { .. } => {
                // 混合块: 短块部分出现非零后长块部分不再做强度立体声
                if nonzero_found[..3].iter().any(|&f| f) {
                    nonzero_found[3] = true;
                }
                3
            }
            BandKind::Short { window, .. } => window,
        };

        if !nonzero_found[slot] && right[range.clone()].iter().any(|&v| v != 0.0) {
            nonzero_found[slot] = true;
        }
        if nonzero_found[slot] {
            if ms {
                mid_side(&mut left[range.clone()], &mut right[range]);
            }
            continue;
        }

        // 最后一个频带不传输比例因子, 沿用前一个频带
        let source = match layout.kind(entry) {
            BandKind::Long { band: 21 } => entry - 1,
            BandKind::Short { band: 12, .. } => entry - 3,
            _ => entry,
        };
        let pos = usize::from(right_sf.values[source]);
        let ratios = if lsf {
            if pos == usize::from(right_sf.max[source]) {
                None
            } else {
                tables.lsf[usize::from(right_sf.intensity_scale & 1)].get(pos)
            }
        } else {
            tables.mpeg1.get(pos)
        };

        match ratios {
            Some(&(kl, kr)) => {
                for i in range {
                    let m = left[i];
                    left[i] = m * kl;
                    right[i] = m * kr;
                }
            }
            None => {
                if ms {
                    mid_side(&mut left[range.clone()], &mut right[range]);
                }
            }
        }
    }
}
