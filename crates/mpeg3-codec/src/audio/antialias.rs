//! 抗混叠蝶形运算.
//!
//! 在相邻长块子带的边界两侧各 8 条谱线上做蝶形运算. 纯短块不处理,
//! 混合块只处理前两个 (长块) 子带之间的边界.

use std::sync::OnceLock;

use super::huffman::GRANULE_LINES;
use super::side_info::GranuleInfo;

const C: [f64; 8] = [-0.6, -0.535, -0.33, -0.185, -0.095, -0.041, -0.0142, -0.0037];

/// `(cs, ca)`: `cs = 1/√(1+c²)`, `ca = c/√(1+c²)`
fn coefficients() -> &'static [(f32, f32); 8] {
    static TABLE: OnceLock<[(f32, f32); 8]> = OnceLock::new();
    TABLE.get_or_init(|| {
        C.map(|c| {
            let n = (1.0 + c * c).sqrt();
            ((1.0 / n) as f32, (c / n) as f32)
        })
    })
}

/// 抗混叠处理
pub fn antialias(gi: &GranuleInfo, xr: &mut [f32; GRANULE_LINES]) {
    if gi.is_pure_short() {
        return;
    }
    let subbands = if gi.mixed_block { 2 } else { 32 };
    let coefs = coefficients();
    for sb in 1..subbands {
        let boundary = sb * 18;
        for (i, &(cs, ca)) in coefs.iter().enumerate() {
            let lo = xr[boundary - 1 - i];
            let hi = xr[boundary + i];
            xr[boundary - 1 - i] = lo * cs - hi * ca;
            xr[boundary + i] = hi * cs + lo * ca;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let coefs = coefficients();
        assert!((coefs[0].0 - 0.857_492_9).abs() < 1e-6);
        assert!((coefs[0].1 + 0.514_495_8).abs() < 1e-6);
        assert!((coefs[7].0 - 0.999_993_2).abs() < 1e-6);
    }

    #[test]
    fn test_butterfly_preserves_energy() {
        let gi = GranuleInfo::default();
        let mut xr = [0f32; GRANULE_LINES];
        xr[17] = 1.0;
        xr[18] = 0.5;
        let before: f32 = xr.iter().map(|v| v * v).sum();
        antialias(&gi, &mut xr);
        let after: f32 = xr.iter().map(|v| v * v).sum();
        assert!((before - after).abs() < 1e-5, "蝶形运算为旋转, 能量不变");
        assert!(xr[17] != 1.0 && xr[18] != 0.5);
    }

    #[test]
    fn test_butterfly_values() {
        let gi = GranuleInfo::default();
        let mut xr = [0f32; GRANULE_LINES];
        xr[17] = 1.0;
        xr[18] = 0.5;
        xr[34] = 0.0;
        xr[37] = 2.0; // 子带 2 边界外第 1 条
        antialias(&gi, &mut xr);
        assert!((xr[17] - 1.114_740_8).abs() < 1e-6);
        assert!((xr[18] + 0.085_749_3).abs() < 1e-6);
        // 边界 36 两侧第 2 对 (34, 37): c = -0.535
        assert!((xr[34] - 0.943_463_9).abs() < 1e-6);
        assert!((xr[37] - 1.763_484).abs() < 1e-5);
        assert_eq!(xr[0], 0.0);
    }

    #[test]
    fn test_short_blocks_skipped() {
        let gi = GranuleInfo {
            window_switching: true,
            block_type: 2,
            ..Default::default()
        };
        let mut xr = [1.0f32; GRANULE_LINES];
        antialias(&gi, &mut xr);
        assert!(xr.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_mixed_only_first_boundary() {
        let gi = GranuleInfo {
            window_switching: true,
            block_type: 2,
            mixed_block: true,
            ..Default::default()
        };
        let mut xr = [1.0f32; GRANULE_LINES];
        antialias(&gi, &mut xr);
        assert!(xr[17] != 1.0);
        assert!(xr[35] == 1.0 && xr[36] == 1.0);
    }
}
