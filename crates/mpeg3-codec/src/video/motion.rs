//! 运动矢量解码与预测.
//!
//! 矢量差分由 motion_code + motion_residual 组成, 与预测值相加后按 f_code 范围回绕.
//! 帧图像中的场矢量垂直分量以场为单位, 预测器保存帧单位 (×2).

use mpeg3_core::{BitCursor, ByteSource, Mpeg3Error, Mpeg3Result};

use super::headers::PictureStructure;
use super::macroblock::{MotionKind, MotionState};
use super::slice::SliceDecoder;
use super::vlc::{decode_dmvector, decode_motion_code};

/// 由差分与预测值重建一个矢量分量
///
/// `f_code` 取值 1..=9, 结果落在 [-16f, 16f-1] 内.
pub(super) fn reconstruct_component(code: i32, residual: i32, f_code: u8, prediction: i32) -> i32 {
    let r_size = u32::from(f_code) - 1;
    let f = 1i32 << r_size;
    let high = 16 * f - 1;
    let low = -16 * f;
    let range = 32 * f;

    let delta = if f == 1 || code == 0 {
        code
    } else {
        let d = (code.abs() - 1) * f + residual + 1;
        if code < 0 { -d } else { d }
    };
    let mut v = prediction + delta;
    if v < low {
        v += range;
    } else if v > high {
        v -= range;
    }
    v
}

/// dual prime 推导的单个分量: ((v*m + (v>0)) >> 1)
fn scale_dual(v: i32, m: i32) -> i32 {
    (v * m + i32::from(v > 0)) >> 1
}

impl SliceDecoder<'_> {
    fn f_code(&self, s: usize, t: usize) -> Mpeg3Result<u8> {
        let f = self.params.f_code[s][t];
        if f == 0 || f > 9 {
            return Err(Mpeg3Error::InvalidData(format!(
                "f_code[{}][{}]={} 无效",
                s, t, f
            )));
        }
        Ok(f)
    }

    /// 读取一个分量: motion_code, [motion_residual]
    fn read_component<S: ByteSource>(
        &self,
        bc: &mut BitCursor<S>,
        s: usize,
        t: usize,
        prediction: i32,
    ) -> Mpeg3Result<i32> {
        let f_code = self.f_code(s, t)?;
        let code = decode_motion_code(bc)?;
        let r_size = u32::from(f_code) - 1;
        let residual = if r_size > 0 && code != 0 {
            bc.getbits(r_size) as i32
        } else {
            0
        };
        Ok(reconstruct_component(code, residual, f_code, prediction))
    }

    /// 读取一个矢量 motion_vector(r, s)
    ///
    /// `field_in_frame` 时垂直预测取 PMV/2. 返回 (矢量, dmvector).
    fn read_vector<S: ByteSource>(
        &mut self,
        bc: &mut BitCursor<S>,
        r: usize,
        s: usize,
        field_in_frame: bool,
        dual: bool,
    ) -> Mpeg3Result<([i32; 2], [i32; 2])> {
        let mut dmv = [0; 2];
        let x = self.read_component(bc, s, 0, self.pmv[r][s][0])?;
        if dual {
            dmv[0] = decode_dmvector(bc)?;
        }
        let pred_y = if field_in_frame {
            self.pmv[r][s][1] >> 1
        } else {
            self.pmv[r][s][1]
        };
        let y = self.read_component(bc, s, 1, pred_y)?;
        if dual {
            dmv[1] = decode_dmvector(bc)?;
        }
        self.pmv[r][s][0] = x;
        self.pmv[r][s][1] = if field_in_frame { y * 2 } else { y };
        Ok(([x, y], dmv))
    }

    /// 按运动类型解码方向 `s` (0 前向, 1 后向) 的全部矢量
    pub(super) fn decode_motion_vectors<S: ByteSource>(
        &mut self,
        bc: &mut BitCursor<S>,
        s: usize,
        motion: &mut MotionState,
    ) -> Mpeg3Result<()> {
        let p = self.params;
        let frame_picture = p.structure == PictureStructure::Frame;
        match (motion.kind, frame_picture) {
            (MotionKind::Frame, _) => {
                let (mut v, _) = self.read_vector(bc, 0, s, false, false)?;
                self.pmv[1][s] = self.pmv[0][s];
                if p.full_pel[s] {
                    v = [v[0] << 1, v[1] << 1];
                }
                motion.vectors[0][s] = v;
            }
            (MotionKind::Field, true) => {
                for r in 0..2 {
                    motion.field_select[r][s] = usize::from(bc.get1bit());
                    let (v, _) = self.read_vector(bc, r, s, true, false)?;
                    motion.vectors[r][s] = v;
                }
            }
            (MotionKind::Field, false) => {
                motion.field_select[0][s] = usize::from(bc.get1bit());
                let (v, _) = self.read_vector(bc, 0, s, false, false)?;
                self.pmv[1][s] = self.pmv[0][s];
                motion.vectors[0][s] = v;
            }
            (MotionKind::Sixteen8, _) => {
                for r in 0..2 {
                    motion.field_select[r][s] = usize::from(bc.get1bit());
                    let (v, _) = self.read_vector(bc, r, s, false, false)?;
                    motion.vectors[r][s] = v;
                }
            }
            (MotionKind::DualPrime, _) => {
                let (v, dmv) = self.read_vector(bc, 0, s, frame_picture, true)?;
                self.pmv[1][s] = self.pmv[0][s];
                motion.vectors[0][s] = v;
                motion.vectors[1][s] = v;
                let [mx, my] = v;
                if frame_picture {
                    let m = if p.top_field_first { 1 } else { 3 };
                    motion.dual_prime[0] = [
                        scale_dual(mx, m) + dmv[0],
                        scale_dual(my, m) + dmv[1] - 1,
                    ];
                    let m = 4 - m;
                    motion.dual_prime[1] = [
                        scale_dual(mx, m) + dmv[0],
                        scale_dual(my, m) + dmv[1] + 1,
                    ];
                } else {
                    let e = if p.structure == PictureStructure::TopField {
                        -1
                    } else {
                        1
                    };
                    motion.dual_prime[0] = [
                        scale_dual(mx, 1) + dmv[0],
                        scale_dual(my, 1) + dmv[1] + e,
                    ];
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_wraps_into_range() {
        // f_code=1: 范围 [-16, 15]
        assert_eq!(reconstruct_component(3, 0, 1, 14), -15);
        assert_eq!(reconstruct_component(-2, 0, 1, -15), 15);
        assert_eq!(reconstruct_component(0, 0, 1, 7), 7);
    }

    #[test]
    fn test_component_with_residual() {
        // f_code=3: f=4, code=-2, residual=1 -> delta = -((2-1)*4 + 1 + 1) = -6
        assert_eq!(reconstruct_component(-2, 1, 3, 10), 4);
        // 上界 16*4-1 = 63
        assert_eq!(reconstruct_component(16, 3, 3, 0), 64 - 128);
    }

    #[test]
    fn test_dual_prime_scaling_rounds_away_from_negative() {
        assert_eq!(scale_dual(3, 1), 2);
        assert_eq!(scale_dual(-3, 1), -2);
        assert_eq!(scale_dual(5, 3), 8);
        assert_eq!(scale_dual(0, 3), 0);
    }
}
