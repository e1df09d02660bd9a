//! 运动补偿预测与残差写回.
//!
//! 16 个预测核 = {整像素, 水平半像素, 垂直半像素, 双向半像素} × {16 宽, 8 宽} × {覆盖, 平均}.
//! 参考读取逐样本钳位到平面内, 畸形矢量不会越界.

use mpeg3_core::ChromaFormat;

use super::frame::{FrameBuffer, Plane, Window};
use super::headers::PictureStructure;
use super::idct::idct_8x8;
use super::macroblock::{MacroblockType, MotionKind, MotionState};
use super::slice::SliceDecoder;
use crate::frame::PictureType;

/// 一次块预测的位置参数
#[derive(Debug, Clone, Copy)]
struct McBlock {
    /// 参考视图中的整像素起点
    sx: i32,
    sy: i32,
    /// 目标视图中的起点
    dx: usize,
    dy: usize,
    h: usize,
}

type McKernel = fn(&Window<'_>, &Window<'_>, McBlock);

fn mc<const W: usize, const HX: bool, const HY: bool, const AVG: bool>(
    src: &Window<'_>,
    dst: &Window<'_>,
    b: McBlock,
) {
    let max_x = src.width() as i32 - 1;
    let max_y = src.height() as i32 - 1;
    let mut cols = [0usize; 17];
    for (c, col) in cols.iter_mut().enumerate().take(W + 1) {
        *col = (b.sx + c as i32).clamp(0, max_x) as usize;
    }
    let sp = src.plane;
    let dp = dst.plane;
    for r in 0..b.h {
        let y = b.sy + r as i32;
        let r0 = src.row_offset(y.clamp(0, max_y) as usize);
        let r1 = if HY {
            src.row_offset((y + 1).clamp(0, max_y) as usize)
        } else {
            r0
        };
        let d = dst.row_offset(b.dy + r) + b.dx;
        for c in 0..W {
            let a = u32::from(sp.get(r0 + cols[c]));
            let pred = match (HX, HY) {
                (false, false) => a,
                (true, false) => (a + u32::from(sp.get(r0 + cols[c + 1])) + 1) >> 1,
                (false, true) => (a + u32::from(sp.get(r1 + cols[c])) + 1) >> 1,
                (true, true) => {
                    (a + u32::from(sp.get(r0 + cols[c + 1]))
                        + u32::from(sp.get(r1 + cols[c]))
                        + u32::from(sp.get(r1 + cols[c + 1]))
                        + 2)
                        >> 2
                }
            };
            let v = if AVG {
                (u32::from(dp.get(d + c)) + pred + 1) >> 1
            } else {
                pred
            };
            dp.set(d + c, v as u8);
        }
    }
}

/// 按块宽、半像素标志与覆盖/平均选择预测核
fn kernel(wide: bool, hx: bool, hy: bool, avg: bool) -> McKernel {
    match (wide, hx, hy, avg) {
        (true, false, false, false) => mc::<16, false, false, false>,
        (true, true, false, false) => mc::<16, true, false, false>,
        (true, false, true, false) => mc::<16, false, true, false>,
        (true, true, true, false) => mc::<16, true, true, false>,
        (true, false, false, true) => mc::<16, false, false, true>,
        (true, true, false, true) => mc::<16, true, false, true>,
        (true, false, true, true) => mc::<16, false, true, true>,
        (true, true, true, true) => mc::<16, true, true, true>,
        (false, false, false, false) => mc::<8, false, false, false>,
        (false, true, false, false) => mc::<8, true, false, false>,
        (false, false, true, false) => mc::<8, false, true, false>,
        (false, true, true, false) => mc::<8, true, true, false>,
        (false, false, false, true) => mc::<8, false, false, true>,
        (false, true, false, true) => mc::<8, true, false, true>,
        (false, false, true, true) => mc::<8, false, true, true>,
        (false, true, true, true) => mc::<8, true, true, true>,
    }
}

/// 以半像素矢量 `mv` 预测 `width`x`h` 的区域
fn predict_plane(
    src: &Window<'_>,
    dst: &Window<'_>,
    x: usize,
    y: usize,
    width: usize,
    h: usize,
    mv: [i32; 2],
    avg: bool,
) {
    let k = kernel(width == 16, mv[0] & 1 != 0, mv[1] & 1 != 0, avg);
    k(
        src,
        dst,
        McBlock {
            sx: x as i32 + (mv[0] >> 1),
            sy: y as i32 + (mv[1] >> 1),
            dx: x,
            dy: y,
            h,
        },
    );
}

/// 行视图选择: `None` 为整帧, `Some(p)` 为奇偶性 p 的场
fn window(plane: &Plane, field: Option<usize>) -> Window<'_> {
    match field {
        Some(parity) => Window::field(plane, parity),
        None => Window::frame(plane),
    }
}

/// 色度减采样的移位量 (水平, 垂直)
fn chroma_shift(format: ChromaFormat) -> (u32, u32) {
    (
        u32::from(format.half_width()),
        u32::from(format.half_height()),
    )
}

/// 对一个区域做亮度+色度预测
///
/// `x`/`y`/`h` 以亮度样本计, `y` 为所选视图内的行号.
#[allow(clippy::too_many_arguments)]
fn predict_region(
    reference: &FrameBuffer,
    src_field: Option<usize>,
    target: &FrameBuffer,
    dst_field: Option<usize>,
    chroma: ChromaFormat,
    x: usize,
    y: usize,
    h: usize,
    mv: [i32; 2],
    avg: bool,
) {
    predict_plane(
        &window(reference.y(), src_field),
        &window(target.y(), dst_field),
        x,
        y,
        16,
        h,
        mv,
        avg,
    );
    let (hs, vs) = chroma_shift(chroma);
    // 色度矢量向零截断
    let cmv = [mv[0] / (1 << hs), mv[1] / (1 << vs)];
    for c in 1..3 {
        predict_plane(
            &window(&reference.planes[c], src_field),
            &window(&target.planes[c], dst_field),
            x >> hs,
            y >> vs,
            16 >> hs,
            h >> vs,
            cmv,
            avg,
        );
    }
}

impl SliceDecoder<'_> {
    /// 本图像写入的行视图
    fn picture_field(&self) -> Option<usize> {
        self.params
            .structure
            .is_field()
            .then(|| self.params.structure.parity())
    }

    /// 方向 `s` 的参考帧; P 场对的第二场可引用同一帧中已解码的第一场
    fn reference(&self, s: usize, field_select: usize) -> &FrameBuffer {
        let p = self.params;
        let roles = self.job.roles;
        let slot = if s == 0 {
            if p.structure.is_field()
                && p.second_field
                && p.picture_type == PictureType::P
                && field_select != p.structure.parity()
            {
                Some(roles.target)
            } else {
                roles.forward
            }
        } else {
            roles.backward
        };
        &self.job.frames[slot.unwrap_or(roles.target)]
    }

    /// 按运动信息形成宏块预测 (前向覆盖, 后向平均)
    pub(super) fn predict_macroblock(&self, mb_x: usize, mb_y: usize, motion: &MotionState) {
        let p = self.params;
        let target = self.job.target();
        let chroma = p.chroma_format;
        let x = mb_x * 16;
        let mut avg = false;
        for s in 0..2 {
            let flag = if s == 0 {
                MacroblockType::MOTION_FORWARD
            } else {
                MacroblockType::MOTION_BACKWARD
            };
            if !motion.directions.contains(flag) {
                continue;
            }
            let v = &motion.vectors;
            let sel = &motion.field_select;
            if p.structure == PictureStructure::Frame {
                match motion.kind {
                    MotionKind::Field => {
                        for d in 0..2 {
                            predict_region(
                                self.reference(s, sel[d][s]),
                                Some(sel[d][s]),
                                target,
                                Some(d),
                                chroma,
                                x,
                                mb_y * 8,
                                8,
                                v[d][s],
                                avg,
                            );
                        }
                    }
                    MotionKind::DualPrime => {
                        let reference = self.reference(0, 0);
                        for d in 0..2 {
                            predict_region(
                                reference, Some(d), target, Some(d), chroma, x, mb_y * 8, 8,
                                v[0][0], false,
                            );
                            predict_region(
                                reference,
                                Some(1 - d),
                                target,
                                Some(d),
                                chroma,
                                x,
                                mb_y * 8,
                                8,
                                motion.dual_prime[d],
                                true,
                            );
                        }
                    }
                    MotionKind::Frame | MotionKind::Sixteen8 => {
                        predict_region(
                            self.reference(s, 0),
                            None,
                            target,
                            None,
                            chroma,
                            x,
                            mb_y * 16,
                            16,
                            v[0][s],
                            avg,
                        );
                    }
                }
            } else {
                let parity = p.structure.parity();
                match motion.kind {
                    MotionKind::Sixteen8 => {
                        for r in 0..2 {
                            predict_region(
                                self.reference(s, sel[r][s]),
                                Some(sel[r][s]),
                                target,
                                Some(parity),
                                chroma,
                                x,
                                mb_y * 16 + r * 8,
                                8,
                                v[r][s],
                                avg,
                            );
                        }
                    }
                    MotionKind::DualPrime => {
                        predict_region(
                            self.reference(0, parity),
                            Some(parity),
                            target,
                            Some(parity),
                            chroma,
                            x,
                            mb_y * 16,
                            16,
                            v[0][0],
                            false,
                        );
                        predict_region(
                            self.reference(0, 1 - parity),
                            Some(1 - parity),
                            target,
                            Some(parity),
                            chroma,
                            x,
                            mb_y * 16,
                            16,
                            motion.dual_prime[0],
                            true,
                        );
                    }
                    MotionKind::Field | MotionKind::Frame => {
                        predict_region(
                            self.reference(s, sel[0][s]),
                            Some(sel[0][s]),
                            target,
                            Some(parity),
                            chroma,
                            x,
                            mb_y * 16,
                            16,
                            v[0][s],
                            avg,
                        );
                    }
                }
            }
            avg = true;
        }
    }

    /// 以常量填充宏块 (I 图像中的跳过宏块)
    pub(super) fn fill_macroblock(&self, mb_x: usize, mb_y: usize, value: u8) {
        let target = self.job.target();
        let field = self.picture_field();
        let (hs, vs) = chroma_shift(self.params.chroma_format);
        for (c, plane) in target.planes.iter().enumerate() {
            let (sx, sy) = if c == 0 { (0, 0) } else { (hs, vs) };
            let w = window(plane, field);
            let bw = 16 >> sx;
            let bh = 16 >> sy;
            for r in 0..bh {
                let off = w.row_offset(mb_y * bh + r) + mb_x * bw;
                for i in 0..bw {
                    plane.set(off + i, value);
                }
            }
        }
    }

    /// 第 `block` 块在目标帧中的位置: (视图, x, y)
    fn block_destination(&self, block: usize, mb_x: usize, mb_y: usize) -> (Window<'_>, usize, usize) {
        let p = self.params;
        let target = self.job.target();
        let field = self.picture_field();
        let field_dct = self.mb.field_dct;
        if block < 4 {
            let base = window(target.y(), field);
            let x = mb_x * 16 + 8 * (block & 1);
            return if field_dct {
                (base.interleave(block >> 1), x, mb_y * 8)
            } else {
                (base, x, mb_y * 16 + 8 * (block >> 1))
            };
        }
        let plane = if block & 1 == 0 { target.cb() } else { target.cr() };
        let base = window(plane, field);
        match p.chroma_format {
            ChromaFormat::Yuv420 => (base, mb_x * 8, mb_y * 8),
            format => {
                let k = (block - 4) / 2;
                let cw = if format == ChromaFormat::Yuv422 { 8 } else { 16 };
                let x = mb_x * cw + 8 * (k >> 1);
                if field_dct {
                    (base.interleave(k & 1), x, mb_y * 8)
                } else {
                    (base, x, mb_y * 16 + 8 * (k & 1))
                }
            }
        }
    }

    /// 预测 (非帧内) 并写回所有编码块的残差
    pub(super) fn reconstruct_macroblock(&self, address: usize) {
        let p = self.params;
        let mb_x = address % p.mb_width;
        let mb_y = address / p.mb_width;
        let intra = self.mb.mb_type.contains(MacroblockType::INTRA);
        if !intra {
            self.predict_macroblock(mb_x, mb_y, &self.mb.motion);
        }
        let block_count = p.chroma_format.block_count();
        for block in 0..block_count {
            if !self.mb.is_coded(block, block_count) {
                continue;
            }
            let mut coeffs = self.mb.blocks[block];
            idct_8x8(&mut coeffs);
            let (w, x, y) = self.block_destination(block, mb_x, mb_y);
            put_block(&w, x, y, &coeffs, intra);
        }
    }
}

/// 写回 8x8 块: 帧内为 clip(v + 128), 非帧内为 clip(预测 + v)
fn put_block(w: &Window<'_>, x: usize, y: usize, block: &[i32; 64], intra: bool) {
    for (r, row) in block.chunks_exact(8).enumerate() {
        let off = w.row_offset(y + r) + x;
        for (c, &v) in row.iter().enumerate() {
            let base = if intra {
                128
            } else {
                i32::from(w.plane.get(off + c))
            };
            w.plane.set(off + c, (base + v).clamp(0, 255) as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_plane(width: usize, height: usize) -> Plane {
        let plane = Plane::new(width, height, 0);
        for y in 0..height {
            for x in 0..width {
                plane.set(y * width + x, ((x * 7 + y * 13) % 251) as u8);
            }
        }
        plane
    }

    #[test]
    fn test_full_pel_copy_is_identity() {
        let src = ramp_plane(32, 32);
        let dst = Plane::new(32, 32, 0);
        predict_plane(
            &Window::frame(&src),
            &Window::frame(&dst),
            16,
            16,
            16,
            16,
            [0, 0],
            false,
        );
        for y in 16..32 {
            for x in 16..32 {
                assert_eq!(dst.get(y * 32 + x), src.get(y * 32 + x), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_half_pel_on_uniform_plane_is_exact() {
        let src = Plane::new(32, 32, 77);
        for mv in [[1, 0], [0, 1], [1, 1], [-3, 5], [31, -31]] {
            let dst = Plane::new(32, 32, 0);
            predict_plane(
                &Window::frame(&src),
                &Window::frame(&dst),
                0,
                0,
                16,
                16,
                mv,
                false,
            );
            for i in 0..16 {
                assert_eq!(dst.get(i * 32 + i), 77, "矢量 {:?} 的半像素插值应保持常量", mv);
            }
        }
    }

    #[test]
    fn test_half_pel_rounding() {
        let src = Plane::new(16, 2, 0);
        src.set(0, 10);
        src.set(1, 13);
        src.set(16, 20);
        src.set(17, 23);
        let dst = Plane::new(16, 2, 0);
        let (s, d) = (Window::frame(&src), Window::frame(&dst));
        kernel(false, true, false, false)(&s, &d, McBlock { sx: 0, sy: 0, dx: 0, dy: 0, h: 1 });
        assert_eq!(dst.get(0), 12, "(10+13+1)>>1");
        kernel(false, true, true, false)(&s, &d, McBlock { sx: 0, sy: 0, dx: 0, dy: 0, h: 1 });
        assert_eq!(dst.get(0), 17, "(10+13+20+23+2)>>2");
        kernel(false, false, false, true)(&s, &d, McBlock { sx: 0, sy: 1, dx: 0, dy: 0, h: 1 });
        assert_eq!(dst.get(0), 19, "(17+20+1)>>1");
    }

    #[test]
    fn test_out_of_range_vector_is_clamped() {
        let src = ramp_plane(16, 16);
        let dst = Plane::new(16, 16, 0);
        predict_plane(
            &Window::frame(&src),
            &Window::frame(&dst),
            0,
            0,
            16,
            16,
            [-2000, 4000],
            false,
        );
        // 全部读取钳位到左下角样本
        assert_eq!(dst.get(0), src.get(15 * 16));
    }

    #[test]
    fn test_put_block_clips() {
        let plane = Plane::new(8, 8, 250);
        let mut block = [0i32; 64];
        block[0] = 20;
        block[1] = -300;
        put_block(&Window::frame(&plane), 0, 0, &block, false);
        assert_eq!(plane.get(0), 255);
        assert_eq!(plane.get(1), 0);
        put_block(&Window::frame(&plane), 0, 0, &block, true);
        assert_eq!(plane.get(0), 148);
        assert_eq!(plane.get(2), 128);
    }
}
