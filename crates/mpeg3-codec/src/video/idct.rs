//! 8x8 整数 IDCT.
//!
//! 行列分离的定点实现, 系数按 2^14 缩放 (cos(iπ/16)·√2), 精度满足 IEEE 1180.

/// cos(i*π/16) * √2 * 2^14, 下标 0 未使用
const W: [i64; 8] = [0, 22725, 21407, 19266, 16383, 12873, 8867, 4520];

const ROW_SHIFT: u32 = 11;
const COL_SHIFT: u32 = 20;
const DC_SHIFT: u32 = 3;

/// 一维 8 点 IDCT, `round` 预先加到偶数部分
#[inline(always)]
fn idct_1d(x: [i64; 8], round: i64, shift: u32) -> [i64; 8] {
    let e0 = W[4] * x[0] + round;
    let a0 = e0 + W[2] * x[2] + W[4] * x[4] + W[6] * x[6];
    let a1 = e0 + W[6] * x[2] - W[4] * x[4] - W[2] * x[6];
    let a2 = e0 - W[6] * x[2] - W[4] * x[4] + W[2] * x[6];
    let a3 = e0 - W[2] * x[2] + W[4] * x[4] - W[6] * x[6];

    let b0 = W[1] * x[1] + W[3] * x[3] + W[5] * x[5] + W[7] * x[7];
    let b1 = W[3] * x[1] - W[7] * x[3] - W[1] * x[5] - W[5] * x[7];
    let b2 = W[5] * x[1] - W[1] * x[3] + W[7] * x[5] + W[3] * x[7];
    let b3 = W[7] * x[1] - W[5] * x[3] + W[3] * x[5] - W[1] * x[7];

    [
        (a0 + b0) >> shift,
        (a1 + b1) >> shift,
        (a2 + b2) >> shift,
        (a3 + b3) >> shift,
        (a3 - b3) >> shift,
        (a2 - b2) >> shift,
        (a1 - b1) >> shift,
        (a0 - b0) >> shift,
    ]
}

fn idct_rows(block: &mut [i32; 64]) {
    for row in block.chunks_exact_mut(8) {
        if row[1..].iter().all(|&v| v == 0) {
            let dc = row[0] << DC_SHIFT;
            row.fill(dc);
            continue;
        }
        let x = std::array::from_fn(|i| i64::from(row[i]));
        let y = idct_1d(x, 1 << (ROW_SHIFT - 1), ROW_SHIFT);
        for (dst, v) in row.iter_mut().zip(y) {
            *dst = v as i32;
        }
    }
}

fn idct_cols(block: &mut [i32; 64]) {
    for col in 0..8 {
        let x: [i64; 8] = std::array::from_fn(|i| i64::from(block[col + i * 8]));
        let y = if x[1..].iter().all(|&v| v == 0) {
            let dc = (x[0] * W[4] + (1 << (COL_SHIFT - 1))) >> COL_SHIFT;
            [dc; 8]
        } else {
            idct_1d(x, 1 << (COL_SHIFT - 1), COL_SHIFT)
        };
        for (i, v) in y.into_iter().enumerate() {
            block[col + i * 8] = v as i32;
        }
    }
}

/// 原地 8x8 IDCT (输入为自然顺序的反量化系数)
pub fn idct_8x8(block: &mut [i32; 64]) {
    if block[1..].iter().all(|&v| v == 0) {
        // 仅 DC: 行变换得到 dc<<3, 列变换再乘 W4
        let dc = (i64::from(block[0] << DC_SHIFT) * W[4] + (1 << (COL_SHIFT - 1))) >> COL_SHIFT;
        block.fill(dc as i32);
        return;
    }
    idct_rows(block);
    idct_cols(block);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn reference_idct(input: &[i32; 64]) -> [f64; 64] {
        let mut out = [0.0f64; 64];
        for y in 0..8 {
            for x in 0..8 {
                let mut sum = 0.0;
                for v in 0..8 {
                    for u in 0..8 {
                        let cu = if u == 0 { 1.0 / 2f64.sqrt() } else { 1.0 };
                        let cv = if v == 0 { 1.0 / 2f64.sqrt() } else { 1.0 };
                        sum += cu
                            * cv
                            * f64::from(input[v * 8 + u])
                            * (((2 * x + 1) as f64 * u as f64 * PI) / 16.0).cos()
                            * (((2 * y + 1) as f64 * v as f64 * PI) / 16.0).cos();
                    }
                }
                out[y * 8 + x] = sum / 4.0;
            }
        }
        out
    }

    #[test]
    fn test_dc_only_block_is_flat() {
        let mut block = [0i32; 64];
        block[0] = 1024;
        idct_8x8(&mut block);
        assert!(block.iter().all(|&v| v == 128), "DC 块应得到平坦输出: {:?}", &block[..8]);

        let mut zero = [0i32; 64];
        idct_8x8(&mut zero);
        assert!(zero.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_matches_float_reference() {
        // 线性同余生成的稀疏系数
        let mut seed = 0x1234_5678u32;
        for _ in 0..50 {
            let mut block = [0i32; 64];
            for _ in 0..10 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                let pos = (seed >> 16) as usize % 64;
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                block[pos] = ((seed >> 16) % 512) as i32 - 256;
            }
            let expected = reference_idct(&block);
            let mut actual = block;
            idct_8x8(&mut actual);
            for i in 0..64 {
                let diff = (f64::from(actual[i]) - expected[i]).abs();
                assert!(diff <= 1.5, "位置 {} 误差过大: {} vs {}", i, actual[i], expected[i]);
            }
        }
    }
}
