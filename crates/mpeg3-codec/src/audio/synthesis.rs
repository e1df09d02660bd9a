//! 多相合成滤波器组.
//!
//! 每次调用把 32 个子带样本矩阵化为 64 点向量 `V[i] = Σ cos((16+i)(2k+1)π/64)·S[k]`,
//! 再与合成窗 `D` 做 16 路加权求和, 得到 32 个 PCM 样本.
//!
//! 窗口求和时, 年龄为偶数的向量只用到前 32 点, 年龄为奇数的只用到后 32 点.
//! 因此历史拆成两个 512 点的半区: `current` 存放本次调用要用的半个向量,
//! `previous` 存放下一次调用要用的另一半. 每次调用先交换两个半区, 再写入新向量.

use std::f64::consts::PI;
use std::mem;
use std::sync::OnceLock;

use super::tables::ENWINDOW;

/// 历史向量数
const SLOTS: usize = 16;

struct SynthesisTables {
    /// 64 × 32 矩阵化系数
    matrix: Vec<[f32; 32]>,
    /// 512 点合成窗
    window: Vec<f32>,
}

fn tables() -> &'static SynthesisTables {
    static TABLES: OnceLock<SynthesisTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let matrix = (0..64)
            .map(|i| {
                let mut row = [0f32; 32];
                for (k, v) in row.iter_mut().enumerate() {
                    *v = ((16 + i) as f64 * (2 * k + 1) as f64 * PI / 64.0).cos() as f32;
                }
                row
            })
            .collect();

        // D[512 - i] 与 D[i] 对称, 不在 64 的整数倍处取反
        let mut window = vec![0f32; 512];
        for (i, &v) in ENWINDOW.iter().enumerate() {
            let d = v as f32 / 65536.0;
            window[i] = d;
            if i != 0 {
                window[512 - i] = if i % 64 != 0 { -d } else { d };
            }
        }
        SynthesisTables { matrix, window }
    })
}

/// 每声道的合成历史
#[derive(Debug, Clone)]
pub struct SynthesisHistory {
    current: [[f32; 32]; SLOTS],
    previous: [[f32; 32]; SLOTS],
    /// 最新向量所在的槽位
    pos: usize,
}

impl Default for SynthesisHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesisHistory {
    pub fn new() -> Self {
        Self {
            current: [[0.0; 32]; SLOTS],
            previous: [[0.0; 32]; SLOTS],
            pos: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 合成 32 个 PCM 样本写入 `pcm[..32]`
    pub fn synthesize(&mut self, subbands: &[f32; 32], pcm: &mut [f32]) {
        let t = tables();
        mem::swap(&mut self.current, &mut self.previous);
        self.pos = (self.pos + SLOTS - 1) % SLOTS;

        // dct64: 前半写入 current, 后半写入 previous
        let slot = self.pos;
        for (i, row) in t.matrix.iter().enumerate() {
            let v: f32 = row.iter().zip(subbands).map(|(c, s)| c * s).sum();
            if i < 32 {
                self.current[slot][i] = v;
            } else {
                self.previous[slot][i - 32] = v;
            }
        }

        for (j, out) in pcm.iter_mut().take(32).enumerate() {
            let mut sum = 0.0;
            for age in 0..SLOTS {
                let vector = &self.current[(slot + age) % SLOTS];
                sum += t.window[j + 32 * age] * vector[j];
            }
            *out = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_symmetry() {
        let t = tables();
        assert_eq!(t.window[0], 0.0);
        assert!((t.window[1] + 1.0 / 65536.0).abs() < 1e-9);
        assert!((t.window[511] - 1.0 / 65536.0).abs() < 1e-9);
        assert!((t.window[256] - 75038.0 / 65536.0).abs() < 1e-6);
        assert_eq!(t.window[448], t.window[64]);
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut h = SynthesisHistory::new();
        let mut pcm = [1f32; 32];
        for _ in 0..20 {
            h.synthesize(&[0.0; 32], &mut pcm);
            assert!(pcm.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_dc_in_lowest_subband() {
        // 子带 0 的恒定输入在滤波器稳定后还原为同一常数
        let mut h = SynthesisHistory::new();
        let mut input = [0f32; 32];
        input[0] = 0.5;
        let mut pcm = [0f32; 32];
        for _ in 0..20 {
            h.synthesize(&input, &mut pcm);
        }
        for &v in &pcm {
            assert!((v - 0.5).abs() < 1e-3, "输出 {} 偏离 0.5", v);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut h = SynthesisHistory::new();
        let mut input = [0f32; 32];
        input[3] = 1.0;
        let mut pcm = [0f32; 32];
        h.synthesize(&input, &mut pcm);
        h.reset();
        h.synthesize(&[0.0; 32], &mut pcm);
        assert!(pcm.iter().all(|&v| v == 0.0));
    }
}
