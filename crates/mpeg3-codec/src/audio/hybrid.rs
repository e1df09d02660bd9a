//! 混合滤波: IMDCT、加窗与重叠相加.
//!
//! 长块做 36 点 IMDCT 并按块类型 (普通/起始/结束) 加窗; 短块做三次 12 点 IMDCT,
//! 加窗后错位叠加到 36 点输出中; 混合块前两个子带走长块路径.
//! 输出的前 18 点与上一颗粒保留的后 18 点相加, 奇数子带的奇数样本取反.

use std::f64::consts::PI;
use std::mem;
use std::sync::OnceLock;

use super::huffman::GRANULE_LINES;
use super::side_info::GranuleInfo;

/// 每个子带的样本数
pub const SUBBAND_LINES: usize = 18;
/// 子带数
pub const SUBBANDS: usize = 32;

struct ImdctTables {
    /// `cos(π/72·(2i+19)(2k+1))`
    long: [[f32; 18]; 36],
    /// `cos(π/24·(2i+7)(2k+1))`
    short: [[f32; 6]; 12],
    /// 块类型 0..=3 的长窗 (类型 2 不使用)
    windows: [[f32; 36]; 4],
    short_window: [f32; 12],
}

fn tables() -> &'static ImdctTables {
    static TABLES: OnceLock<ImdctTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut long = [[0f32; 18]; 36];
        for (i, row) in long.iter_mut().enumerate() {
            for (k, v) in row.iter_mut().enumerate() {
                *v = (PI / 72.0 * (2 * i + 19) as f64 * (2 * k + 1) as f64).cos() as f32;
            }
        }
        let mut short = [[0f32; 6]; 12];
        for (i, row) in short.iter_mut().enumerate() {
            for (k, v) in row.iter_mut().enumerate() {
                *v = (PI / 24.0 * (2 * i + 7) as f64 * (2 * k + 1) as f64).cos() as f32;
            }
        }

        let sin36 = |i: usize| (PI / 36.0 * (i as f64 + 0.5)).sin() as f32;
        let sin12 = |i: usize| (PI / 12.0 * (i as f64 + 0.5)).sin() as f32;
        let mut windows = [[0f32; 36]; 4];
        for i in 0..36 {
            windows[0][i] = sin36(i);
            windows[1][i] = match i {
                0..=17 => sin36(i),
                18..=23 => 1.0,
                24..=29 => sin12(i - 18),
                _ => 0.0,
            };
            windows[3][i] = match i {
                0..=5 => 0.0,
                6..=11 => sin12(i - 6),
                12..=17 => 1.0,
                _ => sin36(i),
            };
        }
        let mut short_window = [0f32; 12];
        for (i, w) in short_window.iter_mut().enumerate() {
            *w = sin12(i);
        }
        ImdctTables {
            long,
            short,
            windows,
            short_window,
        }
    })
}

fn imdct_long(input: &[f32], window: &[f32; 36], z: &mut [f32; 36]) {
    let t = tables();
    for (i, out) in z.iter_mut().enumerate() {
        let sum: f32 = input.iter().zip(&t.long[i]).map(|(x, c)| x * c).sum();
        *out = sum * window[i];
    }
}

fn imdct_short(input: &[f32], z: &mut [f32; 36]) {
    let t = tables();
    z.fill(0.0);
    for w in 0..3 {
        for i in 0..12 {
            let mut sum = 0.0;
            for k in 0..6 {
                sum += input[3 * k + w] * t.short[i][k];
            }
            z[6 + 6 * w + i] += sum * t.short_window[i];
        }
    }
}

/// 每声道的重叠历史
///
/// `previous` 保存上一颗粒各子带 IMDCT 输出的后半部分, `current` 接收本颗粒的后半部分,
/// 颗粒处理完毕后二者交换.
#[derive(Debug, Clone)]
pub struct HybridHistory {
    current: [[f32; SUBBAND_LINES]; SUBBANDS],
    previous: [[f32; SUBBAND_LINES]; SUBBANDS],
}

impl Default for HybridHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HybridHistory {
    pub fn new() -> Self {
        Self {
            current: [[0.0; SUBBAND_LINES]; SUBBANDS],
            previous: [[0.0; SUBBAND_LINES]; SUBBANDS],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 处理一个颗粒, 输出按时间排列 `out[t][sb]`
    pub fn process(
        &mut self,
        gi: &GranuleInfo,
        xr: &[f32; GRANULE_LINES],
        out: &mut [[f32; SUBBANDS]; SUBBAND_LINES],
    ) {
        let t = tables();
        let long_window = if gi.window_switching && !gi.has_short_blocks() {
            usize::from(gi.block_type)
        } else {
            0
        };
        let mut z = [0f32; 36];

        for sb in 0..SUBBANDS {
            let input = &xr[sb * SUBBAND_LINES..(sb + 1) * SUBBAND_LINES];
            let short = gi.has_short_blocks() && !(gi.mixed_block && sb < 2);
            if input.iter().all(|&v| v == 0.0) {
                z.fill(0.0);
            } else if short {
                imdct_short(input, &mut z);
            } else {
                imdct_long(input, &t.windows[long_window], &mut z);
            }

            let overlap = &self.previous[sb];
            for i in 0..SUBBAND_LINES {
                let mut v = z[i] + overlap[i];
                if sb % 2 == 1 && i % 2 == 1 {
                    v = -v;
                }
                out[i][sb] = v;
            }
            self.current[sb].copy_from_slice(&z[SUBBAND_LINES..]);
        }
        mem::swap(&mut self.current, &mut self.previous);
    }
}
