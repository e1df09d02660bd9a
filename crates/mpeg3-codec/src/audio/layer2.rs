//! Layer II 子带样本解码.
//!
//! 帧内依次为: 比特分配 → scfsi → 比例因子 → 12 组 × 3 个子带样本.
//! 每 4 组换用下一个比例因子. 没有位储备, 帧间只保留合成滤波器历史,
//! 多相合成由调用方完成.

use std::sync::OnceLock;

use mpeg3_core::{BitCursor, ByteSource, Mpeg3Error, Mpeg3Result};

use super::header::{ChannelMode, FrameHeader};

/// 子带数
pub const SUBBANDS: usize = 32;
/// 每声道每帧的时间槽数 (12 组 × 3)
pub const SLOTS: usize = 36;
const GROUPS: usize = 12;

/// 一帧的子带样本: `[声道][时间槽][子带]`
pub type SubbandFrame = Vec<[[f32; SUBBANDS]; SLOTS]>;

/// 量化器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quantizer {
    levels: u32,
    /// 三个样本合成一个码字
    grouped: bool,
    /// 码字位数 (成组时为整组的位数)
    bits: u32,
}

const fn quantizer(levels: u32, grouped: bool, bits: u32) -> Quantizer {
    Quantizer {
        levels,
        grouped,
        bits,
    }
}

/// 量化器序号 1..=17
const QUANTIZERS: [Quantizer; 17] = [
    quantizer(3, true, 5),
    quantizer(5, true, 7),
    quantizer(7, false, 3),
    quantizer(9, true, 10),
    quantizer(15, false, 4),
    quantizer(31, false, 5),
    quantizer(63, false, 6),
    quantizer(127, false, 7),
    quantizer(255, false, 8),
    quantizer(511, false, 9),
    quantizer(1023, false, 10),
    quantizer(2047, false, 11),
    quantizer(4095, false, 12),
    quantizer(8191, false, 13),
    quantizer(16383, false, 14),
    quantizer(32767, false, 15),
    quantizer(65535, false, 16),
];

/// 分配值 → 量化器序号, 0 表示该子带不分配
#[rustfmt::skip]
const ALLOC_ROWS: [[u8; 16]; 7] = [
    [0, 1, 2, 17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 2, 3, 4, 5, 6, 17, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 17],
    [0, 1, 3, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17],
    [0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 17],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 1, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 比特分配表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllocTable {
    /// 高码率, 27 个子带
    High27,
    /// 高码率, 30 个子带
    High30,
    /// 低码率, 8 个子带
    Low8,
    /// 低码率 32 kHz, 12 个子带
    Low12,
    /// MPEG-2 低采样率
    Lsf,
}

impl AllocTable {
    /// 按版本、采样率与每声道码率选表
    fn select(header: &FrameHeader) -> Self {
        if header.is_lsf() {
            return Self::Lsf;
        }
        let per_channel = header.bitrate / 1000 / header.channels() as u32;
        match (per_channel, header.sample_rate) {
            (0..=48, 32000) => Self::Low12,
            (0..=48, _) => Self::Low8,
            (49..=80, _) | (_, 48000) => Self::High27,
            _ => Self::High30,
        }
    }

    fn sblimit(self) -> usize {
        match self {
            Self::High27 => 27,
            Self::High30 | Self::Lsf => 30,
            Self::Low8 => 8,
            Self::Low12 => 12,
        }
    }

    /// 子带的 (分配位数, 行号)
    fn band(self, sb: usize) -> (u32, usize) {
        match self {
            Self::High27 | Self::High30 => match sb {
                0..=2 => (4, 3),
                3..=10 => (4, 2),
                11..=22 => (3, 1),
                _ => (2, 0),
            },
            Self::Low8 | Self::Low12 => match sb {
                0..=1 => (4, 4),
                _ => (3, 4),
            },
            Self::Lsf => match sb {
                0..=3 => (4, 5),
                4..=10 => (3, 4),
                _ => (2, 6),
            },
        }
    }

    fn read_allocation<S: ByteSource>(
        self,
        bc: &mut BitCursor<S>,
        sb: usize,
    ) -> Option<Quantizer> {
        let (nbal, row) = self.band(sb);
        let index = ALLOC_ROWS[row][bc.getbits(nbal) as usize];
        (index > 0).then(|| QUANTIZERS[usize::from(index) - 1])
    }
}

/// 比例因子 2^(1 - i/3), 第 63 项非法, 按 0 处理
fn scalefactor(index: u32) -> f32 {
    static TABLE: OnceLock<[f32; 64]> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        let mut t = [0f32; 64];
        for (i, v) in t.iter_mut().enumerate().take(63) {
            *v = 2f64.powf(1.0 - i as f64 / 3.0) as f32;
        }
        t
    });
    table[index as usize & 63]
}

/// 码字 → 分数 `(2c - (n - 1)) / n`
#[inline]
fn dequantize(code: u32, levels: u32) -> f32 {
    (2.0 * code as f32 - (levels - 1) as f32) / levels as f32
}

fn read_triplet<S: ByteSource>(bc: &mut BitCursor<S>, q: Quantizer) -> [f32; 3] {
    let mut codes = [0u32; 3];
    if q.grouped {
        let mut c = bc.getbits(q.bits);
        for code in &mut codes {
            *code = c % q.levels;
            c /= q.levels;
        }
    } else {
        for code in &mut codes {
            *code = bc.getbits(q.bits);
        }
    }
    codes.map(|c| dequantize(c, q.levels))
}

/// 读取帧头 (及 CRC) 之后的一帧子带样本
pub fn read_frame<S: ByteSource>(
    bc: &mut BitCursor<S>,
    header: &FrameHeader,
) -> Mpeg3Result<SubbandFrame> {
    let nch = header.channels();
    let table = AllocTable::select(header);
    let sblimit = table.sblimit();
    // 联合立体声: bound 以上的子带两声道共用分配与样本
    let bound = if header.mode == ChannelMode::JointStereo {
        (usize::from(header.mode_extension) + 1) * 4
    } else {
        SUBBANDS
    }
    .min(sblimit);

    let mut alloc = [[None; SUBBANDS]; 2];
    for sb in 0..sblimit {
        if sb < bound {
            for ch in alloc.iter_mut().take(nch) {
                ch[sb] = table.read_allocation(bc, sb);
            }
        } else {
            let q = table.read_allocation(bc, sb);
            alloc[0][sb] = q;
            alloc[1][sb] = q;
        }
    }

    let mut scfsi = [[0u32; SUBBANDS]; 2];
    for sb in 0..sblimit {
        for ch in 0..nch {
            if alloc[ch][sb].is_some() {
                scfsi[ch][sb] = bc.getbits(2);
            }
        }
    }

    let mut scale = [[[0f32; 3]; SUBBANDS]; 2];
    for sb in 0..sblimit {
        for ch in 0..nch {
            if alloc[ch][sb].is_none() {
                continue;
            }
            let index = match scfsi[ch][sb] {
                0 => [bc.getbits(6), bc.getbits(6), bc.getbits(6)],
                1 => {
                    let a = bc.getbits(6);
                    [a, a, bc.getbits(6)]
                }
                2 => [bc.getbits(6); 3],
                _ => {
                    let a = bc.getbits(6);
                    let b = bc.getbits(6);
                    [a, b, b]
                }
            };
            scale[ch][sb] = index.map(scalefactor);
        }
    }

    let mut out: SubbandFrame = vec![[[0f32; SUBBANDS]; SLOTS]; nch];
    for group in 0..GROUPS {
        let part = group / 4;
        for sb in 0..sblimit {
            if sb < bound {
                for ch in 0..nch {
                    let Some(q) = alloc[ch][sb] else {
                        continue;
                    };
                    let values = read_triplet(bc, q);
                    for (k, v) in values.iter().enumerate() {
                        out[ch][group * 3 + k][sb] = v * scale[ch][sb][part];
                    }
                }
            } else if let Some(q) = alloc[0][sb] {
                // 共用样本, 各声道按自己的比例因子缩放
                let values = read_triplet(bc, q);
                for (ch, slots) in out.iter_mut().enumerate() {
                    for (k, v) in values.iter().enumerate() {
                        slots[group * 3 + k][sb] = v * scale[ch][sb][part];
                    }
                }
            }
        }
    }

    if bc.has_error() {
        return Err(Mpeg3Error::InvalidData("Layer II 帧数据被截断".into()));
    }
    Ok(out)
}
