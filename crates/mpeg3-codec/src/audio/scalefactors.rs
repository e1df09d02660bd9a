//! 比例因子频带布局与比例因子解码.
//!
//! 频带按系数顺序展开成条目列表: 长块每个频带一个条目, 短块每个频带三个条目
//! (窗口 0/1/2 依次相邻), 混合块先列长块频带再列从第 3 个短块频带起的条目.
//! 比例因子以同样的条目顺序存放, 反量化、强度立体声和重排序共用这一布局.

use std::ops::Range;

use mpeg3_core::{BitCursor, ByteSource};

use super::header::FrameHeader;
use super::side_info::GranuleInfo;
use super::tables::{NR_OF_SFB, SFB_LONG, SFB_SHORT, SLEN};

/// 条目数上限 (纯短块 13 × 3)
pub const MAX_ENTRIES: usize = 40;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    /// 长块频带
    Long { band: usize },
    /// 短块频带中的一个窗口
    Short { band: usize, window: usize },
}

/// 一个颗粒的频带布局
#[derive(Debug, Clone)]
pub struct BandLayout {
    widths: [u16; MAX_ENTRIES],
    len: usize,
    long_entries: usize,
    short_start: usize,
}

impl BandLayout {
    pub fn new(gi: &GranuleInfo, header: &FrameHeader) -> Self {
        let sr = header.sample_rate_index();
        let long = &SFB_LONG[sr];
        let short = &SFB_SHORT[sr];
        let mut layout = Self {
            widths: [0; MAX_ENTRIES],
            len: 0,
            long_entries: 0,
            short_start: 0,
        };

        if !gi.has_short_blocks() {
            layout.widths[..22].copy_from_slice(long);
            layout.len = 22;
            layout.long_entries = 22;
            return layout;
        }

        if gi.mixed_block {
            let n = if header.is_lsf() { 6 } else { 8 };
            layout.widths[..n].copy_from_slice(&long[..n]);
            layout.long_entries = n;
            layout.short_start = 3;
        }
        let mut len = layout.long_entries;
        for &w in &short[layout.short_start..] {
            layout.widths[len..len + 3].fill(w);
            len += 3;
        }
        layout.len = len;
        layout
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 长块条目数 (长块布局为 22, 纯短块为 0)
    pub fn long_entries(&self) -> usize {
        self.long_entries
    }

    /// 短块区域的起始系数
    pub fn short_region_start(&self) -> usize {
        self.boundary(self.long_entries)
    }

    /// 前 `n` 个条目覆盖的系数数
    pub fn boundary(&self, n: usize) -> usize {
        self.widths[..n.min(self.len)]
            .iter()
            .map(|&w| usize::from(w))
            .sum()
    }

    /// 条目覆盖的系数范围
    pub fn range(&self, entry: usize) -> Range<usize> {
        self.boundary(entry)..self.boundary(entry + 1)
    }

    /// 条目类型
    pub fn kind(&self, entry: usize) -> BandKind {
        if entry < self.long_entries {
            BandKind::Long { band: entry }
        } else {
            let k = entry - self.long_entries;
            BandKind::Short {
                band: self.short_start + k / 3,
                window: k % 3,
            }
        }
    }

    /// 依次给出 `(条目序号, 系数范围)`
    pub fn entries(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        let mut start = 0;
        self.widths[..self.len]
            .iter()
            .enumerate()
            .map(move |(i, &w)| {
                let end = start + usize::from(w);
                let range = start..end;
                start = end;
                (i, range)
            })
    }
}

/// 一个颗粒单声道的比例因子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactors {
    /// 按布局条目顺序
    pub values: [u8; MAX_ENTRIES],
    /// 各条目可表示的最大值 (LSF 强度立体声的非法位置)
    pub max: [u8; MAX_ENTRIES],
    pub preflag: bool,
    /// LSF 强度立体声比例 (scalefac_compress 最低位)
    pub intensity_scale: u8,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self {
            values: [0; MAX_ENTRIES],
            max: [0; MAX_ENTRIES],
            preflag: false,
            intensity_scale: 0,
        }
    }
}

/// 读取 MPEG-1 比例因子
///
/// 第二个颗粒中 `scfsi` 置位的分组复用 `previous` 的值 (仅长块).
pub fn read_mpeg1<S: ByteSource>(
    bc: &mut BitCursor<S>,
    gi: &GranuleInfo,
    scfsi: &[bool; 4],
    granule: usize,
    previous: &ScaleFactors,
) -> ScaleFactors {
    let (slen1, slen2) = SLEN[gi.scalefac_compress as usize & 0xF];
    let mut sf = ScaleFactors {
        preflag: gi.preflag,
        ..Default::default()
    };

    if gi.has_short_blocks() {
        let first = if gi.mixed_block { 17 } else { 18 };
        let mut n = 0;
        for (count, slen) in [(first, slen1), (18, slen2)] {
            for _ in 0..count {
                sf.values[n] = bc.getbits(slen) as u8;
                n += 1;
            }
        }
        return sf;
    }

    const GROUPS: [Range<usize>; 4] = [0..6, 6..11, 11..16, 16..21];
    for (g, range) in GROUPS.into_iter().enumerate() {
        let slen = if g < 2 { slen1 } else { slen2 };
        if granule == 1 && scfsi[g] {
            sf.values[range.clone()].copy_from_slice(&previous.values[range]);
        } else {
            for v in &mut sf.values[range] {
                *v = bc.getbits(slen) as u8;
            }
        }
    }
    sf
}

/// 读取 MPEG-2 LSF 比例因子
///
/// 强度立体声的右声道使用单独的 `scalefac_compress` 划分, 且不使用 preflag.
pub fn read_lsf<S: ByteSource>(
    bc: &mut BitCursor<S>,
    gi: &GranuleInfo,
    intensity_right: bool,
) -> ScaleFactors {
    let sfc = gi.scalefac_compress;
    let mut sf = ScaleFactors::default();

    let (slen, table) = if intensity_right {
        sf.intensity_scale = (sfc & 1) as u8;
        let isc = sfc >> 1;
        if isc < 180 {
            ([isc / 36, (isc % 36) / 6, isc % 6, 0], 3)
        } else if isc < 244 {
            let t = isc - 180;
            ([(t % 64) >> 4, (t % 16) >> 2, t % 4, 0], 4)
        } else {
            let t = isc - 244;
            ([t / 3, t % 3, 0, 0], 5)
        }
    } else if sfc < 400 {
        ([(sfc >> 4) / 5, (sfc >> 4) % 5, (sfc % 16) >> 2, sfc % 4], 0)
    } else if sfc < 500 {
        let t = sfc - 400;
        ([(t >> 2) / 5, (t >> 2) % 5, t % 4, 0], 1)
    } else {
        sf.preflag = true;
        let t = sfc - 500;
        ([t / 3, t % 3, 0, 0], 2)
    };

    let block = match (gi.has_short_blocks(), gi.mixed_block) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    };
    let mut n = 0;
    for (k, &count) in NR_OF_SFB[table][block].iter().enumerate() {
        let bits = slen[k];
        for _ in 0..count {
            if n >= MAX_ENTRIES {
                break;
            }
            sf.values[n] = bc.getbits(bits) as u8;
            sf.max[n] = ((1u32 << bits) - 1) as u8;
            n += 1;
        }
    }
    sf
}

/// 按帧类型读取比例因子
pub fn read<S: ByteSource>(
    bc: &mut BitCursor<S>,
    header: &FrameHeader,
    gi: &GranuleInfo,
    channel: usize,
    scfsi: &[bool; 4],
    granule: usize,
    previous: &ScaleFactors,
) -> ScaleFactors {
    if header.is_lsf() {
        read_lsf(bc, gi, channel == 1 && header.intensity_stereo())
    } else {
        read_mpeg1(bc, gi, scfsi, granule, previous)
    }
}

#[cfg(test)]
mod tests {
    use mpeg3_core::{BitWriter, MemorySource};

    use super::*;

    fn header() -> FrameHeader {
        FrameHeader::parse(0xFFFB_90C0).expect("解析失败")
    }

    #[test]
    fn test_long_layout_covers_granule() {
        let gi = GranuleInfo::default();
        let layout = BandLayout::new(&gi, &header());
        assert_eq!(layout.len(), 22);
        assert_eq!(layout.boundary(22), 576);
        assert_eq!(layout.boundary(8), 36);
        assert_eq!(layout.kind(5), BandKind::Long { band: 5 });
    }

    #[test]
    fn test_short_and_mixed_layouts() {
        let short = GranuleInfo {
            window_switching: true,
            block_type: 2,
            ..Default::default()
        };
        let layout = BandLayout::new(&short, &header());
        assert_eq!(layout.len(), 39);
        assert_eq!(layout.boundary(39), 576);
        assert_eq!(layout.boundary(9), 36, "region0_count=8 对应 36 个系数");
        assert_eq!(layout.kind(4), BandKind::Short { band: 1, window: 1 });

        let mixed = GranuleInfo {
            mixed_block: true,
            ..short
        };
        let layout = BandLayout::new(&mixed, &header());
        assert_eq!(layout.long_entries(), 8);
        assert_eq!(layout.short_region_start(), 36);
        assert_eq!(layout.len(), 8 + 30);
        assert_eq!(layout.boundary(38), 576);
        assert_eq!(layout.kind(8), BandKind::Short { band: 3, window: 0 });
    }

    #[test]
    fn test_mpeg1_scfsi_reuse() {
        // scalefac_compress=15: slen1=4, slen2=3
        let gi = GranuleInfo {
            scalefac_compress: 15,
            ..Default::default()
        };
        let mut bw = BitWriter::new();
        for i in 0..11 {
            bw.put_bits(i, 4);
        }
        for _ in 0..10 {
            bw.put_bits(5, 3);
        }
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        let gr0 = read_mpeg1(&mut bc, &gi, &[false; 4], 0, &ScaleFactors::default());
        assert_eq!(bc.bit_position(), 11 * 4 + 10 * 3);
        assert_eq!(gr0.values[10], 10);
        assert_eq!(gr0.values[20], 5);

        // 第二颗粒: 前两组复用
        let mut bw = BitWriter::new();
        for _ in 0..10 {
            bw.put_bits(1, 3);
        }
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        let gr1 = read_mpeg1(&mut bc, &gi, &[true, true, false, false], 1, &gr0);
        assert_eq!(bc.bit_position(), 30);
        assert_eq!(&gr1.values[..11], &gr0.values[..11]);
        assert_eq!(gr1.values[11], 1);
        assert_eq!(gr1.values[21], 0, "最后一个频带不传输");
    }

    #[test]
    fn test_lsf_partitions() {
        // sfc=500+7: slen=[2,1,0,0], preflag
        let gi = GranuleInfo {
            scalefac_compress: 507,
            ..Default::default()
        };
        // 表 2 长块分组 [11, 10, 0, 0]
        let mut bw = BitWriter::new();
        for _ in 0..11 {
            bw.put_bits(3, 2);
        }
        for _ in 0..10 {
            bw.put_bits(1, 1);
        }
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        let sf = read_lsf(&mut bc, &gi, false);
        assert!(sf.preflag);
        assert_eq!(bc.bit_position(), 11 * 2 + 10);
        assert_eq!(sf.values[10], 3);
        assert_eq!(sf.values[11], 1);
        assert_eq!(sf.values[20], 1);
        assert_eq!(sf.values[21], 0);
        assert_eq!(sf.max[0], 3);
        assert_eq!(sf.max[11], 1);
    }

    #[test]
    fn test_lsf_intensity_right_channel() {
        // isc = 37: slen=[1,0,1,0], 表 3 长块 [7,7,7,0]
        let gi = GranuleInfo {
            scalefac_compress: (37 << 1) | 1,
            ..Default::default()
        };
        let mut bw = BitWriter::new();
        bw.put_bits(0x7F, 7);
        bw.put_bits(0x7F, 7);
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        let sf = read_lsf(&mut bc, &gi, true);
        assert_eq!(sf.intensity_scale, 1);
        assert!(!sf.preflag);
        assert_eq!(bc.bit_position(), 14);
        assert_eq!(sf.values[6], 1);
        assert_eq!(sf.values[7], 0);
        assert_eq!(sf.max[7], 0);
        assert_eq!(sf.values[14], 1);
    }
}
