//! Layer III 侧信息解析.

use mpeg3_core::{BitCursor, ByteSource, Mpeg3Error, Mpeg3Result};

use super::header::FrameHeader;

/// 短块类型
pub const SHORT_BLOCK: u8 = 2;

/// 颗粒 (granule) 的单声道侧信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GranuleInfo {
    pub part2_3_length: u32,
    pub big_values: u32,
    pub global_gain: u32,
    pub scalefac_compress: u32,
    pub window_switching: bool,
    pub block_type: u8,
    pub mixed_block: bool,
    pub table_select: [u8; 3],
    pub subblock_gain: [u8; 3],
    pub region0_count: u32,
    pub region1_count: u32,
    pub preflag: bool,
    pub scalefac_scale: bool,
    pub count1table_select: bool,
}

impl GranuleInfo {
    /// 是否包含短块 (纯短块或混合块)
    pub fn has_short_blocks(&self) -> bool {
        self.window_switching && self.block_type == SHORT_BLOCK
    }

    /// 是否为纯短块
    pub fn is_pure_short(&self) -> bool {
        self.has_short_blocks() && !self.mixed_block
    }
}

/// 帧侧信息
#[derive(Debug, Clone, Default)]
pub struct SideInfo {
    pub main_data_begin: usize,
    pub private_bits: u32,
    /// `[声道][分组]`, 仅 MPEG-1
    pub scfsi: [[bool; 4]; 2],
    /// `[颗粒][声道]`
    pub granules: [[GranuleInfo; 2]; 2],
}

impl SideInfo {
    /// 从帧头 (及 CRC) 之后的位置读取侧信息
    pub fn parse<S: ByteSource>(
        bc: &mut BitCursor<S>,
        header: &FrameHeader,
    ) -> Mpeg3Result<Self> {
        let nch = header.channels();
        let lsf = header.is_lsf();
        let mut side = SideInfo {
            main_data_begin: bc.getbits(if lsf { 8 } else { 9 }) as usize,
            ..Default::default()
        };
        side.private_bits = bc.getbits(match (lsf, nch) {
            (false, 1) => 5,
            (false, _) => 3,
            (true, 1) => 1,
            (true, _) => 2,
        });

        if !lsf {
            for scfsi in side.scfsi.iter_mut().take(nch) {
                for band in scfsi.iter_mut() {
                    *band = bc.get1bit();
                }
            }
        }

        for gr in 0..header.granules() {
            for ch in 0..nch {
                side.granules[gr][ch] = read_granule(bc, lsf)?;
            }
        }

        if bc.has_error() {
            return Err(Mpeg3Error::InvalidData("侧信息被截断".into()));
        }
        Ok(side)
    }
}

fn read_granule<S: ByteSource>(bc: &mut BitCursor<S>, lsf: bool) -> Mpeg3Result<GranuleInfo> {
    let mut gi = GranuleInfo {
        part2_3_length: bc.getbits(12),
        big_values: bc.getbits(9),
        global_gain: bc.getbits(8),
        scalefac_compress: bc.getbits(if lsf { 9 } else { 4 }),
        window_switching: bc.get1bit(),
        ..Default::default()
    };
    if gi.big_values > 288 {
        return Err(Mpeg3Error::InvalidData(format!(
            "big_values={} 超出 288",
            gi.big_values
        )));
    }

    if gi.window_switching {
        gi.block_type = bc.getbits(2) as u8;
        gi.mixed_block = bc.get1bit();
        if gi.block_type == 0 {
            return Err(Mpeg3Error::InvalidData("窗口切换时 block_type 为 0".into()));
        }
        for sel in gi.table_select.iter_mut().take(2) {
            *sel = bc.getbits(5) as u8;
        }
        for gain in gi.subblock_gain.iter_mut() {
            *gain = bc.getbits(3) as u8;
        }
        // 区域划分隐含: region1 覆盖其余大值, region2 为空
        gi.region0_count = if gi.is_pure_short() { 8 } else { 7 };
        gi.region1_count = 36;
    } else {
        for sel in gi.table_select.iter_mut() {
            *sel = bc.getbits(5) as u8;
        }
        gi.region0_count = bc.getbits(4);
        gi.region1_count = bc.getbits(3);
    }

    // LSF 的 preflag 由比例因子解码推导
    if !lsf {
        gi.preflag = bc.get1bit();
    }
    gi.scalefac_scale = bc.get1bit();
    gi.count1table_select = bc.get1bit();

    for &sel in &gi.table_select {
        if sel == 4 || sel == 14 {
            return Err(Mpeg3Error::InvalidData(format!(
                "无效的 Huffman 表 {}",
                sel
            )));
        }
    }
    Ok(gi)
}
