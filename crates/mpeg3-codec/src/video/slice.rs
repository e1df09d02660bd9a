//! 切片缓冲与单切片解码.
//!
//! 每个切片在收集阶段拷贝为独立的 [`SliceBuffer`], 由条带分配到的那个工作线程解码.
//! 切片内的结构性错误只中止本切片剩余宏块.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::{Bytes, BytesMut};
use log::{trace, warn};
use mpeg3_core::{BitCursor, ByteSource, MemorySource, Mpeg3Error, Mpeg3Result};

use super::frame::{FrameBuffer, FrameRoles};
use super::headers::PictureParams;
use super::macroblock::{Macroblock, MacroblockType, MotionState};
use super::tables::{MBA_ESCAPE, MBA_STUFFING};
use super::vlc::decode_mb_addr_inc;
use crate::frame::PictureType;

/// 单个切片的压缩数据
#[derive(Debug)]
pub struct SliceBuffer {
    /// 起始码低字节 (slice_vertical_position)
    pub vertical_position: u8,
    /// 起始码之后到下一个起始码之前的数据
    pub data: Bytes,
}

impl SliceBuffer {
    pub fn new(vertical_position: u8, data: Bytes) -> Self {
        Self {
            vertical_position,
            data,
        }
    }
}

/// 从起始码之后读取切片负载, 直到下一个起始码 (不消费) 或流末尾
pub(super) fn read_slice_payload<S: ByteSource>(bc: &mut BitCursor<S>) -> Bytes {
    let mut buf = BytesMut::with_capacity(4096);
    loop {
        if bc.showbits(24) == 0x000001 {
            break;
        }
        if bc.is_eof() {
            break;
        }
        buf.extend_from_slice(&[bc.getbits(8) as u8]);
    }
    buf.freeze()
}

/// 一幅图像的解码任务, 由所有工作线程共享
pub struct PictureJob {
    pub params: Arc<PictureParams>,
    pub slices: Vec<SliceBuffer>,
    pub frames: Arc<[FrameBuffer; 3]>,
    pub roles: FrameRoles,
    /// 出错的切片数
    pub faults: AtomicUsize,
}

impl PictureJob {
    pub fn new(
        params: Arc<PictureParams>,
        slices: Vec<SliceBuffer>,
        frames: Arc<[FrameBuffer; 3]>,
        roles: FrameRoles,
    ) -> Self {
        Self {
            params,
            slices,
            frames,
            roles,
            faults: AtomicUsize::new(0),
        }
    }

    pub fn target(&self) -> &FrameBuffer {
        &self.frames[self.roles.target]
    }

    /// 解码并记录第 `index` 个切片, 错误只计数不外传
    pub fn run_slice(&self, index: usize) {
        if let Err(e) = decode_slice(self, index) {
            self.faults.fetch_add(1, Ordering::Relaxed);
            warn!("{}", e);
        }
    }
}

/// 切片解码状态: 量化步长、DC 预测器、运动矢量预测器
pub(super) struct SliceDecoder<'a> {
    pub job: &'a PictureJob,
    pub params: &'a PictureParams,
    pub quantiser_scale: i32,
    pub dc_pred: [i32; 3],
    /// [r][方向][水平/垂直]
    pub pmv: [[[i32; 2]; 2]; 2],
    /// 上一个宏块的运动信息 (B 图像跳过宏块沿用)
    pub prev_motion: MotionState,
    pub mb: Macroblock,
}

impl<'a> SliceDecoder<'a> {
    pub fn new(job: &'a PictureJob) -> Self {
        let params = &*job.params;
        let mut dec = Self {
            job,
            params,
            quantiser_scale: 2,
            dc_pred: [0; 3],
            pmv: [[[0; 2]; 2]; 2],
            prev_motion: MotionState::default(),
            mb: Macroblock::default(),
        };
        dec.reset_dc_predictors();
        dec
    }

    /// DC 预测器复位为 1 << (7 + intra_dc_precision)
    pub fn reset_dc_predictors(&mut self) {
        let v = 1 << (7 + u32::from(self.params.intra_dc_precision));
        self.dc_pred = [v; 3];
    }

    pub fn reset_pmv(&mut self) {
        self.pmv = [[[0; 2]; 2]; 2];
    }

    /// 跳过的宏块: P 零矢量前向预测, B 沿用上一宏块的预测, I 填充中性值
    fn reconstruct_skipped(&mut self, address: usize) -> Mpeg3Result<()> {
        let p = self.params;
        let mb_x = address % p.mb_width;
        let mb_y = address / p.mb_width;
        self.reset_dc_predictors();
        match p.picture_type {
            PictureType::P => {
                self.reset_pmv();
                let motion = MotionState::zero_forward(p.structure);
                self.prev_motion = motion;
                self.predict_macroblock(mb_x, mb_y, &motion);
            }
            PictureType::B => {
                let motion = self.prev_motion;
                if motion.directions.is_empty() {
                    return Err(Mpeg3Error::InvalidData(
                        "B 图像中帧内宏块之后出现跳过宏块".into(),
                    ));
                }
                self.predict_macroblock(mb_x, mb_y, &motion);
            }
            PictureType::I | PictureType::D => {
                self.fill_macroblock(mb_x, mb_y, 128);
            }
        }
        trace!("跳过宏块 {}", address);
        Ok(())
    }

    fn run(&mut self, bc: &mut BitCursor<MemorySource>, index: usize) -> Mpeg3Result<usize> {
        let p = self.params;
        let job = self.job;
        let slice = &job.slices[index];
        let total_bits = slice.data.len() as u64 * 8;

        let mut mb_row = usize::from(slice.vertical_position) - 1;
        if p.mpeg2 && p.coded_height > 2800 {
            mb_row += (bc.getbits(3) as usize) << 7;
        }
        if mb_row >= p.mb_height {
            return Err(Mpeg3Error::InvalidData(format!(
                "切片行 {} 超出图像 ({} 行)",
                mb_row, p.mb_height
            )));
        }
        let code = bc.getbits(5) as u8;
        self.quantiser_scale = p.quantiser_scale(code);
        // intra_slice 等附加信息
        while bc.get1bit() {
            bc.getbits(8);
        }

        let mb_count = p.mb_count();
        let mut address = mb_row * p.mb_width;
        let mut first = true;
        let mut decoded = 0;
        loop {
            let mut increment = 0usize;
            loop {
                match decode_mb_addr_inc(bc)? {
                    MBA_STUFFING => continue,
                    MBA_ESCAPE => increment += 33,
                    n => {
                        increment += usize::from(n);
                        break;
                    }
                }
            }
            if first {
                address += increment - 1;
                first = false;
            } else {
                for _ in 1..increment {
                    address += 1;
                    if address >= mb_count {
                        return Err(Mpeg3Error::InvalidData(format!(
                            "宏块地址 {} 越界 (共 {})",
                            address, mb_count
                        )));
                    }
                    self.reconstruct_skipped(address)?;
                }
                address += 1;
            }
            if address >= mb_count {
                return Err(Mpeg3Error::InvalidData(format!(
                    "宏块地址 {} 越界 (共 {})",
                    address, mb_count
                )));
            }

            self.decode_macroblock(bc)?;
            if bc.bit_position() > total_bits {
                return Err(Mpeg3Error::InvalidData("切片数据被截断".into()));
            }
            self.reconstruct_macroblock(address);
            decoded += 1;

            if bc.showbits(23) == 0 || bc.bit_position() >= total_bits {
                break;
            }
        }
        Ok(decoded)
    }
}

/// 解码 `job` 中的第 `index` 个切片
pub(super) fn decode_slice(job: &PictureJob, index: usize) -> Mpeg3Result<()> {
    let slice = &job.slices[index];
    let mut bc = BitCursor::new(MemorySource::new(slice.data.clone()));
    let mut dec = SliceDecoder::new(job);
    match dec.run(&mut bc, index) {
        Ok(count) => {
            trace!("切片 {} 解码 {} 个宏块", index, count);
            Ok(())
        }
        Err(Mpeg3Error::InvalidData(reason)) => Err(Mpeg3Error::SliceFault {
            slice: index,
            reason,
        }),
        Err(e) => Err(e),
    }
}

/// 宏块类型是否包含运动补偿
pub(super) fn has_motion(mb_type: MacroblockType) -> bool {
    mb_type.intersects(MacroblockType::MOTION_FORWARD | MacroblockType::MOTION_BACKWARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpeg3_core::BitWriter;

    #[test]
    fn test_read_payload_stops_at_start_code() {
        let mut bw = BitWriter::new();
        bw.put_bytes(&[0x12, 0x34, 0x00, 0x56]);
        bw.put_start_code(0x02);
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        let payload = read_slice_payload(&mut bc);
        assert_eq!(&payload[..], &[0x12, 0x34, 0x00, 0x56]);
        assert_eq!(bc.showbits(32), 0x0000_0102);
    }

    #[test]
    fn test_read_payload_until_eof() {
        let mut bc = BitCursor::new(MemorySource::new(vec![0xAB, 0xCD]));
        let payload = read_slice_payload(&mut bc);
        assert_eq!(&payload[..], &[0xAB, 0xCD]);
    }
}
