//! MPEG-1/2 视频解码器.
//!
//! 顺序解析序列/GOP/图像头, 将一幅图像的所有切片收集为 [`SliceBuffer`] 后交给
//! [`SliceWorkerPool`] 并行解码. 参考图像 (I/P) 延迟到下一幅参考图像解码完成后输出,
//! B 图像解码后立即输出, 从而得到显示顺序.

mod frame;
mod headers;
mod idct;
mod macroblock;
mod motion;
mod pool;
mod recon;
mod slice;
#[rustfmt::skip]
mod tables;
mod vlc;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, warn};
use mpeg3_core::{BitCursor, ByteSource, ChromaFormat, Mpeg3Result, Rational};

pub use self::headers::{
    GopHeader, PictureCodingExtension, PictureHeader, PictureMux, PictureParams,
    PictureStructure, QuantMatrices, ScalableLayer, SequenceExtension, SequenceHeader,
    SequenceScalableExtension,
};
pub use self::idct::idct_8x8;
pub use self::pool::{MAX_WORKERS, SliceWorkerPool, effective_workers};
pub use self::slice::SliceBuffer;

use self::frame::{FrameArena, FrameRoles};
use self::headers::{
    EXTENSION_START_CODE, Extension, GROUP_START_CODE, PICTURE_START_CODE, SEQUENCE_END_CODE,
    SEQUENCE_HEADER_CODE, SequenceState, USER_DATA_START_CODE, is_slice_code,
};
use self::slice::{PictureJob, read_slice_payload};
use crate::cache::{CachedFrame, FrameCache, PlaneSizes};
use crate::config::VideoConfig;
use crate::decoder::Decoder;
use crate::frame::{Frame, PictureType, VideoFrame};

/// 视频解码统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoStats {
    /// 已解码的图像数 (场图像按场计)
    pub pictures_decoded: u64,
    /// 因缺少参考或定位后等待 I 图像而跳过的图像数
    pub pictures_skipped: u64,
    /// 出错中止的切片数
    pub slice_faults: u64,
    /// 已输出的帧数
    pub frames_output: u64,
}

/// 等待输出的参考图像
#[derive(Debug, Clone, Copy)]
struct HeldPicture {
    slot: usize,
    picture_type: PictureType,
}

/// 已解码第一场、等待第二场的帧
#[derive(Debug, Clone, Copy)]
struct PendingField {
    roles: FrameRoles,
    picture_type: PictureType,
    parity: usize,
}

/// MPEG-1/2 视频基本流解码器
pub struct VideoDecoder<S> {
    bc: BitCursor<S>,
    config: VideoConfig,
    pool: Option<SliceWorkerPool>,
    sequence: Option<SequenceState>,
    arena: Option<FrameArena>,
    held: Option<HeldPicture>,
    pending_field: Option<PendingField>,
    frame_number: u64,
    cache: Option<FrameCache>,
    output: VecDeque<VideoFrame>,
    stats: VideoStats,
    /// 定位后丢弃非 I 图像直到下一幅 I 图像
    need_intra: bool,
    eos: bool,
}

impl<S: ByteSource> VideoDecoder<S> {
    /// 创建解码器, 工作线程在解码第一幅图像时启动
    pub fn new(source: S, config: VideoConfig) -> Self {
        let cache = config
            .frame_cache_enabled
            .then(|| FrameCache::new(config.frame_cache_bytes));
        Self {
            bc: BitCursor::new(source),
            config,
            pool: None,
            sequence: None,
            arena: None,
            held: None,
            pending_field: None,
            frame_number: 0,
            cache,
            output: VecDeque::new(),
            stats: VideoStats::default(),
            need_intra: false,
            eos: false,
        }
    }

    pub fn stats(&self) -> VideoStats {
        self.stats
    }

    /// 当前序列头 (尚未遇到序列头时为 `None`)
    pub fn sequence_header(&self) -> Option<&SequenceHeader> {
        self.sequence.as_ref().map(|s| &s.header)
    }

    /// 当前序列扩展 (MPEG-1 码流为 `None`)
    pub fn sequence_extension(&self) -> Option<&SequenceExtension> {
        self.sequence.as_ref().and_then(|s| s.extension.as_ref())
    }

    /// 当前序列可分级扩展 (非增强层码流为 `None`)
    pub fn sequence_scalable_extension(&self) -> Option<&SequenceScalableExtension> {
        self.sequence.as_ref().and_then(|s| s.scalable.as_ref())
    }

    pub fn frame_rate(&self) -> Rational {
        self.sequence
            .as_ref()
            .map_or(Rational::UNDEFINED, SequenceState::frame_rate)
    }

    pub fn chroma_format(&self) -> ChromaFormat {
        self.sequence
            .as_ref()
            .map_or(ChromaFormat::Yuv420, SequenceState::chroma_format)
    }

    /// 实际工作线程数 (线程池尚未启动时为 0)
    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(0, SliceWorkerPool::workers)
    }

    /// 下一个输出帧的序号
    pub fn next_frame_number(&self) -> u64 {
        self.frame_number
    }

    /// 设置下一个输出帧的序号 (调用方重新定位字节源后使用)
    pub fn set_next_frame_number(&mut self, frame_number: u64) {
        self.frame_number = frame_number;
    }

    /// 在帧缓存中查找已输出的帧
    ///
    /// 命中时返回缓存的平面; 未命中返回 `None`, 调用方需要重新定位字节源并解码.
    pub fn seek_frame(&mut self, frame_number: u64) -> Option<CachedFrame> {
        let hit = self.cache.as_mut()?.get(frame_number);
        debug!(
            "帧缓存查找第 {} 帧: {}",
            frame_number,
            if hit.is_some() { "命中" } else { "未命中" }
        );
        hit
    }

    /// 底层位游标的字节位置
    pub fn byte_position(&self) -> u64 {
        self.bc.byte_position()
    }

    /// 解码下一帧 (显示顺序)
    pub fn decode_video_frame(&mut self) -> Mpeg3Result<Option<VideoFrame>> {
        loop {
            if let Some(frame) = self.output.pop_front() {
                return Ok(Some(frame));
            }
            if self.eos {
                return Ok(None);
            }
            let Some(code) = self.bc.next_start_code() else {
                self.eos = true;
                self.emit_held();
                continue;
            };
            self.bc.getbits(32);
            if let Err(e) = self.handle_start_code(code as u8) {
                if !e.is_recoverable() {
                    return Err(e);
                }
                warn!("跳过损坏的头部: {}", e);
            }
        }
    }

    fn handle_start_code(&mut self, code: u8) -> Mpeg3Result<()> {
        match code {
            SEQUENCE_HEADER_CODE => {
                let header = SequenceHeader::parse(&mut self.bc)?;
                self.sequence = Some(SequenceState::new(header));
            }
            EXTENSION_START_CODE => {
                let ext = Extension::parse(&mut self.bc)?;
                if let Some(seq) = self.sequence.as_mut() {
                    apply_sequence_level_extension(seq, ext);
                }
            }
            GROUP_START_CODE => {
                GopHeader::parse(&mut self.bc);
            }
            PICTURE_START_CODE => self.decode_picture()?,
            SEQUENCE_END_CODE => {
                debug!("序列结束");
                self.emit_held();
            }
            USER_DATA_START_CODE => {}
            _ => {}
        }
        Ok(())
    }

    /// 解析图像头与图像级扩展, 收集切片并解码
    fn decode_picture(&mut self) -> Mpeg3Result<()> {
        let header = PictureHeader::parse(&mut self.bc)?;
        let Some(seq) = self.sequence.as_mut() else {
            warn!("序列头之前的图像, 跳过");
            self.stats.pictures_skipped += 1;
            return Ok(());
        };

        let mut coding = None;
        loop {
            let Some(code) = self.bc.next_start_code() else {
                return Ok(());
            };
            match code as u8 {
                EXTENSION_START_CODE => {
                    self.bc.getbits(32);
                    match Extension::parse(&mut self.bc)? {
                        Extension::PictureCoding(ext) => coding = Some(ext),
                        other => apply_sequence_level_extension(seq, other),
                    }
                }
                USER_DATA_START_CODE => {
                    self.bc.getbits(32);
                }
                c if is_slice_code(c) => break,
                _ => {
                    warn!("图像没有切片数据");
                    return Ok(());
                }
            }
        }

        let mut slices = Vec::new();
        while let Some(code) = self.bc.next_start_code() {
            let low = code as u8;
            if !is_slice_code(low) {
                break;
            }
            self.bc.getbits(32);
            let data = read_slice_payload(&mut self.bc);
            slices.push(SliceBuffer::new(low, data));
        }

        if seq.scalable.is_some_and(|e| !e.decodable_alone()) {
            debug!("增强层图像需要下层数据, 跳过");
            self.stats.pictures_skipped += 1;
            return Ok(());
        }

        let structure = match (&coding, seq.is_mpeg2()) {
            (Some(ext), true) => ext.picture_structure,
            _ => PictureStructure::Frame,
        };
        let second_field = structure.is_field()
            && self
                .pending_field
                .is_some_and(|f| f.parity != structure.parity());
        if structure.is_field() && !second_field && self.pending_field.is_some() {
            warn!("场对不完整, 丢弃未配对的第一场");
            self.pending_field = None;
        }
        if !structure.is_field() {
            self.pending_field = None;
        }
        let params = PictureParams::new(seq, &header, coding.as_ref(), second_field);

        let width = params.mb_width * 16;
        let height = seq.mb_height() * 16;
        let chroma = params.chroma_format;
        if !self
            .arena
            .as_ref()
            .is_some_and(|a| a.matches(width, height, chroma))
        {
            self.emit_held();
            debug!("分配帧缓冲: {}x{} {}", width, height, chroma);
            self.arena = Some(FrameArena::new(width, height, chroma));
            self.pending_field = None;
        }

        let ptype = params.picture_type;
        if self.need_intra && ptype != PictureType::I && !second_field {
            self.stats.pictures_skipped += 1;
            return Ok(());
        }
        let Some(roles) = self.roles_for(ptype, second_field) else {
            debug!("缺少参考帧, 跳过 {} 图像", ptype);
            self.stats.pictures_skipped += 1;
            return Ok(());
        };
        self.need_intra = false;

        debug!(
            "图像: type={}, temporal_ref={}, structure={:?}, 切片数={}",
            ptype,
            header.temporal_reference,
            structure,
            slices.len()
        );
        let Some(arena) = self.arena.as_ref() else {
            return Ok(());
        };
        let job = Arc::new(PictureJob::new(
            Arc::new(params),
            slices,
            Arc::clone(arena.frames()),
            roles,
        ));
        self.run_job(&job)?;
        let faults = job.faults.load(std::sync::atomic::Ordering::Relaxed);
        if faults > 0 {
            warn!("{} 图像中 {} 个切片解码失败", ptype, faults);
        }
        self.stats.pictures_decoded += 1;
        self.stats.slice_faults += faults as u64;

        if structure.is_field() && !second_field {
            self.pending_field = Some(PendingField {
                roles,
                picture_type: ptype,
                parity: structure.parity(),
            });
            return Ok(());
        }
        // 场对的类型以第一场为准 (I/P 场对为参考帧)
        let frame_type = self
            .pending_field
            .take()
            .map_or(ptype, |f| f.picture_type);
        self.complete_picture(roles.target, frame_type);
        Ok(())
    }

    /// 分配帧角色; 缺少所需参考时返回 `None`
    fn roles_for(&self, ptype: PictureType, second_field: bool) -> Option<FrameRoles> {
        if second_field {
            return self.pending_field.map(|f| f.roles);
        }
        let arena = self.arena.as_ref()?;
        match ptype {
            PictureType::I => Some(arena.roles_for_reference()),
            PictureType::P => {
                let roles = arena.roles_for_reference();
                roles.forward.map(|_| roles)
            }
            PictureType::B => {
                let roles = arena.roles_for_b();
                (roles.forward.is_some() && roles.backward.is_some()).then_some(roles)
            }
            PictureType::D => Some(arena.roles_for_b()),
        }
    }

    fn run_job(&mut self, job: &Arc<PictureJob>) -> Mpeg3Result<()> {
        if self.pool.is_none() {
            self.pool = Some(SliceWorkerPool::new(effective_workers(self.config.cpus))?);
        }
        if let Some(pool) = &self.pool {
            pool.decode_picture(job);
        }
        Ok(())
    }

    /// 一帧 (帧图像或完整场对) 重建完毕
    fn complete_picture(&mut self, slot: usize, picture_type: PictureType) {
        if picture_type.is_reference() {
            self.emit_held();
            if let Some(arena) = self.arena.as_mut() {
                arena.commit_reference(slot);
            }
            self.held = Some(HeldPicture { slot, picture_type });
        } else {
            self.emit(slot, picture_type);
        }
    }

    fn emit_held(&mut self) {
        if let Some(held) = self.held.take() {
            self.emit(held.slot, held.picture_type);
        }
    }

    /// 复制帧槽内容为输出帧
    fn emit(&mut self, slot: usize, picture_type: PictureType) {
        let (Some(arena), Some(seq)) = (self.arena.as_ref(), self.sequence.as_ref()) else {
            return;
        };
        let buffer = arena.slot(slot);
        let frame = VideoFrame {
            frame_number: self.frame_number,
            picture_type,
            width: buffer.y().width() as u32,
            height: buffer.y().height() as u32,
            display_width: seq.header.horizontal_size,
            display_height: seq.header.vertical_size,
            chroma_format: arena.chroma(),
            frame_rate: seq.frame_rate(),
            y: buffer.y().snapshot(),
            cb: buffer.cb().snapshot(),
            cr: buffer.cr().snapshot(),
        };
        if let Some(cache) = self.cache.as_mut() {
            let (chroma_width, chroma_height) = frame.chroma_size();
            cache.put(
                frame.frame_number,
                Arc::clone(&frame.y),
                Arc::clone(&frame.cb),
                Arc::clone(&frame.cr),
                PlaneSizes {
                    width: frame.width,
                    height: frame.height,
                    chroma_width,
                    chroma_height,
                },
            );
        }
        self.frame_number += 1;
        self.stats.frames_output += 1;
        self.output.push_back(frame);
    }
}

/// 序列级扩展: 序列扩展与量化矩阵扩展
fn apply_sequence_level_extension(seq: &mut SequenceState, ext: Extension) {
    match ext {
        Extension::Sequence(e) => seq.extension = Some(e),
        Extension::QuantMatrix {
            intra,
            non_intra,
            chroma_intra,
            chroma_non_intra,
        } => seq.apply_quant_matrix_extension(intra, non_intra, chroma_intra, chroma_non_intra),
        Extension::SequenceScalable(e) => {
            if !e.decodable_alone() {
                warn!(
                    "{:?} 增强层 (layer_id={}) 无法单独解码, 其图像将被跳过",
                    e.layer, e.layer_id
                );
            }
            seq.scalable = Some(e);
        }
        Extension::PictureCoding(_) => {
            warn!("图像头之外的图像编码扩展, 忽略");
        }
        Extension::Ignored(_) => {}
    }
}

impl<S: ByteSource + Send> Decoder for VideoDecoder<S> {
    fn name(&self) -> &str {
        "mpeg12video"
    }

    fn decode_frame(&mut self) -> Mpeg3Result<Option<Frame>> {
        Ok(self.decode_video_frame()?.map(Frame::Video))
    }

    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()> {
        self.bc.seek_byte(pos)?;
        if let Some(arena) = self.arena.as_mut() {
            arena.drop_references();
        }
        self.held = None;
        self.pending_field = None;
        self.output.clear();
        self.need_intra = true;
        self.eos = false;
        debug!("视频定位到字节 {}", pos);
        Ok(())
    }

    fn flush(&mut self) {
        self.emit_held();
        if let Some(arena) = self.arena.as_mut() {
            arena.drop_references();
        }
        self.pending_field = None;
    }
}
