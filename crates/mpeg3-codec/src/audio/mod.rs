//! MPEG-1/2 Layer II/III 音频解码器.
//!
//! 逐帧处理: 同步搜索 → 帧头 → 侧信息 → 位储备组装主数据 → 每个颗粒/声道的
//! 比例因子与 Huffman 频谱 → 反量化 → 立体声重建 → 重排序 → 抗混叠 →
//! 混合滤波 → 多相合成. 单线程, 每条音轨一个解码器.
//!
//! `main_data_begin` 超出保留的位储备时本帧输出静音, 并重置全部历史.
//! Layer II 帧读出子带样本后走同一组多相合成滤波器; Layer I 帧直接跳过.

mod antialias;
mod header;
mod huffman;
mod hybrid;
mod layer2;
mod reorder;
mod requantize;
mod reservoir;
mod scalefactors;
mod side_info;
mod stereo;
mod synthesis;
#[rustfmt::skip]
mod tables;


use log::{debug, trace, warn};
use mpeg3_core::{BitCursor, ByteSource, Direction, Mpeg3Error, Mpeg3Result, SliceSource};

pub use self::header::{ChannelMode, FrameHeader, Layer, MpegVersion};
pub use self::hybrid::HybridHistory;
pub use self::synthesis::SynthesisHistory;

use self::header::HEADER_BYTES;
use self::huffman::GRANULE_LINES;
use self::hybrid::{SUBBAND_LINES, SUBBANDS};
use self::reservoir::Reservoir;
use self::scalefactors::{BandLayout, ScaleFactors};
use self::side_info::{GranuleInfo, SideInfo};
use crate::config::AudioConfig;
use crate::decoder::Decoder;
use crate::frame::{AudioFrame, Frame};

/// 音频解码统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioStats {
    /// 正常解码的 Layer II/III 帧数
    pub frames_decoded: u64,
    /// 出错后以静音代替的帧数
    pub frames_silenced: u64,
    /// 跳过的 Layer I 帧数
    pub frames_skipped: u64,
    /// 实际渲染的每声道采样数 (静音帧不计)
    pub samples_rendered: u64,
    /// 同步搜索跳过的字节数
    pub sync_bytes_skipped: u64,
}

/// 每声道跨帧保留的滤波器状态
#[derive(Debug, Clone, Default)]
struct ChannelState {
    hybrid: HybridHistory,
    synthesis: SynthesisHistory,
}

impl ChannelState {
    fn reset(&mut self) {
        self.hybrid.reset();
        self.synthesis.reset();
    }
}

/// Layer II/III 音频基本流解码器
pub struct AudioDecoder<S> {
    bc: BitCursor<S>,
    config: AudioConfig,
    reservoir: Reservoir,
    channels: [ChannelState; 2],
    last_header: Option<FrameHeader>,
    stats: AudioStats,
    eos: bool,
}

impl<S: ByteSource> AudioDecoder<S> {
    pub fn new(source: S, config: AudioConfig) -> Self {
        Self {
            bc: BitCursor::new(source),
            config,
            reservoir: Reservoir::new(),
            channels: Default::default(),
            last_header: None,
            stats: AudioStats::default(),
            eos: false,
        }
    }

    pub fn stats(&self) -> AudioStats {
        self.stats
    }

    /// 最近一个已解码帧的帧头
    pub fn header(&self) -> Option<&FrameHeader> {
        self.last_header.as_ref()
    }

    pub fn byte_position(&self) -> u64 {
        self.bc.byte_position()
    }

    /// 解码下一帧 PCM, 流结束返回 `Ok(None)`
    pub fn decode_audio_frame(&mut self) -> Mpeg3Result<Option<AudioFrame>> {
        while !self.eos {
            let Some(header) = self.find_sync() else {
                self.eos = true;
                break;
            };
            let Some(payload) = self.read_payload(header.frame_size) else {
                debug!("音频帧被截断, 流结束");
                self.eos = true;
                break;
            };

            if header.layer == Layer::I {
                warn!("跳过 {:?} 帧 ({} 字节)", header.layer, header.frame_size);
                self.stats.frames_skipped += 1;
                continue;
            }
            if self
                .last_header
                .map_or(true, |h| h.sample_rate != header.sample_rate || h.mode != header.mode)
            {
                debug!(
                    "音频格式: {:?}, {} Hz, {:?}, {} kbit/s",
                    header.version,
                    header.sample_rate,
                    header.mode,
                    header.bitrate / 1000
                );
            }
            self.last_header = Some(header);
            let frame = match header.layer {
                Layer::II => self.decode_layer2(&header, &payload),
                _ => self.decode_layer3(&header, &payload)?,
            };
            return Ok(Some(frame));
        }
        Ok(None)
    }

    /// 按字节搜索下一个有效帧头, 游标停在帧头处
    fn find_sync(&mut self) -> Option<FrameHeader> {
        let mut skipped = 0u64;
        loop {
            if !self.bc.can_read(32) {
                return None;
            }
            let word = self.bc.showbits(32);
            if word & 0xFFE0_0000 == 0xFFE0_0000 {
                match FrameHeader::parse(word) {
                    Ok(header) => {
                        if skipped > 0 {
                            debug!("同步搜索跳过 {} 字节", skipped);
                        }
                        return Some(header);
                    }
                    Err(Mpeg3Error::Unsupported(reason)) => {
                        debug!("跳过不支持的帧头 {:#010x}: {}", word, reason);
                    }
                    Err(_) => {}
                }
            }
            self.bc.getbits(8);
            skipped += 1;
            self.stats.sync_bytes_skipped += 1;
        }
    }

    /// 读取帧头之后的整帧数据, 数据不足时返回 `None`
    fn read_payload(&mut self, frame_size: usize) -> Option<Vec<u8>> {
        self.bc.getbits(32);
        let len = frame_size.saturating_sub(HEADER_BYTES);
        let payload: Vec<u8> = (0..len).map(|_| self.bc.getbits(8) as u8).collect();
        (!self.bc.has_error()).then_some(payload)
    }

    /// Layer II 不用位储备, 坏帧只影响自身
    fn decode_layer2(&mut self, header: &FrameHeader, payload: &[u8]) -> AudioFrame {
        let mut bc = BitCursor::new(SliceSource::new(payload));
        if header.has_crc {
            bc.getbits(16);
        }
        match layer2::read_frame(&mut bc, header) {
            Ok(subbands) => {
                let mut pcm = vec![Vec::with_capacity(header.samples_per_frame()); subbands.len()];
                let mut out = [0f32; SUBBANDS];
                for ((slots, state), samples) in
                    subbands.iter().zip(&mut self.channels).zip(&mut pcm)
                {
                    for slot in slots {
                        state.synthesis.synthesize(slot, &mut out);
                        samples.extend_from_slice(&out);
                    }
                }
                self.stats.frames_decoded += 1;
                self.stats.samples_rendered += header.samples_per_frame() as u64;
                trace!("Layer II 帧: {} 采样/声道", header.samples_per_frame());
                self.make_frame(header, pcm)
            }
            Err(e) => {
                warn!("Layer II 帧解码失败: {}, 输出静音", e);
                self.silent_frame(header)
            }
        }
    }

    fn decode_layer3(&mut self, header: &FrameHeader, payload: &[u8]) -> Mpeg3Result<AudioFrame> {
        match self.decode_layer3_pcm(header, payload) {
            Ok(samples) => {
                self.stats.frames_decoded += 1;
                self.stats.samples_rendered += header.samples_per_frame() as u64;
                trace!("Layer III 帧: {} 采样/声道", header.samples_per_frame());
                Ok(self.make_frame(header, samples))
            }
            Err(e @ Mpeg3Error::InsufficientHistory { .. }) => {
                warn!("{}, 输出静音并重置历史", e);
                for ch in &mut self.channels {
                    ch.reset();
                }
                Ok(self.silent_frame(header))
            }
            Err(e) if e.is_recoverable() => {
                warn!("Layer III 帧解码失败: {}, 输出静音", e);
                Ok(self.silent_frame(header))
            }
            Err(e) => Err(e),
        }
    }

    fn decode_layer3_pcm(
        &mut self,
        header: &FrameHeader,
        payload: &[u8],
    ) -> Mpeg3Result<Vec<Vec<f32>>> {
        let mut bc = BitCursor::new(SliceSource::new(payload));
        if header.has_crc {
            bc.getbits(16);
        }
        let side = SideInfo::parse(&mut bc, header)?;
        let main_start = (bc.bit_position() / 8) as usize;
        let main_data = payload.get(main_start..).unwrap_or_default();
        self.reservoir.push_frame(main_data, side.main_data_begin)?;
        decode_main_data(&self.reservoir, &mut self.channels, header, &side)
    }

    fn silent_frame(&mut self, header: &FrameHeader) -> AudioFrame {
        self.stats.frames_silenced += 1;
        let samples = vec![vec![0.0; header.samples_per_frame()]; header.channels()];
        self.make_frame(header, samples)
    }

    fn make_frame(&self, header: &FrameHeader, mut samples: Vec<Vec<f32>>) -> AudioFrame {
        if self.config.downmix_mono && samples.len() == 2 {
            let right = samples.pop().unwrap_or_default();
            for (l, r) in samples[0].iter_mut().zip(&right) {
                *l = (*l + r) * 0.5;
            }
        }
        AudioFrame {
            sample_rate: header.sample_rate,
            channels: samples.len() as u32,
            samples,
        }
    }

    fn reset_history(&mut self) {
        self.reservoir.clear();
        for ch in &mut self.channels {
            ch.reset();
        }
    }
}

/// 把游标移到指定的绝对位位置 (向后用反向读取回退)
fn seek_bit<S: ByteSource>(bc: &mut BitCursor<S>, target: u64) {
    let pos = bc.bit_position();
    if pos < target {
        bc.skip_bits(target - pos);
    } else if pos > target {
        bc.set_direction(Direction::Reverse);
        let mut remaining = pos - target;
        while remaining > 0 {
            let step = remaining.min(32);
            bc.getbits_reverse(step as u32);
            remaining -= step;
        }
        bc.set_direction(Direction::Forward);
    }
}

/// 解码一个颗粒单声道的比例因子与量化频谱
///
/// 返回后游标恰好位于颗粒起点 + `part2_3_length`, 多读或少读都会被纠正.
fn decode_channel<S: ByteSource>(
    bc: &mut BitCursor<S>,
    header: &FrameHeader,
    side: &SideInfo,
    granule: usize,
    channel: usize,
    previous: &ScaleFactors,
    is: &mut [i32; GRANULE_LINES],
) -> Mpeg3Result<(ScaleFactors, usize)> {
    let gi = &side.granules[granule][channel];
    let start = bc.bit_position();
    let end = start + u64::from(gi.part2_3_length);

    let sf = scalefactors::read(bc, header, gi, channel, &side.scfsi[channel], granule, previous);
    let layout = BandLayout::new(gi, header);
    let nonzero = if bc.bit_position() > end {
        trace!("比例因子超出 part2_3_length, 频谱置零");
        is.fill(0);
        0
    } else {
        huffman::read_spectrum(bc, gi, &layout, end, is)?
    };
    seek_bit(bc, end);
    Ok((sf, nonzero))
}

/// 解码一个颗粒全部声道的频谱: 比例因子, Huffman, 反量化, 联合立体声
///
/// `scalefactors` 保存上一颗粒的比例因子 (scfsi 复用), 返回时更新为本颗粒的值.
fn decode_granule_spectra<S: ByteSource>(
    bc: &mut BitCursor<S>,
    header: &FrameHeader,
    side: &SideInfo,
    gr: usize,
    scalefactors: &mut [ScaleFactors; 2],
    xr: &mut [[f32; GRANULE_LINES]; 2],
) -> Mpeg3Result<()> {
    let nch = header.channels();
    let mut is = [0i32; GRANULE_LINES];
    for ch in 0..nch {
        let (sf, nonzero) = decode_channel(bc, header, side, gr, ch, &scalefactors[ch], &mut is)?;
        scalefactors[ch] = sf;
        let gi = &side.granules[gr][ch];
        let layout = BandLayout::new(gi, header);
        requantize::requantize(gi, &sf, &layout, &is, nonzero, &mut xr[ch]);
    }

    if nch == 2 {
        let gi = &side.granules[gr][1];
        let layout = BandLayout::new(gi, header);
        let [left, right] = xr;
        stereo::process(header, &layout, &scalefactors[1], left, right);
    }
    Ok(())
}

/// 一个颗粒单声道的频域到时域: 重排序, 抗混叠, 混合滤波, 多相合成
fn synthesize_granule(
    gi: &GranuleInfo,
    header: &FrameHeader,
    xr: &mut [f32; GRANULE_LINES],
    state: &mut ChannelState,
    pcm: &mut Vec<f32>,
) {
    let layout = BandLayout::new(gi, header);
    reorder::reorder(gi, &layout, xr);
    antialias::antialias(gi, xr);
    let mut time = [[0f32; SUBBANDS]; SUBBAND_LINES];
    let mut out = [0f32; SUBBANDS];
    state.hybrid.process(gi, xr, &mut time);
    for samples in &time {
        state.synthesis.synthesize(samples, &mut out);
        pcm.extend_from_slice(&out);
    }
}

/// 从位储备中解码一帧的全部颗粒, 返回每声道 PCM
fn decode_main_data(
    reservoir: &Reservoir,
    channels: &mut [ChannelState; 2],
    header: &FrameHeader,
    side: &SideInfo,
) -> Mpeg3Result<Vec<Vec<f32>>> {
    let nch = header.channels();
    let mut bc = reservoir.cursor()?;
    let mut pcm = vec![Vec::with_capacity(header.samples_per_frame()); nch];

    let mut scalefactors = [ScaleFactors::default(); 2];
    let mut xr = [[0f32; GRANULE_LINES]; 2];

    for gr in 0..header.granules() {
        decode_granule_spectra(&mut bc, header, side, gr, &mut scalefactors, &mut xr)?;
        for ch in 0..nch {
            let gi = &side.granules[gr][ch];
            synthesize_granule(gi, header, &mut xr[ch], &mut channels[ch], &mut pcm[ch]);
        }
    }

    // 颗粒内的越界窥视与回退都已纠正, 只看最终位置
    let available = bc.source().len().map_or(u64::MAX, |len| len * 8);
    if bc.bit_position() > available {
        return Err(Mpeg3Error::InvalidData("主数据超出帧数据范围".into()));
    }
    Ok(pcm)
}

impl<S: ByteSource + Send> Decoder for AudioDecoder<S> {
    fn name(&self) -> &str {
        "mp3"
    }

    fn decode_frame(&mut self) -> Mpeg3Result<Option<Frame>> {
        Ok(self.decode_audio_frame()?.map(Frame::Audio))
    }

    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()> {
        self.bc.seek_byte(pos)?;
        self.reset_history();
        self.eos = false;
        debug!("音频定位到字节 {}", pos);
        Ok(())
    }

    fn flush(&mut self) {
        self.reset_history();
    }
}
