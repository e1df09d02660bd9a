//! 视频解码器端到端测试 (合成 MPEG-1/2 码流).

use mpeg3_core::{BitWriter, MemorySource};

use super::*;

const QUANT: u32 = 8;

fn sequence_header(bw: &mut BitWriter, width: u32, height: u32) {
    bw.put_start_code(SEQUENCE_HEADER_CODE);
    bw.put_bits(width, 12);
    bw.put_bits(height, 12);
    bw.put_bits(1, 4); // aspect
    bw.put_bits(3, 4); // 25 fps
    bw.put_bits(1000, 18);
    bw.put_bit(true);
    bw.put_bits(20, 10);
    bw.put_bit(false);
    bw.put_bit(false); // load_intra_quantiser_matrix
    bw.put_bit(false); // load_non_intra_quantiser_matrix
}

fn gop_header(bw: &mut BitWriter) {
    bw.put_start_code(GROUP_START_CODE);
    bw.put_bits(0, 25);
    bw.put_bit(true);
    bw.put_bit(false);
}

fn picture_header(bw: &mut BitWriter, temporal_reference: u32, picture_type: PictureType) {
    let code = match picture_type {
        PictureType::I => 1,
        PictureType::P => 2,
        PictureType::B => 3,
        PictureType::D => 4,
    };
    bw.put_start_code(PICTURE_START_CODE);
    bw.put_bits(temporal_reference, 10);
    bw.put_bits(code, 3);
    bw.put_bits(0xFFFF, 16);
    if matches!(picture_type, PictureType::P | PictureType::B) {
        bw.put_bit(false);
        bw.put_bits(1, 3);
    }
    if picture_type == PictureType::B {
        bw.put_bit(false);
        bw.put_bits(1, 3);
    }
    bw.put_bit(false);
}

fn slice_header(bw: &mut BitWriter, row: u8) {
    bw.put_start_code(row + 1);
    bw.put_bits(QUANT, 5);
    bw.put_bit(false);
}

/// 帧内宏块: 每个亮度块 DC 差分 +5, 色度差分 0, 无 AC 系数
fn intra_macroblock(bw: &mut BitWriter) {
    intra_macroblock_after(bw, "1");
}

/// 同 [`intra_macroblock`], 地址增量码字为 `increment`
fn intra_macroblock_after(bw: &mut BitWriter, increment: &str) {
    bw.put_code(increment);
    bw.put_code("1"); // intra
    for _ in 0..4 {
        bw.put_code("101 101 10");
    }
    for _ in 0..2 {
        bw.put_code("00 10");
    }
}

/// I 图像: 每行一个切片, 全部为帧内宏块
fn intra_picture(bw: &mut BitWriter, mb_width: usize, mb_height: usize) {
    picture_header(bw, 0, PictureType::I);
    for row in 0..mb_height {
        slice_header(bw, row as u8);
        for _ in 0..mb_width {
            intra_macroblock(bw);
        }
    }
}

/// 写入一个前向运动补偿、无残差的宏块, 水平矢量码 `mv_code`
fn forward_macroblock(bw: &mut BitWriter, address_increment: &str, mb_type: &str, mv_code: &str) {
    bw.put_code(address_increment);
    bw.put_code(mb_type);
    bw.put_code(mv_code);
    bw.put_code("1"); // 垂直矢量 0
}

/// 帧内宏块中亮度的期望值: 预测器在切片开始处复位为 128, 每块递增 5
fn expected_intra_luma(x: usize, y: usize) -> u8 {
    let mb = x / 16;
    let block = (x % 16) / 8 + 2 * ((y % 16) / 8);
    (128 + 5 * (4 * mb + block + 1)) as u8
}

fn decode_all(data: Vec<u8>, cpus: usize) -> (Vec<VideoFrame>, VideoStats) {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = VideoConfig {
        cpus,
        ..VideoConfig::default()
    };
    let mut dec = VideoDecoder::new(MemorySource::new(data), config);
    let mut frames = Vec::new();
    while let Some(frame) = dec.decode_video_frame().expect("解码失败") {
        frames.push(frame);
    }
    (frames, dec.stats())
}

#[test]
fn test_intra_picture_reconstruction() {
    let mut bw = BitWriter::new();
    sequence_header(&mut bw, 32, 32);
    gop_header(&mut bw);
    intra_picture(&mut bw, 2, 2);
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 1);
    assert_eq!(frames.len(), 1, "应输出一帧");
    let f = &frames[0];
    assert_eq!(f.picture_type, PictureType::I);
    assert_eq!((f.width, f.height), (32, 32));
    assert_eq!(f.frame_number, 0);
    assert_eq!(stats.slice_faults, 0);
    for y in 0..32 {
        for x in 0..32 {
            assert_eq!(
                f.luma_at(x as u32, y as u32),
                expected_intra_luma(x, y),
                "像素 ({}, {})",
                x,
                y
            );
        }
    }
    assert!(f.cb.iter().all(|&v| v == 128), "色度应为中性值");
}

fn ipb_stream() -> Vec<u8> {
    let mut bw = BitWriter::new();
    sequence_header(&mut bw, 48, 32);
    gop_header(&mut bw);
    intra_picture(&mut bw, 3, 2);

    // P: 宏块 0 零矢量, 宏块 1 跳过, 宏块 2 水平矢量 +2 (半像素单位, 即右移 1 像素)
    picture_header(&mut bw, 2, PictureType::P);
    for row in 0..2 {
        slice_header(&mut bw, row);
        forward_macroblock(&mut bw, "1", "001", "1");
        forward_macroblock(&mut bw, "011", "001", "0010");
    }

    // B: 全部前向零矢量预测
    picture_header(&mut bw, 1, PictureType::B);
    for row in 0..2 {
        slice_header(&mut bw, row);
        for _ in 0..3 {
            forward_macroblock(&mut bw, "1", "0010", "1");
        }
    }
    bw.finish()
}

#[test]
fn test_display_order_and_motion_compensation() {
    let (frames, stats) = decode_all(ipb_stream(), 1);
    let types: Vec<_> = frames.iter().map(|f| f.picture_type).collect();
    assert_eq!(
        types,
        [PictureType::I, PictureType::B, PictureType::P],
        "输出应为显示顺序"
    );
    assert_eq!(stats.pictures_decoded, 3);
    assert_eq!(stats.slice_faults, 0);
    for (n, f) in frames.iter().enumerate() {
        assert_eq!(f.frame_number, n as u64);
    }

    let (i, b, p) = (&frames[0], &frames[1], &frames[2]);
    // B 图像零矢量前向预测复现 I 图像
    assert_eq!(b.y, i.y, "零矢量预测应精确复现参考帧");
    for y in 0..32u32 {
        for x in 0..48u32 {
            let expected = if x < 32 {
                i.luma_at(x, y)
            } else {
                i.luma_at((x + 1).min(47), y)
            };
            assert_eq!(p.luma_at(x, y), expected, "P 像素 ({}, {})", x, y);
        }
    }
}

#[test]
fn test_worker_count_does_not_change_output() {
    let (single, _) = decode_all(ipb_stream(), 1);
    let (multi, _) = decode_all(ipb_stream(), 4);
    assert_eq!(single.len(), multi.len());
    for (a, b) in single.iter().zip(&multi) {
        assert_eq!(a.y, b.y, "第 {} 帧亮度不一致", a.frame_number);
        assert_eq!(a.cb, b.cb);
        assert_eq!(a.cr, b.cr);
    }
}

#[test]
fn test_address_overflow_faults_only_that_slice() {
    let mut bw = BitWriter::new();
    sequence_header(&mut bw, 32, 32);
    intra_picture(&mut bw, 2, 1);
    // 第二行切片: 地址增量 14 越出 2x2 图像
    slice_header(&mut bw, 1);
    bw.put_code("0000 0111");
    bw.put_code("1");
    let (frames, stats) = decode_all(bw.finish(), 2);
    assert_eq!(stats.slice_faults, 1);
    assert_eq!(frames.len(), 1);
    let f = &frames[0];
    assert_eq!(f.luma_at(0, 0), expected_intra_luma(0, 0), "正常切片应完成重建");
    assert_eq!(f.luma_at(0, 16), 0, "出错切片不得写入");
}

#[test]
fn test_p_picture_without_reference_is_skipped() {
    let mut bw = BitWriter::new();
    sequence_header(&mut bw, 16, 16);
    picture_header(&mut bw, 0, PictureType::P);
    slice_header(&mut bw, 0);
    forward_macroblock(&mut bw, "1", "001", "1");
    let (frames, stats) = decode_all(bw.finish(), 1);
    assert!(frames.is_empty());
    assert_eq!(stats.pictures_skipped, 1);
}

#[test]
fn test_frame_cache_serves_backward_seek() {
    let config = VideoConfig {
        cpus: 1,
        frame_cache_bytes: 1 << 20,
        frame_cache_enabled: true,
    };
    let mut dec = VideoDecoder::new(MemorySource::new(ipb_stream()), config);
    let mut frames = Vec::new();
    while let Some(frame) = dec.decode_video_frame().expect("解码失败") {
        frames.push(frame);
    }
    let cached = dec.seek_frame(1).expect("第 1 帧应在缓存中");
    assert_eq!(cached.y, frames[1].y);
    assert_eq!(cached.sizes.width, 48);
    assert!(dec.seek_frame(10).is_none());
}

#[test]
fn test_seek_waits_for_intra_picture() {
    let data = ipb_stream();
    let mut dec = VideoDecoder::new(MemorySource::new(data), VideoConfig::default());
    let first = dec.decode_video_frame().expect("解码失败");
    assert!(first.is_some());
    // 回到流起点: 参考帧被丢弃, 序号继续递增
    Decoder::seek_byte(&mut dec, 0).expect("定位失败");
    let mut types = Vec::new();
    while let Some(frame) = dec.decode_video_frame().expect("解码失败") {
        types.push(frame.picture_type);
    }
    assert_eq!(types, [PictureType::I, PictureType::B, PictureType::P]);
    assert_eq!(dec.next_frame_number(), 1 + 3);
}

// ---- MPEG-2 ----

/// 序列头 + 序列扩展
fn mpeg2_sequence(bw: &mut BitWriter, width: u32, height: u32, progressive: bool, chroma: u32) {
    sequence_header(bw, width, height);
    bw.put_start_code(EXTENSION_START_CODE);
    bw.put_bits(1, 4);
    bw.put_bits(0x48, 8); // Main@Main
    bw.put_bit(progressive);
    bw.put_bits(chroma, 2);
    bw.put_bits(0, 4); // 尺寸扩展
    bw.put_bits(0, 12); // bit_rate_extension
    bw.put_bit(true);
    bw.put_bits(0, 8); // vbv_buffer_size_extension
    bw.put_bit(false); // low_delay
    bw.put_bits(0, 7); // frame_rate_extension_n/d
}

/// 图像编码扩展中随测试变化的字段, f_code 固定为 1
#[derive(Debug, Clone, Copy)]
struct CodingFields {
    structure: u32,
    frame_pred_frame_dct: bool,
    concealment_motion_vectors: bool,
    intra_vlc_format: bool,
    alternate_scan: bool,
}

impl Default for CodingFields {
    fn default() -> Self {
        Self {
            structure: 3,
            frame_pred_frame_dct: true,
            concealment_motion_vectors: false,
            intra_vlc_format: false,
            alternate_scan: false,
        }
    }
}

impl CodingFields {
    fn field(structure: u32) -> Self {
        Self {
            structure,
            ..Self::default()
        }
    }

    /// 帧图像, 宏块可选场/帧预测与场 DCT
    fn interlaced_frame() -> Self {
        Self {
            frame_pred_frame_dct: false,
            ..Self::default()
        }
    }
}

/// 图像头 + 图像编码扩展
fn mpeg2_picture(
    bw: &mut BitWriter,
    temporal_reference: u32,
    picture_type: PictureType,
    c: CodingFields,
) {
    picture_header(bw, temporal_reference, picture_type);
    bw.put_start_code(EXTENSION_START_CODE);
    bw.put_bits(8, 4);
    for _ in 0..4 {
        bw.put_bits(1, 4);
    }
    bw.put_bits(0, 2); // intra_dc_precision
    bw.put_bits(c.structure, 2);
    bw.put_bit(true); // top_field_first
    bw.put_bit(c.frame_pred_frame_dct);
    bw.put_bit(c.concealment_motion_vectors);
    bw.put_bit(false); // q_scale_type
    bw.put_bit(c.intra_vlc_format);
    bw.put_bit(c.alternate_scan);
    bw.put_bit(false); // repeat_first_field
    bw.put_bit(true); // chroma_420_type
    bw.put_bit(c.structure == 3 && c.frame_pred_frame_dct); // progressive_frame
    bw.put_bit(false); // composite_display_flag
}

/// DC 差分: dct_dc_size 码字 + 差分位
fn put_dc(bw: &mut BitWriter, diff: i32, luma: bool) {
    const LUMA: [&str; 6] = ["100", "00", "01", "101", "110", "1110"];
    const CHROMA: [&str; 6] = ["00", "01", "10", "110", "1110", "11110"];
    let size = 32 - diff.unsigned_abs().leading_zeros();
    bw.put_code(if luma { LUMA } else { CHROMA }[size as usize]);
    if size > 0 {
        let bits = if diff > 0 { diff } else { diff + (1 << size) - 1 };
        bw.put_bits(bits as u32, size);
    }
}

/// 帧内宏块的块数据 (B.14): 首个亮度块 DC 差分 `diff`, 其余差分为 0
fn uniform_intra_blocks(bw: &mut BitWriter, diff: i32) {
    for block in 0..4 {
        put_dc(bw, if block == 0 { diff } else { 0 }, true);
        bw.put_code("10");
    }
    for _ in 0..2 {
        bw.put_code("00 10");
    }
}

/// 顶场中帧内宏块 ([`intra_macroblock`]) 的亮度, `row` 为场内行号
fn intra_field_luma(x: usize, row: usize) -> u8 {
    expected_intra_luma(x, row)
}

/// 16x32 隔行序列的 I 场对: 顶场为递增 DC, 底场为 100
fn intra_field_pair(bw: &mut BitWriter) {
    mpeg2_sequence(bw, 16, 32, false, 1);
    gop_header(bw);
    mpeg2_picture(bw, 0, PictureType::I, CodingFields::field(1));
    slice_header(bw, 0);
    intra_macroblock(bw);
    mpeg2_picture(bw, 0, PictureType::I, CodingFields::field(2));
    slice_header(bw, 0);
    bw.put_code("1 1");
    uniform_intra_blocks(bw, -28);
}

fn assert_luma(frame: &VideoFrame, expected: impl Fn(usize, usize) -> u8, what: &str) {
    for y in 0..frame.height as usize {
        for x in 0..frame.width as usize {
            assert_eq!(
                frame.luma_at(x as u32, y as u32),
                expected(x, y),
                "{} 像素 ({}, {})",
                what,
                x,
                y
            );
        }
    }
}

#[test]
fn test_concealment_vectors_in_interlaced_intra_frame() {
    let mut bw = BitWriter::new();
    mpeg2_sequence(&mut bw, 32, 16, true, 1);
    let coding = CodingFields {
        concealment_motion_vectors: true,
        ..CodingFields::interlaced_frame()
    };
    mpeg2_picture(&mut bw, 0, PictureType::I, coding);
    slice_header(&mut bw, 0);
    // 宏块 0: 场 DCT, 隐藏矢量 (+1, 0)
    bw.put_code("1 1 1");
    bw.put_code("010 1 1");
    for _ in 0..4 {
        bw.put_code("101 101 10");
    }
    bw.put_code("00 10 00 10");
    // 宏块 1: 帧 DCT, 隐藏矢量 (0, 0)
    bw.put_code("1 1 0");
    bw.put_code("1 1 1");
    for _ in 0..4 {
        bw.put_code("101 101 10");
    }
    bw.put_code("00 10 00 10");
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 1);
    assert_eq!(stats.slice_faults, 0, "隐藏矢量之前不应读取 motion_type");
    assert_eq!(frames.len(), 1);
    assert_luma(
        &frames[0],
        |x, y| {
            if x < 16 {
                // 场 DCT: 上两块为顶场, 下两块为底场
                (128 + 5 * (x / 8 + 2 * (y % 2) + 1)) as u8
            } else {
                expected_intra_luma(x, y)
            }
        },
        "I",
    );
}

#[test]
fn test_field_pictures_pair_into_one_frame() {
    let mut bw = BitWriter::new();
    intra_field_pair(&mut bw);
    // P 场对: 顶场取参考帧底场, 底场取本帧刚解码的顶场
    mpeg2_picture(&mut bw, 1, PictureType::P, CodingFields::field(1));
    slice_header(&mut bw, 0);
    bw.put_code("1 001 01 1 1 1");
    mpeg2_picture(&mut bw, 1, PictureType::P, CodingFields::field(2));
    slice_header(&mut bw, 0);
    bw.put_code("1 001 01 0 1 1");
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 2);
    assert_eq!(stats.pictures_decoded, 4, "场图像按场计数");
    assert_eq!(stats.slice_faults, 0);
    assert_eq!(frames.len(), 2, "两个场对各输出一帧");
    assert_eq!((frames[0].width, frames[0].height), (16, 32));
    assert_eq!(frames[0].picture_type, PictureType::I);
    assert_eq!(frames[1].picture_type, PictureType::P);
    assert_luma(
        &frames[0],
        |x, y| if y % 2 == 0 { intra_field_luma(x, y / 2) } else { 100 },
        "I",
    );
    assert_luma(&frames[1], |_, _| 100, "P");
}

#[test]
fn test_sixteen_by_eight_and_dual_prime_in_field_pictures() {
    let mut bw = BitWriter::new();
    intra_field_pair(&mut bw);
    // 顶场 16x8: 上半取参考底场, 下半取参考顶场
    mpeg2_picture(&mut bw, 1, PictureType::P, CodingFields::field(1));
    slice_header(&mut bw, 0);
    bw.put_code("1 001 10");
    bw.put_code("1 1 1");
    bw.put_code("0 1 1");
    // 底场 dual prime: 零矢量, dmvector 为 0
    mpeg2_picture(&mut bw, 1, PictureType::P, CodingFields::field(2));
    slice_header(&mut bw, 0);
    bw.put_code("1 001 11");
    bw.put_code("1 0 1 0");
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 1);
    assert_eq!(stats.slice_faults, 0);
    assert_eq!(frames.len(), 2);
    let top = |x: usize, row: usize| -> u8 {
        if row < 8 { 100 } else { intra_field_luma(x, row) }
    };
    assert_luma(
        &frames[1],
        |x, y| {
            let row = y / 2;
            if y % 2 == 0 {
                return top(x, row);
            }
            // 同奇偶 (参考底场, 100) 与异奇偶 (本帧顶场下移半行) 的平均
            let below = (row + 1).min(15);
            let opposite = (u32::from(top(x, row)) + u32::from(top(x, below)) + 1) >> 1;
            ((100 + opposite + 1) >> 1) as u8
        },
        "P",
    );
    assert_eq!(frames[1].luma_at(0, 15), 111);
    assert_eq!(frames[1].luma_at(8, 15), 112);
}

#[test]
fn test_field_and_dual_prime_prediction_in_frame_pictures() {
    let mut bw = BitWriter::new();
    intra_field_pair(&mut bw);
    // P1: 场预测交换两场
    mpeg2_picture(&mut bw, 1, PictureType::P, CodingFields::interlaced_frame());
    for row in 0..2 {
        slice_header(&mut bw, row);
        bw.put_code("1 001 01");
        bw.put_code("1 1 1");
        bw.put_code("0 1 1");
    }
    // P2: dual prime, 零矢量
    mpeg2_picture(&mut bw, 2, PictureType::P, CodingFields::interlaced_frame());
    for row in 0..2 {
        slice_header(&mut bw, row);
        bw.put_code("1 001 11");
        bw.put_code("1 0 1 0");
    }
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 2);
    assert_eq!(stats.slice_faults, 0);
    assert_eq!(frames.len(), 3);
    let swapped = |x: usize, y: usize| -> u8 {
        if y % 2 == 0 { 100 } else { intra_field_luma(x, y / 2) }
    };
    assert_luma(&frames[1], swapped, "P1");
    assert_luma(
        &frames[2],
        |x, y| {
            let row = y / 2;
            let same = u32::from(swapped(x, y));
            let opposite = if y % 2 == 0 {
                // 顶场自底场, 垂直 -1 半像素
                let above = 2 * row.saturating_sub(1) + 1;
                (u32::from(swapped(x, above)) + u32::from(swapped(x, y + 1)) + 1) >> 1
            } else {
                100
            };
            ((same + opposite + 1) >> 1) as u8
        },
        "P2",
    );
    assert_eq!(frames[2].luma_at(0, 0), 117);
    assert_eq!(frames[2].luma_at(8, 16), 122);
}

#[test]
fn test_intra_vlc_format_and_alternate_scan() {
    for alternate_scan in [false, true] {
        let mut bw = BitWriter::new();
        mpeg2_sequence(&mut bw, 16, 16, true, 1);
        let coding = CodingFields {
            intra_vlc_format: true,
            alternate_scan,
            ..CodingFields::default()
        };
        mpeg2_picture(&mut bw, 0, PictureType::I, coding);
        slice_header(&mut bw, 0);
        bw.put_code("1 1");
        // 块 0: DC +5, B.15 '010' + 正号 (run=1, level=1), B.15 EOB '0110'
        bw.put_code("101 101 010 0 0110");
        for _ in 0..3 {
            bw.put_code("100 0110");
        }
        bw.put_code("00 0110 00 0110");
        let (frames, stats) = decode_all(bw.finish(), 1);
        assert_eq!(stats.slice_faults, 0);
        assert_eq!(frames.len(), 1);

        // 扫描序号 2: 交替扫描落在 (2, 0), 之字形扫描落在 (1, 0)
        let mut block = [0i32; 64];
        block[0] = 133 * 8 - 1024;
        if alternate_scan {
            block[16] = 19;
        } else {
            block[8] = 16;
            block[63] = 1; // 系数和为偶数, 失配控制翻转最后一个系数
        }
        idct_8x8(&mut block);
        let f = &frames[0];
        for y in 0..8 {
            for x in 0..8 {
                let expected = (128 + block[y * 8 + x]).clamp(0, 255) as u8;
                assert_eq!(
                    f.luma_at(x as u32, y as u32),
                    expected,
                    "alternate_scan={} 像素 ({}, {})",
                    alternate_scan,
                    x,
                    y
                );
            }
        }
        assert_ne!(f.luma_at(0, 0), f.luma_at(0, 3), "垂直方向应有变化");
        assert_eq!(f.luma_at(8, 8), 133);
    }
}

#[test]
fn test_chroma_422_and_444_block_layout() {
    for (code, format) in [(2u32, ChromaFormat::Yuv422), (3, ChromaFormat::Yuv444)] {
        let mut bw = BitWriter::new();
        mpeg2_sequence(&mut bw, 16, 16, true, code);
        mpeg2_picture(&mut bw, 0, PictureType::I, CodingFields::default());
        slice_header(&mut bw, 0);
        bw.put_code("1 1");
        for _ in 0..4 {
            bw.put_code("101 101 10");
        }
        // 色度块按 Cb, Cr 交替, Cb 每块 +4, Cr 每块 -4
        for _ in 0..(format.block_count() - 4) / 2 {
            put_dc(&mut bw, 4, false);
            bw.put_code("10");
            put_dc(&mut bw, -4, false);
            bw.put_code("10");
        }
        let (frames, stats) = decode_all(bw.finish(), 1);
        assert_eq!(stats.slice_faults, 0, "{}", format);
        let f = &frames[0];
        assert_eq!(f.chroma_format, format);
        assert_luma(f, expected_intra_luma, "Y");

        let (cw, ch) = f.chroma_size();
        assert_eq!(ch, 16, "{} 色度不做垂直减采样", format);
        for y in 0..ch as usize {
            for x in 0..cw as usize {
                // 块序号 k: 水平偏移 8*(k>>1), 垂直偏移 8*(k&1)
                let k = (x / 8) * 2 + y / 8;
                let (cb, cr) = (132 + 4 * k, 124 - 4 * k);
                let i = y * cw as usize + x;
                assert_eq!(f.cb[i] as usize, cb, "{} Cb ({}, {})", format, x, y);
                assert_eq!(f.cr[i] as usize, cr, "{} Cr ({}, {})", format, x, y);
            }
        }
    }
}

#[test]
fn test_bidirectional_prediction_and_skipped_b_macroblock() {
    let mut bw = BitWriter::new();
    mpeg2_sequence(&mut bw, 48, 16, true, 1);
    mpeg2_picture(&mut bw, 0, PictureType::I, CodingFields::default());
    slice_header(&mut bw, 0);
    for _ in 0..3 {
        intra_macroblock(&mut bw);
    }
    // P: 全部帧内宏块, 亮度 100
    mpeg2_picture(&mut bw, 2, PictureType::P, CodingFields::default());
    slice_header(&mut bw, 0);
    for mb in 0..3 {
        bw.put_code("1 0001 1");
        uniform_intra_blocks(&mut bw, if mb == 0 { -28 } else { 0 });
    }
    // B: 宏块 0 双向, 宏块 1 跳过 (沿用双向), 宏块 2 仅后向
    mpeg2_picture(&mut bw, 1, PictureType::B, CodingFields::default());
    slice_header(&mut bw, 0);
    bw.put_code("1 10 1 1 1 1");
    bw.put_code("011 010 1 1");
    bw.put_start_code(SEQUENCE_END_CODE);

    let (frames, stats) = decode_all(bw.finish(), 2);
    assert_eq!(stats.slice_faults, 0);
    let types: Vec<_> = frames.iter().map(|f| f.picture_type).collect();
    assert_eq!(types, [PictureType::I, PictureType::B, PictureType::P]);
    assert_luma(&frames[2], |_, _| 100, "P");
    assert_luma(
        &frames[1],
        |x, y| {
            if x < 32 {
                ((u32::from(expected_intra_luma(x, y)) + 100 + 1) >> 1) as u8
            } else {
                100
            }
        },
        "B",
    );
    assert!(frames[1].cb.iter().all(|&v| v == 128));
}

/// 每行多个切片: 行 0 为 [0] [1 2], 行 1 为 [0 1] [2]
fn multi_slice_stream() -> Vec<u8> {
    let mut bw = BitWriter::new();
    mpeg2_sequence(&mut bw, 48, 32, true, 1);
    mpeg2_picture(&mut bw, 0, PictureType::I, CodingFields::default());
    slice_header(&mut bw, 0);
    intra_macroblock(&mut bw);
    slice_header(&mut bw, 0);
    intra_macroblock_after(&mut bw, "011");
    intra_macroblock(&mut bw);
    slice_header(&mut bw, 1);
    intra_macroblock(&mut bw);
    intra_macroblock(&mut bw);
    slice_header(&mut bw, 1);
    intra_macroblock_after(&mut bw, "010");
    bw.put_start_code(SEQUENCE_END_CODE);
    bw.finish()
}

#[test]
fn test_multiple_slices_per_row_are_deterministic() {
    let (reference, stats) = decode_all(multi_slice_stream(), 1);
    assert_eq!(stats.slice_faults, 0);
    assert_eq!(reference.len(), 1);
    // 切片起点复位 DC 预测器
    assert_eq!(reference[0].luma_at(0, 0), 133);
    assert_eq!(reference[0].luma_at(16, 0), 133);
    assert_eq!(reference[0].luma_at(32, 0), expected_intra_luma(16, 0));
    assert_eq!(reference[0].luma_at(16, 16), expected_intra_luma(16, 0));
    assert_eq!(reference[0].luma_at(32, 16), 133);
    for cpus in [2, 3, 4] {
        let (frames, stats) = decode_all(multi_slice_stream(), cpus);
        assert_eq!(stats.slice_faults, 0);
        assert_eq!(frames[0].y, reference[0].y, "{} 个工作线程的输出不同", cpus);
    }
}

#[test]
fn test_enhancement_layer_pictures_are_skipped() {
    for (spatial, decoded) in [(true, 0usize), (false, 1)] {
        let mut bw = BitWriter::new();
        mpeg2_sequence(&mut bw, 16, 16, true, 1);
        bw.put_start_code(EXTENSION_START_CODE);
        bw.put_bits(5, 4);
        if spatial {
            bw.put_bits(1, 2);
            bw.put_bits(1, 4); // layer_id
            bw.put_bits(8, 14);
            bw.put_bit(true);
            bw.put_bits(8, 14);
            for v in [2u32, 1, 2, 1] {
                bw.put_bits(v, 5);
            }
        } else {
            bw.put_bits(3, 2);
            bw.put_bits(1, 4);
            bw.put_bit(false); // picture_mux_enable
            bw.put_bits(0, 6);
        }
        mpeg2_picture(&mut bw, 0, PictureType::I, CodingFields::default());
        slice_header(&mut bw, 0);
        intra_macroblock(&mut bw);
        bw.put_start_code(SEQUENCE_END_CODE);

        let _ = env_logger::builder().is_test(true).try_init();
        let mut dec = VideoDecoder::new(MemorySource::new(bw.finish()), VideoConfig::default());
        let mut frames = 0;
        while dec.decode_video_frame().expect("解码失败").is_some() {
            frames += 1;
        }
        let ext = dec.sequence_scalable_extension().expect("应保存可分级扩展");
        assert_eq!(ext.layer_id, 1);
        assert_eq!(matches!(ext.layer, ScalableLayer::Spatial { .. }), spatial);
        assert_eq!(frames, decoded);
        assert_eq!(dec.stats().pictures_skipped, 1 - decoded as u64);
    }
}
