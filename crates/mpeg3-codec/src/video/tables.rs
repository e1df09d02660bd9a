//! MPEG-1/2 视频码表.
//!
//! VLC 表以 `(码字, 码长, 值)` 列出, 由 [`super::vlc`] 在首次使用时构建查找表.
//! DCT 系数表不含符号位.

use super::vlc::{DCT_EOB, DCT_ESCAPE, RunLevel, rl};

/// 宏块地址增量: 填充码 (仅 MPEG-1)
pub(super) const MBA_STUFFING: u8 = 34;
/// 宏块地址增量: 转义码 (+33)
pub(super) const MBA_ESCAPE: u8 = 35;

// 宏块类型标志, 与 `MacroblockType` 位定义一致
const Q: u8 = 0x10;
const F: u8 = 0x08;
const B: u8 = 0x04;
const P: u8 = 0x02;
const I: u8 = 0x01;

pub(super) const MB_ADDR_INC: [(u32, u8, u8); 35] = [
    (0b1, 1, 1), (0b010, 3, 3), (0b011, 3, 2), (0b0010, 4, 5),
    (0b0011, 4, 4), (0b0001_0, 5, 7), (0b0001_1, 5, 6), (0b0000_110, 7, 9),
    (0b0000_111, 7, 8), (0b0000_0110, 8, 15), (0b0000_0111, 8, 14), (0b0000_1000, 8, 13),
    (0b0000_1001, 8, 12), (0b0000_1010, 8, 11), (0b0000_1011, 8, 10), (0b0000_0100_10, 10, 21),
    (0b0000_0100_11, 10, 20), (0b0000_0101_00, 10, 19), (0b0000_0101_01, 10, 18), (0b0000_0101_10, 10, 17),
    (0b0000_0101_11, 10, 16), (0b0000_0001_000, 11, MBA_ESCAPE), (0b0000_0001_111, 11, MBA_STUFFING), (0b0000_0011_000, 11, 33),
    (0b0000_0011_001, 11, 32), (0b0000_0011_010, 11, 31), (0b0000_0011_011, 11, 30), (0b0000_0011_100, 11, 29),
    (0b0000_0011_101, 11, 28), (0b0000_0011_110, 11, 27), (0b0000_0011_111, 11, 26), (0b0000_0100_000, 11, 25),
    (0b0000_0100_001, 11, 24), (0b0000_0100_010, 11, 23), (0b0000_0100_011, 11, 22),
];

pub(super) const MB_TYPE_I: [(u32, u8, u8); 2] = [
    (0b1, 1, I), (0b01, 2, Q|I),
];

pub(super) const MB_TYPE_P: [(u32, u8, u8); 7] = [
    (0b1, 1, F|P), (0b01, 2, P), (0b001, 3, F), (0b0000_1, 5, Q|P),
    (0b0001_0, 5, Q|F|P), (0b0001_1, 5, I), (0b0000_01, 6, Q|I),
];

pub(super) const MB_TYPE_B: [(u32, u8, u8); 11] = [
    (0b10, 2, F|B), (0b11, 2, F|B|P), (0b010, 3, B), (0b011, 3, B|P),
    (0b0010, 4, F), (0b0011, 4, F|P), (0b0001_0, 5, Q|F|B|P), (0b0001_1, 5, I),
    (0b0000_01, 6, Q|I), (0b0000_10, 6, Q|B|P), (0b0000_11, 6, Q|F|P),
];

pub(super) const CODED_BLOCK_PATTERN: [(u32, u8, u8); 64] = [
    (0b111, 3, 60), (0b1010, 4, 32), (0b1011, 4, 16), (0b1100, 4, 8), (0b1101, 4, 4),
    (0b0100_0, 5, 62), (0b0100_1, 5, 2), (0b0101_0, 5, 61), (0b0101_1, 5, 1), (0b0110_0, 5, 56),
    (0b0110_1, 5, 52), (0b0111_0, 5, 44), (0b0111_1, 5, 28), (0b1000_0, 5, 40), (0b1000_1, 5, 20),
    (0b1001_0, 5, 48), (0b1001_1, 5, 12), (0b0011_00, 6, 63), (0b0011_01, 6, 3), (0b0011_10, 6, 36),
    (0b0011_11, 6, 24), (0b0010_000, 7, 34), (0b0010_001, 7, 18), (0b0010_010, 7, 10), (0b0010_011, 7, 6),
    (0b0010_100, 7, 33), (0b0010_101, 7, 17), (0b0010_110, 7, 9), (0b0010_111, 7, 5), (0b0000_0100, 8, 58),
    (0b0000_0101, 8, 54), (0b0000_0110, 8, 46), (0b0000_0111, 8, 30), (0b0000_1000, 8, 57), (0b0000_1001, 8, 53),
    (0b0000_1010, 8, 45), (0b0000_1011, 8, 29), (0b0000_1100, 8, 38), (0b0000_1101, 8, 26), (0b0000_1110, 8, 37),
    (0b0000_1111, 8, 25), (0b0001_0000, 8, 43), (0b0001_0001, 8, 23), (0b0001_0010, 8, 51), (0b0001_0011, 8, 15),
    (0b0001_0100, 8, 42), (0b0001_0101, 8, 22), (0b0001_0110, 8, 50), (0b0001_0111, 8, 14), (0b0001_1000, 8, 41),
    (0b0001_1001, 8, 21), (0b0001_1010, 8, 49), (0b0001_1011, 8, 13), (0b0001_1100, 8, 35), (0b0001_1101, 8, 19),
    (0b0001_1110, 8, 11), (0b0001_1111, 8, 7), (0b0000_0000_1, 9, 0), (0b0000_0001_0, 9, 39), (0b0000_0001_1, 9, 27),
    (0b0000_0010_0, 9, 59), (0b0000_0010_1, 9, 55), (0b0000_0011_0, 9, 47), (0b0000_0011_1, 9, 31),
];

pub(super) const MOTION_CODE: [(u32, u8, i8); 33] = [
    (0b1, 1, 0), (0b010, 3, 1), (0b011, 3, -1), (0b0010, 4, 2),
    (0b0011, 4, -2), (0b0001_0, 5, 3), (0b0001_1, 5, -3), (0b0000_110, 7, 4),
    (0b0000_111, 7, -4), (0b0000_0110, 8, 7), (0b0000_0111, 8, -7), (0b0000_1000, 8, 6),
    (0b0000_1001, 8, -6), (0b0000_1010, 8, 5), (0b0000_1011, 8, -5), (0b0000_0100_10, 10, 10),
    (0b0000_0100_11, 10, -10), (0b0000_0101_00, 10, 9), (0b0000_0101_01, 10, -9), (0b0000_0101_10, 10, 8),
    (0b0000_0101_11, 10, -8), (0b0000_0011_000, 11, 16), (0b0000_0011_001, 11, -16), (0b0000_0011_010, 11, 15),
    (0b0000_0011_011, 11, -15), (0b0000_0011_100, 11, 14), (0b0000_0011_101, 11, -14), (0b0000_0011_110, 11, 13),
    (0b0000_0011_111, 11, -13), (0b0000_0100_000, 11, 12), (0b0000_0100_001, 11, -12), (0b0000_0100_010, 11, 11),
    (0b0000_0100_011, 11, -11),
];

pub(super) const DC_SIZE_LUMA: [(u32, u8, u8); 12] = [
    (0b00, 2, 1), (0b01, 2, 2), (0b100, 3, 0), (0b101, 3, 3),
    (0b110, 3, 4), (0b1110, 4, 5), (0b1111_0, 5, 6), (0b1111_10, 6, 7),
    (0b1111_110, 7, 8), (0b1111_1110, 8, 9), (0b1111_1111_0, 9, 10), (0b1111_1111_1, 9, 11),
];

pub(super) const DC_SIZE_CHROMA: [(u32, u8, u8); 12] = [
    (0b00, 2, 0), (0b01, 2, 1), (0b10, 2, 2), (0b110, 3, 3),
    (0b1110, 4, 4), (0b1111_0, 5, 5), (0b1111_10, 6, 6), (0b1111_110, 7, 7),
    (0b1111_1110, 8, 8), (0b1111_1111_0, 9, 9), (0b1111_1111_10, 10, 10), (0b1111_1111_11, 10, 11),
];

pub(super) const DCT_COEFF_B14: [(u32, u8, RunLevel); 113] = [
    (0b10, 2, DCT_EOB), (0b11, 2, rl(0, 1)), (0b011, 3, rl(1, 1)),
    (0b0100, 4, rl(0, 2)), (0b0101, 4, rl(2, 1)), (0b0010_1, 5, rl(0, 3)),
    (0b0011_0, 5, rl(4, 1)), (0b0011_1, 5, rl(3, 1)), (0b0000_01, 6, DCT_ESCAPE),
    (0b0001_00, 6, rl(7, 1)), (0b0001_01, 6, rl(6, 1)), (0b0001_10, 6, rl(1, 2)),
    (0b0001_11, 6, rl(5, 1)), (0b0000_100, 7, rl(2, 2)), (0b0000_101, 7, rl(9, 1)),
    (0b0000_110, 7, rl(0, 4)), (0b0000_111, 7, rl(8, 1)), (0b0010_0000, 8, rl(13, 1)),
    (0b0010_0001, 8, rl(0, 6)), (0b0010_0010, 8, rl(12, 1)), (0b0010_0011, 8, rl(11, 1)),
    (0b0010_0100, 8, rl(3, 2)), (0b0010_0101, 8, rl(1, 3)), (0b0010_0110, 8, rl(0, 5)),
    (0b0010_0111, 8, rl(10, 1)), (0b0000_0010_00, 10, rl(16, 1)), (0b0000_0010_01, 10, rl(5, 2)),
    (0b0000_0010_10, 10, rl(0, 7)), (0b0000_0010_11, 10, rl(2, 3)), (0b0000_0011_00, 10, rl(1, 4)),
    (0b0000_0011_01, 10, rl(15, 1)), (0b0000_0011_10, 10, rl(14, 1)), (0b0000_0011_11, 10, rl(4, 2)),
    (0b0000_0001_0000, 12, rl(0, 11)), (0b0000_0001_0001, 12, rl(8, 2)), (0b0000_0001_0010, 12, rl(4, 3)),
    (0b0000_0001_0011, 12, rl(0, 10)), (0b0000_0001_0100, 12, rl(2, 4)), (0b0000_0001_0101, 12, rl(7, 2)),
    (0b0000_0001_0110, 12, rl(21, 1)), (0b0000_0001_0111, 12, rl(20, 1)), (0b0000_0001_1000, 12, rl(0, 9)),
    (0b0000_0001_1001, 12, rl(19, 1)), (0b0000_0001_1010, 12, rl(18, 1)), (0b0000_0001_1011, 12, rl(1, 5)),
    (0b0000_0001_1100, 12, rl(3, 3)), (0b0000_0001_1101, 12, rl(0, 8)), (0b0000_0001_1110, 12, rl(6, 2)),
    (0b0000_0001_1111, 12, rl(17, 1)), (0b0000_0000_1000_0, 13, rl(10, 2)), (0b0000_0000_1000_1, 13, rl(9, 2)),
    (0b0000_0000_1001_0, 13, rl(5, 3)), (0b0000_0000_1001_1, 13, rl(3, 4)), (0b0000_0000_1010_0, 13, rl(2, 5)),
    (0b0000_0000_1010_1, 13, rl(1, 7)), (0b0000_0000_1011_0, 13, rl(1, 6)), (0b0000_0000_1011_1, 13, rl(0, 15)),
    (0b0000_0000_1100_0, 13, rl(0, 14)), (0b0000_0000_1100_1, 13, rl(0, 13)), (0b0000_0000_1101_0, 13, rl(0, 12)),
    (0b0000_0000_1101_1, 13, rl(26, 1)), (0b0000_0000_1110_0, 13, rl(25, 1)), (0b0000_0000_1110_1, 13, rl(24, 1)),
    (0b0000_0000_1111_0, 13, rl(23, 1)), (0b0000_0000_1111_1, 13, rl(22, 1)), (0b0000_0000_0100_00, 14, rl(0, 31)),
    (0b0000_0000_0100_01, 14, rl(0, 30)), (0b0000_0000_0100_10, 14, rl(0, 29)), (0b0000_0000_0100_11, 14, rl(0, 28)),
    (0b0000_0000_0101_00, 14, rl(0, 27)), (0b0000_0000_0101_01, 14, rl(0, 26)), (0b0000_0000_0101_10, 14, rl(0, 25)),
    (0b0000_0000_0101_11, 14, rl(0, 24)), (0b0000_0000_0110_00, 14, rl(0, 23)), (0b0000_0000_0110_01, 14, rl(0, 22)),
    (0b0000_0000_0110_10, 14, rl(0, 21)), (0b0000_0000_0110_11, 14, rl(0, 20)), (0b0000_0000_0111_00, 14, rl(0, 19)),
    (0b0000_0000_0111_01, 14, rl(0, 18)), (0b0000_0000_0111_10, 14, rl(0, 17)), (0b0000_0000_0111_11, 14, rl(0, 16)),
    (0b0000_0000_0010_000, 15, rl(0, 40)), (0b0000_0000_0010_001, 15, rl(0, 39)), (0b0000_0000_0010_010, 15, rl(0, 38)),
    (0b0000_0000_0010_011, 15, rl(0, 37)), (0b0000_0000_0010_100, 15, rl(0, 36)), (0b0000_0000_0010_101, 15, rl(0, 35)),
    (0b0000_0000_0010_110, 15, rl(0, 34)), (0b0000_0000_0010_111, 15, rl(0, 33)), (0b0000_0000_0011_000, 15, rl(0, 32)),
    (0b0000_0000_0011_001, 15, rl(1, 14)), (0b0000_0000_0011_010, 15, rl(1, 13)), (0b0000_0000_0011_011, 15, rl(1, 12)),
    (0b0000_0000_0011_100, 15, rl(1, 11)), (0b0000_0000_0011_101, 15, rl(1, 10)), (0b0000_0000_0011_110, 15, rl(1, 9)),
    (0b0000_0000_0011_111, 15, rl(1, 8)), (0b0000_0000_0001_0000, 16, rl(1, 18)), (0b0000_0000_0001_0001, 16, rl(1, 17)),
    (0b0000_0000_0001_0010, 16, rl(1, 16)), (0b0000_0000_0001_0011, 16, rl(1, 15)), (0b0000_0000_0001_0100, 16, rl(6, 3)),
    (0b0000_0000_0001_0101, 16, rl(16, 2)), (0b0000_0000_0001_0110, 16, rl(15, 2)), (0b0000_0000_0001_0111, 16, rl(14, 2)),
    (0b0000_0000_0001_1000, 16, rl(13, 2)), (0b0000_0000_0001_1001, 16, rl(12, 2)), (0b0000_0000_0001_1010, 16, rl(11, 2)),
    (0b0000_0000_0001_1011, 16, rl(31, 1)), (0b0000_0000_0001_1100, 16, rl(30, 1)), (0b0000_0000_0001_1101, 16, rl(29, 1)),
    (0b0000_0000_0001_1110, 16, rl(28, 1)), (0b0000_0000_0001_1111, 16, rl(27, 1)),
];

pub(super) const DCT_COEFF_B15: [(u32, u8, RunLevel); 113] = [
    (0b10, 2, rl(0, 1)), (0b010, 3, rl(1, 1)), (0b110, 3, rl(0, 2)),
    (0b0110, 4, DCT_EOB), (0b0111, 4, rl(0, 3)), (0b0010_1, 5, rl(2, 1)),
    (0b0011_0, 5, rl(1, 2)), (0b0011_1, 5, rl(3, 1)), (0b1110_0, 5, rl(0, 4)),
    (0b1110_1, 5, rl(0, 5)), (0b0000_01, 6, DCT_ESCAPE), (0b0001_00, 6, rl(0, 7)),
    (0b0001_01, 6, rl(0, 6)), (0b0001_10, 6, rl(4, 1)), (0b0001_11, 6, rl(5, 1)),
    (0b0000_100, 7, rl(7, 1)), (0b0000_101, 7, rl(8, 1)), (0b0000_110, 7, rl(6, 1)),
    (0b0000_111, 7, rl(2, 2)), (0b1111_000, 7, rl(9, 1)), (0b1111_001, 7, rl(1, 3)),
    (0b1111_010, 7, rl(10, 1)), (0b1111_011, 7, rl(0, 8)), (0b1111_100, 7, rl(0, 9)),
    (0b0010_0000, 8, rl(1, 5)), (0b0010_0001, 8, rl(11, 1)), (0b0010_0010, 8, rl(0, 11)),
    (0b0010_0011, 8, rl(0, 10)), (0b0010_0100, 8, rl(13, 1)), (0b0010_0101, 8, rl(12, 1)),
    (0b0010_0110, 8, rl(3, 2)), (0b0010_0111, 8, rl(1, 4)), (0b1111_1010, 8, rl(0, 12)),
    (0b1111_1011, 8, rl(0, 13)), (0b1111_1100, 8, rl(2, 3)), (0b1111_1101, 8, rl(4, 2)),
    (0b1111_1110, 8, rl(0, 14)), (0b1111_1111, 8, rl(0, 15)), (0b0000_0010_0, 9, rl(5, 2)),
    (0b0000_0010_1, 9, rl(14, 1)), (0b0000_0011_1, 9, rl(15, 1)), (0b0000_0011_00, 10, rl(2, 4)),
    (0b0000_0011_01, 10, rl(16, 1)), (0b0000_0001_0001, 12, rl(8, 2)), (0b0000_0001_0010, 12, rl(4, 3)),
    (0b0000_0001_0101, 12, rl(7, 2)), (0b0000_0001_0110, 12, rl(21, 1)), (0b0000_0001_0111, 12, rl(20, 1)),
    (0b0000_0001_1001, 12, rl(19, 1)), (0b0000_0001_1010, 12, rl(18, 1)), (0b0000_0001_1100, 12, rl(3, 3)),
    (0b0000_0001_1110, 12, rl(6, 2)), (0b0000_0001_1111, 12, rl(17, 1)), (0b0000_0000_1000_0, 13, rl(10, 2)),
    (0b0000_0000_1000_1, 13, rl(9, 2)), (0b0000_0000_1001_0, 13, rl(5, 3)), (0b0000_0000_1001_1, 13, rl(3, 4)),
    (0b0000_0000_1010_0, 13, rl(2, 5)), (0b0000_0000_1010_1, 13, rl(1, 7)), (0b0000_0000_1011_0, 13, rl(1, 6)),
    (0b0000_0000_1101_1, 13, rl(26, 1)), (0b0000_0000_1110_0, 13, rl(25, 1)), (0b0000_0000_1110_1, 13, rl(24, 1)),
    (0b0000_0000_1111_0, 13, rl(23, 1)), (0b0000_0000_1111_1, 13, rl(22, 1)), (0b0000_0000_0100_00, 14, rl(0, 31)),
    (0b0000_0000_0100_01, 14, rl(0, 30)), (0b0000_0000_0100_10, 14, rl(0, 29)), (0b0000_0000_0100_11, 14, rl(0, 28)),
    (0b0000_0000_0101_00, 14, rl(0, 27)), (0b0000_0000_0101_01, 14, rl(0, 26)), (0b0000_0000_0101_10, 14, rl(0, 25)),
    (0b0000_0000_0101_11, 14, rl(0, 24)), (0b0000_0000_0110_00, 14, rl(0, 23)), (0b0000_0000_0110_01, 14, rl(0, 22)),
    (0b0000_0000_0110_10, 14, rl(0, 21)), (0b0000_0000_0110_11, 14, rl(0, 20)), (0b0000_0000_0111_00, 14, rl(0, 19)),
    (0b0000_0000_0111_01, 14, rl(0, 18)), (0b0000_0000_0111_10, 14, rl(0, 17)), (0b0000_0000_0111_11, 14, rl(0, 16)),
    (0b0000_0000_0010_000, 15, rl(0, 40)), (0b0000_0000_0010_001, 15, rl(0, 39)), (0b0000_0000_0010_010, 15, rl(0, 38)),
    (0b0000_0000_0010_011, 15, rl(0, 37)), (0b0000_0000_0010_100, 15, rl(0, 36)), (0b0000_0000_0010_101, 15, rl(0, 35)),
    (0b0000_0000_0010_110, 15, rl(0, 34)), (0b0000_0000_0010_111, 15, rl(0, 33)), (0b0000_0000_0011_000, 15, rl(0, 32)),
    (0b0000_0000_0011_001, 15, rl(1, 14)), (0b0000_0000_0011_010, 15, rl(1, 13)), (0b0000_0000_0011_011, 15, rl(1, 12)),
    (0b0000_0000_0011_100, 15, rl(1, 11)), (0b0000_0000_0011_101, 15, rl(1, 10)), (0b0000_0000_0011_110, 15, rl(1, 9)),
    (0b0000_0000_0011_111, 15, rl(1, 8)), (0b0000_0000_0001_0000, 16, rl(1, 18)), (0b0000_0000_0001_0001, 16, rl(1, 17)),
    (0b0000_0000_0001_0010, 16, rl(1, 16)), (0b0000_0000_0001_0011, 16, rl(1, 15)), (0b0000_0000_0001_0100, 16, rl(6, 3)),
    (0b0000_0000_0001_0101, 16, rl(16, 2)), (0b0000_0000_0001_0110, 16, rl(15, 2)), (0b0000_0000_0001_0111, 16, rl(14, 2)),
    (0b0000_0000_0001_1000, 16, rl(13, 2)), (0b0000_0000_0001_1001, 16, rl(12, 2)), (0b0000_0000_0001_1010, 16, rl(11, 2)),
    (0b0000_0000_0001_1011, 16, rl(31, 1)), (0b0000_0000_0001_1100, 16, rl(30, 1)), (0b0000_0000_0001_1101, 16, rl(29, 1)),
    (0b0000_0000_0001_1110, 16, rl(28, 1)), (0b0000_0000_0001_1111, 16, rl(27, 1)),
];

/// dual prime 差分运动矢量
pub(super) const DMVECTOR: [(u32, u8, i8); 3] = [(0b0, 1, 0), (0b10, 2, 1), (0b11, 2, -1)];

/// 之字形扫描: 扫描序号 -> 块内自然顺序位置
pub(super) const ZIGZAG_SCAN: [u8; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27,
    20, 13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58,
    59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// 交替扫描 (隔行内容)
pub(super) const ALTERNATE_SCAN: [u8; 64] = [
    0, 8, 16, 24, 1, 9, 2, 10, 17, 25, 32, 40, 48, 56, 57, 49, 41, 33, 26, 18, 3, 11, 4, 12, 19,
    27, 34, 42, 50, 58, 35, 43, 51, 59, 20, 28, 5, 13, 6, 14, 21, 29, 36, 44, 52, 60, 37, 45, 53,
    61, 22, 30, 7, 15, 23, 31, 38, 46, 54, 62, 39, 47, 55, 63,
];

/// 默认帧内量化矩阵 (自然顺序)
pub(super) const DEFAULT_INTRA_MATRIX: [u8; 64] = [
    8, 16, 19, 22, 26, 27, 29, 34, //
    16, 16, 22, 24, 27, 29, 34, 37, //
    19, 22, 26, 27, 29, 34, 34, 38, //
    22, 22, 26, 27, 29, 34, 37, 40, //
    22, 26, 27, 29, 32, 35, 40, 48, //
    26, 27, 29, 32, 35, 40, 48, 58, //
    26, 27, 29, 34, 38, 46, 56, 69, //
    27, 29, 35, 38, 46, 56, 69, 83,
];

/// 默认非帧内量化矩阵
pub(super) const DEFAULT_NON_INTRA_MATRIX: [u8; 64] = [16; 64];

/// q_scale_type = 1 时的非线性量化步长
pub(super) const NON_LINEAR_QUANT_SCALE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 18, 20, 22, 24, 28, 32, 36, 40, 44, 48, 52, 56,
    64, 72, 80, 88, 96, 104, 112,
];
