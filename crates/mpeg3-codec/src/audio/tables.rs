//! Layer III 码表与常量.
//!
//! Huffman 表以 `(码字, 码长, 值)` 列出. 大值表的值为 `x << 4 | y`,
//! count1 表的值按位存放 `v w x y` (bit3..bit0).

pub(super) const HUFF_1: [(u32, u8, u8); 4] = [
    (0x1, 1, 0x00), (0x1, 2, 0x10), (0x0, 3, 0x11), (0x1, 3, 0x01),
];

pub(super) const HUFF_2: [(u32, u8, u8); 9] = [
    (0x1, 1, 0x00), (0x1, 3, 0x11), (0x2, 3, 0x01), (0x3, 3, 0x10), (0x1, 5, 0x12), (0x2, 5, 0x21),
    (0x3, 5, 0x20), (0x0, 6, 0x22), (0x1, 6, 0x02),
];

pub(super) const HUFF_3: [(u32, u8, u8); 9] = [
    (0x1, 2, 0x11), (0x2, 2, 0x01), (0x3, 2, 0x00), (0x1, 3, 0x10), (0x1, 5, 0x12), (0x2, 5, 0x21),
    (0x3, 5, 0x20), (0x0, 6, 0x22), (0x1, 6, 0x02),
];

pub(super) const HUFF_5: [(u32, u8, u8); 16] = [
    (0x1, 1, 0x00), (0x1, 3, 0x11), (0x2, 3, 0x01), (0x3, 3, 0x10), (0x1, 6, 0x31), (0x4, 6, 0x12),
    (0x5, 6, 0x21), (0x6, 6, 0x02), (0x7, 6, 0x20), (0x1, 7, 0x32), (0x4, 7, 0x13), (0x5, 7, 0x03),
    (0x6, 7, 0x30), (0x7, 7, 0x22), (0x0, 8, 0x33), (0x1, 8, 0x23),
];

pub(super) const HUFF_6: [(u32, u8, u8); 16] = [
    (0x2, 2, 0x11), (0x3, 3, 0x01), (0x6, 3, 0x10), (0x7, 3, 0x00), (0x3, 4, 0x12), (0x4, 4, 0x21),
    (0x5, 4, 0x20), (0x2, 5, 0x13), (0x3, 5, 0x31), (0x4, 5, 0x22), (0x5, 5, 0x02), (0x1, 6, 0x23),
    (0x2, 6, 0x32), (0x3, 6, 0x30), (0x0, 7, 0x33), (0x1, 7, 0x03),
];

pub(super) const HUFF_7: [(u32, u8, u8); 36] = [
    (0x1, 1, 0x00), (0x2, 3, 0x01), (0x3, 3, 0x10), (0x3, 4, 0x11), (0x4, 5, 0x21), (0x7, 6, 0x12),
    (0xa, 6, 0x02), (0xb, 6, 0x20), (0x5, 7, 0x14), (0x6, 7, 0x41), (0x7, 7, 0x40), (0xa, 7, 0x13),
    (0xb, 7, 0x31), (0xc, 7, 0x30), (0xd, 7, 0x22), (0x3, 8, 0x15), (0x4, 8, 0x51), (0x6, 8, 0x50),
    (0x8, 8, 0x24), (0x9, 8, 0x42), (0x10, 8, 0x04), (0x11, 8, 0x23), (0x12, 8, 0x32), (0x13, 8, 0x03),
    (0x2, 9, 0x35), (0x3, 9, 0x44), (0x4, 9, 0x25), (0x5, 9, 0x52), (0xa, 9, 0x05), (0xb, 9, 0x34),
    (0xe, 9, 0x43), (0xf, 9, 0x33), (0x0, 10, 0x55), (0x1, 10, 0x45), (0x2, 10, 0x54), (0x3, 10, 0x53),
];

pub(super) const HUFF_8: [(u32, u8, u8); 36] = [
    (0x1, 2, 0x11), (0x3, 2, 0x00), (0x4, 3, 0x01), (0x5, 3, 0x10), (0x2, 4, 0x12), (0x3, 4, 0x21),
    (0x5, 6, 0x22), (0x6, 6, 0x02), (0x7, 6, 0x20), (0x5, 7, 0x41), (0x3, 8, 0x15), (0x4, 8, 0x51),
    (0x7, 8, 0x24), (0x8, 8, 0x42), (0x9, 8, 0x14), (0xc, 8, 0x04), (0xd, 8, 0x40), (0xe, 8, 0x23),
    (0xf, 8, 0x32), (0x10, 8, 0x13), (0x11, 8, 0x31), (0x12, 8, 0x03), (0x13, 8, 0x30), (0x1, 9, 0x53),
    (0x3, 9, 0x25), (0x4, 9, 0x52), (0x5, 9, 0x05), (0xa, 9, 0x34), (0xb, 9, 0x43), (0xc, 9, 0x50),
    (0xd, 9, 0x33), (0x1, 10, 0x45), (0x4, 10, 0x35), (0x5, 10, 0x44), (0x0, 11, 0x55), (0x1, 11, 0x54),
];

pub(super) const HUFF_9: [(u32, u8, u8); 36] = [
    (0x4, 3, 0x11), (0x5, 3, 0x01), (0x6, 3, 0x10), (0x7, 3, 0x00), (0x5, 4, 0x12), (0x6, 4, 0x21),
    (0x7, 4, 0x20), (0x5, 5, 0x13), (0x6, 5, 0x31), (0x8, 5, 0x22), (0x9, 5, 0x02), (0x6, 6, 0x14),
    (0x7, 6, 0x41), (0x8, 6, 0x23), (0x9, 6, 0x32), (0xe, 6, 0x03), (0xf, 6, 0x30), (0x4, 7, 0x51),
    (0x5, 7, 0x34), (0x6, 7, 0x43), (0x8, 7, 0x24), (0x9, 7, 0x42), (0xa, 7, 0x33), (0xb, 7, 0x40),
    (0x1, 8, 0x35), (0x2, 8, 0x53), (0x4, 8, 0x44), (0x5, 8, 0x25), (0x6, 8, 0x52), (0x7, 8, 0x15),
    (0xe, 8, 0x50), (0xf, 8, 0x04), (0x0, 9, 0x55), (0x1, 9, 0x45), (0x6, 9, 0x54), (0x7, 9, 0x05),
];

pub(super) const HUFF_10: [(u32, u8, u8); 64] = [
    (0x1, 1, 0x00), (0x2, 3, 0x01), (0x3, 3, 0x10), (0x3, 4, 0x11), (0x8, 6, 0x12), (0x9, 6, 0x21),
    (0xa, 6, 0x02), (0xb, 6, 0x20), (0xc, 7, 0x13), (0xd, 7, 0x31), (0xe, 7, 0x30), (0xf, 7, 0x22),
    (0x7, 8, 0x17), (0x8, 8, 0x71), (0xc, 8, 0x16), (0xd, 8, 0x61), (0xe, 8, 0x60), (0x12, 8, 0x14),
    (0x13, 8, 0x41), (0x14, 8, 0x40), (0x15, 8, 0x23), (0x16, 8, 0x32), (0x17, 8, 0x03), (0x6, 9, 0x27),
    (0x7, 9, 0x72), (0x9, 9, 0x70), (0xa, 9, 0x62), (0xc, 9, 0x06), (0x12, 9, 0x36), (0x13, 9, 0x26),
    (0x15, 9, 0x15), (0x16, 9, 0x51), (0x1e, 9, 0x05), (0x1f, 9, 0x50), (0x20, 9, 0x24), (0x21, 9, 0x42),
    (0x22, 9, 0x33), (0x23, 9, 0x04), (0x3, 10, 0x47), (0x4, 10, 0x74), (0x5, 10, 0x56), (0x6, 10, 0x65),
    (0x7, 10, 0x37), (0x8, 10, 0x73), (0x9, 10, 0x46), (0xb, 10, 0x63), (0x10, 10, 0x64), (0x11, 10, 0x07),
    (0x16, 10, 0x45), (0x17, 10, 0x35), (0x1a, 10, 0x53), (0x1b, 10, 0x44), (0x28, 10, 0x25), (0x29, 10, 0x52),
    (0x2e, 10, 0x34), (0x2f, 10, 0x43), (0x0, 11, 0x77), (0x1, 11, 0x67), (0x2, 11, 0x76), (0x3, 11, 0x57),
    (0x4, 11, 0x75), (0x5, 11, 0x66), (0x14, 11, 0x55), (0x15, 11, 0x54),
];

pub(super) const HUFF_11: [(u32, u8, u8); 64] = [
    (0x3, 2, 0x00), (0x3, 3, 0x11), (0x4, 3, 0x01), (0x5, 3, 0x10), (0x4, 4, 0x12), (0x7, 5, 0x21),
    (0xa, 5, 0x02), (0xb, 5, 0x20), (0xa, 6, 0x13), (0xb, 6, 0x31), (0xd, 6, 0x22), (0x4, 7, 0x71),
    (0x9, 7, 0x62), (0xb, 7, 0x16), (0xc, 7, 0x61), (0x12, 7, 0x23), (0x13, 7, 0x32), (0x18, 7, 0x03),
    (0x19, 7, 0x30), (0x5, 8, 0x27), (0x6, 8, 0x72), (0xa, 8, 0x17), (0xb, 8, 0x70), (0xc, 8, 0x36),
    (0xd, 8, 0x63), (0xe, 8, 0x60), (0x11, 8, 0x15), (0x14, 8, 0x26), (0x15, 8, 0x06), (0x1a, 8, 0x51),
    (0x1b, 8, 0x34), (0x1c, 8, 0x50), (0x1e, 8, 0x24), (0x1f, 8, 0x42), (0x20, 8, 0x14), (0x21, 8, 0x41),
    (0x22, 8, 0x04), (0x23, 8, 0x40), (0x5, 9, 0x37), (0x6, 9, 0x73), (0x7, 9, 0x46), (0xe, 9, 0x64),
    (0xf, 9, 0x07), (0x1e, 9, 0x44), (0x1f, 9, 0x25), (0x20, 9, 0x52), (0x21, 9, 0x05), (0x3a, 9, 0x43),
    (0x3b, 9, 0x33), (0x0, 10, 0x77), (0x1, 10, 0x67), (0x2, 10, 0x76), (0x3, 10, 0x75), (0x4, 10, 0x66),
    (0x5, 10, 0x47), (0x6, 10, 0x74), (0x8, 10, 0x56), (0x9, 10, 0x65), (0x10, 10, 0x45), (0x11, 10, 0x54),
    (0x12, 10, 0x35), (0x13, 10, 0x53), (0xe, 11, 0x57), (0xf, 11, 0x55),
];

pub(super) const HUFF_12: [(u32, u8, u8); 64] = [
    (0x5, 3, 0x11), (0x6, 3, 0x01), (0x7, 3, 0x10), (0x6, 4, 0x12), (0x7, 4, 0x21), (0x9, 4, 0x00),
    (0x9, 5, 0x13), (0xa, 5, 0x31), (0xb, 5, 0x22), (0x10, 5, 0x02), (0x11, 5, 0x20), (0xc, 6, 0x33),
    (0xd, 6, 0x41), (0xe, 6, 0x23), (0xf, 6, 0x32), (0x11, 6, 0x30), (0xa, 7, 0x26), (0xb, 7, 0x62),
    (0xc, 7, 0x61), (0x10, 7, 0x15), (0x11, 7, 0x51), (0x12, 7, 0x34), (0x13, 7, 0x43), (0x15, 7, 0x24),
    (0x16, 7, 0x42), (0x17, 7, 0x14), (0x20, 7, 0x40), (0x21, 7, 0x03), (0x4, 8, 0x56), (0x5, 8, 0x37),
    (0x7, 8, 0x27), (0x8, 8, 0x72), (0x9, 8, 0x46), (0xa, 8, 0x64), (0xb, 8, 0x17), (0xc, 8, 0x71),
    (0xe, 8, 0x36), (0xf, 8, 0x63), (0x10, 8, 0x45), (0x11, 8, 0x54), (0x12, 8, 0x44), (0x1a, 8, 0x16),
    (0x1b, 8, 0x60), (0x1c, 8, 0x35), (0x1d, 8, 0x53), (0x1e, 8, 0x25), (0x1f, 8, 0x52), (0x28, 8, 0x50),
    (0x29, 8, 0x04), (0x1, 9, 0x76), (0x2, 9, 0x57), (0x3, 9, 0x75), (0x4, 9, 0x66), (0x5, 9, 0x47),
    (0x6, 9, 0x74), (0x7, 9, 0x65), (0xc, 9, 0x73), (0xd, 9, 0x55), (0x1a, 9, 0x07), (0x1b, 9, 0x70),
    (0x26, 9, 0x06), (0x27, 9, 0x05), (0x0, 10, 0x77), (0x1, 10, 0x67),
];

pub(super) const HUFF_13: [(u32, u8, u8); 256] = [
    (0x1, 1, 0x00), (0x3, 3, 0x10), (0x4, 4, 0x11), (0x5, 4, 0x01), (0xc, 6, 0x12), (0xd, 6, 0x21),
    (0xe, 6, 0x02), (0xf, 6, 0x20), (0x10, 7, 0x41), (0x13, 7, 0x13), (0x14, 7, 0x31), (0x15, 7, 0x03),
    (0x16, 7, 0x30), (0x17, 7, 0x22), (0x14, 8, 0x81), (0x1a, 8, 0x15), (0x1b, 8, 0x51), (0x1f, 8, 0x14),
    (0x22, 8, 0x04), (0x23, 8, 0x40), (0x24, 8, 0x23), (0x25, 8, 0x32), (0x18, 9, 0x19), (0x19, 9, 0x91),
    (0x1d, 9, 0x28), (0x1e, 9, 0x82), (0x1f, 9, 0x18), (0x21, 9, 0x17), (0x22, 9, 0x71), (0x2a, 9, 0x08),
    (0x2b, 9, 0x80), (0x2c, 9, 0x16), (0x2d, 9, 0x61), (0x2e, 9, 0x06), (0x2f, 9, 0x60), (0x31, 9, 0x25),
    (0x32, 9, 0x52), (0x33, 9, 0x05), (0x38, 9, 0x34), (0x39, 9, 0x43), (0x3a, 9, 0x50), (0x3b, 9, 0x24),
    (0x3c, 9, 0x42), (0x3d, 9, 0x33), (0x17, 10, 0xb2), (0x18, 10, 0x1b), (0x19, 10, 0xb1), (0x1e, 10, 0x2a),
    (0x1f, 10, 0xa2), (0x20, 10, 0x1a), (0x21, 10, 0xa1), (0x23, 10, 0xa0), (0x25, 10, 0x93), (0x28, 10, 0x29),
    (0x29, 10, 0x92), (0x2b, 10, 0x38), (0x2c, 10, 0x83), (0x34, 10, 0x09), (0x35, 10, 0x90), (0x36, 10, 0x48),
    (0x37, 10, 0x84), (0x38, 10, 0x72), (0x40, 10, 0x37), (0x41, 10, 0x27), (0x46, 10, 0x55), (0x47, 10, 0x07),
    (0x48, 10, 0x70), (0x49, 10, 0x36), (0x4a, 10, 0x63), (0x4b, 10, 0x45), (0x4c, 10, 0x54), (0x4d, 10, 0x26),
    (0x4e, 10, 0x62), (0x4f, 10, 0x35), (0x60, 10, 0x53), (0x61, 10, 0x44), (0x15, 11, 0xd1), (0x1a, 11, 0x3c),
    (0x1b, 11, 0x2c), (0x1c, 11, 0xc2), (0x1d, 11, 0x5b), (0x1f, 11, 0x1c), (0x20, 11, 0xc1), (0x22, 11, 0xc0),
    (0x25, 11, 0x3b), (0x26, 11, 0xb3), (0x28, 11, 0x2b), (0x2a, 11, 0xa4), (0x2c, 11, 0x94), (0x34, 11, 0x0b),
    (0x35, 11, 0xb0), (0x36, 11, 0x96), (0x37, 11, 0x4a), (0x38, 11, 0x3a), (0x39, 11, 0xa3), (0x3a, 11, 0x59),
    (0x3b, 11, 0x95), (0x44, 11, 0x0a), (0x45, 11, 0x68), (0x48, 11, 0x86), (0x49, 11, 0x49), (0x4c, 11, 0x39),
    (0x4d, 11, 0x58), (0x4e, 11, 0x85), (0x4f, 11, 0x67), (0x54, 11, 0x57), (0x55, 11, 0x75), (0x5a, 11, 0x66),
    (0x5b, 11, 0x47), (0x5c, 11, 0x74), (0x5d, 11, 0x56), (0x5e, 11, 0x65), (0x5f, 11, 0x73), (0x72, 11, 0x46),
    (0x73, 11, 0x64), (0xe, 12, 0x1f), (0xf, 12, 0xf1), (0x10, 12, 0xf0), (0x14, 12, 0xe2), (0x16, 12, 0x1e),
    (0x17, 12, 0xe1), (0x1e, 12, 0xc6), (0x1f, 12, 0x3d), (0x21, 12, 0x2d), (0x22, 12, 0xd2), (0x23, 12, 0x1d),
    (0x24, 12, 0xb7), (0x27, 12, 0xc3), (0x29, 12, 0x4b), (0x2c, 12, 0x0d), (0x2d, 12, 0xd0), (0x2e, 12, 0x8a),
    (0x2f, 12, 0xa8), (0x30, 12, 0x4c), (0x31, 12, 0xc4), (0x32, 12, 0x6b), (0x33, 12, 0xb6), (0x3c, 12, 0xb5),
    (0x3d, 12, 0x89), (0x42, 12, 0x98), (0x43, 12, 0x0c), (0x46, 12, 0xb4), (0x47, 12, 0x6a), (0x48, 12, 0xa6),
    (0x49, 12, 0x79), (0x4e, 12, 0x88), (0x4f, 12, 0x5a), (0x52, 12, 0xa5), (0x53, 12, 0x69), (0x56, 12, 0x78),
    (0x57, 12, 0x87), (0x5a, 12, 0x77), (0x5b, 12, 0x76), (0xe, 13, 0x3f), (0x10, 13, 0x2f), (0x11, 13, 0xf2),
    (0x13, 13, 0x0f), (0x15, 13, 0xab), (0x17, 13, 0x4e), (0x19, 13, 0x3e), (0x1a, 13, 0xb9), (0x22, 13, 0xba),
    (0x23, 13, 0xe5), (0x24, 13, 0xe4), (0x25, 13, 0x8c), (0x26, 13, 0x6d), (0x27, 13, 0xe3), (0x2a, 13, 0x2e),
    (0x2b, 13, 0x0e), (0x30, 13, 0xe0), (0x31, 13, 0x5d), (0x32, 13, 0xd5), (0x33, 13, 0x7c), (0x34, 13, 0xc7),
    (0x35, 13, 0x4d), (0x36, 13, 0x8b), (0x37, 13, 0xb8), (0x38, 13, 0xd4), (0x39, 13, 0x9a), (0x3a, 13, 0xa9),
    (0x3b, 13, 0x6c), (0x40, 13, 0xd3), (0x41, 13, 0x7b), (0x4a, 13, 0x5c), (0x4b, 13, 0xc5), (0x4c, 13, 0x99),
    (0x4d, 13, 0x7a), (0x50, 13, 0xa7), (0x51, 13, 0x97), (0xb, 14, 0xf7), (0xc, 14, 0xda), (0xf, 14, 0x6f),
    (0x10, 14, 0xe8), (0x11, 14, 0x5f), (0x12, 14, 0x9d), (0x13, 14, 0xd9), (0x14, 14, 0xf5), (0x15, 14, 0xe7),
    (0x16, 14, 0xac), (0x17, 14, 0xbb), (0x18, 14, 0x4f), (0x19, 14, 0xf4), (0x1b, 14, 0xf3), (0x1e, 14, 0x8d),
    (0x1f, 14, 0xd8), (0x24, 14, 0x6e), (0x25, 14, 0x9c), (0x28, 14, 0xc9), (0x29, 14, 0x5e), (0x2c, 14, 0x7d),
    (0x2d, 14, 0xd7), (0x30, 14, 0xc8), (0x31, 14, 0xd6), (0x36, 14, 0x9b), (0x37, 14, 0xaa), (0x6, 15, 0xec),
    (0x7, 15, 0xdd), (0x9, 15, 0xbe), (0xa, 15, 0xeb), (0xb, 15, 0x9f), (0xc, 15, 0xf9), (0xd, 15, 0xea),
    (0xe, 15, 0xbd), (0xf, 15, 0xdb), (0x10, 15, 0x8f), (0x11, 15, 0xf8), (0x12, 15, 0xcc), (0x14, 15, 0x8e),
    (0x1a, 15, 0xad), (0x1b, 15, 0xbc), (0x1c, 15, 0xcb), (0x1d, 15, 0xf6), (0x34, 15, 0xca), (0x35, 15, 0xe6),
    (0x1, 16, 0xff), (0x2, 16, 0xef), (0x3, 16, 0xdf), (0x4, 16, 0xee), (0x5, 16, 0xcf), (0x6, 16, 0xde),
    (0x7, 16, 0xbf), (0x8, 16, 0xfb), (0x9, 16, 0xce), (0xa, 16, 0xdc), (0x10, 16, 0xfa), (0x11, 16, 0xcd),
    (0x26, 16, 0xae), (0x27, 16, 0x9e), (0x2a, 16, 0x7f), (0x2b, 16, 0x7e), (0x1, 17, 0xed), (0x16, 17, 0xaf),
    (0x17, 17, 0xe9), (0x1, 18, 0xfd), (0x0, 19, 0xfe), (0x1, 19, 0xfc),
];

pub(super) const HUFF_15: [(u32, u8, u8); 256] = [
    (0x5, 3, 0x11), (0x7, 3, 0x00), (0xc, 4, 0x01), (0xd, 4, 0x10), (0xf, 5, 0x22), (0x10, 5, 0x12),
    (0x11, 5, 0x21), (0x12, 5, 0x02), (0x13, 5, 0x20), (0x16, 6, 0x41), (0x18, 6, 0x23), (0x19, 6, 0x32),
    (0x1b, 6, 0x13), (0x1c, 6, 0x31), (0x1d, 6, 0x30), (0x20, 7, 0x61), (0x22, 7, 0x25), (0x23, 7, 0x52),
    (0x24, 7, 0x15), (0x25, 7, 0x51), (0x27, 7, 0x34), (0x28, 7, 0x43), (0x29, 7, 0x24), (0x2a, 7, 0x42),
    (0x2b, 7, 0x33), (0x2e, 7, 0x14), (0x2f, 7, 0x04), (0x34, 7, 0x40), (0x35, 7, 0x03), (0x22, 8, 0x91),
    (0x28, 8, 0x28), (0x29, 8, 0x82), (0x2a, 8, 0x18), (0x2b, 8, 0x81), (0x30, 8, 0x27), (0x31, 8, 0x72),
    (0x32, 8, 0x64), (0x33, 8, 0x17), (0x34, 8, 0x55), (0x35, 8, 0x71), (0x37, 8, 0x36), (0x38, 8, 0x63),
    (0x39, 8, 0x45), (0x3a, 8, 0x54), (0x3b, 8, 0x26), (0x3c, 8, 0x62), (0x3d, 8, 0x16), (0x3f, 8, 0x35),
    (0x42, 8, 0x53), (0x43, 8, 0x44), (0x4c, 8, 0x05), (0x4d, 8, 0x50), (0x1e, 9, 0xc2), (0x25, 9, 0xb3),
    (0x28, 9, 0xb2), (0x2a, 9, 0xb1), (0x2f, 9, 0xa3), (0x30, 9, 0x59), (0x31, 9, 0x95), (0x32, 9, 0x2a),
    (0x33, 9, 0xa2), (0x34, 9, 0x1a), (0x35, 9, 0xa1), (0x37, 9, 0x68), (0x38, 9, 0x86), (0x39, 9, 0x49),
    (0x3a, 9, 0x94), (0x3b, 9, 0x39), (0x3c, 9, 0x93), (0x3e, 9, 0x58), (0x3f, 9, 0x85), (0x40, 9, 0x29),
    (0x41, 9, 0x67), (0x42, 9, 0x76), (0x43, 9, 0x92), (0x46, 9, 0x19), (0x47, 9, 0x90), (0x48, 9, 0x48),
    (0x49, 9, 0x84), (0x4a, 9, 0x57), (0x4b, 9, 0x75), (0x4c, 9, 0x38), (0x4d, 9, 0x83), (0x4e, 9, 0x66),
    (0x4f, 9, 0x47), (0x58, 9, 0x74), (0x59, 9, 0x08), (0x5a, 9, 0x80), (0x5b, 9, 0x56), (0x5c, 9, 0x65),
    (0x5d, 9, 0x37), (0x5e, 9, 0x73), (0x5f, 9, 0x46), (0x6c, 9, 0x07), (0x6d, 9, 0x70), (0x7c, 9, 0x06),
    (0x7d, 9, 0x60), (0x22, 10, 0xd4), (0x26, 10, 0xd3), (0x27, 10, 0xd2), (0x29, 10, 0x1d), (0x2a, 10, 0x7b),
    (0x2b, 10, 0xb7), (0x2c, 10, 0xd1), (0x2e, 10, 0xc5), (0x2f, 10, 0x8a), (0x30, 10, 0xa8), (0x31, 10, 0x4c),
    (0x32, 10, 0xc4), (0x33, 10, 0x6b), (0x34, 10, 0xb6), (0x36, 10, 0x3c), (0x37, 10, 0xc3), (0x38, 10, 0x7a),
    (0x39, 10, 0xa7), (0x3a, 10, 0xa6), (0x3e, 10, 0x2c), (0x3f, 10, 0x5b), (0x40, 10, 0xb5), (0x41, 10, 0x1c),
    (0x42, 10, 0x89), (0x43, 10, 0x98), (0x44, 10, 0xc1), (0x45, 10, 0x4b), (0x46, 10, 0xb4), (0x47, 10, 0x6a),
    (0x48, 10, 0x3b), (0x49, 10, 0x79), (0x4c, 10, 0x97), (0x4d, 10, 0x88), (0x4e, 10, 0x2b), (0x4f, 10, 0x5a),
    (0x52, 10, 0xa5), (0x53, 10, 0x1b), (0x56, 10, 0xb0), (0x57, 10, 0x69), (0x58, 10, 0x96), (0x59, 10, 0x4a),
    (0x5a, 10, 0xa4), (0x5b, 10, 0x78), (0x5c, 10, 0x87), (0x5d, 10, 0x3a), (0x6c, 10, 0x0a), (0x6d, 10, 0xa0),
    (0x7a, 10, 0x77), (0x7b, 10, 0x09), (0x10, 11, 0xcb), (0x11, 11, 0xf6), (0x14, 11, 0xf5), (0x15, 11, 0x7e),
    (0x16, 11, 0xe7), (0x17, 11, 0xac), (0x18, 11, 0xca), (0x19, 11, 0xbb), (0x1b, 11, 0x4f), (0x1c, 11, 0xf4),
    (0x1d, 11, 0x3f), (0x1e, 11, 0xf3), (0x1f, 11, 0xd8), (0x20, 11, 0xe6), (0x21, 11, 0x2f), (0x22, 11, 0xf2),
    (0x24, 11, 0x1f), (0x25, 11, 0xf1), (0x26, 11, 0x9c), (0x27, 11, 0xc9), (0x28, 11, 0x5e), (0x29, 11, 0xab),
    (0x2a, 11, 0xba), (0x2b, 11, 0xe5), (0x2c, 11, 0x7d), (0x2d, 11, 0xd7), (0x2e, 11, 0x4e), (0x2f, 11, 0xe4),
    (0x30, 11, 0x8c), (0x31, 11, 0xc8), (0x32, 11, 0x3e), (0x33, 11, 0x6d), (0x34, 11, 0xd6), (0x35, 11, 0xe3),
    (0x36, 11, 0x9b), (0x37, 11, 0xb9), (0x38, 11, 0x2e), (0x39, 11, 0xaa), (0x3a, 11, 0xe2), (0x3b, 11, 0x1e),
    (0x3c, 11, 0xe1), (0x3e, 11, 0x5d), (0x3f, 11, 0xd5), (0x40, 11, 0x7c), (0x41, 11, 0xc7), (0x42, 11, 0x4d),
    (0x43, 11, 0x8b), (0x46, 11, 0xb8), (0x47, 11, 0x9a), (0x48, 11, 0xa9), (0x49, 11, 0x6c), (0x4a, 11, 0xc6),
    (0x4b, 11, 0x3d), (0x50, 11, 0x2d), (0x51, 11, 0x0d), (0x5a, 11, 0x5c), (0x5b, 11, 0xd0), (0x6a, 11, 0x99),
    (0x6b, 11, 0x0c), (0x76, 11, 0xc0), (0x77, 11, 0x0b), (0x2, 12, 0xee), (0x6, 12, 0xfb), (0x8, 12, 0xdd),
    (0x9, 12, 0xaf), (0xa, 12, 0xfa), (0xb, 12, 0xbe), (0xc, 12, 0xeb), (0xd, 12, 0xcd), (0xe, 12, 0xdc),
    (0xf, 12, 0x9f), (0x10, 12, 0xf9), (0x11, 12, 0xea), (0x12, 12, 0xbd), (0x13, 12, 0xdb), (0x14, 12, 0x8f),
    (0x15, 12, 0xf8), (0x16, 12, 0xcc), (0x17, 12, 0x9e), (0x18, 12, 0xe9), (0x19, 12, 0x7f), (0x1a, 12, 0xf7),
    (0x1b, 12, 0xad), (0x1c, 12, 0xda), (0x1d, 12, 0xbc), (0x1e, 12, 0x6f), (0x24, 12, 0x8e), (0x25, 12, 0xe8),
    (0x26, 12, 0x5f), (0x27, 12, 0x9d), (0x34, 12, 0xd9), (0x35, 12, 0x8d), (0x46, 12, 0x6e), (0x47, 12, 0xf0),
    (0x7a, 12, 0x0e), (0x7b, 12, 0xe0), (0x0, 13, 0xff), (0x1, 13, 0xef), (0x2, 13, 0xfe), (0x3, 13, 0xdf),
    (0x6, 13, 0xfd), (0x7, 13, 0xcf), (0x8, 13, 0xfc), (0x9, 13, 0xde), (0xa, 13, 0xed), (0xb, 13, 0xbf),
    (0xe, 13, 0xce), (0xf, 13, 0xec), (0x3e, 13, 0xae), (0x3f, 13, 0x0f),
];

pub(super) const HUFF_16: [(u32, u8, u8); 256] = [
    (0x1, 1, 0x00), (0x3, 3, 0x10), (0x4, 4, 0x11), (0x5, 4, 0x01), (0xc, 6, 0x12), (0xd, 6, 0x21),
    (0xe, 6, 0x02), (0xf, 6, 0x20), (0x14, 7, 0x13), (0x15, 7, 0x31), (0x17, 7, 0x22), (0x3, 8, 0xff),
    (0x7, 8, 0xf2), (0x9, 8, 0x1f), (0xa, 8, 0xf1), (0x1e, 8, 0x51), (0x23, 8, 0x14), (0x24, 8, 0x41),
    (0x26, 8, 0x23), (0x27, 8, 0x32), (0x2c, 8, 0x03), (0x2d, 8, 0x30), (0x9, 9, 0x4f), (0xa, 9, 0xf4),
    (0xb, 9, 0xf3), (0xc, 9, 0xf0), (0x10, 9, 0x2f), (0x11, 9, 0x0f), (0x2f, 9, 0x17), (0x30, 9, 0x71),
    (0x34, 9, 0x62), (0x35, 9, 0x16), (0x36, 9, 0x61), (0x38, 9, 0x53), (0x3a, 9, 0x25), (0x3b, 9, 0x52),
    (0x3e, 9, 0x15), (0x3f, 9, 0x05), (0x40, 9, 0x34), (0x41, 9, 0x43), (0x42, 9, 0x50), (0x43, 9, 0x24),
    (0x44, 9, 0x42), (0x45, 9, 0x33), (0x4a, 9, 0x04), (0x4b, 9, 0x40), (0x4, 10, 0xaf), (0x7, 10, 0x8f),
    (0x8, 10, 0x7f), (0x9, 10, 0xf7), (0xa, 10, 0x6f), (0xb, 10, 0xf6), (0x10, 10, 0x5f), (0x11, 10, 0xf5),
    (0x1a, 10, 0x3f), (0x43, 10, 0xa2), (0x44, 10, 0x1a), (0x48, 10, 0x29), (0x49, 10, 0x92), (0x4b, 10, 0x19),
    (0x4c, 10, 0x91), (0x51, 10, 0x82), (0x53, 10, 0x18), (0x54, 10, 0x81), (0x55, 10, 0x80), (0x57, 10, 0x37),
    (0x58, 10, 0x73), (0x5a, 10, 0x27), (0x5b, 10, 0x72), (0x5d, 10, 0x07), (0x62, 10, 0x70), (0x63, 10, 0x36),
    (0x64, 10, 0x63), (0x65, 10, 0x45), (0x66, 10, 0x54), (0x67, 10, 0x26), (0x6e, 10, 0x06), (0x6f, 10, 0x60),
    (0x72, 10, 0x35), (0x73, 10, 0x44), (0x0, 11, 0xef), (0x1, 11, 0xfe), (0x2, 11, 0xdf), (0x3, 11, 0xfd),
    (0x4, 11, 0xcf), (0x5, 11, 0xfc), (0x6, 11, 0xbf), (0x7, 11, 0xfb), (0xa, 11, 0xfa), (0xb, 11, 0x9f),
    (0xc, 11, 0xf9), (0xd, 11, 0xf8), (0x66, 11, 0xe2), (0x6b, 11, 0x1d), (0x6e, 11, 0x2c), (0x73, 11, 0xb3),
    (0x75, 11, 0x2b), (0x76, 11, 0xb2), (0x77, 11, 0x1b), (0x78, 11, 0xb1), (0x7d, 11, 0xa3), (0x7f, 11, 0x2a),
    (0x81, 11, 0xa1), (0x83, 11, 0x94), (0x85, 11, 0x67), (0x8a, 11, 0x0a), (0x8b, 11, 0xa0), (0x8c, 11, 0x39),
    (0x8d, 11, 0x93), (0x8e, 11, 0x58), (0x8f, 11, 0x85), (0x94, 11, 0x76), (0x95, 11, 0x09), (0x9a, 11, 0x90),
    (0x9b, 11, 0x48), (0x9c, 11, 0x84), (0x9d, 11, 0x75), (0x9e, 11, 0x38), (0x9f, 11, 0x83), (0xa0, 11, 0x66),
    (0xa1, 11, 0x28), (0xa4, 11, 0x47), (0xa5, 11, 0x74), (0xac, 11, 0x08), (0xad, 11, 0x56), (0xb2, 11, 0x65),
    (0xb3, 11, 0x46), (0xb8, 11, 0x64), (0xb9, 11, 0x55), (0xbb, 12, 0xe3), (0xc3, 12, 0x0d), (0xc7, 12, 0x3c),
    (0xc9, 12, 0x1c), (0xca, 12, 0xc0), (0xce, 12, 0x2e), (0xcf, 12, 0x1e), (0xd0, 12, 0xd3), (0xd1, 12, 0x2d),
    (0xd2, 12, 0xd2), (0xd3, 12, 0xd1), (0xd4, 12, 0x3b), (0xd8, 12, 0xc4), (0xd9, 12, 0x6b), (0xda, 12, 0xc3),
    (0xdb, 12, 0xa7), (0xde, 12, 0xc2), (0xdf, 12, 0xb5), (0xe0, 12, 0xc1), (0xe1, 12, 0x0c), (0xe2, 12, 0x4b),
    (0xe3, 12, 0xb4), (0xe4, 12, 0x6a), (0xe5, 12, 0xa6), (0xe8, 12, 0x5a), (0xe9, 12, 0xa5), (0xf2, 12, 0x0b),
    (0xf3, 12, 0xb0), (0xf4, 12, 0x69), (0xf5, 12, 0x96), (0xf6, 12, 0x4a), (0xf7, 12, 0xa4), (0xf8, 12, 0x78),
    (0xf9, 12, 0x87), (0xfc, 12, 0x3a), (0xfd, 12, 0x59), (0x100, 12, 0x95), (0x101, 12, 0x68), (0x104, 12, 0x86),
    (0x105, 12, 0x77), (0x108, 12, 0x49), (0x109, 12, 0x57), (0xdf, 13, 0xbd), (0x160, 13, 0x9e), (0x166, 13, 0xe6),
    (0x167, 13, 0x9c), (0x16a, 13, 0x4e), (0x16c, 13, 0xc8), (0x16d, 13, 0x3e), (0x16e, 13, 0x6d), (0x171, 13, 0xe1),
    (0x172, 13, 0xd4), (0x174, 13, 0x7b), (0x178, 13, 0x0e), (0x179, 13, 0xe0), (0x17a, 13, 0x5d), (0x17b, 13, 0xd5),
    (0x17c, 13, 0x7c), (0x17d, 13, 0xc7), (0x17e, 13, 0x4d), (0x17f, 13, 0x8b), (0x180, 13, 0x9a), (0x181, 13, 0x6c),
    (0x182, 13, 0xc6), (0x183, 13, 0x3d), (0x184, 13, 0x5c), (0x185, 13, 0xc5), (0x188, 13, 0x8a), (0x189, 13, 0xa8),
    (0x18a, 13, 0x99), (0x18b, 13, 0x4c), (0x18c, 13, 0xb6), (0x18d, 13, 0x7a), (0x190, 13, 0x5b), (0x191, 13, 0x89),
    (0x196, 13, 0x98), (0x197, 13, 0x79), (0x1aa, 13, 0x97), (0x1ab, 13, 0x88), (0x1b2, 14, 0xee), (0x1b4, 14, 0xbe),
    (0x1b5, 14, 0xcd), (0x1b7, 14, 0xae), (0x1b8, 14, 0xcc), (0x1bb, 14, 0xca), (0x1bd, 14, 0x5e), (0x2c2, 14, 0xbc),
    (0x2c3, 14, 0xcb), (0x2c4, 14, 0x8e), (0x2c5, 14, 0xe8), (0x2c6, 14, 0x9d), (0x2c7, 14, 0xe7), (0x2c8, 14, 0xbb),
    (0x2c9, 14, 0x8d), (0x2ca, 14, 0xd8), (0x2cb, 14, 0x6e), (0x2d0, 14, 0xab), (0x2d1, 14, 0xba), (0x2d2, 14, 0xe5),
    (0x2d3, 14, 0xd7), (0x2d6, 14, 0xe4), (0x2d7, 14, 0x8c), (0x2de, 14, 0xd6), (0x2df, 14, 0x9b), (0x2e0, 14, 0xb9),
    (0x2e1, 14, 0xaa), (0x2e6, 14, 0xb8), (0x2e7, 14, 0xa9), (0x2ea, 14, 0xb7), (0x2eb, 14, 0xd0), (0x361, 15, 0xde),
    (0x362, 15, 0xe9), (0x366, 15, 0xed), (0x367, 15, 0xeb), (0x36c, 15, 0xdc), (0x36d, 15, 0xdb), (0x372, 15, 0xad),
    (0x373, 15, 0xda), (0x374, 15, 0x7e), (0x375, 15, 0xac), (0x378, 15, 0xc9), (0x379, 15, 0x7d), (0x6c0, 16, 0xce),
    (0x6c6, 16, 0xea), (0x6c7, 16, 0xd9), (0xd82, 17, 0xec), (0xd83, 17, 0xdd),
];

pub(super) const HUFF_24: [(u32, u8, u8); 256] = [
    (0x3, 4, 0xff), (0xc, 4, 0x11), (0xd, 4, 0x01), (0xe, 4, 0x10), (0xf, 4, 0x00), (0x15, 5, 0x12),
    (0x16, 5, 0x21), (0x26, 6, 0x13), (0x27, 6, 0x31), (0x29, 6, 0x22), (0x2e, 6, 0x02), (0x2f, 6, 0x20),
    (0x4, 7, 0xfa), (0x6, 7, 0xf9), (0x7, 7, 0xf8), (0x9, 7, 0xf7), (0xa, 7, 0x6f), (0xb, 7, 0xf6),
    (0xc, 7, 0x5f), (0xd, 7, 0xf5), (0xe, 7, 0x4f), (0xf, 7, 0xf4), (0x10, 7, 0x3f), (0x11, 7, 0xf3),
    (0x12, 7, 0x2f), (0x13, 7, 0xf2), (0x14, 7, 0xf1), (0x42, 7, 0x51), (0x44, 7, 0x24), (0x45, 7, 0x42),
    (0x46, 7, 0x33), (0x47, 7, 0x14), (0x48, 7, 0x41), (0x4a, 7, 0x23), (0x4b, 7, 0x32), (0x50, 7, 0x03),
    (0x51, 7, 0x30), (0x0, 8, 0xef), (0x1, 8, 0xfe), (0x2, 8, 0xdf), (0x3, 8, 0xfd), (0x4, 8, 0xcf),
    (0x5, 8, 0xfc), (0x6, 8, 0xbf), (0x7, 8, 0xfb), (0xa, 8, 0xaf), (0xb, 8, 0x9f), (0x10, 8, 0x8f),
    (0x11, 8, 0x7f), (0x2a, 8, 0x1f), (0x2b, 8, 0xf0), (0x6d, 8, 0x73), (0x6f, 8, 0x72), (0x70, 8, 0x46),
    (0x71, 8, 0x64), (0x72, 8, 0x55), (0x73, 8, 0x71), (0x74, 8, 0x36), (0x75, 8, 0x63), (0x76, 8, 0x45),
    (0x77, 8, 0x54), (0x78, 8, 0x26), (0x79, 8, 0x62), (0x7a, 8, 0x16), (0x7b, 8, 0x61), (0x7d, 8, 0x35),
    (0x7e, 8, 0x53), (0x7f, 8, 0x44), (0x80, 8, 0x25), (0x81, 8, 0x52), (0x82, 8, 0x15), (0x86, 8, 0x34),
    (0x87, 8, 0x43), (0x92, 8, 0x04), (0x93, 8, 0x40), (0x58, 9, 0x0f), (0xa4, 9, 0xb4), (0xa8, 9, 0xb3),
    (0xa9, 9, 0x88), (0xab, 9, 0xb2), (0xae, 9, 0x96), (0xaf, 9, 0xa4), (0xb1, 9, 0x87), (0xb2, 9, 0x3a),
    (0xb3, 9, 0xa3), (0xb4, 9, 0x59), (0xb5, 9, 0x95), (0xb6, 9, 0x2a), (0xb7, 9, 0xa2), (0xb8, 9, 0xa1),
    (0xb9, 9, 0x68), (0xba, 9, 0x86), (0xbb, 9, 0x77), (0xbc, 9, 0x49), (0xbd, 9, 0x94), (0xbe, 9, 0x39),
    (0xbf, 9, 0x93), (0xc0, 9, 0x58), (0xc1, 9, 0x85), (0xc2, 9, 0x29), (0xc3, 9, 0x67), (0xc4, 9, 0x76),
    (0xc5, 9, 0x92), (0xc6, 9, 0x19), (0xc7, 9, 0x91), (0xc8, 9, 0x48), (0xc9, 9, 0x84), (0xca, 9, 0x57),
    (0xcb, 9, 0x75), (0xcc, 9, 0x38), (0xcd, 9, 0x83), (0xce, 9, 0x66), (0xcf, 9, 0x28), (0xd0, 9, 0x82),
    (0xd1, 9, 0x18), (0xd2, 9, 0x47), (0xd3, 9, 0x74), (0xd4, 9, 0x81), (0xd6, 9, 0x56), (0xd7, 9, 0x65),
    (0xd8, 9, 0x17), (0xdc, 9, 0x37), (0xdd, 9, 0x27), (0xf8, 9, 0x06), (0xf9, 9, 0x60), (0x106, 9, 0x05),
    (0x107, 9, 0x50), (0x103, 10, 0xe6), (0x105, 10, 0xc9), (0x106, 10, 0x5e), (0x107, 10, 0xba), (0x108, 10, 0xe5),
    (0x10a, 10, 0xd7), (0x10b, 10, 0xe4), (0x10c, 10, 0x8c), (0x10d, 10, 0xc8), (0x10f, 10, 0x3e), (0x110, 10, 0x6d),
    (0x111, 10, 0xd6), (0x112, 10, 0xe3), (0x113, 10, 0x9b), (0x114, 10, 0xb9), (0x115, 10, 0xaa), (0x116, 10, 0xe2),
    (0x117, 10, 0x1e), (0x118, 10, 0xe1), (0x119, 10, 0x5d), (0x11a, 10, 0xd5), (0x11b, 10, 0x7c), (0x11c, 10, 0xc7),
    (0x11d, 10, 0x4d), (0x11e, 10, 0x8b), (0x11f, 10, 0xb8), (0x120, 10, 0xd4), (0x121, 10, 0x9a), (0x122, 10, 0xa9),
    (0x123, 10, 0x6c), (0x124, 10, 0xc6), (0x125, 10, 0x3d), (0x126, 10, 0xd3), (0x127, 10, 0x2d), (0x128, 10, 0xd2),
    (0x129, 10, 0x1d), (0x12a, 10, 0x7b), (0x12b, 10, 0xb7), (0x12c, 10, 0xd1), (0x12d, 10, 0x5c), (0x12e, 10, 0xc5),
    (0x12f, 10, 0x8a), (0x130, 10, 0xa8), (0x131, 10, 0x99), (0x132, 10, 0x4c), (0x133, 10, 0xc4), (0x134, 10, 0x6b),
    (0x135, 10, 0xb6), (0x137, 10, 0x3c), (0x138, 10, 0xc3), (0x139, 10, 0x7a), (0x13a, 10, 0xa7), (0x13b, 10, 0x2c),
    (0x13c, 10, 0xc2), (0x13d, 10, 0x5b), (0x13e, 10, 0xb5), (0x13f, 10, 0x1c), (0x140, 10, 0x89), (0x141, 10, 0x98),
    (0x142, 10, 0xc1), (0x143, 10, 0x4b), (0x145, 10, 0x3b), (0x147, 10, 0x1a), (0x14a, 10, 0x6a), (0x14b, 10, 0xa6),
    (0x14c, 10, 0x79), (0x14d, 10, 0x97), (0x14f, 10, 0x90), (0x154, 10, 0x2b), (0x155, 10, 0x5a), (0x158, 10, 0xa5),
    (0x159, 10, 0x1b), (0x15a, 10, 0xb1), (0x15b, 10, 0x69), (0x160, 10, 0x4a), (0x161, 10, 0x78), (0x1aa, 10, 0x08),
    (0x1ab, 10, 0x80), (0x1b2, 10, 0x07), (0x1b3, 10, 0x70), (0x164, 11, 0xee), (0x165, 11, 0xde), (0x166, 11, 0xed),
    (0x167, 11, 0xce), (0x168, 11, 0xec), (0x169, 11, 0xdd), (0x16a, 11, 0xbe), (0x16b, 11, 0xeb), (0x16c, 11, 0xcd),
    (0x16d, 11, 0xdc), (0x16e, 11, 0xae), (0x16f, 11, 0xea), (0x170, 11, 0xbd), (0x171, 11, 0xdb), (0x172, 11, 0xcc),
    (0x173, 11, 0x9e), (0x174, 11, 0xe9), (0x175, 11, 0xad), (0x176, 11, 0xda), (0x177, 11, 0xbc), (0x178, 11, 0xcb),
    (0x179, 11, 0x8e), (0x17a, 11, 0xe8), (0x17b, 11, 0x9d), (0x17c, 11, 0xd9), (0x17d, 11, 0x7e), (0x17e, 11, 0xe7),
    (0x17f, 11, 0xac), (0x200, 11, 0xca), (0x201, 11, 0xbb), (0x202, 11, 0x8d), (0x203, 11, 0xd8), (0x205, 11, 0x0d),
    (0x208, 11, 0x6e), (0x209, 11, 0x9c), (0x212, 11, 0xab), (0x213, 11, 0x7d), (0x21c, 11, 0x4e), (0x21d, 11, 0x2e),
    (0x26c, 11, 0xd0), (0x26d, 11, 0x0c), (0x288, 11, 0xc0), (0x289, 11, 0x0b), (0x28c, 11, 0xb0), (0x28d, 11, 0x0a),
    (0x29c, 11, 0xa0), (0x29d, 11, 0x09), (0x408, 12, 0x0e), (0x409, 12, 0xe0),
];

pub(super) const COUNT1_A: [(u32, u8, u8); 16] = [
    (0x1, 1, 0x00), (0x4, 4, 0x02), (0x5, 4, 0x01), (0x6, 4, 0x04), (0x7, 4, 0x08), (0x3, 5, 0x09),
    (0x4, 5, 0x06), (0x5, 5, 0x03), (0x6, 5, 0x0a), (0x7, 5, 0x0c), (0x0, 6, 0x0b), (0x1, 6, 0x0f),
    (0x2, 6, 0x0d), (0x3, 6, 0x0e), (0x4, 6, 0x07), (0x5, 6, 0x05),
];

pub(super) const COUNT1_B: [(u32, u8, u8); 16] = [
    (0x0, 4, 0x0f), (0x1, 4, 0x0e), (0x2, 4, 0x0d), (0x3, 4, 0x0c), (0x4, 4, 0x0b), (0x5, 4, 0x0a),
    (0x6, 4, 0x09), (0x7, 4, 0x08), (0x8, 4, 0x07), (0x9, 4, 0x06), (0xa, 4, 0x05), (0xb, 4, 0x04),
    (0xc, 4, 0x03), (0xd, 4, 0x02), (0xe, 4, 0x01), (0xf, 4, 0x00),
];

/// 大值表的 linbits, 按 table_select 索引
pub(super) const LINBITS: [u32; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 2, 3, 4, 6, 8, 10, 13, 4, 5, 6, 7, 8, 9, 11, 13,
];

/// 预加重表 (preflag 置位时叠加到长块比例因子)
pub(super) const PRETAB: [u8; 22] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 3, 3, 3, 2, 0,
];

/// MPEG-1 scalefac_compress 对应的 (slen1, slen2)
pub(super) const SLEN: [(u32, u32); 16] = [
    (0, 0), (0, 1), (0, 2), (0, 3), (3, 0), (1, 1), (1, 2), (1, 3),
    (2, 1), (2, 2), (2, 3), (3, 1), (3, 2), (3, 3), (4, 2), (4, 3),
];

/// LSF 比例因子分组数 `[slen 表][块类型: 长/短/混合][分组]`
pub(super) const NR_OF_SFB: [[[usize; 4]; 3]; 6] = [
    [[6, 5, 5, 5], [9, 9, 9, 9], [6, 9, 9, 9]],
    [[6, 5, 7, 3], [9, 9, 12, 6], [6, 9, 12, 6]],
    [[11, 10, 0, 0], [18, 18, 0, 0], [15, 18, 0, 0]],
    [[7, 7, 7, 0], [12, 12, 12, 0], [6, 15, 12, 0]],
    [[6, 6, 6, 3], [12, 9, 9, 6], [6, 12, 9, 6]],
    [[8, 8, 5, 0], [15, 12, 9, 0], [6, 18, 9, 0]],
];

/// 长块比例因子频带宽度 (采样率索引 0..9: 44.1k 48k 32k 22.05k 24k 16k 11.025k 12k 8k)
pub(super) const SFB_LONG: [[u16; 22]; 9] = [
    [4, 4, 4, 4, 4, 4, 6, 6, 8, 8, 10, 12, 16, 20, 24, 28, 34, 42, 50, 54, 76, 158],
    [4, 4, 4, 4, 4, 4, 6, 6, 6, 8, 10, 12, 16, 18, 22, 28, 34, 40, 46, 54, 54, 192],
    [4, 4, 4, 4, 4, 4, 6, 6, 8, 10, 12, 16, 20, 24, 30, 38, 46, 56, 68, 84, 102, 26],
    [6, 6, 6, 6, 6, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 38, 46, 52, 60, 68, 58, 54],
    [6, 6, 6, 6, 6, 6, 8, 10, 12, 14, 16, 18, 22, 26, 32, 38, 46, 54, 62, 70, 76, 36],
    [6, 6, 6, 6, 6, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 38, 46, 52, 60, 68, 58, 54],
    [6, 6, 6, 6, 6, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 38, 46, 52, 60, 68, 58, 54],
    [6, 6, 6, 6, 6, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 38, 46, 52, 60, 68, 58, 54],
    [12, 12, 12, 12, 12, 12, 16, 20, 24, 28, 32, 40, 48, 56, 64, 76, 90, 2, 2, 2, 2, 2],
];

/// 短块比例因子频带宽度 (单个窗口)
pub(super) const SFB_SHORT: [[u16; 13]; 9] = [
    [4, 4, 4, 4, 6, 8, 10, 12, 14, 18, 22, 30, 56],
    [4, 4, 4, 4, 6, 6, 10, 12, 14, 16, 20, 26, 66],
    [4, 4, 4, 4, 6, 8, 12, 16, 20, 26, 34, 42, 12],
    [4, 4, 4, 6, 6, 8, 10, 14, 18, 26, 32, 42, 18],
    [4, 4, 4, 6, 8, 10, 12, 14, 18, 24, 32, 44, 12],
    [4, 4, 4, 6, 8, 10, 12, 14, 18, 24, 30, 40, 18],
    [4, 4, 4, 6, 8, 10, 12, 14, 18, 24, 30, 40, 18],
    [4, 4, 4, 6, 8, 10, 12, 14, 18, 24, 30, 40, 18],
    [8, 8, 8, 12, 16, 20, 24, 28, 36, 2, 2, 2, 26],
];

/// 合成窗 (D[i] 的前 257 项, 单位 1/65536)
pub(super) const ENWINDOW: [i32; 257] = [
    0, -1, -1, -1, -1, -1, -1, -2, -2, -2, -2, -3, -3, -4, -4, -5,
    -5, -6, -7, -7, -8, -9, -10, -11, -13, -14, -16, -17, -19, -21, -24, -26,
    -29, -31, -35, -38, -41, -45, -49, -53, -58, -63, -68, -73, -79, -85, -91, -97,
    -104, -111, -117, -125, -132, -139, -147, -154, -161, -169, -176, -183, -190, -196, -202, -208,
    213, 218, 222, 225, 227, 228, 228, 227, 224, 221, 215, 208, 200, 189, 177, 163,
    146, 127, 106, 83, 57, 29, -2, -36, -72, -111, -153, -197, -244, -294, -347, -401,
    -459, -519, -581, -645, -711, -779, -848, -919, -991, -1064, -1137, -1210, -1283, -1356, -1428, -1498,
    -1567, -1634, -1698, -1759, -1817, -1870, -1919, -1962, -2001, -2032, -2057, -2075, -2085, -2087, -2080, -2063,
    2037, 2000, 1952, 1893, 1822, 1739, 1644, 1535, 1414, 1280, 1131, 970, 794, 605, 402, 185,
    -45, -288, -545, -814, -1095, -1388, -1692, -2006, -2330, -2663, -3004, -3351, -3705, -4063, -4425, -4788,
    -5153, -5517, -5879, -6237, -6589, -6935, -7271, -7597, -7910, -8209, -8491, -8755, -8998, -9219, -9416, -9585,
    -9727, -9838, -9916, -9959, -9966, -9935, -9863, -9750, -9592, -9389, -9139, -8840, -8492, -8092, -7640, -7134,
    6574, 5959, 5288, 4561, 3776, 2935, 2037, 1082, 70, -998, -2122, -3300, -4533, -5818, -7154, -8540,
    -9975, -11455, -12980, -14548, -16155, -17799, -19478, -21189, -22929, -24694, -26482, -28289, -30112, -31947, -33791, -35640,
    -37489, -39336, -41176, -43006, -44821, -46617, -48390, -50137, -51853, -53534, -55178, -56778, -58333, -59838, -61289, -62684,
    -64019, -65290, -66494, -67629, -68692, -69679, -70590, -71420, -72169, -72835, -73415, -73908, -74313, -74630, -74856, -74992,
    75038,
];
