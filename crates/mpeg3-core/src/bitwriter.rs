//! 比特流写入器.
//!
//! 按大端位序 (MSB first) 写入, 与 [`BitCursor`](crate::BitCursor) 对应.
//! 用于构造测试码流和基准测试输入: 起始码、VLC 码字和定长字段.

/// 比特流写入器
///
/// # 示例
/// ```
/// use mpeg3_core::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.put_bits(0b101, 3);
/// bw.put_start_code(0xB3);
/// assert_eq!(bw.finish(), vec![0b1010_0000, 0x00, 0x00, 0x01, 0xB3]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    data: Vec<u8>,
    /// 待写出的位, 低 `pending` 位有效
    acc: u64,
    pending: u32,
}

impl BitWriter {
    /// 创建空写入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的总位数
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.pending as usize
    }

    /// 写入值的低 n 位 (n <= 32)
    pub fn put_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "put_bits: n={} 超过 32 位", n);
        if n == 0 {
            return;
        }
        let masked = u64::from(value) & ((1u64 << n) - 1);
        self.acc = (self.acc << n) | masked;
        self.pending += n;
        while self.pending >= 8 {
            self.pending -= 8;
            self.data.push((self.acc >> self.pending) as u8);
        }
    }

    /// 写入 1 位
    pub fn put_bit(&mut self, bit: bool) {
        self.put_bits(u32::from(bit), 1);
    }

    /// 写入有符号数的低 n 位 (二进制补码)
    pub fn put_signed(&mut self, value: i32, n: u32) {
        self.put_bits(value as u32, n);
    }

    /// 写入以字符串表示的码字, 例如 `"0000 0001 000"`; 空格被忽略
    pub fn put_code(&mut self, code: &str) {
        for c in code.chars() {
            match c {
                '0' => self.put_bit(false),
                '1' => self.put_bit(true),
                _ => {}
            }
        }
    }

    /// 用 0 填充到字节边界
    pub fn align_zero(&mut self) {
        if self.pending > 0 {
            let pad = 8 - self.pending;
            self.put_bits(0, pad);
        }
    }

    /// 对齐后写入起始码 `00 00 01 code`
    pub fn put_start_code(&mut self, code: u8) {
        self.align_zero();
        self.data.extend_from_slice(&[0x00, 0x00, 0x01, code]);
    }

    /// 对齐后直接追加字节
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.align_zero();
        self.data.extend_from_slice(bytes);
    }

    /// 完成写入, 不足一字节的部分用 0 补齐
    pub fn finish(mut self) -> Vec<u8> {
        self.align_zero();
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitCursor, MemorySource};

    #[test]
    fn test_put_bits_across_bytes() {
        let mut bw = BitWriter::new();
        bw.put_bits(0x3, 2);
        bw.put_bits(0x1FF, 9);
        bw.put_bits(0x5, 5);
        assert_eq!(bw.bits_written(), 16);
        assert_eq!(bw.finish(), vec![0b1111_1111, 0b1110_0101]);
    }

    #[test]
    fn test_put_code_and_signed_read_back() {
        let mut bw = BitWriter::new();
        bw.put_code("0000 0001 000");
        bw.put_signed(-3, 12);
        let data = bw.finish();
        let mut bc = BitCursor::new(MemorySource::new(data));
        assert_eq!(bc.getbits(11), 0b000_0000_1000);
        assert_eq!(bc.getbits_signed(12), -3);
    }
}
