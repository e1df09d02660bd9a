//! 位游标.
//!
//! 在 [`ByteSource`] 之上按位读取 (MSB first), 视频与音频解码共用. 支持正向读取和
//! 反向回读 (Layer III 位储备回退、反向搜索起始码).
//!
//! 与切片式读取器不同, 游标在流末尾不会返回错误: 缺失的位按 0 补齐.
//! 窥视越过末尾不算错误, 只有真正消费了补齐位才设置错误标志,
//! 由调用方在合适的时机检查.

use crate::source::ByteSource;

/// 读取方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 正向: 位置单调递增
    Forward,
    /// 反向: 位置单调递减
    Reverse,
}

/// 位游标
///
/// # 示例
/// ```
/// use mpeg3_core::{BitCursor, MemorySource};
///
/// let mut bc = BitCursor::new(MemorySource::new(vec![0b1011_0001, 0b0101_0101]));
/// assert_eq!(bc.showbits(4), 0b1011);
/// assert_eq!(bc.getbits(4), 0b1011);
/// assert_eq!(bc.getbits(8), 0b0001_0101);
/// assert_eq!(bc.bit_position(), 12);
/// ```
pub struct BitCursor<S> {
    source: S,
    /// 移位寄存器, 低 `bits` 位有效
    reg: u64,
    /// 寄存器中的有效位数
    bits: u32,
    /// 已消费的绝对位位置
    position: u64,
    /// 反向模式下下一次回读字节的结束位置 (字节)
    rev_byte: u64,
    direction: Direction,
    /// 寄存器低端的补零位数 (正向读到字节源末尾之后)
    padding: u32,
    /// 正向填充时字节源已耗尽
    exhausted: bool,
    /// 下溢或定位失败标志
    error: bool,
}

#[inline]
fn mask(n: u32) -> u64 {
    if n >= 64 { u64::MAX } else { (1u64 << n) - 1 }
}

impl<S: ByteSource> BitCursor<S> {
    /// 在字节源的当前位置创建游标
    pub fn new(source: S) -> Self {
        let position = source.tell() * 8;
        Self {
            source,
            reg: 0,
            bits: 0,
            position,
            rev_byte: 0,
            direction: Direction::Forward,
            padding: 0,
            exhausted: false,
            error: false,
        }
    }

    /// 当前绝对位位置 (已消费的位数)
    #[inline]
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// 当前所在字节位置 (向下取整)
    pub fn byte_position(&self) -> u64 {
        self.position / 8
    }

    /// 当前方向
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 是否发生过下溢 (读到流末尾之外) 或定位失败
    #[inline]
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// 清除错误标志
    pub fn clear_error(&mut self) {
        self.error = false;
    }

    /// 距离字节源末尾的剩余位数, 长度未知时返回 `None`
    pub fn bits_remaining_hint(&self) -> Option<u64> {
        self.source
            .len()
            .map(|len| (len * 8).saturating_sub(self.position))
    }

    /// 是否已消费完所有数据
    pub fn is_eof(&self) -> bool {
        matches!(self.bits_remaining_hint(), Some(0)) || (self.exhausted && self.bits <= self.padding)
    }

    /// 底层字节源
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 取回底层字节源
    pub fn into_source(self) -> S {
        self.source
    }

    #[inline]
    fn fill_forward(&mut self, n: u32) {
        while self.bits < n {
            let byte = match self.source.read_char() {
                Some(b) => b,
                None => {
                    self.exhausted = true;
                    self.padding += 8;
                    0
                }
            };
            self.reg = (self.reg << 8) | u64::from(byte);
            self.bits += 8;
        }
    }

    /// 正向还能否读到 n 位真实数据 (n <= 32), 不移动位置也不设置错误标志
    pub fn can_read(&mut self, n: u32) -> bool {
        debug_assert!(n <= 32, "can_read: n={} 超过 32 位", n);
        if self.direction != Direction::Forward {
            return false;
        }
        self.fill_forward(n);
        self.bits - self.padding >= n
    }

    fn fill_reverse(&mut self, n: u32) {
        while self.bits < n {
            let byte = if self.rev_byte == 0 {
                self.error = true;
                0
            } else {
                self.rev_byte -= 1;
                match self.source.seek_byte(self.rev_byte) {
                    Ok(()) => self.source.read_char().unwrap_or_else(|| {
                        self.error = true;
                        0
                    }),
                    Err(_) => {
                        self.error = true;
                        0
                    }
                }
            };
            self.reg |= u64::from(byte) << self.bits;
            self.bits += 8;
        }
    }

    /// 窥视 n 位 (n <= 32), 不移动位置
    #[inline]
    pub fn showbits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32, "showbits: n={} 超过 32 位", n);
        debug_assert_eq!(self.direction, Direction::Forward);
        if n == 0 {
            return 0;
        }
        if self.direction != Direction::Forward {
            self.error = true;
            return 0;
        }
        self.fill_forward(n);
        ((self.reg >> (self.bits - n)) & mask(n)) as u32
    }

    /// 读取 n 位 (n <= 32)
    #[inline]
    pub fn getbits(&mut self, n: u32) -> u32 {
        let v = self.showbits(n);
        if self.direction == Direction::Forward {
            if n > self.bits - self.padding {
                self.error = true;
            }
            self.bits -= n;
            self.padding = self.padding.min(self.bits);
            self.position += u64::from(n);
        }
        v
    }

    /// 读取 1 位
    #[inline]
    pub fn get1bit(&mut self) -> bool {
        self.getbits(1) != 0
    }

    /// 读取 n 位有符号数 (二进制补码)
    pub fn getbits_signed(&mut self, n: u32) -> i32 {
        let v = self.getbits(n);
        if n == 0 || n >= 32 {
            return v as i32;
        }
        if (v >> (n - 1)) & 1 != 0 {
            (v as i32) | !((1i32 << n) - 1)
        } else {
            v as i32
        }
    }

    /// 反向读取 n 位 (n <= 32)
    ///
    /// 返回紧邻当前位置之前的 n 位 (按原码流顺序), 位置随之后退 n 位.
    /// 必须先调用 [`set_direction(Direction::Reverse)`](Self::set_direction).
    pub fn getbits_reverse(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32, "getbits_reverse: n={} 超过 32 位", n);
        debug_assert_eq!(self.direction, Direction::Reverse);
        if n == 0 {
            return 0;
        }
        if self.direction != Direction::Reverse {
            self.error = true;
            return 0;
        }
        if u64::from(n) > self.position {
            self.error = true;
        }
        self.fill_reverse(n);
        let v = (self.reg & mask(n)) as u32;
        self.reg >>= n;
        self.bits -= n;
        self.position = self.position.saturating_sub(u64::from(n));
        v
    }

    /// 切换读取方向, 在当前位位置与字节源重新同步
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction {
            return;
        }
        self.direction = direction;
        self.reg = 0;
        self.bits = 0;
        self.padding = 0;
        self.exhausted = false;
        let byte = self.position / 8;
        let rem = (self.position % 8) as u32;
        match direction {
            Direction::Forward => {
                if self.source.seek_byte(byte).is_err() {
                    self.error = true;
                    return;
                }
                if rem > 0 {
                    self.fill_forward(8);
                    self.bits -= rem;
                    self.padding = self.padding.min(self.bits);
                }
            }
            Direction::Reverse => {
                self.rev_byte = byte;
                if rem > 0 {
                    let partial = match self.source.seek_byte(byte) {
                        Ok(()) => self.source.read_char().unwrap_or(0),
                        Err(_) => {
                            self.error = true;
                            0
                        }
                    };
                    self.reg = u64::from(partial >> (8 - rem));
                    self.bits = rem;
                }
            }
        }
    }

    /// 跳过 n 位 (正向)
    pub fn skip_bits(&mut self, mut n: u64) {
        while n > 0 {
            let step = n.min(32) as u32;
            self.getbits(step);
            n -= u64::from(step);
        }
    }

    /// 对齐到下一个字节边界
    pub fn byte_align(&mut self) {
        let rem = (self.position % 8) as u32;
        if rem != 0 {
            self.getbits(8 - rem);
        }
    }

    /// 是否位于字节边界
    pub fn is_byte_aligned(&self) -> bool {
        self.position % 8 == 0
    }

    /// 定位到绝对字节位置, 重置寄存器并清除错误标志, 方向恢复为正向
    pub fn seek_byte(&mut self, pos: u64) -> crate::Mpeg3Result<()> {
        self.source.seek_byte(pos)?;
        self.reg = 0;
        self.bits = 0;
        self.position = pos * 8;
        self.direction = Direction::Forward;
        self.padding = 0;
        self.exhausted = false;
        self.error = false;
        Ok(())
    }

    /// 字节对齐后向前搜索下一个起始码前缀 `00 00 01`
    ///
    /// 找到时游标停在前缀处并返回完整的 32 位起始码; 流结束返回 `None`.
    /// 末尾不足 4 字节的残余不会被当作起始码.
    pub fn next_start_code(&mut self) -> Option<u32> {
        self.byte_align();
        loop {
            if !self.can_read(24) {
                return None;
            }
            if self.showbits(24) == 0x000001 {
                return self.can_read(32).then(|| self.showbits(32));
            }
            self.getbits(8);
        }
    }

    /// 从当前位置向后搜索上一个起始码
    ///
    /// 找到时游标停在该起始码处 (正向模式) 并返回它; 否则位置不变并返回 `None`.
    pub fn previous_start_code(&mut self) -> Option<u32> {
        let origin = self.position - self.position % 8;
        self.set_direction(Direction::Reverse);
        // 先丢弃不完整的字节
        let rem = (self.position % 8) as u32;
        if rem > 0 {
            self.getbits_reverse(rem);
        }
        let mut window = 0u32;
        let mut seen = 0;
        let found = loop {
            if self.position < 8 {
                break None;
            }
            let b = self.getbits_reverse(8);
            window = (window >> 8) | (b << 24);
            seen += 1;
            if seen >= 4 && window >> 8 == 0x000001 {
                break Some(window);
            }
        };
        self.set_direction(Direction::Forward);
        if found.is_none() {
            if let Err(e) = self.seek_byte(origin / 8) {
                log::warn!("反向搜索起始码失败后无法恢复到字节 {}: {}", origin / 8, e);
                self.error = true;
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn cursor(data: &[u8]) -> BitCursor<MemorySource> {
        BitCursor::new(MemorySource::new(data.to_vec()))
    }

    #[test]
    fn test_forward_getbits_and_showbits() {
        let mut bc = cursor(&[0xFF, 0x00, 0xFF, 0x00, 0xAB]);
        assert_eq!(bc.showbits(32), 0xFF00FF00);
        assert_eq!(bc.getbits(32), 0xFF00FF00);
        assert_eq!(bc.getbits(4), 0xA);
        assert_eq!(bc.bit_position(), 36);
        assert!(!bc.has_error());
    }

    #[test]
    fn test_underflow_zero_fills_and_flags() {
        let mut bc = cursor(&[0b1100_0000]);
        assert_eq!(bc.getbits(2), 0b11);
        assert_eq!(bc.getbits(16), 0, "末尾之后应补零");
        assert!(bc.has_error(), "下溢后应设置错误标志");
        assert_eq!(bc.bit_position(), 18);
    }

    #[test]
    fn test_reverse_reads_previous_bits() {
        let mut bc = cursor(&[0x12, 0x34, 0x56]);
        bc.getbits(20);
        bc.set_direction(Direction::Reverse);
        assert_eq!(bc.getbits_reverse(4), 0x5);
        assert_eq!(bc.getbits_reverse(8), 0x34);
        assert_eq!(bc.bit_position(), 8);
        bc.set_direction(Direction::Forward);
        assert_eq!(bc.getbits(12), 0x345);
        assert!(!bc.has_error());
    }

    #[test]
    fn test_reverse_past_start_sets_error() {
        let mut bc = cursor(&[0xAA]);
        bc.getbits(4);
        bc.set_direction(Direction::Reverse);
        assert_eq!(bc.getbits_reverse(8), 0xA);
        assert!(bc.has_error());
        assert_eq!(bc.bit_position(), 0);
    }

    #[test]
    fn test_getbits_signed() {
        let mut bc = cursor(&[0b1111_1010, 0b1000_0000]);
        assert_eq!(bc.getbits_signed(5), -1);
        assert_eq!(bc.getbits_signed(4), 5);
    }

    #[test]
    fn test_start_code_search_both_directions() {
        let data = [
            0x55, 0x00, 0x00, 0x01, 0xB3, 0x11, 0x22, 0x00, 0x00, 0x01, 0x00, 0x77,
        ];
        let mut bc = cursor(&data);
        bc.getbits(3);
        assert_eq!(bc.next_start_code(), Some(0x000001B3));
        assert_eq!(bc.byte_position(), 1);
        bc.getbits(32);
        assert_eq!(bc.next_start_code(), Some(0x00000100));
        assert_eq!(bc.byte_position(), 7);

        assert_eq!(bc.previous_start_code(), Some(0x000001B3));
        assert_eq!(bc.byte_position(), 1);
        assert_eq!(bc.getbits(32), 0x000001B3);
        assert_eq!(bc.previous_start_code(), Some(0x000001B3));
        assert_eq!(bc.previous_start_code(), None);
        assert_eq!(bc.byte_position(), 1, "未找到时位置不变");
    }

    #[test]
    fn test_next_start_code_eof() {
        let mut bc = cursor(&[0x12, 0x00, 0x00]);
        assert_eq!(bc.next_start_code(), None);
        // 前缀完整但起始码值被截断
        let mut bc = cursor(&[0x00, 0x00, 0x01]);
        assert_eq!(bc.next_start_code(), None);
        assert!(!bc.has_error());
    }

    #[test]
    fn test_peek_past_end_is_not_an_error() {
        let mut bc = cursor(&[0xA5, 0x5A]);
        assert_eq!(bc.showbits(32), 0xA55A_0000, "末尾之后按 0 窥视");
        assert!(!bc.has_error(), "仅窥视不应设置错误标志");
        assert!(!bc.can_read(17));
        assert!(bc.can_read(16));
        assert_eq!(bc.getbits(16), 0xA55A);
        assert!(!bc.has_error(), "恰好读完全部数据不是下溢");
        assert!(bc.is_eof());
        bc.getbits(1);
        assert!(bc.has_error(), "消费补齐位才算下溢");
    }

    /// 拒绝定位到指定字节的字节源
    struct RefuseSeek {
        inner: MemorySource,
        refuse: u64,
    }

    impl ByteSource for RefuseSeek {
        fn read_char(&mut self) -> Option<u8> {
            self.inner.read_char()
        }

        fn seek_byte(&mut self, pos: u64) -> crate::Mpeg3Result<()> {
            if pos == self.refuse {
                return Err(crate::Mpeg3Error::InvalidArgument(format!("拒绝定位到 {}", pos)));
            }
            self.inner.seek_byte(pos)
        }

        fn tell(&self) -> u64 {
            self.inner.tell()
        }

        fn len(&self) -> Option<u64> {
            self.inner.len()
        }
    }

    #[test]
    fn test_failed_restore_after_backward_search_flags_error() {
        let source = RefuseSeek {
            inner: MemorySource::new(vec![0x11, 0x22, 0x33, 0x44]),
            refuse: 4,
        };
        let mut bc = BitCursor::new(source);
        assert_eq!(bc.getbits(32), 0x1122_3344);
        assert!(!bc.has_error());
        assert_eq!(bc.previous_start_code(), None);
        assert!(bc.has_error(), "无法恢复原位置时应设置错误标志");
    }

    #[test]
    fn test_seek_after_exhaustion_reads_real_data() {
        let mut bc = cursor(&[0x01, 0x02, 0x03]);
        bc.getbits(16);
        assert_eq!(bc.showbits(24), 0x03_0000);
        bc.seek_byte(1).expect("定位失败");
        assert!(bc.can_read(16));
        assert_eq!(bc.getbits(16), 0x0203);
        assert!(!bc.has_error());
    }
}
