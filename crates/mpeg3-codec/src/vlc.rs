//! 通用变长码 (VLC) 查找表.
//!
//! 由 `(码字, 码长, 值)` 列表构建两级查找表: 一级表按 `primary_bits` 位索引,
//! 更长的码字按前缀挂到二级子表. 视频宏块/系数表和 Layer III Huffman 表共用.

use std::collections::BTreeMap;

use mpeg3_core::{BitCursor, ByteSource};

#[derive(Debug, Clone, Copy)]
enum Entry<T> {
    Invalid,
    Leaf { value: T, len: u8 },
    Link { offset: u32, bits: u8 },
}

/// VLC 查找表
#[derive(Debug, Clone)]
pub struct Vlc<T> {
    primary_bits: u32,
    max_len: u32,
    entries: Vec<Entry<T>>,
}

impl<T: Copy> Vlc<T> {
    /// 由码字列表构建查找表
    ///
    /// 码字必须构成前缀码; 重复或冲突的码字以后出现者为准并记录警告.
    pub fn build(codes: &[(u32, u8, T)], primary_bits: u32) -> Self {
        let max_len = codes.iter().map(|c| u32::from(c.1)).max().unwrap_or(1);
        let primary = primary_bits.min(max_len).max(1);
        let mut entries = vec![Entry::Invalid; 1usize << primary];

        // 长码按一级前缀分组, 子表位数取组内最长码
        let mut groups: BTreeMap<u32, u32> = BTreeMap::new();
        for &(code, len, _) in codes {
            let len = u32::from(len);
            if len > primary {
                let prefix = code >> (len - primary);
                let extra = len - primary;
                let bits = groups.entry(prefix).or_insert(0);
                *bits = (*bits).max(extra);
            }
        }
        let mut links = BTreeMap::new();
        for (&prefix, &bits) in &groups {
            let offset = entries.len() as u32;
            entries.resize(entries.len() + (1usize << bits), Entry::Invalid);
            entries[prefix as usize] = Entry::Link {
                offset,
                bits: bits as u8,
            };
            links.insert(prefix, (offset, bits));
        }

        for &(code, len, value) in codes {
            let l = u32::from(len);
            let (base, shift) = if l <= primary {
                let shift = primary - l;
                ((code << shift) as usize, shift)
            } else {
                let prefix = code >> (l - primary);
                let extra = l - primary;
                let Some(&(offset, bits)) = links.get(&prefix) else {
                    continue;
                };
                let suffix = code & ((1u32 << extra) - 1);
                let shift = bits - extra;
                (offset as usize + (suffix << shift) as usize, shift)
            };
            for slot in &mut entries[base..base + (1usize << shift)] {
                if !matches!(slot, Entry::Invalid) {
                    log::warn!("VLC 码字冲突: code={:#b}, len={}", code, len);
                }
                *slot = Entry::Leaf { value, len };
            }
        }

        Self {
            primary_bits: primary,
            max_len,
            entries,
        }
    }

    /// 最长码长
    pub fn max_len(&self) -> u32 {
        self.max_len
    }

    /// 解码一个码字并消费对应位数, 无效码返回 `None` (不消费)
    #[inline]
    pub fn decode<S: ByteSource>(&self, bc: &mut BitCursor<S>) -> Option<T> {
        let idx = bc.showbits(self.primary_bits) as usize;
        match self.entries[idx] {
            Entry::Leaf { value, len } => {
                bc.getbits(u32::from(len));
                Some(value)
            }
            Entry::Link { offset, bits } => {
                let bits = u32::from(bits);
                let sub = bc.showbits(self.primary_bits + bits) & ((1u32 << bits) - 1);
                match self.entries[offset as usize + sub as usize] {
                    Entry::Leaf { value, len } => {
                        bc.getbits(u32::from(len));
                        Some(value)
                    }
                    _ => None,
                }
            }
            Entry::Invalid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpeg3_core::{BitWriter, MemorySource};

    const CODES: [(u32, u8, i8); 5] = [
        (0b1, 1, 0),
        (0b01, 2, 1),
        (0b001, 3, 2),
        (0b0001_0, 5, 3),
        (0b0000_0000_11, 10, 4),
    ];

    #[test]
    fn test_decode_short_and_linked_codes() {
        let vlc = Vlc::build(&CODES, 4);
        let mut bw = BitWriter::new();
        bw.put_code("0000 0000 11");
        bw.put_code("1");
        bw.put_code("0001 0");
        bw.put_code("01");
        let mut bc = BitCursor::new(MemorySource::new(bw.finish()));
        assert_eq!(vlc.decode(&mut bc), Some(4));
        assert_eq!(vlc.decode(&mut bc), Some(0));
        assert_eq!(vlc.decode(&mut bc), Some(3));
        assert_eq!(vlc.decode(&mut bc), Some(1));
        assert_eq!(bc.bit_position(), 18);
    }

    #[test]
    fn test_invalid_code_consumes_nothing() {
        let vlc = Vlc::build(&CODES, 4);
        let mut bc = BitCursor::new(MemorySource::new(vec![0x00, 0x00]));
        assert_eq!(vlc.decode(&mut bc), None);
        assert_eq!(bc.bit_position(), 0, "无效码不应消费位");
    }
}
