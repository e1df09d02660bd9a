//! 字节源抽象.
//!
//! 解复用层为每条基本流提供一个可定位的字节源, 解码器只通过 [`BitCursor`](crate::BitCursor)
//! 消费它. 这里提供内存实现和 `Read + Seek` 适配器.

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::{Mpeg3Error, Mpeg3Result};

/// 可定位的拉取式字节源
pub trait ByteSource {
    /// 读取一个字节, 流结束时返回 `None`
    fn read_char(&mut self) -> Option<u8>;

    /// 读取尽可能多的字节到 `buf`, 返回实际读取的字节数
    fn read_data(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.read_char() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    /// 定位到绝对字节位置
    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()>;

    /// 当前字节位置 (下一次 `read_char` 返回的字节)
    fn tell(&self) -> u64;

    /// 字节源总长度, 未知时返回 `None`
    fn len(&self) -> Option<u64>;

    /// 字节源是否为空
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// 内存字节源
///
/// 切片缓冲、音频帧和测试码流都使用它, 克隆只增加引用计数.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Bytes,
    pos: usize,
}

impl MemorySource {
    /// 创建内存字节源
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// 底层数据
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// 剩余未读字节数
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl ByteSource for MemorySource {
    #[inline]
    fn read_char(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn read_data(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()> {
        if pos > self.data.len() as u64 {
            return Err(Mpeg3Error::InvalidArgument(format!(
                "seek_byte: 位置 {} 超出数据长度 {}",
                pos,
                self.data.len()
            )));
        }
        self.pos = pos as usize;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

/// 借用切片的字节源, 供切片与音频主数据的短生命周期解码使用
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// 创建切片字节源
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn read_char(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()> {
        if pos > self.data.len() as u64 {
            return Err(Mpeg3Error::InvalidArgument(format!(
                "seek_byte: 位置 {} 超出切片长度 {}",
                pos,
                self.data.len()
            )));
        }
        self.pos = pos as usize;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

/// `Read + Seek` 适配器 (文件等)
///
/// 内部带一个小缓冲区, 避免逐字节系统调用.
pub struct ReaderSource<R> {
    inner: R,
    buf: Box<[u8]>,
    buf_pos: usize,
    buf_len: usize,
    /// `buf[0]` 对应的绝对字节位置
    buf_start: u64,
    len: Option<u64>,
}

impl<R: Read + Seek> ReaderSource<R> {
    /// 默认缓冲区大小
    pub const BUFFER_SIZE: usize = 64 * 1024;

    /// 包装一个读取器, 并探测其长度
    pub fn new(mut inner: R) -> Mpeg3Result<Self> {
        let start = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(start))?;
        Ok(Self {
            inner,
            buf: vec![0u8; Self::BUFFER_SIZE].into_boxed_slice(),
            buf_pos: 0,
            buf_len: 0,
            buf_start: start,
            len: Some(end),
        })
    }

    fn refill(&mut self) -> bool {
        self.buf_start += self.buf_len as u64;
        self.buf_pos = 0;
        self.buf_len = 0;
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => {
                    self.buf_len = n;
                    return n > 0;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("字节源读取失败: {}", e);
                    return false;
                }
            }
        }
    }
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
    fn read_char(&mut self) -> Option<u8> {
        if self.buf_pos >= self.buf_len && !self.refill() {
            return None;
        }
        let b = self.buf[self.buf_pos];
        self.buf_pos += 1;
        Some(b)
    }

    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()> {
        let buffered_end = self.buf_start + self.buf_len as u64;
        if pos >= self.buf_start && pos < buffered_end {
            self.buf_pos = (pos - self.buf_start) as usize;
            return Ok(());
        }
        self.inner.seek(SeekFrom::Start(pos))?;
        self.buf_start = pos;
        self.buf_pos = 0;
        self.buf_len = 0;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.buf_start + self.buf_pos as u64
    }

    fn len(&self) -> Option<u64> {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_memory_source_read_and_seek() {
        let mut src = MemorySource::new(vec![1u8, 2, 3, 4]);
        assert_eq!(src.read_char(), Some(1));
        let mut buf = [0u8; 8];
        assert_eq!(src.read_data(&mut buf), 3);
        assert_eq!(&buf[..3], &[2, 3, 4]);
        assert_eq!(src.read_char(), None);

        src.seek_byte(1).expect("定位失败");
        assert_eq!(src.tell(), 1);
        assert_eq!(src.read_char(), Some(2));
        assert!(src.seek_byte(5).is_err(), "越界定位应失败");
    }

    #[test]
    fn test_reader_source_matches_memory() {
        let data: Vec<u8> = (0..200u32).map(|v| (v * 7) as u8).collect();
        let mut reader = ReaderSource::new(Cursor::new(data.clone())).expect("创建读取器失败");
        assert_eq!(reader.len(), Some(200));
        for &expected in &data {
            assert_eq!(reader.read_char(), Some(expected));
        }
        assert_eq!(reader.read_char(), None);

        reader.seek_byte(150).expect("定位失败");
        assert_eq!(reader.tell(), 150);
        assert_eq!(reader.read_char(), Some(data[150]));
        reader.seek_byte(3).expect("定位失败");
        assert_eq!(reader.read_char(), Some(data[3]));
    }
}
