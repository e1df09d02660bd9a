//! Layer III 位储备.
//!
//! 帧的主数据可以从之前帧的主数据中开始 (`main_data_begin` 字节之前). 储备保留
//! 最近的主数据字节, 解码时在本帧数据起点处反向回退 `main_data_begin` 字节.

use mpeg3_core::{BitCursor, Direction, Mpeg3Error, Mpeg3Result, SliceSource};

/// 回退上限: MPEG-1 的 main_data_begin 为 9 位
pub const MAX_BACKSTEP: usize = 511;

/// 位储备
#[derive(Debug, Clone, Default)]
pub struct Reservoir {
    buf: Vec<u8>,
    /// 本帧主数据在 `buf` 中的起点
    frame_start: usize,
    main_data_begin: usize,
}

impl Reservoir {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一帧的主数据
    ///
    /// 历史不足 `main_data_begin` 字节时丢弃旧历史 (只保留本帧数据供后续帧回退)
    /// 并返回 [`Mpeg3Error::InsufficientHistory`].
    pub fn push_frame(&mut self, main_data: &[u8], main_data_begin: usize) -> Mpeg3Result<()> {
        if self.buf.len() > MAX_BACKSTEP {
            let excess = self.buf.len() - MAX_BACKSTEP;
            self.buf.drain(..excess);
        }
        let available = self.buf.len();
        if main_data_begin > available {
            self.buf.clear();
            self.buf.extend_from_slice(main_data);
            self.frame_start = 0;
            self.main_data_begin = 0;
            return Err(Mpeg3Error::InsufficientHistory {
                needed: main_data_begin,
                available,
            });
        }
        self.frame_start = available;
        self.main_data_begin = main_data_begin;
        self.buf.extend_from_slice(main_data);
        Ok(())
    }

    /// 当前保留的字节数
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// 定位到本帧主数据真正起点的游标
    pub fn cursor(&self) -> Mpeg3Result<BitCursor<SliceSource<'_>>> {
        let mut bc = BitCursor::new(SliceSource::new(&self.buf));
        bc.seek_byte(self.frame_start as u64)?;
        bc.set_direction(Direction::Reverse);
        let mut remaining = self.main_data_begin * 8;
        while remaining > 0 {
            let step = remaining.min(32);
            bc.getbits_reverse(step as u32);
            remaining -= step;
        }
        bc.set_direction(Direction::Forward);
        if bc.has_error() {
            return Err(Mpeg3Error::Internal("位储备回退越界".into()));
        }
        Ok(bc)
    }

    /// 丢弃全部历史
    pub fn clear(&mut self) {
        self.buf.clear();
        self.frame_start = 0;
        self.main_data_begin = 0;
    }
}
