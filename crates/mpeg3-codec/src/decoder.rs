//! 解码器 trait 定义.
//!
//! 视频解码器与音频解码器都以拉取方式工作: 每次调用从字节源读取足够的数据,
//! 返回下一个可输出的帧.

use mpeg3_core::Mpeg3Result;

use crate::frame::Frame;

/// 基本流解码器
///
/// 解码流程:
/// 1. 反复调用 `decode_frame()` 取出帧
/// 2. 返回 `Ok(None)` 表示流已结束且没有缓存帧
/// 3. 定位后调用 `seek_byte()`, 解码器丢弃参考状态并从下一个可解码点继续
pub trait Decoder: Send {
    /// 获取解码器名称
    fn name(&self) -> &str;

    /// 解码并返回下一帧, 流结束时返回 `Ok(None)`
    fn decode_frame(&mut self) -> Mpeg3Result<Option<Frame>>;

    /// 定位到字节源的绝对位置
    fn seek_byte(&mut self, pos: u64) -> Mpeg3Result<()>;

    /// 清空内部状态 (参考帧、位储备、滤波器历史)
    ///
    /// 视频解码器会先把等待显示的参考帧放入输出队列, 之后的 `decode_frame()` 仍能取到它.
    fn flush(&mut self);
}
