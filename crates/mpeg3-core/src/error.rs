//! 统一错误类型定义.
//!
//! 视频与音频解码路径共用的错误类型. 结构性码流错误只中止当前切片或音频帧,
//! 由调用方降级处理; 线程创建失败等资源错误为致命错误.

use thiserror::Error;

/// mpeg3 统一错误类型
#[derive(Debug, Error)]
pub enum Mpeg3Error {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的码流特性
    #[error("不支持的特性: {0}")]
    Unsupported(String),

    /// 无效数据 (损坏的码流等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 数据不足, 需要更多输入
    #[error("数据不足, 需要更多输入")]
    NeedMoreData,

    /// 已到达流末尾
    #[error("已到达流末尾")]
    Eof,

    /// 切片解码失败, 仅影响该切片剩余宏块
    #[error("切片 {slice} 解码失败: {reason}")]
    SliceFault {
        /// 切片在当前图像中的序号
        slice: usize,
        /// 失败原因
        reason: String,
    },

    /// Layer III main_data_begin 超出已保留的位储备
    #[error("位储备不足: 需要 {needed} 字节, 仅有 {available} 字节")]
    InsufficientHistory {
        /// main_data_begin 要求回溯的字节数
        needed: usize,
        /// 当前位储备中可用的字节数
        available: usize,
    },

    /// 工作线程创建失败
    #[error("工作线程创建失败: {0}")]
    ThreadSpawn(String),

    /// 内部错误 (不应发生)
    #[error("内部错误: {0}")]
    Internal(String),
}

impl Mpeg3Error {
    /// 是否为可恢复错误 (仅中止当前切片/帧)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidData(_)
                | Self::SliceFault { .. }
                | Self::InsufficientHistory { .. }
                | Self::NeedMoreData
        )
    }
}

/// mpeg3 统一 Result 类型
pub type Mpeg3Result<T> = Result<T, Mpeg3Error>;
