//! # 错误类型模块
//!
//! [`StegoError`] 覆盖了从读取 BMP 头部到写出提取文件的全部失败情形。
//! 命令处理层 (`handler`) 会用 `anyhow` 为它附加上下文，但仍可通过
//! `downcast_ref::<StegoError>()` 取回具体的错误种类。

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 帧中的各个字段，按写入顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    Signature,
    ExtensionLength,
    Extension,
    PayloadLength,
    Payload,
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signature => "magic signature",
            Self::ExtensionLength => "extension length",
            Self::Extension => "extension",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("carrier cannot hold the frame: need {required} bytes, have {available}")]
    CapacityExceeded { required: u64, available: u64 },

    #[error("magic signature mismatch: expected {expected:02X?}, found {found:02X?}")]
    SignatureMismatch { expected: Vec<u8>, found: Vec<u8> },

    #[error("carrier ended after {offset} pixel bytes")]
    TruncatedCarrier { offset: u64 },

    #[error("{field} of {length} bytes exceeds the {available}-byte limit")]
    LengthOutOfRange {
        field: FrameField,
        length: u64,
        available: u64,
    },

    #[error("unable to open {}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("secret file name '{name}' has no extension")]
    MissingExtension { name: String },

    #[error("invalid file extension: {extension:?}")]
    InvalidExtension { extension: String },

    #[error("not a 24-bit BMP: {reason}")]
    NotBitmap { reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StegoError {
    /// 把底层读取错误转换为隐写错误：提前遇到 EOF 说明载体被截断。
    pub(crate) fn from_read(err: io::Error, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::TruncatedCarrier { offset }
        } else {
            Self::Io(err)
        }
    }
}
