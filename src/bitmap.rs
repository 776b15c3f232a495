//! # BMP 头部模块
//!
//! 载体只被视为 "54 字节头部 + 像素字节" 的字节流，这里仅读取计算容量所需的宽和高。
//! 压缩、调色板、位深和行填充都不做解析，默认输入为无压缩的 24 位 BMP。

use crate::constants::{BMP_HEADER_SIZE, BMP_HEIGHT_OFFSET, BMP_WIDTH_OFFSET, BYTES_PER_PIXEL};
use crate::error::StegoError;
use std::io::{self, Read};

/// 原样保存的 BMP 头部。
#[derive(Debug, Clone)]
pub struct BmpHeader {
    raw: [u8; BMP_HEADER_SIZE],
}

impl BmpHeader {
    /// 从载体流中读取恰好 54 个字节作为头部。
    ///
    /// # Errors
    ///
    /// 载体不足 54 字节或不以 `BM` 开头时返回 [`StegoError::NotBitmap`]。
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, StegoError> {
        let mut raw = [0u8; BMP_HEADER_SIZE];
        reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => StegoError::NotBitmap {
                reason: format!("file is shorter than the {BMP_HEADER_SIZE}-byte header"),
            },
            _ => StegoError::Io(e),
        })?;
        Self::parse(raw)
    }

    pub fn parse(raw: [u8; BMP_HEADER_SIZE]) -> Result<Self, StegoError> {
        if &raw[..2] != b"BM" {
            return Err(StegoError::NotBitmap {
                reason: "missing 'BM' signature".to_string(),
            });
        }
        Ok(Self { raw })
    }

    fn read_i32(&self, offset: usize) -> i32 {
        let mut field = [0u8; 4];
        field.copy_from_slice(&self.raw[offset..offset + 4]);
        i32::from_le_bytes(field)
    }

    pub fn width(&self) -> u32 {
        self.read_i32(BMP_WIDTH_OFFSET).unsigned_abs()
    }

    /// 图像高度。负值表示自上而下存储的位图，这里取绝对值。
    pub fn height(&self) -> u32 {
        self.read_i32(BMP_HEIGHT_OFFSET).unsigned_abs()
    }

    /// 可用于隐写的像素字节数：`width * height * 3`。
    pub fn pixel_byte_count(&self) -> Result<u64, StegoError> {
        u64::from(self.width())
            .checked_mul(u64::from(self.height()))
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| StegoError::NotBitmap {
                reason: format!(
                    "dimensions {}x{} overflow the pixel byte count",
                    self.width(),
                    self.height()
                ),
            })
    }

    pub fn as_bytes(&self) -> &[u8; BMP_HEADER_SIZE] {
        &self.raw
    }
}
