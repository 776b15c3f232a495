//! # 帧协议模块
//!
//! 帧是写入像素字节中的自描述结构，字段顺序固定：
//!
//! ```text
//! [MAGIC_SIGNATURE ] 魔数签名
//! [u32             ] 扩展名长度
//! [N bytes         ] 扩展名 (含前导 '.')
//! [u32             ] 有效载荷长度
//! [M bytes         ] 有效载荷 (秘密文件的原始内容)
//! ```
//!
//! 每个字节经位编解码器展开为 8 个载体字节，每个 `u32` 展开为 32 个载体字节。
//! 除开头的魔数外没有任何标签或分隔符，解码完全依赖字段位置。

use crate::capacity::CapacityPlan;
use crate::constants::{
    CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32, MAGIC_SIGNATURE, MAX_EXTENSION_LEN,
};
use crate::error::{FrameField, StegoError};
use crate::steganography::{pack_byte, pack_u32, unpack_byte, unpack_u32};
use log::debug;
use std::io::{self, Read, Write};

/// 一次性解码并写出的有效载荷块大小 (字节)。
const COPY_CHUNK: usize = 4096;

/// 隐藏在图像中的帧内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub extension: String,
    pub payload: Vec<u8>,
}

impl Frame {
    /// # Errors
    ///
    /// 扩展名不合法时返回 [`StegoError::InvalidExtension`]。
    pub fn new(extension: impl Into<String>, payload: Vec<u8>) -> Result<Self, StegoError> {
        let extension = extension.into();
        validate_extension(&extension)?;
        Ok(Self { extension, payload })
    }

    /// 针对给定像素字节数的容量规划。
    pub fn capacity_plan(&self, pixel_bytes: u64) -> CapacityPlan {
        CapacityPlan::new(
            pixel_bytes,
            MAGIC_SIGNATURE.len() as u64,
            self.extension.len() as u64,
            self.payload.len() as u64,
        )
    }
}

/// 扩展名必须以 `.` 开头，后面至少有一个字符，且不能包含路径分隔符。
pub fn validate_extension(extension: &str) -> Result<(), StegoError> {
    let valid = extension.len() > 1
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.starts_with('.')
        && !extension.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(StegoError::InvalidExtension {
            extension: extension.to_string(),
        })
    }
}

fn field_len(field: FrameField, len: usize) -> Result<u32, StegoError> {
    u32::try_from(len).map_err(|_| StegoError::LengthOutOfRange {
        field,
        length: len as u64,
        available: u64::from(u32::MAX),
    })
}

/// 隐写一侧的转换流：从源图像读取 N 个像素字节，改写最低位后写入目标图像。
///
/// 读写游标被封装在同一个结构中，始终保持同步前进。
pub struct LsbEncoder<R, W> {
    source: R,
    sink: W,
    consumed: u64,
}

impl<R: Read, W: Write> LsbEncoder<R, W> {
    pub fn new(source: R, sink: W) -> Self {
        Self {
            source,
            sink,
            consumed: 0,
        }
    }

    fn transform<const N: usize>(
        &mut self,
        pack: impl FnOnce(&mut [u8; N]),
    ) -> Result<(), StegoError> {
        let mut chunk = [0u8; N];
        self.source
            .read_exact(&mut chunk)
            .map_err(|e| StegoError::from_read(e, self.consumed))?;
        pack(&mut chunk);
        self.sink.write_all(&chunk)?;
        self.consumed += N as u64;
        Ok(())
    }

    pub fn write_byte(&mut self, value: u8) -> Result<(), StegoError> {
        self.transform(|chunk: &mut [u8; CARRIER_BYTES_PER_BYTE]| pack_byte(value, chunk))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), StegoError> {
        self.transform(|chunk: &mut [u8; CARRIER_BYTES_PER_U32]| pack_u32(value, chunk))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StegoError> {
        bytes.iter().try_for_each(|&b| self.write_byte(b))
    }

    /// 已经改写的像素字节数。
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// 将源图像中剩余的像素字节原样复制到目标图像，返回目标写入端和复制的字节数。
    pub fn finish(mut self) -> Result<(W, u64), StegoError> {
        let tail = io::copy(&mut self.source, &mut self.sink)?;
        self.sink.flush()?;
        Ok((self.sink, tail))
    }
}

/// 提取一侧的读取流，持有头部声明的像素字节预算。
pub struct LsbDecoder<R> {
    source: R,
    consumed: u64,
    limit: u64,
}

impl<R: Read> LsbDecoder<R> {
    /// `limit` 为头部声明的像素字节数，读取不会越过它。
    pub fn new(source: R, limit: u64) -> Self {
        Self {
            source,
            consumed: 0,
            limit,
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], StegoError> {
        if self.consumed + N as u64 > self.limit {
            return Err(StegoError::TruncatedCarrier {
                offset: self.consumed,
            });
        }
        let mut chunk = [0u8; N];
        self.source
            .read_exact(&mut chunk)
            .map_err(|e| StegoError::from_read(e, self.consumed))?;
        self.consumed += N as u64;
        Ok(chunk)
    }

    pub fn read_byte(&mut self) -> Result<u8, StegoError> {
        let chunk: [u8; CARRIER_BYTES_PER_BYTE] = self.take()?;
        Ok(unpack_byte(&chunk))
    }

    pub fn read_u32(&mut self) -> Result<u32, StegoError> {
        let chunk: [u8; CARRIER_BYTES_PER_U32] = self.take()?;
        Ok(unpack_u32(&chunk))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, StegoError> {
        (0..len).map(|_| self.read_byte()).collect()
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// 剩余像素字节还能容纳的有效载荷字节数。
    pub fn remaining_capacity(&self) -> u64 {
        (self.limit - self.consumed) / CARRIER_BYTES_PER_BYTE as u64
    }

    /// 在读取长度前缀字段之前，确认声明的长度没有超出剩余容量。
    pub fn ensure_fits(&self, field: FrameField, length: u32) -> Result<(), StegoError> {
        let available = self.remaining_capacity();
        if u64::from(length) > available {
            return Err(StegoError::LengthOutOfRange {
                field,
                length: u64::from(length),
                available,
            });
        }
        Ok(())
    }

    /// 逐块解码 `len` 个字节并写入 `sink`，不在内存中保留整个有效载荷。
    pub fn copy_to<W: Write>(&mut self, len: u32, sink: &mut W) -> Result<u64, StegoError> {
        self.ensure_fits(FrameField::Payload, len)?;
        let mut left = len as usize;
        let mut buffer = Vec::with_capacity(left.min(COPY_CHUNK));
        while left > 0 {
            let n = left.min(COPY_CHUNK);
            buffer.clear();
            for _ in 0..n {
                buffer.push(self.read_byte()?);
            }
            sink.write_all(&buffer)?;
            left -= n;
        }
        Ok(u64::from(len))
    }
}

/// 依次写入魔数、扩展名长度、扩展名、有效载荷长度和有效载荷。
pub fn write_frame<R: Read, W: Write>(
    encoder: &mut LsbEncoder<R, W>,
    frame: &Frame,
) -> Result<(), StegoError> {
    let extension_len = field_len(FrameField::ExtensionLength, frame.extension.len())?;
    let payload_len = field_len(FrameField::PayloadLength, frame.payload.len())?;

    encoder.write_bytes(MAGIC_SIGNATURE)?;
    encoder.write_u32(extension_len)?;
    encoder.write_bytes(frame.extension.as_bytes())?;
    encoder.write_u32(payload_len)?;
    encoder.write_bytes(&frame.payload)?;

    debug!(
        "frame written: {} extension bytes, {} payload bytes, {} pixel bytes modified",
        extension_len,
        payload_len,
        encoder.consumed()
    );
    Ok(())
}

/// 读取并校验魔数签名。签名不符时立即返回，不会继续读取后续字段。
pub fn read_signature<R: Read>(decoder: &mut LsbDecoder<R>) -> Result<(), StegoError> {
    let found = decoder.read_bytes(MAGIC_SIGNATURE.len())?;
    if found != MAGIC_SIGNATURE {
        return Err(StegoError::SignatureMismatch {
            expected: MAGIC_SIGNATURE.to_vec(),
            found,
        });
    }
    Ok(())
}

/// 读取扩展名长度和扩展名。
pub fn read_extension<R: Read>(decoder: &mut LsbDecoder<R>) -> Result<String, StegoError> {
    let len = decoder.read_u32()?;
    decoder.ensure_fits(FrameField::Extension, len)?;
    if len as usize > MAX_EXTENSION_LEN {
        return Err(StegoError::LengthOutOfRange {
            field: FrameField::Extension,
            length: u64::from(len),
            available: MAX_EXTENSION_LEN as u64,
        });
    }

    let raw = decoder.read_bytes(len as usize)?;
    let extension = String::from_utf8(raw).map_err(|e| StegoError::InvalidExtension {
        extension: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })?;
    validate_extension(&extension)?;
    Ok(extension)
}

/// 读取有效载荷长度，并确认剩余像素字节足以容纳它。
pub fn read_payload_len<R: Read>(decoder: &mut LsbDecoder<R>) -> Result<u32, StegoError> {
    let len = decoder.read_u32()?;
    decoder.ensure_fits(FrameField::Payload, len)?;
    Ok(len)
}

/// 按固定顺序读取完整的帧。
pub fn read_frame<R: Read>(decoder: &mut LsbDecoder<R>) -> Result<Frame, StegoError> {
    read_signature(decoder)?;
    let extension = read_extension(decoder)?;
    let payload_len = read_payload_len(decoder)?;
    let payload = decoder.read_bytes(payload_len as usize)?;
    Ok(Frame { extension, payload })
}
