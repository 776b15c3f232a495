//! # 隐写与提取流程
//!
//! 两条线性流程，任何一步失败都会立即中止：
//!
//! * 隐写：容量检查 → 复制头部 → 写入帧 → 复制剩余像素字节。
//! * 提取：跳过头部 → 校验魔数 → 读取扩展名 → 读取长度 → 写出有效载荷。
//!
//! 两者都只依赖 `Read`/`Write`，文件的打开、命名和落盘由 `handler` 负责。

use crate::bitmap::BmpHeader;
use crate::capacity::CapacityPlan;
use crate::error::StegoError;
use crate::frame::{self, Frame, LsbDecoder, LsbEncoder};
use log::{debug, info};
use std::io::{Read, Write};

/// 一次隐写的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    pub plan: CapacityPlan,
    /// 帧占用 (被改写) 的像素字节数。
    pub frame_bytes: u64,
    /// 原样复制的剩余字节数。
    pub tail_bytes: u64,
}

/// 提取结果：解码出的扩展名、有效载荷长度，以及已写满的输出端。
#[derive(Debug)]
pub struct Extracted<W> {
    pub extension: String,
    pub payload_len: u32,
    pub sink: W,
}

/// 将 `frame` 隐写进 `carrier`，结果写入 `dest`。
///
/// 容量检查在写入任何字节之前完成；检查失败时 `dest` 保持为空。
/// 输出长度与源图像相同，且只有帧区域内像素字节的最低位可能不同。
///
/// # Errors
///
/// * [`StegoError::NotBitmap`] - 载体头部无效。
/// * [`StegoError::CapacityExceeded`] - 图像放不下整个帧。
/// * [`StegoError::TruncatedCarrier`] - 载体的实际长度短于头部声明的像素字节数。
pub fn embed<R: Read, W: Write>(
    mut carrier: R,
    mut dest: W,
    frame: &Frame,
) -> Result<EmbedReport, StegoError> {
    let header = BmpHeader::read_from(&mut carrier)?;
    let pixel_bytes = header.pixel_byte_count()?;
    let plan = frame.capacity_plan(pixel_bytes).ensure()?;
    info!(
        "Capacity check passed: {} of {} bytes required",
        plan.required, plan.available
    );

    dest.write_all(header.as_bytes())?;
    info!("Copied {}x{} bitmap header", header.width(), header.height());

    let mut encoder = LsbEncoder::new(carrier, dest);
    frame::write_frame(&mut encoder, frame)?;
    let frame_bytes = encoder.consumed();
    info!("Embedded frame with extension '{}'", frame.extension);

    let (_, tail_bytes) = encoder.finish()?;
    debug!("Copied {tail_bytes} remaining carrier bytes");

    Ok(EmbedReport {
        plan,
        frame_bytes,
        tail_bytes,
    })
}

/// 从 `carrier` 中提取隐藏的文件。
///
/// `open_sink` 在扩展名解码之后、有效载荷写出之前被调用一次，
/// 调用方可以据此决定输出文件名。
///
/// # Errors
///
/// * [`StegoError::SignatureMismatch`] - 图像不包含本工具写入的帧，后续字段不会被读取。
/// * [`StegoError::LengthOutOfRange`] - 长度字段超出剩余像素字节的容量。
/// * [`StegoError::TruncatedCarrier`] - 载体在帧结束之前就已耗尽。
pub fn extract<R, W, F>(mut carrier: R, open_sink: F) -> Result<Extracted<W>, StegoError>
where
    R: Read,
    W: Write,
    F: FnOnce(&str) -> Result<W, StegoError>,
{
    let header = BmpHeader::read_from(&mut carrier)?;
    let mut decoder = LsbDecoder::new(carrier, header.pixel_byte_count()?);

    frame::read_signature(&mut decoder)?;
    info!("Magic signature matched");

    let extension = frame::read_extension(&mut decoder)?;
    info!("Decoded file extension '{extension}'");

    let mut sink = open_sink(&extension)?;

    let payload_len = frame::read_payload_len(&mut decoder)?;
    debug!("Payload length: {payload_len} bytes");

    decoder.copy_to(payload_len, &mut sink)?;
    sink.flush()?;
    info!("Extracted {payload_len} payload bytes");

    Ok(Extracted {
        extension,
        payload_len,
        sink,
    })
}

/// 在内存中提取完整的帧，不涉及任何输出端。
pub fn extract_frame<R: Read>(mut carrier: R) -> Result<Frame, StegoError> {
    let header = BmpHeader::read_from(&mut carrier)?;
    let mut decoder = LsbDecoder::new(carrier, header.pixel_byte_count()?);
    frame::read_frame(&mut decoder)
}
