//! # 容量规划模块
//!
//! 在写入任何载体字节之前，判断图像能否容纳整个帧。纯计算，无副作用。

use crate::constants::{CARRIER_BYTES_PER_BYTE, LENGTH_FIELD_BYTES};
use crate::error::StegoError;

/// 一次容量检查的结果，单位均为 "有效载荷字节"。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPlan {
    pub required: u64,
    pub available: u64,
}

impl CapacityPlan {
    /// `required = magic + 4 + extension + 4 + payload`，
    /// `available = pixel_bytes / 8` (末尾不足 8 个的像素字节无法使用)。
    pub fn new(pixel_bytes: u64, magic_len: u64, extension_len: u64, payload_len: u64) -> Self {
        let required = magic_len
            .saturating_add(LENGTH_FIELD_BYTES)
            .saturating_add(extension_len)
            .saturating_add(LENGTH_FIELD_BYTES)
            .saturating_add(payload_len);
        Self {
            required,
            available: pixel_bytes / CARRIER_BYTES_PER_BYTE as u64,
        }
    }

    pub fn is_sufficient(&self) -> bool {
        self.available >= self.required
    }

    /// 容量不足时返回 [`StegoError::CapacityExceeded`]。
    pub fn ensure(self) -> Result<Self, StegoError> {
        if self.is_sufficient() {
            Ok(self)
        } else {
            Err(StegoError::CapacityExceeded {
                required: self.required,
                available: self.available,
            })
        }
    }
}

/// 判断 `carrier_pixel_byte_count` 个像素字节是否足以容纳给定大小的帧。
pub fn plan_capacity(
    carrier_pixel_byte_count: u64,
    magic_len: u64,
    extension_len: u64,
    payload_len: u64,
) -> bool {
    CapacityPlan::new(carrier_pixel_byte_count, magic_len, extension_len, payload_len)
        .is_sufficient()
}
