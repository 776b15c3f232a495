//! # 位编解码模块
//!
//! 在一个语义值 (字节或 `u32`) 与一段固定长度的载体字节之间做无损转换。
//! 第 `i` 位 (0 为最低位) 写入第 `i` 个载体字节的最低位，其余 7 位保持不变。

use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32};

fn pack_bits(value: u32, carrier: &mut [u8]) {
    for (i, byte) in carrier.iter_mut().enumerate() {
        *byte = (*byte & 0xFE) | ((value >> i) & 1) as u8;
    }
}

fn unpack_bits(carrier: &[u8]) -> u32 {
    carrier
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &byte)| acc | (u32::from(byte & 1) << i))
}

/// 将 `value` 的 8 个位分别写入 `carrier` 中 8 个字节的最低位。
pub fn pack_byte(value: u8, carrier: &mut [u8; CARRIER_BYTES_PER_BYTE]) {
    pack_bits(u32::from(value), carrier);
}

/// 从 8 个载体字节的最低位重建一个字节。
pub fn unpack_byte(carrier: &[u8; CARRIER_BYTES_PER_BYTE]) -> u8 {
    // 只有 8 位参与运算，结果必然落在 u8 范围内
    unpack_bits(carrier) as u8
}

/// 将 `value` 写入 32 个载体字节的最低位。
///
/// 位序显式定义为低位在前，与主机字节序无关，因此不同平台生成的图像可以互相提取。
pub fn pack_u32(value: u32, carrier: &mut [u8; CARRIER_BYTES_PER_U32]) {
    pack_bits(value, carrier);
}

/// 从 32 个载体字节的最低位重建一个 `u32`。
pub fn unpack_u32(carrier: &[u8; CARRIER_BYTES_PER_U32]) -> u32 {
    unpack_bits(carrier)
}
