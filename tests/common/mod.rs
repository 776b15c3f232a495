//! 测试共用的辅助函数

#![allow(dead_code)]

use rand::RngCore;

/// 构造一个无压缩 24 位 BMP：54 字节头部 + `width * height * 3` 个像素字节 (无行填充)。
pub fn bmp_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0..2].copy_from_slice(b"BM");
    bmp[2..6].copy_from_slice(&(54 + pixels.len() as u32).to_le_bytes());
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes());
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes());
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes());
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(pixels);
    bmp
}

/// 带随机像素的 BMP。
pub fn random_bmp(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut pixels);
    bmp_bytes(width, height, &pixels)
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}
