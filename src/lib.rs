//! # bmp_hide 库
//!
//! 本库包含 BMP LSB 隐写工具的核心逻辑：位编解码、帧协议、容量规划，
//! 以及基于 `Read`/`Write` 的隐写与提取流程。

// 声明库包含的所有模块。

pub mod bitmap;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod pipeline;
pub mod steganography;

pub use error::StegoError;
