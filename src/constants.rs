/// BMP 文件的标准头部大小 (字节)。
/// 头部原样复制 (隐藏) 或直接跳过 (提取)，隐写从像素数据开始。
pub const BMP_HEADER_SIZE: usize = 54;

/// 头部中图像宽度 (小端 i32) 的偏移量。
pub const BMP_WIDTH_OFFSET: usize = 18;

/// 头部中图像高度 (小端 i32) 的偏移量。
pub const BMP_HEIGHT_OFFSET: usize = 22;

/// 每个像素占用的字节数 (仅支持无压缩 24 位 BMP)。
pub const BYTES_PER_PIXEL: u64 = 3;

/// 魔数签名，写在帧的最前面，用于识别经过隐写的图像。
/// 修改它会导致之前生成的隐写图像全部无法提取。
pub const MAGIC_SIGNATURE: &[u8] = b"#*";

/// 长度字段 (`u32`) 在 "有效载荷字节" 意义下占用的字节数。
pub const LENGTH_FIELD_BYTES: u64 = 4;

/// 隐写一个字节所需的像素字节数。
/// 每个像素字节只在最低位存储 1 bit，因此需要 8 个像素字节。
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// 隐写一个 `u32` 长度字段所需的像素字节数 (32 bits，每字节 1 bit)。
pub const CARRIER_BYTES_PER_U32: usize = 32;

/// 扩展名 (含前导 `.`) 允许的最大字节数。
pub const MAX_EXTENSION_LEN: usize = 255;

/// 未指定输出路径时，隐写图像的默认文件名。
pub const DEFAULT_STEGO_NAME: &str = "stego.bmp";

/// 未指定输出路径时，提取文件的默认基础名 (扩展名来自图像本身)。
pub const DEFAULT_DECODED_NAME: &str = "decoded";
