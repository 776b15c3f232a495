//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 24 位 BMP 图像中隐藏或提取任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 24 位 BMP 图像中隐藏或提取任意文件。\n\
                  设置环境变量 RUST_LOG=debug 可查看详细的处理过程。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (隐藏) 和 extract (提取)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将秘密文件隐藏到 BMP 图像的像素数据中。
    #[command(visible_alias = "e")]
    Embed(EmbedArgs),

    /// 从经过隐写的 BMP 图像中提取秘密文件。
    #[command(visible_alias = "d")]
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// 用作载体的 24 位 BMP 图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径，文件名必须带有扩展名。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 隐写结果的输出路径，默认为载体所在目录下的 `stego.bmp`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// 已隐藏文件的 BMP 图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 输出文件的基础名，扩展名会被去掉并替换为图像中记录的扩展名。
    /// 默认为图像所在目录下的 `decoded`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
