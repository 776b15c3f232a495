//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责打开文件、推导输出文件名、调用隐写流程以及向用户报告结果。
//!
//! 输出先写入目标目录中的临时文件，只有整个流程成功后才会落盘到最终路径，
//! 因此失败的操作不会留下残缺的文件。

use crate::cli::{EmbedArgs, ExtractArgs};
use crate::constants::{DEFAULT_DECODED_NAME, DEFAULT_STEGO_NAME};
use crate::error::StegoError;
use crate::frame::Frame;
use crate::pipeline;
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 从秘密文件名中取出扩展名：最后一个 `.` 及其之后的部分。
///
/// # Errors
///
/// * 文件名中没有 `.` 或 `.` 位于末尾时返回 [`StegoError::MissingExtension`]。
/// * 文件名不是合法的 UTF-8 时返回 [`StegoError::InvalidExtension`]。
pub fn secret_extension(path: &Path) -> Result<String, StegoError> {
    let Some(file_name) = path.file_name() else {
        return Err(StegoError::MissingExtension {
            name: path.to_string_lossy().into_owned(),
        });
    };
    let name = file_name
        .to_str()
        .ok_or_else(|| StegoError::InvalidExtension {
            extension: file_name.to_string_lossy().into_owned(),
        })?
        .to_string();

    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => Ok(name[idx..].to_string()),
        _ => Err(StegoError::MissingExtension { name }),
    }
}

/// 隐写结果的默认路径：载体所在目录下的 `stego.bmp`。
pub fn default_stego_path(image: &Path) -> PathBuf {
    image.with_file_name(DEFAULT_STEGO_NAME)
}

/// 提取文件的基础路径 (不含扩展名)。
///
/// 用户给出的名称会去掉自身的扩展名；未给出时使用载体所在目录下的 `decoded`。
pub fn extraction_base(image: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| image.with_file_name(DEFAULT_DECODED_NAME))
        .with_extension("")
}

/// 将解码出的扩展名拼接到基础路径之后。
pub fn final_output_path(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(extension);
    PathBuf::from(name)
}

fn open_input(path: &Path) -> Result<BufReader<File>, StegoError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| StegoError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// 在 `target` 所在目录中创建临时文件，保证之后的重命名不跨文件系统。
///
/// 临时文件默认只有属主可读写，落盘后会沿用该权限；
/// 这里改为 0o666 并交由 umask 过滤，与直接 `fs::write` 的结果一致。
fn staging_file(target: &Path) -> Result<NamedTempFile, StegoError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".bmp_hide-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
        .tempfile_in(dir)
        .map_err(|source| StegoError::ResourceUnavailable {
            path: dir.to_path_buf(),
            source,
        })
}

fn already_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    )
}

fn ensure_not_exists(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Err(already_exists(path));
    }
    Ok(())
}

/// 将临时文件落盘到 `dest`。未指定 `force` 时拒绝覆盖已有文件。
fn commit(writer: BufWriter<NamedTempFile>, dest: &Path, force: bool) -> Result<()> {
    let staged = writer.into_inner().map_err(|e| e.into_error())?;
    let persisted = if force {
        staged.persist(dest)
    } else {
        staged.persist_noclobber(dest)
    };

    match persisted {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Err(already_exists(dest)),
        Err(e) => Err(e.error).with_context(|| {
            format!(
                "Unable to write to target file: {}",
                dest.to_string_lossy().red().bold()
            )
        }),
    }
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责读取秘密文件、推导扩展名、检查载体容量、写入帧，最后将结果图像落盘。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取载体图像或秘密文件。
/// * 秘密文件名没有扩展名。
/// * 图像没有足够的空间来隐藏文件。
/// * 无法写入到目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_stego_path(&args.image));
    ensure_not_exists(&dest, args.force)?;

    let secret = fs::read(&args.secret)
        .map_err(|source| StegoError::ResourceUnavailable {
            path: args.secret.clone(),
            source,
        })
        .with_context(|| {
            format!(
                "Unable to read secret file: {}",
                args.secret.to_string_lossy().red().bold()
            )
        })?;
    info!("Read {} bytes from secret file", secret.len());

    let extension = secret_extension(&args.secret).with_context(|| {
        "The secret file name must carry an extension, e.g. 'note.txt'."
    })?;
    let frame = Frame::new(extension, secret)?;

    let carrier = open_input(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let mut writer = BufWriter::new(staging_file(&dest)?);
    let report = pipeline::embed(carrier, &mut writer, &frame).map_err(|e| match e {
        StegoError::CapacityExceeded {
            required,
            available,
        } => anyhow::Error::new(e).context(format!(
            "Not enough space in the image to hide the file. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        )),
        other => anyhow::Error::new(other).context(format!(
            "Failed to hide the file in '{}'. \nThe image may be corrupt or not a 24-bit BMP.",
            args.image.to_string_lossy().red().bold()
        )),
    })?;

    commit(writer, &dest, args.force)?;

    println!(
        "The file has been successfully hidden ({} of {} bytes used) and saved: {}",
        report.plan.required,
        report.plan.available,
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、校验魔数、根据解码出的扩展名确定输出文件名，
/// 最后将提取的内容落盘。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有本工具写入的魔数签名。
/// * 图像中的长度字段损坏或图像被截断。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let base = extraction_base(&args.image, args.output.as_deref());

    let stego = open_input(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let mut target = None;
    let extracted = pipeline::extract(stego, |extension| {
        let path = final_output_path(&base, extension);
        let staged = staging_file(&path)?;
        target = Some(path);
        Ok(BufWriter::new(staged))
    })
    .with_context(|| {
        format!(
            "Failed to extract a hidden file from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let target = target.unwrap_or_else(|| final_output_path(&base, &extracted.extension));
    commit(extracted.sink, &target, args.force)?;

    println!(
        "The file has been successfully extracted ({} bytes) and saved: {}",
        extracted.payload_len,
        target.to_string_lossy().green().bold()
    );
    Ok(())
}
