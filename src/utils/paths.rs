//! # 路径工具
//!
//! 输入路径分类与输出文件名推导。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 无外部模块依赖

use crate::error::{MediaError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// 输入路径类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    /// 既不是文件也不是目录（包括不存在）
    Invalid,
}

/// 判断路径是文件、目录还是无效路径
pub fn classify(path: &Path) -> PathKind {
    if path.is_file() {
        PathKind::File
    } else if path.is_dir() {
        PathKind::Directory
    } else {
        PathKind::Invalid
    }
}

/// 不含扩展名的文件名
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// 带前导点的扩展名，没有扩展名时为空串
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// 推导输出路径：`out_dir / (stem + suffix + ext)`
///
/// `extension` 为 `None` 时沿用输入文件的扩展名。
pub fn derive_output(
    out_dir: &Path,
    input: &Path,
    suffix: &str,
    extension: Option<&str>,
) -> PathBuf {
    let ext = match extension {
        Some(ext) if ext.is_empty() || ext.starts_with('.') => ext.to_string(),
        Some(ext) => format!(".{}", ext),
        None => dotted_extension(input),
    };
    out_dir.join(format!("{}{}{}", file_stem(input), suffix, ext))
}

/// 单文件模式的输出路径
///
/// `target` 是已存在的目录时按 [`derive_output`] 推导，否则直接作为输出文件。
pub fn resolve_output(
    target: &Path,
    input: &Path,
    suffix: &str,
    extension: Option<&str>,
) -> PathBuf {
    if target.is_dir() {
        derive_output(target, input, suffix, extension)
    } else {
        target.to_path_buf()
    }
}

/// 确保目录存在
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| MediaError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
