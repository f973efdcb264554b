//! # concat 列表文件
//!
//! 生成 ffmpeg concat demuxer 使用的列表文件（每行 `file '<path>'`），
//! 用于把背景视频循环足够多次。
//!
//! ## 依赖关系
//! - 被 `commands/compose.rs`（pip, publish）使用

use crate::error::{MediaError, Result};

use std::fs;
use std::path::Path;

/// 生成列表内容：同一文件重复 `repeat` 次
pub fn render_concat_list(entry: &Path, repeat: usize) -> String {
    let escaped = entry.to_string_lossy().replace('\'', "'\\''");
    let line = format!("file '{}'\n", escaped);
    line.repeat(repeat)
}

/// 写入列表文件
///
/// 条目写成绝对路径；concat demuxer 以列表文件所在目录解析相对路径。
pub fn write_concat_list(list_path: &Path, entry: &Path, repeat: usize) -> Result<()> {
    let entry = fs::canonicalize(entry).unwrap_or_else(|_| entry.to_path_buf());
    fs::write(list_path, render_concat_list(&entry, repeat)).map_err(|e| {
        MediaError::FileWriteError {
            path: list_path.display().to_string(),
            source: e,
        }
    })
}
