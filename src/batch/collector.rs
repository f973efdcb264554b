//! # 文件收集器
//!
//! 列出目录中扩展名在白名单内的普通文件。
//!
//! ## 功能
//! - 只看一层目录，不递归
//! - 保持目录列举顺序
//! - 扩展名精确匹配（区分大小写）
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录，`rand` 洗牌

use crate::error::{MediaError, Result};

use rand::Rng;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// 扩展名白名单（含前导点）
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => &[".mp4", ".avi", ".mpeg", ".webm"],
            MediaKind::Image => &[".jpg", ".bmp", ".png"],
        }
    }

    /// 文件扩展名是否在白名单内
    pub fn matches(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext,
            None => return false,
        };
        self.extensions()
            .iter()
            .any(|allowed| allowed.strip_prefix('.') == Some(ext))
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Image => write!(f, "image"),
        }
    }
}

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    dir: PathBuf,
    /// 媒体类型
    kind: MediaKind,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(dir: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            dir: dir.into(),
            kind,
        }
    }

    /// 收集所有匹配的文件（目录列举顺序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(MediaError::DirectoryNotFound {
                path: self.dir.display().to_string(),
            });
        }

        let files = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.kind.matches(e.path()))
            .map(|e| e.into_path())
            .collect();

        Ok(files)
    }

    /// 收集后随机打乱
    pub fn collect_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<PathBuf>> {
        let mut files = self.collect()?;
        shuffle(&mut files, rng);
        Ok(files)
    }
}

/// 原地无偏洗牌（Durstenfeld）
///
/// 从最后一个位置向前，每个位置 i 与 [0, i] 中均匀随机的位置交换。
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
