//! # 运行配置
//!
//! 外部程序名称与素材路径。由全局命令行参数（或对应环境变量）构造，
//! 显式传入需要它的命令。
//!
//! ## 依赖关系
//! - 由 `main.rs` 根据 `cli::GlobalArgs` 构造
//! - 被 `commands/` 使用

use crate::builder::ffmpeg::{Ffmpeg, Ffprobe};
use crate::builder::magick::Magick;
use crate::cli::GlobalArgs;

use std::path::{Path, PathBuf};

/// 发布视频等合成操作所需的素材路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub opening_video: PathBuf,
    pub ending_video: PathBuf,
    pub background_video: PathBuf,
    pub font: PathBuf,
    pub logo: PathBuf,
}

impl AssetPaths {
    /// 以素材目录为根解析各素材路径
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            opening_video: dir.join("videos").join("open.mp4"),
            ending_video: dir.join("videos").join("end.mp4"),
            background_video: dir.join("videos").join("background.mp4"),
            font: dir.join("fonts").join("arial.ttf"),
            logo: dir.join("imgs").join("logo.png"),
        }
    }
}

/// 外部程序与素材配置
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
    pub convert: String,
    pub assets: AssetPaths,
}

impl ToolConfig {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            ffmpeg: args.ffmpeg.clone(),
            ffprobe: args.ffprobe.clone(),
            convert: args.convert.clone(),
            assets: AssetPaths::from_dir(&args.assets_dir),
        }
    }

    pub fn ffmpeg(&self) -> Ffmpeg {
        Ffmpeg::new(self.ffmpeg.as_str())
    }

    pub fn ffprobe(&self) -> Ffprobe {
        Ffprobe::new(self.ffprobe.as_str())
    }

    pub fn magick(&self) -> Magick {
        Magick::new(self.convert.as_str())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            convert: "convert".to_string(),
            assets: AssetPaths::from_dir(Path::new("assets")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths_from_dir() {
        let assets = AssetPaths::from_dir(Path::new("/opt/media"));
        assert_eq!(assets.opening_video, Path::new("/opt/media/videos/open.mp4"));
        assert_eq!(assets.ending_video, Path::new("/opt/media/videos/end.mp4"));
        assert_eq!(
            assets.background_video,
            Path::new("/opt/media/videos/background.mp4")
        );
        assert_eq!(assets.font, Path::new("/opt/media/fonts/arial.ttf"));
        assert_eq!(assets.logo, Path::new("/opt/media/imgs/logo.png"));
    }
}
