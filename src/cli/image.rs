//! # 图片命令参数
//!
//! ImageMagick 图片操作。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用

use crate::models::{Dimensions, ResizeMode};

use clap::Args;
use std::path::PathBuf;

/// image-resize 子命令参数
#[derive(Args, Debug)]
pub struct ImageResizeArgs {
    /// Image file or directory of images
    pub path: PathBuf,

    /// New size (WxH)
    #[arg(short = 's', long, default_value = "1920x1080", value_parser = Dimensions::parse)]
    pub new_size: Dimensions,

    /// 1 crop, 2 pad, 3 fill, 4 shrink only, 5 enlarge only
    #[arg(short, long, default_value = "2", value_parser = ResizeMode::parse_lenient)]
    pub mode: ResizeMode,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// image-frame 子命令参数
#[derive(Args, Debug)]
pub struct ImageFrameArgs {
    /// Image file or directory of images
    pub path: PathBuf,

    /// Border width in pixels
    #[arg(short = 'b', long, default_value_t = 5)]
    pub border_width: u32,

    /// Border color
    #[arg(short = 'c', long, default_value = "black")]
    pub border_color: String,

    /// Corner radius
    #[arg(short = 'r', long, default_value_t = 2)]
    pub border_radius: u32,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// image-crop 子命令参数
#[derive(Args, Debug)]
pub struct ImageCropArgs {
    /// Image file or directory of images
    pub path: PathBuf,

    /// Left offset
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,

    /// Top offset
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub y: i32,

    /// Crop width
    #[arg(short, long)]
    pub width: u32,

    /// Crop height
    #[arg(short = 'H', long)]
    pub height: u32,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}
