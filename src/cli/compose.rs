//! # 合成命令参数
//!
//! 叠加、拼接、幻灯片与发布。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用
//! - 使用 `models::operation` 中的值类型解析参数

use crate::models::{Corner, Dimensions, EndTime, HorizontalAlign, JoinMode, Timestamp, VerticalAlign};

use clap::Args;
use std::path::PathBuf;

/// logo 子命令参数
#[derive(Args, Debug)]
pub struct LogoArgs {
    /// Video file
    pub video: PathBuf,

    /// Logo image (default: imgs/logo.png in the assets directory)
    pub logo: Option<PathBuf>,

    /// Horizontal margin in pixels
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub x: i32,

    /// Vertical margin in pixels
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub y: i32,

    /// Corner: tl, tr, bl or br
    #[arg(short, long, default_value = "tr", value_parser = Corner::parse_lenient)]
    pub position: Corner,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output: PathBuf,
}

/// text 子命令参数
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Video file
    pub video: PathBuf,

    /// File holding the text to draw
    pub text_file: PathBuf,

    /// left, center or right
    #[arg(long, default_value = "center", value_parser = HorizontalAlign::parse_lenient)]
    pub horizontal_align: HorizontalAlign,

    /// top, middle or bottom
    #[arg(long, default_value = "middle", value_parser = VerticalAlign::parse_lenient)]
    pub vertical_align: VerticalAlign,

    /// Horizontal margin in pixels
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub x: i32,

    /// Vertical margin in pixels
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub y: i32,

    /// Text color
    #[arg(short = 'c', long, default_value = "white")]
    pub text_color: String,

    /// Font file (default: the font in the assets directory)
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Font size
    #[arg(short = 's', long, default_value_t = 24)]
    pub font_size: u32,

    /// Show the text from this time
    #[arg(short, long, default_value = "00:00:00", value_parser = Timestamp::parse)]
    pub begin_time: Timestamp,

    /// Hide the text after this time, or "end"
    #[arg(short, long, default_value = "end", value_parser = EndTime::parse)]
    pub end_time: EndTime,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output_video: PathBuf,
}

/// pip 子命令参数
#[derive(Args, Debug)]
pub struct PipArgs {
    /// Foreground video
    pub input_video: PathBuf,

    /// Background video (looped)
    pub background_video: PathBuf,

    /// Left offset of the foreground
    #[arg(short, long, default_value_t = 368, allow_negative_numbers = true)]
    pub x: i32,

    /// Top offset of the foreground
    #[arg(short, long, default_value_t = 218, allow_negative_numbers = true)]
    pub y: i32,

    /// Width of the foreground
    #[arg(long, default_value_t = 1185, allow_negative_numbers = true)]
    pub width: i32,

    /// Height of the foreground (-1 keeps the aspect ratio)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub height: i32,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output_video: PathBuf,
}

impl PipArgs {
    pub fn size(&self) -> Result<Dimensions, String> {
        Dimensions::parse(&format!("{}:{}", self.width, self.height))
    }
}

/// blend 子命令参数
#[derive(Args, Debug)]
pub struct BlendArgs {
    /// Top layer video
    pub top_video: PathBuf,

    /// Bottom layer video
    pub bottom_video: PathBuf,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output_video: PathBuf,
}

/// join 子命令参数
#[derive(Args, Debug)]
pub struct JoinArgs {
    /// First video
    pub video1: PathBuf,

    /// Second video
    pub video2: PathBuf,

    /// More videos
    pub videos: Vec<PathBuf>,

    /// a (audio only), v (video only) or av
    #[arg(short = 'm', long, default_value = "av", value_parser = JoinMode::parse_lenient)]
    pub join_mode: JoinMode,

    /// Logo overlaid at the top right corner
    #[arg(short, long)]
    pub logo: Option<PathBuf>,

    /// Title drawn at the top left corner
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output_video: PathBuf,
}

impl JoinArgs {
    /// 按命令行顺序排列的全部输入
    pub fn inputs(&self) -> Vec<PathBuf> {
        let mut all = vec![self.video1.clone(), self.video2.clone()];
        all.extend(self.videos.iter().cloned());
        all
    }
}

/// joinrandom 子命令参数
#[derive(Args, Debug)]
pub struct JoinRandomArgs {
    /// Directory of videos
    pub video_directory: PathBuf,

    /// a (audio only), v (video only) or av
    #[arg(short = 'm', long, default_value = "av", value_parser = JoinMode::parse_lenient)]
    pub join_mode: JoinMode,

    /// Minimum total duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    pub duration: f64,

    /// Logo overlaid at the top right corner
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Title drawn at the top left corner
    #[arg(long)]
    pub title: Option<String>,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output: PathBuf,
}

/// slideshow 子命令参数
#[derive(Args, Debug)]
pub struct SlideshowArgs {
    /// Directory of images
    pub image_path: PathBuf,

    /// Video size (W:H)
    #[arg(short = 's', long, default_value = "1920:1080", value_parser = Dimensions::parse)]
    pub new_size: Dimensions,

    /// Logo overlaid at the top right corner
    #[arg(short, long)]
    pub logo: Option<PathBuf>,

    /// Title drawn at the top left corner
    #[arg(short, long)]
    pub title: Option<String>,

    /// Seconds each image stays on screen
    #[arg(short = 'd', long, default_value_t = 6)]
    pub slot_duration: u32,

    /// Number of slots in the slideshow
    #[arg(short = 'c', long, default_value_t = 10)]
    pub image_count: usize,

    /// Output video (default: slideshow__<date>__<time>.mp4)
    #[arg(short, long)]
    pub output_video: Option<PathBuf>,
}

/// publish 子命令参数
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Main video; its title is read from a .txt file of the same name
    pub video_file: PathBuf,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}
