//! # 视频命令参数
//!
//! 单个视频或视频目录上的基本操作。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用
//! - 使用 `models::operation` 中的值类型解析参数

use crate::models::{Dimensions, EndTime, Timestamp};

use clap::Args;
use std::path::PathBuf;

/// normalize 子命令参数
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Video file or directory of videos
    pub path: PathBuf,

    /// Start time (HH:MM:SS)
    #[arg(short = 'f', long, default_value = "00:00:00", value_parser = Timestamp::parse)]
    pub start_from: Timestamp,

    /// Maximum duration in seconds; longer videos are cut
    #[arg(short, long, default_value_t = 10.0)]
    pub duration: f64,

    /// New size (W:H)
    #[arg(short = 's', long, default_value = "1920:1080", value_parser = Dimensions::parse)]
    pub new_size: Dimensions,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// trim 子命令参数
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Video file or directory of videos
    pub path: PathBuf,

    /// Begin time (HH:MM:SS)
    #[arg(short, long, value_parser = Timestamp::parse)]
    pub begin_time: Timestamp,

    /// End time (HH:MM:SS) or "end"
    #[arg(short, long, default_value = "end", value_parser = EndTime::parse)]
    pub end_time: EndTime,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// mute 子命令参数
#[derive(Args, Debug)]
pub struct MuteArgs {
    /// Video file or directory of videos
    pub path: PathBuf,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// resize 子命令参数
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Video file or directory of videos
    pub path: PathBuf,

    /// New size (W:H, -1 keeps the aspect ratio)
    #[arg(short = 's', long, value_parser = Dimensions::parse)]
    pub new_size: Dimensions,

    /// New extension, e.g. .webm (default keeps the input extension)
    #[arg(short = 'e', long)]
    pub new_extension: Option<String>,

    /// Output file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// mix 子命令参数
#[derive(Args, Debug)]
pub struct MixArgs {
    /// Audio file
    pub audio: PathBuf,

    /// Video file
    pub video: PathBuf,

    /// Output video
    #[arg(short, long, default_value = "output.mp4")]
    pub output_video: PathBuf,
}

/// addsub 子命令参数
#[derive(Args, Debug)]
pub struct SubtitleArgs {
    /// Video file
    pub video: PathBuf,

    /// Subtitle file (.ass or .srt)
    pub subtitle: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// dummyaudio 子命令参数
#[derive(Args, Debug)]
pub struct DummyAudioArgs {
    /// Video file
    pub video: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// extract-audio 子命令参数
#[derive(Args, Debug)]
pub struct ExtractAudioArgs {
    /// Video file
    pub video: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// audio2video 子命令参数
#[derive(Args, Debug)]
pub struct AudioToVideoArgs {
    /// Audio file
    pub audio: PathBuf,

    /// Cover image
    pub image: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Video file
    pub video: PathBuf,

    /// Print a table of streams instead of the raw ffprobe report
    #[arg(long, default_value_t = false)]
    pub streams: bool,
}

/// length 子命令参数
#[derive(Args, Debug)]
pub struct LengthArgs {
    /// Video file
    pub video: PathBuf,
}
