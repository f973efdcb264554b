//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - 视频: normalize, trim, mute, resize, mix, addsub, dummyaudio,
//!   extract-audio, audio2video, info, length
//! - 合成: logo, text, pip, blend, join, joinrandom, slideshow, publish
//! - 图片: image-resize, image-frame, image-crop
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: video, compose, image

pub mod compose;
pub mod image;
pub mod video;

use crate::batch::FailurePolicy;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mediakit - ffmpeg / ImageMagick 命令行前端
#[derive(Parser)]
#[command(name = "mediakit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Batch video and image operations on top of ffmpeg and ImageMagick",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 全局选项（可通过环境变量设置）
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// ffmpeg executable
    #[arg(long, global = true, env = "MEDIAKIT_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// ffprobe executable
    #[arg(long, global = true, env = "MEDIAKIT_FFPROBE", default_value = "ffprobe")]
    pub ffprobe: String,

    /// ImageMagick convert executable
    #[arg(long, global = true, env = "MEDIAKIT_CONVERT", default_value = "convert")]
    pub convert: String,

    /// Directory holding publish assets (videos/, fonts/, imgs/)
    #[arg(long, global = true, env = "MEDIAKIT_ASSETS", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// What to do when one file of a batch fails
    #[arg(
        long,
        global = true,
        value_enum,
        env = "MEDIAKIT_ON_ERROR",
        default_value = "abort"
    )]
    pub on_error: FailurePolicy,

    /// Do not echo external commands before running them
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    // ─────────────────────────────────────────────────────────────
    // 视频
    // ─────────────────────────────────────────────────────────────
    /// Normalize a footage video: resize, trim, mute
    #[command(alias = "footage")]
    Normalize(video::NormalizeArgs),

    /// Trim a video from time1 to time2
    #[command(alias = "cut")]
    Trim(video::TrimArgs),

    /// Remove audio track from a video
    #[command(alias = "silent")]
    Mute(video::MuteArgs),

    /// Resize a video
    Resize(video::ResizeArgs),

    /// Mix audio and video
    Mix(video::MixArgs),

    /// Burn a subtitle (ass or srt) into the video
    #[command(name = "addsub", alias = "subtitle")]
    AddSub(video::SubtitleArgs),

    /// Add a silent audio track to a video
    #[command(name = "dummyaudio", alias = "da")]
    DummyAudio(video::DummyAudioArgs),

    /// Extract audio track from a video
    ExtractAudio(video::ExtractAudioArgs),

    /// Convert an audio file into a video using a static image
    #[command(name = "audio2video")]
    AudioToVideo(video::AudioToVideoArgs),

    /// Get information about the video
    #[command(alias = "probe")]
    Info(video::InfoArgs),

    /// Get the video duration
    Length(video::LengthArgs),

    // ─────────────────────────────────────────────────────────────
    // 合成
    // ─────────────────────────────────────────────────────────────
    /// Add logo into video
    #[command(alias = "watermark")]
    Logo(compose::LogoArgs),

    /// Overlay a text on top of a video
    Text(compose::TextArgs),

    /// Create a picture-in-picture video
    Pip(compose::PipArgs),

    /// Blend the top video over the bottom video
    Blend(compose::BlendArgs),

    /// Join multiple videos into one
    Join(compose::JoinArgs),

    /// Join videos in a directory in a random order
    #[command(name = "joinrandom")]
    JoinRandom(compose::JoinRandomArgs),

    /// Create a video slideshow from images
    Slideshow(compose::SlideshowArgs),

    /// Publish a video: intro, background, title and ending
    Publish(compose::PublishArgs),

    // ─────────────────────────────────────────────────────────────
    // 图片
    // ─────────────────────────────────────────────────────────────
    /// Resize images using ImageMagick
    ImageResize(image::ImageResizeArgs),

    /// Add a frame to images using ImageMagick
    ImageFrame(image::ImageFrameArgs),

    /// Crop images by a rectangle (x, y, width, height)
    ImageCrop(image::ImageCropArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Corner, JoinMode, ResizeMode};

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aliases_and_defaults() {
        let cli = Cli::try_parse_from(["mediakit", "cut", "clip.mp4", "-b", "00:00:05"]).unwrap();
        match cli.command {
            Commands::Trim(args) => {
                assert_eq!(args.begin_time.as_str(), "00:00:05");
                assert!(args.end_time.timestamp().is_none());
                assert_eq!(args.output, PathBuf::from("."));
            }
            _ => panic!("expected trim"),
        }
        assert_eq!(cli.global.on_error, FailurePolicy::AbortOnFirstError);
        assert!(!cli.global.quiet);
    }

    #[test]
    fn test_trim_requires_begin_time() {
        assert!(Cli::try_parse_from(["mediakit", "trim", "clip.mp4"]).is_err());
    }

    #[test]
    fn test_unknown_modes_fall_back() {
        let cli = Cli::try_parse_from([
            "mediakit", "logo", "in.mp4", "logo.png", "-p", "middle",
        ])
        .unwrap();
        match cli.command {
            Commands::Logo(args) => assert_eq!(args.position, Corner::TopRight),
            _ => panic!("expected logo"),
        }

        let cli = Cli::try_parse_from(["mediakit", "join", "a.mp4", "b.mp4", "-m", "q"]).unwrap();
        match cli.command {
            Commands::Join(args) => assert_eq!(args.join_mode, JoinMode::AudioVideo),
            _ => panic!("expected join"),
        }

        let cli = Cli::try_parse_from(["mediakit", "image-resize", "img", "-m", "7"]).unwrap();
        match cli.command {
            Commands::ImageResize(args) => assert_eq!(args.mode, ResizeMode::ShrinkOnly),
            _ => panic!("expected image-resize"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mediakit",
            "mute",
            "videos",
            "--on-error",
            "continue",
            "--ffmpeg",
            "/opt/ffmpeg/bin/ffmpeg",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.global.on_error, FailurePolicy::ContinueOnError);
        assert_eq!(cli.global.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert!(cli.global.quiet);
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        assert!(Cli::try_parse_from(["mediakit", "resize", "v.mp4", "-s", "big"]).is_err());
    }
}
