//! # 合成命令实现
//!
//! ## 功能
//! - logo / text / pip / blend：单次 ffmpeg 调用
//! - join / joinrandom：按拼接模式串联，可选 logo 与标题
//! - slideshow：随机打乱图片后循环填满指定数量的位置
//! - publish：检查素材与音频流，合成片头、正片、片尾与背景
//!
//! ## 依赖关系
//! - 使用 `cli/compose.rs` 定义的参数
//! - 使用 `builder::ffmpeg`, `batch::FileCollector`
//! - 使用 `utils/concat_list.rs` 写背景列表文件

use super::{probe, require_file, Context};
use crate::batch::{FileCollector, MediaKind};
use crate::builder::ffmpeg::{DrawTextOp, JoinOp, PipOp, PublishOp, SlideshowOp};
use crate::cli::compose::{
    BlendArgs, JoinArgs, JoinRandomArgs, LogoArgs, PipArgs, PublishArgs, SlideshowArgs, TextArgs,
};
use crate::error::{MediaError, Result};
use crate::models::{format_duration, JoinMode};
use crate::utils::concat_list::write_concat_list;
use crate::utils::paths::{self, PathKind};
use crate::utils::output;

use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// pip 背景列表文件（工作目录）
const PIP_LIST: &str = "bg.tmp";
const PIP_REPEAT: usize = 36000;

/// publish 背景列表文件（工作目录）
const PUBLISH_LIST: &str = "background.lst";
const PUBLISH_REPEAT: usize = 3000;

/// 执行 logo 命令
pub fn logo(args: LogoArgs, ctx: &mut Context<'_>) -> Result<()> {
    let logo = args
        .logo
        .clone()
        .unwrap_or_else(|| ctx.config.assets.logo.clone());
    require_file(&args.video)?;
    require_file(&logo)?;

    let cmd = ctx.config.ffmpeg().logo(
        &args.video,
        &logo,
        args.position,
        args.x,
        args.y,
        &args.output,
    );
    ctx.run(&cmd)?;
    output::print_success(&format!("Created {}", args.output.display()));
    Ok(())
}

/// 执行 text 命令
pub fn text(args: TextArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;
    require_file(&args.text_file)?;

    let font = args
        .font
        .clone()
        .unwrap_or_else(|| ctx.config.assets.font.clone());
    let op = DrawTextOp {
        input: args.video,
        text_file: args.text_file,
        horizontal: args.horizontal_align,
        vertical: args.vertical_align,
        margin_x: args.x,
        margin_y: args.y,
        color: args.text_color,
        font,
        font_size: args.font_size,
        begin: args.begin_time,
        end: args.end_time,
        output: args.output_video,
    };
    let cmd = ctx.config.ffmpeg().draw_text(&op);
    ctx.run(&cmd)?;
    output::print_success(&format!("Created {}", op.output.display()));
    Ok(())
}

/// 执行 pip 命令
pub fn pip(args: PipArgs, ctx: &mut Context<'_>) -> Result<()> {
    pip_with_list(args, ctx, Path::new(PIP_LIST))
}

fn pip_with_list(args: PipArgs, ctx: &mut Context<'_>, list: &Path) -> Result<()> {
    require_file(&args.input_video)?;
    require_file(&args.background_video)?;
    let size = args.size().map_err(MediaError::InvalidArgument)?;

    write_concat_list(list, &args.background_video, PIP_REPEAT)?;

    let op = PipOp {
        input: args.input_video,
        background_list: list.to_path_buf(),
        x: args.x,
        y: args.y,
        size,
        output: args.output_video,
    };
    let cmd = ctx.config.ffmpeg().picture_in_picture(&op);
    ctx.run(&cmd)?;
    output::print_success(&format!("Created {}", op.output.display()));
    Ok(())
}

/// 执行 blend 命令
pub fn blend(args: BlendArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.top_video)?;
    require_file(&args.bottom_video)?;

    let cmd = ctx
        .config
        .ffmpeg()
        .blend(&args.top_video, &args.bottom_video, &args.output_video);
    ctx.run(&cmd)?;
    output::print_success(&format!("Created {}", args.output_video.display()));
    Ok(())
}

/// 执行 join 命令
pub fn join(args: JoinArgs, ctx: &mut Context<'_>) -> Result<()> {
    let inputs = args.inputs();
    for input in &inputs {
        require_file(input)?;
    }

    run_join(
        ctx,
        inputs,
        args.join_mode,
        args.logo,
        args.title,
        args.output_video,
    )
}

fn run_join(
    ctx: &mut Context<'_>,
    inputs: Vec<PathBuf>,
    mode: JoinMode,
    logo: Option<PathBuf>,
    title: Option<String>,
    output_path: PathBuf,
) -> Result<()> {
    if let Some(logo) = &logo {
        require_file(logo)?;
    }
    if !mode.has_video() && (logo.is_some() || title.is_some()) {
        output::print_warning("Audio-only join: logo and title are ignored");
    }

    let count = inputs.len();
    let op = JoinOp {
        inputs,
        mode,
        logo,
        title,
        font: ctx.config.assets.font.clone(),
        output: output_path,
    };
    let cmd = ctx.config.ffmpeg().join(&op);
    ctx.run(&cmd)?;
    output::print_success(&format!("Joined {} videos into {}", count, op.output.display()));
    Ok(())
}

/// 执行 joinrandom 命令
pub fn join_random(args: JoinRandomArgs, ctx: &mut Context<'_>) -> Result<()> {
    join_random_with(args, ctx, &mut rand::thread_rng())
}

fn join_random_with<R: Rng + ?Sized>(
    args: JoinRandomArgs,
    ctx: &mut Context<'_>,
    rng: &mut R,
) -> Result<()> {
    if paths::classify(&args.video_directory) != PathKind::Directory {
        return Err(MediaError::InvalidPath {
            path: args.video_directory.display().to_string(),
        });
    }

    let files = FileCollector::new(&args.video_directory, MediaKind::Video).collect_shuffled(rng)?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No video files found in {}",
            args.video_directory.display()
        ));
        return Ok(());
    }

    let (picked, total) = pick_until_duration(ctx, files, args.duration)?;
    output::print_info(&format!(
        "Picked {} videos, {} in total",
        picked.len(),
        format_duration(total)
    ));

    run_join(ctx, picked, args.join_mode, args.logo, args.title, args.output)
}

/// 依次累加时长，总时长超过 `max_seconds` 时停止
fn pick_until_duration(
    ctx: &mut Context<'_>,
    files: Vec<PathBuf>,
    max_seconds: f64,
) -> Result<(Vec<PathBuf>, f64)> {
    let mut picked = Vec::new();
    let mut total = 0.0;
    for file in files {
        total += probe::query_duration(ctx, &file)?;
        picked.push(file);
        if total > max_seconds {
            break;
        }
    }
    Ok((picked, total))
}

/// 执行 slideshow 命令
pub fn slideshow(args: SlideshowArgs, ctx: &mut Context<'_>) -> Result<()> {
    slideshow_with(args, ctx, &mut rand::thread_rng())
}

fn slideshow_with<R: Rng + ?Sized>(
    args: SlideshowArgs,
    ctx: &mut Context<'_>,
    rng: &mut R,
) -> Result<()> {
    if paths::classify(&args.image_path) != PathKind::Directory {
        return Err(MediaError::InvalidArgument(format!(
            "Create slideshow failed. {} is not a valid path. The path must be a directory",
            args.image_path.display()
        )));
    }
    if args.slot_duration < 1 {
        return Err(MediaError::InvalidArgument(
            "slot duration must be at least 1 second".to_string(),
        ));
    }
    if args.image_count < 1 {
        return Err(MediaError::InvalidArgument(
            "image count must be at least 1".to_string(),
        ));
    }
    if let Some(logo) = &args.logo {
        require_file(logo)?;
    }

    let sources = FileCollector::new(&args.image_path, MediaKind::Image).collect_shuffled(rng)?;
    if sources.is_empty() {
        output::print_warning(&format!(
            "No image files found in {}",
            args.image_path.display()
        ));
        return Ok(());
    }

    let images = fill_slots(&sources, args.image_count);
    let output_path = args.output_video.unwrap_or_else(default_slideshow_name);

    let op = SlideshowOp {
        images,
        slot_seconds: args.slot_duration,
        size: args.new_size,
        logo: args.logo,
        title: args.title,
        font: ctx.config.assets.font.clone(),
        output: output_path,
    };
    let cmd = ctx.config.ffmpeg().slideshow(&op);
    ctx.run(&cmd)?;
    output::print_success(&format!(
        "Created {} ({} slots of {}s)",
        op.output.display(),
        op.images.len(),
        op.slot_seconds
    ));
    Ok(())
}

/// 循环使用图片，恰好填满 `count` 个位置
fn fill_slots(sources: &[PathBuf], count: usize) -> Vec<PathBuf> {
    sources.iter().cycle().take(count).cloned().collect()
}

fn default_slideshow_name() -> PathBuf {
    PathBuf::from(
        chrono::Local::now()
            .format("slideshow__%Y-%m-%d__%H-%M-%S.mp4")
            .to_string(),
    )
}

/// 执行 publish 命令
pub fn publish(args: PublishArgs, ctx: &mut Context<'_>) -> Result<()> {
    publish_with_list(args, ctx, Path::new(PUBLISH_LIST))
}

fn publish_with_list(args: PublishArgs, ctx: &mut Context<'_>, list: &Path) -> Result<()> {
    let started = Instant::now();

    if !args.video_file.is_file() {
        output::print_warning(&format!(
            "Invalid input video file. Input = {}",
            args.video_file.display()
        ));
        return Ok(());
    }

    let target = if args.output.is_dir() {
        paths::derive_output(&args.output, &args.video_file, "_published", None)
    } else if args.output.is_file() {
        args.output.clone()
    } else {
        output::print_warning(&format!(
            "Invalid output. Output must be a valid file or directory. Output = {}",
            args.output.display()
        ));
        return Ok(());
    };

    let assets = ctx.config.assets.clone();
    let text_file = args.video_file.with_extension("txt");

    output::print_info("Check file exists ...");
    let required = [
        args.video_file.as_path(),
        assets.opening_video.as_path(),
        assets.ending_video.as_path(),
        assets.background_video.as_path(),
        text_file.as_path(),
        assets.font.as_path(),
    ];
    if !check_files_exist(&required) {
        return Ok(());
    }

    println!();
    output::print_info("Check input videos ...");
    let with_audio = [
        assets.opening_video.as_path(),
        assets.ending_video.as_path(),
        assets.background_video.as_path(),
        args.video_file.as_path(),
    ];
    if !check_audio_streams(ctx, &with_audio)? {
        return Ok(());
    }

    write_concat_list(list, &assets.background_video, PUBLISH_REPEAT)?;

    let op = PublishOp {
        background_list: list.to_path_buf(),
        opening: assets.opening_video.clone(),
        main: args.video_file.clone(),
        ending: assets.ending_video.clone(),
        text_file,
        font: assets.font.clone(),
        output: target,
    };
    let cmd = ctx.config.ffmpeg().publish(&op);
    ctx.run(&cmd)?;

    output::print_done(&format!(
        "Publish video in {} -> {}",
        format_duration(started.elapsed().as_secs_f64()),
        op.output.display()
    ));
    Ok(())
}

/// 逐项检查文件是否存在，遇到第一个缺失项即停止
fn check_files_exist(files: &[&Path]) -> bool {
    for (i, file) in files.iter().enumerate() {
        let label = file.display().to_string();
        if !file.is_file() {
            output::print_check(
                i + 1,
                &label,
                false,
                "missing. It is required to publish this video",
            );
            return false;
        }
        output::print_check(i + 1, &label, true, "");
    }
    true
}

/// 逐个确认视频至少有一路音频流
fn check_audio_streams(ctx: &mut Context<'_>, videos: &[&Path]) -> Result<bool> {
    for (i, video) in videos.iter().enumerate() {
        let label = video.display().to_string();
        if probe::audio_stream_count(ctx, video)? == 0 {
            output::print_check(i + 1, &label, false, "has no audio stream. Error!");
            return Ok(false);
        }
        output::print_check(i + 1, &label, true, "");
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FailurePolicy;
    use crate::commands::testing::touch;
    use crate::config::{AssetPaths, ToolConfig};
    use crate::models::Dimensions;
    use crate::utils::process::fake::RecordingInvoker;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::TempDir;

    fn context(invoker: &mut RecordingInvoker) -> Context<'_> {
        Context::new(ToolConfig::default(), FailurePolicy::default(), invoker)
    }

    fn filter_of(args: &[String]) -> &str {
        let pos = args.iter().position(|a| a == "-filter_complex").unwrap();
        &args[pos + 1]
    }

    #[test]
    fn test_fill_slots_cycles_sources() {
        let sources: Vec<PathBuf> = ["a.jpg", "b.jpg", "c.jpg"].iter().map(PathBuf::from).collect();
        let slots = fill_slots(&sources, 7);
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[3], sources[0]);
        assert_eq!(slots[6], sources[0]);
        assert_eq!(fill_slots(&sources, 2).len(), 2);
    }

    #[test]
    fn test_default_slideshow_name_shape() {
        let name = default_slideshow_name().display().to_string();
        assert!(name.starts_with("slideshow__"));
        assert!(name.ends_with(".mp4"));
        assert_eq!(name.len(), "slideshow__2024-01-01__00-00-00.mp4".len());
    }

    #[test]
    fn test_pick_until_duration_stops_after_exceeding() {
        let files: Vec<PathBuf> = ["a.mp4", "b.mp4", "c.mp4", "d.mp4"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let mut invoker = RecordingInvoker::new()
            .respond("a.mp4", "25.0")
            .respond("b.mp4", "30.0")
            .respond("c.mp4", "10.0")
            .respond("d.mp4", "40.0");
        let mut ctx = context(&mut invoker);

        let (picked, total) = pick_until_duration(&mut ctx, files, 60.0).unwrap();
        assert_eq!(picked.len(), 3);
        assert!((total - 65.0).abs() < 1e-9);
        assert_eq!(invoker.captures.len(), 3);
    }

    #[test]
    fn test_join_random_uses_all_short_videos() {
        let dir = TempDir::new().unwrap();
        let files = touch(dir.path(), &["a.mp4", "b.mp4", "notes.txt"]);
        let mut invoker = RecordingInvoker::new()
            .respond(&files[0].display().to_string(), "5.0")
            .respond(&files[1].display().to_string(), "5.0");
        let mut ctx = context(&mut invoker);

        let args = JoinRandomArgs {
            video_directory: dir.path().to_path_buf(),
            join_mode: JoinMode::VideoOnly,
            duration: 60.0,
            logo: None,
            title: None,
            output: dir.path().join("out.mp4"),
        };
        join_random_with(args, &mut ctx, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(invoker.runs.len(), 1);
        let filter = filter_of(invoker.runs[0].get_args());
        assert!(filter.contains("concat=n=2:v=1:a=0"));
    }

    #[test]
    fn test_slideshow_requires_directory() {
        let mut invoker = RecordingInvoker::new();
        let mut ctx = context(&mut invoker);
        let args = SlideshowArgs {
            image_path: PathBuf::from("/no/such/dir"),
            new_size: Dimensions::new(1920, 1080),
            logo: None,
            title: None,
            slot_duration: 6,
            image_count: 10,
            output_video: None,
        };
        let err = slideshow_with(args, &mut ctx, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidArgument(_)));
        assert!(invoker.runs.is_empty());
    }

    #[test]
    fn test_slideshow_fills_requested_slots() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), &["a.jpg", "b.png", "c.bmp", "d.gif"]);
        let mut invoker = RecordingInvoker::new();
        let mut ctx = context(&mut invoker);

        let args = SlideshowArgs {
            image_path: dir.path().to_path_buf(),
            new_size: Dimensions::new(1280, 720),
            logo: None,
            title: Some("Holiday".to_string()),
            slot_duration: 4,
            image_count: 8,
            output_video: Some(dir.path().join("show.mp4")),
        };
        slideshow_with(args, &mut ctx, &mut StdRng::seed_from_u64(3)).unwrap();

        let run = &invoker.runs[0];
        let loops = run.get_args().iter().filter(|a| *a == "-loop").count();
        assert_eq!(loops, 8);
        let filter = filter_of(run.get_args());
        assert!(filter.contains("concat=n=8:v=1:a=0"));
        assert!(filter.contains("scale=1280:720"));
        assert!(filter.contains("Holiday"));
    }

    #[test]
    fn test_slideshow_rejects_zero_slot() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), &["a.jpg"]);
        let mut invoker = RecordingInvoker::new();
        let mut ctx = context(&mut invoker);
        let args = SlideshowArgs {
            image_path: dir.path().to_path_buf(),
            new_size: Dimensions::new(1920, 1080),
            logo: None,
            title: None,
            slot_duration: 0,
            image_count: 3,
            output_video: None,
        };
        assert!(slideshow_with(args, &mut ctx, &mut StdRng::seed_from_u64(1)).is_err());
        assert!(invoker.runs.is_empty());
    }

    #[test]
    fn test_publish_stops_on_missing_assets() {
        let dir = TempDir::new().unwrap();
        let files = touch(dir.path(), &["talk.mp4"]);
        let mut invoker = RecordingInvoker::new();
        let mut ctx = Context::new(
            ToolConfig {
                assets: AssetPaths::from_dir(&dir.path().join("assets")),
                ..ToolConfig::default()
            },
            FailurePolicy::default(),
            &mut invoker,
        );

        publish(
            PublishArgs {
                video_file: files[0].clone(),
                output: dir.path().to_path_buf(),
            },
            &mut ctx,
        )
        .unwrap();

        assert!(invoker.captures.is_empty());
        assert!(invoker.runs.is_empty());
    }

    /// 在临时目录下建立完整的素材目录
    fn asset_tree(dir: &Path) -> AssetPaths {
        let assets_dir = dir.join("assets");
        for sub in ["videos", "fonts", "imgs"] {
            fs::create_dir_all(assets_dir.join(sub)).unwrap();
        }
        let assets = AssetPaths::from_dir(&assets_dir);
        for file in [
            &assets.opening_video,
            &assets.ending_video,
            &assets.background_video,
            &assets.font,
        ] {
            fs::write(file, b"").unwrap();
        }
        assets
    }

    #[test]
    fn test_publish_stops_when_a_video_has_no_audio() {
        let dir = TempDir::new().unwrap();
        let assets = asset_tree(dir.path());
        let files = touch(dir.path(), &["talk.mp4", "talk.txt"]);

        let with_audio = r#"{ "streams": [ { "index": 1, "codec_type": "audio" } ] }"#;
        let mut invoker = RecordingInvoker::new()
            .respond(&assets.opening_video.display().to_string(), with_audio)
            .respond(&assets.ending_video.display().to_string(), with_audio)
            .respond(&assets.background_video.display().to_string(), r#"{ "streams": [] }"#);
        let mut ctx = Context::new(
            ToolConfig {
                assets: assets.clone(),
                ..ToolConfig::default()
            },
            FailurePolicy::default(),
            &mut invoker,
        );

        publish(
            PublishArgs {
                video_file: files[0].clone(),
                output: dir.path().to_path_buf(),
            },
            &mut ctx,
        )
        .unwrap();

        assert_eq!(invoker.captures.len(), 3);
        assert!(invoker.runs.is_empty());
    }

    #[test]
    fn test_publish_runs_once_with_background_list() {
        let dir = TempDir::new().unwrap();
        let assets = asset_tree(dir.path());
        let files = touch(dir.path(), &["talk.mp4", "talk.txt"]);
        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let list = dir.path().join("background.lst");

        let with_audio = r#"{ "streams": [ { "index": 1, "codec_type": "audio" } ] }"#;
        let mut invoker = RecordingInvoker::new()
            .respond(&assets.opening_video.display().to_string(), with_audio)
            .respond(&assets.ending_video.display().to_string(), with_audio)
            .respond(&assets.background_video.display().to_string(), with_audio)
            .respond(&files[0].display().to_string(), with_audio);
        let mut ctx = Context::new(
            ToolConfig {
                assets: assets.clone(),
                ..ToolConfig::default()
            },
            FailurePolicy::default(),
            &mut invoker,
        );

        publish_with_list(
            PublishArgs {
                video_file: files[0].clone(),
                output: out_dir.clone(),
            },
            &mut ctx,
            &list,
        )
        .unwrap();

        assert_eq!(invoker.captures.len(), 4);
        assert_eq!(invoker.runs.len(), 1);
        assert_eq!(
            invoker.outputs(),
            [out_dir.join("talk_published.mp4").display().to_string()]
        );
        let args = invoker.runs[0].get_args();
        assert!(args.windows(2).any(|w| w[0] == "-i" && w[1] == list.display().to_string()));

        let content = fs::read_to_string(&list).unwrap();
        assert_eq!(content.lines().count(), PUBLISH_REPEAT);
        assert!(content
            .lines()
            .all(|line| line.starts_with("file '") && line.ends_with("background.mp4'")));
    }

    #[test]
    fn test_pip_writes_background_list_and_keeps_aspect() {
        let dir = TempDir::new().unwrap();
        let files = touch(dir.path(), &["talk.mp4", "bg.mp4"]);
        let list = dir.path().join("bg.tmp");
        let mut invoker = RecordingInvoker::new();
        let mut ctx = context(&mut invoker);

        let args = PipArgs {
            input_video: files[0].clone(),
            background_video: files[1].clone(),
            x: 368,
            y: 218,
            width: 1185,
            height: -1,
            output_video: dir.path().join("output.mp4"),
        };
        pip_with_list(args, &mut ctx, &list).unwrap();

        assert_eq!(invoker.runs.len(), 1);
        let filter = filter_of(invoker.runs[0].get_args());
        assert_eq!(filter, "[0]scale=1185:-1[pip];[1][pip]overlay=x=368:y=218");

        let content = fs::read_to_string(&list).unwrap();
        assert_eq!(content.lines().count(), PIP_REPEAT);
        assert!(content.lines().all(|line| line.ends_with("bg.mp4'")));
    }

    #[test]
    fn test_join_rejects_missing_input() {
        let dir = TempDir::new().unwrap();
        let files = touch(dir.path(), &["a.mp4"]);
        let mut invoker = RecordingInvoker::new();
        let mut ctx = context(&mut invoker);

        let err = join(
            JoinArgs {
                video1: files[0].clone(),
                video2: dir.path().join("missing.mp4"),
                videos: Vec::new(),
                join_mode: JoinMode::AudioVideo,
                logo: None,
                title: None,
                output_video: dir.path().join("out.mp4"),
            },
            &mut ctx,
        )
        .unwrap_err();
        assert!(matches!(err, MediaError::InvalidPath { .. }));
        assert!(invoker.runs.is_empty());
    }
}
