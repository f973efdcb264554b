//! # 视频命令实现
//!
//! normalize, trim, mute, resize 支持单文件与目录批量两种模式；
//! 其余命令只处理单个文件。
//!
//! ## 依赖关系
//! - 使用 `cli/video.rs` 定义的参数
//! - 使用 `builder::ffmpeg` 构建命令
//! - 使用 `commands/probe.rs` 查询时长

use super::{dispatch, probe, require_file, Context, Naming};
use crate::batch::MediaKind;
use crate::builder::ffmpeg::NormalizeOp;
use crate::cli::video::{
    AudioToVideoArgs, DummyAudioArgs, ExtractAudioArgs, MixArgs, MuteArgs, NormalizeArgs,
    ResizeArgs, SubtitleArgs, TrimArgs,
};
use crate::error::{MediaError, Result};
use crate::models::Timestamp;
use crate::utils::{output, paths};

use std::path::Path;

/// 执行 normalize 命令
///
/// 逐个探测时长，超过上限的视频在上限处截断。
pub fn normalize(args: NormalizeArgs, ctx: &mut Context<'_>) -> Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        return Err(MediaError::InvalidArgument(format!(
            "duration must be a positive number of seconds, got {}",
            args.duration
        )));
    }

    let naming = Naming::new("_norm", Some(".mp4"));
    dispatch(ctx, &args.path, MediaKind::Video, &args.output, &naming, |ctx, input, out| {
        let length = probe::query_duration(ctx, input)?;
        let stop = (length > args.duration).then(|| Timestamp::from_seconds(args.duration));
        let op = NormalizeOp {
            input: input.to_path_buf(),
            output: out.to_path_buf(),
            start: args.start_from.clone(),
            stop,
            size: args.new_size,
        };
        let cmd = ctx.config.ffmpeg().normalize(&op);
        ctx.run(&cmd)
    })
}

/// 执行 trim 命令
pub fn trim(args: TrimArgs, ctx: &mut Context<'_>) -> Result<()> {
    let naming = Naming::new("_trim", None);
    dispatch(ctx, &args.path, MediaKind::Video, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx
            .config
            .ffmpeg()
            .trim(input, &args.begin_time, &args.end_time, out);
        ctx.run(&cmd)
    })
}

/// 执行 mute 命令
pub fn mute(args: MuteArgs, ctx: &mut Context<'_>) -> Result<()> {
    // 单文件模式下输出必须是目录或已存在的文件
    if args.path.is_file() && !args.output.is_dir() && !args.output.is_file() {
        output::print_warning(&format!(
            "Error when removing audio. Invalid output file or directory: {}",
            args.output.display()
        ));
        return Ok(());
    }

    let naming = Naming::new("_nosound", None);
    dispatch(ctx, &args.path, MediaKind::Video, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx.config.ffmpeg().mute(input, out);
        ctx.run(&cmd)
    })
}

/// 执行 resize 命令
pub fn resize(args: ResizeArgs, ctx: &mut Context<'_>) -> Result<()> {
    let naming = Naming::new(
        format!("_{}", args.new_size.geometry()),
        args.new_extension.as_deref(),
    );
    dispatch(ctx, &args.path, MediaKind::Video, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx.config.ffmpeg().resize(input, args.new_size, out);
        ctx.run(&cmd)
    })
}

/// 执行 mix 命令
pub fn mix(args: MixArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.audio)?;
    require_file(&args.video)?;

    let cmd = ctx
        .config
        .ffmpeg()
        .mix(&args.audio, &args.video, &args.output_video);
    ctx.run(&cmd)?;
    output::print_success(&format!("Created {}", args.output_video.display()));
    Ok(())
}

/// 执行 addsub 命令
pub fn add_subtitle(args: SubtitleArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;
    require_file(&args.subtitle)?;

    match paths::dotted_extension(&args.subtitle).as_str() {
        ".ass" | ".srt" => {}
        other => {
            return Err(MediaError::UnsupportedFormat(format!(
                "'{}' ({}). Accept only subtitle file in srt or ass format",
                args.subtitle.display(),
                if other.is_empty() { "no extension" } else { other }
            )))
        }
    }

    single_output(ctx, &args.video, &args.output_dir, "_subtitle", ".mp4", |ctx, out| {
        let cmd = ctx.config.ffmpeg().burn_subtitle(&args.video, &args.subtitle, out);
        ctx.run(&cmd)
    })
}

/// 执行 dummyaudio 命令
pub fn dummy_audio(args: DummyAudioArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;
    single_output(ctx, &args.video, &args.output_dir, "_av", ".mp4", |ctx, out| {
        let cmd = ctx.config.ffmpeg().dummy_audio(&args.video, out);
        ctx.run(&cmd)
    })
}

/// 执行 extract-audio 命令
pub fn extract_audio(args: ExtractAudioArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;
    single_output(ctx, &args.video, &args.output_dir, "", ".mp3", |ctx, out| {
        let cmd = ctx.config.ffmpeg().extract_audio(&args.video, out);
        ctx.run(&cmd)
    })
}

/// 执行 audio2video 命令
pub fn audio_to_video(args: AudioToVideoArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.audio)?;
    require_file(&args.image)?;
    single_output(ctx, &args.audio, &args.output_dir, "-cover", ".mp4", |ctx, out| {
        let cmd = ctx.config.ffmpeg().audio_to_video(&args.audio, &args.image, out);
        ctx.run(&cmd)
    })
}

/// 输出写入目录、文件名由输入推导的单文件命令
fn single_output<F>(
    ctx: &mut Context<'_>,
    input: &Path,
    out_dir: &Path,
    suffix: &str,
    extension: &str,
    process: F,
) -> Result<()>
where
    F: FnOnce(&mut Context<'_>, &Path) -> Result<()>,
{
    paths::ensure_dir(out_dir)?;
    let target = paths::derive_output(out_dir, input, suffix, Some(extension));
    process(ctx, &target)?;
    output::print_conversion(&input.display().to_string(), &target.display().to_string());
    Ok(())
}
