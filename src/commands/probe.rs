//! # 媒体信息查询
//!
//! 通过 ffprobe 读取时长与流信息。
//!
//! ## 功能
//! - `info`：原样输出 ffprobe 报告，或以表格列出各路流
//! - `length`：输出毫秒数与 `HH:MM:SS.mmm`
//! - 供其他命令使用的时长与音频流查询
//!
//! ## 依赖关系
//! - 使用 `cli/video.rs` 定义的参数
//! - 使用 `serde_json` 解析 ffprobe JSON 输出
//! - 使用 `tabled` 输出流表格

use super::{require_file, Context};
use crate::cli::video::{InfoArgs, LengthArgs};
use crate::error::{MediaError, Result};
use crate::models::duration::parse_probe_seconds;
use crate::models::format_duration_millis;
use crate::utils::output;

use serde::Deserialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// ffprobe `-print_format json -show_streams` 的输出
#[derive(Debug, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

/// 单路流
#[derive(Debug, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub index: u32,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
    pub duration: Option<String>,
}

/// 查询视频时长（秒）
pub fn query_duration(ctx: &mut Context<'_>, video: &Path) -> Result<f64> {
    let cmd = ctx.config.ffprobe().duration(video);
    let stdout = ctx.capture(&cmd)?;
    parse_probe_seconds(&stdout).ok_or_else(|| MediaError::ProbeFailed {
        path: video.display().to_string(),
        reason: format!("unexpected duration output '{}'", stdout.trim()),
    })
}

/// 读取并解析流信息
pub fn query_streams(ctx: &mut Context<'_>, path: &Path, audio_only: bool) -> Result<ProbeReport> {
    let cmd = ctx.config.ffprobe().streams_json(path, audio_only);
    let stdout = ctx.capture(&cmd)?;
    parse_report(path, &stdout)
}

/// 音频流数量
pub fn audio_stream_count(ctx: &mut Context<'_>, path: &Path) -> Result<usize> {
    Ok(query_streams(ctx, path, true)?.streams.len())
}

fn parse_report(path: &Path, json: &str) -> Result<ProbeReport> {
    // ffprobe 对没有流的文件可能输出空对象或什么都不输出
    if json.trim().is_empty() {
        return Ok(ProbeReport {
            streams: Vec::new(),
        });
    }
    serde_json::from_str(json).map_err(|e| MediaError::ProbeFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// 执行 info 命令
pub fn info(args: InfoArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;

    if !args.streams {
        let cmd = ctx.config.ffprobe().info(&args.video);
        return ctx.run(&cmd);
    }

    #[derive(Tabled)]
    struct StreamRow {
        #[tabled(rename = "#")]
        index: u32,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Codec")]
        codec: String,
        #[tabled(rename = "Details")]
        details: String,
        #[tabled(rename = "Duration (s)")]
        duration: String,
    }

    let report = query_streams(ctx, &args.video, false)?;
    if report.streams.is_empty() {
        output::print_warning(&format!("{} has no streams", args.video.display()));
        return Ok(());
    }

    let rows: Vec<StreamRow> = report
        .streams
        .iter()
        .map(|s| StreamRow {
            index: s.index,
            kind: s.codec_type.clone().unwrap_or_else(|| "-".to_string()),
            codec: s.codec_name.clone().unwrap_or_else(|| "-".to_string()),
            details: stream_details(s),
            duration: s.duration.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output::print_header(&format!("Streams in {}", args.video.display()));
    println!("{}", Table::new(&rows));
    Ok(())
}

fn stream_details(stream: &StreamInfo) -> String {
    match (stream.width, stream.height) {
        (Some(w), Some(h)) => format!("{}x{}", w, h),
        _ => match (&stream.sample_rate, stream.channels) {
            (Some(rate), Some(ch)) => format!("{} Hz, {} ch", rate, ch),
            (Some(rate), None) => format!("{} Hz", rate),
            _ => "-".to_string(),
        },
    }
}

/// 执行 length 命令
pub fn length(args: LengthArgs, ctx: &mut Context<'_>) -> Result<()> {
    require_file(&args.video)?;

    let millis = query_duration(ctx, &args.video)? * 1000.0;
    println!("{}", millis);
    println!("{}", format_duration_millis(millis));
    Ok(())
}
