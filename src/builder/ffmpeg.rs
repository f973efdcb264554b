//! # ffmpeg / ffprobe 命令构建
//!
//! 每个函数对应一个视频操作，返回一条完整的命令行。
//!
//! ## 依赖关系
//! - 被 `commands/video.rs`, `commands/compose.rs`, `commands/probe.rs` 使用
//! - 使用 `models/operation.rs` 中的参数类型

use super::{escape_filter_value, CommandLine};
use crate::models::{
    Corner, Dimensions, EndTime, HorizontalAlign, JoinMode, Timestamp, VerticalAlign,
};

use std::path::{Path, PathBuf};

/// 叠加 logo / 标题时距离画面边缘的像素
const DECORATION_MARGIN: u32 = 10;

/// 幻灯片淡入淡出时长（秒）
const FADE_SECONDS: u32 = 1;

// ─────────────────────────────────────────────────────────────
// 操作描述符
// ─────────────────────────────────────────────────────────────

/// 素材规范化：裁剪时长、缩放、静音、转 H.264
#[derive(Debug, Clone)]
pub struct NormalizeOp {
    pub input: PathBuf,
    pub output: PathBuf,
    pub start: Timestamp,
    /// 仅在素材长于上限时设置
    pub stop: Option<Timestamp>,
    pub size: Dimensions,
}

/// 多个视频拼接
#[derive(Debug, Clone)]
pub struct JoinOp {
    pub inputs: Vec<PathBuf>,
    pub mode: JoinMode,
    pub logo: Option<PathBuf>,
    pub title: Option<String>,
    pub font: PathBuf,
    pub output: PathBuf,
}

/// 图片幻灯片
#[derive(Debug, Clone)]
pub struct SlideshowOp {
    pub images: Vec<PathBuf>,
    pub slot_seconds: u32,
    pub size: Dimensions,
    pub logo: Option<PathBuf>,
    pub title: Option<String>,
    pub font: PathBuf,
    pub output: PathBuf,
}

/// 在视频上绘制文本文件内容
#[derive(Debug, Clone)]
pub struct DrawTextOp {
    pub input: PathBuf,
    pub text_file: PathBuf,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub margin_x: i32,
    pub margin_y: i32,
    pub color: String,
    pub font: PathBuf,
    pub font_size: u32,
    pub begin: Timestamp,
    pub end: EndTime,
    pub output: PathBuf,
}

/// 画中画
#[derive(Debug, Clone)]
pub struct PipOp {
    pub input: PathBuf,
    /// 循环背景视频的 concat 列表文件
    pub background_list: PathBuf,
    pub x: i32,
    pub y: i32,
    pub size: Dimensions,
    pub output: PathBuf,
}

/// 发布视频：片头 + 正片（叠加在背景上并加标题）+ 片尾
#[derive(Debug, Clone)]
pub struct PublishOp {
    pub background_list: PathBuf,
    pub opening: PathBuf,
    pub main: PathBuf,
    pub ending: PathBuf,
    pub text_file: PathBuf,
    pub font: PathBuf,
    pub output: PathBuf,
}

// ─────────────────────────────────────────────────────────────
// ffmpeg
// ─────────────────────────────────────────────────────────────

/// ffmpeg 命令构建器
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: String,
}

impl Ffmpeg {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> CommandLine {
        CommandLine::new(self.program.as_str())
    }

    /// 规范化素材
    pub fn normalize(&self, op: &NormalizeOp) -> CommandLine {
        let mut cmd = self
            .command()
            .arg("-y")
            .flag_path("-i", &op.input)
            .args(["-ss", op.start.as_str()]);

        if let Some(stop) = &op.stop {
            cmd = cmd.args(["-to", stop.as_str()]);
        }

        cmd.arg("-vf")
            .arg(format!("scale={},setsar=1:1,setdar=16:9", op.size.ffmpeg()))
            .args(["-crf", "22", "-c:v", "libx264", "-preset", "slow", "-an"])
            .path(&op.output)
    }

    /// 在指定角落叠加 logo
    pub fn logo(
        &self,
        video: &Path,
        logo: &Path,
        corner: Corner,
        x: i32,
        y: i32,
        output: &Path,
    ) -> CommandLine {
        self.command()
            .flag_path("-i", video)
            .flag_path("-i", logo)
            .arg("-filter_complex")
            .arg(format!("overlay={}", corner_position(corner, x, y)))
            .arg("-y")
            .path(output)
    }

    /// 截取 begin 到 end 之间的片段
    pub fn trim(&self, input: &Path, begin: &Timestamp, end: &EndTime, output: &Path) -> CommandLine {
        let mut cmd = self
            .command()
            .arg("-y")
            .flag_path("-i", input)
            .args(["-ss", begin.as_str()]);

        if let Some(end) = end.timestamp() {
            cmd = cmd.args(["-to", end.as_str()]);
        }

        cmd.path(output)
    }

    /// 合并音频与视频流
    pub fn mix(&self, audio: &Path, video: &Path, output: &Path) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", audio)
            .flag_path("-i", video)
            .args(["-codec", "copy", "-shortest"])
            .path(output)
    }

    /// 将字幕烧录进画面
    pub fn burn_subtitle(&self, video: &Path, subtitle: &Path, output: &Path) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", video)
            .arg("-vf")
            .arg(format!(
                "subtitles={}",
                escape_filter_value(&subtitle.to_string_lossy())
            ))
            .path(output)
    }

    /// 添加静音音轨
    pub fn dummy_audio(&self, video: &Path, output: &Path) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", video)
            .args(["-f", "lavfi", "-i", "anullsrc"])
            .args(["-c:v", "copy", "-c:a", "mp3", "-shortest"])
            .path(output)
    }

    /// 提取音轨为 mp3
    pub fn extract_audio(&self, video: &Path, output: &Path) -> CommandLine {
        self.command()
            .flag_path("-i", video)
            .args(["-vn", "-acodec", "mp3"])
            .path(output)
    }

    /// 用静态图片把音频转为视频
    pub fn audio_to_video(&self, audio: &Path, image: &Path, output: &Path) -> CommandLine {
        self.command()
            .args(["-y", "-loop", "1"])
            .flag_path("-i", image)
            .flag_path("-i", audio)
            .args(["-c:v", "libx264", "-c:a", "aac", "-strict", "experimental"])
            .args(["-b:a", "192k", "-shortest"])
            .path(output)
    }

    /// 移除所有音轨
    pub fn mute(&self, video: &Path, output: &Path) -> CommandLine {
        self.command()
            .args(["-loglevel", "panic", "-y"])
            .flag_path("-i", video)
            .args(["-vcodec", "copy", "-an"])
            .path(output)
    }

    /// 缩放视频，音频直接复制
    pub fn resize(&self, video: &Path, size: Dimensions, output: &Path) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", video)
            .arg("-filter:v")
            .arg(format!("scale={}", size.ffmpeg()))
            .args(["-c:a", "copy"])
            .path(output)
    }

    /// 按拼接模式串联多个视频，可选叠加 logo 和标题
    pub fn join(&self, op: &JoinOp) -> CommandLine {
        let mut cmd = self.command().arg("-y");
        for input in &op.inputs {
            cmd = cmd.flag_path("-i", input);
        }

        let count = op.inputs.len();
        let logo = op.logo.as_deref().filter(|_| op.mode.has_video());
        let title = op.title.as_deref().filter(|_| op.mode.has_video());
        if let Some(logo) = logo {
            cmd = cmd.flag_path("-i", logo);
        }

        let decorated = logo.is_some() || title.is_some();
        let video_label = if decorated { "vcat" } else { "v" };

        let mut streams = String::new();
        for i in 0..count {
            match op.mode {
                JoinMode::VideoOnly => streams.push_str(&format!("[{i}:v:0]")),
                JoinMode::AudioOnly => streams.push_str(&format!("[{i}:a:0]")),
                JoinMode::AudioVideo => streams.push_str(&format!("[{i}:v:0][{i}:a:0]")),
            }
        }

        let concat = match op.mode {
            JoinMode::VideoOnly => format!("concat=n={count}:v=1:a=0[{video_label}]"),
            JoinMode::AudioOnly => format!("concat=n={count}:v=0:a=1[a]"),
            JoinMode::AudioVideo => format!("concat=n={count}:v=1:a=1[{video_label}][a]"),
        };

        let mut chains = vec![format!("{streams}{concat}")];
        if decorated {
            let logo_position = format!(
                "main_w-overlay_w-{m}:{m}",
                m = DECORATION_MARGIN
            );
            decorate(
                &mut chains,
                video_label,
                logo.map(|_| (count, logo_position.as_str())),
                title,
                &op.font,
            );
        }

        cmd = cmd.arg("-filter_complex").arg(chains.join(";"));
        if op.mode.has_video() {
            cmd = cmd.args(["-map", "[v]"]);
        }
        if op.mode.has_audio() {
            cmd = cmd.args(["-map", "[a]"]);
        }
        cmd.path(&op.output)
    }

    /// 图片幻灯片：每张图片淡入淡出，串联为视频
    pub fn slideshow(&self, op: &SlideshowOp) -> CommandLine {
        let slot = op.slot_seconds.to_string();
        let mut cmd = self.command().arg("-y");
        for image in &op.images {
            cmd = cmd
                .args(["-loop", "1", "-t", slot.as_str()])
                .flag_path("-i", image);
        }

        let count = op.images.len();
        if let Some(logo) = &op.logo {
            cmd = cmd.flag_path("-i", logo);
        }

        let decorated = op.logo.is_some() || op.title.is_some();
        let video_label = if decorated { "vcat" } else { "v" };
        let fade_out_start = op.slot_seconds.saturating_sub(FADE_SECONDS);

        let mut chains = Vec::with_capacity(count + 3);
        let mut labels = String::new();
        for i in 0..count {
            chains.push(format!(
                "[{i}:v]scale={},setsar=1,fade=t=in:st=0:d={fade},fade=t=out:st={fade_out_start}:d={fade}[v{i}]",
                op.size.ffmpeg(),
                fade = FADE_SECONDS,
            ));
            labels.push_str(&format!("[v{i}]"));
        }
        chains.push(format!(
            "{labels}concat=n={count}:v=1:a=0,format=yuv420p[{video_label}]"
        ));

        if decorated {
            let logo_position = format!(
                "main_w-overlay_w-{m}:{m}",
                m = DECORATION_MARGIN
            );
            decorate(
                &mut chains,
                video_label,
                op.logo.as_ref().map(|_| (count, logo_position.as_str())),
                op.title.as_deref(),
                &op.font,
            );
        }

        cmd.arg("-filter_complex")
            .arg(chains.join(";"))
            .args(["-map", "[v]"])
            .path(&op.output)
    }

    /// 绘制文本文件内容
    pub fn draw_text(&self, op: &DrawTextOp) -> CommandLine {
        let x = match op.horizontal {
            HorizontalAlign::Left => op.margin_x.to_string(),
            HorizontalAlign::Right => format!("(w-text_w-{})", op.margin_x),
            HorizontalAlign::Center => "(w-text_w)/2".to_string(),
        };
        let y = match op.vertical {
            VerticalAlign::Top => op.margin_y.to_string(),
            VerticalAlign::Bottom => format!("(h-text_h-{})", op.margin_y),
            VerticalAlign::Middle => "(h-text_h)/2".to_string(),
        };

        let mut filter = format!(
            "drawtext=shadowx=2:shadowy=2:alpha=0.8:fontfile={}:textfile={}:x={}:y={}:fontcolor={}:fontsize={}",
            escape_filter_value(&op.font.to_string_lossy()),
            escape_filter_value(&op.text_file.to_string_lossy()),
            x,
            y,
            op.color,
            op.font_size,
        );

        match op.end.timestamp() {
            Some(end) => filter.push_str(&format!(
                ":enable='between(t,{},{})'",
                op.begin.seconds(),
                end.seconds()
            )),
            None if op.begin.seconds() > 0.0 => {
                filter.push_str(&format!(":enable='gte(t,{})'", op.begin.seconds()))
            }
            None => {}
        }

        self.command()
            .arg("-y")
            .flag_path("-i", &op.input)
            .arg("-vf")
            .arg(filter)
            .args(["-codec:a", "copy"])
            .path(&op.output)
    }

    /// 画中画：缩放后的视频叠加在循环背景上
    pub fn picture_in_picture(&self, op: &PipOp) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", &op.input)
            .args(["-f", "concat", "-safe", "0"])
            .flag_path("-i", &op.background_list)
            .arg("-filter_complex")
            .arg(format!(
                "[0]scale={}[pip];[1][pip]overlay=x={}:y={}",
                op.size.ffmpeg(),
                op.x,
                op.y
            ))
            .args(["-shortest", "-level", "3.1", "-ar", "44100", "-ab", "128k"])
            .args(["-s", "1920x1080", "-vcodec", "h264", "-acodec", "aac"])
            .path(&op.output)
    }

    /// 以 addition 模式混合两路视频，最短输入结束时停止
    pub fn blend(&self, top: &Path, bottom: &Path, output: &Path) -> CommandLine {
        self.command()
            .arg("-y")
            .flag_path("-i", top)
            .flag_path("-i", bottom)
            .arg("-filter_complex")
            .arg(
                "[1:0]setsar=sar=1,format=rgba[1sared];[0:0]format=rgba[0rgbd];\
                 [0rgbd][1sared]blend=all_mode=addition:repeatlast=1:all_opacity=1,format=yuva422p10le",
            )
            .args(["-c:v", "libx264", "-preset", "slow", "-tune", "film", "-crf", "19"])
            .args(["-c:a", "aac", "-strict", "-2", "-ac", "2", "-b:a", "256k"])
            .args(["-pix_fmt", "yuv420p"])
            .path(output)
    }

    /// 发布视频合成
    ///
    /// 输入顺序：0 背景列表，1 片头，2 正片，3 片尾。
    pub fn publish(&self, op: &PublishOp) -> CommandLine {
        let graph = [
            format!(
                "[2:v:0]drawtext=shadowx=2:shadowy=2:alpha=0.8:fontfile={}:textfile={}:x=10:y=10:fontcolor=yellow@0.2:fontsize=32[video1]",
                escape_filter_value(&op.font.to_string_lossy()),
                escape_filter_value(&op.text_file.to_string_lossy()),
            ),
            "[video1]scale=1185:-1[pip]".to_string(),
            "[0:v:0][pip]overlay=x=368:y=218:shortest=1[mainvideo]".to_string(),
            "[1:v:0][1:a:0][mainvideo][2:a:0][3:v:0][3:a:0]concat=n=3:v=1:a=1[v][a]".to_string(),
        ];

        self.command()
            .arg("-y")
            .args(["-f", "concat", "-safe", "0"])
            .flag_path("-i", &op.background_list)
            .flag_path("-i", &op.opening)
            .flag_path("-i", &op.main)
            .flag_path("-i", &op.ending)
            .arg("-filter_complex")
            .arg(graph.join(";"))
            .args(["-map", "[v]", "-map", "[a]"])
            .args(["-c:v", "libx264", "-q:v", "0", "-acodec", "mp3", "-s", "1920x1080"])
            .path(&op.output)
    }
}

/// overlay 滤镜的位置表达式
fn corner_position(corner: Corner, x: i32, y: i32) -> String {
    match corner {
        Corner::TopLeft => format!("{x}:{y}"),
        Corner::TopRight => format!("main_w-overlay_w-{x}:{y}"),
        Corner::BottomLeft => format!("{x}:main_h-overlay_h-{y}"),
        Corner::BottomRight => format!("main_w-overlay_w-{x}:main_h-overlay_h-{y}"),
    }
}

/// 在 `[source]` 上依次叠加 logo 与标题，最终输出 `[v]`
fn decorate(
    chains: &mut Vec<String>,
    source: &str,
    logo: Option<(usize, &str)>,
    title: Option<&str>,
    font: &Path,
) {
    let mut current = source.to_string();

    if let Some((index, position)) = logo {
        let next = if title.is_some() { "vlogo" } else { "v" };
        chains.push(format!("[{current}][{index}:v]overlay={position}[{next}]"));
        current = next.to_string();
    }

    if let Some(title) = title {
        chains.push(format!(
            "[{current}]drawtext=fontfile={}:text={}:x={m}:y={m}:fontsize=32:fontcolor=white:shadowx=2:shadowy=2[v]",
            escape_filter_value(&font.to_string_lossy()),
            escape_filter_value(title),
            m = DECORATION_MARGIN,
        ));
    }
}

// ─────────────────────────────────────────────────────────────
// ffprobe
// ─────────────────────────────────────────────────────────────

/// ffprobe 命令构建器
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: String,
}

impl Ffprobe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 查询第一路视频流时长（秒，纯文本输出）
    pub fn duration(&self, input: &Path) -> CommandLine {
        CommandLine::new(self.program.as_str())
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .path(input)
    }

    /// 以 JSON 输出流信息，`audio_only` 时只列出音频流
    pub fn streams_json(&self, input: &Path, audio_only: bool) -> CommandLine {
        let mut cmd = CommandLine::new(self.program.as_str())
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"]);
        if audio_only {
            cmd = cmd.args(["-select_streams", "a"]);
        }
        cmd.path(input)
    }

    /// 默认的人类可读信息
    pub fn info(&self, input: &Path) -> CommandLine {
        CommandLine::new(self.program.as_str()).path(input)
    }
}
