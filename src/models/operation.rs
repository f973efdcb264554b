//! # 操作参数类型
//!
//! 操作描述符中的强类型参数：尺寸、时间点、叠加角落、拼接模式、
//! 缩放模式和文字对齐方式。
//!
//! 枚举型模式采用宽松解析：无法识别的取值回退到文档中的默认值，
//! 不会报错。
//!
//! ## 依赖关系
//! - 被 `cli/` 用作 clap 的 value_parser
//! - 被 `builder/` 用于选择命令模板

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static SIZE_PATTERN: OnceLock<Regex> = OnceLock::new();
static TIME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn size_pattern() -> &'static Regex {
    SIZE_PATTERN.get_or_init(|| Regex::new(r"^\s*(-?\d+)\s*[:xX]\s*(-?\d+)\s*$").unwrap())
}

fn time_pattern() -> &'static Regex {
    TIME_PATTERN.get_or_init(|| Regex::new(r"^\d+(:\d{1,2}){0,2}(\.\d+)?$").unwrap())
}

// ─────────────────────────────────────────────────────────────
// 尺寸
// ─────────────────────────────────────────────────────────────

/// 输出尺寸（`-1` 表示按比例自动计算）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// 解析 `W:H` 或 `WxH`
    pub fn parse(s: &str) -> Result<Self, String> {
        let caps = size_pattern()
            .captures(s)
            .ok_or_else(|| format!("'{}' is not a valid size (expected W:H or WxH)", s))?;

        let width: i32 = caps[1]
            .parse()
            .map_err(|_| format!("invalid width in '{}'", s))?;
        let height: i32 = caps[2]
            .parse()
            .map_err(|_| format!("invalid height in '{}'", s))?;

        if width == 0 || height == 0 || width < -1 || height < -1 {
            return Err(format!("'{}' is not a valid size", s));
        }

        Ok(Self::new(width, height))
    }

    /// ffmpeg 的 scale 参数形式 `W:H`
    pub fn ffmpeg(&self) -> String {
        format!("{}:{}", self.width, self.height)
    }

    /// ImageMagick 的几何参数形式 `WxH`
    pub fn geometry(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.geometry())
    }
}

// ─────────────────────────────────────────────────────────────
// 时间点
// ─────────────────────────────────────────────────────────────

/// 时间点，接受 `HH:MM:SS[.fff]`、`MM:SS` 或秒数
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    text: String,
    seconds: f64,
}

impl Timestamp {
    pub fn parse(s: &str) -> Result<Self, String> {
        let text = s.trim();
        if !time_pattern().is_match(text) {
            return Err(format!(
                "'{}' is not a valid time (expected HH:MM:SS or seconds)",
                s
            ));
        }

        let mut seconds = 0.0;
        for part in text.split(':') {
            let value: f64 = part
                .parse()
                .map_err(|_| format!("'{}' is not a valid time", s))?;
            seconds = seconds * 60.0 + value;
        }

        Ok(Self {
            text: text.to_string(),
            seconds,
        })
    }

    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            text: super::format_duration(seconds),
            seconds: seconds.max(0.0).round(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            text: "00:00:00".to_string(),
            seconds: 0.0,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// 结束时间：`end` 表示到输入结尾
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EndTime {
    #[default]
    End,
    At(Timestamp),
}

impl EndTime {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.trim().eq_ignore_ascii_case("end") {
            Ok(EndTime::End)
        } else {
            Timestamp::parse(s).map(EndTime::At)
        }
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            EndTime::End => None,
            EndTime::At(t) => Some(t),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 枚举模式（宽松解析）
// ─────────────────────────────────────────────────────────────

/// 叠加位置（屏幕角落），默认右上角
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "tl" | "top-left" => Corner::TopLeft,
            "bl" | "bottom-left" => Corner::BottomLeft,
            "br" | "bottom-right" => Corner::BottomRight,
            _ => Corner::TopRight,
        })
    }
}

/// 拼接模式：仅音频、仅视频或音视频（默认）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    AudioOnly,
    VideoOnly,
    #[default]
    AudioVideo,
}

impl JoinMode {
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "a" | "audio" => JoinMode::AudioOnly,
            "v" | "video" => JoinMode::VideoOnly,
            _ => JoinMode::AudioVideo,
        })
    }

    pub fn has_video(&self) -> bool {
        !matches!(self, JoinMode::AudioOnly)
    }

    pub fn has_audio(&self) -> bool {
        !matches!(self, JoinMode::VideoOnly)
    }
}

/// 图片缩放模式
///
/// 数字编号 1-5 与名称均可；无法识别时使用 `ShrinkOnly`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// 填满目标区域后居中裁剪
    Crop,
    /// 等比缩放后居中补边
    Pad,
    /// 忽略宽高比拉伸
    Fill,
    /// 仅缩小较大的图片
    #[default]
    ShrinkOnly,
    /// 仅放大较小的图片
    EnlargeOnly,
}

impl ResizeMode {
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "1" | "crop" => ResizeMode::Crop,
            "2" | "pad" => ResizeMode::Pad,
            "3" | "fill" => ResizeMode::Fill,
            "5" | "enlarge" | "enlarge-only" => ResizeMode::EnlargeOnly,
            _ => ResizeMode::ShrinkOnly,
        })
    }
}

/// 水平对齐，默认居中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlign {
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "left" => HorizontalAlign::Left,
            "right" => HorizontalAlign::Right,
            _ => HorizontalAlign::Center,
        })
    }
}

/// 垂直对齐，默认居中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "top" => VerticalAlign::Top,
            "bottom" => VerticalAlign::Bottom,
            _ => VerticalAlign::Middle,
        })
    }
}
