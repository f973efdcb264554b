//! # 时长格式化
//!
//! 秒数与 `HH:MM:SS` 文本之间的转换。
//!
//! ## 依赖关系
//! - 被 `builder/ffmpeg.rs`（`-to` 参数）和 `commands/` 使用
//! - 无外部模块依赖

/// 将秒数格式化为 `HH:MM:SS`
///
/// 先把总秒数四舍五入为整数，再截断得到小时与分钟。
/// 负数或非有限值按 0 处理。
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// 将毫秒数格式化为 `HH:MM:SS.mmm`
pub fn format_duration_millis(millis: f64) -> String {
    let total = if millis.is_finite() && millis > 0.0 {
        millis.round() as u64
    } else {
        0
    };

    let ms = total % 1000;
    let total_secs = total / 1000;

    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        ms
    )
}

/// 解析 ffprobe 输出的时长文本（取第一行非空内容）
pub fn parse_probe_seconds(text: &str) -> Option<f64> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
