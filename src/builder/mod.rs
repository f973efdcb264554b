//! # 命令构建模块
//!
//! 将操作描述符映射为外部程序的命令行。
//!
//! ## 约定
//! - 纯函数：不访问文件系统，相同输入得到逐字节相同的参数列表
//! - 参数以独立 token 传递给子进程，不经过 shell，路径无需加引号
//! - 未识别的模式由 `models::operation` 回退到默认模板
//!
//! ## 依赖关系
//! - 被 `commands/` 调用，结果交给 `utils/process.rs` 执行
//! - 使用 `models/` 中的参数类型
//! - 子模块: ffmpeg, magick

pub mod ffmpeg;
pub mod magick;

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// 外部程序命令行：程序名 + 参数 token 列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// 追加单个参数
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// 追加多个参数
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    /// 追加路径参数
    pub fn path(self, path: &Path) -> Self {
        let text = path.to_string_lossy().into_owned();
        self.arg(text)
    }

    /// 追加 `flag path` 形式的参数对（如 `-i input.mp4`）
    pub fn flag_path(self, flag: &str, path: &Path) -> Self {
        self.arg(flag).path(path)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// 参数迭代器（供 `std::process::Command::args` 使用）
    pub fn os_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsStr::new)
    }
}

impl fmt::Display for CommandLine {
    /// 仅用于回显和错误信息：含空白或引号的 token 加双引号
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_for_display(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_for_display(arg))?;
        }
        Ok(())
    }
}

fn quote_for_display(token: &str) -> String {
    let needs_quotes =
        token.is_empty() || token.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if needs_quotes {
        format!("\"{}\"", token.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        token.to_string()
    }
}

/// 转义 ffmpeg 滤镜图中单引号包裹的值
///
/// 用于字体路径、文本文件路径和标题等嵌入到 filtergraph 中的文本。
/// ffmpeg 会解析两遍：filtergraph 一遍去掉引号，选项一遍处理 `\\` 与 `\:`。
/// 引号内无法转义单引号，需先闭合引号再写两层转义的 `\\\'`。
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for c in value.chars() {
        match c {
            '\'' => escaped.push_str("'\\\\\\''"),
            '\\' => escaped.push_str("\\\\"),
            ':' => escaped.push_str("\\:"),
            _ => escaped.push(c),
        }
    }
    escaped.push('\'');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_line_tokens() {
        let cmd = CommandLine::new("ffmpeg")
            .arg("-y")
            .flag_path("-i", &PathBuf::from("my clip.mp4"))
            .args(["-c:a", "copy"])
            .path(Path::new("out.mp4"));

        assert_eq!(cmd.program(), "ffmpeg");
        assert_eq!(
            cmd.get_args(),
            &["-y", "-i", "my clip.mp4", "-c:a", "copy", "out.mp4"]
        );
        assert_eq!(cmd.os_args().count(), 6);
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let cmd = CommandLine::new("convert")
            .path(Path::new("holiday photo.jpg"))
            .arg("-resize")
            .arg("100x100>");
        assert_eq!(
            cmd.to_string(),
            "convert \"holiday photo.jpg\" -resize 100x100>"
        );
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(escape_filter_value("arial.ttf"), "'arial.ttf'");
        assert_eq!(escape_filter_value("C:/fonts/a.ttf"), "'C\\:/fonts/a.ttf'");
        assert_eq!(escape_filter_value("it's"), r"'it'\\\''s'");
    }

    /// 按 ffmpeg 的 token 规则读取一段文本，遇到 `terms` 中未引用且未转义的字符时停止
    fn read_token<'a>(input: &'a str, terms: &str) -> (String, &'a str) {
        let mut out = String::new();
        let mut quoted = false;
        let mut chars = input.char_indices();
        while let Some((i, c)) = chars.next() {
            if quoted {
                if c == '\'' {
                    quoted = false;
                } else {
                    out.push(c);
                }
            } else if c == '\\' {
                if let Some((_, next)) = chars.next() {
                    out.push(next);
                }
            } else if c == '\'' {
                quoted = true;
            } else if terms.contains(c) {
                return (out, &input[i..]);
            } else {
                out.push(c);
            }
        }
        (out, "")
    }

    /// 模拟 filtergraph 与选项两遍解析，返回 `text` 选项的最终值
    fn parse_text_option(filter: &str) -> (String, String) {
        let (graph_level, _) = read_token(filter, "");
        let value = graph_level.strip_prefix("text=").unwrap();
        let (text, rest) = read_token(value, ":");
        (text, rest.to_string())
    }

    #[test]
    fn test_escaped_values_survive_both_parse_passes() {
        for original in ["Let's go", "C:/fonts/it's.ttf", "a\\b", "plain"] {
            let filter = format!("text={}:x=10", escape_filter_value(original));
            let (text, rest) = parse_text_option(&filter);
            assert_eq!(text, original);
            assert_eq!(rest, ":x=10");
        }
    }
}
