//! # ImageMagick 命令构建
//!
//! 图片缩放、加边框、裁剪。
//!
//! ## 依赖关系
//! - 被 `commands/image.rs` 使用
//! - 使用 `models/operation.rs` 中的 `Dimensions`, `ResizeMode`

use super::CommandLine;
use crate::models::{Dimensions, ResizeMode};

use std::path::Path;

/// 裁剪区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// 边框样式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStyle {
    pub width: u32,
    pub color: String,
    pub radius: u32,
}

/// ImageMagick 命令构建器
#[derive(Debug, Clone)]
pub struct Magick {
    program: String,
}

impl Magick {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 按模式缩放图片
    pub fn resize(
        &self,
        input: &Path,
        size: Dimensions,
        mode: ResizeMode,
        output: &Path,
    ) -> CommandLine {
        let geometry = size.geometry();
        let cmd = CommandLine::new(self.program.as_str()).path(input);

        let cmd = match mode {
            ResizeMode::Crop => cmd
                .arg("-resize")
                .arg(format!("{geometry}^"))
                .args(["-gravity", "center", "-extent", geometry.as_str()]),
            ResizeMode::Pad => cmd
                .args(["-resize", geometry.as_str()])
                .args(["-gravity", "center", "-background", "black"])
                .args(["-extent", geometry.as_str()]),
            ResizeMode::Fill => cmd.arg("-resize").arg(format!("{geometry}!")),
            ResizeMode::ShrinkOnly => cmd.arg("-resize").arg(format!("{geometry}>")),
            ResizeMode::EnlargeOnly => cmd.arg("-resize").arg(format!("{geometry}<")),
        };

        cmd.args(["-quality", "100"]).path(output)
    }

    /// 加边框
    pub fn frame(&self, input: &Path, style: &FrameStyle, output: &Path) -> CommandLine {
        CommandLine::new(self.program.as_str())
            .path(input)
            .args(["-bordercolor", style.color.as_str()])
            .args(["-compose", "Copy"])
            .arg("-border")
            .arg(style.width.to_string())
            .arg("-format")
            .arg(format!(
                "roundrectangle 1,1 %[fx:w+4],%[fx:h+4] {r},{r}",
                r = style.radius
            ))
            .path(output)
    }

    /// 按矩形区域裁剪
    pub fn crop(&self, input: &Path, rect: CropRect, output: &Path) -> CommandLine {
        CommandLine::new(self.program.as_str())
            .path(input)
            .arg("-crop")
            .arg(format!(
                "{}x{}{:+}{:+}",
                rect.width, rect.height, rect.x, rect.y
            ))
            .path(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resize_args(mode: ResizeMode) -> Vec<String> {
        Magick::new("convert")
            .resize(
                Path::new("in.jpg"),
                Dimensions::new(800, 600),
                mode,
                Path::new("out.jpg"),
            )
            .get_args()
            .to_vec()
    }

    #[test]
    fn test_resize_mode_templates() {
        assert_eq!(
            resize_args(ResizeMode::Crop),
            [
                "in.jpg", "-resize", "800x600^", "-gravity", "center", "-extent", "800x600",
                "-quality", "100", "out.jpg"
            ]
        );
        assert_eq!(
            resize_args(ResizeMode::Pad),
            [
                "in.jpg", "-resize", "800x600", "-gravity", "center", "-background", "black",
                "-extent", "800x600", "-quality", "100", "out.jpg"
            ]
        );
        assert_eq!(
            resize_args(ResizeMode::Fill),
            ["in.jpg", "-resize", "800x600!", "-quality", "100", "out.jpg"]
        );
        assert_eq!(
            resize_args(ResizeMode::ShrinkOnly),
            ["in.jpg", "-resize", "800x600>", "-quality", "100", "out.jpg"]
        );
        assert_eq!(
            resize_args(ResizeMode::EnlargeOnly),
            ["in.jpg", "-resize", "800x600<", "-quality", "100", "out.jpg"]
        );
    }

    #[test]
    fn test_unknown_resize_mode_uses_shrink_template() {
        let mode = ResizeMode::parse_lenient("9").unwrap();
        assert_eq!(resize_args(mode), resize_args(ResizeMode::ShrinkOnly));
    }

    #[test]
    fn test_crop_geometry() {
        let cmd = Magick::new("convert").crop(
            Path::new("my photo.png"),
            CropRect {
                x: 10,
                y: 0,
                width: 300,
                height: 200,
            },
            Path::new("out/my photo-crop-300x200.jpg"),
        );
        assert_eq!(
            cmd.get_args(),
            &[
                "my photo.png",
                "-crop",
                "300x200+10+0",
                "out/my photo-crop-300x200.jpg"
            ]
        );
    }

    #[test]
    fn test_frame_template() {
        let style = FrameStyle {
            width: 5,
            color: "black".to_string(),
            radius: 2,
        };
        let cmd = Magick::new("magick").frame(Path::new("a.png"), &style, Path::new("a-framed.jpg"));
        assert_eq!(cmd.program(), "magick");
        assert_eq!(
            cmd.get_args(),
            &[
                "a.png",
                "-bordercolor",
                "black",
                "-compose",
                "Copy",
                "-border",
                "5",
                "-format",
                "roundrectangle 1,1 %[fx:w+4],%[fx:h+4] 2,2",
                "a-framed.jpg"
            ]
        );
    }
}
