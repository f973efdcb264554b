//! # 图片命令实现
//!
//! 使用 ImageMagick `convert` 处理单张图片或整个图片目录。
//!
//! ## 依赖关系
//! - 使用 `cli/image.rs` 定义的参数
//! - 使用 `builder::magick` 构建命令

use super::{dispatch, Context, Naming};
use crate::batch::MediaKind;
use crate::builder::magick::{CropRect, FrameStyle};
use crate::cli::image::{ImageCropArgs, ImageFrameArgs, ImageResizeArgs};
use crate::error::{MediaError, Result};

/// 执行 image-resize 命令
pub fn resize(args: ImageResizeArgs, ctx: &mut Context<'_>) -> Result<()> {
    let naming = Naming::new(format!("_{}", args.new_size.geometry()), None);
    dispatch(ctx, &args.path, MediaKind::Image, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx
            .config
            .magick()
            .resize(input, args.new_size, args.mode, out);
        ctx.run(&cmd)
    })
}

/// 执行 image-frame 命令
pub fn frame(args: ImageFrameArgs, ctx: &mut Context<'_>) -> Result<()> {
    let style = FrameStyle {
        width: args.border_width,
        color: args.border_color.clone(),
        radius: args.border_radius,
    };
    let naming = Naming::new("-framed", Some(".jpg"));
    dispatch(ctx, &args.path, MediaKind::Image, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx.config.magick().frame(input, &style, out);
        ctx.run(&cmd)
    })
}

/// 执行 image-crop 命令
pub fn crop(args: ImageCropArgs, ctx: &mut Context<'_>) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        return Err(MediaError::InvalidArgument(
            "crop width and height must be greater than 0".to_string(),
        ));
    }

    let rect = CropRect {
        x: args.x,
        y: args.y,
        width: args.width,
        height: args.height,
    };
    let naming = Naming::new(format!("-crop-{}x{}", args.width, args.height), Some(".jpg"));
    dispatch(ctx, &args.path, MediaKind::Image, &args.output, &naming, |ctx, input, out| {
        let cmd = ctx.config.magick().crop(input, rect, out);
        ctx.run(&cmd)
    })
}
