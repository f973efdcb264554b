//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 执行方式
//! - 输入是文件：单文件模式，直接构建并执行一条命令
//! - 输入是目录：批量模式，收集匹配文件后逐个执行
//! - 其他：报错，不启动任何子进程
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `builder/`, `batch/`, `config.rs`, `utils/`
//! - 子模块: video, compose, image, probe

pub mod compose;
pub mod image;
pub mod probe;
pub mod video;

use crate::batch::{self, BatchRunner, FailurePolicy, FileCollector, MediaKind};
use crate::builder::CommandLine;
use crate::cli::Commands;
use crate::config::ToolConfig;
use crate::error::{MediaError, Result};
use crate::utils::output;
use crate::utils::paths::{self, PathKind};
use crate::utils::process::Invoker;

use std::path::Path;

/// 命令执行上下文
pub struct Context<'a> {
    pub config: ToolConfig,
    pub policy: FailurePolicy,
    invoker: &'a mut dyn Invoker,
}

impl<'a> Context<'a> {
    pub fn new(config: ToolConfig, policy: FailurePolicy, invoker: &'a mut dyn Invoker) -> Self {
        Self {
            config,
            policy,
            invoker,
        }
    }

    pub fn run(&mut self, cmd: &CommandLine) -> Result<()> {
        self.invoker.run(cmd)
    }

    pub fn capture(&mut self, cmd: &CommandLine) -> Result<String> {
        self.invoker.capture(cmd)
    }
}

/// 执行命令
pub fn run(cmd: Commands, ctx: &mut Context<'_>) -> Result<()> {
    match cmd {
        Commands::Normalize(args) => video::normalize(args, ctx),
        Commands::Trim(args) => video::trim(args, ctx),
        Commands::Mute(args) => video::mute(args, ctx),
        Commands::Resize(args) => video::resize(args, ctx),
        Commands::Mix(args) => video::mix(args, ctx),
        Commands::AddSub(args) => video::add_subtitle(args, ctx),
        Commands::DummyAudio(args) => video::dummy_audio(args, ctx),
        Commands::ExtractAudio(args) => video::extract_audio(args, ctx),
        Commands::AudioToVideo(args) => video::audio_to_video(args, ctx),
        Commands::Info(args) => probe::info(args, ctx),
        Commands::Length(args) => probe::length(args, ctx),
        Commands::Logo(args) => compose::logo(args, ctx),
        Commands::Text(args) => compose::text(args, ctx),
        Commands::Pip(args) => compose::pip(args, ctx),
        Commands::Blend(args) => compose::blend(args, ctx),
        Commands::Join(args) => compose::join(args, ctx),
        Commands::JoinRandom(args) => compose::join_random(args, ctx),
        Commands::Slideshow(args) => compose::slideshow(args, ctx),
        Commands::Publish(args) => compose::publish(args, ctx),
        Commands::ImageResize(args) => image::resize(args, ctx),
        Commands::ImageFrame(args) => image::frame(args, ctx),
        Commands::ImageCrop(args) => image::crop(args, ctx),
    }
}

/// 输出文件命名规则：`stem + suffix + ext`
pub struct Naming<'n> {
    pub suffix: String,
    /// `None` 时沿用输入扩展名
    pub extension: Option<&'n str>,
}

impl<'n> Naming<'n> {
    pub fn new(suffix: impl Into<String>, extension: Option<&'n str>) -> Self {
        Self {
            suffix: suffix.into(),
            extension,
        }
    }
}

/// 按输入路径类型分派到单文件模式或批量模式
///
/// `process` 接收输入文件与已推导的输出路径。
pub fn dispatch<F>(
    ctx: &mut Context<'_>,
    input: &Path,
    kind: MediaKind,
    output: &Path,
    naming: &Naming<'_>,
    mut process: F,
) -> Result<()>
where
    F: FnMut(&mut Context<'_>, &Path, &Path) -> Result<()>,
{
    match paths::classify(input) {
        PathKind::File => {
            let target = paths::resolve_output(output, input, &naming.suffix, naming.extension);
            process(ctx, input, &target)?;
            output::print_conversion(&input.display().to_string(), &target.display().to_string());
            Ok(())
        }
        PathKind::Directory => {
            paths::ensure_dir(output)?;
            let files = FileCollector::new(input, kind).collect()?;
            if files.is_empty() {
                output::print_warning(&format!(
                    "No {} files found in {}",
                    kind,
                    input.display()
                ));
                return Ok(());
            }

            output::print_info(&format!("Found {} {} file(s)", files.len(), kind));

            let runner = BatchRunner::new(ctx.policy);
            let result = runner.run(&files, |file| {
                let target =
                    paths::derive_output(output, file, &naming.suffix, naming.extension);
                process(ctx, file, &target)?;
                Ok(target.display().to_string())
            })?;

            batch::runner::report(&result);
            Ok(())
        }
        PathKind::Invalid => Err(MediaError::InvalidPath {
            path: input.display().to_string(),
        }),
    }
}

/// 要求路径是已存在的文件
pub fn require_file(path: &Path) -> Result<()> {
    match paths::classify(path) {
        PathKind::File => Ok(()),
        _ => Err(MediaError::InvalidPath {
            path: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// 在目录中创建空文件
    pub fn touch(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                fs::write(&path, b"").unwrap();
                path
            })
            .collect()
    }
}
