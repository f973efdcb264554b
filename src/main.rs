//! # mediakit - ffmpeg / ImageMagick 命令行前端
//!
//! 为外部媒体程序组装命令行并按顺序执行，支持单文件与目录批量处理。
//!
//! ## 子命令
//! - 视频: `normalize`, `trim`, `mute`, `resize`, `mix`, `addsub`,
//!   `dummyaudio`, `extract-audio`, `audio2video`, `info`, `length`
//! - 合成: `logo`, `text`, `pip`, `blend`, `join`, `joinrandom`,
//!   `slideshow`, `publish`
//! - 图片: `image-resize`, `image-frame`, `image-crop`
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── builder/  (命令行构建)
//!   │     ├── batch/    (目录批量执行)
//!   │     └── models/   (参数值类型)
//!   ├── config.rs   (外部程序与素材路径)
//!   ├── utils/      (进程调用、路径、输出)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod builder;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;
use commands::Context;
use config::ToolConfig;
use utils::process::SystemInvoker;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().ok();
            std::process::exit(code);
        }
    };

    let config = ToolConfig::from_args(&cli.global);
    let mut invoker = SystemInvoker::new(!cli.global.quiet);
    let mut ctx = Context::new(config, cli.global.on_error, &mut invoker);

    if let Err(e) = commands::run(cli.command, &mut ctx) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
