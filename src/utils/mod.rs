//! # 工具函数模块
//!
//! 提供美化输出、进度条、外部进程调用、路径处理等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 模块使用
//! - 子模块: output, progress, process, paths, concat_list

pub mod concat_list;
pub mod output;
pub mod paths;
pub mod process;
pub mod progress;
