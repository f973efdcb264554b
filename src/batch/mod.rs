//! # 批量处理模块
//!
//! 对目录中的每个匹配文件依次执行单文件操作。
//!
//! ## 功能
//! - 按媒体类型的扩展名白名单收集文件
//! - 可选随机打乱顺序（Durstenfeld 洗牌）
//! - 顺序执行，按失败策略中止或继续
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/` 各命令模块使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{shuffle, FileCollector, MediaKind};
pub use runner::{BatchResult, BatchRunner, FailurePolicy};
