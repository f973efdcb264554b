//! # 数据模型模块
//!
//! 定义操作描述符中使用的参数类型与时长格式化。
//!
//! ## 依赖关系
//! - 被 `cli/`、`builder/` 和 `commands/` 使用
//! - 子模块: operation, duration

pub mod duration;
pub mod operation;

pub use duration::{format_duration, format_duration_millis};
pub use operation::{
    Corner, Dimensions, EndTime, HorizontalAlign, JoinMode, ResizeMode, Timestamp, VerticalAlign,
};
