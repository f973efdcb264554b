//! # 批量执行器
//!
//! 按顺序对文件列表执行单文件操作。
//!
//! ## 功能
//! - 严格串行：一次只运行一个外部进程
//! - 两种失败策略：首个失败即中止 / 记录失败后继续
//! - 进度条显示（子进程运行期间挂起）
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `tabled` 输出失败列表

use crate::error::Result;
use crate::utils::{output, progress};

use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 批量处理中单个文件失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the whole batch at the first failed file
    #[default]
    #[value(name = "abort")]
    AbortOnFirstError,
    /// Record the failure and keep processing the remaining files
    #[value(name = "continue")]
    ContinueOnError,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (文件路径, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    policy: FailurePolicy,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// 顺序处理文件列表
    ///
    /// `processor` 成功时返回输出描述。`AbortOnFirstError` 策略下，
    /// 首个错误直接返回；已处理的文件不回滚。
    pub fn run<F>(&self, files: &[PathBuf], mut processor: F) -> Result<BatchResult>
    where
        F: FnMut(&Path) -> Result<String>,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");
        let mut result = BatchResult::default();

        for file in files {
            pb.set_message(file_label(file));
            let outcome = pb.suspend(|| processor(file));

            match outcome {
                Ok(target) => {
                    result.success += 1;
                    pb.suspend(|| {
                        output::print_conversion(&file.display().to_string(), &target);
                    });
                }
                Err(e) => match self.policy {
                    FailurePolicy::AbortOnFirstError => {
                        pb.finish_and_clear();
                        return Err(e);
                    }
                    FailurePolicy::ContinueOnError => {
                        pb.suspend(|| {
                            output::print_error(&format!("{}: {}", file.display(), e));
                        });
                        result.failed += 1;
                        result.failures.push((file.display().to_string(), e.to_string()));
                    }
                },
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(result)
    }
}

fn file_label(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 打印批量处理汇总
pub fn report(result: &BatchResult) {
    #[derive(Tabled)]
    struct FailureRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Error")]
        error: String,
    }

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} of {} succeeded, {} failed",
        result.success,
        result.total(),
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        let rows: Vec<FailureRow> = result
            .failures
            .iter()
            .take(10)
            .map(|(file, error)| FailureRow {
                file: file.clone(),
                error: error.lines().next().unwrap_or_default().to_string(),
            })
            .collect();
        println!("{}", Table::new(&rows));
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn fail_on_b(path: &Path) -> Result<String> {
        if path.to_string_lossy().contains('b') {
            Err(MediaError::CommandFailed {
                command: format!("ffmpeg -i {}", path.display()),
                code: 1,
            })
        } else {
            Ok(format!("{}.out", path.display()))
        }
    }

    #[test]
    fn test_abort_on_first_error_stops_batch() {
        let mut seen = Vec::new();
        let runner = BatchRunner::new(FailurePolicy::AbortOnFirstError);
        let result = runner.run(&files(&["a.mp4", "b.mp4", "c.mp4"]), |p| {
            seen.push(p.to_path_buf());
            fail_on_b(p)
        });

        assert!(result.is_err());
        assert_eq!(seen, files(&["a.mp4", "b.mp4"]));
    }

    #[test]
    fn test_continue_on_error_processes_every_file() {
        let mut seen = Vec::new();
        let runner = BatchRunner::new(FailurePolicy::ContinueOnError);
        let result = runner
            .run(&files(&["a.mp4", "b.mp4", "c.mp4"]), |p| {
                seen.push(p.to_path_buf());
                fail_on_b(p)
            })
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 3);
        assert_eq!(result.failures[0].0, "b.mp4");
    }

    #[test]
    fn test_default_policy_is_abort() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::AbortOnFirstError);
    }
}
