//! # 外部进程调用
//!
//! 同步执行一条命令行并报告结果。
//!
//! ## 约定
//! - 阻塞调用，不重试，无超时，失败时不清理已产生的输出
//! - 非零退出码视为失败，错误中附带完整命令行
//! - 是否中止整个程序由调用方决定
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/runner.rs` 使用
//! - 使用 `builder::CommandLine`, `utils/output.rs`

use crate::builder::CommandLine;
use crate::error::{MediaError, Result};
use crate::utils::output;

use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// 命令执行接口
pub trait Invoker {
    /// 执行命令，子进程输出直接写到终端
    fn run(&mut self, cmd: &CommandLine) -> Result<()>;

    /// 执行命令并返回标准输出（用于元数据查询）
    fn capture(&mut self, cmd: &CommandLine) -> Result<String>;
}

/// 基于 `std::process::Command` 的实现
#[derive(Debug, Clone)]
pub struct SystemInvoker {
    /// 执行前是否回显命令行
    echo: bool,
}

impl SystemInvoker {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }

    fn spawn_error(cmd: &CommandLine, err: std::io::Error) -> MediaError {
        if err.kind() == ErrorKind::NotFound {
            MediaError::CommandNotFound {
                command: cmd.program().to_string(),
            }
        } else {
            MediaError::SpawnFailed {
                command: cmd.to_string(),
                source: err,
            }
        }
    }
}

impl Invoker for SystemInvoker {
    fn run(&mut self, cmd: &CommandLine) -> Result<()> {
        if self.echo {
            output::print_command(&cmd.to_string());
        }

        let status = Command::new(cmd.program())
            .args(cmd.os_args())
            .status()
            .map_err(|e| Self::spawn_error(cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::CommandFailed {
                command: cmd.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    fn capture(&mut self, cmd: &CommandLine) -> Result<String> {
        let out = Command::new(cmd.program())
            .args(cmd.os_args())
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(cmd, e))?;

        if out.status.success() {
            Ok(String::from_utf8_lossy(&out.stdout).to_string())
        } else {
            Err(MediaError::CommandFailed {
                command: cmd.to_string(),
                code: out.status.code().unwrap_or(-1),
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_reported() {
        let cmd = CommandLine::new("mediakit-definitely-missing-binary").arg("--version");
        let err = SystemInvoker::new(false).run(&cmd).unwrap_err();
        assert!(matches!(err, MediaError::CommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let cmd = CommandLine::new("sh").args(["-c", "exit 3"]);
        match SystemInvoker::new(false).run(&cmd) {
            Err(MediaError::CommandFailed { code, command }) => {
                assert_eq!(code, 3);
                assert!(command.contains("exit 3"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_returns_stdout() {
        let cmd = CommandLine::new("sh").args(["-c", "echo 12.5"]);
        let out = SystemInvoker::new(false).capture(&cmd).unwrap();
        assert_eq!(out.trim(), "12.5");
    }
}
