//! 외부 도구 실행 경계
//!
//! 목록/추가/삭제/해제 모두 이 트레이트를 통해서만 외부 프로세스를 실행한다.
//! 타임아웃과 취소는 없다: 호출은 끝날 때까지 블록된다.

use crate::utils::error::{CobaltError, Result};
use std::fmt;
use std::process::Command;

/// 도구 호출 (프로그램 이름 + 순서 있는 인자 목록)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 7-Zip 명령 문자 (첫 번째 인자)
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// 캡처된 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// 종료 코드 (시그널로 종료된 경우 -1)
    pub status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// 진단 메시지용 stderr 텍스트
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

pub trait CommandExecutor {
    /// 호출을 동기 실행하고 출력을 캡처한다.
    ///
    /// 프로세스 시작 자체가 실패하면 `LaunchFailed`를 반환한다. 0이 아닌 종료 코드는
    /// 에러가 아니며 `CommandOutput::status`로 전달된다.
    fn execute(&self, invocation: &ToolInvocation) -> Result<CommandOutput>;
}

/// `std::process::Command` 기반 실행기
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> Result<CommandOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|e| CobaltError::LaunchFailed {
                program: invocation.program.clone(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            status: output.status.code().unwrap_or(-1),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_quotes_whitespace() {
        let invocation = ToolInvocation::new("7z")
            .arg("a")
            .arg("/tmp/my archive.7z")
            .arg("notes.txt");
        assert_eq!(
            invocation.to_string(),
            "7z a \"/tmp/my archive.7z\" notes.txt"
        );
        assert_eq!(invocation.command(), Some("a"));
    }

    #[test]
    fn test_command_output_stderr_text_is_trimmed() {
        let output = CommandOutput {
            stdout: Vec::new(),
            stderr: b"\nERROR: cannot open file\n".to_vec(),
            status: 2,
        };
        assert!(!output.success());
        assert_eq!(output.stderr_text(), "ERROR: cannot open file");
    }

    #[test]
    fn test_process_executor_missing_binary_is_launch_failure() {
        let invocation = ToolInvocation::new("cobalt-test-no-such-binary-7z").arg("l");
        let result = ProcessExecutor.execute(&invocation);
        assert!(matches!(
            result,
            Err(CobaltError::LaunchFailed { program, .. })
                if program == "cobalt-test-no-such-binary-7z"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_executor_captures_nonzero_status() {
        let invocation = ToolInvocation::new("sh")
            .arg("-c")
            .arg("printf out; printf err >&2; exit 3");
        let output = ProcessExecutor
            .execute(&invocation)
            .expect("sh should launch");
        assert_eq!(output.status, 3);
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr_text(), "err");
    }
}
