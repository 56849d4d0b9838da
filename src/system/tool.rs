//! 7-Zip 명령줄 도구 래퍼
//!
//! 호출 형태:
//! - list:     `tool l <archive>`
//! - add:      `tool a <archive> <file>...`
//! - remove:   `tool d <archive> <filename>`
//! - extract:  `tool x <archive> -o<dir> [-y]`

use crate::system::executor::{CommandExecutor, CommandOutput, ProcessExecutor, ToolInvocation};
use crate::system::listing::{parse_listing, ParsedListing};
use crate::utils::error::{CobaltError, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRAM: &str = "7z";

pub struct ArchiveTool {
    program: String,
    executor: Box<dyn CommandExecutor>,
}

impl ArchiveTool {
    /// 실제 프로세스를 실행하는 도구
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_executor(program, Box::new(ProcessExecutor))
    }

    pub fn with_executor(program: impl Into<String>, executor: Box<dyn CommandExecutor>) -> Self {
        Self {
            program: program.into(),
            executor,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 목록 조회 후 파싱. 0이 아닌 종료 코드는 파싱 전에 `CommandFailed`
    pub fn list(&self, archive: &Path) -> Result<ParsedListing> {
        let invocation = self.invocation("l").arg(path_arg(archive));
        let output = self.run_checked(&invocation)?;
        Ok(parse_listing(&output.stdout))
    }

    pub fn add(&self, archive: &Path, paths: &[PathBuf]) -> Result<()> {
        let invocation = self
            .invocation("a")
            .arg(path_arg(archive))
            .args(paths.iter().map(|p| path_arg(p)));
        self.run_checked(&invocation)
            .map(|_| ())
            .map_err(|e| match e {
                CobaltError::CommandFailed { stderr, .. } => CobaltError::AddFailed {
                    path: archive.to_path_buf(),
                    reason: stderr,
                },
                other => other,
            })
    }

    pub fn delete(&self, archive: &Path, filename: &str) -> Result<()> {
        let invocation = self
            .invocation("d")
            .arg(path_arg(archive))
            .arg(filename);
        self.run_checked(&invocation)
            .map(|_| ())
            .map_err(|e| match e {
                CobaltError::CommandFailed { stderr, .. } => CobaltError::RemoveFailed {
                    path: archive.to_path_buf(),
                    filename: filename.to_string(),
                    reason: stderr,
                },
                other => other,
            })
    }

    /// `overwrite_all`이 true일 때만 `-y`를 붙인다
    pub fn extract(&self, archive: &Path, dest_dir: &Path, overwrite_all: bool) -> Result<()> {
        let mut invocation = self
            .invocation("x")
            .arg(path_arg(archive))
            .arg(format!("-o{}", dest_dir.display()));
        if overwrite_all {
            invocation = invocation.arg("-y");
        }
        self.run_checked(&invocation)
            .map(|_| ())
            .map_err(|e| match e {
                CobaltError::CommandFailed { stderr, .. } => CobaltError::ExtractFailed {
                    path: archive.to_path_buf(),
                    reason: stderr,
                },
                other => other,
            })
    }

    /// 새 압축 파일 생성
    pub fn compress(&self, archive: &Path, sources: &[PathBuf]) -> Result<()> {
        if sources.is_empty() {
            return Err(CobaltError::CompressFailed {
                path: archive.to_path_buf(),
                reason: "No source selected".to_string(),
            });
        }
        if archive.exists() {
            return Err(CobaltError::CompressFailed {
                path: archive.to_path_buf(),
                reason: "Destination archive already exists".to_string(),
            });
        }

        let invocation = self
            .invocation("a")
            .arg(path_arg(archive))
            .args(sources.iter().map(|p| path_arg(p)));
        self.run_checked(&invocation)
            .map(|_| ())
            .map_err(|e| match e {
                CobaltError::CommandFailed { stderr, .. } => CobaltError::CompressFailed {
                    path: archive.to_path_buf(),
                    reason: stderr,
                },
                other => other,
            })
    }

    fn invocation(&self, command: &str) -> ToolInvocation {
        ToolInvocation::new(self.program.as_str()).arg(command)
    }

    fn run_checked(&self, invocation: &ToolInvocation) -> Result<CommandOutput> {
        info!("run: {}", invocation);
        let output = self.executor.execute(invocation).inspect_err(|e| {
            warn!("{}", e);
        })?;

        if output.success() {
            return Ok(output);
        }

        let stderr = output.stderr_text();
        warn!(
            "'{}' exited with status {}: {}",
            invocation, output.status, stderr
        );
        Err(CobaltError::CommandFailed {
            command: invocation.to_string(),
            status: output.status,
            stderr,
        })
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
