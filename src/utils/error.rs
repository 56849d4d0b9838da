use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CobaltError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// 외부 도구 프로세스를 시작하지 못함 (바이너리 없음, 권한 없음 등)
    #[error("Failed to launch '{program}': {reason}")]
    LaunchFailed { program: String, reason: String },

    /// 프로세스는 실행되었으나 0이 아닌 상태로 종료
    #[error("'{command}' exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("Failed to add files to {path}: {reason}")]
    AddFailed { path: PathBuf, reason: String },

    #[error("Failed to remove '{filename}' from {path}: {reason}")]
    RemoveFailed {
        path: PathBuf,
        filename: String,
        reason: String,
    },

    #[error("Failed to extract {path}: {reason}")]
    ExtractFailed { path: PathBuf, reason: String },

    #[error("Failed to create archive {path}: {reason}")]
    CompressFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CobaltError>;
