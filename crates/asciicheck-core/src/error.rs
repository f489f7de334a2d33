//! 错误类型
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 打开/读取输入文件或加载配置时的错误
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("File not found. ({})", .path.display())]
    NotFound { path: PathBuf },

    #[error("Access to the file was denied. ({})", .path.display())]
    AccessDenied { path: PathBuf },

    #[error("An I/O error occurred while reading the file. ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl ScanError {
    /// 按 `io::ErrorKind` 归类
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            io::ErrorKind::PermissionDenied => ScanError::AccessDenied { path },
            _ => ScanError::Io { path, source: err },
        }
    }
}

/// 打开输入文件；失败时返回归类后的错误，由调用方决定跳过或终止
pub fn open_source(path: &Path) -> Result<File, ScanError> {
    File::open(path).map_err(|e| ScanError::from_io(path, e))
}
