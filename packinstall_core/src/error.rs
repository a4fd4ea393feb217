use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown modpack type '{0}'")]
    UnknownModpackType(String),
    #[error("not found: {0}")]
    ResourceNotFound(String),
    #[error("{tool} exited with {}: {stderr}", exit_label(.code))]
    InstallerFailure {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("cancelled by operator")]
    Cancelled,
}

pub type InstallResult<T> = Result<T, InstallError>;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl InstallError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attaches the offending path to `std::io::Error`s.
pub trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> InstallResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> InstallResult<T> {
        self.map_err(|source| InstallError::io(path, source))
    }
}
