// src/error.rs
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

/// Failures that cross a module boundary. Per-line and per-element rejections
/// have their own reason enums next to the parsers.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("archive failure: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("http failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("could not move temp file into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("live endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(std::path::PathBuf),
}
