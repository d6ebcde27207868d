use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
