use std::path::PathBuf;

// Errors surfaced by ingestion and by the fallible query path
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Feed directory not found: {0}")]
    FeedDirMissing(PathBuf),
    #[error("Failed to write export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: Box<FixtureError>,
    },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T, E = FixtureError> = std::result::Result<T, E>;
