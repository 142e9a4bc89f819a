use thiserror::Error;

/// Errors produced while collecting statistics or rendering the chart.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value for `{key}`: {value}")]
    Config { key: String, value: String },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
