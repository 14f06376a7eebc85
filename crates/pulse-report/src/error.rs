use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error for {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render {chart} chart to {path}: {reason}")]
    Chart {
        chart: &'static str,
        path: String,
        reason: String,
    },

    #[error("preview write error: {0}")]
    PreviewIo(#[from] std::io::Error),

    #[error("preview serialization error: {0}")]
    PreviewJson(#[from] serde_json::Error),
}
