use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("chart data has {rows} rows, but at most {limit} rows can be embedded")]
    ChartDataTooLarge { rows: usize, limit: usize },

    #[error("unsupported output format {0:?} (expected \"text\" or \"bytes\")")]
    UnsupportedFormat(String),

    #[error("row has {got} cells, but the table has {expected} columns")]
    RowArityMismatch { expected: usize, got: usize },

    #[error("index has {labels} labels for {rows} rows")]
    IndexLengthMismatch { rows: usize, labels: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
