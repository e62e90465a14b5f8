use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize chart data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No metric records to chart")]
    NoData,
}

pub type Result<T> = std::result::Result<T, Error>;
