use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Error fetching data for {url} after {attempts} attempts: {} - {body}",
        .status.map(|s| s.to_string()).unwrap_or_else(|| "no response".to_string())
    )]
    FetchExhausted {
        url: String,
        attempts: u32,
        status: Option<u16>,
        body: String,
    },

    #[error("Error processing data for {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Whether another attempt could succeed. Parse failures never are.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Status { .. } | Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
