use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid_url")]
    InvalidUrl(#[from] url::ParseError),
    #[error("transport_error")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected_status: {status}")]
    Status { status: StatusCode, body: String },
    #[error("invalid_payload")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Status code of a non-2xx answer, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}
