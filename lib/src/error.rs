use std::error;
use std::fmt;

/// All possible SendPost client errors.
/// Validation failures are caught before any network call is made.
#[derive(Debug)]
pub enum Error {
    /// Malformed local input (missing recipient, empty body, bad address).
    Validation(String),
    /// Non-2xx API response, with the raw response body.
    Transport { status: u16, body: String },
    /// Connection-level failure before a response was received.
    Network(String),
    Io(String),
    Json(String),
    UrlParse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Validation(ref msg) => write!(f, "Validation: {}", msg),
            Error::Transport { status, ref body } => {
                write!(f, "Transport: status {}: {}", status, body)
            }
            Error::Network(ref msg) => write!(f, "Network: {}", msg),
            Error::Io(ref msg) => write!(f, "Io: {}", msg),
            Error::Json(ref msg) => write!(f, "Json: {}", msg),
            Error::UrlParse(ref msg) => write!(f, "UrlParse: {}", msg),
        }
    }
}

impl error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::UrlParse(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Validation(format!("invalid base64 content: {}", err))
    }
}
