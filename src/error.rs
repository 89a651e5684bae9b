use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidArgument(String),
    IoFailure { path: PathBuf, reason: String },
    NumericFailure(String),
}

impl Error {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Error {
        Error::InvalidArgument(msg.into())
    }

    pub fn io_failure<P: Into<PathBuf>, S: fmt::Display>(path: P, reason: S) -> Error {
        Error::IoFailure { path: path.into(), reason: reason.to_string() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::IoFailure { path, reason } => write!(f, "io failure on {}: {reason}", path.display()),
            Error::NumericFailure(msg) => write!(f, "numeric failure: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
