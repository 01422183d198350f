use std::fmt;

/// Reasons a setpoint request is rejected before anything is sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidSetpoints,
    CoolBelowHeat,
    OutOfRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidSetpoints => write!(f, "invalid setpoints provided"),
            ValidationError::CoolBelowHeat => {
                write!(f, "cool setpoint can not be lower than heat setpoint")
            }
            ValidationError::OutOfRange => write!(f, "setpoint(s) outside of allowable range"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },
    Auth(String),
    Validation(ValidationError),
    InvalidPayload(String),
    Config(String),
    Io(std::io::Error),
}

impl Error {
    /// True for failures of the exchange itself: network, status, or body shape.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Decode { .. }
        )
    }

    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            Error::Validation(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Status { operation, status } => {
                write!(f, "{operation} request returned a non-success response: {status}")
            }
            Error::Decode { operation, source } => {
                write!(f, "{operation} response could not be decoded: {source}")
            }
            Error::Auth(msg) => write!(f, "authentication failed: {msg}"),
            Error::Validation(v) => write!(f, "{v}"),
            Error::InvalidPayload(msg) => write!(f, "invalid update payload: {msg}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Decode { source, .. } => Some(source),
            Error::Validation(v) => Some(v),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
