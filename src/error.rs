use std::fmt;

use serde_json::Value;

#[derive(Debug)]
pub enum Error {
    /// Transport failure while reading or writing a device.
    Request(reqwest::Error),
    /// Transport failure while authenticating.
    Login(reqwest::Error),
    /// The service answered with a status code the call does not accept.
    Response { status: u16, body: Value },
    /// Transport failure outside the device and login calls.
    Transport(reqwest::Error),
    Decode(DecodeError),
    Tls(String),
    Io(std::io::Error),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request(e) => write!(f, "request failed: {e}"),
            Error::Login(e) => write!(f, "login failed: {e}"),
            Error::Response { status, body } => {
                write!(f, "invalid response, status code: {status} - data: {body}")
            }
            Error::Transport(e) => write!(f, "HTTP error: {e}"),
            Error::Decode(e) => write!(f, "decode error: {e}"),
            Error::Tls(msg) => write!(f, "TLS error: {msg}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Request(e) | Error::Login(e) | Error::Transport(e) => Some(e),
            Error::Decode(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(DecodeError::Json(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Structural failures while turning a response body into domain types.
#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    /// A coded field carried a value outside its known set.
    UnknownCode { field: &'static str, code: Value },
    InvalidType { field: &'static str, expected: &'static str },
    NotAnObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Json(e) => write!(f, "malformed JSON: {e}"),
            DecodeError::UnknownCode { field, code } => {
                write!(f, "unrecognized code for {field}: {code}")
            }
            DecodeError::InvalidType { field, expected } => {
                write!(f, "{field}: expected {expected}")
            }
            DecodeError::NotAnObject => write!(f, "expected a JSON object"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
