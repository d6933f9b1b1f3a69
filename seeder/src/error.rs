//! Error types for the `seeder` crate.
//!
//! Same shape as the rest of the workspace: a root `Error` holding an
//! `ErrorKind` and an optional source for chaining.

use std::error::Error as StdError;
use std::fmt;

#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
    /// The seeding step that failed, e.g. `creating user 홍길동`.
    pub step: Option<String>,
}

/// Ways a seeding step can fail. None of them are retried.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// The request never produced a response (refused, reset, bad URL).
    Network,
    /// The base URL can't have endpoint paths appended to it.
    InvalidUrl,
    /// The service answered with a non-2xx status code.
    Status(u16),
    /// The response body was not the expected JSON envelope.
    Decode,
    /// The envelope has no `data` field where an identifier was expected.
    MissingData,
    /// `data` is present but is neither a string nor an integer.
    InvalidId,
    /// The seed plan refers to a user or team that it never creates.
    Plan(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(step) = &self.step {
            write!(f, "{step} failed: ")?;
        }
        match &self.error_kind {
            ErrorKind::InvalidUrl => write!(f, "Invalid base URL")?,
            ErrorKind::Network => write!(f, "Network error")?,
            ErrorKind::Status(code) => write!(f, "Unexpected HTTP status {code}")?,
            ErrorKind::Decode => write!(f, "Response body is not a valid envelope")?,
            ErrorKind::MissingData => write!(f, "Response envelope has no `data` field")?,
            ErrorKind::InvalidId => write!(f, "Response `data` is not an identifier")?,
            ErrorKind::Plan(detail) => write!(f, "Invalid seed plan: {detail}")?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl Error {
    pub fn new(error_kind: ErrorKind, source: Option<Box<dyn StdError + Send + Sync>>) -> Self {
        Error {
            source,
            error_kind,
            step: None,
        }
    }

    /// Labels the error with the seeding step it interrupted.
    pub fn during(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = match err.status() {
            Some(status) => ErrorKind::Status(status.as_u16()),
            None if err.is_decode() => ErrorKind::Decode,
            None => ErrorKind::Network,
        };

        Error::new(error_kind, Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::new(ErrorKind::InvalidUrl, Some(Box::new(err)))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Decode, Some(Box::new(err)))
    }
}

/// Helper function to create an error for a non-2xx response, keeping the body as context.
pub fn status_error(code: u16, body: &str) -> Error {
    Error::new(ErrorKind::Status(code), Some(body.to_string().into()))
}

/// Helper function to create seed plan errors.
pub fn plan_error(message: String) -> Error {
    Error::new(ErrorKind::Plan(message), None)
}
