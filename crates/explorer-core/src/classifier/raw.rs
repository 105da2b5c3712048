//! Raw command output as it comes back from the filesystem wrapper or the MTP bridge.
//!
//! Both fields are untyped text. Anything `Display` can be turned into a field; if its
//! `Display` impl fails, the field is treated as empty.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write};

/// The `{error, stderr}` pair the classifier works on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}

impl RawResult {
    pub fn new(error: Option<&str>, stderr: Option<&str>) -> Self {
        Self {
            error: error.map(str::to_string),
            stderr: stderr.map(str::to_string),
        }
    }

    /// Builds a raw result from arbitrary values, for example an `io::Error` and a string.
    pub fn from_display<E, S>(error: Option<&E>, stderr: Option<&S>) -> Self
    where
        E: Display + ?Sized,
        S: Display + ?Sized,
    {
        Self {
            error: error.map(coerce_to_string),
            stderr: stderr.map(coerce_to_string),
        }
    }

    /// Builds a raw result from byte buffers (lossy UTF-8).
    pub fn from_buffers(error: Option<&[u8]>, stderr: Option<&[u8]>) -> Self {
        Self {
            error: error.map(|b| String::from_utf8_lossy(b).into_owned()),
            stderr: stderr.map(|b| String::from_utf8_lossy(b).into_owned()),
        }
    }

    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    pub fn stderr_text(&self) -> &str {
        self.stderr.as_deref().unwrap_or("")
    }

    /// True when neither field carries any text.
    pub fn is_empty(&self) -> bool {
        self.error_text().is_empty() && self.stderr_text().is_empty()
    }
}

impl From<&std::io::Error> for RawResult {
    fn from(err: &std::io::Error) -> Self {
        Self::from_display::<std::io::Error, str>(Some(err), None)
    }
}

/// Stringifies a value, yielding an empty string if its `Display` impl reports an error.
pub fn coerce_to_string<T: Display + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    match write!(out, "{}", value) {
        Ok(()) => out,
        Err(fmt::Error) => String::new(),
    }
}

/// Result triple returned by the filesystem wrapper (list, rename, delete, mkdir).
///
/// Only the `error`/`stderr` part is relevant for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub stderr: Option<String>,
}

impl<T> CommandOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            stderr: None,
        }
    }

    pub fn failed(error: Option<String>, stderr: Option<String>) -> Self {
        Self {
            data: None,
            error,
            stderr,
        }
    }

    pub fn raw(&self) -> RawResult {
        RawResult {
            error: self.error.clone(),
            stderr: self.stderr.clone(),
        }
    }
}
