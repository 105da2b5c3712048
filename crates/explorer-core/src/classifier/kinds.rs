//! Channels and the closed set of error kinds each channel can produce.

use serde::{Deserialize, Serialize};

/// Where a raw result came from. Selects the pattern and decision tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Local filesystem calls.
    Local,
    /// MTP device-bridge calls.
    Mtp,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Mtp => write!(f, "mtp"),
        }
    }
}

/// Error kinds recognized in MTP bridge output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MtpErrorKind {
    NoDevice,
    InvalidObjectHandle,
    InvalidStorageId,
    FileNotFound,
    NoFilesSelected,
    InvalidPath,
    NoSuchFile,
    WritePipeFailure,
    StorageNotAccessible,
    PartialDeletion,
    Unresponsive,
    /// Nothing in the pattern table matched.
    Common,
}

/// Error kinds recognized in local filesystem output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalErrorKind {
    NoPermission,
    CommandFailed,
    NoSuchFile,
    InvalidPath,
    /// Nothing in the pattern table matched.
    Common,
}

/// Either channel's error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "channel", content = "kind")]
pub enum ErrorKind {
    Local(LocalErrorKind),
    Mtp(MtpErrorKind),
}

impl ErrorKind {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Local(_) => Channel::Local,
            Self::Mtp(_) => Channel::Mtp,
        }
    }
}

impl From<MtpErrorKind> for ErrorKind {
    fn from(kind: MtpErrorKind) -> Self {
        Self::Mtp(kind)
    }
}

impl From<LocalErrorKind> for ErrorKind {
    fn from(kind: LocalErrorKind) -> Self {
        Self::Local(kind)
    }
}
