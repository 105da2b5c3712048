//! Decision tables: what the UI should do for each error kind.

use serde::{Deserialize, Serialize};

use super::kinds::{LocalErrorKind, MtpErrorKind};
use super::raw::RawResult;
use super::sanitize::sanitize_raw;

// ============================================================================
// User-facing messages
// ============================================================================

pub const MSG_NO_MTP_DEVICE: &str = "No MTP device found.";
pub const MSG_MTP_UNRESPONSIVE: &str = "MTP device is not responding. Reload or reconnect device.";
pub const MSG_MTP_STORAGE_NOT_ACCESSIBLE: &str = "MTP storage not accessible.";
pub const MSG_MTP_COMMON: &str = "Oops.. Your MTP device has gone crazy! Try again.";
pub const MSG_NO_PERMISSION: &str = "Operation not permitted.";
pub const MSG_COMMAND_FAILED: &str = "Could not complete! Try again.";
pub const MSG_FILE_NOT_FOUND: &str = "File not found! Try again.";
pub const MSG_LOCAL_COMMON: &str = "Oops.. Something went wrong! Try again.";

// ============================================================================
// Outcome shapes
// ============================================================================

/// One variant per response shape. Each maps to a fixed `(alert, log, status)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "message")]
pub enum ClassificationOutcome {
    /// Nothing went wrong.
    SilentSuccess,
    /// Expected condition, like no device plugged in. Not alerted, not logged, not successful.
    Benign(String),
    /// Device or storage stopped answering. Alerted, logged, failed.
    Unresponsive(String),
    /// Raw message is passed through sanitized; the operation still counts as done.
    Recovered(String),
    /// Known or catch-all failure with a fixed message. Alerted and logged.
    Reported(String),
}

impl ClassificationOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::SilentSuccess => None,
            Self::Benign(msg) | Self::Unresponsive(msg) | Self::Recovered(msg) | Self::Reported(msg) => {
                Some(msg.as_str())
            }
        }
    }

    pub fn throw_alert(&self) -> bool {
        matches!(self, Self::Unresponsive(_) | Self::Recovered(_) | Self::Reported(_))
    }

    pub fn log_error(&self) -> bool {
        self.throw_alert()
    }

    pub fn status(&self) -> bool {
        matches!(self, Self::SilentSuccess | Self::Recovered(_) | Self::Reported(_))
    }

    /// Whether a batch should stop at this item.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::SilentSuccess | Self::Recovered(_))
    }

    pub fn to_result(&self) -> ClassificationResult {
        ClassificationResult {
            error: self.message().map(str::to_string),
            throw_alert: self.throw_alert(),
            log_error: self.log_error(),
            status: self.status(),
        }
    }
}

/// The decision object handed to callers, serialized as `{error, throwAlert, logError, status}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub error: Option<String>,
    pub throw_alert: bool,
    pub log_error: bool,
    pub status: bool,
}

impl From<ClassificationOutcome> for ClassificationResult {
    fn from(outcome: ClassificationOutcome) -> Self {
        outcome.to_result()
    }
}

// ============================================================================
// Tables
// ============================================================================

pub fn decide_mtp(kind: MtpErrorKind, raw: &RawResult) -> ClassificationOutcome {
    use ClassificationOutcome::*;
    match kind {
        MtpErrorKind::NoDevice => Benign(MSG_NO_MTP_DEVICE.to_string()),
        MtpErrorKind::InvalidObjectHandle
        | MtpErrorKind::InvalidStorageId
        | MtpErrorKind::WritePipeFailure
        | MtpErrorKind::Unresponsive => Unresponsive(MSG_MTP_UNRESPONSIVE.to_string()),
        MtpErrorKind::StorageNotAccessible => Unresponsive(MSG_MTP_STORAGE_NOT_ACCESSIBLE.to_string()),
        MtpErrorKind::FileNotFound
        | MtpErrorKind::NoFilesSelected
        | MtpErrorKind::InvalidPath
        | MtpErrorKind::PartialDeletion
        | MtpErrorKind::NoSuchFile => Recovered(sanitize_raw(raw)),
        MtpErrorKind::Common => Reported(MSG_MTP_COMMON.to_string()),
    }
}

pub fn decide_local(kind: LocalErrorKind, raw: &RawResult) -> ClassificationOutcome {
    use ClassificationOutcome::*;
    match kind {
        LocalErrorKind::NoPermission => Reported(MSG_NO_PERMISSION.to_string()),
        LocalErrorKind::CommandFailed => Reported(MSG_COMMAND_FAILED.to_string()),
        LocalErrorKind::NoSuchFile => Reported(MSG_FILE_NOT_FOUND.to_string()),
        LocalErrorKind::InvalidPath => Recovered(sanitize_raw(raw)),
        LocalErrorKind::Common => Reported(MSG_LOCAL_COMMON.to_string()),
    }
}
