//! Buffer classifier: turns raw `error`/`stderr` output into a UI decision.
//!
//! # Architecture
//!
//! - `raw`: the `{error, stderr}` input and safe string coercion
//! - `kinds`: channels and their error kinds
//! - `patterns`: ordered substring tables, first match wins
//! - `decisions`: what each kind means for alerting, logging and success
//! - `sanitize`: cleans raw text when no fixed message applies
//!
//! Classification is pure apart from the injected logger, so one classifier can be shared by
//! any number of concurrent file operations.

mod decisions;
mod kinds;
mod patterns;
mod raw;
mod sanitize;

pub use decisions::{
    ClassificationOutcome, ClassificationResult, MSG_COMMAND_FAILED, MSG_FILE_NOT_FOUND, MSG_LOCAL_COMMON,
    MSG_MTP_COMMON, MSG_MTP_STORAGE_NOT_ACCESSIBLE, MSG_MTP_UNRESPONSIVE, MSG_NO_MTP_DEVICE, MSG_NO_PERMISSION,
    decide_local, decide_mtp,
};
pub use kinds::{Channel, ErrorKind, LocalErrorKind, MtpErrorKind};
pub use patterns::{LOCAL_PATTERNS, MTP_PATTERNS, first_match, match_local_kind, match_mtp_kind};
pub use raw::{CommandOutput, RawResult, coerce_to_string};
pub use sanitize::{SANITIZE_FALLBACK, sanitize, sanitize_raw};

use std::sync::Arc;

use crate::logger::{ClassificationLogger, LogFacadeLogger};

/// Outcome of one classification call, plus the kind that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `None` when the input was empty.
    pub kind: Option<ErrorKind>,
    pub outcome: ClassificationOutcome,
}

impl Classification {
    fn silent() -> Self {
        Self {
            kind: None,
            outcome: ClassificationOutcome::SilentSuccess,
        }
    }

    pub fn result(&self) -> ClassificationResult {
        self.outcome.to_result()
    }
}

/// Classifies raw results from both channels.
#[derive(Clone)]
pub struct BufferClassifier {
    logger: Arc<dyn ClassificationLogger>,
}

impl Default for BufferClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LogFacadeLogger))
    }
}

impl std::fmt::Debug for BufferClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferClassifier").finish_non_exhaustive()
    }
}

impl BufferClassifier {
    pub fn new(logger: Arc<dyn ClassificationLogger>) -> Self {
        Self { logger }
    }

    pub fn classify(&self, channel: Channel, raw: &RawResult) -> Classification {
        match channel {
            Channel::Mtp => self.classify_mtp(raw),
            Channel::Local => self.classify_local(raw),
        }
    }

    /// Classifies output from the MTP bridge.
    ///
    /// A missing device is logged quietly; every other match is logged loudly.
    pub fn classify_mtp(&self, raw: &RawResult) -> Classification {
        let Some(kind) = match_mtp_kind(raw) else {
            return Classification::silent();
        };

        let message = format_log_message(Channel::Mtp, raw);
        self.logger.log_mtp(&message, kind != MtpErrorKind::NoDevice);

        Classification {
            kind: Some(kind.into()),
            outcome: decide_mtp(kind, raw),
        }
    }

    /// Classifies output from local filesystem calls.
    pub fn classify_local(&self, raw: &RawResult) -> Classification {
        let Some(kind) = match_local_kind(raw) else {
            return Classification::silent();
        };

        self.logger.log_local(&format_log_message(Channel::Local, raw));

        Classification {
            kind: Some(kind.into()),
            outcome: decide_local(kind, raw),
        }
    }
}

fn format_log_message(channel: Channel, raw: &RawResult) -> String {
    let label = match channel {
        Channel::Mtp => "MTP",
        Channel::Local => "Local",
    };
    format!(
        "{} buffer output;\nerror: {};\nstderr: {}",
        label,
        raw.error_text().trim(),
        raw.stderr_text().trim()
    )
}
