//! Logger collaborator that receives every non-silent classification.
//!
//! The classifier holds an injected `Arc<dyn ClassificationLogger>` instead of reaching for a
//! global. [`LogFacadeLogger`] forwards to the `log` crate, which is what the app wires up.

use log::{debug, error};
#[cfg(test)]
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const MTP_LOG_TARGET: &str = "mtp";
pub const LOCAL_LOG_TARGET: &str = "local";

pub trait ClassificationLogger: Send + Sync {
    /// `loud` is false only for expected conditions (no device plugged in).
    fn log_mtp(&self, message: &str, loud: bool);

    fn log_local(&self, message: &str);
}

/// Forwards classification logs to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeLogger;

impl ClassificationLogger for LogFacadeLogger {
    fn log_mtp(&self, message: &str, loud: bool) {
        if loud {
            error!(target: MTP_LOG_TARGET, "{}", message);
        } else {
            debug!(target: MTP_LOG_TARGET, "{}", message);
        }
    }

    fn log_local(&self, message: &str) {
        error!(target: LOCAL_LOG_TARGET, "{}", message);
    }
}

/// A single captured log call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoggedEntry {
    Mtp { message: String, loud: bool },
    Local { message: String },
}

/// Captures log calls so tests can assert on them.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    entries: Mutex<Vec<LoggedEntry>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn entries(&self) -> Vec<LoggedEntry> {
        self.locked().clone()
    }

    fn locked(&self) -> MutexGuard<'_, Vec<LoggedEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl ClassificationLogger for RecordingLogger {
    fn log_mtp(&self, message: &str, loud: bool) {
        self.locked().push(LoggedEntry::Mtp {
            message: message.to_string(),
            loud,
        });
    }

    fn log_local(&self, message: &str) {
        self.locked().push(LoggedEntry::Local {
            message: message.to_string(),
        });
    }
}
