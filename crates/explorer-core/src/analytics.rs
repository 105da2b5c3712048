//! Analytics collaborator for alertable classification outcomes.
//!
//! The dispatch service itself lives outside this crate. Callers hand in whatever sink they
//! have; [`ErrorTally`] is an in-process one that counts errors per kind.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::classifier::{Channel, ClassificationResult, ErrorKind};

pub trait AnalyticsSink: Send + Sync {
    /// Called once per outcome that raised a user alert.
    fn record_alert(&self, channel: Channel, kind: ErrorKind, result: &ClassificationResult);
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn record_alert(&self, _channel: Channel, _kind: ErrorKind, _result: &ClassificationResult) {}
}

/// Counts alerts per error kind.
#[derive(Debug, Default)]
pub struct ErrorTally {
    counts: Mutex<HashMap<ErrorKind, u64>>,
}

impl ErrorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ErrorKind) -> u64 {
        self.counts().get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts().values().sum()
    }

    /// Returns the current counts and resets them, for periodic dispatch.
    pub fn drain(&self) -> HashMap<ErrorKind, u64> {
        std::mem::take(&mut *self.counts())
    }

    // Counters stay valid even if a recording thread panicked mid-increment
    fn counts(&self) -> MutexGuard<'_, HashMap<ErrorKind, u64>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsSink for ErrorTally {
    fn record_alert(&self, _channel: Channel, kind: ErrorKind, _result: &ClassificationResult) {
        *self.counts().entry(kind).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassificationOutcome, LocalErrorKind, MtpErrorKind};
    use std::sync::Arc;

    #[test]
    fn test_tally_counts_per_kind() {
        let tally = ErrorTally::new();
        let result = ClassificationOutcome::Reported("x".to_string()).to_result();
        let unresponsive = ErrorKind::Mtp(MtpErrorKind::WritePipeFailure);
        let failed = ErrorKind::Local(LocalErrorKind::CommandFailed);

        tally.record_alert(Channel::Mtp, unresponsive, &result);
        tally.record_alert(Channel::Mtp, unresponsive, &result);
        tally.record_alert(Channel::Local, failed, &result);

        assert_eq!(tally.count(unresponsive), 2);
        assert_eq!(tally.count(failed), 1);
        assert_eq!(tally.count(ErrorKind::Mtp(MtpErrorKind::NoDevice)), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_tally_survives_poisoned_lock() {
        let tally = Arc::new(ErrorTally::new());
        let kind = ErrorKind::Mtp(MtpErrorKind::StorageNotAccessible);
        let result = ClassificationOutcome::Unresponsive("x".to_string()).to_result();
        tally.record_alert(Channel::Mtp, kind, &result);

        let poisoner = Arc::clone(&tally);
        let joined: std::thread::Result<()> = std::thread::spawn(move || {
            let _guard = poisoner.counts.lock().unwrap();
            panic!("poison the tally");
        })
        .join();
        assert!(joined.is_err());
        assert!(tally.counts.is_poisoned());

        tally.record_alert(Channel::Mtp, kind, &result);
        assert_eq!(tally.count(kind), 2);
        assert_eq!(tally.drain().len(), 1);
    }

    #[test]
    fn test_drain_resets() {
        let tally = ErrorTally::new();
        let kind = ErrorKind::Local(LocalErrorKind::NoSuchFile);
        tally.record_alert(Channel::Local, kind, &ClassificationOutcome::SilentSuccess.to_result());

        let drained = tally.drain();
        assert_eq!(drained.get(&kind), Some(&1));
        assert_eq!(tally.total(), 0);
    }
}
