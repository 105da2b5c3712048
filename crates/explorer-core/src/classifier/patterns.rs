//! Ordered substring tables that map raw output to an error kind.
//!
//! Matching is case-insensitive substring containment against `error` and `stderr`
//! separately. The first rule that matches either field wins, so table order is priority.

use super::kinds::{LocalErrorKind, MtpErrorKind};
use super::raw::RawResult;

/// MTP rules, highest priority first. Needles must be lower case.
pub const MTP_PATTERNS: &[(&str, MtpErrorKind)] = &[
    // A missing device is checked before anything storage-related
    ("no mtp", MtpErrorKind::NoDevice),
    // Inaccessible storage outranks every message that would still report success
    ("storage not accessible", MtpErrorKind::StorageNotAccessible),
    ("error: storage", MtpErrorKind::StorageNotAccessible),
    ("invalidobjecthandle", MtpErrorKind::InvalidObjectHandle),
    ("invalidstorageid", MtpErrorKind::InvalidStorageId),
    ("could not find", MtpErrorKind::FileNotFound),
    ("no files selected", MtpErrorKind::NoFilesSelected),
    ("invalid path", MtpErrorKind::InvalidPath),
    ("no such file or directory", MtpErrorKind::NoSuchFile),
    ("writepipe", MtpErrorKind::WritePipeFailure),
    ("partialdeletion", MtpErrorKind::PartialDeletion),
    ("partial deletion", MtpErrorKind::PartialDeletion),
    ("not responding", MtpErrorKind::Unresponsive),
    ("unresponsive", MtpErrorKind::Unresponsive),
];

/// Local rules, highest priority first. Needles must be lower case.
///
/// "No such file" goes first: a failed `mv` reports both "Command failed" and the
/// underlying reason, and the reason is the more useful one.
pub const LOCAL_PATTERNS: &[(&str, LocalErrorKind)] = &[
    ("no such file or directory", LocalErrorKind::NoSuchFile),
    ("operation not permitted", LocalErrorKind::NoPermission),
    ("permission denied", LocalErrorKind::NoPermission),
    ("command failed", LocalErrorKind::CommandFailed),
    ("invalid path", LocalErrorKind::InvalidPath),
];

/// Returns the kind of the first rule accepted by `accepts`, in table order.
pub fn first_match<R, K: Copy>(rules: &[(R, K)], mut accepts: impl FnMut(&R) -> bool) -> Option<K> {
    rules.iter().find(|(rule, _)| accepts(rule)).map(|(_, kind)| *kind)
}

/// Lower-cased copies of both raw fields, built once per classification.
#[derive(Debug)]
pub(crate) struct LoweredInput {
    error: String,
    stderr: String,
}

impl LoweredInput {
    pub(crate) fn new(raw: &RawResult) -> Self {
        Self {
            error: raw.error_text().to_lowercase(),
            stderr: raw.stderr_text().to_lowercase(),
        }
    }

    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.error.contains(needle) || self.stderr.contains(needle)
    }
}

/// Picks the MTP error kind for a raw result. `None` means there is nothing to classify.
pub fn match_mtp_kind(raw: &RawResult) -> Option<MtpErrorKind> {
    if raw.is_empty() {
        return None;
    }
    let input = LoweredInput::new(raw);
    Some(first_match(MTP_PATTERNS, |needle| input.contains(needle)).unwrap_or(MtpErrorKind::Common))
}

/// Picks the local error kind for a raw result. `None` means there is nothing to classify.
pub fn match_local_kind(raw: &RawResult) -> Option<LocalErrorKind> {
    if raw.is_empty() {
        return None;
    }
    let input = LoweredInput::new(raw);
    Some(first_match(LOCAL_PATTERNS, |needle| input.contains(needle)).unwrap_or(LocalErrorKind::Common))
}
