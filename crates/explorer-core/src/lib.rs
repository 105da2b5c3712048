//! Error normalization for local and MTP file operations.
//!
//! Raw `error`/`stderr` output from the local filesystem wrapper and the MTP bridge goes in,
//! a `{error, throwAlert, logError, status}` decision for the UI comes out.

// Deny unused code to catch dead code early
#![deny(unused)]
// Warn on unused dependencies
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod analytics;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod logger;
pub mod logging;

pub use analytics::{AnalyticsSink, ErrorTally, NoopAnalytics};
pub use batch::{BatchCaveat, BatchError, BatchRunner, BatchSummary};
pub use classifier::{
    BufferClassifier, Channel, Classification, ClassificationOutcome, ClassificationResult, ErrorKind,
    LocalErrorKind, MtpErrorKind, RawResult,
};
pub use config::BatchConfig;
pub use logger::{ClassificationLogger, LogFacadeLogger};
