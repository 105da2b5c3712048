//! Fail-fast batch runner for multi-file operations.
//!
//! Items are processed one at a time. Each item's raw result is classified; the first item
//! whose outcome counts as a failure stops the batch and nothing after it is touched.
//! Recovered outcomes (partial success with a caveat message) don't stop the batch.

use log::{debug, warn};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::analytics::{AnalyticsSink, NoopAnalytics};
use crate::classifier::{BufferClassifier, Channel, ClassificationOutcome, ClassificationResult, RawResult};
use crate::config::BatchConfig;

/// An item that completed with a caveat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCaveat {
    pub index: usize,
    pub result: ClassificationResult,
}

/// Summary of a batch that ran to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of items processed.
    pub processed: usize,
    pub caveats: Vec<BatchCaveat>,
}

/// The batch stopped at a failing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    pub channel: Channel,
    /// Index of the item that failed.
    pub index: usize,
    /// Items that completed before the failure.
    pub processed: usize,
    pub result: ClassificationResult,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} batch stopped at item {}: {}",
            self.channel,
            self.index,
            self.result.error.as_deref().unwrap_or("unknown error")
        )
    }
}

impl std::error::Error for BatchError {}

/// Runs batches of file operations and classifies each item's output.
pub struct BatchRunner {
    classifier: BufferClassifier,
    analytics: Arc<dyn AnalyticsSink>,
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(classifier: BufferClassifier, analytics: Arc<dyn AnalyticsSink>, config: BatchConfig) -> Self {
        Self {
            classifier,
            analytics,
            config,
        }
    }

    /// Runner with the `log`-backed classifier, no analytics, and env-driven config.
    pub fn with_defaults() -> Self {
        Self::new(BufferClassifier::default(), Arc::new(NoopAnalytics), BatchConfig::from_env())
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs `op` for each item in order, stopping at the first failing outcome.
    pub async fn run<I, F, Fut>(&self, channel: Channel, items: I, mut op: F) -> Result<BatchSummary, BatchError>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = RawResult>,
    {
        let mut summary = BatchSummary::default();

        for (index, item) in items.into_iter().enumerate() {
            let raw = match self.config.item_timeout {
                Some(limit) => match tokio::time::timeout(limit, op(item)).await {
                    Ok(raw) => raw,
                    Err(_) => {
                        warn!("{} batch item {} timed out after {:?}", channel, index, limit);
                        timed_out_raw(channel, limit)
                    }
                },
                None => op(item).await,
            };

            let classification = self.classifier.classify(channel, &raw);
            let result = classification.result();

            if let Some(kind) = classification.kind
                && result.throw_alert
            {
                self.analytics.record_alert(channel, kind, &result);
            }

            if classification.outcome.is_failure() {
                debug!(
                    "{} batch aborted at item {} after {} processed: {:?}",
                    channel, index, summary.processed, result.error
                );
                return Err(BatchError {
                    channel,
                    index,
                    processed: summary.processed,
                    result,
                });
            }

            summary.processed += 1;
            if matches!(classification.outcome, ClassificationOutcome::Recovered(_)) {
                summary.caveats.push(BatchCaveat { index, result });
            }
        }

        debug!(
            "{} batch finished: {} processed, {} with caveats",
            channel,
            summary.processed,
            summary.caveats.len()
        );
        Ok(summary)
    }
}

/// Raw output standing in for an item that never answered.
fn timed_out_raw(channel: Channel, limit: Duration) -> RawResult {
    let secs = limit.as_secs_f64();
    match channel {
        Channel::Mtp => RawResult {
            error: None,
            stderr: Some(format!("MTP device is not responding (timed out after {secs}s)")),
        },
        Channel::Local => RawResult {
            error: Some(format!("Command failed: timed out after {secs}s")),
            stderr: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ErrorTally;
    use crate::classifier::{ErrorKind, LocalErrorKind, MSG_COMMAND_FAILED, MSG_MTP_UNRESPONSIVE, MtpErrorKind};
    use std::sync::Mutex;

    fn runner(config: BatchConfig) -> (BatchRunner, Arc<ErrorTally>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let tally = Arc::new(ErrorTally::new());
        let runner = BatchRunner::new(BufferClassifier::default(), tally.clone(), config);
        (runner, tally)
    }

    fn no_timeout() -> BatchConfig {
        BatchConfig { item_timeout: None }
    }

    #[tokio::test]
    async fn test_all_items_succeed() {
        let (runner, tally) = runner(no_timeout());
        let summary = runner
            .run(Channel::Local, ["a.txt", "b.txt", "c.txt"], |_| async { RawResult::default() })
            .await
            .unwrap();

        assert_eq!(summary.processed, 3);
        assert!(summary.caveats.is_empty());
        assert_eq!(tally.total(), 0);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let (runner, tally) = runner(no_timeout());
        let visited = Mutex::new(Vec::new());

        let err = runner
            .run(Channel::Local, ["a.txt", "b.txt", "c.txt", "d.txt"], |name| {
                visited.lock().unwrap().push(name);
                let raw = if name == "b.txt" {
                    RawResult::new(Some("Command failed: mv"), None)
                } else {
                    RawResult::default()
                };
                async move { raw }
            })
            .await
            .unwrap_err();

        assert_eq!(*visited.lock().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(err.index, 1);
        assert_eq!(err.processed, 1);
        assert_eq!(err.result.error.as_deref(), Some(MSG_COMMAND_FAILED));
        assert_eq!(tally.count(ErrorKind::Local(LocalErrorKind::CommandFailed)), 1);
        assert_eq!(err.to_string(), "local batch stopped at item 1: Could not complete! Try again.");
    }

    #[tokio::test]
    async fn test_recovered_items_are_collected_as_caveats() {
        let (runner, tally) = runner(no_timeout());
        let outputs = vec![
            RawResult::default(),
            RawResult::new(None, Some("error: Could not find /DCIM/a.jpg")),
            RawResult::new(None, Some("Delete: invalid response code PartialDeletion")),
        ];

        let summary = runner
            .run(Channel::Mtp, outputs, |raw| async move { raw })
            .await
            .unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.caveats.len(), 2);
        assert_eq!(summary.caveats[0].index, 1);
        assert_eq!(
            summary.caveats[0].result.error.as_deref(),
            Some("Could not find /DCIM/a.jpg")
        );
        assert!(summary.caveats[1].result.status);
        assert_eq!(tally.total(), 2);
    }

    #[tokio::test]
    async fn test_missing_device_stops_without_alert() {
        let (runner, tally) = runner(no_timeout());
        let err = runner
            .run(Channel::Mtp, 0..5, |_| async { RawResult::new(None, Some("No MTP device found")) })
            .await
            .unwrap_err();

        assert_eq!(err.index, 0);
        assert!(!err.result.throw_alert);
        assert!(!err.result.status);
        assert_eq!(tally.total(), 0);
    }

    #[tokio::test]
    async fn test_timed_out_mtp_item_counts_as_unresponsive() {
        let (runner, tally) = runner(BatchConfig {
            item_timeout: Some(Duration::from_millis(20)),
        });

        let err = runner
            .run(Channel::Mtp, [false, true, false], |slow| async move {
                if slow {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                RawResult::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.result.error.as_deref(), Some(MSG_MTP_UNRESPONSIVE));
        assert_eq!(tally.count(ErrorKind::Mtp(MtpErrorKind::Unresponsive)), 1);
    }

    #[tokio::test]
    async fn test_default_runner_uses_env_config() {
        let runner = BatchRunner::with_defaults();
        assert_eq!(runner.config(), &BatchConfig::from_env());

        let summary = runner
            .run(Channel::Local, [RawResult::default(), RawResult::new(Some(""), None)], |raw| async move {
                raw
            })
            .await
            .unwrap();
        assert_eq!(summary.processed, 2);
        assert!(summary.caveats.is_empty());
    }

    #[test]
    fn test_timed_out_local_raw_is_command_failure() {
        let raw = timed_out_raw(Channel::Local, Duration::from_secs(2));
        assert_eq!(raw.error.as_deref(), Some("Command failed: timed out after 2s"));
    }

    #[test]
    fn test_batch_error_serialization() {
        let err = BatchError {
            channel: Channel::Mtp,
            index: 2,
            processed: 2,
            result: ClassificationOutcome::Unresponsive(MSG_MTP_UNRESPONSIVE.to_string()).to_result(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["channel"], "mtp");
        assert_eq!(json["result"]["throwAlert"], true);
        assert_eq!(json["result"]["status"], false);
    }
}
