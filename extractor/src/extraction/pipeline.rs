//! The single entry point used by request layers.

use super::config::ExtractionConfig;
use super::controller::RepairRetryController;
use super::error::AttemptRecord;
use super::fallback::{build_fallback, diagnostic_message};
use super::metrics::ExtractionMetrics;
use crate::client::InferenceClient;
use crate::result::ExtractionResult;
use crate::schema::nested_deviations;

/// Diagnostics for one pipeline run. Never part of the caller-facing record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Call count, timing and token estimates.
    pub metrics: ExtractionMetrics,
    /// Failed attempts, in order.
    pub history: Vec<AttemptRecord>,
}

/// Notes in, [`ExtractionResult`] out, with no error path.
///
/// Holds no per-run state: concurrent calls on one pipeline share only the
/// client and the configuration, both read-only.
pub struct ExtractionPipeline<C> {
    client: C,
    controller: RepairRetryController,
}

impl<C: InferenceClient> ExtractionPipeline<C> {
    /// Creates a pipeline with the default configuration.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            controller: RepairRetryController::new(),
        }
    }

    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub const fn with_config(client: C, config: ExtractionConfig) -> Self {
        Self {
            client,
            controller: RepairRetryController::with_config(config),
        }
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Extracts a structured record from notes. Always returns a record.
    ///
    /// `meta.received_chars` is the character count of `notes` whichever
    /// path produced the record.
    pub async fn extract(&self, notes: &str) -> ExtractionResult {
        self.extract_with_report(notes).await.0
    }

    /// Same as [`extract`](Self::extract), also returning run diagnostics.
    pub async fn extract_with_report(&self, notes: &str) -> (ExtractionResult, ExtractionReport) {
        let received_chars = notes.chars().count();
        tracing::info!(received_chars, "Starting extraction");

        let outcome = self.controller.run(&self.client, notes).await;

        let result = match outcome.result {
            Ok(object) => {
                let result = ExtractionResult::from_model_object(object, received_chars);
                log_deviations(&result);
                tracing::info!(
                    attempts = outcome.metrics.total_attempts,
                    elapsed = ?outcome.metrics.wall_time,
                    "Extraction succeeded"
                );
                result
            }
            Err(error) => {
                let message = diagnostic_message(&error);
                tracing::warn!(
                    attempts = outcome.metrics.total_attempts,
                    elapsed = ?outcome.metrics.wall_time,
                    %message,
                    "Extraction failed, returning fallback"
                );
                build_fallback(&message, received_chars)
            }
        };

        let report = ExtractionReport {
            metrics: outcome.metrics,
            history: outcome.history,
        };
        (result, report)
    }
}

fn log_deviations(result: &ExtractionResult) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let Ok(wire) = serde_json::to_value(result) else {
        return;
    };
    for deviation in nested_deviations(&wire) {
        tracing::debug!(%deviation, "Record departs from the typed contract");
    }
}
