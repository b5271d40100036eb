//! The extraction pipeline and its parts.
//!
//! - [`ExtractionPipeline`] - Single entry point; never fails
//! - [`RepairRetryController`] - Primary attempt plus at most one repair
//! - [`extract_candidate`] - Isolates a JSON object from model prose
//! - [`validate_shape`] - Shallow top-level structure check
//! - [`build_fallback`] - Deterministic degraded record
//! - [`ExtractionConfig`] - Sampling parameters per attempt
//! - [`ExtractionMetrics`] - Attempt count, timing and token estimates

pub mod candidate;
pub mod config;
pub mod controller;
pub mod error;
pub mod fallback;
pub mod metrics;
pub mod pipeline;
pub mod prompts;
pub mod shape;

pub use candidate::extract_candidate;
pub use config::{ExtractionConfig, InvocationParams};
pub use controller::{RepairOutcome, RepairRetryController, RepairState};
pub use error::{AttemptError, AttemptRecord, AttemptStage};
pub use fallback::{build_fallback, diagnostic_message, FALLBACK_WHY};
pub use metrics::{estimate_tokens, tokens_for_chars, ExtractionMetrics, CHARS_PER_TOKEN};
pub use pipeline::{ExtractionPipeline, ExtractionReport};
pub use shape::{validate_shape, ValidationOutcome};
