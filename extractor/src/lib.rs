//! Structured extraction of free-text ops notes.
//!
//! Turns arbitrary model output into an [`ExtractionResult`] that always has
//! the same six top-level fields. The first model response is checked, one
//! repair call is made if it fails, and a deterministic fallback record is
//! produced when both attempts fail. [`ExtractionPipeline::extract`] never
//! returns an error.

pub mod client;
pub mod extraction;
pub mod input;
pub mod result;
pub mod schema;

pub use client::{ClientError, InferenceClient, ModelInvocation};
pub use extraction::ExtractionPipeline;
pub use result::{ExtractionResult, Meta, Mode};

/// Common traits and types for ergonomic usage of the extractor.
pub mod prelude {
    pub use crate::client::{ClientError, InferenceClient, ModelInvocation};
    pub use crate::extraction::{
        ExtractionConfig, ExtractionMetrics, ExtractionPipeline, ExtractionReport,
        InvocationParams,
    };
    pub use crate::input::{admit, InputError, MAX_NOTES_CHARS};
    pub use crate::result::{ExtractionResult, Meta, Mode};
}
