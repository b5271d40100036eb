//! Primary attempt plus a single repair attempt, as an explicit state machine.
//!
//! ```text
//! Initial -> Attempted1 -> Success
//!                       -> NeedsRepair -> Attempted2 -> Success
//!                                                    -> Failed
//! ```
//!
//! Any failure of the first attempt (client error, parse error or shape
//! error) leads to `NeedsRepair`. Nothing leads out of `Attempted2` except
//! the two terminal states, so at most two model calls are ever made.

use serde_json::{Map, Value};
use tokio::time::Instant;

use super::candidate::extract_candidate;
use super::config::{ExtractionConfig, InvocationParams};
use super::error::{AttemptError, AttemptRecord, AttemptStage};
use super::metrics::{estimate_tokens, tokens_for_chars, ExtractionMetrics};
use super::prompts::{
    build_reextract_prompt, build_repair_prompt, build_user_prompt, SYSTEM_INSTRUCTIONS,
};
use super::shape::{validate_shape, ValidationOutcome};
use crate::client::{ClientError, InferenceClient, ModelInvocation};

/// Where a run currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairState {
    /// Nothing sent yet.
    Initial,
    /// The primary call returned (text or error); not yet checked.
    Attempted1(Result<String, ClientError>),
    /// The primary attempt failed its check.
    NeedsRepair(AttemptRecord),
    /// The repair call returned (text or error); not yet checked.
    Attempted2(Result<String, ClientError>),
    /// A shape-checked object. Terminal.
    Success(Map<String, Value>),
    /// The repair attempt failed too. Terminal.
    Failed(AttemptRecord),
}

impl RepairState {
    /// Whether no further transition exists.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    /// The shape-checked object, or the error that ended the run.
    pub result: Result<Map<String, Value>, AttemptError>,
    /// Every failed attempt, in order.
    pub history: Vec<AttemptRecord>,
    /// Call count, timing and token estimates.
    pub metrics: ExtractionMetrics,
}

/// Drives one notes text through the attempt state machine.
#[derive(Debug, Clone, Default)]
pub struct RepairRetryController {
    config: ExtractionConfig,
}

/// Mutable bookkeeping for one run.
struct Run<'a> {
    notes: &'a str,
    start: Instant,
    history: Vec<AttemptRecord>,
    calls: usize,
    input_chars: usize,
    output_chars: usize,
}

impl RepairRetryController {
    /// Creates a controller with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller with the given configuration.
    #[must_use]
    pub const fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Runs the state machine to a terminal state.
    pub async fn run<C>(&self, client: &C, notes: &str) -> RepairOutcome
    where
        C: InferenceClient + ?Sized,
    {
        let mut run = Run {
            notes,
            start: Instant::now(),
            history: Vec::new(),
            calls: 0,
            input_chars: 0,
            output_chars: 0,
        };

        let mut state = RepairState::Initial;
        let result = loop {
            state = match self.advance(state, client, &mut run).await {
                RepairState::Success(object) => break Ok(object),
                RepairState::Failed(record) => break Err(record.error),
                next => next,
            };
        };

        let metrics = ExtractionMetrics {
            total_attempts: run.calls,
            wall_time: run.start.elapsed(),
            estimated_input_tokens: tokens_for_chars(run.input_chars),
            estimated_output_tokens: tokens_for_chars(run.output_chars),
        };

        RepairOutcome {
            result,
            history: run.history,
            metrics,
        }
    }

    async fn advance<C>(&self, state: RepairState, client: &C, run: &mut Run<'_>) -> RepairState
    where
        C: InferenceClient + ?Sized,
    {
        match state {
            RepairState::Initial => {
                let prompt = build_user_prompt(run.notes);
                RepairState::Attempted1(Self::call(client, prompt, self.config.primary, run).await)
            }
            RepairState::Attempted1(output) => {
                match Self::check(AttemptStage::Primary, output, run) {
                    Ok(object) => RepairState::Success(object),
                    Err(record) => RepairState::NeedsRepair(record),
                }
            }
            RepairState::NeedsRepair(record) => {
                let prompt = record.raw_output.as_deref().map_or_else(
                    || build_reextract_prompt(run.notes),
                    build_repair_prompt,
                );
                RepairState::Attempted2(Self::call(client, prompt, self.config.repair, run).await)
            }
            RepairState::Attempted2(output) => {
                match Self::check(AttemptStage::Repair, output, run) {
                    Ok(object) => RepairState::Success(object),
                    Err(record) => RepairState::Failed(record),
                }
            }
            terminal @ (RepairState::Success(_) | RepairState::Failed(_)) => terminal,
        }
    }

    async fn call<C>(
        client: &C,
        user_prompt: String,
        params: InvocationParams,
        run: &mut Run<'_>,
    ) -> Result<String, ClientError>
    where
        C: InferenceClient + ?Sized,
    {
        let invocation = ModelInvocation::new(SYSTEM_INSTRUCTIONS, user_prompt)
            .with_sampling(params.max_tokens, params.temperature);

        run.calls += 1;
        run.input_chars += invocation.system_instructions.chars().count()
            + invocation.user_prompt.chars().count();

        tracing::debug!(
            attempt = run.calls,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            prompt_tokens = estimate_tokens(&invocation.user_prompt),
            "Invoking model"
        );

        let output = client.invoke(&invocation).await;
        if let Ok(text) = &output {
            run.output_chars += text.chars().count();
        }
        output
    }

    /// Candidate extraction, parse, shape check. Failures are recorded.
    fn check(
        stage: AttemptStage,
        output: Result<String, ClientError>,
        run: &mut Run<'_>,
    ) -> Result<Map<String, Value>, AttemptRecord> {
        let (raw_output, checked) = match output {
            Ok(text) => {
                let checked = parse_and_validate(&text);
                (Some(text), checked)
            }
            Err(err) => (None, Err(AttemptError::Client(err))),
        };

        match checked {
            Ok(object) => {
                tracing::debug!(attempt = run.calls, %stage, "Attempt produced a valid object");
                Ok(object)
            }
            Err(error) => {
                tracing::warn!(attempt = run.calls, %stage, error = %error, "Attempt failed");
                let record = AttemptRecord {
                    attempt_number: run.calls,
                    stage,
                    raw_output,
                    error,
                    elapsed: run.start.elapsed(),
                };
                run.history.push(record.clone());
                Err(record)
            }
        }
    }
}

/// Extracts a candidate, parses it, and applies the shape check.
pub fn parse_and_validate(raw: &str) -> Result<Map<String, Value>, AttemptError> {
    let candidate = extract_candidate(raw);
    tracing::debug!(
        raw_chars = raw.chars().count(),
        candidate_chars = candidate.chars().count(),
        "Extracted candidate"
    );
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| AttemptError::Parse(e.to_string()))?;

    match validate_shape(&value) {
        ValidationOutcome::Valid => match value {
            Value::Object(object) => Ok(object),
            _ => Err(AttemptError::Shape("Root is not an object.".to_string())),
        },
        ValidationOutcome::Invalid(reason) => Err(AttemptError::Shape(reason)),
    }
}
