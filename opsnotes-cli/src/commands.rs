use std::io::{Read, Write};
use std::path::Path;

use opsnotes_bedrock::{BedrockClient, BedrockConfig};
use opsnotes_extractor::extraction::ExtractionReport;
use opsnotes_extractor::input::admit;
use opsnotes_extractor::schema::output_schema;
use opsnotes_extractor::{ExtractionPipeline, ExtractionResult, InferenceClient};

use crate::cli::{AnalyzeArgs, Cli, Commands};
use crate::errors::CliError;

/// Dispatches a parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Analyze(args) => run_analyze(&args, &mut stdout).await,
        Commands::Schema { pretty } => write_json(&mut stdout, &output_schema(), pretty),
    }
}

async fn run_analyze<W: Write>(args: &AnalyzeArgs, out: &mut W) -> Result<(), CliError> {
    let notes = read_notes(args.file.as_deref())?;

    let config = args.bedrock_config(BedrockConfig::from_env());
    let auth = if config.api_key.is_some() {
        "api-key"
    } else {
        "sigv4"
    };
    tracing::info!(region = %config.region, model_id = %config.model_id, auth, "Using Bedrock");

    let pipeline = ExtractionPipeline::new(BedrockClient::new(config)?);
    analyze(&pipeline, &notes, args.pretty, args.report, out).await?;
    Ok(())
}

/// Reads notes from a file, or from stdin when no path is given.
pub fn read_notes(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut notes = String::new();
            std::io::stdin().read_to_string(&mut notes)?;
            Ok(notes)
        }
    }
}

/// Admits the notes, runs the pipeline and writes the record as JSON.
///
/// A fallback record is still written and still counts as success.
pub async fn analyze<C, W>(
    pipeline: &ExtractionPipeline<C>,
    notes: &str,
    pretty: bool,
    report: bool,
    out: &mut W,
) -> Result<ExtractionResult, CliError>
where
    C: InferenceClient,
    W: Write,
{
    let notes = admit(notes)?;
    let (result, run_report) = pipeline.extract_with_report(notes).await;

    if report {
        log_report(&run_report);
    }

    write_json(out, &result, pretty)?;
    Ok(result)
}

fn log_report(report: &ExtractionReport) {
    tracing::info!(
        attempts = report.metrics.total_attempts,
        wall_time = ?report.metrics.wall_time,
        input_tokens = report.metrics.estimated_input_tokens,
        output_tokens = report.metrics.estimated_output_tokens,
        "Run report"
    );
    for record in &report.history {
        tracing::info!(
            attempt = record.attempt_number,
            stage = %record.stage,
            error = %record.error,
            raw_chars = record.raw_output.as_deref().map_or(0, |raw| raw.chars().count()),
            "Failed attempt"
        );
    }
}

fn write_json<W, T>(out: &mut W, value: &T, pretty: bool) -> Result<(), CliError>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use opsnotes_extractor::input::InputError;
    use opsnotes_extractor::{ClientError, Mode, ModelInvocation};

    struct Offline;

    #[async_trait]
    impl InferenceClient for Offline {
        async fn invoke(&self, _: &ModelInvocation) -> Result<String, ClientError> {
            Err(ClientError::new("offline"))
        }
    }

    struct Canned(&'static str);

    #[async_trait]
    impl InferenceClient for Canned {
        async fn invoke(&self, _: &ModelInvocation) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_read_notes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Mon standup\n- Ana: deploy blocked").unwrap();

        let notes = read_notes(Some(file.path())).unwrap();
        assert_eq!(notes, "Mon standup\n- Ana: deploy blocked");
    }

    #[test]
    fn test_read_notes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        let err = read_notes(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[tokio::test]
    async fn test_fallback_is_still_written() {
        let pipeline = ExtractionPipeline::new(Offline);
        let mut out = Vec::new();

        let result = analyze(&pipeline, "notes", false, true, &mut out)
            .await
            .unwrap();

        assert_eq!(result.meta.mode, Mode::Fallback);
        let written: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written["meta"]["mode"], "fallback");
        assert_eq!(written["questions"][0]["question"], "Model error: offline");
    }

    #[tokio::test]
    async fn test_success_written_pretty() {
        let pipeline = ExtractionPipeline::new(Canned(
            r#"{"priorities":[],"tasks":[],"blockers":[],"weekly_report":{},"questions":[],"meta":{}}"#,
        ));
        let mut out = Vec::new();

        analyze(&pipeline, "abc", true, false, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  \"priorities\""));
        assert!(text.contains("\"received_chars\": 3"));
    }

    #[tokio::test]
    async fn test_blank_notes_refused_before_any_call() {
        let pipeline = ExtractionPipeline::new(Offline);
        let mut out = Vec::new();

        let err = analyze(&pipeline, "  \n", false, false, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Input(InputError::Empty)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_schema_output_is_json() {
        let mut out = Vec::new();
        write_json(&mut out, &output_schema(), false).unwrap();
        let schema: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(schema["type"], "object");
    }
}
