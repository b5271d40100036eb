//! Live smoke test against AWS Bedrock.
//!
//! Marked `#[ignore]`; it needs network access and credentials.
//!
//! ```bash
//! AWS_BEARER_TOKEN_BEDROCK=... cargo test -p opsnotes-bedrock -- --ignored
//! AWS_PROFILE=dev cargo test -p opsnotes-bedrock -- --ignored
//! ```

use opsnotes_bedrock::{BedrockClient, BedrockConfig};

#[tokio::test]
#[ignore = "Requires Bedrock credentials and network access"]
async fn e2e_converse_round_trip() {
    let config = BedrockConfig::from_env();
    let client = BedrockClient::new(config).unwrap();
    let text = client
        .converse_text(
            "Return ONLY valid JSON.",
            "Reply with {\"pong\": true}",
            64,
            0.0,
        )
        .await
        .unwrap();

    assert!(text.contains("pong"));
}
