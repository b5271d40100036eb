//! SigV4 request signing for deployments without a Bedrock API key.

use std::sync::Arc;
use std::time::SystemTime;

use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_sigv4::sign::v4;
use tokio::sync::OnceCell;

use crate::config::StaticCredentials;
use crate::error::BedrockError;

/// Service name Bedrock Runtime requests are signed for.
pub const SIGNING_NAME: &str = "bedrock";

const STATIC_PROVIDER_NAME: &str = "opsnotes-static";

/// Signs Converse requests with AWS credentials.
///
/// Static credentials are used as given. Otherwise the standard chain
/// (environment, shared profiles, container and instance roles) is resolved
/// on first use and shared by every clone.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    region: String,
    provider: Arc<OnceCell<SharedCredentialsProvider>>,
}

impl RequestSigner {
    /// Signer resolving credentials from the standard chain.
    #[must_use]
    pub fn from_default_chain(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            provider: Arc::new(OnceCell::new()),
        }
    }

    /// Signer using fixed credentials.
    #[must_use]
    pub fn from_static(region: impl Into<String>, credentials: &StaticCredentials) -> Self {
        let credentials = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None,
            STATIC_PROVIDER_NAME,
        );
        Self {
            region: region.into(),
            provider: Arc::new(OnceCell::new_with(Some(SharedCredentialsProvider::new(
                credentials,
            )))),
        }
    }

    /// Returns the headers that authenticate a JSON `POST` of `body` to `url`.
    ///
    /// # Errors
    ///
    /// Returns `BedrockError::Credentials` if no credentials can be resolved,
    /// or `BedrockError::Signing` if the request cannot be signed.
    pub async fn sign_post(
        &self,
        url: &str,
        body: &[u8],
    ) -> Result<Vec<(String, String)>, BedrockError> {
        let provider = self
            .provider
            .get_or_init(|| default_chain(self.region.clone()))
            .await;
        let credentials = provider
            .provide_credentials()
            .await
            .map_err(|e| BedrockError::Credentials(e.to_string()))?;

        let identity = credentials.into();
        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SIGNING_NAME)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| BedrockError::Signing(e.to_string()))?
            .into();

        let headers = [("content-type", "application/json")];
        let signable =
            SignableRequest::new("POST", url, headers.into_iter(), SignableBody::Bytes(body))
                .map_err(|e| BedrockError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| BedrockError::Signing(e.to_string()))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

async fn default_chain(region: String) -> SharedCredentialsProvider {
    tracing::debug!(%region, "Resolving AWS credentials from the default chain");
    let chain = aws_config::default_provider::credentials::DefaultCredentialsChain::builder()
        .region(aws_config::Region::new(region))
        .build()
        .await;
    SharedCredentialsProvider::new(chain)
}
