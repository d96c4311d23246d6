//! Gemini `generateContent` client with bounded retry.

use crate::gemini::{GeminiConfig, GenerateContentRequest, GenerateContentResponse};
use crate::gemini::{GeminiTransport, ReqwestTransport, TransportResponse};
use crate::{Attempt, BackoffPolicy, Completed, Exhausted, retry_with_backoff};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, error, instrument, warn};
use twinverse_core::{FailureKind, GenerationOutcome, GenerationRequest, extract_json_object};
use twinverse_error::{GeminiError, GeminiErrorKind, RetryableError};
use twinverse_interface::ContentGenerator;

/// Resilient client for the Gemini text endpoint.
///
/// Every call to [`generate`](Self::generate) owns its attempt counter and
/// backoff timer, so one client can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct GeminiClient<T = ReqwestTransport> {
    transport: T,
    config: GeminiConfig,
    backoff: BackoffPolicy,
}

impl GeminiClient<ReqwestTransport> {
    /// Creates a client that talks to the real service.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` when the configured key is blank.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn from_config(config: GeminiConfig) -> Result<Self, GeminiError> {
        let transport = ReqwestTransport::new(config.api_key().clone(), config.request_timeout())?;
        debug!(
            model = %config.model(),
            search_grounding = config.search_grounding(),
            "Created Gemini client"
        );
        Ok(Self::new(transport, config))
    }
}

impl<T: GeminiTransport> GeminiClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn new(transport: T, config: GeminiConfig) -> Self {
        let backoff = config.backoff_policy();
        Self {
            transport,
            config,
            backoff,
        }
    }

    /// Replaces the backoff policy derived from configuration.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Configuration this client was built from.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Backoff applied between attempts.
    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one generation request to completion.
    ///
    /// HTTP 429 and other transport failures are retried with exponential
    /// backoff up to the request's attempt budget. Empty text and unparseable
    /// embedded JSON end the run immediately. Never returns an error; every
    /// failure is a [`GenerationOutcome::Failure`].
    #[instrument(
        skip(self, request),
        fields(model = %self.config.model(), max_attempts = *request.max_attempts())
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let body = GenerateContentRequest::new(
            request.user_prompt().clone(),
            request.system_instruction().clone(),
            *self.config.search_grounding(),
        );
        let Some(body) = encode(&body) else {
            return GenerationOutcome::failure(FailureKind::TransportError, 0);
        };
        let url = self.config.generate_content_url();
        let extract = *request.extract_json();

        let (url, body) = (&url, &body);
        let result = retry_with_backoff(&self.backoff, *request.max_attempts(), |attempt| async move {
            self.attempt(url, body, extract, attempt).await
        })
        .await;

        match result {
            Ok(Completed { value, attempts }) => {
                debug!(attempts, success = value.is_success(), "Generation finished");
                value
            }
            Err(Exhausted { kind, attempts }) => {
                warn!(attempts, kind = %kind, "Generation gave up");
                GenerationOutcome::failure(kind, attempts)
            }
        }
    }

    async fn attempt(
        &self,
        url: &str,
        body: &JsonValue,
        extract: bool,
        attempt: u32,
    ) -> Attempt<GenerationOutcome> {
        let response = match send(&self.transport, url, body).await {
            Ok(response) => response,
            Err(kind) => return Attempt::Retry(kind),
        };

        let envelope: GenerateContentResponse = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let err = GeminiError::new(GeminiErrorKind::ResponseParsing(e.to_string()));
                warn!(error = %err, "Unreadable response envelope");
                return Attempt::Retry(FailureKind::TransportError);
            }
        };

        let attempts = attempt + 1;
        let Some(text) = envelope.first_text() else {
            warn!(attempts, "Response carried no text");
            return Attempt::Done(GenerationOutcome::failure(
                FailureKind::EmptyResponse,
                attempts,
            ));
        };

        if !extract {
            return Attempt::Done(GenerationOutcome::Success {
                raw_text: text.to_string(),
                extracted_object: None,
            });
        }

        match extract_json_object(text) {
            Ok(object) => Attempt::Done(GenerationOutcome::Success {
                raw_text: text.to_string(),
                extracted_object: Some(object),
            }),
            Err(e) => {
                warn!(error = %e, text_len = text.len(), "Embedded JSON could not be extracted");
                Attempt::Done(GenerationOutcome::Failure {
                    kind: FailureKind::MalformedPayload,
                    attempts,
                    raw_text: Some(text.to_string()),
                })
            }
        }
    }
}

/// Serializes a request body. Failing here means a DTO bug, not a service
/// problem, so it is logged loudly.
pub(crate) fn encode<B: Serialize>(body: &B) -> Option<JsonValue> {
    serde_json::to_value(body)
        .map_err(|e| error!(error = %e, "Failed to encode request body"))
        .ok()
}

/// Sends one request and classifies anything that is not a 2xx response.
pub(crate) async fn send<T: GeminiTransport + ?Sized>(
    transport: &T,
    url: &str,
    body: &JsonValue,
) -> Result<TransportResponse, FailureKind> {
    let response = transport.post_json(url, body).await.map_err(|err| {
        warn!(error = %err, "Request failed before a response arrived");
        classify(&err)
    })?;

    if response.is_success() {
        return Ok(response);
    }

    let err = GeminiError::new(GeminiErrorKind::HttpStatus {
        status_code: response.status,
        message: response.body,
    });
    warn!(status = response.status, error = %err, "Gemini API returned an error status");
    Err(classify(&err))
}

fn classify(err: &GeminiError) -> FailureKind {
    if err.is_rate_limited() {
        FailureKind::RateLimited
    } else {
        FailureKind::TransportError
    }
}

#[async_trait]
impl<T: GeminiTransport> ContentGenerator for GeminiClient<T> {
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        GeminiClient::generate(self, request).await
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
