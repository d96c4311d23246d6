//! Imagen portrait rendering over the shared retry loop.

use crate::gemini::client::{encode, send};
use crate::gemini::{GeminiClient, GeminiTransport, PredictRequest, PredictResponse};
use crate::{Attempt, Completed, Exhausted, retry_with_backoff};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use twinverse_core::FailureKind;

/// Image shown when the service answers without a usable picture.
pub const PLACEHOLDER_PORTRAIT_URL: &str =
    "https://placehold.co/512x512/3b0764/ffffff?text=AI%20Portrait%20Missing";

/// Result of a portrait request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PortraitOutcome {
    /// PNG returned inline as a data URL
    Rendered {
        /// `data:image/png;base64,…`
        data_url: String,
    },
    /// The service answered without image bytes
    Placeholder {
        /// Fixed fallback image
        url: String,
    },
    /// Every attempt failed
    Failure {
        /// Kind of the last attempt
        kind: FailureKind,
        /// Calls made
        attempts: u32,
    },
}

impl PortraitOutcome {
    /// URL to display, if any.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            PortraitOutcome::Rendered { data_url } => Some(data_url),
            PortraitOutcome::Placeholder { url } => Some(url),
            PortraitOutcome::Failure { .. } => None,
        }
    }

    fn placeholder() -> Self {
        PortraitOutcome::Placeholder {
            url: PLACEHOLDER_PORTRAIT_URL.to_string(),
        }
    }
}

impl<T: GeminiTransport> GeminiClient<T> {
    /// Renders one portrait for `prompt` with the Imagen model.
    ///
    /// Retries exactly like [`generate`](Self::generate). A well-formed
    /// answer without valid base64 image bytes yields the placeholder.
    #[instrument(skip(self, prompt), fields(model = %self.config().image_model()))]
    pub async fn generate_portrait(&self, prompt: &str, max_attempts: u32) -> PortraitOutcome {
        let Some(body) = encode(&PredictRequest::single(prompt)) else {
            return PortraitOutcome::Failure {
                kind: FailureKind::TransportError,
                attempts: 0,
            };
        };
        let url = self.config().predict_url();

        let (url, body) = (&url, &body);
        let result = retry_with_backoff(self.backoff(), max_attempts, |_| async move {
            match send(self.transport(), url, body).await {
                Ok(response) => Attempt::Done(render(&response.body)),
                Err(kind) => Attempt::Retry(kind),
            }
        })
        .await;

        match result {
            Ok(Completed { value, attempts }) => {
                debug!(attempts, "Portrait request finished");
                value
            }
            Err(Exhausted { kind, attempts }) => {
                warn!(attempts, kind = %kind, "Portrait generation gave up");
                PortraitOutcome::Failure { kind, attempts }
            }
        }
    }
}

fn render(body: &str) -> PortraitOutcome {
    let response: PredictResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Unreadable Imagen response");
            return PortraitOutcome::placeholder();
        }
    };

    let Some(encoded) = response.first_image() else {
        warn!("Imagen response carried no image bytes");
        return PortraitOutcome::placeholder();
    };

    if let Err(e) = STANDARD.decode(encoded) {
        warn!(error = %e, "Imagen returned invalid base64");
        return PortraitOutcome::placeholder();
    }

    PortraitOutcome::Rendered {
        data_url: format!("data:image/png;base64,{encoded}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_valid_image() {
        let outcome = render(r#"{"predictions":[{"bytesBase64Encoded":"iVBORw0KGgo="}]}"#);
        assert_eq!(
            outcome,
            PortraitOutcome::Rendered {
                data_url: "data:image/png;base64,iVBORw0KGgo=".into()
            }
        );
    }

    #[test]
    fn missing_or_bad_bytes_fall_back() {
        for body in [
            r#"{"predictions":[]}"#,
            r#"{"predictions":[{}]}"#,
            r#"{"predictions":[{"bytesBase64Encoded":"***"}]}"#,
            "not json",
        ] {
            assert_eq!(
                render(body).image_url(),
                Some(PLACEHOLDER_PORTRAIT_URL),
                "{body}"
            );
        }
    }
}
