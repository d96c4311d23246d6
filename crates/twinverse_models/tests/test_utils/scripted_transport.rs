//! In-process transport that replays a fixed script of responses.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::time::Instant;
use twinverse_error::{GeminiError, GeminiErrorKind};
use twinverse_models::{GeminiTransport, TransportResponse};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with a status and body
    Respond(u16, String),
    /// Fail before any response arrives
    Disconnect,
}

impl Scripted {
    /// HTTP 200 with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Scripted::Respond(200, body.into())
    }

    /// HTTP 429.
    pub fn throttled() -> Self {
        Scripted::Respond(429, r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#.into())
    }
}

/// Transport that replays its script in order and records every call.
///
/// When the script runs out, the last entry repeats.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicU32,
    requests: Mutex<Vec<(String, JsonValue)>>,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    /// Transport replaying `script`.
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Transport answering every call with `reply`.
    pub fn always(reply: Scripted) -> Self {
        Self::new([reply])
    }

    /// Number of calls made.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// URL and body of every call, in order.
    pub fn requests(&self) -> Vec<(String, JsonValue)> {
        self.requests.lock().unwrap().clone()
    }

    /// Gaps between consecutive calls, measured on the tokio clock.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let times = self.call_times.lock().unwrap();
        times.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }
}

#[async_trait]
impl GeminiTransport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<TransportResponse, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.call_times.lock().unwrap().push(Instant::now());

        let next = self.script.lock().unwrap().pop_front();
        let reply = {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = next {
                *last = Some(next);
            }
            last.clone().expect("Script must not be empty")
        };

        match reply {
            Scripted::Respond(status, body) => Ok(TransportResponse::new(status, body)),
            Scripted::Disconnect => Err(GeminiError::new(GeminiErrorKind::Transport(
                "connection reset by peer".into(),
            ))),
        }
    }
}
