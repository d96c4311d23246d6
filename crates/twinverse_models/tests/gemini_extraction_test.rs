mod test_utils;

use serde_json::json;
use std::sync::Arc;
use test_utils::{Scripted, ScriptedTransport, client_with, text_body};
use twinverse_core::{FailureKind, GenerationOutcome, GenerationRequest};
use twinverse_models::{GeminiClient, GeminiConfig};

fn extracting(prompt: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .user_prompt(prompt)
        .system_instruction("Respond with one JSON object")
        .extract_json(true)
        .build()
        .expect("Valid request")
}

#[tokio::test]
async fn test_embedded_object_is_extracted() {
    let raw = "Here you go:\n```json\n{\"backstory\": \"born in {brackets}\", \"traits\": [1, 2]}\n```";
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body(raw))));
    let client = client_with(&transport);

    let outcome = client.generate(&extracting("persona")).await;

    assert_eq!(
        outcome,
        GenerationOutcome::Success {
            raw_text: raw.to_string(),
            extracted_object: Some(json!({"backstory": "born in {brackets}", "traits": [1, 2]})),
        }
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_text_without_braces_is_malformed() {
    let raw = "I cannot produce that persona.";
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body(raw))));
    let client = client_with(&transport);

    let outcome = client.generate(&extracting("persona")).await;

    assert_eq!(
        outcome,
        GenerationOutcome::Failure {
            kind: FailureKind::MalformedPayload,
            attempts: 1,
            raw_text: Some(raw.to_string()),
        }
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_unparseable_span_is_malformed() {
    for raw in ["} backwards {", "{\"a\": 1} and {\"b\": 2}", "{not json}"] {
        let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body(raw))));
        let client = client_with(&transport);

        let outcome = client.generate(&extracting("persona")).await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::MalformedPayload), "{raw}");
        assert_eq!(outcome.raw_text(), Some(raw));
        assert_eq!(transport.calls(), 1);
    }
}

#[tokio::test]
async fn test_plain_text_without_extraction() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body("no json here"))));
    let client = client_with(&transport);

    let outcome = client
        .generate(&GenerationRequest::new("prompt", "system"))
        .await;

    assert_eq!(outcome.raw_text(), Some("no json here"));
    assert_eq!(outcome.extracted_object(), None);
}

#[tokio::test]
async fn test_request_carries_prompt_and_instruction() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body("{}"))));
    let client = client_with(&transport);

    client.generate(&extracting("my traits")).await;

    let requests = transport.requests();
    let (url, body) = &requests[0];
    assert_eq!(
        url,
        "http://gemini.test/v1beta/models/gemini-2.0-flash:generateContent"
    );
    assert_eq!(body["contents"][0]["parts"][0]["text"], json!("my traits"));
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        json!("Respond with one JSON object")
    );
    assert_eq!(body["tools"], json!([{"google_search": {}}]));
}

#[tokio::test]
async fn test_grounding_can_be_disabled() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(text_body("{}"))));
    let config = GeminiConfig::builder()
        .api_key("test-key")
        .search_grounding(false)
        .model("gemini-test")
        .build()
        .expect("Valid config");
    let client = GeminiClient::new(Arc::clone(&transport), config);

    client.generate(&extracting("traits")).await;

    let (url, body) = transport.requests().remove(0);
    assert!(url.ends_with("/models/gemini-test:generateContent"));
    assert!(body.get("tools").is_none());
}
