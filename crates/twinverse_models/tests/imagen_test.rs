mod test_utils;

use std::sync::Arc;
use test_utils::{Scripted, ScriptedTransport, client_with, image_body};
use twinverse_core::FailureKind;
use twinverse_models::{PLACEHOLDER_PORTRAIT_URL, PortraitOutcome};

#[tokio::test(start_paused = true)]
async fn test_portrait_rendered_as_data_url() {
    let transport = Arc::new(ScriptedTransport::new([
        Scripted::throttled(),
        Scripted::ok(image_body("iVBORw0KGgo=")),
    ]));
    let client = client_with(&transport);

    let outcome = client.generate_portrait("a knight in neon armour", 3).await;

    assert_eq!(
        outcome,
        PortraitOutcome::Rendered {
            data_url: "data:image/png;base64,iVBORw0KGgo=".into()
        }
    );
    assert_eq!(transport.calls(), 2);

    let (url, body) = transport.requests().remove(0);
    assert!(url.ends_with("/models/imagen-3.0-generate-001:predict"));
    assert_eq!(body["instances"]["prompt"], "a knight in neon armour");
    assert_eq!(body["parameters"]["sampleCount"], 1);
}

#[tokio::test]
async fn test_portrait_without_image_uses_placeholder() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::ok(r#"{"predictions":[]}"#)));
    let client = client_with(&transport);

    let outcome = client.generate_portrait("anything", 3).await;

    assert_eq!(outcome.image_url(), Some(PLACEHOLDER_PORTRAIT_URL));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_portrait_failure_after_budget() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::throttled()));
    let client = client_with(&transport);

    let outcome = client.generate_portrait("anything", 4).await;

    assert_eq!(
        outcome,
        PortraitOutcome::Failure {
            kind: FailureKind::RateLimited,
            attempts: 4
        }
    );
    assert_eq!(outcome.image_url(), None);
    assert_eq!(transport.calls(), 4);
}
