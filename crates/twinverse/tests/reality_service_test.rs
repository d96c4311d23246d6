//! Workflow tests against a stub generator and in-memory stores.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use twinverse::prompts::DOPPELGANGER_INSTRUCTION;
use twinverse::{
    Caller, ChatRole, DoppelgangerProfile, FailureKind, GenerationOutcome, GenerationRequest,
    QuantumConfig, RealityId, RealityService, Role, TwinverseErrorKind, UserId, UserProfile,
};
use twinverse_error::{RealityErrorKind, TwinverseError};
use twinverse_interface::{ContentGenerator, ProfileStore, RealityStore};
use twinverse_storage::{InMemoryProfileStore, InMemoryRealityStore};

/// Generator that returns a fixed outcome and records requests.
struct StubGenerator {
    outcome: GenerationOutcome,
    calls: AtomicU32,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl StubGenerator {
    fn new(outcome: GenerationOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn with_object(object: serde_json::Value) -> Self {
        Self::new(GenerationOutcome::Success {
            raw_text: object.to_string(),
            extracted_object: Some(object),
        })
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.outcome.clone()
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn persona_json() -> serde_json::Value {
    json!({
        "alternate_universe_dob": "2187-11-02",
        "backstory": "A cartographer of collapsing stars.",
        "personality_traits": ["meticulous", "wry", "restless"],
        "location_coordinates": "64.14, -21.94",
        "daily_routine": "Charts the sky, then argues with the archivists.",
        "major_achievements": ["Mapped the Veil Nebula"],
        "strengths": ["precision"],
        "weaknesses": ["impatience"],
        "friends_and_rivals": {"friends": ["Oren"], "rivals": ["The Archivist"]},
        "secrets_and_quirks": ["Collects broken compasses"],
        "favorite_quotes": ["North is a suggestion."]
    })
}

fn universe() -> QuantumConfig {
    QuantumConfig::new("Rogue Scholar", "Space Opera", "defiant")
}

fn profile(user: &str) -> UserProfile {
    UserProfile::builder()
        .user_id(user)
        .appearance("tall, scar over left brow")
        .date_of_birth("1993-06-21")
        .personality("curious and blunt")
        .interests(vec!["maps".to_string(), "astronomy".to_string()])
        .build()
        .expect("Valid profile")
}

struct Fixture {
    service: RealityService<StubGenerator>,
    realities: InMemoryRealityStore,
    profiles: InMemoryProfileStore,
}

impl Fixture {
    fn calls(&self) -> u32 {
        self.service.generator().calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> Option<GenerationRequest> {
        self.service.generator().last_request.lock().unwrap().clone()
    }
}

fn fixture(generator: StubGenerator) -> Fixture {
    let realities = InMemoryRealityStore::new();
    let profiles = InMemoryProfileStore::new();
    let service = RealityService::new(
        generator,
        Arc::new(realities.clone()),
        Arc::new(profiles.clone()),
    )
    .with_max_attempts(3);
    Fixture {
        service,
        realities,
        profiles,
    }
}

fn reality_kind(err: &TwinverseError) -> &RealityErrorKind {
    match err.kind() {
        TwinverseErrorKind::Reality(e) => &e.kind,
        other => panic!("Expected reality error, got {other}"),
    }
}

#[tokio::test]
async fn test_generate_reality_persists_record() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let caller = Caller::new("user-1", Role::User);
    fx.profiles.upsert_profile(&profile("user-1")).await.unwrap();

    let id = fx
        .service
        .generate_reality(Some(&caller), &universe())
        .await
        .expect("Generation succeeds");

    let record = fx.service.get_reality(&id).await.expect("Record stored");
    assert_eq!(record.user_id(), &UserId::new("user-1"));
    assert_eq!(
        record.generated_profile().backstory,
        "A cartographer of collapsing stars."
    );
    assert_eq!(fx.realities.len().await, 1);

    let request = fx.last_request().unwrap();
    assert!(*request.extract_json());
    assert_eq!(*request.max_attempts(), 3);
    assert_eq!(request.system_instruction(), DOPPELGANGER_INSTRUCTION);
    assert!(request.user_prompt().contains("Archetype: \"Rogue Scholar\""));
    assert!(request.user_prompt().contains("Interests: maps, astronomy"));
}

#[tokio::test]
async fn test_missing_caller_is_unauthorized() {
    let fx = fixture(StubGenerator::with_object(persona_json()));

    let err = fx
        .service
        .generate_reality(None, &universe())
        .await
        .unwrap_err();

    assert_eq!(reality_kind(&err), &RealityErrorKind::Unauthorized);
    assert_eq!(fx.calls(), 0);
}

#[tokio::test]
async fn test_blank_universe_field_is_invalid_input() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let caller = Caller::new("user-1", Role::User);
    fx.profiles.upsert_profile(&profile("user-1")).await.unwrap();

    let err = fx
        .service
        .generate_reality(Some(&caller), &QuantumConfig::new("Bard", "  ", "calm"))
        .await
        .unwrap_err();

    assert_eq!(
        reality_kind(&err),
        &RealityErrorKind::InvalidInput("Missing required fields".into())
    );
    assert_eq!(fx.calls(), 0);
}

#[tokio::test]
async fn test_missing_profile_is_reported() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let caller = Caller::new("nobody", Role::User);

    let err = fx
        .service
        .generate_reality(Some(&caller), &universe())
        .await
        .unwrap_err();

    assert_eq!(reality_kind(&err), &RealityErrorKind::ProfileNotFound);
    assert_eq!(fx.calls(), 0);
}

#[tokio::test]
async fn test_schema_mismatch_is_invalid_payload() {
    let fx = fixture(StubGenerator::with_object(json!({"city": "Aerogard"})));
    let caller = Caller::new("user-1", Role::User);
    fx.profiles.upsert_profile(&profile("user-1")).await.unwrap();

    let err = fx
        .service
        .generate_reality(Some(&caller), &universe())
        .await
        .unwrap_err();

    assert!(matches!(
        reality_kind(&err),
        RealityErrorKind::InvalidPayload(_)
    ));
    assert!(fx.realities.is_empty().await);
}

#[tokio::test]
async fn test_generation_failure_carries_user_message() {
    let cases = [
        (FailureKind::RateLimited, "try again"),
        (FailureKind::TransportError, "try again"),
        (FailureKind::EmptyResponse, "adjust your input"),
        (FailureKind::MalformedPayload, "adjust your input"),
    ];

    for (kind, phrase) in cases {
        let fx = fixture(StubGenerator::new(GenerationOutcome::failure(kind, 1)));
        let caller = Caller::new("user-1", Role::User);
        fx.profiles.upsert_profile(&profile("user-1")).await.unwrap();

        let err = fx
            .service
            .generate_reality(Some(&caller), &universe())
            .await
            .unwrap_err();

        match reality_kind(&err) {
            RealityErrorKind::Generation {
                kind: reported,
                user_message,
            } => {
                assert_eq!(reported, &kind.to_string());
                assert!(user_message.contains(phrase), "{kind}: {user_message}");
            }
            other => panic!("Expected generation error, got {other}"),
        }
        assert!(fx.realities.is_empty().await);
    }
}

#[tokio::test]
async fn test_listing_scopes_to_caller() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let alice = Caller::new("alice", Role::User);
    let bob = Caller::new("bob", Role::User);
    for caller in [&alice, &bob, &alice] {
        fx.profiles
            .upsert_profile(&profile(caller.id().as_str()))
            .await
            .unwrap();
        fx.service
            .generate_reality(Some(caller), &universe())
            .await
            .unwrap();
    }

    let mine = fx.service.list_realities(Some(&alice)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.user_id() == alice.id()));
    assert!(mine[0].created_at() >= mine[1].created_at());

    assert_eq!(fx.service.list_all_realities().await.unwrap().len(), 3);

    let err = fx.service.list_realities(None).await.unwrap_err();
    assert_eq!(reality_kind(&err), &RealityErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_unknown_reality_is_not_found() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let id = RealityId::new_v4();

    let err = fx.service.get_reality(&id).await.unwrap_err();

    assert_eq!(reality_kind(&err), &RealityErrorKind::NotFound(id.to_string()));
}

#[tokio::test]
async fn test_save_profile_rekeys_and_validates() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let caller = Caller::new("user-9", Role::User);

    let saved = fx
        .service
        .save_profile(Some(&caller), profile("someone-else"))
        .await
        .expect("Valid profile saved");
    assert_eq!(saved.user_id(), caller.id());
    assert!(
        fx.profiles
            .find_profile(caller.id())
            .await
            .unwrap()
            .is_some()
    );

    let too_short = UserProfile::builder()
        .user_id("user-9")
        .appearance("x")
        .date_of_birth("1999-09-09")
        .personality("calm and kind")
        .build()
        .unwrap();
    let err = fx
        .service
        .save_profile(Some(&caller), too_short)
        .await
        .unwrap_err();
    assert!(matches!(reality_kind(&err), RealityErrorKind::InvalidInput(_)));
}

#[tokio::test]
async fn test_portrait_prompt_respects_ownership() {
    let fx = fixture(StubGenerator::with_object(persona_json()));
    let owner = Caller::new("owner", Role::User);
    fx.profiles.upsert_profile(&profile("owner")).await.unwrap();
    let id = fx
        .service
        .generate_reality(Some(&owner), &universe())
        .await
        .unwrap();

    let prompt = fx
        .service
        .portrait_prompt(Some(&owner), &id)
        .await
        .expect("Owner may read");
    assert!(prompt.contains("meticulous, wry, restless"));

    let stranger = Caller::new("stranger", Role::User);
    let err = fx
        .service
        .portrait_prompt(Some(&stranger), &id)
        .await
        .unwrap_err();
    assert!(matches!(reality_kind(&err), RealityErrorKind::Forbidden(_)));

    let moderator = Caller::new("mod", Role::Moderator);
    assert!(fx.service.portrait_prompt(Some(&moderator), &id).await.is_ok());
}

fn chat_reply(text: &str) -> StubGenerator {
    StubGenerator::new(GenerationOutcome::Success {
        raw_text: text.to_string(),
        extracted_object: None,
    })
}

async fn stored_reality(fx: &Fixture, owner: &str) -> RealityId {
    let persona = DoppelgangerProfile::from_value(persona_json()).unwrap();
    fx.realities
        .save_reality(&UserId::new(owner), &persona)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_chat_replies_in_character_and_logs_turns() {
    let fx = fixture(chat_reply("  The stars remember you.  "));
    let owner = Caller::new("owner", Role::User);
    let id = stored_reality(&fx, "owner").await;

    let reply = fx
        .service
        .chat(Some(&owner), &id, " Who are you? ")
        .await
        .expect("Chat succeeds");
    assert_eq!(*reply.role(), ChatRole::Model);
    assert_eq!(reply.text(), "The stars remember you.");

    let request = fx.last_request().unwrap();
    assert_eq!(request.user_prompt(), "Who are you?");
    assert!(!*request.extract_json());
    assert!(
        request
            .system_instruction()
            .contains("A cartographer of collapsing stars.")
    );
    assert!(request.system_instruction().contains("meticulous, wry, restless"));

    let record = fx.service.get_reality(&id).await.unwrap();
    let turns: Vec<(ChatRole, &str)> = record
        .chat_log()
        .iter()
        .map(|e| (*e.role(), e.text().as_str()))
        .collect();
    assert_eq!(
        turns,
        vec![
            (ChatRole::User, "Who are you?"),
            (ChatRole::Model, "The stars remember you."),
        ]
    );
}

#[tokio::test]
async fn test_chat_with_another_users_reality_is_forbidden() {
    let fx = fixture(chat_reply("Hello."));
    let id = stored_reality(&fx, "owner").await;
    let stranger = Caller::new("stranger", Role::User);

    let err = fx
        .service
        .chat(Some(&stranger), &id, "Hi")
        .await
        .unwrap_err();

    assert!(matches!(reality_kind(&err), RealityErrorKind::Forbidden(_)));
    assert_eq!(fx.calls(), 0);
    let record = fx.service.get_reality(&id).await.unwrap();
    assert!(record.chat_log().is_empty());
}

#[tokio::test]
async fn test_chat_generation_failure_leaves_log_untouched() {
    let fx = fixture(StubGenerator::new(GenerationOutcome::failure(
        FailureKind::RateLimited,
        3,
    )));
    let owner = Caller::new("owner", Role::User);
    let id = stored_reality(&fx, "owner").await;

    let err = fx.service.chat(Some(&owner), &id, "Hi").await.unwrap_err();

    match reality_kind(&err) {
        RealityErrorKind::Generation { kind, user_message } => {
            assert_eq!(kind, "rate_limited");
            assert!(user_message.contains("try again"));
        }
        other => panic!("Expected generation error, got {other}"),
    }
    let record = fx.service.get_reality(&id).await.unwrap();
    assert!(record.chat_log().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_blank_message_and_unknown_reality() {
    let fx = fixture(chat_reply("Hello."));
    let owner = Caller::new("owner", Role::User);
    let id = stored_reality(&fx, "owner").await;

    let err = fx.service.chat(Some(&owner), &id, "   ").await.unwrap_err();
    assert!(matches!(reality_kind(&err), RealityErrorKind::InvalidInput(_)));

    let missing = RealityId::new_v4();
    let err = fx
        .service
        .chat(Some(&owner), &missing, "Hi")
        .await
        .unwrap_err();
    assert_eq!(
        reality_kind(&err),
        &RealityErrorKind::NotFound(missing.to_string())
    );

    let err = fx.service.chat(None, &id, "Hi").await.unwrap_err();
    assert_eq!(reality_kind(&err), &RealityErrorKind::Unauthorized);
    assert_eq!(fx.calls(), 0);
}
