//! Persona generation workflow.

use crate::prompts::{
    DOPPELGANGER_INSTRUCTION, chat_instruction, doppelganger_prompt, portrait_prompt,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use twinverse_core::{
    Caller, ChatEntry, DEFAULT_MAX_ATTEMPTS, DoppelgangerProfile, FailureKind, GenerationOutcome,
    GenerationRequest, QuantumConfig, RealityId, RealityRecord, UserProfile,
};
use twinverse_error::{RealityError, RealityErrorKind, TwinverseResult};
use twinverse_interface::{ContentGenerator, ProfileStore, RealityStore};

/// Runs the profile-to-persona workflow against a generator and two stores.
///
/// Holds no per-call state; one service can serve concurrent callers.
pub struct RealityService<G> {
    generator: G,
    realities: Arc<dyn RealityStore>,
    profiles: Arc<dyn ProfileStore>,
    max_attempts: u32,
}

impl<G: ContentGenerator> RealityService<G> {
    /// Create a service with the default attempt budget.
    pub fn new(
        generator: G,
        realities: Arc<dyn RealityStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            generator,
            realities,
            profiles,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Attempt budget for each generation; values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate and store a persona for `caller` in the selected universe.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without a caller
    /// - `InvalidInput` when a universe field is blank
    /// - `ProfileNotFound` when the caller has no profile
    /// - `Generation` when the generator reports a failure
    /// - `InvalidPayload` when the object does not match [`DoppelgangerProfile`]
    /// - storage errors from either store
    #[instrument(
        skip(self, caller, universe),
        fields(user_id = ?caller.map(|c| c.id()), model = self.generator.model_name())
    )]
    pub async fn generate_reality(
        &self,
        caller: Option<&Caller>,
        universe: &QuantumConfig,
    ) -> TwinverseResult<RealityId> {
        let caller = authorize(caller)?;
        universe.validate()?;

        let profile = self
            .profiles
            .find_profile(caller.id())
            .await?
            .ok_or_else(|| RealityError::new(RealityErrorKind::ProfileNotFound))?;

        let request = GenerationRequest::builder()
            .user_prompt(doppelganger_prompt(&profile, universe))
            .system_instruction(DOPPELGANGER_INSTRUCTION)
            .max_attempts(self.max_attempts)
            .extract_json(true)
            .build()
            .map_err(|e| RealityError::new(RealityErrorKind::InvalidInput(e.to_string())))?;

        let persona = match self.generator.generate(&request).await {
            GenerationOutcome::Success {
                raw_text,
                extracted_object: Some(object),
            } => DoppelgangerProfile::from_value(object).map_err(|e| {
                error!(error = %e, raw_text = %raw_text, "Generated object does not match persona schema");
                RealityError::new(RealityErrorKind::InvalidPayload(e.to_string()))
            })?,
            GenerationOutcome::Success { raw_text, .. } => {
                error!(raw_text = %raw_text, "Generator returned no JSON object");
                return Err(RealityError::new(RealityErrorKind::InvalidPayload(
                    "no JSON object in generated text".into(),
                ))
                .into());
            }
            GenerationOutcome::Failure {
                kind,
                attempts,
                raw_text,
            } => {
                warn!(kind = %kind, attempts, raw_text = ?raw_text, "Persona generation failed");
                return Err(generation_failed(kind).into());
            }
        };

        let id = self.realities.save_reality(caller.id(), &persona).await?;
        info!(reality_id = %id, "Stored generated reality");
        Ok(id)
    }

    /// The caller's realities, newest first.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a caller, or a storage error.
    #[instrument(skip(self, caller))]
    pub async fn list_realities(&self, caller: Option<&Caller>) -> TwinverseResult<Vec<RealityRecord>> {
        let caller = authorize(caller)?;
        Ok(self.realities.list_for_user(caller.id()).await?)
    }

    /// One reality by identifier.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown identifier, or a storage error.
    #[instrument(skip(self), fields(reality_id = %id))]
    pub async fn get_reality(&self, id: &RealityId) -> TwinverseResult<RealityRecord> {
        self.realities
            .get_reality(id)
            .await?
            .ok_or_else(|| RealityError::new(RealityErrorKind::NotFound(id.to_string())).into())
    }

    /// Every stored reality, newest first.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub async fn list_all_realities(&self) -> TwinverseResult<Vec<RealityRecord>> {
        Ok(self.realities.list_all().await?)
    }

    /// Image prompt for a stored reality, built from the persona and its
    /// owner's profile.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a caller, `NotFound` for an unknown reality,
    /// `Forbidden` when the caller may not read it, `ProfileNotFound` when the
    /// owner has no profile, or a storage error.
    #[instrument(skip(self, caller), fields(reality_id = %id))]
    pub async fn portrait_prompt(
        &self,
        caller: Option<&Caller>,
        id: &RealityId,
    ) -> TwinverseResult<String> {
        let caller = authorize(caller)?;
        let record = self.readable_record(caller, id).await?;

        let profile = self
            .profiles
            .find_profile(record.user_id())
            .await?
            .ok_or_else(|| RealityError::new(RealityErrorKind::ProfileNotFound))?;
        Ok(portrait_prompt(&profile, record.generated_profile()))
    }

    /// Send `message` to the persona of a stored reality and return its reply.
    ///
    /// Only the latest message goes to the generator. Both turns are appended
    /// to the record's chat log once the reply arrives; a failed generation
    /// leaves the log untouched.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without a caller
    /// - `InvalidInput` for a blank message
    /// - `NotFound` for an unknown reality
    /// - `Forbidden` when the caller may not read it
    /// - `Generation` when the generator reports a failure
    /// - storage errors from the reality store
    #[instrument(
        skip(self, caller, message),
        fields(reality_id = %id, model = self.generator.model_name())
    )]
    pub async fn chat(
        &self,
        caller: Option<&Caller>,
        id: &RealityId,
        message: &str,
    ) -> TwinverseResult<ChatEntry> {
        let caller = authorize(caller)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(RealityError::new(RealityErrorKind::InvalidInput(
                "message must not be empty".into(),
            ))
            .into());
        }
        let record = self.readable_record(caller, id).await?;

        let request = GenerationRequest::builder()
            .user_prompt(message)
            .system_instruction(chat_instruction(record.generated_profile()))
            .max_attempts(self.max_attempts)
            .extract_json(false)
            .build()
            .map_err(|e| RealityError::new(RealityErrorKind::InvalidInput(e.to_string())))?;

        let reply = match self.generator.generate(&request).await {
            GenerationOutcome::Success { raw_text, .. } => ChatEntry::model(raw_text.trim()),
            GenerationOutcome::Failure { kind, attempts, .. } => {
                warn!(kind = %kind, attempts, "Persona chat failed");
                return Err(generation_failed(kind).into());
            }
        };

        self.realities
            .append_chat(id, &[ChatEntry::user(message), reply.clone()])
            .await?;
        info!(turns = record.chat_log().len() + 2, "Recorded chat turn");
        Ok(reply)
    }

    /// Validate and store `profile` as the caller's profile.
    ///
    /// The profile is re-keyed to the caller whatever user id it carried.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a caller, `InvalidInput` from validation, or a
    /// storage error.
    #[instrument(skip(self, caller, profile))]
    pub async fn save_profile(
        &self,
        caller: Option<&Caller>,
        profile: UserProfile,
    ) -> TwinverseResult<UserProfile> {
        let caller = authorize(caller)?;
        let profile = profile.with_user_id(caller.id().clone());
        profile.validate()?;
        self.profiles.upsert_profile(&profile).await?;
        info!(user_id = %caller.id(), "Saved profile");
        Ok(profile)
    }
}

impl<G: ContentGenerator> RealityService<G> {
    /// Fetch a record and check that `caller` may read it.
    async fn readable_record(
        &self,
        caller: &Caller,
        id: &RealityId,
    ) -> TwinverseResult<RealityRecord> {
        let record = self.get_reality(id).await?;
        if !caller.can_read(record.user_id()) {
            warn!(user_id = %caller.id(), "Rejected access to another user's reality");
            return Err(RealityError::new(RealityErrorKind::Forbidden(format!(
                "reality {} belongs to another user",
                id
            )))
            .into());
        }
        Ok(record)
    }
}

fn generation_failed(kind: FailureKind) -> RealityError {
    RealityError::new(RealityErrorKind::Generation {
        kind: kind.to_string(),
        user_message: kind.user_message().to_string(),
    })
}

fn authorize(caller: Option<&Caller>) -> Result<&Caller, RealityError> {
    caller.ok_or_else(|| {
        warn!("Rejected request without an authenticated caller");
        RealityError::new(RealityErrorKind::Unauthorized)
    })
}
