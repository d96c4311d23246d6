//! Instruction templates for persona and portrait generation.

use twinverse_core::{DoppelgangerProfile, QuantumConfig, UserProfile};

/// System instruction constraining the model to the persona JSON schema.
pub const DOPPELGANGER_INSTRUCTION: &str = r#"You are generating an alternate-universe doppelganger profile.
Return output ONLY as valid JSON, exactly in this format:
{
  "alternate_universe_dob": "string",
  "backstory": "1 detailed paragraph",
  "personality_traits": ["trait1", "trait2", "trait3"],
  "location_coordinates": "latitude, longitude",
  "daily_routine": "1 paragraph",
  "major_achievements": ["achievement1", "achievement2"],
  "strengths": ["strength1", "strength2"],
  "weaknesses": ["weakness1", "weakness2"],
  "friends_and_rivals": {
    "friends": ["friend1", "friend2"],
    "rivals": ["rival1"]
  },
  "secrets_and_quirks": ["secret or quirk 1", "secret or quirk 2"],
  "favorite_quotes": ["quote1", "quote2"]
}"#;

/// User turn describing the real person and the chosen universe.
///
/// # Examples
///
/// ```
/// use twinverse::prompts::doppelganger_prompt;
/// use twinverse::{QuantumConfig, UserProfile};
///
/// let profile = UserProfile::builder()
///     .user_id("u1")
///     .appearance("tall, silver hair")
///     .date_of_birth("1991-02-03")
///     .personality("curious, stubborn")
///     .interests(vec!["astronomy".to_string(), "jazz".to_string()])
///     .build()
///     .expect("valid profile");
/// let universe = QuantumConfig::new("Rogue Scholar", "Steampunk", "restless");
///
/// let prompt = doppelganger_prompt(&profile, &universe);
/// assert!(prompt.contains("- Interests: astronomy, jazz"));
/// assert!(prompt.contains("- Archetype: \"Rogue Scholar\""));
/// ```
pub fn doppelganger_prompt(profile: &UserProfile, universe: &QuantumConfig) -> String {
    let interests = profile.interests().join(", ");
    let traits = [
        ("Appearance", profile.appearance().as_str()),
        ("Date of Birth", profile.date_of_birth().as_str()),
        ("Personality Keywords", profile.personality().as_str()),
        ("Additional Traits", profile.additional_traits().as_str()),
        ("Vibe / Style", profile.vibe_style().as_str()),
        ("Sexuality", profile.sexuality().as_str()),
        ("Gender", profile.gender().as_str()),
        ("Interests", interests.as_str()),
        ("Preference", profile.preference().as_str()),
    ];
    let universe_lines = [
        ("Archetype", universe.archetype()),
        ("Universe Focus", universe.universe_focus()),
        ("Core Personality Input", universe.core_personality()),
    ];

    let mut lines = vec!["USER TRAITS:".to_string()];
    lines.extend(
        traits
            .iter()
            .map(|(label, value)| format!("- {}: {}", label, value)),
    );
    lines.push(String::new());
    lines.push("SELECTED UNIVERSE:".to_string());
    lines.extend(
        universe_lines
            .iter()
            .map(|(label, value)| format!("- {}: \"{}\"", label, value)),
    );
    lines.join("\n")
}

/// Image prompt for a portrait of the generated persona.
pub fn portrait_prompt(profile: &UserProfile, persona: &DoppelgangerProfile) -> String {
    let traits = persona
        .personality_traits
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Portrait of a person ({}) in an alternate universe. Personality: {}. Setting: {}",
        profile.appearance(),
        traits,
        persona.daily_routine
    )
}

/// System instruction for chatting in character with a generated persona.
pub fn chat_instruction(persona: &DoppelgangerProfile) -> String {
    format!(
        "You are the alternate-universe doppelganger of the user. \
         Your personality: {}. Your backstory: {} \
         Respond in character, using weird, chaotic and slightly cryptic language \
         that fits your universe. Keep responses under 3 sentences.",
        persona.personality_traits.join(", "),
        persona.backstory
    )
}
