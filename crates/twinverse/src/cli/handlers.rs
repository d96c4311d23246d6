//! Command handlers.

use super::stores::Stores;
use super::{Cli, Commands};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use twinverse::{
    AppConfig, Caller, GeminiClient, GenerationRequest, QuantumConfig, RealityId, RealityRecord,
    RealityService, Role, TwinverseResult, UserProfile,
};
use twinverse_interface::{IdentityProvider, StaticIdentity};

/// Dispatches a parsed command line.
#[tracing::instrument(skip_all)]
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            prompt,
            system,
            json,
            max_attempts,
        } => {
            let client = gemini_client(&config)?;
            let request = GenerationRequest::builder()
                .user_prompt(prompt)
                .system_instruction(system)
                .max_attempts(max_attempts.unwrap_or(*config.gemini().max_attempts()))
                .extract_json(json)
                .build()?;
            print_json(&client.generate(&request).await)
        }

        Commands::Portrait {
            prompt,
            reality,
            user,
            role,
            max_attempts,
        } => {
            let client = gemini_client(&config)?;
            let prompt = match (prompt, reality) {
                (Some(prompt), _) => prompt,
                (None, Some(reality)) => {
                    let id = parse_reality_id(&reality)?;
                    let stores = Stores::open(&config).await?;
                    let caller = identify(user, role).await;
                    let service = RealityService::new(
                        client.clone(),
                        stores.realities.clone(),
                        stores.profiles.clone(),
                    );
                    let prompt = service.portrait_prompt(caller.as_ref(), &id).await;
                    stores.close();
                    prompt?
                }
                (None, None) => anyhow::bail!("either --prompt or --reality is required"),
            };
            let budget = max_attempts.unwrap_or(*config.gemini().max_attempts());
            print_json(&client.generate_portrait(&prompt, budget).await)
        }

        Commands::Profile { user, file } => {
            let stores = Stores::open(&config).await?;
            let service = service_for(&config, &stores)?;
            let caller = identify(Some(user.clone()), Role::User).await;
            let profile = read_profile(&file, &user)?;
            let saved = service.save_profile(caller.as_ref(), profile).await;
            stores.close();
            print_json(&saved?)
        }

        Commands::Reality {
            user,
            archetype,
            universe_focus,
            core_personality,
            profile,
        } => {
            let stores = Stores::open(&config).await?;
            let service = service_for(&config, &stores)?;
            let caller = identify(user, Role::User).await;

            if let (Some(path), Some(caller)) = (profile, caller.as_ref()) {
                let profile = read_profile(&path, caller.id().as_str())?;
                service.save_profile(Some(caller), profile).await?;
            }

            let universe = QuantumConfig::new(archetype, universe_focus, core_personality);
            let result = generate_and_fetch(&service, caller.as_ref(), &universe).await;
            stores.close();
            print_json(&result?)
        }

        Commands::Chat {
            user,
            role,
            reality,
            message,
        } => {
            let id = parse_reality_id(&reality)?;
            let stores = Stores::open(&config).await?;
            let service = service_for(&config, &stores)?;
            let caller = identify(user, role).await;
            let reply = service.chat(caller.as_ref(), &id, &message).await;
            stores.close();
            print_json(&reply?)
        }

        Commands::List { user, all } => {
            let stores = Stores::open(&config).await?;
            let service = service_for(&config, &stores)?;
            let records = if all {
                service.list_all_realities().await
            } else {
                let caller = identify(user, Role::User).await;
                service.list_realities(caller.as_ref()).await
            };
            stores.close();
            print_json(&records?)
        }

        Commands::Show { id } => {
            let id = parse_reality_id(&id)?;
            let stores = Stores::open(&config).await?;
            let service = service_for(&config, &stores)?;
            let record = service.get_reality(&id).await;
            stores.close();
            print_json(&record?)
        }
    }
}

async fn generate_and_fetch(
    service: &RealityService<GeminiClient>,
    caller: Option<&Caller>,
    universe: &QuantumConfig,
) -> TwinverseResult<RealityRecord> {
    let id = service.generate_reality(caller, universe).await?;
    service.get_reality(&id).await
}

fn gemini_client(config: &AppConfig) -> anyhow::Result<GeminiClient> {
    config.require_api_key()?;
    Ok(GeminiClient::from_config(config.gemini().clone())?)
}

fn service_for(config: &AppConfig, stores: &Stores) -> anyhow::Result<RealityService<GeminiClient>> {
    Ok(RealityService::new(
        gemini_client(config)?,
        stores.realities.clone(),
        stores.profiles.clone(),
    )
    .with_max_attempts(*config.gemini().max_attempts()))
}

async fn identify(user: Option<String>, role: Role) -> Option<Caller> {
    let identity = match user {
        Some(user) => StaticIdentity::new(Caller::new(user, role)),
        None => StaticIdentity::anonymous(),
    };
    identity.current_caller().await
}

fn parse_reality_id(raw: &str) -> anyhow::Result<RealityId> {
    raw.parse()
        .with_context(|| format!("'{}' is not a reality id", raw))
}

/// Reads a profile TOML file; `user_id` is filled in from the caller.
fn read_profile(path: &Path, user: &str) -> anyhow::Result<UserProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;
    let mut table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse profile file {}", path.display()))?;
    table.insert("user_id".to_string(), toml::Value::String(user.to_string()));
    toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("Profile file {} is missing fields", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
