//! Twinverse: alternate-universe personas from a personal profile.
//!
//! This crate ties the workspace together:
//!
//! - [`AppConfig`] loads layered configuration (defaults, TOML, environment).
//! - [`RealityService`] runs the persona workflow over any
//!   [`ContentGenerator`](twinverse_interface::ContentGenerator) and the
//!   reality/profile stores.
//! - [`prompts`] holds the instruction templates sent to the model.
//!
//! The `twinverse` binary exposes the same operations on the command line.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod prompts;
mod reality;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig};
pub use reality::RealityService;

pub use twinverse_core::{
    Caller, ChatEntry, ChatRole, DoppelgangerProfile, FailureKind, GenerationOutcome,
    GenerationRequest, QuantumConfig, RealityId, RealityRecord, Role, UserId, UserProfile,
};
pub use twinverse_error::{TwinverseError, TwinverseErrorKind, TwinverseResult};
pub use twinverse_models::{GeminiClient, GeminiConfig, PortraitOutcome};
