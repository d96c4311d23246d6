//! Core data types for the Twinverse persona generator.
//!
//! This crate provides the request/outcome model of the resilient content
//! generator, JSON extraction, and the profile and persona types the
//! workflow moves between collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod doppelganger;
mod extraction;
mod identity;
mod observability;
mod outcome;
mod profile;
mod reality;
mod request;

pub use chat::{ChatEntry, ChatRole};
pub use doppelganger::{DoppelgangerProfile, FriendsAndRivals};
pub use extraction::{extract_json_object, json_span};
pub use identity::{Caller, Role, UserId};
pub use observability::init_tracing;
pub use outcome::{FailureKind, GenerationOutcome};
pub use profile::{QuantumConfig, UserProfile, UserProfileBuilder};
pub use reality::{RealityId, RealityRecord};
pub use request::{
    DEFAULT_MAX_ATTEMPTS, GenerationRequest, GenerationRequestBuilder,
    GenerationRequestBuilderError,
};
