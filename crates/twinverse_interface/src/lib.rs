//! Trait definitions for the Twinverse collaborators.
//!
//! The generator, persistence and identity seams are traits so the workflow
//! can run against live services, PostgreSQL, or in-memory test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod identity;
mod store;

pub use generator::ContentGenerator;
pub use identity::{IdentityProvider, StaticIdentity};
pub use store::{ProfileStore, RealityStore};
