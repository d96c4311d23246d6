//! Reality and profile stores for Twinverse.
//!
//! [`InMemoryRealityStore`] and [`InMemoryProfileStore`] are always
//! available. With the `database` feature, [`DatabasePool`] and the
//! PostgreSQL stores persist the same data through diesel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;

#[cfg(feature = "database")]
mod database;

pub use memory::{InMemoryProfileStore, InMemoryRealityStore};

#[cfg(feature = "database")]
pub use database::{
    DatabasePool, NewRealityRow, PgProfileStore, PgRealityStore, ProfileRow, RealityRow,
    schema,
};
