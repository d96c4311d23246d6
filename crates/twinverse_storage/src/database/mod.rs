//! PostgreSQL persistence through diesel.

mod connection;
mod models;
mod profile_store;
mod reality_store;
pub mod schema;

pub use connection::DatabasePool;
pub use models::{NewRealityRow, ProfileRow, RealityRow};
pub use profile_store::PgProfileStore;
pub use reality_store::PgRealityStore;
