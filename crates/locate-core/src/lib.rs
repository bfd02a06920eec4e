//! locate-core library.
//!
//! In-memory record store for utility locate tickets, the query view that
//! filters and aggregates it, and an optional file-backed persistence layer.
//!
//! # Conventions
//!
//! - **Errors**: domain failures are [`error::StoreError`] / [`persist::PersistError`];
//!   glue code uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod persist;
pub mod query;
pub mod seed;
pub mod session;
pub mod store;

pub use error::{ErrorCode, StoreError, ValidationError};
pub use model::record::{Draft, Priority, Record, Status, Tone};
pub use query::{Breakdown, Counters};
pub use session::EditSession;
pub use store::{RecordStore, StorePolicy};
