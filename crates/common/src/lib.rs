//! Shared identifiers and value types for the explorer simulation.
//!
//! # Invariants
//! - Types here carry no behavior beyond construction, ordering and naming.

pub mod types;

pub use types::{CollectibleKind, EntityId, Pool};
