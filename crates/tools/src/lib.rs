//! Developer and presentation tooling: a read-only inspector that turns
//! simulation state into HUD values and effects into player-facing text.
//!
//! # Invariants
//! - Tools never mutate the simulation.

pub mod inspector;
pub mod messages;

pub use inspector::{Inspector, Readout};
pub use messages::message;

pub fn crate_info() -> &'static str {
    "explorer-tools v0.1.0"
}
