//! Input: raw key and pointer events mapped to actions and sampled once per tick.
//!
//! # Invariants
//! - The simulation consumes `InputSnapshot`s, never raw events.
//! - Edge actions (jump, interact) fire once per press and are cleared on sample.
//! - Look delta is accumulated between samples and cleared on sample.

pub mod action;
pub mod collector;
pub mod snapshot;

pub use action::{Action, Key};
pub use collector::{DEFAULT_LOOK_SENSITIVITY, InputCollector};
pub use snapshot::{InputSnapshot, LookDelta};

pub fn crate_info() -> &'static str {
    "explorer-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
