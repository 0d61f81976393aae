//! Input events and the actions they map to.
//!
//! # Invariants
//! - The host translates each native event into one [`InputEvent`], in arrival order.
//! - Camera and app logic consume [`Action`]s, never host event types.

pub mod action;

pub use action::{Action, InputEvent, Key, map_event};

pub fn crate_info() -> &'static str {
    "dirtjam-input v0.1.0"
}
