//! Fly camera controller.
//!
//! Three channels act on one [`FlyCamera`]: look (pointer motion while the
//! pointer is locked), movement (key events shift the target position) and
//! smoothing (once per frame the eye eases toward the target).
//!
//! # Invariants
//! - `front` is unit length after every update.
//! - `pitch` stays within `[-89, 89]` degrees.
//! - `position` approaches `target_position`; it is only assigned directly on construction.

mod fly;

pub use fly::{DEFAULT_SENSITIVITY, FlyCamera, MoveDirection, PITCH_LIMIT};

pub fn crate_info() -> &'static str {
    "dirtjam-camera v0.1.0"
}
