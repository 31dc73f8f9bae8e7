//! vmcast Motion - Procedural motion and expression synthesis
//!
//! This is NOT motion capture. It synthesizes a plausible performer from
//! nothing but wall-clock time:
//!
//! - Idle pose: four independent sinusoids sway the root and head
//! - Blink: a short triangular pulse recurring every few seconds
//! - Blend state: per-channel expression weights eased toward targets
//! - Pose smoother: frame-rate-independent low-pass over the raw pose
//!
//! Everything here is either a pure function of time or state owned by the
//! caller and mutated through `&mut` once per frame.

pub mod blend;
pub mod blink;
pub mod idle;
pub mod smooth;

pub use blend::*;
pub use blink::*;
pub use idle::*;
pub use smooth::*;
