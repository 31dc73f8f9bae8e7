//! vmcast Runtime - The transmission loop
//!
//! One cooperative loop owns every piece of mutable state (blend tracker,
//! pose smoother, timers) and drives the synthesis components in a fixed
//! order each tick. There is no internal parallelism and no locking; the
//! only suspension point is the end-of-tick sleep.

pub mod config;
pub mod transmit;

pub use config::*;
pub use transmit::*;
