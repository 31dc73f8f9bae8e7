//! Blink oscillator
//!
//! A real blink is fast (~100ms) and rare (every few seconds). The weight is
//! a triangular pulse at the start of each period: closed lids ramp in and
//! out within [`BLINK_WIDTH`], then the eyes stay open for the rest of
//! [`BLINK_PERIOD`].

/// Seconds between blink onsets
pub const BLINK_PERIOD: f64 = 3.2;

/// Duration of one full blink (close + open)
pub const BLINK_WIDTH: f64 = 0.11;

/// Blink weight in [0, 1] at time `t`; 1.0 means fully closed
pub fn blink_weight(t: f64) -> f32 {
    let phase = t.rem_euclid(BLINK_PERIOD);
    if phase < BLINK_WIDTH {
        let x = phase / BLINK_WIDTH;
        (1.0 - (x * 2.0 - 1.0).abs()) as f32
    } else {
        0.0
    }
}
