//! Session clock
//!
//! The synthesis core runs on seconds-since-start from a monotonic clock.
//! Unix wall time is sampled separately, only for the `/VMC/Ext/T` stamp.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Smallest frame delta fed into smoothing, to keep `1/dt` finite
pub const MIN_FRAME_DT: f64 = 1e-6;

/// Monotonic clock anchored at process (session) start
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    /// Start the clock now
    pub fn start() -> Self {
        SessionClock {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock started
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Current unix time in seconds
pub fn unix_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_session_clock_advances() {
        let clock = SessionClock::start();
        let t1 = clock.elapsed_secs();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.elapsed_secs();

        assert!(t2 > t1);
    }

    #[test]
    fn test_unix_time_is_recent() {
        // Anything after 2020 counts as a sane wall clock.
        assert!(unix_time_secs() > 1_577_836_800.0);
    }
}
