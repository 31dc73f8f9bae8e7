//! Idle pose generator
//!
//! A standing avatar is never perfectly still. Four sinusoids with unrelated
//! frequencies give a breathing-like vertical bob and a slow head wander
//! that never visibly repeats.

/// Raw pose signal for one frame: root height offset plus head euler angles
/// in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseSample {
    pub root_y: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Procedural idle sway at time `t` (seconds since session start)
///
/// `strength` scales every field linearly; 0.0 is a statue, negative values
/// mirror the sway.
pub fn idle_pose(t: f64, strength: f32) -> PoseSample {
    let sway = |freq: f64, amplitude: f32| (t * freq).sin() as f32 * amplitude * strength;

    PoseSample {
        root_y: sway(1.30, 0.01),
        pitch: sway(1.10, 0.10),
        yaw: sway(0.75, 0.14),
        roll: sway(0.50, 0.06),
    }
}
