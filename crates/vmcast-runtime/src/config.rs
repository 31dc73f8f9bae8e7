//! Transmission loop configuration

use std::time::Duration;

use vmcast_motion::Expression;

/// Everything the loop needs to know, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Target tick rate
    pub fps: u32,
    /// Expression preset driven when no explicit key is set
    pub expression: Expression,
    /// Exact blendshape key to drive directly
    pub explicit_key: Option<String>,
    /// Expression/explicit-key target weight
    pub intensity: f32,
    /// Idle sway scale
    pub idle_strength: f32,
    /// Bone name carried by head transforms
    pub head_bone: String,
    /// Also mirror the head transform on the tracker channel
    pub send_tracker: bool,
    /// Emit the 1 Hz status line
    pub verbose: bool,
    /// Expression/blink smoothing time constant (seconds)
    pub expr_smooth: f64,
    /// Head/root pose smoothing time constant (seconds)
    pub pose_smooth: f64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            fps: 30,
            expression: Expression::Happy,
            explicit_key: None,
            intensity: 1.0,
            idle_strength: 1.0,
            head_bone: "Head".to_string(),
            send_tracker: false,
            verbose: false,
            expr_smooth: 0.25,
            pose_smooth: 0.20,
        }
    }
}

impl SenderConfig {
    /// Target tick period (`1/fps`, with fps floored at 1)
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
