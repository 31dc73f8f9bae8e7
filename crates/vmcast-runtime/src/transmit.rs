//! The transmission loop
//!
//! Per tick, in order: heartbeat check, timestamp, idle pose -> smoother ->
//! head quaternion, root/bone/tracker transforms, blend update -> one value
//! per channel -> apply, optional status line, sleep.
//!
//! All sends are best-effort; a transport error propagates out and ends the
//! process, since a dead transport leaves this tool nothing to do.

use vmcast_core::{unix_time_secs, Quaternion, SessionClock, VmcastResult, MIN_FRAME_DT};
use vmcast_motion::{
    blink_weight, idle_pose, smoothing_alpha, BlendTracker, ExpressionDrive, PoseSmoother,
};
use vmcast_osc::OscSink;
use vmcast_protocol::VmcSender;

use crate::SenderConfig;

/// Seconds between liveness heartbeats
pub const HEARTBEAT_INTERVAL: f64 = 2.0;

/// Seconds between verbose status lines
pub const STATUS_INTERVAL: f64 = 1.0;

/// All mutable per-tick state, owned by the loop and nothing else
pub struct FrameContext {
    config: SenderConfig,
    drive: ExpressionDrive,
    blend: BlendTracker,
    pose: PoseSmoother,
    last_tick: f64,
    next_heartbeat: f64,
    next_status: f64,
}

impl FrameContext {
    pub fn new(config: SenderConfig) -> Self {
        let drive = ExpressionDrive {
            expression: config.expression,
            explicit_key: config.explicit_key.clone(),
            intensity: config.intensity,
        };

        FrameContext {
            config,
            drive,
            blend: BlendTracker::new(),
            pose: PoseSmoother::new(),
            last_tick: 0.0,
            next_heartbeat: HEARTBEAT_INTERVAL,
            next_status: STATUS_INTERVAL,
        }
    }

    /// Run one tick at session time `t` (seconds since start)
    ///
    /// Times are injected so a whole run can be simulated without a clock or
    /// a socket.
    pub async fn step<S: OscSink>(
        &mut self,
        vmc: &VmcSender<S>,
        t: f64,
        unix_secs: f64,
    ) -> VmcastResult<()> {
        let frame_dt = (t - self.last_tick).max(MIN_FRAME_DT);
        self.last_tick = t;

        if t >= self.next_heartbeat {
            vmc.send_ok().await?;
            self.next_heartbeat = t + HEARTBEAT_INTERVAL;
        }

        vmc.send_time(unix_secs).await?;

        let raw = idle_pose(t, self.config.idle_strength);
        let pose_alpha = smoothing_alpha(frame_dt, self.config.pose_smooth);
        let smoothed = self.pose.advance(&raw, pose_alpha);
        let head = Quaternion::from_euler_xyz(smoothed.pitch, smoothed.yaw, smoothed.roll);

        vmc.send_root([0.0, smoothed.root_y, 0.0], Quaternion::IDENTITY)
            .await?;
        vmc.send_bone(&self.config.head_bone, [0.0; 3], head).await?;
        if self.config.send_tracker {
            vmc.send_tracker(&self.config.head_bone, [0.0; 3], head)
                .await?;
        }

        let blink = blink_weight(t);
        let expr_alpha = smoothing_alpha(frame_dt, self.config.expr_smooth);
        self.blend.update(&self.drive, blink, expr_alpha);
        for (name, weight) in self.blend.channels() {
            vmc.send_blend_value(name, weight).await?;
        }
        vmc.send_blend_apply().await?;

        if self.config.verbose && t >= self.next_status {
            let expr = self
                .drive
                .explicit_key
                .as_deref()
                .unwrap_or_else(|| self.config.expression.name());
            tracing::info!(
                "live t={t:6.2}s root_y={:+.4} expr={expr} blink={blink:.2}",
                raw.root_y
            );
            self.next_status = t + STATUS_INTERVAL;
        }

        Ok(())
    }
}

/// Drive the loop against the real clock until interrupted or a transport
/// error surfaces
///
/// Each tick ends in a fixed-delay sleep of one frame period, so sustained
/// processing overhead accumulates phase lag. Accepted for a diagnostic
/// tool; the stream stays smooth, it just slides.
pub async fn run<S: OscSink>(vmc: &VmcSender<S>, config: SenderConfig) -> VmcastResult<()> {
    let interval = config.frame_interval();
    let mut ctx = FrameContext::new(config);
    let clock = SessionClock::start();

    vmc.send_ok().await?;

    loop {
        ctx.step(vmc, clock.elapsed_secs(), unix_time_secs()).await?;
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmcast_osc::{MemorySink, OscArg, OscMessage};
    use vmcast_protocol::{
        ADDR_BLEND_APPLY, ADDR_BLEND_VALUE, ADDR_BONE_POS, ADDR_OK, ADDR_ROOT_POS,
        ADDR_TIME, ADDR_TRACKER_POS,
    };

    /// Simulate `seconds` of wall time at `fps`, mimicking `run`'s startup
    /// heartbeat, and return each tick's messages tagged with its `t`.
    async fn simulate(config: SenderConfig, seconds: f64, fps: u32) -> Vec<(f64, Vec<OscMessage>)> {
        let vmc = VmcSender::new(MemorySink::new());
        let mut ctx = FrameContext::new(config);
        let mut ticks = Vec::new();

        vmc.send_ok().await.unwrap();
        ticks.push((0.0, vmc.sink().take()));

        let steps = (seconds * fps as f64).round() as usize;
        for i in 0..steps {
            let t = i as f64 / fps as f64;
            ctx.step(&vmc, t, 1_700_000_000.0 + t).await.unwrap();
            ticks.push((t, vmc.sink().take()));
        }
        ticks
    }

    fn blend_value(messages: &[OscMessage], name: &str) -> f32 {
        let arg = messages
            .iter()
            .filter(|m| m.address == ADDR_BLEND_VALUE)
            .find(|m| m.args[0] == OscArg::Str(name.into()))
            .map(|m| m.args[1].clone())
            .unwrap_or_else(|| panic!("{name} not sent"));
        match arg {
            OscArg::Float(v) => v,
            other => panic!("unexpected weight {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_heartbeat_cadence_over_five_seconds() {
        for fps in [10u32, 30, 60] {
            let ticks = simulate(SenderConfig::default(), 5.0, fps).await;
            let dt = 1.0 / fps as f64;

            let ok_times: Vec<f64> = ticks
                .iter()
                .flat_map(|(t, msgs)| {
                    msgs.iter()
                        .filter(|m| m.address == ADDR_OK)
                        .map(move |_| *t)
                })
                .collect();

            assert_eq!(ok_times.len(), 3, "fps {fps}");
            for (sent, expected) in ok_times.iter().zip([0.0, 2.0, 4.0]) {
                assert!(
                    (sent - expected).abs() <= dt,
                    "fps {fps}: heartbeat at {sent}, wanted ~{expected}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_tick_message_order() {
        let config = SenderConfig {
            send_tracker: true,
            ..Default::default()
        };
        let ticks = simulate(config, 0.1, 30).await;
        let (_, first_tick) = &ticks[1];

        let addresses: Vec<&str> = first_tick.iter().map(|m| m.address.as_str()).collect();
        assert_eq!(addresses[0], ADDR_TIME);
        assert_eq!(addresses[1], ADDR_ROOT_POS);
        assert_eq!(addresses[2], ADDR_BONE_POS);
        assert_eq!(addresses[3], ADDR_TRACKER_POS);
        assert_eq!(
            addresses[4..addresses.len() - 1]
                .iter()
                .filter(|a| **a == ADDR_BLEND_VALUE)
                .count(),
            18
        );
        assert_eq!(*addresses.last().unwrap(), ADDR_BLEND_APPLY);
    }

    #[tokio::test]
    async fn test_tracker_disabled_by_default() {
        let ticks = simulate(SenderConfig::default(), 0.1, 30).await;
        let (_, first_tick) = &ticks[1];
        assert!(first_tick.iter().all(|m| m.address != ADDR_TRACKER_POS));
    }

    #[tokio::test]
    async fn test_first_tick_pose_is_neutral() {
        let ticks = simulate(SenderConfig::default(), 0.1, 30).await;
        let (_, first_tick) = &ticks[1];

        let root = first_tick
            .iter()
            .find(|m| m.address == ADDR_ROOT_POS)
            .unwrap();
        // idle_pose(0) is all zero, so the smoothed root stays at origin
        // with the identity rotation.
        assert_eq!(root.args[1..4], [0.0, 0.0, 0.0].map(OscArg::Float));
        assert_eq!(root.args[4..8], [0.0, 0.0, 0.0, 1.0].map(OscArg::Float));
    }

    #[tokio::test]
    async fn test_expression_snaps_with_zero_tau() {
        let config = SenderConfig {
            expression: vmcast_motion::Expression::Happy,
            expr_smooth: 0.0,
            ..Default::default()
        };
        let vmc = VmcSender::new(MemorySink::new());
        let mut ctx = FrameContext::new(config);

        // One tick a full second in: alpha saturates, blink is idle.
        ctx.step(&vmc, 1.0, 0.0).await.unwrap();
        let messages = vmc.sink().take();

        assert_eq!(blend_value(&messages, "Joy"), 1.0);
        assert_eq!(blend_value(&messages, "happy"), 1.0);
        assert_eq!(blend_value(&messages, "Angry"), 0.0);
        assert_eq!(blend_value(&messages, "Blink"), 0.0);
    }

    #[tokio::test]
    async fn test_explicit_key_end_to_end() {
        let config = SenderConfig {
            explicit_key: Some("MyCustomBlend".to_string()),
            intensity: 0.5,
            expr_smooth: 0.0,
            ..Default::default()
        };
        let vmc = VmcSender::new(MemorySink::new());
        let mut ctx = FrameContext::new(config);

        ctx.step(&vmc, 1.0, 0.0).await.unwrap();
        let messages = vmc.sink().take();

        assert_eq!(blend_value(&messages, "MyCustomBlend"), 0.5);
        assert_eq!(blend_value(&messages, "Joy"), 0.0);
        assert_eq!(blend_value(&messages, "happy"), 0.0);
        assert_eq!(
            messages
                .iter()
                .filter(|m| m.address == ADDR_BLEND_VALUE)
                .count(),
            19
        );
    }

    #[tokio::test]
    async fn test_timestamp_carries_unix_time() {
        let ticks = simulate(SenderConfig::default(), 0.1, 30).await;
        let (_, first_tick) = &ticks[1];

        let time = first_tick.iter().find(|m| m.address == ADDR_TIME).unwrap();
        assert!(matches!(time.args[0], OscArg::Float(v) if v > 1.69e9));
    }
}
