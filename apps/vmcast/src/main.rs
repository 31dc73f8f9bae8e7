//! # vmcast
//!
//! Synthetic VMC performer: streams a plausible idle pose, blink and
//! expression over UDP/OSC so avatar renderers can be tested and demoed
//! without tracking hardware.
//!
//! ```bash
//! # Drive a local VSeeFace with the default happy idle
//! vmcast
//!
//! # Inspect your own packets through the diagnostic listener
//! vmcast --listen --mirror --verbose
//!
//! # Drive one exact blendshape key at half weight
//! vmcast --expr-key MyCustomBlend --intensity 0.5
//! ```

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use vmcast_motion::Expression;
use vmcast_protocol::VmcSender;
use vmcast_runtime::SenderConfig;
use vmcast_transport::{send_selftest, spawn_listener, UdpOscSender};

/// Synthetic VMC performer
#[derive(Parser, Debug)]
#[command(name = "vmcast")]
#[command(about = "Stream synthetic avatar motion over the VMC protocol", long_about = None)]
#[command(version)]
struct Cli {
    /// VMC receiver host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// VMC receiver port (VSeeFace default)
    #[arg(long, default_value_t = 39540)]
    port: u16,

    /// Target frame rate
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Expression preset (neutral, happy, anger, sad, fun, surprise)
    #[arg(long, default_value = "happy")]
    expr: String,

    /// Exact blendshape key to drive directly, bypassing presets
    #[arg(long, default_value = "")]
    expr_key: String,

    /// Expression/explicit-key weight
    #[arg(long, default_value_t = 1.0)]
    intensity: f32,

    /// Idle sway scale (0 = statue)
    #[arg(long, default_value_t = 1.0)]
    idle_strength: f32,

    /// Bone name carried by head transforms
    #[arg(long, default_value = "Head")]
    head_bone: String,

    /// Also send /VMC/Ext/Tra/Pos for the head bone
    #[arg(long)]
    send_tracker: bool,

    /// Emit a 1 Hz status line
    #[arg(long)]
    verbose: bool,

    /// Seconds to ease expressions/blinks
    #[arg(long, default_value_t = 0.25)]
    expr_smooth: f64,

    /// Seconds to ease head/root pose
    #[arg(long, default_value_t = 0.20)]
    pose_smooth: f64,

    /// Run the diagnostic listener
    #[arg(long)]
    listen: bool,

    /// Listener bind address
    #[arg(long, default_value = "0.0.0.0")]
    listen_ip: String,

    /// Listener port
    #[arg(long, default_value_t = 39541)]
    listen_port: u16,

    /// Fire one /SELFTEST packet at the listener port on startup
    #[arg(long)]
    selftest: bool,

    /// Mirror outgoing packets to the local listener
    #[arg(long)]
    mirror: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.listen {
        let addr: SocketAddr = format!("{}:{}", cli.listen_ip, cli.listen_port)
            .parse()
            .context("invalid listener address")?;
        spawn_listener(addr).await?;
    }

    if cli.selftest {
        send_selftest(cli.listen_port).await?;
        tracing::info!("self-test packet sent");
    }

    let primary = resolve(&cli.host, cli.port).await?;
    let mirror = cli
        .mirror
        .then(|| SocketAddr::from(([127, 0, 0, 1], cli.listen_port)));

    let expression = Expression::from_name(&cli.expr).unwrap_or_else(|| {
        tracing::warn!(expr = %cli.expr, "unknown expression preset, sending neutral");
        Expression::Neutral
    });
    let explicit_key = match cli.expr_key.trim() {
        "" => None,
        key => Some(key.to_string()),
    };

    tracing::info!(
        "sending to {primary} | expr={} | intensity={} | idle_strength={} | tracker={} | mirror={}",
        explicit_key.as_deref().unwrap_or_else(|| expression.name()),
        cli.intensity,
        cli.idle_strength,
        cli.send_tracker,
        cli.mirror,
    );

    let config = SenderConfig {
        fps: cli.fps,
        expression,
        explicit_key,
        intensity: cli.intensity,
        idle_strength: cli.idle_strength,
        head_bone: cli.head_bone,
        send_tracker: cli.send_tracker,
        verbose: cli.verbose,
        expr_smooth: cli.expr_smooth,
        pose_smooth: cli.pose_smooth,
    };

    let vmc = VmcSender::new(UdpOscSender::connect(primary, mirror).await?);
    vmcast_runtime::run(&vmc, config).await?;
    Ok(())
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("cannot resolve {host}:{port}"))?
        .next()
        .with_context(|| format!("no address for {host}:{port}"))
}
