//! VMC message construction
//!
//! Addresses and argument shapes follow the VMC performer convention:
//! transforms are `name, x, y, z, qx, qy, qz, qw`, blend values are
//! `name, weight`, and the blend batch is committed by an argument-less
//! apply message.

use vmcast_core::{Quaternion, VmcastResult};
use vmcast_osc::{OscArg, OscMessage, OscSink};

pub const ADDR_OK: &str = "/VMC/Ext/OK";
pub const ADDR_TIME: &str = "/VMC/Ext/T";
pub const ADDR_ROOT_POS: &str = "/VMC/Ext/Root/Pos";
pub const ADDR_BONE_POS: &str = "/VMC/Ext/Bone/Pos";
pub const ADDR_TRACKER_POS: &str = "/VMC/Ext/Tra/Pos";
pub const ADDR_BLEND_VALUE: &str = "/VMC/Ext/Blend/Val";
pub const ADDR_BLEND_APPLY: &str = "/VMC/Ext/Blend/Apply";

/// Fixed name carried by every root transform
pub const ROOT_NAME: &str = "root";

/// VMC performer message sender over a best-effort sink
pub struct VmcSender<S: OscSink> {
    sink: S,
}

impl<S: OscSink> VmcSender<S> {
    pub fn new(sink: S) -> Self {
        VmcSender { sink }
    }

    /// Access the underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Liveness heartbeat, understood by old and new VMC receivers alike
    pub async fn send_ok(&self) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(ADDR_OK, vec![OscArg::Int(1)]))
            .await
    }

    /// Per-frame wall-clock stamp
    pub async fn send_time(&self, unix_secs: f64) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(
                ADDR_TIME,
                vec![OscArg::Float(unix_secs as f32)],
            ))
            .await
    }

    /// Root transform (fixed name "root")
    pub async fn send_root(&self, position: [f32; 3], rotation: Quaternion) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(
                ADDR_ROOT_POS,
                transform_args(ROOT_NAME, position, rotation),
            ))
            .await
    }

    /// Named bone transform
    pub async fn send_bone(
        &self,
        bone: &str,
        position: [f32; 3],
        rotation: Quaternion,
    ) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(
                ADDR_BONE_POS,
                transform_args(bone, position, rotation),
            ))
            .await
    }

    /// Tracker-channel copy of a bone transform
    pub async fn send_tracker(
        &self,
        name: &str,
        position: [f32; 3],
        rotation: Quaternion,
    ) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(
                ADDR_TRACKER_POS,
                transform_args(name, position, rotation),
            ))
            .await
    }

    /// One blendshape channel's weight
    pub async fn send_blend_value(&self, name: &str, weight: f32) -> VmcastResult<()> {
        self.sink
            .send(&OscMessage::with_args(
                ADDR_BLEND_VALUE,
                vec![OscArg::from(name), OscArg::Float(weight)],
            ))
            .await
    }

    /// Commit the blend values sent since the last apply
    pub async fn send_blend_apply(&self) -> VmcastResult<()> {
        self.sink.send(&OscMessage::new(ADDR_BLEND_APPLY)).await
    }
}

fn transform_args(name: &str, position: [f32; 3], rotation: Quaternion) -> Vec<OscArg> {
    vec![
        OscArg::from(name),
        OscArg::Float(position[0]),
        OscArg::Float(position[1]),
        OscArg::Float(position[2]),
        OscArg::Float(rotation.x),
        OscArg::Float(rotation.y),
        OscArg::Float(rotation.z),
        OscArg::Float(rotation.w),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmcast_osc::MemorySink;

    #[tokio::test]
    async fn test_heartbeat_shape() {
        let vmc = VmcSender::new(MemorySink::new());
        vmc.send_ok().await.unwrap();

        let sent = vmc.sink().take();
        assert_eq!(sent[0].address, ADDR_OK);
        assert_eq!(sent[0].args, vec![OscArg::Int(1)]);
    }

    #[tokio::test]
    async fn test_root_transform_shape() {
        let vmc = VmcSender::new(MemorySink::new());
        vmc.send_root([0.0, 0.008, 0.0], Quaternion::IDENTITY)
            .await
            .unwrap();

        let sent = vmc.sink().take();
        assert_eq!(sent[0].address, ADDR_ROOT_POS);
        assert_eq!(sent[0].args.len(), 8);
        assert_eq!(sent[0].args[0], OscArg::Str("root".into()));
        assert_eq!(sent[0].args[2], OscArg::Float(0.008));
        assert_eq!(sent[0].args[7], OscArg::Float(1.0));
    }

    #[tokio::test]
    async fn test_bone_and_tracker_share_shape() {
        let vmc = VmcSender::new(MemorySink::new());
        let q = Quaternion::from_euler_xyz(0.1, -0.05, 0.02);
        vmc.send_bone("Head", [0.0; 3], q).await.unwrap();
        vmc.send_tracker("Head", [0.0; 3], q).await.unwrap();

        let sent = vmc.sink().take();
        assert_eq!(sent[0].address, ADDR_BONE_POS);
        assert_eq!(sent[1].address, ADDR_TRACKER_POS);
        assert_eq!(sent[0].args, sent[1].args);
    }

    #[tokio::test]
    async fn test_blend_batch_shape() {
        let vmc = VmcSender::new(MemorySink::new());
        vmc.send_blend_value("Joy", 0.75).await.unwrap();
        vmc.send_blend_apply().await.unwrap();

        let sent = vmc.sink().take();
        assert_eq!(
            sent[0].args,
            vec![OscArg::Str("Joy".into()), OscArg::Float(0.75)]
        );
        assert_eq!(sent[1].address, ADDR_BLEND_APPLY);
        assert!(sent[1].args.is_empty());
    }
}
