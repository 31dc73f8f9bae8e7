//! vmcast Protocol - VMC performer-side message surface
//!
//! The VMC protocol ("Virtual Motion Capture") is an OSC-over-UDP convention
//! for streaming avatar root/bone transforms and blendshape weights from a
//! performer application to a renderer. This crate covers exactly the
//! performer messages vmcast emits, layered over any [`vmcast_osc::OscSink`].

pub mod sender;

pub use sender::*;
