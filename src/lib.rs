//! Lightweight directional rendering for multichannel audio blocks.
//!
//! A [`SpatialEngine`] takes an interleaved block plus the source direction
//! (azimuth and polar angle) and encodes horizontal and vertical cues with two
//! delay lines, amplitude panning and a direction-dependent low-pass filter.
//! [`SpatialProcessor`] wraps the engine as a [`FrameProcessor`] for realtime hosts.
#![no_std]

extern crate alloc;

pub mod core;
pub mod spatial;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{Result, SpatialError};
pub use crate::core::frame_processor::FrameProcessor;
pub use crate::core::parameter::{ParamSnapshot, Parameter, SpatialParams};
pub use crate::spatial::engine::{Direction, SpatialEngine};
pub use crate::spatial::processor::{DirectionHandles, SpatialProcessor};
