//! The directional rendering pipeline.
//!
//! [`engine`] drives the other modules once per block: the two
//! [`delay_line`]s, the shared [`panning`] interpolator and the
//! [`filter`] that muffles rear sources.

pub mod delay_line;
pub mod engine;
pub mod filter;
pub mod panning;
pub mod processor;
