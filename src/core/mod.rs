pub mod channels;
pub mod config;
pub mod error;
pub mod frame_processor;
pub mod parameter;
