use crate::core::error::{Result, SpatialError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest vertical delay, in milliseconds, reached at a polar angle of π.
pub const MAX_VERTICAL_DELAY_MS: f32 = 0.5;

/// Construction-time settings of a [`SpatialEngine`](crate::spatial::engine::SpatialEngine).
///
/// Immutable once an engine is built. The defaults describe a stereo stream at
/// 44.1 kHz in 512-frame blocks with a 5 s distance line and a 5 ms vertical line.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub channels: usize,
    pub sample_rate: f32,
    /// Frames per call.
    pub block_length: usize,
    pub distance_line_ms: f32,
    pub vertical_line_ms: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            channels: 2,
            sample_rate: 44100.0,
            block_length: 512,
            distance_line_ms: 5000.0,
            vertical_line_ms: 5.0,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the default line durations.
    pub fn new(channels: usize, sample_rate: f32, block_length: usize) -> Self {
        EngineConfig {
            channels,
            sample_rate,
            block_length,
            ..Default::default()
        }
    }

    pub fn with_distance_line_ms(mut self, duration_ms: f32) -> Self {
        self.distance_line_ms = duration_ms;
        self
    }

    pub fn with_vertical_line_ms(mut self, duration_ms: f32) -> Self {
        self.vertical_line_ms = duration_ms;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Number of interleaved samples in one block.
    pub fn block_samples(&self) -> usize {
        self.channels * self.block_length
    }

    /// Distance line length in samples.
    pub fn distance_line_len(&self) -> usize {
        ms_to_samples(self.distance_line_ms, self.sample_rate)
    }

    /// Vertical line length in samples.
    pub fn vertical_line_len(&self) -> usize {
        ms_to_samples(self.vertical_line_ms, self.sample_rate)
    }

    /// Largest vertical delay, in samples, the polar mapping can request.
    pub fn max_vertical_delay(&self) -> usize {
        (MAX_VERTICAL_DELAY_MS * self.sample_rate / 1000.0) as usize
    }

    /// Number of samples between two pan interpolation updates.
    pub fn pan_resolution(&self) -> usize {
        self.block_length / 10 + 1
    }

    /// Checks every construction invariant.
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 || self.channels > 2 {
            return Err(SpatialError::UnsupportedChannels(self.channels));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SpatialError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_length == 0 {
            return Err(SpatialError::InvalidBlockLength(self.block_length));
        }
        check_line("distance", self.distance_line_ms, self.distance_line_len())?;
        check_line("vertical", self.vertical_line_ms, self.vertical_line_len())?;

        let length = self.vertical_line_len();
        let max_delay = self.max_vertical_delay();
        if length <= max_delay {
            return Err(SpatialError::VerticalLineTooShort { length, max_delay });
        }
        Ok(())
    }
}

fn check_line(line: &'static str, duration_ms: f32, len: usize) -> Result<()> {
    if !duration_ms.is_finite() || duration_ms <= 0.0 || len == 0 {
        return Err(SpatialError::InvalidLineDuration { line, duration_ms });
    }
    Ok(())
}

fn ms_to_samples(duration_ms: f32, sample_rate: f32) -> usize {
    (duration_ms as f64 * sample_rate as f64 / 1000.0) as usize
}
