use crate::core::channels::ChannelConfig;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::parameter::{Parameter, SpatialParams};
use crate::spatial::engine::{Direction, SpatialEngine};
use crate::FrameProcessor;
use core::marker::PhantomData;

/// Cloneable handles an upstream position source writes the direction into.
#[derive(Clone, Debug)]
pub struct DirectionHandles {
    pub azimuth: Parameter,
    pub polar: Parameter,
}

impl DirectionHandles {
    pub fn set(&self, direction: Direction) {
        self.azimuth.set(direction.azimuth);
        self.polar.set(direction.polar);
    }

    pub fn get(&self) -> Direction {
        Direction::new(self.azimuth.get(), self.polar.get())
    }
}

/// Runs a [`SpatialEngine`] as a [`FrameProcessor`] inside an audio host.
///
/// The direction is read from [`DirectionHandles`] once per engine block. Host
/// buffers are processed in whole blocks of `block_length` frames; a trailing
/// partial block is silenced.
pub struct SpatialProcessor<C> {
    engine: SpatialEngine,
    direction: DirectionHandles,
    _channels: PhantomData<C>,
}

impl<C: ChannelConfig> SpatialProcessor<C> {
    /// Creates a processor at 44.1 kHz with default line lengths.
    ///
    /// # Arguments
    /// * `block_length` - Frames per engine block.
    /// * `initial` - Direction until the first update arrives.
    pub fn new(block_length: usize, initial: Direction) -> Result<Self> {
        let config = EngineConfig::new(C::num_channels(), 44100.0, block_length);
        Self::with_config(config, SpatialParams::default(), initial)
    }

    /// Creates a processor from a full configuration.
    ///
    /// `config.channels` is overridden by the channel layout `C`.
    pub fn with_config(
        config: EngineConfig,
        params: SpatialParams,
        initial: Direction,
    ) -> Result<Self> {
        let config = EngineConfig {
            channels: C::num_channels(),
            ..config
        };
        let engine = SpatialEngine::with_params(config, params)?;

        Ok(SpatialProcessor {
            engine,
            direction: DirectionHandles {
                azimuth: Parameter::new(initial.azimuth),
                polar: Parameter::new(initial.polar),
            },
            _channels: PhantomData,
        })
    }

    /// Handles for feeding the source direction from another thread.
    pub fn direction_handles(&self) -> DirectionHandles {
        self.direction.clone()
    }

    /// Handles for the engine's runtime parameters.
    pub fn params(&self) -> SpatialParams {
        self.engine.params()
    }

    pub fn engine(&self) -> &SpatialEngine {
        &self.engine
    }
}

impl<C: ChannelConfig> FrameProcessor<C> for SpatialProcessor<C> {
    fn process(&mut self, buffer: &mut [f32], _sample_index: u64) {
        let block_samples = self.engine.config().block_samples();
        let mut chunks = buffer.chunks_exact_mut(block_samples);

        for chunk in &mut chunks {
            let direction = self.direction.get();
            if let Err(err) = self.engine.process_in_place(chunk, direction) {
                tracing::warn!(%err, "spatial block dropped");
                chunk.fill(0.0);
            }
        }

        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            tracing::warn!(
                samples = remainder.len(),
                block_samples,
                "host buffer is not a whole number of blocks; silencing the tail"
            );
            remainder.fill(0.0);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let config = self.engine.config().with_sample_rate(sample_rate);
        match SpatialEngine::with_params(config, self.engine.params()) {
            Ok(engine) => self.engine = engine,
            Err(err) => tracing::warn!(%err, sample_rate, "keeping previous sample rate"),
        }
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn latency_samples(&self) -> u32 {
        self.engine.latency_samples()
    }

    fn name(&self) -> &str {
        "SpatialProcessor"
    }
}
