use crate::core::channels::{deinterleave, interleave};
use crate::core::config::{EngineConfig, MAX_VERTICAL_DELAY_MS};
use crate::core::error::{Result, SpatialError};
use crate::core::parameter::{ParamSnapshot, SpatialParams};
use crate::spatial::delay_line::MultiDelayLine;
use crate::spatial::filter::{
    directional_cutoff, CutoffRange, DirectionalLowPass, BYPASS_CUTOFF_HZ,
};
use crate::spatial::panning::{vertical_pan, PanInterpolator};
use alloc::vec;
use alloc::vec::Vec;
use core::f32::consts::PI;
use wide::f32x4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed attenuation applied to every input block before mixing.
pub const HEADROOM_GAIN: f32 = 0.7;

/// Direction of the source relative to the listener for one block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Direction {
    /// Horizontal angle in radians, nominally [0, 2π).
    pub azimuth: f32,
    /// Angle from the zenith in radians, nominally [0, π].
    pub polar: f32,
}

impl Direction {
    pub fn new(azimuth: f32, polar: f32) -> Self {
        Direction { azimuth, polar }
    }
}

/// Renders directional cues into a multichannel block.
///
/// Each call attenuates the input, runs it through a distance stage (delay line
/// plus horizontal panning) and a vertical stage (polar-dependent delay-and-add
/// with feedback), then smooths the result with a one-pole low-pass whose cutoff
/// drops for sources behind the listener. Delay memories, pan history and filter
/// state persist between calls.
///
/// Blocks are interleaved, `channels * block_length` samples long. All scratch
/// memory is allocated at construction; processing never allocates.
pub struct SpatialEngine {
    config: EngineConfig,
    params: SpatialParams,

    distance_line: MultiDelayLine,
    vertical_line: MultiDelayLine,
    pan: PanInterpolator,
    filter: DirectionalLowPass,

    attenuated: Vec<Vec<f32>>,
    distance_out: Vec<Vec<f32>>,
    vertical_out: Vec<Vec<f32>>,
    filtered: Vec<Vec<f32>>,

    last_cutoff: f32,
}

impl SpatialEngine {
    /// Creates an engine with default runtime parameters.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_params(config, SpatialParams::default())
    }

    /// Creates an engine that reads its runtime parameters from `params`.
    ///
    /// Keep a clone of `params` to adjust feedback and cutoff limits while the
    /// engine runs on another thread.
    pub fn with_params(config: EngineConfig, params: SpatialParams) -> Result<Self> {
        config.validate()?;

        let channels = config.channels;
        let frames = config.block_length;
        let distance_len = config.distance_line_len();
        let vertical_len = config.vertical_line_len();

        tracing::info!(
            channels,
            sample_rate = config.sample_rate,
            block_length = frames,
            distance_len,
            vertical_len,
            "spatial engine created"
        );

        Ok(SpatialEngine {
            config,
            params,
            distance_line: MultiDelayLine::new(channels, distance_len),
            vertical_line: MultiDelayLine::new(channels, vertical_len),
            pan: PanInterpolator::new(channels, config.pan_resolution()),
            filter: DirectionalLowPass::new(channels, config.sample_rate),
            attenuated: vec![vec![0.0; frames]; channels],
            distance_out: vec![vec![0.0; frames]; channels],
            vertical_out: vec![vec![0.0; frames]; channels],
            filtered: vec![vec![0.0; frames]; channels],
            last_cutoff: BYPASS_CUTOFF_HZ,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle to the runtime parameters. Clones share values with the engine.
    pub fn params(&self) -> SpatialParams {
        self.params.clone()
    }

    /// Cutoff frequency chosen during the most recent call.
    pub fn last_cutoff(&self) -> f32 {
        self.last_cutoff
    }

    /// Minimum delay through the engine: the read slot trails the write cursor by one.
    pub fn latency_samples(&self) -> u32 {
        1
    }

    /// Renders one block from `input` into `output`.
    ///
    /// Both buffers must hold exactly `channels * block_length` interleaved
    /// samples; otherwise nothing is processed and the engine state is unchanged.
    pub fn process(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: Direction,
    ) -> Result<()> {
        self.check_shape(input.len())?;
        self.check_shape(output.len())?;

        deinterleave(input, &mut self.attenuated);
        self.render(direction);
        interleave(&self.filtered, output);
        Ok(())
    }

    /// Renders one block in place.
    pub fn process_in_place(&mut self, block: &mut [f32], direction: Direction) -> Result<()> {
        self.check_shape(block.len())?;

        deinterleave(block, &mut self.attenuated);
        self.render(direction);
        interleave(&self.filtered, block);
        Ok(())
    }

    /// Clears delay lines, pan history and filter state.
    pub fn reset(&mut self) {
        self.distance_line.reset();
        self.vertical_line.reset();
        self.pan.reset();
        self.filter.reset();
        self.last_cutoff = BYPASS_CUTOFF_HZ;
    }

    fn check_shape(&self, got: usize) -> Result<()> {
        let expected = self.config.block_samples();
        if got != expected {
            tracing::warn!(expected, got, "rejecting block with wrong shape");
            return Err(SpatialError::ShapeMismatch { expected, got });
        }
        Ok(())
    }

    /// Runs the pipeline on `self.attenuated` (holding the raw planar input)
    /// and leaves the result in `self.filtered`.
    fn render(&mut self, direction: Direction) {
        let params = self.params.snapshot();

        for channel in &mut self.attenuated {
            apply_headroom(channel);
        }

        self.pan.begin_block(direction.azimuth);
        self.run_distance_stage();
        self.run_vertical_stage(direction.polar, &params);
        self.pan.end_block();

        let cutoff = directional_cutoff(
            direction.azimuth,
            direction.polar,
            self.pan.target(),
            vertical_pan(direction.polar),
            &CutoffRange {
                pan_division: params.pan_division,
                upper_hz: params.upper_cutoff_hz,
                lower_hz: params.lower_cutoff_hz,
            },
        );
        self.filter.process(
            &self.vertical_out,
            &mut self.filtered,
            self.config.block_length,
            cutoff,
        );
        self.last_cutoff = cutoff;

        tracing::trace!(
            azimuth = direction.azimuth,
            polar = direction.polar,
            cutoff,
            "rendered block"
        );
    }

    /// Stage 1: read the distance line, pan it, then store the raw attenuated input.
    fn run_distance_stage(&mut self) {
        let frames = self.config.block_length;
        // No distance model yet: the line is sized for one but read at zero delay.
        let delay = 0;

        for frame in 0..frames {
            let gains = self.pan.tick(frame, frames);
            let read_pos = self.distance_line.read_position(delay);
            let write_pos = self.distance_line.write_position();

            for (channel, &gain) in gains.iter().enumerate() {
                self.distance_out[channel][frame] =
                    self.distance_line.read(channel, read_pos) * gain;
                self.distance_line
                    .write(channel, write_pos, self.attenuated[channel][frame]);
            }
            self.distance_line.advance();
        }
    }

    /// Stage 2: delay-and-add on the vertical line with single-tap feedback.
    fn run_vertical_stage(&mut self, polar: f32, params: &ParamSnapshot) {
        let frames = self.config.block_length;
        let delay = vertical_delay_samples(polar, self.config.sample_rate);
        let feedback = params.vertical_feedback;

        for frame in 0..frames {
            let gains = self.pan.tick(frame, frames);
            let read_pos = self.vertical_line.read_position(delay);
            let write_pos = self.vertical_line.write_position();

            for (channel, &gain) in gains.iter().enumerate() {
                let direct = self.distance_out[channel][frame];
                let mixed = (self.vertical_line.read(channel, read_pos) + direct) * gain;
                self.vertical_out[channel][frame] = mixed;
                self.vertical_line
                    .write(channel, write_pos, direct + mixed * feedback);
            }
            self.vertical_line.advance();
        }
    }
}

/// Vertical delay in samples: `0.5 * polar / π` milliseconds, truncated.
///
/// Negative or NaN angles map to zero; the line clamps anything too long.
pub fn vertical_delay_samples(polar: f32, sample_rate: f32) -> usize {
    let delay_ms = MAX_VERTICAL_DELAY_MS * polar / PI;
    (delay_ms * sample_rate / 1000.0) as usize
}

fn apply_headroom(buffer: &mut [f32]) {
    let gain_vec = f32x4::splat(HEADROOM_GAIN);
    let (chunks, remainder) = buffer.as_chunks_mut::<4>();

    for chunk in chunks {
        let vec = f32x4::from(*chunk);
        *chunk = (vec * gain_vec).to_array();
    }

    for sample in remainder {
        *sample *= HEADROOM_GAIN;
    }
}
