//! Horizontal and vertical pan laws, plus the interpolator that smooths
//! horizontal gain changes across a block.

use alloc::vec;
use alloc::vec::Vec;

/// Writes the horizontal gain of each channel for `azimuth` into `gains`.
///
/// Mono is always unity. For stereo, the channel on the facing side gets unity
/// and the other gets `|sin(azimuth)|`, switched on the sign of `cos(azimuth)`.
pub fn horizontal_pan(azimuth: f32, gains: &mut [f32]) {
    match gains.len() {
        1 => gains[0] = 1.0,
        2 => {
            let taper = libm::fabsf(libm::sinf(azimuth));
            if libm::cosf(azimuth) < 0.0 {
                gains[0] = 1.0;
                gains[1] = taper;
            } else {
                gains[0] = taper;
                gains[1] = 1.0;
            }
        }
        // no pan law beyond stereo; EngineConfig rejects it
        _ => gains.fill(0.0),
    }
}

/// Vertical pan scalar: 1.0 at the equator, 0.0 at the poles.
#[inline]
pub fn vertical_pan(polar: f32) -> f32 {
    libm::fabsf(libm::sinf(polar))
}

/// Smooths per-channel horizontal gains from one block's target to the next.
///
/// A single interpolator is shared by both pipeline stages: [`tick`](Self::tick)
/// is called once per frame in pipeline order (all of stage 1, then all of
/// stage 2) and the cadence counter is never reset between stages. Every
/// `resolution` ticks the applied gains are re-interpolated between the previous
/// block's target and this block's target; in between they are held.
pub struct PanInterpolator {
    previous: Vec<f32>,
    target: Vec<f32>,
    current: Vec<f32>,
    resolution: usize,
    counter: usize,
}

impl PanInterpolator {
    /// Creates an interpolator whose history starts at zero gain.
    ///
    /// # Arguments
    /// * `channels` - Number of gains tracked.
    /// * `resolution` - Ticks between re-interpolations (at least 1).
    pub fn new(channels: usize, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        PanInterpolator {
            previous: vec![0.0; channels],
            target: vec![0.0; channels],
            current: vec![0.0; channels],
            resolution,
            counter: resolution,
        }
    }

    /// Starts a block with a new target, computed from `azimuth`.
    ///
    /// The counter is primed so the first tick of the block re-interpolates.
    pub fn begin_block(&mut self, azimuth: f32) {
        horizontal_pan(azimuth, &mut self.target);
        self.counter = self.resolution;
    }

    /// Advances the cadence by one frame and returns the gains to apply to it.
    ///
    /// `frame` and `block_length` give the interpolation fraction
    /// `frame / block_length` when this tick lands on an update.
    #[inline]
    pub fn tick(&mut self, frame: usize, block_length: usize) -> &[f32] {
        if self.counter == self.resolution {
            let t = frame as f32 / block_length as f32;
            for ((current, &old), &new) in self
                .current
                .iter_mut()
                .zip(&self.previous)
                .zip(&self.target)
            {
                *current = (1.0 - t) * old + t * new;
            }
            self.counter = 0;
        }
        self.counter += 1;
        &self.current
    }

    /// Ends the block: the target becomes the starting point of the next one.
    pub fn end_block(&mut self) {
        self.previous.copy_from_slice(&self.target);
    }

    /// Target gains for the current block.
    pub fn target(&self) -> &[f32] {
        &self.target
    }

    /// Gains currently being applied.
    pub fn current(&self) -> &[f32] {
        &self.current
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn reset(&mut self) {
        self.previous.fill(0.0);
        self.target.fill(0.0);
        self.current.fill(0.0);
        self.counter = self.resolution;
    }
}
