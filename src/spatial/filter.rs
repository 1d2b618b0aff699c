use alloc::vec;
use alloc::vec::Vec;
use core::f32::consts::{PI, TAU};

/// Cutoff used for every direction outside the rear hemisphere.
pub const BYPASS_CUTOFF_HZ: f32 = 20000.0;

/// Limits and divisor of the rear cutoff formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffRange {
    pub pan_division: f32,
    pub upper_hz: f32,
    pub lower_hz: f32,
}

/// Chooses the low-pass cutoff for a direction.
///
/// Sources behind the listener (`azimuth` in (π, 2π), `polar` strictly between
/// the poles) are muffled more the further they sit from the facing side and
/// from the equator:
/// `((1 - Π gains) + (1 - vertical_pan)) / pan_division * upper + lower`.
/// Everything else gets [`BYPASS_CUTOFF_HZ`].
///
/// `gains` are the block's target horizontal gains; their product is taken
/// over all channels, so mono contributes no horizontal term.
pub fn directional_cutoff(
    azimuth: f32,
    polar: f32,
    gains: &[f32],
    vertical_pan: f32,
    range: &CutoffRange,
) -> f32 {
    let behind = azimuth > PI && azimuth < TAU;
    let off_pole = polar > 0.0 && polar < PI;

    if behind && off_pole {
        let balance: f32 = gains.iter().product();
        ((1.0 - balance) + (1.0 - vertical_pan)) / range.pan_division * range.upper_hz
            + range.lower_hz
    } else {
        BYPASS_CUTOFF_HZ
    }
}

/// One-pole smoothing coefficient `dt / (RC + dt)` for `cutoff_hz`.
#[inline]
pub fn one_pole_alpha(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let rc = 1.0 / (TAU * cutoff_hz);
    let dt = 1.0 / sample_rate;
    dt / (rc + dt)
}

/// A bank of one-pole low-pass filters, one per channel.
///
/// The cutoff is chosen once per block; the last output of each channel is kept
/// so the next block continues the same exponential trajectory.
pub struct DirectionalLowPass {
    state: Vec<f32>,
    sample_rate: f32,
}

impl DirectionalLowPass {
    pub fn new(channels: usize, sample_rate: f32) -> Self {
        DirectionalLowPass {
            state: vec![0.0; channels],
            sample_rate,
        }
    }

    /// Filters `input[ch]` into `output[ch]` for every channel at `cutoff_hz`.
    pub fn process(
        &mut self,
        input: &[Vec<f32>],
        output: &mut [Vec<f32>],
        len: usize,
        cutoff_hz: f32,
    ) {
        let alpha = one_pole_alpha(cutoff_hz, self.sample_rate);

        for ((state, src), dst) in self.state.iter_mut().zip(input).zip(output.iter_mut()) {
            let mut y = *state;
            for (x, out) in src[..len].iter().zip(dst[..len].iter_mut()) {
                y += alpha * (*x - y);
                *out = y;
            }
            *state = y;
        }
    }

    /// Last output sample of each channel.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const RANGE: CutoffRange = CutoffRange {
        pan_division: 4.0,
        upper_hz: 40000.0,
        lower_hz: 300.0,
    };

    #[test]
    fn test_front_sources_bypass() {
        for polar in [0.0, 0.3, FRAC_PI_2, 3.0, PI] {
            let cutoff = directional_cutoff(FRAC_PI_2, polar, &[1.0, 1.0], 1.0, &RANGE);
            assert_eq!(cutoff, BYPASS_CUTOFF_HZ);
        }
        assert_eq!(
            directional_cutoff(PI, FRAC_PI_2, &[1.0, 0.0], 1.0, &RANGE),
            BYPASS_CUTOFF_HZ
        );
    }

    #[test]
    fn test_poles_bypass_even_behind() {
        let azimuth = 5.0 * FRAC_PI_4;
        assert_eq!(
            directional_cutoff(azimuth, 0.0, &[1.0, 0.5], 0.0, &RANGE),
            BYPASS_CUTOFF_HZ
        );
        assert_eq!(
            directional_cutoff(azimuth, PI, &[1.0, 0.5], 0.0, &RANGE),
            BYPASS_CUTOFF_HZ
        );
    }

    #[test]
    fn test_rear_cutoff_formula() {
        let azimuth = 5.0 * FRAC_PI_4;
        let cutoff = directional_cutoff(azimuth, FRAC_PI_2, &[1.0, 0.5], 1.0, &RANGE);
        // ((1 - 0.5) + 0) / 4 * 40000 + 300
        assert!((cutoff - 5300.0).abs() < 1e-2);

        let cutoff = directional_cutoff(azimuth, 1.0, &[1.0, 1.0], 0.5, &RANGE);
        assert!((cutoff - 5300.0).abs() < 1e-2);

        let cutoff = directional_cutoff(azimuth, FRAC_PI_2, &[1.0, 1.0], 1.0, &RANGE);
        assert!((cutoff - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_mono_has_no_horizontal_term() {
        let cutoff = directional_cutoff(4.0, FRAC_PI_2, &[1.0], 1.0, &RANGE);
        assert!((cutoff - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_matches_rc_form() {
        let alpha = one_pole_alpha(1000.0, 48000.0);
        let rc = 1.0 / (2.0 * PI * 1000.0);
        let dt = 1.0 / 48000.0;
        assert!((alpha - dt / (rc + dt)).abs() < 1e-7);
        assert!(one_pole_alpha(300.0, 44100.0) < one_pole_alpha(BYPASS_CUTOFF_HZ, 44100.0));
    }

    #[test]
    fn test_zero_in_zero_out() {
        let mut filter = DirectionalLowPass::new(2, 44100.0);
        let input = vec![vec![0.0; 16]; 2];
        let mut output = vec![vec![1.0; 16]; 2];
        filter.process(&input, &mut output, 16, 300.0);
        assert!(output.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_state_carries_across_blocks() {
        let sample_rate = 44100.0;
        let cutoff = 2000.0;
        let signal: Vec<f32> = (0..64).map(|n| libm::sinf(n as f32 * 0.37) + 0.25).collect();

        // Reference: one pass over the whole signal.
        let alpha = one_pole_alpha(cutoff, sample_rate);
        let mut reference = vec![0.0; signal.len()];
        let mut prev = 0.0;
        for (n, &x) in signal.iter().enumerate() {
            reference[n] = prev + alpha * (x - prev);
            prev = reference[n];
        }

        // Same signal in four blocks through one filter instance.
        let mut filter = DirectionalLowPass::new(1, sample_rate);
        let mut blocked = Vec::new();
        for chunk in signal.chunks(16) {
            let input = vec![chunk.to_vec()];
            let mut output = vec![vec![0.0; 16]];
            filter.process(&input, &mut output, 16, cutoff);
            blocked.extend_from_slice(&output[0]);
        }

        assert_eq!(blocked, reference);
        assert_eq!(filter.state()[0], reference[63]);
    }

    #[test]
    fn test_step_response_settles() {
        let mut filter = DirectionalLowPass::new(1, 44100.0);
        let input = vec![vec![1.0; 512]];
        let mut output = vec![vec![0.0; 512]];
        filter.process(&input, &mut output, 512, 1000.0);
        assert!(output[0][0] > 0.0 && output[0][0] < 0.2);
        assert!(output[0][511] > 0.99);

        filter.reset();
        assert_eq!(filter.state(), &[0.0]);
    }
}
