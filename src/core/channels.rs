use alloc::vec::Vec;

/// Marker type representing a Mono signal configuration (1 channel).
pub struct Mono;

/// Marker type representing a Stereo signal configuration (2 channels, interleaved).
pub struct Stereo;

/// Trait implemented by channel configurations.
pub trait ChannelConfig: Send + Sync {
    fn num_channels() -> usize;
}

impl ChannelConfig for Mono {
    #[inline(always)]
    fn num_channels() -> usize {
        1
    }
}

impl ChannelConfig for Stereo {
    #[inline(always)]
    fn num_channels() -> usize {
        2
    }
}

/// Splits an interleaved buffer into one buffer per channel.
///
/// `planar` must hold one buffer per channel, each at least
/// `interleaved.len() / planar.len()` samples long.
pub fn deinterleave(interleaved: &[f32], planar: &mut [Vec<f32>]) {
    let channels = planar.len();
    if channels == 1 {
        planar[0][..interleaved.len()].copy_from_slice(interleaved);
        return;
    }

    for (frame_idx, frame) in interleaved.chunks_exact(channels).enumerate() {
        for (channel, &sample) in planar.iter_mut().zip(frame) {
            channel[frame_idx] = sample;
        }
    }
}

/// Writes per-channel buffers back into an interleaved buffer.
pub fn interleave(planar: &[Vec<f32>], interleaved: &mut [f32]) {
    let channels = planar.len();
    if channels == 1 {
        let len = interleaved.len();
        interleaved.copy_from_slice(&planar[0][..len]);
        return;
    }

    for (frame_idx, frame) in interleaved.chunks_exact_mut(channels).enumerate() {
        for (sample, channel) in frame.iter_mut().zip(planar) {
            *sample = channel[frame_idx];
        }
    }
}
