use crate::core::channels::ChannelConfig;
use alloc::boxed::Box;

/// The core trait for block-based audio processors.
///
/// Implementors process an interleaved block of samples in place.
/// The generic parameter `C` defines the channel configuration (Mono/Stereo).
pub trait FrameProcessor<C: ChannelConfig> {
    /// Processes a block of audio samples.
    ///
    /// # Arguments
    /// * `buffer` - The interleaved audio buffer to process (in-place).
    /// * `sample_index` - The global frame index of the start of the block.
    fn process(&mut self, buffer: &mut [f32], sample_index: u64);

    /// Sets the sample rate.
    ///
    /// Should be called before processing starts or when sample rate changes.
    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    /// Clears all internal state (delay memories, filter history).
    fn reset(&mut self) {}

    /// Returns the latency of the processor in samples.
    ///
    /// Used for delay compensation.
    fn latency_samples(&self) -> u32 {
        0
    }

    /// Returns the name of the processor.
    fn name(&self) -> &str {
        ""
    }
}

impl<C: ChannelConfig, T: FrameProcessor<C> + ?Sized> FrameProcessor<C> for Box<T> {
    fn process(&mut self, buffer: &mut [f32], sample_index: u64) {
        (**self).process(buffer, sample_index);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        (**self).set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> u32 {
        (**self).latency_samples()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
