use alloc::vec;
use alloc::vec::Vec;

/// A circular sample buffer per channel sharing one write cursor.
///
/// Every channel of a line advances together: one call to [`advance`](Self::advance)
/// per processed frame. Read positions are derived from the write cursor and a
/// delay, one slot behind the cursor so a read never sees a slot that has not
/// been written yet in this pass.
pub struct MultiDelayLine {
    buffers: Vec<Vec<f32>>,
    len: usize,
    write_pos: usize,
}

impl MultiDelayLine {
    /// Creates a zeroed line of `len` samples for each of `channels` channels.
    ///
    /// `len` must be at least 1; [`EngineConfig::validate`](crate::core::config::EngineConfig::validate)
    /// guarantees this for engine-owned lines.
    pub fn new(channels: usize, len: usize) -> Self {
        let len = len.max(1);
        MultiDelayLine {
            buffers: vec![vec![0.0; len]; channels],
            len,
            write_pos: 0,
        }
    }

    /// Line length in samples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// Read slot for a delay of `delay_samples`.
    ///
    /// Computes `(write - delay + len - 1) mod len`. Delays longer than the line
    /// are clamped to `len - 1`, the oldest slot.
    #[inline]
    pub fn read_position(&self, delay_samples: usize) -> usize {
        let delay = delay_samples.min(self.len - 1);
        (self.write_pos + self.len - 1 - delay) % self.len
    }

    #[inline]
    pub fn read(&self, channel: usize, position: usize) -> f32 {
        self.buffers[channel][position]
    }

    #[inline]
    pub fn write(&mut self, channel: usize, position: usize, sample: f32) {
        self.buffers[channel][position] = sample;
    }

    /// Moves the shared write cursor forward by one sample.
    #[inline]
    pub fn advance(&mut self) {
        self.write_pos = (self.write_pos + 1) % self.len;
    }

    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(line: &mut MultiDelayLine, channel: usize, sample: f32) {
        let pos = line.write_position();
        line.write(channel, pos, sample);
        line.advance();
    }

    #[test]
    fn test_zero_delay_reads_previous_write() {
        let mut line = MultiDelayLine::new(1, 4);
        assert_eq!(line.read(0, line.read_position(0)), 0.0);

        push(&mut line, 0, 1.0);
        assert_eq!(line.read(0, line.read_position(0)), 1.0);

        push(&mut line, 0, 2.0);
        assert_eq!(line.read(0, line.read_position(0)), 2.0);
        assert_eq!(line.read(0, line.read_position(1)), 1.0);
    }

    #[test]
    fn test_unwritten_slots_are_silent() {
        let mut line = MultiDelayLine::new(2, 8);
        push(&mut line, 0, 0.5);
        assert_eq!(line.read(0, line.read_position(5)), 0.0);
        assert_eq!(line.read(1, line.read_position(0)), 0.0);
    }

    #[test]
    fn test_wraparound_returns_value_from_one_line_ago() {
        let len = 5;
        let mut line = MultiDelayLine::new(1, len);

        // Three full passes plus a bit, so the cursor wraps several times.
        for n in 0..17 {
            let pos = line.read_position(len - 1);
            let oldest = line.read(0, pos);
            if n >= len {
                assert_eq!(oldest, (n - len) as f32);
            } else {
                assert_eq!(oldest, 0.0);
            }
            push(&mut line, 0, n as f32);
        }
        assert_eq!(line.write_position(), 17 % len);
    }

    #[test]
    fn test_read_position_stays_in_range() {
        let mut line = MultiDelayLine::new(1, 3);
        for _ in 0..7 {
            for delay in 0..10 {
                assert!(line.read_position(delay) < line.len());
            }
            line.advance();
        }
    }

    #[test]
    fn test_reset_clears_memory_and_cursor() {
        let mut line = MultiDelayLine::new(2, 4);
        push(&mut line, 1, 3.0);
        line.reset();
        assert_eq!(line.write_position(), 0);
        for pos in 0..4 {
            assert_eq!(line.read(1, pos), 0.0);
        }
    }
}
