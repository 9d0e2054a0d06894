/// Delay unit - feedback delay line with circular buffer
///
/// The line holds exactly `delay_samples` samples. Each step reads the
/// oldest sample, writes the input plus the fed-back delayed sample in its
/// place, and advances the write position. Buffer contents and position
/// persist across blocks, so a frame echoes into the frames after it.

use crate::effect_unit::{EffectUnit, ProcessContext};

/// Delay with feedback and wet/dry mix
///
/// # Example
/// ```
/// use noteframe::units::delay::DelayUnit;
///
/// // 1 second at 44.1kHz, 80% feedback, fully wet
/// let delay = DelayUnit::new(1.0, 0.8, 1.0, 44100.0);
/// assert_eq!(delay.delay_samples(), 44100);
/// ```
pub struct DelayUnit {
    buffer: Vec<f32>,   // Circular buffer, len == delay in samples
    write_pos: usize,   // Current write position
    samples_seen: u64,  // Running sample counter
    feedback: f32,      // Fraction of the delayed signal fed back into the line
    mix: f32,           // 0.0 = dry only, 1.0 = delayed only
}

impl DelayUnit {
    /// Delay of `delay_seconds` at `sample_rate`
    ///
    /// # Parameters
    /// - `delay_seconds`: Delay time in seconds (rounded to at least one sample)
    /// - `feedback`: Feedback coefficient, clamped to [0, 1)
    /// - `mix`: Wet proportion, clamped to [0, 1]
    /// - `sample_rate`: Sample rate in Hz (usually 44100.0)
    pub fn new(delay_seconds: f32, feedback: f32, mix: f32, sample_rate: f32) -> Self {
        let samples = (delay_seconds.max(0.0) * sample_rate).round() as usize;
        Self::with_samples(samples, feedback, mix)
    }

    /// Delay of an exact number of samples
    pub fn with_samples(delay_samples: usize, feedback: f32, mix: f32) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            samples_seen: 0,
            feedback: feedback.clamp(0.0, 0.999),
            mix: mix.clamp(0.0, 1.0),
        }
    }

    pub fn delay_samples(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position in the buffer
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// Total samples processed since construction
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }
}

impl EffectUnit for DelayUnit {
    fn process_block(&mut self, input: &[f32], output: &mut [f32], _context: &ProcessContext) {
        debug_assert_eq!(input.len(), output.len(), "Input buffer length mismatch");

        let buffer_len = self.buffer.len();
        let dry = 1.0 - self.mix;

        for (out, &x) in output.iter_mut().zip(input) {
            let delayed = self.buffer[self.write_pos];
            self.buffer[self.write_pos] = x + self.feedback * delayed;
            *out = self.mix * delayed + dry * x;

            self.write_pos += 1;
            if self.write_pos == buffer_len {
                self.write_pos = 0;
            }
        }

        self.samples_seen += input.len() as u64;
    }

    fn name(&self) -> &str {
        "DelayUnit"
    }
}
