//! Frames as signals: flatten, normalize, run the units, denormalize, reshape
//!
//! The chain is built once and handed to every tick by `&mut`. Unit state
//! is never reset between calls, so whatever a delay line holds at the end
//! of one frame is what the next frame is mixed with.

use crate::effect_unit::{EffectUnit, ProcessContext, SAMPLE_RATE};
use crate::frame::FrameBuffer;
use crate::units::delay::DelayUnit;
use tracing::debug;

/// Default delay time in seconds
pub const DEFAULT_DELAY_SECONDS: f32 = 1.0;
/// Default delay feedback
pub const DEFAULT_FEEDBACK: f32 = 0.8;
/// Default delay wet mix (fully wet)
pub const DEFAULT_MIX: f32 = 1.0;

/// Ordered list of effect units with persistent state
pub struct SignalEffectChain {
    units: Vec<Box<dyn EffectUnit>>,
    // Ping-pong buffers reused across invocations
    signal: Vec<f32>,
    scratch: Vec<f32>,
}

impl SignalEffectChain {
    pub fn new(units: Vec<Box<dyn EffectUnit>>) -> Self {
        Self {
            units,
            signal: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Chain with no units; only normalization and denormalization run
    pub fn identity() -> Self {
        Self::new(Vec::new())
    }

    /// The instrument's chain: one fully wet 1 s feedback delay at 44.1kHz
    pub fn default_chain() -> Self {
        Self::new(vec![Box::new(DelayUnit::new(
            DEFAULT_DELAY_SECONDS,
            DEFAULT_FEEDBACK,
            DEFAULT_MIX,
            SAMPLE_RATE,
        ))])
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Process a frame and return a new frame of the same geometry
    ///
    /// A frame with no pixels is returned as-is without touching the units.
    pub fn process(&mut self, frame: &FrameBuffer, context: &ProcessContext) -> FrameBuffer {
        if frame.is_empty() {
            return frame.clone();
        }

        normalize_into(frame.samples(), &mut self.signal);
        self.scratch.resize(self.signal.len(), 0.0);

        for unit in self.units.iter_mut() {
            unit.process_block(&self.signal, &mut self.scratch, context);
            std::mem::swap(&mut self.signal, &mut self.scratch);
        }

        debug!(
            frame_no = context.frame_no,
            samples = self.signal.len(),
            units = self.units.len(),
            "Processed frame through effect chain"
        );

        let mut out = frame.clone();
        denormalize_into(&self.signal, out.samples_mut());
        out
    }
}

impl Default for SignalEffectChain {
    fn default() -> Self {
        Self::default_chain()
    }
}

/// Rescale samples to [-1, 1]; a flat sequence becomes all zeros
pub fn normalize(samples: &[u8]) -> Vec<f32> {
    let mut signal = Vec::new();
    normalize_into(samples, &mut signal);
    signal
}

fn normalize_into(samples: &[u8], signal: &mut Vec<f32>) {
    signal.clear();
    let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
        return;
    };

    if min == max {
        signal.resize(samples.len(), 0.0);
        return;
    }

    let min = min as f32;
    let range = max as f32 - min;
    signal.extend(samples.iter().map(|&x| 2.0 * (x as f32 - min) / range - 1.0));
}

/// Map [-1, 1] back to bytes, rounding and clipping out-of-range samples
pub fn denormalize(signal: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0; signal.len()];
    denormalize_into(signal, &mut bytes);
    bytes
}

fn denormalize_into(signal: &[f32], bytes: &mut [u8]) {
    debug_assert_eq!(signal.len(), bytes.len());
    for (b, &s) in bytes.iter_mut().zip(signal) {
        *b = ((s + 1.0) * 0.5 * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::identity::IdentityUnit;

    #[test]
    fn test_normalize_range() {
        let signal = normalize(&[10, 20, 30]);
        assert_eq!(signal, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_normalize_flat_is_zero() {
        assert_eq!(normalize(&[77; 12]), vec![0.0; 12]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_denormalize_rounds_and_clips() {
        assert_eq!(denormalize(&[-1.0, 0.0, 1.0]), vec![0, 128, 255]);
        assert_eq!(denormalize(&[-3.0, 2.5, f32::NAN]), vec![0, 255, 0]);
    }

    #[test]
    fn test_default_chain_is_single_delay() {
        let chain = SignalEffectChain::default_chain();
        assert_eq!(chain.unit_names(), vec!["DelayUnit"]);
    }

    #[test]
    fn test_empty_frame_passes_through() {
        let mut chain = SignalEffectChain::default_chain();
        let frame = FrameBuffer::new(0, 0, [0, 0, 0]);
        let out = chain.process(&frame, &ProcessContext::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_identity_units_preserve_full_range_frame() {
        let mut chain = SignalEffectChain::new(vec![Box::new(IdentityUnit), Box::new(IdentityUnit)]);
        let samples: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).take(300).collect();
        let frame = FrameBuffer::from_samples(10, 10, samples).unwrap();
        let out = chain.process(&frame, &ProcessContext::default());
        assert_eq!(out, frame);
    }
}
