//! Block-based signal processing - the stage abstraction of the effect chain
//!
//! A frame reinterpreted as a signal is processed as one long block. Every
//! unit owns whatever state it needs (delay lines, positions) and keeps it
//! between blocks, which is what turns per-frame processing into temporal
//! smear across frames.

/// Fixed rate at which frame samples are interpreted as audio
pub const SAMPLE_RATE: f32 = 44_100.0;

/// Context passed to every unit for one chain invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessContext {
    /// Tick number of the frame being processed (0-based)
    pub frame_no: u64,

    /// Frames in the session, or 0 for an open-ended live session
    pub total_frames: u64,

    /// Rate the signal is interpreted at (always [`SAMPLE_RATE`] here)
    pub sample_rate: f32,
}

impl ProcessContext {
    pub fn new(frame_no: u64, total_frames: u64) -> Self {
        Self {
            frame_no,
            total_frames,
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl Default for ProcessContext {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// One stage of the effect chain
///
/// Implementations read the whole input block and write a block of the
/// same length, updating private state as a side effect. State is never
/// rolled back or reset by the chain.
pub trait EffectUnit: Send {
    /// Process an entire block
    ///
    /// # Arguments
    /// * `input` - Normalized samples in [-1, 1]
    /// * `output` - Buffer of the same length to write results to
    /// * `context` - Frame counters and sample rate
    fn process_block(&mut self, input: &[f32], output: &mut [f32], context: &ProcessContext);

    /// Get a human-readable name for this unit (for logging)
    fn name(&self) -> &str {
        "EffectUnit"
    }
}
