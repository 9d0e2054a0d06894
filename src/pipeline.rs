//! The per-tick effect boundary: chain, then composite over the original

use crate::compositor::{composite, DEFAULT_OPACITY};
use crate::effect_chain::SignalEffectChain;
use crate::effect_unit::ProcessContext;
use crate::frame::FrameBuffer;
use tracing::warn;

/// Run `frame` through `chain` and blend the result back over `frame`
///
/// `total_frames` is 0 for an open-ended session. The chain keeps its state
/// for the next call; the returned frame never feeds back into it.
pub fn process_image_array(
    chain: &mut SignalEffectChain,
    frame: &FrameBuffer,
    frame_no: u64,
    total_frames: u64,
) -> FrameBuffer {
    let context = ProcessContext::new(frame_no, total_frames);
    let processed = chain.process(frame, &context);
    blend_over(frame, &processed, frame_no)
}

/// Composite `processed` over `frame`, showing `frame` alone if they disagree
fn blend_over(frame: &FrameBuffer, processed: &FrameBuffer, frame_no: u64) -> FrameBuffer {
    match composite(frame, processed, DEFAULT_OPACITY) {
        Ok(out) => out,
        Err(e) => {
            warn!(frame_no, "Skipping effect composite: {}", e);
            frame.clone()
        }
    }
}
