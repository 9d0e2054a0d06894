//! Additive blend of the effect output over the rendered frame

use crate::error::{NoteFrameError, Result};
use crate::frame::FrameBuffer;

/// Opacity used by the instrument (alpha 128 of 255)
pub const DEFAULT_OPACITY: f32 = 128.0 / 255.0;

/// `clip(base + opacity * effect, 0, 255)` per channel
///
/// Both frames must have the same geometry.
pub fn composite(base: &FrameBuffer, effect_output: &FrameBuffer, opacity: f32) -> Result<FrameBuffer> {
    if base.width() != effect_output.width() || base.height() != effect_output.height() {
        return Err(NoteFrameError::FrameGeometry {
            expected: base.samples().len(),
            actual: effect_output.samples().len(),
        });
    }

    let opacity = opacity.clamp(0.0, 1.0);
    let mut out = base.clone();
    for (dst, &fx) in out.samples_mut().iter_mut().zip(effect_output.samples()) {
        let sum = *dst as f32 + opacity * fx as f32;
        *dst = sum.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}
