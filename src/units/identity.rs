/// Identity unit - copies input to output
use crate::effect_unit::{EffectUnit, ProcessContext};

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityUnit;

impl EffectUnit for IdentityUnit {
    fn process_block(&mut self, input: &[f32], output: &mut [f32], _context: &ProcessContext) {
        output.copy_from_slice(input);
    }

    fn name(&self) -> &str {
        "IdentityUnit"
    }
}
