/// Effect unit implementations
///
/// Concrete implementations of the [`EffectUnit`](crate::effect_unit::EffectUnit) trait.
///
/// - [`delay::DelayUnit`] - Feedback delay line (the default chain)
/// - [`identity::IdentityUnit`] - Pass-through
pub mod delay;
pub mod identity;
