pub mod analyzer;
pub mod drag;
pub mod oscillator;
pub mod sequencer;
pub mod song;
pub mod synth;

pub use synth::Synth;
