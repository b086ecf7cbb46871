mod oscillator;
mod piano;
pub mod songs;
mod visualizer;

pub use oscillator::OscillatorPanel;
pub use piano::{PianoPanel, WindowToggles};
pub use visualizer::VisualizerPanel;
