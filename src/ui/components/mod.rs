mod piano_keys;
mod waveform_plot;
mod window_frame;

pub use piano_keys::{KeyEvent, PianoKeys};
pub use waveform_plot::WaveformPlot;
pub use window_frame::{WindowFrame, WindowFrameResponse};
