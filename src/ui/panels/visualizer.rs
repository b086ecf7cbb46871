use std::sync::{Arc, RwLock};

use egui::{Color32, Ui};

use crate::core::analyzer::WAVEFORM_DISPLAY_POINTS;
use crate::core::Synth;
use crate::ui::components::WaveformPlot;

/// Visualizer window: an oscilloscope-style trace of the synth's recent
/// output, read from the analyzer buffer at frame rate.
pub struct VisualizerPanel {
    synth: Arc<RwLock<Synth>>,
}

impl VisualizerPanel {
    pub fn new(synth: Arc<RwLock<Synth>>) -> Self {
        Self { synth }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let points = match self.synth.read() {
            Ok(synth) => synth.analyzer.waveform_points(WAVEFORM_DISPLAY_POINTS),
            Err(_) => Vec::new(),
        };
        WaveformPlot::new(points)
            .height(150.0)
            .color(Color32::from_rgb(0, 255, 0))
            .show(ui, "output_trace");
    }
}
