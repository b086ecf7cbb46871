use crossbeam_channel::Sender;
use egui::Ui;

use crate::core::oscillator::Waveform;
use crate::messaging::SynthMessage;
use crate::ui::components::WaveformPlot;

/// Oscillator window: a preview of the selected shape and a radio group to
/// change it. Changing shape while a note sounds retunes it in place.
pub struct OscillatorPanel {
    sender: Sender<SynthMessage>,
}

impl OscillatorPanel {
    pub fn new(sender: Sender<SynthMessage>) -> Self {
        Self { sender }
    }

    pub fn show(&mut self, ui: &mut Ui, waveform: &mut Waveform, current_frequency: Option<f32>) {
        WaveformPlot::new(waveform.preview_points(256))
            .height(80.0)
            .show(ui, "waveform_preview");

        ui.add_space(6.0);
        for shape in Waveform::ALL {
            if ui.radio_value(waveform, shape, shape.label()).changed() {
                self.sender.send(SynthMessage::SetWaveform(shape)).ok();
            }
        }

        ui.add_space(6.0);
        match current_frequency {
            Some(hz) => ui.small(format!("{hz:.2} Hz")),
            None => ui.small("Silent"),
        };
    }
}
