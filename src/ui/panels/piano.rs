use crossbeam_channel::Sender;
use egui::Ui;

use crate::messaging::SynthMessage;
use crate::ui::components::{KeyEvent, PianoKeys};

/// Which satellite windows are open. Hidden windows keep their drag
/// controllers (and thus their positions) in the app, so they reopen where
/// they were left.
pub struct WindowToggles {
    pub oscillator: bool,
    pub visualizer: bool,
    pub songs: bool,
}

/// Content of the main piano window: volume slider, window toggles, and the
/// keyboard. Key events are returned to the app rather than sent directly,
/// because a manual press must interrupt the sequencer before the note
/// reaches the synth.
pub struct PianoPanel {
    keyboard: PianoKeys,
    sender: Sender<SynthMessage>,
}

impl PianoPanel {
    pub fn new(sender: Sender<SynthMessage>) -> Self {
        Self {
            keyboard: PianoKeys::new(),
            sender,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        volume: &mut f32,
        toggles: &mut WindowToggles,
    ) -> Option<KeyEvent> {
        ui.horizontal(|ui| {
            ui.label("Volume:");
            if ui
                .add(egui::Slider::new(volume, 0.0..=1.0).show_value(false))
                .changed()
            {
                self.sender.send(SynthMessage::SetVolume(*volume)).ok();
            }

            ui.separator();
            toggle_button(ui, &mut toggles.oscillator, "Oscillator");
            toggle_button(ui, &mut toggles.visualizer, "Visualizer");
            toggle_button(ui, &mut toggles.songs, "Songs");
        });

        ui.add_space(8.0);
        let event = self.keyboard.show(ui);
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.small("© 2024 Mac Piano");
        });
        event
    }
}

fn toggle_button(ui: &mut Ui, shown: &mut bool, name: &str) {
    let label = if *shown {
        format!("Hide {name}")
    } else {
        format!("Show {name}")
    };
    if ui.button(label).clicked() {
        *shown = !*shown;
    }
}
