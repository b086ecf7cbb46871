use std::time::Instant;

use egui::{Button, RichText, Ui};

use crate::core::sequencer::{NoteSink, Sequencer};

/// Songs window: the song display, the song list, and the transport row.
/// All commands go straight into the sequencer's transition functions.
pub fn show(ui: &mut Ui, sequencer: &mut Sequencer, now: Instant, sink: &mut impl NoteSink) {
    let title = sequencer
        .current_song()
        .map(|s| s.title)
        .unwrap_or("Select a Song");
    let status = if sequencer.is_playing() {
        if sequencer.is_paused() {
            "Paused"
        } else {
            "Now Playing..."
        }
    } else {
        "Ready to Play"
    };

    ui.vertical_centered(|ui| {
        ui.label(RichText::new(title).strong());
        ui.small(status);
    });
    ui.separator();

    let current = sequencer.current_song_index();
    let playing_now = sequencer.is_playing() && !sequencer.is_paused();
    for (i, song) in sequencer.songs().iter().enumerate() {
        let selected = current == Some(i);
        let label = if selected && playing_now {
            format!("{} ▶", song.title)
        } else {
            song.title.to_string()
        };
        if ui.selectable_label(selected, label).clicked() {
            sequencer.select_song(i, now, sink);
        }
    }

    ui.separator();
    ui.horizontal(|ui| {
        let loaded = current.is_some();
        if ui.add_enabled(loaded, Button::new("⏮")).clicked() {
            sequencer.previous(now, sink);
        }
        let pause_label = if sequencer.is_paused() { "▶" } else { "⏸" };
        if ui
            .add_enabled(loaded && sequencer.is_playing(), Button::new(pause_label))
            .clicked()
        {
            sequencer.toggle_pause(now, sink);
        }
        if ui.add_enabled(loaded, Button::new("⏭")).clicked() {
            sequencer.next(now, sink);
        }
    });
}
