use crossbeam_channel::Sender;
use midir::{MidiInput, MidiInputConnection};

/// Key events from a hardware MIDI keyboard. These are manual triggers,
/// exactly like presses on the on-screen keys, so the app routes them
/// through the same interrupt-then-trigger path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { key: u8 },
    NoteOff { key: u8 },
}

/// Convert a MIDI key number to a frequency in Hz.
pub fn midi_note_to_freq(key: u8) -> f32 {
    440.0 * 2.0f32.powf((key as f32 - 69.0) / 12.0)
}

/// Connect to the first available MIDI input port, forwarding key events
/// to `sender`. Having no MIDI hardware is the normal case, not an error.
pub fn connect_first_input(sender: Sender<MidiEvent>) -> Option<MidiInputConnection<()>> {
    let midi_in = match MidiInput::new("mac-piano") {
        Ok(midi_in) => midi_in,
        Err(e) => {
            log::warn!("MIDI input unavailable: {e}");
            return None;
        }
    };

    let ports = midi_in.ports();
    let port = ports.first()?;
    let port_name = midi_in.port_name(port).unwrap_or_else(|_| "unknown".into());

    match midi_in.connect(
        port,
        "mac-piano-input",
        move |_stamp, message, _| {
            if message.len() < 3 {
                return;
            }
            let (status, key, velocity) = (message[0], message[1], message[2]);
            match status & 0xF0 {
                0x90 => {
                    if velocity > 0 {
                        sender.send(MidiEvent::NoteOn { key }).ok();
                    } else {
                        sender.send(MidiEvent::NoteOff { key }).ok();
                    }
                }
                0x80 => {
                    sender.send(MidiEvent::NoteOff { key }).ok();
                }
                _ => {}
            }
        },
        (),
    ) {
        Ok(connection) => {
            log::info!("connected to MIDI input '{port_name}'");
            Some(connection)
        }
        Err(e) => {
            log::warn!("failed to connect to MIDI input '{port_name}': {e}");
            None
        }
    }
}
