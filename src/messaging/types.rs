use crate::core::oscillator::Waveform;

/// Messages from the UI and MIDI input into the audio engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynthMessage {
    /// Start sounding a tone at the given frequency in Hz, replacing any
    /// tone currently sounding.
    NoteOn(f32),
    /// Silence the sounding tone, if any.
    NoteOff,
    SetWaveform(Waveform),
    SetVolume(f32),
}
