use std::sync::{Arc, RwLock};

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::SynthMessage;
use crate::core::sequencer::NoteSink;
use crate::core::synth::Synth;

/// Carries messages from UI widgets and the MIDI callback to the engine.
/// Senders are cloned freely; the app drains the receiver once per frame.
pub struct MessageBus {
    sender: Sender<SynthMessage>,
    receiver: Receiver<SynthMessage>,
    synth_ref: Arc<RwLock<Synth>>,
}

impl MessageBus {
    pub fn new(synth: Arc<RwLock<Synth>>) -> Self {
        let (sender, receiver) = unbounded();
        MessageBus {
            sender,
            receiver,
            synth_ref: synth,
        }
    }

    /// Get a sender that can be cloned and handed to UI components.
    pub fn sender(&self) -> Sender<SynthMessage> {
        self.sender.clone()
    }

    pub fn send(&self, msg: SynthMessage) {
        self.sender.send(msg).ok();
    }

    /// Apply pending messages to the synth, at most `max_messages` per call
    /// to bound the work done in one frame.
    pub fn process_messages(&self, max_messages: usize) {
        let mut count = 0;
        while count < max_messages {
            let Ok(msg) = self.receiver.try_recv() else {
                break;
            };
            count += 1;
            self.handle_message(msg);
        }
    }

    fn handle_message(&self, msg: SynthMessage) {
        let Ok(mut synth) = self.synth_ref.write() else {
            return;
        };
        match msg {
            SynthMessage::NoteOn(frequency) => synth.trigger(frequency),
            SynthMessage::NoteOff => synth.stop(),
            SynthMessage::SetWaveform(waveform) => synth.set_waveform(waveform),
            SynthMessage::SetVolume(volume) => synth.set_volume(volume),
        }
    }
}

/// The sequencer's production note sink: forwards triggers onto the bus so
/// they reach the synth in the same order as everything else the UI sends.
pub struct ChannelSink {
    sender: Sender<SynthMessage>,
}

impl ChannelSink {
    pub fn new(sender: Sender<SynthMessage>) -> Self {
        Self { sender }
    }
}

impl NoteSink for ChannelSink {
    fn trigger(&mut self, frequency: f32) {
        self.sender.send(SynthMessage::NoteOn(frequency)).ok();
    }

    fn stop(&mut self) {
        self.sender.send(SynthMessage::NoteOff).ok();
    }
}
