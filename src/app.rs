use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, Stream};
use crossbeam_channel::Receiver;
use eframe::egui;
use egui::{Color32, Pos2};

use crate::core::drag::DragController;
use crate::core::oscillator::Waveform;
use crate::core::sequencer::Sequencer;
use crate::core::Synth;
use crate::messaging::{ChannelSink, MessageBus, SynthMessage};
use crate::midi::{self, MidiEvent};
use crate::ui::components::{KeyEvent, WindowFrame};
use crate::ui::panels::{songs, OscillatorPanel, PianoPanel, VisualizerPanel, WindowToggles};

// Initial desktop layout, satellite windows to the right of the piano.
const PIANO_POS: Pos2 = Pos2::new(20.0, 20.0);
const OSCILLATOR_POS: Pos2 = Pos2::new(560.0, 20.0);
const VISUALIZER_POS: Pos2 = Pos2::new(560.0, 280.0);
const SONGS_POS: Pos2 = Pos2::new(560.0, 540.0);

pub struct PianoApp {
    synth: Arc<RwLock<Synth>>,
    bus: MessageBus,
    sink: ChannelSink,
    sequencer: Sequencer,
    _stream: Option<Stream>,
    _midi_connection: Option<midir::MidiInputConnection<()>>,
    midi_events: Receiver<MidiEvent>,

    waveform: Waveform,
    volume: f32,
    toggles: WindowToggles,

    piano_drag: DragController,
    oscillator_drag: DragController,
    visualizer_drag: DragController,
    songs_drag: DragController,

    piano_panel: PianoPanel,
    oscillator_panel: OscillatorPanel,
    visualizer_panel: VisualizerPanel,
}

impl PianoApp {
    pub fn new() -> Result<Self> {
        // A machine without audio output still gets a working app; every
        // trigger just lands in a synth nobody can hear.
        let (synth, stream) = match setup_audio() {
            Ok((synth, stream)) => (synth, Some(stream)),
            Err(e) => {
                log::warn!("audio output unavailable, running silent: {e:#}");
                (Arc::new(RwLock::new(Synth::new(44_100.0))), None)
            }
        };

        let bus = MessageBus::new(Arc::clone(&synth));
        let sink = ChannelSink::new(bus.sender());

        let (midi_tx, midi_rx) = crossbeam_channel::unbounded();
        let midi_connection = midi::connect_first_input(midi_tx);

        let (volume, waveform) = match synth.read() {
            Ok(synth) => (synth.volume, synth.waveform),
            Err(_) => (0.7, Waveform::Sine),
        };

        let piano_panel = PianoPanel::new(bus.sender());
        let oscillator_panel = OscillatorPanel::new(bus.sender());
        let visualizer_panel = VisualizerPanel::new(Arc::clone(&synth));

        Ok(Self {
            synth,
            bus,
            sink,
            sequencer: Sequencer::new(),
            _stream: stream,
            _midi_connection: midi_connection,
            midi_events: midi_rx,
            waveform,
            volume,
            toggles: WindowToggles {
                oscillator: true,
                visualizer: true,
                songs: true,
            },
            piano_drag: DragController::new(PIANO_POS),
            oscillator_drag: DragController::new(OSCILLATOR_POS),
            visualizer_drag: DragController::new(VISUALIZER_POS),
            songs_drag: DragController::new(SONGS_POS),
            piano_panel,
            oscillator_panel,
            visualizer_panel,
        })
    }

    fn handle_midi_events(&mut self) {
        while let Ok(event) = self.midi_events.try_recv() {
            match event {
                MidiEvent::NoteOn { key } => {
                    // A hardware key is a manual trigger: sequenced playback
                    // yields before the note sounds.
                    self.sequencer.interrupt(&mut self.sink);
                    self.bus
                        .send(SynthMessage::NoteOn(midi::midi_note_to_freq(key)));
                }
                MidiEvent::NoteOff { .. } => {
                    self.bus.send(SynthMessage::NoteOff);
                }
            }
        }
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(frequency) => {
                self.sequencer.interrupt(&mut self.sink);
                self.bus.send(SynthMessage::NoteOn(frequency));
            }
            KeyEvent::Released => {
                self.bus.send(SynthMessage::NoteOff);
            }
        }
    }
}

impl eframe::App for PianoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.handle_midi_events();

        // Desktop background behind the windows.
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(Color32::from_rgb(82, 110, 133)))
            .show(ctx, |_ui| {});

        let songs_were_shown = self.toggles.songs;
        let mut key_event = None;
        WindowFrame::new("Mac Piano", &mut self.piano_drag)
            .width(490.0)
            .show(ctx, |ui| {
                key_event = self
                    .piano_panel
                    .show(ui, &mut self.volume, &mut self.toggles);
            });
        if let Some(event) = key_event {
            self.handle_key_event(event);
        }
        // Closing the Songs window takes its playback with it, like
        // unmounting the original component did.
        if songs_were_shown && !self.toggles.songs {
            self.sequencer.stop(&mut self.sink);
        }

        if self.toggles.oscillator {
            let current_frequency = self
                .synth
                .read()
                .ok()
                .and_then(|synth| synth.current_frequency());
            let response = WindowFrame::new("Oscillator", &mut self.oscillator_drag)
                .width(240.0)
                .show(ctx, |ui| {
                    self.oscillator_panel
                        .show(ui, &mut self.waveform, current_frequency);
                });
            if let Some(pos) = response.moved {
                log::trace!("oscillator window moved to {pos:?}");
            }
        }

        if self.toggles.visualizer {
            WindowFrame::new("Waveform", &mut self.visualizer_drag)
                .width(320.0)
                .show(ctx, |ui| {
                    self.visualizer_panel.show(ui);
                });
        }

        if self.toggles.songs {
            WindowFrame::new("Songs", &mut self.songs_drag)
                .width(260.0)
                .show(ctx, |ui| {
                    songs::show(ui, &mut self.sequencer, now, &mut self.sink);
                });
        }

        // Fire any due playback step, then apply everything this frame
        // queued for the synth.
        self.sequencer.tick(now, &mut self.sink);
        self.bus.process_messages(64);

        // Keep ticking: the sequencer and the visualizer both advance with
        // wall time, not with input events. Wake up no later than the next
        // note boundary.
        if let Some(deadline) = self.sequencer.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

fn setup_audio() -> Result<(Arc<RwLock<Synth>>, Stream)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no output device available"))?;
    log::info!("using output device {:?}", device.name());

    let config = device.default_output_config()?;
    let sample_format = config.sample_format();
    let config = cpal::StreamConfig::from(config);
    let sample_rate = config.sample_rate.0 as f32;
    log::info!("output sample rate {sample_rate}");

    let synth = Arc::new(RwLock::new(Synth::new(sample_rate)));

    let stream = match sample_format {
        SampleFormat::F32 => create_stream::<f32>(&device, &config, Arc::clone(&synth)),
        SampleFormat::I16 => create_stream::<i16>(&device, &config, Arc::clone(&synth)),
        SampleFormat::U16 => create_stream::<u16>(&device, &config, Arc::clone(&synth)),
        _ => anyhow::bail!("unsupported sample format {sample_format:?}"),
    }?;

    stream.play()?;
    Ok((synth, stream))
}

fn create_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    synth: Arc<RwLock<Synth>>,
) -> Result<Stream>
where
    T: Sample + Send + 'static + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    let err_fn = |err| log::error!("audio stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = match synth.write() {
                    Ok(mut guard) => guard.get_sample(),
                    Err(_) => 0.0,
                };
                let value_t = T::from_sample(value);
                for sample in frame.iter_mut() {
                    *sample = value_t;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
