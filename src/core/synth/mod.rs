mod voice;

pub use voice::Voice;

use crate::core::analyzer::Analyzer;
use crate::core::oscillator::Waveform;

/// The audio engine: one oscillator voice, a master volume, and the
/// analyzer buffer behind the Visualizer window.
///
/// Shared between the UI thread and the audio callback behind an
/// `Arc<RwLock<_>>`; `get_sample` is called once per output frame.
pub struct Synth {
    pub sample_rate: f32,
    pub volume: f32,
    pub waveform: Waveform,
    voice: Option<Voice>,
    pub analyzer: Analyzer,
}

impl Synth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            volume: 0.7,
            waveform: Waveform::Sine,
            voice: None,
            analyzer: Analyzer::new(),
        }
    }

    /// Start sounding `frequency`, cutting over from any tone already
    /// sounding. Tones never stack.
    pub fn trigger(&mut self, frequency: f32) {
        self.voice = Some(Voice::new(frequency));
    }

    /// Silence the current tone, letting its release ramp ring out.
    pub fn stop(&mut self) {
        if let Some(voice) = &mut self.voice {
            voice.release();
        }
    }

    /// Changing the shape keeps the current note sounding at the new shape.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Frequency of the sounding tone, if any.
    pub fn current_frequency(&self) -> Option<f32> {
        self.voice
            .as_ref()
            .filter(|v| !v.is_finished())
            .map(|v| v.frequency)
    }

    /// Generate one output sample and record it for the visualizer.
    pub fn get_sample(&mut self) -> f32 {
        let value = match &mut self.voice {
            Some(voice) => voice.sample(self.waveform, self.sample_rate) * self.volume,
            None => 0.0,
        };
        if self.voice.as_ref().is_some_and(|v| v.is_finished()) {
            self.voice = None;
        }
        self.analyzer.push(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_replaces_the_sounding_tone() {
        let mut synth = Synth::new(44100.0);
        synth.trigger(261.63);
        assert_eq!(synth.current_frequency(), Some(261.63));

        synth.trigger(440.0);
        assert_eq!(synth.current_frequency(), Some(440.0));
    }

    #[test]
    fn stop_silences_after_the_release_ramp() {
        let mut synth = Synth::new(44100.0);
        synth.trigger(440.0);
        for _ in 0..1000 {
            synth.get_sample();
        }
        synth.stop();
        for _ in 0..1000 {
            synth.get_sample();
        }
        assert_eq!(synth.current_frequency(), None);
        assert_eq!(synth.get_sample(), 0.0);
    }

    #[test]
    fn stop_with_nothing_sounding_is_a_noop() {
        let mut synth = Synth::new(44100.0);
        synth.stop();
        assert_eq!(synth.current_frequency(), None);
    }

    #[test]
    fn waveform_change_keeps_the_note_sounding() {
        let mut synth = Synth::new(44100.0);
        synth.trigger(440.0);
        synth.set_waveform(Waveform::Square);
        assert_eq!(synth.current_frequency(), Some(440.0));
        assert_eq!(synth.waveform, Waveform::Square);
    }

    #[test]
    fn output_is_bounded_by_the_volume() {
        let mut synth = Synth::new(44100.0);
        synth.set_volume(0.5);
        synth.trigger(440.0);
        for _ in 0..5000 {
            let s = synth.get_sample();
            assert!(s.abs() <= 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn samples_feed_the_analyzer() {
        let mut synth = Synth::new(44100.0);
        synth.trigger(440.0);
        for _ in 0..500 {
            synth.get_sample();
        }
        let points = synth.analyzer.waveform_points(100);
        assert!(points.iter().any(|[_, y]| y.abs() > 0.0));
    }
}
