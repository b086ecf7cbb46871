use crate::core::oscillator::Waveform;

// Short linear ramps keep key presses from clicking.
const RAMP_SECONDS: f32 = 0.005;

/// The single sounding tone. Triggering a new note replaces the voice
/// outright; there is no polyphony.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    pub frequency: f32,
    phase: f32,
    level: f32,
    released: bool,
}

impl Voice {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            level: 0.0,
            released: false,
        }
    }

    /// Begin the release ramp. The voice keeps producing samples until the
    /// ramp reaches silence, then reports itself finished.
    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_finished(&self) -> bool {
        self.released && self.level <= 0.0
    }

    pub fn sample(&mut self, waveform: Waveform, sample_rate: f32) -> f32 {
        let ramp_step = 1.0 / (RAMP_SECONDS * sample_rate);
        if self.released {
            self.level = (self.level - ramp_step).max(0.0);
        } else {
            self.level = (self.level + ramp_step).min(1.0);
        }

        let value = waveform.sample(self.phase) * self.level;
        self.phase += self.frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }
}
