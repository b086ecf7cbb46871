use std::f32::consts::PI;

/// Oscillator shapes selectable from the Oscillator window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Triangle => "Triangle",
        }
    }

    /// Sample the shape at `phase` in `[0, 1)`.
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    -4.0 + 4.0 * phase
                }
            }
        }
    }

    /// One cycle of the shape as plot points, for the waveform preview.
    pub fn preview_points(&self, samples: usize) -> Vec<[f32; 2]> {
        (0..samples)
            .map(|i| {
                let phase = i as f32 / samples as f32;
                [phase, self.sample(phase)]
            })
            .collect()
    }
}
