use std::collections::VecDeque;

pub const SAMPLE_BUFFER_SIZE: usize = 1024;
pub const WAVEFORM_DISPLAY_POINTS: usize = 200;

/// Ring buffer of recent output samples, feeding the Visualizer window.
/// Written from the audio callback, read by the UI at frame rate.
pub struct Analyzer {
    samples: VecDeque<f32>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_BUFFER_SIZE),
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == SAMPLE_BUFFER_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Downsample the buffer into `points` plot points in `[0, 1] x [-1, 1]`.
    /// An empty buffer yields a flat line.
    pub fn waveform_points(&self, points: usize) -> Vec<[f32; 2]> {
        let mut out = Vec::with_capacity(points);
        if self.samples.is_empty() {
            for i in 0..points {
                out.push([i as f32 / points as f32, 0.0]);
            }
            return out;
        }

        let step = self.samples.len() as f32 / points as f32;
        for i in 0..points {
            let pos = (i as f32 * step) as usize;
            if let Some(sample) = self.samples.get(pos) {
                out.push([i as f32 / points as f32, *sample]);
            }
        }
        out
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_bounded() {
        let mut analyzer = Analyzer::new();
        for i in 0..(SAMPLE_BUFFER_SIZE * 2) {
            analyzer.push(i as f32);
        }
        assert_eq!(analyzer.samples.len(), SAMPLE_BUFFER_SIZE);
        // Oldest samples were dropped.
        assert_eq!(analyzer.samples.front(), Some(&(SAMPLE_BUFFER_SIZE as f32)));
    }

    #[test]
    fn empty_buffer_plots_a_flat_line() {
        let analyzer = Analyzer::new();
        let points = analyzer.waveform_points(50);
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|[_, y]| *y == 0.0));
    }
}
