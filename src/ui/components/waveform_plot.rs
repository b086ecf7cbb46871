use egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

/// Fixed-frame line plot for waveform display, used by both the Oscillator
/// preview and the Visualizer trace.
pub struct WaveformPlot {
    points: Vec<[f32; 2]>,
    height: f32,
    color: Color32,
}

impl WaveformPlot {
    pub fn new(points: Vec<[f32; 2]>) -> Self {
        Self {
            points,
            height: 100.0,
            color: Color32::from_rgb(0, 188, 212),
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn show(self, ui: &mut Ui, id_source: impl std::hash::Hash) {
        let plot = Plot::new(id_source)
            .height(self.height)
            .show_x(false)
            .show_y(false)
            .include_y(-1.1)
            .include_y(1.1)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false);

        plot.show(ui, |plot_ui| {
            let points =
                PlotPoints::from_iter(self.points.iter().map(|[x, y]| [*x as f64, *y as f64]));
            plot_ui.line(Line::new(points).color(self.color));
        });
    }
}
