use egui::{
    pos2, vec2, Align2, Area, Color32, Context, CornerRadius, FontId, Id, Pos2, Rect, Sense,
    Stroke, StrokeKind, Ui,
};

use crate::core::drag::DragController;

const TITLE_BAR_HEIGHT: f32 = 24.0;
// Width of the traffic-light button cluster, excluded from the drag region.
const CONTROLS_WIDTH: f32 = 62.0;

pub struct WindowFrameResponse {
    /// New top-left position, reported whenever a drag moved the window.
    pub moved: Option<Pos2>,
}

/// Mac-style window chrome: a title bar with decorative traffic-light
/// buttons, a centered title, and a content area.
///
/// Dragging the title bar moves the window through its `DragController`;
/// the button cluster and the content area are excluded from the drag
/// region, so presses there behave normally. Pressing anywhere on the
/// window raises it above its siblings.
pub struct WindowFrame<'a> {
    title: &'a str,
    drag: &'a mut DragController,
    width: f32,
}

impl<'a> WindowFrame<'a> {
    pub fn new(title: &'a str, drag: &'a mut DragController) -> Self {
        Self {
            title,
            drag,
            width: 280.0,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn show<R>(
        self,
        ctx: &Context,
        add_contents: impl FnOnce(&mut Ui) -> R,
    ) -> WindowFrameResponse {
        let id = Id::new(("window_frame", self.title));
        let width = self.width;
        let title = self.title;
        let drag = self.drag;
        let mut moved = None;

        let area = Area::new(id)
            .movable(false)
            .fixed_pos(drag.position())
            .show(ctx, |ui| {
                ui.set_width(width);
                egui::Frame::new()
                    .fill(Color32::from_gray(238))
                    .stroke(Stroke::new(1.0, Color32::from_gray(110)))
                    .corner_radius(CornerRadius::same(6))
                    .show(ui, |ui| {
                        moved = Self::title_bar(ui, id, title, width, drag);
                        egui::Frame::new()
                            .inner_margin(egui::Margin::same(10))
                            .show(ui, add_contents);
                    });
            });

        // Pressing anywhere on the window brings it to the front.
        if ctx.input(|i| i.pointer.primary_pressed()) {
            if let Some(pointer) = ctx.input(|i| i.pointer.interact_pos()) {
                if area.response.rect.contains(pointer) {
                    ctx.move_to_top(area.response.layer_id);
                }
            }
        }

        WindowFrameResponse { moved }
    }

    fn title_bar(
        ui: &mut Ui,
        id: Id,
        title: &str,
        width: f32,
        drag: &mut DragController,
    ) -> Option<Pos2> {
        let (bar_rect, _) =
            ui.allocate_exact_size(vec2(width, TITLE_BAR_HEIGHT), Sense::hover());
        ui.painter().rect(
            bar_rect,
            CornerRadius {
                nw: 6,
                ne: 6,
                sw: 0,
                se: 0,
            },
            Color32::from_gray(215),
            Stroke::new(1.0, Color32::from_gray(160)),
            StrokeKind::Inside,
        );

        // Traffic lights. Decorative, but they still claim their clicks so a
        // press on them never starts a drag.
        let colors = [
            Color32::from_rgb(255, 95, 86),
            Color32::from_rgb(255, 189, 46),
            Color32::from_rgb(39, 201, 63),
        ];
        for (i, color) in colors.into_iter().enumerate() {
            let center = pos2(
                bar_rect.left() + 14.0 + i as f32 * 18.0,
                bar_rect.center().y,
            );
            let button_rect = Rect::from_center_size(center, vec2(12.0, 12.0));
            let response = ui.interact(button_rect, id.with(("control", i)), Sense::click());
            ui.painter().circle_filled(center, 6.0, color);
            if response.hovered() {
                ui.painter()
                    .circle_stroke(center, 6.0, Stroke::new(1.0, Color32::from_gray(90)));
            }
        }

        ui.painter().text(
            bar_rect.center(),
            Align2::CENTER_CENTER,
            title,
            FontId::proportional(13.0),
            Color32::from_gray(60),
        );

        // Only the bar to the right of the button cluster is draggable.
        let drag_rect = Rect::from_min_max(
            pos2(bar_rect.left() + CONTROLS_WIDTH, bar_rect.top()),
            bar_rect.max,
        );
        let response = ui.interact(drag_rect, id.with("drag"), Sense::drag());

        if response.drag_started() {
            if let Some(pointer) = response.interact_pointer_pos() {
                drag.begin(pointer);
            }
        }
        let mut moved = None;
        if response.dragged() {
            if let Some(pointer) = ui.ctx().pointer_latest_pos() {
                moved = drag.update(pointer);
            }
        }
        if response.drag_stopped() {
            drag.end();
        }
        // Losing the pointer entirely (e.g. it left the OS window with the
        // button released) also ends the gesture.
        if drag.is_dragging() && !ui.ctx().input(|i| i.pointer.any_down()) {
            drag.end();
        }

        moved
    }
}
