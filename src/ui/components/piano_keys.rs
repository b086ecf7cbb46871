use egui::{pos2, vec2, Align2, Color32, CornerRadius, FontId, Rect, Sense, Stroke, Ui};

use crate::core::song::{keyboard_keys, KeyColor, PianoKey};

const WHITE_KEY_WIDTH: f32 = 34.0;
const WHITE_KEY_HEIGHT: f32 = 120.0;
const BLACK_KEY_WIDTH: f32 = 20.0;
const BLACK_KEY_HEIGHT: f32 = 72.0;

/// A change in which key is held down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyEvent {
    Pressed(f32),
    Released,
}

/// The on-screen keyboard: two octaves of white keys with black keys
/// overlaid. Reports presses and releases of the single held key; sliding
/// off a key while holding the button counts as a release, like the mouse
/// leaving a key in the original.
pub struct PianoKeys {
    keys: Vec<PianoKey>,
    held: Option<usize>,
}

impl PianoKeys {
    pub fn new() -> Self {
        Self {
            keys: keyboard_keys(),
            held: None,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<KeyEvent> {
        let white_count = self
            .keys
            .iter()
            .filter(|k| k.color == KeyColor::White)
            .count();
        let desired = vec2(white_count as f32 * WHITE_KEY_WIDTH, WHITE_KEY_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(desired, Sense::hover());

        // Lay the keys out left to right; a black key straddles the boundary
        // it precedes.
        let mut key_rects = Vec::with_capacity(self.keys.len());
        let mut x = rect.left();
        for key in &self.keys {
            match key.color {
                KeyColor::White => {
                    key_rects.push(Rect::from_min_size(
                        pos2(x, rect.top()),
                        vec2(WHITE_KEY_WIDTH, WHITE_KEY_HEIGHT),
                    ));
                    x += WHITE_KEY_WIDTH;
                }
                KeyColor::Black => {
                    key_rects.push(Rect::from_min_size(
                        pos2(x - BLACK_KEY_WIDTH / 2.0, rect.top()),
                        vec2(BLACK_KEY_WIDTH, BLACK_KEY_HEIGHT),
                    ));
                }
            }
        }

        let mut down = None;
        // White keys first, black keys after: widgets registered later win
        // the pointer, which makes the overlaid black keys clickable.
        for pass in [KeyColor::White, KeyColor::Black] {
            for (i, key) in self.keys.iter().enumerate() {
                if key.color != pass {
                    continue;
                }
                let key_rect = key_rects[i];
                let response = ui.interact(
                    key_rect,
                    ui.id().with(("piano_key", i)),
                    Sense::click_and_drag(),
                );
                let is_down = response.is_pointer_button_down_on() && response.contains_pointer();
                if is_down {
                    down = Some(i);
                }
                self.paint_key(ui, key, key_rect, is_down);
            }
        }

        if down == self.held {
            return None;
        }
        let event = match down {
            Some(i) => KeyEvent::Pressed(self.keys[i].frequency),
            None => KeyEvent::Released,
        };
        self.held = down;
        Some(event)
    }

    fn paint_key(&self, ui: &Ui, key: &PianoKey, rect: Rect, is_down: bool) {
        let painter = ui.painter();
        match key.color {
            KeyColor::White => {
                let fill = if is_down {
                    Color32::from_rgb(170, 205, 255)
                } else {
                    Color32::WHITE
                };
                painter.rect(
                    rect,
                    CornerRadius::ZERO,
                    fill,
                    Stroke::new(1.0, Color32::from_gray(100)),
                    egui::StrokeKind::Inside,
                );
                painter.text(
                    rect.center_bottom() - vec2(0.0, 10.0),
                    Align2::CENTER_CENTER,
                    &key.name,
                    FontId::proportional(10.0),
                    Color32::from_gray(120),
                );
            }
            KeyColor::Black => {
                let fill = if is_down {
                    Color32::from_gray(90)
                } else {
                    Color32::from_gray(20)
                };
                painter.rect(
                    rect,
                    CornerRadius {
                        nw: 0,
                        ne: 0,
                        sw: 3,
                        se: 3,
                    },
                    fill,
                    Stroke::new(1.0, Color32::from_gray(60)),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }
}

impl Default for PianoKeys {
    fn default() -> Self {
        Self::new()
    }
}
