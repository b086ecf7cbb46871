use egui::{Pos2, Vec2};

/// Transient state of an in-progress drag gesture. The grab offset is
/// captured once at gesture start and never recomputed mid-gesture.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    grab_offset: Vec2,
}

/// Positions a window by pointer drag.
///
/// The controller owns the window's top-left position. While a session is
/// active, every pointer move recomputes the position as
/// `pointer - grab_offset`, with no clamping to the viewport; a window may
/// be dragged partially or fully off-screen.
#[derive(Debug)]
pub struct DragController {
    position: Pos2,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(initial: Pos2) -> Self {
        Self {
            position: initial,
            session: None,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag with the pointer at `pointer`. Ignored if a session is
    /// already active, so a second press cannot re-anchor the gesture.
    pub fn begin(&mut self, pointer: Pos2) {
        if self.session.is_none() {
            self.session = Some(DragSession {
                grab_offset: pointer - self.position,
            });
        }
    }

    /// Feed a pointer move. Returns the new position while a session is
    /// active so the owner can observe every change; `None` otherwise.
    pub fn update(&mut self, pointer: Pos2) -> Option<Pos2> {
        let session = self.session.as_ref()?;
        self.position = pointer - session.grab_offset;
        Some(self.position)
    }

    /// End the gesture (pointer up or pointer lost). The position keeps its
    /// last computed value.
    pub fn end(&mut self) {
        self.session = None;
    }
}
