//! Pointer input for drag-aimed emitters.
//!
//! The engine does not poll a window. A frontend forwards pointer events
//! here and gets an [`Emitter`] back when a left-button drag finishes:
//!
//! ```ignore
//! input.pointer_down(MouseButton::Left, DVec2::new(400.0, 560.0));
//! input.pointer_moved(DVec2::new(430.0, 500.0));
//! if let Some(emitter) = input.pointer_up(MouseButton::Left, DVec2::new(440.0, 480.0)) {
//!     sim.launch(emitter);
//! }
//! ```

use crate::emitter::Emitter;
use glam::DVec2;
use std::collections::HashSet;
use tracing::debug;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer state between events.
///
/// Tracks which buttons are held, the cursor position, and where the
/// current left-button drag started.
#[derive(Debug, Default)]
pub struct Input {
    held: HashSet<MouseButton>,
    cursor: DVec2,
    drag_start: Option<DVec2>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Queries ==========

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Last known cursor position in screen pixels.
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Where the drag in progress started, if any.
    pub fn drag_start(&self) -> Option<DVec2> {
        self.drag_start
    }

    /// Line from the drag start to the cursor, for drawing an aiming guide.
    pub fn aim_line(&self) -> Option<(DVec2, DVec2)> {
        self.drag_start.map(|start| (start, self.cursor))
    }

    // ========== Events ==========

    pub fn pointer_down(&mut self, button: MouseButton, position: DVec2) {
        self.cursor = position;
        self.held.insert(button);
        if button == MouseButton::Left {
            self.drag_start = Some(position);
        }
    }

    pub fn pointer_moved(&mut self, position: DVec2) {
        self.cursor = position;
    }

    /// Finish a press. Releasing the left button after a drag returns the
    /// emitter it aimed; other buttons return `None`.
    pub fn pointer_up(&mut self, button: MouseButton, position: DVec2) -> Option<Emitter> {
        self.cursor = position;
        self.held.remove(&button);
        if button != MouseButton::Left {
            return None;
        }

        let start = self.drag_start.take()?;
        let emitter = Emitter::aimed(start, position);
        debug!(
            x = start.x,
            y = start.y,
            angle = emitter.angle,
            max_speed = emitter.speed_max,
            "emitter aimed"
        );
        Some(emitter)
    }

    /// Forget any drag in progress.
    pub fn cancel_drag(&mut self) {
        self.drag_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_yields_emitter() {
        let mut input = Input::new();
        input.pointer_down(MouseButton::Left, DVec2::new(100.0, 500.0));
        assert!(input.mouse_held(MouseButton::Left));

        input.pointer_moved(DVec2::new(110.0, 450.0));
        assert_eq!(
            input.aim_line(),
            Some((DVec2::new(100.0, 500.0), DVec2::new(110.0, 450.0)))
        );

        let emitter = input
            .pointer_up(MouseButton::Left, DVec2::new(130.0, 460.0))
            .expect("left drag aims an emitter");

        // 30-40-50 triangle.
        assert_eq!(emitter.position, DVec2::new(100.0, 500.0));
        assert_eq!(emitter.speed_max, 500.0);
        assert_eq!(emitter.speed_min, 100.0);
        assert!((emitter.angle - (-40.0f64).atan2(30.0).to_degrees()).abs() < 1e-9);
        assert!(!input.mouse_held(MouseButton::Left));
        assert_eq!(input.drag_start(), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut input = Input::new();
        input.pointer_down(MouseButton::Right, DVec2::ZERO);
        assert!(input.pointer_up(MouseButton::Right, DVec2::new(50.0, 0.0)).is_none());
    }

    #[test]
    fn test_release_without_press() {
        let mut input = Input::new();
        assert!(input.pointer_up(MouseButton::Left, DVec2::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_cancel_drag() {
        let mut input = Input::new();
        input.pointer_down(MouseButton::Left, DVec2::ZERO);
        input.cancel_drag();
        assert!(input.pointer_up(MouseButton::Left, DVec2::new(5.0, 5.0)).is_none());
    }
}
