//! Input reduction
//!
//! Keyboard and pointer events become held-state intents. Keys are level
//! triggered: a direction stays active until its key is released.

use crate::sim::TickInput;

/// Held keys and pointer drag state
#[derive(Debug, Clone, Default)]
pub struct Controls {
    left: bool,
    right: bool,
    dragging: bool,
    pointer_x: Option<f32>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down/up by `KeyboardEvent.key`. Returns true if the key is bound.
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = pressed,
            "ArrowRight" | "d" | "D" => self.right = pressed,
            _ => return false,
        }
        true
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.dragging = true;
        self.pointer_x = Some(x);
    }

    /// Pointer moves only matter while dragging
    pub fn pointer_move(&mut self, x: f32) {
        if self.dragging {
            self.pointer_x = Some(x);
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.pointer_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Release everything (focus lost, round reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Held directions for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
        }
    }

    /// Catcher target for the current drag, `None` once released.
    /// Feed to `GameSession::set_catcher_target` after each pointer event.
    pub fn drag_target(&self) -> Option<f32> {
        if self.dragging { self.pointer_x } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_held_state() {
        let mut controls = Controls::new();
        assert!(controls.key("ArrowLeft", true));
        assert!(controls.tick_input().move_left);
        // Still held on the next frame
        assert!(controls.tick_input().move_left);
        controls.key("ArrowLeft", false);
        assert!(!controls.tick_input().move_left);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut controls = Controls::new();
        assert!(!controls.key("Space", true));
        assert_eq!(controls.tick_input(), TickInput::default());
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut controls = Controls::new();
        controls.pointer_move(50.0);
        assert_eq!(controls.drag_target(), None);

        controls.pointer_down(200.0);
        assert_eq!(controls.drag_target(), Some(200.0));
        controls.pointer_move(260.0);
        assert_eq!(controls.drag_target(), Some(260.0));

        controls.pointer_up();
        assert!(!controls.is_dragging());
        assert_eq!(controls.drag_target(), None);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut controls = Controls::new();
        controls.key("ArrowRight", true);
        controls.pointer_down(10.0);
        controls.clear();
        assert_eq!(controls.tick_input(), TickInput::default());
        assert_eq!(controls.drag_target(), None);
    }
}
