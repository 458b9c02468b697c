use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
}

/// A button press or release at a screen position, fed to the cat by the
/// surrounding scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub button: MouseButton,
    pub pos: Vec2,
}

impl PointerEvent {
    pub fn down(button: MouseButton, pos: Vec2) -> Self {
        Self { kind: PointerKind::Down, button, pos }
    }

    pub fn up(button: MouseButton, pos: Vec2) -> Self {
        Self { kind: PointerKind::Up, button, pos }
    }
}

/// Turns raw per-frame button state into press/release events
/// (edge detection).
#[derive(Debug, Default)]
pub struct ButtonEdges {
    left_was_down: bool,
    right_was_down: bool,
    middle_was_down: bool,
}

impl ButtonEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll once per frame; returns the events for buttons that changed.
    pub fn poll(
        &mut self,
        left_down: bool,
        right_down: bool,
        middle_down: bool,
        pos: Vec2,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        for (button, now, was) in [
            (MouseButton::Left, left_down, &mut self.left_was_down),
            (MouseButton::Right, right_down, &mut self.right_was_down),
            (MouseButton::Middle, middle_down, &mut self.middle_was_down),
        ] {
            if now && !*was {
                events.push(PointerEvent::down(button, pos));
            } else if !now && *was {
                events.push(PointerEvent::up(button, pos));
            }
            *was = now;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_fire_once() {
        let mut edges = ButtonEdges::new();
        let p = Vec2::new(1.0, 2.0);
        assert_eq!(edges.poll(true, false, false, p), vec![PointerEvent::down(MouseButton::Left, p)]);
        assert!(edges.poll(true, false, false, p).is_empty());
        assert_eq!(
            edges.poll(false, true, false, p),
            vec![
                PointerEvent::up(MouseButton::Left, p),
                PointerEvent::down(MouseButton::Right, p)
            ]
        );
    }
}
