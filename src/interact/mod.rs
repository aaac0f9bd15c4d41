mod dispatcher;

pub use dispatcher::{InteractionDispatcher, PointerState};

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub(crate) const ALL: [MouseButton; 3] =
        [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// A pointer event bubbling from `target` toward the root. `current` is the
/// node whose handlers are running right now.
pub struct MouseEvent {
    pub button: MouseButton,
    /// Pointer position in panel space.
    pub position: Vec2,
    /// Pointer position relative to `current`'s outer box.
    pub local: Vec2,
    pub target: u64,
    pub current: u64,
    /// Whether the hit node opted out of driving ancestor drag handles.
    pub target_ignores_drag: bool,
    propagation_stopped: bool,
}

impl MouseEvent {
    pub(crate) fn new(button: MouseButton, position: Vec2, target: u64) -> Self {
        Self {
            button,
            position,
            local: Vec2::ZERO,
            target,
            current: target,
            target_ignores_drag: true,
            propagation_stopped: false,
        }
    }

    /// Keeps the event from reaching ancestors of `current`.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Wheel input bubbling from `target`. A handler that consumes the motion
/// sets `handled`; otherwise ancestors get a chance, and scrollable nodes
/// consume it by scrolling.
pub struct ScrollEvent {
    /// Pointer position in panel space.
    pub position: Vec2,
    /// Scroll distance, positive toward content end.
    pub delta: Vec2,
    pub target: u64,
    pub current: u64,
    pub handled: bool,
}

pub struct TextInputEvent {
    pub text: String,
    pub target: u64,
}
