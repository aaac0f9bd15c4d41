use glam::{Affine2, Vec2};
use rustc_hash::FxHashSet;

use crate::node::Node;

use super::{MouseButton, MouseEvent, ScrollEvent, TextInputEvent};

/// One frame of pointer input, sampled by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position in host screen space.
    pub position: Vec2,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    /// Scroll distance for this frame, positive toward content end.
    pub wheel_delta: Vec2,
    /// Text produced since the last frame, if any.
    pub text: Option<String>,
}

impl PointerState {
    fn pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MouseKind {
    Down,
    Up,
    Move,
    Click,
}

/// Per-frame interaction front end over one node tree. Owns hover, press
/// and focus bookkeeping; the host owns the dispatcher and feeds it a
/// `PointerState` once per frame.
pub struct InteractionDispatcher {
    /// Host-screen to panel-space mapping applied to the pointer.
    pub transform: Affine2,
    hover: Option<u64>,
    hover_path: Vec<u64>,
    press_targets: [Option<u64>; 3],
    held: [bool; 3],
    focus: Option<u64>,
    last_position: Vec2,
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            hover: None,
            hover_path: Vec::new(),
            press_targets: [None; 3],
            held: [false; 3],
            focus: None,
            last_position: Vec2::ZERO,
        }
    }

    pub fn hover_target(&self) -> Option<u64> {
        self.hover
    }

    pub fn press_target(&self, button: MouseButton) -> Option<u64> {
        self.press_targets[button.index()]
    }

    pub fn focus(&self) -> Option<u64> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<u64>) {
        self.focus = focus;
    }

    /// Runs one input frame: hover bookkeeping, button edges, wheel and text
    /// delivery. Positions are flushed first so hit testing sees current
    /// geometry.
    pub fn update(&mut self, root: &mut Node, input: &PointerState) {
        root.flush_positions();
        let point = self.transform.transform_point2(input.position);

        let hover = root.element_id_at(point);
        self.update_hover(root, point, hover);

        if point != self.last_position {
            // While a button is held the original press target captures
            // movement, even when the pointer leaves it.
            let move_target = self.press_targets[MouseButton::Left.index()].or(hover);
            if let Some(target) = move_target {
                self.send_mouse(root, target, MouseKind::Move, MouseButton::Left, point);
            }
        }

        for button in MouseButton::ALL {
            let index = button.index();
            let down = input.pressed(button);
            if down && !self.held[index] {
                self.press_targets[index] = hover;
                if let Some(target) = hover {
                    self.send_mouse(root, target, MouseKind::Down, button, point);
                }
            } else if !down && self.held[index] {
                if let Some(target) = self.press_targets[index].take() {
                    self.send_mouse(root, target, MouseKind::Up, button, point);
                    if hover == Some(target) {
                        self.send_mouse(root, target, MouseKind::Click, button, point);
                    }
                }
            }
            self.held[index] = down;
        }

        if input.wheel_delta != Vec2::ZERO
            && let Some(target) = hover
        {
            let mut event = ScrollEvent {
                position: point,
                delta: input.wheel_delta,
                target,
                current: target,
                handled: false,
            };
            bubble_scroll(root, target, &mut event);
        }

        if let Some(text) = input.text.as_deref()
            && !text.is_empty()
            && let Some(target) = self.focus
            && let Some(node) = root.find_mut(target)
        {
            let mut event = TextInputEvent {
                text: text.to_owned(),
                target,
            };
            for handler in &mut node.handlers.text_input {
                handler(&mut event);
            }
        }

        self.last_position = point;
    }

    fn update_hover(&mut self, root: &mut Node, point: Vec2, hover: Option<u64>) {
        if hover == self.hover {
            return;
        }
        let new_path = hover
            .and_then(|id| root.path_to(id))
            .unwrap_or_default();
        let old_set: FxHashSet<u64> = self.hover_path.iter().copied().collect();
        let new_set: FxHashSet<u64> = new_path.iter().copied().collect();

        // Leave deepest-first, enter outermost-first.
        for &id in self.hover_path.iter().rev() {
            if !new_set.contains(&id)
                && let Some(node) = root.find_mut(id)
            {
                let mut event = MouseEvent::new(MouseButton::Left, point, id);
                event.local = point - node.outer_bounds().position;
                for handler in &mut node.handlers.mouse_leave {
                    handler(&mut event);
                }
            }
        }
        for &id in &new_path {
            if !old_set.contains(&id)
                && let Some(node) = root.find_mut(id)
            {
                let mut event = MouseEvent::new(MouseButton::Left, point, id);
                event.local = point - node.outer_bounds().position;
                for handler in &mut node.handlers.mouse_enter {
                    handler(&mut event);
                }
            }
        }

        self.hover = hover;
        self.hover_path = new_path;
    }

    fn send_mouse(
        &self,
        root: &mut Node,
        target: u64,
        kind: MouseKind,
        button: MouseButton,
        point: Vec2,
    ) {
        let mut event = MouseEvent::new(button, point, target);
        event.target_ignores_drag = root.find(target).is_none_or(|node| node.drag_ignore);
        bubble_mouse(root, target, kind, &mut event);
    }
}

/// Depth-first search for `target`, then handler invocation on the way back
/// up. Returns whether `target` lives in this subtree.
fn bubble_mouse(node: &mut Node, target: u64, kind: MouseKind, event: &mut MouseEvent) -> bool {
    let on_path = node.id() == target
        || node
            .children_mut()
            .iter_mut()
            .any(|child| bubble_mouse(child, target, kind, event));
    if !on_path || event.propagation_stopped() {
        return on_path;
    }

    event.current = node.id();
    event.local = event.position - node.outer_bounds().position;
    let handlers = match kind {
        MouseKind::Down => &mut node.handlers.mouse_down,
        MouseKind::Up => &mut node.handlers.mouse_up,
        MouseKind::Move => &mut node.handlers.mouse_move,
        MouseKind::Click => &mut node.handlers.click,
    };
    for handler in handlers {
        handler(event);
    }
    true
}

fn bubble_scroll(node: &mut Node, target: u64, event: &mut ScrollEvent) -> bool {
    let on_path = node.id() == target
        || node
            .children_mut()
            .iter_mut()
            .any(|child| bubble_scroll(child, target, event));
    if !on_path || event.handled {
        return on_path;
    }

    event.current = node.id();
    for handler in &mut node.handlers.scroll {
        handler(event);
    }
    if !event.handled && node.scroll_by(event.delta) {
        event.handled = true;
    }
    true
}
