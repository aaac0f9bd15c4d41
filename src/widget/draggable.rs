use glam::Vec2;

use crate::interact::{InteractionDispatcher, PointerState};
use crate::node::Node;
use crate::style::LayoutValue;

#[derive(Clone, Copy, Debug)]
struct DragStart {
    pointer: Vec2,
    left: f32,
    top: f32,
}

/// Drag-to-move behavior for one panel node. Run `update` each frame after
/// the dispatcher; when it returns true the panel's offsets changed and the
/// tree needs a recalculation.
///
/// A press starts a drag only when the hit node either is the panel itself
/// or opts in with `drag_ignore` (the default); interactive children such as
/// scrollbar tracks clear that flag to keep the panel still.
pub struct Draggable {
    target: u64,
    grab: Option<DragStart>,
    was_held: bool,
}

impl Draggable {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            grab: None,
            was_held: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn update(
        &mut self,
        root: &mut Node,
        dispatcher: &InteractionDispatcher,
        input: &PointerState,
    ) -> bool {
        // Same panel-space mapping the dispatcher hit-tests with.
        let pointer = dispatcher.transform.transform_point2(input.position);
        let held = input.left;
        if held && !self.was_held {
            self.try_grab(root, dispatcher.hover_target(), pointer);
        } else if !held {
            self.grab = None;
        }
        self.was_held = held;

        let Some(grab) = self.grab else {
            return false;
        };
        let delta = pointer - grab.pointer;
        let Some(node) = root.find_mut(self.target) else {
            return false;
        };
        let left = grab.left + delta.x;
        let top = grab.top + delta.y;
        if node.left.pixels == left && node.top.pixels == top {
            return false;
        }
        // Only the pixel part moves; percent anchoring stays intact.
        node.set_left(LayoutValue {
            pixels: left,
            ..node.left
        });
        node.set_top(LayoutValue {
            pixels: top,
            ..node.top
        });
        true
    }

    fn try_grab(&mut self, root: &Node, hover: Option<u64>, pointer: Vec2) {
        let Some(hit) = hover else {
            return;
        };
        let Some(panel) = root.find(self.target) else {
            return;
        };
        if panel.find(hit).is_none() {
            return;
        }
        // A child that blocks dragging keeps the grab from starting.
        if hit != self.target
            && let Some(hit_node) = root.find(hit)
            && !hit_node.drag_ignore
        {
            return;
        }
        self.grab = Some(DragStart {
            pointer,
            left: panel.left.pixels,
            top: panel.top.pixels,
        });
    }
}
