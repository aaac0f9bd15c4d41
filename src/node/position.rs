use glam::Vec2;

use crate::bounds::Bounds;
use crate::style::{Positioning, StickyEdge};

use super::{Dirty, Node};

impl Node {
    /// Converts relative offsets into absolute rects for every subtree whose
    /// root is flagged `Dirty::POSITION`. Clean subtrees are only walked, not
    /// rewritten.
    pub fn flush_positions(&mut self) {
        if self.dirty.contains(Dirty::POSITION) {
            self.apply_position(Vec2::ZERO, None);
        } else {
            self.track_children();
        }
    }

    fn track_children(&mut self) {
        let child_start = self.computed.inner.position - self.scroll_offset;
        let container = self.computed.inner;
        for child in &mut self.children {
            if child.dirty.contains(Dirty::POSITION) {
                child.apply_position(child_start, Some(container));
            } else {
                child.track_children();
            }
        }
    }

    /// `start` is the parent's inner-box origin already shifted by its
    /// scroll offset; `container` is the unshifted inner box sticky children
    /// clamp against.
    fn apply_position(&mut self, start: Vec2, container: Option<Bounds>) {
        let mut position = start + self.computed.position;
        if self.positioning == Positioning::Sticky
            && let Some(container) = container
        {
            position = self.sticky_clamp(position, container);
        }

        self.computed.outer.position = position;
        self.computed.dimensions.position = position + self.box_model.dimensions_offset();
        self.computed.inner.position =
            self.computed.dimensions.position + self.box_model.inner_offset();

        let child_start = self.computed.inner.position - self.scroll_offset;
        let child_container = self.computed.inner;
        for child in &mut self.children {
            child.apply_position(child_start, Some(child_container));
        }
        self.dirty.remove(Dirty::POSITION);
    }

    fn sticky_clamp(&self, position: Vec2, container: Bounds) -> Vec2 {
        let size = self.computed.outer.size;
        let mut position = position;
        match self.sticky.edge {
            StickyEdge::Top => {
                position.y = position.y.max(container.top() + self.sticky.offset);
            }
            StickyEdge::Left => {
                position.x = position.x.max(container.left() + self.sticky.offset);
            }
            StickyEdge::Bottom => {
                position.y = position
                    .y
                    .min(container.bottom() - size.y - self.sticky.offset);
            }
            StickyEdge::Right => {
                position.x = position
                    .x
                    .min(container.right() - size.x - self.sticky.offset);
            }
        }
        position
    }
}
