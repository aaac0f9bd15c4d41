mod position;
mod recalc;

pub use recalc::LayoutError;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use glam::{Affine2, Vec2};
use smol_str::SmolStr;

use crate::bounds::Bounds;
use crate::interact::{MouseEvent, ScrollEvent, TextInputEvent};
use crate::style::{
    BoxModel, BoxSizing, CrossAxisAlignment, Display, FlexDirection, LayoutValue,
    MainAxisAlignment, Positioning, ScrollDirection, Sticky,
};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

fn next_node_id() -> u64 {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Dirty: u8 {
        /// Geometry inputs changed; `recalculate` is needed.
        const LAYOUT = 1 << 0;
        /// Relative offsets changed; `flush_positions` is needed.
        const POSITION = 1 << 1;
    }
}

/// Resolved geometry of a node, all in screen space after position
/// propagation. `position` alone is the relative offset inside the parent's
/// inner box, written by layout and consumed by propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Computed {
    pub position: Vec2,
    pub outer: Bounds,
    pub dimensions: Bounds,
    pub inner: Bounds,
    pub content_size: Vec2,
}

pub type MouseHandler = Box<dyn FnMut(&mut MouseEvent)>;
pub type ScrollHandler = Box<dyn FnMut(&mut ScrollEvent)>;
pub type TextInputHandler = Box<dyn FnMut(&mut TextInputEvent)>;

#[derive(Default)]
pub(crate) struct Handlers {
    pub mouse_down: Vec<MouseHandler>,
    pub mouse_up: Vec<MouseHandler>,
    pub mouse_move: Vec<MouseHandler>,
    pub click: Vec<MouseHandler>,
    pub mouse_enter: Vec<MouseHandler>,
    pub mouse_leave: Vec<MouseHandler>,
    pub scroll: Vec<ScrollHandler>,
    pub text_input: Vec<TextInputHandler>,
}

/// One element of the panel tree. Children are owned exclusively; layout
/// passes parent context down instead of keeping back pointers.
pub struct Node {
    id: u64,
    pub name: SmolStr,

    pub positioning: Positioning,
    pub sticky: Sticky,
    pub display: Display,
    pub box_sizing: BoxSizing,

    pub left: LayoutValue,
    pub top: LayoutValue,
    width: LayoutValue,
    height: LayoutValue,
    pub min_width: LayoutValue,
    pub max_width: LayoutValue,
    pub min_height: LayoutValue,
    pub max_height: LayoutValue,
    specify_width: bool,
    specify_height: bool,

    /// Alignment factors in 0..1 along the unused container space.
    pub h_align: f32,
    pub v_align: f32,
    pub z_index: f32,
    pub gap: Vec2,

    pub flex_direction: FlexDirection,
    pub flex_wrap: bool,
    pub main_axis_alignment: MainAxisAlignment,
    pub cross_axis_alignment: CrossAxisAlignment,

    pub box_model: BoxModel,
    pub overflow_hidden: bool,
    pub ignore_mouse: bool,
    /// When false, pressing this node blocks ancestor drag handles.
    pub drag_ignore: bool,
    pub scroll_direction: ScrollDirection,
    pub transform: Affine2,

    scroll_offset: Vec2,
    pub(crate) computed: Computed,
    pub(crate) dirty: Dirty,
    pub(crate) handlers: Handlers,
    children: Vec<Node>,
    flow_children: Vec<usize>,
    absolute_children: Vec<usize>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("positioning", &self.positioning)
            .field("display", &self.display)
            .field("computed", &self.computed)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Node {
    pub fn new() -> Self {
        Self {
            id: next_node_id(),
            name: SmolStr::default(),
            positioning: Positioning::default(),
            sticky: Sticky::default(),
            display: Display::default(),
            box_sizing: BoxSizing::default(),
            left: LayoutValue::ZERO,
            top: LayoutValue::ZERO,
            width: LayoutValue::ZERO,
            height: LayoutValue::ZERO,
            min_width: LayoutValue::ZERO,
            max_width: LayoutValue::px(f32::INFINITY),
            min_height: LayoutValue::ZERO,
            max_height: LayoutValue::px(f32::INFINITY),
            specify_width: false,
            specify_height: false,
            h_align: 0.0,
            v_align: 0.0,
            z_index: 0.0,
            gap: Vec2::ZERO,
            flex_direction: FlexDirection::default(),
            flex_wrap: true,
            main_axis_alignment: MainAxisAlignment::default(),
            cross_axis_alignment: CrossAxisAlignment::default(),
            box_model: BoxModel::default(),
            overflow_hidden: false,
            ignore_mouse: false,
            drag_ignore: true,
            scroll_direction: ScrollDirection::None,
            transform: Affine2::IDENTITY,
            scroll_offset: Vec2::ZERO,
            computed: Computed::default(),
            dirty: Dirty::LAYOUT,
            handlers: Handlers::default(),
            children: Vec::new(),
            flow_children: Vec::new(),
            absolute_children: Vec::new(),
        }
    }

    pub fn named(name: impl Into<SmolStr>) -> Self {
        let mut node = Self::new();
        node.name = name.into();
        node
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn debug_label(&self) -> String {
        if self.name.is_empty() {
            format!("node#{}", self.id)
        } else {
            format!("{}#{}", self.name, self.id)
        }
    }

    // --- size and offset setters; these only mark the node dirty, callers
    // run `recalculate` explicitly ---

    pub fn set_width(&mut self, width: LayoutValue) {
        self.width = width;
        self.specify_width = true;
        self.mark_layout_dirty();
    }

    pub fn set_height(&mut self, height: LayoutValue) {
        self.height = height;
        self.specify_height = true;
        self.mark_layout_dirty();
    }

    pub fn set_size(&mut self, width: LayoutValue, height: LayoutValue) {
        self.set_width(width);
        self.set_height(height);
    }

    /// Back to auto sizing: width follows content extent.
    pub fn set_auto_width(&mut self) {
        self.specify_width = false;
        self.mark_layout_dirty();
    }

    pub fn set_auto_height(&mut self) {
        self.specify_height = false;
        self.mark_layout_dirty();
    }

    pub fn set_left(&mut self, left: LayoutValue) {
        self.left = left;
        self.mark_layout_dirty();
    }

    pub fn set_top(&mut self, top: LayoutValue) {
        self.top = top;
        self.mark_layout_dirty();
    }

    pub fn width(&self) -> LayoutValue {
        self.width
    }

    pub fn height(&self) -> LayoutValue {
        self.height
    }

    pub fn specifies_width(&self) -> bool {
        self.specify_width
    }

    pub fn specifies_height(&self) -> bool {
        self.specify_height
    }

    pub fn mark_layout_dirty(&mut self) {
        self.dirty.insert(Dirty::LAYOUT);
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.contains(Dirty::LAYOUT) || self.children.iter().any(Node::needs_layout)
    }

    // --- computed geometry ---

    /// Margin box in screen space. Valid after `recalculate` +
    /// `flush_positions`.
    pub fn outer_bounds(&self) -> Bounds {
        self.computed.outer
    }

    /// Border box in screen space.
    pub fn bounds(&self) -> Bounds {
        self.computed.dimensions
    }

    /// Content box in screen space.
    pub fn inner_bounds(&self) -> Bounds {
        self.computed.inner
    }

    /// Offset inside the parent's inner box, before propagation.
    pub fn relative_position(&self) -> Vec2 {
        self.computed.position
    }

    pub fn content_size(&self) -> Vec2 {
        self.computed.content_size
    }

    // --- scrolling ---

    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> Vec2 {
        (self.computed.content_size - self.computed.inner.size).max(Vec2::ZERO)
    }

    /// Sets the scroll distance directly. The caller is expected to keep it
    /// within `max_scroll`; widget code drives this from a clamped scrollbar.
    pub fn set_scroll_offset(&mut self, offset: Vec2) {
        if self.scroll_offset != offset {
            self.scroll_offset = offset;
            self.dirty.insert(Dirty::POSITION);
        }
    }

    /// Scrolls by `delta` along the allowed axes, clamped to the content
    /// range. Returns whether anything moved.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        let max = self.max_scroll();
        let mut next = self.scroll_offset;
        if self.scroll_direction.horizontal() {
            next.x = (next.x + delta.x).clamp(0.0, max.x);
        }
        if self.scroll_direction.vertical() {
            next.y = (next.y + delta.y).clamp(0.0, max.y);
        }
        if approx_eq(next.x, self.scroll_offset.x) && approx_eq(next.y, self.scroll_offset.y) {
            return false;
        }
        self.scroll_offset = next;
        self.dirty.insert(Dirty::POSITION);
        true
    }

    pub fn scroll_to(&mut self, offset: Vec2) {
        let max = self.max_scroll();
        self.set_scroll_offset(offset.clamp(Vec2::ZERO, max));
    }

    // --- tree ---

    /// Appends a child and returns its id. Ownership moves in, so the child
    /// is necessarily detached from anywhere else. No relayout happens here.
    pub fn append(&mut self, child: Node) -> u64 {
        let id = child.id;
        self.children.push(child);
        self.mark_layout_dirty();
        id
    }

    /// Removes the node with `id` anywhere in this subtree.
    pub fn remove(&mut self, id: u64) -> Option<Node> {
        if let Some(index) = self.children.iter().position(|child| child.id == id) {
            self.mark_layout_dirty();
            return Some(self.children.remove(index));
        }
        for child in &mut self.children {
            if let Some(removed) = child.remove(id) {
                return Some(removed);
            }
        }
        None
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn find(&self, id: u64) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Ids from this node down to `id`, inclusive.
    pub fn path_to(&self, id: u64) -> Option<Vec<u64>> {
        if self.id == id {
            return Some(vec![self.id]);
        }
        for child in &self.children {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self.id);
                return Some(path);
            }
        }
        None
    }

    // --- handler registration ---

    pub fn on_mouse_down(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.mouse_down.push(Box::new(handler));
    }

    pub fn on_mouse_up(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.mouse_up.push(Box::new(handler));
    }

    pub fn on_mouse_move(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.mouse_move.push(Box::new(handler));
    }

    pub fn on_click(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.click.push(Box::new(handler));
    }

    pub fn on_mouse_enter(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.mouse_enter.push(Box::new(handler));
    }

    pub fn on_mouse_leave(&mut self, handler: impl FnMut(&mut MouseEvent) + 'static) {
        self.handlers.mouse_leave.push(Box::new(handler));
    }

    pub fn on_scroll(&mut self, handler: impl FnMut(&mut ScrollEvent) + 'static) {
        self.handlers.scroll.push(Box::new(handler));
    }

    pub fn on_text_input(&mut self, handler: impl FnMut(&mut TextInputEvent) + 'static) {
        self.handlers.text_input.push(Box::new(handler));
    }

    // --- internals shared by layout, propagation and hit testing ---

    pub(crate) fn classify_children(&mut self) {
        self.flow_children.clear();
        self.absolute_children.clear();
        for (index, child) in self.children.iter().enumerate() {
            if child.positioning.is_flow() {
                self.flow_children.push(index);
            } else {
                self.absolute_children.push(index);
            }
        }
    }

    pub(crate) fn flow_children(&self) -> &[usize] {
        &self.flow_children
    }

    pub(crate) fn absolute_children(&self) -> &[usize] {
        &self.absolute_children
    }

    /// Stable sort, so equal z-indices keep insertion order.
    pub(crate) fn children_by_z_index(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.children.len()).collect();
        order.sort_by(|&a, &b| {
            self.children[a]
                .z_index
                .partial_cmp(&self.children[b].z_index)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}
