//! Retained-mode layout and interaction toolkit for overlay panels.
//!
//! A [`Node`] tree carries CSS-like box styling (margins, padding, border,
//! pixel/percent lengths) and lays itself out with stacked flow or
//! line-wrapping flexbox. Geometry work is split into three explicit steps
//! the host drives per frame:
//!
//! 1. [`Node::recalculate`] resolves sizes and relative offsets,
//! 2. [`Node::flush_positions`] turns them into screen-space rects,
//! 3. [`paint_tree`] hands z-ordered draw calls to a [`RectPainter`].
//!
//! Input arrives as a per-frame [`PointerState`] value fed to an
//! [`InteractionDispatcher`], which hit-tests the tree and bubbles mouse,
//! wheel and text events to handler closures registered on nodes. Scroll
//! containers and drag behavior compose out of the same parts in
//! [`widget`].

pub mod anim;
pub mod bounds;
pub mod interact;
pub mod layout;
pub mod node;
pub mod paint;
pub mod style;
pub mod widget;

pub use anim::{AnimationTimer, TimeFunction};
pub use bounds::Bounds;
pub use interact::{
    InteractionDispatcher, MouseButton, MouseEvent, PointerState, ScrollEvent, TextInputEvent,
};
pub use node::{LayoutError, Node};
pub use paint::{RectPaint, RectPainter, paint_tree};
pub use style::{
    BoxModel, BoxSizing, Color, CornerRadii, CrossAxisAlignment, Display, EdgeInsets,
    FlexDirection, LayoutValue, MainAxisAlignment, ParseUnitError, Positioning, ScrollDirection,
    Sticky, StickyEdge,
};
pub use widget::{Draggable, ScrollAxis, ScrollView, Scrollbar, Toggle};
