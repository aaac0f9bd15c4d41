mod box_model;
mod color;
mod unit;

pub use box_model::{BoxModel, BoxSizing, CornerRadii, EdgeInsets};
pub use color::Color;
pub use unit::{LayoutValue, ParseUnitError};

/// How a node takes part in its parent's layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Positioning {
    /// Placed by the parent's display layout.
    #[default]
    Relative,
    /// Skipped by the display layout, placed by left/top and alignment.
    Absolute,
    /// Like absolute, additionally clamped to one container edge.
    Sticky,
}

impl Positioning {
    /// Relative nodes flow; absolute and sticky nodes do not.
    pub fn is_flow(self) -> bool {
        matches!(self, Self::Relative)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StickyEdge {
    #[default]
    Top,
    Left,
    Bottom,
    Right,
}

/// Sticky constraint: pinned `offset` pixels inside `edge` of the
/// containing inner box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sticky {
    pub edge: StickyEdge,
    pub offset: f32,
}

impl Sticky {
    pub const fn new(edge: StickyEdge, offset: f32) -> Self {
        Self { edge, offset }
    }
}

/// Layout strategy a node applies to its flow children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    /// Vertical stacking with `gap.y` between children.
    #[default]
    Flow,
    /// Line-wrapping flexbox with main/cross alignment.
    Flexbox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MainAxisAlignment {
    #[default]
    Start,
    End,
    Center,
    /// Equal spacing around every child, `(inner - sum) / (n + 1)`.
    SpaceEvenly,
    /// Equal spacing between children, `(inner - sum) / (n - 1)`.
    /// A single-child line falls back to `Start`.
    SpaceBetween,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// Axes a node is allowed to scroll its content along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl ScrollDirection {
    pub fn horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub fn vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}
