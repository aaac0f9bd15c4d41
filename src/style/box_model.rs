use glam::Vec2;

use super::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn sum(&self) -> Vec2 {
        Vec2::new(self.horizontal(), self.vertical())
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Per-corner radii, clockwise from top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const ZERO: Self = Self {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    pub fn as_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Which box the specified width/height describe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    /// Specified size covers content, padding and border.
    #[default]
    BorderBox,
    /// Specified size covers content only.
    ContentBox,
}

/// Spacing and decoration for one node. Border width is uniform on all
/// four sides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxModel {
    pub margin: EdgeInsets,
    pub padding: EdgeInsets,
    pub border: f32,
    pub corner_radius: CornerRadii,
    pub background: Color,
    pub border_color: Color,
}

impl BoxModel {
    /// Horizontal + vertical non-content extent inside the margin box.
    pub fn edge_size(&self) -> Vec2 {
        self.padding.sum() + Vec2::splat(self.border * 2.0)
    }

    /// Grows a specified size to the outer (margin) box.
    pub fn outer_size(&self, specified: Vec2, sizing: BoxSizing) -> Vec2 {
        match sizing {
            BoxSizing::BorderBox => specified + self.margin.sum(),
            BoxSizing::ContentBox => specified + self.edge_size() + self.margin.sum(),
        }
    }

    /// Outer box shrunk by margins.
    pub fn dimensions_size(&self, outer: Vec2) -> Vec2 {
        (outer - self.margin.sum()).max(Vec2::ZERO)
    }

    /// Dimensions box shrunk by border and padding.
    pub fn inner_size(&self, dimensions: Vec2) -> Vec2 {
        (dimensions - self.edge_size()).max(Vec2::ZERO)
    }

    /// Offset from the outer box corner to the dimensions box corner.
    pub fn dimensions_offset(&self) -> Vec2 {
        self.margin.offset()
    }

    /// Offset from the dimensions box corner to the inner box corner.
    pub fn inner_offset(&self) -> Vec2 {
        self.padding.offset() + Vec2::splat(self.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxModel {
        BoxModel {
            margin: EdgeInsets::uniform(5.0),
            padding: EdgeInsets::symmetric(4.0, 2.0),
            border: 3.0,
            ..Default::default()
        }
    }

    #[test]
    fn border_box_adds_margin_only() {
        let m = sample();
        let outer = m.outer_size(Vec2::new(100.0, 50.0), BoxSizing::BorderBox);
        assert_eq!(outer, Vec2::new(110.0, 60.0));
    }

    #[test]
    fn content_box_adds_padding_border_margin() {
        let m = sample();
        let outer = m.outer_size(Vec2::new(100.0, 50.0), BoxSizing::ContentBox);
        // 100 + 8 padding + 6 border + 10 margin
        assert_eq!(outer, Vec2::new(124.0, 70.0));
    }

    #[test]
    fn boxes_nest() {
        let m = sample();
        let outer = Vec2::new(110.0, 60.0);
        let dims = m.dimensions_size(outer);
        let inner = m.inner_size(dims);
        assert_eq!(dims, Vec2::new(100.0, 50.0));
        assert_eq!(inner, Vec2::new(86.0, 40.0));
        assert!(inner.x <= dims.x && dims.x <= outer.x);
        assert!(inner.y <= dims.y && dims.y <= outer.y);
    }

    #[test]
    fn shrinking_never_goes_negative() {
        let m = sample();
        let dims = m.dimensions_size(Vec2::new(4.0, 4.0));
        assert_eq!(dims, Vec2::ZERO);
        assert_eq!(m.inner_size(dims), Vec2::ZERO);
    }
}
