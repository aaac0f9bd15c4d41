use glam::Affine2;

use crate::bounds::Bounds;
use crate::node::Node;
use crate::style::{Color, CornerRadii};

/// One rectangle draw call, everything a renderer needs for a node's box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectPaint {
    pub node: u64,
    /// Border box in screen space.
    pub bounds: Bounds,
    pub corner_radius: CornerRadii,
    pub background: Color,
    pub border: f32,
    pub border_color: Color,
    /// Cumulative transform of this node and its ancestors.
    pub transform: Affine2,
}

/// Render collaborator boundary. `paint_tree` feeds an implementation draw
/// calls in back-to-front order; clip pushes nest with the tree.
pub trait RectPainter {
    fn draw_rect(&mut self, paint: &RectPaint);
    fn push_clip(&mut self, bounds: Bounds);
    fn pop_clip(&mut self);
}

pub fn paint_tree(root: &Node, painter: &mut impl RectPainter) {
    paint_node(root, Affine2::IDENTITY, painter);
}

fn paint_node(node: &Node, parent_transform: Affine2, painter: &mut impl RectPainter) {
    let transform = if node.transform == Affine2::IDENTITY {
        parent_transform
    } else {
        parent_transform * node.transform
    };

    let model = &node.box_model;
    let has_border = model.border > 0.0 && !model.border_color.is_transparent();
    if !model.background.is_transparent() || has_border {
        painter.draw_rect(&RectPaint {
            node: node.id(),
            bounds: node.bounds(),
            corner_radius: model.corner_radius,
            background: model.background,
            border: model.border,
            border_color: model.border_color,
            transform,
        });
    }

    let clips = node.overflow_hidden;
    if clips {
        painter.push_clip(node.bounds());
    }
    for &index in &node.children_by_z_index() {
        paint_node(&node.children()[index], transform, painter);
    }
    if clips {
        painter.pop_clip();
    }
}
