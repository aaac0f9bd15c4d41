use glam::Vec2;
use log::warn;
use thiserror::Error;

use crate::layout::flexbox::{self, FlexParams};
use crate::layout::flow;
use crate::style::{BoxSizing, Display, FlexDirection, LayoutValue, Positioning};

use super::{Dirty, Node};

const LOG_TARGET: &str = "filigree::layout";

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("non-finite {what}: {value:?}")]
    NonFinite { what: &'static str, value: Vec2 },
}

fn finite(value: Vec2, what: &'static str) -> Result<Vec2, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::NonFinite { what, value })
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Container context handed to a node while it recalculates: the space it
/// resolves percentages against, plus which axes the parent actually
/// specifies. Replaces a parent back pointer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Container {
    pub size: Vec2,
    pub specify_width: bool,
    pub specify_height: bool,
}

impl Node {
    /// Recomputes sizes and relative offsets for the whole subtree against
    /// `screen`. A node that produces non-finite geometry is logged and keeps
    /// its previous geometry; its siblings still lay out.
    pub fn recalculate(&mut self, screen: Vec2) {
        let container = Container {
            size: screen,
            specify_width: true,
            specify_height: true,
        };
        if let Err(error) = self.recalc_tree(container) {
            warn!(target: LOG_TARGET, "layout failed for {}: {error}", self.debug_label());
        }
    }

    pub(crate) fn recalc_tree(&mut self, container: Container) -> Result<(), LayoutError> {
        let offset = finite(
            Vec2::new(
                self.left.resolve(container.size.x),
                self.top.resolve(container.size.y),
            ),
            "offset",
        )?;
        let outer = self.resolve_specified_size(container)?;
        // Nothing is written until every fallible resolution above passed,
        // so a failed node keeps its previous geometry whole.
        self.computed.position = offset;
        self.set_box_sizes(outer);
        self.classify_children();

        // Flow children first; absolute children wait for the final inner
        // size below.
        let flow_indices = self.flow_children().to_vec();
        let flow_container = Container {
            size: Vec2::new(
                if self.specify_width {
                    self.computed.inner.size.x
                } else {
                    0.0
                },
                if self.specify_height {
                    self.computed.inner.size.y
                } else {
                    0.0
                },
            ),
            specify_width: self.specify_width,
            specify_height: self.specify_height,
        };
        for &index in &flow_indices {
            let child = &mut self.children[index];
            if let Err(error) = child.recalc_tree(flow_container) {
                warn!(target: LOG_TARGET, "layout failed for {}: {error}", child.debug_label());
            }
        }

        self.arrange_children(&flow_indices);
        self.adapt_to_content(container)?;
        self.apply_alignment(container);

        let absolute_indices = self.absolute_children().to_vec();
        let inner = self.computed.inner.size;
        for &index in &absolute_indices {
            let child = &mut self.children[index];
            let child_container = Container {
                // Absolute children see the full inner box; sticky children
                // resolve against specified axes only, like flow children.
                size: if child.positioning == Positioning::Absolute {
                    inner
                } else {
                    flow_container.size
                },
                specify_width: self.specify_width,
                specify_height: self.specify_height,
            };
            if let Err(error) = child.recalc_tree(child_container) {
                warn!(target: LOG_TARGET, "layout failed for {}: {error}", child.debug_label());
            }
        }

        self.dirty.remove(Dirty::LAYOUT);
        self.dirty.insert(Dirty::POSITION);
        Ok(())
    }

    /// Resolves the specified size against the container and clamps it
    /// through min/max. Auto axes get a 0 placeholder until the content
    /// extent is known.
    fn resolve_specified_size(&self, container: Container) -> Result<Vec2, LayoutError> {
        let width = if self.specify_width {
            resolve_clamped(self.width, self.min_width, self.max_width, container.size.x)?
        } else {
            0.0
        };
        let height = if self.specify_height {
            resolve_clamped(
                self.height,
                self.min_height,
                self.max_height,
                container.size.y,
            )?
        } else {
            0.0
        };
        let specified = Vec2::new(width, height).max(Vec2::ZERO);
        Ok(self.box_model.outer_size(specified, self.box_sizing))
    }

    fn set_box_sizes(&mut self, outer: Vec2) {
        self.computed.outer.size = outer;
        self.computed.dimensions.size = self.box_model.dimensions_size(outer);
        self.computed.inner.size = self.box_model.inner_size(self.computed.dimensions.size);
    }

    fn arrange_children(&mut self, flow_indices: &[usize]) {
        match self.display {
            Display::Flow => {
                flow::arrange(&mut self.children, flow_indices, self.gap.y);
                self.computed.content_size = flow::content_extent(&self.children, flow_indices);
            }
            Display::Flexbox => {
                let params = self.flex_params();
                let lines = flexbox::collect_lines(&self.children, flow_indices, &params);
                flexbox::arrange(&mut self.children, &lines, &params);
                self.computed.content_size = flexbox::content_size(&lines, &params);
            }
        }
    }

    pub(crate) fn flex_params(&self) -> FlexParams {
        FlexParams {
            direction: self.flex_direction,
            wrap: self.flex_wrap,
            main_specified: match self.flex_direction {
                FlexDirection::Row => self.specify_width,
                FlexDirection::Column => self.specify_height,
            },
            inner: self.computed.inner.size,
            gap: self.gap,
            main_align: self.main_axis_alignment,
            cross_align: self.cross_axis_alignment,
        }
    }

    /// Replaces the 0 placeholder on auto axes with the content extent,
    /// growing outward through padding, border and margin. The grown size
    /// passes through min/max again, in the same space as a specified size.
    fn adapt_to_content(&mut self, container: Container) -> Result<(), LayoutError> {
        if self.specify_width && self.specify_height {
            return Ok(());
        }
        let content = finite(self.computed.content_size, "content size")?;
        let edges = self.box_model.edge_size() + self.box_model.margin.sum();
        let to_specified = match self.box_sizing {
            BoxSizing::BorderBox => self.box_model.edge_size(),
            BoxSizing::ContentBox => Vec2::ZERO,
        };
        let mut outer = self.computed.outer.size;
        if !self.specify_width && content.x > 0.0 {
            let specified = clamp_axis(
                content.x + to_specified.x,
                self.min_width.resolve(container.size.x),
                self.max_width.resolve(container.size.x),
            );
            outer.x = specified - to_specified.x + edges.x;
        }
        if !self.specify_height && content.y > 0.0 {
            let specified = clamp_axis(
                content.y + to_specified.y,
                self.min_height.resolve(container.size.y),
                self.max_height.resolve(container.size.y),
            );
            outer.y = specified - to_specified.y + edges.y;
        }
        self.set_box_sizes(outer);
        Ok(())
    }

    /// One alignment application, after auto sizing, so the final outer size
    /// distributes the leftover container space. Absolute nodes align on both
    /// axes; relative nodes only along axes the parent specifies; sticky
    /// nodes sit where their offsets put them until the sticky clamp.
    fn apply_alignment(&mut self, container: Container) {
        let outer = self.computed.outer.size;
        let mut offset = Vec2::ZERO;
        match self.positioning {
            Positioning::Absolute => {
                offset = (container.size - outer) * Vec2::new(self.h_align, self.v_align);
            }
            Positioning::Relative => {
                if container.specify_width {
                    offset.x = (container.size.x - outer.x) * self.h_align;
                }
                if container.specify_height {
                    offset.y = (container.size.y - outer.y) * self.v_align;
                }
            }
            Positioning::Sticky => {}
        }
        self.computed.position += offset;
    }
}

fn resolve_clamped(
    value: LayoutValue,
    min: LayoutValue,
    max: LayoutValue,
    container: f32,
) -> Result<f32, LayoutError> {
    let resolved = value.resolve(container);
    // Checked before clamping; min/max would silently swallow a NaN.
    if !resolved.is_finite() {
        return Err(LayoutError::NonFinite {
            what: "size",
            value: Vec2::splat(resolved),
        });
    }
    Ok(clamp_axis(
        resolved,
        min.resolve(container),
        max.resolve(container),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BoxSizing, CrossAxisAlignment, EdgeInsets, MainAxisAlignment};

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn sized(width: f32, height: f32) -> Node {
        let mut node = Node::new();
        node.set_size(LayoutValue::px(width), LayoutValue::px(height));
        node
    }

    #[test]
    fn resolves_pixels_and_percent_against_parent_inner() {
        let mut root = sized(200.0, 100.0);
        let mut child = Node::new();
        child.set_size(LayoutValue::percent(0.5), LayoutValue::new(10.0, 0.25));
        let child_id = root.append(child);

        root.recalculate(SCREEN);

        let child = root.find(child_id).unwrap();
        assert_eq!(child.outer_bounds().size, Vec2::new(100.0, 35.0));
    }

    #[test]
    fn min_max_clamp_applies() {
        let mut node = sized(500.0, 10.0);
        node.max_width = LayoutValue::px(300.0);
        node.min_height = LayoutValue::px(50.0);
        node.recalculate(SCREEN);
        assert_eq!(node.outer_bounds().size, Vec2::new(300.0, 50.0));
    }

    #[test]
    fn box_nesting_with_margin_padding_border() {
        let mut node = sized(100.0, 80.0);
        node.box_model.margin = EdgeInsets::uniform(10.0);
        node.box_model.padding = EdgeInsets::uniform(5.0);
        node.box_model.border = 2.0;
        node.recalculate(SCREEN);

        assert_eq!(node.outer_bounds().size, Vec2::new(120.0, 100.0));
        assert_eq!(node.bounds().size, Vec2::new(100.0, 80.0));
        assert_eq!(node.inner_bounds().size, Vec2::new(86.0, 66.0));
    }

    #[test]
    fn content_box_grows_outward() {
        let mut node = sized(100.0, 80.0);
        node.box_sizing = BoxSizing::ContentBox;
        node.box_model.padding = EdgeInsets::uniform(5.0);
        node.box_model.border = 2.0;
        node.recalculate(SCREEN);

        assert_eq!(node.inner_bounds().size, Vec2::new(100.0, 80.0));
        assert_eq!(node.bounds().size, Vec2::new(114.0, 94.0));
    }

    #[test]
    fn flow_children_stack_and_auto_height_adapts() {
        let mut root = Node::new();
        root.set_width(LayoutValue::px(100.0));
        root.gap = Vec2::new(0.0, 5.0);
        for height in [10.0, 20.0, 30.0] {
            root.append(sized(40.0, height));
        }

        root.recalculate(SCREEN);

        let tops: Vec<f32> = root
            .children()
            .iter()
            .map(|child| child.relative_position().y)
            .collect();
        assert_eq!(tops, vec![0.0, 15.0, 40.0]);
        assert_eq!(root.content_size(), Vec2::new(40.0, 70.0));
        assert_eq!(root.outer_bounds().size.y, 70.0);
    }

    #[test]
    fn auto_axes_resolve_child_percent_against_zero() {
        let mut root = Node::new();
        let mut child = Node::new();
        child.set_size(LayoutValue::new(30.0, 0.5), LayoutValue::px(20.0));
        let child_id = root.append(child);

        root.recalculate(SCREEN);

        // Parent width is auto, so the percent contributes nothing.
        let child = root.find(child_id).unwrap();
        assert_eq!(child.outer_bounds().size.x, 30.0);
    }

    #[test]
    fn auto_sized_axes_reclamp_through_min_max() {
        let mut root = Node::new();
        root.max_width = LayoutValue::px(60.0);
        root.max_height = LayoutValue::px(60.0);
        root.append(sized(100.0, 100.0));
        root.recalculate(SCREEN);
        assert_eq!(root.outer_bounds().size, Vec2::new(60.0, 60.0));

        let mut tall = Node::new();
        tall.min_height = LayoutValue::px(50.0);
        tall.append(sized(20.0, 10.0));
        tall.recalculate(SCREEN);
        assert_eq!(tall.outer_bounds().size, Vec2::new(20.0, 50.0));
    }

    #[test]
    fn absolute_child_aligns_in_final_inner_box() {
        let mut root = sized(200.0, 100.0);
        let mut child = sized(50.0, 20.0);
        child.positioning = Positioning::Absolute;
        child.h_align = 0.5;
        child.v_align = 1.0;
        let child_id = root.append(child);

        root.recalculate(SCREEN);

        let child = root.find(child_id).unwrap();
        assert_eq!(child.relative_position(), Vec2::new(75.0, 80.0));
    }

    #[test]
    fn centered_auto_sized_absolute_node_stays_centered() {
        let mut root = sized(200.0, 200.0);
        let mut panel = Node::new();
        panel.positioning = Positioning::Absolute;
        panel.h_align = 0.5;
        panel.v_align = 0.5;
        panel.append(sized(40.0, 40.0));
        let panel_id = root.append(panel);

        root.recalculate(SCREEN);
        let panel = root.find(panel_id).unwrap();
        assert_eq!(panel.outer_bounds().size, Vec2::new(40.0, 40.0));
        assert_eq!(panel.relative_position(), Vec2::new(80.0, 80.0));

        // Content grows; the node re-centers with its new size.
        root.find_mut(panel_id)
            .unwrap()
            .children_mut()[0]
            .set_size(LayoutValue::px(100.0), LayoutValue::px(100.0));
        root.recalculate(SCREEN);
        let panel = root.find(panel_id).unwrap();
        assert_eq!(panel.relative_position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn relative_child_aligns_only_on_specified_axes() {
        let mut root = Node::new();
        root.set_width(LayoutValue::px(200.0));
        let mut child = sized(50.0, 20.0);
        child.h_align = 1.0;
        child.v_align = 1.0;
        let child_id = root.append(child);

        root.recalculate(SCREEN);

        let child = root.find(child_id).unwrap();
        // Height is auto, so v_align has no definite space to distribute.
        assert_eq!(child.relative_position(), Vec2::new(150.0, 0.0));
    }

    #[test]
    fn flexbox_display_places_lines() {
        let mut root = sized(100.0, 100.0);
        root.display = Display::Flexbox;
        root.gap = Vec2::new(5.0, 7.0);
        root.main_axis_alignment = MainAxisAlignment::Start;
        root.cross_axis_alignment = CrossAxisAlignment::Start;
        for _ in 0..3 {
            root.append(sized(45.0, 10.0));
        }

        root.recalculate(SCREEN);

        let xs: Vec<Vec2> = root
            .children()
            .iter()
            .map(|child| child.relative_position())
            .collect();
        assert_eq!(xs[0], Vec2::new(0.0, 0.0));
        assert_eq!(xs[1], Vec2::new(50.0, 0.0));
        assert_eq!(xs[2], Vec2::new(0.0, 17.0));
        assert_eq!(root.content_size(), Vec2::new(95.0, 27.0));
    }

    #[test]
    fn non_finite_size_is_contained_to_the_node() {
        let mut root = sized(100.0, 100.0);
        let mut bad = Node::new();
        bad.set_width(LayoutValue::px(f32::NAN));
        bad.set_height(LayoutValue::px(10.0));
        let bad_id = root.append(bad);
        let good_id = root.append(sized(40.0, 10.0));

        root.recalculate(SCREEN);

        // The sibling still lays out; the failed node keeps zeroed geometry.
        let good = root.find(good_id).unwrap();
        assert_eq!(good.outer_bounds().size, Vec2::new(40.0, 10.0));
        let bad = root.find(bad_id).unwrap();
        assert_eq!(bad.outer_bounds().size, Vec2::ZERO);
        assert_eq!(root.outer_bounds().size, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn failed_node_keeps_its_prior_offsets_too() {
        let mut root = sized(100.0, 100.0);
        let mut child = sized(40.0, 10.0);
        child.set_left(LayoutValue::px(10.0));
        let child_id = root.append(child);
        root.recalculate(SCREEN);

        let child = root.find_mut(child_id).unwrap();
        child.set_left(LayoutValue::px(30.0));
        child.set_width(LayoutValue::px(f32::NAN));
        root.recalculate(SCREEN);

        // The new offset resolved fine, but the size did not; neither lands.
        let child = root.find(child_id).unwrap();
        assert_eq!(child.relative_position().x, 10.0);
        assert_eq!(child.outer_bounds().size, Vec2::new(40.0, 10.0));
    }

    #[test]
    fn left_top_offsets_feed_relative_position() {
        let mut root = sized(200.0, 100.0);
        let mut child = sized(10.0, 10.0);
        child.set_left(LayoutValue::new(5.0, 0.1));
        child.set_top(LayoutValue::px(7.0));
        let child_id = root.append(child);

        root.recalculate(SCREEN);

        let child = root.find(child_id).unwrap();
        assert_eq!(child.relative_position(), Vec2::new(25.0, 7.0));
    }
}
