use glam::Vec2;

use crate::node::Node;
use crate::style::{CrossAxisAlignment, FlexDirection, MainAxisAlignment};

/// One flex line. `main` is the gap-inclusive extent along the main axis,
/// `cross` the tallest member along the cross axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlexLine {
    pub members: Vec<usize>,
    pub main: f32,
    pub cross: f32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FlexParams {
    pub direction: FlexDirection,
    pub wrap: bool,
    /// Whether the parent specifies its main-axis size. Wrapping and
    /// main-axis alignment both need a definite main extent.
    pub main_specified: bool,
    pub inner: Vec2,
    pub gap: Vec2,
    pub main_align: MainAxisAlignment,
    pub cross_align: CrossAxisAlignment,
}

impl FlexParams {
    fn main_of(&self, v: Vec2) -> f32 {
        match self.direction {
            FlexDirection::Row => v.x,
            FlexDirection::Column => v.y,
        }
    }

    fn cross_of(&self, v: Vec2) -> f32 {
        match self.direction {
            FlexDirection::Row => v.y,
            FlexDirection::Column => v.x,
        }
    }

    fn main_gap(&self) -> f32 {
        self.main_of(self.gap)
    }

    fn cross_gap(&self) -> f32 {
        self.cross_of(self.gap)
    }
}

/// Splits the flow children into lines. The first child always opens the
/// first line; a child wraps when adding it (plus one gap) would exceed the
/// inner main extent. Without wrapping, or without a specified main axis,
/// everything lands on one line.
pub(crate) fn collect_lines(children: &[Node], flow: &[usize], params: &FlexParams) -> Vec<FlexLine> {
    let mut lines = Vec::new();
    let Some((&first, rest)) = flow.split_first() else {
        return lines;
    };

    let gap = params.main_gap();
    let outer = |index: usize| children[index].computed.outer.size;

    let mut line = FlexLine {
        members: vec![first],
        main: params.main_of(outer(first)),
        cross: params.cross_of(outer(first)),
    };

    if !params.wrap || !params.main_specified {
        for &index in rest {
            let size = outer(index);
            line.main += params.main_of(size) + gap;
            line.cross = line.cross.max(params.cross_of(size));
            line.members.push(index);
        }
        lines.push(line);
        return lines;
    }

    let limit = params.main_of(params.inner);
    for &index in rest {
        let size = outer(index);
        let main = params.main_of(size);
        if line.main + main + gap > limit {
            lines.push(std::mem::take(&mut line));
            line.main = main;
        } else {
            line.main += main + gap;
        }
        line.cross = line.cross.max(params.cross_of(size));
        line.members.push(index);
    }
    lines.push(line);
    lines
}

/// Adds line placement offsets to each member's resolved position.
pub(crate) fn arrange(children: &mut [Node], lines: &[FlexLine], params: &FlexParams) {
    if !params.main_specified {
        // Sequential placement; main-axis alignment needs a definite extent.
        for line in lines {
            place_line(children, line, 0.0, params.main_gap(), 0.0, params);
        }
        return;
    }

    let inner_main = params.main_of(params.inner);
    let mut cross_cursor = 0.0;
    for line in lines {
        let count = line.members.len();
        let (start, gap) = match params.main_align {
            MainAxisAlignment::Start => (0.0, params.main_gap()),
            MainAxisAlignment::End => (inner_main - line.main, params.main_gap()),
            MainAxisAlignment::Center => ((inner_main - line.main) * 0.5, params.main_gap()),
            MainAxisAlignment::SpaceEvenly => {
                let sum = member_sum(children, line, params);
                let gap = (inner_main - sum) / (count + 1) as f32;
                (gap, gap)
            }
            MainAxisAlignment::SpaceBetween if count > 1 => {
                let sum = member_sum(children, line, params);
                (0.0, (inner_main - sum) / (count - 1) as f32)
            }
            MainAxisAlignment::SpaceBetween => (0.0, params.main_gap()),
        };
        place_line(children, line, start, gap, cross_cursor, params);
        cross_cursor += line.cross + params.cross_gap();
    }
}

fn member_sum(children: &[Node], line: &FlexLine, params: &FlexParams) -> f32 {
    line.members
        .iter()
        .map(|&index| params.main_of(children[index].computed.outer.size))
        .sum()
}

fn place_line(
    children: &mut [Node],
    line: &FlexLine,
    start: f32,
    gap: f32,
    cross_cursor: f32,
    params: &FlexParams,
) {
    let line_cross = line
        .members
        .iter()
        .map(|&index| params.cross_of(children[index].computed.outer.size))
        .fold(0.0f32, f32::max);

    let mut main_cursor = start;
    for &index in &line.members {
        let size = children[index].computed.outer.size;
        let cross = cross_cursor
            + match params.cross_align {
                CrossAxisAlignment::Start => 0.0,
                CrossAxisAlignment::Center => (line_cross - params.cross_of(size)) * 0.5,
                CrossAxisAlignment::End => line_cross - params.cross_of(size),
            };
        let offset = match params.direction {
            FlexDirection::Row => Vec2::new(main_cursor, cross),
            FlexDirection::Column => Vec2::new(cross, main_cursor),
        };
        children[index].computed.position += offset;
        main_cursor += params.main_of(size) + gap;
    }
}

/// Content extent of the line set: longest line along the main axis, lines
/// plus cross gaps stacked along the cross axis.
pub(crate) fn content_size(lines: &[FlexLine], params: &FlexParams) -> Vec2 {
    if lines.is_empty() {
        return Vec2::ZERO;
    }
    let main = lines.iter().map(|line| line.main).fold(0.0f32, f32::max);
    let cross = lines.iter().map(|line| line.cross).sum::<f32>()
        + params.cross_gap() * (lines.len() - 1) as f32;
    match params.direction {
        FlexDirection::Row => Vec2::new(main, cross),
        FlexDirection::Column => Vec2::new(cross, main),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LayoutValue;

    fn sized(width: f32, height: f32) -> Node {
        let mut node = Node::new();
        node.set_size(LayoutValue::px(width), LayoutValue::px(height));
        node.computed.outer.size = Vec2::new(width, height);
        node
    }

    fn row_params(inner: Vec2, gap: Vec2) -> FlexParams {
        FlexParams {
            direction: FlexDirection::Row,
            wrap: true,
            main_specified: true,
            inner,
            gap,
            main_align: MainAxisAlignment::Start,
            cross_align: CrossAxisAlignment::Start,
        }
    }

    #[test]
    fn first_child_never_wraps() {
        let children = vec![sized(500.0, 10.0), sized(10.0, 10.0)];
        let params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);
        let lines = collect_lines(&children, &[0, 1], &params);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].members, vec![0]);
        assert_eq!(lines[1].members, vec![1]);
    }

    #[test]
    fn wrap_threshold_counts_the_gap() {
        // 45 + 5 + 45 = 95 fits in 100; the third child would need 145.
        let children = vec![sized(45.0, 10.0), sized(45.0, 10.0), sized(45.0, 10.0)];
        let params = row_params(Vec2::new(100.0, 50.0), Vec2::new(5.0, 0.0));
        let lines = collect_lines(&children, &[0, 1, 2], &params);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].members, vec![0, 1]);
        assert_eq!(lines[0].main, 95.0);
        assert_eq!(lines[1].members, vec![2]);
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        let children = vec![sized(50.0, 10.0), sized(50.0, 10.0)];
        let params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);
        let lines = collect_lines(&children, &[0, 1], &params);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].main, 100.0);
    }

    #[test]
    fn no_wrap_without_specified_main_axis() {
        let children = vec![sized(80.0, 10.0), sized(80.0, 10.0)];
        let mut params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);
        params.main_specified = false;
        let lines = collect_lines(&children, &[0, 1], &params);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn space_between_two_children() {
        let mut children = vec![sized(50.0, 10.0), sized(50.0, 10.0)];
        let mut params = row_params(Vec2::new(300.0, 50.0), Vec2::ZERO);
        params.main_align = MainAxisAlignment::SpaceBetween;
        let lines = collect_lines(&children, &[0, 1], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.x, 0.0);
        assert_eq!(children[1].computed.position.x, 250.0);
    }

    #[test]
    fn space_between_single_child_falls_back_to_start() {
        let mut children = vec![sized(50.0, 10.0)];
        let mut params = row_params(Vec2::new(300.0, 50.0), Vec2::ZERO);
        params.main_align = MainAxisAlignment::SpaceBetween;
        let lines = collect_lines(&children, &[0], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.x, 0.0);
    }

    #[test]
    fn space_evenly_distributes_around() {
        let mut children = vec![sized(40.0, 10.0), sized(40.0, 10.0)];
        let mut params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);
        params.main_align = MainAxisAlignment::SpaceEvenly;
        let lines = collect_lines(&children, &[0, 1], &params);
        arrange(&mut children, &lines, &params);
        // 100 - 80 = 20 split into three gaps.
        let third = 20.0 / 3.0;
        assert!((children[0].computed.position.x - third).abs() < 1e-4);
        assert!((children[1].computed.position.x - (third * 2.0 + 40.0)).abs() < 1e-4);
    }

    #[test]
    fn end_and_center_alignment() {
        let mut params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);

        params.main_align = MainAxisAlignment::End;
        let mut children = vec![sized(40.0, 10.0)];
        let lines = collect_lines(&children, &[0], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.x, 60.0);

        params.main_align = MainAxisAlignment::Center;
        let mut children = vec![sized(40.0, 10.0)];
        let lines = collect_lines(&children, &[0], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.x, 30.0);
    }

    #[test]
    fn cross_alignment_within_line() {
        let mut children = vec![sized(30.0, 40.0), sized(30.0, 20.0)];
        let mut params = row_params(Vec2::new(100.0, 50.0), Vec2::ZERO);

        params.cross_align = CrossAxisAlignment::Center;
        let lines = collect_lines(&children, &[0, 1], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.y, 0.0);
        assert_eq!(children[1].computed.position.y, 10.0);

        let mut children = vec![sized(30.0, 40.0), sized(30.0, 20.0)];
        params.cross_align = CrossAxisAlignment::End;
        let lines = collect_lines(&children, &[0, 1], &params);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[1].computed.position.y, 20.0);
    }

    #[test]
    fn second_line_offset_by_cross_gap() {
        let mut children = vec![sized(80.0, 10.0), sized(80.0, 20.0)];
        let params = row_params(Vec2::new(100.0, 50.0), Vec2::new(5.0, 7.0));
        let lines = collect_lines(&children, &[0, 1], &params);
        assert_eq!(lines.len(), 2);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position.y, 0.0);
        assert_eq!(children[1].computed.position.y, 17.0);
        let content = content_size(&lines, &params);
        assert_eq!(content, Vec2::new(80.0, 37.0));
    }

    #[test]
    fn column_direction_transposes() {
        let mut children = vec![sized(10.0, 40.0), sized(10.0, 40.0), sized(10.0, 40.0)];
        let params = FlexParams {
            direction: FlexDirection::Column,
            wrap: true,
            main_specified: true,
            inner: Vec2::new(50.0, 100.0),
            gap: Vec2::new(3.0, 5.0),
            main_align: MainAxisAlignment::Start,
            cross_align: CrossAxisAlignment::Start,
        };
        let lines = collect_lines(&children, &[0, 1, 2], &params);
        // 40 + 5 + 40 = 85 fits; the third wraps to a new column.
        assert_eq!(lines.len(), 2);
        arrange(&mut children, &lines, &params);
        assert_eq!(children[0].computed.position, Vec2::ZERO);
        assert_eq!(children[1].computed.position, Vec2::new(0.0, 45.0));
        assert_eq!(children[2].computed.position, Vec2::new(13.0, 0.0));
        let content = content_size(&lines, &params);
        assert_eq!(content, Vec2::new(23.0, 85.0));
    }

    #[test]
    fn content_size_row() {
        let children = vec![sized(60.0, 10.0), sized(60.0, 30.0)];
        let params = row_params(Vec2::new(100.0, 100.0), Vec2::new(0.0, 4.0));
        let lines = collect_lines(&children, &[0, 1], &params);
        assert_eq!(content_size(&lines, &params), Vec2::new(60.0, 44.0));
    }
}
