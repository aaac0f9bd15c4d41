use glam::Vec2;

use crate::node::Node;

/// Stacks flow children vertically, adding the running top to each child's
/// already-resolved offset.
pub(crate) fn arrange(children: &mut [Node], flow: &[usize], gap_y: f32) {
    let mut top = 0.0;
    for &index in flow {
        let child = &mut children[index];
        child.computed.position.y += top;
        top += child.computed.outer.size.y + gap_y;
    }
}

/// Union extent of the laid-out flow children, measured from the inner-box
/// origin.
pub(crate) fn content_extent(children: &[Node], flow: &[usize]) -> Vec2 {
    let mut extent = Vec2::ZERO;
    for &index in flow {
        let child = &children[index];
        extent = extent.max(child.computed.position + child.computed.outer.size);
    }
    extent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::style::LayoutValue;

    fn sized(width: f32, height: f32) -> Node {
        let mut node = Node::new();
        node.set_size(LayoutValue::px(width), LayoutValue::px(height));
        node.computed.outer.size = Vec2::new(width, height);
        node
    }

    #[test]
    fn stacks_with_gap() {
        let mut children = vec![sized(40.0, 10.0), sized(40.0, 20.0), sized(40.0, 30.0)];
        let flow = [0, 1, 2];
        arrange(&mut children, &flow, 5.0);
        assert_eq!(children[0].computed.position.y, 0.0);
        assert_eq!(children[1].computed.position.y, 15.0);
        assert_eq!(children[2].computed.position.y, 40.0);
        let extent = content_extent(&children, &flow);
        assert_eq!(extent, Vec2::new(40.0, 70.0));
    }

    #[test]
    fn keeps_resolved_offsets() {
        let mut children = vec![sized(10.0, 10.0), sized(10.0, 10.0)];
        children[1].computed.position = Vec2::new(3.0, 4.0);
        arrange(&mut children, &[0, 1], 0.0);
        assert_eq!(children[1].computed.position, Vec2::new(3.0, 14.0));
    }

    #[test]
    fn extent_of_empty_is_zero() {
        let children: Vec<Node> = Vec::new();
        assert_eq!(content_extent(&children, &[]), Vec2::ZERO);
    }
}
