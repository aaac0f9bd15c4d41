use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::node::Node;
use crate::style::{Color, LayoutValue, Positioning, ScrollDirection};

use super::Scrollbar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    fn pick(self, v: Vec2) -> Vec2 {
        match self {
            ScrollAxis::Horizontal => Vec2::new(v.x, 0.0),
            ScrollAxis::Vertical => Vec2::new(0.0, v.y),
        }
    }
}

const TRACK_THICKNESS: f32 = 8.0;

/// A clipped mask, an auto-sized content host and an overlaid scrollbar
/// track composed under one root node. The scrollbar state is shared with
/// the track's handlers through `Rc<RefCell<_>>`.
///
/// Per frame: let the dispatcher run, call `update(dt)`, then recalculate
/// and flush the tree that owns this view's root.
pub struct ScrollView {
    root: Node,
    scrollbar: Rc<RefCell<Scrollbar>>,
    axis: ScrollAxis,
    mask_id: u64,
    content_id: u64,
    track_id: u64,
    thumb_id: u64,
}

impl ScrollView {
    pub fn new(axis: ScrollAxis) -> Self {
        let scrollbar = Rc::new(RefCell::new(Scrollbar::new()));

        let mut root = Node::named("scroll-view");
        root.set_size(LayoutValue::percent(1.0), LayoutValue::percent(1.0));

        let mut mask = Node::named("scroll-mask");
        mask.set_size(LayoutValue::percent(1.0), LayoutValue::percent(1.0));
        mask.overflow_hidden = true;
        mask.scroll_direction = match axis {
            ScrollAxis::Horizontal => ScrollDirection::Horizontal,
            ScrollAxis::Vertical => ScrollDirection::Vertical,
        };
        {
            let scrollbar = scrollbar.clone();
            mask.on_scroll(move |event| {
                scrollbar.borrow_mut().wheel(event.delta);
                event.handled = true;
            });
        }

        let mut content = Node::named("scroll-content");
        match axis {
            ScrollAxis::Horizontal => content.set_height(LayoutValue::percent(1.0)),
            ScrollAxis::Vertical => content.set_width(LayoutValue::percent(1.0)),
        }

        let mut track = Node::named("scroll-track");
        track.positioning = Positioning::Absolute;
        match axis {
            ScrollAxis::Horizontal => {
                track.set_size(LayoutValue::percent(1.0), LayoutValue::px(TRACK_THICKNESS));
                track.v_align = 1.0;
            }
            ScrollAxis::Vertical => {
                track.set_size(LayoutValue::px(TRACK_THICKNESS), LayoutValue::percent(1.0));
                track.h_align = 1.0;
            }
        }
        // Grabbing the track must not drag an ancestor panel around.
        track.drag_ignore = false;
        {
            let scrollbar = scrollbar.clone();
            track.on_mouse_down(move |event| {
                scrollbar.borrow_mut().begin_drag(event.local);
            });
        }
        {
            let scrollbar = scrollbar.clone();
            track.on_mouse_move(move |event| {
                scrollbar.borrow_mut().drag_to(event.local);
            });
        }
        {
            let scrollbar = scrollbar.clone();
            track.on_mouse_up(move |_| {
                scrollbar.borrow_mut().end_drag();
            });
        }

        let mut thumb = Node::named("scroll-thumb");
        thumb.positioning = Positioning::Absolute;
        thumb.ignore_mouse = true;
        thumb.box_model.background = Color::BLACK * 0.4;

        let thumb_id = track.append(thumb);
        let content_id = mask.append(content);
        let mask_id = root.append(mask);
        let track_id = root.append(track);

        Self {
            root,
            scrollbar,
            axis,
            mask_id,
            content_id,
            track_id,
            thumb_id,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn content_id(&self) -> u64 {
        self.content_id
    }

    pub fn track_id(&self) -> u64 {
        self.track_id
    }

    pub fn scrollbar(&self) -> Rc<RefCell<Scrollbar>> {
        self.scrollbar.clone()
    }

    /// Appends into the content host.
    pub fn append(&mut self, child: Node) -> u64 {
        self.root
            .find_mut(self.content_id)
            .map(|content| content.append(child))
            .unwrap_or_default()
    }

    /// Syncs the scrollbar with the computed layout, advances the easing and
    /// writes the result back into the tree: the mask's scroll offset and
    /// the thumb's rectangle. The caller recalculates afterwards.
    pub fn update(&mut self, dt: f32) {
        let mask_inner = self
            .root
            .find(self.mask_id)
            .map(|mask| mask.inner_bounds().size)
            .unwrap_or(Vec2::ONE);
        let content_size = self
            .root
            .find(self.content_id)
            .map(|content| content.outer_bounds().size)
            .unwrap_or(Vec2::ONE);
        let track_inner = self
            .root
            .find(self.track_id)
            .map(|track| track.inner_bounds().size)
            .unwrap_or(Vec2::ONE);

        let (current, thumb_position, thumb_size, usable) = {
            let mut scrollbar = self.scrollbar.borrow_mut();
            scrollbar.set_area(mask_inner, content_size);
            scrollbar.set_track_size(track_inner);
            scrollbar.update(dt);
            (
                scrollbar.current(),
                scrollbar.thumb_position(),
                scrollbar.thumb_size(),
                scrollbar.usable(),
            )
        };

        if let Some(mask) = self.root.find_mut(self.mask_id) {
            mask.set_scroll_offset(self.axis.pick(current));
        }
        if let Some(track) = self.root.find_mut(self.track_id) {
            track.ignore_mouse = !usable;
        }
        if let Some(thumb) = self.root.find_mut(self.thumb_id) {
            thumb.set_left(LayoutValue::px(thumb_position.x));
            thumb.set_top(LayoutValue::px(thumb_position.y));
            thumb.set_size(
                LayoutValue::px(thumb_size.x),
                LayoutValue::px(thumb_size.y),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::{InteractionDispatcher, PointerState};

    const SCREEN: Vec2 = Vec2::new(100.0, 100.0);

    fn filled_view() -> ScrollView {
        let mut view = ScrollView::new(ScrollAxis::Vertical);
        for _ in 0..3 {
            let mut row = Node::new();
            row.set_size(LayoutValue::px(80.0), LayoutValue::px(80.0));
            view.append(row);
        }
        view.root_mut().recalculate(SCREEN);
        view.root_mut().flush_positions();
        view
    }

    #[test]
    fn wheel_scrolls_the_mask() {
        let mut view = filled_view();
        let mut dispatcher = InteractionDispatcher::new();
        let wheel = PointerState {
            position: Vec2::new(50.0, 50.0),
            wheel_delta: Vec2::new(0.0, 30.0),
            ..Default::default()
        };
        dispatcher.update(view.root_mut(), &wheel);
        view.update(1.0);
        view.root_mut().recalculate(SCREEN);
        view.root_mut().flush_positions();

        let mask = view.root().find(view.mask_id).unwrap();
        assert_eq!(mask.scroll_offset(), Vec2::new(0.0, 30.0));
        // Content rows moved up against the scroll.
        let content = view.root().find(view.content_id).unwrap();
        assert_eq!(content.children()[0].outer_bounds().position.y, -30.0);
    }

    #[test]
    fn wheel_target_clamps_to_content_range() {
        let mut view = filled_view();
        view.update(0.0);
        view.scrollbar().borrow_mut().wheel(Vec2::new(0.0, 10_000.0));
        view.update(1.0);
        // 240 content in a 100 mask.
        assert_eq!(
            view.scrollbar().borrow().current(),
            Vec2::new(0.0, 140.0)
        );
    }

    #[test]
    fn thumb_reflects_mask_fraction_and_position() {
        let mut view = filled_view();
        view.update(0.0);
        view.scrollbar()
            .borrow_mut()
            .set_position_directly(Vec2::new(0.0, 120.0));
        view.update(0.0);
        view.root_mut().recalculate(SCREEN);

        let track = view.root().find(view.track_id).unwrap();
        let thumb = &track.children()[0];
        // 100/240 of the 100px track, and 120/240 along it.
        assert!((thumb.outer_bounds().size.y - 100.0 * 100.0 / 240.0).abs() < 0.01);
        assert!((thumb.relative_position().y - 50.0).abs() < 0.01);
    }

    #[test]
    fn track_ignores_mouse_when_content_fits() {
        let mut view = ScrollView::new(ScrollAxis::Vertical);
        let mut row = Node::new();
        row.set_size(LayoutValue::px(80.0), LayoutValue::px(20.0));
        view.append(row);
        view.root_mut().recalculate(SCREEN);
        view.update(0.0);
        assert!(view.root().find(view.track_id).unwrap().ignore_mouse);
    }

    #[test]
    fn dragging_the_thumb_jumps_without_easing() {
        let mut view = filled_view();
        view.update(0.0);

        let mut dispatcher = InteractionDispatcher::new();
        // The track occupies x 92..100; thumb spans the top ~41px.
        let hover = PointerState {
            position: Vec2::new(96.0, 10.0),
            ..Default::default()
        };
        dispatcher.update(view.root_mut(), &hover);
        let press = PointerState {
            position: Vec2::new(96.0, 10.0),
            left: true,
            ..Default::default()
        };
        dispatcher.update(view.root_mut(), &press);
        assert!(view.scrollbar().borrow().is_dragging());

        let drag = PointerState {
            position: Vec2::new(96.0, 40.0),
            left: true,
            ..Default::default()
        };
        dispatcher.update(view.root_mut(), &drag);
        // Thumb top moved 30px on a 100px track over 240px of content.
        assert_eq!(
            view.scrollbar().borrow().current(),
            Vec2::new(0.0, 72.0)
        );

        let release = PointerState {
            position: Vec2::new(96.0, 40.0),
            ..Default::default()
        };
        dispatcher.update(view.root_mut(), &release);
        assert!(!view.scrollbar().borrow().is_dragging());
    }
}
