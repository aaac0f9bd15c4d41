use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::anim::AnimationTimer;
use crate::node::Node;
use crate::style::{Color, CornerRadii, EdgeInsets, LayoutValue, Positioning};

/// On/off switch: a pill-shaped node with a round knob that eases between
/// the ends of the inner box. Clicking the switch flips the state; the host
/// calls `update(dt)` each frame and recalculates the owning tree after.
pub struct Toggle {
    root: Node,
    state: Rc<Cell<bool>>,
    timer: AnimationTimer,
    knob_id: u64,
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Toggle {
    pub fn new() -> Self {
        let state = Rc::new(Cell::new(false));
        let accent = Color::from_rgba8(18, 18, 38, 255);

        let mut root = Node::named("toggle");
        root.set_size(LayoutValue::px(40.0), LayoutValue::px(22.0));
        root.box_model.padding = EdgeInsets::uniform(4.0);
        root.box_model.border = 2.0;
        root.box_model.border_color = accent;
        root.box_model.corner_radius = CornerRadii::uniform(11.0);
        {
            let state = state.clone();
            root.on_click(move |_| state.set(!state.get()));
        }

        let mut knob = Node::named("toggle-knob");
        knob.positioning = Positioning::Absolute;
        knob.ignore_mouse = true;
        knob.box_model.background = accent;
        let knob_id = root.append(knob);

        let mut timer = AnimationTimer::default();
        // Settle on the off end instead of easing there on the first frame.
        timer.start_reverse();
        timer.update(1.0);

        Self {
            root,
            state,
            timer,
            knob_id,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn is_on(&self) -> bool {
        self.state.get()
    }

    pub fn set_on(&mut self, on: bool) {
        self.state.set(on);
    }

    pub fn toggle(&mut self) {
        self.state.set(!self.state.get());
    }

    /// Drives the knob toward the current state using the computed inner
    /// box. The knob is a circle sized to the short inner axis.
    pub fn update(&mut self, dt: f32) {
        if self.state.get() {
            if !self.timer.is_forward() {
                self.timer.start_forward();
            }
        } else if self.timer.is_forward() {
            self.timer.start_reverse();
        }
        self.timer.update(dt);

        let inner = self.root.inner_bounds().size;
        let side = inner.x.min(inner.y);
        let travel = (inner - Vec2::splat(side)) * self.timer.eased();
        if let Some(knob) = self.root.find_mut(self.knob_id) {
            knob.set_left(LayoutValue::px(travel.x));
            knob.set_top(LayoutValue::px(travel.y));
            knob.set_size(LayoutValue::px(side), LayoutValue::px(side));
            knob.box_model.corner_radius = CornerRadii::uniform(side / 2.0);
        }
    }
}
