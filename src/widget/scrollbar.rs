use glam::Vec2;

use crate::anim::AnimationTimer;

fn round2(v: Vec2) -> Vec2 {
    Vec2::new((v.x * 100.0).round() / 100.0, (v.y * 100.0).round() / 100.0)
}

/// Scroll state machine: a target position the wheel moves, a current
/// position eased toward it, and thumb geometry over a track. Pure state,
/// no nodes; `ScrollView` wires it into a tree.
///
/// Positions are clamped into `[0, scroll_range]` per axis when read, so a
/// target set before the first layout sync survives the range changing.
pub struct Scrollbar {
    current: Vec2,
    target: Vec2,
    original: Vec2,
    last_target: Vec2,
    mask_size: Vec2,
    content_size: Vec2,
    track_size: Vec2,
    timer: AnimationTimer,
    drag_offset: Option<Vec2>,
    /// Applied to wheel deltas.
    pub multiplier: f32,
    /// Report unusable when the content fits the mask.
    pub auto_disable: bool,
    /// Keep the thumb at least a track-width square.
    pub limit_thumb_size: bool,
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollbar {
    pub fn new() -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            original: Vec2::ZERO,
            last_target: Vec2::ZERO,
            mask_size: Vec2::ONE,
            content_size: Vec2::ONE,
            track_size: Vec2::ONE,
            timer: AnimationTimer::new(10.0),
            drag_offset: None,
            multiplier: 1.0,
            auto_disable: true,
            limit_thumb_size: true,
        }
    }

    /// Degenerate sizes collapse to one pixel so ratios stay defined.
    pub fn set_area(&mut self, mask_size: Vec2, content_size: Vec2) {
        self.mask_size = mask_size.max(Vec2::ONE);
        self.content_size = content_size.max(Vec2::ONE);
    }

    pub fn set_track_size(&mut self, track_size: Vec2) {
        self.track_size = track_size.max(Vec2::ONE);
    }

    pub fn scroll_range(&self) -> Vec2 {
        round2((self.content_size - self.mask_size).max(Vec2::ZERO))
    }

    fn clamp(&self, v: Vec2) -> Vec2 {
        v.clamp(Vec2::ZERO, self.scroll_range())
    }

    pub fn current(&self) -> Vec2 {
        self.clamp(self.current)
    }

    pub fn target(&self) -> Vec2 {
        self.clamp(self.target)
    }

    /// Stored raw; `target()` clamps against the current range.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn wheel(&mut self, delta: Vec2) {
        self.set_target(self.target() + delta * self.multiplier);
    }

    pub fn usable_horizontal(&self) -> bool {
        !self.auto_disable || self.content_size.x > self.mask_size.x
    }

    pub fn usable_vertical(&self) -> bool {
        !self.auto_disable || self.content_size.y > self.mask_size.y
    }

    pub fn usable(&self) -> bool {
        self.usable_horizontal() || self.usable_vertical()
    }

    /// Advances the easing. A fresh target restarts the sweep from the
    /// current position.
    pub fn update(&mut self, dt: f32) {
        let target = self.target();
        if self.last_target != target {
            self.last_target = target;
            self.original = self.current();
            self.timer.restart_forward();
        }
        self.timer.update(dt);
        if self.current() != target {
            self.current = self.timer.lerp_vec2(self.original, target);
        }
    }

    /// Skips the animation entirely.
    pub fn set_position_directly(&mut self, position: Vec2) {
        let position = self.clamp(position);
        self.current = position;
        self.original = position;
        self.target = position;
        self.last_target = position;
    }

    // --- thumb geometry, all in track-local space ---

    pub fn thumb_size(&self) -> Vec2 {
        let size = self.track_size * (self.mask_size / self.content_size);
        if !self.limit_thumb_size {
            return size;
        }
        let min = Vec2::splat(self.track_size.min_element());
        size.clamp(min.min(self.track_size), self.track_size)
    }

    pub fn thumb_position(&self) -> Vec2 {
        self.current() / self.content_size * self.track_size
    }

    pub fn is_over_thumb(&self, local: Vec2) -> bool {
        let position = self.thumb_position();
        let size = self.thumb_size();
        local.x > position.x
            && local.y > position.y
            && local.x < position.x + size.x
            && local.y < position.y + size.y
    }

    // --- dragging ---

    /// Starts a drag when `local` (track space) is over the thumb. The grab
    /// offset keeps the thumb from jumping under the pointer.
    pub fn begin_drag(&mut self, local: Vec2) -> bool {
        if !self.usable() || !self.is_over_thumb(local) {
            return false;
        }
        self.drag_offset = Some(local - self.thumb_position());
        true
    }

    pub fn drag_to(&mut self, local: Vec2) {
        if let Some(offset) = self.drag_offset {
            let thumb = local - offset;
            self.set_position_directly(self.content_size * thumb / self.track_size);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_offset = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }
}
