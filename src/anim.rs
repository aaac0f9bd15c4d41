use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeFunction {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl TimeFunction {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) * 0.5)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerDirection {
    Forward,
    Reverse,
}

/// Speed-driven progress timer. `speed` is full sweeps per second; progress
/// runs 0..1 and is eased through `timing` when sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTimer {
    speed: f32,
    progress: f32,
    direction: TimerDirection,
    pub timing: TimeFunction,
}

impl Default for AnimationTimer {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl AnimationTimer {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            progress: 1.0,
            direction: TimerDirection::Forward,
            timing: TimeFunction::default(),
        }
    }

    pub fn start_forward(&mut self) {
        self.direction = TimerDirection::Forward;
    }

    pub fn start_reverse(&mut self) {
        self.direction = TimerDirection::Reverse;
    }

    /// Rewind to zero and run forward again.
    pub fn restart_forward(&mut self) {
        self.progress = 0.0;
        self.direction = TimerDirection::Forward;
    }

    pub fn update(&mut self, dt: f32) {
        let step = self.speed * dt.max(0.0);
        self.progress = match self.direction {
            TimerDirection::Forward => (self.progress + step).min(1.0),
            TimerDirection::Reverse => (self.progress - step).max(0.0),
        };
    }

    pub fn is_forward(&self) -> bool {
        self.direction == TimerDirection::Forward
    }

    pub fn is_finished(&self) -> bool {
        match self.direction {
            TimerDirection::Forward => self.progress >= 1.0,
            TimerDirection::Reverse => self.progress <= 0.0,
        }
    }

    /// Eased progress in 0..1.
    pub fn eased(&self) -> f32 {
        self.timing.sample(self.progress)
    }

    pub fn lerp(&self, from: f32, to: f32) -> f32 {
        from + (to - from) * self.eased()
    }

    pub fn lerp_vec2(&self, from: Vec2, to: Vec2) -> Vec2 {
        from + (to - from) * self.eased()
    }
}
