//! Expanding, fading rings at arc endpoints.

/// Ring animation state. `Growing` means armed: the ring starts its
/// expanding fade on the next tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingPhase {
    Waiting,
    Growing,
    Shrinking,
    Done,
}

/// Opacity at or below which a fading ring is finished.
pub const RING_DONE_OPACITY: f64 = 0.05;
pub const MIN_RING_SPEED: f64 = 0.001;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Fraction of the remaining distance to `max_scale` covered per tick.
    pub speed: f64,
    /// Outer radius of the ring mesh at scale 1, in world units.
    pub radius: f64,
}

impl Default for RingSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 3.0,
            speed: 0.02,
            radius: 1.5,
        }
    }
}

impl RingSettings {
    pub fn clamped_speed(&self) -> f64 {
        if self.speed.is_finite() {
            self.speed.clamp(MIN_RING_SPEED, 1.0)
        } else {
            MIN_RING_SPEED
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingAnimation {
    pub phase: RingPhase,
    pub scale: f64,
    pub opacity: f64,
}

impl RingAnimation {
    /// Ring that starts fading as soon as it is ticked.
    pub fn armed(settings: &RingSettings) -> Self {
        Self {
            phase: RingPhase::Growing,
            scale: settings.min_scale,
            opacity: 1.0,
        }
    }

    /// Ring that stays put until [`RingAnimation::reveal`].
    pub fn waiting(settings: &RingSettings) -> Self {
        Self {
            phase: RingPhase::Waiting,
            ..Self::armed(settings)
        }
    }

    pub fn disabled() -> Self {
        Self {
            phase: RingPhase::Done,
            scale: 0.0,
            opacity: 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase == RingPhase::Shrinking
    }

    pub fn is_done(&self) -> bool {
        self.phase == RingPhase::Done
    }

    pub fn reveal(&mut self) {
        if self.phase == RingPhase::Waiting {
            self.phase = RingPhase::Growing;
        }
    }

    /// Enter the fade at minimum scale and full opacity.
    pub fn begin_fade(&mut self, settings: &RingSettings) {
        if self.phase != RingPhase::Growing {
            return;
        }
        if settings.max_scale <= settings.min_scale {
            self.finish();
            return;
        }
        self.phase = RingPhase::Shrinking;
        self.scale = settings.min_scale;
        self.opacity = 1.0;
    }

    pub fn tick(&mut self, settings: &RingSettings) {
        match self.phase {
            RingPhase::Waiting | RingPhase::Done => {}
            RingPhase::Growing => self.begin_fade(settings),
            RingPhase::Shrinking => {
                let span = settings.max_scale - settings.min_scale;
                if !(span > 0.0) {
                    self.finish();
                    return;
                }
                self.scale += (settings.max_scale - self.scale) * settings.clamped_speed();
                let progress = ((self.scale - settings.min_scale) / span).clamp(0.0, 1.0);
                self.opacity = self.opacity.min(1.0 - progress);
                if self.opacity <= RING_DONE_OPACITY {
                    self.finish();
                }
            }
        }
    }

    fn finish(&mut self) {
        self.phase = RingPhase::Done;
        self.opacity = 0.0;
    }
}
