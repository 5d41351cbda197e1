use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};
use crate::events::{Emitter, SubscriptionId};

/// Tuning for the smoothed scroll. Defaults match the feel the page was
/// designed around: 1.2s glides on an exponential-out curve, wheel deltas
/// taken at face value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOptions {
    pub duration: f64,
    pub ease: Ease,
    pub wheel_multiplier: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            ease: Ease::OutExpo,
            wheel_multiplier: 1.0,
        }
    }
}

impl ScrollOptions {
    pub fn validate(&self) -> StradaResult<()> {
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(StradaError::validation("scroll duration must be > 0"));
        }
        if !(self.wheel_multiplier > 0.0 && self.wheel_multiplier.is_finite()) {
            return Err(StradaError::validation("wheel multiplier must be > 0"));
        }
        Ok(())
    }
}

/// Emitted on every tick, whether or not the position moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub limit: f64,
}

struct Glide {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

/// Smoothed document scroll. Wheel input and programmatic jumps never move
/// the position directly; they retarget a glide that [`ScrollEngine::tick`]
/// integrates, so the reported position is continuous.
///
/// While locked, wheel input and programmatic scrolls are discarded; an
/// in-flight glide still finishes.
pub struct ScrollEngine {
    position: f64,
    limit: f64,
    options: ScrollOptions,
    glide: Option<Glide>,
    locked: bool,
    emitter: Emitter<ScrollEvent>,
}

impl ScrollEngine {
    pub fn new(limit: f64, options: ScrollOptions) -> StradaResult<Self> {
        if !(limit >= 0.0 && limit.is_finite()) {
            return Err(StradaError::validation("scroll limit must be >= 0"));
        }
        options.validate()?;
        Ok(Self {
            position: 0.0,
            limit,
            options,
            glide: None,
            locked: false,
            emitter: Emitter::new(),
        })
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Where the scroll is headed: the glide destination, or the current
    /// position when settled.
    pub fn target(&self) -> f64 {
        self.glide.as_ref().map_or(self.position, |g| g.to)
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Adjust the scrollable extent, e.g. after a viewport resize. The
    /// position and any glide destination are clamped into the new range.
    pub fn set_limit(&mut self, limit: f64) -> StradaResult<()> {
        if !(limit >= 0.0 && limit.is_finite()) {
            return Err(StradaError::validation("scroll limit must be >= 0"));
        }
        self.limit = limit;
        self.position = self.position.clamp(0.0, limit);
        if let Some(glide) = self.glide.as_mut() {
            glide.to = glide.to.clamp(0.0, limit);
        }
        Ok(())
    }

    /// Feed a wheel delta in pixels. Retargets from the current position so
    /// rapid input accumulates into one continuous glide.
    pub fn wheel(&mut self, delta: f64) {
        if self.locked || !delta.is_finite() {
            return;
        }
        let to = (self.target() + delta * self.options.wheel_multiplier).clamp(0.0, self.limit);
        self.glide = Some(Glide {
            from: self.position,
            to,
            elapsed: 0.0,
            duration: self.options.duration,
            ease: self.options.ease,
        });
    }

    /// Glide to an absolute position over `duration` seconds.
    pub fn scroll_to(&mut self, to: f64, duration: f64, ease: Ease) {
        if self.locked || !to.is_finite() || !(duration > 0.0) {
            return;
        }
        self.glide = Some(Glide {
            from: self.position,
            to: to.clamp(0.0, self.limit),
            elapsed: 0.0,
            duration,
            ease,
        });
    }

    pub fn subscribe(&mut self, f: impl FnMut(&ScrollEvent) + 'static) -> SubscriptionId {
        self.emitter.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.emitter.unsubscribe(id)
    }

    /// Advance the glide and notify subscribers. Returns the new position.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if let Some(glide) = self.glide.as_mut() {
            glide.elapsed += dt.max(0.0);
            let t = (glide.elapsed / glide.duration).clamp(0.0, 1.0);
            self.position = glide.from + (glide.to - glide.from) * glide.ease.apply(t);
            if glide.elapsed >= glide.duration {
                self.position = glide.to;
                self.glide = None;
            }
        }
        let event = ScrollEvent {
            scroll: self.position,
            limit: self.limit,
        };
        self.emitter.emit(&event);
        self.position
    }
}
