use std::collections::BTreeMap;

use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};

/// Visual properties a tween can drive. Translations are in pixels; the
/// percent variants are relative to the target's own size, as in CSS.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Property {
    Opacity,
    X,
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    Value,
}

/// One property transition. `start` and `duration` are in timeline units;
/// what a unit means (seconds, scroll progress) is decided by the trigger
/// driving the playhead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub target: String,
    pub prop: Property,
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Value at `playhead`, assuming the tween has started. Holds `to` after
    /// its end; a zero-duration tween acts as a set.
    fn value_at(&self, playhead: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((playhead - self.start) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.ease.apply(t)
    }
}

/// An instantaneous property assignment applied before any tween starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Set {
    pub target: String,
    pub prop: Property,
    pub value: f64,
}

/// An ordered set of tweens over named targets, sampled at a playhead.
///
/// Sampling resolves overlaps per (target, property) with last-started-wins:
/// among tweens whose start has been reached, the one with the greatest
/// start owns the property (declaration order breaks exact ties). Initial
/// sets apply when no tween has started for that property yet.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub name: String,
    pub initial: Vec<Set>,
    pub tweens: Vec<Tween>,
}

impl Timeline {
    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    pub fn validate(&self) -> StradaResult<()> {
        if self.name.trim().is_empty() {
            return Err(StradaError::animation("Timeline name must be non-empty"));
        }
        for set in &self.initial {
            if set.target.trim().is_empty() {
                return Err(StradaError::animation(format!(
                    "{}: set target must be non-empty",
                    self.name
                )));
            }
            if !set.value.is_finite() {
                return Err(StradaError::animation(format!(
                    "{}: set value must be finite",
                    self.name
                )));
            }
        }
        for tween in &self.tweens {
            if tween.target.trim().is_empty() {
                return Err(StradaError::animation(format!(
                    "{}: tween target must be non-empty",
                    self.name
                )));
            }
            if !(tween.start >= 0.0 && tween.start.is_finite()) {
                return Err(StradaError::animation(format!(
                    "{}: tween start must be >= 0",
                    self.name
                )));
            }
            if !(tween.duration >= 0.0 && tween.duration.is_finite()) {
                return Err(StradaError::animation(format!(
                    "{}: tween duration must be >= 0",
                    self.name
                )));
            }
            if !(tween.from.is_finite() && tween.to.is_finite()) {
                return Err(StradaError::animation(format!(
                    "{}: tween endpoints must be finite",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Sample every property this timeline owns at `playhead` and hand the
    /// resolved values to `write`.
    pub fn sample_into(&self, playhead: f64, write: &mut impl FnMut(&str, Property, f64)) {
        // (start, value) per key; higher start wins, ties go to later entries.
        let mut winners: BTreeMap<(&str, Property), (f64, f64)> = BTreeMap::new();

        for set in &self.initial {
            winners.insert((set.target.as_str(), set.prop), (f64::NEG_INFINITY, set.value));
        }
        for tween in &self.tweens {
            if playhead < tween.start {
                continue;
            }
            let candidate = (tween.start, tween.value_at(playhead));
            winners
                .entry((tween.target.as_str(), tween.prop))
                .and_modify(|held| {
                    if candidate.0 >= held.0 {
                        *held = candidate;
                    }
                })
                .or_insert(candidate);
        }

        for ((target, prop), (_, value)) in winners {
            write(target, prop, value);
        }
    }
}

/// Cursor-tracking constructor for [`Timeline`], in the spirit of sequenced
/// animation tooling: `at(b.end() - 0.2, ...)` inserts relative to the
/// current timeline end.
#[derive(Debug)]
pub struct TimelineBuilder {
    name: String,
    initial: Vec<Set>,
    tweens: Vec<Tween>,
}

impl TimelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: Vec::new(),
            tweens: Vec::new(),
        }
    }

    /// Current timeline end; the insertion point for sequential tweens.
    pub fn end(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    pub fn init(&mut self, target: &str, prop: Property, value: f64) -> &mut Self {
        self.initial.push(Set {
            target: target.to_string(),
            prop,
            value,
        });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn at(
        &mut self,
        start: f64,
        target: &str,
        prop: Property,
        from: f64,
        to: f64,
        duration: f64,
        ease: Ease,
    ) -> &mut Self {
        self.tweens.push(Tween {
            target: target.to_string(),
            prop,
            from,
            to,
            start,
            duration,
            ease,
        });
        self
    }

    /// Append at the current end.
    #[allow(clippy::too_many_arguments)]
    pub fn seq(
        &mut self,
        target: &str,
        prop: Property,
        from: f64,
        to: f64,
        duration: f64,
        ease: Ease,
    ) -> &mut Self {
        let start = self.end();
        self.at(start, target, prop, from, to, duration, ease)
    }

    /// One tween per target, offset by `each`. A negative `each` staggers in
    /// reverse: the last target starts first.
    #[allow(clippy::too_many_arguments)]
    pub fn stagger_at(
        &mut self,
        start: f64,
        targets: &[String],
        prop: Property,
        from: f64,
        to: f64,
        duration: f64,
        each: f64,
        ease: Ease,
    ) -> &mut Self {
        let last = targets.len().saturating_sub(1);
        for (i, target) in targets.iter().enumerate() {
            let offset = if each >= 0.0 {
                i as f64 * each
            } else {
                (last - i) as f64 * -each
            };
            self.at(start + offset, target, prop, from, to, duration, ease);
        }
        self
    }

    pub fn build(self) -> StradaResult<Timeline> {
        let timeline = Timeline {
            name: self.name,
            initial: self.initial,
            tweens: self.tweens,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

/// What drives a timeline's playhead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Trigger {
    /// Scrub: scroll positions `start..end` map linearly onto the timeline.
    Range { start: f64, end: f64 },
    /// Scrub across a pinned section's pin distance.
    Pin { section: String },
    /// Play forward in real time while scroll is inside `start..end`,
    /// reverse back out when it leaves. Re-entering replays.
    Toggle { start: f64, end: f64 },
    /// Play once in real time, `delay` units after choreography start.
    Once { delay: f64 },
}

impl Trigger {
    pub fn validate(&self) -> StradaResult<()> {
        match self {
            Self::Range { start, end } | Self::Toggle { start, end } => {
                if !(start.is_finite() && end.is_finite() && start < end) {
                    return Err(StradaError::animation(
                        "trigger range must satisfy start < end",
                    ));
                }
                Ok(())
            }
            Self::Pin { section } => {
                if section.trim().is_empty() {
                    return Err(StradaError::animation("Pin trigger needs a section id"));
                }
                Ok(())
            }
            Self::Once { delay } => {
                if !(delay.is_finite() && *delay >= 0.0) {
                    return Err(StradaError::animation("Once delay must be >= 0"));
                }
                Ok(())
            }
        }
    }
}
