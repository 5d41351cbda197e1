use std::collections::BTreeMap;

use crate::error::{StradaError, StradaResult};
use crate::layout::Layout;
use crate::timeline::{Property, Timeline, Trigger};

/// Resolved visual properties for one target at one instant.
///
/// Defaults are the identity: fully opaque, unscaled, untranslated. `value`
/// carries non-visual numbers such as counter readouts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub x_percent: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub scale_x: f64,
    pub value: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            value: 0.0,
        }
    }
}

impl VisualState {
    fn apply(&mut self, prop: Property, value: f64) {
        match prop {
            Property::Opacity => self.opacity = value,
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::XPercent => self.x_percent = value,
            Property::YPercent => self.y_percent = value,
            Property::Scale => self.scale = value,
            Property::ScaleX => self.scale_x = value,
            Property::Value => self.value = value,
        }
    }
}

/// Snapshot of every choreographed target at one scroll position. Targets
/// are keyed by name in a stable order so serialized snapshots diff cleanly.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluatedPage {
    pub scroll: f64,
    pub targets: BTreeMap<String, VisualState>,
}

impl EvaluatedPage {
    /// State for `name`, or the identity state if nothing animates it.
    pub fn target(&self, name: &str) -> VisualState {
        self.targets.get(name).copied().unwrap_or_default()
    }

    pub fn to_json(&self) -> StradaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StradaError::serde(e.to_string()))
    }
}

struct Entry {
    timeline: Timeline,
    trigger: Trigger,
    duration: f64,
    playhead: f64,
}

/// Owns every (trigger, timeline) pair on the page and advances their
/// playheads each tick. Scrubbed entries derive the playhead from scroll,
/// timed entries integrate `dt`; [`Choreographer::evaluate`] then samples
/// them all into an [`EvaluatedPage`].
#[derive(Default)]
pub struct Choreographer {
    entries: Vec<Entry>,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timeline: Timeline, trigger: Trigger) -> StradaResult<()> {
        timeline.validate()?;
        trigger.validate()?;
        let duration = timeline.duration();
        self.entries.push(Entry {
            timeline,
            trigger,
            duration,
            playhead: 0.0,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current playhead of the named timeline, for diagnostics.
    pub fn playhead(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.timeline.name == name)
            .map(|e| e.playhead)
    }

    /// Carry playheads over from a previous build of the same page, matched
    /// by timeline name. Scrubbed entries re-derive from scroll on the next
    /// tick anyway; this keeps toggled and one-shot entries from replaying
    /// after a re-layout.
    pub fn restore_playheads(&mut self, prev: &Choreographer) {
        for entry in &mut self.entries {
            let carried = prev
                .entries
                .iter()
                .find(|e| e.timeline.name == entry.timeline.name)
                .map(|e| e.playhead);
            if let Some(playhead) = carried {
                entry.playhead = match entry.trigger {
                    Trigger::Once { delay } => playhead.min(delay + entry.duration),
                    _ => playhead.min(entry.duration),
                };
            }
        }
    }

    /// Advance all playheads. Scrubbed triggers are a pure function of
    /// `scroll`; toggled and one-shot triggers accumulate `dt`.
    pub fn tick(&mut self, dt: f64, scroll: f64, layout: &Layout) {
        for entry in &mut self.entries {
            match &entry.trigger {
                Trigger::Range { start, end } => {
                    let progress = ((scroll - start) / (end - start)).clamp(0.0, 1.0);
                    entry.playhead = progress * entry.duration;
                }
                Trigger::Pin { section } => {
                    let progress = layout
                        .section(section)
                        .map(|s| s.pin_progress(scroll))
                        .unwrap_or(0.0);
                    entry.playhead = progress * entry.duration;
                }
                Trigger::Toggle { start, end } => {
                    let inside = scroll >= *start && scroll < *end;
                    let step = if inside { dt } else { -dt };
                    entry.playhead = (entry.playhead + step).clamp(0.0, entry.duration);
                }
                Trigger::Once { delay } => {
                    entry.playhead = (entry.playhead + dt).min(delay + entry.duration);
                }
            }
        }
    }

    /// Sample every entry at its playhead. Entries pushed later override
    /// earlier ones where they touch the same (target, property).
    #[tracing::instrument(skip_all, fields(scroll = scroll, entries = self.entries.len()))]
    pub fn evaluate(&self, scroll: f64) -> EvaluatedPage {
        let mut page = EvaluatedPage {
            scroll,
            ..EvaluatedPage::default()
        };
        for entry in &self.entries {
            let playhead = match entry.trigger {
                Trigger::Once { delay } => entry.playhead - delay,
                _ => entry.playhead,
            };
            entry.timeline.sample_into(playhead, &mut |target, prop, value| {
                page.targets
                    .entry(target.to_string())
                    .or_default()
                    .apply(prop, value);
            });
        }
        tracing::debug!(targets = page.targets.len(), "evaluated page");
        page
    }
}
