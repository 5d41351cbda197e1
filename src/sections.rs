use std::collections::BTreeMap;

use crate::core::{Rect, Viewport};

/// Ratio steps at which visibility is re-examined. Between steps the active
/// section is left alone, so small scroll jitter cannot flap it.
const THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Fraction of the viewport shaved off the top and bottom of the observation
/// window. A section only counts as visible once it reaches the middle 80%.
const WINDOW_INSET: f64 = 0.10;

#[derive(Clone, Debug)]
struct Observed {
    rect: Rect,
    bucket: usize,
}

/// Tracks which section currently owns the viewport.
///
/// Sections are observed against an inset viewport window. Whenever any
/// section crosses a visibility threshold, the section with the greatest
/// visible ratio becomes active; exact ties keep the first id in order. The
/// active section never resets to `None` once set, so the chrome always has
/// something to highlight.
#[derive(Default)]
pub struct SectionRegistry {
    sections: BTreeMap<String, Observed>,
    active: Option<String>,
    dirty: bool,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or move a section. Re-registering with an unchanged rect is
    /// a no-op, so pinned sections can be refreshed every tick.
    pub fn register(&mut self, id: &str, rect: Rect) {
        match self.sections.get_mut(id) {
            Some(observed) if observed.rect == rect => {}
            Some(observed) => {
                observed.rect = rect;
                self.dirty = true;
            }
            None => {
                self.sections.insert(
                    id.to_string(),
                    Observed { rect, bucket: 0 },
                );
                self.dirty = true;
            }
        }
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        let removed = self.sections.remove(id).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Re-observe all sections at `scroll`. Returns true when the active
    /// section changed.
    pub fn update(&mut self, scroll: f64, viewport: Viewport) -> bool {
        let inset = viewport.height * WINDOW_INSET;
        let window_top = scroll + inset;
        let window_bottom = scroll + viewport.height - inset;

        let mut fired = self.dirty;
        self.dirty = false;

        let mut ratios: Vec<(&str, f64)> = Vec::with_capacity(self.sections.len());
        for (id, observed) in &mut self.sections {
            let ratio = visible_ratio(&observed.rect, window_top, window_bottom);
            let bucket = bucket_for(ratio);
            if bucket != observed.bucket {
                observed.bucket = bucket;
                fired = true;
            }
            ratios.push((id.as_str(), ratio));
        }

        if !fired {
            return false;
        }

        let mut best: Option<(&str, f64)> = None;
        for (id, ratio) in ratios {
            if ratio <= 0.0 {
                continue;
            }
            // Strict comparison keeps the earlier id on ties.
            if best.map_or(true, |(_, held)| ratio > held) {
                best = Some((id, ratio));
            }
        }

        match best {
            Some((id, _)) if self.active.as_deref() != Some(id) => {
                self.active = Some(id.to_string());
                true
            }
            // Nothing visible keeps the previous answer.
            _ => false,
        }
    }
}

/// Fraction of `rect` inside the window, by height.
fn visible_ratio(rect: &Rect, window_top: f64, window_bottom: f64) -> f64 {
    let overlap = rect.y1.min(window_bottom) - rect.y0.max(window_top);
    let height = rect.height();
    if overlap <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    (overlap / height).clamp(0.0, 1.0)
}

/// Number of thresholds at or below `ratio`; 0 means not intersecting.
fn bucket_for(ratio: f64) -> usize {
    if ratio <= 0.0 {
        return 0;
    }
    THRESHOLDS.iter().filter(|t| ratio >= **t).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 1000.0).unwrap()
    }

    fn band(y0: f64, y1: f64) -> Rect {
        Rect::new(0.0, y0, 1280.0, y1)
    }

    #[test]
    fn the_most_visible_section_wins() {
        let mut reg = SectionRegistry::new();
        reg.register("hero", band(0.0, 5000.0));
        reg.register("history", band(5000.0, 6000.0));

        assert!(reg.update(0.0, vp()));
        assert_eq!(reg.active(), Some("hero"));

        // Window at 4600 covers hero 4700..5000 (300px of 5000) and history
        // 5000..5500 (500px of 1000): history is proportionally deeper in.
        assert!(reg.update(4600.0, vp()));
        assert_eq!(reg.active(), Some("history"));
    }

    #[test]
    fn ties_keep_the_first_id() {
        let mut reg = SectionRegistry::new();
        reg.register("a", band(0.0, 1000.0));
        reg.register("b", band(0.0, 1000.0));
        reg.update(0.0, vp());
        assert_eq!(reg.active(), Some("a"));
    }

    #[test]
    fn active_survives_leaving_every_section() {
        let mut reg = SectionRegistry::new();
        reg.register("hero", band(0.0, 1000.0));
        reg.update(0.0, vp());
        assert_eq!(reg.active(), Some("hero"));

        // Scrolled far past everything: nothing intersects, answer stays.
        assert!(!reg.update(50_000.0, vp()));
        assert_eq!(reg.active(), Some("hero"));
    }

    #[test]
    fn the_window_is_inset_ten_percent() {
        let mut reg = SectionRegistry::new();
        // Ends exactly at the top inset line (scroll 0 + 10% of 1000).
        reg.register("above", band(0.0, 100.0));
        reg.register("inside", band(100.0, 200.0));
        reg.update(0.0, vp());
        assert_eq!(reg.active(), Some("inside"));
    }

    #[test]
    fn reregistering_the_same_rect_changes_nothing() {
        let mut reg = SectionRegistry::new();
        reg.register("hero", band(0.0, 1000.0));
        reg.update(0.0, vp());
        reg.register("hero", band(0.0, 1000.0));
        assert!(!reg.update(0.0, vp()));
        assert_eq!(reg.active(), Some("hero"));
    }

    #[test]
    fn unregistering_twice_is_a_no_op() {
        let mut reg = SectionRegistry::new();
        reg.register("hero", band(0.0, 1000.0));
        reg.update(0.0, vp());

        assert!(reg.unregister("hero"));
        assert!(!reg.unregister("hero"));
        assert!(reg.is_empty());
        // The highlight keeps pointing at the last known section.
        assert_eq!(reg.active(), Some("hero"));
    }

    #[test]
    fn moving_a_pinned_rect_keeps_it_active() {
        let mut reg = SectionRegistry::new();
        reg.register("models", band(10_000.0, 11_000.0));
        reg.update(10_000.0, vp());
        assert_eq!(reg.active(), Some("models"));

        // The pinned section rides along with the scroll position.
        reg.register("models", band(11_500.0, 12_500.0));
        reg.update(11_500.0, vp());
        assert_eq!(reg.active(), Some("models"));
    }
}
