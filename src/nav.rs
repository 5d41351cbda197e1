/// Chrome state for the fixed navigation bar, recomputed from every scroll
/// event: hide while scrolling down past 100px, go solid past half a
/// viewport, and track read progress through the document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavState {
    hidden: bool,
    solid: bool,
    progress: f64,
    last_scroll: f64,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Document read progress, 0..1.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn observe(&mut self, scroll: f64, viewport_height: f64, limit: f64) {
        self.hidden = scroll > self.last_scroll && scroll > 100.0;
        self.solid = scroll > viewport_height * 0.5;
        self.progress = if limit > 0.0 {
            (scroll / limit).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.last_scroll = scroll;
    }
}
