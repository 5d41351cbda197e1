use crate::content::CarModel;
use crate::ease::Ease;
use crate::error::StradaResult;
use crate::timeline::{Property, Timeline, TimelineBuilder};

const BACKDROP: &str = "modal.backdrop";
const PANEL: &str = "modal.panel";
const IMAGE: &str = "modal.image";
const ROW_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ModalPhase {
    Idle,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowView {
    pub x: f64,
    pub opacity: f64,
}

/// Sampled visual state of the modal and its spec rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalView {
    pub backdrop_opacity: f64,
    pub panel_y: f64,
    pub panel_opacity: f64,
    pub image_scale: f64,
    pub image_opacity: f64,
    pub rows: Vec<RowView>,
}

impl ModalView {
    fn hidden() -> Self {
        Self {
            backdrop_opacity: 0.0,
            panel_y: 100.0,
            panel_opacity: 0.0,
            image_scale: 0.8,
            image_opacity: 0.0,
            rows: vec![RowView { x: -20.0, opacity: 0.0 }; ROW_COUNT],
        }
    }
}

/// Spec-sheet modal for one car model.
///
/// The page scroll stays locked from the moment it opens until the close
/// choreography finishes and the modal unmounts; wheel input meanwhile moves
/// only the panel's inner scroll, clamped at its bounds so nothing leaks to
/// the page. Opening plays backdrop, panel, image, then the rows staggered;
/// closing reverses the rows first and fades the backdrop out last.
pub struct ModalController {
    phase: ModalPhase,
    model: Option<CarModel>,
    playhead: f64,
    open_tl: Timeline,
    close_tl: Timeline,
    open_duration: f64,
    close_duration: f64,
    panel_scroll: f64,
    panel_max: f64,
}

impl ModalController {
    pub fn new() -> StradaResult<Self> {
        let open_tl = open_timeline()?;
        let close_tl = close_timeline()?;
        let open_duration = open_tl.duration();
        let close_duration = close_tl.duration();
        Ok(Self {
            phase: ModalPhase::Idle,
            model: None,
            playhead: 0.0,
            open_tl,
            close_tl,
            open_duration,
            close_duration,
            panel_scroll: 0.0,
            panel_max: 0.0,
        })
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// True from open until the close choreography has fully unmounted.
    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Idle
    }

    pub fn model(&self) -> Option<&CarModel> {
        self.model.as_ref()
    }

    pub fn panel_scroll(&self) -> f64 {
        self.panel_scroll
    }

    /// Open for `model`. `panel_max` is how far the panel's inner content
    /// can scroll. Ignored unless idle.
    pub fn open(&mut self, model: CarModel, panel_max: f64) -> bool {
        if self.phase != ModalPhase::Idle {
            return false;
        }
        tracing::debug!(model = %model.id, "modal opening");
        self.model = Some(model);
        self.phase = ModalPhase::Opening;
        self.playhead = 0.0;
        self.panel_scroll = 0.0;
        self.panel_max = panel_max.max(0.0);
        true
    }

    /// Begin closing, from Escape, the close button, or a backdrop click.
    pub fn request_close(&mut self) -> bool {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                self.phase = ModalPhase::Closing;
                self.playhead = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Wheel input while open scrolls the panel content and nothing else.
    pub fn wheel(&mut self, delta: f64) {
        if !self.is_open() || !delta.is_finite() {
            return;
        }
        self.panel_scroll = (self.panel_scroll + delta).clamp(0.0, self.panel_max);
    }

    /// Advance the choreography. Returns true on the tick the modal
    /// unmounts, which is when the page may scroll again.
    pub fn tick(&mut self, dt: f64) -> bool {
        let dt = dt.max(0.0);
        match self.phase {
            ModalPhase::Opening => {
                self.playhead += dt;
                if self.playhead >= self.open_duration {
                    self.playhead = self.open_duration;
                    self.phase = ModalPhase::Open;
                }
                false
            }
            ModalPhase::Closing => {
                self.playhead += dt;
                if self.playhead >= self.close_duration {
                    self.phase = ModalPhase::Idle;
                    self.model = None;
                    tracing::debug!("modal unmounted");
                    return true;
                }
                false
            }
            ModalPhase::Idle | ModalPhase::Open => false,
        }
    }

    pub fn view(&self) -> ModalView {
        let (timeline, playhead) = match self.phase {
            ModalPhase::Idle => return ModalView::hidden(),
            ModalPhase::Opening | ModalPhase::Open => (&self.open_tl, self.playhead),
            ModalPhase::Closing => (&self.close_tl, self.playhead),
        };

        let mut view = ModalView::hidden();
        timeline.sample_into(playhead, &mut |target, prop, value| {
            match (target, prop) {
                (t, Property::Opacity) if t == BACKDROP => view.backdrop_opacity = value,
                (t, Property::Y) if t == PANEL => view.panel_y = value,
                (t, Property::Opacity) if t == PANEL => view.panel_opacity = value,
                (t, Property::Scale) if t == IMAGE => view.image_scale = value,
                (t, Property::Opacity) if t == IMAGE => view.image_opacity = value,
                (t, prop) => {
                    let row = t
                        .strip_prefix("modal.row.")
                        .and_then(|s| s.parse::<usize>().ok())
                        .filter(|i| *i < ROW_COUNT);
                    if let Some(i) = row {
                        match prop {
                            Property::X => view.rows[i].x = value,
                            Property::Opacity => view.rows[i].opacity = value,
                            _ => {}
                        }
                    }
                }
            }
        });
        view
    }
}

fn row_targets() -> Vec<String> {
    (0..ROW_COUNT).map(|i| format!("modal.row.{i}")).collect()
}

fn open_timeline() -> StradaResult<Timeline> {
    let rows = row_targets();
    let mut b = TimelineBuilder::new("modal.open");
    b.init(PANEL, Property::Y, 100.0);
    b.init(PANEL, Property::Opacity, 0.0);
    b.init(IMAGE, Property::Scale, 0.8);
    b.init(IMAGE, Property::Opacity, 0.0);
    for row in &rows {
        b.init(row, Property::X, -20.0);
        b.init(row, Property::Opacity, 0.0);
    }

    b.at(0.0, BACKDROP, Property::Opacity, 0.0, 1.0, 0.3, Ease::OutQuad);
    b.at(0.1, PANEL, Property::Y, 100.0, 0.0, 0.5, Ease::OutCubic);
    b.at(0.1, PANEL, Property::Opacity, 0.0, 1.0, 0.5, Ease::OutCubic);
    b.at(0.3, IMAGE, Property::Scale, 0.8, 1.0, 0.6, Ease::OutBack);
    b.at(0.3, IMAGE, Property::Opacity, 0.0, 1.0, 0.6, Ease::OutBack);
    b.stagger_at(0.7, &rows, Property::X, -20.0, 0.0, 0.4, 0.05, Ease::OutQuad);
    b.stagger_at(0.7, &rows, Property::Opacity, 0.0, 1.0, 0.4, 0.05, Ease::OutQuad);
    b.build()
}

fn close_timeline() -> StradaResult<Timeline> {
    let rows = row_targets();
    let mut b = TimelineBuilder::new("modal.close");
    b.init(BACKDROP, Property::Opacity, 1.0);
    b.init(PANEL, Property::Y, 0.0);
    b.init(PANEL, Property::Opacity, 1.0);
    b.init(IMAGE, Property::Scale, 1.0);
    b.init(IMAGE, Property::Opacity, 1.0);
    for row in &rows {
        b.init(row, Property::X, 0.0);
        b.init(row, Property::Opacity, 1.0);
    }

    // Rows leave in reverse: the last one moves first.
    b.stagger_at(0.0, &rows, Property::X, 0.0, 20.0, 0.3, -0.05, Ease::OutQuad);
    b.stagger_at(0.0, &rows, Property::Opacity, 1.0, 0.0, 0.3, -0.05, Ease::OutQuad);
    b.at(0.45, IMAGE, Property::Scale, 1.0, 0.8, 0.5, Ease::InBack);
    b.at(0.45, IMAGE, Property::Opacity, 1.0, 0.0, 0.5, Ease::InBack);
    b.at(0.65, PANEL, Property::Y, 0.0, 100.0, 0.4, Ease::InCubic);
    b.at(0.65, PANEL, Property::Opacity, 1.0, 0.0, 0.4, Ease::InCubic);
    b.at(0.85, BACKDROP, Property::Opacity, 1.0, 0.0, 0.3, Ease::OutQuad);
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models;

    fn controller() -> ModalController {
        ModalController::new().unwrap()
    }

    fn any_model() -> CarModel {
        models().into_iter().next().unwrap()
    }

    #[test]
    fn opening_runs_backdrop_panel_image_then_rows() {
        let mut m = controller();
        assert!(m.open(any_model(), 0.0));
        assert_eq!(m.phase(), ModalPhase::Opening);

        let at_start = m.view();
        assert_eq!(at_start.backdrop_opacity, 0.0);
        assert_eq!(at_start.panel_y, 100.0);

        // 0.05 in: backdrop moving, panel and image not yet.
        m.tick(0.05);
        let v = m.view();
        assert!(v.backdrop_opacity > 0.0);
        assert_eq!(v.panel_y, 100.0);
        assert_eq!(v.image_scale, 0.8);

        // 1.0 in: first rows are on their way, the last has not started.
        m.tick(0.95);
        let v = m.view();
        assert!(v.rows[0].opacity > 0.0);
        assert_eq!(v.rows[7].opacity, 0.0);

        m.tick(0.5);
        assert_eq!(m.phase(), ModalPhase::Open);
        let v = m.view();
        assert_eq!(v.backdrop_opacity, 1.0);
        assert_eq!(v.panel_y, 0.0);
        assert_eq!(v.image_scale, 1.0);
        assert!(v.rows.iter().all(|r| r.x == 0.0 && r.opacity == 1.0));
    }

    #[test]
    fn closing_reverses_the_rows_and_fades_the_backdrop_last() {
        let mut m = controller();
        m.open(any_model(), 0.0);
        m.tick(2.0);
        assert!(m.request_close());

        // 0.1 in: the last row leads, the first has not moved.
        m.tick(0.1);
        let v = m.view();
        assert!(v.rows[7].x > 0.0);
        assert_eq!(v.rows[0].x, 0.0);
        assert_eq!(v.backdrop_opacity, 1.0);

        // 0.9 in: backdrop fading, panel on its way out.
        m.tick(0.8);
        let v = m.view();
        assert!(v.backdrop_opacity < 1.0);
        assert!(v.panel_y > 0.0);
    }

    #[test]
    fn unmount_fires_once_at_the_end_of_the_close() {
        let mut m = controller();
        m.open(any_model(), 0.0);
        m.tick(2.0);
        m.request_close();

        let mut unmounts = 0;
        for _ in 0..60 {
            if m.tick(0.025) {
                unmounts += 1;
                // Closed the instant it unmounts.
                assert!(!m.is_open());
            }
        }
        assert_eq!(unmounts, 1);
        assert_eq!(m.phase(), ModalPhase::Idle);
        assert!(m.model().is_none());
        assert_eq!(m.view(), ModalView::hidden());
    }

    #[test]
    fn scroll_stays_locked_until_unmount() {
        let mut m = controller();
        m.open(any_model(), 0.0);
        assert!(m.is_open());
        m.tick(2.0);
        m.request_close();
        m.tick(1.0);
        // Deep into the close, still counted as open.
        assert!(m.is_open());
        m.tick(0.5);
        assert!(!m.is_open());
    }

    #[test]
    fn wheel_moves_only_the_panel_and_clamps() {
        let mut m = controller();
        m.wheel(100.0);
        assert_eq!(m.panel_scroll(), 0.0);

        m.open(any_model(), 300.0);
        m.wheel(1000.0);
        assert_eq!(m.panel_scroll(), 300.0);
        m.wheel(-50.0);
        assert_eq!(m.panel_scroll(), 250.0);
        m.wheel(-9999.0);
        assert_eq!(m.panel_scroll(), 0.0);
    }

    #[test]
    fn reopen_only_after_idle() {
        let mut m = controller();
        assert!(m.open(any_model(), 0.0));
        assert!(!m.open(any_model(), 0.0));
        m.request_close();
        assert!(!m.open(any_model(), 0.0));
        m.tick(2.0);
        assert!(m.open(any_model(), 0.0));
    }
}
