use crate::core::{Rect, Viewport};
use crate::error::StradaResult;
use crate::page::Page;

/// A section resolved to document space. `rect` is the element itself; a
/// pinned section additionally occupies `pin_px` of scroll travel below its
/// top while it stays fixed in the viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionLayout {
    pub id: String,
    pub rect: Rect,
    pub pin_px: f64,
}

impl SectionLayout {
    pub fn is_pinned(&self) -> bool {
        self.pin_px > 0.0
    }

    /// Full document span this section occupies, pin spacer included.
    pub fn span(&self) -> Rect {
        Rect::new(self.rect.x0, self.rect.y0, self.rect.x1, self.rect.y1 + self.pin_px)
    }

    /// Where the element actually sits at `scroll`: a pinned section rides
    /// the viewport from its top until its pin distance is spent.
    pub fn view_rect(&self, scroll: f64) -> Rect {
        let y = scroll.clamp(self.rect.y0, self.rect.y0 + self.pin_px);
        Rect::new(self.rect.x0, y, self.rect.x1, y + self.rect.height())
    }

    /// Progress through the pin, 0 before it engages and 1 once spent.
    pub fn pin_progress(&self, scroll: f64) -> f64 {
        if self.pin_px <= 0.0 {
            return 0.0;
        }
        ((scroll - self.rect.y0) / self.pin_px).clamp(0.0, 1.0)
    }
}

/// The page resolved against a concrete viewport. Rebuilt on resize and on
/// the loading screen's layout-refresh signal.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub sections: Vec<SectionLayout>,
    pub total_height: f64,
    pub scroll_limit: f64,
    /// Scroll distance over which the backdrop frame sequence plays.
    pub frame_window_px: f64,
}

impl Layout {
    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }
}

pub fn solve_layout(page: &Page, viewport: Viewport) -> StradaResult<Layout> {
    page.validate()?;

    let mut sections = Vec::with_capacity(page.sections.len());
    let mut cursor = 0.0;
    for section in &page.sections {
        let height = viewport.vh(section.height_vh);
        let rect = Rect::new(0.0, cursor, viewport.width, cursor + height);
        sections.push(SectionLayout {
            id: section.id.clone(),
            rect,
            pin_px: section.pin_px,
        });
        cursor += height + section.pin_px;
    }

    let total_height = cursor;
    Ok(Layout {
        viewport,
        sections,
        total_height,
        scroll_limit: (total_height - viewport.height).max(0.0),
        frame_window_px: viewport.vh(page.frames.window_vh),
    })
}
