use crate::content::eras;
use crate::core::Viewport;
use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};
use crate::eval::Choreographer;
use crate::layout::Layout;
use crate::timeline::{Property, TimelineBuilder, Trigger};

pub const TIMELINE: &str = "history.pin";

pub fn era_target(index: usize) -> String {
    format!("history.era.{index}")
}

pub fn background_target(index: usize) -> String {
    format!("history.bg.{index}")
}

pub fn car_target(index: usize) -> String {
    format!("history.car.{index}")
}

/// Brand-history choreography: one timeline scrubbed across the section's
/// pin distance. Each era gets a background zoom and a full-width car sweep,
/// then cross-fades into the next while that era's background settles in
/// from a deeper zoom. The final era keeps its card and ends on the sweep.
pub fn install(
    choreo: &mut Choreographer,
    layout: &Layout,
    viewport: Viewport,
) -> StradaResult<()> {
    let section = layout
        .section("history")
        .ok_or_else(|| StradaError::evaluation("layout has no history section"))?;
    if !section.is_pinned() {
        return Err(StradaError::evaluation("history section must be pinned"));
    }

    let eras = eras();
    let sweep = viewport.width;

    let mut b = TimelineBuilder::new(TIMELINE);
    for i in 0..eras.len() {
        b.init(&era_target(i), Property::Opacity, if i == 0 { 1.0 } else { 0.0 });
        b.init(&background_target(i), Property::Scale, 1.1);
        b.init(&car_target(i), Property::X, -sweep);
        b.init(&car_target(i), Property::Opacity, 0.9);
    }

    for i in 0..eras.len() {
        let start = b.end();
        b.at(start, &car_target(i), Property::X, -sweep, sweep, 1.5, Ease::InOutCubic);
        if i + 1 < eras.len() {
            b.at(start, &background_target(i), Property::Scale, 1.1, 0.9, 1.5, Ease::InOutCubic);
            let fade = b.end();
            b.at(fade, &era_target(i), Property::Opacity, 1.0, 0.0, 0.5, Ease::OutQuad);
            b.at(fade, &era_target(i + 1), Property::Opacity, 0.0, 1.0, 0.5, Ease::OutQuad);
            b.at(fade, &background_target(i + 1), Property::Scale, 1.2, 1.1, 1.0, Ease::OutQuad);
        }
    }

    choreo.push(
        b.build()?,
        Trigger::Pin {
            section: "history".to_string(),
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::showcase_page;
    use crate::{Viewport, solve_layout};

    const TOTAL: f64 = 6.5;

    fn setup() -> (Choreographer, Layout) {
        let vp = Viewport::new(1280.0, 1000.0).unwrap();
        let layout = solve_layout(&showcase_page(), vp).unwrap();
        let mut choreo = Choreographer::new();
        install(&mut choreo, &layout, vp).unwrap();
        (choreo, layout)
    }

    /// Scroll position that puts the pin playhead at `units` timeline units.
    /// History pins over scroll 5000..8000 in this layout.
    fn scroll_for(units: f64) -> f64 {
        5000.0 + 3000.0 * (units / TOTAL)
    }

    #[test]
    fn eras_cascade_across_the_pin() {
        let (mut choreo, layout) = setup();

        choreo.tick(0.016, scroll_for(0.0), &layout);
        let page = choreo.evaluate(scroll_for(0.0));
        assert_eq!(page.target(&era_target(0)).opacity, 1.0);
        assert_eq!(page.target(&era_target(1)).opacity, 0.0);
        assert_eq!(page.target(&era_target(2)).opacity, 0.0);

        // Mid-crossfade the two cards share the stage.
        choreo.tick(0.016, scroll_for(1.75), &layout);
        let page = choreo.evaluate(scroll_for(1.75));
        let out = page.target(&era_target(0)).opacity;
        let inn = page.target(&era_target(1)).opacity;
        assert!((out - 0.25).abs() < 1e-6);
        assert!((inn - 0.75).abs() < 1e-6);
        assert!((out + inn - 1.0).abs() < 1e-9);

        choreo.tick(0.016, scroll_for(TOTAL), &layout);
        let page = choreo.evaluate(scroll_for(TOTAL));
        assert_eq!(page.target(&era_target(0)).opacity, 0.0);
        assert_eq!(page.target(&era_target(2)).opacity, 1.0);
    }

    #[test]
    fn cars_sweep_the_full_viewport_width() {
        let (mut choreo, layout) = setup();

        choreo.tick(0.016, scroll_for(0.0), &layout);
        let page = choreo.evaluate(scroll_for(0.0));
        assert_eq!(page.target(&car_target(0)).x, -1280.0);
        assert_eq!(page.target(&car_target(0)).opacity, 0.9);
        assert_eq!(page.target(&car_target(2)).x, -1280.0);

        // Era 0's sweep crosses center at half its 1.5-unit duration.
        choreo.tick(0.016, scroll_for(0.75), &layout);
        let page = choreo.evaluate(scroll_for(0.75));
        assert!(page.target(&car_target(0)).x.abs() < 1e-6);

        choreo.tick(0.016, scroll_for(TOTAL), &layout);
        let page = choreo.evaluate(scroll_for(TOTAL));
        assert_eq!(page.target(&car_target(2)).x, 1280.0);
    }

    #[test]
    fn background_handoff_is_continuous() {
        let (mut choreo, layout) = setup();

        // At 2.5 units era 1's settle tween (1.2 -> 1.1) lands exactly where
        // its zoom tween (1.1 -> 0.9) begins.
        choreo.tick(0.016, scroll_for(2.5), &layout);
        let page = choreo.evaluate(scroll_for(2.5));
        assert!((page.target(&background_target(1)).scale - 1.1).abs() < 1e-6);

        // Just before the handoff the settle tween is still in charge.
        choreo.tick(0.016, scroll_for(2.4), &layout);
        let page = choreo.evaluate(scroll_for(2.4));
        let scale = page.target(&background_target(1)).scale;
        assert!(scale > 1.1 && scale < 1.2);
    }

    #[test]
    fn pin_timeline_spans_the_expected_units() {
        let (mut choreo, layout) = setup();
        assert_eq!(choreo.len(), 1);

        // Three eras: two full blocks of 2.5 plus the closing 1.5 sweep.
        choreo.tick(0.016, 8000.0, &layout);
        assert_eq!(choreo.playhead(TIMELINE), Some(TOTAL));
        choreo.tick(0.016, 6500.0, &layout);
        assert_eq!(choreo.playhead(TIMELINE), Some(TOTAL / 2.0));
    }
}
