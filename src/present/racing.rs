use crate::content::stats;
use crate::core::Viewport;
use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};
use crate::eval::Choreographer;
use crate::layout::Layout;
use crate::timeline::{Property, TimelineBuilder, Trigger};

pub const TIMELINE: &str = "racing.stats";

/// Stagger between neighbouring stat cards, in seconds.
const STAGGER_SECS: f64 = 0.2;
const ENTRANCE_SECS: f64 = 0.8;
const COUNTER_SECS: f64 = 1.5;

pub fn stat_target(index: usize) -> String {
    format!("racing.stat.{index}")
}

pub fn counter_target(index: usize) -> String {
    format!("racing.counter.{index}")
}

/// Racing-stats choreography: a toggled timeline that plays forward while
/// the section is on screen and rewinds once it leaves. Cards rise in with a
/// staggered overshoot while each counter runs from zero to its figure.
pub fn install(
    choreo: &mut Choreographer,
    layout: &Layout,
    viewport: Viewport,
) -> StradaResult<()> {
    let racing = layout
        .section("racing")
        .ok_or_else(|| StradaError::evaluation("layout has no racing section"))?;

    let stats = stats();
    let cards: Vec<String> = (0..stats.len()).map(stat_target).collect();

    let mut b = TimelineBuilder::new(TIMELINE);
    for card in &cards {
        b.init(card, Property::Y, 40.0);
        b.init(card, Property::Opacity, 0.0);
    }
    b.stagger_at(0.0, &cards, Property::Y, 40.0, 0.0, ENTRANCE_SECS, STAGGER_SECS, Ease::OutBack);
    b.stagger_at(0.0, &cards, Property::Opacity, 0.0, 1.0, ENTRANCE_SECS, STAGGER_SECS, Ease::OutBack);
    for (i, stat) in stats.iter().enumerate() {
        let start = i as f64 * STAGGER_SECS;
        b.at(
            start,
            &counter_target(i),
            Property::Value,
            0.0,
            f64::from(stat.value),
            COUNTER_SECS,
            Ease::OutCubic,
        );
    }

    choreo.push(
        b.build()?,
        Trigger::Toggle {
            start: racing.rect.y0 - viewport.vh(85.0),
            end: racing.rect.y1,
        },
    )?;
    Ok(())
}
