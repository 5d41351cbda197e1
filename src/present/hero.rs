use crate::content::hero_blocks;
use crate::core::Viewport;
use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};
use crate::eval::Choreographer;
use crate::layout::Layout;
use crate::timeline::{Property, TimelineBuilder, Trigger};

pub const TITLE: &str = "hero.title";
pub const INDICATOR: &str = "hero.indicator";

/// Scroll distance over which the scroll hint fades out.
const INDICATOR_FADE_PX: f64 = 500.0;

pub fn block_target(index: usize) -> String {
    format!("hero.block.{index}")
}

/// Hero choreography: a one-shot title fade after page start, text blocks
/// that scrub in as they approach the viewport, and a scroll hint that fades
/// over the first 500px.
pub fn install(
    choreo: &mut Choreographer,
    layout: &Layout,
    viewport: Viewport,
) -> StradaResult<()> {
    let hero = layout
        .section("hero")
        .ok_or_else(|| StradaError::evaluation("layout has no hero section"))?;

    let mut title = TimelineBuilder::new("hero.title");
    title.init(TITLE, Property::Opacity, 0.0);
    title.at(0.0, TITLE, Property::Opacity, 0.0, 1.0, 1.2, Ease::OutCubic);
    choreo.push(title.build()?, Trigger::Once { delay: 1.2 })?;

    // Each block reveals while its top travels from 80% to 60% of the
    // viewport.
    for (i, block) in hero_blocks().iter().enumerate() {
        let target = block_target(i);
        let block_top = hero.rect.y0 + hero.rect.height() * block.at;

        let mut b = TimelineBuilder::new(target.clone());
        b.init(&target, Property::Opacity, 0.0);
        b.init(&target, Property::Y, 50.0);
        b.at(0.0, &target, Property::Opacity, 0.0, 1.0, 0.6, Ease::OutQuad);
        b.at(0.0, &target, Property::Y, 50.0, 0.0, 0.6, Ease::OutQuad);
        choreo.push(
            b.build()?,
            Trigger::Range {
                start: block_top - viewport.vh(80.0),
                end: block_top - viewport.vh(60.0),
            },
        )?;
    }

    let mut hint = TimelineBuilder::new("hero.indicator");
    hint.at(0.0, INDICATOR, Property::Opacity, 1.0, 0.0, 1.0, Ease::OutQuad);
    choreo.push(
        hint.build()?,
        Trigger::Range {
            start: hero.rect.y0,
            end: hero.rect.y0 + INDICATOR_FADE_PX,
        },
    )?;

    Ok(())
}
