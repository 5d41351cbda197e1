use crate::content::models;
use crate::ease::Ease;
use crate::error::StradaResult;
use crate::eval::Choreographer;
use crate::timeline::{Property, TimelineBuilder, Trigger};

pub const TIMELINE: &str = "models.carousel";

pub fn card_target(index: usize) -> String {
    format!("models.card.{index}")
}

/// Carousel choreography: every card shares one horizontal track, so each
/// slides left by a full card width per lineup position as the pin scrubs.
pub fn install(choreo: &mut Choreographer) -> StradaResult<()> {
    let count = models().len();
    let travel = -100.0 * count.saturating_sub(1) as f64;

    let mut b = TimelineBuilder::new(TIMELINE);
    for i in 0..count {
        b.at(0.0, &card_target(i), Property::XPercent, 0.0, travel, 1.0, Ease::Linear);
    }

    choreo.push(
        b.build()?,
        Trigger::Pin {
            section: "models".to_string(),
        },
    )?;
    Ok(())
}

/// Pin-progress positions where a card sits centred: even increments from
/// the first card to the last. The scroll engine glides to the nearest one
/// when the carousel is left between cards.
pub fn snap_points(count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![0.0];
    }
    let last = (count - 1) as f64;
    (0..count).map(|i| i as f64 / last).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::showcase_page;
    use crate::{Viewport, solve_layout};

    #[test]
    fn cards_slide_one_width_per_lineup_position() {
        let layout =
            solve_layout(&showcase_page(), Viewport::new(1280.0, 1000.0).unwrap()).unwrap();
        let mut choreo = Choreographer::new();
        install(&mut choreo).unwrap();

        // Models pins over scroll 10000..13000 in this layout.
        choreo.tick(0.016, 10_000.0, &layout);
        assert_eq!(choreo.evaluate(10_000.0).target(&card_target(0)).x_percent, 0.0);

        choreo.tick(0.016, 11_500.0, &layout);
        let page = choreo.evaluate(11_500.0);
        assert_eq!(page.target(&card_target(0)).x_percent, -100.0);
        assert_eq!(page.target(&card_target(2)).x_percent, -100.0);

        choreo.tick(0.016, 13_500.0, &layout);
        assert_eq!(choreo.evaluate(13_500.0).target(&card_target(1)).x_percent, -200.0);
    }

    #[test]
    fn snap_points_are_even_increments() {
        assert_eq!(snap_points(3), vec![0.0, 0.5, 1.0]);
        assert_eq!(snap_points(2), vec![0.0, 1.0]);
        assert_eq!(snap_points(1), vec![0.0]);
        assert_eq!(snap_points(0), vec![0.0]);
    }
}
