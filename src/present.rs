//! Scroll choreography for the page sections: each module translates one
//! section's content into timelines and hands them to the choreographer.

pub mod hero;
pub mod history;
pub mod models;
pub mod racing;

use crate::core::Viewport;
use crate::error::StradaResult;
use crate::eval::Choreographer;
use crate::layout::Layout;

/// Install every section's timelines, in page order.
pub fn install_all(
    choreo: &mut Choreographer,
    layout: &Layout,
    viewport: Viewport,
) -> StradaResult<()> {
    hero::install(choreo, layout, viewport)?;
    history::install(choreo, layout, viewport)?;
    racing::install(choreo, layout, viewport)?;
    models::install(choreo)?;
    Ok(())
}
