use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ease::Ease;
use crate::error::StradaResult;
use crate::particles::ParticleField;
use crate::timeline::{Property, Timeline, TimelineBuilder};

/// The loading screen stays up at least this long, even when every frame
/// decodes instantly.
const MIN_DISPLAY_SECS: f64 = 1.5;
/// The percent readout eases toward the real progress over this window.
const PROGRESS_GLIDE_SECS: f64 = 0.3;
/// Seconds into the exit at which a layout refresh is requested and the
/// screen leaves the stage. The overlay lands at 1.1; the refresh waits out
/// one more beat.
const REFRESH_AT_SECS: f64 = 1.2;

const PARTICLE_COUNT: usize = 120;
const STAGE_WIDTH: f64 = 600.0;
const STAGE_HEIGHT: f64 = 300.0;

const BAR: &str = "loading.bar";
const TITLE: &str = "loading.title";
const OVERLAY: &str = "loading.overlay";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoadingPhase {
    Loading,
    Exiting,
    Removed,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingTick {
    /// The exit began: scrolling may unlock now, before the overlay clears.
    pub exit_started: bool,
    /// The page should re-measure its layout. Fires exactly once.
    pub refresh: bool,
    /// The screen has left the stage for good.
    pub removed: bool,
}

/// Sampled visual state of the loading screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingView {
    pub phase: LoadingPhase,
    pub percent: u8,
    pub bar_scale_x: f64,
    pub title_scale: f64,
    pub title_opacity: f64,
    pub overlay_y_percent: f64,
}

struct PercentGlide {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Full-viewport overlay shown while the frame sequence decodes.
///
/// Holds for a minimum display time, eases the percent readout toward the
/// real progress, and plays a fixed exit choreography once the frames are in:
/// bar to full, title scale-and-fade, overlay slide off. One elapsed-time
/// accumulator decides the minimum-display gate.
pub struct LoadingScreen {
    phase: LoadingPhase,
    elapsed: f64,
    displayed: f64,
    last_target: u8,
    glide: Option<PercentGlide>,
    exit: Option<Timeline>,
    exit_playhead: f64,
    particles: ParticleField,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Seeded particle scatter, so identically seeded screens are identical.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            phase: LoadingPhase::Loading,
            elapsed: 0.0,
            displayed: 0.0,
            last_target: 0,
            glide: None,
            exit: None,
            exit_playhead: 0.0,
            particles: ParticleField::car(PARTICLE_COUNT, STAGE_WIDTH, STAGE_HEIGHT, &mut rng),
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// The eased readout, not the raw loader progress.
    pub fn percent(&self) -> u8 {
        self.displayed.round().clamp(0.0, 100.0) as u8
    }

    /// Advance by `dt` given the loader's progress and readiness.
    pub fn tick(&mut self, dt: f64, progress: u8, ready: bool) -> StradaResult<LoadingTick> {
        let mut out = LoadingTick::default();
        if self.phase == LoadingPhase::Removed {
            return Ok(out);
        }

        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.particles.tick(dt);

        if progress != self.last_target {
            self.glide = Some(PercentGlide {
                from: self.displayed,
                to: f64::from(progress),
                elapsed: 0.0,
            });
            self.last_target = progress;
        }
        if let Some(glide) = self.glide.as_mut() {
            glide.elapsed += dt;
            let t = (glide.elapsed / PROGRESS_GLIDE_SECS).clamp(0.0, 1.0);
            self.displayed = glide.from + (glide.to - glide.from) * Ease::OutQuad.apply(t);
            if glide.elapsed >= PROGRESS_GLIDE_SECS {
                self.displayed = glide.to;
                self.glide = None;
            }
        }

        match self.phase {
            LoadingPhase::Loading => {
                if ready && self.elapsed >= MIN_DISPLAY_SECS {
                    self.exit = Some(self.exit_timeline()?);
                    self.exit_playhead = 0.0;
                    self.phase = LoadingPhase::Exiting;
                    out.exit_started = true;
                    tracing::info!(elapsed = self.elapsed, "loading screen exiting");
                }
            }
            LoadingPhase::Exiting => {
                self.exit_playhead += dt;
                if self.exit_playhead >= REFRESH_AT_SECS {
                    self.phase = LoadingPhase::Removed;
                    out.refresh = true;
                    out.removed = true;
                }
            }
            LoadingPhase::Removed => {}
        }
        Ok(out)
    }

    /// Exit choreography, built when the exit begins so the bar tween picks
    /// up from wherever the eased readout is.
    fn exit_timeline(&self) -> StradaResult<Timeline> {
        let mut b = TimelineBuilder::new("loading.exit");
        b.init(TITLE, Property::Scale, 1.0);
        b.init(TITLE, Property::Opacity, 1.0);
        b.init(OVERLAY, Property::YPercent, 0.0);
        b.at(
            0.0,
            BAR,
            Property::ScaleX,
            self.displayed / 100.0,
            1.0,
            0.3,
            Ease::OutCubic,
        );
        b.at(0.3, TITLE, Property::Scale, 1.0, 1.1, 0.5, Ease::InOutCubic);
        b.at(0.3, TITLE, Property::Opacity, 1.0, 0.0, 0.5, Ease::InOutCubic);
        b.at(0.3, OVERLAY, Property::YPercent, 0.0, -100.0, 0.8, Ease::InOutQuint);
        b.build()
    }

    pub fn view(&self) -> LoadingView {
        let mut view = LoadingView {
            phase: self.phase,
            percent: self.percent(),
            bar_scale_x: self.displayed / 100.0,
            title_scale: 1.0,
            title_opacity: 1.0,
            overlay_y_percent: 0.0,
        };
        if let Some(exit) = &self.exit {
            exit.sample_into(self.exit_playhead, &mut |target, prop, value| {
                match (target, prop) {
                    (t, Property::ScaleX) if t == BAR => view.bar_scale_x = value,
                    (t, Property::Scale) if t == TITLE => view.title_scale = value,
                    (t, Property::Opacity) if t == TITLE => view.title_opacity = value,
                    (t, Property::YPercent) if t == OVERLAY => view.overlay_y_percent = value,
                    _ => {}
                }
            });
        }
        view
    }
}
