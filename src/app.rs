//! The assembled page: one owner for the scroll engine, frame preloader,
//! backdrop, choreography, and overlay state machines, advanced by a single
//! [`App::tick`].

use std::path::Path;

use crate::canvas::Backdrop;
use crate::content;
use crate::core::Viewport;
use crate::ease::Ease;
use crate::error::{StradaError, StradaResult};
use crate::eval::{Choreographer, EvaluatedPage};
use crate::events::SubscriptionId;
use crate::frames::Preloader;
use crate::keyboard::{self, Key, KeyContext, NavCommand};
use crate::layout::{Layout, solve_layout};
use crate::loading::{LoadingPhase, LoadingScreen};
use crate::modal::{ModalController, ModalPhase};
use crate::nav::NavState;
use crate::page::Page;
use crate::present;
use crate::scroll::{ScrollEngine, ScrollEvent, ScrollOptions};
use crate::sections::SectionRegistry;
use crate::state::AppState;

/// Keyboard and programmatic section jumps glide over this long.
const SECTION_GLIDE_SECS: f64 = 1.0;
/// Carousel positions closer to a snap point than this count as parked.
const SNAP_EPSILON_PX: f64 = 1.0;

/// Discrete things that happened during one tick, in the order they fired.
/// The loading trio and `ModalClosed` each fire exactly once per occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppSignal {
    /// Every backdrop frame has reported in, failures included.
    ImagesReady,
    /// The loading screen began its exit; scrolling is live again.
    LoadingExitStarted,
    /// The layout was re-measured on the loading screen's refresh beat.
    LayoutRefreshed,
    /// The loading screen has left the stage for good.
    LoadingRemoved,
    /// A different section now owns the viewport.
    SectionChanged(String),
    /// The modal finished its close choreography and unmounted.
    ModalClosed,
}

/// One-frame dump of everything observable, for the CLI and for tests that
/// compare whole runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    pub viewport: Viewport,
    pub scroll: f64,
    pub scroll_limit: f64,
    pub frame_index: usize,
    pub load_progress: u8,
    pub loading_phase: LoadingPhase,
    pub modal_phase: ModalPhase,
    pub state: AppState,
    pub nav: NavState,
    pub evaluated: EvaluatedPage,
}

impl Snapshot {
    pub fn to_json(&self) -> StradaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StradaError::serde(e.to_string()))
    }
}

/// Everything on the page under one roof.
///
/// The tick order is load-bearing: decodes are pumped first so the loading
/// gate sees fresh progress, the gate runs next, then the scroll engine
/// produces the one position that the backdrop, the choreography, and the
/// section registry all read for that frame. Dropping the app closes the
/// decode channel, so workers still in flight unwind on their next send.
pub struct App {
    page: Page,
    viewport: Viewport,
    layout: Layout,
    preloader: Preloader,
    engine: ScrollEngine,
    backdrop: Backdrop,
    choreo: Choreographer,
    registry: SectionRegistry,
    loading: LoadingScreen,
    modal: ModalController,
    nav: NavState,
    state: AppState,
}

impl App {
    /// Mount `page` against `viewport`, decoding its frame sequence from
    /// under `assets_root`. The scroll starts locked behind the loading
    /// screen.
    pub fn mount(page: Page, viewport: Viewport, assets_root: &Path) -> StradaResult<Self> {
        page.validate()?;
        let preloader = Preloader::spawn(&page.frames, assets_root)?;
        Self::with_preloader(page, viewport, preloader)
    }

    /// [`App::mount`] with the preloader brought by the caller, for hosts
    /// that source frames from somewhere other than the filesystem and for
    /// tests that script completion timing.
    #[tracing::instrument(skip_all, fields(sections = page.sections.len(), frames = page.frames.count))]
    pub fn with_preloader(
        page: Page,
        viewport: Viewport,
        preloader: Preloader,
    ) -> StradaResult<Self> {
        page.validate()?;
        if preloader.total() != page.frames.count {
            return Err(StradaError::validation(
                "preloader total does not match the page frame count",
            ));
        }
        let layout = solve_layout(&page, viewport)?;
        let mut engine = ScrollEngine::new(layout.scroll_limit, ScrollOptions::default())?;
        engine.lock();
        let backdrop = Backdrop::new(viewport)?;
        let mut choreo = Choreographer::new();
        present::install_all(&mut choreo, &layout, viewport)?;
        let mut registry = SectionRegistry::new();
        for section in &layout.sections {
            registry.register(&section.id, section.view_rect(0.0));
        }
        tracing::info!(limit = layout.scroll_limit, "page mounted");
        Ok(Self {
            page,
            viewport,
            layout,
            preloader,
            engine,
            backdrop,
            choreo,
            registry,
            loading: LoadingScreen::new(),
            modal: ModalController::new()?,
            nav: NavState::new(),
            state: AppState::default(),
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn loading(&self) -> &LoadingScreen {
        &self.loading
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn frames(&self) -> &Preloader {
        &self.preloader
    }

    pub fn scroll(&self) -> f64 {
        self.state.scroll
    }

    /// A glide is in flight, the page's own snap glides included.
    pub fn is_scrolling(&self) -> bool {
        self.engine.is_gliding()
    }

    /// Block until every frame decode has reported in. Meant for headless
    /// rendering; the interactive path pumps incrementally from `tick`.
    pub fn wait_for_frames(&mut self) {
        self.preloader.wait();
    }

    /// Subscribe to the smoothed scroll position; fires once per tick.
    pub fn on_scroll(&mut self, f: impl FnMut(&ScrollEvent) + 'static) -> SubscriptionId {
        self.engine.subscribe(f)
    }

    pub fn off_scroll(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// A text input gained or lost focus; keyboard navigation stands down
    /// while this is set.
    pub fn set_typing(&mut self, typing: bool) {
        self.state.typing = typing;
    }

    /// Wheel input. Routed to the modal's panel while one is open, to the
    /// page scroll otherwise.
    pub fn wheel(&mut self, delta: f64) {
        if self.modal.is_open() {
            self.modal.wheel(delta);
        } else {
            self.engine.wheel(delta);
        }
    }

    /// Translate and apply a key press under the current gates. Returns the
    /// command that fired, if any.
    pub fn key(&mut self, key: Key) -> Option<NavCommand> {
        let ctx = KeyContext {
            images_ready: self.state.images_ready,
            typing: self.state.typing,
            modal_open: self.state.modal_open,
            models_active: self.state.section_is("models"),
        };
        let command = keyboard::dispatch(key, &ctx)?;
        self.apply_command(command);
        Some(command)
    }

    /// Eased glide to an absolute document offset, same profile as the
    /// section navigation. Discarded while the scroll is locked.
    pub fn scroll_to(&mut self, to: f64) {
        self.engine.scroll_to(to, SECTION_GLIDE_SECS, Ease::OutExpo);
    }

    /// Glide to the top of a section. False if no such section exists.
    pub fn scroll_to_section(&mut self, id: &str) -> bool {
        let Some(top) = self.layout.section(id).map(|s| s.rect.y0) else {
            return false;
        };
        self.engine.scroll_to(top, SECTION_GLIDE_SECS, Ease::OutExpo);
        true
    }

    /// Open the spec modal for the model with `id`. `panel_max` is how far
    /// the panel's inner content can scroll. False if the id is unknown or a
    /// modal is already up.
    pub fn open_model(&mut self, id: &str, panel_max: f64) -> bool {
        let Some(model) = content::models().into_iter().find(|m| m.id == id) else {
            return false;
        };
        if !self.modal.open(model, panel_max) {
            return false;
        }
        self.state.modal_open = true;
        self.sync_scroll_lock();
        true
    }

    /// Ask the modal to close, as the close button or a backdrop click
    /// would. The page stays locked until the close choreography finishes.
    pub fn close_modal(&mut self) -> bool {
        self.modal.request_close()
    }

    /// Re-measure against a new viewport. The backdrop repaints the frame it
    /// was already showing; choreography rebuilds with timed playheads
    /// carried over so nothing replays.
    pub fn resize(&mut self, viewport: Viewport) -> StradaResult<()> {
        self.viewport = viewport;
        self.backdrop.resize(viewport, &self.preloader)?;
        self.refresh_layout()
    }

    /// Advance the whole page by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> StradaResult<Vec<AppSignal>> {
        let dt = dt.max(0.0);
        let mut signals = Vec::new();

        self.preloader.pump();
        if !self.state.images_ready && self.preloader.is_ready() {
            self.state.images_ready = true;
            signals.push(AppSignal::ImagesReady);
        }

        let gate = self
            .loading
            .tick(dt, self.preloader.progress(), self.state.images_ready)?;
        if gate.exit_started {
            signals.push(AppSignal::LoadingExitStarted);
        }
        if gate.refresh {
            self.refresh_layout()?;
            signals.push(AppSignal::LayoutRefreshed);
        }
        if gate.removed {
            self.state.loading_done = true;
            signals.push(AppSignal::LoadingRemoved);
        }

        // The one scroll position everything downstream reads this frame.
        let scroll = self.engine.tick(dt);
        self.state.scroll = scroll;
        self.state.scroll_progress = if self.engine.limit() > 0.0 {
            (scroll / self.engine.limit()).clamp(0.0, 1.0)
        } else {
            0.0
        };

        self.backdrop
            .render(scroll, self.layout.frame_window_px, &self.preloader);
        self.choreo.tick(dt, scroll, &self.layout);

        // Pinned rects ride the viewport, so their observed positions are
        // refreshed every tick.
        for section in &self.layout.sections {
            self.registry.register(&section.id, section.view_rect(scroll));
        }
        if self.registry.update(scroll, self.viewport) {
            if let Some(active) = self.registry.active() {
                let active = active.to_string();
                self.state.active_section = Some(active.clone());
                signals.push(AppSignal::SectionChanged(active));
            }
        }

        if self.modal.tick(dt) {
            self.state.modal_open = false;
            signals.push(AppSignal::ModalClosed);
        }

        self.snap_carousel();
        self.nav
            .observe(scroll, self.viewport.height, self.engine.limit());
        self.sync_scroll_lock();
        Ok(signals)
    }

    /// Evaluate the scroll choreography at the current position.
    pub fn evaluate(&self) -> EvaluatedPage {
        self.choreo.evaluate(self.state.scroll)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            viewport: self.viewport,
            scroll: self.state.scroll,
            scroll_limit: self.engine.limit(),
            frame_index: self.backdrop.frame_index(),
            load_progress: self.preloader.progress(),
            loading_phase: self.loading.phase(),
            modal_phase: self.modal.phase(),
            state: self.state.clone(),
            nav: self.nav.clone(),
            evaluated: self.evaluate(),
        }
    }

    fn refresh_layout(&mut self) -> StradaResult<()> {
        self.layout = solve_layout(&self.page, self.viewport)?;
        self.engine.set_limit(self.layout.scroll_limit)?;
        let mut rebuilt = Choreographer::new();
        present::install_all(&mut rebuilt, &self.layout, self.viewport)?;
        rebuilt.restore_playheads(&self.choreo);
        self.choreo = rebuilt;
        for section in &self.layout.sections {
            self.registry
                .register(&section.id, section.view_rect(self.state.scroll));
        }
        tracing::debug!(limit = self.layout.scroll_limit, "layout refreshed");
        Ok(())
    }

    /// The page scroll is locked while the loading screen holds and while a
    /// modal is anywhere between open and unmounted.
    fn sync_scroll_lock(&mut self) {
        if self.modal.is_open() || self.loading.phase() == LoadingPhase::Loading {
            self.engine.lock();
        } else {
            self.engine.unlock();
        }
    }

    fn apply_command(&mut self, command: NavCommand) {
        let nav_len = self.page.nav.len();
        match command {
            NavCommand::NextSection => {
                // With nothing active yet, down lands on the first section.
                let next = match self.nav_position() {
                    Some(i) if i + 1 < nav_len => Some(i + 1),
                    Some(_) => None,
                    None if nav_len > 0 => Some(0),
                    None => None,
                };
                if let Some(i) = next {
                    self.glide_to_nav(i);
                }
            }
            NavCommand::PrevSection => {
                if let Some(i) = self.nav_position().filter(|i| *i > 0) {
                    self.glide_to_nav(i - 1);
                }
            }
            NavCommand::FirstSection if nav_len > 0 => self.glide_to_nav(0),
            NavCommand::LastSection if nav_len > 0 => self.glide_to_nav(nav_len - 1),
            NavCommand::CarouselPrev => self.step_carousel(-1),
            NavCommand::CarouselNext => self.step_carousel(1),
            NavCommand::CloseModal => {
                self.modal.request_close();
            }
            _ => {}
        }
    }

    fn nav_position(&self) -> Option<usize> {
        let active = self.state.active_section.as_deref()?;
        self.page.nav.iter().position(|id| id == active)
    }

    fn glide_to_nav(&mut self, index: usize) {
        if let Some(id) = self.page.nav.get(index).cloned() {
            self.scroll_to_section(&id);
        }
    }

    /// Move the carousel one card in `delta`'s direction by gliding the
    /// document to the matching snap point inside the models pin.
    fn step_carousel(&mut self, delta: isize) {
        let Some(section) = self.layout.section("models") else {
            return;
        };
        if !section.is_pinned() {
            return;
        }
        let snaps = present::models::snap_points(content::models().len());
        let last = snaps.len() - 1;
        let progress = section.pin_progress(self.state.scroll);
        let current = (progress * last as f64).round() as isize;
        let next = (current + delta).clamp(0, last as isize) as usize;
        let target = section.rect.y0 + snaps[next] * section.pin_px;
        self.engine.scroll_to(target, SECTION_GLIDE_SECS, Ease::OutExpo);
    }

    /// When the scroll settles between cards inside the models pin, glide to
    /// the nearest snap point so a card is always centred at rest.
    fn snap_carousel(&mut self) {
        if self.engine.is_gliding() || self.modal.is_open() || !self.state.loading_done {
            return;
        }
        let Some(section) = self.layout.section("models") else {
            return;
        };
        if !section.is_pinned() {
            return;
        }
        let scroll = self.state.scroll;
        if scroll < section.rect.y0 || scroll > section.rect.y0 + section.pin_px {
            return;
        }
        let snaps = present::models::snap_points(content::models().len());
        let last = snaps.len() - 1;
        let index = ((section.pin_progress(scroll) * last as f64).round() as usize).min(last);
        let target = section.rect.y0 + snaps[index] * section.pin_px;
        if (scroll - target).abs() > SNAP_EPSILON_PX {
            self.engine.scroll_to(target, SECTION_GLIDE_SECS, Ease::OutExpo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameEvent;
    use crate::page::showcase_page;
    use std::sync::mpsc::channel;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 1000.0).unwrap()
    }

    /// App whose every frame has already "decoded" (as failures, which count
    /// toward readiness just the same).
    fn ready_app() -> App {
        let page = showcase_page();
        let total = page.frames.count;
        let (tx, rx) = channel();
        for index in 0..total {
            tx.send(FrameEvent::Failed { index, reason: "fixture".into() }).unwrap();
        }
        App::with_preloader(page, vp(), Preloader::from_channel(total, rx)).unwrap()
    }

    /// Tick until the loading screen is gone, collecting every signal.
    fn boot(app: &mut App) -> Vec<AppSignal> {
        let mut signals = Vec::new();
        for _ in 0..200 {
            signals.extend(app.tick(0.05).unwrap());
            if app.state().loading_done {
                return signals;
            }
        }
        panic!("loading never finished");
    }

    /// Tick until no glide is in flight, snap glides included.
    fn settle(app: &mut App) -> Vec<AppSignal> {
        let mut signals = Vec::new();
        for _ in 0..600 {
            signals.extend(app.tick(0.016).unwrap());
            if !app.is_scrolling() {
                return signals;
            }
        }
        panic!("scroll never settled");
    }

    fn count(signals: &[AppSignal], which: &AppSignal) -> usize {
        signals.iter().filter(|s| *s == which).count()
    }

    #[test]
    fn wheel_is_dead_while_the_loading_screen_holds() {
        let mut app = ready_app();
        app.wheel(800.0);
        for _ in 0..5 {
            app.tick(0.05).unwrap();
            app.wheel(800.0);
        }
        assert_eq!(app.scroll(), 0.0);
        assert_eq!(app.loading().phase(), LoadingPhase::Loading);
    }

    #[test]
    fn boot_signals_fire_once_and_in_order() {
        let mut app = ready_app();
        let mut signals = boot(&mut app);
        for _ in 0..50 {
            signals.extend(app.tick(0.05).unwrap());
        }

        for signal in [
            AppSignal::ImagesReady,
            AppSignal::LoadingExitStarted,
            AppSignal::LayoutRefreshed,
            AppSignal::LoadingRemoved,
        ] {
            assert_eq!(count(&signals, &signal), 1, "{signal:?}");
        }
        let pos = |s: &AppSignal| signals.iter().position(|x| x == s).unwrap();
        assert!(pos(&AppSignal::ImagesReady) < pos(&AppSignal::LoadingExitStarted));
        assert!(pos(&AppSignal::LoadingExitStarted) <= pos(&AppSignal::LayoutRefreshed));
        // The first section claim lands during boot as well.
        assert_eq!(count(&signals, &AppSignal::SectionChanged("hero".into())), 1);
    }

    #[test]
    fn scroll_unlocks_at_exit_start_not_removal() {
        let mut app = ready_app();
        for _ in 0..200 {
            let signals = app.tick(0.05).unwrap();
            if signals.contains(&AppSignal::LoadingExitStarted) {
                break;
            }
        }
        assert_eq!(app.loading().phase(), LoadingPhase::Exiting);
        assert!(!app.state().loading_done);

        app.wheel(500.0);
        app.tick(0.1).unwrap();
        assert!(app.scroll() > 0.0);
    }

    #[test]
    fn keyboard_walks_the_nav_in_both_directions() {
        let mut app = ready_app();
        boot(&mut app);
        assert!(app.state().section_is("hero"));

        assert_eq!(app.key(Key::ArrowDown), Some(NavCommand::NextSection));
        settle(&mut app);
        assert_eq!(app.scroll(), 5000.0);
        assert!(app.state().section_is("history"));

        assert_eq!(app.key(Key::ArrowUp), Some(NavCommand::PrevSection));
        settle(&mut app);
        assert_eq!(app.scroll(), 0.0);
        assert!(app.state().section_is("hero"));

        // Up from the first section goes nowhere.
        app.key(Key::ArrowUp);
        assert!(!app.is_scrolling());

        assert_eq!(app.key(Key::End), Some(NavCommand::LastSection));
        settle(&mut app);
        assert_eq!(app.scroll(), 10_000.0);
        assert!(app.state().section_is("models"));
    }

    #[test]
    fn carousel_keys_step_between_snap_points() {
        let mut app = ready_app();
        boot(&mut app);
        app.key(Key::End);
        settle(&mut app);
        assert!(app.state().section_is("models"));

        assert_eq!(app.key(Key::ArrowRight), Some(NavCommand::CarouselNext));
        settle(&mut app);
        assert_eq!(app.scroll(), 11_500.0);
        // The middle card is centred: every card has slid one full width.
        let evaluated = app.evaluate();
        assert_eq!(evaluated.target("models.card.0").x_percent, -100.0);

        assert_eq!(app.key(Key::ArrowLeft), Some(NavCommand::CarouselPrev));
        settle(&mut app);
        assert_eq!(app.scroll(), 10_000.0);
    }

    #[test]
    fn parking_between_cards_snaps_to_the_nearest() {
        let mut app = ready_app();
        boot(&mut app);
        app.scroll_to(11_200.0);
        let _ = settle(&mut app);
        // 11200 is 0.4 through the pin; the nearest card sits at 0.5.
        assert_eq!(app.scroll(), 11_500.0);
    }

    #[test]
    fn modal_contains_wheel_and_keys_until_unmount() {
        let mut app = ready_app();
        boot(&mut app);
        let id = content::models()[0].id.clone();
        assert!(app.open_model(&id, 300.0));
        assert!(app.state().modal_open);

        app.wheel(120.0);
        app.tick(0.05).unwrap();
        assert_eq!(app.scroll(), 0.0);
        assert_eq!(app.modal().panel_scroll(), 120.0);
        assert_eq!(app.key(Key::ArrowDown), None);

        assert_eq!(app.key(Key::Escape), Some(NavCommand::CloseModal));
        let mut closes = 0;
        for _ in 0..60 {
            let signals = app.tick(0.05).unwrap();
            closes += count(&signals, &AppSignal::ModalClosed);
        }
        assert_eq!(closes, 1);
        assert!(!app.state().modal_open);

        // Page scroll is live again.
        app.wheel(300.0);
        app.tick(0.1).unwrap();
        assert!(app.scroll() > 0.0);
    }

    #[test]
    fn reopening_mid_close_is_refused() {
        let mut app = ready_app();
        boot(&mut app);
        let id = content::models()[0].id.clone();
        assert!(app.open_model(&id, 0.0));
        app.close_modal();
        assert!(!app.open_model(&id, 0.0));
    }

    #[test]
    fn resize_keeps_the_displayed_frame_and_reclamps() {
        let mut app = ready_app();
        boot(&mut app);
        app.scroll_to(2000.0);
        settle(&mut app);
        assert_eq!(app.backdrop().frame_index(), 96);

        app.resize(Viewport::new(800.0, 600.0).unwrap()).unwrap();
        assert_eq!(app.backdrop().frame_index(), 96);
        assert_eq!(app.backdrop().surface().width, 800);
        assert_eq!(app.layout().frame_window_px, 2400.0);
        assert_eq!(app.snapshot().scroll_limit, app.layout().scroll_limit);
    }

    #[test]
    fn scroll_subscribers_hear_every_tick() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut app = ready_app();
        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);
        let id = app.on_scroll(move |_| *sink.borrow_mut() += 1);
        for _ in 0..10 {
            app.tick(0.016).unwrap();
        }
        assert_eq!(*seen.borrow(), 10);
        assert!(app.off_scroll(id));
    }

    #[test]
    fn mismatched_preloader_is_rejected() {
        let (_tx, rx) = channel();
        let preloader = Preloader::from_channel(3, rx);
        assert!(App::with_preloader(showcase_page(), vp(), preloader).is_err());
    }

    #[test]
    fn snapshots_serialize() {
        let mut app = ready_app();
        boot(&mut app);
        let json = app.snapshot().to_json().unwrap();
        assert!(json.contains("\"frame_index\""));
        assert!(json.contains("\"loading_phase\""));
    }
}
