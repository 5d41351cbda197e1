use std::sync::mpsc::{Sender, channel};

use strada::{
    App, AppSignal, FrameEvent, Key, LoadingPhase, NavCommand, Preloader, Viewport, showcase_page,
};

fn vp() -> Viewport {
    Viewport::new(1280.0, 1000.0).unwrap()
}

/// App fed from a scripted channel so tests control exactly when the frame
/// sequence becomes ready.
fn scripted_app() -> (App, Sender<FrameEvent>, usize) {
    let page = showcase_page();
    let total = page.frames.count;
    let (tx, rx) = channel();
    let app = App::with_preloader(page, vp(), Preloader::from_channel(total, rx)).unwrap();
    (app, tx, total)
}

fn feed_all(tx: &Sender<FrameEvent>, total: usize) {
    for index in 0..total {
        tx.send(FrameEvent::Failed { index, reason: "scripted".into() }).unwrap();
    }
}

#[test]
fn exit_waits_for_images_when_the_floor_passes_first() {
    let (mut app, tx, total) = scripted_app();

    // Far past the minimum display time, but no frame has landed.
    for _ in 0..30 {
        let signals = app.tick(0.1).unwrap();
        assert!(!signals.contains(&AppSignal::LoadingExitStarted));
    }
    assert_eq!(app.loading().phase(), LoadingPhase::Loading);
    app.wheel(500.0);
    app.tick(0.1).unwrap();
    assert_eq!(app.scroll(), 0.0);

    // The moment the frames land, the exit starts on that same tick.
    feed_all(&tx, total);
    let signals = app.tick(0.1).unwrap();
    assert!(signals.contains(&AppSignal::ImagesReady));
    assert!(signals.contains(&AppSignal::LoadingExitStarted));
}

#[test]
fn exit_waits_for_the_floor_when_images_land_first() {
    let (mut app, tx, total) = scripted_app();
    feed_all(&tx, total);

    let signals = app.tick(0.5).unwrap();
    assert!(signals.contains(&AppSignal::ImagesReady));
    assert_eq!(app.loading().phase(), LoadingPhase::Loading);
    assert_eq!(app.frames().progress(), 100);

    app.tick(0.5).unwrap();
    assert_eq!(app.loading().phase(), LoadingPhase::Loading);

    // Crossing the floor releases the exit.
    let signals = app.tick(0.6).unwrap();
    assert!(signals.contains(&AppSignal::LoadingExitStarted));
    assert_eq!(app.loading().phase(), LoadingPhase::Exiting);
}

#[test]
fn the_refresh_beat_fires_once_and_relayouts() {
    let (mut app, tx, total) = scripted_app();
    feed_all(&tx, total);

    let mut refreshes = 0;
    let mut removals = 0;
    for _ in 0..120 {
        let signals = app.tick(0.05).unwrap();
        refreshes += signals.iter().filter(|s| **s == AppSignal::LayoutRefreshed).count();
        removals += signals.iter().filter(|s| **s == AppSignal::LoadingRemoved).count();
    }
    assert_eq!(refreshes, 1);
    assert_eq!(removals, 1);
    assert!(app.state().loading_done);
    assert_eq!(app.snapshot().scroll_limit, app.layout().scroll_limit);
}

#[test]
fn keyboard_is_dead_until_images_are_ready() {
    let (mut app, tx, total) = scripted_app();
    app.tick(0.1).unwrap();
    assert_eq!(app.key(Key::ArrowDown), None);

    feed_all(&tx, total);
    app.tick(0.1).unwrap();

    // Commands dispatch as soon as the frames are in, but the scroll is
    // still locked behind the loading screen, so nothing moves yet.
    assert_eq!(app.key(Key::ArrowDown), Some(NavCommand::NextSection));
    for _ in 0..5 {
        app.tick(0.1).unwrap();
    }
    assert_eq!(app.scroll(), 0.0);
    assert_eq!(app.loading().phase(), LoadingPhase::Loading);
}

#[test]
fn typing_stands_keyboard_navigation_down() {
    let (mut app, tx, total) = scripted_app();
    feed_all(&tx, total);
    for _ in 0..80 {
        app.tick(0.05).unwrap();
    }
    assert!(app.state().loading_done);

    app.set_typing(true);
    assert_eq!(app.key(Key::ArrowDown), None);
    app.set_typing(false);
    assert_eq!(app.key(Key::ArrowDown), Some(NavCommand::NextSection));
}

#[test]
fn the_page_stays_parked_until_the_modal_unmounts() {
    let (mut app, tx, total) = scripted_app();
    feed_all(&tx, total);
    for _ in 0..80 {
        app.tick(0.05).unwrap();
    }
    assert!(app.state().loading_done);

    assert!(app.open_model("tempesta", 400.0));
    assert_eq!(app.key(Key::End), None);
    app.wheel(900.0);
    app.tick(0.1).unwrap();
    assert_eq!(app.scroll(), 0.0);
    assert_eq!(app.modal().panel_scroll(), 400.0);

    assert_eq!(app.key(Key::Escape), Some(NavCommand::CloseModal));
    let mut closed_at = None;
    for i in 0..60 {
        let signals = app.tick(0.05).unwrap();
        // No page motion leaks out while the close choreography runs.
        assert_eq!(app.scroll(), 0.0);
        if signals.contains(&AppSignal::ModalClosed) {
            closed_at = Some(i);
            break;
        }
    }
    assert!(closed_at.is_some());

    app.wheel(900.0);
    app.tick(0.2).unwrap();
    assert!(app.scroll() > 0.0);
}

#[test]
fn unknown_model_ids_do_not_open_anything() {
    let (mut app, tx, total) = scripted_app();
    feed_all(&tx, total);
    app.tick(0.1).unwrap();
    assert!(!app.open_model("countach", 0.0));
    assert!(!app.state().modal_open);
}
