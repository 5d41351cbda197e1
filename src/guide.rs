//! # Strada guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of strada's architecture and public API.
//! It is intentionally detailed so future phases (and embedding hosts) can build on a shared
//! mental model of what "a tick" means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Page`](crate::Page): the declarative page model (section stack + frame sequence + nav order)
//! - [`Layout`](crate::Layout): the page resolved against a concrete [`Viewport`](crate::Viewport)
//! - [`ScrollEngine`](crate::ScrollEngine): the smoothed document scroll; all input retargets glides
//! - [`Timeline`](crate::Timeline) + [`Trigger`](crate::Trigger): a named set of tweens and the rule
//!   that advances its playhead
//! - [`Choreographer`](crate::Choreographer): owns every (trigger, timeline) pair and samples them
//!   into an [`EvaluatedPage`](crate::EvaluatedPage)
//! - [`Preloader`](crate::Preloader): decodes the backdrop frame sequence on worker threads
//! - [`Backdrop`](crate::Backdrop): paints whichever frame the scroll selects, cover-fit
//! - [`LoadingScreen`](crate::LoadingScreen), [`ModalController`](crate::ModalController): the two
//!   overlay state machines that gate the page scroll
//! - [`SectionRegistry`](crate::SectionRegistry): decides which section owns the viewport
//! - [`App`](crate::App): one owner for all of the above, advanced by [`App::tick`](crate::App::tick)
//!
//! The per-tick pipeline is explicitly staged:
//!
//! 1. Pump frame decodes: [`Preloader::pump`](crate::Preloader::pump)
//! 2. Run the loading gate: [`LoadingScreen::tick`](crate::LoadingScreen::tick)
//! 3. Integrate the scroll: [`ScrollEngine::tick`](crate::ScrollEngine::tick)
//! 4. Paint the backdrop: [`Backdrop::render`](crate::Backdrop::render)
//! 5. Advance choreography: [`Choreographer::tick`](crate::Choreographer::tick)
//! 6. Re-observe sections, advance the modal, refresh the nav chrome
//!
//! [`App::tick`](crate::App::tick) is the convenience wrapper for all six stages and reports what
//! happened as [`AppSignal`](crate::AppSignal)s.
//!
//! ---
//!
//! ## One scroll position per frame (and why)
//!
//! Strada wants every consumer of the scroll position to agree within a frame: the backdrop, the
//! parallax timelines, the section registry, and the nav chrome must never read different numbers.
//! To do that, the engine integrates input into a single position once per tick, and everything
//! downstream reads that value. Wheel deltas and programmatic jumps never move the position
//! directly; they retarget an eased glide (1.2s, exponential-out by default), so the reported
//! position is continuous even under erratic input.
//!
//! Two things may lock the scroll, and both own their release:
//!
//! - the loading screen, which unlocks the moment its exit starts (not when it finishes)
//! - the modal, which unlocks only once its close choreography has fully unmounted
//!
//! While locked, wheel input and programmatic scrolls are discarded; an in-flight glide still
//! finishes.
//!
//! ---
//!
//! ## Premultiplied alpha (strada's pixel contract)
//!
//! Strada's internal pixel convention is **premultiplied RGBA8**:
//!
//! - decoded frames are premultiplied at ingest ([`PreparedFrame`](crate::PreparedFrame))
//! - the backdrop's [`Surface`](crate::Surface) holds premultiplied pixels
//! - [`Surface::to_rgba8`](crate::Surface::to_rgba8) converts back to straight alpha for encoding
//!
//! If you composite strada's output elsewhere, treat [`Surface`](crate::Surface) pixels as
//! premultiplied unless explicitly converted.
//!
//! ---
//!
//! ## Building and ticking a page
//!
//! JSON is supported via Serde ([`Page::from_json`](crate::Page::from_json)), and the built-in
//! [`showcase_page`](crate::showcase_page) carries the canonical section stack. The following
//! example mounts it, waits out the loading choreography, jumps to the last nav section, and
//! prints a state snapshot.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use strada::{App, Key, Viewport, showcase_page};
//!
//! fn main() -> strada::StradaResult<()> {
//!     let viewport = Viewport::new(1280.0, 720.0)?;
//!     let mut app = App::mount(showcase_page(), viewport, Path::new("assets"))?;
//!     app.wait_for_frames();
//!
//!     // Drive the page at 60 fps until the loading screen has left.
//!     while !app.state().loading_done {
//!         app.tick(1.0 / 60.0)?;
//!     }
//!
//!     app.key(Key::End);
//!     while app.is_scrolling() {
//!         app.tick(1.0 / 60.0)?;
//!     }
//!
//!     println!("{}", app.snapshot().to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! Notes:
//!
//! - [`Page::validate`](crate::Page::validate) runs at mount; section ids must be unique and the
//!   nav may only reference known sections.
//! - Frame files are resolved as `root/directory/prefixNNN.ext`, 1-based and zero-padded
//!   ([`FrameSequence::path`](crate::FrameSequence::path)). Validation checks the description is
//!   well-formed; missing files surface later as skipped frames, never as errors.
//!
//! ---
//!
//! ## Triggers: four ways a playhead advances
//!
//! Every timeline is driven by exactly one [`Trigger`](crate::Trigger):
//!
//! - `Range { start, end }`: scrubbed; the playhead is a pure function of scroll across the range
//! - `Pin { section }`: scrubbed by a pinned section's pin progress
//! - `Toggle { start, end }`: timed; plays forward inside the range, rewinds outside
//! - `Once { delay }`: timed; waits out the delay, plays once, never rewinds
//!
//! Scrubbed triggers make scrolling feel like dragging a playhead; timed triggers are for
//! enter/leave accents that should run at their own pace. Within a timeline, overlapping tweens on
//! the same (target, property) resolve last-started-wins, matching how stacked tweens behave in
//! hand-authored motion tools.
//!
//! ---
//!
//! ## The loading gate
//!
//! The loading screen holds until **both** are true, in either order:
//!
//! - every frame has reported in (failures count toward readiness, so a damaged sequence can never
//!   wedge the page)
//! - a minimum display time has elapsed, measured by one elapsed-time accumulator
//!
//! Then the exit plays: bar to full, title scale-and-fade, overlay slide. The scroll unlocks the
//! moment the exit starts, and one beat later the screen requests a layout refresh and unmounts.
//! The bar can never finish short of full because its exit tween departs from wherever the eased
//! percent readout currently is.
//!
//! ---
//!
//! ## Sections, pins, and the carousel
//!
//! [`solve_layout`](crate::solve_layout) stacks sections top to bottom; a section with `pin_px > 0`
//! stays fixed in the viewport for that much scroll while its timelines scrub. The registry
//! re-observes sections against a 10%-inset viewport window at fixed visibility thresholds, so
//! small scroll jitter cannot flap the active section.
//!
//! The models section is a pinned horizontal carousel: cards share one track and slide a full card
//! width per lineup position. Carousel keys glide between its snap points, and a scroll parked
//! between cards snaps to the nearest one.
//!
//! ---
//!
//! ## The CLI
//!
//! The `strada` binary drives all of the above headlessly:
//!
//! - `strada frame`: decode the sequence, paint the backdrop for a scroll offset, write a PNG
//! - `strada inspect`: mount the page, settle the loading choreography, glide to an offset, print
//!   a [`Snapshot`](crate::Snapshot) as JSON
//! - `strada layout`: solve the page layout for a viewport and print it as JSON
