use std::path::Path;
use std::sync::mpsc::{Receiver, channel};

use crate::core::Rgba8Premul;
use crate::error::StradaResult;
use crate::page::FrameSequence;

/// Frame to paint for a scroll offset, given the scrub window in pixels.
/// The window maps linearly onto the sequence; scrolling past it holds the
/// last frame.
pub fn frame_index_for(scroll: f64, window_px: f64, count: usize) -> usize {
    if count == 0 || window_px <= 0.0 {
        return 0;
    }
    let progress = (scroll / window_px).clamp(0.0, 1.0);
    ((progress * count as f64).floor() as usize).min(count - 1)
}

/// A decoded frame, premultiplied and ready to composite.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedFrame {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba8Premul>,
}

impl PreparedFrame {
    pub fn from_rgba8(index: usize, image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .as_raw()
            .chunks_exact(4)
            .map(|px| Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Self {
            index,
            width,
            height,
            pixels,
        }
    }

    /// Pixel at (x, y); callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Outcome of one background decode.
#[derive(Debug)]
pub enum FrameEvent {
    Loaded(PreparedFrame),
    Failed { index: usize, reason: String },
}

/// Decodes a frame sequence on worker threads and collects the results.
///
/// Progress counts failures as complete so a damaged sequence can never
/// wedge the loading screen; the missing frames simply stay empty. Feed
/// [`Preloader::pump`] from the tick loop, or [`Preloader::wait`] to block.
pub struct Preloader {
    total: usize,
    rx: Receiver<FrameEvent>,
    frames: Vec<Option<PreparedFrame>>,
    counted: Vec<bool>,
    completed: usize,
}

impl Preloader {
    /// Start decoding every frame of `sequence` under `root`.
    #[tracing::instrument(skip_all, fields(count = sequence.count))]
    pub fn spawn(sequence: &FrameSequence, root: &Path) -> StradaResult<Self> {
        sequence.validate()?;
        let (tx, rx) = channel();
        for index in 0..sequence.count {
            let path = root.join(sequence.path(index));
            let tx = tx.clone();
            rayon::spawn(move || {
                let _ = tx.send(load_frame(index, &path));
            });
        }
        tracing::debug!("frame decode jobs queued");
        Ok(Self::from_channel(sequence.count, rx))
    }

    /// Wrap an externally fed channel; `total` events are expected.
    pub fn from_channel(total: usize, rx: Receiver<FrameEvent>) -> Self {
        Self {
            total,
            rx,
            frames: (0..total).map(|_| None).collect(),
            counted: vec![false; total],
            completed: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn is_ready(&self) -> bool {
        self.completed >= self.total
    }

    /// Loading progress in whole percent, 0..=100.
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u8
    }

    pub fn frame(&self, index: usize) -> Option<&PreparedFrame> {
        self.frames.get(index).and_then(Option::as_ref)
    }

    /// Drain finished decodes. Returns true the one time the last frame
    /// lands and the sequence becomes ready.
    pub fn pump(&mut self) -> bool {
        let was_ready = self.is_ready();
        while let Ok(event) = self.rx.try_recv() {
            self.absorb(event);
        }
        let became_ready = self.is_ready() && !was_ready;
        if became_ready {
            tracing::info!(
                loaded = self.frames.iter().flatten().count(),
                total = self.total,
                "frame sequence ready"
            );
        }
        became_ready
    }

    /// Block until every decode has reported in.
    pub fn wait(&mut self) {
        while !self.is_ready() {
            match self.rx.recv() {
                Ok(event) => self.absorb(event),
                // All senders gone; whatever arrived is all there is.
                Err(_) => break,
            }
        }
    }

    fn absorb(&mut self, event: FrameEvent) {
        let index = match &event {
            FrameEvent::Loaded(frame) => frame.index,
            FrameEvent::Failed { index, .. } => *index,
        };
        if index >= self.total || self.counted[index] {
            return;
        }
        self.counted[index] = true;
        self.completed += 1;
        match event {
            FrameEvent::Loaded(frame) => self.frames[index] = Some(frame),
            FrameEvent::Failed { index, reason } => {
                tracing::warn!(index, %reason, "frame failed to decode");
            }
        }
    }
}

fn load_frame(index: usize, path: &Path) -> FrameEvent {
    match image::open(path) {
        Ok(img) => FrameEvent::Loaded(PreparedFrame::from_rgba8(index, img.to_rgba8())),
        Err(e) => FrameEvent::Failed {
            index,
            reason: e.to_string(),
        },
    }
}
