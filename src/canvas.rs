use crate::core::{Rgba8Premul, Viewport};
use crate::error::{StradaError, StradaResult};
use crate::frames::{PreparedFrame, Preloader, frame_index_for};

/// An owned premultiplied-RGBA8 pixel buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba8Premul>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> StradaResult<Self> {
        if width == 0 || height == 0 {
            return Err(StradaError::validation("surface dimensions must be > 0"));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba8Premul::TRANSPARENT; (width * height) as usize],
        })
    }

    pub fn clear(&mut self, color: Rgba8Premul) {
        self.pixels.fill(color);
    }

    /// Pixel at (x, y); callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        self.pixels[(y * self.width + x) as usize]
    }

    fn put(&mut self, x: u32, y: u32, px: Rgba8Premul) {
        self.pixels[(y * self.width + x) as usize] = px;
    }

    /// Copy out as straight-alpha RGBA8 for encoding.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            let [r, g, b, a] = px.to_straight_rgba();
            data.extend_from_slice(&[r, g, b, a]);
        }
        // Length matches by construction.
        image::RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

/// The full-viewport canvas behind the hero: paints whichever frame the
/// scroll position selects, cover-fit and centered.
///
/// A frame that failed to decode is skipped entirely, previous pixels
/// included, exactly as a skipped draw call would behave.
pub struct Backdrop {
    surface: Surface,
    frame_index: usize,
}

impl Backdrop {
    pub fn new(viewport: Viewport) -> StradaResult<Self> {
        Ok(Self {
            surface: Surface::new(viewport.width.round() as u32, viewport.height.round() as u32)?,
            frame_index: 0,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Pick the frame for `scroll` and paint it if it is available.
    pub fn render(&mut self, scroll: f64, window_px: f64, frames: &Preloader) {
        self.frame_index = frame_index_for(scroll, window_px, frames.total());
        if let Some(frame) = frames.frame(self.frame_index) {
            self.surface.clear(Rgba8Premul::TRANSPARENT);
            self.draw_cover(frame);
        }
    }

    /// Rebuild the surface for a new viewport and repaint the frame the
    /// backdrop was already showing.
    pub fn resize(&mut self, viewport: Viewport, frames: &Preloader) -> StradaResult<()> {
        self.surface =
            Surface::new(viewport.width.round() as u32, viewport.height.round() as u32)?;
        if let Some(frame) = frames.frame(self.frame_index) {
            self.draw_cover(frame);
        }
        Ok(())
    }

    /// Scale to fill both axes, overflow cropped equally on each side.
    fn draw_cover(&mut self, frame: &PreparedFrame) {
        let dw = f64::from(self.surface.width);
        let dh = f64::from(self.surface.height);
        let sw = f64::from(frame.width);
        let sh = f64::from(frame.height);
        let scale = (dw / sw).max(dh / sh);
        let offset_x = (dw - sw * scale) / 2.0;
        let offset_y = (dh - sh * scale) / 2.0;

        for dy in 0..self.surface.height {
            let sy = ((f64::from(dy) - offset_y) / scale)
                .floor()
                .clamp(0.0, sh - 1.0) as u32;
            for dx in 0..self.surface.width {
                let sx = ((f64::from(dx) - offset_x) / scale)
                    .floor()
                    .clamp(0.0, sw - 1.0) as u32;
                self.surface.put(dx, dy, frame.pixel(sx, sy));
            }
        }
    }
}
