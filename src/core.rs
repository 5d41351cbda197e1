use crate::error::{StradaError, StradaResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Viewport dimensions in CSS-like pixels. Document-space layout math is all
/// derived from this, so both axes must be positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> StradaResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(StradaError::validation("Viewport dimensions must be > 0"));
        }
        if !(width.is_finite() && height.is_finite()) {
            return Err(StradaError::validation("Viewport dimensions must be finite"));
        }
        Ok(Self { width, height })
    }

    /// `units` viewport-height units to pixels (100.0 == one full viewport).
    pub fn vh(self, units: f64) -> f64 {
        self.height * units / 100.0
    }

    /// `units` viewport-width units to pixels.
    pub fn vw(self, units: f64) -> f64 {
        self.width * units / 100.0
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_straight_rgba(self) -> [u8; 4] {
        fn unpremul(c: u8, a: u8) -> u8 {
            if a == 0 {
                return 0;
            }
            let c = u16::from(c);
            let a = u16::from(a);
            ((c * 255 + a / 2) / a).min(255) as u8
        }

        [
            unpremul(self.r, self.a),
            unpremul(self.g, self.a),
            unpremul(self.b, self.a),
            self.a,
        ]
    }
}
