/// Easing curves used across scroll smoothing and timeline tweens.
///
/// `apply` clamps its input to `[0, 1]`. Most curves also keep their output in
/// `[0, 1]`; the `Back` variants deliberately overshoot (below 0 going in,
/// above 1 coming out), and `OutExpo` starts at 0.001 rather than 0 so a
/// retargeted scroll glide always moves on its first step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuint,
    OutQuint,
    InOutQuint,
    OutExpo,
    InBack,
    OutBack,
}

/// Overshoot factor for the `Back` curves.
const BACK_OVERSHOOT: f64 = 1.7;

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(5) / 2.0)
                }
            }
            Self::OutExpo => (1.001 - (2.0f64).powf(-10.0 * t)).min(1.0),
            Self::InBack => {
                let c1 = BACK_OVERSHOOT;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Self::OutBack => {
                let c1 = BACK_OVERSHOOT;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }
}
