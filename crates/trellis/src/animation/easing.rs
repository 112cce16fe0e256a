//! Easing curves mapping linear progress to eased progress.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    fmt,
    str::FromStr,
};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named easing curve.
///
/// Every curve maps 0 to 0 and 1 to 1. `EaseOutBack` overshoots in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic acceleration.
    EaseInQuad,
    /// Quadratic deceleration.
    EaseOutQuad,
    /// Quadratic acceleration then deceleration.
    EaseInOutQuad,
    /// Cubic acceleration.
    EaseInCubic,
    /// Cubic deceleration.
    EaseOutCubic,
    /// Cubic acceleration then deceleration.
    EaseInOutCubic,
    /// Sinusoidal acceleration.
    EaseInSine,
    /// Sinusoidal deceleration.
    EaseOutSine,
    /// Sinusoidal acceleration then deceleration.
    EaseInOutSine,
    /// Deceleration that overshoots and settles back.
    EaseOutBack,
    /// Deceleration with bounces at the end.
    EaseOutBounce,
}

impl Easing {
    /// All curves.
    pub const ALL: [Self; 12] = [
        Self::Linear,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInSine,
        Self::EaseOutSine,
        Self::EaseInOutSine,
        Self::EaseOutBack,
        Self::EaseOutBounce,
    ];

    /// Canonical curve name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInQuad => "ease-in-quad",
            Self::EaseOutQuad => "ease-out-quad",
            Self::EaseInOutQuad => "ease-in-out-quad",
            Self::EaseInCubic => "ease-in-cubic",
            Self::EaseOutCubic => "ease-out-cubic",
            Self::EaseInOutCubic => "ease-in-out-cubic",
            Self::EaseInSine => "ease-in-sine",
            Self::EaseOutSine => "ease-out-sine",
            Self::EaseInOutSine => "ease-in-out-sine",
            Self::EaseOutBack => "ease-out-back",
            Self::EaseOutBounce => "ease-out-bounce",
        }
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseInSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::EaseOutSine => (t * FRAC_PI_2).sin(),
            Self::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseOutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::EaseOutBounce => bounce_out(t),
        }
    }
}

/// The standard four-segment bounce.
fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = Error;

    /// Accepts canonical names in any casing, plus the CSS-style aliases
    /// `ease-in`, `ease-out`, and `ease-in-out` for the quadratic curves.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_case(Case::Kebab);
        match key.as_str() {
            "ease-in" => return Ok(Self::EaseInQuad),
            "ease-out" => return Ok(Self::EaseOutQuad),
            "ease-in-out" => return Ok(Self::EaseInOutQuad),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|e| e.name() == key)
            .ok_or_else(|| Error::Configuration(format!("unknown easing: {s:?}")))
    }
}

impl TryFrom<String> for Easing {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Easing> for String {
    fn from(e: Easing) -> Self {
        e.name().to_string()
    }
}
