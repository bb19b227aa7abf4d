use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Easing curves available to tweens.
///
/// Curves follow the anime.js definitions the story charts were tuned
/// against: every curve maps `0 -> 0` and `1 -> 1`, and `OutBack` and
/// `OutElastic` overshoot in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    OutQuad,
    OutQuart,
    InOutQuart,
    OutBack,
    OutElastic { amplitude: f64, period: f64 },
}

impl Easing {
    /// Elastic ease-out used by bar growth.
    pub const BAR_ELASTIC: Self = Self::OutElastic {
        amplitude: 1.0,
        period: 0.8,
    };

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::OutQuad => ease_out(t, |x| x * x),
            Self::OutQuart => ease_out(t, |x| x.powi(4)),
            Self::InOutQuart => ease_in_out(t, |x| x.powi(4)),
            Self::OutBack => ease_out(t, back_in),
            Self::OutElastic { amplitude, period } => {
                ease_out(t, |x| elastic_in(x, amplitude, period))
            }
        }
    }
}

fn ease_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    1.0 - ease_in(1.0 - t)
}

fn ease_in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in(t * -2.0 + 2.0) / 2.0
    }
}

fn back_in(t: f64) -> f64 {
    t * t * (3.0 * t - 2.0)
}

fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let a = amplitude.clamp(1.0, 10.0);
    let p = period.clamp(0.1, 2.0);
    let phase = p / TAU * (1.0 / a).asin();
    -a * 2f64.powf(10.0 * (t - 1.0)) * (((t - 1.0) - phase) * (PI * 2.0) / p).sin()
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn out_quad_matches_closed_form() {
        assert!((Easing::OutQuad.apply(0.5) - 0.75).abs() <= 1e-12);
    }

    #[test]
    fn in_out_quart_is_symmetric_about_midpoint() {
        let ease = Easing::InOutQuart;
        assert!((ease.apply(0.5) - 0.5).abs() <= 1e-12);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn out_back_overshoots_before_settling() {
        let peak = (1..100)
            .map(|i| Easing::OutBack.apply(f64::from(i) / 100.0))
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 1.0);
    }
}
