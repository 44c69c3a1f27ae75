//! Timing curves and spin-aware interpolation.
//!
//! A [`Curve`] maps a normalized ratio in [0,1] onto an eased ratio; scalar,
//! vector and angle interpolation all blend linearly on the eased value.

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::pose::Vec2;
use functions::{
    bezier_ease_t, cubic, directed_angle_target, lerp_f32, lerp_vec2, quadratic, quartic, quintic,
    spline_ease_t,
};

/// Easing curve. Control values of the polynomial variants are intermediate
/// bernstein coefficients between the fixed endpoints 0 and 1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    /// Holds the start value until the ratio reaches 1.
    Constant,
    #[default]
    Linear,
    Quadratic {
        c1: f32,
    },
    Cubic {
        c1: f32,
        c2: f32,
    },
    Quartic {
        c1: f32,
        c2: f32,
        c3: f32,
    },
    Quintic {
        c1: f32,
        c2: f32,
        c3: f32,
        c4: f32,
    },
    /// CSS-style cubic-bezier timing: (0,0), (x1,y1), (x2,y2), (1,1).
    Bezier {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    /// Free-form timing spline through (0,0), `points`, (1,1).
    Spline {
        points: Vec<Vec2>,
    },
}

impl Curve {
    /// Polynomial ease-in of the given order (2..=5): `t^order`.
    pub fn ease_in(order: u8) -> Self {
        Self::polynomial(order, 0.0)
    }

    /// Polynomial ease-out of the given order (2..=5): `1 - (1-t)^order`.
    pub fn ease_out(order: u8) -> Self {
        Self::polynomial(order, 1.0)
    }

    /// The common `ease-in-out` bezier.
    pub fn ease_in_out() -> Self {
        Self::Bezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        }
    }

    fn polynomial(order: u8, c: f32) -> Self {
        match order {
            0 | 1 => Self::Linear,
            2 => Self::Quadratic { c1: c },
            3 => Self::Cubic { c1: c, c2: c },
            4 => Self::Quartic {
                c1: c,
                c2: c,
                c3: c,
            },
            _ => Self::Quintic {
                c1: c,
                c2: c,
                c3: c,
                c4: c,
            },
        }
    }

    /// Map a ratio in [0,1] to its eased value in [0,1]. Inputs outside [0,1] are clamped.
    pub fn ease(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Curve::Constant => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Curve::Linear => t,
            Curve::Quadratic { c1 } => quadratic(0.0, *c1, 1.0, t),
            Curve::Cubic { c1, c2 } => cubic(0.0, *c1, *c2, 1.0, t),
            Curve::Quartic { c1, c2, c3 } => quartic(0.0, *c1, *c2, *c3, 1.0, t),
            Curve::Quintic { c1, c2, c3, c4 } => quintic(0.0, *c1, *c2, *c3, *c4, 1.0, t),
            Curve::Bezier { x1, y1, x2, y2 } => bezier_ease_t(t, *x1, *y1, *x2, *y2),
            Curve::Spline { points } => spline_ease_t(t, points),
        };
        // Catmull-rom can overshoot between in-range points.
        eased.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn interpolate(&self, a: f32, b: f32, t: f32) -> f32 {
        lerp_f32(a, b, self.ease(t))
    }

    #[inline]
    pub fn interpolate_vec2(&self, a: Vec2, b: Vec2, t: f32) -> Vec2 {
        lerp_vec2(a, b, self.ease(t))
    }

    /// Interpolate an angle (radians) honouring the authored spin direction.
    /// `Spin::None` freezes the angle at `a`.
    pub fn interpolate_angle(&self, a: f32, b: f32, t: f32, spin: Spin) -> f32 {
        match spin {
            Spin::None => a,
            Spin::CounterClockwise => self.interpolate(a, directed_angle_target(a, b, 1.0), t),
            Spin::Clockwise => self.interpolate(a, directed_angle_target(a, b, -1.0), t),
        }
    }

    /// Reject control values that would poison interpolation with NaNs or
    /// push the eased ratio outside [0,1].
    pub fn validate(&self) -> Result<(), AnimationError> {
        let invalid = |reason: String| Err(AnimationError::InvalidCurve { reason });
        let unit = |v: &f32| (0.0..=1.0).contains(v);
        let controls: Vec<f32> = match self {
            Curve::Constant | Curve::Linear => Vec::new(),
            Curve::Quadratic { c1 } => vec![*c1],
            Curve::Cubic { c1, c2 } => vec![*c1, *c2],
            Curve::Quartic { c1, c2, c3 } => vec![*c1, *c2, *c3],
            Curve::Quintic { c1, c2, c3, c4 } => vec![*c1, *c2, *c3, *c4],
            Curve::Bezier { x1, y1, x2, y2 } => {
                if !unit(x1) || !unit(x2) {
                    return invalid(format!("bezier x controls must lie in [0,1], got {x1}, {x2}"));
                }
                vec![*y1, *y2]
            }
            Curve::Spline { points } => {
                if points.is_empty() {
                    return invalid("spline has no points".into());
                }
                let mut last = 0.0f32;
                for p in points {
                    if !p.x.is_finite() || !p.y.is_finite() {
                        return invalid("spline point is not finite".into());
                    }
                    if p.x <= last || p.x >= 1.0 {
                        return invalid(format!(
                            "spline x values must increase strictly inside (0,1), got {}",
                            p.x
                        ));
                    }
                    last = p.x;
                }
                points.iter().map(|p| p.y).collect()
            }
        };
        if let Some(c) = controls.iter().find(|c| !c.is_finite()) {
            return invalid(format!("control value {c} is not finite"));
        }
        if let Some(c) = controls.iter().find(|c| !unit(*c)) {
            return invalid(format!("control value {c} lies outside [0,1]"));
        }
        Ok(())
    }
}

/// Authored rotation direction for a timeline key.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Spin {
    /// Do not tween the angle.
    None,
    /// Angle increases.
    #[default]
    CounterClockwise,
    /// Angle decreases.
    Clockwise,
}

impl TryFrom<i8> for Spin {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Spin::None),
            1 => Ok(Spin::CounterClockwise),
            -1 => Ok(Spin::Clockwise),
            other => Err(format!("spin must be -1, 0 or 1, got {other}")),
        }
    }
}

impl From<Spin> for i8 {
    fn from(spin: Spin) -> Self {
        match spin {
            Spin::None => 0,
            Spin::CounterClockwise => 1,
            Spin::Clockwise => -1,
        }
    }
}
