//! Easing and interpolation helpers:
//! - lerp_f32 / lerp_vec2 (component-wise)
//! - bernstein polynomials for the quadratic..quintic curve family
//! - cubic-bezier timing solved by bisection on x
//! - catmull-rom evaluation for free-form splines
//! - directional angle targets for spin-aware rotation

use std::f32::consts::TAU;

use crate::pose::Vec2;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2 {
        x: lerp_f32(a.x, b.x, t),
        y: lerp_f32(a.y, b.y, t),
    }
}

#[inline]
pub fn quadratic(p0: f32, p1: f32, p2: f32, t: f32) -> f32 {
    lerp_f32(lerp_f32(p0, p1, t), lerp_f32(p1, p2, t), t)
}

/// Cubic Bezier basis function
#[inline]
pub fn cubic(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[inline]
pub fn quartic(p0: f32, p1: f32, p2: f32, p3: f32, p4: f32, t: f32) -> f32 {
    lerp_f32(cubic(p0, p1, p2, p3, t), cubic(p1, p2, p3, p4, t), t)
}

#[inline]
pub fn quintic(p0: f32, p1: f32, p2: f32, p3: f32, p4: f32, p5: f32, t: f32) -> f32 {
    lerp_f32(
        quartic(p0, p1, p2, p3, p4, t),
        quartic(p1, p2, p3, p4, p5, t),
        t,
    )
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
pub fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // x is monotonic in [0,1] for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic(0.0, y1, y2, 1.0, mid)
}

/// Evaluate a timing spline through (0,0), `points`, (1,1) at `t`.
///
/// `points` must be sorted by strictly increasing x inside (0, 1). Each
/// segment is a uniform catmull-rom patch over the y values, parameterised by
/// the segment-local x.
pub fn spline_ease_t(t: f32, points: &[Vec2]) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let n = points.len() + 2;
    let at = |i: usize| -> Vec2 {
        if i == 0 {
            Vec2::ZERO
        } else if i == n - 1 {
            Vec2::ONE
        } else {
            points[i - 1]
        }
    };

    let mut seg = 0;
    while seg + 2 < n && at(seg + 1).x <= t {
        seg += 1;
    }
    let p1 = at(seg);
    let p2 = at(seg + 1);
    let p0 = if seg == 0 { p1 } else { at(seg - 1) };
    let p3 = if seg + 2 >= n { p2 } else { at(seg + 2) };

    let span = p2.x - p1.x;
    if span <= 0.0 {
        return p2.y;
    }
    let u = (t - p1.x) / span;
    catmull_rom(p0.y, p1.y, p2.y, p3.y, u)
}

#[inline]
fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, u: f32) -> f32 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u3)
}

/// Shift `b` by whole turns so that moving from `a` to the result turns in the
/// direction given by `sign` (+1 increasing, -1 decreasing). Already-correct
/// targets, including multi-turn ones, are left alone.
#[inline]
pub fn directed_angle_target(a: f32, b: f32, sign: f32) -> f32 {
    if sign > 0.0 && b < a {
        b + ((a - b) / TAU).ceil() * TAU
    } else if sign < 0.0 && b > a {
        b - ((b - a) / TAU).ceil() * TAU
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn polynomial_endpoints() {
        approx(quadratic(0.0, 0.3, 1.0, 0.0), 0.0, 1e-6);
        approx(quadratic(0.0, 0.3, 1.0, 1.0), 1.0, 1e-6);
        approx(quintic(0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.0), 1.0, 1e-6);
        // Evenly spaced controls collapse to a straight line.
        approx(quintic(0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 0.37), 0.37, 1e-5);
        approx(cubic(0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 0.61), 0.61, 1e-5);
    }

    #[test]
    fn bezier_midpoint_of_symmetric_curve() {
        approx(bezier_ease_t(0.5, 0.42, 0.0, 0.58, 1.0), 0.5, 1e-3);
        approx(bezier_ease_t(0.25, 0.0, 0.0, 1.0, 1.0), 0.25, 1e-6);
    }

    #[test]
    fn spline_passes_through_points() {
        let pts = [Vec2 { x: 0.5, y: 0.8 }];
        approx(spline_ease_t(0.0, &pts), 0.0, 1e-6);
        approx(spline_ease_t(0.5, &pts), 0.8, 1e-6);
        approx(spline_ease_t(1.0, &pts), 1.0, 1e-6);
        assert_eq!(spline_ease_t(0.5, &[]), 0.5);
    }

    #[test]
    fn directed_targets() {
        approx(directed_angle_target(1.0, 0.5, 1.0), 0.5 + TAU, 1e-5);
        approx(directed_angle_target(0.5, 1.0, -1.0), 1.0 - TAU, 1e-5);
        approx(directed_angle_target(0.0, 3.0 * TAU, 1.0), 3.0 * TAU, 1e-5);
    }
}
