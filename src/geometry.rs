//! Polar-to-path conversion for the rendering surface.
//!
//! Angles are radians measured from the positive x-axis. Because the SVG
//! y-axis grows downward, increasing angle sweeps visually clockwise; the
//! sweep flags below are chosen for that convention.

use std::f64::consts::PI;

use kurbo::Point;

use crate::error::{SunwheelError, SunwheelResult};

pub fn polar_to_cartesian(cx: f64, cy: f64, r: f64, angle: f64) -> Point {
    Point::new(cx + r * angle.cos(), cy + r * angle.sin())
}

/// Closed pie-slice outline: center, line to the rim, arc, close.
pub fn describe_arc(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let a = polar_to_cartesian(cx, cy, r, start);
    let b = polar_to_cartesian(cx, cy, r, end);
    let large_arc = large_arc_flag(start, end);
    format!(
        "M {cx} {cy} L {} {} A {r} {r} 0 {large_arc} 1 {} {} Z",
        a.x, a.y, b.x, b.y
    )
}

/// Closed annular-sector outline: outer arc forward, line inward, inner arc
/// swept back (sweep flag 0), close.
pub fn describe_ring_arc(
    cx: f64,
    cy: f64,
    r_inner: f64,
    r_outer: f64,
    start: f64,
    end: f64,
) -> String {
    let outer_start = polar_to_cartesian(cx, cy, r_outer, start);
    let outer_end = polar_to_cartesian(cx, cy, r_outer, end);
    let inner_end = polar_to_cartesian(cx, cy, r_inner, end);
    let inner_start = polar_to_cartesian(cx, cy, r_inner, start);
    let large_arc = large_arc_flag(start, end);
    [
        format!("M {} {}", outer_start.x, outer_start.y),
        format!(
            "A {r_outer} {r_outer} 0 {large_arc} 1 {} {}",
            outer_end.x, outer_end.y
        ),
        format!("L {} {}", inner_end.x, inner_end.y),
        format!(
            "A {r_inner} {r_inner} 0 {large_arc} 0 {} {}",
            inner_start.x, inner_start.y
        ),
        "Z".to_string(),
    ]
    .join(" ")
}

fn large_arc_flag(start: f64, end: f64) -> u8 {
    if end - start > PI { 1 } else { 0 }
}

/// One ring's radial band. `inner` may be 0 for the innermost full disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Radii {
    pub inner: f64,
    pub outer: f64,
}

impl Radii {
    pub const ZERO: Radii = Radii {
        inner: 0.0,
        outer: 0.0,
    };

    pub fn new(inner: f64, outer: f64) -> SunwheelResult<Self> {
        if !(0.0 <= inner && inner <= outer) {
            return Err(SunwheelError::validation(format!(
                "radii must satisfy 0 <= inner <= outer, got {inner}..{outer}"
            )));
        }
        Ok(Self { inner, outer })
    }

    pub fn full_disk(outer: f64) -> Self {
        Self { inner: 0.0, outer }
    }

    /// Midline radius, where slice labels sit.
    pub fn midline(&self) -> f64 {
        (self.inner + self.outer) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const EPS: f64 = 1e-12;

    #[test]
    fn polar_axes() {
        let p = polar_to_cartesian(1.0, 2.0, 5.0, 0.0);
        assert!((p.x - 6.0).abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);

        for angle in [0.0, 1.0, PI, TAU] {
            let p = polar_to_cartesian(1.0, 2.0, 0.0, angle);
            assert!((p.x - 1.0).abs() < EPS);
            assert!((p.y - 2.0).abs() < EPS);
        }

        // y grows downward on screen: a positive quarter turn points down.
        let p = polar_to_cartesian(0.0, 0.0, 1.0, FRAC_PI_2);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn arc_path_opens_with_move_and_closes() {
        let d = describe_arc(0.0, 0.0, 100.0, 0.0, 1.0);
        assert!(d.starts_with("M "));
        assert!(d.ends_with("Z"));
        let d = describe_ring_arc(0.0, 0.0, 70.0, 100.0, 0.0, 1.0);
        assert!(d.starts_with("M "));
        assert!(d.ends_with("Z"));
    }

    #[test]
    fn large_arc_flag_flips_past_half_circle() {
        let short = describe_arc(0.0, 0.0, 10.0, 0.0, PI);
        assert!(short.contains(" 0 0 1 "));
        let long = describe_arc(0.0, 0.0, 10.0, 0.0, PI + 0.01);
        assert!(long.contains(" 0 1 1 "));
    }

    #[test]
    fn ring_arc_sweeps_inner_edge_backward() {
        let d = describe_ring_arc(0.0, 0.0, 70.0, 100.0, 0.0, 1.0);
        assert!(d.contains("A 100 100 0 0 1 "));
        assert!(d.contains("A 70 70 0 0 0 "));
    }

    #[test]
    fn radii_construction_is_checked() {
        assert!(Radii::new(10.0, 5.0).is_err());
        assert!(Radii::new(-1.0, 5.0).is_err());
        let r = Radii::new(70.0, 100.0).unwrap();
        assert_eq!(r.midline(), 85.0);
        assert_eq!(Radii::full_disk(100.0).inner, 0.0);
    }
}
