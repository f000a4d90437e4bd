//! Proportional angular layout and the rotation policy.
//!
//! A sibling list's efforts partition the full circle `[0, 2π)` into
//! contiguous spans; `scale_angles` remaps such a partition onto a sub-arc so
//! a child ring stays radially aligned under its parent slice.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::animation::lerp;
use crate::task::Task;

/// One sibling's angular span, radians, `start <= mid <= end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AngleInfo {
    pub start: f64,
    pub end: f64,
    pub mid: f64,
}

impl AngleInfo {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Partitions `[0, 2π)` proportionally to each task's effort, in sibling
/// order (clockwise from 0 rad).
///
/// An empty list yields an empty partition. A non-empty list must carry a
/// positive total effort; `Document::validate` enforces this upstream.
pub fn calculate_angles(tasks: &[Task]) -> Vec<AngleInfo> {
    let total: f64 = tasks.iter().map(|t| t.effort).sum();
    let mut acc = 0.0;
    tasks
        .iter()
        .map(|t| {
            let start = acc / total * TAU;
            acc += t.effort;
            let end = acc / total * TAU;
            AngleInfo {
                start,
                end,
                mid: (start + end) / 2.0,
            }
        })
        .collect()
}

/// Remaps a full-circle partition onto `[range_start, range_end)`, keeping
/// the proportional subdivision.
pub fn scale_angles(angles: &[AngleInfo], range_start: f64, range_end: f64) -> Vec<AngleInfo> {
    let remap = |v: f64| range_start + v / TAU * (range_end - range_start);
    angles
        .iter()
        .map(|a| AngleInfo {
            start: remap(a.start),
            end: remap(a.end),
            mid: remap(a.mid),
        })
        .collect()
}

/// Component-wise blend of two same-length partitions. Only meaningful for
/// two layouts of the same sibling list (e.g. an effort edit), never across
/// tree-depth changes.
pub fn interpolate_angles(from: &[AngleInfo], to: &[AngleInfo], t: f64) -> Vec<AngleInfo> {
    debug_assert_eq!(from.len(), to.len());
    from.iter()
        .zip(to)
        .map(|(a, b)| AngleInfo {
            start: lerp(a.start, b.start, t),
            end: lerp(a.end, b.end, t),
            mid: lerp(a.mid, b.mid, t),
        })
        .collect()
}

/// Viewport class; decides where the selected slice is parked on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceClass {
    /// Selected slice midpoint rotates to 0 rad (pointing right).
    #[default]
    Wide,
    /// Selected slice midpoint rotates to -π/2 (pointing up).
    Narrow,
}

impl DeviceClass {
    pub fn reference_angle(self) -> f64 {
        match self {
            Self::Wide => 0.0,
            Self::Narrow => -FRAC_PI_2,
        }
    }
}

/// Rigid rotation bringing `mid` to the device's reference direction. Labels
/// counter-rotate by the negated value so text stays upright.
pub fn calculate_rotation(mid: f64, device: DeviceClass) -> f64 {
    device.reference_angle() - mid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    const EPS: f64 = 1e-12;

    fn task(id: u64, effort: f64) -> Task {
        Task {
            id: TaskId(id),
            name: String::new(),
            description: String::new(),
            effort,
            completed: false,
            subtasks: Vec::new(),
        }
    }

    #[test]
    fn partition_fills_the_circle_contiguously() {
        let tasks = vec![task(1, 2.0), task(2, 1.0), task(3, 5.0)];
        let angles = calculate_angles(&tasks);
        assert_eq!(angles.len(), 3);
        assert!(angles[0].start.abs() < EPS);
        assert!((angles[2].end - TAU).abs() < EPS);
        for w in angles.windows(2) {
            assert!((w[0].end - w[1].start).abs() < EPS);
        }
        for a in &angles {
            assert!((a.mid - (a.start + a.end) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn spans_are_proportional_to_effort() {
        let tasks = vec![task(1, 1.0), task(2, 3.0)];
        let angles = calculate_angles(&tasks);
        assert!((angles[0].span() / TAU - 0.25).abs() < EPS);
        assert!((angles[1].span() / TAU - 0.75).abs() < EPS);
    }

    #[test]
    fn single_task_takes_the_whole_circle() {
        let angles = calculate_angles(&[task(1, 42.0)]);
        assert_eq!(angles.len(), 1);
        assert!(angles[0].start.abs() < EPS);
        assert!((angles[0].end - TAU).abs() < EPS);
    }

    #[test]
    fn empty_list_yields_empty_partition() {
        assert!(calculate_angles(&[]).is_empty());
    }

    #[test]
    fn scaled_partition_keeps_proportions() {
        let tasks = vec![task(1, 1.0), task(2, 1.0), task(3, 2.0)];
        let orig = calculate_angles(&tasks);
        let (a, b) = (0.5, 2.5);
        let scaled = scale_angles(&orig, a, b);
        assert!((scaled[0].start - a).abs() < EPS);
        assert!((scaled[2].end - b).abs() < EPS);
        for (o, s) in orig.iter().zip(&scaled) {
            assert!((s.span() / (b - a) - o.span() / TAU).abs() < EPS);
        }
    }

    #[test]
    fn interpolate_with_itself_is_identity() {
        let angles = calculate_angles(&[task(1, 1.0), task(2, 2.0)]);
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(interpolate_angles(&angles, &angles, t), angles);
        }
    }

    #[test]
    fn interpolate_blends_componentwise() {
        let from = calculate_angles(&[task(1, 1.0), task(2, 1.0)]);
        let to = calculate_angles(&[task(1, 1.0), task(2, 3.0)]);
        let half = interpolate_angles(&from, &to, 0.5);
        assert!((half[0].end - (from[0].end + to[0].end) / 2.0).abs() < EPS);
    }

    #[test]
    fn rotation_parks_mid_at_reference() {
        assert_eq!(calculate_rotation(1.0, DeviceClass::Wide), -1.0);
        assert_eq!(
            calculate_rotation(1.0, DeviceClass::Narrow),
            -FRAC_PI_2 - 1.0
        );
        // Rotating by the result moves mid onto the reference direction.
        let mid = 2.3;
        for device in [DeviceClass::Wide, DeviceClass::Narrow] {
            let rot = calculate_rotation(mid, device);
            assert!((mid + rot - device.reference_angle()).abs() < EPS);
        }
    }
}
