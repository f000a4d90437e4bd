//! The transition state machine.
//!
//! On every selection change the engine derives the transition kind from the
//! path-depth delta, snapshots the outgoing layout, and retargets the animated
//! quantities. Polled once per frame with a single shared instant, it emits a
//! complete description of every visual layer: the parent hub, the current
//! ring, the child ring, and (mid-transition) the outgoing layers fading at
//! `1 - progress`.
//!
//! The engine owns no tree data. The forest and the selected path are
//! read-only inputs; all tree mutation goes through `tree`'s pure functions,
//! invoked by the caller.

use crate::{
    animation::{AnimatedRadii, AnimatedScalar, Millis, RevealTimer},
    ease::Ease,
    error::{SunwheelError, SunwheelResult},
    geometry::Radii,
    layout::{self, AngleInfo, DeviceClass},
    task::{Task, TaskId, TaskPath},
    tree,
};

const MOTION_EASE: Ease = Ease::InOutSine;

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Outer radius of the current ring.
    pub r1: f64,
    /// Outer radius of the child ring.
    pub r2: f64,
    /// Radial gap between the current and child rings.
    pub ring_gap: f64,
    /// Hub radius as a fraction of `r1`.
    pub hub_ratio: f64,
    /// Shared duration of every animated quantity; keeping it uniform is what
    /// keeps the layers synchronized.
    pub duration_ms: f64,
    pub device: DeviceClass,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            r1: 70.0,
            r2: 100.0,
            ring_gap: 5.0,
            hub_ratio: 0.4,
            duration_ms: 1500.0,
            device: DeviceClass::Wide,
        }
    }
}

impl EngineConfig {
    /// Checks the radial geometry and timing of a caller-supplied config
    /// before an engine is built from it.
    pub fn validate(&self) -> SunwheelResult<()> {
        if !(self.r1 > 0.0 && self.ring_gap >= 0.0 && self.r2 > self.r1 + self.ring_gap) {
            return Err(SunwheelError::layout(format!(
                "ring radii must satisfy 0 < r1 and r1 + gap < r2, got r1={}, r2={}, gap={}",
                self.r1, self.r2, self.ring_gap
            )));
        }
        if !(0.0..=1.0).contains(&self.hub_ratio) {
            return Err(SunwheelError::layout(format!(
                "hub ratio must lie in 0..=1, got {}",
                self.hub_ratio
            )));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(SunwheelError::animation(format!(
                "transition duration must be a positive number of milliseconds, got {}",
                self.duration_ms
            )));
        }
        Ok(())
    }

    pub fn hub_radius(&self) -> f64 {
        self.r1 * self.hub_ratio
    }

    fn current_rest(&self, depth: usize) -> Radii {
        Radii {
            inner: if depth > 0 { self.hub_radius() } else { 0.0 },
            outer: self.r1,
        }
    }

    fn child_rest(&self) -> Radii {
        Radii {
            inner: self.r1 + self.ring_gap,
            outer: self.r2,
        }
    }

    /// Just outside the rim; where an appearing child ring grows from and a
    /// discarded one slides off to.
    fn beyond_rim(&self) -> Radii {
        Radii {
            inner: self.r2 + self.ring_gap,
            outer: self.r2 + 2.0 * self.ring_gap,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    DrillIn,
    DrillOut,
    Lateral,
}

fn transition_kind(prev_depth: usize, new_depth: usize) -> TransitionKind {
    match new_depth.cmp(&prev_depth) {
        std::cmp::Ordering::Greater => TransitionKind::DrillIn,
        std::cmp::Ordering::Less => TransitionKind::DrillOut,
        std::cmp::Ordering::Equal => TransitionKind::Lateral,
    }
}

/// Outgoing layout, captured once at the instant the path changes and held
/// fixed while it fades; later edits to that subtree do not track into it.
#[derive(Clone, Debug)]
struct Snapshot {
    tasks: Vec<Task>,
    angles: Vec<AngleInfo>,
    rotation_deg: f64,
    child_tasks: Vec<Task>,
    child_angles: Vec<AngleInfo>,
}

#[derive(Clone, Debug)]
enum State {
    Idle,
    Transitioning {
        kind: TransitionKind,
        snapshot: Snapshot,
    },
}

/// One ring at one animation instant, ready for `geometry` conversion.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RingLayer {
    pub tasks: Vec<Task>,
    pub angles: Vec<AngleInfo>,
    pub radii: Radii,
    pub rotation_deg: f64,
    pub opacity: f64,
}

/// The central "go up" disk.
#[derive(Clone, Debug, serde::Serialize)]
pub struct HubLayer {
    pub radius: f64,
    pub opacity: f64,
    /// Name of the drilled-into parent; empty at the top level.
    pub name: String,
}

/// Everything a rendering surface needs for one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderFrame {
    /// True when the forest has no tasks; all layers are inert and the
    /// surface should show a placeholder instead.
    pub empty: bool,
    pub hub: HubLayer,
    pub current: RingLayer,
    pub child: Option<RingLayer>,
    /// Drill-in: the previous ring collapsing into the hub.
    pub outgoing_ring: Option<RingLayer>,
    /// Drill-out: the previous hub growing back out while fading.
    pub outgoing_hub: Option<HubLayer>,
    /// Drill-out: the previous child ring sliding off the rim.
    pub outgoing_child: Option<RingLayer>,
    pub selected: Option<TaskId>,
}

impl RenderFrame {
    fn empty_frame() -> Self {
        Self {
            empty: true,
            hub: HubLayer {
                radius: 0.0,
                opacity: 1.0,
                name: String::new(),
            },
            current: RingLayer {
                tasks: Vec::new(),
                angles: Vec::new(),
                radii: Radii::ZERO,
                rotation_deg: 0.0,
                opacity: 1.0,
            },
            child: None,
            outgoing_ring: None,
            outgoing_hub: None,
            outgoing_child: None,
            selected: None,
        }
    }
}

pub struct PieEngine {
    config: EngineConfig,
    path: TaskPath,
    state: State,
    rotation: AnimatedScalar, // radians
    hub_radius: AnimatedScalar,
    current: AnimatedRadii,
    child: AnimatedRadii,
    outgoing_ring: AnimatedRadii,
    outgoing_hub: AnimatedScalar,
    outgoing_child: AnimatedRadii,
    reveal: RevealTimer,
}

impl PieEngine {
    pub fn new(config: EngineConfig) -> Self {
        let d = config.duration_ms;
        Self {
            path: TaskPath::root(),
            state: State::Idle,
            rotation: AnimatedScalar::resting(0.0, d, MOTION_EASE),
            hub_radius: AnimatedScalar::resting(0.0, d, MOTION_EASE),
            current: AnimatedRadii::resting(config.current_rest(0), d, MOTION_EASE),
            child: AnimatedRadii::resting(config.child_rest(), d, MOTION_EASE),
            outgoing_ring: AnimatedRadii::resting(Radii::ZERO, d, MOTION_EASE),
            outgoing_hub: AnimatedScalar::resting(0.0, d, MOTION_EASE),
            outgoing_child: AnimatedRadii::resting(Radii::ZERO, d, MOTION_EASE),
            reveal: RevealTimer::settled(d, MOTION_EASE),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn path(&self) -> &TaskPath {
        &self.path
    }

    /// Selection-change trigger. The caller must hand in a path that still
    /// resolves (`tree::truncate_to_valid` after removals); the engine does
    /// not repair dangling selections.
    #[tracing::instrument(skip(self, forest), fields(path = ?new_path))]
    pub fn select(&mut self, forest: &[Task], new_path: &TaskPath, now: Millis) {
        if *new_path == self.path {
            return;
        }

        let kind = transition_kind(self.path.depth(), new_path.depth());
        let target_rotation = self.rotation_target(forest, new_path);
        self.rotation.retarget(target_rotation, now);
        self.reveal.restart(now);

        let cfg = self.config;
        let hub = cfg.hub_radius();
        let hub_target = if new_path.is_root() { 0.0 } else { hub };
        let current_target = cfg.current_rest(new_path.depth());
        let child_target = cfg.child_rest();

        match kind {
            TransitionKind::Lateral => {
                // Same-depth move: no radius animation, only the rotation
                // re-centers and the child content hard-swaps behind the
                // reveal fade. Radii are still retargeted so a lateral move
                // that interrupts a depth transition finishes cleanly.
                self.hub_radius.retarget(hub_target, now);
                self.current.retarget(current_target, now);
                self.child.retarget(child_target, now);
            }
            TransitionKind::DrillIn => {
                let snapshot = self.snapshot_outgoing(forest);
                self.hub_radius.begin(cfg.r1, hub_target, now);
                self.current.begin(cfg.child_rest(), current_target, now);
                self.child.begin(cfg.beyond_rim(), child_target, now);
                self.outgoing_ring.retarget_from(
                    Radii {
                        inner: hub,
                        outer: cfg.r1,
                    },
                    Radii {
                        inner: 0.0,
                        outer: hub,
                    },
                    now,
                );
                self.state = State::Transitioning { kind, snapshot };
            }
            TransitionKind::DrillOut => {
                let snapshot = self.snapshot_outgoing(forest);
                self.hub_radius.begin(0.0, hub_target, now);
                self.current.begin(
                    Radii {
                        inner: 0.0,
                        outer: hub,
                    },
                    current_target,
                    now,
                );
                self.child.begin(
                    Radii {
                        inner: hub,
                        outer: cfg.r1,
                    },
                    child_target,
                    now,
                );
                self.outgoing_hub.retarget_from(hub, cfg.r1, now);
                self.outgoing_child
                    .retarget_from(cfg.child_rest(), cfg.beyond_rim(), now);
                self.state = State::Transitioning { kind, snapshot };
            }
        }

        self.path = new_path.clone();
    }

    /// Emits the layer set for one instant. If `path` differs from the last
    /// selection this also triggers the transition, so callers that only
    /// track state externally can drive the engine through `frame` alone.
    #[tracing::instrument(skip(self, forest), fields(path = ?path))]
    pub fn frame(&mut self, forest: &[Task], path: &TaskPath, now: Millis) -> RenderFrame {
        if *path != self.path {
            self.select(forest, path, now);
        }
        self.settle(now);

        if forest.is_empty() {
            return RenderFrame::empty_frame();
        }

        let parent_path = self.path.parent();
        let current_tasks = tree::resolve_list(forest, parent_path.ids());
        let angles = layout::calculate_angles(current_tasks);
        let selected_id = self.path.leaf();
        let selected_index = current_tasks
            .iter()
            .position(|t| Some(t.id) == selected_id);

        let rotation_deg = self.rotation.sample(now).to_degrees();
        let progress = self.reveal.progress(now);
        let transitioning = matches!(self.state, State::Transitioning { .. });

        let hub = HubLayer {
            radius: self.hub_radius.sample(now),
            opacity: if transitioning { progress } else { 1.0 },
            name: if parent_path.is_root() {
                String::new()
            } else {
                tree::resolve_node(forest, parent_path.ids())
                    .map(|t| t.name.clone())
                    .unwrap_or_default()
            },
        };

        let current = RingLayer {
            tasks: current_tasks.to_vec(),
            angles: angles.clone(),
            radii: self.current.sample(now),
            rotation_deg,
            opacity: 1.0,
        };

        let child = selected_index.and_then(|i| {
            let sel = &current_tasks[i];
            if sel.subtasks.is_empty() {
                return None;
            }
            let parent_span = angles[i];
            let child_angles = layout::scale_angles(
                &layout::calculate_angles(&sel.subtasks),
                parent_span.start,
                parent_span.end,
            );
            Some(RingLayer {
                tasks: sel.subtasks.clone(),
                angles: child_angles,
                radii: self.child.sample(now),
                rotation_deg,
                opacity: progress,
            })
        });

        let (outgoing_ring, outgoing_hub, outgoing_child) = match &self.state {
            State::Idle => (None, None, None),
            State::Transitioning { kind, snapshot } => match kind {
                TransitionKind::DrillIn => (
                    Some(RingLayer {
                        tasks: snapshot.tasks.clone(),
                        angles: snapshot.angles.clone(),
                        radii: self.outgoing_ring.sample(now),
                        rotation_deg: snapshot.rotation_deg,
                        opacity: 1.0 - progress,
                    }),
                    None,
                    None,
                ),
                TransitionKind::DrillOut => (
                    None,
                    Some(HubLayer {
                        radius: self.outgoing_hub.sample(now),
                        opacity: 1.0 - progress,
                        name: String::new(),
                    }),
                    (!snapshot.child_tasks.is_empty()).then(|| RingLayer {
                        tasks: snapshot.child_tasks.clone(),
                        angles: snapshot.child_angles.clone(),
                        radii: self.outgoing_child.sample(now),
                        rotation_deg: snapshot.rotation_deg,
                        opacity: 1.0 - progress,
                    }),
                ),
                TransitionKind::Lateral => (None, None, None),
            },
        };

        RenderFrame {
            empty: false,
            hub,
            current,
            child,
            outgoing_ring,
            outgoing_hub,
            outgoing_child,
            selected: selected_id,
        }
    }

    /// Discards the snapshot once the reveal timer has run out.
    fn settle(&mut self, now: Millis) {
        if matches!(self.state, State::Transitioning { .. }) && self.reveal.is_settled(now) {
            self.state = State::Idle;
        }
    }

    /// Resting rotation for a selection: the selected slice's midpoint parked
    /// at the device's reference direction, 0 when nothing is selected.
    fn rotation_target(&self, forest: &[Task], path: &TaskPath) -> f64 {
        let list = tree::resolve_list(forest, path.parent().ids());
        let Some(leaf) = path.leaf() else {
            return 0.0;
        };
        let angles = layout::calculate_angles(list);
        list.iter()
            .position(|t| t.id == leaf)
            .map(|i| layout::calculate_rotation(angles[i].mid, self.config.device))
            .unwrap_or(0.0)
    }

    /// Captures the outgoing layout (ring, rotation, displayed child ring)
    /// from the path being left behind.
    fn snapshot_outgoing(&self, forest: &[Task]) -> Snapshot {
        let parent_path = self.path.parent();
        let tasks = tree::resolve_list(forest, parent_path.ids()).to_vec();
        let angles = layout::calculate_angles(&tasks);
        let selected_index = self
            .path
            .leaf()
            .and_then(|id| tasks.iter().position(|t| t.id == id));

        let rotation_deg = selected_index
            .map(|i| layout::calculate_rotation(angles[i].mid, self.config.device).to_degrees())
            .unwrap_or(0.0);

        let (child_tasks, child_angles) = match selected_index {
            None => (Vec::new(), Vec::new()),
            Some(i) => {
                let children = tasks[i].subtasks.clone();
                let scaled = layout::scale_angles(
                    &layout::calculate_angles(&children),
                    angles[i].start,
                    angles[i].end,
                );
                (children, scaled)
            }
        };

        Snapshot {
            tasks,
            angles,
            rotation_deg,
            child_tasks,
            child_angles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_depth_delta() {
        assert_eq!(transition_kind(0, 1), TransitionKind::DrillIn);
        assert_eq!(transition_kind(1, 3), TransitionKind::DrillIn);
        assert_eq!(transition_kind(2, 1), TransitionKind::DrillOut);
        assert_eq!(transition_kind(1, 1), TransitionKind::Lateral);
    }

    #[test]
    fn config_validation_catches_degenerate_geometry_and_timing() {
        assert!(EngineConfig::default().validate().is_ok());

        let bad_radii = EngineConfig {
            r2: 60.0,
            ..EngineConfig::default()
        };
        assert!(matches!(bad_radii.validate(), Err(SunwheelError::Layout(_))));

        let bad_ratio = EngineConfig {
            hub_ratio: 1.5,
            ..EngineConfig::default()
        };
        assert!(matches!(bad_ratio.validate(), Err(SunwheelError::Layout(_))));

        let bad_duration = EngineConfig {
            duration_ms: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            bad_duration.validate(),
            Err(SunwheelError::Animation(_))
        ));
    }

    #[test]
    fn default_config_radii() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.hub_radius(), 28.0);
        assert_eq!(
            cfg.current_rest(1),
            Radii {
                inner: 28.0,
                outer: 70.0
            }
        );
        assert_eq!(
            cfg.current_rest(0),
            Radii {
                inner: 0.0,
                outer: 70.0
            }
        );
        assert_eq!(
            cfg.child_rest(),
            Radii {
                inner: 75.0,
                outer: 100.0
            }
        );
    }
}
