//! Sunwheel navigates a tree of weighted tasks through a radial pie view.
//!
//! The crate is the layout-and-animation engine only: it turns a task forest
//! plus a selected path into angles, radii, rotations, opacities and SVG path
//! strings. It owns no clock, performs no I/O and mutates no tree data; a
//! rendering surface polls [`engine::PieEngine::frame`] with its own "now"
//! and draws what comes back.

#![forbid(unsafe_code)]

pub mod animation;
pub mod ease;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod task;
pub mod tree;

pub use animation::{AnimatedRadii, AnimatedScalar, Millis, RevealTimer};
pub use ease::Ease;
pub use engine::{EngineConfig, PieEngine, RenderFrame, TransitionKind};
pub use error::{SunwheelError, SunwheelResult};
pub use geometry::Radii;
pub use layout::{AngleInfo, DeviceClass};
pub use task::{Document, IdAllocator, Task, TaskId, TaskPath};
