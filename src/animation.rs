//! Time-based animated values.
//!
//! Everything here is poll-driven: the caller reads "now" once per frame and
//! passes the same instant to every `sample` call, so independently owned
//! quantities never desynchronize within a frame. Retargeting replaces the
//! trajectory in place; the old one is simply gone, never queued.

use crate::ease::Ease;
use crate::geometry::Radii;

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// An instant in milliseconds. The engine never reads a clock itself; the
/// caller supplies instants from its frame scheduler.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Millis(pub f64);

impl Millis {
    pub fn elapsed_since(self, start: Millis) -> f64 {
        (self.0 - start.0).max(0.0)
    }
}

/// One eased scalar trajectory: start value, target, start instant, duration.
///
/// After the duration elapses the value clamps at the target and the scalar
/// is settled; sampling stays constant until the next retarget.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedScalar {
    start_value: f64,
    target: f64,
    started: Millis,
    duration_ms: f64,
    ease: Ease,
}

impl AnimatedScalar {
    /// A scalar at rest: sampling returns `value` at any instant.
    pub fn resting(value: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            start_value: value,
            target: value,
            started: Millis(0.0),
            duration_ms,
            ease,
        }
    }

    pub fn sample(&self, now: Millis) -> f64 {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (now.elapsed_since(self.started) / self.duration_ms).min(1.0)
        };
        lerp(self.start_value, self.target, self.ease.apply(t))
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        self.start_value == self.target
            || self.duration_ms <= 0.0
            || now.elapsed_since(self.started) >= self.duration_ms
    }

    /// Starts a new trajectory from the instantaneous value at `now`, so an
    /// interrupted animation continues without a snap.
    pub fn retarget(&mut self, target: f64, now: Millis) {
        self.start_value = self.sample(now);
        self.target = target;
        self.started = now;
    }

    /// Starts a new trajectory from an explicit entry value.
    pub fn retarget_from(&mut self, from: f64, target: f64, now: Millis) {
        self.start_value = from;
        self.target = target;
        self.started = now;
    }

    /// Transition entry: a settled scalar starts from `entry`, one still
    /// mid-flight keeps its instantaneous value (no snap-back on interrupt).
    pub fn begin(&mut self, entry: f64, target: f64, now: Millis) {
        if self.is_settled(now) {
            self.retarget_from(entry, target, now);
        } else {
            self.retarget(target, now);
        }
    }
}

/// Inner and outer ring radii as two composed scalars.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedRadii {
    inner: AnimatedScalar,
    outer: AnimatedScalar,
}

impl AnimatedRadii {
    pub fn resting(value: Radii, duration_ms: f64, ease: Ease) -> Self {
        Self {
            inner: AnimatedScalar::resting(value.inner, duration_ms, ease),
            outer: AnimatedScalar::resting(value.outer, duration_ms, ease),
        }
    }

    pub fn sample(&self, now: Millis) -> Radii {
        Radii {
            inner: self.inner.sample(now),
            outer: self.outer.sample(now),
        }
    }

    pub fn target(&self) -> Radii {
        Radii {
            inner: self.inner.target(),
            outer: self.outer.target(),
        }
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        self.inner.is_settled(now) && self.outer.is_settled(now)
    }

    pub fn retarget(&mut self, target: Radii, now: Millis) {
        self.inner.retarget(target.inner, now);
        self.outer.retarget(target.outer, now);
    }

    pub fn retarget_from(&mut self, from: Radii, target: Radii, now: Millis) {
        self.inner.retarget_from(from.inner, target.inner, now);
        self.outer.retarget_from(from.outer, target.outer, now);
    }

    pub fn begin(&mut self, entry: Radii, target: Radii, now: Millis) {
        self.inner.begin(entry.inner, target.inner, now);
        self.outer.begin(entry.outer, target.outer, now);
    }
}

pub fn interpolate_radii(from: Radii, to: Radii, t: f64) -> Radii {
    Radii {
        inner: lerp(from.inner, to.inner, t),
        outer: lerp(from.outer, to.outer, t),
    }
}

/// 0..1 eased progress restarted on content change; drives fade/reveal
/// opacity. Runs on the same curve as the radii and rotation of the
/// transition it rides with, so no layer leads or lags the others.
#[derive(Clone, Copy, Debug)]
pub struct RevealTimer {
    started: Option<Millis>,
    duration_ms: f64,
    ease: Ease,
}

impl RevealTimer {
    /// A timer already at full progress.
    pub fn settled(duration_ms: f64, ease: Ease) -> Self {
        Self {
            started: None,
            duration_ms,
            ease,
        }
    }

    pub fn restart(&mut self, now: Millis) {
        self.started = Some(now);
    }

    pub fn progress(&self, now: Millis) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = now.elapsed_since(started) / self.duration_ms;
        if t >= 1.0 { 1.0 } else { self.ease.apply(t) }
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        match self.started {
            None => true,
            Some(started) => {
                self.duration_ms <= 0.0 || now.elapsed_since(started) >= self.duration_ms
            }
        }
    }
}
