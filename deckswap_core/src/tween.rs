// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timelines of set/tween steps over a slice of poses.
//!
//! A [`Timeline`] is an ordered list of steps, each addressed to one target
//! index in a `&mut [P]` slice and scheduled at an offset from the timeline's
//! start:
//!
//! - **Set** writes a [`Pose::Patch`] instantly when the playhead reaches it.
//! - **Tween** captures the target's current pose the first time the playhead
//!   reaches it, then blends toward the patch over its duration with an
//!   [`Easing`].
//! - **Markers** carry a caller-defined value `M` that is reported once when
//!   the playhead crosses its offset.
//!
//! Rendering is forward-only. Steps are processed in insertion order, so a
//! later step that writes the same channel in the same frame wins. A step is
//! retired after it writes its final value and never touches the target
//! again; a finished tween therefore leaves its exact target in place.
//!
//! [`Playhead`] supplies the timeline's local time from host time and can be
//! frozen and resumed.

use alloc::vec::Vec;

use crate::ease::Easing;
use crate::time::{Duration, HostTime};

/// A value that timelines can animate.
pub trait Pose: Copy {
    /// A partial set of channel values to write or blend toward.
    type Patch: Copy + core::fmt::Debug;

    /// Writes the channels present in `patch` onto `self`.
    fn apply(&mut self, patch: &Self::Patch);

    /// Writes `from` blended toward `patch` at eased progress `t` for the
    /// channels present in `patch`. At `t == 1.0` this must equal
    /// [`apply`](Self::apply).
    fn blend(&mut self, from: &Self, patch: &Self::Patch, t: f64);
}

/// Linear interpolation that returns `b` exactly at `t == 1.0`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

#[derive(Clone, Copy, Debug)]
enum StepKind<P: Pose> {
    Set,
    Tween {
        duration: Duration,
        easing: Easing,
        from: Option<P>,
    },
}

#[derive(Clone, Copy, Debug)]
struct Step<P: Pose> {
    target: usize,
    at: Duration,
    patch: P::Patch,
    kind: StepKind<P>,
    done: bool,
}

impl<P: Pose> Step<P> {
    fn end(&self) -> Duration {
        match self.kind {
            StepKind::Set => self.at,
            StepKind::Tween { duration, .. } => self.at + duration,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Marker<M> {
    at: Duration,
    value: M,
    crossed: bool,
}

/// Result of a single [`Timeline::render`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStatus {
    /// Whether every step and marker has been retired.
    pub finished: bool,
}

/// An ordered sequence of steps and markers. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct Timeline<P: Pose, M: Copy> {
    steps: Vec<Step<P>>,
    markers: Vec<Marker<M>>,
    position: Option<Duration>,
}

impl<P: Pose, M: Copy> Default for Timeline<P, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pose, M: Copy> Timeline<P, M> {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            markers: Vec::new(),
            position: None,
        }
    }

    /// Schedules an instant write of `patch` to `target` at offset `at`.
    pub fn set(&mut self, target: usize, at: Duration, patch: P::Patch) -> &mut Self {
        self.steps.push(Step {
            target,
            at,
            patch,
            kind: StepKind::Set,
            done: false,
        });
        self
    }

    /// Schedules a tween of `target` toward `patch`, starting at `at`.
    ///
    /// The starting pose is captured lazily when the playhead first reaches
    /// `at`, so it reflects whatever earlier steps wrote.
    pub fn tween(
        &mut self,
        target: usize,
        at: Duration,
        duration: Duration,
        easing: Easing,
        patch: P::Patch,
    ) -> &mut Self {
        self.steps.push(Step {
            target,
            at,
            patch,
            kind: StepKind::Tween {
                duration,
                easing,
                from: None,
            },
            done: false,
        });
        self
    }

    /// Schedules a marker that is reported once when the playhead reaches
    /// `at`.
    pub fn mark(&mut self, at: Duration, value: M) -> &mut Self {
        self.markers.push(Marker {
            at,
            value,
            crossed: false,
        });
        self
    }

    /// Total length: the latest step end or marker offset.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let steps = self.steps.iter().map(Step::end);
        let markers = self.markers.iter().map(|m| m.at);
        steps.chain(markers).max().unwrap_or(Duration::ZERO)
    }

    /// Last position passed to [`render`](Self::render), if any.
    #[must_use]
    pub fn position(&self) -> Option<Duration> {
        self.position
    }

    /// Renders the timeline at local time `t`.
    ///
    /// Writes to `targets` and records the index of every written target in
    /// `touched` (without deduplication). Markers crossed by this render are
    /// passed to `on_marker` in offset order. Steps whose target index is out
    /// of range are retired without writing.
    ///
    /// A `t` earlier than the previous render is treated as the previous
    /// position; timelines never run backwards.
    pub fn render(
        &mut self,
        t: Duration,
        targets: &mut [P],
        touched: &mut Vec<usize>,
        mut on_marker: impl FnMut(M),
    ) -> RenderStatus {
        let t = match self.position {
            Some(prev) if prev > t => prev,
            _ => t,
        };
        self.position = Some(t);

        let mut crossed: Vec<(Duration, M)> = Vec::new();
        for marker in self.markers.iter_mut().filter(|m| !m.crossed && m.at <= t) {
            marker.crossed = true;
            crossed.push((marker.at, marker.value));
        }
        crossed.sort_by_key(|(at, _)| *at);
        for (_, value) in crossed {
            on_marker(value);
        }

        for step in self.steps.iter_mut().filter(|s| !s.done && s.at <= t) {
            let Some(pose) = targets.get_mut(step.target) else {
                step.done = true;
                continue;
            };
            match &mut step.kind {
                StepKind::Set => {
                    pose.apply(&step.patch);
                    step.done = true;
                }
                StepKind::Tween {
                    duration,
                    easing,
                    from,
                } => {
                    let start = *from.get_or_insert(*pose);
                    let elapsed = t.saturating_sub(step.at);
                    let progress = if duration.is_zero() || elapsed >= *duration {
                        1.0
                    } else {
                        elapsed.as_secs_f64() / duration.as_secs_f64()
                    };
                    if progress >= 1.0 {
                        pose.apply(&step.patch);
                        step.done = true;
                    } else {
                        pose.blend(&start, &step.patch, easing.apply(progress));
                    }
                }
            }
            touched.push(step.target);
        }

        RenderStatus {
            finished: self.steps.iter().all(|s| s.done) && self.markers.iter().all(|m| m.crossed),
        }
    }
}

/// A pausable local clock that maps host time to timeline time.
#[derive(Clone, Copy, Debug)]
pub struct Playhead {
    elapsed: Duration,
    anchor: Option<HostTime>,
}

impl Playhead {
    /// Creates a playhead at local time zero, playing from `now`.
    #[must_use]
    pub const fn start(now: HostTime) -> Self {
        Self {
            elapsed: Duration::ZERO,
            anchor: Some(now),
        }
    }

    /// Advances to `now` (if playing) and returns the local time.
    pub fn sample(&mut self, now: HostTime) -> Duration {
        if let Some(anchor) = self.anchor {
            self.elapsed = self.elapsed + now.saturating_duration_since(anchor);
            if now > anchor {
                self.anchor = Some(now);
            }
        }
        self.elapsed
    }

    /// Freezes the local time at its value for `now`.
    pub fn pause(&mut self, now: HostTime) {
        self.sample(now);
        self.anchor = None;
    }

    /// Continues from the frozen local time, counting from `now`.
    pub fn resume(&mut self, now: HostTime) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Whether the playhead is frozen.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.anchor.is_none()
    }
}
