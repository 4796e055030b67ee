// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for decks and rotators.
//!
//! This module provides a [`TraceSink`] trait with one method per event kind.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! Mutating entry points on [`DeckScheduler`](crate::deck::DeckScheduler) and
//! [`ContentRotator`](crate::rotator::ContentRotator) take a [`Tracer`], which
//! wraps an optional `&mut dyn TraceSink`. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::deck::{AdvanceOutcome, RunPhase, TriggerSource};
use crate::rotator::{FadeStage, SelectOutcome};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Why the deck laid its cards out without animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutReason {
    /// New content was loaded.
    Reload,
    /// Geometry or timing changed.
    Reconfigure,
}

/// Emitted for every advance trigger, accepted or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceEvent {
    /// Host time of the trigger.
    pub at: HostTime,
    /// Which path triggered the advance.
    pub source: TriggerSource,
    /// Item at the front of the ring when the trigger arrived.
    pub front: Option<usize>,
    /// Whether a run started, and if not, why.
    pub outcome: AdvanceOutcome,
}

/// Emitted when an in-flight run enters a new phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEvent {
    /// Host time of the frame that crossed into the phase.
    pub at: HostTime,
    /// The retiring item.
    pub retiring: usize,
    /// The phase entered.
    pub phase: RunPhase,
}

/// Emitted when a completed run rotates the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingRotatedEvent {
    /// Host time of the completing frame.
    pub at: HostTime,
    /// Item that moved from the front to the back.
    pub retired: usize,
    /// New front item.
    pub front: usize,
}

/// Emitted when the pointer enters or leaves a hover-pausing deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverEvent {
    /// Host time of the pointer event.
    pub at: HostTime,
    /// `true` on enter, `false` on leave.
    pub hovered: bool,
    /// Whether an in-flight run was frozen (enter) or resumed (leave).
    pub run_affected: bool,
}

/// Emitted when the deck places its cards instantly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEvent {
    /// Host time of the layout.
    pub at: HostTime,
    /// Number of cards laid out.
    pub item_count: usize,
    /// What caused the layout.
    pub reason: LayoutReason,
}

/// Emitted for every group selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectEvent {
    /// Host time of the request.
    pub at: HostTime,
    /// Requested group index.
    pub requested: usize,
    /// Active group index when the request arrived.
    pub active: usize,
    /// Whether a transition started, and if not, why.
    pub outcome: SelectOutcome,
}

/// Emitted as a group transition moves through its stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeEvent {
    /// Host time of the stage change.
    pub at: HostTime,
    /// Group the transition is heading to.
    pub group: usize,
    /// Stage entered.
    pub stage: FadeStage,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from decks and rotators.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every advance trigger.
    fn on_advance(&mut self, e: &AdvanceEvent) {
        _ = e;
    }

    /// Called when a run enters a phase.
    fn on_phase(&mut self, e: &PhaseEvent) {
        _ = e;
    }

    /// Called when a completed run rotates the ring.
    fn on_ring_rotated(&mut self, e: &RingRotatedEvent) {
        _ = e;
    }

    /// Called on pointer enter/leave.
    fn on_hover(&mut self, e: &HoverEvent) {
        _ = e;
    }

    /// Called on instant layout.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called for every group selection request.
    fn on_select(&mut self, e: &SelectEvent) {
        _ = e;
    }

    /// Called when a group transition changes stage.
    fn on_fade(&mut self, e: &FadeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident, $hook:ident, $event:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits an [`AdvanceEvent`].
        advance, on_advance, AdvanceEvent
    );
    forward!(
        /// Emits a [`PhaseEvent`].
        phase, on_phase, PhaseEvent
    );
    forward!(
        /// Emits a [`RingRotatedEvent`].
        ring_rotated, on_ring_rotated, RingRotatedEvent
    );
    forward!(
        /// Emits a [`HoverEvent`].
        hover, on_hover, HoverEvent
    );
    forward!(
        /// Emits a [`LayoutEvent`].
        layout, on_layout, LayoutEvent
    );
    forward!(
        /// Emits a [`SelectEvent`].
        select, on_select, SelectEvent
    );
    forward!(
        /// Emits a [`FadeEvent`].
        fade, on_fade, FadeEvent
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_advance() -> AdvanceEvent {
        AdvanceEvent {
            at: HostTime(1_000),
            source: TriggerSource::External,
            front: Some(0),
            outcome: AdvanceOutcome::Started,
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_advance(&sample_advance());
        sink.on_layout(&LayoutEvent {
            at: HostTime(0),
            item_count: 3,
            reason: LayoutReason::Reload,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.advance(&sample_advance());
        tracer.fade(&FadeEvent {
            at: HostTime(0),
            group: 1,
            stage: FadeStage::FadeOut,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            fronts: Vec<Option<usize>>,
        }
        impl TraceSink for RecordingSink {
            fn on_advance(&mut self, e: &AdvanceEvent) {
                self.fronts.push(e.front);
            }
        }

        let mut sink = RecordingSink { fronts: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.advance(&sample_advance());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.fronts, &[Some(0)]);
    }
}
