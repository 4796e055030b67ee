// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps a copy of every event
//! as a [`RecordedEvent`], in arrival order.

use deckswap_core::time::HostTime;
use deckswap_core::trace::{
    AdvanceEvent, FadeEvent, HoverEvent, LayoutEvent, PhaseEvent, RingRotatedEvent, SelectEvent,
    TraceSink,
};

/// A recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An [`AdvanceEvent`].
    Advance(AdvanceEvent),
    /// A [`PhaseEvent`].
    Phase(PhaseEvent),
    /// A [`RingRotatedEvent`].
    RingRotated(RingRotatedEvent),
    /// A [`HoverEvent`].
    Hover(HoverEvent),
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
    /// A [`SelectEvent`].
    Select(SelectEvent),
    /// A [`FadeEvent`].
    Fade(FadeEvent),
}

impl RecordedEvent {
    /// Host time the event was emitted at.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Advance(e) => e.at,
            Self::Phase(e) => e.at,
            Self::RingRotated(e) => e.at,
            Self::Hover(e) => e.at,
            Self::Layout(e) => e.at,
            Self::Select(e) => e.at,
            Self::Fade(e) => e.at,
        }
    }

    /// Short event kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Advance(_) => "advance",
            Self::Phase(_) => "phase",
            Self::RingRotated(_) => "ring",
            Self::Hover(_) => "hover",
            Self::Layout(_) => "layout",
            Self::Select(_) => "select",
            Self::Fade(_) => "fade",
        }
    }
}

/// A [`TraceSink`] that stores every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_advance(&mut self, e: &AdvanceEvent) {
        self.events.push(RecordedEvent::Advance(*e));
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        self.events.push(RecordedEvent::Phase(*e));
    }

    fn on_ring_rotated(&mut self, e: &RingRotatedEvent) {
        self.events.push(RecordedEvent::RingRotated(*e));
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        self.events.push(RecordedEvent::Hover(*e));
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.events.push(RecordedEvent::Layout(*e));
    }

    fn on_select(&mut self, e: &SelectEvent) {
        self.events.push(RecordedEvent::Select(*e));
    }

    fn on_fade(&mut self, e: &FadeEvent) {
        self.events.push(RecordedEvent::Fade(*e));
    }
}
