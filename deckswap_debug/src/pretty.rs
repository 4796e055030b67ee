// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds of host time.

use std::io::Write;

use deckswap_core::time::HostTime;
use deckswap_core::trace::{
    AdvanceEvent, FadeEvent, HoverEvent, LayoutEvent, PhaseEvent, RingRotatedEvent, SelectEvent,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.as_secs_f64() * 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_advance(&mut self, e: &AdvanceEvent) {
        let front = e.front.map_or_else(|| "-".to_owned(), |f| f.to_string());
        let _ = writeln!(
            self.writer,
            "[advance] at={:.1}ms source={:?} front={front} outcome={:?}",
            ms(e.at),
            e.source,
            e.outcome,
        );
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        let _ = writeln!(
            self.writer,
            "[phase] at={:.1}ms retiring={} {:?}",
            ms(e.at),
            e.retiring,
            e.phase,
        );
    }

    fn on_ring_rotated(&mut self, e: &RingRotatedEvent) {
        let _ = writeln!(
            self.writer,
            "[ring] at={:.1}ms retired={} front={}",
            ms(e.at),
            e.retired,
            e.front,
        );
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        let what = if e.hovered { "enter" } else { "leave" };
        let run = if e.run_affected { " run" } else { "" };
        let _ = writeln!(self.writer, "[hover:{what}] at={:.1}ms{run}", ms(e.at));
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] at={:.1}ms items={} reason={:?}",
            ms(e.at),
            e.item_count,
            e.reason,
        );
    }

    fn on_select(&mut self, e: &SelectEvent) {
        let _ = writeln!(
            self.writer,
            "[select] at={:.1}ms {} -> {} outcome={:?}",
            ms(e.at),
            e.active,
            e.requested,
            e.outcome,
        );
    }

    fn on_fade(&mut self, e: &FadeEvent) {
        let _ = writeln!(
            self.writer,
            "[fade] at={:.1}ms group={} {:?}",
            ms(e.at),
            e.group,
            e.stage,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckswap_core::deck::{AdvanceOutcome, TriggerSource};
    use deckswap_core::rotator::{FadeStage, SelectOutcome};

    #[test]
    fn pretty_print_advance() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_advance(&AdvanceEvent {
            at: HostTime::from_millis(5_000),
            source: TriggerSource::Timer,
            front: Some(2),
            outcome: AdvanceOutcome::Busy,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[advance]"), "got: {output}");
        assert!(output.contains("at=5000.0ms"), "got: {output}");
        assert!(output.contains("front=2"), "got: {output}");
        assert!(output.contains("outcome=Busy"), "got: {output}");
    }

    #[test]
    fn pretty_print_switch() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_select(&SelectEvent {
            at: HostTime(0),
            requested: 1,
            active: 0,
            outcome: SelectOutcome::Started,
        });
        sink.on_fade(&FadeEvent {
            at: HostTime::from_millis(300),
            group: 1,
            stage: FadeStage::Swap,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert!(lines[0].contains("0 -> 1"), "got: {output}");
        assert!(lines[1].contains("Swap"), "got: {output}");
    }
}
