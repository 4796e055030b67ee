// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Deck events go on thread 0 and rotator events on thread 1. An advance run
//! is a `B`/`E` pair from its `Dropping` phase to `Complete` (or `Abandoned`),
//! and a group switch is a pair from `FadeOut` to `Settled`. Everything else
//! is an instant event. A span still open at the end of the recording, such
//! as one cut short by a teardown, is closed at the last event's timestamp.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use deckswap_core::deck::RunPhase;
use deckswap_core::rotator::FadeStage;

use crate::recorder::RecordedEvent;

const DECK_TID: u32 = 0;
const ROTATOR_TID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Host time ticks are already microseconds and are written unchanged.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());
    let mut run_open = false;
    let mut switch_open = false;
    let mut last_ts = 0;

    for recorded in events {
        let ts = recorded.at().ticks();
        last_ts = ts;
        let value = match *recorded {
            RecordedEvent::Advance(e) => instant(
                "Advance",
                "Deck",
                ts,
                DECK_TID,
                json!({
                    "source": format!("{:?}", e.source),
                    "front": e.front,
                    "outcome": format!("{:?}", e.outcome),
                }),
            ),
            RecordedEvent::Phase(e) => match e.phase {
                RunPhase::Dropping => {
                    run_open = true;
                    span("B", "AdvanceRun", ts, json!({ "retiring": e.retiring }))
                }
                RunPhase::Complete | RunPhase::Abandoned => {
                    run_open = false;
                    span(
                        "E",
                        "AdvanceRun",
                        ts,
                        json!({
                            "retiring": e.retiring,
                            "abandoned": e.phase == RunPhase::Abandoned,
                        }),
                    )
                }
                phase => instant(
                    &format!("{phase:?}"),
                    "Deck",
                    ts,
                    DECK_TID,
                    json!({ "retiring": e.retiring }),
                ),
            },
            RecordedEvent::RingRotated(e) => instant(
                "RingRotated",
                "Deck",
                ts,
                DECK_TID,
                json!({ "retired": e.retired, "front": e.front }),
            ),
            RecordedEvent::Hover(e) => instant(
                if e.hovered { "PointerEnter" } else { "PointerLeave" },
                "Input",
                ts,
                DECK_TID,
                json!({ "run_affected": e.run_affected }),
            ),
            RecordedEvent::Layout(e) => instant(
                "Layout",
                "Deck",
                ts,
                DECK_TID,
                json!({
                    "item_count": e.item_count,
                    "reason": format!("{:?}", e.reason),
                }),
            ),
            RecordedEvent::Select(e) => instant(
                "Select",
                "Rotator",
                ts,
                ROTATOR_TID,
                json!({
                    "requested": e.requested,
                    "active": e.active,
                    "outcome": format!("{:?}", e.outcome),
                }),
            ),
            RecordedEvent::Fade(e) => {
                let args = json!({ "group": e.group });
                match e.stage {
                    FadeStage::FadeOut => {
                        switch_open = true;
                        rotator_span("B", ts, args)
                    }
                    FadeStage::Settled => {
                        switch_open = false;
                        rotator_span("E", ts, args)
                    }
                    stage => instant(&format!("{stage:?}"), "Rotator", ts, ROTATOR_TID, args),
                }
            }
        };
        out.push(value);
    }

    if run_open {
        out.push(span("E", "AdvanceRun", last_ts, json!({ "truncated": true })));
    }
    if switch_open {
        out.push(rotator_span("E", last_ts, json!({ "truncated": true })));
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: u64, tid: u32, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}

fn span(ph: &str, name: &str, ts: u64, args: Value) -> Value {
    json!({
        "ph": ph,
        "name": name,
        "cat": "Deck",
        "ts": ts,
        "pid": 0,
        "tid": DECK_TID,
        "args": args,
    })
}

fn rotator_span(ph: &str, ts: u64, args: Value) -> Value {
    json!({
        "ph": ph,
        "name": "GroupSwitch",
        "cat": "Rotator",
        "ts": ts,
        "pid": 0,
        "tid": ROTATOR_TID,
        "args": args,
    })
}
