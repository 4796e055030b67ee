// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host loop that drives a three-group service showcase.
//!
//! Runs 30 seconds of synthetic 60 Hz frames through a
//! [`ContentRotator`], with scripted hover, group selection, a breakpoint
//! change, and an unmount. Events go to both a
//! [`PrettyPrintSink`](deckswap_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](deckswap_debug::recorder::RecorderSink), and the
//! recording is exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use deckswap_core::config::{RotatorConfig, Viewport};
use deckswap_core::error::ContentError;
use deckswap_core::rotator::{ContentGroup, ContentRotator, DisplayItem};
use deckswap_core::time::{Duration, HostTime};
use deckswap_core::trace::{
    AdvanceEvent, FadeEvent, HoverEvent, LayoutEvent, PhaseEvent, RingRotatedEvent, SelectEvent,
    TraceSink, Tracer,
};

use deckswap_debug::pretty::PrettyPrintSink;
use deckswap_debug::recorder::RecorderSink;

/// 60 Hz frame interval in microsecond ticks.
const FRAME: Duration = Duration(16_667);
const RUN_MILLIS: u64 = 30_000;

#[derive(Clone, Copy, Debug)]
enum Action {
    PointerEnter,
    PointerLeave,
    Select(usize),
    Resize(f64),
    Click(usize),
    Unmount,
}

const SCRIPT: &[(u64, Action)] = &[
    (7_000, Action::PointerEnter),
    (9_500, Action::PointerLeave),
    (11_000, Action::Click(0)),
    (12_000, Action::Select(1)),
    (12_100, Action::Select(2)),
    (16_000, Action::Resize(390.0)),
    (21_000, Action::Select(1)),
    (21_000, Action::Select(1)),
    (27_000, Action::Unmount),
];

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_advance(&mut self, e: &AdvanceEvent) {
        self.a.on_advance(e);
        self.b.on_advance(e);
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        self.a.on_phase(e);
        self.b.on_phase(e);
    }

    fn on_ring_rotated(&mut self, e: &RingRotatedEvent) {
        self.a.on_ring_rotated(e);
        self.b.on_ring_rotated(e);
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        self.a.on_hover(e);
        self.b.on_hover(e);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.a.on_layout(e);
        self.b.on_layout(e);
    }

    fn on_select(&mut self, e: &SelectEvent) {
        self.a.on_select(e);
        self.b.on_select(e);
    }

    fn on_fade(&mut self, e: &FadeEvent) {
        self.a.on_fade(e);
        self.b.on_fade(e);
    }
}

fn group(
    id: &str,
    title: &str,
    description: &str,
    features: [&str; 4],
    cta: &str,
    images: [&str; 3],
) -> Result<ContentGroup, ContentError> {
    let items = images
        .iter()
        .enumerate()
        .map(|(i, src)| DisplayItem::new(*src, format!("{title} image {}", i + 1)))
        .collect();
    Ok(ContentGroup::new(id, items)?
        .with_title(title)
        .with_description(description)
        .with_features(features)
        .with_cta(cta))
}

fn showcase_groups() -> Result<Vec<ContentGroup>, ContentError> {
    Ok(vec![
        group(
            "vendor",
            "Vendor Solutions",
            "Maximize your rental business with our powerful vendor tools and marketplace exposure.",
            [
                "Real-time inventory management",
                "Automated booking system",
                "Performance analytics dashboard",
                "Secure payment processing",
            ],
            "Start Selling",
            ["vendor-1.jpg", "vendor-2.jpg", "vendor-3.jpg"],
        )?,
        group(
            "customer",
            "Customer Experience",
            "Discover and rent items with seamless booking and premium support.",
            [
                "Personalized recommendations",
                "Instant booking confirmation",
                "24/7 customer support",
                "Flexible cancellation policy",
            ],
            "Browse Rentals",
            ["customer-1.jpg", "customer-2.jpg", "customer-3.jpg"],
        )?,
        group(
            "delivery",
            "Delivery Network",
            "Efficient logistics solutions for fast and reliable item transportation.",
            [
                "Real-time tracking system",
                "Optimized route planning",
                "Secure handling protocols",
                "Flexible scheduling",
            ],
            "Join Our Fleet",
            ["delivery-1.jpg", "delivery-2.jpg", "delivery-3.jpg"],
        )?,
    ])
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- showcase ----------------------------------------------------------
    let groups = showcase_groups().expect("showcase groups are non-empty");
    let start = HostTime::from_millis(0);
    let mut rotator = ContentRotator::new(
        groups,
        RotatorConfig::showcase(),
        Viewport::from_width(1280.0),
        start,
    )
    .expect("showcase has groups");

    // -- simulated loop ----------------------------------------------------
    let end = HostTime::from_millis(RUN_MILLIS);
    let mut now = start;
    let mut script = SCRIPT.iter().peekable();
    let mut frames = 0_u64;
    let mut pose_writes = 0_usize;

    while now <= end {
        let mut sink = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut sink);

        while let Some(&&(at, action)) = script.peek() {
            if HostTime::from_millis(at) > now {
                break;
            }
            script.next();
            match action {
                Action::PointerEnter => rotator.pointer_enter(now, &mut tracer),
                Action::PointerLeave => rotator.pointer_leave(now, &mut tracer),
                Action::Select(index) => {
                    rotator.select_group(index, now, &mut tracer);
                }
                Action::Resize(width) => {
                    rotator.set_viewport(Viewport::from_width(width), now, &mut tracer);
                }
                Action::Click(rank) => {
                    if let Some(click) = rotator.deck().click(rank) {
                        let item = &rotator.active_group().items()[click.item];
                        println!("[click] rank={rank} -> {}", item.caption);
                    }
                }
                Action::Unmount => rotator.teardown(),
            }
        }

        let changes = rotator.tick(now, &mut tracer);
        pose_writes += changes.deck.poses.len();
        if changes.deck.completed {
            if let Some(front) = rotator.deck().item_at_rank(0) {
                let group = rotator.active_group();
                println!(
                    "[front] {} -> {}",
                    group.id(),
                    group.items()[front].caption
                );
            }
        }
        if changes.group_changed {
            let group = rotator.active_group();
            println!("[panel] {} / {}", group.title(), group.cta());
        }

        frames += 1;
        now = now + FRAME;
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    deckswap_debug::chrome::export(recorder.events(), &mut writer)
        .expect("failed to write Chrome trace");

    println!(
        "Wrote {path} ({frames} frames, {} events, {pose_writes} pose writes)",
        recorder.len()
    );
}
