// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven scheduling for a depth-stacked card deck and the content
//! rotator that feeds it.
//!
//! `deckswap_core` owns no clock, no threads, and no renderer. The host calls
//! in with its current time on every frame and on every input event, and
//! reads back poses to draw. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   host frame / input (now)
//!       │
//!       ▼
//!   ContentRotator::tick() ──► panel fade ──► auto timer ──► deck.next()
//!       │                                                        │
//!       ▼                                                        ▼
//!   DeckScheduler::tick() ──► Timeline::render() ──► CardPose ──► DeckChanges
//!                                   │
//!                                   └─ finished ──► ring rotates
//! ```
//!
//! **[`deck`]**: The [`DeckScheduler`](deck::DeckScheduler): ring order,
//! per-item poses, the three-phase advance run, and the auto-advance timer.
//!
//! **[`rotator`]**: [`ContentGroup`](rotator::ContentGroup)s and the
//! [`ContentRotator`](rotator::ContentRotator) that crossfades between them
//! and reloads the deck.
//!
//! **[`geometry`]**: Slot geometry and the pure
//! [`rest_pose`](geometry::rest_pose) function every layout goes through.
//!
//! **[`tween`]**: Timelines of set/tween steps with markers, and a pausable
//! playhead.
//!
//! **[`ease`]**: Easing curves.
//!
//! **[`timer`]**: Polled repeat deadlines.
//!
//! **[`time`]**: Host time and durations in microsecond ticks.
//!
//! **[`transform`]**: 3D transform type for handing card poses to a
//! compositor.
//!
//! **[`config`]**: Deck and rotator configuration with presets.
//!
//! **[`error`]**: Construction errors.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod deck;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod rotator;
pub mod time;
pub mod timer;
pub mod trace;
pub mod transform;
pub mod tween;
