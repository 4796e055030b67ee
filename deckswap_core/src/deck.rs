// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The depth-stacked card deck and its advance choreography.
//!
//! [`DeckScheduler`] owns a ring of item indices (rank 0 is the front card),
//! one [`CardPose`] per item, at most one in-flight advance run, and a
//! [`RepeatTimer`] for auto-advance. The host drives it:
//!
//! ```text
//!   pointer / select ──► advance() ─┐
//!                                   ▼
//!   host frame ──► tick(now) ──► render run timeline ──► DeckChanges
//!                       │                 │
//!                       │                 └─ finished ─► rotate ring
//!                       └─ poll timer ──► advance()
//! ```
//!
//! An advance plays three overlapping phases on a single [`Timeline`]:
//!
//! 1. **Drop**: the front card falls by `drop_distance`.
//! 2. **Promote**: starting part-way through the drop, every other card
//!    takes its new stacking order and tweens to the slot one rank closer,
//!    staggered by rank.
//! 3. **Return**: when the drop ends, the retiring card snaps below the back
//!    slot with the lowest stacking order and rises into place.
//!
//! The ring rotates only after the timeline reports every step finished, so
//! ring order and visible order never disagree at rest.

use alloc::vec::Vec;

use crate::config::DeckConfig;
use crate::geometry::{CardPose, rest_pose};
use crate::time::{Duration, HostTime};
use crate::timer::RepeatTimer;
use crate::trace::{
    AdvanceEvent, HoverEvent, LayoutEvent, LayoutReason, PhaseEvent, RingRotatedEvent, Tracer,
};
use crate::tween::{Playhead, Pose, Timeline, lerp};

/// What caused an advance attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    /// The deck's own repeat timer.
    Timer,
    /// [`DeckScheduler::advance`] or [`DeckScheduler::next`].
    External,
}

/// Result of an advance attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdvanceOutcome {
    /// A run started.
    Started,
    /// A run was already in flight; the trigger was dropped.
    Busy,
    /// The deck holds fewer than two cards.
    TooFewCards,
    /// The deck has been torn down. Not traced.
    TornDown,
    /// The ring refers to an item without a pose.
    MissingTarget,
}

impl AdvanceOutcome {
    /// Whether a run started.
    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Phase of an in-flight advance run. Phases only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RunPhase {
    /// Created, not yet rendered.
    Pending,
    /// The front card is falling.
    Dropping,
    /// The remaining cards are moving forward.
    Promoting,
    /// The retiring card is rising into the back slot.
    Returning,
    /// Every step has rendered its final value.
    Complete,
    /// Dropped by a reload or reconfigure before it finished.
    Abandoned,
}

/// Whether a run is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeckState {
    /// No run; the cards rest in their slots.
    #[default]
    Idle,
    /// An advance run owns the card poses.
    Running,
}

/// A card hit by a click, resolved to the item it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardClick {
    /// Item shown in the clicked slot.
    pub item: usize,
    /// The clicked slot.
    pub rank: usize,
}

/// The set of changes produced by a single [`DeckScheduler::tick`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckChanges {
    /// Items whose pose was written, sorted and without duplicates.
    pub poses: Vec<usize>,
    /// Every pose was replaced by an instant layout since the last tick.
    pub relayout: bool,
    /// A run finished and the ring rotated.
    pub completed: bool,
    /// The repeat timer started a new run.
    pub auto_advanced: bool,
}

impl DeckChanges {
    /// Clears all change lists and flags.
    pub fn clear(&mut self) {
        self.poses.clear();
        self.relayout = false;
        self.completed = false;
        self.auto_advanced = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty() && !self.relayout && !self.completed && !self.auto_advanced
    }
}

/// A partial [`CardPose`]; `None` channels are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardPatch {
    /// Horizontal offset.
    pub x: Option<f64>,
    /// Vertical offset.
    pub y: Option<f64>,
    /// Depth offset.
    pub z: Option<f64>,
    /// Vertical skew in degrees.
    pub skew_y: Option<f64>,
    /// Stacking order. Never blended; written when a step starts.
    pub z_index: Option<i32>,
}

impl CardPatch {
    /// Position and skew of `pose`, without stacking order.
    #[must_use]
    pub fn placement(pose: &CardPose) -> Self {
        Self {
            x: Some(pose.x),
            y: Some(pose.y),
            z: Some(pose.z),
            skew_y: Some(pose.skew_y),
            z_index: None,
        }
    }
}

impl Pose for CardPose {
    type Patch = CardPatch;

    fn apply(&mut self, patch: &CardPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(z) = patch.z {
            self.z = z;
        }
        if let Some(skew_y) = patch.skew_y {
            self.skew_y = skew_y;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
    }

    fn blend(&mut self, from: &Self, patch: &CardPatch, t: f64) {
        if let Some(x) = patch.x {
            self.x = lerp(from.x, x, t);
        }
        if let Some(y) = patch.y {
            self.y = lerp(from.y, y, t);
        }
        if let Some(z) = patch.z {
            self.z = lerp(from.z, z, t);
        }
        if let Some(skew_y) = patch.skew_y {
            self.skew_y = lerp(from.skew_y, skew_y, t);
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
    }
}

#[derive(Clone, Debug)]
struct AnimationRun {
    retiring: usize,
    timeline: Timeline<CardPose, RunPhase>,
    playhead: Playhead,
    phase: RunPhase,
}

/// Ring, poses, and timer for one deck. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct DeckScheduler {
    config: DeckConfig,
    ring: Vec<usize>,
    poses: Vec<CardPose>,
    run: Option<AnimationRun>,
    timer: RepeatTimer,
    hovered: bool,
    mounted: bool,
    relayout_pending: bool,
    touched: Vec<usize>,
}

impl DeckScheduler {
    /// Creates a deck of `item_count` cards laid out by rank, and arms the
    /// repeat timer if the configuration has an interval.
    #[must_use]
    pub fn new(item_count: usize, config: DeckConfig, now: HostTime) -> Self {
        let config = sanitize(config);
        let mut deck = Self {
            config,
            ring: (0..item_count).collect(),
            poses: alloc::vec![CardPose::default(); item_count],
            run: None,
            timer: RepeatTimer::new(config.interval),
            hovered: false,
            mounted: true,
            relayout_pending: true,
            touched: Vec::new(),
        };
        deck.layout();
        deck.rearm(now);
        deck
    }

    /// Replaces the content with `item_count` new items.
    ///
    /// Abandons any run, resets the ring to identity, lays the cards out
    /// instantly, and restarts the timer unless the deck is hover-paused.
    pub fn reload(&mut self, item_count: usize, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted {
            return;
        }
        self.abandon_run(now, tracer);
        self.ring.clear();
        self.ring.extend(0..item_count);
        self.poses.clear();
        self.poses.resize(item_count, CardPose::default());
        self.layout();
        self.rearm(now);
        tracer.layout(&LayoutEvent {
            at: now,
            item_count,
            reason: LayoutReason::Reload,
        });
    }

    /// Applies a new configuration.
    ///
    /// Abandons any run, keeps the ring order, lays the cards out instantly
    /// with the new geometry, and restarts the timer with the new interval.
    pub fn reconfigure(&mut self, config: DeckConfig, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted {
            return;
        }
        self.config = sanitize(config);
        self.timer = RepeatTimer::new(self.config.interval);
        if !self.config.pause_on_hover {
            self.hovered = false;
        }
        self.abandon_run(now, tracer);
        self.layout();
        self.rearm(now);
        tracer.layout(&LayoutEvent {
            at: now,
            item_count: self.ring.len(),
            reason: LayoutReason::Reconfigure,
        });
    }

    /// Starts an advance run unless one is in flight, the deck is too
    /// small, or it has been torn down.
    pub fn advance(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> AdvanceOutcome {
        self.trigger(now, TriggerSource::External, tracer)
    }

    /// Imperative advance for owners such as the
    /// [`ContentRotator`](crate::rotator::ContentRotator). Same as
    /// [`advance`](Self::advance).
    pub fn next(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> AdvanceOutcome {
        self.trigger(now, TriggerSource::External, tracer)
    }

    /// Drives the deck to `now`: renders the in-flight run, completes it if
    /// finished, then polls the repeat timer.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> DeckChanges {
        let mut changes = DeckChanges::default();
        self.tick_into(now, tracer, &mut changes);
        changes
    }

    /// Like [`tick`](Self::tick), but reuses a caller-provided buffer.
    pub fn tick_into(&mut self, now: HostTime, tracer: &mut Tracer<'_>, changes: &mut DeckChanges) {
        changes.clear();
        if !self.mounted {
            return;
        }
        changes.completed = self.render_run(now, tracer);
        if self.timer.poll(now) {
            changes.auto_advanced = self.trigger(now, TriggerSource::Timer, tracer).is_started();
        }
        changes.relayout = core::mem::take(&mut self.relayout_pending);
        changes.poses.append(&mut self.touched);
        changes.poses.sort_unstable();
        changes.poses.dedup();
    }

    /// Pointer entered the deck. With pause-on-hover, stops the timer and
    /// freezes any run in place.
    pub fn pointer_enter(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted || !self.config.pause_on_hover || self.hovered {
            return;
        }
        self.hovered = true;
        self.timer.disarm();
        let run_affected = match &mut self.run {
            Some(run) => {
                run.playhead.pause(now);
                true
            }
            None => false,
        };
        tracer.hover(&HoverEvent {
            at: now,
            hovered: true,
            run_affected,
        });
    }

    /// Pointer left the deck. Resumes a frozen run from where it stopped and
    /// restarts the timer at the full interval.
    pub fn pointer_leave(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted || !self.hovered {
            return;
        }
        self.hovered = false;
        let run_affected = match &mut self.run {
            Some(run) if run.playhead.is_paused() => {
                run.playhead.resume(now);
                true
            }
            _ => false,
        };
        self.rearm(now);
        tracer.hover(&HoverEvent {
            at: now,
            hovered: false,
            run_affected,
        });
    }

    /// Cancels the timer and drops any run. The deck then ignores every
    /// trigger and reports no further changes.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.run = None;
        self.timer.disarm();
        self.touched.clear();
        self.relayout_pending = false;
    }

    /// Resolves a click on the slot at `rank` without changing any state.
    #[must_use]
    pub fn click(&self, rank: usize) -> Option<CardClick> {
        self.item_at_rank(rank).map(|item| CardClick { item, rank })
    }

    /// Item indices by rank; `ring()[0]` is the front card.
    #[must_use]
    pub fn ring(&self) -> &[usize] {
        &self.ring
    }

    /// Current pose of `item`.
    #[must_use]
    pub fn pose(&self, item: usize) -> Option<&CardPose> {
        self.poses.get(item)
    }

    /// Current poses, indexed by item.
    #[must_use]
    pub fn poses(&self) -> &[CardPose] {
        &self.poses
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether the deck holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Item shown in the slot at `rank`.
    #[must_use]
    pub fn item_at_rank(&self, rank: usize) -> Option<usize> {
        self.ring.get(rank).copied()
    }

    /// Slot currently showing `item`.
    #[must_use]
    pub fn rank_of(&self, item: usize) -> Option<usize> {
        self.ring.iter().position(|&i| i == item)
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn state(&self) -> DeckState {
        if self.run.is_some() {
            DeckState::Running
        } else {
            DeckState::Idle
        }
    }

    /// Phase of the in-flight run, if any.
    #[must_use]
    pub fn phase(&self) -> Option<RunPhase> {
        self.run.as_ref().map(|run| run.phase)
    }

    /// Whether hover has paused the deck.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.hovered
    }

    /// Whether [`teardown`](Self::teardown) has not been called.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Next auto-advance deadline, if the timer is armed.
    #[must_use]
    pub fn timer_due(&self) -> Option<HostTime> {
        self.timer.due()
    }

    /// The active configuration (with sanitized geometry).
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    // -- internals ---------------------------------------------------------

    fn layout(&mut self) {
        let total = self.ring.len();
        for (rank, &item) in self.ring.iter().enumerate() {
            if let Some(pose) = self.poses.get_mut(item) {
                *pose = rest_pose(rank, total, &self.config.geometry);
            }
        }
        self.touched.clear();
        self.relayout_pending = true;
    }

    /// Arms the timer unless hover-paused or the ring cannot cycle.
    fn rearm(&mut self, now: HostTime) {
        if self.hovered || self.ring.len() < 2 {
            self.timer.disarm();
        } else {
            self.timer.arm(now);
        }
    }

    fn abandon_run(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if let Some(run) = self.run.take() {
            tracer.phase(&PhaseEvent {
                at: now,
                retiring: run.retiring,
                phase: RunPhase::Abandoned,
            });
        }
    }

    fn trigger(
        &mut self,
        now: HostTime,
        source: TriggerSource,
        tracer: &mut Tracer<'_>,
    ) -> AdvanceOutcome {
        if !self.mounted {
            return AdvanceOutcome::TornDown;
        }
        let front = self.ring.first().copied();
        let outcome = if self.run.is_some() {
            AdvanceOutcome::Busy
        } else if self.ring.len() < 2 {
            AdvanceOutcome::TooFewCards
        } else if self.ring.iter().any(|&item| item >= self.poses.len()) {
            AdvanceOutcome::MissingTarget
        } else {
            self.run = Some(self.build_run(now));
            AdvanceOutcome::Started
        };
        tracer.advance(&AdvanceEvent {
            at: now,
            source,
            front,
            outcome,
        });
        if outcome.is_started() {
            // Enter the drop phase on the triggering frame.
            self.render_run(now, tracer);
        }
        outcome
    }

    fn build_run(&self, now: HostTime) -> AnimationRun {
        let timings = &self.config.timings;
        let geometry = &self.config.geometry;
        let easing = self.config.easing;
        let total = self.ring.len();
        let retiring = self.ring[0];
        let promote_at = timings.promote_at();
        let return_at = timings.return_at();

        let mut timeline = Timeline::new();
        timeline
            .mark(Duration::ZERO, RunPhase::Dropping)
            .mark(promote_at, RunPhase::Promoting)
            .mark(return_at, RunPhase::Returning);

        let drop_to = self.poses[retiring].y + timings.drop_distance;
        timeline.tween(
            retiring,
            Duration::ZERO,
            timings.drop_duration(),
            easing,
            CardPatch {
                y: Some(drop_to),
                ..CardPatch::default()
            },
        );

        for (rank, &item) in self.ring[1..].iter().enumerate() {
            let slot = rest_pose(rank, total, geometry);
            timeline
                .set(
                    item,
                    promote_at,
                    CardPatch {
                        z_index: Some(slot.z_index),
                        ..CardPatch::default()
                    },
                )
                .tween(
                    item,
                    promote_at + timings.stagger(rank),
                    timings.promote_duration(),
                    easing,
                    CardPatch::placement(&slot),
                );
        }

        let back = rest_pose(total - 1, total, geometry);
        timeline
            .set(
                retiring,
                return_at,
                CardPatch {
                    y: Some(back.y + timings.return_offset),
                    z_index: Some(back.z_index),
                    ..CardPatch::placement(&back)
                },
            )
            .tween(
                retiring,
                return_at,
                timings.return_duration(),
                easing,
                CardPatch {
                    y: Some(back.y),
                    ..CardPatch::default()
                },
            );

        AnimationRun {
            retiring,
            timeline,
            playhead: Playhead::start(now),
            phase: RunPhase::Pending,
        }
    }

    /// Renders the run at `now`. Returns `true` if it completed and the ring
    /// rotated.
    fn render_run(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if run.playhead.is_paused() {
            return false;
        }
        let t = run.playhead.sample(now);
        let retiring = run.retiring;
        let mut phase = run.phase;
        let status = run
            .timeline
            .render(t, &mut self.poses, &mut self.touched, |entered| {
                phase = entered;
                tracer.phase(&PhaseEvent {
                    at: now,
                    retiring,
                    phase: entered,
                });
            });
        run.phase = phase;
        if !status.finished {
            return false;
        }

        tracer.phase(&PhaseEvent {
            at: now,
            retiring,
            phase: RunPhase::Complete,
        });
        self.run = None;
        self.ring.rotate_left(1);
        if let Some(&front) = self.ring.first() {
            tracer.ring_rotated(&RingRotatedEvent {
                at: now,
                retired: retiring,
                front,
            });
        }
        true
    }
}

fn sanitize(config: DeckConfig) -> DeckConfig {
    DeckConfig {
        geometry: config.geometry.sanitized(),
        ..config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DeckGeometry;

    fn t(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    fn manual() -> DeckConfig {
        DeckConfig {
            interval: None,
            ..DeckConfig::default()
        }
    }

    fn assert_at_rest(deck: &DeckScheduler) {
        let total = deck.len();
        for (rank, &item) in deck.ring().iter().enumerate() {
            assert_eq!(
                deck.poses()[item],
                rest_pose(rank, total, &deck.config().geometry),
                "item {item} at rank {rank}"
            );
        }
    }

    /// Advances once and ticks far enough past the end to complete.
    fn cycle(deck: &mut DeckScheduler, start: u64) -> u64 {
        let mut tracer = Tracer::none();
        assert_eq!(deck.advance(t(start), &mut tracer), AdvanceOutcome::Started);
        let end = start + 2_000;
        assert!(deck.tick(t(end), &mut tracer).completed);
        end
    }

    #[test]
    fn new_lays_out_by_rank() {
        let deck = DeckScheduler::new(4, manual(), t(0));
        assert_eq!(deck.ring(), &[0, 1, 2, 3]);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_at_rest(&deck);
        assert_eq!(deck.timer_due(), None);
    }

    #[test]
    fn one_advance_rotates_abc() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        cycle(&mut deck, 0);
        assert_eq!(deck.ring(), &[1, 2, 0]);
        assert_at_rest(&deck);
    }

    #[test]
    fn n_advances_restore_the_ring() {
        for n in 2..=6 {
            let mut deck = DeckScheduler::new(n, manual(), t(0));
            let mut now = 0;
            for _ in 0..n {
                now = cycle(&mut deck, now + 10);
            }
            let identity: Vec<usize> = (0..n).collect();
            assert_eq!(deck.ring(), identity.as_slice(), "n = {n}");
            assert_at_rest(&deck);
        }
    }

    #[test]
    fn many_cycles_do_not_drift() {
        let mut deck = DeckScheduler::new(5, manual(), t(0));
        let mut now = 0;
        for _ in 0..50 {
            now = cycle(&mut deck, now);
        }
        assert_at_rest(&deck);
    }

    #[test]
    fn advance_while_running_is_dropped() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        let mut tracer = Tracer::none();
        assert!(deck.advance(t(0), &mut tracer).is_started());
        deck.tick(t(200), &mut tracer);
        assert_eq!(deck.advance(t(300), &mut tracer), AdvanceOutcome::Busy);
        assert_eq!(deck.ring(), &[0, 1, 2]);
        assert!(deck.tick(t(1_080), &mut tracer).completed);
        // One rotation, not two.
        assert_eq!(deck.ring(), &[1, 2, 0]);
        assert_eq!(deck.state(), DeckState::Idle);
    }

    #[test]
    fn short_decks_never_start() {
        let mut tracer = Tracer::none();
        for n in 0..2 {
            let mut deck = DeckScheduler::new(n, manual(), t(0));
            assert_eq!(deck.advance(t(0), &mut tracer), AdvanceOutcome::TooFewCards);
            assert!(deck.tick(t(5_000), &mut tracer).poses.is_empty());
        }
    }

    #[test]
    fn short_decks_leave_the_timer_disarmed() {
        let config = DeckConfig {
            pause_on_hover: true,
            ..DeckConfig::default()
        };
        let mut tracer = Tracer::none();
        for n in 0..2 {
            let mut deck = DeckScheduler::new(n, config, t(0));
            assert_eq!(deck.timer_due(), None, "{n} cards");
            assert!(!deck.tick(t(5_000), &mut tracer).auto_advanced);
            deck.pointer_enter(t(6_000), &mut tracer);
            deck.pointer_leave(t(7_000), &mut tracer);
            assert_eq!(deck.timer_due(), None, "{n} cards");
        }

        let mut deck = DeckScheduler::new(1, config, t(0));
        deck.reload(3, t(1_000), &mut tracer);
        assert_eq!(deck.timer_due(), Some(t(6_000)));
        deck.reload(1, t(2_000), &mut tracer);
        assert_eq!(deck.timer_due(), None);
    }

    #[test]
    fn phases_move_forward_and_ring_waits_for_the_end() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        let mut tracer = Tracer::none();
        deck.advance(t(0), &mut tracer);
        assert_eq!(deck.phase(), Some(RunPhase::Dropping));

        let mut seen = Vec::new();
        let mut now = 0;
        while deck.state() == DeckState::Running {
            now += 16;
            let changes = deck.tick(t(now), &mut tracer);
            if let Some(phase) = deck.phase() {
                if seen.last() != Some(&phase) {
                    seen.push(phase);
                }
                assert_eq!(deck.ring(), &[0, 1, 2]);
            } else {
                assert!(changes.completed);
            }
        }
        assert_eq!(seen, [RunPhase::Dropping, RunPhase::Promoting, RunPhase::Returning]);
        // Last promote ends at 0.36 + 0.08 + 0.6 s; return at 0.6 + 0.48 s.
        assert!((1_080..1_100).contains(&now), "completed at {now} ms");
    }

    #[test]
    fn drop_moves_the_front_card_down() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        let mut tracer = Tracer::none();
        deck.advance(t(0), &mut tracer);
        let changes = deck.tick(t(300), &mut tracer);
        assert_eq!(changes.poses, [0]);
        let y = deck.pose(0).map(|p| p.y).unwrap_or_default();
        assert!(y > 0.0 && y < 200.0, "y = {y}");
    }

    #[test]
    fn return_snaps_below_the_back_slot() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        let mut tracer = Tracer::none();
        deck.advance(t(0), &mut tracer);
        deck.tick(t(600), &mut tracer);
        let back = rest_pose(2, 3, &deck.config().geometry);
        let retiring = deck.pose(0).copied().unwrap_or_default();
        assert_eq!(retiring.y, back.y + 100.0);
        assert_eq!(retiring.x, back.x);
        assert_eq!(retiring.z_index, 1);
        // Promoted cards took their new stacking order at the promote mark.
        assert_eq!(deck.pose(1).map(|p| p.z_index), Some(3));
        assert_eq!(deck.pose(2).map(|p| p.z_index), Some(2));
    }

    #[test]
    fn pause_resume_matches_uninterrupted_run() {
        let config = DeckConfig {
            pause_on_hover: true,
            ..manual()
        };
        let mut tracer = Tracer::none();

        let mut straight = DeckScheduler::new(4, config, t(0));
        straight.advance(t(0), &mut tracer);
        straight.tick(t(2_000), &mut tracer);

        let mut paused = DeckScheduler::new(4, config, t(0));
        paused.advance(t(0), &mut tracer);
        paused.tick(t(450), &mut tracer);
        paused.pointer_enter(t(500), &mut tracer);
        let frozen: Vec<CardPose> = paused.poses().to_vec();
        let changes = paused.tick(t(9_000), &mut tracer);
        assert!(changes.poses.is_empty());
        assert_eq!(paused.poses(), frozen.as_slice());
        assert_eq!(paused.state(), DeckState::Running);
        paused.pointer_leave(t(9_000), &mut tracer);
        assert!(paused.tick(t(11_000), &mut tracer).completed);

        assert_eq!(paused.ring(), straight.ring());
        assert_eq!(paused.poses(), straight.poses());
    }

    #[test]
    fn hover_stops_and_restarts_the_timer() {
        let config = DeckConfig {
            interval: Some(Duration::from_millis(5_000)),
            pause_on_hover: true,
            ..DeckConfig::default()
        };
        let mut deck = DeckScheduler::new(3, config, t(0));
        let mut tracer = Tracer::none();
        assert_eq!(deck.timer_due(), Some(t(5_000)));
        deck.pointer_enter(t(1_000), &mut tracer);
        assert!(deck.is_paused());
        assert_eq!(deck.timer_due(), None);
        assert!(!deck.tick(t(10_000), &mut tracer).auto_advanced);
        deck.pointer_leave(t(10_000), &mut tracer);
        assert_eq!(deck.timer_due(), Some(t(15_000)));
        assert!(deck.tick(t(15_000), &mut tracer).auto_advanced);
    }

    #[test]
    fn hover_is_ignored_without_pause_on_hover() {
        let mut deck = DeckScheduler::new(3, DeckConfig::default(), t(0));
        let mut tracer = Tracer::none();
        deck.pointer_enter(t(100), &mut tracer);
        assert!(!deck.is_paused());
        assert_eq!(deck.timer_due(), Some(t(5_000)));
    }

    #[test]
    fn timer_drives_advances() {
        let config = DeckConfig {
            interval: Some(Duration::from_millis(2_000)),
            ..DeckConfig::default()
        };
        let mut deck = DeckScheduler::new(3, config, t(0));
        let mut tracer = Tracer::none();
        assert!(!deck.tick(t(1_999), &mut tracer).auto_advanced);
        assert!(deck.tick(t(2_000), &mut tracer).auto_advanced);
        assert!(deck.tick(t(3_500), &mut tracer).completed);
        assert!(deck.tick(t(4_000), &mut tracer).auto_advanced);
        deck.tick(t(6_000), &mut tracer);
        assert_eq!(deck.ring(), &[2, 0, 1]);
    }

    #[test]
    fn teardown_mid_run_goes_quiet() {
        let config = DeckConfig {
            interval: Some(Duration::from_millis(1_000)),
            ..DeckConfig::default()
        };
        let mut deck = DeckScheduler::new(3, config, t(0));
        let mut tracer = Tracer::none();
        deck.advance(t(0), &mut tracer);
        deck.tick(t(400), &mut tracer);
        deck.teardown();
        assert!(!deck.is_mounted());
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.timer_due(), None);
        assert!(deck.tick(t(5_000), &mut tracer).is_empty());
        assert_eq!(deck.advance(t(5_000), &mut tracer), AdvanceOutcome::TornDown);
        deck.pointer_enter(t(5_000), &mut tracer);
        deck.reload(5, t(5_000), &mut tracer);
        assert_eq!(deck.ring(), &[0, 1, 2]);
    }

    #[test]
    fn reload_abandons_the_run() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        let mut tracer = Tracer::none();
        deck.tick(t(0), &mut tracer);
        deck.advance(t(0), &mut tracer);
        deck.tick(t(500), &mut tracer);
        deck.reload(5, t(500), &mut tracer);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.ring(), &[0, 1, 2, 3, 4]);
        assert_at_rest(&deck);
        let changes = deck.tick(t(516), &mut tracer);
        assert!(changes.relayout);
        assert!(changes.poses.is_empty());
    }

    #[test]
    fn reconfigure_keeps_ring_and_applies_geometry() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        cycle(&mut deck, 0);
        let mut tracer = Tracer::none();
        deck.reconfigure(
            DeckConfig {
                geometry: DeckGeometry::narrow(),
                ..manual()
            },
            t(3_000),
            &mut tracer,
        );
        assert_eq!(deck.ring(), &[1, 2, 0]);
        assert_eq!(deck.config().geometry, DeckGeometry::narrow());
        assert_at_rest(&deck);
    }

    #[test]
    fn click_maps_rank_to_item_without_side_effects() {
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        cycle(&mut deck, 0);
        assert_eq!(deck.click(0), Some(CardClick { item: 1, rank: 0 }));
        assert_eq!(deck.click(3), None);
        assert_eq!(deck.rank_of(0), Some(2));
        assert_eq!(deck.state(), DeckState::Idle);
    }

    #[test]
    fn first_tick_reports_initial_layout() {
        let mut deck = DeckScheduler::new(2, manual(), t(0));
        let mut tracer = Tracer::none();
        assert!(deck.tick(t(0), &mut tracer).relayout);
        assert!(deck.tick(t(16), &mut tracer).is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_reports_a_full_cycle() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log {
            outcomes: Vec<AdvanceOutcome>,
            phases: Vec<RunPhase>,
            rotated: Vec<(usize, usize)>,
        }
        impl TraceSink for Log {
            fn on_advance(&mut self, e: &AdvanceEvent) {
                self.outcomes.push(e.outcome);
            }
            fn on_phase(&mut self, e: &PhaseEvent) {
                self.phases.push(e.phase);
            }
            fn on_ring_rotated(&mut self, e: &RingRotatedEvent) {
                self.rotated.push((e.retired, e.front));
            }
        }

        let mut log = Log::default();
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        {
            let mut tracer = Tracer::new(&mut log);
            deck.advance(t(0), &mut tracer);
            deck.advance(t(10), &mut tracer);
            deck.tick(t(2_000), &mut tracer);
        }
        assert_eq!(log.outcomes, [AdvanceOutcome::Started, AdvanceOutcome::Busy]);
        assert_eq!(
            log.phases,
            [
                RunPhase::Dropping,
                RunPhase::Promoting,
                RunPhase::Returning,
                RunPhase::Complete
            ]
        );
        assert_eq!(log.rotated, [(0, 1)]);
    }
    #[cfg(feature = "trace")]
    #[test]
    fn dropped_runs_report_abandoned() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Phases(Vec<RunPhase>);
        impl TraceSink for Phases {
            fn on_phase(&mut self, e: &PhaseEvent) {
                self.0.push(e.phase);
            }
        }

        let mut log = Phases::default();
        let mut deck = DeckScheduler::new(3, manual(), t(0));
        {
            let mut tracer = Tracer::new(&mut log);
            deck.advance(t(0), &mut tracer);
            deck.tick(t(400), &mut tracer);
            deck.reconfigure(manual(), t(500), &mut tracer);
            // No run left to drop.
            deck.reload(3, t(600), &mut tracer);
        }
        assert_eq!(
            log.0,
            [RunPhase::Dropping, RunPhase::Promoting, RunPhase::Abandoned]
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn teardown_silences_the_tracer() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Count(usize);
        impl TraceSink for Count {
            fn on_advance(&mut self, _: &AdvanceEvent) {
                self.0 += 1;
            }
            fn on_phase(&mut self, _: &PhaseEvent) {
                self.0 += 1;
            }
            fn on_ring_rotated(&mut self, _: &RingRotatedEvent) {
                self.0 += 1;
            }
            fn on_hover(&mut self, _: &HoverEvent) {
                self.0 += 1;
            }
            fn on_layout(&mut self, _: &LayoutEvent) {
                self.0 += 1;
            }
        }

        let config = DeckConfig {
            interval: Some(Duration::from_millis(1_000)),
            pause_on_hover: true,
            ..DeckConfig::default()
        };
        let mut deck = DeckScheduler::new(3, config, t(0));
        let mut count = Count::default();
        {
            let mut tracer = Tracer::new(&mut count);
            deck.advance(t(0), &mut tracer);
            deck.tick(t(400), &mut tracer);
        }
        let before = count.0;
        deck.teardown();
        {
            let mut tracer = Tracer::new(&mut count);
            assert_eq!(deck.advance(t(500), &mut tracer), AdvanceOutcome::TornDown);
            assert_eq!(deck.next(t(500), &mut tracer), AdvanceOutcome::TornDown);
            deck.pointer_enter(t(600), &mut tracer);
            deck.pointer_leave(t(700), &mut tracer);
            deck.reload(4, t(800), &mut tracer);
            deck.reconfigure(config, t(900), &mut tracer);
            deck.tick(t(5_000), &mut tracer);
        }
        assert_eq!(count.0, before);
    }
}
