// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content groups and the rotator that switches between them.
//!
//! A [`ContentRotator`] owns a list of [`ContentGroup`]s, the index of the
//! active one, an info panel pose, and a [`DeckScheduler`] showing the active
//! group's items. Selecting another group crossfades the panel:
//!
//! ```text
//!   select_group(i)
//!        │
//!        ▼
//!   FadeOut ──(fade_out)──► Swap ──(fade_in)──► Settled
//!   timer off               active = i          timer on if the
//!                           deck.reload()       group has > 1 item
//! ```
//!
//! While idle, the rotator's own [`RepeatTimer`] calls the deck's
//! [`next`](DeckScheduler::next) on its interval. The deck may also run its
//! own timer; the two are independent.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{RotatorConfig, Viewport};
use crate::deck::{DeckChanges, DeckScheduler};
use crate::error::ContentError;
use crate::time::{Duration, HostTime};
use crate::timer::RepeatTimer;
use crate::trace::{FadeEvent, SelectEvent, Tracer};
use crate::tween::{Playhead, Pose, Timeline, lerp};

/// The payload shown on one card of the showcase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisplayItem {
    /// Image source.
    pub image: String,
    /// Alternative text / caption.
    pub caption: String,
}

impl DisplayItem {
    /// Creates an item from an image source and caption.
    #[must_use]
    pub fn new(image: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
        }
    }
}

/// An immutable, non-empty set of items plus the copy describing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentGroup<T = DisplayItem> {
    id: String,
    title: String,
    description: String,
    features: Vec<String>,
    cta: String,
    items: Vec<T>,
}

impl<T> ContentGroup<T> {
    /// Creates a group. Fails if `items` is empty.
    pub fn new(id: impl Into<String>, items: Vec<T>) -> Result<Self, ContentError> {
        let id = id.into();
        if items.is_empty() {
            return Err(ContentError::EmptyGroup { id });
        }
        Ok(Self {
            id,
            title: String::new(),
            description: String::new(),
            features: Vec::new(),
            cta: String::new(),
            items,
        })
    }

    /// Sets the heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the short description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the feature bullet list.
    #[must_use]
    pub fn with_features(mut self, features: impl IntoIterator<Item: Into<String>>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the call-to-action label.
    #[must_use]
    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = cta.into();
        self
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Feature bullets.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Call-to-action label.
    #[must_use]
    pub fn cta(&self) -> &str {
        &self.cta
    }

    /// Items in display order. Never empty.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; groups are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Opacity and vertical offset of the info panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPose {
    /// `0.0` hidden, `1.0` fully visible.
    pub opacity: f64,
    /// Downward offset in host pixels.
    pub offset_y: f64,
}

impl PanelPose {
    /// Fully visible, in place.
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
    };

    /// Fully transparent, pushed down by `offset_y`.
    #[must_use]
    pub const fn hidden(offset_y: f64) -> Self {
        Self {
            opacity: 0.0,
            offset_y,
        }
    }
}

impl Default for PanelPose {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl Pose for PanelPose {
    type Patch = Self;

    fn apply(&mut self, patch: &Self) {
        *self = *patch;
    }

    fn blend(&mut self, from: &Self, patch: &Self, t: f64) {
        self.opacity = lerp(from.opacity, patch.opacity, t);
        self.offset_y = lerp(from.offset_y, patch.offset_y, t);
    }
}

/// Whether a group switch is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transition {
    /// No switch in progress.
    #[default]
    Idle,
    /// The panel is fading; further selections are dropped.
    Transitioning,
}

/// Stage of a group switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FadeStage {
    /// The panel is fading out; the old group is still active.
    FadeOut,
    /// The new group became active and the deck reloaded.
    Swap,
    /// The panel is fading in.
    FadeIn,
    /// The panel is fully visible and the switch is over.
    Settled,
}

/// Result of [`ContentRotator::select_group`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectOutcome {
    /// A switch started.
    Started,
    /// The requested group is already active.
    AlreadyActive,
    /// A switch is already in progress.
    Busy,
    /// No group has the requested index.
    OutOfRange,
    /// The rotator has been torn down. Not traced.
    TornDown,
}

impl SelectOutcome {
    /// Whether a switch started.
    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// The active group, transition flag, and repeat timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationState {
    /// Index of the active group.
    pub active: usize,
    /// Whether a switch is in progress.
    pub transition: Transition,
    /// Next auto-advance deadline, if armed.
    pub timer_due: Option<HostTime>,
}

/// The set of changes produced by a single [`ContentRotator::tick`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RotatorChanges {
    /// Changes reported by the deck.
    pub deck: DeckChanges,
    /// The panel pose was written.
    pub panel: bool,
    /// The active group changed.
    pub group_changed: bool,
    /// The rotator's timer advanced the deck.
    pub auto_advanced: bool,
}

impl RotatorChanges {
    /// Clears all changes.
    pub fn clear(&mut self) {
        self.deck.clear();
        self.panel = false;
        self.group_changed = false;
        self.auto_advanced = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty() && !self.panel && !self.group_changed && !self.auto_advanced
    }
}

#[derive(Clone, Debug)]
struct Fade {
    target: usize,
    timeline: Timeline<PanelPose, FadeStage>,
    playhead: Playhead,
    stage: FadeStage,
}

/// Switches between content groups and drives their deck. See the
/// [module docs](self).
#[derive(Clone, Debug)]
pub struct ContentRotator<T = DisplayItem> {
    groups: Vec<ContentGroup<T>>,
    config: RotatorConfig,
    viewport: Viewport,
    active: usize,
    fade: Option<Fade>,
    panel: PanelPose,
    panel_dirty: bool,
    timer: RepeatTimer,
    deck: DeckScheduler,
    mounted: bool,
}

impl<T> ContentRotator<T> {
    /// Creates a rotator showing the first group. Fails if `groups` is
    /// empty.
    pub fn new(
        groups: Vec<ContentGroup<T>>,
        config: RotatorConfig,
        viewport: Viewport,
        now: HostTime,
    ) -> Result<Self, ContentError> {
        let Some(first) = groups.first() else {
            return Err(ContentError::NoGroups);
        };
        let deck = DeckScheduler::new(first.len(), config.deck_for(viewport), now);
        let mut rotator = Self {
            groups,
            config,
            viewport,
            active: 0,
            fade: None,
            panel: PanelPose::VISIBLE,
            panel_dirty: true,
            timer: RepeatTimer::new(config.auto_interval),
            deck,
            mounted: true,
        };
        rotator.rearm(now);
        Ok(rotator)
    }

    /// Starts a switch to the group at `index`.
    ///
    /// Does nothing if that group is already active, a switch is in
    /// progress, the index is out of range, or the rotator was torn down.
    pub fn select_group(
        &mut self,
        index: usize,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> SelectOutcome {
        if !self.mounted {
            return SelectOutcome::TornDown;
        }
        let outcome = if index == self.active {
            SelectOutcome::AlreadyActive
        } else if self.fade.is_some() {
            SelectOutcome::Busy
        } else if index >= self.groups.len() {
            SelectOutcome::OutOfRange
        } else {
            SelectOutcome::Started
        };
        tracer.select(&SelectEvent {
            at: now,
            requested: index,
            active: self.active,
            outcome,
        });
        if outcome.is_started() {
            self.timer.disarm();
            self.fade = Some(self.build_fade(index, now));
            self.render_fade(now, tracer);
        }
        outcome
    }

    /// Drives the panel fade, the auto timer, and the deck to `now`, in
    /// that order.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> RotatorChanges {
        let mut changes = RotatorChanges::default();
        self.tick_into(now, tracer, &mut changes);
        changes
    }

    /// Like [`tick`](Self::tick), but reuses a caller-provided buffer.
    pub fn tick_into(
        &mut self,
        now: HostTime,
        tracer: &mut Tracer<'_>,
        changes: &mut RotatorChanges,
    ) {
        changes.clear();
        if !self.mounted {
            return;
        }
        changes.group_changed = self.render_fade(now, tracer);
        if self.timer.poll(now) && self.fade.is_none() {
            changes.auto_advanced = self.deck.next(now, tracer).is_started();
        }
        self.deck.tick_into(now, tracer, &mut changes.deck);
        changes.panel = core::mem::take(&mut self.panel_dirty);
    }

    /// Forwards pointer entry to the deck.
    pub fn pointer_enter(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.deck.pointer_enter(now, tracer);
    }

    /// Forwards pointer exit to the deck.
    pub fn pointer_leave(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.deck.pointer_leave(now, tracer);
    }

    /// Applies the host's breakpoint, swapping the deck geometry preset.
    pub fn set_viewport(&mut self, viewport: Viewport, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted || viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.deck.reconfigure(self.config.deck_for(viewport), now, tracer);
    }

    /// Cancels the fade and timer and tears down the deck.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.fade = None;
        self.timer.disarm();
        self.panel_dirty = false;
        self.deck.teardown();
    }

    /// Index of the active group.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active group.
    #[must_use]
    pub fn active_group(&self) -> &ContentGroup<T> {
        &self.groups[self.active]
    }

    /// All groups, in selector order.
    #[must_use]
    pub fn groups(&self) -> &[ContentGroup<T>] {
        &self.groups
    }

    /// Whether a switch is in progress.
    #[must_use]
    pub fn transition(&self) -> Transition {
        if self.fade.is_some() {
            Transition::Transitioning
        } else {
            Transition::Idle
        }
    }

    /// Stage of the switch in progress, if any.
    #[must_use]
    pub fn fade_stage(&self) -> Option<FadeStage> {
        self.fade.as_ref().map(|fade| fade.stage)
    }

    /// Snapshot of the active index, transition flag, and timer.
    #[must_use]
    pub fn state(&self) -> RotationState {
        RotationState {
            active: self.active,
            transition: self.transition(),
            timer_due: self.timer.due(),
        }
    }

    /// Current info panel pose.
    #[must_use]
    pub fn panel(&self) -> PanelPose {
        self.panel
    }

    /// The deck showing the active group.
    #[must_use]
    pub fn deck(&self) -> &DeckScheduler {
        &self.deck
    }

    /// Mutable access to the deck, for direct advances and clicks.
    #[must_use]
    pub fn deck_mut(&mut self) -> &mut DeckScheduler {
        &mut self.deck
    }

    /// Current breakpoint.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether [`teardown`](Self::teardown) has not been called.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // -- internals ---------------------------------------------------------

    fn rearm(&mut self, now: HostTime) {
        if self.groups[self.active].len() > 1 {
            self.timer.arm(now);
        } else {
            self.timer.disarm();
        }
    }

    fn build_fade(&self, target: usize, now: HostTime) -> Fade {
        let config = &self.config;
        let hidden = PanelPose::hidden(config.fade_offset);
        let fade_out = Duration::from_secs_f64(config.fade_out_secs);
        let fade_in = Duration::from_secs_f64(config.fade_in_secs);

        let mut timeline = Timeline::new();
        timeline
            .mark(Duration::ZERO, FadeStage::FadeOut)
            .mark(fade_out, FadeStage::Swap)
            .mark(fade_out, FadeStage::FadeIn)
            .mark(fade_out + fade_in, FadeStage::Settled)
            .tween(0, Duration::ZERO, fade_out, config.fade_easing, hidden)
            .set(0, fade_out, hidden)
            .tween(0, fade_out, fade_in, config.fade_easing, PanelPose::VISIBLE);

        Fade {
            target,
            timeline,
            playhead: Playhead::start(now),
            stage: FadeStage::FadeOut,
        }
    }

    /// Renders the fade at `now`. Returns `true` if the active group changed.
    fn render_fade(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        let Some(fade) = self.fade.as_mut() else {
            return false;
        };
        let t = fade.playhead.sample(now);
        let mut crossed = Vec::new();
        let mut touched = Vec::new();
        let status = fade.timeline.render(
            t,
            core::slice::from_mut(&mut self.panel),
            &mut touched,
            |stage| crossed.push(stage),
        );
        self.panel_dirty |= !touched.is_empty();
        let target = fade.target;
        if let Some(&last) = crossed.last() {
            fade.stage = last;
        }

        let mut swapped = false;
        for stage in crossed {
            tracer.fade(&FadeEvent {
                at: now,
                group: target,
                stage,
            });
            if stage == FadeStage::Swap {
                self.active = target;
                self.deck.reload(self.groups[target].len(), now, tracer);
                swapped = true;
            }
        }
        if status.finished {
            self.fade = None;
            self.rearm(now);
        }
        swapped
    }
}
