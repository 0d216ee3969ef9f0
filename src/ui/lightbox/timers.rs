// SPDX-License-Identifier: MPL-2.0
//! Cancellable lightbox timers.
//!
//! The app runs the actual sleeps; the lightbox only hands out tokens and
//! checks them when a timer fires. A token that is no longer pending for its
//! slot belongs to a cancelled or superseded timer and is ignored.
//!
//! Tokens come from a [`TokenSource`] owned by the app, so a timer left in
//! flight by an earlier session never matches a later session's token.

use crate::application::Direction;
use crate::config::{
    LIGHTBOX_CLOSE_FADE, LIGHTBOX_FADE_IN, LIGHTBOX_NAVIGATION_FADE, LIGHTBOX_SNAP_BACK,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Run-wide token counter shared by every lightbox session.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    last: Arc<AtomicU64>,
}

impl TokenSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> TimerToken {
        TimerToken(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Opening → open.
    FadeIn,
    /// Cross-fade finished; advance the selection.
    Navigate(Direction),
    /// Fade-out finished; the lightbox is gone.
    Close,
    /// Swipe snap-back animation finished.
    SnapBack,
}

impl TimerKind {
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            TimerKind::FadeIn => LIGHTBOX_FADE_IN,
            TimerKind::Navigate(_) => LIGHTBOX_NAVIGATION_FADE,
            TimerKind::Close => LIGHTBOX_CLOSE_FADE,
            TimerKind::SnapBack => LIGHTBOX_SNAP_BACK,
        }
    }

    fn slot(self) -> usize {
        match self {
            TimerKind::FadeIn => 0,
            TimerKind::Navigate(_) => 1,
            TimerKind::Close => 2,
            TimerKind::SnapBack => 3,
        }
    }
}

/// One pending token per timer kind.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    source: TokenSource,
    pending: [Option<TimerToken>; 4],
}

impl Timers {
    #[must_use]
    pub fn new(source: TokenSource) -> Self {
        Self {
            source,
            pending: [None; 4],
        }
    }

    /// Reserves a token for `kind`, or `None` if one is already pending.
    pub fn schedule(&mut self, kind: TimerKind) -> Option<TimerToken> {
        let slot = &mut self.pending[kind.slot()];
        if slot.is_some() {
            return None;
        }
        let token = self.source.next();
        *slot = Some(token);
        Some(token)
    }

    /// Consumes `token` if it is the pending one for `kind`.
    pub fn fire(&mut self, token: TimerToken, kind: TimerKind) -> bool {
        let slot = &mut self.pending[kind.slot()];
        if *slot == Some(token) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Drops the pending timer of `kind`; its token will be ignored.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending[kind.slot()] = None;
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending[kind.slot()].is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_pending_timer_per_kind() {
        let mut timers = Timers::default();
        assert!(timers.schedule(TimerKind::Close).is_some());
        assert!(timers.schedule(TimerKind::Close).is_none());
        assert!(timers.schedule(TimerKind::FadeIn).is_some());
    }

    #[test]
    fn navigation_directions_share_a_slot() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::Navigate(Direction::Next));
        assert!(timers
            .schedule(TimerKind::Navigate(Direction::Previous))
            .is_none());
    }

    #[test]
    fn token_fires_once() {
        let mut timers = Timers::default();
        let token = timers.schedule(TimerKind::SnapBack).unwrap();
        assert!(timers.fire(token, TimerKind::SnapBack));
        assert!(!timers.fire(token, TimerKind::SnapBack));
        assert!(!timers.is_pending(TimerKind::SnapBack));
    }

    #[test]
    fn cancelled_token_is_ignored() {
        let mut timers = Timers::default();
        let stale = timers.schedule(TimerKind::Close).unwrap();
        timers.cancel(TimerKind::Close);
        let fresh = timers.schedule(TimerKind::Close).unwrap();
        assert_ne!(stale, fresh);
        assert!(!timers.fire(stale, TimerKind::Close));
        assert!(timers.fire(fresh, TimerKind::Close));
    }

    #[test]
    fn token_of_other_kind_is_ignored() {
        let mut timers = Timers::default();
        let token = timers.schedule(TimerKind::FadeIn).unwrap();
        assert!(!timers.fire(token, TimerKind::Close));
        assert!(timers.is_pending(TimerKind::FadeIn));
    }

    #[test]
    fn sessions_sharing_a_source_never_reuse_tokens() {
        let source = TokenSource::new();
        let mut dropped = Timers::new(source.clone());
        let stale = dropped.schedule(TimerKind::Navigate(Direction::Next)).unwrap();
        drop(dropped);

        let mut next = Timers::new(source);
        let fresh = next.schedule(TimerKind::Navigate(Direction::Next)).unwrap();
        assert_ne!(stale, fresh);
        assert!(!next.fire(stale, TimerKind::Navigate(Direction::Next)));
        assert!(next.is_pending(TimerKind::Navigate(Direction::Next)));
    }

    #[test]
    fn durations_match_animation_timings() {
        assert_eq!(TimerKind::FadeIn.duration(), Duration::from_millis(10));
        assert_eq!(
            TimerKind::Navigate(Direction::Next).duration(),
            Duration::from_millis(150)
        );
        assert_eq!(TimerKind::Close.duration(), Duration::from_millis(300));
    }
}
