// SPDX-License-Identifier: MPL-2.0
//! Queue of toasts with a visible limit.
//!
//! Warnings and errors are mirrored into the diagnostics log when a handle is
//! attached.

use super::notification::{Notification, NotificationId, Severity};
use crate::diagnostics::DiagnosticsHandle;
use std::collections::VecDeque;
use std::time::Instant;

/// Toasts shown at once; the rest wait in the queue.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick(Instant),
}

#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    pub fn push(&mut self, notification: Notification) {
        if let Some(handle) = &self.diagnostics {
            let entry = match notification.detail() {
                Some(detail) => format!("{}: {detail}", notification.message_key()),
                None => notification.message_key().to_string(),
            };
            match notification.severity() {
                Severity::Warning => handle.log_warning(entry),
                Severity::Error => handle.log_error(entry),
                Severity::Success | Severity::Info => {}
            }
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_back(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Removes a toast, visible or queued. Returns `false` if it was unknown.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(position) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(position);
            self.promote_from_queue();
            return true;
        }
        if let Some(position) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(position);
            return true;
        }
        false
    }

    /// Drops every visible toast that expired at `now`.
    pub fn tick(&mut self, now: Instant) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.is_expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick(now) => self.tick(*now),
        }
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(notification) = self.queue.pop_front() else {
                break;
            };
            self.visible.push_back(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use std::time::Duration;

    #[test]
    fn overflow_is_queued_then_promoted() {
        let mut manager = Manager::new();
        let first = Notification::info("notification-link-copied");
        let first_id = first.id();
        manager.push(first);
        for _ in 1..=MAX_VISIBLE {
            manager.push(Notification::info("notification-link-copied"));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn dismissing_unknown_id_returns_false() {
        let mut manager = Manager::new();
        let stray = Notification::info("x").id();
        assert!(!manager.dismiss(stray));
    }

    #[test]
    fn tick_expires_info_but_keeps_errors() {
        let mut manager = Manager::new();
        manager.push(Notification::info("notification-link-copied"));
        manager.push(Notification::error("notification-download-error"));

        manager.handle_message(&Message::Tick(Instant::now() + Duration::from_secs(10)));
        assert_eq!(manager.visible_count(), 1);
        assert_eq!(
            manager.visible().next().map(Notification::severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn warnings_and_errors_reach_diagnostics() {
        let mut collector = DiagnosticsCollector::default();
        let mut manager = Manager::new();
        manager.set_diagnostics(collector.handle());

        manager.push(Notification::success("notification-download-success"));
        manager.push(Notification::warning("notification-config-load-error"));
        manager.push(Notification::error("notification-download-error").with_detail("timeout"));

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|event| event.kind.clone()).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(
            &kinds[0],
            DiagnosticEventKind::Warning { message } if message == "notification-config-load-error"
        ));
        assert!(matches!(
            &kinds[1],
            DiagnosticEventKind::Error { message } if message == "notification-download-error: timeout"
        ));
    }
}
