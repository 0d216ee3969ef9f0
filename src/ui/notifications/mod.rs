// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Short messages about background outcomes (download finished, link
//! copied, configuration ignored). At most three are visible; the rest are
//! queued. Success and info toasts expire after a few seconds, warnings
//! later, and errors stay until dismissed.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
