// SPDX-License-Identifier: MPL-2.0
//! Page scroll lock held while the lightbox is open.
//!
//! The lock is a counter shared with the page view. Each open lightbox holds
//! a [`ScrollLockGuard`]; dropping the guard releases it, so every way a
//! lightbox session ends (close animation, category change, app exit)
//! unlocks the page.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks page scrolling until the returned guard is dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}
