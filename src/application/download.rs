// SPDX-License-Identifier: MPL-2.0
//! Album download workflow.
//!
//! `Idle → Preparing → Saving → Idle`. Preparing is a fixed simulated delay;
//! Saving covers the save dialog and the transfer. Any request made while
//! the workflow is not idle is ignored, so at most one download runs.

/// Current step of the download workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    Preparing,
    Saving,
}

/// How a download ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written.
    Saved { bytes: u64 },
    /// The user dismissed the save dialog.
    Cancelled,
    /// The transfer failed; carries a displayable reason.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct DownloadAction {
    phase: DownloadPhase,
}

impl DownloadAction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the workflow. Returns `false` (and does nothing) when busy.
    pub fn request(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = DownloadPhase::Preparing;
        true
    }

    /// Ends the simulated delay. Returns `true` if the save step should start.
    pub fn prepared(&mut self) -> bool {
        if self.phase != DownloadPhase::Preparing {
            return false;
        }
        self.phase = DownloadPhase::Saving;
        true
    }

    /// Returns to idle after the save step, whatever its outcome.
    pub fn finish(&mut self) -> bool {
        if self.phase != DownloadPhase::Saving {
            return false;
        }
        self.phase = DownloadPhase::Idle;
        true
    }

    #[must_use]
    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase != DownloadPhase::Idle
    }
}
