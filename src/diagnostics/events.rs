// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the various types of events that can be captured
//! during an album session for diagnostic purposes.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Gate
    // ==========================================================================
    /// A password attempt. The input itself is never recorded.
    GateAttempt { success: bool },

    // ==========================================================================
    // Gallery
    // ==========================================================================
    /// Select a gallery category filter.
    FilterGallery { filter: String },

    /// Open the lightbox on a tile.
    OpenLightbox { index: usize },

    // ==========================================================================
    // Lightbox
    // ==========================================================================
    NavigateNext,
    NavigatePrevious,
    CloseLightbox,
    ZoomIn,
    ZoomOut,
    ResetZoom,

    // ==========================================================================
    // Film
    // ==========================================================================
    PlayFilm,
    PauseFilm,
    /// Seek the film, position in seconds.
    SeekFilm { position_secs: f64 },

    // ==========================================================================
    // Page Actions
    // ==========================================================================
    /// Start the album download.
    StartDownload,

    /// Copy a media link to the clipboard.
    CopyLink,

    /// Copy the diagnostics report to the clipboard.
    ExportDiagnostics,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Application state change (screen switch, catalog loaded, ...).
    AppState { state: String },

    /// Non-critical warning.
    Warning { message: String },

    /// Operation failure.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_event_new_creates_with_current_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::AppState {
            state: "album".to_string(),
        });
        let after = Instant::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn gate_attempt_serializes_without_input() {
        let kind = DiagnosticEventKind::UserAction {
            action: UserAction::GateAttempt { success: false },
            details: None,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"user_action\""));
        assert!(json.contains("\"action\":\"gate_attempt\""));
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn film_seek_serializes_its_position() {
        let json = serde_json::to_string(&UserAction::SeekFilm {
            position_secs: 42.5,
        })
        .expect("serialization should succeed");
        assert_eq!(json, r#"{"action":"seek_film","position_secs":42.5}"#);
    }

    #[test]
    fn diagnostic_event_kind_deserializes_from_json() {
        let json = r#"{"type":"error","message":"download failed"}"#;
        let event: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        match event {
            DiagnosticEventKind::Error { message } => {
                assert_eq!(message, "download failed");
            }
            _ => panic!("expected Error variant"),
        }
    }
}
