// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! This module captures diagnostic events during an album session (gate
//! attempts, gallery navigation, lightbox gestures, download outcomes),
//! stores them in a memory-bounded circular buffer, and exports them as a
//! JSON report that can be copied to the clipboard.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the buffer and drains the event channel
//! - [`DiagnosticsHandle`]: Cheap, cloneable, non-blocking sender
//!
//! # Privacy
//!
//! Gate input is never logged, only whether an attempt succeeded.

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::CircularBuffer;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, UserAction};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};

pub use crate::domain::BufferCapacity;
