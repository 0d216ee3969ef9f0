// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`gallery`]: The filtered photo sequence and the shared selection index
//! - [`download`]: The busy-guarded album download workflow
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Presentation layer (`ui`, `app`) drives these services and owns
//!   everything asynchronous (timers, dialogs, transfers)

pub mod download;
pub mod gallery;

pub use download::{DownloadAction, DownloadOutcome, DownloadPhase};
pub use gallery::{Direction, GalleryError, GalleryFilter};
