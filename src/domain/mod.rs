// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core album rules with no UI or I/O dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//!
//! # Modules
//!
//! - [`catalog`]: Album content ([`PhotoRecord`](catalog::PhotoRecord),
//!   [`StoryRecord`](catalog::StoryRecord), [`CategoryFilter`](catalog::CategoryFilter))
//! - [`gate`]: The password gate ([`Gate`](gate::Gate))
//! - [`newtypes`]: Clamped values ([`ZoomScale`](newtypes::ZoomScale),
//!   [`ProximityThreshold`](newtypes::ProximityThreshold),
//!   [`CacheCapacity`](newtypes::CacheCapacity), [`BufferCapacity`](newtypes::BufferCapacity))

pub mod catalog;
pub mod gate;
pub mod newtypes;

pub use catalog::{Catalog, CategoryFilter, EventDetails, PhotoCategory, PhotoRecord, StoryRecord};
pub use gate::{Gate, GateError, Unlock};
pub use newtypes::{BufferCapacity, CacheCapacity, ProximityThreshold, ZoomScale};
