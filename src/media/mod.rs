// SPDX-License-Identifier: MPL-2.0
//! Album media: locator parsing, fetching, decoding, caching and the
//! lazy-loading state of gallery tiles.

pub mod cache;
pub mod fetch;
pub mod image;
pub mod loader;
pub mod locator;
pub mod tile;

pub use cache::{ImageCache, Lookup};
pub use image::{ImageData, ImageKind};
pub use loader::{FetchRequest, MediaLoader};
pub use locator::{aspect_ratio, low_res_url, AspectRatio};
pub use tile::{TileLoader, TileState};
