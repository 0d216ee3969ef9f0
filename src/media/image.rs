// SPDX-License-Identifier: MPL-2.0
//! Decoding of fetched image bytes (JPEG, PNG, GIF, WebP).

use crate::config::PLACEHOLDER_BLUR_SIGMA;
use crate::error::Result;
use iced::widget::image;
use image_rs::GenericImageView;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }
}

/// How decoded pixels are post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Shown as-is.
    Full,
    /// Low-resolution stand-in, blurred before display.
    Placeholder,
}

/// Decodes encoded bytes into RGBA pixels.
///
/// # Errors
///
/// Returns [`crate::error::Error::Image`] if the format is invalid or unsupported.
pub fn decode(bytes: &[u8], kind: ImageKind) -> Result<ImageData> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let rgba = match kind {
        ImageKind::Full => img.to_rgba8(),
        ImageKind::Placeholder => image_rs::imageops::blur(&img.to_rgba8(), PLACEHOLDER_BLUR_SIGMA),
    };

    Ok(ImageData::from_rgba(width, height, rgba.into_vec()))
}
