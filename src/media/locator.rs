// SPDX-License-Identifier: MPL-2.0
//! Image locator helpers.
//!
//! Album locators follow the `https://host/prefix/{width}/{height}?query`
//! shape. The two trailing path segments give the intrinsic size, which is
//! used to reserve layout space before the image arrives and to derive the
//! locator of a small placeholder.
//!
//! Nothing here panics: anything unparsable degrades to a square ratio or to
//! "no placeholder".

use crate::config::{LOW_RES_DIVISOR, LOW_RES_MIN_EDGE};
use reqwest::Url;

/// Intrinsic width/height pair of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const SQUARE: Self = Self {
        width: 1,
        height: 1,
    };

    /// Width divided by height.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Locator dimensions are small
    pub fn value(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Height of a box of the given width with this ratio.
    #[must_use]
    pub fn height_for(self, width: f32) -> f32 {
        width / self.value()
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

/// Parses the aspect ratio from the last two path segments.
///
/// Each segment contributes its leading digits. Returns
/// [`AspectRatio::SQUARE`] when there are fewer than two segments or either
/// one does not start with a positive integer.
#[must_use]
pub fn aspect_ratio(locator: &str) -> AspectRatio {
    dimensions(locator)
        .map(|(width, height)| AspectRatio { width, height })
        .unwrap_or_default()
}

/// Builds the locator of a reduced-size placeholder.
///
/// Both dimensions are divided by 20, rounded, and floored at 20 px. The
/// scheme, host, leading path and query string are preserved. Returns an
/// empty string when the locator has no parsable dimensions.
#[must_use]
pub fn low_res_url(locator: &str) -> String {
    low_res(locator).unwrap_or_default()
}

fn low_res(locator: &str) -> Option<String> {
    let (width, height) = dimensions(locator)?;
    let (width, height) = (reduced(width).to_string(), reduced(height).to_string());

    if let Ok(mut url) = Url::parse(locator) {
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop().pop();
            segments.push(&width);
            segments.push(&height);
        }
        return Some(url.into());
    }

    let (path, rest) = locator.split_at(path_end(locator));
    let mut segments = path.rsplitn(3, '/').skip(2);
    Some(match segments.next() {
        Some(prefix) => format!("{prefix}/{width}/{height}{rest}"),
        None => format!("{width}/{height}{rest}"),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn reduced(edge: u32) -> u32 {
    let scaled = (f64::from(edge) / f64::from(LOW_RES_DIVISOR)).round() as u32;
    scaled.max(LOW_RES_MIN_EDGE)
}

/// Absolute locators go through `Url`; relative ones are split by hand.
fn dimensions(locator: &str) -> Option<(u32, u32)> {
    let path = match Url::parse(locator) {
        Ok(url) => url.path().to_owned(),
        Err(_) => locator[..path_end(locator)].to_owned(),
    };
    let mut segments = path.rsplit('/');
    let height = parse_edge(segments.next()?)?;
    let width = parse_edge(segments.next()?)?;
    Some((width, height))
}

/// Offset where the query or fragment starts.
fn path_end(locator: &str) -> usize {
    locator
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(locator.len())
}

/// Reads the leading digits of a segment, so `600.jpg` gives 600.
fn parse_edge(segment: &str) -> Option<u32> {
    let digits = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..digits].parse::<u32>().ok().filter(|value| *value > 0)
}
