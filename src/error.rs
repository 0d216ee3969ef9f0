// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
    Network(String),
    Image(String),
}

/// Problems found while validating the album catalog.
/// Used to provide user-friendly, localized warnings at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two photos share the same identifier.
    DuplicatePhotoId(u32),

    /// Two story moments share the same identifier.
    DuplicateStoryId(u32),

    /// A record has an empty image locator.
    MissingImageUrl(u32),
}

impl CatalogError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CatalogError::DuplicatePhotoId(_) => "error-catalog-duplicate-photo",
            CatalogError::DuplicateStoryId(_) => "error-catalog-duplicate-story",
            CatalogError::MissingImageUrl(_) => "error-catalog-missing-url",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicatePhotoId(id) => write!(f, "Duplicate photo id: {}", id),
            CatalogError::DuplicateStoryId(id) => write!(f, "Duplicate story id: {}", id),
            CatalogError::MissingImageUrl(id) => write!(f, "Record {} has no image url", id),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_parse_error_becomes_config_error() {
        let parsed: std::result::Result<toml::Value, toml::de::Error> = toml::from_str("a = [");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn catalog_error_keys_and_display() {
        let err = CatalogError::DuplicatePhotoId(7);
        assert_eq!(err.i18n_key(), "error-catalog-duplicate-photo");
        assert!(format!("{}", Error::from(err)).contains('7'));
    }
}
