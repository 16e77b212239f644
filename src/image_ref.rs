//! Self-describing image references
//!
//! Generated images travel through the application as `data:` URIs that pair
//! a declared media type with a base64 payload, so they can be displayed,
//! saved, or sent back to the image service without extra bookkeeping.

use crate::ai::mime::detect_image_mime;
use crate::{Error, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type assumed when a part or URI does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ImageRef {
    mime_type: String,
    data: String,
}

impl ImageRef {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            mime_type
        };
        Self {
            mime_type,
            data: data.into(),
        }
    }

    /// Encodes raw image bytes, sniffing the media type from the magic number.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(
            detect_image_mime(bytes),
            base64::engine::general_purpose::STANDARD.encode(bytes),
        )
    }

    /// Parses a `data:<mime>;base64,<payload>` URI.
    ///
    /// Input without the transport prefix is taken as a bare base64 payload of
    /// the default media type.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let Some(rest) = trimmed.strip_prefix("data:") else {
            return Self::new(DEFAULT_MIME_TYPE, trimmed);
        };
        match rest.split_once(',') {
            Some((header, payload)) => {
                let mime_type = header.split(';').next().unwrap_or_default();
                Self::new(mime_type, payload)
            }
            None => Self::new(DEFAULT_MIME_TYPE, rest),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload with the transport prefix stripped.
    pub fn payload(&self) -> &str {
        &self.data
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::Decode(format!("Invalid base64 image payload: {}", e)))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.to_data_uri()
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        ImageRef::parse(&value)
    }
}
