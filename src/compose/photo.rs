use std::path::PathBuf;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// An encoded user photo. The engine only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoSource {
    /// `data:image/...;base64,...` URI as produced by a browser capture.
    DataUri(String),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// Image file on disk.
    Path(PathBuf),
}

impl PhotoSource {
    /// Classify a textual reference: strings starting with `data:` are data URIs, anything else
    /// is a path.
    pub fn from_reference(reference: &str) -> Self {
        if reference.trim_start().starts_with("data:") {
            Self::DataUri(reference.trim().to_string())
        } else {
            Self::Path(PathBuf::from(reference))
        }
    }

    fn encoded_bytes(&self) -> PhotoboothResult<Vec<u8>> {
        match self {
            Self::DataUri(uri) => decode_data_uri(uri),
            Self::Bytes(b) => Ok(b.clone()),
            Self::Path(p) => std::fs::read(p)
                .with_context(|| format!("read photo '{}'", p.display()))
                .map_err(PhotoboothError::from),
        }
    }
}

/// Decode a photo into a fresh straight-RGBA8 buffer.
pub fn decode_photo(source: &PhotoSource) -> PhotoboothResult<image::RgbaImage> {
    let bytes = source.encoded_bytes()?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| PhotoboothError::decode(format!("decode photo: {e}")))?;
    Ok(img.to_rgba8())
}

/// Extract the payload of a base64 `data:` URI.
pub(crate) fn decode_data_uri(uri: &str) -> PhotoboothResult<Vec<u8>> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PhotoboothError::decode("data uri must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PhotoboothError::decode("data uri has no ',' separator"))?;
    if !meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(PhotoboothError::decode(
            "only base64-encoded data uris are supported",
        ));
    }

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| PhotoboothError::decode(format!("data uri payload: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/photo.rs"]
mod tests;
