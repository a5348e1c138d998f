use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use serde::Serialize;

use crate::{
    compose::compositor::SlotReport,
    foundation::error::{PhotoboothError, PhotoboothResult},
    layout::kind::LayoutKind,
    template::loader::TemplateOrigin,
};

/// Summary of one compose call, serializable for `--report`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComposeReport {
    /// Requested layout.
    pub layout: LayoutKind,
    /// Requested style identifier.
    pub style: String,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Whether the template was decoded or synthesized.
    pub origin: TemplateOrigin,
    /// Number of photos in the request.
    pub photos_supplied: usize,
    /// Slots in discovery order with their fill outcome.
    pub slots: Vec<SlotReport>,
}

impl ComposeReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> PhotoboothResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PhotoboothError::serde(e.to_string()))
    }
}

/// The encoded result of one compose call.
#[derive(Clone, Debug)]
pub struct CompositeArtifact {
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
    /// How the template was obtained.
    pub origin: TemplateOrigin,
    /// Per-slot details.
    pub report: ComposeReport,
}

impl CompositeArtifact {
    /// `data:image/png;base64,...` form for embedding.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }

    /// Write the PNG to `path`, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<Path>) -> PhotoboothResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .with_context(|| format!("write composite '{}'", path.display()))?;
        Ok(())
    }

    /// Suggested download name, `"{prefix}-{unix_millis}.png"`.
    pub fn download_file_name(prefix: &str, unix_millis: u128) -> String {
        format!("{prefix}-{unix_millis}.png")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/artifact.rs"]
mod tests;
