use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::color::Rgba8,
    foundation::core::Padding,
    foundation::error::{PhotoboothError, PhotoboothResult},
    segment::predicate::SlotColorPredicate,
};

/// Resampling filter used when stretching a photo onto its slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Bilinear sampling.
    #[default]
    Triangle,
    /// Catmull-Rom cubic sampling.
    CatmullRom,
    /// Lanczos with a window of 3.
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Tunables for one compositing session.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Per-pixel chroma-key test identifying slot pixels.
    pub predicate: SlotColorPredicate,
    /// Components smaller than this in both dimensions are treated as noise.
    ///
    /// Only fragments small in BOTH directions are dropped, so a 1 px anti-aliased seam at least
    /// this long still becomes a slot and consumes the next photo. Set
    /// [`ComposeConfig::min_slot_area`] for art that has such seams.
    pub min_slot_size: u32,
    /// Components with fewer key pixels than this are treated as noise; `0` disables the check.
    pub min_slot_area: usize,
    /// Expansion applied to each detected slot rectangle.
    pub padding: Padding,
    /// Fill used for slots without a photo.
    pub placeholder: Rgba8,
    /// Filter used to stretch photos onto slots.
    pub photo_filter: ResizeFilter,
    /// Upper bound on template load time before falling back, in milliseconds.
    pub template_timeout_ms: u64,
    /// Bottom color of the fallback gradient.
    pub fallback_gradient_end: Rgba8,
    /// Width of the fallback border stroke in pixels.
    pub fallback_border_px: u32,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            predicate: SlotColorPredicate::default(),
            min_slot_size: 10,
            min_slot_area: 0,
            padding: Padding::default(),
            placeholder: Rgba8::rgb(180, 180, 180),
            photo_filter: ResizeFilter::default(),
            template_timeout_ms: 10_000,
            fallback_gradient_end: Rgba8::rgb(0xfe, 0xd7, 0xaa),
            fallback_border_px: 8,
        }
    }
}

impl ComposeConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PhotoboothResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PhotoboothError::serde(format!("parse compose config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PhotoboothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotoboothError::validation(format!("open compose config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would make compositing meaningless.
    pub fn validate(&self) -> PhotoboothResult<()> {
        if self.min_slot_size == 0 {
            return Err(PhotoboothError::validation("min_slot_size must be > 0"));
        }
        if self.template_timeout_ms == 0 {
            return Err(PhotoboothError::validation(
                "template_timeout_ms must be > 0",
            ));
        }
        self.predicate.validate()
    }

    /// Template load deadline as a [`Duration`].
    pub fn template_timeout(&self) -> Duration {
        Duration::from_millis(self.template_timeout_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
