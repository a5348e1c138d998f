use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Output width shared by every layout.
pub const OUTPUT_WIDTH: u32 = 350;

/// Template family; fixes the slot count and the output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayoutKind {
    /// One photo.
    #[serde(rename = "1x1")]
    Single,
    /// Two stacked photos.
    #[serde(rename = "1x2")]
    Double,
    /// Three stacked photos.
    #[serde(rename = "1x3")]
    Triple,
    /// Classic four-photo vertical strip.
    #[serde(rename = "1x4")]
    FourStrip,
}

impl LayoutKind {
    /// All layouts, smallest first.
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Single,
        LayoutKind::Double,
        LayoutKind::Triple,
        LayoutKind::FourStrip,
    ];

    /// Number of photo slots the layout's templates carry.
    pub fn slot_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::FourStrip => 4,
        }
    }

    /// Output `(width, height)` in pixels.
    ///
    /// Each extra row adds 225 px to the 300 px single-photo card.
    pub fn target_size(self) -> (u32, u32) {
        let extra_rows = self.slot_count() as u32 - 1;
        (OUTPUT_WIDTH, 300 + 225 * extra_rows)
    }

    /// Short grid code (`1x1` .. `1x4`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Single => "1x1",
            Self::Double => "1x2",
            Self::Triple => "1x3",
            Self::FourStrip => "1x4",
        }
    }

    /// Resolve a booth template id such as `1x4-strip` by its grid prefix.
    pub fn from_template_id(id: &str) -> PhotoboothResult<Self> {
        let code = id.trim().split('-').next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| PhotoboothError::validation(format!("unknown layout for '{id}'")))
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LayoutKind {
    type Err = PhotoboothError;

    /// Accepts grid codes (`1x3`), names (`single`, `double`, `triple`, `strip`) and template
    /// ids (`1x3-kawaii`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" | "duo" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            "strip" | "four-strip" => Ok(Self::FourStrip),
            other => Self::from_template_id(other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/kind.rs"]
mod tests;
