use serde::{Deserialize, Serialize};

/// Inclusive pixel rectangle in template coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRect {
    /// Leftmost column (inclusive).
    pub min_x: u32,
    /// Topmost row (inclusive).
    pub min_y: u32,
    /// Rightmost column (inclusive).
    pub max_x: u32,
    /// Bottom row (inclusive).
    pub max_y: u32,
}

impl SlotRect {
    /// Single-pixel rectangle at `(x, y)`.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow the rectangle so it contains `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width in pixels (`max_x - min_x + 1`).
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels (`max_y - min_y + 1`).
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Whether `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Expand by `pad` on each side, clamped to a `width` x `height` buffer.
    pub fn padded(self, pad: Padding, width: u32, height: u32) -> Self {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        Self {
            min_x: self.min_x.saturating_sub(pad.left),
            min_y: self.min_y.saturating_sub(pad.top),
            max_x: self.max_x.saturating_add(pad.right).min(max_x),
            max_y: self.max_y.saturating_add(pad.bottom).min(max_y),
        }
    }

    /// Whether two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// Per-side padding applied to detected slot rectangles.
///
/// Sides missing from JSON keep their default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Columns added on the left.
    pub left: u32,
    /// Rows added on top.
    pub top: u32,
    /// Columns added on the right.
    pub right: u32,
    /// Rows added at the bottom.
    pub bottom: u32,
}

impl Default for Padding {
    fn default() -> Self {
        // Anti-aliased key edges bleed further on the left/top/bottom of the template art.
        Self {
            left: 3,
            top: 3,
            right: 1,
            bottom: 3,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
