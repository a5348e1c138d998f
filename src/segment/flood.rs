use serde::{Deserialize, Serialize};

use crate::{
    config::ComposeConfig,
    foundation::core::{Padding, SlotRect},
    segment::predicate::KeyMask,
};

/// A detected placeholder region of the template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Position in row-major discovery order, counted over surviving slots only.
    pub index: usize,
    /// Padded and clamped rectangle used for substitution.
    pub rect: SlotRect,
    /// Tight bounding box of the connected key-colored component.
    pub bounds: SlotRect,
    /// Number of key pixels in the component.
    pub pixel_count: usize,
}

/// Segmentation knobs, usually taken from a [`ComposeConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentOpts {
    /// Components smaller than this in both dimensions are dropped.
    pub min_slot_size: u32,
    /// Components with fewer key pixels than this are dropped; `0` disables the check.
    pub min_slot_area: usize,
    /// Expansion applied to surviving components.
    pub padding: Padding,
}

impl SegmentOpts {
    /// Extract segmentation settings from a session config.
    pub fn from_config(cfg: &ComposeConfig) -> Self {
        Self {
            min_slot_size: cfg.min_slot_size,
            min_slot_area: cfg.min_slot_area,
            padding: cfg.padding,
        }
    }
}

impl Default for SegmentOpts {
    fn default() -> Self {
        Self::from_config(&ComposeConfig::default())
    }
}

/// Find slots as 4-connected components of the key mask.
///
/// Components are numbered in the row-major order of their first pixel, so slot 0 is the
/// topmost (then leftmost) region. The fill uses an explicit stack over a visited bitmap and
/// never recurses.
#[tracing::instrument(skip_all, fields(width = mask.width(), height = mask.height()))]
pub fn find_slots(mask: &KeyMask, opts: &SegmentOpts) -> Vec<Slot> {
    let (width, height) = (mask.width(), mask.height());
    let mut visited = vec![false; width as usize * height as usize];
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut slots = Vec::new();
    let mut dropped = 0usize;

    for y in 0..height {
        for x in 0..width {
            let idx = mask.index(x, y);
            if visited[idx] || !mask.bit(idx) {
                continue;
            }

            let (bounds, pixel_count) = fill_component(mask, x, y, &mut visited, &mut stack);
            let undersized =
                bounds.width() < opts.min_slot_size && bounds.height() < opts.min_slot_size;
            if undersized || pixel_count < opts.min_slot_area {
                dropped += 1;
                continue;
            }

            let rect = bounds.padded(opts.padding, width, height);
            tracing::debug!(
                index = slots.len(),
                min_x = rect.min_x,
                min_y = rect.min_y,
                max_x = rect.max_x,
                max_y = rect.max_y,
                pixel_count,
                "slot detected"
            );
            slots.push(Slot {
                index: slots.len(),
                rect,
                bounds,
                pixel_count,
            });
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "ignored undersized key-colored fragments");
    }
    slots
}

fn fill_component(
    mask: &KeyMask,
    seed_x: u32,
    seed_y: u32,
    visited: &mut [bool],
    stack: &mut Vec<(u32, u32)>,
) -> (SlotRect, usize) {
    let (width, height) = (mask.width(), mask.height());
    let mut bounds = SlotRect::at(seed_x, seed_y);
    let mut count = 0usize;

    stack.clear();
    visited[mask.index(seed_x, seed_y)] = true;
    stack.push((seed_x, seed_y));

    while let Some((x, y)) = stack.pop() {
        count += 1;
        bounds.include(x, y);

        let mut visit = |nx: u32, ny: u32| {
            let n = mask.index(nx, ny);
            if !visited[n] && mask.bit(n) {
                visited[n] = true;
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    (bounds, count)
}

#[cfg(test)]
#[path = "../../tests/unit/segment/flood.rs"]
mod tests;
