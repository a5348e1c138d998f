use serde::Serialize;

use crate::{
    compose::{
        assign::{SlotFill, assign_photos},
        photo::{PhotoSource, decode_photo},
    },
    config::ComposeConfig,
    foundation::{
        core::SlotRect,
        error::{PhotoboothError, PhotoboothResult},
    },
    pipeline::CancelToken,
    segment::{flood::Slot, predicate::KeyMask},
};

/// How one slot ended up being filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// Filled with the photo at `photo`.
    Photo {
        /// Index into the request's photo list.
        photo: usize,
    },
    /// No photo was assigned.
    Placeholder,
    /// A photo was assigned but could not be decoded; the slot holds the placeholder.
    DecodeFailed {
        /// Index into the request's photo list.
        photo: usize,
        /// Decoder message.
        error: String,
    },
}

/// Per-slot entry of a compose report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    /// Slot discovery index.
    pub index: usize,
    /// Substitution rectangle.
    pub rect: SlotRect,
    /// Key pixels actually written by this slot.
    pub pixels_written: usize,
    /// Fill result.
    pub outcome: SlotOutcome,
}

/// Writes photos and placeholders into the key-colored pixels of a template buffer.
#[derive(Clone, Debug)]
pub struct Compositor<'a> {
    cfg: &'a ComposeConfig,
    cancel: Option<&'a CancelToken>,
}

impl<'a> Compositor<'a> {
    /// Compositor using `cfg` for the placeholder color and photo resize filter.
    pub fn new(cfg: &'a ComposeConfig) -> Self {
        Self { cfg, cancel: None }
    }

    /// Check `cancel` before each slot.
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Fill every slot of `buffer`, in discovery order.
    ///
    /// `mask` must be the key mask of the template `buffer` was loaded as; substitution tests it
    /// rather than the buffer so photo content from an earlier slot is never re-keyed. Where
    /// padded rectangles overlap, the earlier slot keeps the pixel.
    #[tracing::instrument(skip_all, fields(slots = slots.len(), photos = photos.len()))]
    pub fn fill(
        &self,
        buffer: &mut image::RgbaImage,
        mask: &KeyMask,
        slots: &[Slot],
        photos: &[PhotoSource],
    ) -> PhotoboothResult<Vec<SlotReport>> {
        if buffer.dimensions() != (mask.width(), mask.height()) {
            return Err(PhotoboothError::validation(format!(
                "key mask is {}x{} but buffer is {}x{}",
                mask.width(),
                mask.height(),
                buffer.width(),
                buffer.height()
            )));
        }

        let mut claimed = vec![false; mask.width() as usize * mask.height() as usize];
        let mut reports = Vec::with_capacity(slots.len());

        for (slot, assignment) in slots.iter().zip(assign_photos(slots, photos.len())) {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(PhotoboothError::Cancelled);
            }

            let (pixels_written, outcome) = match assignment.fill {
                SlotFill::Photo(i) => match decode_photo(&photos[i]) {
                    Ok(photo) => {
                        let scaled = image::imageops::resize(
                            &photo,
                            slot.rect.width(),
                            slot.rect.height(),
                            self.cfg.photo_filter.to_image_filter(),
                        );
                        let n = paint(buffer, mask, &mut claimed, slot.rect, |dx, dy| {
                            *scaled.get_pixel(dx, dy)
                        });
                        (n, SlotOutcome::Photo { photo: i })
                    }
                    Err(err) => {
                        tracing::warn!(
                            slot = slot.index,
                            photo = i,
                            error = %err,
                            "photo decode failed, using placeholder"
                        );
                        let n = self.paint_placeholder(buffer, mask, &mut claimed, slot.rect);
                        (
                            n,
                            SlotOutcome::DecodeFailed {
                                photo: i,
                                error: err.to_string(),
                            },
                        )
                    }
                },
                SlotFill::Placeholder => {
                    let n = self.paint_placeholder(buffer, mask, &mut claimed, slot.rect);
                    (n, SlotOutcome::Placeholder)
                }
            };

            tracing::debug!(slot = slot.index, pixels_written, ?outcome, "slot filled");
            reports.push(SlotReport {
                index: slot.index,
                rect: slot.rect,
                pixels_written,
                outcome,
            });
        }

        Ok(reports)
    }

    fn paint_placeholder(
        &self,
        buffer: &mut image::RgbaImage,
        mask: &KeyMask,
        claimed: &mut [bool],
        rect: SlotRect,
    ) -> usize {
        let gray = self.cfg.placeholder.to_pixel();
        paint(buffer, mask, claimed, rect, |_, _| gray)
    }
}

/// Overwrite unclaimed key pixels of `rect` with `src(x - min_x, y - min_y)`.
fn paint<F>(
    buffer: &mut image::RgbaImage,
    mask: &KeyMask,
    claimed: &mut [bool],
    rect: SlotRect,
    src: F,
) -> usize
where
    F: Fn(u32, u32) -> image::Rgba<u8>,
{
    let mut written = 0;
    for y in rect.min_y..=rect.max_y {
        for x in rect.min_x..=rect.max_x {
            if !mask.is_key(x, y) {
                continue;
            }
            let idx = mask.index(x, y);
            if claimed[idx] {
                continue;
            }
            claimed[idx] = true;
            buffer.put_pixel(x, y, src(x - rect.min_x, y - rect.min_y));
            written += 1;
        }
    }
    written
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
