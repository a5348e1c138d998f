pub(crate) mod flood;
pub(crate) mod predicate;

use crate::{
    config::ComposeConfig,
    segment::flood::{SegmentOpts, Slot, find_slots},
    segment::predicate::KeyMask,
};

/// Classify `img` and detect its slots using the thresholds in `cfg`.
///
/// The returned mask is reused by the compositor so that substitution tests the template's own
/// key pixels, not pixels written by an earlier slot.
pub fn segment_template(img: &image::RgbaImage, cfg: &ComposeConfig) -> (KeyMask, Vec<Slot>) {
    let mask = KeyMask::build(img, &cfg.predicate);
    let slots = find_slots(&mask, &SegmentOpts::from_config(cfg));
    (mask, slots)
}
