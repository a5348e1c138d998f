//! Photobooth template compositing.
//!
//! A template is a decorative frame whose photo slots are painted in flat, saturated green. The
//! engine finds those slots by color segmentation and replaces their key-colored pixels with
//! user photos, leaving the frame art untouched:
//!
//! - Describe the job with a [`ComposeRequest`]
//! - Run it through a [`ComposeSession`]
//! - Take the PNG from the returned [`CompositeArtifact`]
//!
//! Templates that cannot be loaded are replaced by a synthesized gradient, and photos that
//! cannot be decoded leave a gray placeholder, so a compose call only fails on encoding or
//! cancellation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod segment;
pub(crate) mod template;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Padding, SlotRect};
pub use crate::foundation::error::{PhotoboothError, PhotoboothResult};

pub use crate::compose::assign::{SlotAssignment, SlotFill, assign_photos};
pub use crate::compose::compositor::{Compositor, SlotOutcome, SlotReport};
pub use crate::compose::photo::{PhotoSource, decode_photo};
pub use crate::config::{ComposeConfig, ResizeFilter};
pub use crate::encode::artifact::{ComposeReport, CompositeArtifact};
pub use crate::encode::png::encode_png;
pub use crate::layout::catalog::{
    CatalogLayout, CatalogStyle, ResolvedTemplate, TemplateCatalog, normalize_rel_path,
    select_photos,
};
pub use crate::layout::kind::{LayoutKind, OUTPUT_WIDTH};
pub use crate::pipeline::{CancelToken, ComposeRequest, ComposeSession};
pub use crate::segment::flood::{SegmentOpts, Slot, find_slots};
pub use crate::segment::predicate::{KeyMask, SlotColorPredicate};
pub use crate::segment::segment_template;
pub use crate::template::fallback::{StylePalette, synthesize_fallback};
pub use crate::template::loader::{LoadedTemplate, TemplateOrigin, load_template};
pub use crate::template::source::{TemplateSource, decode_template};
