use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    compose::{compositor::Compositor, photo::PhotoSource},
    config::ComposeConfig,
    encode::{
        artifact::{ComposeReport, CompositeArtifact},
        png::encode_png,
    },
    foundation::error::{PhotoboothError, PhotoboothResult},
    layout::kind::LayoutKind,
    segment::segment_template,
    template::{loader::load_template, source::TemplateSource},
};

/// Shared flag for aborting an in-flight compose.
///
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn check(&self) -> PhotoboothResult<()> {
        if self.is_cancelled() {
            Err(PhotoboothError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Inputs of one compose call.
#[derive(Clone, Debug)]
pub struct ComposeRequest {
    /// Template graphic.
    pub template: TemplateSource,
    /// Layout family; fixes the output size.
    pub layout: LayoutKind,
    /// Style identifier, used to pick the fallback palette.
    pub style: String,
    /// Photos in capture order.
    pub photos: Vec<PhotoSource>,
}

/// Composites photos into templates with a fixed configuration.
///
/// A session holds no per-call state; every [`ComposeSession::compose`] starts from a freshly
/// loaded template.
#[derive(Clone, Debug, Default)]
pub struct ComposeSession {
    cfg: ComposeConfig,
    cancel: CancelToken,
}

impl ComposeSession {
    /// Create a session after validating `cfg`.
    pub fn new(cfg: ComposeConfig) -> PhotoboothResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            cancel: CancelToken::new(),
        })
    }

    /// Attach a cancellation token, checked after template load and before each slot.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Session configuration.
    pub fn config(&self) -> &ComposeConfig {
        &self.cfg
    }

    /// Load, segment, fill and encode.
    ///
    /// Template and photo problems degrade (fallback template, placeholder slot) instead of
    /// failing; only encoding and cancellation are errors. Same inputs give byte-identical PNGs.
    #[tracing::instrument(skip_all, fields(layout = %req.layout, style = %req.style, photos = req.photos.len()))]
    pub fn compose(&self, req: &ComposeRequest) -> PhotoboothResult<CompositeArtifact> {
        let loaded = load_template(&req.template, req.layout, &req.style, &self.cfg);
        self.cancel.check()?;

        let mut buffer = loaded.buffer;
        let (mask, slots) = segment_template(&buffer, &self.cfg);
        if slots.len() != req.layout.slot_count() {
            tracing::debug!(
                detected = slots.len(),
                expected = req.layout.slot_count(),
                "slot count differs from layout"
            );
        }

        let slot_reports = Compositor::new(&self.cfg)
            .with_cancel(&self.cancel)
            .fill(&mut buffer, &mask, &slots, &req.photos)?;

        let png = encode_png(&buffer)?;
        let (width, height) = buffer.dimensions();
        tracing::info!(
            width,
            height,
            slots = slot_reports.len(),
            bytes = png.len(),
            fallback = loaded.origin.is_fallback(),
            "composite ready"
        );

        Ok(CompositeArtifact {
            width,
            height,
            png,
            origin: loaded.origin.clone(),
            report: ComposeReport {
                layout: req.layout,
                style: req.style.clone(),
                width,
                height,
                origin: loaded.origin,
                photos_supplied: req.photos.len(),
                slots: slot_reports,
            },
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
