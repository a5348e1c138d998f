use std::{sync::mpsc, time::Duration};

use serde::Serialize;

use crate::{
    config::ComposeConfig,
    foundation::error::{PhotoboothError, PhotoboothResult},
    layout::kind::LayoutKind,
    template::{
        fallback::synthesize_fallback,
        source::{TemplateSource, decode_template_with_resources},
    },
};

/// How the template buffer was obtained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateOrigin {
    /// Decoded from the requested source.
    Decoded,
    /// Synthesized because the source could not be loaded in time.
    Fallback {
        /// Human-readable cause.
        reason: String,
    },
}

impl TemplateOrigin {
    /// `true` for [`TemplateOrigin::Fallback`].
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// A template raster at the layout's output resolution.
#[derive(Clone, Debug)]
pub struct LoadedTemplate {
    /// Straight RGBA8 pixels, exactly `layout.target_size()`.
    pub buffer: image::RgbaImage,
    /// Whether this is the requested graphic or the fallback.
    pub origin: TemplateOrigin,
}

/// Load `source` at `layout`'s resolution, bounded by `cfg.template_timeout_ms`.
///
/// Never fails: a source that cannot be read, decoded or loaded in time yields the synthesized
/// fallback for `style` and the reason is recorded in [`LoadedTemplate::origin`].
#[tracing::instrument(skip(source, cfg), fields(source = %source.describe()))]
pub fn load_template(
    source: &TemplateSource,
    layout: LayoutKind,
    style: &str,
    cfg: &ComposeConfig,
) -> LoadedTemplate {
    let (width, height) = layout.target_size();
    let timeout = cfg.template_timeout();
    let source = source.clone();

    let loaded = load_with_deadline(timeout, move || {
        let bytes = source.read_bytes(timeout)?;
        decode_template_with_resources(&bytes, width, height, source.resources_dir())
    });

    match loaded {
        Ok(buffer) => LoadedTemplate {
            buffer,
            origin: TemplateOrigin::Decoded,
        },
        Err(err) => {
            tracing::warn!(error = %err, "template unavailable, using fallback");
            LoadedTemplate {
                buffer: synthesize_fallback(width, height, style, cfg),
                origin: TemplateOrigin::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}

/// Run `job` on a worker thread and wait at most `timeout` for its result.
///
/// A job that overruns is abandoned; its result is dropped when it eventually completes.
pub(crate) fn load_with_deadline<F>(
    timeout: Duration,
    job: F,
) -> PhotoboothResult<image::RgbaImage>
where
    F: FnOnce() -> PhotoboothResult<image::RgbaImage> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("template-load".to_string())
        .spawn(move || {
            let _ = tx.send(job());
        })
        .map_err(|e| PhotoboothError::Other(anyhow::anyhow!("spawn template loader: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(res) => res,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(PhotoboothError::decode(format!(
            "template load timed out after {} ms",
            timeout.as_millis()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(PhotoboothError::decode("template loader exited without a result"))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/loader.rs"]
mod tests;
