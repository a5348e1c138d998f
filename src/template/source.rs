use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
    time::Duration,
};

use anyhow::Context;

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Where a template graphic comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Encoded image bytes (PNG, JPEG, SVG, ...).
    Bytes(Vec<u8>),
    /// File on disk.
    Path(PathBuf),
    /// `http(s)` URL; fetched only with the `remote` feature.
    Url(String),
}

impl TemplateSource {
    /// Classify a textual reference: `http://`/`https://` become [`TemplateSource::Url`],
    /// anything else is a file path.
    pub fn from_reference(reference: &str) -> Self {
        let lower = reference.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(reference.trim().to_string())
        } else {
            Self::Path(PathBuf::from(reference))
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }

    /// Directory searched for fonts next to an on-disk SVG template.
    pub(crate) fn resources_dir(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => p.parent(),
            _ => None,
        }
    }

    pub(crate) fn read_bytes(&self, timeout: Duration) -> PhotoboothResult<Vec<u8>> {
        match self {
            Self::Bytes(b) => Ok(b.clone()),
            Self::Path(p) => std::fs::read(p)
                .with_context(|| format!("read template bytes from '{}'", p.display()))
                .map_err(PhotoboothError::from),
            Self::Url(url) => fetch_url(url, timeout),
        }
    }
}

#[cfg(feature = "remote")]
fn fetch_url(url: &str, timeout: Duration) -> PhotoboothResult<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("build http client")?;
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("fetch template '{url}'"))?;
    if !resp.status().is_success() {
        return Err(PhotoboothError::decode(format!(
            "fetch template '{url}': HTTP {}",
            resp.status()
        )));
    }
    let bytes = resp
        .bytes()
        .with_context(|| format!("read template body '{url}'"))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch_url(url: &str, _timeout: Duration) -> PhotoboothResult<Vec<u8>> {
    Err(PhotoboothError::validation(format!(
        "template '{url}' is remote; build with the `remote` feature to fetch it"
    )))
}

/// Decode template bytes into straight RGBA8 at exactly `width` x `height`.
///
/// Rasters of another size are resized with nearest-neighbour sampling so key-colored regions
/// keep their exact color. SVG documents are rasterized directly at the target size.
pub fn decode_template(bytes: &[u8], width: u32, height: u32) -> PhotoboothResult<image::RgbaImage> {
    decode_template_with_resources(bytes, width, height, None)
}

/// [`decode_template`] that also loads fonts from `resources_dir` (and its `fonts/`
/// subdirectory) for SVG text.
pub(crate) fn decode_template_with_resources(
    bytes: &[u8],
    width: u32,
    height: u32,
    resources_dir: Option<&Path>,
) -> PhotoboothResult<image::RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PhotoboothError::validation(
            "template target size must be non-zero",
        ));
    }

    if looks_like_svg(bytes) {
        return rasterize_svg(bytes, width, height, resources_dir);
    }

    let rgba = image::load_from_memory(bytes)
        .map_err(|e| PhotoboothError::decode(format!("decode template image: {e}")))?
        .to_rgba8();

    if rgba.dimensions() == (width, height) {
        return Ok(rgba);
    }
    tracing::debug!(
        from_w = rgba.width(),
        from_h = rgba.height(),
        to_w = width,
        to_h = height,
        "resizing template to layout resolution"
    );
    Ok(image::imageops::resize(
        &rgba,
        width,
        height,
        image::imageops::FilterType::Nearest,
    ))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    // XML prolog, doctype and comments may precede the root element.
    head.starts_with('<') && head.contains("<svg")
}

fn rasterize_svg(
    bytes: &[u8],
    width: u32,
    height: u32,
    resources_dir: Option<&Path>,
) -> PhotoboothResult<image::RgbaImage> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: svg_fontdb(resources_dir),
        font_resolver: svg_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PhotoboothError::decode(format!("parse svg template: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PhotoboothError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| PhotoboothError::decode("svg pixmap size mismatch"))
}

/// System fonts are scanned once per process; template-local fonts are layered on a copy.
pub(crate) fn svg_fontdb(resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    static SYSTEM: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    let system = SYSTEM.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for svg templates");
        Arc::new(db)
    });

    let Some(dir) = resources_dir else {
        return Arc::clone(system);
    };
    let mut db = usvg::fontdb::Database::clone(system);
    db.load_fonts_dir(dir.join("fonts"));
    for entry in std::fs::read_dir(dir).into_iter().flatten().flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if is_font {
            let _ = db.load_font_file(&path);
        }
    }
    Arc::new(db)
}

/// Honor the requested families, then fall back to generic families and finally any face, so
/// frame lettering is never silently dropped.
fn svg_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<usvg::fontdb::Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                })
                .collect();
            families.extend([
                usvg::fontdb::Family::SansSerif,
                usvg::fontdb::Family::Serif,
            ]);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/source.rs"]
mod tests;
