use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{PhotoboothError, PhotoboothResult},
    layout::kind::LayoutKind,
};

/// A selectable style of one layout, backed by a template asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStyle {
    /// Style identifier, e.g. `1x3-kawaii`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Template asset path relative to the assets root.
    pub asset: String,
}

/// One layout offered by the booth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLayout {
    /// Template identifier, e.g. `1x4-strip`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Layout family.
    pub layout: LayoutKind,
    /// Available styles.
    pub styles: Vec<CatalogStyle>,
}

/// Catalog of layouts and styles the booth offers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    /// Layouts in presentation order.
    pub layouts: Vec<CatalogLayout>,
}

/// Output of [`TemplateCatalog::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Layout family of the chosen template.
    pub layout: LayoutKind,
    /// Normalized relative path of the template asset.
    pub asset: String,
    /// Style identifier, forwarded to the fallback palette.
    pub style: String,
}

impl TemplateCatalog {
    /// Parse a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PhotoboothResult<Self> {
        let cat: Self = serde_json::from_reader(r)
            .map_err(|e| PhotoboothError::serde(format!("parse template catalog JSON: {e}")))?;
        cat.validate()?;
        Ok(cat)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PhotoboothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotoboothError::validation(format!("open template catalog '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ids are unique per level and every asset path is a safe relative path.
    pub fn validate(&self) -> PhotoboothResult<()> {
        let mut seen = std::collections::HashSet::new();
        for l in &self.layouts {
            if !seen.insert(l.id.as_str()) {
                return Err(PhotoboothError::validation(format!(
                    "duplicate template id '{}'",
                    l.id
                )));
            }
            let mut styles = std::collections::HashSet::new();
            for s in &l.styles {
                if !styles.insert(s.id.as_str()) {
                    return Err(PhotoboothError::validation(format!(
                        "duplicate style id '{}' in template '{}'",
                        s.id, l.id
                    )));
                }
                normalize_rel_path(&s.asset)?;
            }
        }
        Ok(())
    }

    /// Look up a template layout by id.
    pub fn layout(&self, template_id: &str) -> PhotoboothResult<&CatalogLayout> {
        self.layouts
            .iter()
            .find(|l| l.id == template_id)
            .ok_or_else(|| PhotoboothError::validation(format!("unknown template '{template_id}'")))
    }

    /// Resolve `(template_id, style_id)` to a layout kind and template asset path.
    pub fn resolve(&self, template_id: &str, style_id: &str) -> PhotoboothResult<ResolvedTemplate> {
        let layout = self.layout(template_id)?;
        let style = layout
            .styles
            .iter()
            .find(|s| s.id == style_id)
            .ok_or_else(|| {
                PhotoboothError::validation(format!(
                    "unknown style '{style_id}' for template '{template_id}'"
                ))
            })?;
        Ok(ResolvedTemplate {
            layout: layout.layout,
            asset: normalize_rel_path(&style.asset)?,
            style: style.id.clone(),
        })
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        fn style(id: &str, name: &str, asset: &str) -> CatalogStyle {
            CatalogStyle {
                id: id.to_string(),
                name: name.to_string(),
                asset: asset.to_string(),
            }
        }

        Self {
            layouts: vec![
                CatalogLayout {
                    id: "1x1-classic".to_string(),
                    name: "Classic Single".to_string(),
                    layout: LayoutKind::Single,
                    styles: vec![
                        style("1x1-vintage", "Vintage Frame", "template/Classic Single.png"),
                        style("1x1-modern", "Modern Clean", "template/Classic Single.png"),
                        style("1x1-retro", "Retro Pop", "template/Classic Single.png"),
                        style("1x1-scrapbook", "Scrapbook Style", "template/Classic Single.png"),
                    ],
                },
                CatalogLayout {
                    id: "1x2-duo".to_string(),
                    name: "Double Take".to_string(),
                    layout: LayoutKind::Double,
                    styles: vec![
                        style("1x2-classic", "Classic Strip", "template/Double Take.png"),
                        style("1x2-polaroid", "Polaroid Style", "template/Double Take.png"),
                        style("1x2-film", "Film Negative", "template/Double Take.png"),
                        style("1x2-scrapbook", "Scrapbook Style", "template/Double Take.png"),
                    ],
                },
                CatalogLayout {
                    id: "1x3-triple".to_string(),
                    name: "Triple Charm".to_string(),
                    layout: LayoutKind::Triple,
                    styles: vec![
                        style("1x3-plain", "Plain Triple", "template/triple/Plain.png"),
                        style("1x3-kawaii", "Kawaii Theme", "template/triple/Kawaii.png"),
                        style("1x3-halloween", "Halloween (Boo)", "template/triple/Boo.png"),
                        style("1x3-vintage", "Vintage Theme", "template/triple/Vintage.png"),
                    ],
                },
                CatalogLayout {
                    id: "1x4-strip".to_string(),
                    name: "Photo Strip".to_string(),
                    layout: LayoutKind::FourStrip,
                    styles: vec![
                        style("1x4-Plain", "Plain Strip", "template/Quadruple/Plain.png"),
                        style("1x4-vintage", "Scrapbook Style", "template/Quadruple/Scrapbook.png"),
                        style("1x4-groovy", "Groovy Style", "template/Quadruple/Groovy.png"),
                    ],
                },
            ],
        }
    }
}

/// Keep the first `layout.slot_count()` photos, the booth's default selection.
pub fn select_photos<T: Clone>(photos: &[T], layout: LayoutKind) -> Vec<T> {
    photos.iter().take(layout.slot_count()).cloned().collect()
}

/// Canonical form of a catalog asset path: `/`-separated, relative to the assets root.
///
/// Backslashes are treated as separators and empty or `.` segments are dropped. Rooted paths,
/// drive prefixes and `..` segments are rejected so a catalog can never point outside its root.
pub fn normalize_rel_path(asset: &str) -> PhotoboothResult<String> {
    let unified = asset.trim().replace('\\', "/");
    if unified.starts_with('/') || unified.split('/').next().is_some_and(|s| s.ends_with(':')) {
        return Err(PhotoboothError::validation(format!(
            "catalog asset '{asset}' must be relative to the assets root"
        )));
    }

    let segments: Vec<&str> = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();
    if segments.contains(&"..") {
        return Err(PhotoboothError::validation(format!(
            "catalog asset '{asset}' escapes the assets root"
        )));
    }
    if segments.is_empty() {
        return Err(PhotoboothError::validation(format!(
            "catalog asset '{asset}' names no file"
        )));
    }
    Ok(segments.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/catalog.rs"]
mod tests;
