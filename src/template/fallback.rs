use crate::{config::ComposeConfig, foundation::color::Rgba8};

/// Background/border colors of the synthesized fallback template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylePalette {
    /// Top color of the vertical gradient.
    pub background: Rgba8,
    /// Border stroke color.
    pub border: Rgba8,
}

impl StylePalette {
    /// Pick a palette by case-insensitive substring match on the style identifier.
    ///
    /// Recognized families are `vintage`, `modern` and `retro`; anything else gets the default
    /// amber palette.
    pub fn for_style(style: &str) -> Self {
        let style = style.to_ascii_lowercase();
        if style.contains("vintage") {
            Self {
                background: Rgba8::rgb(0xf3, 0xe8, 0xd0),
                border: Rgba8::rgb(0x8b, 0x45, 0x13),
            }
        } else if style.contains("modern") {
            Self {
                background: Rgba8::rgb(0xff, 0xff, 0xff),
                border: Rgba8::rgb(0x6b, 0x72, 0x80),
            }
        } else if style.contains("retro") {
            Self {
                background: Rgba8::rgb(0xfe, 0xf3, 0xc7),
                border: Rgba8::rgb(0xdc, 0x26, 0x26),
            }
        } else {
            Self {
                background: Rgba8::rgb(0xfe, 0xf3, 0xc7),
                border: Rgba8::rgb(0x92, 0x40, 0x0e),
            }
        }
    }
}

/// Synthesize the degraded-mode template: a top-to-bottom gradient with a solid border.
///
/// The result contains no key-colored pixels, so it composes as a pass-through.
pub fn synthesize_fallback(
    width: u32,
    height: u32,
    style: &str,
    cfg: &ComposeConfig,
) -> image::RgbaImage {
    let palette = StylePalette::for_style(style);
    let border = cfg.fallback_border_px;
    let mut img = image::RgbaImage::new(width, height);

    for y in 0..height {
        let t = (y as f32 + 0.5) / height as f32;
        let row = palette
            .background
            .lerp(cfg.fallback_gradient_end, t)
            .to_pixel();
        let edge_row = y < border || y >= height.saturating_sub(border);
        for x in 0..width {
            let on_border = edge_row || x < border || x >= width.saturating_sub(border);
            let px = if on_border {
                palette.border.to_pixel()
            } else {
                row
            };
            img.put_pixel(x, y, px);
        }
    }

    img
}

#[cfg(test)]
#[path = "../../tests/unit/template/fallback.rs"]
mod tests;
