use super::*;
use crate::segment::predicate::{KeyMask, SlotColorPredicate};

#[test]
fn palette_matches_style_families_by_substring() {
    assert_eq!(
        StylePalette::for_style("1x3-Vintage").border,
        Rgba8::rgb(0x8b, 0x45, 0x13)
    );
    assert_eq!(
        StylePalette::for_style("1x1-modern").background,
        Rgba8::rgb(0xff, 0xff, 0xff)
    );
    assert_eq!(
        StylePalette::for_style("retro-pop").border,
        Rgba8::rgb(0xdc, 0x26, 0x26)
    );
    assert_eq!(
        StylePalette::for_style("1x4-groovy").border,
        Rgba8::rgb(0x92, 0x40, 0x0e)
    );
}

#[test]
fn fallback_has_border_and_gradient() {
    let cfg = ComposeConfig::default();
    let img = synthesize_fallback(350, 300, "1x1-modern", &cfg);
    assert_eq!(img.dimensions(), (350, 300));

    let border = image::Rgba([0x6b, 0x72, 0x80, 255]);
    assert_eq!(*img.get_pixel(0, 0), border);
    assert_eq!(*img.get_pixel(7, 150), border);
    assert_eq!(*img.get_pixel(349, 150), border);
    assert_eq!(*img.get_pixel(175, 299), border);
    assert_ne!(*img.get_pixel(8, 150), border);

    // Interior goes from near-white at the top towards #fed7aa at the bottom.
    let top = img.get_pixel(175, 8);
    let bottom = img.get_pixel(175, 291);
    assert!(top[2] > bottom[2]);
    assert!(top[2] > 240);
    assert!(bottom[2] < 0xb8);
}

#[test]
fn fallback_never_contains_key_pixels() {
    let cfg = ComposeConfig::default();
    for style in ["vintage", "modern", "retro", "anything"] {
        let img = synthesize_fallback(350, 975, style, &cfg);
        let mask = KeyMask::build(&img, &SlotColorPredicate::default());
        assert_eq!(mask.count(), 0, "style {style}");
    }
}
