use super::*;
use crate::segment::predicate::SlotColorPredicate;

const GREEN: image::Rgba<u8> = image::Rgba([0, 255, 0, 255]);
const WHITE: image::Rgba<u8> = image::Rgba([255, 255, 255, 255]);

fn paint(img: &mut image::RgbaImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, GREEN);
        }
    }
}

fn slots_of(img: &image::RgbaImage, opts: &SegmentOpts) -> Vec<Slot> {
    let mask = KeyMask::build(img, &SlotColorPredicate::default());
    find_slots(&mask, opts)
}

#[test]
fn no_key_pixels_means_no_slots() {
    let img = image::RgbaImage::from_pixel(50, 40, WHITE);
    assert!(slots_of(&img, &SegmentOpts::default()).is_empty());
}

#[test]
fn single_region_gets_tight_bounds_and_padding() {
    let mut img = image::RgbaImage::from_pixel(350, 300, WHITE);
    paint(&mut img, 100, 80, 100, 100);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 1);
    let s = slots[0];
    assert_eq!(s.index, 0);
    assert_eq!(s.pixel_count, 100 * 100);
    assert_eq!(
        s.bounds,
        SlotRect {
            min_x: 100,
            min_y: 80,
            max_x: 199,
            max_y: 179
        }
    );
    assert_eq!(
        s.rect,
        SlotRect {
            min_x: 97,
            min_y: 77,
            max_x: 200,
            max_y: 182
        }
    );
}

#[test]
fn undersized_fragments_are_ignored() {
    let mut img = image::RgbaImage::from_pixel(60, 60, WHITE);
    paint(&mut img, 2, 2, 3, 3);
    paint(&mut img, 20, 20, 30, 30);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].index, 0);
    assert_eq!(slots[0].bounds.min_x, 20);
}

#[test]
fn thin_but_long_component_survives() {
    let mut img = image::RgbaImage::from_pixel(60, 20, WHITE);
    paint(&mut img, 5, 5, 40, 2);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].bounds.width(), 40);
}

#[test]
fn slots_are_numbered_top_to_bottom_then_left_to_right() {
    let mut img = image::RgbaImage::from_pixel(200, 200, WHITE);
    // Bottom-left region painted first to make sure paint order does not matter.
    paint(&mut img, 10, 120, 40, 40);
    paint(&mut img, 120, 10, 40, 40);
    paint(&mut img, 10, 10, 40, 40);

    let slots = slots_of(&img, &SegmentOpts::default());
    let origins: Vec<(u32, u32)> = slots
        .iter()
        .map(|s| (s.bounds.min_x, s.bounds.min_y))
        .collect();
    assert_eq!(origins, vec![(10, 10), (120, 10), (10, 120)]);
    assert_eq!(
        slots.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn diagonal_neighbours_are_separate_components() {
    let mut img = image::RgbaImage::from_pixel(40, 40, WHITE);
    paint(&mut img, 0, 0, 12, 12);
    paint(&mut img, 12, 12, 12, 12);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 2);
}

#[test]
fn concave_region_is_one_component() {
    // A "U" shape: the scan hits both arms on the first row, but they join at the bottom.
    let mut img = image::RgbaImage::from_pixel(60, 60, WHITE);
    paint(&mut img, 5, 5, 10, 40);
    paint(&mut img, 40, 5, 10, 40);
    paint(&mut img, 5, 40, 45, 10);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 1);
    assert_eq!(
        slots[0].bounds,
        SlotRect {
            min_x: 5,
            min_y: 5,
            max_x: 49,
            max_y: 49
        }
    );
}

#[test]
fn large_region_does_not_overflow_the_stack() {
    let img = image::RgbaImage::from_pixel(1200, 1200, GREEN);
    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].pixel_count, 1200 * 1200);
    assert_eq!(
        slots[0].rect,
        SlotRect {
            min_x: 0,
            min_y: 0,
            max_x: 1199,
            max_y: 1199
        }
    );
}

#[test]
fn custom_min_size_applies() {
    let mut img = image::RgbaImage::from_pixel(30, 30, WHITE);
    paint(&mut img, 2, 2, 3, 3);
    let opts = SegmentOpts {
        min_slot_size: 3,
        min_slot_area: 0,
        padding: Padding {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        },
    };
    let slots = slots_of(&img, &opts);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].rect, slots[0].bounds);
}

#[test]
fn thin_seam_becomes_a_slot_unless_area_floor_is_set() {
    let mut img = image::RgbaImage::from_pixel(200, 200, WHITE);
    paint(&mut img, 50, 50, 100, 100);
    paint(&mut img, 170, 60, 1, 30);

    let slots = slots_of(&img, &SegmentOpts::default());
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].pixel_count, 30);

    let opts = SegmentOpts {
        min_slot_area: 100,
        ..SegmentOpts::default()
    };
    let slots = slots_of(&img, &opts);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].pixel_count, 10_000);
}
