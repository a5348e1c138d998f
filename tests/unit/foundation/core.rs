use super::*;

#[test]
fn include_grows_bounds_and_dims_are_inclusive() {
    let mut r = SlotRect::at(5, 7);
    assert_eq!((r.width(), r.height()), (1, 1));
    r.include(9, 3);
    r.include(2, 10);
    assert_eq!(
        r,
        SlotRect {
            min_x: 2,
            min_y: 3,
            max_x: 9,
            max_y: 10
        }
    );
    assert_eq!((r.width(), r.height()), (8, 8));
    assert!(r.contains(2, 3));
    assert!(r.contains(9, 10));
    assert!(!r.contains(10, 10));
}

#[test]
fn padded_is_clamped_to_buffer() {
    let r = SlotRect {
        min_x: 1,
        min_y: 0,
        max_x: 98,
        max_y: 48,
    };
    let p = r.padded(Padding::default(), 100, 50);
    assert_eq!(
        p,
        SlotRect {
            min_x: 0,
            min_y: 0,
            max_x: 99,
            max_y: 49
        }
    );
}

#[test]
fn padded_expands_left_top_bottom_more_than_right() {
    let r = SlotRect {
        min_x: 10,
        min_y: 10,
        max_x: 20,
        max_y: 20,
    };
    let p = r.padded(Padding::default(), 100, 100);
    assert_eq!((p.min_x, p.min_y, p.max_x, p.max_y), (7, 7, 21, 23));
}

#[test]
fn overlap_detection() {
    let a = SlotRect {
        min_x: 0,
        min_y: 0,
        max_x: 10,
        max_y: 10,
    };
    let b = SlotRect {
        min_x: 10,
        min_y: 5,
        max_x: 20,
        max_y: 20,
    };
    let c = SlotRect {
        min_x: 11,
        min_y: 0,
        max_x: 20,
        max_y: 4,
    };
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
}
