use super::*;

#[test]
fn png_is_lossless() {
    let mut img = image::RgbaImage::from_pixel(5, 3, image::Rgba([1, 2, 3, 4]));
    img.put_pixel(4, 2, image::Rgba([250, 0, 125, 255]));
    let bytes = encode_png(&img).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let back = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(back, img);
}

#[test]
fn encoding_is_deterministic() {
    let img = image::RgbaImage::from_fn(64, 64, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
    assert_eq!(encode_png(&img).unwrap(), encode_png(&img).unwrap());
}

#[test]
fn empty_image_is_an_encode_error() {
    let err = encode_png(&image::RgbaImage::new(0, 0)).unwrap_err();
    assert!(matches!(err, PhotoboothError::Encode(_)));
}
