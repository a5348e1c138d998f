use image::ImageEncoder as _;

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Encode `img` as a lossless RGBA8 PNG.
///
/// Output depends only on the pixels, so identical buffers give identical bytes.
pub fn encode_png(img: &image::RgbaImage) -> PhotoboothResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(PhotoboothError::encode("cannot encode an empty image"));
    }

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| PhotoboothError::encode(format!("png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
