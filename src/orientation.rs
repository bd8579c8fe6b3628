//! EXIF orientation correction for decoded raster images.
//!
//! Only the three pure rotations are honoured:
//! 3 = rotated 180°, 6 = needs a 90° clockwise turn, 8 = needs a 270° clockwise turn.
//! Mirrored orientations (2, 4, 5, 7) are left untouched.

use crate::constants::ORIENTATION_AWARE_EXTENSIONS;
use image::DynamicImage;
use std::io::Cursor;

/// Reads the primary-IFD orientation tag from an encoded image.
/// Returns `None` when the container has no EXIF block or the tag is unreadable.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

pub fn supports_orientation(extension: &str) -> bool {
    ORIENTATION_AWARE_EXTENSIONS.contains(&extension.to_lowercase().as_str())
}

/// Rotates `img` so it displays upright. Never fails: missing or odd tags are a no-op.
pub fn normalize_orientation(img: DynamicImage, extension: &str, bytes: &[u8]) -> DynamicImage {
    if !supports_orientation(extension) {
        return img;
    }

    match read_orientation(bytes) {
        Some(tag) => apply_orientation_tag(img, tag),
        None => img,
    }
}

pub fn apply_orientation_tag(img: DynamicImage, tag: u32) -> DynamicImage {
    match tag {
        3 => img.rotate180(),
        6 => img.rotate90(),
        8 => img.rotate270(),
        _ => img,
    }
}
