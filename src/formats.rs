//! Output format selection and encoding
//!
//! Every compressed raster ends up either as a JPEG (the common case) or as
//! a PNG when the source was a PNG carrying transparency.

use crate::constants::{
    LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, OUTPUT_SUFFIX, OXIPNG_PRESET,
    ZOPFLI_ITERATIONS,
};
use crate::error::{CompressionError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat};
use oxipng::{Deflaters, Options};
use std::fmt;
use std::io::Cursor;
use std::num::NonZeroU8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, quality-controlled
    Jpeg,
    /// Lossless, keeps the alpha channel
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_COLOR_GRAY_ALPHA: u8 = 4;
const PNG_COLOR_RGBA: u8 = 6;

/// Colour type byte from the IHDR chunk, which must directly follow the signature.
pub fn png_color_type(source: &[u8]) -> Option<u8> {
    if !source.starts_with(PNG_SIGNATURE) || source.len() < 26 || &source[12..16] != b"IHDR" {
        return None;
    }
    Some(source[25])
}

/// True only for PNGs stored with an alpha channel. Palette and tRNS
/// transparency decode to RGBA but do not count.
pub fn png_has_alpha_channel(source: &[u8]) -> bool {
    matches!(
        png_color_type(source),
        Some(PNG_COLOR_GRAY_ALPHA) | Some(PNG_COLOR_RGBA)
    )
}

/// PNG is kept only when the source was a PNG with a real alpha channel and
/// the pixels still carry it. Everything else is flattened to JPEG.
pub fn choose_output_format(
    img: &DynamicImage,
    source_extension: &str,
    source: &[u8],
) -> OutputFormat {
    if img.color().has_alpha()
        && source_extension.eq_ignore_ascii_case("png")
        && png_has_alpha_channel(source)
    {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg
    }
}

pub fn output_file_name(stem: &str, format: OutputFormat) -> String {
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, format.extension())
}

pub fn page_output_file_name(stem: &str, page_index: usize) -> String {
    format!(
        "{}_page_{}{}.{}",
        stem,
        page_index,
        OUTPUT_SUFFIX,
        OutputFormat::Jpeg.extension()
    )
}

pub fn encode_image(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img, quality),
        OutputFormat::Png => encode_png(img, quality),
    }
}

/// Encodes as baseline JPEG. Alpha is dropped; grayscale stays single-channel.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    match img.color() {
        ColorType::L8 => encoder.encode_image(&img.to_luma8())?,
        _ => encoder.encode_image(&img.to_rgb8())?,
    }

    Ok(buffer)
}

pub fn encode_png(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    img.write_to(&mut Cursor::new(&mut raw), ImageFormat::Png)?;

    oxipng::optimize_from_memory(&raw, &png_optimization_options(quality))
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// Higher quality settings buy more deflate effort; the pixels are identical either way.
fn png_optimization_options(quality: u8) -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);

    options.deflate = if quality >= 90 {
        match NonZeroU8::new(ZOPFLI_ITERATIONS) {
            Some(iterations) => Deflaters::Zopfli { iterations },
            None => Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            },
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    options
}
