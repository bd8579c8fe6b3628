use crate::constants::{
    DEFAULT_QUALITY, DEFAULT_TARGET_LONG_SIDE, MAX_QUALITY, MAX_TARGET_LONG_SIDE, MIN_QUALITY,
    MIN_TARGET_LONG_SIDE,
};
use crate::error::{CompressionError, Result};
use crate::formats::{choose_output_format, encode_image, output_file_name};
use crate::orientation::normalize_orientation;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Settings applied to every file of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingParameters {
    pub quality: u8,
    pub target_long_side: u32,
}

impl ProcessingParameters {
    pub fn new(quality: Option<u8>, target_long_side: Option<u32>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(
                quality,
                MIN_QUALITY,
                MAX_QUALITY,
            ));
        }

        let target_long_side = target_long_side.unwrap_or(DEFAULT_TARGET_LONG_SIDE);
        if !(MIN_TARGET_LONG_SIDE..=MAX_TARGET_LONG_SIDE).contains(&target_long_side) {
            return Err(CompressionError::InvalidTargetSize(
                target_long_side,
                MIN_TARGET_LONG_SIDE,
                MAX_TARGET_LONG_SIDE,
            ));
        }

        Ok(Self {
            quality,
            target_long_side,
        })
    }
}

impl Default for ProcessingParameters {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            target_long_side: DEFAULT_TARGET_LONG_SIDE,
        }
    }
}

/// An uploaded file: just a name and its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Reads a file from disk, naming it after the final path component.
    pub fn from_path(path: &Path) -> Result<Self> {
        validate_file_exists(path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CompressionError::UnsupportedFormat("Invalid file name".to_string()))?;
        let data = fs::read(path)?;

        Ok(Self { name, data })
    }

    pub fn stem(&self) -> String {
        file_stem(&self.name)
    }

    pub fn extension(&self) -> String {
        file_extension(&self.name)
    }
}

/// One encoded result, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl OutputFile {
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        let path = directory.join(&self.name);
        fs::write(&path, &self.data)?;
        Ok(path)
    }
}

/// Validates that a file exists at the given path.
///
/// # Example
/// ```
/// use std::path::Path;
/// use web_image_optimizer::validate_file_exists;
///
/// let result = validate_file_exists(Path::new("nonexistent.jpg"));
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// Lower-cased extension without the dot, or an empty string.
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// Dimensions after fitting the long side into `target_long_side`.
///
/// Images already within bounds keep their size. The short side is
/// truncated, not rounded, and never drops below one pixel.
pub fn target_dimensions(width: u32, height: u32, target_long_side: u32) -> (u32, u32) {
    if width.max(height) <= target_long_side {
        return (width, height);
    }

    let target = target_long_side as f64;
    if width > height {
        let new_height = ((target / width as f64) * height as f64) as u32;
        (target_long_side, new_height.max(1))
    } else {
        let new_width = ((target / height as f64) * width as f64) as u32;
        (new_width.max(1), target_long_side)
    }
}

/// Downscales so the long side equals `target_long_side`. Never upscales.
pub fn resize_to_long_side(img: DynamicImage, target_long_side: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, target_long_side);

    if (new_width, new_height) == (width, height) {
        return img;
    }

    crate::verbose!(
        "Resizing {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;
    Ok(img)
}

/// Raster path: decode -> orientation -> resize -> encode.
pub fn process_raster_file(input: &InputFile, params: &ProcessingParameters) -> Result<OutputFile> {
    let extension = input.extension();

    let img = decode_image(&input.data)?;
    let img = normalize_orientation(img, &extension, &input.data);
    let img = resize_to_long_side(img, params.target_long_side);

    let format = choose_output_format(&img, &extension, &input.data);
    let data = encode_image(&img, format, params.quality)?;

    Ok(OutputFile {
        name: output_file_name(&input.stem(), format),
        data,
    })
}
