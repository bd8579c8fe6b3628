pub const DEFAULT_QUALITY: u8 = 50;
pub const MIN_QUALITY: u8 = 5;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_TARGET_LONG_SIDE: u32 = 1500;
pub const MIN_TARGET_LONG_SIDE: u32 = 500;
pub const MAX_TARGET_LONG_SIDE: u32 = 3000;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
pub const OXIPNG_PRESET: u8 = 4;

/// PDF points per rendered pixel. 1.0 renders pages at 72 DPI.
pub const PAGE_RENDER_SCALE: f32 = 1.0;

/// Any file whose name contains this marker is treated as earlier output and skipped.
pub const COMPRESSED_MARKER: &str = "compressed";
pub const OUTPUT_SUFFIX: &str = "_compressed";
pub const OUTPUT_FOLDER_NAME: &str = "compressed_images";
pub const UPLOAD_FOLDER_NAME: &str = "uploads";
pub const ARCHIVE_FILE_NAME: &str = "compressed_images.zip";
pub const SCRATCH_PREFIX: &str = "web-image-optimizer-";

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf", "tif", "tiff"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];
pub const ORIENTATION_AWARE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub const NO_UPLOADS_WARNING: &str = "Please upload at least one image.";
pub const SPINNER_MESSAGE: &str = "Compressing images...";
pub const PACKAGING_MESSAGE: &str = "Preparing download...";
pub const SUCCESS_MESSAGE: &str = "Compression finished.";
