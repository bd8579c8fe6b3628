use crate::batch::{is_already_compressed, InputKind};
use crate::constants::OUTPUT_SUFFIX;
use crate::error::{CompressionError, Result};
use crate::formats::{choose_output_format, output_file_name, OutputFormat};
use crate::orientation::{apply_orientation_tag, read_orientation, supports_orientation};
use crate::processing::{decode_image, target_dimensions, InputFile, ProcessingParameters};
use crate::utils::format_file_size;
use image::{ColorType, GenericImageView};
use std::path::Path;

/// What the pipeline would do with one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FilePlan {
    Raster(RasterPlan),
    Document { output_pattern: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterPlan {
    pub file_size: u64,
    pub dimensions: (u32, u32),
    pub color: ColorType,
    pub orientation: Option<u32>,
    pub upright_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub output_format: OutputFormat,
    pub output_name: String,
}

pub fn plan_file(input: &InputFile, params: &ProcessingParameters) -> Result<FilePlan> {
    if is_already_compressed(&input.name) {
        return Ok(FilePlan::Skipped {
            reason: "name marks it as earlier output".to_string(),
        });
    }

    match InputKind::classify(&input.name) {
        None => Ok(FilePlan::Skipped {
            reason: "unsupported extension".to_string(),
        }),
        Some(InputKind::Document) => Ok(FilePlan::Document {
            output_pattern: format!("{}_page_<n>{}.jpg", input.stem(), OUTPUT_SUFFIX),
        }),
        Some(InputKind::Raster) => {
            let extension = input.extension();
            let img = decode_image(&input.data)?;

            let orientation = if supports_orientation(&extension) {
                read_orientation(&input.data)
            } else {
                None
            };
            // only the dimensions matter here, so rotate an empty canvas
            let (width, height) = img.dimensions();
            let upright_dimensions = match orientation {
                Some(tag) => apply_orientation_tag(image::DynamicImage::new_luma8(width, height), tag)
                    .dimensions(),
                None => (width, height),
            };
            let output_dimensions = target_dimensions(
                upright_dimensions.0,
                upright_dimensions.1,
                params.target_long_side,
            );
            let output_format = choose_output_format(&img, &extension, &input.data);

            Ok(FilePlan::Raster(RasterPlan {
                file_size: input.data.len() as u64,
                dimensions: (width, height),
                color: img.color(),
                orientation,
                upright_dimensions,
                output_dimensions,
                output_format,
                output_name: output_file_name(&input.stem(), output_format),
            }))
        }
    }
}

pub fn print_file_info(path: &Path, params: &ProcessingParameters) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    let input = InputFile::from_path(path)?;
    println!("📋 {}", input.name);

    match plan_file(&input, params)? {
        FilePlan::Raster(plan) => {
            println!("  📦 File size: {}", format_file_size(plan.file_size));
            println!("  📏 Dimensions: {}x{}", plan.dimensions.0, plan.dimensions.1);
            println!("  🎨 Color type: {:?}", plan.color);
            match plan.orientation {
                Some(tag) => println!("  🧭 EXIF orientation: {}", tag),
                None => println!("  🧭 EXIF orientation: none"),
            }
            if plan.upright_dimensions != plan.dimensions {
                println!(
                    "  🔄 Upright: {}x{}",
                    plan.upright_dimensions.0, plan.upright_dimensions.1
                );
            }
            println!(
                "  🎯 Output: {}x{} {} (quality {})",
                plan.output_dimensions.0, plan.output_dimensions.1, plan.output_format, params.quality
            );
            println!("  📁 Output name: {}", plan.output_name);
        }
        FilePlan::Document { output_pattern } => {
            println!("  📄 PDF: every page becomes a JPEG at quality {}", params.quality);
            println!("  📁 Output names: {}", output_pattern);
        }
        FilePlan::Skipped { reason } => {
            println!("  ⏭️  Skipped: {}", reason);
        }
    }

    Ok(())
}
