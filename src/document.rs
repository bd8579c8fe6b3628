//! Paged documents (PDF) are rasterised page by page and each page is
//! encoded straight to JPEG. Unlike the raster path there is no orientation
//! correction and no resizing.

use crate::constants::PAGE_RENDER_SCALE;
use crate::error::{CompressionError, Result};
use crate::formats::{encode_jpeg, page_output_file_name};
use crate::processing::{InputFile, OutputFile, ProcessingParameters};
use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::Path;

/// Renders every page of a document into a raster image, in page order.
pub trait PageRasterizer {
    fn render_pages(&self, data: &[u8]) -> Result<Vec<DynamicImage>>;
}

/// PDFium-backed renderer. The library is bound once, up front; if binding
/// failed every document is reported as a per-file failure.
pub struct PdfiumRasterizer {
    pdfium: std::result::Result<Pdfium, String>,
}

impl PdfiumRasterizer {
    /// Binds an explicit library file when given, else the system PDFium.
    pub fn bind(library: Option<&Path>) -> Self {
        let bindings = match library {
            Some(path) => {
                let path = path.to_string_lossy().into_owned();
                Pdfium::bind_to_library(&path)
            }
            None => Pdfium::bind_to_system_library(),
        };

        match bindings {
            Ok(bindings) => Self {
                pdfium: Ok(Pdfium::new(bindings)),
            },
            Err(e) => {
                crate::verbose!("PDFium could not be loaded: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            pdfium: Err(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.pdfium.is_ok()
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn render_pages(&self, data: &[u8]) -> Result<Vec<DynamicImage>> {
        let pdfium = self
            .pdfium
            .as_ref()
            .map_err(|reason| CompressionError::RasterizerUnavailable(reason.clone()))?;

        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| CompressionError::DocumentRendering(e.to_string()))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(PAGE_RENDER_SCALE);

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| CompressionError::DocumentRendering(format!("page {}: {}", index, e)))?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            let buffer = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
                CompressionError::DocumentRendering(format!(
                    "page {}: bitmap size does not match {}x{}",
                    index, width, height
                ))
            })?;

            pages.push(DynamicImage::ImageRgba8(buffer));
        }

        Ok(pages)
    }
}

pub fn process_document_file(
    input: &InputFile,
    params: &ProcessingParameters,
    rasterizer: &dyn PageRasterizer,
) -> Result<Vec<OutputFile>> {
    let stem = input.stem();
    let pages = rasterizer.render_pages(&input.data)?;
    crate::verbose!("{}: rendered {} page(s)", input.name, pages.len());

    pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let rgb = DynamicImage::ImageRgb8(page.to_rgb8());
            Ok(OutputFile {
                name: page_output_file_name(&stem, index),
                data: encode_jpeg(&rgb, params.quality)?,
            })
        })
        .collect()
}
