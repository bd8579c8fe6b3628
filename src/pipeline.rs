//! One compression request from start to finish:
//! stage uploads -> run the batch -> deliver -> erase scratch.

use crate::archive::{deliver, Delivery};
use crate::batch::{run_batch, BatchReport};
use crate::constants::{NO_UPLOADS_WARNING, PACKAGING_MESSAGE, SPINNER_MESSAGE, SUCCESS_MESSAGE};
use crate::document::PageRasterizer;
use crate::error::Result;
use crate::processing::{InputFile, ProcessingParameters};
use crate::scratch::ScratchSpace;
use crate::utils::{describe_savings, with_spinner};
use std::path::{Path, PathBuf};

/// Where scratch storage is allocated and where the result is delivered.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub scratch_root: PathBuf,
    pub destination: PathBuf,
}

impl PipelineOptions {
    pub fn new(scratch_root: PathBuf, destination: PathBuf) -> Self {
        Self {
            scratch_root,
            destination,
        }
    }
}

#[derive(Debug)]
pub enum PipelineOutcome {
    /// Nothing was supplied; nothing was touched.
    NothingUploaded,
    Delivered {
        delivery: Delivery,
        report: BatchReport,
    },
}

pub fn compress_uploads(
    uploads: &[InputFile],
    params: &ProcessingParameters,
    options: &PipelineOptions,
    rasterizer: &dyn PageRasterizer,
) -> Result<PipelineOutcome> {
    if uploads.is_empty() {
        crate::warn!("{}", NO_UPLOADS_WARNING);
        return Ok(PipelineOutcome::NothingUploaded);
    }

    // any early return drops `scratch`, which removes the directory
    let scratch = with_spinner(SPINNER_MESSAGE, || {
        stage_uploads(uploads, &options.scratch_root)
    })?;

    // the batch draws its own progress bar, so no spinner runs alongside it
    let report = run_batch(scratch.input_dir(), scratch.output_dir(), params, rasterizer)?;
    let delivery = with_spinner(PACKAGING_MESSAGE, || {
        deliver(&report.outputs, scratch.output_dir(), &options.destination)
    })?;

    scratch.release()?;

    summarize(&report, &delivery);
    Ok(PipelineOutcome::Delivered { delivery, report })
}

fn stage_uploads(uploads: &[InputFile], scratch_root: &Path) -> Result<ScratchSpace> {
    let scratch = ScratchSpace::create_in(scratch_root)?;
    for upload in uploads {
        scratch.stage(upload)?;
    }
    Ok(scratch)
}

fn summarize(report: &BatchReport, delivery: &Delivery) {
    crate::success!("{}", SUCCESS_MESSAGE);
    crate::info!(
        "📊 {} output file(s), {}",
        report.processed_files(),
        describe_savings(report.bytes_in, report.bytes_out)
    );
    if report.has_failures() {
        crate::warn!("{} file(s) could not be processed", report.failures.len());
    }
    match delivery {
        Delivery::SingleFile(path) => crate::info!("📥 Download compressed image: {}", path.display()),
        Delivery::Archive(path) => crate::info!("📥 Download compressed images: {}", path.display()),
    }
}
