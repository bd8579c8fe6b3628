use crate::constants::{
    COMPRESSED_MARKER, DOCUMENT_EXTENSIONS, PROGRESS_BAR_TEMPLATE, SUPPORTED_EXTENSIONS,
};
use crate::document::{process_document_file, PageRasterizer};
use crate::error::{CompressionError, Result};
use crate::processing::{file_extension, process_raster_file, InputFile, OutputFile, ProcessingParameters};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Paged document, rasterised per page.
    Document,
    /// Single-frame image: orientation, resize, re-encode.
    Raster,
}

impl InputKind {
    /// `None` for anything the pipeline does not accept.
    pub fn classify(file_name: &str) -> Option<Self> {
        let extension = file_extension(file_name);
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            None
        } else if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            Some(InputKind::Document)
        } else {
            Some(InputKind::Raster)
        }
    }
}

/// Earlier output is recognised by name and never processed again.
pub fn is_already_compressed(file_name: &str) -> bool {
    file_name.contains(COMPRESSED_MARKER)
}

pub fn is_supported_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| InputKind::classify(&name.to_string_lossy()).is_some())
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

impl FileFailure {
    pub fn notice(&self) -> String {
        format!("Error processing {}: {}", self.file_name, self.message)
    }
}

/// Best-effort outcome of one batch.
#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    /// Written output files, in processing order.
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub skipped: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl BatchReport {
    pub fn processed_files(&self) -> usize {
        self.outputs.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Processes one upload into its outputs without touching the filesystem.
pub fn process_input(
    input: &InputFile,
    kind: InputKind,
    params: &ProcessingParameters,
    rasterizer: &dyn PageRasterizer,
) -> Result<Vec<OutputFile>> {
    match kind {
        InputKind::Document => process_document_file(input, params, rasterizer),
        InputKind::Raster => process_raster_file(input, params).map(|output| vec![output]),
    }
}

/// Walks `input_dir`, compresses every supported file into `output_dir`
/// and keeps going past failures. A file's outputs are written only once
/// the whole file succeeded.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    params: &ProcessingParameters,
    rasterizer: &dyn PageRasterizer,
) -> Result<BatchReport> {
    let mut candidates = Vec::new();
    let mut report = BatchReport::default();

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        match InputKind::classify(&name) {
            Some(_) if is_already_compressed(&name) => {
                crate::verbose!("Skipping earlier output: {}", name);
                report.skipped += 1;
            }
            Some(kind) => candidates.push((entry.into_path(), name, kind)),
            None => {
                crate::verbose!("Skipping unsupported file: {}", name);
                report.skipped += 1;
            }
        }
    }

    fs::create_dir_all(output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output_dir.to_path_buf()))?;

    let progress = batch_progress_bar(candidates.len() as u64);

    for (path, name, kind) in candidates {
        progress.set_message(name.clone());

        match compress_one(&path, &name, kind, params, rasterizer, output_dir) {
            Ok((bytes_in, written)) => {
                report.bytes_in += bytes_in;
                for path in written {
                    report.bytes_out += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                    report.outputs.push(path);
                }
            }
            Err(e) => {
                let failure = FileFailure {
                    file_name: name,
                    message: e.to_string(),
                };
                progress.suspend(|| {
                    crate::error!("{}", failure.notice());
                });
                report.failures.push(failure);
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(report)
}

fn compress_one(
    path: &Path,
    name: &str,
    kind: InputKind,
    params: &ProcessingParameters,
    rasterizer: &dyn PageRasterizer,
    output_dir: &Path,
) -> Result<(u64, Vec<PathBuf>)> {
    let input = InputFile::new(name, fs::read(path)?);
    let outputs = process_input(&input, kind, params, rasterizer)?;

    let mut written = Vec::with_capacity(outputs.len());
    for output in &outputs {
        match output.write_to(output_dir) {
            Ok(path) => written.push(path),
            Err(e) => {
                // a half-written document must not reach the archive
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                return Err(e);
            }
        }
    }

    crate::verbose!("{} -> {} file(s)", name, written.len());
    Ok((input.data.len() as u64, written))
}

fn batch_progress_bar(total: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        progress.set_style(style.progress_chars("=>-"));
    }
    progress
}

/// Expands command-line inputs (files, directories or glob patterns) into
/// the list of supported files to upload.
pub fn collect_input_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        if is_supported_file(input_path) {
            files.push(input_path.to_path_buf());
        } else {
            return Err(CompressionError::UnsupportedFormat(input.to_string()));
        }
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path)
        } else {
            WalkDir::new(input_path).max_depth(1)
        };

        for entry in walker
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_supported_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    } else if let Ok(pattern) = glob(input) {
        for entry in pattern.flatten() {
            if entry.is_file() && is_supported_file(&entry) {
                files.push(entry);
            }
        }
        if files.is_empty() {
            return Err(CompressionError::NoInputFilesFound(input.to_string()));
        }
    } else {
        return Err(CompressionError::NoInputFilesFound(input.to_string()));
    }

    Ok(files)
}
