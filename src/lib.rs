#[macro_use]
pub mod logger;

pub mod archive;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod document;
pub mod error;
pub mod formats;
pub mod info;
pub mod orientation;
pub mod pipeline;
pub mod processing;
pub mod scratch;
pub mod utils;

pub use archive::{deliver, zip_folder, Delivery};
pub use batch::{collect_input_files, run_batch, BatchReport, FileFailure, InputKind};
pub use document::{process_document_file, PageRasterizer, PdfiumRasterizer};
pub use error::{CompressionError, Result};
pub use formats::{choose_output_format, OutputFormat};
pub use orientation::normalize_orientation;
pub use pipeline::{compress_uploads, PipelineOptions, PipelineOutcome};
pub use processing::{
    process_raster_file, resize_to_long_side, target_dimensions, validate_file_exists, InputFile,
    OutputFile, ProcessingParameters,
};
pub use scratch::{erase_dir, ScratchSpace};
