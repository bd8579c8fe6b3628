use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use web_image_optimizer::batch::{collect_input_files, InputKind};
use web_image_optimizer::cli::{Args, Commands};
use web_image_optimizer::document::PdfiumRasterizer;
use web_image_optimizer::info::print_file_info;
use web_image_optimizer::logger::{set_verbosity, Verbosity};
use web_image_optimizer::{
    compress_uploads, InputFile, PipelineOptions, PipelineOutcome, ProcessingParameters,
};

fn main() -> Result<()> {
    let args = Args::parse();
    set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    match args.command {
        Commands::Compress {
            inputs,
            quality,
            target_size,
            output_dir,
            recursive,
            scratch_dir,
            pdfium_library,
        } => {
            let params = ProcessingParameters::new(quality, target_size)?;
            let uploads = read_uploads(&inputs, recursive)?;

            let needs_pdfium = uploads
                .iter()
                .any(|u| InputKind::classify(&u.name) == Some(InputKind::Document));
            let rasterizer = if needs_pdfium {
                PdfiumRasterizer::bind(pdfium_library.as_deref())
            } else {
                PdfiumRasterizer::unavailable("no PDF in this batch")
            };
            if needs_pdfium && !rasterizer.is_available() {
                web_image_optimizer::warn!("PDFium library not found; PDF files will fail. Use --pdfium-library to point at it.");
            }

            let options = PipelineOptions::new(
                scratch_dir.unwrap_or_else(std::env::temp_dir),
                output_dir,
            );
            let outcome = compress_uploads(&uploads, &params, &options, &rasterizer)
                .context("Compression run failed")?;

            if let PipelineOutcome::Delivered { delivery, .. } = outcome {
                // machine-readable last line, printed even in quiet mode
                println!("{}", delivery.path().display());
            }
        }
        Commands::Info {
            input,
            quality,
            target_size,
        } => {
            let params = ProcessingParameters::new(quality, target_size)?;
            print_file_info(&input, &params)
                .with_context(|| format!("Could not analyze {}", input.display()))?;
        }
    }

    Ok(())
}

fn read_uploads(inputs: &[String], recursive: bool) -> Result<Vec<InputFile>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let found = collect_input_files(input, recursive)
            .with_context(|| format!("Could not read input {}", input))?;
        paths.extend(found);
    }

    paths
        .iter()
        .map(|path| {
            InputFile::from_path(path).with_context(|| format!("Could not read {}", path.display()))
        })
        .collect()
}
