use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "web-image-optimizer",
    about = "Resize and re-encode images and PDFs into a single compressed download",
    long_about = "web-image-optimizer shrinks a batch of images (PNG, JPEG, TIFF) and PDF documents. \
                  Images are rotated upright, fitted to a maximum long side and re-encoded as JPEG \
                  (or PNG when transparency must be kept); PDF pages are rendered to JPEG. \
                  One result is delivered as-is, several are bundled into compressed_images.zip.",
    version,
    after_help = "EXAMPLES:\n  \
    web-image-optimizer compress photo.jpg\n  \
    web-image-optimizer compress ./uploads -r -q 70 -s 2000 -o ./downloads\n  \
    web-image-optimizer compress \"scans/*.pdf\" --pdfium-library /opt/pdfium/lib/libpdfium.so\n  \
    web-image-optimizer info photo.png -s 1200"
)]
pub struct Args {
    #[arg(long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-file details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a batch of images and PDFs",
        long_about = "Compress every supported input (png, jpg, jpeg, tif, tiff, pdf). \
                      Files whose name already contains 'compressed' are skipped. \
                      A file that fails is reported and the rest of the batch continues."
    )]
    Compress {
        #[arg(
            help = "Input files, directories or glob patterns",
            long_help = "Inputs can be files, directories or glob expressions. \
                         Examples: 'photo.jpg', './uploads', 'scans/*.{pdf,tif}'. \
                         Running without inputs only prints a warning."
        )]
        inputs: Vec<String>,

        #[arg(
            short = 'q',
            long,
            help = "JPEG quality (5-100, default: 50)",
            long_help = "JPEG quality from 5 (smallest) to 100 (best). \
                         For PNG output it selects the lossless optimisation effort."
        )]
        quality: Option<u8>,

        #[arg(
            short = 's',
            long = "target-size",
            help = "Maximum long side in pixels (500-3000, default: 1500)",
            long_help = "Images whose longer side exceeds this value are downscaled so the \
                         longer side matches it exactly. Smaller images are never upscaled. \
                         PDF pages are not resized."
        )]
        target_size: Option<u32>,

        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Directory that receives the compressed file or archive"
        )]
        output_dir: PathBuf,

        #[arg(short = 'r', long, help = "Descend into subdirectories of input directories")]
        recursive: bool,

        #[arg(
            long,
            help = "Where per-run scratch directories are created (default: system temp)"
        )]
        scratch_dir: Option<PathBuf>,

        #[arg(
            long,
            help = "Path to the PDFium shared library used to render PDFs",
            long_help = "Explicit PDFium library file. When omitted the system library \
                         search path is used. Without PDFium, PDFs fail individually \
                         while images are still processed."
        )]
        pdfium_library: Option<PathBuf>,
    },

    #[command(
        about = "Show what compression would do to one file",
        long_about = "Report dimensions, colour type, orientation tag, resized dimensions and \
                      the output name and format for a single image. For PDFs only the \
                      output naming pattern is shown."
    )]
    Info {
        #[arg(help = "File to analyze")]
        input: PathBuf,

        #[arg(short = 'q', long, help = "JPEG quality (5-100, default: 50)")]
        quality: Option<u8>,

        #[arg(short = 's', long = "target-size", help = "Maximum long side in pixels (500-3000, default: 1500)")]
        target_size: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_compress_defaults() {
        let args = Args::try_parse_from(["web-image-optimizer", "compress", "a.jpg"]).unwrap();
        match args.command {
            Commands::Compress {
                inputs,
                quality,
                target_size,
                output_dir,
                recursive,
                ..
            } => {
                assert_eq!(inputs, vec!["a.jpg"]);
                assert_eq!(quality, None);
                assert_eq!(target_size, None);
                assert_eq!(output_dir, PathBuf::from("."));
                assert!(!recursive);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_compress_without_inputs_parses() {
        let args = Args::try_parse_from(["web-image-optimizer", "compress", "--quiet"]).unwrap();
        assert!(args.quiet);
        assert!(matches!(args.command, Commands::Compress { ref inputs, .. } if inputs.is_empty()));
    }
}
