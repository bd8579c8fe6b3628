use crate::constants::{OUTPUT_FOLDER_NAME, SCRATCH_PREFIX, UPLOAD_FOLDER_NAME};
use crate::error::{CompressionError, Result};
use crate::processing::InputFile;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use walkdir::WalkDir;

/// Per-invocation scratch storage.
///
/// Each handle owns a uniquely named directory with an upload folder and an
/// output folder. `release` erases it and reports failures; dropping the
/// handle on any other path removes it too, ignoring errors.
#[derive(Debug)]
pub struct ScratchSpace {
    root: TempDir,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl ScratchSpace {
    pub fn create_in(parent: &Path) -> Result<Self> {
        fs::create_dir_all(parent)
            .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;

        let root = Builder::new().prefix(SCRATCH_PREFIX).tempdir_in(parent)?;
        let input_dir = root.path().join(UPLOAD_FOLDER_NAME);
        let output_dir = root.path().join(OUTPUT_FOLDER_NAME);

        for dir in [&input_dir, &output_dir] {
            fs::create_dir(dir).map_err(|_| CompressionError::DirectoryCreationFailed(dir.clone()))?;
        }

        crate::verbose!("Scratch space: {:?}", root.path());
        Ok(Self {
            root,
            input_dir,
            output_dir,
        })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes an upload into the input folder. Same-named uploads overwrite each other.
    pub fn stage(&self, upload: &InputFile) -> Result<PathBuf> {
        let name = Path::new(&upload.name)
            .file_name()
            .ok_or_else(|| CompressionError::UnsupportedFormat(format!("Invalid file name: {}", upload.name)))?;
        let path = self.input_dir.join(name);
        fs::write(&path, &upload.data)?;
        Ok(path)
    }

    pub fn release(self) -> Result<()> {
        erase_dir(self.root.path())
    }
}

/// Deletes everything under `path` bottom-up, then `path` itself.
/// A path that does not exist is left alone.
pub fn erase_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(path).min_depth(1).contents_first(true) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }

    if path.exists() {
        fs::remove_dir(path)?;
    }
    Ok(())
}
