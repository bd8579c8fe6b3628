use crate::constants::ARCHIVE_FILE_NAME;
use crate::error::{CompressionError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// How the batch result is handed back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Exactly one file was produced and is offered as-is.
    SingleFile(PathBuf),
    /// Everything else, bundled into one archive.
    Archive(PathBuf),
}

impl Delivery {
    pub fn path(&self) -> &Path {
        match self {
            Delivery::SingleFile(path) | Delivery::Archive(path) => path,
        }
    }
}

/// Zips every file under `folder`. Entry names are relative to the folder's
/// parent, so the folder name itself is the top-level entry. Returns the
/// number of files written.
pub fn zip_folder(folder: &Path, zip_path: &Path) -> Result<usize> {
    let base = folder.parent().unwrap_or(folder);
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = archive_entry_name(entry.path(), base)?;
        zip.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// Relative path with `/` separators, as zip readers expect.
fn archive_entry_name(path: &Path, base: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| CompressionError::ArchiveEntryOutsideRoot {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Hands over the produced files: one file is copied as-is, any other
/// count is zipped into `compressed_images.zip`.
pub fn deliver(outputs: &[PathBuf], output_folder: &Path, destination: &Path) -> Result<Delivery> {
    fs::create_dir_all(destination)
        .map_err(|_| CompressionError::DirectoryCreationFailed(destination.to_path_buf()))?;

    if let [single] = outputs {
        let name = single
            .file_name()
            .ok_or_else(|| CompressionError::FileNotFound(single.clone()))?;
        let target = destination.join(name);
        fs::copy(single, &target)?;
        return Ok(Delivery::SingleFile(target));
    }

    let zip_path = destination.join(ARCHIVE_FILE_NAME);
    let count = zip_folder(output_folder, &zip_path)?;
    crate::verbose!("Archived {} file(s) into {:?}", count, zip_path);
    Ok(Delivery::Archive(zip_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn output_folder_with(files: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("compressed_images");
        fs::create_dir(&folder).unwrap();
        for (name, data) in files {
            fs::write(folder.join(name), data).unwrap();
        }
        (temp_dir, folder)
    }

    fn entry_names(zip_path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    #[test]
    fn test_zip_folder_entries_keep_folder_name() {
        let (temp_dir, folder) =
            output_folder_with(&[("b_compressed.jpg", b"bbb"), ("a_compressed.png", b"aa")]);
        let zip_path = temp_dir.path().join("out.zip");

        let count = zip_folder(&folder, &zip_path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            entry_names(&zip_path),
            vec![
                "compressed_images/a_compressed.png",
                "compressed_images/b_compressed.jpg"
            ]
        );
    }

    #[test]
    fn test_zip_folder_contents_round_trip() {
        let (temp_dir, folder) = output_folder_with(&[("x_compressed.jpg", b"payload")]);
        let zip_path = temp_dir.path().join("out.zip");
        zip_folder(&folder, &zip_path).unwrap();

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut entry = archive.by_name("compressed_images/x_compressed.jpg").unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"payload");
    }

    #[test]
    fn test_zip_folder_includes_nested_files() {
        let (temp_dir, folder) = output_folder_with(&[]);
        fs::create_dir(folder.join("nested")).unwrap();
        fs::write(folder.join("nested/deep.jpg"), b"d").unwrap();
        let zip_path = temp_dir.path().join("out.zip");

        zip_folder(&folder, &zip_path).unwrap();
        assert_eq!(entry_names(&zip_path), vec!["compressed_images/nested/deep.jpg"]);
    }

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        let base = Path::new("scratch");
        let path = base.join("compressed_images").join("a_compressed.jpg");
        assert_eq!(
            archive_entry_name(&path, base).unwrap(),
            "compressed_images/a_compressed.jpg"
        );
    }

    #[test]
    fn test_entry_outside_root_is_rejected() {
        let result = archive_entry_name(Path::new("/elsewhere/a.jpg"), Path::new("/scratch"));
        match result {
            Err(CompressionError::ArchiveEntryOutsideRoot { path, base }) => {
                assert_eq!(path, PathBuf::from("/elsewhere/a.jpg"));
                assert_eq!(base, PathBuf::from("/scratch"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_deliver_single_file_is_copied() {
        let (temp_dir, folder) = output_folder_with(&[("only_compressed.jpg", b"1")]);
        let destination = temp_dir.path().join("downloads");

        let delivery = deliver(&[folder.join("only_compressed.jpg")], &folder, &destination).unwrap();
        assert_eq!(
            delivery,
            Delivery::SingleFile(destination.join("only_compressed.jpg"))
        );
        assert_eq!(fs::read(delivery.path()).unwrap(), b"1");
        assert!(!destination.join(ARCHIVE_FILE_NAME).exists());
    }

    #[test]
    fn test_deliver_many_files_are_zipped() {
        let (temp_dir, folder) =
            output_folder_with(&[("a_compressed.jpg", b"1"), ("b_compressed.jpg", b"2")]);
        let destination = temp_dir.path().join("downloads");
        let outputs = vec![folder.join("a_compressed.jpg"), folder.join("b_compressed.jpg")];

        let delivery = deliver(&outputs, &folder, &destination).unwrap();
        assert_eq!(delivery, Delivery::Archive(destination.join("compressed_images.zip")));
        assert_eq!(entry_names(delivery.path()).len(), 2);
    }

    #[test]
    fn test_deliver_nothing_produces_empty_archive() {
        let (temp_dir, folder) = output_folder_with(&[]);
        let destination = temp_dir.path().join("downloads");

        let delivery = deliver(&[], &folder, &destination).unwrap();
        assert!(matches!(delivery, Delivery::Archive(_)));
        assert!(entry_names(delivery.path()).is_empty());
    }
}
