use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub struct UploadStorage;

impl UploadStorage {
    /// Stream `reader` into `folder/file_name`, replacing any existing file.
    pub fn save_file<R: Read>(reader: &mut R, file_name: &str, folder: &Path) -> Result<PathBuf> {
        let file_path = folder.join(file_name);

        match Self::write(reader, &file_path) {
            Ok(bytes) => {
                log::info!("File saved successfully as {:?} ({} bytes)", file_path, bytes);
                Ok(file_path)
            }
            Err(e) => {
                log::error!("Error saving file: {}", e);
                Err(Error::internal("Error saving file", e))
            }
        }
    }

    fn write<R: Read>(reader: &mut R, destination: &Path) -> io::Result<u64> {
        let mut file = File::create(destination)?;
        io::copy(reader, &mut file)
    }

    /// Delete `folder/file_name`; a file that is already gone only logs a warning.
    pub fn remove_file(file_name: &str, folder: &Path) -> Result<()> {
        let file_path = folder.join(file_name);

        match fs::remove_file(&file_path) {
            Ok(()) => {
                log::info!("File {} removed successfully.", file_name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("File {} does not exist in {:?}.", file_name, folder);
                Ok(())
            }
            Err(e) => {
                log::error!("Error removing file {:?}: {}", file_path, e);
                Err(Error::internal("An error occurred while removing the file", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_save_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let mut upload = Cursor::new(b"quarterly numbers".to_vec());

        let saved = UploadStorage::save_file(&mut upload, "q1.2.xlsx", temp_dir.path())?;

        assert_eq!(saved, temp_dir.path().join("q1.2.xlsx"));
        assert_eq!(fs::read_to_string(&saved)?, "quarterly numbers");

        Ok(())
    }

    #[test]
    fn test_save_file_overwrites() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("memo.txt"), "old contents that are longer")?;

        let mut upload = Cursor::new(b"new".to_vec());
        let saved = UploadStorage::save_file(&mut upload, "memo.txt", temp_dir.path())?;

        assert_eq!(fs::read_to_string(saved)?, "new");
        Ok(())
    }

    #[test]
    fn test_save_into_missing_folder_fails() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let mut upload = Cursor::new(b"data".to_vec());

        let err = UploadStorage::save_file(&mut upload, "a.pdf", &temp_dir.path().join("absent"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Error saving file"));

        Ok(())
    }

    #[test]
    fn test_remove_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("old.pdf");
        fs::write(&path, b"x")?;

        UploadStorage::remove_file("old.pdf", temp_dir.path())?;
        assert!(!path.exists());

        // removing again only warns
        UploadStorage::remove_file("old.pdf", temp_dir.path())?;

        Ok(())
    }

    #[test]
    fn test_remove_directory_fails() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("drafts"))?;

        let err = UploadStorage::remove_file("drafts", temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err
            .to_string()
            .starts_with("An error occurred while removing the file"));
        assert!(temp_dir.path().join("drafts").is_dir());

        Ok(())
    }
}
