use crate::error::{Error, Result};
use crate::utils::file::first_dot_stem;
use std::fs;
use std::path::Path;

/// Names in `folder` that equal `file_name` or share its first-dot stem.
///
/// Comparison is case-sensitive. Entries whose names are not valid UTF-8 are
/// skipped.
pub fn search_file(file_name: &str, folder: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(folder).map_err(|e| {
        Error::internal(
            "An error occurred while searching for the file in directory",
            format!("{:?}: {}", folder, e),
        )
    })?;

    let stem = first_dot_stem(file_name);
    let mut names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal("An error occurred while searching for the file in directory", e)
        })?;

        if let Some(name) = entry.file_name().to_str() {
            if name == file_name || first_dot_stem(name) == stem {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Conflict message when `folder` already holds `file_name` or one of its
/// versions, `None` when the name is new.
pub fn has_duplicate(file_name: &str, folder: &Path) -> Result<Option<String>> {
    let names = search_file(file_name, folder)?;

    if names.is_empty() {
        return Ok(None);
    }

    log::info!(
        "Found {} existing file(s) for {} in {:?}: {:?}",
        names.len(),
        file_name,
        folder,
        names
    );

    Ok(Some(format!(
        "File {} already exists in {}. Please upload another file.",
        file_name,
        folder.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_search_matches_name_and_stem() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        for name in ["abc.pdf", "abc.2.pdf", "abcd.pdf", "ABC.pdf", "xyz.txt"] {
            File::create(temp_dir.path().join(name))?;
        }

        let names = search_file("abc.3.pdf", temp_dir.path())?;
        assert_eq!(names, vec!["abc.2.pdf".to_string(), "abc.pdf".to_string()]);

        Ok(())
    }

    #[test]
    fn test_has_duplicate_for_existing_stem() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        File::create(temp_dir.path().join("report.1.pdf"))?;

        let message = has_duplicate("report.pdf", temp_dir.path())?;
        assert_eq!(
            message,
            Some(format!(
                "File report.pdf already exists in {}. Please upload another file.",
                temp_dir.path().display()
            ))
        );

        Ok(())
    }

    #[test]
    fn test_has_duplicate_for_new_stem() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        File::create(temp_dir.path().join("report.1.pdf"))?;

        assert_eq!(has_duplicate("invoice.pdf", temp_dir.path())?, None);
        Ok(())
    }

    #[test]
    fn test_missing_folder_is_internal_error() {
        let result = has_duplicate("a.pdf", Path::new("/no/such/upload/folder"));
        assert!(matches!(result, Err(Error::Internal(_))));
    }
}
