use crate::detector::FileDetector;
use crate::error::{Error, Result};
use crate::hasher::{compute_hash, HashAlgorithm};
use crate::utils::file::extension;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const SYSTEM_USER: &str = "SYSTEM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
    pub size_bytes: u64,
}

pub trait FileStat {
    fn stat(&self, path: &Path) -> Result<FileStats>;
}

/// `FileStat` backed by `std::fs::metadata`.
///
/// Platforms or filesystems that do not record a birth time report the
/// modification time as the creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStat;

impl FileStat for FsStat {
    fn stat(&self, path: &Path) -> Result<FileStats> {
        let metadata = fs::metadata(path).map_err(|e| Error::internal(&format!("{:?}", path), e))?;
        let modified = metadata
            .modified()
            .map_err(|e| Error::internal(&format!("{:?}", path), e))?;
        let created = metadata.created().unwrap_or(modified);

        Ok(FileStats {
            created: DateTime::<Local>::from(created),
            modified: DateTime::<Local>::from(modified),
            size_bytes: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedFileInfo {
    pub file_name: String,
    pub file_creation_date: String,
    pub file_modified_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_name: String,
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub file_type: String,
    pub mime_type: String,
    /// Size in kilobytes with two decimals, e.g. `"12.50"`.
    pub file_size: String,
    pub file_creation_date: String,
    pub file_modified_date: String,
    pub file_hash: String,
    pub hash_algorithm: HashAlgorithm,
    pub created_on: String,
    pub created_by: String,
    pub version_file: u32,
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Bytes to kilobytes, two decimal places.
pub fn format_size(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / 1024.0)
}

pub fn get_metadata(
    file_name: &str,
    folder: &Path,
    algorithm: HashAlgorithm,
    stat: &impl FileStat,
) -> Result<FileMetadata> {
    describe(file_name, folder, algorithm, stat)
        .map_err(|e| Error::internal("An error occurred while getting the metadata", e))
}

fn describe(
    file_name: &str,
    folder: &Path,
    algorithm: HashAlgorithm,
    stat: &impl FileStat,
) -> Result<FileMetadata> {
    let file_path = folder.join(file_name);
    let stats = stat.stat(&file_path)?;
    let destination_path = fs::canonicalize(&file_path)
        .map_err(|e| Error::internal(&format!("{:?}", file_path), e))?;

    Ok(FileMetadata {
        file_name: file_name.to_string(),
        source_path: folder.to_path_buf(),
        destination_path,
        file_type: extension(file_name).to_string(),
        mime_type: FileDetector::detect_mime_type(&file_path),
        file_size: format_size(stats.size_bytes),
        file_creation_date: format_timestamp(&stats.created),
        file_modified_date: format_timestamp(&stats.modified),
        file_hash: compute_hash(&file_path, algorithm)?,
        hash_algorithm: algorithm,
        created_on: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        created_by: SYSTEM_USER.to_string(),
        version_file: 0,
    })
}

pub fn get_dates(file_name: &str, folder: &Path, stat: &impl FileStat) -> Result<VersionedFileInfo> {
    let stats = stat
        .stat(&folder.join(file_name))
        .map_err(|e| Error::internal("An error occurred while getting the dates", e))?;

    Ok(VersionedFileInfo {
        file_name: file_name.to_string(),
        file_creation_date: format_timestamp(&stats.created),
        file_modified_date: format_timestamp(&stats.modified),
    })
}
