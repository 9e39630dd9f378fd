use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Integer id shared by every file presumed to be a version of one document.
pub type Category = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub category: Category,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Source of the (name, category) pairs already known for a folder.
pub trait MetadataStore {
    fn all_file_names_and_categories(&self) -> Result<Vec<FileRecord>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<FileRecord>,
}

impl InMemoryStore {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }
}

impl MetadataStore for InMemoryStore {
    fn all_file_names_and_categories(&self) -> Result<Vec<FileRecord>> {
        Ok(self.records.clone())
    }
}

/// Store persisted as a JSON array of records on disk.
///
/// A catalog that does not exist yet reads as empty.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: FileRecord) -> Result<()> {
        let mut records = self.all_file_names_and_categories()?;
        log::info!(
            "Registering {} under category {} in {:?}",
            record.name,
            record.category,
            self.path
        );
        records.push(record);
        self.write(&records)
    }

    fn write(&self, records: &[FileRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::internal("Failed to create catalog directory", e))?;
        }

        let contents = serde_json::to_string_pretty(records)
            .map_err(|e| Error::internal("Failed to serialize catalog", e))?;

        fs::write(&self.path, contents).map_err(|e| Error::internal("Failed to write catalog", e))
    }
}

impl MetadataStore for CatalogStore {
    fn all_file_names_and_categories(&self) -> Result<Vec<FileRecord>> {
        if !self.path.exists() {
            log::debug!("Catalog {:?} not found, treating as empty", self.path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            Error::MetadataUnavailable(format!("Failed to read catalog {:?}: {}", self.path, e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            Error::MetadataUnavailable(format!("Failed to parse catalog {:?}: {}", self.path, e))
        })
    }
}
