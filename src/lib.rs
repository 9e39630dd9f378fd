//! File-management helpers for an upload service: content hashing, metadata
//! extraction, duplicate detection and version inference for repeated uploads
//! of the same document.

pub mod config;
pub mod detector;
pub mod duplicate;
pub mod error;
pub mod hasher;
pub mod metadata;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use hasher::{compute_hash, HashAlgorithm};
pub use metadata::{get_dates, get_metadata, FileMetadata, FileStat, FsStat, VersionedFileInfo};
pub use resolver::{extract_version, resolve_version, Resolution, VersionListing, VersionResolver};
pub use store::{CatalogStore, Category, FileRecord, InMemoryStore, MetadataStore};
