use crate::error::{Error, Result};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Bytes read per iteration while hashing.
const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            other => Err(Error::Internal(format!("Unsupported hash algorithm: {}", other))),
        }
    }
}

/// Compute the lowercase hex digest of the file at `path`.
///
/// The file is streamed in fixed-size chunks, so size is not bounded by memory.
pub fn compute_hash(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| Error::internal(&format!("Failed to open {:?} for hashing", path), e))?;

    match algorithm {
        HashAlgorithm::Md5 => digest_reader::<Md5, _>(file),
        HashAlgorithm::Sha1 => digest_reader::<Sha1, _>(file),
        HashAlgorithm::Sha256 => digest_reader::<Sha256, _>(file),
    }
    .map_err(|e| Error::internal(&format!("Failed to hash {:?}", path), e))
}

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("hello.txt");
        fs::write(&path, b"hello world")?;

        assert_eq!(
            compute_hash(&path, HashAlgorithm::Md5)?,
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(
            compute_hash(&path, HashAlgorithm::Sha1)?,
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(
            compute_hash(&path, HashAlgorithm::Sha256)?,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );

        Ok(())
    }

    #[test]
    fn test_hash_stable_until_modified() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("report.pdf");
        fs::write(&path, b"first draft")?;

        let first = compute_hash(&path, HashAlgorithm::default())?;
        let second = compute_hash(&path, HashAlgorithm::default())?;
        assert_eq!(first, second);

        fs::write(&path, b"second draft")?;
        let changed = compute_hash(&path, HashAlgorithm::default())?;
        assert_ne!(first, changed);

        Ok(())
    }

    #[test]
    fn test_digest_lengths() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("large.bin");
        // spans several chunks with a partial tail
        fs::write(&path, vec![7u8; CHUNK_SIZE * 3 + 17])?;

        assert_eq!(compute_hash(&path, HashAlgorithm::Md5)?.len(), 32);
        assert_eq!(compute_hash(&path, HashAlgorithm::Sha1)?.len(), 40);
        let sha = compute_hash(&path, HashAlgorithm::Sha256)?;
        assert_eq!(sha.len(), 64);
        assert!(sha.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_internal_error() {
        let result = compute_hash(Path::new("/definitely/not/here.bin"), HashAlgorithm::Md5);
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
        assert_eq!(HashAlgorithm::Sha1.to_string(), "sha1");
    }
}
