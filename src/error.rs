use thiserror::Error;

/// Failure signal for every library operation.
///
/// Filesystem problems, missing folders and unreadable files all collapse into
/// `Internal` with a message describing the failed operation. Only a failing
/// metadata store query is reported separately.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Metadata store unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Wrap any displayable cause as an `Internal` error with a context prefix.
    pub fn internal(context: &str, cause: impl std::fmt::Display) -> Self {
        Error::Internal(format!("{}: {}", context, cause))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_message() {
        let err = Error::internal("An error occurred while getting the metadata", "no such file");
        assert_eq!(
            err.to_string(),
            "An error occurred while getting the metadata: no such file"
        );
    }
}
