use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

pub struct FileDetector;

impl FileDetector {
    /// MIME type of the file at `path`, sniffed from its leading bytes with an
    /// extension-based fallback.
    pub fn detect_mime_type(path: &Path) -> String {
        match infer::get_from_path(path) {
            Ok(Some(kind)) => {
                log::debug!("MIME {} detected from content of {:?}", kind.mime_type(), path);
                return kind.mime_type().to_string();
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not read {:?} for type detection: {}", path, e),
        }

        log::debug!("Could not detect file type by magic bytes, falling back to extension");
        Self::detect_by_extension(path).to_string()
    }

    fn detect_by_extension(path: &Path) -> &'static str {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            // Documents
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "xls" => "application/vnd.ms-excel",
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "ppt" => "application/vnd.ms-powerpoint",
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "odt" => "application/vnd.oasis.opendocument.text",
            "rtf" => "application/rtf",

            // Plain text
            "txt" | "log" => "text/plain",
            "csv" => "text/csv",
            "md" => "text/markdown",
            "html" | "htm" => "text/html",
            "json" => "application/json",
            "xml" => "application/xml",
            "yaml" | "yml" => "application/yaml",
            "toml" => "application/toml",

            _ => FALLBACK_MIME,
        }
    }
}
