//! Filename helpers shared by the resolver, duplicate check and metadata code.
//!
//! Grouping and extension stripping split on different dots: `first_dot_stem`
//! decides which files belong to one document family, `strip_extension` only
//! removes the final suffix.

/// Portion of `name` before its first `.`; the whole name when there is none.
pub fn first_dot_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Portion of `name` before its last `.`; the whole name when there is none.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Characters after the last `.` of the final path component, empty if none.
///
/// Leading-dot names such as `.env` have no extension.
pub fn extension(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}
