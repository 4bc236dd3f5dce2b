use crate::models::category;

/// Longest sanitized base name kept in a stored filename, in bytes.
/// The stored-name prefix adds 25 more, staying under common 255-byte limits.
pub const MAX_BASE_NAME_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn is_reserved(c: char) -> bool {
    c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';' | '#' | '%'
        )
}

/// Sanitizes a client-supplied filename into a safe base name.
///
/// Only the last path segment survives, whichever separator the client
/// used. Reserved and control characters become `_`, leading dots are
/// stripped so the result can never be hidden or relative.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    let last_segment = filename.rsplit(['/', '\\']).next().unwrap_or("");

    if last_segment.len() != filename.len() {
        tracing::warn!("Path components stripped from uploaded filename: {:?}", filename);
    }

    let replaced: String = last_segment
        .chars()
        .map(|c| if is_reserved(c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_start_matches('.').trim_end_matches('.');
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '_') {
        return Err(ValidationError::new(
            "INVALID_FILENAME",
            "Invalid filename",
        ));
    }

    Ok(truncate_keeping_extension(trimmed, MAX_BASE_NAME_LEN))
}

/// Cuts the stem on a char boundary so the whole name fits `max_len` bytes.
fn truncate_keeping_extension(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if ext.len() + 1 < max_len => (stem, Some(ext)),
        _ => (name, None),
    };

    let budget = max_len - ext.map(|e| e.len() + 1).unwrap_or(0);
    let mut end = budget.min(stem.len());
    while !stem.is_char_boundary(end) {
        end -= 1;
    }

    match ext {
        Some(ext) => format!("{}.{}", &stem[..end], ext),
        None => stem[..end].to_string(),
    }
}

/// Full validation pipeline for an uploaded file's name.
/// Returns the sanitized base name used to build the stored name.
pub fn validate_upload_name(filename: &str) -> Result<String, ValidationError> {
    // 1. Presence
    if filename.trim().is_empty() {
        return Err(ValidationError::new(
            "EMPTY_FILENAME",
            "Filename cannot be empty",
        ));
    }

    // 2. Extension must belong to a known category
    if !category::is_supported(filename) {
        return Err(ValidationError::new(
            "UNSUPPORTED_TYPE",
            "Unsupported file type",
        ));
    }

    // 3. Sanitize
    let sanitized = sanitize_filename(filename)?;

    // 4. Sanitizing must not have eaten the extension
    if !category::is_supported(&sanitized) {
        return Err(ValidationError::new(
            "INVALID_FILENAME",
            "Invalid filename",
        ));
    }

    Ok(sanitized)
}
