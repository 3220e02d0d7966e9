//! Centralized input validation for uploads and sequences.

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
    #[error("Sequence too long: {length} bases exceeds maximum of {max}")]
    SequenceTooLong { length: usize, max: usize },
    #[error("Comparison too large: {cells} cells exceeds maximum of {max}")]
    ComparisonTooLarge { cells: u64, max: u64 },
}

/// Secure filename validation to prevent directory traversal and other attacks
///
/// Validates and sanitizes filenames by:
/// - Checking length limits
/// - Preventing directory traversal (../, ..\\)
/// - Removing potentially dangerous characters
/// - Ensuring filename is not empty after sanitization
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    if filename.contains('\0') || filename.chars().any(|c| ('\x01'..='\x1F').contains(&c)) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    // Hidden files only when they carry a sequence extension
    if sanitized.starts_with('.') && !has_known_extension(&sanitized) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Check if filename has a known sequence or catalog extension
pub(crate) fn has_known_extension(filename: &str) -> bool {
    let safe_extensions = [
        ".txt", ".seq", ".fa", ".fasta", ".fna", ".gz", ".bgz", ".json",
    ];

    let lower = filename.to_lowercase();
    safe_extensions.iter().any(|ext| lower.ends_with(ext))
}

/// Validate that uploaded content is non-empty UTF-8 text
///
/// Sequence uploads are always text. Content with more than 5% control
/// bytes is rejected as binary.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if the content is empty,
/// looks binary, or fails UTF-8 validation.
pub fn validate_file_content(content: &[u8]) -> Result<(), ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }

    let non_printable_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    if content.len() > 100 && non_printable_count > content.len() / 20 {
        return Err(ValidationError::InvalidFileContent);
    }

    if std::str::from_utf8(content).is_err() {
        return Err(ValidationError::InvalidFileContent);
    }

    Ok(())
}

/// Reject sequences longer than `max` bases.
///
/// # Errors
///
/// Returns `ValidationError::SequenceTooLong` when `length > max`.
pub fn validate_sequence_length(length: usize, max: usize) -> Result<(), ValidationError> {
    if length > max {
        return Err(ValidationError::SequenceTooLong { length, max });
    }
    Ok(())
}

/// Reject pairwise comparisons whose `len1 * len2` work exceeds `max`.
///
/// # Errors
///
/// Returns `ValidationError::ComparisonTooLarge` when the product is over `max`.
pub fn validate_pairwise_work(len1: usize, len2: usize, max: u64) -> Result<(), ValidationError> {
    let cells = (len1 as u64).saturating_mul(len2 as u64);
    if cells > max {
        return Err(ValidationError::ComparisonTooLarge { cells, max });
    }
    Ok(())
}

/// Filename and content checks for one uploaded sequence field
///
/// Returns the sanitized filename, if one was supplied.
///
/// # Errors
///
/// Returns a `ValidationError` if filename or content validation fails.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<Option<String>, ValidationError> {
    let validated_filename = filename.map(validate_filename).transpose()?;
    validate_file_content(content)?;
    Ok(validated_filename)
}
