//! Loading subject sequences.
//!
//! A sequence file is either raw text or FASTA:
//!
//! - Raw text is used as-is after trimming surrounding whitespace. Interior
//!   characters (including newlines) are kept.
//! - Content starting with `>` is parsed as FASTA with noodles and the
//!   sequences of all records are concatenated in file order.
//!
//! Files ending in `.gz` or `.bgz` are decompressed first.

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;

use crate::core::sequence::Sequence;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Does the content look like FASTA?
#[must_use]
pub fn is_fasta_text(text: &str) -> bool {
    text.trim_start().starts_with('>')
}

/// Read a sequence file, decompressing gzip input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed, or a
/// FASTA parse error if the content looks like FASTA but is malformed.
pub fn parse_sequence_file(path: &Path) -> Result<Sequence, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut content = String::new();

    if is_gzipped(path) {
        BufReader::new(GzDecoder::new(file)).read_to_string(&mut content)?;
    } else {
        BufReader::new(file).read_to_string(&mut content)?;
    }

    parse_sequence_text(&content)
}

/// gzip magic number
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompress `bytes` if they start with the gzip magic number.
///
/// # Errors
///
/// Returns `ParseError::Io` if the gzip stream is corrupt.
pub fn decompress_if_gzipped(bytes: &[u8]) -> Result<Vec<u8>, ParseError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes.to_vec());
    }

    let mut decompressed = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Parse an in-memory upload (raw text or FASTA, possibly gzipped).
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the content is not UTF-8, or any
/// error from [`decompress_if_gzipped`] or [`parse_sequence_text`].
pub fn parse_sequence_bytes(bytes: &[u8]) -> Result<Sequence, ParseError> {
    let content = decompress_if_gzipped(bytes)?;
    let text = std::str::from_utf8(&content)
        .map_err(|_| ParseError::InvalidFormat("Sequence content is not UTF-8 text".to_string()))?;
    parse_sequence_text(text)
}

/// Parse sequence text (raw or FASTA).
///
/// # Errors
///
/// Returns `ParseError::Noodles` or `ParseError::InvalidFormat` if the text
/// looks like FASTA but cannot be parsed.
pub fn parse_sequence_text(text: &str) -> Result<Sequence, ParseError> {
    if is_fasta_text(text) {
        parse_fasta_text(text.trim_start())
    } else {
        Ok(Sequence::from(text.trim()))
    }
}

/// Parse FASTA text, concatenating the sequences of all records.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if a record is malformed, or
/// `ParseError::InvalidFormat` if there are no records.
pub fn parse_fasta_text(text: &str) -> Result<Sequence, ParseError> {
    let mut reader = fasta::io::Reader::new(text.as_bytes());
    let mut bases = Vec::new();
    let mut records = 0usize;

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;
        bases.extend_from_slice(record.sequence().as_ref());
        records += 1;
    }

    if records == 0 {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    if records > 1 {
        tracing::debug!("Concatenated {} FASTA records into one sequence", records);
    }

    Ok(Sequence::new(bases))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_raw_text_is_trimmed() {
        let seq = parse_sequence_text("  ACGTACGT\n\n").unwrap();
        assert_eq!(seq.as_bytes(), b"ACGTACGT");
    }

    #[test]
    fn test_raw_text_keeps_interior() {
        let seq = parse_sequence_text("ACGT\nTTTT\n").unwrap();
        assert_eq!(seq.as_bytes(), b"ACGT\nTTTT");
    }

    #[test]
    fn test_empty_text() {
        let seq = parse_sequence_text("   \n").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_fasta_text() {
        let seq = parse_sequence_text(">sample1 description\nACGTACGT\nACGT\n").unwrap();
        assert_eq!(seq.as_bytes(), b"ACGTACGTACGT");
    }

    #[test]
    fn test_fasta_multiple_records_concatenated() {
        let seq = parse_sequence_text(">a\nAAAA\n>b\nCCCC\n").unwrap();
        assert_eq!(seq.as_bytes(), b"AAAACCCC");
    }

    #[test]
    fn test_parse_plain_file() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"TTACGTTT\n").unwrap();
        temp.flush().unwrap();

        let seq = parse_sequence_file(temp.path()).unwrap();
        assert_eq!(seq.as_bytes(), b"TTACGTTT");
    }

    #[test]
    fn test_parse_gzipped_fasta_file() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">chr1\nGATTACA\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let seq = parse_sequence_file(temp.path()).unwrap();
        assert_eq!(seq.as_bytes(), b"GATTACA");
    }

    #[test]
    fn test_parse_bytes_plain_and_gzipped() {
        let seq = parse_sequence_bytes(b"ACGT\n").unwrap();
        assert_eq!(seq.as_bytes(), b"ACGT");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">s\nCCGG\n").unwrap();
        let compressed = encoder.finish().unwrap();
        let seq = parse_sequence_bytes(&compressed).unwrap();
        assert_eq!(seq.as_bytes(), b"CCGG");
    }

    #[test]
    fn test_parse_bytes_rejects_non_utf8() {
        assert!(matches!(
            parse_sequence_bytes(&[0xFF, 0xFE, 0x41]),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_sequence_file(Path::new("/nonexistent/sample.txt"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
