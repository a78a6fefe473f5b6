use crate::report::{Candidate, FileError};
use crate::validator;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::trace;

lazy_static::lazy_static! {
    static ref CANDIDATE_RE: Regex =
        Regex::new(r"[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}|[0-9]{11}")
            .expect("candidate pattern is valid");
}

/// Text encodings tried, in order, when decoding a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value, so
    /// decoding never fails.
    Latin1,
}

pub const DEFAULT_ENCODINGS: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Latin1];

impl TextEncoding {
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf8"),
            TextEncoding::Latin1 => write!(f, "latin1"),
        }
    }
}

/// Decode with the first encoding that accepts the bytes.
pub fn decode(bytes: &[u8], encodings: &[TextEncoding]) -> Option<(String, TextEncoding)> {
    encodings
        .iter()
        .find_map(|&encoding| encoding.decode(bytes).map(|text| (text, encoding)))
}

/// All identifier-shaped fragments of `text`, left to right, each validated.
pub fn find_candidates(text: &str) -> Vec<Candidate> {
    CANDIDATE_RE
        .find_iter(text)
        .map(|m| {
            let matched = m.as_str().to_string();
            let digits = validator::normalize(&matched);
            let valid = validator::is_valid(&digits);
            Candidate {
                matched,
                digits,
                valid,
            }
        })
        .collect()
}

/// Read, decode and scan one file.
///
/// Binary content that decodes under a permissive encoding is scanned like
/// any other text.
pub fn extract_file(path: &Path, encodings: &[TextEncoding]) -> Result<Vec<Candidate>, FileError> {
    let bytes = fs::read(path)?;
    let (text, encoding) = decode(&bytes, encodings).ok_or(FileError::Undecodable)?;
    trace!("Decoded {} as {}", path.display(), encoding);

    let candidates = find_candidates(&text);
    for candidate in &candidates {
        trace!(
            "{}: {} ({})",
            path.display(),
            candidate.matched,
            if candidate.valid { "valid" } else { "invalid" }
        );
    }
    Ok(candidates)
}
