use thiserror::Error;

/// Errors surfaced by dictionary construction and lookup.
///
/// Malformed dictionary records are deliberately not errors: they are
/// skipped and tallied (see `SpellCorrector::skipped_record_count`).
#[derive(Debug, Error)]
pub enum CorrectorError {
    /// The requested lookup bound exceeds what the index was built for.
    #[error("edit distance {requested} exceeds the index maximum {maximum}")]
    EditDistanceOutOfRange { requested: usize, maximum: usize },

    /// Fingerprints cover at most `prefix_length` characters, so the prefix
    /// must be long enough to absorb every indexed deletion.
    #[error(
        "prefix length {prefix_length} is shorter than the maximum edit distance {max_edit_distance}"
    )]
    PrefixTooShort {
        prefix_length: usize,
        max_edit_distance: usize,
    },

    /// The dictionary source could not be opened or read.
    #[error("failed to read dictionary source")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CorrectorError>;
