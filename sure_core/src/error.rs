use thiserror::Error;

/// Errors produced while reading, expanding or normalizing count tables
#[derive(Debug, Error)]
pub enum SureError {
    #[error("{origin}: required column '{column}' not found")]
    SchemaMismatch { column: String, origin: String },

    #[error(
        "{}:{} variant columns have differing numbers of values ({})",
        .origin,
        .line,
        fmt_counts(.counts)
    )]
    Alignment {
        origin: String,
        line: usize,
        counts: Vec<(String, usize)>,
    },

    #[error("{origin}:{line} invalid value '{value}' in column '{column}'")]
    InvalidValue {
        origin: String,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{origin}:{line} {msg}")]
    Malformed {
        origin: String,
        line: usize,
        msg: String,
    },

    #[error("expected {expected} column sums, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("total for column '{column}' overflows")]
    Overflow { column: String },

    #[error("I/O error on {origin}: {source}")]
    Io {
        source: std::io::Error,
        origin: String,
    },
}

impl SureError {
    pub fn schema<S: Into<String>, T: Into<String>>(column: S, origin: T) -> Self {
        Self::SchemaMismatch {
            column: column.into(),
            origin: origin.into(),
        }
    }

    pub fn io<S: Into<String>>(source: std::io::Error, origin: S) -> Self {
        Self::Io {
            source,
            origin: origin.into(),
        }
    }
}

fn fmt_counts(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(c, n)| format!("{}={}", c, n))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SureError>;
