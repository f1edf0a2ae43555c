//! Error type shared by the kinematics, normalization and file collaborators.
//!
//! Shape errors are raised at the API boundary. Numerical singularities
//! (division by a zero stroke velocity) are never errors; they surface as
//! `NaN`/`Inf` in the returned arrays.

use std::fmt;
use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Everything that can go wrong in this crate.
#[derive(Debug)]
pub enum CalcError {
    /// Two arrays that are evaluated elementwise have different lengths.
    LengthMismatch {
        /// Length the other inputs agree on.
        expected: usize,
        /// Length actually received.
        found: usize,
    },
    /// An operation that needs at least one sample received none.
    Empty(&'static str),
    /// A geometric construction received fewer points than it needs.
    TooFewPoints {
        /// What was being built.
        what: &'static str,
        /// Minimum number of points.
        required: usize,
        /// Number of points received.
        found: usize,
    },
    /// A scalar argument outside its valid range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A data file has a malformed row.
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        message: String,
    },
    /// The body file header disagrees with the number of coordinate rows.
    BodyPointCount {
        /// Count on the header line.
        declared: usize,
        /// Coordinate rows actually present.
        found: usize,
    },
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// The table reader or writer failed.
    Polars(PolarsError),
    /// The case file is not valid TOML or has wrongly typed fields.
    Config(toml::de::Error),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::LengthMismatch { expected, found } => write!(
                f,
                "input arrays must have matching length (expected {expected}, found {found})"
            ),
            CalcError::Empty(what) => write!(f, "{what} must contain at least one sample"),
            CalcError::TooFewPoints {
                what,
                required,
                found,
            } => write!(f, "{what} needs at least {required} points, got {found}"),
            CalcError::InvalidParameter { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            CalcError::Parse {
                path,
                line,
                message,
            } => write!(f, "{}:{}: {}", path.display(), line, message),
            CalcError::BodyPointCount { declared, found } => write!(
                f,
                "body file declares {declared} points but contains {found}"
            ),
            CalcError::Io(e) => write!(f, "I/O error: {e}"),
            CalcError::Polars(e) => write!(f, "table error: {e}"),
            CalcError::Config(e) => write!(f, "invalid case file: {e}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Io(e) => Some(e),
            CalcError::Polars(e) => Some(e),
            CalcError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CalcError {
    fn from(e: std::io::Error) -> Self {
        CalcError::Io(e)
    }
}

impl From<PolarsError> for CalcError {
    fn from(e: PolarsError) -> Self {
        CalcError::Polars(e)
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(e: toml::de::Error) -> Self {
        CalcError::Config(e)
    }
}

/// Fail fast unless `found` equals `expected`.
pub(crate) fn ensure_len(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(CalcError::LengthMismatch { expected, found })
    }
}
