use thiserror::Error;

/// Errors surfaced by the edit session and its collaborators.
///
/// Every variant maps to a stable machine code (see [`EditError::code`]) which
/// the browser bindings forward verbatim in their error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("auxiliary channel has {aux} values for {points} points")]
    LengthMismatch { points: usize, aux: usize },

    #[error("array '{param}' must hold {expected} values, got {got}")]
    InvalidArray {
        param: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("array '{param}' length {got} is not a multiple of {stride}")]
    RaggedArray {
        param: &'static str,
        stride: usize,
        got: usize,
    },

    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },

    #[error("parameter '{param}' = {got} is out of range [{min}, {max}]")]
    OutOfRange {
        param: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },

    #[error("{got} points exceeds the limit of {max}")]
    TooManyPoints { got: usize, max: usize },

    #[error("unknown axis mode '{0}'")]
    InvalidMode(String),

    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("store failure: {0}")]
    Store(String),

    #[error("no trajectory loaded")]
    NotLoaded,
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::IndexOutOfRange { .. } => "invalid_index",
            EditError::LengthMismatch { .. } => "length_mismatch",
            EditError::InvalidArray { .. } | EditError::RaggedArray { .. } => "invalid_array",
            EditError::NonFinite { .. } => "non_finite",
            EditError::OutOfRange { .. } => "out_of_range",
            EditError::TooManyPoints { .. } => "too_many_points",
            EditError::InvalidMode(_) => "invalid_mode",
            EditError::InvalidJson(_) => "invalid_json",
            EditError::Store(_) => "store",
            EditError::NotLoaded => "not_loaded",
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
