use thiserror::Error;

/// Failures surfaced before or during a render.
///
/// Every render is a fresh, idempotent attempt: nothing here is retried, the
/// only recovery is a full re-render with corrected input. Malformed rows are
/// rejected up front instead of flowing into the stacked sums as NaN.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("row {row}: invalid {field} {value:?}: {reason}")]
    InvalidInput {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("no rows to lay out")]
    EmptyData,

    #[error("unknown palette name: {0:?}")]
    UnknownPalette(String),

    #[error("unknown offset policy: {0:?}")]
    UnknownOffset(String),

    #[error("unknown interpolation style: {0:?}")]
    UnknownCurve(String),

    #[error("unknown tick unit: {0:?}")]
    UnknownTickUnit(String),

    #[error("drawing backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
