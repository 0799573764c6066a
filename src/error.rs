use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the post-processing stages.
///
/// Per-frame processing never fails, so every variant here is a construction-time problem.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("distance matrix must be square, got a row of length {row_len} in a {rows}-row matrix")]
    NonSquareMatrix { rows: usize, row_len: usize },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Checks that `value` is finite and not negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(Error::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_non_negative(name, value)?;
    if value == 0.0 {
        return Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}
