use thiserror::Error;

/// Errors raised by the growth model before any compounding is evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("invalid parameter: {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A contribution cannot be solved for over zero months.
    #[error("invalid parameter: years must be > 0 to solve for a contribution")]
    ZeroHorizon,
}

pub type GrowthResult<T> = Result<T, GrowthError>;

pub(crate) fn finite(name: &'static str, value: f64) -> GrowthResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GrowthError::InvalidParameter { name, value })
    }
}

/// Finite inputs can still compound past `f64::MAX`; such results are
/// reported against the figure that overflowed.
pub(crate) fn finite_output(name: &'static str, value: f64) -> GrowthResult<f64> {
    finite(name, value)
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> GrowthResult<f64> {
    if finite(name, value)? < 0.0 {
        return Err(GrowthError::InvalidParameter { name, value });
    }
    Ok(value)
}

/// Return rates may be negative, but not so negative that the compounding
/// base `1 + rate` stops being positive.
pub(crate) fn return_rate(name: &'static str, value: f64) -> GrowthResult<f64> {
    if finite(name, value)? <= -100.0 {
        return Err(GrowthError::InvalidParameter { name, value });
    }
    Ok(value)
}
