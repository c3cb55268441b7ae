//! Simple and annualized return on investment

use crate::error::ReturnError;

/// Simple return on investment as a decimal (0.5 = 50%)
///
/// `(final_value - initial_investment) / initial_investment`
pub fn roi(initial_investment: f64, final_value: f64) -> Result<f64, ReturnError> {
    if initial_investment == 0.0 {
        return Err(ReturnError::zero_investment());
    }
    Ok((final_value - initial_investment) / initial_investment)
}

/// Annualized return on investment as a decimal
///
/// `(1 + roi)^(1 / years) - 1`
///
/// # Errors
/// * `InvalidInput` when `years` or `initial_investment` is zero
/// * `Domain` when the investment lost more than its initial value
///   (`1 + roi < 0`) and `1 / years` is not a whole number, since the
///   result would not be real
pub fn annualized_roi(
    initial_investment: f64,
    final_value: f64,
    years: f64,
) -> Result<f64, ReturnError> {
    if years == 0.0 {
        return Err(ReturnError::zero_years());
    }

    let growth = 1.0 + roi(initial_investment, final_value)?;
    let exponent = 1.0 / years;

    if growth < 0.0 && exponent.fract() != 0.0 {
        return Err(ReturnError::Domain { base: growth, exponent });
    }

    Ok(growth.powf(exponent) - 1.0)
}
