use super::error::{GrowthError, GrowthResult, finite, finite_output, non_negative, return_rate};

const MONTHS_PER_YEAR: f64 = 12.0;

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / MONTHS_PER_YEAR / 100.0
}

fn months(years: u32) -> f64 {
    years as f64 * MONTHS_PER_YEAR
}

/// Future value of one unit paid at the start of each month for `months`.
///
/// `(1 + r)^n - 1` is taken through `ln_1p`/`exp_m1` so rates too small to
/// move `1 + r` still converge on the zero-rate factor `n`. The factor is
/// above `n` for any positive rate and below it for any negative one; the
/// bound keeps rounding near zero from crossing it.
fn annuity_due_factor(monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate == 0.0 {
        return months;
    }
    let factor = (months * monthly_rate.ln_1p()).exp_m1() / monthly_rate * (1.0 + monthly_rate);
    if monthly_rate > 0.0 {
        factor.max(months)
    } else {
        factor.min(months)
    }
}

/// Maturity of a flat monthly contribution compounded monthly.
pub fn project_regular(
    periodic_amount: f64,
    annual_rate_percent: f64,
    years: u32,
) -> GrowthResult<f64> {
    let periodic_amount = non_negative("periodic_amount", periodic_amount)?;
    let annual_rate_percent = return_rate("annual_rate_percent", annual_rate_percent)?;
    finite_output(
        "maturity_amount",
        regular_maturity(periodic_amount, annual_rate_percent, years),
    )
}

fn regular_maturity(periodic_amount: f64, annual_rate_percent: f64, years: u32) -> f64 {
    periodic_amount * annuity_due_factor(monthly_rate(annual_rate_percent), months(years))
}

/// Maturity of a contribution that steps up once a year.
///
/// Each year's twelve payments form a tranche: the tranche is valued as a
/// one-year SIP and then grown annually for the years left in the horizon.
/// This is not equivalent to any single blended rate.
pub fn project_step_up(
    initial_amount: f64,
    annual_rate_percent: f64,
    years: u32,
    step_up_rate_percent: f64,
) -> GrowthResult<f64> {
    let initial_amount = non_negative("periodic_amount", initial_amount)?;
    let annual_rate_percent = return_rate("annual_rate_percent", annual_rate_percent)?;
    let step_up_rate_percent = non_negative("step_up_rate_percent", step_up_rate_percent)?;

    let annual_growth = 1.0 + annual_rate_percent / 100.0;
    let step_up = 1.0 + step_up_rate_percent / 100.0;
    let mut total = 0.0;
    let mut current_amount = initial_amount;
    for year in 1..=years {
        let tranche = regular_maturity(current_amount, annual_rate_percent, 1);
        total += tranche * annual_growth.powf((years - year) as f64);
        current_amount *= step_up;
    }
    finite_output("maturity_amount", total)
}

/// Monthly contribution that `project_regular` grows into `target_amount`.
pub fn required_contribution(
    target_amount: f64,
    annual_rate_percent: f64,
    years: u32,
) -> GrowthResult<f64> {
    let target_amount = non_negative("target_amount", target_amount)?;
    let annual_rate_percent = return_rate("annual_rate_percent", annual_rate_percent)?;
    if years == 0 {
        return Err(GrowthError::ZeroHorizon);
    }
    finite_output(
        "required_periodic_amount",
        target_amount / annuity_due_factor(monthly_rate(annual_rate_percent), months(years)),
    )
}

/// Deflates a nominal amount `years` into the future to today's money.
pub fn inflation_adjust(amount: f64, inflation_rate_percent: f64, years: u32) -> GrowthResult<f64> {
    let amount = finite("amount", amount)?;
    let inflation_rate_percent = non_negative("inflation_rate_percent", inflation_rate_percent)?;
    finite_output(
        "inflation_adjusted_amount",
        amount / (1.0 + inflation_rate_percent / 100.0).powf(years as f64),
    )
}

pub fn total_contributed_regular(periodic_amount: f64, years: u32) -> GrowthResult<f64> {
    let periodic_amount = non_negative("periodic_amount", periodic_amount)?;
    finite_output("total_contributed", periodic_amount * months(years))
}

/// Sum of all payments when the monthly amount steps up every year.
pub fn total_contributed_step_up(
    initial_amount: f64,
    years: u32,
    step_up_rate_percent: f64,
) -> GrowthResult<f64> {
    let initial_amount = non_negative("periodic_amount", initial_amount)?;
    let step_up = 1.0 + non_negative("step_up_rate_percent", step_up_rate_percent)? / 100.0;
    let mut total = 0.0;
    let mut current_amount = initial_amount;
    for _ in 0..years {
        total += current_amount * MONTHS_PER_YEAR;
        current_amount *= step_up;
    }
    finite_output("total_contributed", total)
}
