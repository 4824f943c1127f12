use super::error::GrowthResult;
use super::growth::{
    project_regular, project_step_up, required_contribution, total_contributed_regular,
    total_contributed_step_up,
};
use super::types::{Plan, SeriesPoint, TimeSeries};

/// Year-by-year trend from year 0 to the plan's horizon, in nominal terms.
///
/// Each point re-runs the primitives with the horizon cut to that year, so a
/// step-up plan re-accumulates every tranche per point.
pub fn build_time_series(plan: &Plan) -> GrowthResult<TimeSeries> {
    let (periodic_amount, annual_rate_percent, step_up) = match plan {
        Plan::Investment(params) => (
            params.periodic_amount,
            params.annual_rate_percent,
            params.step_up_rate_percent,
        ),
        Plan::Target(params) => (
            required_contribution(params.target_amount, params.annual_rate_percent, params.years)?,
            params.annual_rate_percent,
            None,
        ),
    };

    let years = plan.years();
    let mut series = Vec::with_capacity(years as usize + 1);
    series.push(SeriesPoint::ORIGIN);
    for year in 1..=years {
        let (cumulative_contributed, projected_value) = match step_up {
            Some(step_up) => (
                total_contributed_step_up(periodic_amount, year, step_up)?,
                project_step_up(periodic_amount, annual_rate_percent, year, step_up)?,
            ),
            None => (
                total_contributed_regular(periodic_amount, year)?,
                project_regular(periodic_amount, annual_rate_percent, year)?,
            ),
        };
        series.push(SeriesPoint {
            year,
            cumulative_contributed,
            projected_value,
        });
    }
    Ok(series)
}
