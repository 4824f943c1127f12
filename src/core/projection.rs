use super::error::GrowthResult;
use super::growth::{
    inflation_adjust, project_regular, project_step_up, required_contribution,
    total_contributed_regular, total_contributed_step_up,
};
use super::types::{GrowthParameters, Plan, ProjectionResult, TargetParameters};

pub fn project(plan: &Plan) -> GrowthResult<ProjectionResult> {
    match plan {
        Plan::Investment(params) => project_investment(params),
        Plan::Target(params) => project_target(params),
    }
}

fn project_investment(params: &GrowthParameters) -> GrowthResult<ProjectionResult> {
    let (total_contributed, maturity_amount) = match params.step_up_rate_percent {
        Some(step_up) => (
            total_contributed_step_up(params.periodic_amount, params.years, step_up)?,
            project_step_up(
                params.periodic_amount,
                params.annual_rate_percent,
                params.years,
                step_up,
            )?,
        ),
        None => (
            total_contributed_regular(params.periodic_amount, params.years)?,
            project_regular(
                params.periodic_amount,
                params.annual_rate_percent,
                params.years,
            )?,
        ),
    };
    let inflation_adjusted =
        deflate_maturity(maturity_amount, params.inflation_rate_percent, params.years)?;

    Ok(ProjectionResult::new(
        total_contributed,
        maturity_amount,
        inflation_adjusted,
        None,
    ))
}

fn project_target(params: &TargetParameters) -> GrowthResult<ProjectionResult> {
    let required = required_contribution(
        params.target_amount,
        params.annual_rate_percent,
        params.years,
    )?;
    let total_contributed = total_contributed_regular(required, params.years)?;
    let inflation_adjusted =
        deflate_maturity(params.target_amount, params.inflation_rate_percent, params.years)?;

    Ok(ProjectionResult::new(
        total_contributed,
        params.target_amount,
        inflation_adjusted,
        Some(required),
    ))
}

fn deflate_maturity(
    maturity_amount: f64,
    inflation_rate_percent: Option<f64>,
    years: u32,
) -> GrowthResult<Option<f64>> {
    inflation_rate_percent
        .map(|rate| inflation_adjust(maturity_amount, rate, years))
        .transpose()
}
