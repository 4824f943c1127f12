use serde::Serialize;

/// Inputs for investment mode: a monthly contribution compounding for `years`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthParameters {
    pub periodic_amount: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    /// Annual increase of the monthly contribution; `None` keeps it flat.
    pub step_up_rate_percent: Option<f64>,
    /// Inflation used to deflate the maturity amount; `None` skips it.
    pub inflation_rate_percent: Option<f64>,
}

/// Inputs for target mode: the monthly contribution is solved for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetParameters {
    pub target_amount: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub inflation_rate_percent: Option<f64>,
}

/// Serializes as the bare parameter record; callers report the mode alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plan {
    Investment(GrowthParameters),
    Target(TargetParameters),
}

impl Plan {
    pub fn years(&self) -> u32 {
        match self {
            Plan::Investment(params) => params.years,
            Plan::Target(params) => params.years,
        }
    }

    pub fn inflation_rate_percent(&self) -> Option<f64> {
        match self {
            Plan::Investment(params) => params.inflation_rate_percent,
            Plan::Target(params) => params.inflation_rate_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_contributed: f64,
    pub maturity_amount: f64,
    pub estimated_growth: f64,
    pub inflation_adjusted_maturity: Option<f64>,
    pub required_periodic_amount: Option<f64>,
}

impl ProjectionResult {
    pub(crate) fn new(
        total_contributed: f64,
        maturity_amount: f64,
        inflation_adjusted_maturity: Option<f64>,
        required_periodic_amount: Option<f64>,
    ) -> Self {
        Self {
            total_contributed,
            maturity_amount,
            estimated_growth: maturity_amount - total_contributed,
            inflation_adjusted_maturity,
            required_periodic_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub year: u32,
    pub cumulative_contributed: f64,
    pub projected_value: f64,
}

impl SeriesPoint {
    pub const ORIGIN: SeriesPoint = SeriesPoint {
        year: 0,
        cumulative_contributed: 0.0,
        projected_value: 0.0,
    };
}

pub type TimeSeries = Vec<SeriesPoint>;
