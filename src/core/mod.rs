mod error;
mod format;
mod growth;
mod projection;
mod scenarios;
mod series;
mod types;

pub use error::{GrowthError, GrowthResult};
pub use format::{format_currency, format_number};
pub use growth::{
    inflation_adjust, project_regular, project_step_up, required_contribution,
    total_contributed_regular, total_contributed_step_up,
};
pub use projection::project;
pub use scenarios::{
    DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_INFLATION_RATE_PERCENT, DEFAULT_MONTHLY_AMOUNT,
    DEFAULT_STEP_UP_RATE_PERCENT, DEFAULT_TARGET_AMOUNT, DEFAULT_YEARS, Scenario,
};
pub use series::build_time_series;
pub use types::{
    GrowthParameters, Plan, ProjectionResult, SeriesPoint, TargetParameters, TimeSeries,
};
