use serde::Serialize;

use super::types::GrowthParameters;

pub const DEFAULT_MONTHLY_AMOUNT: f64 = 5_000.0;
pub const DEFAULT_YEARS: u32 = 10;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 12.0;
pub const DEFAULT_STEP_UP_RATE_PERCENT: f64 = 10.0;
pub const DEFAULT_INFLATION_RATE_PERCENT: f64 = 6.0;
pub const DEFAULT_TARGET_AMOUNT: f64 = 1_000_000.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Conservative,
    Moderate,
    Aggressive,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Conservative,
        Scenario::Moderate,
        Scenario::Aggressive,
    ];

    pub fn monthly_amount(self) -> f64 {
        match self {
            Scenario::Conservative => 3_000.0,
            Scenario::Moderate => 5_000.0,
            Scenario::Aggressive => 10_000.0,
        }
    }

    pub fn years(self) -> u32 {
        match self {
            Scenario::Conservative => 15,
            Scenario::Moderate => 10,
            Scenario::Aggressive => 8,
        }
    }

    pub fn annual_rate_percent(self) -> f64 {
        match self {
            Scenario::Conservative => 10.0,
            Scenario::Moderate => 12.0,
            Scenario::Aggressive => 15.0,
        }
    }

    /// Presets are plain investment plans: no step-up, no inflation.
    pub fn parameters(self) -> GrowthParameters {
        GrowthParameters {
            periodic_amount: self.monthly_amount(),
            annual_rate_percent: self.annual_rate_percent(),
            years: self.years(),
            step_up_rate_percent: None,
            inflation_rate_percent: None,
        }
    }
}
