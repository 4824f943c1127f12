use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_INFLATION_RATE_PERCENT, DEFAULT_MONTHLY_AMOUNT,
    DEFAULT_STEP_UP_RATE_PERCENT, DEFAULT_TARGET_AMOUNT, DEFAULT_YEARS, GrowthParameters, Plan,
    ProjectionResult, Scenario, TargetParameters, TimeSeries, build_time_series,
    format_currency, format_number, project,
};

const MAX_YEARS: u32 = 100;
const MAX_RATE_PERCENT: f64 = 100.0;
const MAX_AMOUNT: f64 = 1e12;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliMode {
    Investment,
    Target,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliScenario {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<CliScenario> for Scenario {
    fn from(value: CliScenario) -> Self {
        match value {
            CliScenario::Conservative => Scenario::Conservative,
            CliScenario::Moderate => Scenario::Moderate,
            CliScenario::Aggressive => Scenario::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiMode {
    #[serde(alias = "sip", alias = "regular")]
    Investment,
    #[serde(alias = "goal")]
    Target,
}

impl From<ApiMode> for CliMode {
    fn from(value: ApiMode) -> Self {
        match value {
            ApiMode::Investment => CliMode::Investment,
            ApiMode::Target => CliMode::Target,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiScenario {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<ApiScenario> for CliScenario {
    fn from(value: ApiScenario) -> Self {
        match value {
            ApiScenario::Conservative => CliScenario::Conservative,
            ApiScenario::Moderate => CliScenario::Moderate,
            ApiScenario::Aggressive => CliScenario::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseMode {
    Investment,
    Target,
}

impl From<&Plan> for ResponseMode {
    fn from(value: &Plan) -> Self {
        match value {
            Plan::Investment(_) => ResponseMode::Investment,
            Plan::Target(_) => ResponseMode::Target,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    mode: Option<ApiMode>,
    scenario: Option<ApiScenario>,
    sip_amount: Option<f64>,
    target_amount: Option<f64>,
    #[serde(alias = "period")]
    years: Option<u32>,
    expected_return: Option<f64>,
    #[serde(alias = "stepUpToggle")]
    step_up: Option<bool>,
    step_up_rate: Option<f64>,
    #[serde(alias = "inflationToggle")]
    inflation_adjusted: Option<bool>,
    inflation_rate: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "sip",
    about = "SIP and financial-goal calculator (regular, step-up, target and inflation-adjusted projections)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON projection API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print a projection for the given inputs
    Project {
        #[command(flatten)]
        args: ProjectArgs,
        #[arg(long, help = "Print the projection as JSON instead of a table")]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = CliMode::Investment)]
    mode: CliMode,
    #[arg(
        long,
        value_enum,
        help = "Start from a preset; switches to investment mode and clears step-up and inflation"
    )]
    scenario: Option<CliScenario>,
    #[arg(long, default_value_t = DEFAULT_MONTHLY_AMOUNT, help = "Monthly SIP contribution")]
    sip_amount: f64,
    #[arg(long, default_value_t = DEFAULT_TARGET_AMOUNT, help = "Goal amount for target mode")]
    target_amount: f64,
    #[arg(long, default_value_t = DEFAULT_YEARS, help = "Investment period in years")]
    years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RATE_PERCENT,
        help = "Expected annual return in percent, e.g. 12"
    )]
    expected_return: f64,
    #[arg(long, help = "Annual step-up of the monthly contribution in percent")]
    step_up: Option<f64>,
    #[arg(long, help = "Inflation rate in percent used to deflate the maturity amount")]
    inflation: Option<f64>,
}

impl Default for ProjectArgs {
    fn default() -> Self {
        Self {
            mode: CliMode::Investment,
            scenario: None,
            sip_amount: DEFAULT_MONTHLY_AMOUNT,
            target_amount: DEFAULT_TARGET_AMOUNT,
            years: DEFAULT_YEARS,
            expected_return: DEFAULT_ANNUAL_RATE_PERCENT,
            step_up: None,
            inflation: None,
        }
    }
}

impl ProjectArgs {
    fn apply_scenario(&mut self, scenario: Scenario) {
        let params = scenario.parameters();
        self.mode = CliMode::Investment;
        self.sip_amount = params.periodic_amount;
        self.years = params.years;
        self.expected_return = params.annual_rate_percent;
        self.step_up = params.step_up_rate_percent;
        self.inflation = params.inflation_rate_percent;
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedResult {
    total_contributed: String,
    estimated_growth: String,
    maturity_amount: String,
    inflation_adjusted_maturity: Option<String>,
    required_periodic_amount: Option<String>,
}

impl From<&ProjectionResult> for FormattedResult {
    fn from(result: &ProjectionResult) -> Self {
        Self {
            total_contributed: format_currency(result.total_contributed),
            estimated_growth: format_currency(result.estimated_growth),
            maturity_amount: format_currency(result.maturity_amount),
            inflation_adjusted_maturity: result.inflation_adjusted_maturity.map(format_currency),
            required_periodic_amount: result.required_periodic_amount.map(format_number),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    mode: ResponseMode,
    inputs: Plan,
    result: ProjectionResult,
    formatted: FormattedResult,
    series: TimeSeries,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioResponse {
    scenario: Scenario,
    plan: GrowthParameters,
    result: ProjectionResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn check_amount(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=MAX_AMOUNT).contains(&value) {
        return Err(format!("{name} must be between 0 and {MAX_AMOUNT}"));
    }
    Ok(())
}

fn check_adjustment_rate(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(rate) if !(0.0..=MAX_RATE_PERCENT).contains(&rate) => {
            Err(format!("{name} must be between 0 and {MAX_RATE_PERCENT}"))
        }
        _ => Ok(()),
    }
}

fn build_plan(mut args: ProjectArgs) -> Result<Plan, String> {
    if let Some(scenario) = args.scenario {
        args.apply_scenario(scenario.into());
    }

    if args.years > MAX_YEARS {
        return Err(format!("--years must be <= {MAX_YEARS}"));
    }

    if !args.expected_return.is_finite()
        || args.expected_return <= -100.0
        || args.expected_return > MAX_RATE_PERCENT
    {
        return Err(format!(
            "--expected-return must be > -100 and <= {MAX_RATE_PERCENT}"
        ));
    }

    check_adjustment_rate("--step-up", args.step_up)?;
    check_adjustment_rate("--inflation", args.inflation)?;

    let plan = match args.mode {
        CliMode::Investment => {
            check_amount("--sip-amount", args.sip_amount)?;
            Plan::Investment(GrowthParameters {
                periodic_amount: args.sip_amount,
                annual_rate_percent: args.expected_return,
                years: args.years,
                step_up_rate_percent: args.step_up,
                inflation_rate_percent: args.inflation,
            })
        }
        CliMode::Target => {
            check_amount("--target-amount", args.target_amount)?;
            if args.years == 0 {
                return Err("--years must be > 0 in target mode".to_string());
            }
            Plan::Target(TargetParameters {
                target_amount: args.target_amount,
                annual_rate_percent: args.expected_return,
                years: args.years,
                inflation_rate_percent: args.inflation,
            })
        }
    };
    Ok(plan)
}

fn build_project_response(plan: Plan) -> Result<ProjectResponse, String> {
    let result = project(&plan).map_err(|e| e.to_string())?;
    let series = build_time_series(&plan).map_err(|e| e.to_string())?;
    Ok(ProjectResponse {
        mode: (&plan).into(),
        inputs: plan,
        formatted: (&result).into(),
        result,
        series,
    })
}

fn scenario_responses() -> Result<Vec<ScenarioResponse>, String> {
    Scenario::ALL
        .into_iter()
        .map(|scenario| {
            let plan = scenario.parameters();
            let result = project(&Plan::Investment(plan)).map_err(|e| e.to_string())?;
            Ok(ScenarioResponse {
                scenario,
                plan,
                result,
            })
        })
        .collect()
}

/// Runs `sip project` and returns what should be printed.
pub fn run_project_command(args: ProjectArgs, json: bool) -> Result<String, String> {
    let plan = build_plan(args)?;
    let response = build_project_response(plan)?;
    if json {
        return serde_json::to_string_pretty(&response)
            .map_err(|e| format!("failed to serialize projection: {e}"));
    }
    render_report(&response).map_err(|e| format!("failed to render projection: {e}"))
}

fn render_report(response: &ProjectResponse) -> Result<String, std::fmt::Error> {
    let result = &response.result;
    let formatted = &response.formatted;
    let mut out = String::new();

    if let Some(required) = &formatted.required_periodic_amount {
        writeln!(out, "Required monthly SIP:       ₹{required}")?;
    }
    writeln!(
        out,
        "Total investment:           {}",
        formatted.total_contributed
    )?;
    writeln!(
        out,
        "Estimated returns:          {}",
        formatted.estimated_growth
    )?;
    writeln!(
        out,
        "Maturity amount:            {}",
        formatted.maturity_amount
    )?;
    if let Some(real) = &formatted.inflation_adjusted_maturity {
        writeln!(out, "Inflation-adjusted value:   {real}")?;
    }
    if result.maturity_amount > 0.0 {
        let share = result.total_contributed / result.maturity_amount * 100.0;
        writeln!(
            out,
            "Split: {:.1}% invested / {:.1}% returns",
            share,
            100.0 - share
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{:>6} {:>16} {:>16}", "Year", "Invested", "Value")?;
    for point in &response.series {
        writeln!(
            out,
            "{:>6} {:>16} {:>16}",
            point.year,
            format_number(point.cumulative_contributed),
            format_number(point.projected_value)
        )?;
    }
    Ok(out)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "SIP projection API listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/scenarios", get(scenarios_handler))
        .fallback(not_found_handler)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    tracing::debug!(?payload, "projection request");
    let response = build_plan(api_args_from_payload(payload)).and_then(build_project_response);
    match response {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => {
            tracing::warn!(error = %msg, "rejected projection request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

async fn scenarios_handler() -> Response {
    match scenario_responses() {
        Ok(scenarios) => json_response(StatusCode::OK, scenarios),
        Err(msg) => {
            tracing::error!(error = %msg, "failed to project preset scenarios");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &msg)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_args_from_json(json: &str) -> Result<ProjectArgs, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(api_args_from_payload(payload))
}

fn api_args_from_payload(payload: ProjectPayload) -> ProjectArgs {
    let mut args = ProjectArgs::default();

    if let Some(v) = payload.scenario {
        args.apply_scenario(CliScenario::from(v).into());
    }

    if let Some(v) = payload.mode {
        args.mode = v.into();
    }
    if let Some(v) = payload.sip_amount {
        args.sip_amount = v;
    }
    if let Some(v) = payload.target_amount {
        args.target_amount = v;
    }
    if let Some(v) = payload.years {
        args.years = v;
    }
    if let Some(v) = payload.expected_return {
        args.expected_return = v;
    }

    let step_up_enabled = payload.step_up.unwrap_or(payload.step_up_rate.is_some());
    if step_up_enabled {
        args.step_up = Some(payload.step_up_rate.unwrap_or(DEFAULT_STEP_UP_RATE_PERCENT));
    } else if payload.step_up == Some(false) {
        args.step_up = None;
    }

    let inflation_enabled = payload
        .inflation_adjusted
        .unwrap_or(payload.inflation_rate.is_some());
    if inflation_enabled {
        args.inflation = Some(
            payload
                .inflation_rate
                .unwrap_or(DEFAULT_INFLATION_RATE_PERCENT),
        );
    } else if payload.inflation_adjusted == Some(false) {
        args.inflation = None;
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn investment_params(plan: Plan) -> GrowthParameters {
        match plan {
            Plan::Investment(params) => params,
            Plan::Target(_) => panic!("expected investment plan, got {plan:?}"),
        }
    }

    #[test]
    fn build_plan_uses_calculator_defaults() {
        let params = investment_params(build_plan(ProjectArgs::default()).expect("valid"));
        assert_approx(params.periodic_amount, 5_000.0);
        assert_eq!(params.years, 10);
        assert_approx(params.annual_rate_percent, 12.0);
        assert_eq!(params.step_up_rate_percent, None);
        assert_eq!(params.inflation_rate_percent, None);
    }

    #[test]
    fn build_plan_rejects_long_horizons() {
        let mut args = ProjectArgs::default();
        args.years = 101;
        let err = build_plan(args).expect_err("must reject > 100 years");
        assert!(err.contains("--years"));
    }

    #[test]
    fn build_plan_rejects_non_finite_amounts() {
        let mut args = ProjectArgs::default();
        args.sip_amount = f64::NAN;
        let err = build_plan(args).expect_err("must reject NaN amount");
        assert!(err.contains("--sip-amount"));
    }

    #[test]
    fn build_plan_rejects_amounts_that_would_overflow() {
        let mut args = ProjectArgs::default();
        args.sip_amount = 1e306;
        args.expected_return = 100.0;
        args.years = 100;
        let err = build_plan(args).expect_err("must reject huge amount");
        assert!(err.contains("--sip-amount"));

        let mut args = ProjectArgs::default();
        args.mode = CliMode::Target;
        args.target_amount = f64::INFINITY;
        let err = build_plan(args).expect_err("must reject infinite target");
        assert!(err.contains("--target-amount"));
    }

    #[test]
    fn largest_accepted_inputs_still_project() {
        let mut args = ProjectArgs::default();
        args.sip_amount = MAX_AMOUNT;
        args.expected_return = MAX_RATE_PERCENT;
        args.years = MAX_YEARS;
        args.step_up = Some(MAX_RATE_PERCENT);
        let response = build_plan(args)
            .and_then(build_project_response)
            .expect("bounded inputs stay finite");
        assert!(response.result.maturity_amount.is_finite());
        assert!(response.result.estimated_growth.is_finite());
    }

    #[test]
    fn serve_takes_port_as_a_flag() {
        let cli = Cli::try_parse_from(["sip", "serve", "--port", "9090"]).expect("valid args");
        assert!(matches!(cli.command, Command::Serve { port: 9090 }));

        let cli = Cli::try_parse_from(["sip", "serve"]).expect("valid args");
        assert!(matches!(cli.command, Command::Serve { port: 8080 }));
    }

    #[test]
    fn build_plan_rejects_total_loss_return() {
        let mut args = ProjectArgs::default();
        args.expected_return = -100.0;
        let err = build_plan(args).expect_err("must reject -100% return");
        assert!(err.contains("--expected-return"));
    }

    #[test]
    fn build_plan_rejects_negative_step_up() {
        let mut args = ProjectArgs::default();
        args.step_up = Some(-5.0);
        let err = build_plan(args).expect_err("must reject negative step-up");
        assert!(err.contains("--step-up"));
    }

    #[test]
    fn build_plan_rejects_zero_year_target() {
        let mut args = ProjectArgs::default();
        args.mode = CliMode::Target;
        args.years = 0;
        let err = build_plan(args).expect_err("must reject zero-year target");
        assert!(err.contains("target mode"));
    }

    #[test]
    fn scenario_overrides_mode_and_clears_adjustments() {
        let mut args = ProjectArgs::default();
        args.mode = CliMode::Target;
        args.step_up = Some(10.0);
        args.inflation = Some(6.0);
        args.scenario = Some(CliScenario::Aggressive);

        let params = investment_params(build_plan(args).expect("valid"));
        assert_approx(params.periodic_amount, 10_000.0);
        assert_eq!(params.years, 8);
        assert_approx(params.annual_rate_percent, 15.0);
        assert_eq!(params.step_up_rate_percent, None);
        assert_eq!(params.inflation_rate_percent, None);
    }

    #[test]
    fn api_args_from_json_parses_web_keys() {
        let json = r#"{
          "mode": "investment",
          "sipAmount": 7500,
          "period": 15,
          "expectedReturn": 11,
          "stepUpToggle": true,
          "stepUpRate": 5,
          "inflationToggle": true
        }"#;
        let params = investment_params(
            api_args_from_json(json)
                .and_then(build_plan)
                .expect("json should parse"),
        );

        assert_approx(params.periodic_amount, 7_500.0);
        assert_eq!(params.years, 15);
        assert_approx(params.annual_rate_percent, 11.0);
        assert_eq!(params.step_up_rate_percent, Some(5.0));
        assert_eq!(params.inflation_rate_percent, Some(6.0));
    }

    #[test]
    fn api_args_rate_without_toggle_enables_adjustment() {
        let args = api_args_from_json(r#"{ "inflationRate": 4.5 }"#).expect("json should parse");
        assert_eq!(args.inflation, Some(4.5));
        assert_eq!(args.step_up, None);
    }

    #[test]
    fn api_args_disabled_toggle_ignores_rate() {
        let args = api_args_from_json(r#"{ "stepUp": false, "stepUpRate": 8 }"#)
            .expect("json should parse");
        assert_eq!(args.step_up, None);
    }

    #[test]
    fn api_args_from_json_parses_target_mode() {
        let json = r#"{ "mode": "goal", "targetAmount": 2500000, "years": 12 }"#;
        let plan = api_args_from_json(json)
            .and_then(build_plan)
            .expect("json should parse");
        match plan {
            Plan::Target(params) => {
                assert_approx(params.target_amount, 2_500_000.0);
                assert_eq!(params.years, 12);
            }
            Plan::Investment(_) => panic!("expected target plan"),
        }
    }

    #[test]
    fn api_args_explicit_fields_override_scenario() {
        let json = r#"{ "scenario": "conservative", "period": 20 }"#;
        let params = investment_params(
            api_args_from_json(json)
                .and_then(build_plan)
                .expect("json should parse"),
        );
        assert_approx(params.periodic_amount, 3_000.0);
        assert_eq!(params.years, 20);
    }

    #[test]
    fn api_args_from_json_rejects_unknown_mode() {
        let err = api_args_from_json(r#"{ "mode": "lumpsum" }"#).expect_err("must reject");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let mut args = ProjectArgs::default();
        args.inflation = Some(6.0);
        let response = build_plan(args)
            .and_then(build_project_response)
            .expect("valid response");
        assert_eq!(response.series.len(), 11);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"mode\":\"investment\""));
        assert!(json.contains("\"totalContributed\""));
        assert!(json.contains("\"estimatedGrowth\""));
        assert!(json.contains("\"inflationAdjustedMaturity\""));
        assert!(json.contains("\"cumulativeContributed\""));
        assert!(json.contains("\"maturityAmount\":\"₹11.6L\""));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["inputs"]["periodicAmount"], 5_000.0);
        assert_eq!(value["inputs"]["inflationRatePercent"], 6.0);
        assert!(value["inputs"].get("mode").is_none());
        assert_eq!(json.matches("\"mode\"").count(), 1);
    }

    #[test]
    fn target_response_formats_required_amount() {
        let mut args = ProjectArgs::default();
        args.mode = CliMode::Target;
        let response = build_plan(args)
            .and_then(build_project_response)
            .expect("valid response");
        assert_eq!(
            response.formatted.required_periodic_amount.as_deref(),
            Some("4,304")
        );
        assert_eq!(response.formatted.maturity_amount, "₹10.0L");
    }

    #[test]
    fn scenario_responses_cover_every_preset() {
        let scenarios = scenario_responses().expect("presets are valid");
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].scenario, Scenario::Conservative);
        assert_approx(scenarios[0].result.total_contributed, 3_000.0 * 15.0 * 12.0);
    }

    #[test]
    fn text_report_lists_every_year() {
        let report =
            run_project_command(ProjectArgs::default(), false).expect("report should render");
        assert!(report.contains("Maturity amount:            ₹11.6L"));
        assert!(report.contains("Total investment:           ₹6.0L"));
        assert_eq!(report.lines().filter(|l| l.trim_start().starts_with("10 ")).count(), 1);
    }

    #[test]
    fn json_report_is_valid_json() {
        let report =
            run_project_command(ProjectArgs::default(), true).expect("report should render");
        let value: serde_json::Value = serde_json::from_str(&report).expect("valid json");
        assert_eq!(value["mode"], "investment");
        assert_eq!(value["series"].as_array().map(Vec::len), Some(11));
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).expect("body should be json");
        (status, cache_control, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    #[tokio::test]
    async fn health_reports_ok_without_caching() {
        let (status, cache_control, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let (status, cache_control, body) = send(get_request("/api/lumpsum")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn invalid_query_returns_json_400() {
        let (status, cache_control, body) = send(get_request("/api/project?years=101")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("--years")));
    }

    #[tokio::test]
    async fn project_query_uses_web_keys() {
        let (status, cache_control, body) = send(get_request(
            "/api/project?sipAmount=7500&period=15&expectedReturn=11&inflationRate=4.5",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["mode"], "investment");
        assert_eq!(body["inputs"]["periodicAmount"], 7_500.0);
        assert_eq!(body["inputs"]["years"], 15);
        assert_eq!(body["inputs"]["inflationRatePercent"], 4.5);
        assert_eq!(body["series"].as_array().map(Vec::len), Some(16));
        assert_eq!(body["result"]["totalContributed"], 7_500.0 * 15.0 * 12.0);
    }

    #[tokio::test]
    async fn project_post_accepts_json_payload() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/project")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{ "mode": "target", "targetAmount": 1000000 }"#))
            .expect("valid request");
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "target");
        assert_eq!(body["formatted"]["requiredPeriodicAmount"], "4,304");
    }

    #[tokio::test]
    async fn scenarios_route_lists_presets() {
        let (status, _, body) = send(get_request("/api/scenarios")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }
}
