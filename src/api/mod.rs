use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{ArgAction, Parser};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    CapitalGainsConfig, CgtRates, DEFAULT_MAX_POOL_SIZE, DEFAULT_MAX_TRIALS,
    ParameterDistribution, Scenario, ScenarioOutcome, SimulationConfig, SimulationResult,
    StampDutySchedule, TaxBand, TaxJurisdiction, UncertainDistributions, UncertainDraw,
    evaluate_scenario, simulate,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    house_price: Option<f64>,
    monthly_rent: Option<f64>,
    deposit: Option<f64>,
    mortgage_length: Option<u32>,
    ongoing_cost: Option<f64>,
    buying_cost: Option<f64>,
    selling_cost_rate: Option<f64>,
    annual_salary: Option<f64>,
    inflation_rate: Option<f64>,

    stamp_duty: Option<bool>,
    cgt_on_property: Option<bool>,
    cgt_on_investment: Option<bool>,

    #[serde(deserialize_with = "number_list")]
    stamp_duty_thresholds: Option<Vec<f64>>,
    #[serde(deserialize_with = "number_list")]
    stamp_duty_rates: Option<Vec<f64>>,
    cgt_basic_rate_ceiling: Option<f64>,
    cgt_allowance: Option<f64>,
    personal_allowance: Option<f64>,
    property_cgt_basic_rate: Option<f64>,
    property_cgt_higher_rate: Option<f64>,
    investment_cgt_basic_rate: Option<f64>,
    investment_cgt_higher_rate: Option<f64>,

    mortgage_rate_mean: Option<f64>,
    mortgage_rate_sd: Option<f64>,
    property_growth_mean: Option<f64>,
    property_growth_sd: Option<f64>,
    rent_increase_mean: Option<f64>,
    rent_increase_sd: Option<f64>,
    investment_return_mean: Option<f64>,
    investment_return_sd: Option<f64>,
    years_until_sell_mean: Option<f64>,
    years_until_sell_sd: Option<f64>,

    samples: Option<usize>,
    simulations: Option<usize>,
    pool_seed: Option<u64>,
    seed: Option<u64>,
}

/// A JSON array, or a comma-separated string as sent in a query string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberList {
    List(Vec<f64>),
    Delimited(String),
}

fn number_list<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberList>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberList::List(values)) => Ok(Some(values)),
        Some(NumberList::Delimited(text)) => parse_number_list(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn parse_number_list(text: &str) -> Result<Vec<f64>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<f64>()
                .map_err(|_| format!("'{item}' is not a number"))
        })
        .collect()
}

#[derive(Parser, Debug)]
#[command(
    name = "buy_or_rent simulate",
    about = "Monte Carlo estimate of buying a home versus renting and investing (England)"
)]
struct Cli {
    #[arg(long, default_value_t = 300_000.0)]
    house_price: f64,
    #[arg(long, help = "Monthly rent of an equivalent property; defaults to a 4.3% yield")]
    monthly_rent: Option<f64>,
    #[arg(long, help = "Deposit amount; defaults to 40% of the house price")]
    deposit: Option<f64>,
    #[arg(long, default_value_t = 30)]
    mortgage_length: u32,
    #[arg(
        long,
        help = "Annual maintenance plus service charge; defaults to 0.6% of the house price"
    )]
    ongoing_cost: Option<f64>,
    #[arg(long, default_value_t = 3_000.0, help = "Buying costs excluding stamp duty")]
    buying_cost: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Selling costs in percent of the sale price"
    )]
    selling_cost_rate: f64,
    #[arg(
        long,
        default_value_t = 20_000.0,
        help = "Annual salary at the time of sale, used for capital gains tax"
    )]
    annual_salary: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Inflation in percent, applied to ongoing costs and real future values"
    )]
    inflation_rate: f64,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    stamp_duty: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    cgt_on_property: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    cgt_on_investment: bool,

    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0.0, 250_000.0, 925_000.0, 1_500_000.0],
        help = "Stamp duty band thresholds, ascending"
    )]
    stamp_duty_thresholds: Vec<f64>,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0.0, 5.0, 10.0, 12.0],
        help = "Marginal stamp duty rate in percent for each threshold"
    )]
    stamp_duty_rates: Vec<f64>,
    #[arg(long, default_value_t = 50_271.0)]
    cgt_basic_rate_ceiling: f64,
    #[arg(long, default_value_t = 6_000.0, help = "Annual CGT exempt amount")]
    cgt_allowance: f64,
    #[arg(long, default_value_t = 12_570.0)]
    personal_allowance: f64,
    #[arg(long, default_value_t = 18.0)]
    property_cgt_basic_rate: f64,
    #[arg(long, default_value_t = 28.0)]
    property_cgt_higher_rate: f64,
    #[arg(long, default_value_t = 10.0)]
    investment_cgt_basic_rate: f64,
    #[arg(long, default_value_t = 20.0)]
    investment_cgt_higher_rate: f64,

    #[arg(long, default_value_t = 5.5, help = "Mean mortgage interest rate in percent")]
    mortgage_rate_mean: f64,
    #[arg(long, default_value_t = 1.2)]
    mortgage_rate_sd: f64,
    #[arg(long, default_value_t = 3.0, help = "Mean annual property price growth in percent")]
    property_growth_mean: f64,
    #[arg(long, default_value_t = 1.0)]
    property_growth_sd: f64,
    #[arg(long, default_value_t = 1.325, help = "Mean annual rent increase in percent")]
    rent_increase_mean: f64,
    #[arg(long, default_value_t = 1.0)]
    rent_increase_sd: f64,
    #[arg(long, default_value_t = 6.0, help = "Mean annual investment return in percent")]
    investment_return_mean: f64,
    #[arg(long, default_value_t = 2.0)]
    investment_return_sd: f64,
    #[arg(long, default_value_t = 15.0)]
    years_until_sell_mean: f64,
    #[arg(long, default_value_t = 5.0)]
    years_until_sell_sd: f64,

    #[arg(long, default_value_t = 10_000, help = "Size of each parameter sample pool")]
    samples: usize,
    #[arg(long, default_value_t = 1_000)]
    simulations: usize,
    #[arg(long, default_value_t = 123, help = "Seed for the parameter sample pools")]
    pool_seed: u64,
    #[arg(long, default_value_t = 42, help = "Seed for the per-trial draws")]
    seed: u64,
}

#[derive(Debug)]
struct SimulationRequest {
    scenario: Scenario,
    distributions: UncertainDistributions,
    pool_size: usize,
    pool_seed: u64,
    config: SimulationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    house_price: f64,
    rental_yield: f64,
    samples: usize,
    simulations: usize,
    pool_seed: u64,
    seed: u64,
    distributions: UncertainDistributions,
    jurisdiction: TaxJurisdiction,
    #[serde(flatten)]
    result: SimulationResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateResponse {
    draw: UncertainDraw,
    outcome: ScenarioOutcome,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn build_request(cli: Cli) -> Result<SimulationRequest, String> {
    if !(cli.house_price.is_finite() && cli.house_price > 0.0) {
        return Err("--house-price must be > 0".to_string());
    }

    let monthly_rent = cli
        .monthly_rent
        .unwrap_or_else(|| (cli.house_price * 0.043 / 12.0).trunc());
    if !(monthly_rent.is_finite() && monthly_rent >= 0.0) {
        return Err("--monthly-rent must be >= 0".to_string());
    }

    let deposit = cli.deposit.unwrap_or_else(|| (cli.house_price * 0.4).trunc());
    if !(0.0..=cli.house_price).contains(&deposit) {
        return Err("--deposit must be between 0 and --house-price".to_string());
    }

    if cli.mortgage_length == 0 {
        return Err("--mortgage-length must be > 0".to_string());
    }

    let ongoing_cost = cli
        .ongoing_cost
        .unwrap_or_else(|| (cli.house_price * 0.006).trunc());
    if !(ongoing_cost.is_finite() && ongoing_cost >= 0.0) {
        return Err("--ongoing-cost must be >= 0".to_string());
    }

    if !(cli.buying_cost.is_finite() && cli.buying_cost >= 0.0) {
        return Err("--buying-cost must be >= 0".to_string());
    }

    if !(0.0..=100.0).contains(&cli.selling_cost_rate) {
        return Err("--selling-cost-rate must be between 0 and 100".to_string());
    }

    if cli.inflation_rate <= -100.0 {
        return Err("--inflation-rate must be > -100".to_string());
    }

    if cli.samples == 0 {
        return Err("--samples must be > 0".to_string());
    }

    if cli.samples > DEFAULT_MAX_POOL_SIZE {
        return Err(format!("--samples must be <= {DEFAULT_MAX_POOL_SIZE}"));
    }

    if cli.simulations == 0 {
        return Err("--simulations must be > 0".to_string());
    }

    if cli.simulations > DEFAULT_MAX_TRIALS {
        return Err(format!("--simulations must be <= {DEFAULT_MAX_TRIALS}"));
    }

    let jurisdiction = TaxJurisdiction {
        stamp_duty: build_stamp_duty_schedule(&cli.stamp_duty_thresholds, &cli.stamp_duty_rates)?,
        capital_gains: build_capital_gains_config(&cli)?,
    };

    let distributions = UncertainDistributions {
        mortgage_interest_rate: percent_distribution(cli.mortgage_rate_mean, cli.mortgage_rate_sd),
        property_growth_rate: percent_distribution(
            cli.property_growth_mean,
            cli.property_growth_sd,
        ),
        rent_increase_rate: percent_distribution(cli.rent_increase_mean, cli.rent_increase_sd),
        investment_return_rate: percent_distribution(
            cli.investment_return_mean,
            cli.investment_return_sd,
        ),
        years_until_sell: ParameterDistribution::new(
            cli.years_until_sell_mean,
            cli.years_until_sell_sd,
        ),
    };

    if cli.years_until_sell_mean < 0.0 {
        return Err("--years-until-sell-mean must be >= 0".to_string());
    }

    if cli.investment_return_mean <= -100.0 {
        return Err("--investment-return-mean must be > -100".to_string());
    }

    let scenario = Scenario {
        house_price: cli.house_price,
        rental_yield: Scenario::rental_yield_from_monthly_rent(cli.house_price, monthly_rent),
        deposit_fraction: deposit / cli.house_price,
        mortgage_term_years: cli.mortgage_length,
        buying_cost_flat: cli.buying_cost,
        selling_cost_fraction: cli.selling_cost_rate / 100.0,
        ongoing_cost_fraction: ongoing_cost / cli.house_price,
        annual_salary: cli.annual_salary,
        inflation: cli.inflation_rate / 100.0,
        applies_stamp_duty: cli.stamp_duty,
        applies_cgt_on_property: cli.cgt_on_property,
        applies_cgt_on_investment: cli.cgt_on_investment,
        jurisdiction,
        draw: distributions.means(),
    };

    Ok(SimulationRequest {
        scenario,
        distributions,
        pool_size: cli.samples,
        pool_seed: cli.pool_seed,
        config: SimulationConfig {
            trials: cli.simulations,
            seed: cli.seed,
            max_trials: DEFAULT_MAX_TRIALS,
        },
    })
}

fn percent_distribution(mean: f64, std_dev: f64) -> ParameterDistribution {
    ParameterDistribution::new(mean / 100.0, std_dev / 100.0)
}

fn build_stamp_duty_schedule(thresholds: &[f64], rates: &[f64]) -> Result<StampDutySchedule, String> {
    if thresholds.is_empty() || thresholds.len() != rates.len() {
        return Err(
            "--stamp-duty-thresholds and --stamp-duty-rates must be non-empty and the same length"
                .to_string(),
        );
    }
    if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err("--stamp-duty-thresholds must be strictly ascending".to_string());
    }
    if thresholds[0] < 0.0 {
        return Err("--stamp-duty-thresholds must be >= 0".to_string());
    }
    if rates.iter().any(|rate| !(0.0..=100.0).contains(rate)) {
        return Err("--stamp-duty-rates must be between 0 and 100".to_string());
    }

    Ok(StampDutySchedule {
        bands: thresholds
            .iter()
            .zip(rates)
            .map(|(&threshold, &rate)| TaxBand {
                threshold,
                rate: rate / 100.0,
            })
            .collect(),
    })
}

fn build_capital_gains_config(cli: &Cli) -> Result<CapitalGainsConfig, String> {
    for (flag, rate) in [
        ("--property-cgt-basic-rate", cli.property_cgt_basic_rate),
        ("--property-cgt-higher-rate", cli.property_cgt_higher_rate),
        ("--investment-cgt-basic-rate", cli.investment_cgt_basic_rate),
        ("--investment-cgt-higher-rate", cli.investment_cgt_higher_rate),
    ] {
        if !(0.0..=100.0).contains(&rate) {
            return Err(format!("{flag} must be between 0 and 100"));
        }
    }

    if cli.cgt_allowance < 0.0 {
        return Err("--cgt-allowance must be >= 0".to_string());
    }
    if cli.personal_allowance < 0.0 {
        return Err("--personal-allowance must be >= 0".to_string());
    }
    if cli.cgt_basic_rate_ceiling < 0.0 {
        return Err("--cgt-basic-rate-ceiling must be >= 0".to_string());
    }

    Ok(CapitalGainsConfig {
        basic_rate_ceiling: cli.cgt_basic_rate_ceiling,
        annual_allowance: cli.cgt_allowance,
        personal_allowance: cli.personal_allowance,
        property_rates: CgtRates {
            basic_rate: cli.property_cgt_basic_rate / 100.0,
            higher_rate: cli.property_cgt_higher_rate / 100.0,
        },
        investment_rates: CgtRates {
            basic_rate: cli.investment_cgt_basic_rate / 100.0,
            higher_rate: cli.investment_cgt_higher_rate / 100.0,
        },
    })
}

fn run_request(request: &SimulationRequest) -> Result<SimulateResponse, String> {
    let result = simulate(
        &request.scenario,
        &request.distributions,
        request.pool_size,
        request.pool_seed,
        &request.config,
    )
    .map_err(|e| e.to_string())?;
    Ok(build_simulate_response(request, result))
}

fn build_simulate_response(request: &SimulationRequest, result: SimulationResult) -> SimulateResponse {
    SimulateResponse {
        house_price: request.scenario.house_price,
        rental_yield: request.scenario.rental_yield,
        samples: request.pool_size,
        simulations: request.config.trials,
        pool_seed: request.pool_seed,
        seed: request.config.seed,
        distributions: request.distributions,
        jurisdiction: request.scenario.jurisdiction.clone(),
        result,
    }
}

/// Parses `simulate` arguments (the first item is the command name) and
/// returns the JSON response.
pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    let request = build_request(cli)?;
    let response = run_request(&request)?;
    serde_json::to_string_pretty(&response).map_err(|e| format!("Failed to encode response: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route(
            "/api/evaluate",
            get(evaluate_get_handler).post(evaluate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("buy-or-rent HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(
    query: Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => simulate_handler_impl(payload).await,
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn simulate_post_handler(body: Result<Json<SimulatePayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => simulate_handler_impl(payload).await,
        Err(rejection) => error_response(rejection.status(), &rejection.body_text()),
    }
}

async fn evaluate_get_handler(
    query: Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => evaluate_handler_impl(payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn evaluate_post_handler(body: Result<Json<SimulatePayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => evaluate_handler_impl(payload),
        Err(rejection) => error_response(rejection.status(), &rejection.body_text()),
    }
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let outcome = tokio::task::spawn_blocking(move || run_request(&request)).await;
    match outcome {
        Ok(Ok(response)) => json_response(StatusCode::OK, response),
        Ok(Err(msg)) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &msg),
        Err(e) => {
            tracing::error!("simulation task failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Simulation failed")
        }
    }
}

fn evaluate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match evaluate_scenario(&request.scenario) {
        Ok(outcome) => json_response(
            StatusCode::OK,
            EvaluateResponse {
                draw: request.scenario.draw,
                outcome,
            },
        ),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()),
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
fn api_request_from_json(json: &str) -> Result<SimulationRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: SimulatePayload) -> Result<SimulationRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.house_price {
        cli.house_price = v;
    }
    cli.monthly_rent = payload.monthly_rent.or(cli.monthly_rent);
    cli.deposit = payload.deposit.or(cli.deposit);
    if let Some(v) = payload.mortgage_length {
        cli.mortgage_length = v;
    }
    cli.ongoing_cost = payload.ongoing_cost.or(cli.ongoing_cost);
    if let Some(v) = payload.buying_cost {
        cli.buying_cost = v;
    }
    if let Some(v) = payload.selling_cost_rate {
        cli.selling_cost_rate = v;
    }
    if let Some(v) = payload.annual_salary {
        cli.annual_salary = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }

    if let Some(v) = payload.stamp_duty {
        cli.stamp_duty = v;
    }
    if let Some(v) = payload.cgt_on_property {
        cli.cgt_on_property = v;
    }
    if let Some(v) = payload.cgt_on_investment {
        cli.cgt_on_investment = v;
    }

    if let Some(v) = payload.stamp_duty_thresholds {
        cli.stamp_duty_thresholds = v;
    }
    if let Some(v) = payload.stamp_duty_rates {
        cli.stamp_duty_rates = v;
    }
    if let Some(v) = payload.cgt_basic_rate_ceiling {
        cli.cgt_basic_rate_ceiling = v;
    }
    if let Some(v) = payload.cgt_allowance {
        cli.cgt_allowance = v;
    }
    if let Some(v) = payload.personal_allowance {
        cli.personal_allowance = v;
    }
    if let Some(v) = payload.property_cgt_basic_rate {
        cli.property_cgt_basic_rate = v;
    }
    if let Some(v) = payload.property_cgt_higher_rate {
        cli.property_cgt_higher_rate = v;
    }
    if let Some(v) = payload.investment_cgt_basic_rate {
        cli.investment_cgt_basic_rate = v;
    }
    if let Some(v) = payload.investment_cgt_higher_rate {
        cli.investment_cgt_higher_rate = v;
    }

    if let Some(v) = payload.mortgage_rate_mean {
        cli.mortgage_rate_mean = v;
    }
    if let Some(v) = payload.mortgage_rate_sd {
        cli.mortgage_rate_sd = v;
    }
    if let Some(v) = payload.property_growth_mean {
        cli.property_growth_mean = v;
    }
    if let Some(v) = payload.property_growth_sd {
        cli.property_growth_sd = v;
    }
    if let Some(v) = payload.rent_increase_mean {
        cli.rent_increase_mean = v;
    }
    if let Some(v) = payload.rent_increase_sd {
        cli.rent_increase_sd = v;
    }
    if let Some(v) = payload.investment_return_mean {
        cli.investment_return_mean = v;
    }
    if let Some(v) = payload.investment_return_sd {
        cli.investment_return_sd = v;
    }
    if let Some(v) = payload.years_until_sell_mean {
        cli.years_until_sell_mean = v;
    }
    if let Some(v) = payload.years_until_sell_sd {
        cli.years_until_sell_sd = v;
    }

    if let Some(v) = payload.samples {
        cli.samples = v;
    }
    if let Some(v) = payload.simulations {
        cli.simulations = v;
    }
    if let Some(v) = payload.pool_seed {
        cli.pool_seed = v;
    }
    if let Some(v) = payload.seed {
        cli.seed = v;
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        house_price: 300_000.0,
        monthly_rent: None,
        deposit: None,
        mortgage_length: 30,
        ongoing_cost: None,
        buying_cost: 3_000.0,
        selling_cost_rate: 2.0,
        annual_salary: 20_000.0,
        inflation_rate: 2.0,
        stamp_duty: true,
        cgt_on_property: true,
        cgt_on_investment: false,
        stamp_duty_thresholds: vec![0.0, 250_000.0, 925_000.0, 1_500_000.0],
        stamp_duty_rates: vec![0.0, 5.0, 10.0, 12.0],
        cgt_basic_rate_ceiling: 50_271.0,
        cgt_allowance: 6_000.0,
        personal_allowance: 12_570.0,
        property_cgt_basic_rate: 18.0,
        property_cgt_higher_rate: 28.0,
        investment_cgt_basic_rate: 10.0,
        investment_cgt_higher_rate: 20.0,
        mortgage_rate_mean: 5.5,
        mortgage_rate_sd: 1.2,
        property_growth_mean: 3.0,
        property_growth_sd: 1.0,
        rent_increase_mean: 1.325,
        rent_increase_sd: 1.0,
        investment_return_mean: 6.0,
        investment_return_sd: 2.0,
        years_until_sell_mean: 15.0,
        years_until_sell_sd: 5.0,
        samples: 10_000,
        simulations: 1_000,
        pool_seed: 123,
        seed: 42,
    }
}
