use rand::SeedableRng;
use rand::rngs::SmallRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::engine::{evaluate_scenario, validate_scenario};
use super::error::{Result, SimulationError};
use super::sampling::{UncertainDistributions, UncertainPools};
use super::stats::{calculate_percentiles, correlation, summarize};
use super::types::{
    ParameterCorrelations, Scenario, ScenarioOutcome, SimulationResult, TrialOutcome, Verdict,
};

pub const DEFAULT_TRIALS: usize = 1_000;
pub const DEFAULT_MAX_TRIALS: usize = 100_000;
pub const DEFAULT_TRIAL_SEED: u64 = 42;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Seeds the per-trial pool draws; equal seeds give identical runs.
    pub seed: u64,
    pub max_trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_TRIAL_SEED,
            max_trials: DEFAULT_MAX_TRIALS,
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(SimulationError::ZeroTrials);
        }
        if self.trials > self.max_trials {
            return Err(SimulationError::TooManyTrials {
                requested: self.trials,
                max: self.max_trials,
            });
        }
        Ok(())
    }
}

/// Generates the sample pools and runs the simulation over them.
pub fn simulate(
    base: &Scenario,
    distributions: &UncertainDistributions,
    pool_size: usize,
    pool_seed: u64,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    let pools = UncertainPools::generate(distributions, pool_size, pool_seed)?;
    run_simulation(base, &pools, config)
}

/// Runs `config.trials` independent trials and aggregates them.
///
/// Either every trial succeeds and a result is returned, or the first
/// failing trial's error is.
pub fn run_simulation(
    base: &Scenario,
    pools: &UncertainPools,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    config.validate()?;
    let typical_draw = pools.median_draw();
    let typical_scenario = base.with_draw(typical_draw);
    validate_scenario(&typical_scenario)?;
    let typical = evaluate_scenario(&typical_scenario)?;
    if let Some(metric) = non_finite_metric(&typical) {
        tracing::warn!(metric, ?typical_draw, "non-finite median-point outcome");
        return Err(SimulationError::NonFiniteTypicalOutcome { metric });
    }

    let _span = tracing::info_span!("simulation", trials = config.trials, seed = config.seed).entered();

    #[cfg(feature = "parallel")]
    let trials = (0..config.trials)
        .into_par_iter()
        .map(|trial| run_trial(base, pools, config.seed, trial))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let trials = (0..config.trials)
        .map(|trial| run_trial(base, pools, config.seed, trial))
        .collect::<Result<Vec<_>>>()?;

    let capital_invested = base.deposit();
    let npvs: Vec<f64> = trials.iter().map(|t| t.buying_npv).collect();

    let summary = summarize(&npvs, capital_invested)?;
    let percentiles = calculate_percentiles(&npvs, capital_invested)?;
    let buying_better_pct = 100.0 - percentiles.breakeven.percentile;
    let verdict = if buying_better_pct >= 50.0 {
        Verdict::BuyMostOfTheTime
    } else {
        Verdict::RentMostOfTheTime
    };

    tracing::info!(
        mean = summary.mean,
        std_dev = summary.std_dev,
        buying_better_pct,
        "simulation complete"
    );

    Ok(SimulationResult {
        capital_invested,
        monthly_rent: base.monthly_rent(),
        summary,
        percentiles,
        buying_better_pct,
        verdict,
        correlations: parameter_correlations(&trials, &npvs),
        typical_draw,
        typical,
        trials,
    })
}

fn run_trial(
    base: &Scenario,
    pools: &UncertainPools,
    seed: u64,
    trial: usize,
) -> Result<TrialOutcome> {
    let mut rng = SmallRng::seed_from_u64(derive_seed(seed, trial as u64));
    let draw = pools.draw(&mut rng);
    let outcome = evaluate_scenario(&base.with_draw(draw))?;

    if let Some(metric) = non_finite_metric(&outcome) {
        tracing::warn!(trial, metric, ?draw, "non-finite trial outcome");
        return Err(SimulationError::NonFiniteOutcome { trial, metric });
    }

    Ok(TrialOutcome {
        draw,
        buying_npv: outcome.buying_npv,
        buying_future_value: outcome.buying_future_value,
        renting_future_value: outcome.renting_future_value,
    })
}

fn non_finite_metric(outcome: &ScenarioOutcome) -> Option<&'static str> {
    [
        ("buying_npv", outcome.buying_npv),
        ("buying_future_value", outcome.buying_future_value),
        ("renting_future_value", outcome.renting_future_value),
    ]
    .into_iter()
    .find(|(_, value)| !value.is_finite())
    .map(|(metric, _)| metric)
}

fn parameter_correlations(trials: &[TrialOutcome], npvs: &[f64]) -> ParameterCorrelations {
    let column = |f: fn(&TrialOutcome) -> f64| -> Option<f64> {
        let xs: Vec<f64> = trials.iter().map(f).collect();
        correlation(&xs, npvs)
    };
    ParameterCorrelations {
        mortgage_interest_rate: column(|t| t.draw.mortgage_interest_rate),
        property_growth_rate: column(|t| t.draw.property_growth_rate),
        rent_increase_rate: column(|t| t.draw.rent_increase_rate),
        investment_return_rate: column(|t| t.draw.investment_return_rate),
        years_until_sell: column(|t| t.draw.years_until_sell as f64),
    }
}

fn derive_seed(base_seed: u64, trial: u64) -> u64 {
    splitmix64(base_seed ^ trial.rotate_left(32))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
