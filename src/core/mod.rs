mod engine;
mod error;
mod finance;
mod sampling;
mod simulation;
mod stats;
mod types;

pub use engine::{evaluate_scenario, validate_scenario};
pub use error::{Result, SimulationError};
pub use finance::{
    annuity_future_value, annuity_payment, annuity_present_value, capital_gains_tax,
    future_value_of_present_payment, investment_capital_gains_tax,
    present_value_of_future_payment, property_capital_gains_tax, stamp_duty,
};
pub use sampling::{
    DEFAULT_MAX_POOL_SIZE, DEFAULT_POOL_SEED, DEFAULT_POOL_SIZE, ParameterDistribution, SamplePool,
    UncertainDistributions, UncertainPools, sample_pool, sample_year_pool,
};
pub use simulation::{
    DEFAULT_MAX_TRIALS, DEFAULT_TRIAL_SEED, DEFAULT_TRIALS, SimulationConfig, run_simulation,
    simulate,
};
pub use stats::{
    calculate_percentiles, correlation, mean, percentile, percentile_sorted, skew, std_dev,
    summarize,
};
pub use types::{
    CapitalGainsConfig, CgtRates, NpvSummary, ParameterCorrelations, PercentileRow,
    PercentileTable, Scenario, ScenarioOutcome, SimulationResult, StampDutySchedule, TaxBand,
    TaxJurisdiction, TrialOutcome, UncertainDraw, Verdict,
};
