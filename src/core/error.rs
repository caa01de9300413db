use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid scenario: {field} {reason}")]
    InvalidScenario { field: &'static str, reason: String },

    #[error("invalid distribution for {parameter}: mean {mean}, std dev {std_dev} must be finite")]
    InvalidDistribution {
        parameter: &'static str,
        mean: f64,
        std_dev: f64,
    },

    #[error("sample pool for {parameter} is empty")]
    EmptySamplePool { parameter: &'static str },

    #[error("sample pool size {requested} exceeds the limit of {max}")]
    PoolTooLarge { requested: usize, max: usize },

    #[error("trial count must be > 0")]
    ZeroTrials,

    #[error("trial count {requested} exceeds the limit of {max}")]
    TooManyTrials { requested: usize, max: usize },

    #[error("cannot summarise an empty outcome collection")]
    EmptyOutcomes,

    #[error("trial {trial} produced a non-finite {metric}")]
    NonFiniteOutcome { trial: usize, metric: &'static str },

    #[error("the median-point evaluation produced a non-finite {metric}")]
    NonFiniteTypicalOutcome { metric: &'static str },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
