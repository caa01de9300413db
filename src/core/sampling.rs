use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use super::error::{Result, SimulationError};
use super::stats::percentile;
use super::types::UncertainDraw;

pub const DEFAULT_POOL_SEED: u64 = 123;
pub const DEFAULT_POOL_SIZE: usize = 10_000;
pub const DEFAULT_MAX_POOL_SIZE: usize = 1_000_000;

/// Normal(mean, std_dev). A non-positive `std_dev` means "fixed at the mean".
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl ParameterDistribution {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= 0.0
    }
}

/// A non-empty pool of pre-drawn parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePool<T> {
    values: Vec<T>,
}

impl<T: Copy> SamplePool<T> {
    pub fn new(parameter: &'static str, values: Vec<T>) -> Result<Self> {
        if values.is_empty() {
            return Err(SimulationError::EmptySamplePool { parameter });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Uniform draw with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[rng.random_range(0..self.values.len())]
    }
}

impl SamplePool<f64> {
    pub fn median(&self) -> f64 {
        let mut sorted = self.values.clone();
        percentile(&mut sorted, 50.0)
    }
}

impl SamplePool<u32> {
    /// Lower median, so the result stays a whole number of years.
    pub fn median(&self) -> u32 {
        let mut sorted = self.values.clone();
        sorted.sort_unstable();
        sorted[(sorted.len() - 1) / 2]
    }
}

fn normal_samples<R: Rng + ?Sized>(
    parameter: &'static str,
    distribution: ParameterDistribution,
    pool_size: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let ParameterDistribution { mean, std_dev } = distribution;
    let invalid = || SimulationError::InvalidDistribution {
        parameter,
        mean,
        std_dev,
    };
    if pool_size > DEFAULT_MAX_POOL_SIZE {
        return Err(SimulationError::PoolTooLarge {
            requested: pool_size,
            max: DEFAULT_MAX_POOL_SIZE,
        });
    }
    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(invalid());
    }
    if distribution.is_degenerate() {
        tracing::debug!(parameter, mean, "degenerate distribution, single-value pool");
        return Ok(vec![mean]);
    }
    let normal = Normal::new(mean, std_dev).map_err(|_| invalid())?;
    Ok((0..pool_size).map(|_| normal.sample(rng)).collect())
}

pub fn sample_pool<R: Rng + ?Sized>(
    parameter: &'static str,
    distribution: ParameterDistribution,
    pool_size: usize,
    rng: &mut R,
) -> Result<SamplePool<f64>> {
    SamplePool::new(parameter, normal_samples(parameter, distribution, pool_size, rng)?)
}

/// Whole-year pool: draws are truncated toward zero and negative draws
/// become 0 (sell straight away).
pub fn sample_year_pool<R: Rng + ?Sized>(
    parameter: &'static str,
    distribution: ParameterDistribution,
    pool_size: usize,
    rng: &mut R,
) -> Result<SamplePool<u32>> {
    let samples = normal_samples(parameter, distribution, pool_size, rng)?;
    let negative = samples.iter().filter(|v| **v < 0.0).count();
    if negative > 0 {
        tracing::debug!(parameter, negative, "negative year draws floored at zero");
    }
    let years = samples
        .into_iter()
        .map(|v| v.trunc().clamp(0.0, u32::MAX as f64) as u32)
        .collect();
    SamplePool::new(parameter, years)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UncertainDistributions {
    pub mortgage_interest_rate: ParameterDistribution,
    pub property_growth_rate: ParameterDistribution,
    pub rent_increase_rate: ParameterDistribution,
    pub investment_return_rate: ParameterDistribution,
    pub years_until_sell: ParameterDistribution,
}

impl Default for UncertainDistributions {
    fn default() -> Self {
        Self {
            mortgage_interest_rate: ParameterDistribution::new(0.055, 0.012),
            property_growth_rate: ParameterDistribution::new(0.03, 0.01),
            rent_increase_rate: ParameterDistribution::new(0.01325, 0.01),
            investment_return_rate: ParameterDistribution::new(0.06, 0.02),
            years_until_sell: ParameterDistribution::new(15.0, 5.0),
        }
    }
}

impl UncertainDistributions {
    /// Every parameter fixed at `draw`.
    pub fn fixed(draw: UncertainDraw) -> Self {
        Self {
            mortgage_interest_rate: ParameterDistribution::fixed(draw.mortgage_interest_rate),
            property_growth_rate: ParameterDistribution::fixed(draw.property_growth_rate),
            rent_increase_rate: ParameterDistribution::fixed(draw.rent_increase_rate),
            investment_return_rate: ParameterDistribution::fixed(draw.investment_return_rate),
            years_until_sell: ParameterDistribution::fixed(draw.years_until_sell as f64),
        }
    }

    pub fn means(&self) -> UncertainDraw {
        UncertainDraw {
            mortgage_interest_rate: self.mortgage_interest_rate.mean,
            property_growth_rate: self.property_growth_rate.mean,
            rent_increase_rate: self.rent_increase_rate.mean,
            investment_return_rate: self.investment_return_rate.mean,
            years_until_sell: self.years_until_sell.mean.trunc().max(0.0) as u32,
        }
    }
}

/// Sample pools for the five uncertain parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct UncertainPools {
    pub mortgage_interest_rate: SamplePool<f64>,
    pub property_growth_rate: SamplePool<f64>,
    pub rent_increase_rate: SamplePool<f64>,
    pub investment_return_rate: SamplePool<f64>,
    pub years_until_sell: SamplePool<u32>,
}

impl UncertainPools {
    /// Draws every pool from one generator seeded with `seed`, always in the
    /// same parameter order. `pool_size` is capped at `DEFAULT_MAX_POOL_SIZE`.
    pub fn generate(
        distributions: &UncertainDistributions,
        pool_size: usize,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self {
            mortgage_interest_rate: sample_pool(
                "mortgage_interest_rate",
                distributions.mortgage_interest_rate,
                pool_size,
                &mut rng,
            )?,
            property_growth_rate: sample_pool(
                "property_growth_rate",
                distributions.property_growth_rate,
                pool_size,
                &mut rng,
            )?,
            rent_increase_rate: sample_pool(
                "rent_increase_rate",
                distributions.rent_increase_rate,
                pool_size,
                &mut rng,
            )?,
            investment_return_rate: sample_pool(
                "investment_return_rate",
                distributions.investment_return_rate,
                pool_size,
                &mut rng,
            )?,
            years_until_sell: sample_year_pool(
                "years_until_sell",
                distributions.years_until_sell,
                pool_size,
                &mut rng,
            )?,
        })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> UncertainDraw {
        UncertainDraw {
            mortgage_interest_rate: self.mortgage_interest_rate.draw(rng),
            property_growth_rate: self.property_growth_rate.draw(rng),
            rent_increase_rate: self.rent_increase_rate.draw(rng),
            investment_return_rate: self.investment_return_rate.draw(rng),
            years_until_sell: self.years_until_sell.draw(rng),
        }
    }

    pub fn median_draw(&self) -> UncertainDraw {
        UncertainDraw {
            mortgage_interest_rate: self.mortgage_interest_rate.median(),
            property_growth_rate: self.property_growth_rate.median(),
            rent_increase_rate: self.rent_increase_rate.median(),
            investment_return_rate: self.investment_return_rate.median(),
            years_until_sell: self.years_until_sell.median(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_std_dev_gives_single_value_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = sample_pool("rate", ParameterDistribution::new(0.05, 0.0), 10_000, &mut rng)
            .expect("degenerate pool is valid");
        assert_eq!(pool.values(), &[0.05]);
    }

    #[test]
    fn negative_std_dev_is_also_degenerate() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = sample_year_pool("years", ParameterDistribution::new(15.0, -2.0), 500, &mut rng)
            .expect("degenerate pool is valid");
        assert_eq!(pool.values(), &[15]);
        assert_eq!(pool.median(), 15);
    }

    #[test]
    fn non_finite_distribution_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_pool("rate", ParameterDistribution::new(f64::NAN, 0.01), 10, &mut rng)
            .expect_err("nan mean");
        assert!(matches!(
            err,
            SimulationError::InvalidDistribution {
                parameter: "rate",
                ..
            }
        ));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = SamplePool::<f64>::new("rate", Vec::new()).expect_err("empty pool");
        assert_eq!(err, SimulationError::EmptySamplePool { parameter: "rate" });
    }

    #[test]
    fn oversized_pool_is_rejected_before_allocating() {
        let err = UncertainPools::generate(
            &UncertainDistributions::default(),
            100_000_000_000,
            DEFAULT_POOL_SEED,
        )
        .expect_err("pool too large");
        assert_eq!(
            err,
            SimulationError::PoolTooLarge {
                requested: 100_000_000_000,
                max: DEFAULT_MAX_POOL_SIZE,
            }
        );
    }

    #[test]
    fn pool_at_the_limit_is_accepted() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = sample_pool(
            "rate",
            ParameterDistribution::new(0.05, 0.0),
            DEFAULT_MAX_POOL_SIZE,
            &mut rng,
        )
        .expect("limit is inclusive");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn pool_has_requested_size_and_plausible_moments() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = sample_pool("rate", ParameterDistribution::new(0.06, 0.02), 20_000, &mut rng)
            .expect("valid pool");
        assert_eq!(pool.len(), 20_000);
        let mean = pool.values().iter().sum::<f64>() / pool.len() as f64;
        assert!((mean - 0.06).abs() < 0.001, "mean {mean}");
        assert!((pool.median() - 0.06).abs() < 0.001);
    }

    #[test]
    fn year_pool_truncates_and_floors_at_zero() {
        let mut rng = StdRng::seed_from_u64(4);
        let pool = sample_year_pool("years", ParameterDistribution::new(1.0, 5.0), 2_000, &mut rng)
            .expect("valid pool");
        assert!(pool.values().iter().any(|y| *y == 0));
        assert!(pool.values().iter().all(|y| *y < 40));
    }

    #[test]
    fn same_seed_generates_identical_pools() {
        let distributions = UncertainDistributions::default();
        let a = UncertainPools::generate(&distributions, 1_000, 123).expect("valid");
        let b = UncertainPools::generate(&distributions, 1_000, 123).expect("valid");
        let c = UncertainPools::generate(&distributions, 1_000, 124).expect("valid");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn draws_come_from_the_pools() {
        let pools = UncertainPools::generate(&UncertainDistributions::default(), 50, 7)
            .expect("valid");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let draw = pools.draw(&mut rng);
            assert!(pools
                .mortgage_interest_rate
                .values()
                .contains(&draw.mortgage_interest_rate));
            assert!(pools.years_until_sell.values().contains(&draw.years_until_sell));
        }
    }

    #[test]
    fn fixed_distributions_have_median_at_the_value() {
        let draw = UncertainDraw {
            mortgage_interest_rate: 0.055,
            property_growth_rate: 0.03,
            rent_increase_rate: 0.013,
            investment_return_rate: 0.06,
            years_until_sell: 15,
        };
        let pools = UncertainPools::generate(&UncertainDistributions::fixed(draw), 10_000, 123)
            .expect("valid");
        assert_eq!(pools.median_draw(), draw);
        assert_eq!(pools.years_until_sell.len(), 1);
    }

    #[test]
    fn median_of_year_pool_uses_lower_middle() {
        let pool = SamplePool::new("years", vec![20_u32, 10, 30, 40]).expect("valid");
        assert_eq!(pool.median(), 20);
    }
}
