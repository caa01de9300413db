use serde::Serialize;

/// One marginal stamp-duty band: `rate` applies to the part of the price
/// above `threshold` and below the next band's threshold.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBand {
    pub threshold: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampDutySchedule {
    pub bands: Vec<TaxBand>,
}

impl StampDutySchedule {
    /// England "next home" rates.
    pub fn uk_next_home() -> Self {
        Self {
            bands: vec![
                TaxBand {
                    threshold: 0.0,
                    rate: 0.0,
                },
                TaxBand {
                    threshold: 250_000.0,
                    rate: 0.05,
                },
                TaxBand {
                    threshold: 925_000.0,
                    rate: 0.10,
                },
                TaxBand {
                    threshold: 1_500_000.0,
                    rate: 0.12,
                },
            ],
        }
    }
}

impl Default for StampDutySchedule {
    fn default() -> Self {
        Self::uk_next_home()
    }
}

/// Basic/higher CGT rate pair.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CgtRates {
    pub basic_rate: f64,
    pub higher_rate: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsConfig {
    pub basic_rate_ceiling: f64,
    pub annual_allowance: f64,
    pub personal_allowance: f64,
    pub property_rates: CgtRates,
    pub investment_rates: CgtRates,
}

impl CapitalGainsConfig {
    /// UK 2023/24 tax year.
    pub fn uk_2023_24() -> Self {
        Self {
            basic_rate_ceiling: 50_271.0,
            annual_allowance: 6_000.0,
            personal_allowance: 12_570.0,
            property_rates: CgtRates {
                basic_rate: 0.18,
                higher_rate: 0.28,
            },
            investment_rates: CgtRates {
                basic_rate: 0.10,
                higher_rate: 0.20,
            },
        }
    }
}

impl Default for CapitalGainsConfig {
    fn default() -> Self {
        Self::uk_2023_24()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxJurisdiction {
    pub stamp_duty: StampDutySchedule,
    pub capital_gains: CapitalGainsConfig,
}

/// The five parameters that vary between trials.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UncertainDraw {
    pub mortgage_interest_rate: f64,
    pub property_growth_rate: f64,
    pub rent_increase_rate: f64,
    pub investment_return_rate: f64,
    pub years_until_sell: u32,
}

/// A fully resolved buy-vs-rent scenario.
///
/// Rates are annual fractions (`0.05` is 5%). A scenario is never mutated
/// by the simulation driver; each trial builds its own copy through
/// [`Scenario::with_draw`].
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub house_price: f64,
    /// Annual rent of an equivalent property as a fraction of `house_price`.
    pub rental_yield: f64,
    pub deposit_fraction: f64,
    pub mortgage_term_years: u32,
    pub buying_cost_flat: f64,
    /// Fraction of the future sale price lost to agent and legal fees.
    pub selling_cost_fraction: f64,
    /// Annual maintenance and service charge as a fraction of `house_price`.
    pub ongoing_cost_fraction: f64,
    /// Salary at the time of sale, used for the CGT band split.
    pub annual_salary: f64,
    /// Growth of ongoing costs and the deflator for real future values.
    pub inflation: f64,
    pub applies_stamp_duty: bool,
    pub applies_cgt_on_property: bool,
    pub applies_cgt_on_investment: bool,
    pub jurisdiction: TaxJurisdiction,
    pub draw: UncertainDraw,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            house_price: 300_000.0,
            rental_yield: 0.043,
            deposit_fraction: 0.4,
            mortgage_term_years: 30,
            buying_cost_flat: 3_000.0,
            selling_cost_fraction: 0.02,
            ongoing_cost_fraction: 0.006,
            annual_salary: 20_000.0,
            inflation: 0.02,
            applies_stamp_duty: true,
            applies_cgt_on_property: true,
            applies_cgt_on_investment: false,
            jurisdiction: TaxJurisdiction::default(),
            draw: UncertainDraw {
                mortgage_interest_rate: 0.055,
                property_growth_rate: 0.03,
                rent_increase_rate: 0.01325,
                investment_return_rate: 0.06,
                years_until_sell: 15,
            },
        }
    }
}

impl Scenario {
    pub fn with_draw(&self, draw: UncertainDraw) -> Self {
        Self {
            draw,
            ..self.clone()
        }
    }

    pub fn monthly_rent(&self) -> f64 {
        self.house_price * self.rental_yield / 12.0
    }

    pub fn deposit(&self) -> f64 {
        self.house_price * self.deposit_fraction
    }

    pub fn rental_yield_from_monthly_rent(house_price: f64, monthly_rent: f64) -> f64 {
        12.0 * monthly_rent / house_price
    }
}

/// Result of valuing one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub buying_npv: f64,
    pub buying_future_value: f64,
    pub renting_future_value: f64,
    pub buying_future_value_real: f64,
    pub renting_future_value_real: f64,
    pub capital_invested: f64,
    pub monthly_rent: f64,
    pub stamp_duty: f64,
    pub annual_mortgage_payment: f64,
    pub future_house_price: f64,
    pub property_cgt: f64,
    pub investment_cgt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    #[serde(flatten)]
    pub draw: UncertainDraw,
    pub buying_npv: f64,
    pub buying_future_value: f64,
    pub renting_future_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileRow {
    pub percentile: f64,
    pub npv: f64,
    /// `npv` as a percentage of capital invested; absent when nothing was invested.
    pub pct_return: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileTable {
    pub rows: Vec<PercentileRow>,
    /// Row for the outcome closest to zero; its percentile is the breakeven rank.
    pub breakeven: PercentileRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpvSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub skew: f64,
    pub mean_pct_of_capital: Option<f64>,
    pub std_dev_pct_of_capital: Option<f64>,
}

/// Pearson correlation of each sampled parameter with buying NPV.
/// `None` where either series has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCorrelations {
    pub mortgage_interest_rate: Option<f64>,
    pub property_growth_rate: Option<f64>,
    pub rent_increase_rate: Option<f64>,
    pub investment_return_rate: Option<f64>,
    pub years_until_sell: Option<f64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    BuyMostOfTheTime,
    RentMostOfTheTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub capital_invested: f64,
    pub monthly_rent: f64,
    pub summary: NpvSummary,
    pub percentiles: PercentileTable,
    pub buying_better_pct: f64,
    pub verdict: Verdict,
    pub correlations: ParameterCorrelations,
    /// Evaluation at the median of every sample pool.
    pub typical_draw: UncertainDraw,
    pub typical: ScenarioOutcome,
    pub trials: Vec<TrialOutcome>,
}
