//! Time-value-of-money primitives and UK property taxes.
//!
//! Annuities pay at the end of each period; the first payment is `payment`
//! and each later one grows by `growth_rate`. When the discount rate equals
//! the growth rate the closed forms divide by zero, so the limiting forms
//! are used instead.

use super::types::{CapitalGainsConfig, CgtRates, StampDutySchedule};

const SINGULAR_TOLERANCE: f64 = 1e-12;

fn is_singular(discount_rate: f64, growth_rate: f64) -> bool {
    (discount_rate - growth_rate).abs() < SINGULAR_TOLERANCE
}

fn compound(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powf(periods as f64)
}

pub fn annuity_present_value(
    payment: f64,
    discount_rate: f64,
    periods: u32,
    growth_rate: f64,
) -> f64 {
    if is_singular(discount_rate, growth_rate) {
        return payment * periods as f64 / (1.0 + discount_rate);
    }
    let ratio = (1.0 + growth_rate) / (1.0 + discount_rate);
    payment * (1.0 - ratio.powf(periods as f64)) / (discount_rate - growth_rate)
}

/// Value at the end of `periods`, deflated by `(1 + inflation_adjust)^periods`.
pub fn annuity_future_value(
    payment: f64,
    discount_rate: f64,
    periods: u32,
    growth_rate: f64,
    inflation_adjust: f64,
) -> f64 {
    let nominal = if is_singular(discount_rate, growth_rate) {
        payment * periods as f64 * compound(discount_rate, periods) / (1.0 + discount_rate)
    } else {
        payment * (compound(discount_rate, periods) - compound(growth_rate, periods))
            / (discount_rate - growth_rate)
    };
    nominal / compound(inflation_adjust, periods)
}

/// First payment of a growing annuity whose present value is `present_value`.
/// `periods` must be > 0.
pub fn annuity_payment(present_value: f64, discount_rate: f64, periods: u32, growth_rate: f64) -> f64 {
    if is_singular(discount_rate, growth_rate) {
        return present_value * (1.0 + discount_rate) / periods as f64;
    }
    let ratio = (1.0 + growth_rate) / (1.0 + discount_rate);
    present_value * (discount_rate - growth_rate) / (1.0 - ratio.powf(periods as f64))
}

pub fn present_value_of_future_payment(payment: f64, rate: f64, periods: u32) -> f64 {
    payment / compound(rate, periods)
}

pub fn future_value_of_present_payment(
    payment: f64,
    rate: f64,
    periods: u32,
    inflation_adjust: f64,
) -> f64 {
    payment * compound(rate, periods) / compound(inflation_adjust, periods)
}

/// Marginal-band stamp duty. Bands are taken in threshold order; each band
/// taxes only the slice of the price between its threshold and the next.
pub fn stamp_duty(house_price: f64, schedule: &StampDutySchedule) -> f64 {
    let bands = &schedule.bands;
    let mut tax = 0.0;
    for (idx, band) in bands.iter().enumerate() {
        if house_price <= band.threshold {
            break;
        }
        let ceiling = bands
            .get(idx + 1)
            .map(|next| next.threshold)
            .unwrap_or(f64::INFINITY);
        tax += (house_price.min(ceiling) - band.threshold) * band.rate;
    }
    tax
}

/// CGT on the gain from `original_price` to `future_price`.
///
/// With a salary above the basic-rate ceiling the whole gain net of the
/// annual allowance pays the higher rate. Otherwise the gain fills the
/// remaining basic-rate headroom first.
pub fn capital_gains_tax(
    future_price: f64,
    original_price: f64,
    annual_salary: f64,
    allowance: f64,
    personal_allowance: f64,
    basic_rate_ceiling: f64,
    rates: CgtRates,
) -> f64 {
    let taxable_gain = (future_price - original_price - allowance).max(0.0);
    if annual_salary > basic_rate_ceiling {
        return taxable_gain * rates.higher_rate;
    }

    let headroom = (basic_rate_ceiling - (annual_salary - personal_allowance)).max(0.0);
    let basic_tranche = taxable_gain.min(headroom);
    let higher_tranche = taxable_gain - basic_tranche;
    basic_tranche * rates.basic_rate + higher_tranche * rates.higher_rate
}

pub fn property_capital_gains_tax(
    future_price: f64,
    original_price: f64,
    annual_salary: f64,
    config: &CapitalGainsConfig,
) -> f64 {
    capital_gains_tax(
        future_price,
        original_price,
        annual_salary,
        config.annual_allowance,
        config.personal_allowance,
        config.basic_rate_ceiling,
        config.property_rates,
    )
}

pub fn investment_capital_gains_tax(
    final_value: f64,
    contributed: f64,
    annual_salary: f64,
    config: &CapitalGainsConfig,
) -> f64 {
    capital_gains_tax(
        final_value,
        contributed,
        annual_salary,
        config.annual_allowance,
        config.personal_allowance,
        config.basic_rate_ceiling,
        config.investment_rates,
    )
}
