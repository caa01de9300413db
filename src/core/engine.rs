use super::error::{Result, SimulationError};
use super::finance::{
    annuity_future_value, annuity_payment, annuity_present_value,
    future_value_of_present_payment, investment_capital_gains_tax,
    present_value_of_future_payment, property_capital_gains_tax, stamp_duty,
};
use super::types::{Scenario, ScenarioOutcome, TaxJurisdiction};

/// Cash flows of the buy path, all on the same discount basis.
#[derive(Debug, Clone, Copy)]
struct BuyingLeg {
    deposit: f64,
    stamp_duty: f64,
    annual_mortgage_payment: f64,
    pv_mortgage_payments: f64,
    future_house_price: f64,
    selling_cost: f64,
    property_cgt: f64,
    annual_ongoing_cost: f64,
}

/// Capital the renter keeps invested instead of buying.
#[derive(Debug, Clone, Copy)]
struct RentingLeg {
    capital: f64,
    annual_rent: f64,
    investment_cgt: f64,
}

pub fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if !(scenario.house_price.is_finite() && scenario.house_price > 0.0) {
        return Err(invalid("house_price", "must be > 0"));
    }
    if !(0.0..=1.0).contains(&scenario.deposit_fraction) {
        return Err(invalid("deposit_fraction", "must be between 0 and 1"));
    }
    if scenario.mortgage_term_years == 0 {
        return Err(invalid("mortgage_term_years", "must be > 0"));
    }
    if !(scenario.rental_yield.is_finite() && scenario.rental_yield >= 0.0) {
        return Err(invalid("rental_yield", "must be >= 0"));
    }
    if !(0.0..=1.0).contains(&scenario.selling_cost_fraction) {
        return Err(invalid("selling_cost_fraction", "must be between 0 and 1"));
    }
    if !(scenario.ongoing_cost_fraction.is_finite() && scenario.ongoing_cost_fraction >= 0.0) {
        return Err(invalid("ongoing_cost_fraction", "must be >= 0"));
    }
    if !(scenario.buying_cost_flat.is_finite() && scenario.buying_cost_flat >= 0.0) {
        return Err(invalid("buying_cost_flat", "must be >= 0"));
    }
    if !(scenario.inflation.is_finite() && scenario.inflation > -1.0) {
        return Err(invalid("inflation", "must be finite and > -100%"));
    }
    if !(scenario.annual_salary.is_finite() && scenario.annual_salary >= 0.0) {
        return Err(invalid("annual_salary", "must be >= 0"));
    }

    let draw = &scenario.draw;
    for (field, rate) in [
        ("mortgage_interest_rate", draw.mortgage_interest_rate),
        ("property_growth_rate", draw.property_growth_rate),
        ("rent_increase_rate", draw.rent_increase_rate),
        ("investment_return_rate", draw.investment_return_rate),
    ] {
        if !(rate.is_finite() && rate > -1.0) {
            return Err(invalid(field, "must be finite and > -100%"));
        }
    }

    validate_jurisdiction(&scenario.jurisdiction)
}

fn validate_jurisdiction(jurisdiction: &TaxJurisdiction) -> Result<()> {
    let bands = &jurisdiction.stamp_duty.bands;
    if bands
        .iter()
        .any(|band| !(band.threshold.is_finite() && band.threshold >= 0.0))
    {
        return Err(invalid("stamp_duty.bands", "thresholds must be finite and >= 0"));
    }
    if bands.iter().any(|band| !(band.rate.is_finite() && band.rate >= 0.0)) {
        return Err(invalid("stamp_duty.bands", "rates must be finite and >= 0"));
    }
    if bands.windows(2).any(|pair| pair[0].threshold >= pair[1].threshold) {
        return Err(invalid("stamp_duty.bands", "thresholds must be strictly ascending"));
    }

    let cgt = &jurisdiction.capital_gains;
    for (field, value) in [
        ("capital_gains.basic_rate_ceiling", cgt.basic_rate_ceiling),
        ("capital_gains.annual_allowance", cgt.annual_allowance),
        ("capital_gains.personal_allowance", cgt.personal_allowance),
        ("capital_gains.property_rates", cgt.property_rates.basic_rate),
        ("capital_gains.property_rates", cgt.property_rates.higher_rate),
        ("capital_gains.investment_rates", cgt.investment_rates.basic_rate),
        ("capital_gains.investment_rates", cgt.investment_rates.higher_rate),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(field, "must be finite and >= 0"));
        }
    }
    Ok(())
}

fn invalid(field: &'static str, reason: &str) -> SimulationError {
    SimulationError::InvalidScenario {
        field,
        reason: reason.to_string(),
    }
}

/// Values buying against renting and investing the same capital.
///
/// The investment return is the discount rate. Mortgage payments run for
/// the full term and are valued at sale as the cost of clearing the loan,
/// so `buying_future_value - renting_future_value` is always
/// `buying_npv` compounded to the sale year.
pub fn evaluate_scenario(scenario: &Scenario) -> Result<ScenarioOutcome> {
    validate_scenario(scenario)?;
    Ok(evaluate_validated(scenario))
}

fn evaluate_validated(scenario: &Scenario) -> ScenarioOutcome {
    let draw = &scenario.draw;
    let discount_rate = draw.investment_return_rate;
    let years = draw.years_until_sell;

    let buying = buying_leg(scenario);
    let renting = renting_leg(scenario, &buying);

    let pv_sale_price = present_value_of_future_payment(buying.future_house_price, discount_rate, years);
    let pv_selling_cost = present_value_of_future_payment(
        buying.selling_cost + buying.property_cgt,
        discount_rate,
        years,
    );
    let pv_ongoing_cost = annuity_present_value(
        buying.annual_ongoing_cost,
        discount_rate,
        years,
        scenario.inflation,
    );
    let pv_rent_saved = annuity_present_value(
        renting.annual_rent,
        discount_rate,
        years,
        draw.rent_increase_rate,
    );
    let pv_investment_cgt = present_value_of_future_payment(renting.investment_cgt, discount_rate, years);

    let buying_npv = pv_sale_price + pv_rent_saved + pv_investment_cgt
        - buying.pv_mortgage_payments
        - pv_ongoing_cost
        - buying.deposit
        - scenario.buying_cost_flat
        - buying.stamp_duty
        - pv_selling_cost;

    let mortgage_at_sale =
        future_value_of_present_payment(buying.pv_mortgage_payments, discount_rate, years, 0.0);
    let ongoing_at_sale = annuity_future_value(
        buying.annual_ongoing_cost,
        discount_rate,
        years,
        scenario.inflation,
        0.0,
    );
    let buying_future_value = buying.future_house_price
        - buying.selling_cost
        - buying.property_cgt
        - mortgage_at_sale
        - ongoing_at_sale;

    let capital_at_sale = future_value_of_present_payment(renting.capital, discount_rate, years, 0.0);
    let rent_paid_at_sale = annuity_future_value(
        renting.annual_rent,
        discount_rate,
        years,
        draw.rent_increase_rate,
        0.0,
    );
    let renting_future_value = capital_at_sale - rent_paid_at_sale - renting.investment_cgt;

    let deflator = future_value_of_present_payment(1.0, scenario.inflation, years, 0.0);

    ScenarioOutcome {
        buying_npv,
        buying_future_value,
        renting_future_value,
        buying_future_value_real: buying_future_value / deflator,
        renting_future_value_real: renting_future_value / deflator,
        capital_invested: buying.deposit,
        monthly_rent: scenario.monthly_rent(),
        stamp_duty: buying.stamp_duty,
        annual_mortgage_payment: buying.annual_mortgage_payment,
        future_house_price: buying.future_house_price,
        property_cgt: buying.property_cgt,
        investment_cgt: renting.investment_cgt,
    }
}

fn buying_leg(scenario: &Scenario) -> BuyingLeg {
    let draw = &scenario.draw;
    let price = scenario.house_price;

    let stamp_duty = if scenario.applies_stamp_duty {
        stamp_duty(price, &scenario.jurisdiction.stamp_duty)
    } else {
        0.0
    };

    let mortgage_amount = price * (1.0 - scenario.deposit_fraction);
    let annual_mortgage_payment = annuity_payment(
        mortgage_amount,
        draw.mortgage_interest_rate,
        scenario.mortgage_term_years,
        0.0,
    );
    let pv_mortgage_payments = annuity_present_value(
        annual_mortgage_payment,
        draw.investment_return_rate,
        scenario.mortgage_term_years,
        0.0,
    );

    let future_house_price =
        future_value_of_present_payment(price, draw.property_growth_rate, draw.years_until_sell, 0.0);
    let property_cgt = if scenario.applies_cgt_on_property {
        property_capital_gains_tax(
            future_house_price,
            price,
            scenario.annual_salary,
            &scenario.jurisdiction.capital_gains,
        )
    } else {
        0.0
    };

    BuyingLeg {
        deposit: scenario.deposit(),
        stamp_duty,
        annual_mortgage_payment,
        pv_mortgage_payments,
        future_house_price,
        selling_cost: future_house_price * scenario.selling_cost_fraction,
        property_cgt,
        annual_ongoing_cost: price * scenario.ongoing_cost_fraction,
    }
}

fn renting_leg(scenario: &Scenario, buying: &BuyingLeg) -> RentingLeg {
    let draw = &scenario.draw;
    let capital = buying.deposit + scenario.buying_cost_flat + buying.stamp_duty;

    let investment_cgt = if scenario.applies_cgt_on_investment {
        let final_value = future_value_of_present_payment(
            capital,
            draw.investment_return_rate,
            draw.years_until_sell,
            0.0,
        );
        investment_capital_gains_tax(
            final_value,
            capital,
            scenario.annual_salary,
            &scenario.jurisdiction.capital_gains,
        )
    } else {
        0.0
    };

    RentingLeg {
        capital,
        annual_rent: scenario.house_price * scenario.rental_yield,
        investment_cgt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UncertainDraw;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_scenario() -> Scenario {
        Scenario {
            house_price: 300_000.0,
            rental_yield: Scenario::rental_yield_from_monthly_rent(300_000.0, 1_075.0),
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
            jurisdiction: Default::default(),
            draw: UncertainDraw {
                mortgage_interest_rate: 0.055,
                property_growth_rate: 0.03,
                rent_increase_rate: 0.013,
                investment_return_rate: 0.06,
                years_until_sell: 15,
            },
        }
    }

    /// Cash-neutral scenario: no costs, no taxes, no rent.
    fn bare_scenario() -> Scenario {
        let mut scenario = sample_scenario();
        scenario.rental_yield = 0.0;
        scenario.buying_cost_flat = 0.0;
        scenario.selling_cost_fraction = 0.0;
        scenario.ongoing_cost_fraction = 0.0;
        scenario.applies_stamp_duty = false;
        scenario.applies_cgt_on_property = false;
        scenario
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let mut scenario = sample_scenario();
        scenario.house_price = 0.0;
        let err = evaluate_scenario(&scenario).expect_err("zero price is invalid");
        assert!(matches!(
            err,
            SimulationError::InvalidScenario {
                field: "house_price",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_deposit_outside_unit_range() {
        for fraction in [-0.1, 1.2] {
            let mut scenario = sample_scenario();
            scenario.deposit_fraction = fraction;
            let err = evaluate_scenario(&scenario).expect_err("deposit out of range");
            assert!(err.to_string().contains("deposit_fraction"));
        }
    }

    #[test]
    fn validate_rejects_zero_mortgage_term() {
        let mut scenario = sample_scenario();
        scenario.mortgage_term_years = 0;
        let err = evaluate_scenario(&scenario).expect_err("zero term is invalid");
        assert!(err.to_string().contains("mortgage_term_years"));
    }

    #[test]
    fn validate_rejects_unsorted_stamp_duty_bands() {
        let mut scenario = sample_scenario();
        scenario.jurisdiction.stamp_duty.bands.swap(1, 2);
        let err = evaluate_scenario(&scenario).expect_err("bands out of order");
        assert!(matches!(
            err,
            SimulationError::InvalidScenario {
                field: "stamp_duty.bands",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_non_finite_inputs() {
        let mut scenario = sample_scenario();
        scenario.inflation = f64::NAN;
        let err = evaluate_scenario(&scenario).expect_err("nan inflation");
        assert!(err.to_string().contains("inflation"));

        let mut scenario = sample_scenario();
        scenario.annual_salary = f64::NAN;
        let err = evaluate_scenario(&scenario).expect_err("nan salary");
        assert!(err.to_string().contains("annual_salary"));

        let mut scenario = sample_scenario();
        scenario.draw.property_growth_rate = f64::INFINITY;
        let err = evaluate_scenario(&scenario).expect_err("infinite growth");
        assert!(err.to_string().contains("property_growth_rate"));

        let mut scenario = sample_scenario();
        scenario.jurisdiction.capital_gains.property_rates.higher_rate = f64::NAN;
        let err = evaluate_scenario(&scenario).expect_err("nan cgt rate");
        assert!(err.to_string().contains("capital_gains.property_rates"));
    }

    #[test]
    fn sample_scenario_hand_calculation() {
        let scenario = sample_scenario();
        let outcome = evaluate_scenario(&scenario).expect("valid scenario");

        let price = 300_000.0_f64;
        let d = 0.06_f64;
        let n = 15;
        let deposit = 120_000.0;
        let stamp = 2_500.0;
        let payment = annuity_payment(180_000.0, 0.055, 30, 0.0);
        let pv_mortgage = annuity_present_value(payment, d, 30, 0.0);
        let future_price = price * 1.03_f64.powi(n);
        let cgt = property_capital_gains_tax(
            future_price,
            price,
            20_000.0,
            &scenario.jurisdiction.capital_gains,
        );
        let pv_sale = future_price / 1.06_f64.powi(n);
        let pv_sell_cost = (future_price * 0.02 + cgt) / 1.06_f64.powi(n);
        let pv_ongoing = annuity_present_value(1_800.0, d, 15, 0.02);
        let pv_rent = annuity_present_value(12_900.0, d, 15, 0.013);
        let expected = pv_sale + pv_rent - pv_mortgage - pv_ongoing - deposit - 3_000.0 - stamp
            - pv_sell_cost;

        assert_approx_tol(outcome.buying_npv, expected, 1e-6);
        assert_approx(outcome.capital_invested, deposit);
        assert_approx(outcome.stamp_duty, stamp);
        assert_approx(outcome.monthly_rent, 1_075.0);
        assert_approx(outcome.annual_mortgage_payment, payment);
        assert!(outcome.property_cgt > 0.0);
        assert_approx(outcome.investment_cgt, 0.0);
    }

    #[test]
    fn future_values_are_consistent_with_npv() {
        let scenario = sample_scenario();
        let outcome = evaluate_scenario(&scenario).expect("valid scenario");
        let growth = 1.06_f64.powi(15);
        assert_approx_tol(
            outcome.buying_future_value - outcome.renting_future_value,
            outcome.buying_npv * growth,
            1e-4,
        );
    }

    #[test]
    fn real_future_values_are_deflated_by_inflation() {
        let outcome = evaluate_scenario(&sample_scenario()).expect("valid scenario");
        let deflator = 1.02_f64.powi(15);
        assert_approx_tol(outcome.buying_future_value_real, outcome.buying_future_value / deflator, 1e-6);
        assert_approx_tol(
            outcome.renting_future_value_real,
            outcome.renting_future_value / deflator,
            1e-6,
        );
    }

    #[test]
    fn cash_purchase_at_discount_rate_growth_breaks_even() {
        let mut scenario = bare_scenario();
        scenario.deposit_fraction = 1.0;
        scenario.draw.property_growth_rate = scenario.draw.investment_return_rate;
        let outcome = evaluate_scenario(&scenario).expect("valid scenario");
        assert_approx_tol(outcome.buying_npv, 0.0, 1e-6);
    }

    #[test]
    fn mortgage_at_discount_rate_costs_the_principal() {
        let mut scenario = bare_scenario();
        scenario.deposit_fraction = 0.25;
        scenario.draw.mortgage_interest_rate = scenario.draw.investment_return_rate;
        scenario.draw.property_growth_rate = scenario.draw.investment_return_rate;
        let outcome = evaluate_scenario(&scenario).expect("valid scenario");
        assert_approx_tol(outcome.buying_npv, 0.0, 1e-6);
    }

    #[test]
    fn toggling_stamp_duty_shifts_npv_by_the_duty() {
        let mut with_duty = sample_scenario();
        with_duty.house_price = 500_000.0;
        let mut without_duty = with_duty.clone();
        without_duty.applies_stamp_duty = false;

        let a = evaluate_scenario(&with_duty).expect("valid");
        let b = evaluate_scenario(&without_duty).expect("valid");
        assert_approx(a.stamp_duty, 12_500.0);
        assert_approx_tol(b.buying_npv - a.buying_npv, 12_500.0, 1e-6);
    }

    #[test]
    fn property_cgt_toggle_only_lowers_npv() {
        let mut taxed = sample_scenario();
        taxed.draw.property_growth_rate = 0.05;
        let mut untaxed = taxed.clone();
        untaxed.applies_cgt_on_property = false;

        let a = evaluate_scenario(&taxed).expect("valid");
        let b = evaluate_scenario(&untaxed).expect("valid");
        assert!(a.property_cgt > 0.0);
        assert_approx(b.property_cgt, 0.0);
        assert_approx_tol(
            b.buying_npv - a.buying_npv,
            a.property_cgt / 1.06_f64.powi(15),
            1e-6,
        );
    }

    #[test]
    fn investment_cgt_favours_buying_and_lowers_renting_value() {
        let mut taxed = sample_scenario();
        taxed.applies_cgt_on_investment = true;
        taxed.annual_salary = 80_000.0;
        let untaxed = sample_scenario();

        let a = evaluate_scenario(&taxed).expect("valid");
        let b = evaluate_scenario(&untaxed).expect("valid");
        assert!(a.investment_cgt > 0.0);
        assert!(a.buying_npv > b.buying_npv);
        assert!(a.renting_future_value < b.renting_future_value);
        assert_approx_tol(
            a.buying_future_value - a.renting_future_value,
            a.buying_npv * 1.06_f64.powi(15),
            1e-4,
        );
    }

    #[test]
    fn selling_immediately_discounts_nothing() {
        let mut scenario = sample_scenario();
        scenario.draw.years_until_sell = 0;
        let outcome = evaluate_scenario(&scenario).expect("valid");
        let payment = annuity_payment(180_000.0, 0.055, 30, 0.0);
        let pv_mortgage = annuity_present_value(payment, 0.06, 30, 0.0);
        let expected = 300_000.0 * 0.98 - pv_mortgage - 120_000.0 - 3_000.0 - 2_500.0;
        assert_approx_tol(outcome.buying_npv, expected, 1e-6);
    }

    #[test]
    fn rent_increase_equal_to_discount_rate_stays_finite() {
        let mut scenario = sample_scenario();
        scenario.draw.rent_increase_rate = scenario.draw.investment_return_rate;
        let outcome = evaluate_scenario(&scenario).expect("valid");
        assert!(outcome.buying_npv.is_finite());
        assert!(outcome.renting_future_value.is_finite());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let scenario = sample_scenario();
        let a = evaluate_scenario(&scenario).expect("valid");
        let b = evaluate_scenario(&scenario).expect("valid");
        assert_eq!(a.buying_npv.to_bits(), b.buying_npv.to_bits());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_higher_rent_favours_buying(
            yield_bp in 100u32..800,
            extra_bp in 1u32..300,
            years in 1u32..40,
        ) {
            let mut low = sample_scenario();
            low.rental_yield = yield_bp as f64 / 10_000.0;
            low.draw.years_until_sell = years;
            let mut high = low.clone();
            high.rental_yield = (yield_bp + extra_bp) as f64 / 10_000.0;

            let a = evaluate_scenario(&low).expect("valid");
            let b = evaluate_scenario(&high).expect("valid");
            prop_assert!(b.buying_npv > a.buying_npv);
        }

        #[test]
        fn prop_outputs_are_finite(
            price in 50_000u32..3_000_000,
            deposit_pct in 0u32..101,
            mortgage_bp in 0i32..1500,
            growth_bp in -500i32..1200,
            rent_bp in -300i32..800,
            invest_bp in -500i32..1500,
            years in 0u32..60,
            term in 1u32..40,
        ) {
            let mut scenario = sample_scenario();
            scenario.house_price = price as f64;
            scenario.deposit_fraction = deposit_pct as f64 / 100.0;
            scenario.mortgage_term_years = term;
            scenario.draw = UncertainDraw {
                mortgage_interest_rate: mortgage_bp as f64 / 10_000.0,
                property_growth_rate: growth_bp as f64 / 10_000.0,
                rent_increase_rate: rent_bp as f64 / 10_000.0,
                investment_return_rate: invest_bp as f64 / 10_000.0,
                years_until_sell: years,
            };
            let outcome = evaluate_scenario(&scenario).expect("valid");
            prop_assert!(outcome.buying_npv.is_finite());
            prop_assert!(outcome.buying_future_value.is_finite());
            prop_assert!(outcome.renting_future_value.is_finite());
        }
    }
}
