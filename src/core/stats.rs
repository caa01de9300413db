use super::error::{Result, SimulationError};
use super::types::{NpvSummary, PercentileRow, PercentileTable};

pub const REPORTED_PERCENTILES: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

/// Linear-interpolation percentile; sorts `values` in place.
pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    percentile_sorted(values, p)
}

/// Linear-interpolation percentile of an ascending slice.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        sorted[lower] * (1.0 - w) + sorted[upper] * w
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    central_moment(values, 2).sqrt()
}

/// Biased sample skewness `m3 / m2^1.5`; zero when the values are constant.
pub fn skew(values: &[f64]) -> f64 {
    let m2 = central_moment(values, 2);
    if m2 <= 0.0 {
        return 0.0;
    }
    central_moment(values, 3) / m2.powf(1.5)
}

fn central_moment(values: &[f64], order: i32) -> f64 {
    let mu = mean(values);
    values.iter().map(|v| (v - mu).powi(order)).sum::<f64>() / values.len() as f64
}

/// Pearson correlation; `None` for mismatched lengths or zero variance.
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs);
    let my = mean(ys);
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx <= 0.0 || vy <= 0.0 {
        return None;
    }
    Some(cov / (vx * vy).sqrt())
}

fn pct_of_capital(value: f64, capital_invested: f64) -> Option<f64> {
    if capital_invested > 0.0 {
        Some(value / capital_invested * 100.0)
    } else {
        None
    }
}

pub fn summarize(values: &[f64], capital_invested: f64) -> Result<NpvSummary> {
    if values.is_empty() {
        return Err(SimulationError::EmptyOutcomes);
    }
    let mean = mean(values);
    let std_dev = std_dev(values);
    Ok(NpvSummary {
        mean,
        std_dev,
        skew: skew(values),
        mean_pct_of_capital: pct_of_capital(mean, capital_invested),
        std_dev_pct_of_capital: pct_of_capital(std_dev, capital_invested),
    })
}

/// 10/25/50/75/90th percentiles plus the rank of the outcome closest to zero.
///
/// The breakeven rank is the position of that outcome in sorted order over
/// `len - 1`, as a percentage. Ties on distance resolve to the first
/// occurrence in input order, and its first position in sorted order. A
/// single outcome ranks 0 when non-negative and 100 otherwise.
pub fn calculate_percentiles(values: &[f64], capital_invested: f64) -> Result<PercentileTable> {
    if values.is_empty() {
        return Err(SimulationError::EmptyOutcomes);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rows = REPORTED_PERCENTILES
        .iter()
        .map(|&p| {
            let npv = percentile_sorted(&sorted, p);
            PercentileRow {
                percentile: p,
                npv,
                pct_return: pct_of_capital(npv, capital_invested),
            }
        })
        .collect();

    let closest = values
        .iter()
        .copied()
        .fold(values[0], |best, v| if v.abs() < best.abs() { v } else { best });
    let index = sorted.iter().position(|v| *v == closest).unwrap_or(0);
    let rank = if sorted.len() == 1 {
        if closest >= 0.0 { 0.0 } else { 100.0 }
    } else {
        index as f64 / (sorted.len() - 1) as f64 * 100.0
    };

    Ok(PercentileTable {
        rows,
        breakeven: PercentileRow {
            percentile: rank,
            npv: closest,
            pct_return: pct_of_capital(closest, capital_invested),
        },
    })
}
