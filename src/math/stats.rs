//! Descriptive statistics for group summaries.
//!
//! All functions are pure and return `None` where the statistic is undefined
//! for the given sample size.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Standard error of the mean: `sample_sd / sqrt(n)`. Undefined below n = 2.
pub fn standard_error(values: &[f64]) -> Option<f64> {
    let sd = sample_sd(values)?;
    Some(sd / (values.len() as f64).sqrt())
}
