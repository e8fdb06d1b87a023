//! Statistical Functions
//!
//! Every function borrows its input, so computing one statistic can never
//! disturb the sequence another one reads. Accumulation is done in `f64`.

use thiserror::Error;

/// Errors from statistics over an invalid sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Precondition violated (e.g. empty sequence)
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// NaN values have no place in a total order
    #[error("Invalid input: NaN at index {index}")]
    NotANumber { index: usize },
}

fn validate(values: &[f32]) -> Result<(), StatsError> {
    if values.is_empty() {
        return Err(StatsError::InvalidInput("empty sequence"));
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(StatsError::NotANumber { index });
    }
    Ok(())
}

fn mean_f64(values: &[f32]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Arithmetic mean
pub fn mean(values: &[f32]) -> Result<f32, StatsError> {
    validate(values)?;
    Ok(mean_f64(values) as f32)
}

/// Population standard deviation (normalized by n, not n - 1)
pub fn std_dev(values: &[f32]) -> Result<f32, StatsError> {
    validate(values)?;

    let mean = mean_f64(values);
    let m2: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();

    Ok((m2 / values.len() as f64).sqrt() as f32)
}

/// Largest value
pub fn max(values: &[f32]) -> Result<f32, StatsError> {
    validate(values)?;
    Ok(values[1..]
        .iter()
        .fold(values[0], |acc, &v| if v > acc { v } else { acc }))
}

/// Smallest value
pub fn min(values: &[f32]) -> Result<f32, StatsError> {
    validate(values)?;
    Ok(values[1..]
        .iter()
        .fold(values[0], |acc, &v| if v < acc { v } else { acc }))
}

/// Median of a sorted copy: middle element for odd lengths, average of the
/// two central elements for even lengths
pub fn median(values: &[f32]) -> Result<f32, StatsError> {
    validate(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        let lower = sorted[(n - 1) / 2] as f64;
        let upper = sorted[n / 2] as f64;
        Ok(((lower + upper) / 2.0) as f32)
    }
}

/// All statistics for one sensor's window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorStatistics {
    pub mean: f32,
    pub std_dev: f32,
    pub max: f32,
    pub min: f32,
    pub median: f32,
}

impl SensorStatistics {
    /// Compute every statistic from a slice of values
    pub fn compute(values: &[f32]) -> Result<Self, StatsError> {
        Ok(Self {
            mean: mean(values)?,
            std_dev: std_dev(values)?,
            max: max(values)?,
            min: min(values)?,
            median: median(values)?,
        })
    }
}
