use std::collections::HashMap;

use thiserror::Error;

/// Failure modes of the statistics functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("The dataset is empty.")]
    EmptyDataset,
    #[error("Every value in the dataset is equal, so the standard deviation is zero.")]
    ZeroVariance,
    #[error("The values are too large to compute statistics for.")]
    Overflow,
}

/// Thresholds (in standard deviations) reported by `distribution_buckets`.
pub const DISTRIBUTION_THRESHOLDS: [f64; 5] = [0.25, 0.5, 1.0, 2.0, 3.0];

fn require_non_empty(data: &[f64]) -> Result<(), StatsError> {
    if data.is_empty() {
        Err(StatsError::EmptyDataset)
    } else {
        Ok(())
    }
}

fn finite(value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::Overflow)
    }
}

/// Exact equality of every element, immune to rounding in the mean.
fn is_constant(data: &[f64]) -> bool {
    data.iter().all(|&x| x == data[0])
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut vals = data.to_vec();
    vals.sort_by(f64::total_cmp);
    vals
}

pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

pub fn min(data: &[f64]) -> Result<f64, StatsError> {
    require_non_empty(data)?;
    Ok(data.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(data: &[f64]) -> Result<f64, StatsError> {
    require_non_empty(data)?;
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Arithmetic mean, clamped to `[min, max]` so rounding in the sum cannot
/// push it outside the data.
pub fn mean(data: &[f64]) -> Result<f64, StatsError> {
    require_non_empty(data)?;
    let mean = finite(sum(data) / data.len() as f64)?;
    Ok(mean.clamp(min(data)?, max(data)?))
}

/// Middle value of a sorted copy; the caller's order is left untouched.
pub fn median(data: &[f64]) -> Result<f64, StatsError> {
    require_non_empty(data)?;
    let vals = sorted(data);
    let count = vals.len();
    Ok(if count % 2 == 0 {
        // halve first so two large values cannot overflow
        vals[count / 2 - 1] / 2.0 + vals[count / 2] / 2.0
    } else {
        vals[count / 2]
    })
}

/// Population standard deviation (divides by the count, not count - 1).
pub fn standard_deviation(data: &[f64]) -> Result<f64, StatsError> {
    let mean = mean(data)?;
    if is_constant(data) {
        return Ok(0.0);
    }
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / data.len() as f64;
    finite(variance.sqrt())
}

pub fn range(data: &[f64]) -> Result<f64, StatsError> {
    finite(max(data)? - min(data)?)
}

/// Linearly interpolated percentile, `p` in `0..=100`.
pub fn percentile(data: &[f64], p: f64) -> Result<f64, StatsError> {
    require_non_empty(data)?;
    finite(percentile_sorted(&sorted(data), p))
}

fn percentile_sorted(vals: &[f64], p: f64) -> f64 {
    let pos = (vals.len() - 1) as f64 * (p / 100.0).clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    vals[lo] + (vals[hi] - vals[lo]) * (pos - lo as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

pub fn quartiles(data: &[f64]) -> Result<Quartiles, StatsError> {
    require_non_empty(data)?;
    let vals = sorted(data);
    let q = Quartiles {
        q1: finite(percentile_sorted(&vals, 25.0))?,
        q3: finite(percentile_sorted(&vals, 75.0))?,
    };
    finite(q.iqr())?;
    Ok(q)
}

/// Most frequent value(s) of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// No value occurs more than once.
    None,
    /// Every value sharing the highest count, in first-occurrence order.
    Values(Vec<f64>),
}

pub fn mode(data: &[f64]) -> Mode {
    // -0.0 and 0.0 compare equal, so they share a key
    let key = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };

    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut order: Vec<f64> = Vec::new();
    for &v in data {
        let entry = counts.entry(key(v)).or_insert(0);
        if *entry == 0 {
            order.push(v);
        }
        *entry += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    if max_count <= 1 {
        return Mode::None;
    }
    Mode::Values(
        order
            .into_iter()
            .filter(|v| counts.get(&key(*v)) == Some(&max_count))
            .collect(),
    )
}

fn z_params(data: &[f64]) -> Result<(f64, f64), StatsError> {
    let mean = mean(data)?;
    let std_dev = standard_deviation(data)?;
    if std_dev == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok((mean, std_dev))
}

pub fn z_scores(data: &[f64]) -> Result<Vec<f64>, StatsError> {
    let (mean, std_dev) = z_params(data)?;
    data.iter().map(|x| finite((x - mean) / std_dev)).collect()
}

/// Z-score of an arbitrary value measured against a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreLookup {
    pub value: f64,
    pub z_score: f64,
    /// Whether `value` occurs in the dataset (exact equality).
    pub in_dataset: bool,
}

pub fn z_score_of(value: f64, data: &[f64]) -> Result<ZScoreLookup, StatsError> {
    let (mean, std_dev) = z_params(data)?;
    Ok(ZScoreLookup {
        value,
        z_score: finite((value - mean) / std_dev)?,
        in_dataset: data.iter().any(|&x| x == value),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub threshold: f64,
    pub count: usize,
    pub percentage: f64,
}

/// How many z-scores fall within each of `DISTRIBUTION_THRESHOLDS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub buckets: Vec<Bucket>,
}

pub fn distribution_buckets(z_scores: &[f64]) -> Distribution {
    let total = z_scores.len();
    let buckets = DISTRIBUTION_THRESHOLDS
        .iter()
        .map(|&threshold| {
            let count = z_scores.iter().filter(|z| z.abs() <= threshold).count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            Bucket { threshold, count, percentage }
        })
        .collect();
    Distribution { buckets }
}

/// Statistics for one dataset, computed in a single call.
#[derive(Debug, Clone)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    pub range: f64,
    pub std_dev: f64,
    pub quartiles: Quartiles,
    /// `None` when the dataset has zero variance.
    pub distribution: Option<Distribution>,
}

impl Summary {
    pub fn compute(data: &[f64]) -> Result<Self, StatsError> {
        require_non_empty(data)?;

        let distribution = match z_scores(data) {
            Ok(z) => Some(distribution_buckets(&z)),
            Err(StatsError::ZeroVariance) => None,
            Err(e) => return Err(e),
        };

        Ok(Summary {
            count: data.len(),
            sum: finite(sum(data))?,
            min: min(data)?,
            max: max(data)?,
            mean: mean(data)?,
            median: median(data)?,
            mode: mode(data),
            range: range(data)?,
            std_dev: standard_deviation(data)?,
            quartiles: quartiles(data)?,
            distribution,
        })
    }
}
