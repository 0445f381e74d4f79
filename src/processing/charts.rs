use crate::processing::statistics::{self, StatsError};

/// Number of bins used by the histogram and bell-curve charts.
pub const HISTOGRAM_BINS: usize = 30;

/// Number of samples along the normal density curve.
const CURVE_SAMPLES: usize = 100;

/// Whisker reach, in multiples of the IQR, for the box plot.
const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Line,
    Scatter,
    BoxPlot,
    BellCurve,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Histogram,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::BoxPlot,
        ChartKind::BellCurve,
    ];

    pub fn menu_label(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Show Histogram",
            ChartKind::Line => "Show Line Plot",
            ChartKind::Scatter => "Show Scatter Plot",
            ChartKind::BoxPlot => "Show Box Plot",
            ChartKind::BellCurve => "Show Bell Curve",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram of input values",
            ChartKind::Line => "Line plot of input values",
            ChartKind::Scatter => "Scatter plot of unsorted input values",
            ChartKind::BoxPlot => "Box plot of input values",
            ChartKind::BellCurve => "Bell Curve (Normal Distribution)",
        }
    }

    /// Axis labels as (x, y). The box plot has none.
    pub fn axis_labels(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ChartKind::Histogram => Some(("Value", "Frequency")),
            ChartKind::Line | ChartKind::Scatter => Some(("Index", "Value")),
            ChartKind::BoxPlot => None,
            ChartKind::BellCurve => Some(("Value", "Density")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    /// Count, or probability density when built with `density = true`.
    pub value: f64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins spanning `[min, max]`. The last bin is closed so the
/// maximum is counted. A constant dataset gets a unit-wide span around it.
pub fn histogram(data: &[f64], bins: usize, density: bool) -> Result<Vec<HistogramBin>, StatsError> {
    statistics::range(data)?;
    let mut lo = statistics::min(data)?;
    let mut hi = statistics::max(data)?;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let bins = bins.max(1);
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in data {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let scale = if density {
        1.0 / (data.len() as f64 * width)
    } else {
        1.0
    };

    Ok(counts
        .iter()
        .enumerate()
        .map(|(i, &c)| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            value: c as f64 * scale,
        })
        .collect())
}

/// `[index, value]` pairs in input order.
pub fn indexed_points(data: &[f64]) -> Vec<[f64; 2]> {
    data.iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect()
}

/// A labelled vertical guide on the line plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub label: &'static str,
    pub x: f64,
    pub value: f64,
}

/// Q1, median and Q3 guides placed at a quarter, half and three quarters of
/// the index axis.
pub fn quartile_markers(data: &[f64]) -> Result<Vec<Marker>, StatsError> {
    let q = statistics::quartiles(data)?;
    let median = statistics::median(data)?;
    let n = data.len() as f64;
    Ok(vec![
        Marker { label: "Q1", x: n * 0.25, value: q.q1 },
        Marker { label: "Q3", x: n * 0.75, value: q.q3 },
        Marker { label: "Median", x: n * 0.5, value: median },
    ])
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpread {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

pub fn box_spread(data: &[f64]) -> Result<BoxSpread, StatsError> {
    let q = statistics::quartiles(data)?;
    let median = statistics::median(data)?;
    let low_fence = q.q1 - WHISKER_IQR * q.iqr();
    let high_fence = q.q3 + WHISKER_IQR * q.iqr();

    let lower_whisker = data
        .iter()
        .copied()
        .filter(|&v| v >= low_fence)
        .fold(f64::INFINITY, f64::min);
    let upper_whisker = data
        .iter()
        .copied()
        .filter(|&v| v <= high_fence)
        .fold(f64::NEG_INFINITY, f64::max);
    let outliers = data
        .iter()
        .copied()
        .filter(|&v| v < lower_whisker || v > upper_whisker)
        .collect();

    Ok(BoxSpread {
        lower_whisker,
        q1: q.q1,
        median,
        q3: q.q3,
        upper_whisker,
        outliers,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZLine {
    pub k: i32,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BellCurve {
    pub mean: f64,
    pub std_dev: f64,
    /// Density-normalised histogram of the data.
    pub histogram: Vec<HistogramBin>,
    /// Normal pdf sampled across the data range.
    pub curve: Vec<[f64; 2]>,
    /// Lines at mean + k * std_dev for k in -3..=3.
    pub z_lines: Vec<ZLine>,
    /// Height at which the `Z=k` labels sit.
    pub label_height: f64,
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

pub fn bell_curve(data: &[f64]) -> Result<BellCurve, StatsError> {
    let mean = statistics::mean(data)?;
    let std_dev = statistics::standard_deviation(data)?;
    if std_dev == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    let lo = statistics::min(data)?;
    let step = statistics::range(data)? / (CURVE_SAMPLES - 1) as f64;
    let curve: Vec<[f64; 2]> = (0..CURVE_SAMPLES)
        .map(|i| {
            let x = lo + i as f64 * step;
            [x, normal_pdf(x, mean, std_dev)]
        })
        .collect();
    let peak = curve.iter().map(|p| p[1]).fold(0.0, f64::max);

    Ok(BellCurve {
        mean,
        std_dev,
        histogram: histogram(data, HISTOGRAM_BINS, true)?,
        curve,
        z_lines: (-3..=3)
            .map(|k| ZLine { k, x: mean + k as f64 * std_dev })
            .collect(),
        label_height: peak / 10.0,
    })
}

/// Plot-ready geometry for one chart window.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Histogram(Vec<HistogramBin>),
    Line {
        points: Vec<[f64; 2]>,
        markers: Vec<Marker>,
        /// Height at which marker labels are drawn.
        top: f64,
    },
    Scatter(Vec<[f64; 2]>),
    BoxPlot(BoxSpread),
    BellCurve(BellCurve),
}

impl ChartData {
    pub fn build(kind: ChartKind, data: &[f64]) -> Result<Self, StatsError> {
        Ok(match kind {
            ChartKind::Histogram => ChartData::Histogram(histogram(data, HISTOGRAM_BINS, false)?),
            ChartKind::Line => ChartData::Line {
                points: indexed_points(data),
                markers: quartile_markers(data)?,
                top: statistics::max(data)?,
            },
            ChartKind::Scatter => {
                statistics::min(data)?;
                ChartData::Scatter(indexed_points(data))
            }
            ChartKind::BoxPlot => ChartData::BoxPlot(box_spread(data)?),
            ChartKind::BellCurve => ChartData::BellCurve(bell_curve(data)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value() {
        let data: Vec<f64> = (0..=30).map(f64::from).collect();
        let bins = histogram(&data, HISTOGRAM_BINS, false).unwrap();
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.value).sum::<f64>(), 31.0);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[29].end, 30.0);
        // the maximum lands in the closed last bin
        assert_eq!(bins[29].value, 2.0);
    }

    #[test]
    fn histogram_of_constant_data_spans_unit_width() {
        let bins = histogram(&[4.0, 4.0], 10, false).unwrap();
        assert!((bins[0].start - 3.5).abs() < 1e-12);
        assert!((bins[9].end - 4.5).abs() < 1e-12);
        assert_eq!(bins.iter().map(|b| b.value).sum::<f64>(), 2.0);
    }

    #[test]
    fn density_histogram_integrates_to_one() {
        let data = [1.0, 2.0, 2.0, 3.0, 7.5, 9.0];
        let bins = histogram(&data, 5, true).unwrap();
        let area: f64 = bins.iter().map(|b| b.value * b.width()).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn box_spread_separates_outliers() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let spread = box_spread(&data).unwrap();
        assert_eq!(spread.lower_whisker, 1.0);
        assert_eq!(spread.upper_whisker, 9.0);
        assert_eq!(spread.outliers, vec![100.0]);
        assert_eq!(spread.median, 5.5);
    }

    #[test]
    fn line_markers_sit_on_index_fractions() {
        let data: Vec<f64> = (1..=8).map(f64::from).collect();
        let markers = quartile_markers(&data).unwrap();
        let xs: Vec<f64> = markers.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![2.0, 6.0, 4.0]);
        assert_eq!(markers[2].value, 4.5);
    }

    #[test]
    fn bell_curve_lines_and_samples() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bell = bell_curve(&data).unwrap();
        assert_eq!(bell.curve.len(), 100);
        assert_eq!(bell.curve[0][0], 2.0);
        assert!((bell.curve[99][0] - 9.0).abs() < 1e-12);
        let xs: Vec<f64> = bell.z_lines.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![-1.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0]);
        assert!(bell.label_height > 0.0);
    }

    #[test]
    fn bell_curve_needs_variance() {
        assert_eq!(bell_curve(&[1.0, 1.0]), Err(StatsError::ZeroVariance));
        assert_eq!(bell_curve(&[0.1, 0.1, 0.1]), Err(StatsError::ZeroVariance));
    }

    #[test]
    fn spans_too_wide_for_f64_are_rejected() {
        let data = [-1e308, 1e308];
        assert_eq!(histogram(&data, HISTOGRAM_BINS, false), Err(StatsError::Overflow));
        assert_eq!(ChartData::build(ChartKind::BellCurve, &data), Err(StatsError::Overflow));
    }

    #[test]
    fn build_rejects_empty_data() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartData::build(kind, &[]), Err(StatsError::EmptyDataset));
        }
    }
}
