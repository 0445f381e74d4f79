//! Text rendering of statistics for the output pane.
//!
//! Decimal places are applied here and nowhere else; every value passed in
//! is the unrounded result of the statistics engine.

use crate::processing::statistics::{Distribution, Mode, Summary, ZScoreLookup};

pub const INVALID_TOKENS_NOTICE: &str = "Invalid input/s found. Analysing valid values input...\n";
pub const SAVED_NOTICE: &str = "Results saved successfully!\n\n";

pub fn format_number(value: f64, decimal_places: usize) -> String {
    format!("{value:.decimal_places$}")
}

pub fn summary_report(summary: &Summary, decimal_places: usize) -> String {
    let f = |v: f64| format_number(v, decimal_places);

    let mode = match &summary.mode {
        Mode::Values(values) if values.len() > 1 => {
            let joined: Vec<String> = values.iter().map(|&v| f(v)).collect();
            format!("Modes: {}\n", joined.join(", "))
        }
        Mode::Values(values) => values.iter().map(|&v| format!("Mode: {}\n", f(v))).collect(),
        Mode::None => "No unique mode found.\n".to_string(),
    };

    let distribution = match &summary.distribution {
        Some(distribution) => distribution_report(distribution, decimal_places),
        None => "Z-score distribution unavailable: every value in the dataset is equal.\n\n"
            .to_string(),
    };

    format!(
        "Values count: {}\n\
         Sum of values: {}\n\
         Highest value: {}\n\
         Lowest value: {}\n\
         Mean: {}\n\
         Median: {}\n\
         {mode}\
         Range: {}\n\
         Standard Deviation: {}\n\
         First Quartile (Q1): {}\n\
         Third Quartile (Q3): {}\n\
         IQR: {}\n\n\
         {distribution}",
        summary.count,
        f(summary.sum),
        f(summary.max),
        f(summary.min),
        f(summary.mean),
        f(summary.median),
        f(summary.range),
        f(summary.std_dev),
        f(summary.quartiles.q1),
        f(summary.quartiles.q3),
        f(summary.quartiles.iqr()),
    )
}

fn distribution_report(distribution: &Distribution, decimal_places: usize) -> String {
    let mut out: String = distribution
        .buckets
        .iter()
        .map(|bucket| {
            let unit = if bucket.threshold == 1.0 {
                "standard deviation"
            } else {
                "standard deviations"
            };
            format!(
                "{}% of values are within {} {unit} of the mean\n",
                format_number(bucket.percentage, decimal_places),
                bucket.threshold,
            )
        })
        .collect();
    out.push('\n');
    out
}

/// The looked-up value is echoed in full float form (`4.0`), the z-score
/// with the configured decimal places.
pub fn z_score_report(lookup: &ZScoreLookup, decimal_places: usize) -> String {
    let mut out = format!(
        "Z-score of {:?}: {}\n",
        lookup.value,
        format_number(lookup.z_score, decimal_places)
    );
    if !lookup.in_dataset {
        out.push_str(&format!(
            "Note: The value {:?} was not found in your dataset and may not be applicable.\n",
            lookup.value
        ));
    }
    out.push('\n');
    out
}

pub fn sorted_values_report(data: &[f64], decimal_places: usize) -> String {
    let mut vals = data.to_vec();
    vals.sort_by(f64::total_cmp);
    let joined: Vec<String> = vals.iter().map(|&v| format_number(v, decimal_places)).collect();
    format!("Sorted Values:\n{}", joined.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::statistics::z_score_of;

    #[test]
    fn format_applies_decimal_places() {
        assert_eq!(format_number(3.14159, 2), "3.14");
        assert_eq!(format_number(2.0, 0), "2");
        assert_eq!(format_number(-1.5, 3), "-1.500");
    }

    #[test]
    fn summary_report_layout() {
        let summary = Summary::compute(&[1.0, 1.0, 2.0, 2.0, 3.0]).unwrap();
        let text = summary_report(&summary, 2);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Values count: 5");
        assert_eq!(lines[1], "Sum of values: 9.00");
        assert_eq!(lines[2], "Highest value: 3.00");
        assert_eq!(lines[3], "Lowest value: 1.00");
        assert_eq!(lines[4], "Mean: 1.80");
        assert_eq!(lines[5], "Median: 2.00");
        assert_eq!(lines[6], "Modes: 1.00, 2.00");
        assert_eq!(lines[7], "Range: 2.00");
        assert_eq!(lines[9], "First Quartile (Q1): 1.00");
        assert_eq!(lines[10], "Third Quartile (Q3): 2.00");
        assert_eq!(lines[11], "IQR: 1.00");
        assert_eq!(lines[12], "");
        assert!(lines[13].ends_with("of values are within 0.25 standard deviations of the mean"));
        assert!(lines[15].ends_with("within 1 standard deviation of the mean"));
        assert_eq!(lines[17], "100.00% of values are within 3 standard deviations of the mean");
        assert!(text.ends_with("mean\n\n"));
    }

    #[test]
    fn single_and_missing_mode_lines() {
        let one = summary_report(&Summary::compute(&[4.0, 4.0, 1.0]).unwrap(), 1);
        assert!(one.contains("\nMode: 4.0\n"));

        let none = summary_report(&Summary::compute(&[1.0, 2.0, 3.0]).unwrap(), 1);
        assert!(none.contains("\nNo unique mode found.\n"));
    }

    #[test]
    fn constant_data_reports_missing_distribution() {
        let text = summary_report(&Summary::compute(&[7.0, 7.0]).unwrap(), 0);
        assert!(text.contains("Standard Deviation: 0\n"));
        assert!(text.contains("Z-score distribution unavailable"));
        assert!(!text.contains("% of values"));
    }

    #[test]
    fn rounding_is_display_only() {
        // mean 1/3 shown with 0 places, yet the z-score uses the exact mean
        let data = [0.0, 0.0, 1.0];
        let summary = Summary::compute(&data).unwrap();
        assert!(summary_report(&summary, 0).contains("Mean: 0\n"));
        let lookup = z_score_of(0.0, &data).unwrap();
        assert_eq!(z_score_report(&lookup, 4), "Z-score of 0.0: -0.7071\n\n");
    }

    #[test]
    fn z_score_report_echoes_value_as_float() {
        let lookup = z_score_of(4.0, &[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(z_score_report(&lookup, 2), "Z-score of 4.0: 0.00\n\n");
    }

    #[test]
    fn z_score_report_notes_absent_value() {
        let lookup = z_score_of(2.5, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            z_score_report(&lookup, 2),
            "Z-score of 2.5: 0.61\nNote: The value 2.5 was not found in your dataset and may not be applicable.\n\n"
        );
    }

    #[test]
    fn sorted_values_are_ascending() {
        assert_eq!(
            sorted_values_report(&[3.0, -1.0, 2.5], 1),
            "Sorted Values:\n-1.0 2.5 3.0"
        );
    }
}
