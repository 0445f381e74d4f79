use std::path::Path;

use thiserror::Error;

use crate::data::loader::{self, LoadError};
use crate::data::parser::{self, LookupInputError};
use crate::processing::charts::{ChartData, ChartKind};
use crate::processing::report;
use crate::processing::statistics::{self, StatsError, Summary, ZScoreLookup};
use crate::state::settings::Settings;

pub const VERSION: &str = "0.1.0";

/// A user action that could not be carried out. The `Display` text is shown
/// to the user as-is.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No data available to save. Please enter and analyse data first.")]
    NothingToSave,
    #[error("No data available to plot. Please enter and analyse data first!")]
    NothingToPlot,
    #[error("No data available. Please enter and analyse data first!")]
    NotAnalysed,
    #[error("No numerical data available. Please enter data first!")]
    NoNumericData,
    #[error("Please enter a value to find its Z-score!")]
    EmptyLookup,
    #[error("Invalid input! Please enter a numerical value to find its Z-score.")]
    InvalidLookup,
    #[error("{0}")]
    Stats(#[from] StatsError),
    #[error("{0}")]
    Load(#[from] LoadError),
}

impl From<LookupInputError> for ActionError {
    fn from(e: LookupInputError) -> Self {
        match e {
            LookupInputError::Empty => ActionError::EmptyLookup,
            LookupInputError::NotNumeric => ActionError::InvalidLookup,
        }
    }
}

/// One row of the z-score table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreRow {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
}

/// Everything the window shows, plus the dataset under analysis.
///
/// The dataset only changes through `analyse`, `load_file` and `clear`, and
/// each of those resets or re-establishes `analysed`, so a displayed summary
/// always belongs to the current dataset.
#[derive(Debug, Default)]
pub struct AppState {
    pub input_text: String,
    pub output_text: String,
    pub lookup_text: String,
    pub settings: Settings,
    dataset: Vec<f64>,
    analysed: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn dataset(&self) -> &[f64] {
        &self.dataset
    }

    pub fn is_analysed(&self) -> bool {
        self.analysed
    }

    fn require_analysed(&self, err: ActionError) -> Result<(), ActionError> {
        if self.analysed {
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Parse the input box and replace the output with a fresh summary.
    pub fn analyse(&mut self) -> Result<Summary, ActionError> {
        self.output_text.clear();
        self.dataset.clear();
        self.analysed = false;

        let parsed = parser::parse_numbers(&self.input_text);
        if parsed.values.is_empty() {
            return Err(ActionError::NoNumericData);
        }

        let summary = Summary::compute(&parsed.values)?;
        self.dataset = parsed.values;
        self.analysed = true;

        if parsed.skipped > 0 {
            tracing::warn!("Skipped {} unreadable input token(s)", parsed.skipped);
            self.output_text.push_str(report::INVALID_TOKENS_NOTICE);
        }
        self.output_text
            .push_str(&report::summary_report(&summary, self.settings.decimal_places));

        tracing::info!("Analysed {} values", summary.count);
        Ok(summary)
    }

    pub fn clear(&mut self) {
        self.input_text.clear();
        self.output_text.clear();
        self.lookup_text.clear();
        self.dataset.clear();
        self.analysed = false;
    }

    /// Import integers from a file. The values are written back into the
    /// input box and must be analysed before use.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, ActionError> {
        let values = loader::load_file(path)?;
        tracing::info!("Loaded {} values from {:?}", values.len(), path);

        self.output_text.clear();
        self.input_text = parser::values_to_input_text(&values);
        self.dataset = values;
        self.analysed = false;
        Ok(self.dataset.len())
    }

    /// Write the output pane to `path` exactly as displayed.
    pub fn save_results(&mut self, path: &Path) -> Result<(), ActionError> {
        self.require_analysed(ActionError::NothingToSave)?;
        loader::export_text(path, &self.output_text)?;
        tracing::info!("Results saved to {:?}", path);
        self.output_text.push_str(report::SAVED_NOTICE);
        Ok(())
    }

    pub fn find_z_score(&mut self) -> Result<ZScoreLookup, ActionError> {
        self.require_analysed(ActionError::NotAnalysed)?;
        let value = parser::parse_lookup_value(&self.lookup_text)?;
        let lookup = statistics::z_score_of(value, &self.dataset)?;
        self.output_text
            .push_str(&report::z_score_report(&lookup, self.settings.decimal_places));
        Ok(lookup)
    }

    pub fn sorted_values_text(&self) -> Result<String, ActionError> {
        self.require_analysed(ActionError::NotAnalysed)?;
        Ok(report::sorted_values_report(
            &self.dataset,
            self.settings.decimal_places,
        ))
    }

    pub fn z_score_table(&self) -> Result<Vec<ZScoreRow>, ActionError> {
        self.require_analysed(ActionError::NotAnalysed)?;
        let scores = statistics::z_scores(&self.dataset)?;
        Ok(self
            .dataset
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (&value, z_score))| ZScoreRow { index, value, z_score })
            .collect())
    }

    pub fn chart(&self, kind: ChartKind) -> Result<ChartData, ActionError> {
        self.require_analysed(ActionError::NothingToPlot)?;
        Ok(ChartData::build(kind, &self.dataset)?)
    }

    /// Store new settings and redraw the output with them. Earlier z-score
    /// lookups are dropped along with the old output.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ActionError> {
        self.settings = settings.clamped();
        self.output_text.clear();
        tracing::info!("Applied settings: {:?}", self.settings);
        if self.analysed {
            self.analyse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::theme::Theme;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("oxidestats_{}_{name}", std::process::id()))
    }

    fn analysed_state(input: &str) -> AppState {
        let mut state = AppState::default();
        state.input_text = input.to_string();
        state.analyse().unwrap();
        state
    }

    #[test]
    fn actions_are_gated_until_analysed() {
        let mut state = AppState::default();
        assert!(matches!(
            state.chart(ChartKind::Histogram),
            Err(ActionError::NothingToPlot)
        ));
        assert!(matches!(state.sorted_values_text(), Err(ActionError::NotAnalysed)));
        assert!(matches!(state.find_z_score(), Err(ActionError::NotAnalysed)));
        assert!(matches!(
            state.save_results(Path::new("unused.txt")),
            Err(ActionError::NothingToSave)
        ));
    }

    #[test]
    fn analyse_without_numbers_computes_nothing() {
        let mut state = analysed_state("1 2 3");
        state.input_text = "a b".to_string();
        assert!(matches!(state.analyse(), Err(ActionError::NoNumericData)));
        assert!(!state.is_analysed());
        assert!(state.dataset().is_empty());
        assert!(state.output_text.is_empty());
    }

    #[test]
    fn analyse_warns_about_skipped_tokens() {
        let state = analysed_state("1 2 oops 3");
        assert_eq!(state.dataset(), &[1.0, 2.0, 3.0]);
        assert!(state.output_text.starts_with(report::INVALID_TOKENS_NOTICE));
        assert!(state.output_text.contains("Mean: 2.00\n"));
    }

    #[test]
    fn analyse_constant_data_still_summarises() {
        let state = analysed_state("4 4 4");
        assert!(state.is_analysed());
        assert!(state.output_text.contains("Standard Deviation: 0.00\n"));
        assert!(matches!(
            state.chart(ChartKind::BellCurve),
            Err(ActionError::Stats(StatsError::ZeroVariance))
        ));
        assert!(matches!(
            state.z_score_table(),
            Err(ActionError::Stats(StatsError::ZeroVariance))
        ));
    }

    #[test]
    fn analyse_inexact_constant_data_has_no_distribution() {
        let state = analysed_state("0.1 0.1 0.1");
        assert!(state.output_text.contains("Mean: 0.10\n"));
        assert!(state.output_text.contains("Z-score distribution unavailable"));
        assert!(!state.output_text.contains("% of values"));
    }

    #[test]
    fn analyse_overflow_is_an_error() {
        let mut state = AppState::default();
        state.input_text = "1.0e308 1.0e308".to_string();
        assert!(matches!(
            state.analyse(),
            Err(ActionError::Stats(StatsError::Overflow))
        ));
        assert!(!state.is_analysed());
        assert!(state.output_text.is_empty());
    }

    #[test]
    fn z_score_lookup_appends_to_output() {
        let mut state = analysed_state("2 4 4 4 5 5 7 9");
        state.lookup_text = "7".to_string();
        let lookup = state.find_z_score().unwrap();
        assert!(lookup.in_dataset);
        assert!(state.output_text.ends_with("Z-score of 7.0: 1.00\n\n"));

        state.lookup_text = "6".to_string();
        let lookup = state.find_z_score().unwrap();
        assert!(!lookup.in_dataset);
        assert!(state.output_text.contains("The value 6.0 was not found"));
    }

    #[test]
    fn z_score_lookup_rejects_bad_input() {
        let mut state = analysed_state("1 2 3");
        let before = state.output_text.clone();

        state.lookup_text = "   ".to_string();
        assert!(matches!(state.find_z_score(), Err(ActionError::EmptyLookup)));
        state.lookup_text = "x1".to_string();
        assert!(matches!(state.find_z_score(), Err(ActionError::InvalidLookup)));
        assert_eq!(state.output_text, before);
    }

    #[test]
    fn save_writes_displayed_text_verbatim() {
        let mut state = analysed_state("1 2 3 4 5");
        state.lookup_text = "3".to_string();
        state.find_z_score().unwrap();
        let displayed = state.output_text.clone();

        let path = temp_path("state_save.txt");
        state.save_results(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(written, displayed);
        assert!(state.output_text.ends_with(report::SAVED_NOTICE));
    }

    #[test]
    fn load_replaces_dataset_and_resets_analysis() {
        let mut state = analysed_state("100 200");
        let path = temp_path("state_load.csv");
        std::fs::write(&path, "1,2.5,x,3\n").unwrap();
        let count = state.load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(count, 2);
        assert_eq!(state.dataset(), &[1.0, 3.0]);
        assert_eq!(state.input_text, "1 3 ");
        assert!(state.output_text.is_empty());
        assert!(!state.is_analysed());

        state.analyse().unwrap();
        assert!(state.output_text.contains("Values count: 2\n"));
    }

    #[test]
    fn failed_load_keeps_state() {
        let mut state = analysed_state("5 6");
        let err = state.load_file(Path::new("data.json")).unwrap_err();
        assert!(matches!(err, ActionError::Load(LoadError::UnsupportedFormat(_))));
        assert!(state.is_analysed());
        assert_eq!(state.dataset(), &[5.0, 6.0]);
    }

    #[test]
    fn clear_resets_everything_but_settings() {
        let mut state = analysed_state("1 2");
        state.settings.theme = Theme::Dark;
        state.clear();
        assert!(state.input_text.is_empty());
        assert!(state.output_text.is_empty());
        assert!(state.dataset().is_empty());
        assert!(!state.is_analysed());
        assert_eq!(state.settings.theme, Theme::Dark);
    }

    #[test]
    fn settings_redraw_output_with_new_precision() {
        let mut state = analysed_state("1 2");
        assert!(state.output_text.contains("Mean: 1.50\n"));

        let settings = Settings {
            decimal_places: 0,
            ..Settings::default()
        };
        state.apply_settings(settings).unwrap();
        assert!(state.output_text.contains("Mean: 2\n"));
        assert_eq!(state.dataset(), &[1.0, 2.0]);
    }

    #[test]
    fn settings_before_analysis_leave_output_empty() {
        let mut state = AppState::default();
        state.input_text = "1 2 3".to_string();
        state.apply_settings(Settings::default()).unwrap();
        assert!(state.output_text.is_empty());
        assert!(!state.is_analysed());
    }

    #[test]
    fn z_table_matches_dataset_order() {
        let state = analysed_state("9 2 4 4 4 5 5 7");
        let rows = state.z_score_table().unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].value, 9.0);
        assert!((rows[0].z_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn charts_build_after_analysis() {
        let state = analysed_state("3 1 2");
        for kind in ChartKind::ALL {
            assert!(state.chart(kind).is_ok());
        }
    }
}
