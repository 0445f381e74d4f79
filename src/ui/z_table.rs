use crate::processing::report::format_number;
use crate::state::app_state::ZScoreRow;

/// Direction for table column sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

const HEADERS: [&str; 3] = ["Index", "Value", "Z-score"];

/// State for the z-score table window.
pub struct ZTableState {
    pub rows: Vec<ZScoreRow>,
    pub sort: Option<(usize, SortDirection)>,
    pub decimal_places: usize,
}

impl ZTableState {
    pub fn new(rows: Vec<ZScoreRow>, decimal_places: usize) -> Self {
        Self {
            rows,
            sort: None,
            decimal_places,
        }
    }

    fn cycle_sort(&mut self, col: usize) {
        self.sort = match self.sort {
            Some((c, SortDirection::Ascending)) if c == col => Some((col, SortDirection::Descending)),
            Some((c, SortDirection::Descending)) if c == col => None,
            _ => Some((col, SortDirection::Ascending)),
        };
    }

    /// Row indices in display order.
    pub fn display_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        if let Some((col, dir)) = self.sort {
            indices.sort_by(|&a, &b| {
                let cmp = cell_value(&self.rows[a], col).total_cmp(&cell_value(&self.rows[b], col));
                match dir {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }
        indices
    }
}

fn cell_value(row: &ZScoreRow, col: usize) -> f64 {
    match col {
        0 => row.index as f64,
        1 => row.value,
        _ => row.z_score,
    }
}

/// Show the table window. Returns `false` once the user closes it.
pub fn show_z_table(ctx: &egui::Context, state: &mut ZTableState) -> bool {
    use egui_extras::{Column, TableBuilder};

    let mut open = true;
    egui::Window::new("Z-Scores")
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            let order = state.display_order();
            let current_sort = state.sort;
            let dp = state.decimal_places;
            let clicked_col: std::cell::Cell<Option<usize>> = std::cell::Cell::new(None);

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(90.0), HEADERS.len())
                .min_scrolled_height(300.0)
                .header(20.0, |mut header| {
                    for (col, name) in HEADERS.iter().enumerate() {
                        header.col(|ui| {
                            let arrow = match current_sort {
                                Some((c, SortDirection::Ascending)) if c == col => " ^",
                                Some((c, SortDirection::Descending)) if c == col => " v",
                                _ => "",
                            };
                            if ui.button(format!("{name}{arrow}")).clicked() {
                                clicked_col.set(Some(col));
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, order.len(), |mut row| {
                        let r = &state.rows[order[row.index()]];
                        row.col(|ui| {
                            ui.label(r.index.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format_number(r.value, dp));
                        });
                        row.col(|ui| {
                            ui.label(format_number(r.z_score, dp));
                        });
                    });
                });

            if let Some(col) = clicked_col.get() {
                state.cycle_sort(col);
            }
        });
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ZTableState {
        let rows = [(0, 5.0, 0.5), (1, -2.0, -1.2), (2, 9.0, 1.4)]
            .into_iter()
            .map(|(index, value, z_score)| ZScoreRow { index, value, z_score })
            .collect();
        ZTableState::new(rows, 2)
    }

    #[test]
    fn unsorted_keeps_input_order() {
        assert_eq!(table().display_order(), vec![0, 1, 2]);
    }

    #[test]
    fn sort_cycles_through_directions() {
        let mut t = table();
        t.cycle_sort(2);
        assert_eq!(t.display_order(), vec![1, 0, 2]);
        t.cycle_sort(2);
        assert_eq!(t.display_order(), vec![2, 0, 1]);
        t.cycle_sort(2);
        assert_eq!(t.sort, None);
        t.cycle_sort(1);
        assert_eq!(t.sort, Some((1, SortDirection::Ascending)));
    }
}
