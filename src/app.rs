use std::path::{Path, PathBuf};

use eframe::egui;

use crate::data::loader::{self, SUPPORTED_EXTENSIONS};
use crate::processing::charts::ChartKind;
use crate::state::app_state::{ActionError, AppState, VERSION};
use crate::state::settings::Settings;
use crate::ui::chart_window::ChartWindow;
use crate::ui::settings_dialog::{self, SettingsDialogResult, SettingsDialogState};
use crate::ui::z_table::{self, ZTableState};

/// Everything a click in the menu or the main panel can request. Collected
/// while drawing and handled once the frame's UI is built.
enum UiAction {
    Analyse,
    Clear,
    LoadData,
    SaveResults,
    CopyResults,
    OpenSettings,
    Exit,
    ShowChart(ChartKind),
    ShowSorted,
    ShowZTable,
    FindZScore,
    About,
}

/// The main OxideStats application.
pub struct OxideStatsApp {
    pub state: AppState,
    settings_path: PathBuf,
    pub settings_dialog: Option<SettingsDialogState>,
    /// Text of the sorted-values window, when open.
    pub sorted_values: Option<String>,
    pub z_table: Option<ZTableState>,
    charts: Vec<ChartWindow>,
    next_chart_id: u64,
    /// A warning waiting to be acknowledged.
    pub warning: Option<String>,
    pub show_about: bool,
    /// Font size the current egui style was built with.
    styled_font_size: f32,
}

/// Text sizes derived from the configured font size (in points).
fn apply_style(ctx: &egui::Context, font_size: f32) {
    let px = font_size * 4.0 / 3.0;
    let mut style = (*ctx.style()).clone();

    style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(px));
    style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(px * 0.95));
    style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(px * 1.4));
    style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(px * 0.8));
    style.text_styles.insert(egui::TextStyle::Monospace, egui::FontId::monospace(px * 0.9));

    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);
}

impl OxideStatsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings_path: PathBuf) -> Self {
        let settings = Settings::load_or_default(&settings_path);

        apply_style(&cc.egui_ctx, settings.font_size);
        cc.egui_ctx.set_visuals(settings.theme.visuals());
        let styled_font_size = settings.font_size;

        Self {
            state: AppState::new(settings),
            settings_path,
            settings_dialog: None,
            sorted_values: None,
            z_table: None,
            charts: Vec::new(),
            next_chart_id: 1,
            warning: None,
            show_about: false,
            styled_font_size,
        }
    }

    /// Show an action's failure to the user. Returns the success value, if any.
    fn report<T>(&mut self, result: Result<T, ActionError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{e}");
                self.warning = Some(e.to_string());
                None
            }
        }
    }

    /// Windows showing the old dataset no longer apply once it is replaced.
    fn close_dataset_views(&mut self) {
        self.charts.clear();
        self.sorted_values = None;
        self.z_table = None;
    }

    fn analyse(&mut self) {
        self.close_dataset_views();
        let result = self.state.analyse();
        self.report(result);
    }

    fn clear(&mut self) {
        self.close_dataset_views();
        self.state.clear();
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Data Files", &SUPPORTED_EXTENSIONS)
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    fn load_file(&mut self, path: &Path) {
        let result = self.state.load_file(path);
        if self.report(result).is_some() {
            self.close_dataset_views();
        }
    }

    fn save_results(&mut self) {
        if !self.state.is_analysed() {
            self.report::<()>(Err(ActionError::NothingToSave));
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("results.txt")
            .add_filter("Text Files", &["txt"])
            .save_file()
        {
            let result = self.state.save_results(&path);
            self.report(result);
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        if let Err(e) = settings.save(&self.settings_path) {
            tracing::error!("Failed to save settings: {e}");
        }
        self.close_dataset_views();
        let result = self.state.apply_settings(settings);
        self.report(result);
    }

    fn open_chart(&mut self, kind: ChartKind) {
        let result = self.state.chart(kind);
        if let Some(data) = self.report(result) {
            let id = self.next_chart_id;
            self.next_chart_id += 1;
            self.charts.push(ChartWindow::new(
                id,
                kind,
                data,
                self.state.settings.decimal_places,
            ));
        }
    }

    fn handle(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::Analyse => self.analyse(),
            UiAction::Clear => self.clear(),
            UiAction::LoadData => self.open_file_dialog(),
            UiAction::SaveResults => self.save_results(),
            UiAction::CopyResults => {
                ctx.copy_text(self.state.output_text.clone());
            }
            UiAction::OpenSettings => {
                self.settings_dialog = Some(SettingsDialogState::new(&self.state.settings));
            }
            UiAction::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            UiAction::ShowChart(kind) => self.open_chart(kind),
            UiAction::ShowSorted => {
                let result = self.state.sorted_values_text();
                self.sorted_values = self.report(result);
            }
            UiAction::ShowZTable => {
                let result = self.state.z_score_table();
                if let Some(rows) = self.report(result) {
                    self.z_table =
                        Some(ZTableState::new(rows, self.state.settings.decimal_places));
                }
            }
            UiAction::FindZScore => {
                let result = self.state.find_z_score();
                self.report(result);
            }
            UiAction::About => self.show_about = true,
        }
    }

    fn menu_bar(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Load Data").clicked() {
                    actions.push(UiAction::LoadData);
                    ui.close_menu();
                }
                if ui.button("Save Results").clicked() {
                    actions.push(UiAction::SaveResults);
                    ui.close_menu();
                }
                if ui.button("Copy Results").clicked() {
                    actions.push(UiAction::CopyResults);
                    ui.close_menu();
                }
                if ui.button("Settings").clicked() {
                    actions.push(UiAction::OpenSettings);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    actions.push(UiAction::Exit);
                    ui.close_menu();
                }
            });

            ui.menu_button("Plot", |ui| {
                for kind in ChartKind::ALL {
                    if ui.button(kind.menu_label()).clicked() {
                        actions.push(UiAction::ShowChart(kind));
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About OxideStats").clicked() {
                    actions.push(UiAction::About);
                    ui.close_menu();
                }
            });
        });
    }

    fn main_panel(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let wide = egui::vec2(ui.available_width(), 30.0);
        let half = egui::vec2((ui.available_width() - 8.0) / 2.0, 30.0);

        ui.label("Please enter a series of numbers separated by spaces or load a .CSV file:");
        egui::ScrollArea::vertical()
            .id_salt("input_scroll")
            .max_height(120.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.state.input_text)
                        .desired_rows(5)
                        .desired_width(f32::INFINITY),
                );
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.add(egui::Button::new("Analyse").min_size(half)).clicked() {
                actions.push(UiAction::Analyse);
            }
            if ui.add(egui::Button::new("Clear").min_size(half)).clicked() {
                actions.push(UiAction::Clear);
            }
        });
        ui.horizontal(|ui| {
            if ui.add(egui::Button::new("Show Sorted Values").min_size(half)).clicked() {
                actions.push(UiAction::ShowSorted);
            }
            if ui.add(egui::Button::new("Show Z-Score Table").min_size(half)).clicked() {
                actions.push(UiAction::ShowZTable);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Enter value from list to find Z-score:");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.state.lookup_text).desired_width(120.0),
            );
            let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || submitted {
                actions.push(UiAction::FindZScore);
            }
        });

        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .id_salt("output_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Read-only: a &str buffer cannot be edited.
                ui.add_sized(
                    egui::vec2(wide.x, ui.available_height()),
                    egui::TextEdit::multiline(&mut self.state.output_text.as_str())
                        .desired_width(f32::INFINITY),
                );
            });
    }
}

impl eframe::App for OxideStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme visuals every frame while preserving our custom rounding.
        let mut vis = self.state.settings.theme.visuals();
        vis.window_corner_radius = egui::CornerRadius::same(8);
        vis.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
        vis.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
        vis.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
        vis.widgets.active.corner_radius = egui::CornerRadius::same(6);
        ctx.set_visuals(vis);

        if self.styled_font_size != self.state.settings.font_size {
            apply_style(ctx, self.state.settings.font_size);
            self.styled_font_size = self.state.settings.font_size;
        }

        // ------------------------------------------------------------------
        // 1. Handle dropped files (collect paths first to avoid borrow issues)
        // ------------------------------------------------------------------
        let mut dropped_paths: Vec<PathBuf> = Vec::new();
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    if SUPPORTED_EXTENSIONS.contains(&loader::extension_of(path).as_str()) {
                        dropped_paths.push(path.clone());
                    }
                }
            }
        });
        for path in dropped_paths {
            self.load_file(&path);
        }

        // ------------------------------------------------------------------
        // 2. Panels
        // ------------------------------------------------------------------
        let mut actions: Vec<UiAction> = Vec::new();

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.menu_bar(ui, &mut actions);
        });

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let count = self.state.dataset().len();
                    let status = if self.state.is_analysed() {
                        format!("{count} values analysed")
                    } else if count > 0 {
                        format!("{count} values loaded, not analysed")
                    } else {
                        "No data".to_string()
                    };
                    let muted = self.state.settings.theme.palette().deselected_fg;
                    ui.label(egui::RichText::new(status).color(muted));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel(ui, &mut actions);
        });

        // ------------------------------------------------------------------
        // 3. Process collected actions
        // ------------------------------------------------------------------
        for action in actions {
            self.handle(ctx, action);
        }

        // ------------------------------------------------------------------
        // 4. Settings dialog
        // ------------------------------------------------------------------
        let mut dialog_result = None;
        if let Some(ref mut sd) = self.settings_dialog {
            dialog_result = settings_dialog::show_settings_dialog(ctx, sd);
        }
        match dialog_result {
            Some(SettingsDialogResult::Apply(settings)) => self.apply_settings(settings),
            Some(SettingsDialogResult::Ok(settings)) => {
                self.apply_settings(settings);
                self.settings_dialog = None;
            }
            Some(SettingsDialogResult::Cancel) => self.settings_dialog = None,
            None => {}
        }

        // ------------------------------------------------------------------
        // 5. Data windows
        // ------------------------------------------------------------------
        if let Some(text) = &self.sorted_values {
            let mut open = true;
            egui::Window::new("Sorted Values")
                .open(&mut open)
                .resizable(true)
                .default_size([420.0, 320.0])
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut text.as_str())
                                .desired_width(f32::INFINITY),
                        );
                    });
                });
            if !open {
                self.sorted_values = None;
            }
        }

        if let Some(ref mut table) = self.z_table {
            if !z_table::show_z_table(ctx, table) {
                self.z_table = None;
            }
        }

        for chart in &mut self.charts {
            chart.show(ctx);
        }
        self.charts.retain(|c| c.open);

        // ------------------------------------------------------------------
        // 6. Warning and About windows
        // ------------------------------------------------------------------
        let mut dismiss = false;
        if let Some(msg) = &self.warning {
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(msg.as_str());
                    ui.add_space(8.0);
                    if ui.add(egui::Button::new("OK").min_size(egui::vec2(80.0, 28.0))).clicked() {
                        dismiss = true;
                    }
                });
        }
        if dismiss {
            self.warning = None;
        }

        if self.show_about {
            egui::Window::new("About OxideStats")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui.heading("OxideStats");
                    ui.label(format!("Version: {VERSION}"));
                    ui.add_space(4.0);
                    ui.label("Descriptive statistics for small numeric datasets.");
                    ui.add_space(10.0);
                    ui.label("Features:");
                    ui.label("  \u{2022} Mean, median, mode, range and standard deviation");
                    ui.label("  \u{2022} Quartiles and z-scores");
                    ui.label("  \u{2022} CSV and Excel import");
                    ui.label("  \u{2022} Histogram, line, scatter, box plot and bell curve");
                });
        }
    }
}
