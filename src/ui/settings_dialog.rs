use crate::state::settings::{Settings, DECIMAL_PLACES_RANGE, FONT_SIZE_RANGE};
use crate::state::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Format,
    Appearance,
}

/// Persistent state for the settings dialog. Edits go to `draft` and only
/// reach the application on Apply or OK.
pub struct SettingsDialogState {
    pub draft: Settings,
    pub tab: SettingsTab,
}

impl SettingsDialogState {
    pub fn new(current: &Settings) -> Self {
        Self {
            draft: current.clone(),
            tab: SettingsTab::Format,
        }
    }
}

/// Result of the settings dialog interaction each frame.
pub enum SettingsDialogResult {
    /// Apply and keep the dialog open.
    Apply(Settings),
    /// Apply and close.
    Ok(Settings),
    Cancel,
}

/// Show the settings dialog window.
///
/// Returns `Some(SettingsDialogResult)` when a button is pressed or the
/// window is closed, `None` while it stays open untouched.
pub fn show_settings_dialog(
    ctx: &egui::Context,
    state: &mut SettingsDialogState,
) -> Option<SettingsDialogResult> {
    let mut open = true;
    let mut result = None;

    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut state.tab, SettingsTab::Format, "Format Settings");
                ui.selectable_value(&mut state.tab, SettingsTab::Appearance, "Appearance Settings");
            });
            ui.separator();

            match state.tab {
                SettingsTab::Format => {
                    ui.label("Font Size:");
                    ui.add(
                        egui::DragValue::new(&mut state.draft.font_size)
                            .range(FONT_SIZE_RANGE)
                            .speed(0.25)
                            .fixed_decimals(0),
                    );
                    ui.add_space(12.0);
                    ui.label("Number of Decimal Places:");
                    ui.add(
                        egui::DragValue::new(&mut state.draft.decimal_places)
                            .range(DECIMAL_PLACES_RANGE)
                            .speed(0.1),
                    );
                }
                SettingsTab::Appearance => {
                    ui.label("Application Theme:");
                    egui::ComboBox::from_id_salt("theme_combo")
                        .selected_text(state.draft.theme.label())
                        .show_ui(ui, |ui| {
                            for theme in Theme::ALL {
                                ui.selectable_value(&mut state.draft.theme, theme, theme.label());
                            }
                        });
                }
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let size = egui::vec2(70.0, 26.0);
                if ui.add(egui::Button::new("OK").min_size(size)).clicked() {
                    result = Some(SettingsDialogResult::Ok(state.draft.clone()));
                }
                if ui.add(egui::Button::new("Apply").min_size(size)).clicked() {
                    result = Some(SettingsDialogResult::Apply(state.draft.clone()));
                }
                if ui.add(egui::Button::new("Cancel").min_size(size)).clicked() {
                    result = Some(SettingsDialogResult::Cancel);
                }
            });
        });

    if !open && result.is_none() {
        result = Some(SettingsDialogResult::Cancel);
    }
    result
}
