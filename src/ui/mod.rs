pub mod chart_window;
pub mod settings_dialog;
pub mod z_table;
