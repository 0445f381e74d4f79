mod state;
mod data;
mod processing;
mod ui;
mod app;

use app::OxideStatsApp;
use eframe::egui;
use eframe::egui_wgpu;
use state::settings::Settings;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings_path = Settings::default_path();
    tracing::info!("Using settings file {:?}", settings_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OxideStats")
            .with_inner_size([640.0, 860.0])
            .with_min_inner_size([480.0, 560.0])
            .with_drag_and_drop(true),
        // Configure wgpu for driver stability on Windows.
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                instance_descriptor: eframe::wgpu::InstanceDescriptor {
                    // Prefer DX12 on Windows for stability; include Vulkan and GL as fallbacks.
                    backends: eframe::wgpu::Backends::DX12
                        | eframe::wgpu::Backends::VULKAN
                        | eframe::wgpu::Backends::GL,
                    ..Default::default()
                },
                power_preference: eframe::wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        "OxideStats",
        options,
        Box::new(|cc| Ok(Box::new(OxideStatsApp::new(cc, settings_path)))),
    )
}
