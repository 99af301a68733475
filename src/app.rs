use std::path::PathBuf;

use eframe::egui;

use crate::config::AnalysisConfig;
use crate::state::AppState;
use crate::ui::{fonts, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SocialVolumeApp {
    pub state: AppState,
}

impl SocialVolumeApp {
    /// Set up fonts and, when given, load the startup file right away.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AnalysisConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        fonts::install_cjk_fallback(&cc.egui_ctx);

        let mut state = AppState::new(config);
        if let Some(path) = initial_file {
            state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for SocialVolumeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: date range ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot above, ranked days below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_height = ui.available_height() * 0.6;
            plot::volume_plot(ui, &self.state, plot_height);
            ui.add_space(8.0);
            panels::top_days_list(ui, &self.state);
        });
    }
}
