use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use social_volume::app::SocialVolumeApp;
use social_volume::config::AnalysisConfig;

#[derive(Parser)]
#[command(name = "social-volume")]
#[command(about = "Daily social-media post volume with spike detection")]
struct Cli {
    /// CSV / spreadsheet / JSON / Parquet file to load at startup
    file: Option<PathBuf>,

    /// Minimum number of days between two reported peaks
    #[arg(long, default_value_t = AnalysisConfig::default().peak_distance)]
    peak_distance: usize,

    /// Number of highest-volume days to list
    #[arg(long, default_value_t = AnalysisConfig::default().top_n)]
    top: usize,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let config = AnalysisConfig {
        peak_distance: cli.peak_distance,
        top_n: cli.top,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "社群聲量分析",
        options,
        Box::new(move |cc| Ok(Box::new(SocialVolumeApp::new(cc, config, cli.file)))),
    )
}
