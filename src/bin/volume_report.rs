use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use social_volume::config::AnalysisConfig;
use social_volume::data::aggregate::aggregate_daily;
use social_volume::data::analysis::VolumeAnalysis;
use social_volume::data::loader::load_file;
use social_volume::data::model::DailyVolume;

/// Print the highest-volume days and detected peaks of a posts file.
#[derive(Parser)]
#[command(name = "volume_report")]
struct Cli {
    /// CSV / spreadsheet / JSON / Parquet file with `date` and `text` columns
    file: PathBuf,

    /// Minimum number of days between two reported peaks
    #[arg(long, default_value_t = AnalysisConfig::default().peak_distance)]
    peak_distance: usize,

    /// Number of highest-volume days to list
    #[arg(long, default_value_t = AnalysisConfig::default().top_n)]
    top: usize,

    /// Emit JSON instead of text lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DayEntry {
    date: String,
    volume: usize,
}

impl From<&DailyVolume> for DayEntry {
    fn from(day: &DailyVolume) -> Self {
        Self {
            date: day.date_label(),
            volume: day.volume,
        }
    }
}

#[derive(Serialize)]
struct Report {
    records: usize,
    days: usize,
    config: AnalysisConfig,
    top: Vec<DayEntry>,
    peaks: Vec<DayEntry>,
}

fn run(cli: &Cli) -> Result<()> {
    let config = AnalysisConfig {
        peak_distance: cli.peak_distance,
        top_n: cli.top,
    };

    let records = load_file(&cli.file)?;
    log::info!("Loaded {} records from {}", records.len(), cli.file.display());
    let analysis = VolumeAnalysis::compute(aggregate_daily(&records), &config);

    if cli.json {
        let report = Report {
            records: records.len(),
            days: analysis.series.len(),
            config,
            top: analysis.top_days().map(DayEntry::from).collect(),
            peaks: analysis.peak_days().map(DayEntry::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for day in analysis.top_days() {
        println!("{day}");
    }
    for day in analysis.peak_days() {
        println!("峰值: {} | 聲量: {}", day.date_label(), day.volume);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("錯誤: {e:#}");
            ExitCode::FAILURE
        }
    }
}
