use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::color::VOLUME_COLOR;
use crate::data::model::{DailyVolume, DATE_FORMAT};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Volume plot (central panel)
// ---------------------------------------------------------------------------

/// Render the daily volume line with peak markers.
pub fn volume_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("選擇檔案以開始分析  (File → Open…)");
            });
            return;
        }
    };

    ui.heading("聲量走勢圖");

    let line_points: PlotPoints = analysis.series.days().iter().map(plot_point).collect();
    let peak_points: PlotPoints = analysis.peak_days().map(plot_point).collect();

    Plot::new("volume_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("日期")
        .y_axis_label("聲量")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            // only whole days get a label
            if mark.value.fract() != 0.0 {
                return String::new();
            }
            format_day(mark.value).unwrap_or_default()
        })
        .label_formatter(|name: &str, value: &PlotPoint| {
            let day = format_day(value.x.round()).unwrap_or_default();
            if name.is_empty() {
                format!("{day}\n聲量: {:.0}", value.y)
            } else {
                format!("{name}\n{day}\n聲量: {:.0}", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(line_points)
                    .name("聲量")
                    .color(VOLUME_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(peak_points)
                    .name("峰值")
                    .color(VOLUME_COLOR)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0),
            );
        });
}

/// Days are plotted as their day number in the common era.
fn plot_point(day: &DailyVolume) -> [f64; 2] {
    [f64::from(day.date.num_days_from_ce()), day.volume as f64]
}

fn format_day(x: f64) -> Option<String> {
    if !x.is_finite() || x < f64::from(i32::MIN) || x > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x as i32).map(|d| d.format(DATE_FORMAT).to_string())
}
