use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::color::rank_palette;
use crate::data::filter::DateRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range and summary
// ---------------------------------------------------------------------------

/// Render the left panel: analysed window and load summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("篩選");
    ui.separator();

    let Some(range) = state.range else {
        ui.label("尚未載入資料");
        return;
    };

    let mut start = range.start;
    let mut end = range.end;
    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("起始");
        ui.add(DatePickerButton::new(&mut start).id_salt("range_start"));
        ui.end_row();
        ui.label("結束");
        ui.add(DatePickerButton::new(&mut end).id_salt("range_end"));
        ui.end_row();
    });
    if start != range.start || end != range.end {
        state.set_range(DateRange::new(start, end));
    }
    if ui.small_button("全部日期").clicked() {
        state.reset_range();
    }

    ui.separator();

    if let Some(analysis) = &state.analysis {
        ui.label(format!("資料筆數: {}", state.record_count));
        ui.label(format!("區間天數: {}", analysis.series.len()));
        ui.label(format!("區間聲量: {}", analysis.series.total_volume()));
        ui.label(format!(
            "峰值: {}  (間隔 ≥ {} 天)",
            analysis.peaks.len(),
            state.config.peak_distance
        ));
    }
}

// ---------------------------------------------------------------------------
// Highest-volume list (below the plot)
// ---------------------------------------------------------------------------

/// Render the ranked list of highest-volume days; each entry expands to its
/// post texts.
pub fn top_days_list(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };

    if state.config.top_n == 10 {
        ui.heading("前十大聲量日期");
    } else {
        ui.heading(format!("前 {} 大聲量日期", state.config.top_n));
    }
    ui.separator();

    let colors = rank_palette(analysis.top.len());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (rank, (day, color)) in analysis.top_days().zip(colors).enumerate() {
                let header = RichText::new(day.to_string()).strong().color(color);
                egui::CollapsingHeader::new(header)
                    .id_salt(("top_day", rank))
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        for text in &day.texts {
                            ui.label(text.as_str());
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("選擇檔案")
        .add_filter(
            "Supported files",
            &["csv", "xlsx", "xls", "xlsm", "xlsb", "ods", "json", "parquet", "pq"],
        )
        .add_filter("CSV", &["csv"])
        .add_filter("Spreadsheet", &["xlsx", "xls", "xlsm", "xlsb", "ods"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
