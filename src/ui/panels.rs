use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::GameType;
use crate::state::{AppState, SelectionView};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard filters");
    ui.separator();

    let Some(selection) = state.selection.clone() else {
        if state.dataset.is_some() {
            ui.label("The loaded file contains no games.");
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    };

    // ---- Season (most recent first) ----
    ui.strong("Season");
    let seasons = state.season_options();
    egui::ComboBox::from_id_salt("season")
        .selected_text(selection.season.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for season in seasons {
                if ui
                    .selectable_label(selection.season == season, season.to_string())
                    .clicked()
                {
                    state.select_season(season);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Team (teams of the selected season) ----
    ui.strong("Team");
    let teams = state.team_options();
    let current_team = state
        .selection
        .as_ref()
        .map(|s| s.team.clone())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("team")
        .selected_text(&current_team)
        .show_ui(ui, |ui: &mut Ui| {
            for team in &teams {
                if ui.selectable_label(current_team == *team, team).clicked() {
                    state.select_team(team);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Game type pills ----
    ui.strong("Game type");
    let mut game_type = selection.game_type;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for option in GameType::ALL {
            ui.selectable_value(&mut game_type, option, option.to_string());
        }
    });
    state.select_game_type(game_type);

    ui.separator();
    ui.label(format!("{} games selected", state.games.len()));
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} games loaded, {} seasons",
                state.source_name(),
                ds.len(),
                ds.seasons().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Title and caption above the charts.
pub fn selection_header(ui: &mut Ui, state: &AppState) {
    let Some(sel) = &state.selection else {
        return;
    };
    ui.heading(RichText::new(format!("{} – Season {}", sel.team, sel.season)).size(24.0));
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Showing games:");
        ui.strong(sel.game_type.to_string());
    });
    if state.view == SelectionView::NoGames {
        ui.add_space(8.0);
        ui.label(
            RichText::new("⚠ No data available for the current selection.")
                .color(Color32::from_rgb(230, 160, 40)),
        );
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open game results")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
