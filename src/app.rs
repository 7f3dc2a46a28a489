use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::metrics::OutcomeKind;
use crate::data::source::CachedFileSource;
use crate::state::{AppState, SelectionView};
use crate::ui::{panels, plot, table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Charts,
    Data,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SeasonDashboardApp {
    pub state: AppState,
    tab: Tab,
}

impl SeasonDashboardApp {
    /// Build the app and load the configured dataset.
    pub fn new(config: &DashboardConfig) -> Self {
        let source = CachedFileSource::new(config.data_path.clone());
        let mut state = AppState::new(Box::new(source), config.default_game_type);
        state.load();
        Self {
            state,
            tab: Tab::default(),
        }
    }
}

impl eframe::App for SeasonDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.selection.is_none() {
                unavailable(ui, &self.state);
                return;
            }

            panels::selection_header(ui, &self.state);

            let SelectionView::Ready(metrics) = &self.state.view else {
                return;
            };

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Charts, "Charts");
                ui.selectable_value(&mut self.tab, Tab::Data, "Data");
            });
            ui.separator();

            match self.tab {
                Tab::Charts => {
                    let height = (ui.available_height() / 2.0 - 40.0).max(160.0);
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.heading("Cumulative season performance");
                        plot::cumulative_plot(ui, &metrics.cumulative, height);
                        ui.add_space(12.0);
                        ui.heading("Win and loss percentage");
                        plot::outcome_pie(ui, &metrics.summary, height);
                    });
                }
                Tab::Data => {
                    let series = &metrics.cumulative;
                    ui.label(format!(
                        "{} games, final record {}–{}",
                        series.game_count(),
                        series.final_total(OutcomeKind::Wins),
                        series.final_total(OutcomeKind::Losses)
                    ));
                    table::summary_table(ui, &metrics.summary);
                    ui.separator();
                    ui.columns(2, |cols| {
                        table::games_table(&mut cols[0], self.state.games.games());
                        table::cumulative_table(&mut cols[1], series);
                    });
                }
            }
        });
    }
}

/// Blocking message when no dataset could be loaded, or it has no games.
fn unavailable(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
        Some(msg) => {
            ui.label(
                RichText::new(format!("{msg}\n\nOpen another file with File → Open…"))
                    .color(Color32::RED)
                    .size(16.0),
            );
        }
        None => {
            ui.heading("Open a game results file  (File → Open…)");
        }
    });
}
