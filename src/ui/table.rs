use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::data::metrics::{CumulativeSeries, SummaryTotals};
use crate::data::model::GameRecord;

const ROW_HEIGHT: f32 = 18.0;

/// The two-row summary table.
pub fn summary_table(ui: &mut Ui, summary: &SummaryTotals) {
    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Result");
                });
                header.col(|ui| {
                    ui.strong("Total");
                });
                header.col(|ui| {
                    ui.strong("Share");
                });
            })
            .body(|mut body| {
                for (kind, count) in summary.entries() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new(kind.to_string()).color(outcome_color(kind)));
                        });
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}%", summary.share(kind) * 100.0));
                        });
                    });
                }
            });
    });
}

/// The long-form cumulative table: one row per (game, outcome).
pub fn cumulative_table(ui: &mut Ui, series: &CumulativeSeries) {
    let points = series.points();
    ui.push_id("cumulative_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Game #");
                });
                header.col(|ui| {
                    ui.strong("Result type");
                });
                header.col(|ui| {
                    ui.strong("Running total");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, points.len(), |mut row| {
                    let point = points[row.index()];
                    row.col(|ui| {
                        ui.label(point.game_index.to_string());
                    });
                    row.col(|ui| {
                        ui.label(point.kind.cumulative_label());
                    });
                    row.col(|ui| {
                        ui.label(point.running_total.to_string());
                    });
                });
            });
    });
}

/// The filtered games in date order, numbered like the chart's x axis.
pub fn games_table(ui: &mut Ui, games: &[GameRecord]) {
    ui.push_id("games_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(50.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in ["Game #", "Date", "Type", "Result"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, games.len(), |mut row| {
                    let index = row.index();
                    let game = &games[index];
                    row.col(|ui| {
                        ui.label((index + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(game.date.to_string());
                    });
                    row.col(|ui| {
                        ui.label(if game.is_playoffs { "Playoffs" } else { "Regular" });
                    });
                    row.col(|ui| {
                        ui.label(game.result.to_string());
                    });
                });
            });
    });
}
