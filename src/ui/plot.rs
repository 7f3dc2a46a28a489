use std::f32::consts::TAU;

use eframe::egui::{self, Align2, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::{outcome_color, slice_fill};
use crate::data::metrics::{CumulativeSeries, OutcomeKind, SummaryTotals};

// ---------------------------------------------------------------------------
// Cumulative line chart
// ---------------------------------------------------------------------------

/// Cumulative wins vs. losses by game number.
pub fn cumulative_plot(ui: &mut Ui, series: &CumulativeSeries, height: f32) {
    ui.strong("Cumulative wins vs. losses");

    Plot::new("cumulative_plot")
        .legend(Legend::default())
        .x_axis_label("Game #")
        .y_axis_label("Total")
        .height(height)
        .include_x(1.0)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for kind in OutcomeKind::ALL {
                let points: PlotPoints = series
                    .line(kind)
                    .map(|(game, total)| [game as f64, total as f64])
                    .collect();

                let line = Line::new(points)
                    .name(kind.cumulative_label())
                    .color(outcome_color(kind))
                    .width(2.0);

                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One wedge of the pie: start angle and sweep, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub kind: OutcomeKind,
    pub start: f32,
    pub sweep: f32,
    pub share: f64,
}

/// Lay out the non-empty outcomes clockwise from 12 o'clock.
pub fn pie_slices(summary: &SummaryTotals) -> Vec<Slice> {
    let mut start = -TAU / 4.0;
    let mut slices = Vec::new();
    for (kind, count) in summary.entries() {
        if count == 0 {
            continue;
        }
        let share = summary.share(kind);
        let sweep = share as f32 * TAU;
        slices.push(Slice {
            kind,
            start,
            sweep,
            share,
        });
        start += sweep;
    }
    slices
}

/// Win/loss split as a pie with percentage labels.
pub fn outcome_pie(ui: &mut Ui, summary: &SummaryTotals, height: f32) {
    ui.strong(format!(
        "Result distribution (Total: {} games)",
        summary.total()
    ));

    let size = Vec2::new(ui.available_width(), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();

    let slices = pie_slices(summary);
    if slices.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No decided games",
            FontId::proportional(16.0),
            text_color,
        );
        return;
    }

    // Leave room on the right for the legend.
    let radius = (rect.height().min(rect.width() - 140.0) / 2.0 - 8.0).max(10.0);
    let center = Pos2::new(rect.left() + radius + 16.0, rect.center().y);

    for slice in &slices {
        paint_wedge(&painter, center, radius, slice);
    }

    for slice in &slices {
        let mid = slice.start + slice.sweep / 2.0;
        let label_pos = if slices.len() == 1 {
            center
        } else {
            center + Vec2::angled(mid) * radius * 0.6
        };
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{:.1}%", slice.share * 100.0),
            FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
    }

    // Legend
    let mut y = center.y - 12.0 * summary.entries().len() as f32;
    let x = center.x + radius + 24.0;
    for (kind, count) in summary.entries() {
        painter.rect_filled(
            egui::Rect::from_min_size(Pos2::new(x, y), Vec2::splat(12.0)),
            2.0,
            slice_fill(kind),
        );
        painter.text(
            Pos2::new(x + 18.0, y + 6.0),
            Align2::LEFT_CENTER,
            format!("{kind}: {count}"),
            FontId::proportional(14.0),
            text_color,
        );
        y += 24.0;
    }
}

/// Wedges wider than half a turn are not convex, so paint a fan of thin
/// triangles instead.
fn paint_wedge(painter: &egui::Painter, center: Pos2, radius: f32, slice: &Slice) {
    let steps = ((slice.sweep / TAU) * 128.0).ceil().max(1.0) as usize;
    let step = slice.sweep / steps as f32;
    let fill = slice_fill(slice.kind);
    for i in 0..steps {
        let a0 = slice.start + step * i as f32;
        let a1 = a0 + step;
        painter.add(Shape::convex_polygon(
            vec![
                center,
                center + Vec2::angled(a0) * radius,
                center + Vec2::angled(a1) * radius,
            ],
            fill,
            Stroke::NONE,
        ));
    }
    // Separator on the wedge's leading edge.
    painter.line_segment(
        [center, center + Vec2::angled(slice.start) * radius],
        Stroke::new(1.5, outcome_color(slice.kind)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_full_turn() {
        let slices = pie_slices(&SummaryTotals { wins: 2, losses: 1 });
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].kind, OutcomeKind::Wins);
        let total: f32 = slices.iter().map(|s| s.sweep).sum();
        assert!((total - TAU).abs() < 1e-4);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-6);
    }

    #[test]
    fn zero_count_outcome_has_no_slice() {
        let slices = pie_slices(&SummaryTotals { wins: 0, losses: 4 });
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].kind, OutcomeKind::Losses);
        assert_eq!(slices[0].share, 1.0);
        assert!(pie_slices(&SummaryTotals::default()).is_empty());
    }
}
