use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::metrics::OutcomeKind;

// ---------------------------------------------------------------------------
// Outcome colours
// ---------------------------------------------------------------------------

/// Convert an HSL triple (hue in degrees) to an egui colour.
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

fn hue(kind: OutcomeKind) -> f32 {
    match kind {
        OutcomeKind::Wins => 120.0,
        OutcomeKind::Losses => 0.0,
    }
}

/// Line colour: green for wins, red for losses.
pub fn outcome_color(kind: OutcomeKind) -> Color32 {
    hsl_color(hue(kind), 0.75, 0.40)
}

/// Lighter fill of the same hue, used for pie slices.
pub fn slice_fill(kind: OutcomeKind) -> Color32 {
    hsl_color(hue(kind), 0.60, 0.55)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wins_green_losses_red() {
        let w = outcome_color(OutcomeKind::Wins);
        assert!(w.g() > w.r() && w.g() > w.b());
        let l = outcome_color(OutcomeKind::Losses);
        assert!(l.r() > l.g() && l.r() > l.b());
    }

    #[test]
    fn fill_is_lighter() {
        for kind in OutcomeKind::ALL {
            let line = outcome_color(kind);
            let fill = slice_fill(kind);
            let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
            assert!(sum(fill) > sum(line));
        }
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_color(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_color(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
    }
}
