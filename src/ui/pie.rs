use std::f32::consts::TAU;

use eframe::egui::{
    Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2,
};

use crate::color::CategoryColors;
use crate::data::aggregate::LoyaltyCount;

// ---------------------------------------------------------------------------
// Loyalty status pie chart (painter geometry)
// ---------------------------------------------------------------------------

/// Arc step in radians; small enough that slices look round.
const ARC_STEP: f32 = 0.05;
/// Slices thinner than this skip their inner label (it would not fit).
const LABEL_MIN_FRACTION: f64 = 0.04;

/// Render the loyalty distribution as a pie chart: slice size is the record
/// count, labels show status name and percentage.
pub fn pie_chart(ui: &mut Ui, counts: &[LoyaltyCount], colors: &CategoryColors) {
    ui.strong("Customer Distribution by Loyalty Status");

    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return;
    }

    let side = ui.available_width().min(ui.available_height()).max(120.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.42;

    // Start at 12 o'clock and sweep clockwise.
    let mut angle = -TAU / 4.0;

    for slice in counts {
        let fraction = slice.count as f64 / total as f64;
        let sweep = (fraction as f32) * TAU;
        let color = colors.color_for(&slice.status);

        painter.add(slice_shape(center, radius, angle, sweep, color));

        if fraction >= LABEL_MIN_FRACTION {
            let mid = angle + sweep / 2.0;
            let label_pos = center + Vec2::angled(mid) * radius * 0.62;
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", slice.status, fraction * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }

        angle += sweep;
    }
}

/// Build one filled pie slice as a triangle fan from the centre.
fn slice_shape(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;

    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let a = start + sweep * (i as f32 / steps as f32);
        points.push(center + Vec2::angled(a) * radius);
    }

    Shape::convex_polygon(points, color, Stroke::NONE)
}
