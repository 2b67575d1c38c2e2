use eframe::egui::Ui;
use egui_plot::{Plot, Points};

use crate::color::{gradient_color, normalize};
use crate::data::aggregate::GeoBucket;

// ---------------------------------------------------------------------------
// Geographic bubble map (lon/lat scatter)
// ---------------------------------------------------------------------------

const MIN_RADIUS: f32 = 4.0;
const MAX_RADIUS: f32 = 18.0;

/// Render the geographic segmentation as a bubble scatter over longitude and
/// latitude: bubble size tracks summed flight volume, colour tracks mean
/// flight distance. Hovering a bubble shows the bucket's stats.
pub fn bubble_map(ui: &mut Ui, buckets: &[GeoBucket]) {
    ui.strong("Geographic Segmentation by Avg. Flight Distance and Volume");

    let dist_min = buckets
        .iter()
        .map(|b| b.avg_flight_dist_km)
        .fold(f64::INFINITY, f64::min);
    let dist_max = buckets
        .iter()
        .map(|b| b.avg_flight_dist_km)
        .fold(f64::NEG_INFINITY, f64::max);
    let flights_max = buckets
        .iter()
        .map(|b| b.total_flights)
        .max()
        .unwrap_or(1)
        .max(1);

    Plot::new("geo_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for bucket in buckets {
                let t = normalize(bucket.avg_flight_dist_km, dist_min, dist_max);
                let color = gradient_color(t);

                // Area ∝ volume, so radius goes with the square root.
                let scale = (bucket.total_flights as f64 / flights_max as f64).sqrt() as f32;
                let radius = MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * scale;

                let hover = format!(
                    "{}\ncustomers: {}\navg distance: {:.0} KM\nflights: {}",
                    bucket.province,
                    bucket.customer_count,
                    bucket.avg_flight_dist_km,
                    bucket.total_flights
                );

                let points = Points::new(vec![[bucket.longitude, bucket.latitude]])
                    .radius(radius)
                    .color(color)
                    .name(hover);

                plot_ui.points(points);
            }
        });
}
