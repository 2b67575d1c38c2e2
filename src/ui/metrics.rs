use eframe::egui::{RichText, Ui};

use crate::data::aggregate::Kpis;

// ---------------------------------------------------------------------------
// KPI metric row (four scalar displays)
// ---------------------------------------------------------------------------

/// Render the four headline metrics in a row. Rounding happens here only;
/// the reducers hand over raw means.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Total Customers",
            &group_thousands(kpis.customer_count as f64),
        );
        metric(
            &mut cols[1],
            "Avg Customer Lifetime Value",
            &group_thousands(kpis.avg_clv),
        );
        metric(
            &mut cols[2],
            "Avg. Flight Distance",
            &format!("{} KM", group_thousands(kpis.avg_flight_dist_km)),
        );
        let prr = match kpis.avg_prr_pct {
            Some(pct) => format!("{pct:.1}%"),
            None => "N/A".to_string(),
        };
        metric(&mut cols[3], "Avg. PRR", &prr);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).heading().strong());
    });
}

/// Round to the nearest integer and insert thousands separators
/// (`12345.6` → `"12,346"`).
pub fn group_thousands(v: f64) -> String {
    let rounded = v.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(12345.6), "12,346");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-4200.0), "-4,200");
    }
}
