//! Plain-text rendering of a chart for terminals.

use super::model::ChartModel;
use crate::temperature::format_celsius;

const BAR_WIDTH: usize = 30;

impl ChartModel {
    /// Render final capacities as a bar per temperature.
    ///
    /// Rows inside the highlighted band are marked with `◆`.
    pub fn render_ascii_chart(&self) -> String {
        let mut output = format!("\n{}\n", self.title);
        if let Some(marker) = self.markers.first() {
            output.push_str(&format!(
                "After {:.2} months ({:.0} hours) of storage\n",
                marker.months, marker.hours
            ));
        }
        output.push_str(&"─".repeat(60));
        output.push('\n');

        for marker in &self.markers {
            let filled = ((marker.capacity / 100.0).clamp(0.0, 1.0) * BAR_WIDTH as f64).round()
                as usize;
            let bar = "█".repeat(filled);
            let empty = " ".repeat(BAR_WIDTH - filled);

            let in_band = self
                .band
                .as_ref()
                .is_some_and(|b| marker.temperature >= b.lower && marker.temperature <= b.upper);
            let band_indicator = if in_band { "◆" } else { " " };

            output.push_str(&format!(
                "{:>6}°C {}{} {} {:>6.2}%",
                format_celsius(marker.temperature),
                bar,
                empty,
                band_indicator,
                marker.capacity
            ));
            if let Some(charge) = marker.charge {
                output.push_str(&format!(
                    "  {:.3} Ah left, {:.3} mA mean",
                    charge.remaining_ah, charge.mean_current_ma
                ));
            }
            output.push('\n');
        }

        output.push_str(&"─".repeat(60));
        match &self.band {
            Some(band) => output.push_str(&format!(
                "\n◆ Highlighted {}°C to {}°C\n",
                format_celsius(band.lower),
                format_celsius(band.upper)
            )),
            None => output.push('\n'),
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use crate::chart::ChartModel;
    use crate::curves::{build, HighlightBand};
    use crate::decay::{DecayParameters, RatePolicy};
    use crate::temperature::TemperatureRange;
    use crate::time_grid::TimeGrid;

    fn chart(band: (f64, f64), nominal: Option<f64>) -> ChartModel {
        let range = TemperatureRange::new(-15.0, 40.0, 5.0).unwrap();
        let params = DecayParameters::new(100.0, 25.0, 0.03, nominal).unwrap();
        let times = TimeGrid::new(6.0).unwrap();
        let curves = build(&range, &params, &times, RatePolicy::Strict).unwrap();
        let band = HighlightBand::select(band.0, band.1, &range).unwrap();
        ChartModel::new(&curves, band, &params).unwrap()
    }

    #[test]
    fn one_row_per_temperature() {
        let text = chart((-15.0, -10.0), None).render_ascii_chart();
        let rows = text.lines().filter(|l| l.contains('%')).count();
        assert_eq!(rows, 12);
        assert!(text.contains("After 6.00 months"));
    }

    #[test]
    fn band_rows_are_marked() {
        let text = chart((30.0, 20.0), None).render_ascii_chart();
        let marked = text.lines().filter(|l| l.contains('%') && l.contains('◆')).count();
        assert_eq!(marked, 3);
        assert!(text.contains("◆ Highlighted 20°C to 30°C"));
    }

    #[test]
    fn no_marks_without_band() {
        let text = chart((10.0, 10.0), None).render_ascii_chart();
        assert!(!text.contains('◆'));
    }

    #[test]
    fn charge_columns_when_nominal_known() {
        let text = chart((-15.0, -10.0), Some(3.4)).render_ascii_chart();
        assert!(text.contains("Ah left"));
    }
}
