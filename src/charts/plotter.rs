//! Chart Plotter Module
//! Grouped bar chart and district table for one region, drawn with egui_plot.

use crate::stats::{round_one_decimal, MergedSubRegion, RegionSummary};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Gap-free width shared by the three bars of one district.
const GROUP_WIDTH: f64 = 0.8;

/// The three indicators shown per district.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    MealCoverage,
    Stunting,
    Underweight,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [
        Indicator::MealCoverage,
        Indicator::Stunting,
        Indicator::Underweight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Indicator::MealCoverage => "Meal Coverage %",
            Indicator::Stunting => "Stunting %",
            Indicator::Underweight => "Underweight %",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Indicator::MealCoverage => Color32::from_rgb(46, 204, 113), // Green
            Indicator::Stunting => Color32::from_rgb(231, 76, 60),      // Red
            Indicator::Underweight => Color32::from_rgb(243, 156, 18),  // Orange
        }
    }

    pub fn value(self, district: &MergedSubRegion) -> f64 {
        match self {
            Indicator::MealCoverage => district.meal_coverage_percent,
            Indicator::Stunting => district.stunting_rate_percent,
            Indicator::Underweight => district.underweight_rate_percent,
        }
    }

    pub fn average(self, summary: &RegionSummary) -> f64 {
        match self {
            Indicator::MealCoverage => summary.avg_meal_coverage,
            Indicator::Stunting => summary.avg_stunting_rate,
            Indicator::Underweight => summary.avg_underweight_rate,
        }
    }
}

/// Bar positions for one indicator: `[x, height]` per district.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator: Indicator,
    pub points: Vec<[f64; 2]>,
}

/// Chart-ready view of one region, rebuilt when the selection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionChart {
    pub region: String,
    pub district_labels: Vec<String>,
    pub series: Vec<IndicatorSeries>,
}

impl RegionChart {
    pub fn from_summary(summary: &RegionSummary) -> Self {
        Self {
            region: summary.region.clone(),
            district_labels: summary
                .sub_regions
                .iter()
                .map(|d| d.sub_region.clone())
                .collect(),
            series: IndicatorPlotter::indicator_series(summary),
        }
    }

    /// Bar width for a single indicator.
    pub fn bar_width(&self) -> f64 {
        GROUP_WIDTH / self.series.len().max(1) as f64
    }
}

/// Display text for a percentage: one decimal, rounded the same way as the
/// region averages.
pub fn format_value(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

/// Draws indicator charts and tables.
pub struct IndicatorPlotter;

impl IndicatorPlotter {
    /// Lay out the indicators as side-by-side bars centred on each district index.
    pub fn indicator_series(summary: &RegionSummary) -> Vec<IndicatorSeries> {
        let n = Indicator::ALL.len() as f64;
        let width = GROUP_WIDTH / n;

        Indicator::ALL
            .iter()
            .enumerate()
            .map(|(k, &indicator)| {
                let offset = (k as f64 - (n - 1.0) / 2.0) * width;
                let points = summary
                    .sub_regions
                    .iter()
                    .enumerate()
                    .map(|(i, district)| [i as f64 + offset, indicator.value(district)])
                    .collect();
                IndicatorSeries { indicator, points }
            })
            .collect()
    }

    /// Draw the grouped bar chart. X-axis: districts, Y-axis: percent.
    pub fn draw_indicator_chart(ui: &mut egui::Ui, chart: &RegionChart, height: f32) {
        let labels = chart.district_labels.clone();
        let bar_width = chart.bar_width();

        Plot::new(format!("indicators_{}", chart.region))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(100.0)
            .x_axis_label("District")
            .y_axis_label("Percent")
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                let idx = v.round();
                if (v - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    let color = series.indicator.color();
                    let bars: Vec<Bar> = series
                        .points
                        .iter()
                        .zip(&chart.district_labels)
                        .map(|(&[x, y], district)| {
                            Bar::new(x, y)
                                .width(bar_width)
                                .name(format!("{} · {}", district, series.indicator.label()))
                                .fill(color.gamma_multiply(0.8))
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(color)
                            .name(series.indicator.label()),
                    );
                }
            });
    }

    /// Draw the per-district table with an average row.
    pub fn draw_district_table(ui: &mut egui::Ui, summary: &RegionSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("district_table_{}", summary.region)))
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("District").strong().size(12.0));
                        for indicator in Indicator::ALL {
                            ui.label(
                                RichText::new(indicator.label())
                                    .strong()
                                    .size(12.0)
                                    .color(indicator.color()),
                            );
                        }
                        ui.end_row();

                        for district in &summary.sub_regions {
                            ui.label(RichText::new(&district.sub_region).size(12.0));
                            for indicator in Indicator::ALL {
                                ui.label(
                                    RichText::new(format_value(indicator.value(district)))
                                        .size(12.0),
                                );
                            }
                            ui.end_row();
                        }

                        ui.label(RichText::new("Average").strong().size(12.0));
                        for indicator in Indicator::ALL {
                            ui.label(
                                RichText::new(format_value(indicator.average(summary)))
                                    .strong()
                                    .size(12.0),
                            );
                        }
                        ui.end_row();
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MealRecord, NutritionRecord};
    use crate::stats::merge_and_aggregate;

    fn bihar() -> RegionSummary {
        merge_and_aggregate(
            &[
                MealRecord::new("Bihar", "A", 60.0),
                MealRecord::new("Bihar", "B", 80.0),
            ],
            &[
                NutritionRecord::new("Bihar", "A", 40.0, 30.0),
                NutritionRecord::new("Bihar", "B", 20.0, 10.0),
            ],
        )
        .remove(0)
    }

    #[test]
    fn one_series_per_indicator_in_fixed_order() {
        let series = IndicatorPlotter::indicator_series(&bihar());
        let order: Vec<Indicator> = series.iter().map(|s| s.indicator).collect();
        assert_eq!(order, Indicator::ALL.to_vec());
    }

    #[test]
    fn bars_are_grouped_around_district_index() {
        let series = IndicatorPlotter::indicator_series(&bihar());

        // Middle indicator sits on the district index, neighbours either side.
        assert_eq!(series[1].points, vec![[0.0, 40.0], [1.0, 20.0]]);
        assert!(series[0].points[0][0] < 0.0);
        assert!(series[2].points[1][0] > 1.0);
        assert_eq!(series[0].points[1][1], 80.0);
        assert_eq!(series[2].points[0][1], 30.0);
    }

    #[test]
    fn region_chart_keeps_district_order() {
        let chart = RegionChart::from_summary(&bihar());
        assert_eq!(chart.region, "Bihar");
        assert_eq!(chart.district_labels, vec!["A", "B"]);
        assert!((chart.bar_width() * 3.0 - GROUP_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn indicator_average_reads_summary() {
        let summary = bihar();
        assert_eq!(Indicator::MealCoverage.average(&summary), 70.0);
        assert_eq!(Indicator::Stunting.average(&summary), 30.0);
        assert_eq!(Indicator::Underweight.average(&summary), 20.0);
    }

    #[test]
    fn displayed_values_round_halves_away_from_zero() {
        // `{:.1}` alone rounds the exact tie 0.25 to even.
        assert_eq!(format_value(0.25), "0.3");
        assert_eq!(format_value(66.649), "66.6");
        assert_eq!(format_value(70.0), "70.0");
    }
}
