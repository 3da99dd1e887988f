//! Region Aggregator Module
//! Joins meal-coverage rows to nutrition rows by (state, district) and
//! averages the indicators per state.

use crate::data::{MealRecord, NutritionRecord};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// A district present in both source tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSubRegion {
    pub region: String,
    pub sub_region: String,
    pub meal_coverage_percent: f64,
    pub stunting_rate_percent: f64,
    pub underweight_rate_percent: f64,
}

impl MergedSubRegion {
    fn join(meal: &MealRecord, nutrition: &NutritionRecord) -> Self {
        Self {
            region: meal.region.clone(),
            sub_region: meal.sub_region.clone(),
            meal_coverage_percent: meal.meal_coverage_percent,
            stunting_rate_percent: nutrition.stunting_rate_percent,
            underweight_rate_percent: nutrition.underweight_rate_percent,
        }
    }
}

/// Averages for one state over its matched districts.
///
/// `sub_regions` is never empty and keeps meal-table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub sub_regions: Vec<MergedSubRegion>,
    pub avg_meal_coverage: f64,
    pub avg_stunting_rate: f64,
    pub avg_underweight_rate: f64,
}

impl RegionSummary {
    fn from_sub_regions(region: String, sub_regions: Vec<MergedSubRegion>) -> Self {
        let avg = |field: fn(&MergedSubRegion) -> f64| {
            round_one_decimal(sub_regions.iter().map(field).mean())
        };

        Self {
            avg_meal_coverage: avg(|s| s.meal_coverage_percent),
            avg_stunting_rate: avg(|s| s.stunting_rate_percent),
            avg_underweight_rate: avg(|s| s.underweight_rate_percent),
            region,
            sub_regions,
        }
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Join both tables and summarise per state.
///
/// Matching is exact on both keys. A meal row with no nutrition row is
/// dropped; when the nutrition table repeats a key, the first row wins.
/// States appear in the order first seen in `meals`; states where no
/// district matched are left out.
pub fn merge_and_aggregate(
    meals: &[MealRecord],
    nutrition: &[NutritionRecord],
) -> Vec<RegionSummary> {
    let mut index: HashMap<(&str, &str), &NutritionRecord> =
        HashMap::with_capacity(nutrition.len());
    for record in nutrition {
        index
            .entry((record.region.as_str(), record.sub_region.as_str()))
            .or_insert(record);
    }

    let mut groups: Vec<(String, Vec<MergedSubRegion>)> = Vec::new();
    let mut group_pos: HashMap<&str, usize> = HashMap::new();

    for meal in meals {
        let pos = *group_pos.entry(meal.region.as_str()).or_insert_with(|| {
            groups.push((meal.region.clone(), Vec::new()));
            groups.len() - 1
        });

        match index.get(&(meal.region.as_str(), meal.sub_region.as_str())) {
            Some(nutrition) => groups[pos].1.push(MergedSubRegion::join(meal, nutrition)),
            None => tracing::debug!(
                region = %meal.region,
                sub_region = %meal.sub_region,
                "no nutrition row for district, dropping"
            ),
        }
    }

    groups
        .into_iter()
        .filter_map(|(region, sub_regions)| {
            if sub_regions.is_empty() {
                tracing::debug!(%region, "no matched districts, omitting region");
                None
            } else {
                Some(RegionSummary::from_sub_regions(region, sub_regions))
            }
        })
        .collect()
}
