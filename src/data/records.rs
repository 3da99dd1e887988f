//! Typed rows of the two source tables.

use serde::Serialize;

/// One district row from the meal-coverage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRecord {
    pub region: String,
    pub sub_region: String,
    /// Not clamped; out-of-range values pass through.
    pub meal_coverage_percent: f64,
}

/// One district row from the nutrition table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionRecord {
    pub region: String,
    pub sub_region: String,
    pub stunting_rate_percent: f64,
    pub underweight_rate_percent: f64,
}

impl MealRecord {
    pub fn new(region: impl Into<String>, sub_region: impl Into<String>, coverage: f64) -> Self {
        Self {
            region: region.into(),
            sub_region: sub_region.into(),
            meal_coverage_percent: coverage,
        }
    }
}

impl NutritionRecord {
    pub fn new(
        region: impl Into<String>,
        sub_region: impl Into<String>,
        stunting: f64,
        underweight: f64,
    ) -> Self {
        Self {
            region: region.into(),
            sub_region: sub_region.into(),
            stunting_rate_percent: stunting,
            underweight_rate_percent: underweight,
        }
    }
}
