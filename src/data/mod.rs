//! Data module - resource fetching, schema-checked CSV parsing and typed records

mod fetcher;
mod loader;
mod records;
mod schema;

pub use fetcher::{FsFetcher, ResourceFetcher};
pub use loader::{parse_meal_records, parse_nutrition_records, DataLoader, LoadedData, LoaderError};
pub use records::{MealRecord, NutritionRecord};
pub use schema::{
    ColumnKind, ColumnSpec, TableSchema, DISTRICT_COL, MEAL_COVERAGE_COL, MEAL_SCHEMA,
    NUTRITION_SCHEMA, STATE_COL, STUNTING_RATE_COL, UNDERWEIGHT_RATE_COL,
};
