//! CSV Data Loader Module
//! Fetches both source tables and parses them into typed records using Polars.

use super::records::{MealRecord, NutritionRecord};
use super::schema::{
    ColumnKind, TableSchema, DISTRICT_COL, MEAL_COVERAGE_COL, MEAL_SCHEMA, NUTRITION_SCHEMA,
    STATE_COL, STUNTING_RATE_COL, UNDERWEIGHT_RATE_COL,
};
use super::ResourceFetcher;
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Resource unavailable: {location}: {source}")]
    ResourceUnavailable {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: PolarsError,
    },
    #[error("{location}: missing required column '{column}'")]
    MissingColumn { location: String, column: String },
    #[error("{location}: column '{column}' row {row}: expected a number, found '{value}'")]
    TypeMismatch {
        location: String,
        column: String,
        row: usize,
        value: String,
    },
    #[error("{location}: column '{column}' row {row} is empty")]
    MissingValue {
        location: String,
        column: String,
        row: usize,
    },
}

/// Both parsed tables, each in source row order.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub meals: Vec<MealRecord>,
    pub nutrition: Vec<NutritionRecord>,
}

/// Loads the meal-coverage and nutrition tables through a [`ResourceFetcher`].
pub struct DataLoader<F> {
    fetcher: F,
    meal_source: String,
    nutrition_source: String,
}

impl<F: ResourceFetcher> DataLoader<F> {
    pub fn new(
        fetcher: F,
        meal_source: impl Into<String>,
        nutrition_source: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            meal_source: meal_source.into(),
            nutrition_source: nutrition_source.into(),
        }
    }

    pub fn meal_source(&self) -> &str {
        &self.meal_source
    }

    pub fn nutrition_source(&self) -> &str {
        &self.nutrition_source
    }

    /// Fetch and parse both tables.
    ///
    /// The two resources are independent, so they are read concurrently. Any
    /// failure on either side fails the whole load.
    pub fn load(&self) -> Result<LoadedData, LoaderError> {
        let (meals, nutrition) = rayon::join(
            || {
                let text = self.fetcher.fetch(&self.meal_source)?;
                parse_meal_records(&text, &self.meal_source)
            },
            || {
                let text = self.fetcher.fetch(&self.nutrition_source)?;
                parse_nutrition_records(&text, &self.nutrition_source)
            },
        );

        let data = LoadedData {
            meals: meals?,
            nutrition: nutrition?,
        };
        tracing::info!(
            meals = data.meals.len(),
            nutrition = data.nutrition.len(),
            "loaded source tables"
        );
        Ok(data)
    }
}

/// Parse meal-coverage CSV text.
pub fn parse_meal_records(text: &str, location: &str) -> Result<Vec<MealRecord>, LoaderError> {
    let table = ParsedTable::parse(text, location, &MEAL_SCHEMA)?;
    let states = table.text(STATE_COL)?;
    let districts = table.text(DISTRICT_COL)?;
    let coverage = table.number(MEAL_COVERAGE_COL)?;

    Ok(states
        .iter()
        .zip(districts)
        .zip(coverage)
        .map(|((state, district), &pct)| MealRecord::new(state.clone(), district.clone(), pct))
        .collect())
}

/// Parse nutrition CSV text.
pub fn parse_nutrition_records(
    text: &str,
    location: &str,
) -> Result<Vec<NutritionRecord>, LoaderError> {
    let table = ParsedTable::parse(text, location, &NUTRITION_SCHEMA)?;
    let states = table.text(STATE_COL)?;
    let districts = table.text(DISTRICT_COL)?;
    let stunting = table.number(STUNTING_RATE_COL)?;
    let underweight = table.number(UNDERWEIGHT_RATE_COL)?;

    Ok(states
        .iter()
        .zip(districts)
        .zip(stunting.iter().zip(underweight))
        .map(|((state, district), (&s, &u))| {
            NutritionRecord::new(state.clone(), district.clone(), s, u)
        })
        .collect())
}

enum TypedColumn {
    Text(Vec<String>),
    Number(Vec<f64>),
}

/// Schema-checked table with blank rows removed.
struct ParsedTable<'a> {
    location: &'a str,
    columns: HashMap<&'static str, TypedColumn>,
}

impl<'a> ParsedTable<'a> {
    fn parse(text: &str, location: &'a str, schema: &TableSchema) -> Result<Self, LoaderError> {
        let parse_err = |source: PolarsError| LoaderError::Parse {
            location: location.to_string(),
            source,
        };

        // No inference: every column is read verbatim as a string so keys such
        // as "007" survive unchanged. Numbers are parsed explicitly below.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
            .finish()
            .map_err(parse_err)?;

        let mut raw: Vec<(&'static str, ColumnKind, Vec<Option<String>>)> = Vec::new();
        for wanted in schema.columns {
            let present = df
                .get_column_names()
                .iter()
                .any(|name| name.as_str() == wanted.name);
            if !present {
                return Err(LoaderError::MissingColumn {
                    location: location.to_string(),
                    column: wanted.name.to_string(),
                });
            }
            let column = df.column(wanted.name).map_err(parse_err)?;
            raw.push((wanted.name, wanted.kind, Self::extract(column).map_err(parse_err)?));
        }

        // A row where every required field is empty counts as blank.
        let height = df.height();
        let kept_rows: Vec<usize> = (0..height)
            .filter(|&row| !raw.iter().all(|(_, _, values)| values[row].is_none()))
            .collect();
        if kept_rows.len() < height {
            tracing::debug!(
                location,
                skipped = height - kept_rows.len(),
                "skipped blank rows"
            );
        }

        let mut columns = HashMap::new();
        for (name, kind, values) in raw {
            let typed = Self::coerce(location, name, kind, values, &kept_rows)?;
            columns.insert(name, typed);
        }
        tracing::debug!(location, table = schema.name, rows = kept_rows.len(), "parsed table");

        Ok(Self { location, columns })
    }

    /// Cell strings of one column. Whitespace-only cells count as empty.
    fn extract(column: &Column) -> PolarsResult<Vec<Option<String>>> {
        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.filter(|s| !s.trim().is_empty()).map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    fn coerce(
        location: &str,
        name: &str,
        kind: ColumnKind,
        values: Vec<Option<String>>,
        rows: &[usize],
    ) -> Result<TypedColumn, LoaderError> {
        let missing = |row: usize| LoaderError::MissingValue {
            location: location.to_string(),
            column: name.to_string(),
            row: row + 1,
        };

        match kind {
            ColumnKind::Text => rows
                .iter()
                .map(|&row| values[row].clone().ok_or_else(|| missing(row)))
                .collect::<Result<Vec<_>, _>>()
                .map(TypedColumn::Text),
            ColumnKind::Number => rows
                .iter()
                .map(|&row| {
                    let value = values[row].as_deref().ok_or_else(|| missing(row))?;
                    value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| LoaderError::TypeMismatch {
                            location: location.to_string(),
                            column: name.to_string(),
                            row: row + 1,
                            value: value.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TypedColumn::Number),
        }
    }

    fn text(&self, name: &str) -> Result<&[String], LoaderError> {
        match self.columns.get(name) {
            Some(TypedColumn::Text(values)) => Ok(values),
            _ => Err(self.missing_column(name)),
        }
    }

    fn number(&self, name: &str) -> Result<&[f64], LoaderError> {
        match self.columns.get(name) {
            Some(TypedColumn::Number(values)) => Ok(values),
            _ => Err(self.missing_column(name)),
        }
    }

    fn missing_column(&self, name: &str) -> LoaderError {
        LoaderError::MissingColumn {
            location: self.location.to_string(),
            column: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEALS: &str = "State,District,Meal_Coverage_Percent\n\
                         Bihar,Patna,60\n\
                         Bihar,Gaya,80.5\n\
                         Kerala,Kochi,95\n";

    #[test]
    fn parses_meal_rows_in_source_order() {
        let meals = parse_meal_records(MEALS, "meals.csv").unwrap();

        assert_eq!(meals.len(), 3);
        assert_eq!(meals[0], MealRecord::new("Bihar", "Patna", 60.0));
        assert_eq!(meals[1], MealRecord::new("Bihar", "Gaya", 80.5));
        assert_eq!(meals[2], MealRecord::new("Kerala", "Kochi", 95.0));
    }

    #[test]
    fn parses_nutrition_rows() {
        let text = "State,District,Stunting_Rate_Percent,Underweight_Rate_Percent\n\
                    Bihar,Patna,40,30.5\n";
        let rows = parse_nutrition_records(text, "nutrition.csv").unwrap();

        assert_eq!(rows, vec![NutritionRecord::new("Bihar", "Patna", 40.0, 30.5)]);
    }

    #[test]
    fn skips_rows_that_are_entirely_blank() {
        let text = "State,District,Meal_Coverage_Percent\n\
                    Bihar,Patna,60\n\
                    ,,\n\
                    \n\
                    Bihar,Gaya,80\n";
        let meals = parse_meal_records(text, "meals.csv").unwrap();

        let districts: Vec<&str> = meals.iter().map(|m| m.sub_region.as_str()).collect();
        assert_eq!(districts, vec!["Patna", "Gaya"]);
    }

    #[test]
    fn non_numeric_value_in_number_column_fails_fast() {
        let text = "State,District,Meal_Coverage_Percent\n\
                    Bihar,Patna,60\n\
                    Bihar,Gaya,lots\n";
        let err = parse_meal_records(text, "meals.csv").unwrap_err();

        match err {
            LoaderError::TypeMismatch { column, row, value, .. } => {
                assert_eq!(column, MEAL_COVERAGE_COL);
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "State,District\nBihar,Patna\n";
        let err = parse_meal_records(text, "meals.csv").unwrap_err();

        assert!(matches!(
            err,
            LoaderError::MissingColumn { ref column, .. } if column == MEAL_COVERAGE_COL
        ));
    }

    #[test]
    fn partially_empty_row_is_an_error() {
        let text = "State,District,Meal_Coverage_Percent\n\
                    Bihar,,60\n";
        let err = parse_meal_records(text, "meals.csv").unwrap_err();

        assert!(matches!(err, LoaderError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn numeric_looking_keys_are_kept_verbatim() {
        let text = "State,District,Meal_Coverage_Percent\n\
                    Bihar,007,60\n\
                    Bihar,1.50,70\n\
                    Bihar,12.0,80\n";
        let meals = parse_meal_records(text, "meals.csv").unwrap();

        let districts: Vec<&str> = meals.iter().map(|m| m.sub_region.as_str()).collect();
        assert_eq!(districts, vec!["007", "1.50", "12.0"]);
    }

    #[test]
    fn zero_padded_codes_join_across_differently_shaped_tables() {
        let meals = parse_meal_records(
            "State,District,Meal_Coverage_Percent\nBihar,007,60\nBihar,008,70\n",
            "meals.csv",
        )
        .unwrap();
        let nutrition = parse_nutrition_records(
            "State,District,Stunting_Rate_Percent,Underweight_Rate_Percent\n\
             Bihar,007,40,30\n\
             Bihar,A12,20,10\n",
            "nutrition.csv",
        )
        .unwrap();

        assert_eq!(meals[0].sub_region, nutrition[0].sub_region);

        let summaries = crate::stats::merge_and_aggregate(&meals, &nutrition);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].sub_regions.len(), 1);
        assert_eq!(summaries[0].sub_regions[0].sub_region, "007");
    }

    #[test]
    fn whitespace_only_rows_are_blank() {
        let text = concat!(
            "State,District,Meal_Coverage_Percent\n",
            "Bihar,Patna,60\n",
            " , , \n",
            "Bihar,Gaya,80\n",
        );
        let meals = parse_meal_records(text, "meals.csv").unwrap();

        let districts: Vec<&str> = meals.iter().map(|m| m.sub_region.as_str()).collect();
        assert_eq!(districts, vec!["Patna", "Gaya"]);
    }

    #[test]
    fn header_only_table_is_empty() {
        let meals = parse_meal_records("State,District,Meal_Coverage_Percent\n", "m.csv").unwrap();
        assert!(meals.is_empty());
    }

    #[test]
    fn out_of_range_percentages_pass_through() {
        let text = "State,District,Meal_Coverage_Percent\nBihar,Patna,130\n";
        let meals = parse_meal_records(text, "meals.csv").unwrap();
        assert_eq!(meals[0].meal_coverage_percent, 130.0);
    }
}
