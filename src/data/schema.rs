//! Column schemas for the two CSV resources.
//!
//! Every column is declared up front as text or number so the loader can
//! coerce and validate at parse time instead of trusting type inference.

pub const STATE_COL: &str = "State";
pub const DISTRICT_COL: &str = "District";
pub const MEAL_COVERAGE_COL: &str = "Meal_Coverage_Percent";
pub const STUNTING_RATE_COL: &str = "Stunting_Rate_Percent";
pub const UNDERWEIGHT_RATE_COL: &str = "Underweight_Rate_Percent";

/// Expected value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Named set of required columns. Extra columns in the source are ignored.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

pub const MEAL_SCHEMA: TableSchema = TableSchema {
    name: "meal coverage",
    columns: &[
        ColumnSpec { name: STATE_COL, kind: ColumnKind::Text },
        ColumnSpec { name: DISTRICT_COL, kind: ColumnKind::Text },
        ColumnSpec { name: MEAL_COVERAGE_COL, kind: ColumnKind::Number },
    ],
};

pub const NUTRITION_SCHEMA: TableSchema = TableSchema {
    name: "nutrition",
    columns: &[
        ColumnSpec { name: STATE_COL, kind: ColumnKind::Text },
        ColumnSpec { name: DISTRICT_COL, kind: ColumnKind::Text },
        ColumnSpec { name: STUNTING_RATE_COL, kind: ColumnKind::Number },
        ColumnSpec { name: UNDERWEIGHT_RATE_COL, kind: ColumnKind::Number },
    ],
};
