//! Feature alignment
//!
//! Reshapes raw CSV/form rows into the regressor's fixed column layout:
//! categorical fields become indicator columns, schema columns the input does
//! not provide are zero, and input columns outside the schema are dropped.
//!
//! Categories are encoded against the schema rather than against whatever
//! categories happen to appear in the current batch, so a single form row
//! scores the same as the same row inside a large CSV.

use crate::schema::{FeatureSchema, DATE_PART_COLUMNS};
use chrono::{Datelike, NaiveDate};
use predictor_spi::{FeatureFrame, PredictorError, RawRow, Result};
use tracing::warn;

/// Column holding a calendar date in the raw dataset
pub const DATE_COLUMN: &str = "Date";

/// Raw dataset spelling of the order count
const ORDERS_ALIAS: (&str, &str) = ("Orders", "#Order");

/// Maps raw rows onto a [`FeatureSchema`]
#[derive(Debug, Clone, Default)]
pub struct FeatureAligner {
    schema: FeatureSchema,
}

impl FeatureAligner {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Align every row; the output always has exactly the schema's columns
    pub fn align(&self, rows: &[RawRow]) -> Result<FeatureFrame> {
        let aligned = rows
            .iter()
            .map(|row| self.align_row(row))
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureFrame::new(self.schema.columns().to_vec(), aligned))
    }

    /// Align a single row into schema order
    pub fn align_row(&self, row: &RawRow) -> Result<Vec<f64>> {
        let row = with_derived_columns(row)?;
        self.warn_unknown_categories(&row);

        self.schema
            .columns()
            .iter()
            .map(|column| match self.schema.indicator_of(column) {
                Some((field, category)) => Ok(indicator(row.get(&field.name), category)),
                None => match row.get(column) {
                    Some(value) => parse_numeric(column, value),
                    None => Ok(0.0),
                },
            })
            .collect()
    }

    fn warn_unknown_categories(&self, row: &RawRow) {
        for field in self.schema.categorical() {
            if let Some(value) = row.get(&field.name).map(str::trim) {
                if !value.is_empty() && !self.schema.knows_category(field, value) {
                    warn!(
                        field = %field.name,
                        category = %value,
                        "unknown category encoded as baseline"
                    );
                }
            }
        }
    }
}

fn indicator(value: Option<&str>, category: &str) -> f64 {
    match value {
        Some(v) if v.trim() == category => 1.0,
        _ => 0.0,
    }
}

/// Parse a numeric cell; empty cells are missing values
fn parse_numeric(column: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Ok(1.0);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| PredictorError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Fill in columns that can be derived from others in the raw dataset layout
fn with_derived_columns(row: &RawRow) -> Result<RawRow> {
    let mut row = row.clone();

    let (canonical, alias) = ORDERS_ALIAS;
    if !row.contains(canonical) {
        if let Some(value) = row.get(alias).map(str::to_string) {
            row.insert(canonical, value);
        }
    }

    let needs_date_parts = DATE_PART_COLUMNS.iter().any(|c| !row.contains(c));
    if needs_date_parts {
        if let Some(raw) = row.get(DATE_COLUMN).map(str::to_string) {
            let date = parse_date(&raw)?;
            for (column, value) in date_parts(date) {
                if !row.contains(column) {
                    row.insert(column, value.to_string());
                }
            }
        }
    }

    Ok(row)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        PredictorError::InvalidValue {
            column: DATE_COLUMN.to_string(),
            value: raw.to_string(),
        }
    })
}

/// Calendar features in [`DATE_PART_COLUMNS`] order
pub fn date_parts(date: NaiveDate) -> [(&'static str, i64); 6] {
    let dow = date.weekday().num_days_from_monday() as i64;
    [
        ("Year", date.year() as i64),
        ("Month", date.month() as i64),
        ("Week", date.iso_week().week() as i64),
        ("Day", date.day() as i64),
        ("DayOfWeek", dow),
        ("Is_Weekend", (dow >= 5) as i64),
    ]
}
