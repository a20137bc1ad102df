//! Feature schema shared between training and serving
//!
//! The regressor was trained on exactly these columns, in this order. The
//! categorical fields were one-hot encoded with their first category dropped,
//! so `S1`, `L1`, `R1` and `No` have no column of their own.

use serde::{Deserialize, Serialize};

/// Ordered feature columns of the sales regressor
pub const FEATURE_COLUMNS: [&str; 20] = [
    "Store_id",
    "Holiday",
    "Orders",
    "Year",
    "Month",
    "Week",
    "Day",
    "DayOfWeek",
    "Is_Weekend",
    "Store_Type_S2",
    "Store_Type_S3",
    "Store_Type_S4",
    "Location_Type_L2",
    "Location_Type_L3",
    "Location_Type_L4",
    "Location_Type_L5",
    "Region_Code_R2",
    "Region_Code_R3",
    "Region_Code_R4",
    "Discount_Yes",
];

/// Calendar columns that can be derived from a `Date` column
pub const DATE_PART_COLUMNS: [&str; 6] = ["Year", "Month", "Week", "Day", "DayOfWeek", "Is_Weekend"];

/// A one-hot encoded input field and its dropped baseline category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalField {
    pub name: String,
    pub reference: String,
}

impl CategoricalField {
    pub fn new(name: &str, reference: &str) -> Self {
        Self {
            name: name.to_string(),
            reference: reference.to_string(),
        }
    }

    /// Indicator column for `value`, e.g. `Store_Type_S2`
    pub fn indicator(&self, value: &str) -> String {
        format!("{}_{}", self.name, value)
    }
}

/// Ordered column layout plus the categorical fields feeding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
    categorical: Vec<CategoricalField>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>, categorical: Vec<CategoricalField>) -> Self {
        Self {
            columns,
            categorical,
        }
    }

    /// Schema the shipped sales regressor was trained with
    pub fn sales() -> Self {
        Self::new(
            FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![
                CategoricalField::new("Store_Type", "S1"),
                CategoricalField::new("Location_Type", "L1"),
                CategoricalField::new("Region_Code", "R1"),
                CategoricalField::new("Discount", "No"),
            ],
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn categorical(&self) -> &[CategoricalField] {
        &self.categorical
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// The categorical field and category an indicator column stands for
    pub fn indicator_of<'a>(&'a self, column: &'a str) -> Option<(&'a CategoricalField, &'a str)> {
        self.categorical.iter().find_map(|field| {
            column
                .strip_prefix(field.name.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|value| (field, value))
        })
    }

    /// Whether `value` is a category the schema can represent for `field`
    pub fn knows_category(&self, field: &CategoricalField, value: &str) -> bool {
        value == field.reference || self.contains(&field.indicator(value))
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::sales()
    }
}
