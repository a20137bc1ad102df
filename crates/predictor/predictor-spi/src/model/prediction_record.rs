//! Prediction output row

use super::RawRow;

/// Column holding the prediction in every scored row
pub const PREDICTED_SALES_COLUMN: &str = "Predicted_Sales";

/// An input row together with its predicted sales
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub row: RawRow,
    /// Already rounded to cents
    pub predicted_sales: f64,
}

impl PredictionRecord {
    pub fn new(row: RawRow, predicted_sales: f64) -> Self {
        Self {
            row,
            predicted_sales,
        }
    }

    /// Predicted sales with exactly two decimals
    pub fn formatted_sales(&self) -> String {
        format!("{:.2}", self.predicted_sales)
    }

    /// Input row with the prediction written into `Predicted_Sales`
    ///
    /// An input that already has that column keeps its position and gets
    /// the new value; otherwise the column is appended.
    pub fn output_row(&self) -> RawRow {
        let mut row = self.row.clone();
        row.insert(PREDICTED_SALES_COLUMN, self.formatted_sales());
        row
    }

    /// Header of the output row
    pub fn columns(&self) -> Vec<String> {
        self.output_row().columns().map(str::to_string).collect()
    }

    /// Cells of the output row, aligned with [`PredictionRecord::columns`]
    pub fn values(&self) -> Vec<String> {
        self.output_row().values().map(str::to_string).collect()
    }
}
