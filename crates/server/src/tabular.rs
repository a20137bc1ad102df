//! CSV input

use predictor_facade::RawRow;
use std::io::Read;

/// Read a headed CSV into raw rows, one per record
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|record| {
            let record = record?;
            Ok(RawRow::from_pairs(headers.iter().zip(record.iter())))
        })
        .collect()
}
