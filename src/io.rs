use crate::assemble::{CentroidRow, LabeledRecord};
use crate::error::KMeansError;
use crate::record::Record;
use csv::{ReaderBuilder, Trim, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Read sale records from CSV.
///
/// The first row is a header whose names are ignored. Column 0 holds the
/// condition label and column 1 the price; further columns are skipped.
///
/// # Errors
///
/// - `MalformedInput` for a short row, an empty condition, or a price that is
///   not a non-negative number. `row` is the 1-based data row.
/// - `Csv` for a syntax error in the source
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, KMeansError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (i, row) in rdr.records().enumerate() {
        let row_no = i + 1;
        let row = row?;

        if row.len() < 2 {
            return Err(KMeansError::MalformedInput {
                row: row_no,
                reason: format!("expected 2 columns (condition, price), got {}", row.len()),
            });
        }

        let condition = &row[0];
        if condition.is_empty() {
            return Err(KMeansError::MalformedInput {
                row: row_no,
                reason: "condition is empty".to_string(),
            });
        }

        let raw_price = &row[1];
        let price = raw_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| KMeansError::MalformedInput {
                row: row_no,
                reason: format!("price {:?} is not a non-negative number", raw_price),
            })?;

        records.push(Record::new(condition, price));
    }

    debug!(records = records.len(), "read sale records");

    Ok(records)
}

/// Read sale records from a CSV file.
pub fn read_records_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, KMeansError> {
    let file = File::open(path.as_ref())?;
    read_records(file)
}

/// Write labeled records as CSV with a header row.
pub fn write_labeled_records<W: Write>(
    writer: W,
    records: &[LabeledRecord],
) -> Result<(), KMeansError> {
    let mut wtr = Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the centroid table as CSV with a header row.
pub fn write_centroids<W: Write>(writer: W, centroids: &[CentroidRow]) -> Result<(), KMeansError> {
    let mut wtr = Writer::from_writer(writer);
    for row in centroids {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records_positional_columns() {
        let csv = "Kondisi Barang,Harga Barang (IDR),note\n\
                   Baru, 150000 ,x\n\
                   Bekas,80000\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![Record::new("Baru", 150_000.0), Record::new("Bekas", 80_000.0)]
        );
    }

    #[test]
    fn test_read_records_bad_price() {
        let csv = "condition,price\nBaru,100\nBekas,cheap\n";
        match read_records(csv.as_bytes()) {
            Err(KMeansError::MalformedInput { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("cheap"));
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_read_records_negative_price() {
        let csv = "condition,price\nBaru,-5\n";
        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(KMeansError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn test_read_records_missing_column() {
        let csv = "condition,price\nBaru\n";
        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(KMeansError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn test_read_records_empty_condition() {
        let csv = "condition,price\n ,100\n";
        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(KMeansError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn test_read_header_only() {
        let records = read_records("condition,price\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_write_tables() {
        let rows = vec![LabeledRecord {
            condition: "Baru".to_string(),
            condition_code: 1,
            price: 150000.0,
            cluster: 0,
        }];
        let mut out = Vec::new();
        write_labeled_records(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "condition,condition_code,price,cluster\nBaru,1,150000.0,0\n"
        );

        let centroids = vec![CentroidRow {
            cluster: 0,
            condition_code: 0.5,
            price: 1.0,
        }];
        let mut out = Vec::new();
        write_centroids(&mut out, &centroids).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cluster,condition_code,price\n0,0.5,1.0\n"
        );
    }
}
