use crate::error::KMeansError;
use crate::record::{Condition, Record};
use ndarray::Array2;
use tracing::warn;

/// Number of columns in an encoded feature matrix
pub const N_FEATURES: usize = 2;

/// Column index of the condition code
pub const CONDITION_COL: usize = 0;

/// Column index of the price
pub const PRICE_COL: usize = 1;

/// Encode records into an `(n, 2)` feature matrix of `[condition_code, price]`.
///
/// Row `i` corresponds to `records[i]`. The condition goes through
/// [`Condition::from_label`], so unknown labels become `0`. Price is passed
/// through unscaled.
///
/// # Errors
///
/// - `EmptyInput` if `records` is empty
/// - `MalformedInput` for an empty condition or a negative / non-finite price
pub fn encode(records: &[Record]) -> Result<Array2<f64>, KMeansError> {
    if records.is_empty() {
        return Err(KMeansError::EmptyInput);
    }

    let mut features = Array2::zeros((records.len(), N_FEATURES));

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;

        if record.condition.trim().is_empty() {
            return Err(KMeansError::MalformedInput {
                row,
                reason: "condition is empty".to_string(),
            });
        }

        if !record.price.is_finite() || record.price < 0.0 {
            return Err(KMeansError::MalformedInput {
                row,
                reason: format!("price must be a non-negative number, got {}", record.price),
            });
        }

        let condition = match Condition::classify(&record.condition) {
            Some(condition) => condition,
            None => {
                warn!(
                    row,
                    label = %record.condition,
                    "unrecognized condition label, encoding as used"
                );
                Condition::Used
            }
        };

        features[[i, CONDITION_COL]] = f64::from(condition.code());
        features[[i, PRICE_COL]] = record.price;
    }

    Ok(features)
}
