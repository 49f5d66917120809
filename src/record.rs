use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One sale entry: a condition label and a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub condition: String,
    pub price: f64,
}

impl Record {
    pub fn new(condition: impl Into<String>, price: f64) -> Self {
        Self {
            condition: condition.into(),
            price,
        }
    }
}

/// Binary item condition used as the categorical feature.
///
/// Mapping from raw labels (case-insensitive, trimmed):
///
/// | label            | condition | code |
/// |------------------|-----------|------|
/// | `baru`, `new`    | `New`     | 1    |
/// | `bekas`, `used`  | `Used`    | 0    |
/// | anything else    | `Used`    | 0    |
///
/// The fallback row is lossy: a third category such as `refurbished` is
/// folded into `Used`. Use [`Condition::classify`] to tell a known label from
/// a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    Used,
}

const NEW_LABELS: &[&str] = &["baru", "new"];
const USED_LABELS: &[&str] = &["bekas", "used"];

impl Condition {
    /// Classify a raw label. Returns `None` for labels outside the mapping table.
    pub fn classify(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        if NEW_LABELS.contains(&normalized.as_str()) {
            Some(Condition::New)
        } else if USED_LABELS.contains(&normalized.as_str()) {
            Some(Condition::Used)
        } else {
            None
        }
    }

    /// Classify a raw label, folding unknown labels into `Used`.
    pub fn from_label(label: &str) -> Self {
        Self::classify(label).unwrap_or(Condition::Used)
    }

    /// Numeric code: 1 for `New`, 0 for `Used`
    pub fn code(self) -> u8 {
        match self {
            Condition::New => 1,
            Condition::Used => 0,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Used => write!(f, "used"),
        }
    }
}

static DEFAULT_RECORDS: OnceLock<Vec<Record>> = OnceLock::new();

/// Built-in dataset used when no tabular source is supplied.
pub fn default_records() -> &'static [Record] {
    DEFAULT_RECORDS.get_or_init(|| {
        [
            ("Baru", 150_000.0),
            ("Bekas", 80_000.0),
            ("Baru", 250_000.0),
            ("Bekas", 120_000.0),
            ("Baru", 500_000.0),
            ("Bekas", 300_000.0),
            ("Baru", 100_000.0),
            ("Bekas", 40_000.0),
        ]
        .into_iter()
        .map(|(condition, price)| Record::new(condition, price))
        .collect()
    })
}
