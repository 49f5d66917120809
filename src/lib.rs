//! # sales-kmeans
//!
//! Seeded k-means clustering of small sales datasets, built on ndarray.
//!
//! The pipeline has three stages:
//!
//! - **Feature encoding**: [`encode`] turns `(condition, price)` records into
//!   an `(n, 2)` matrix `[condition_code, price]`
//! - **Clustering**: [`cluster`] runs Lloyd's algorithm `n_init` times from
//!   seeded random starts and keeps the lowest-inertia run
//! - **Assembly**: [`assemble`] joins records with cluster ids and lays out
//!   the centroid table
//!
//! ## Example
//!
//! ```rust
//! use sales_kmeans::{assemble, cluster, default_records, encode, KMeansConfig};
//!
//! let records = default_records();
//! let features = encode(records).unwrap();
//!
//! let config = KMeansConfig::new(2).with_seed(42).with_n_init(10);
//! let result = cluster(&features.view(), &config).unwrap();
//!
//! let report = assemble(records, &features.view(), &result);
//! assert_eq!(report.records.len(), 8);
//! assert_eq!(report.centroids.len(), 2);
//! ```
//!
//! ## Reading a CSV source
//!
//! ```rust
//! use sales_kmeans::io::read_records;
//!
//! let csv = "condition,price\nBaru,150000\nBekas,80000\n";
//! let records = read_records(csv.as_bytes()).unwrap();
//! assert_eq!(records.len(), 2);
//! ```
//!
//! Results are reproducible: the same points, `k`, seed, `max_iters` and
//! `n_init` always give the same labels and centroids, whether or not the
//! runs execute in parallel.

mod algorithm;
mod assemble;
mod config;
mod distance;
mod encoder;
mod error;
pub mod io;
mod kmeans;
mod record;

pub use algorithm::ClusterResult;
pub use assemble::{assemble, CentroidRow, ClusterReport, LabeledRecord};
pub use config::{KMeansConfig, KMeansInit};
pub use encoder::{encode, CONDITION_COL, N_FEATURES, PRICE_COL};
pub use error::KMeansError;
pub use kmeans::{cluster, cluster_points, SalesKMeans};
pub use record::{default_records, Condition, Record};
