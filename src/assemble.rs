use crate::algorithm::ClusterResult;
use crate::encoder::{CONDITION_COL, N_FEATURES, PRICE_COL};
use crate::record::{Condition, Record};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// A source record with its encoded condition and assigned cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub condition: String,
    pub condition_code: u8,
    pub price: f64,
    pub cluster: usize,
}

/// One row of the centroid table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidRow {
    pub cluster: usize,
    pub condition_code: f64,
    pub price: f64,
}

/// Output handed to a results consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub records: Vec<LabeledRecord>,
    /// Ordered by ascending cluster id, one row per cluster
    pub centroids: Vec<CentroidRow>,
    pub n_iterations: usize,
    pub converged: bool,
    pub inertia: f64,
}

impl ClusterReport {
    /// Member count of each cluster, zeros included.
    ///
    /// Records whose cluster id has no centroid row are not counted.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centroids.len()];
        for record in &self.records {
            if let Some(size) = sizes.get_mut(record.cluster) {
                *size += 1;
            }
        }
        sizes
    }
}

/// Join records with their cluster ids and lay out the centroid table.
///
/// `features` is expected to be the [`encode`](crate::encode) output for
/// `records`, and `result` the clustering of `features`. Other column layouts
/// never panic: when `features` is not `N_FEATURES` wide each record takes
/// its code from the label, and when the centroids are not `N_FEATURES` wide
/// their coordinates are reported as `NaN`.
pub fn assemble(
    records: &[Record],
    features: &ArrayView2<f64>,
    result: &ClusterResult,
) -> ClusterReport {
    debug_assert_eq!(records.len(), features.nrows());
    debug_assert_eq!(records.len(), result.labels.len());

    let encoded = features.ncols() == N_FEATURES;
    let labeled = records
        .iter()
        .zip(features.outer_iter())
        .zip(result.labels.iter())
        .map(|((record, feature), &cluster)| LabeledRecord {
            condition: record.condition.clone(),
            condition_code: if encoded {
                feature[CONDITION_COL] as u8
            } else {
                Condition::from_label(&record.condition).code()
            },
            price: record.price,
            cluster,
        })
        .collect();

    let centroids_encoded = result.centroids.ncols() == N_FEATURES;
    let centroids = result
        .centroids
        .outer_iter()
        .enumerate()
        .map(|(cluster, centroid)| {
            let (condition_code, price) = if centroids_encoded {
                (centroid[CONDITION_COL], centroid[PRICE_COL])
            } else {
                (f64::NAN, f64::NAN)
            };
            CentroidRow {
                cluster,
                condition_code,
                price,
            }
        })
        .collect();

    ClusterReport {
        records: labeled,
        centroids,
        n_iterations: result.n_iterations,
        converged: result.converged,
        inertia: result.inertia,
    }
}
