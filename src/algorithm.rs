use crate::config::{KMeansConfig, KMeansInit};
use crate::distance::{compute_centroid_shift, compute_inertia, find_nearest_centroids};
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{debug, trace};

/// Result of a clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResult {
    /// Cluster id of each point, in `[0, k)`
    pub labels: Array1<usize>,

    /// Centroid coordinates, shape `(k, n_features)`. Centroids that never
    /// received a point stay where they were initialized.
    pub centroids: Array2<f64>,

    /// Number of update steps executed
    pub n_iterations: usize,

    /// `false` when the run stopped because it hit `max_iters`
    pub converged: bool,

    /// Sum of squared distances from each point to its assigned centroid
    pub inertia: f64,
}

impl ClusterResult {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }
}

/// Check inputs before any run starts.
///
/// Order matters: an empty input is reported as `EmptyInput` even when `k`
/// is also out of range.
pub(crate) fn validate_inputs(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
) -> Result<(), KMeansError> {
    let n_samples = data.nrows();
    let k = config.k;

    if n_samples == 0 {
        return Err(KMeansError::EmptyInput);
    }

    if k == 0 || k > n_samples {
        return Err(KMeansError::InvalidClusterCount { k, n_samples });
    }

    if config.n_init == 0 {
        return Err(KMeansError::InvalidConfig(
            "n_init must be greater than 0".to_string(),
        ));
    }

    if let Some((idx, _)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(KMeansError::MalformedInput {
            row: idx / data.ncols().max(1) + 1,
            reason: "feature values must be finite".to_string(),
        });
    }

    if let KMeansInit::Explicit(centroids) = &config.init {
        if centroids.dim() != (k, data.ncols()) {
            return Err(KMeansError::InvalidDimensions(format!(
                "Initial centroids have shape {:?}, expected ({}, {})",
                centroids.dim(),
                k,
                data.ncols()
            )));
        }

        if let Some((idx, _)) = centroids.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(KMeansError::InvalidConfig(format!(
                "initial centroid {} has a non-finite coordinate",
                idx / data.ncols().max(1)
            )));
        }
    }

    Ok(())
}

/// Run one seeded Lloyd's iteration sequence.
///
/// Run `run_index` seeds its RNG with `config.seed + run_index`.
/// Inputs must already have passed `validate_inputs`.
pub(crate) fn lloyd_run(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    run_index: usize,
) -> ClusterResult {
    let run_start = Instant::now();

    let centroids = match &config.init {
        KMeansInit::Random => {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(run_index as u64));
            initialize_centroids(data, config.k, &mut rng)
        }
        KMeansInit::Explicit(initial) => initial.clone(),
    };

    let result = lloyd_from(data, centroids, config.max_iters);

    debug!(
        run = run_index,
        iterations = result.n_iterations,
        converged = result.converged,
        inertia = result.inertia,
        elapsed_s = run_start.elapsed().as_secs_f64(),
        "k-means run finished"
    );

    result
}

/// Iterate update / reassignment from the given starting centroids until no
/// label changes or `max_iters` update steps have run.
pub(crate) fn lloyd_from(
    data: &ArrayView2<f64>,
    mut centroids: Array2<f64>,
    max_iters: usize,
) -> ClusterResult {
    let mut labels = find_nearest_centroids(data, &centroids.view());
    let mut n_iterations = 0;
    let mut converged = false;

    for iteration in 0..max_iters {
        n_iterations = iteration + 1;

        let new_centroids = update_centroids(data, &labels.view(), &centroids.view());
        let new_labels = find_nearest_centroids(data, &new_centroids.view());

        let changed = new_labels
            .iter()
            .zip(labels.iter())
            .filter(|(a, b)| a != b)
            .count();

        trace!(
            iteration = n_iterations,
            max_iters,
            shift = compute_centroid_shift(&centroids.view(), &new_centroids.view()),
            changed,
            "lloyd iteration"
        );

        centroids = new_centroids;
        labels = new_labels;

        if changed == 0 {
            converged = true;
            break;
        }
    }

    let inertia = compute_inertia(data, &centroids.view(), &labels.view());

    ClusterResult {
        labels,
        centroids,
        n_iterations,
        converged,
        inertia,
    }
}

/// Initialize centroids by sampling `k` distinct data points without replacement
pub(crate) fn initialize_centroids(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Array2<f64> {
    let indices: Vec<usize> = (0..data.nrows()).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    data.select(Axis(0), &selected)
}

/// Recompute each centroid as the mean of its assigned points.
///
/// A centroid with no assigned points keeps its previous coordinates.
pub(crate) fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
    prev_centroids: &ArrayView2<f64>,
) -> Array2<f64> {
    let k = prev_centroids.nrows();
    let n_features = data.ncols();

    let mut sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut counts = vec![0usize; k];

    for (point, &label) in data.outer_iter().zip(labels.iter()) {
        counts[label] += 1;
        let mut sum = sums.row_mut(label);
        sum += &point;
    }

    let mut centroids = prev_centroids.to_owned();
    for (cluster_idx, &count) in counts.iter().enumerate() {
        if count > 0 {
            let mean = &sums.row(cluster_idx) / count as f64;
            centroids.row_mut(cluster_idx).assign(&mean);
        } else {
            trace!(cluster = cluster_idx, "empty cluster keeps previous centroid");
        }
    }

    centroids
}
