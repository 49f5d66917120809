use crate::algorithm::{lloyd_run, validate_inputs, ClusterResult};
use crate::config::{KMeansConfig, KMeansInit};
use crate::distance::find_nearest_centroids;
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView2};
use rayon::prelude::*;
use tracing::{info, warn};

/// Cluster `points` into `config.k` groups.
///
/// Runs `config.n_init` independent seeded Lloyd's runs and keeps the one
/// with the lowest inertia (lowest run index on ties). When
/// `config.parallel` is set the runs execute on the rayon pool; the result is
/// identical to sequential execution.
///
/// # Errors
///
/// - `EmptyInput` if `points` has no rows
/// - `InvalidClusterCount` if `k` is outside `[1, n_samples]`
/// - `InvalidConfig` if `n_init` is 0 or an explicit initial centroid is not finite
/// - `MalformedInput` if a coordinate is not finite
/// - `InvalidDimensions` if explicit initial centroids have the wrong shape
pub fn cluster(points: &ArrayView2<f64>, config: &KMeansConfig) -> Result<ClusterResult, KMeansError> {
    validate_inputs(points, config)?;

    if matches!(config.init, KMeansInit::Explicit(_)) && config.n_init > 1 {
        warn!(
            n_init = config.n_init,
            "explicit initial centroids make every run identical"
        );
    }

    let runs: Vec<ClusterResult> = if config.parallel {
        (0..config.n_init)
            .into_par_iter()
            .map(|run| lloyd_run(points, config, run))
            .collect()
    } else {
        (0..config.n_init)
            .map(|run| lloyd_run(points, config, run))
            .collect()
    };

    let mut best_run = 0;
    for (run, result) in runs.iter().enumerate().skip(1) {
        if result.inertia < runs[best_run].inertia {
            best_run = run;
        }
    }

    let best = runs
        .into_iter()
        .nth(best_run)
        .ok_or_else(|| KMeansError::InvalidConfig("no clustering run was executed".to_string()))?;

    info!(
        k = config.k,
        n_samples = points.nrows(),
        best_run,
        inertia = best.inertia,
        iterations = best.n_iterations,
        converged = best.converged,
        "k-means finished"
    );

    Ok(best)
}

/// Positional form of [`cluster`] using random initialization.
pub fn cluster_points(
    points: &ArrayView2<f64>,
    k: usize,
    seed: u64,
    max_iters: usize,
    n_init: usize,
) -> Result<ClusterResult, KMeansError> {
    let config = KMeansConfig::new(k)
        .with_seed(seed)
        .with_max_iters(max_iters)
        .with_n_init(n_init);

    cluster(points, &config)
}

/// k-means model with a fit / predict interface.
///
/// # Example
///
/// ```
/// use sales_kmeans::SalesKMeans;
/// use ndarray::array;
///
/// let data = array![[1.0, 150_000.0], [0.0, 80_000.0], [1.0, 500_000.0], [0.0, 40_000.0]];
///
/// let mut kmeans = SalesKMeans::new(2);
/// let labels = kmeans.fit_predict(&data.view()).unwrap();
/// assert_eq!(labels.len(), 4);
/// ```
pub struct SalesKMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features seen at fit time (0 before the first fit)
    d: usize,

    /// Result of the last fit
    result: Option<ClusterResult>,
}

impl SalesKMeans {
    /// Create a model with the default configuration and `k` clusters.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a model with a custom configuration.
    ///
    /// The configuration is validated against the data in [`fit`](Self::fit).
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            d: 0,
            result: None,
        }
    }

    /// Fit the model to `data` of shape `(n_samples, n_features)`.
    ///
    /// Refitting replaces the previous result; the feature count may change
    /// between fits.
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self, KMeansError> {
        let result = cluster(data, &self.config)?;

        self.d = data.ncols();
        self.result = Some(result);
        Ok(self)
    }

    /// Assign each row of `data` to its nearest fitted centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let result = self.result.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        Ok(find_nearest_centroids(data, &result.centroids.view()))
    }

    /// Fit the model and return the labels of the training data.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.fit(data)?;
        let result = self.result.as_ref().ok_or(KMeansError::NotFitted)?;
        Ok(result.labels.clone())
    }

    /// Centroids of the fitted model, `None` before fitting.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.result.as_ref().map(|r| &r.centroids)
    }

    /// Full result of the last fit.
    pub fn result(&self) -> Option<&ClusterResult> {
        self.result.as_ref()
    }

    /// Consume the model and return the last fit.
    pub fn into_result(self) -> Option<ClusterResult> {
        self.result
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Number of features seen at fit time, 0 before fitting.
    pub fn d(&self) -> usize {
        self.d
    }

    /// The model configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
