use ndarray::Array2;

/// How initial centroids are chosen for each run
#[derive(Debug, Clone, Default, PartialEq)]
pub enum KMeansInit {
    /// Sample `k` distinct data points uniformly, seeded by `seed + run_index`.
    #[default]
    Random,

    /// Start every run from these centroids, shape `(k, n_features)`.
    Explicit(Array2<f64>),
}

/// Configuration for the clustering engine
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of update steps per run. Hitting the limit is reported
    /// through `ClusterResult::converged`, not as an error.
    pub max_iters: usize,

    /// Base random seed. Run `r` uses `seed + r`.
    pub seed: u64,

    /// Number of independent runs; the one with the lowest inertia is kept
    pub n_init: usize,

    /// Centroid initialization policy
    pub init: KMeansInit,

    /// Execute the `n_init` runs on the rayon thread pool.
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iters: 300,
            seed: 42,
            n_init: 10,
            init: KMeansInit::Random,
            parallel: true,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of independent runs
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the initialization policy
    pub fn with_init(mut self, init: KMeansInit) -> Self {
        self.init = init;
        self
    }

    /// Toggle parallel execution of the independent runs
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
