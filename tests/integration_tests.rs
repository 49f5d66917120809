use approx::assert_relative_eq;
use ndarray::{array, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sales_kmeans::{
    assemble, cluster, cluster_points, default_records, encode, io, KMeansConfig, KMeansError,
    KMeansInit, Record, SalesKMeans,
};

/// Generate 2-D blobs around well-separated centers
fn generate_clustered_data(n_per_cluster: usize, centers: &[[f64; 2]], seed: u64) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Array2::zeros((n_per_cluster * centers.len(), 2));

    for (c, center) in centers.iter().enumerate() {
        let noise = Array2::random_using((n_per_cluster, 2), Uniform::new(-0.5, 0.5), &mut rng);
        for i in 0..n_per_cluster {
            data[[c * n_per_cluster + i, 0]] = center[0] + noise[[i, 0]];
            data[[c * n_per_cluster + i, 1]] = center[1] + noise[[i, 1]];
        }
    }

    data
}

// ============================================================================
// Shape and label range
// ============================================================================

#[test]
fn test_k_centroids_and_n_labels() {
    let data = Array2::random((30, 2), Uniform::new(0.0, 1_000.0));

    for k in 1..=30 {
        let result = cluster_points(&data.view(), k, 42, 300, 3).unwrap();

        assert_eq!(result.centroids.dim(), (k, 2), "k = {k}");
        assert_eq!(result.labels.len(), 30);
        assert!(result.labels.iter().all(|&l| l < k), "labels must be in [0, {k})");
    }
}

#[test]
fn test_k_equals_one() {
    let data = Array2::random((50, 2), Uniform::new(-1.0, 1.0));
    let result = cluster_points(&data.view(), 1, 0, 100, 1).unwrap();

    assert!(result.labels.iter().all(|&l| l == 0));
    assert!(result.converged);

    let mean = data.mean_axis(Axis(0)).unwrap();
    assert_relative_eq!(result.centroids[[0, 0]], mean[0], epsilon = 1e-9);
    assert_relative_eq!(result.centroids[[0, 1]], mean[1], epsilon = 1e-9);
}

#[test]
fn test_k_equals_n_samples() {
    let data = Array2::random((10, 2), Uniform::new(-1.0, 1.0));
    let result = cluster_points(&data.view(), 10, 7, 100, 1).unwrap();

    let mut labels = result.labels.to_vec();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 10, "each point should get its own cluster");
    assert_relative_eq!(result.inertia, 0.0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_reproducibility_with_seed() {
    let data = Array2::random((200, 2), Uniform::new(0.0, 100.0));
    let config = KMeansConfig::new(4).with_seed(12345);

    let a = cluster(&data.view(), &config).unwrap();
    let b = cluster(&data.view(), &config).unwrap();

    assert_eq!(a.labels, b.labels);
    assert_eq!(a.centroids, b.centroids);
    assert_eq!(a.n_iterations, b.n_iterations);
}

#[test]
fn test_parallel_and_sequential_identical() {
    let data = Array2::random((300, 2), Uniform::new(0.0, 100.0));

    for seed in [0u64, 1, 42, 999] {
        let config = KMeansConfig::new(5).with_seed(seed).with_n_init(8);
        let parallel = cluster(&data.view(), &config.clone().with_parallel(true)).unwrap();
        let sequential = cluster(&data.view(), &config.with_parallel(false)).unwrap();

        assert_eq!(parallel, sequential, "seed {seed}");
        assert_eq!(parallel.inertia.to_bits(), sequential.inertia.to_bits());
    }
}

#[test]
fn test_different_seeds_start_differently() {
    let data = Array2::random((500, 2), Uniform::new(0.0, 1.0));
    let config = KMeansConfig::new(8).with_n_init(1).with_max_iters(0);

    let a = cluster(&data.view(), &config.clone().with_seed(1)).unwrap();
    let b = cluster(&data.view(), &config.with_seed(99_999)).unwrap();

    assert_ne!(a.centroids, b.centroids);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_well_separated_blobs() {
    let centers = [[0.0, 0.0], [50.0, 0.0], [0.0, 50.0]];
    let data = generate_clustered_data(40, &centers, 42);

    let result = cluster_points(&data.view(), 3, 42, 300, 50).unwrap();
    assert!(result.converged);

    // Every blob maps to a single cluster, and the blobs use distinct clusters
    let mut blob_labels = Vec::new();
    for c in 0..3 {
        let first = result.labels[c * 40];
        assert!((0..40).all(|i| result.labels[c * 40 + i] == first));
        blob_labels.push(first);
    }
    blob_labels.sort_unstable();
    blob_labels.dedup();
    assert_eq!(blob_labels.len(), 3);

    // Tight blobs: inertia bounded by 120 points * max squared noise radius
    assert!(result.inertia < 120.0 * 0.5);
}

#[test]
fn test_max_iters_limit_is_reported_not_raised() {
    let data = Array2::random_using(
        (400, 2),
        Uniform::new(0.0, 1.0),
        &mut ChaCha8Rng::seed_from_u64(8),
    );
    let result = cluster_points(&data.view(), 10, 8, 1, 1).unwrap();

    assert!(!result.converged);
    assert_eq!(result.n_iterations, 1);
}

// ============================================================================
// Empty clusters
// ============================================================================

#[test]
fn test_far_initial_centroid_never_moves() {
    let data = array![[0.0, 10.0], [1.0, 12.0], [0.0, 11.0], [1.0, 9.0], [0.0, 30.0]];
    let far = [1.0e12, -1.0e12];
    let initial = array![[0.0, 10.0], [far[0], far[1]], [0.0, 30.0]];

    let config = KMeansConfig::new(3)
        .with_init(KMeansInit::Explicit(initial))
        .with_n_init(1);
    let result = cluster(&data.view(), &config).unwrap();

    assert_eq!(result.centroids.nrows(), 3);
    assert_eq!(result.centroids[[1, 0]], far[0]);
    assert_eq!(result.centroids[[1, 1]], far[1]);
    assert!(result.labels.iter().all(|&l| l != 1));
}

#[test]
fn test_duplicate_points_do_not_crash() {
    let data = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
    let result = cluster_points(&data.view(), 3, 42, 50, 5).unwrap();

    assert_eq!(result.centroids.nrows(), 3);
    assert!(result.centroids.iter().all(|v| v.is_finite()));
    // Ties go to the lowest centroid index
    assert!(result.labels.iter().all(|&l| l == 0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_input() {
    let data = Array2::<f64>::zeros((0, 2));
    assert!(matches!(
        cluster_points(&data.view(), 1, 42, 300, 10),
        Err(KMeansError::EmptyInput)
    ));
}

#[test]
fn test_k_zero() {
    let data = array![[0.0, 1.0], [1.0, 2.0]];
    assert!(matches!(
        cluster_points(&data.view(), 0, 42, 300, 10),
        Err(KMeansError::InvalidClusterCount { k: 0, .. })
    ));
}

#[test]
fn test_k_greater_than_n() {
    let data = array![[0.0, 1.0], [1.0, 2.0]];
    assert!(matches!(
        cluster_points(&data.view(), 3, 42, 300, 10),
        Err(KMeansError::InvalidClusterCount { k: 3, n_samples: 2 })
    ));
}

// ============================================================================
// Sales pipeline
// ============================================================================

#[test]
fn test_sales_pipeline_separates_by_price() {
    let records = default_records();
    let features = encode(records).unwrap();

    let config = KMeansConfig::new(2).with_seed(42);
    let result = cluster(&features.view(), &config).unwrap();
    let report = assemble(records, &features.view(), &result);

    let cluster_of = |price: f64| {
        report
            .records
            .iter()
            .find(|r| r.price == price)
            .map(|r| r.cluster)
            .unwrap()
    };

    let high = cluster_of(500_000.0);
    let low = cluster_of(40_000.0);
    assert_ne!(high, low);
    assert_eq!(cluster_of(300_000.0), high);
    for price in [150_000.0, 100_000.0, 80_000.0, 120_000.0] {
        assert_eq!(cluster_of(price), low, "price {price}");
    }

    // The high-price centroid sits above the low-price one
    assert!(report.centroids[high].price > report.centroids[low].price);
    assert_eq!(report.cluster_sizes().iter().sum::<usize>(), 8);
}

#[test]
fn test_sales_pipeline_from_csv() {
    let csv = "Kondisi Barang,Harga Barang (IDR)\n\
               Baru,150000\nBekas,80000\nBaru,250000\nBekas,120000\n\
               Baru,500000\nBekas,300000\nBaru,100000\nBekas,40000\n";
    let records = io::read_records(csv.as_bytes()).unwrap();
    assert_eq!(records, default_records().to_vec());

    let features = encode(&records).unwrap();
    let mut model = SalesKMeans::with_config(KMeansConfig::new(3));
    let labels = model.fit_predict(&features.view()).unwrap();

    // predict on the training data reproduces the fitted labels
    let predicted = model.predict(&features.view()).unwrap();
    assert_eq!(labels, predicted);

    let report = assemble(&records, &features.view(), model.result().unwrap());
    let ids: Vec<usize> = report.centroids.iter().map(|c| c.cluster).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_encoding_is_binary() {
    let records = vec![
        Record::new("Baru", 1.0),
        Record::new("BARU", 2.0),
        Record::new("baru", 3.0),
        Record::new("Bekas", 4.0),
        Record::new("refurbished", 5.0),
    ];
    let features = encode(&records).unwrap();
    assert_eq!(features.column(0).to_vec(), vec![1.0, 1.0, 1.0, 0.0, 0.0]);
    assert_eq!(features.column(1).to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_malformed_csv_price_fails_fast() {
    let csv = "condition,price\nBaru,150000\nBekas,Rp 80000\nBaru,n/a\n";
    match io::read_records(csv.as_bytes()) {
        Err(KMeansError::MalformedInput { row, .. }) => assert_eq!(row, 2),
        other => panic!("Expected MalformedInput, got {:?}", other),
    }
}
