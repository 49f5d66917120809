//! Basic example: cluster the built-in sales dataset
//!
//! Run with: cargo run --example basic

use sales_kmeans::{assemble, cluster, default_records, encode, KMeansConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== sales-kmeans example ===\n");

    let records = default_records();
    let features = encode(records)?;

    println!("Encoded {} records as [condition_code, price]:", records.len());
    for (record, row) in records.iter().zip(features.outer_iter()) {
        println!("  {:<6} -> ({}, {:.0})", record.condition, row[0], row[1]);
    }
    println!();

    for k in 2..=5 {
        let config = KMeansConfig::new(k).with_seed(42).with_n_init(10);
        let result = cluster(&features.view(), &config)?;
        let report = assemble(records, &features.view(), &result);

        println!(
            "k = {}: inertia {:.3e}, {} iterations",
            k, report.inertia, report.n_iterations
        );
        for (centroid, size) in report.centroids.iter().zip(report.cluster_sizes()) {
            println!(
                "  Cluster {}: ({:.2}, {:.0}) with {} records",
                centroid.cluster, centroid.condition_code, centroid.price, size
            );
        }
        println!();
    }

    println!("=== Done! ===");
    Ok(())
}
