// Tests for the load-generating benchmark driver

use std::time::Duration;

use hashsweep::{
    calculate_throughput, generate_test_data, BenchmarkDriver, HashLoadDriver, RunConfig,
};

fn run_config(algorithm: &str, threads: usize, dir: &std::path::Path) -> RunConfig {
    RunConfig {
        algorithm: algorithm.to_string(),
        thread_count: threads,
        ramp_up: Duration::from_millis(0),
        steady_state: Duration::from_millis(100),
        ramp_down: Duration::from_millis(0),
        memory_limit_mb: 200,
        output_dir: dir.to_path_buf(),
    }
}

#[test]
fn test_generate_test_data() {
    let data = generate_test_data(1024);
    assert_eq!(data.len(), 1024);
}

#[test]
fn test_generate_test_data_exact_pattern() {
    let pattern = b"The quick brown fox jumps over the lazy dog. ";
    let data = generate_test_data(pattern.len());
    assert_eq!(&data[..], pattern);
}

#[test]
fn test_generate_test_data_partial_pattern() {
    let data = generate_test_data(50);
    assert_eq!(data.len(), 50);
}

#[test]
fn test_calculate_throughput() {
    let one_mb = 1024 * 1024;
    assert_eq!(calculate_throughput(100 * one_mb, Duration::from_secs(1)), 100.0);
    assert_eq!(calculate_throughput(100 * one_mb, Duration::from_secs(2)), 50.0);
}

#[test]
fn test_calculate_throughput_subsecond() {
    let one_mb = 1024 * 1024;
    assert_eq!(calculate_throughput(100 * one_mb, Duration::from_millis(500)), 200.0);
}

#[test]
fn test_calculate_throughput_zero_duration() {
    assert_eq!(calculate_throughput(1024, Duration::from_secs(0)), 0.0);
}

#[test]
fn test_short_run_counts_operations() {
    let dir = tempfile::tempdir().unwrap();
    let config = run_config("xxh3", 2, dir.path());

    let outcome = HashLoadDriver::new().run(&config).unwrap();

    assert!(outcome.operations > 0);
    assert_eq!(outcome.bytes_hashed, outcome.operations * 128);
    assert!(outcome.throughput_mbps > 0.0);
}

#[test]
fn test_run_writes_summary_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = run_config("sha256", 1, dir.path());

    HashLoadDriver::new().run(&config).unwrap();

    let summary = std::fs::read_to_string(dir.path().join("summary.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(parsed["algorithm"], "sha256");
    assert_eq!(parsed["thread_count"], 1);
    assert_eq!(parsed["memory_limit_mb"], 200);
}

#[test]
fn test_zero_duration_run_completes_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = run_config("xxh3", 1, dir.path());
    config.steady_state = Duration::from_millis(0);

    let outcome = HashLoadDriver::new().run(&config).unwrap();

    assert_eq!(outcome.operations, 0);
    assert_eq!(outcome.throughput_mbps, 0.0);
}

#[test]
fn test_unknown_algorithm_fails_before_spawning_workers() {
    let dir = tempfile::tempdir().unwrap();
    let config = run_config("jenkins", 4, dir.path());

    assert!(HashLoadDriver::new().run(&config).is_err());
    // Pre-flight failure means no output directory contents either
    assert!(!dir.path().join("summary.json").exists());
}

#[test]
fn test_rerunning_same_config_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = run_config("xxh3", 1, dir.path());

    let driver = HashLoadDriver::new();
    let first = driver.run(&config).unwrap();
    let second = driver.run(&config).unwrap();

    // Stateless across invocations: both runs complete and the summary
    // reflects the latest run only
    assert!(first.operations > 0);
    assert!(second.operations > 0);
    assert!(dir.path().join("summary.json").exists());
}
