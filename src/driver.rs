// Benchmark driver module
// Load generation against a registry hasher, phased into ramp-up,
// steady-state, and ramp-down windows

use std::fs::{self, File};
use std::io::BufWriter;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;

use super::error::HashSweepError;
use super::registry::{HashRegistry, Hasher};
use super::sweep::RunConfig;

// Payload hashed by each benchmark operation
const PAYLOAD_SIZE: usize = 128;

// Helper function to serialize Duration as seconds
pub(crate) fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Measured result of a single benchmark run
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunOutcome {
    /// Operations completed inside the steady-state window
    pub operations: u64,
    pub bytes_hashed: u64,
    pub throughput_mbps: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub steady_state: Duration,
}

/// Capability of executing one benchmark run to completion
///
/// The sweep orchestrator is written against this trait so tests can
/// substitute a fake driver returning deterministic outcomes or simulated
/// failures.
pub trait BenchmarkDriver: Send + Sync {
    /// Execute the run described by `config`, blocking until it finishes
    fn run(&self, config: &RunConfig) -> Result<RunOutcome, HashSweepError>;
}

/// Generate deterministic test data of the specified size
pub fn generate_test_data(size: usize) -> Vec<u8> {
    let pattern = b"The quick brown fox jumps over the lazy dog. ";
    let mut data = Vec::with_capacity(size);

    while data.len() < size {
        let remaining = size - data.len();
        let chunk = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk]);
    }

    data
}

/// Calculate throughput in MB/s from bytes processed and elapsed time
pub fn calculate_throughput(bytes: u64, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    bytes as f64 / (1024.0 * 1024.0) / secs
}

// Per-run record written into the run's output directory
#[derive(Debug, serde::Serialize)]
struct RunSummary<'a> {
    algorithm: &'a str,
    thread_count: usize,
    ramp_up_secs: f64,
    steady_state_secs: f64,
    ramp_down_secs: f64,
    /// Advisory for an in-process driver; recorded, not enforced
    memory_limit_mb: u64,
    operations: u64,
    bytes_hashed: u64,
    throughput_mbps: f64,
}

/// In-process load-generating benchmark driver
///
/// Spawns exactly `thread_count` worker threads. Each worker repeatedly
/// hashes a fixed 128-byte payload through a fresh hasher from the registry.
/// All three phases run the same load; only operations completing inside the
/// steady-state window are counted, so startup and shutdown transients never
/// contaminate the measurement.
pub struct HashLoadDriver;

impl HashLoadDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HashLoadDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkDriver for HashLoadDriver {
    fn run(&self, config: &RunConfig) -> Result<RunOutcome, HashSweepError> {
        // Resolve the algorithm up front so a bad key fails before any
        // threads are spawned
        HashRegistry::validate_algorithm(&config.algorithm)?;

        fs::create_dir_all(&config.output_dir).map_err(|e| {
            HashSweepError::from_io_error(e, "creating run output directory", Some(config.output_dir.clone()))
        })?;

        let payload = generate_test_data(PAYLOAD_SIZE);

        let ramp_up_end = config.ramp_up;
        let steady_end = config.ramp_up + config.steady_state;
        let run_end = steady_end + config.ramp_down;

        let (tx, rx) = bounded::<Result<u64, String>>(config.thread_count);
        let start = Instant::now();

        let mut handles = Vec::with_capacity(config.thread_count);
        for _ in 0..config.thread_count {
            let tx = tx.clone();
            let payload = payload.clone();
            let algorithm = config.algorithm.clone();

            handles.push(thread::spawn(move || {
                let mut ops = 0u64;

                loop {
                    let elapsed = start.elapsed();
                    if elapsed >= run_end {
                        break;
                    }

                    let mut hasher = match HashRegistry::get_hasher(&algorithm) {
                        Ok(h) => h,
                        Err(e) => {
                            let _ = tx.send(Err(e.to_string()));
                            return;
                        }
                    };
                    hasher.update(&payload);
                    let _digest = hasher.finalize();

                    // Only steady-state operations count
                    if elapsed >= ramp_up_end && elapsed < steady_end {
                        ops += 1;
                    }
                }

                let _ = tx.send(Ok(ops));
            }));
        }
        drop(tx);

        // Collect per-worker counts; the channel closes once every worker
        // has reported, so this cannot outlive the run
        let mut operations = 0u64;
        let mut worker_error: Option<String> = None;
        for result in rx.iter() {
            match result {
                Ok(ops) => operations += ops,
                Err(reason) => worker_error = Some(reason),
            }
        }

        for handle in handles {
            let _ = handle.join();
        }

        if let Some(reason) = worker_error {
            return Err(HashSweepError::RunFailed {
                algorithm: config.algorithm.clone(),
                thread_count: config.thread_count,
                reason,
            });
        }

        let bytes_hashed = operations * PAYLOAD_SIZE as u64;
        let throughput_mbps = calculate_throughput(bytes_hashed, config.steady_state);

        let summary = RunSummary {
            algorithm: &config.algorithm,
            thread_count: config.thread_count,
            ramp_up_secs: config.ramp_up.as_secs_f64(),
            steady_state_secs: config.steady_state.as_secs_f64(),
            ramp_down_secs: config.ramp_down.as_secs_f64(),
            memory_limit_mb: config.memory_limit_mb,
            operations,
            bytes_hashed,
            throughput_mbps,
        };

        let summary_path = config.output_dir.join("summary.json");
        let file = File::create(&summary_path).map_err(|e| {
            HashSweepError::from_io_error(e, "creating run summary", Some(summary_path.clone()))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &summary).map_err(|e| {
            HashSweepError::RunFailed {
                algorithm: config.algorithm.clone(),
                thread_count: config.thread_count,
                reason: format!("failed to write summary: {}", e),
            }
        })?;

        Ok(RunOutcome {
            operations,
            bytes_hashed,
            throughput_mbps,
            steady_state: config.steady_state,
        })
    }
}

// Tests in tests/driver_tests.rs
