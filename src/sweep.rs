// Sweep orchestration module
// Enumerates the thread-count x algorithm matrix and drives one benchmark
// run per combination

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use indicatif::{ProgressBar, ProgressStyle};

use super::driver::{serialize_duration, BenchmarkDriver, HashLoadDriver, RunOutcome};
use super::error::HashSweepError;
use super::registry::HashRegistry;

// Defaults carried over from the original harness
const DEFAULT_PHASE_SECS: u64 = 10;
const DEFAULT_MEMORY_LIMIT_MB: u64 = 200;

/// Shared parameters for a whole sweep
#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepConfig {
    /// Outer iteration order: all algorithms run at one concurrency level
    /// before the next level starts
    pub thread_counts: Vec<usize>,
    pub algorithms: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub ramp_up: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub steady_state: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub ramp_down: Duration,
    pub memory_limit_mb: u64,
    pub output_dir: PathBuf,
    /// Upper bound on a single driver invocation; None waits indefinitely
    pub run_timeout: Option<Duration>,
}

impl SweepConfig {
    /// Create a sweep configuration with the original harness defaults
    /// (10s phases, 200MB memory limit)
    pub fn new(thread_counts: Vec<usize>, algorithms: Vec<String>, output_dir: PathBuf) -> Self {
        Self {
            thread_counts,
            algorithms,
            ramp_up: Duration::from_secs(DEFAULT_PHASE_SECS),
            steady_state: Duration::from_secs(DEFAULT_PHASE_SECS),
            ramp_down: Duration::from_secs(DEFAULT_PHASE_SECS),
            memory_limit_mb: DEFAULT_MEMORY_LIMIT_MB,
            output_dir,
            run_timeout: None,
        }
    }
}

/// One point in the sweep matrix, consumed by a single driver invocation
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunConfig {
    pub algorithm: String,
    pub thread_count: usize,
    #[serde(serialize_with = "serialize_duration")]
    pub ramp_up: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub steady_state: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub ramp_down: Duration,
    pub memory_limit_mb: u64,
    /// Write target owned solely by this run
    pub output_dir: PathBuf,
}

/// Terminal state of one matrix point
///
/// A run moves Configured -> Running -> {Completed, Failed}; only the
/// terminal state is recorded. No retries are performed.
#[derive(Debug, Clone, serde::Serialize)]
pub enum RunStatus {
    Completed(RunOutcome),
    Failed { reason: String },
}

/// Outcome of one (thread count, algorithm) combination
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunRecord {
    pub algorithm: String,
    pub thread_count: usize,
    pub status: RunStatus,
}

/// Report of a full sweep across the matrix
#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepReport {
    pub runs: Vec<RunRecord>,
}

impl SweepReport {
    /// Number of combinations that completed normally
    pub fn completed(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.status, RunStatus::Completed(_)))
            .count()
    }

    /// Number of combinations that failed or timed out
    pub fn failed(&self) -> usize {
        self.runs.len() - self.completed()
    }

    /// Display the sweep report in plain text format
    pub fn display(&self) {
        println!("\n=== Sweep Report ===\n");

        println!("Summary:");
        println!("  Combinations: {}", self.runs.len());
        println!("  Completed:    {}", self.completed());
        println!("  Failed:       {}", self.failed());

        println!("\nRuns:");
        for record in &self.runs {
            match &record.status {
                RunStatus::Completed(outcome) => {
                    println!(
                        "  {} @ {} thread(s): {} ops, {:.2} MB/s",
                        record.algorithm,
                        record.thread_count,
                        outcome.operations,
                        outcome.throughput_mbps
                    );
                }
                RunStatus::Failed { reason } => {
                    println!(
                        "  {} @ {} thread(s): FAILED - {}",
                        record.algorithm, record.thread_count, reason
                    );
                }
            }
        }
    }
}

/// Engine for executing a benchmark sweep over the parameter matrix
///
/// Matrix points run strictly serially: each run consumes the full
/// configured resource envelope, so overlapping two points would corrupt
/// both measurements. Concurrency exists only inside a single run.
pub struct SweepOrchestrator {
    config: SweepConfig,
    driver: Arc<dyn BenchmarkDriver>,
}

impl SweepOrchestrator {
    /// Create an orchestrator backed by the in-process load driver
    pub fn new(config: SweepConfig) -> Self {
        Self::with_driver(config, Arc::new(HashLoadDriver::new()))
    }

    /// Create an orchestrator with a caller-supplied driver
    ///
    /// Used by tests to substitute a fake driver with deterministic
    /// outcomes or simulated failures.
    pub fn with_driver(config: SweepConfig, driver: Arc<dyn BenchmarkDriver>) -> Self {
        Self { config, driver }
    }

    /// Enumerate the matrix in nested order: outer loop over thread counts,
    /// inner loop over algorithms
    ///
    /// Each run gets its own output subdirectory, so no two runs ever share
    /// a write target.
    pub fn enumerate(&self) -> Vec<RunConfig> {
        let mut runs = Vec::with_capacity(self.config.thread_counts.len() * self.config.algorithms.len());

        for &thread_count in &self.config.thread_counts {
            for algorithm in &self.config.algorithms {
                runs.push(RunConfig {
                    algorithm: algorithm.clone(),
                    thread_count,
                    ramp_up: self.config.ramp_up,
                    steady_state: self.config.steady_state,
                    ramp_down: self.config.ramp_down,
                    memory_limit_mb: self.config.memory_limit_mb,
                    output_dir: self
                        .config
                        .output_dir
                        .join(format!("{}-t{}", algorithm, thread_count)),
                });
            }
        }

        runs
    }

    /// Execute the full sweep, one driver invocation per matrix point
    ///
    /// A failing run is recorded and the sweep proceeds to the remaining
    /// combinations; only conditions under which no combination could
    /// succeed (bad configuration, unknown algorithm, unusable output
    /// directory) abort the sweep before any run.
    pub fn execute(&self) -> Result<SweepReport, HashSweepError> {
        if self.config.thread_counts.is_empty() {
            return Err(HashSweepError::InvalidConfiguration {
                message: "thread count list is empty".to_string(),
            });
        }
        if self.config.algorithms.is_empty() {
            return Err(HashSweepError::InvalidConfiguration {
                message: "algorithm list is empty".to_string(),
            });
        }
        if let Some(&bad) = self.config.thread_counts.iter().find(|&&t| t == 0) {
            return Err(HashSweepError::InvalidConfiguration {
                message: format!("thread count must be positive, got {}", bad),
            });
        }

        // Fatal pre-flight: every algorithm must resolve before any run
        for algorithm in &self.config.algorithms {
            HashRegistry::validate_algorithm(algorithm)?;
        }

        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            HashSweepError::from_io_error(
                e,
                "creating sweep output directory",
                Some(self.config.output_dir.clone()),
            )
        })?;

        let runs = self.enumerate();

        let progress = if std::io::stdout().is_terminal() {
            let pb = ProgressBar::new(runs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut records = Vec::with_capacity(runs.len());
        for run in runs {
            progress.set_message(format!("Running: {} @ {} thread(s)", run.algorithm, run.thread_count));

            let status = match self.invoke(&run) {
                Ok(outcome) => RunStatus::Completed(outcome),
                Err(e) => RunStatus::Failed {
                    reason: e.to_string(),
                },
            };

            records.push(RunRecord {
                algorithm: run.algorithm,
                thread_count: run.thread_count,
                status,
            });
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(SweepReport { runs: records })
    }

    // Invoke the driver for one matrix point, bounded by the configured
    // per-run timeout
    fn invoke(&self, run: &RunConfig) -> Result<RunOutcome, HashSweepError> {
        let timeout = match self.config.run_timeout {
            Some(timeout) => timeout,
            None => return self.driver.run(run),
        };

        let (tx, rx) = bounded(1);
        let driver = Arc::clone(&self.driver);
        let run_config = run.clone();

        thread::spawn(move || {
            let _ = tx.send(driver.run(&run_config));
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                // The abandoned driver thread keeps running detached; its
                // output directory is never reused by a later run
                Err(HashSweepError::RunTimedOut {
                    algorithm: run.algorithm.clone(),
                    thread_count: run.thread_count,
                    seconds: timeout.as_secs(),
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(HashSweepError::RunFailed {
                algorithm: run.algorithm.clone(),
                thread_count: run.thread_count,
                reason: "driver thread terminated without reporting".to_string(),
            }),
        }
    }
}

// Tests in tests/sweep_tests.rs
