// Library module for hashsweep
// Re-exports modules for use in integration tests and external crates

pub mod driver;
pub mod error;
pub mod mult128;
pub mod registry;
pub mod sweep;
pub mod validate;

// Re-export commonly used types for convenience
pub use driver::{
    calculate_throughput, generate_test_data, BenchmarkDriver, HashLoadDriver, RunOutcome,
};
pub use error::HashSweepError;
pub use mult128::{multiply128_optimized, multiply128_reference, Product128};
pub use registry::{AlgorithmInfo, HashRegistry, Hasher};
pub use sweep::{RunConfig, RunRecord, RunStatus, SweepConfig, SweepOrchestrator, SweepReport};
pub use validate::{Divergence, MultiplyValidator, ValidationOutcome};
