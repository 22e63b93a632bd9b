// Multiply validation module
// Cross-validates the two 128-bit multiplication routines against each other

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::mult128::{multiply128_optimized, multiply128_reference, Product128};

/// Signature shared by the two multiplication routines under test
pub type Multiply128Fn = fn(i64, i64) -> Product128;

/// Details of the first operand pair on which the two routines disagreed
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Divergence {
    /// Zero-based index of the failing trial
    pub trial: u64,
    pub a: i64,
    pub b: i64,
    pub reference: Product128,
    pub optimized: Product128,
}

/// Terminal result of a validation run
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationOutcome {
    pub successes: u64,
    pub divergence: Option<Divergence>,
}

impl ValidationOutcome {
    /// Whether every trial agreed
    pub fn passed(&self) -> bool {
        self.divergence.is_none()
    }

    /// Display the outcome in plain text format
    pub fn display(&self) {
        println!("Successes: {}", self.successes);

        if let Some(d) = &self.divergence {
            println!(
                "Failed on a={}, b={} : reference={:#018x}:{:#018x}, optimized={:#018x}:{:#018x}",
                d.a, d.b, d.reference.high, d.reference.low, d.optimized.high, d.optimized.low
            );
            println!("First divergence at trial {}", d.trial);
        }
    }
}

/// Engine for cross-validating two 128-bit multiplication routines
///
/// Draws random 64-bit operand pairs, feeds them through both routines, and
/// stops on the first pair whose products differ. A mismatch in either the
/// high or the low word is a divergence; there is no tolerance, since
/// 128-bit unsigned multiplication has no rounding.
pub struct MultiplyValidator {
    reference: Multiply128Fn,
    optimized: Multiply128Fn,
}

impl MultiplyValidator {
    /// Create a validator over the crate's own routine pair
    pub fn new() -> Self {
        Self {
            reference: multiply128_reference,
            optimized: multiply128_optimized,
        }
    }

    /// Create a validator over caller-supplied routines
    ///
    /// Used by tests to inject a deliberately wrong "optimized" routine and
    /// assert on the recorded counterexample.
    pub fn with_functions(reference: Multiply128Fn, optimized: Multiply128Fn) -> Self {
        Self { reference, optimized }
    }

    /// Run up to `trials` comparisons with an entropy-seeded generator
    pub fn run(&self, trials: u64) -> ValidationOutcome {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(trials, &mut rng)
    }

    /// Run up to `trials` comparisons with a fixed seed, for reproducibility
    pub fn run_seeded(&self, trials: u64, seed: u64) -> ValidationOutcome {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(trials, &mut rng)
    }

    /// Run up to `trials` comparisons, drawing operands from `rng`
    ///
    /// Stops at the first divergence. A divergence is the expected detection
    /// signal, not an error: it is returned as structured data and the
    /// caller decides whether to halt.
    pub fn run_with_rng<R: Rng>(&self, trials: u64, rng: &mut R) -> ValidationOutcome {
        let mut successes = 0u64;

        for trial in 0..trials {
            let a: i64 = rng.gen();
            let b: i64 = rng.gen();

            let reference = (self.reference)(a, b);
            let optimized = (self.optimized)(a, b);

            // Either word differing is a divergence; requiring both to
            // differ would miss single-word bugs.
            if reference != optimized {
                return ValidationOutcome {
                    successes,
                    divergence: Some(Divergence {
                        trial,
                        a,
                        b,
                        reference,
                        optimized,
                    }),
                };
            }

            successes += 1;
        }

        ValidationOutcome {
            successes,
            divergence: None,
        }
    }
}

impl Default for MultiplyValidator {
    fn default() -> Self {
        Self::new()
    }
}

// Tests in tests/validate_tests.rs
