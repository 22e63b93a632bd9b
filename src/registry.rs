// Hash algorithm registry module
// Resolves stable string keys to pluggable hash implementations

use super::error::HashSweepError;

use blake2::{Blake2b512, Blake2s256};
use blake3::Hasher as Blake3Hasher;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;
use xxhash_rust::xxh3::Xxh3;
use xxhash_rust::xxh64::Xxh64;

/// Trait for hash algorithm implementations
pub trait Hasher: Send + std::fmt::Debug {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

/// Information about a hash algorithm
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub output_bits: usize,
    pub cryptographic: bool,
}

// Adapter for any RustCrypto digest (MD5, SHA-1/2/3, BLAKE2)
struct DigestHasher<D: Digest>(D);

impl<D: Digest> std::fmt::Debug for DigestHasher<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DigestHasher")
    }
}

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

// BLAKE3 wrapper
#[derive(Debug)]
struct Blake3Wrapper(Blake3Hasher);

impl Hasher for Blake3Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        32 // 256 bits
    }
}

// XXH3 wrapper (64-bit non-cryptographic hash)
struct Xxh3Wrapper(Xxh3);

impl std::fmt::Debug for Xxh3Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Xxh3Wrapper")
    }
}

impl Hasher for Xxh3Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.digest().to_le_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        8 // 64 bits
    }
}

// XXH64 wrapper (64-bit non-cryptographic hash, classic variant)
struct Xxh64Wrapper(Xxh64);

impl std::fmt::Debug for Xxh64Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Xxh64Wrapper")
    }
}

impl Hasher for Xxh64Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.digest().to_le_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        8 // 64 bits
    }
}

// XXH128 wrapper (128-bit non-cryptographic hash)
struct Xxh128Wrapper(Xxh3);

impl std::fmt::Debug for Xxh128Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Xxh128Wrapper")
    }
}

impl Hasher for Xxh128Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.digest128().to_le_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        16 // 128 bits
    }
}

/// Registry for hash algorithms
pub struct HashRegistry;

impl HashRegistry {
    /// Get a hasher instance for the specified algorithm
    pub fn get_hasher(algorithm: &str) -> Result<Box<dyn Hasher>, HashSweepError> {
        let alg_lower = algorithm.to_lowercase();

        match alg_lower.as_str() {
            "md5" => Ok(Box::new(DigestHasher(Md5::new()))),
            "sha1" => Ok(Box::new(DigestHasher(Sha1::new()))),
            "sha256" | "sha-256" => Ok(Box::new(DigestHasher(Sha256::new()))),
            "sha512" | "sha-512" => Ok(Box::new(DigestHasher(Sha512::new()))),
            "sha3-256" => Ok(Box::new(DigestHasher(Sha3_256::new()))),
            "blake2b" | "blake2b-512" => Ok(Box::new(DigestHasher(Blake2b512::new()))),
            "blake2s" | "blake2s-256" => Ok(Box::new(DigestHasher(Blake2s256::new()))),
            "blake3" => Ok(Box::new(Blake3Wrapper(Blake3Hasher::new()))),
            "xxh3" => Ok(Box::new(Xxh3Wrapper(Xxh3::new()))),
            "xxh64" => Ok(Box::new(Xxh64Wrapper(Xxh64::new(0)))),
            "xxh128" => Ok(Box::new(Xxh128Wrapper(Xxh3::new()))),
            _ => Err(HashSweepError::UnsupportedAlgorithm {
                algorithm: algorithm.to_string(),
            }),
        }
    }

    /// Check that an algorithm key resolves, without building a hasher
    pub fn validate_algorithm(algorithm: &str) -> Result<(), HashSweepError> {
        Self::get_hasher(algorithm).map(|_| ())
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        vec![
            AlgorithmInfo {
                name: "md5".to_string(),
                output_bits: 128,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "sha1".to_string(),
                output_bits: 160,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "sha256".to_string(),
                output_bits: 256,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "sha512".to_string(),
                output_bits: 512,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "sha3-256".to_string(),
                output_bits: 256,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "blake2b-512".to_string(),
                output_bits: 512,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "blake2s-256".to_string(),
                output_bits: 256,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "blake3".to_string(),
                output_bits: 256,
                cryptographic: true,
            },
            AlgorithmInfo {
                name: "xxh3".to_string(),
                output_bits: 64,
                cryptographic: false,
            },
            AlgorithmInfo {
                name: "xxh64".to_string(),
                output_bits: 64,
                cryptographic: false,
            },
            AlgorithmInfo {
                name: "xxh128".to_string(),
                output_bits: 128,
                cryptographic: false,
            },
        ]
    }
}

// Tests in tests/registry_tests.rs
