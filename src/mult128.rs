// 128-bit multiplication primitives
// Two independent 64x64 -> 128 routines used inside multiplicative hashes

/// Full 128-bit product of two 64-bit values, split into two 64-bit words.
///
/// Both words are unsigned. Signed operands are reinterpreted as
/// two's-complement unsigned values before multiplication, so equality on
/// `Product128` never compares sign-extended quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Product128 {
    pub high: u64,
    pub low: u64,
}

/// Compute the 128-bit product with schoolbook 32-bit limb decomposition.
///
/// This is the portable routine: each operand is split into 32-bit halves and
/// the four partial products are recombined with explicit carry propagation.
pub fn multiply128_reference(a: i64, b: i64) -> Product128 {
    let a = a as u64;
    let b = b as u64;

    let a_lo = a & 0xFFFF_FFFF;
    let a_hi = a >> 32;
    let b_lo = b & 0xFFFF_FFFF;
    let b_hi = b >> 32;

    // 32x32 -> 64 partial products cannot overflow u64
    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // mid collects the carries into bit positions 32..96
    let mid = (ll >> 32) + (lh & 0xFFFF_FFFF) + (hl & 0xFFFF_FFFF);

    let low = (mid << 32) | (ll & 0xFFFF_FFFF);
    let high = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);

    Product128 { high, low }
}

/// Compute the 128-bit product via the native widening multiply.
pub fn multiply128_optimized(a: i64, b: i64) -> Product128 {
    let wide = (a as u64 as u128) * (b as u64 as u128);

    Product128 {
        high: (wide >> 64) as u64,
        low: wide as u64,
    }
}

// Tests in tests/mult128_tests.rs
