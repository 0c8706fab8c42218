//! Number-theory helpers shared by the generators.
//!
//! Single implementations only; every generator and verifier goes through
//! these rather than carrying a private copy.

/// Greatest common divisor by iterative Euclid, over absolute values.
///
/// `gcd(0, 0)` is defined as 0.
#[must_use]
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Least common multiple; `lcm(0, _)` is defined as 0.
#[must_use]
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a * b).abs() / gcd(a, b)
}

/// Trial-division primality test, skipping even divisors after 2.
#[must_use]
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Prime factors of `n` in ascending order, with multiplicity.
///
/// Empty for `n < 2`. Trial-divides by 2 and then odd candidates while
/// `d * d <= n`, appending the remaining cofactor when it exceeds 1.
#[must_use]
pub fn prime_factors(n: i64) -> Vec<i64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut remaining = n;
    while remaining % 2 == 0 {
        factors.push(2);
        remaining /= 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= remaining {
        while remaining % divisor == 0 {
            factors.push(divisor);
            remaining /= divisor;
        }
        divisor += 2;
    }
    if remaining > 1 {
        factors.push(remaining);
    }
    factors
}

/// Half-up rounding to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
