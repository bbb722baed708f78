// Copyright 2025 Tyler Neely (tylerneely@gmail.com).
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.
//
// See http://creativecommons.org/licenses/MIT/ for more information.

//! Prime factorization of 128-bit integers.
//!
//! Convergents of near-irrational targets routinely carry numerators and
//! denominators around 2^52, and the lattice and superparticular searches
//! multiply those by thousands. Small factors are stripped by trial division,
//! whatever remains is split with Pollard's rho and certified with a
//! Miller-Rabin test. Anything that fits in 64 bits goes through `u128`
//! products; wider numbers fall back to shift-and-add modular products.

use num_integer::Integer;

/// Primes used for trial division before falling back to Pollard's rho.
const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Witnesses that make Miller-Rabin deterministic for every `u64`.
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Witnesses for wider numbers: deterministic below 3.3 * 10^24, and with
/// no known counterexample above.
const WIDE_MILLER_RABIN_BASES: [u128; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Largest bound [`is_smooth`] checks by trial division alone.
const TRIAL_BOUND: u64 = 1 << 12;

/// Decompose `n` into `(prime, exponent)` pairs, sorted by prime.
///
/// `0` and `1` have no prime factors and yield an empty list.
pub fn factorize(n: u128) -> Vec<(u128, u32)> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut rest = n;
    for &p in SMALL_PRIMES.iter() {
        let p = u128::from(p);
        if p * p > rest {
            break;
        }
        let mut exponent = 0;
        while rest % p == 0 {
            rest /= p;
            exponent += 1;
        }
        if exponent > 0 {
            factors.push((p, exponent));
        }
    }

    if rest > 1 {
        let mut large = Vec::new();
        split(rest, &mut large);
        large.sort_unstable();
        for p in large {
            match factors.last_mut() {
                Some((last, exponent)) if *last == p => *exponent += 1,
                _ => factors.push((p, 1)),
            }
        }
    }

    factors
}

/// The largest prime dividing `n`, or `None` for `0` and `1`.
pub fn max_prime_factor(n: u128) -> Option<u128> {
    factorize(n).last().map(|&(p, _)| p)
}

/// The smallest prime dividing `n`, or `None` for `0` and `1`.
pub fn min_prime_factor(n: u128) -> Option<u128> {
    factorize(n).first().map(|&(p, _)| p)
}

/// Whether no prime above `bound` divides `n`. `0` and `1` are smooth.
///
/// Small bounds are settled by trial division up to `min(bound, sqrt(n))`
/// without factoring `n` completely.
pub fn is_smooth(n: u128, bound: u64) -> bool {
    if n < 2 {
        return true;
    }
    if bound > TRIAL_BOUND {
        return max_prime_factor(n).map_or(true, |p| p <= u128::from(bound));
    }

    let bound = u128::from(bound);
    let mut rest = n;
    let mut d = 2u128;
    while d <= bound && d <= rest / d {
        while rest % d == 0 {
            rest /= d;
        }
        d += if d == 2 { 1 } else { 2 };
    }
    // what is left is 1, a prime, or a product of primes above the bound
    rest <= bound
}

/// Primality test, deterministic for every `u64`.
pub fn is_prime(n: u128) -> bool {
    match u64::try_from(n) {
        Ok(n) => is_prime_u64(n),
        Err(_) => is_prime_wide(n),
    }
}

/// The primes up to and including `limit`, ascending.
pub fn primes_up_to(limit: usize) -> Vec<u128> {
    if limit < 2 {
        return Vec::new();
    }
    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();
    for n in 2..=limit {
        if composite[n] {
            continue;
        }
        primes.push(n as u128);
        let mut multiple = n * n;
        while multiple <= limit {
            composite[multiple] = true;
            multiple += n;
        }
    }
    primes
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in MILLER_RABIN_BASES.iter() {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn is_prime_wide(n: u128) -> bool {
    for &p in SMALL_PRIMES.iter() {
        if n % u128::from(p) == 0 {
            return false;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in WIDE_MILLER_RABIN_BASES.iter() {
        let mut x = pow_mod_wide(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod_wide(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Push every prime factor of `n` (with repetition) onto `out`.
fn split(n: u128, out: &mut Vec<u128>) {
    if n == 1 {
        return;
    }
    if is_prime(n) {
        out.push(n);
        return;
    }
    let d = match u64::try_from(n) {
        Ok(narrow) => u128::from(pollard_rho(narrow)),
        Err(_) => pollard_rho_wide(n),
    };
    split(d, out);
    split(n / d, out);
}

/// A non-trivial divisor of the odd composite `n`.
fn pollard_rho(n: u64) -> u64 {
    if n % 2 == 0 {
        return 2;
    }
    let mut c = 1u64;
    loop {
        let step = |x: u64| ((mul_mod(x, x, n) as u128 + c as u128) % n as u128) as u64;
        let (mut x, mut y, mut d) = (2u64, 2u64, 1u64);
        while d == 1 {
            x = step(x);
            y = step(step(y));
            d = x.abs_diff(y).gcd(&n);
        }
        if d != n {
            return d;
        }
        c += 1;
    }
}

/// [`pollard_rho`] for composites wider than 64 bits.
fn pollard_rho_wide(n: u128) -> u128 {
    if n % 2 == 0 {
        return 2;
    }
    let mut c = 1u128;
    loop {
        let step = |x: u128| add_mod(mul_mod_wide(x, x, n), c, n);
        let (mut x, mut y, mut d) = (2u128, 2u128, 1u128);
        while d == 1 {
            x = step(x);
            y = step(step(y));
            d = x.abs_diff(y).gcd(&n);
        }
        if d != n {
            return d;
        }
        c += 1;
    }
}

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// `(a + b) % m` for `a, b < m`.
#[inline]
fn add_mod(a: u128, b: u128, m: u128) -> u128 {
    if a >= m - b {
        a - (m - b)
    } else {
        a + b
    }
}

fn mul_mod_wide(a: u128, b: u128, m: u128) -> u128 {
    if let Some(product) = a.checked_mul(b) {
        return product % m;
    }
    let (mut a, mut b) = (a % m, b % m);
    let mut acc = 0u128;
    while b > 0 {
        if b & 1 == 1 {
            acc = add_mod(acc, a, m);
        }
        a = add_mod(a, a, m);
        b >>= 1;
    }
    acc
}

fn pow_mod_wide(mut base: u128, mut exp: u128, m: u128) -> u128 {
    let mut acc = 1u128;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod_wide(acc, base, m);
        }
        base = mul_mod_wide(base, base, m);
        exp >>= 1;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorize_small() {
        assert_eq!(factorize(0), vec![]);
        assert_eq!(factorize(1), vec![]);
        assert_eq!(factorize(2), vec![(2, 1)]);
        assert_eq!(factorize(72), vec![(2, 3), (3, 2)]);
        assert_eq!(factorize(126), vec![(2, 1), (3, 2), (7, 1)]);
        assert_eq!(factorize(101), vec![(101, 1)]);
    }

    #[test]
    fn test_factorize_large_semiprime() {
        // 4294967291 and 4294967279 are the two largest primes below 2^32
        let n = 4_294_967_291u128 * 4_294_967_279u128;
        assert_eq!(factorize(n), vec![(4_294_967_279, 1), (4_294_967_291, 1)]);
    }

    #[test]
    fn test_factorize_float_mantissa() {
        // numerator of 2^(1/12) as an exact double
        let n = 4_771_397_596_969_315u128;
        let product: u128 = factorize(n).iter().map(|&(p, e)| p.pow(e)).product();
        assert_eq!(product, n);
        assert!(factorize(n).iter().all(|&(p, _)| is_prime(p)));
    }

    #[test]
    fn test_factorize_beyond_64_bits() {
        // a superparticular step of the 12-EDO semitone, n = 17000
        let n = 17_001u128 * 4_771_397_596_969_315u128;
        assert!(n > u128::from(u64::MAX));
        let factors = factorize(n);
        let product: u128 = factors.iter().map(|&(p, e)| p.pow(e)).product();
        assert_eq!(product, n);
        assert!(factors.iter().all(|&(p, _)| is_prime(p)));

        let p = 18_446_744_073_709_551_557u128; // largest u64 prime
        assert_eq!(factorize(p * 3 * 3), vec![(3, 2), (p, 1)]);
        assert_eq!(factorize(p * 1_000_003), vec![(1_000_003, 1), (p, 1)]);
    }

    #[test]
    fn test_factorize_repeated_large_prime() {
        let p = 1_000_003u128;
        assert_eq!(factorize(p * p * 6), vec![(2, 1), (3, 1), (p, 2)]);
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u128> = (0..60).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59]
        );
        assert!(is_prime(18_446_744_073_709_551_557)); // largest u64 prime
        assert!(!is_prime(3_215_031_751)); // strong pseudoprime to bases 2, 3, 5, 7
        assert!(is_prime((1u128 << 89) - 1)); // Mersenne prime
        assert!(!is_prime((1u128 << 67) - 1)); // 193707721 * 761838257287
    }

    #[test]
    fn test_is_smooth() {
        assert!(is_smooth(1, 2));
        assert!(is_smooth(96, 3));
        assert!(!is_smooth(96 * 5, 3));
        assert!(is_smooth(17 * 19, 19));
        assert!(!is_smooth(17 * 19, 17));
        assert!(!is_smooth(4_771_397_596_969_315, 89));
        assert!(is_smooth(1u128 << 100, 2));
        // bounds above the trial range factor completely
        assert!(is_smooth(1_000_003 * 8, 1_000_003));
        assert!(!is_smooth(1_000_033 * 8, 1_000_003));
    }

    #[test]
    fn test_primes_up_to() {
        assert_eq!(primes_up_to(1), vec![]);
        assert_eq!(primes_up_to(13), vec![2, 3, 5, 7, 11, 13]);
        assert_eq!(primes_up_to(100).len(), 25);
    }

    #[test]
    fn test_max_and_min_prime_factor() {
        assert_eq!(max_prime_factor(30), Some(5));
        assert_eq!(min_prime_factor(31), Some(31));
        assert_eq!(max_prime_factor(1), None);
        assert_eq!(min_prime_factor(0), None);
    }
}
