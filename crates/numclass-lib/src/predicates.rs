//! Pure numeric predicates used to classify a number.
//!
//! Every function here is deterministic and performs no I/O.

/// Witness bases that make Miller-Rabin exact for every `u64`.
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Returns `true` if `n` is prime.
///
/// Deterministic Miller-Rabin over [`MILLER_RABIN_BASES`], so the cost is
/// logarithmic in `n` even at the top of the accepted input range.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &MILLER_RABIN_BASES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for &a in &MILLER_RABIN_BASES {
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

/// Returns `true` if `n` equals the sum of its proper divisors.
///
/// Zero is never perfect. Every even perfect number has the Euclid-Euler form
/// `2^(p-1) * (2^p - 1)` with `2^p - 1` prime, and no odd perfect number
/// exists below 10^1500, so within `u64` the check reduces to that form.
pub fn is_perfect(n: u64) -> bool {
    if n < 2 || !is_even(n) {
        return false;
    }

    let k = n.trailing_zeros();
    if k >= 63 {
        return false;
    }
    let odd_part = n >> k;
    odd_part == (1u64 << (k + 1)) - 1 && is_prime(odd_part)
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    // Fits: the result is reduced below `m`.
    (u128::from(a) * u128::from(b) % u128::from(m)) as u64
}

fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    let mut base = base % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Returns `true` if `n` is an Armstrong (narcissistic) number.
///
/// The exponent is the number of digits in the decimal representation of `n`,
/// so `0` is an Armstrong number (`0^1 == 0`).
pub fn is_armstrong(n: u64) -> bool {
    let digits = decimal_digits(n);
    let exponent = digits.len() as u32;
    let sum: u128 = digits
        .iter()
        .map(|&digit| u128::from(digit).pow(exponent))
        .sum();
    sum == u128::from(n)
}

/// Sum of the decimal digits of `n`.
pub fn digit_sum(n: u64) -> u64 {
    decimal_digits(n).iter().map(|&digit| u64::from(digit)).sum()
}

/// Returns `true` if `n` is evenly divisible by two.
pub fn is_even(n: u64) -> bool {
    n % 2 == 0
}

fn decimal_digits(n: u64) -> Vec<u8> {
    n.to_string().bytes().map(|b| b - b'0').collect()
}
