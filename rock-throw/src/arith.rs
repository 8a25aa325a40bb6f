//! Modular arithmetic primitives shared by the velocity filter and the reconstructor.
//!
//! Everything is generic over signed integers so the filter can stay on i64
//! while the CRT accumulator grows into `BigInt`.

use num_integer::Integer;
use num_traits::Signed;

/// Extended GCD: returns (g, x, y) with a*x + b*y = g and g = gcd(|a|, |b|) >= 0.
pub fn extended_gcd<T: Integer + Signed + Clone>(a: &T, b: &T) -> (T, T, T) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (T::one(), T::zero());
    let (mut old_y, mut y) = (T::zero(), T::one());

    // Invariant: a*old_x + b*old_y == old_r and a*x + b*y == r.
    while !r.is_zero() {
        let q = old_r.div_floor(&r);
        let next_r = old_r - q.clone() * r.clone();
        old_r = std::mem::replace(&mut r, next_r);
        let next_x = old_x - q.clone() * x.clone();
        old_x = std::mem::replace(&mut x, next_x);
        let next_y = old_y - q * y.clone();
        old_y = std::mem::replace(&mut y, next_y);
    }

    if old_r.is_negative() {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

/// Combine x ≡ a1 (mod m1) and x ≡ a2 (mod m2) for coprime positive moduli.
///
/// Returns (X, m1*m2) with X in [0, m1*m2).
///
/// # Panics
///
/// Panics if gcd(m1, m2) != 1. Callers must check coprimality first.
pub fn crt_combine<T: Integer + Signed + Clone>(a1: &T, m1: &T, a2: &T, m2: &T) -> (T, T) {
    let (g, x, y) = extended_gcd(m1, m2);
    assert!(g.is_one(), "crt_combine requires coprime moduli");

    let modulus = m1.clone() * m2.clone();
    // m1*x ≡ 1 (mod m2) and m2*y ≡ 1 (mod m1)
    let combined = a2.clone() * m1.clone() * x + a1.clone() * m2.clone() * y;
    (combined.mod_floor(&modulus), modulus)
}

/// Whether x ≡ a1 (mod m1) and x ≡ a2 (mod m2) can hold at once.
///
/// Coprime moduli are always consistent, so the common gcd == 1 case skips
/// the residue comparison entirely.
pub fn congruences_consistent<T: Integer + Signed + Clone>(a1: &T, m1: &T, a2: &T, m2: &T) -> bool {
    let g = m1.gcd(m2);
    if g.is_one() {
        return true;
    }
    if g.is_zero() {
        return a1 == a2;
    }
    a1.mod_floor(&g) == a2.mod_floor(&g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn check_bezout(a: i128, b: i128) {
        let (g, x, y) = extended_gcd(&a, &b);
        assert_eq!(g, a.abs().gcd(&b.abs()), "gcd({a}, {b})");
        assert_eq!(a * x + b * y, g, "bezout({a}, {b})");
    }

    #[test]
    fn test_extended_gcd_basic() {
        let (g, x, y) = extended_gcd(&240i64, &46i64);
        assert_eq!(g, 2);
        assert_eq!(240 * x + 46 * y, 2);
    }

    #[test]
    fn test_extended_gcd_zero_arguments() {
        assert_eq!(extended_gcd(&0i64, &5i64), (5, 0, 1));
        assert_eq!(extended_gcd(&5i64, &0i64), (5, 1, 0));
        assert_eq!(extended_gcd(&0i64, &-5i64), (5, 0, -1));
        assert_eq!(extended_gcd(&0i64, &0i64).0, 0);
    }

    #[test]
    fn test_extended_gcd_signs() {
        for a in -30i128..=30 {
            for b in -30i128..=30 {
                if a == 0 && b == 0 {
                    continue;
                }
                check_bezout(a, b);
            }
        }
    }

    #[test]
    fn test_extended_gcd_large() {
        check_bezout(320_870_677_764_563, 282_502_845_957_937);
        check_bezout(1 << 40, 3 * (1 << 20));
    }

    #[test]
    fn test_crt_combine_small() {
        assert_eq!(crt_combine(&2i64, &3, &3, &5), (8, 15));
        // 23 is the textbook answer for (2 mod 3, 3 mod 5, 2 mod 7)
        let (x, m) = crt_combine(&2i64, &3, &3, &5);
        assert_eq!(crt_combine(&x, &m, &2, &7), (23, 105));
    }

    #[test]
    fn test_crt_combine_residues_in_range() {
        let moduli = [1i64, 2, 3, 4, 5, 7, 9, 11];
        for &m1 in &moduli {
            for &m2 in &moduli {
                if m1.gcd(&m2) != 1 {
                    continue;
                }
                for a1 in 0..m1 {
                    for a2 in 0..m2 {
                        let (x, m) = crt_combine(&a1, &m1, &a2, &m2);
                        assert_eq!(m, m1 * m2);
                        assert!((0..m).contains(&x));
                        assert_eq!(x % m1, a1);
                        assert_eq!(x % m2, a2);
                    }
                }
            }
        }
    }

    #[test]
    fn test_crt_combine_unreduced_residue() {
        // Residues outside [0, m) are still honoured modulo m.
        let (x, m) = crt_combine(&-1i64, &4, &10, &9);
        assert_eq!(m, 36);
        assert_eq!(x.mod_floor(&4), 3);
        assert_eq!(x.mod_floor(&9), 1);
    }

    #[test]
    fn test_crt_combine_bigint() {
        let m1 = BigInt::from(1_000_000_007i64) * BigInt::from(998_244_353i64);
        let m2 = BigInt::from(1_000_000_009i64);
        let a1 = BigInt::from(123_456_789i64);
        let a2 = BigInt::from(42);
        let (x, m) = crt_combine(&a1, &m1, &a2, &m2);
        assert_eq!(m, &m1 * &m2);
        assert_eq!(x.mod_floor(&m1), a1);
        assert_eq!(x.mod_floor(&m2), a2);
    }

    #[test]
    #[should_panic(expected = "coprime")]
    fn test_crt_combine_rejects_shared_factor() {
        crt_combine(&1i64, &4, &3, &6);
    }

    #[test]
    fn test_consistency_shared_factor() {
        // gcd(4, 6) = 2: residues must agree mod 2
        assert!(congruences_consistent(&1i64, &4, &3, &6));
        assert!(!congruences_consistent(&1i64, &4, &2, &6));
        assert!(congruences_consistent(&10i64, &60, &4, &6));
    }

    #[test]
    fn test_consistency_coprime_is_vacuous() {
        assert!(congruences_consistent(&0i64, &7, &5, &9));
        assert!(congruences_consistent(&-3i64, &8, &100, &15));
    }

    #[test]
    fn test_consistency_modulus_one() {
        for a in -5i64..=5 {
            for b in -5i64..=5 {
                for m in 1i64..=12 {
                    assert!(congruences_consistent(&a, &1, &b, &m));
                }
            }
        }
    }

    #[test]
    fn test_consistency_symmetric() {
        for m1 in 1i64..=12 {
            for m2 in 1i64..=12 {
                for a1 in -3i64..=13 {
                    for a2 in -3i64..=13 {
                        assert_eq!(
                            congruences_consistent(&a1, &m1, &a2, &m2),
                            congruences_consistent(&a2, &m2, &a1, &m1)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_consistency_negative_residues() {
        // -1 ≡ 5 (mod 6), so both agree mod 2 and mod 3.
        assert!(congruences_consistent(&-1i64, &6, &5, &12));
        assert!(!congruences_consistent(&-1i64, &6, &4, &12));
    }
}
