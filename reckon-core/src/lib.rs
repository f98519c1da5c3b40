//! Reckon Core - Fundamental types
//!
//! This crate provides the exact decimal primitive used by every Reckon
//! expression node:
//! - `Number`: Exact decimal (rational) numbers
//! - `NumberError`: Failures surfaced by division and powers

mod number;

pub use number::{Number, NumberError, DEFAULT_PRECISION, DISPLAY_PLACES};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
        }

        #[test]
        fn test_from_str_integer() {
            let n = Number::from_str("123").unwrap();
            assert_eq!(n.to_i64(), Some(123));
        }

        #[test]
        fn test_from_str_decimal_is_exact() {
            let n = Number::from_str("3.14").unwrap();
            assert!(!n.is_integer());
            assert_eq!(n.to_string(), "3.14");
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("1/3").unwrap();
            assert!(!n.is_integer());
            assert_eq!(n.as_exact(), "1/3");
        }

        #[test]
        fn test_from_str_fraction_zero_denominator() {
            assert_eq!(Number::from_str("1/0"), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_from_str_scientific() {
            assert_eq!(Number::from_str("1.5e2").unwrap().to_i64(), Some(150));
            assert_eq!(Number::from_str("602214076e15").unwrap().to_string(),
                "602214076000000000000000");
            assert_eq!(Number::from_str("6e-3").unwrap().to_string(), "0.006");
        }

        #[test]
        fn test_from_str_signs() {
            assert_eq!(Number::from_str("-42").unwrap().to_i64(), Some(-42));
            assert_eq!(Number::from_str("+7").unwrap().to_i64(), Some(7));
            assert_eq!(Number::from_str("-.5").unwrap().to_string(), "-0.5");
        }

        #[test]
        fn test_from_str_rejects_garbage() {
            for bad in ["", "abc", "1.2.3", "--1", "1e", "e5", "."] {
                assert!(Number::from_str(bad).is_err(), "{:?} should not parse", bad);
            }
        }

        #[test]
        fn test_from_f64() {
            assert_eq!(Number::from_f64(0.1).unwrap().to_string(), "0.1");
            assert_eq!(Number::from_f64(-2.5).unwrap().to_string(), "-2.5");
            assert!(Number::from_f64(f64::NAN).is_err());
            assert!(Number::from_f64(f64::INFINITY).is_err());
        }

        #[test]
        fn test_from_ratio() {
            let n = Number::from_ratio(1, 4).unwrap();
            assert_eq!(n.to_string(), "0.25");
            assert!(Number::from_ratio(1, 0).is_err());
        }
    }

    mod arithmetic_tests {
        use super::*;

        fn num(s: &str) -> Number {
            Number::from_str(s).unwrap()
        }

        #[test]
        fn test_add() {
            assert_eq!(num("10").add(&num("32")).to_i64(), Some(42));
        }

        #[test]
        fn test_decimal_add_is_exact() {
            assert_eq!(num("0.1").add(&num("0.2")), num("0.3"));
        }

        #[test]
        fn test_sub() {
            assert_eq!(num("50").sub(&num("8")).to_i64(), Some(42));
        }

        #[test]
        fn test_mul() {
            assert_eq!(num("6").mul(&num("7")).to_i64(), Some(42));
        }

        #[test]
        fn test_neg() {
            assert_eq!(num("2.5").neg(), num("-2.5"));
            assert_eq!(num("0").neg(), num("0"));
        }

        #[test]
        fn test_checked_div() {
            assert_eq!(num("84").checked_div(&num("2")).unwrap().to_i64(), Some(42));
        }

        #[test]
        fn test_division_is_exact() {
            let third = num("1").checked_div(&num("3")).unwrap();
            assert_eq!(third.mul(&num("3")), num("1"));
        }

        #[test]
        fn test_div_by_zero() {
            assert_eq!(num("42").checked_div(&num("0")), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_floor() {
            assert_eq!(num("2.7").floor(), num("2"));
            assert_eq!(num("-2.3").floor(), num("-3"));
            assert_eq!(num("-4").floor(), num("-4"));
            assert_eq!(num("7/2").floor(), num("3"));
        }

        #[test]
        fn test_pow_integer() {
            assert_eq!(num("2").checked_pow(&num("10")).unwrap().to_i64(), Some(1024));
            assert_eq!(num("2").checked_pow(&num("-2")).unwrap(), num("0.25"));
        }

        #[test]
        fn test_pow_large_exponent() {
            // 1.003^360 compound interest factor stays exact
            let base = num("1.003");
            let result = base.checked_pow(&num("360")).unwrap();
            assert!(result.as_decimal(2).starts_with("2.94"), "got {}", result.as_decimal(4));
        }

        #[test]
        fn test_pow_identities() {
            assert_eq!(num("0").checked_pow(&num("0")).unwrap(), num("1"));
            assert_eq!(num("1").checked_pow(&num("0.5")).unwrap(), num("1"));
            assert_eq!(num("0").checked_pow(&num("2.5")).unwrap(), num("0"));
            assert_eq!(num("0").checked_pow(&num("-1")), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_pow_fractional() {
            let result = num("4").checked_pow(&num("0.5")).unwrap();
            assert!(result.as_decimal(6).starts_with("2.000000")
                || result.as_decimal(6).starts_with("1.999999"),
                "4^0.5 should be 2, got: {}", result.as_decimal(10));
        }

        #[test]
        fn test_pow_fractional_negative_base() {
            assert!(matches!(num("-4").checked_pow(&num("0.5")), Err(NumberError::DomainError(_))));
        }

        #[test]
        fn test_pow_overflow() {
            assert_eq!(num("2").checked_pow(&num("1e9")), Err(NumberError::Overflow));
        }
    }

    mod display_tests {
        use super::*;

        fn num(s: &str) -> Number {
            Number::from_str(s).unwrap()
        }

        #[test]
        fn test_display_terminating() {
            assert_eq!(num("250000").to_string(), "250000");
            assert_eq!(num("0.05").to_string(), "0.05");
            assert_eq!(num("-1").to_string(), "-1");
            assert_eq!(num("3/20").to_string(), "0.15");
        }

        #[test]
        fn test_display_non_terminating() {
            assert_eq!(num("1/3").to_string(), "0.3333333333");
            assert_eq!(num("-2/3").to_string(), "-0.6666666667");
        }

        #[test]
        fn test_as_decimal_rounds_half_away_from_zero() {
            assert_eq!(num("2.5").as_decimal(0), "3");
            assert_eq!(num("-2.5").as_decimal(0), "-3");
            assert_eq!(num("0.125").as_decimal(2), "0.13");
            assert_eq!(num("-0.001").as_decimal(2), "0.00");
        }

        #[test]
        fn test_as_sigfigs() {
            assert_eq!(num("1342.0512").as_sigfigs(3), "1342");
            assert_eq!(num("0.012345").as_sigfigs(3), "0.0123");
            assert_eq!(num("6.62607015e-34").as_sigfigs(3), "6.63e-34");
            assert_eq!(num("0").as_sigfigs(3), "0");
        }

        #[test]
        fn test_significant_digits() {
            assert_eq!(num("2").significant_digits(), Some(1));
            assert_eq!(num("250000").significant_digits(), Some(2));
            assert_eq!(num("0.065").significant_digits(), Some(2));
            assert_eq!(num("-10.05").significant_digits(), Some(4));
            assert_eq!(num("0").significant_digits(), Some(1));
            assert_eq!(num("1/3").significant_digits(), None);
        }

        #[test]
        fn test_to_f64() {
            assert_eq!(num("0.25").to_f64(), Some(0.25));
            assert_eq!(num("-1342.5").to_f64(), Some(-1342.5));
            let third = num("1/3").to_f64().unwrap();
            assert!((third - 1.0 / 3.0).abs() < 1e-15);
        }

        #[test]
        fn test_serde_round_trip() {
            for s in ["0.05", "-12", "1/3"] {
                let n = num(s);
                let json = serde_json::to_string(&n).unwrap();
                let back: Number = serde_json::from_str(&json).unwrap();
                assert_eq!(back, n);
            }
            assert_eq!(serde_json::to_string(&num("1/3")).unwrap(), "\"1/3\"");
        }
    }

    mod compare_tests {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn test_ordering() {
            let a = Number::from_str("0.1").unwrap();
            let b = Number::from_str("1/3").unwrap();
            assert!(a < b);
            assert_eq!(a.cmp(&a.clone()), std::cmp::Ordering::Equal);
        }

        #[test]
        fn test_hash_agrees_with_eq() {
            let mut set = HashSet::new();
            set.insert(Number::from_str("0.50").unwrap());
            assert!(set.contains(&Number::from_str("1/2").unwrap()));
        }

        #[test]
        fn test_predicates() {
            assert!(Number::from_i64(0).is_zero());
            assert!(Number::from_str("1.0").unwrap().is_one());
            assert!(Number::from_i64(-5).is_negative());
            assert!(!Number::from_i64(0).is_negative());
        }
    }
}
