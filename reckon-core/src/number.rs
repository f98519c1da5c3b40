//! Exact decimal numbers using dashu
//!
//! Uses dashu-ratio (RBig) so every decimal a user can type is held without
//! rounding, and sums, products, quotients, floors and integer powers stay
//! exact. Only fractional powers go through dashu-float (DBig) and come back
//! rounded to the working precision.

use dashu_float::DBig;
use dashu_int::ops::BitTest;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Working precision for inexact operations (decimal digits)
pub const DEFAULT_PRECISION: usize = 50;

/// Places used to display values with no finite decimal expansion
pub const DISPLAY_PLACES: u32 = 10;

/// Largest decimal exponent accepted when parsing
const MAX_PARSE_EXPONENT: usize = 10_000;

/// Largest integer exponent evaluated exactly
const MAX_INTEGER_EXPONENT: u64 = 100_000;

/// Exact decimal number
///
/// Built on dashu-ratio's RBig. All fallible operations return Results -
/// never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: RBig,
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = Self::parse_decimal(num_str.trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            let den = Self::parse_decimal(den_str.trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            return num.checked_div(&den);
        }

        Self::parse_decimal(s).ok_or_else(|| NumberError::ParseError(s.to_string()))
    }

    /// Parse "[-]digits[.digits][e[-]digits]" exactly
    fn parse_decimal(s: &str) -> Option<Self> {
        let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
            Some(pos) => (&s[..pos], s[pos + 1..].parse::<isize>().ok()?),
            None => (s, 0),
        };
        if exponent.unsigned_abs() > MAX_PARSE_EXPONENT {
            return None;
        }

        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        if !int_digits.chars().chain(frac_digits.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let significand: IBig = format!("{}{}", int_digits, frac_digits).parse().ok()?;
        let significand = if negative { -significand } else { significand };
        Some(Self::from_scaled(significand, exponent - frac_digits.len() as isize))
    }

    /// significand * 10^exponent, exactly
    fn from_scaled(significand: IBig, exponent: isize) -> Self {
        let scale = UBig::from(10u8).pow(exponent.unsigned_abs());
        let inner = if exponent >= 0 {
            RBig::from(significand * IBig::from(scale))
        } else {
            RBig::from_parts(significand, scale)
        };
        Self { inner }
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: RBig::from(IBig::from(n)) }
    }

    /// Create from ratio (exact division)
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        Self::from_i64(num).checked_div(&Self::from_i64(den))
    }

    /// Create from f64 through its shortest decimal representation
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::DomainError(format!("{} is not a finite number", f)));
        }
        Self::from_str(&f.to_string())
    }

    pub fn zero() -> Self {
        Self { inner: RBig::ZERO }
    }

    pub fn one() -> Self {
        Self { inner: RBig::ONE }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    /// Check if exactly one
    pub fn is_one(&self) -> bool {
        self.inner == RBig::ONE
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        *self.inner.denominator() == UBig::ONE
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        let numerator = self.inner.numerator();
        let denominator = IBig::from(self.inner.denominator().clone());
        // Integer division truncates toward zero
        let quotient = numerator / &denominator;
        let remainder = numerator % &denominator;
        let floor = if remainder != IBig::ZERO && self.is_negative() {
            quotient - IBig::ONE
        } else {
            quotient
        };
        Self { inner: RBig::from(floor) }
    }

    /// Power with exact results for integer exponents
    ///
    /// `x^0 = 1`, `1^y = 1` and `0^y = 0` for positive `y` hold exactly for
    /// every exponent. A fractional exponent on a positive base is computed
    /// as `exp(y * ln x)` at `DEFAULT_PRECISION`.
    pub fn checked_pow(&self, exp: &Self) -> Result<Self, NumberError> {
        if exp.is_zero() || self.is_one() {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return if exp.is_negative() {
                Err(NumberError::DivisionByZero)
            } else {
                Ok(Self::zero())
            };
        }

        if exp.is_integer() {
            let e = exp
                .to_i64()
                .filter(|e| e.unsigned_abs() <= MAX_INTEGER_EXPONENT)
                .ok_or(NumberError::Overflow)?;
            let magnitude = self.powi(e.unsigned_abs() as usize);
            return if e < 0 {
                Ok(Self { inner: RBig::ONE / magnitude })
            } else {
                Ok(Self { inner: magnitude })
            };
        }

        if self.is_negative() {
            return Err(NumberError::DomainError(
                "fractional power of negative number".to_string()
            ));
        }

        let ln_x = self.to_dbig().ln();
        let product = &ln_x * &exp.to_dbig();
        let (significand, exponent) = product.exp().into_repr().into_parts();
        Ok(Self::from_scaled(significand, exponent))
    }

    /// Exact non-negative integer power
    fn powi(&self, exp: usize) -> RBig {
        let numerator = self.inner.numerator().pow(exp);
        let denominator = self.inner.denominator().pow(exp);
        RBig::from_parts(numerator, denominator)
    }

    /// Approximate as DBig at working precision
    fn to_dbig(&self) -> DBig {
        let numerator = DBig::from(self.inner.numerator().clone())
            .with_precision(DEFAULT_PRECISION)
            .value();
        let denominator = DBig::from(self.inner.denominator().clone())
            .with_precision(DEFAULT_PRECISION)
            .value();
        numerator / denominator
    }

    // ========== Conversion ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.inner.numerator().clone().try_into().ok()
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        // Short terminating decimals parse to the correctly rounded f64
        match self.decimal_places() {
            Some(places) if places <= 40 => self
                .as_decimal(places)
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite()),
            _ => self.approx_f64(),
        }
    }

    /// f64 approximation through the DBig representation
    fn approx_f64(&self) -> Option<f64> {
        // Get the representation: significand * 10^exponent
        let (significand, exponent) = self.to_dbig().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            let sig_i64: i64 = significand.try_into().ok()?;
            sig_i64 as f64
        } else {
            // Significand too large - shift right to fit in 53 bits
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            shifted_i64 as f64 * 2_f64.powi(extra_bits as i32)
        };

        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None; // Exponent out of f64 range
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    // ========== Display ==========

    /// Decimal places needed to write the value exactly, if it terminates
    pub fn decimal_places(&self) -> Option<u32> {
        let two = UBig::from(2u8);
        let five = UBig::from(5u8);
        let mut den = self.inner.denominator().clone();
        let (mut twos, mut fives) = (0u32, 0u32);
        while &den % &two == UBig::ZERO {
            den = den / &two;
            twos += 1;
        }
        while &den % &five == UBig::ZERO {
            den = den / &five;
            fives += 1;
        }
        (den == UBig::ONE).then(|| twos.max(fives))
    }

    /// Significant digits needed to write the value exactly, if it terminates.
    /// Trailing zeros of an integer are not counted; zero needs one digit.
    pub fn significant_digits(&self) -> Option<u32> {
        self.decimal_places()?;
        let digits = self.as_exact().trim_start_matches('-').replace('.', "");
        let significant = digits.trim_start_matches('0').trim_end_matches('0');
        Some((significant.len() as u32).max(1))
    }

    /// Render as decimal string with specified decimal places
    /// (rounded half away from zero)
    pub fn as_decimal(&self, places: u32) -> String {
        let numerator = self.inner.numerator();
        let denominator = IBig::from(self.inner.denominator().clone());
        let scale = IBig::from(10).pow(places as usize);
        let magnitude = if self.is_negative() { -numerator.clone() } else { numerator.clone() };

        let two = IBig::from(2);
        let rounded = (magnitude * scale * &two + &denominator) / (denominator * two);
        let digits = insert_point(rounded.to_string(), places as usize);
        if self.is_negative() && rounded != IBig::ZERO {
            format!("-{}", digits)
        } else {
            digits
        }
    }

    /// Render with N significant figures
    pub fn as_sigfigs(&self, sigfigs: u32) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let Some(f) = self.to_f64() else {
            return self.as_exact();
        };

        let sigfigs = sigfigs.max(1) as usize;
        let exp = f.abs().log10().floor() as i32;

        if (-3..=4).contains(&exp) {
            let decimal_places = if exp >= 0 {
                (sigfigs as i32 - exp - 1).max(0) as usize
            } else {
                sigfigs + (-exp - 1) as usize
            };
            format!("{:.prec$}", f, prec = decimal_places)
        } else {
            let mantissa = f / 10_f64.powi(exp);
            format!("{:.prec$}e{}", mantissa, exp, prec = sigfigs - 1)
        }
    }

    /// Exact text form: a decimal when it terminates, "num/den" otherwise
    pub fn as_exact(&self) -> String {
        match self.decimal_places() {
            Some(places) => self.as_decimal(places),
            None => format!("{}/{}", self.inner.numerator(), self.inner.denominator()),
        }
    }
}

/// Insert a decimal point `places` digits from the right
fn insert_point(digits: String, places: usize) -> String {
    if places == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = places + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - places);
    format!("{}.{}", int_part, frac_part)
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let places = self.decimal_places().unwrap_or(DISPLAY_PLACES);
        write!(f, "{}", self.as_decimal(places))
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::from_i64(n as i64)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_exact())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // RBig is always reduced, so equal values have equal parts
        self.inner.numerator().hash(state);
        self.inner.denominator().hash(state);
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
