//! Arithmetic combinators and value comparisons

use crate::node::Num;
use crate::operator::Operator;
use reckon_core::NumberError;
use std::cmp::Ordering;

impl Num {
    // ========== Combinators ==========

    pub fn add(&self, other: impl Into<Num>) -> Num {
        let other = other.into();
        let value = self.value().add(other.value());
        Num::with_value(Operator::Add, vec![self.clone(), other], value)
    }

    pub fn sub(&self, other: impl Into<Num>) -> Num {
        let other = other.into();
        let value = self.value().sub(other.value());
        Num::with_value(Operator::Sub, vec![self.clone(), other], value)
    }

    pub fn mul(&self, other: impl Into<Num>) -> Num {
        let other = other.into();
        let value = self.value().mul(other.value());
        Num::with_value(Operator::Mul, vec![self.clone(), other], value)
    }

    /// Fails when the divisor's value is zero
    pub fn div(&self, other: impl Into<Num>) -> Result<Num, NumberError> {
        let other = other.into();
        let value = self.value().checked_div(other.value())?;
        Ok(Num::with_value(Operator::Div, vec![self.clone(), other], value))
    }

    /// Fails for zero to a negative power, fractional powers of negative
    /// numbers, and exponents too large to evaluate
    pub fn pow(&self, exponent: impl Into<Num>) -> Result<Num, NumberError> {
        let exponent = exponent.into();
        let value = self.value().checked_pow(exponent.value())?;
        Ok(Num::with_value(Operator::Pow, vec![self.clone(), exponent], value))
    }

    pub fn floor(&self) -> Num {
        let value = self.value().floor();
        Num::with_value(Operator::Floor, vec![self.clone()], value)
    }

    /// Left fold with `add`; an empty sum is literal 0
    pub fn sum<I>(terms: I) -> Num
    where
        I: IntoIterator,
        I::Item: Into<Num>,
    {
        let mut terms = terms.into_iter().map(Into::into);
        match terms.next() {
            Some(first) => terms.fold(first, |acc, term| acc.add(term)),
            None => Num::literal(0),
        }
    }

    /// Left fold with `mul`; an empty product is literal 1
    pub fn product<I>(factors: I) -> Num
    where
        I: IntoIterator,
        I::Item: Into<Num>,
    {
        let mut factors = factors.into_iter().map(Into::into);
        match factors.next() {
            Some(first) => factors.fold(first, |acc, factor| acc.mul(factor)),
            None => Num::literal(1),
        }
    }

    // ========== Comparisons (by value, names ignored) ==========

    #[allow(clippy::should_implement_trait)]
    pub fn cmp(&self, other: impl Into<Num>) -> Ordering {
        self.value().cmp(other.into().value())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, other: impl Into<Num>) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    pub fn gt(&self, other: impl Into<Num>) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    pub fn gte(&self, other: impl Into<Num>) -> bool {
        self.cmp(other) != Ordering::Less
    }

    pub fn lt(&self, other: impl Into<Num>) -> bool {
        self.cmp(other) == Ordering::Less
    }

    pub fn lte(&self, other: impl Into<Num>) -> bool {
        self.cmp(other) != Ordering::Greater
    }

    /// `min` or `max` themselves when out of range, else `self`
    pub fn clamp(&self, min: &Num, max: &Num) -> Num {
        if self.lt(min) {
            min.clone()
        } else if self.gt(max) {
            max.clone()
        } else {
            self.clone()
        }
    }
}
