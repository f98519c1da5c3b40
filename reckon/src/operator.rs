//! Operators, their arity and binding strength

use reckon_core::{Number, NumberError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator of a derived node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Floor,
    Pow,
}

/// Binding strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Term,
    Factor,
    Exponent,
    Call,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl Operator {
    pub fn arity(self) -> Arity {
        match self {
            Operator::Add | Operator::Mul => Arity::AtLeast(2),
            Operator::Sub | Operator::Div | Operator::Pow => Arity::Exactly(2),
            Operator::Floor => Arity::Exactly(1),
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Operator::Add | Operator::Sub => Precedence::Term,
            Operator::Mul | Operator::Div => Precedence::Factor,
            Operator::Pow => Precedence::Exponent,
            Operator::Floor => Precedence::Call,
        }
    }

    /// Add and Mul chains are kept flat and never regrouped
    pub fn is_associative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Floor => "floor",
            Operator::Pow => "^",
        }
    }

    /// Panics unless `count` operands are valid for this operator.
    ///
    /// A wrong operand count is a bug in the caller, never a recoverable state.
    pub fn check_arity(self, count: usize) {
        let arity = self.arity();
        assert!(
            arity.accepts(count),
            "{:?} takes {} operands, got {}",
            self,
            arity,
            count
        );
    }

    /// Apply the operator to operand values.
    ///
    /// Division and power failures come from `Number` unchanged.
    pub fn apply(self, args: &[&Number]) -> Result<Number, NumberError> {
        self.check_arity(args.len());
        match self {
            Operator::Add => Ok(args[1..].iter().fold(args[0].clone(), |acc, v| acc.add(v))),
            Operator::Sub => Ok(args[0].sub(args[1])),
            Operator::Mul => Ok(args[1..].iter().fold(args[0].clone(), |acc, v| acc.mul(v))),
            Operator::Div => args[0].checked_div(args[1]),
            Operator::Floor => Ok(args[0].floor()),
            Operator::Pow => args[0].checked_pow(args[1]),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
