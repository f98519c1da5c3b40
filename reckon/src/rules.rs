//! Local rewrite rules
//!
//! Each rule looks at a single node and either declines (`None`) or returns a
//! replacement with exactly the same value. Every rule removes nodes, shortens
//! an operand list, or lowers nesting, so repeated application terminates.
//! Rules only look at `Derived` nodes: named outputs are opaque here.
//!
//! "Zero" and "one" below mean a Literal or NamedConstant with that value.

use crate::node::{Node, Num};
use crate::operator::Operator;
use reckon_core::Number;

/// A named rewrite
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Num) -> Option<Num>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// The rule set in priority order; earlier rules set up later ones
pub static RULES: [Rule; 13] = [
    Rule { name: "additive identity", apply: additive_identity },
    Rule { name: "subtractive identity", apply: subtractive_identity },
    Rule { name: "subtraction from zero", apply: subtraction_from_zero },
    Rule { name: "multiplicative identity", apply: multiplicative_identity },
    Rule { name: "multiplicative collapse", apply: multiplicative_collapse },
    Rule { name: "product absorbs fraction", apply: product_absorbs_fraction },
    Rule { name: "sign collapse", apply: sign_collapse },
    Rule { name: "division identity", apply: division_identity },
    Rule { name: "division collapse", apply: division_collapse },
    Rule { name: "denominator is fraction", apply: denominator_is_fraction },
    Rule { name: "numerator is fraction", apply: numerator_is_fraction },
    Rule { name: "power identity", apply: power_identity },
    Rule { name: "power collapse", apply: power_collapse },
];

// ========== Matching helpers ==========

fn is_zero(num: &Num) -> bool {
    num.constant_value().is_some_and(Number::is_zero)
}

fn is_one(num: &Num) -> bool {
    num.constant_value().is_some_and(Number::is_one)
}

/// Value of a bare Literal (named constants excluded)
fn literal_value(num: &Num) -> Option<&Number> {
    match num.node() {
        Node::Literal(value) => Some(value),
        _ => None,
    }
}

/// Operands of `num` if it is a derived node with operator `op`
fn operands_of(num: &Num, op: Operator) -> Option<&[Num]> {
    (num.op() == Some(op)).then(|| num.operands())
}

/// Drop identity elements from an Add or Mul list
fn drop_identities(num: &Num, op: Operator, is_identity: fn(&Num) -> bool) -> Option<Num> {
    let operands = operands_of(num, op)?;
    let mut kept: Vec<Num> = operands.iter().filter(|o| !is_identity(o)).cloned().collect();
    if kept.len() == operands.len() {
        return None;
    }
    match kept.len() {
        0 => Some(Num::literal(num.value().clone())),
        1 => kept.pop(),
        _ => Some(Num::with_value(op, kept, num.value().clone())),
    }
}

// ========== Add / Sub ==========

/// x + 0 + y -> x + y
fn additive_identity(num: &Num) -> Option<Num> {
    drop_identities(num, Operator::Add, is_zero)
}

/// x - 0 -> x
fn subtractive_identity(num: &Num) -> Option<Num> {
    let [x, y] = operands_of(num, Operator::Sub)? else {
        return None;
    };
    is_zero(y).then(|| x.clone())
}

/// 0 - x -> (-1) * x
fn subtraction_from_zero(num: &Num) -> Option<Num> {
    let [x, y] = operands_of(num, Operator::Sub)? else {
        return None;
    };
    is_zero(x).then(|| Num::literal(-1).mul(y))
}

// ========== Mul ==========

/// x * 1 * y -> x * y
fn multiplicative_identity(num: &Num) -> Option<Num> {
    drop_identities(num, Operator::Mul, is_one)
}

/// x * 0 -> 0
fn multiplicative_collapse(num: &Num) -> Option<Num> {
    let factors = operands_of(num, Operator::Mul)?;
    factors.iter().any(is_zero).then(|| Num::literal(0))
}

/// a * (p / q) * b -> (a * b * p) / q
fn product_absorbs_fraction(num: &Num) -> Option<Num> {
    let factors = operands_of(num, Operator::Mul)?;
    let index = factors.iter().position(|f| f.op() == Some(Operator::Div))?;
    let [p, q] = factors[index].operands() else {
        return None;
    };
    let numerator = factors
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, f)| f.clone())
        .chain(std::iter::once(p.clone()));
    Num::product(numerator).div(q).ok()
}

/// (-1) * 5 * x -> (-5) * x
///
/// Only bare literals fold; a named constant next to -1 is left alone.
fn sign_collapse(num: &Num) -> Option<Num> {
    let factors = operands_of(num, Operator::Mul)?;
    let minus_one = Number::from_i64(-1);
    let sign = factors
        .iter()
        .position(|f| literal_value(f).is_some_and(|v| *v == minus_one))?;
    let other = factors
        .iter()
        .enumerate()
        .position(|(i, f)| i != sign && literal_value(f).is_some())?;

    let folded = Num::literal(literal_value(&factors[other])?.neg());
    let remaining: Vec<Num> = factors
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != sign)
        .map(|(i, f)| if i == other { folded.clone() } else { f.clone() })
        .collect();
    if remaining.len() == 1 {
        Some(folded)
    } else {
        Some(Num::with_value(Operator::Mul, remaining, num.value().clone()))
    }
}

// ========== Div ==========

/// x / 1 -> x
fn division_identity(num: &Num) -> Option<Num> {
    let [x, y] = operands_of(num, Operator::Div)? else {
        return None;
    };
    is_one(y).then(|| x.clone())
}

/// 0 / x -> 0
fn division_collapse(num: &Num) -> Option<Num> {
    let [x, _] = operands_of(num, Operator::Div)? else {
        return None;
    };
    is_zero(x).then(|| Num::literal(0))
}

/// x / (y / z) -> (x * z) / y
fn denominator_is_fraction(num: &Num) -> Option<Num> {
    let [x, denominator] = operands_of(num, Operator::Div)? else {
        return None;
    };
    let [y, z] = operands_of(denominator, Operator::Div)? else {
        return None;
    };
    x.mul(z).div(y).ok()
}

/// (x / y) / z -> x / (y * z)
fn numerator_is_fraction(num: &Num) -> Option<Num> {
    let [numerator, z] = operands_of(num, Operator::Div)? else {
        return None;
    };
    let [x, y] = operands_of(numerator, Operator::Div)? else {
        return None;
    };
    x.div(y.mul(z)).ok()
}

// ========== Pow ==========

/// x ^ 1 -> x
fn power_identity(num: &Num) -> Option<Num> {
    let [base, exponent] = operands_of(num, Operator::Pow)? else {
        return None;
    };
    is_one(exponent).then(|| base.clone())
}

/// x ^ 0 -> 1, then 0 ^ x -> 0, then 1 ^ x -> 1
fn power_collapse(num: &Num) -> Option<Num> {
    let [base, exponent] = operands_of(num, Operator::Pow)? else {
        return None;
    };
    if is_zero(exponent) {
        Some(Num::literal(1))
    } else if is_zero(base) {
        Some(Num::literal(0))
    } else if is_one(base) {
        Some(Num::literal(1))
    } else {
        None
    }
}
