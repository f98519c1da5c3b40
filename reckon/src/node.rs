//! Expression nodes
//!
//! A `Num` is a handle to an immutable expression tree. Every node computes
//! its value once, when it is built, so `value()` never recomputes and always
//! returns the same number. "Changing" a tree always builds new nodes.

use crate::cache;
use crate::error::ReckonError;
use crate::operator::Operator;
use reckon_core::{Number, NumberError};
use std::rc::Rc;

/// The four kinds of expression node
#[derive(Debug)]
pub enum Node {
    /// An unnamed numeric constant
    Literal(Number),
    /// A constant with a display name; the value is authoritative
    NamedConstant { name: String, value: Number },
    /// A value computed from operand nodes
    Derived {
        op: Operator,
        operands: Vec<Num>,
        value: Number,
    },
    /// A labeled output; value and rewriting defer to `inner`
    NamedOutput { name: String, inner: Num },
}

/// Shared handle to an expression node
#[derive(Debug, Clone)]
pub struct Num(pub(crate) Rc<Node>);

impl Num {
    // ========== Construction ==========

    /// Interned literal
    pub fn literal(value: impl Into<Number>) -> Self {
        cache::intern(value.into())
    }

    /// Literal parsed from host input such as "250000" or "6.5"
    pub fn parse(text: &str) -> Result<Self, ReckonError> {
        Ok(Self::literal(Number::from_str(text)?))
    }

    pub fn named_constant(name: impl Into<String>, value: impl Into<Number>) -> Self {
        Num(Rc::new(Node::NamedConstant {
            name: name.into(),
            value: value.into(),
        }))
    }

    /// Promote a node to a labeled output
    pub fn named_output(name: impl Into<String>, inner: impl Into<Num>) -> Self {
        Num(Rc::new(Node::NamedOutput {
            name: name.into(),
            inner: inner.into(),
        }))
    }

    /// Build a derived node, evaluating it immediately.
    ///
    /// # Panics
    ///
    /// Panics when the operand count does not match the operator's arity.
    pub fn derived(op: Operator, operands: Vec<Num>) -> Result<Self, NumberError> {
        op.check_arity(operands.len());
        let values: Vec<&Number> = operands.iter().map(Num::value).collect();
        let value = op.apply(&values)?;
        Ok(Self::with_value(op, operands, value))
    }

    /// Build a derived node whose value is already known.
    ///
    /// `value` must equal `op` applied to the operands' values.
    pub(crate) fn with_value(op: Operator, operands: Vec<Num>, value: Number) -> Self {
        op.check_arity(operands.len());
        Num(Rc::new(Node::Derived {
            op,
            operands: merge_siblings(op, operands),
            value,
        }))
    }

    // ========== Inspection ==========

    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Value computed at construction
    pub fn value(&self) -> &Number {
        match self.node() {
            Node::Literal(value)
            | Node::NamedConstant { value, .. }
            | Node::Derived { value, .. } => value,
            Node::NamedOutput { inner, .. } => inner.value(),
        }
    }

    /// Operator of a derived node
    pub fn op(&self) -> Option<Operator> {
        match self.node() {
            Node::Derived { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Operands of a derived node; empty for every other kind
    pub fn operands(&self) -> &[Num] {
        match self.node() {
            Node::Derived { operands, .. } => operands,
            _ => &[],
        }
    }

    /// Display name of a named constant or named output
    pub fn name(&self) -> Option<&str> {
        match self.node() {
            Node::NamedConstant { name, .. } | Node::NamedOutput { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Value of a literal or named constant
    pub fn constant_value(&self) -> Option<&Number> {
        match self.node() {
            Node::Literal(value) | Node::NamedConstant { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.node(), Node::Literal(_))
    }

    /// Identity comparison; two equal values may still be distinct nodes
    pub fn ptr_eq(&self, other: &Num) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Lossy conversion for chart axes and other primitive consumers
    pub fn to_f64(&self) -> Option<f64> {
        self.value().to_f64()
    }
}

/// Splice same-operator Add/Mul operands into one flat list, keeping order.
fn merge_siblings(op: Operator, operands: Vec<Num>) -> Vec<Num> {
    if !op.is_associative() {
        return operands;
    }
    let mut merged = Vec::with_capacity(operands.len());
    for operand in operands {
        let nested = match operand.node() {
            Node::Derived { op: child, operands, .. } if *child == op => Some(operands.clone()),
            _ => None,
        };
        match nested {
            Some(children) => merged.extend(children),
            None => merged.push(operand),
        }
    }
    merged
}

impl From<Number> for Num {
    fn from(value: Number) -> Self {
        Num::literal(value)
    }
}

impl From<i64> for Num {
    fn from(value: i64) -> Self {
        Num::literal(value)
    }
}

impl From<i32> for Num {
    fn from(value: i32) -> Self {
        Num::literal(value)
    }
}

impl From<&Num> for Num {
    fn from(num: &Num) -> Self {
        num.clone()
    }
}
