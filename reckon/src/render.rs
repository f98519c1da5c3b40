//! Expression renderer
//!
//! Renders expression trees back to text, inserting grouping only where
//! precedence or associativity requires it.

use crate::error::ReckonError;
use crate::node::{Node, Num};
use crate::operator::Operator;
use reckon_core::Number;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Display format for numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Fixed decimal places for values with no finite expansion (default);
    /// terminating values always print exactly
    Decimal(u32),
    /// Significant figures with scientific notation for large/small values;
    /// terminating values with no more digits than that print exactly
    SigFigs(u32),
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::Decimal(10)
    }
}

/// Display settings a host can persist and load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render named outputs and constants by their expansion
    pub expand: bool,
    pub number_format: NumberFormat,
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Load from JSON, e.g. `{"expand": true, "number_format": {"sigfigs": 4}}`.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ReckonError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Expression renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    expand: bool,
    format: NumberFormat,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            expand: config.expand,
            format: config.number_format,
        }
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Render a tree
    pub fn render(&self, num: &Num) -> String {
        match num.node() {
            Node::Literal(value) => self.render_number(value),
            Node::NamedConstant { name, value } => {
                if self.expand {
                    self.render_number(value)
                } else {
                    name.clone()
                }
            }
            Node::NamedOutput { name, inner } => {
                if self.expand {
                    self.render(inner)
                } else {
                    name.clone()
                }
            }
            Node::Derived { op, operands, .. } => self.render_derived(*op, operands),
        }
    }

    fn render_derived(&self, op: Operator, operands: &[Num]) -> String {
        match op {
            Operator::Add | Operator::Mul => operands
                .iter()
                .map(|operand| self.render_operand(op, operand))
                .collect::<Vec<_>>()
                .join(&format!(" {} ", op.symbol())),
            Operator::Sub => format!(
                "{} - {}",
                self.render_operand(op, &operands[0]),
                self.render_operand(op, &operands[1])
            ),
            // Fraction notation delimits its own operands
            Operator::Div => format!(
                "frac({}, {})",
                self.render(&operands[0]),
                self.render(&operands[1])
            ),
            Operator::Floor => format!("floor({})", self.render(&operands[0])),
            Operator::Pow => format!(
                "{{{}}} ^ {{{}}}",
                self.render_operand(op, &operands[0]),
                self.render_operand(op, &operands[1])
            ),
        }
    }

    fn render_operand(&self, parent: Operator, child: &Num) -> String {
        let text = self.render(child);
        if self.needs_grouping(parent, child) {
            format!("{{({})}}", text)
        } else {
            text
        }
    }

    /// Whether `child` must be parenthesized under `parent`.
    ///
    /// # Panics
    ///
    /// Panics when an Add or Mul sits directly under the same operator; every
    /// constructor flattens those, so reaching it means flattening broke.
    fn needs_grouping(&self, parent: Operator, child: &Num) -> bool {
        let Some((op, through_output)) = self.shown_operator(child) else {
            return false;
        };
        if op == Operator::Div {
            return false;
        }
        match op.precedence().cmp(&parent.precedence()) {
            Ordering::Greater => false,
            Ordering::Less => true,
            Ordering::Equal => {
                assert!(
                    through_output || op != parent || !op.is_associative(),
                    "unflattened {:?} directly under {:?}",
                    op,
                    parent
                );
                true
            }
        }
    }

    /// Operator a child displays as, and whether it shows through a named output
    fn shown_operator(&self, child: &Num) -> Option<(Operator, bool)> {
        match child.node() {
            Node::Derived { op, .. } => Some((*op, false)),
            Node::NamedOutput { inner, .. } if self.expand => {
                self.shown_operator(inner).map(|(op, _)| (op, true))
            }
            _ => None,
        }
    }

    fn render_number(&self, value: &Number) -> String {
        match self.format {
            NumberFormat::Decimal(places) => match value.decimal_places() {
                Some(_) => value.as_exact(),
                None => value.as_decimal(places),
            },
            NumberFormat::SigFigs(sigfigs) => match value.significant_digits() {
                Some(digits) if digits <= sigfigs => value.as_exact(),
                _ => value.as_sigfigs(sigfigs),
            },
        }
    }
}

impl Num {
    /// Render with names (`expand = false`) or full derivation (`expand = true`)
    pub fn render(&self, expand: bool) -> String {
        Renderer::new().with_expand(expand).render(self)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
