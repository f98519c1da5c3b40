//! Derivation traces
//!
//! Lists every named output in a tree with the formula it was computed from,
//! so a host can show its work one labeled quantity at a time.

use crate::node::{Node, Num};
use crate::render::Renderer;
use reckon_core::Number;
use serde::Serialize;
use std::collections::HashSet;

/// Single step in a derivation trace
#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    pub name: String,
    /// Wrapped expression with other outputs and constants shown by name
    pub formula: String,
    pub result: Number,
    /// Named outputs and constants the formula refers to directly
    pub dependencies: Vec<String>,
}

impl Num {
    /// One step per distinct named output, each after the outputs it uses
    pub fn trace(&self) -> Vec<TraceStep> {
        let mut steps = Vec::new();
        let mut seen = HashSet::new();
        collect_steps(self, &mut steps, &mut seen);
        steps
    }

    /// The trace as a markdown table
    pub fn explain(&self) -> String {
        let mut output = String::new();
        output.push_str("| name | formula | result |\n");
        output.push_str("|------|---------|--------|\n");
        for step in self.trace() {
            output.push_str(&format!("| {} | {} | {} |\n", step.name, step.formula, step.result));
        }
        output
    }
}

fn collect_steps(num: &Num, steps: &mut Vec<TraceStep>, seen: &mut HashSet<String>) {
    match num.node() {
        Node::NamedOutput { name, inner } => {
            if !seen.insert(name.clone()) {
                return;
            }
            collect_steps(inner, steps, seen);
            let mut dependencies = Vec::new();
            collect_dependencies(inner, &mut dependencies);
            steps.push(TraceStep {
                name: name.clone(),
                formula: Renderer::new().render(inner),
                result: inner.value().clone(),
                dependencies,
            });
        }
        Node::Derived { operands, .. } => {
            for operand in operands {
                collect_steps(operand, steps, seen);
            }
        }
        Node::Literal(_) | Node::NamedConstant { .. } => {}
    }
}

fn collect_dependencies(num: &Num, names: &mut Vec<String>) {
    match num.node() {
        Node::NamedOutput { name, .. } | Node::NamedConstant { name, .. } => {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Node::Derived { operands, .. } => {
            for operand in operands {
                collect_dependencies(operand, names);
            }
        }
        Node::Literal(_) => {}
    }
}
