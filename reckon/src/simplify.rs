//! Fixed-point rewriting driver
//!
//! A pass walks the rule list in order. Each rule is applied to the first
//! matching subtree (pre-order, operands left to right) again and again until
//! it matches nowhere. Passes repeat until one fires no rule at all.

use crate::node::{Node, Num};
use crate::rules::{Rule, RULES};
use tracing::debug;

impl Num {
    /// Simplify with the standard rule set; the value never changes
    pub fn simplify(&self) -> Num {
        simplify_with(self, &RULES)
    }
}

/// Run passes of `rules` until a pass changes nothing
pub fn simplify_with(num: &Num, rules: &[Rule]) -> Num {
    let mut current = num.clone();
    let mut passes = 0usize;
    let mut hits = 0usize;
    loop {
        let (next, fired) = count_pass(&current, rules);
        passes += 1;
        hits += fired;
        current = next;
        if fired == 0 {
            break;
        }
    }
    debug!(passes, hits, "simplification reached a fixed point");
    current
}

/// One pass over `rules`; reports whether any rule fired
pub fn run_pass(num: &Num, rules: &[Rule]) -> (Num, bool) {
    let (next, fired) = count_pass(num, rules);
    (next, fired > 0)
}

/// One pass over `rules`; counts the rules that fired
fn count_pass(num: &Num, rules: &[Rule]) -> (Num, usize) {
    rules
        .iter()
        .fold((num.clone(), 0), |(current, count), rule| {
            let (next, fired) = apply_rule(&current, rule);
            (next, count + usize::from(fired))
        })
}

/// Apply one rule until it matches nowhere in the tree
pub fn apply_rule(num: &Num, rule: &Rule) -> (Num, bool) {
    let mut current = num.clone();
    let mut fired = false;
    while let Some(next) = rewrite_first(&current, rule) {
        debug!(
            rule = rule.name,
            before = %current.render(true),
            after = %next.render(true),
            "rewrite"
        );
        current = next;
        fired = true;
    }
    (current, fired)
}

/// Rewrite the first subtree `rule` matches, if any.
///
/// Named outputs never match themselves; the rewrite happens inside and the
/// result keeps the name.
pub fn rewrite_first(num: &Num, rule: &Rule) -> Option<Num> {
    match num.node() {
        Node::NamedOutput { name, inner } => {
            rewrite_first(inner, rule).map(|inner| Num::named_output(name.clone(), inner))
        }
        Node::Derived { op, operands, value } => {
            if let Some(replacement) = (rule.apply)(num) {
                return Some(replacement);
            }
            operands.iter().enumerate().find_map(|(i, operand)| {
                rewrite_first(operand, rule).map(|replacement| {
                    let mut rebuilt = operands.clone();
                    rebuilt[i] = replacement;
                    // The replacement has the same value, so this node does too
                    Num::with_value(*op, rebuilt, value.clone())
                })
            })
        }
        Node::Literal(_) | Node::NamedConstant { .. } => (rule.apply)(num),
    }
}
