//! Literal interning
//!
//! The cache maps values to weakly held literal nodes, so it never keeps a
//! literal alive on its own. Dropped entries are swept by `prune`, which the
//! host triggers; nothing is evicted implicitly. Interning is only an
//! optimization: every computation compares nodes by value.

use crate::node::{Node, Num};
use reckon_core::Number;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Registry of live literal nodes, at most one per distinct value
#[derive(Debug, Default)]
pub struct LiteralCache {
    entries: HashMap<Number, Weak<Node>>,
}

impl LiteralCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live literal for `value`, creating and registering one on a miss
    pub fn intern(&mut self, value: Number) -> Num {
        if let Some(node) = self.entries.get(&value).and_then(Weak::upgrade) {
            trace!(%value, "literal cache hit");
            return Num(node);
        }
        trace!(%value, "literal cache miss");
        let node = Rc::new(Node::Literal(value.clone()));
        self.entries.insert(value, Rc::downgrade(&node));
        Num(node)
    }

    /// Drop entries whose literal is no longer referenced; returns how many
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, node| node.strong_count() > 0);
        let evicted = before - self.entries.len();
        debug!(evicted, remaining = self.entries.len(), "pruned literal cache");
        evicted
    }

    /// Registered entries, including dead ones not yet pruned
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

thread_local! {
    // Nodes are `Rc`, so each thread interns into its own registry.
    static LITERALS: RefCell<LiteralCache> = RefCell::new(LiteralCache::new());
}

pub(crate) fn intern(value: Number) -> Num {
    LITERALS.with(|cache| cache.borrow_mut().intern(value))
}

/// Sweep this thread's literal cache; returns the number of evicted entries
pub fn prune_literals() -> usize {
    LITERALS.with(|cache| cache.borrow_mut().prune())
}

/// Entries currently registered in this thread's literal cache
pub fn cached_literals() -> usize {
    LITERALS.with(|cache| cache.borrow().len())
}
