//! Named constants shared by financial formulas
//!
//! Each call returns a fresh named constant; equal constants compare equal by
//! value and render by name.

use crate::node::Num;

// ============================================================================
// Identities
// ============================================================================

pub fn zero() -> Num {
    Num::named_constant("zero", 0)
}

pub fn one() -> Num {
    Num::named_constant("one", 1)
}

// ============================================================================
// Calendar and rate conversions
// ============================================================================

pub fn months_per_year() -> Num {
    Num::named_constant("months per year", 12)
}

/// Divisor turning a percentage rate into a fraction
pub fn percent() -> Num {
    Num::named_constant("percent", 100)
}
