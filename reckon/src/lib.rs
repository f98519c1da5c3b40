//! Reckon - Symbolic numeric expressions over exact decimals
//!
//! Every quantity a calculator produces is a `Num`: an immutable expression
//! tree that carries its exact value alongside the formula that produced it.
//! Trees can be simplified without changing their value and rendered either
//! by name or as a full derivation.
//!
//! ```
//! use reckon::prelude::*;
//!
//! let rate = Num::named_constant("rate", Number::from_str("0.06").unwrap());
//! let monthly = Num::named_output("monthly rate", rate.div(constants::months_per_year()).unwrap());
//! assert_eq!(monthly.value().to_string(), "0.005");
//! assert_eq!(monthly.render(false), "monthly rate");
//! assert_eq!(monthly.render(true), "frac(0.06, 12)");
//! ```

mod cache;
pub mod constants;
mod error;
mod node;
mod operator;
mod ops;
mod proptests;
mod render;
mod rules;
mod simplify;
mod trace;

pub use cache::{cached_literals, prune_literals, LiteralCache};
pub use error::{codes, ReckonError};
pub use node::{Node, Num};
pub use operator::{Arity, Operator, Precedence};
pub use reckon_core::{Number, NumberError};
pub use render::{DisplayConfig, NumberFormat, Renderer};
pub use rules::{Rule, RULES};
pub use simplify::{apply_rule, rewrite_first, run_pass, simplify_with};
pub use trace::TraceStep;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::constants;
    pub use crate::{DisplayConfig, Num, Number, NumberError, ReckonError, Renderer};
}
