//! # Logic Compiler
//!
//! This crate compiles textual boolean equations over six variables (`A`-`F`)
//! into everything needed to display and program them: a truth table, a
//! minimized sum-of-products and product-of-sums, and a gate-level netlist.
//!
//! ## Overview
//!
//! Compilation runs in one direction:
//!
//! ```text
//! text --parse--> Expr --evaluate x64--> TruthTable --Quine-McCluskey--> SOP / POS
//!                  \
//!                   `--------------------> Netlist (Cytoscape JSON)
//! ```
//!
//! - [`expression`]: the parser and the [`Expr`] tree, with evaluation and
//!   pretty printing
//! - [`cover`]: truth tables, prime implicants and SOP/POS rendering
//! - [`netlist`]: the gate graph, with associative gates flattened
//! - [`pipeline`]: per-channel orchestration for four outputs X, Y, Z and W,
//!   the shared channel state and the result sinks
//!
//! ## Expressions
//!
//! ```
//! use logic_compiler::{Expr, Minimizable};
//!
//! # fn main() -> Result<(), logic_compiler::ParseError> {
//! // Juxtaposition is AND, ' is postfix NOT, % is NAND and $ is NOR
//! let expr = Expr::parse("AB' + A(B + C)")?;
//! assert!(expr.evaluate(0b001));
//! assert!(!expr.evaluate(0b010));
//!
//! // All prime implicants of the function
//! println!("{}", expr.to_sop());
//! # Ok(())
//! # }
//! ```
//!
//! ## Channels
//!
//! ```
//! use logic_compiler::pipeline::{Channel, ChannelState, CollectingSink, Pipeline};
//!
//! # fn main() -> Result<(), logic_compiler::PipelineError> {
//! let state = ChannelState::new();
//! state.set_equation(Channel::X, "A ^ B")?;
//! state.set_equation(Channel::Y, "A * B")?;
//!
//! let pipeline = Pipeline::default();
//! let mut sink = CollectingSink::new();
//!
//! // Recompiles only when the state changed
//! assert!(pipeline.poll(&state, &mut sink)?);
//! assert!(!pipeline.poll(&state, &mut sink)?);
//!
//! let combined = sink.last_combined().unwrap();
//! assert_eq!(combined.minterms(Channel::Y).len(), 16);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade: pipeline stages at `debug`,
//! channel failures at `warn` and minimization passes at `trace`. Install any
//! logger to see them; the `logicc` binary uses `env_logger`.
//!
//! ## Thread Safety
//!
//! [`Expr`], [`TruthTable`] and [`pipeline::Pipeline`] are plain data and
//! `Send + Sync`. [`pipeline::ChannelState`] guards its contents with a
//! mutex and hands out copies, so it can be shared behind an `Arc` between a
//! writer thread and a polling loop.

// Public modules
pub mod cover;
pub mod error;
pub mod expression;
pub mod netlist;
pub mod pipeline;

// Re-export high-level public API
pub use cover::{Implicant, ImplicantList, Minimizable, Minimized, TruthTable};
pub use error::{PipelineError, StateError};
pub use expression::{
    parse, parse_with_limit, Expr, ExprNode, Operator, ParseError, VariableRangeError,
};
pub use netlist::{Netlist, NetlistError, NetlistLimits};

/// Configuration for the compilation pipeline
///
/// # Examples
///
/// ```
/// use logic_compiler::{NetlistLimits, PipelineConfig};
/// use logic_compiler::pipeline::Pipeline;
///
/// let mut config = PipelineConfig::default();
/// config.max_depth = 64;
/// config.single_netlist = NetlistLimits::COMBINED;
/// let pipeline = Pipeline::new(config);
/// assert_eq!(pipeline.config().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum depth of a parsed expression tree
    ///
    /// **Default:** [`expression::DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,

    /// Budget of a single-channel netlist
    ///
    /// **Default:** [`NetlistLimits::SINGLE`] (8 KiB)
    pub single_netlist: NetlistLimits,

    /// Budget of the combined four-channel netlist
    ///
    /// **Default:** [`NetlistLimits::COMBINED`] (64 KiB)
    pub combined_netlist: NetlistLimits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_depth: expression::DEFAULT_MAX_DEPTH,
            single_netlist: NetlistLimits::SINGLE,
            combined_netlist: NetlistLimits::COMBINED,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}
