//! Channel compilation pipeline
//!
//! The pipeline drives the other modules for the four output channels X, Y,
//! Z and W: an equation is parsed, checked against the A-F variable range,
//! minimized into SOP and POS forms and turned into a netlist. Results go to
//! a [`ResultSink`].
//!
//! [`Pipeline`] itself holds only configuration. Equations live in a
//! [`ChannelState`], which the caller passes in where a stored value is
//! needed, so one pipeline can be shared freely between threads.
//!
//! # Examples
//!
//! ```
//! use logic_compiler::pipeline::{Channel, CollectingSink, Mode, Pipeline};
//!
//! let pipeline = Pipeline::default();
//! let mut sink = CollectingSink::new();
//!
//! let result = pipeline
//!     .process_equation(Channel::X, "A*B + A*B'", Mode::Program, &mut sink)
//!     .unwrap();
//! assert_eq!(result.sop, "A");
//! assert_eq!(result.pos, "(A)");
//!
//! // Failures are reported per channel and leave earlier results alone
//! assert!(pipeline
//!     .process_equation(Channel::X, "A +", Mode::Program, &mut sink)
//!     .is_err());
//! assert_eq!(sink.latest(Channel::X).unwrap().sop, "A");
//! assert_eq!(sink.failures.len(), 1);
//! ```

mod error;
mod sink;
mod state;
mod verification;

pub use error::StateError;
pub use sink::{
    ChannelFailure, ChannelResult, CollectingSink, CombinedResult, JsonSink, ResultSink,
    StateReport,
};
pub use state::{ChannelState, StateSnapshot, INPUT_MASK, MAX_EQUATION_LEN};
pub use verification::{run_verification, VerificationReport, VerificationStep};

use crate::cover::{format_sop, Minimizable, Minimized, TruthTable, CONSTANT_FALSE, CONSTANT_TRUE};
use crate::error::PipelineError;
use crate::expression::{parse_with_limit, Expr};
use crate::netlist::{self, Netlist};
use crate::PipelineConfig;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Channel {
    X,
    Y,
    Z,
    W,
}

impl Channel {
    /// All channels in display order
    pub const ALL: [Channel; 4] = [Channel::X, Channel::Y, Channel::Z, Channel::W];

    /// The channel name, also used as the label of its output node
    pub fn label(self) -> &'static str {
        match self {
            Channel::X => "X",
            Channel::Y => "Y",
            Channel::Z => "Z",
            Channel::W => "W",
        }
    }

    /// Position in [`Channel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Channel::X),
            "y" | "Y" => Ok(Channel::Y),
            "z" | "Z" => Ok(Channel::Z),
            "w" | "W" => Ok(Channel::W),
            other => Err(StateError::UnknownChannel(other.to_string())),
        }
    }
}

/// Whether a result is persisted or only previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The equation is the channel's stored value
    Program,
    /// A what-if evaluation that is not stored
    Preview,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Program => write!(f, "program"),
            Mode::Preview => write!(f, "preview"),
        }
    }
}

/// Stored form of a minterm-programmed function
///
/// The constant strings do not parse, so they are replaced by equations
/// that do.
fn equation_from_sop(sop: String) -> String {
    match sop.as_str() {
        CONSTANT_FALSE => String::new(),
        CONSTANT_TRUE => "A + A'".to_string(),
        _ => sop,
    }
}

/// Drives parsing, minimization and netlist generation for channels
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse and range-check one equation
    ///
    /// A blank equation is the constant-false function and yields `None`.
    pub fn compile(&self, expression: &str) -> Result<Option<Expr>, PipelineError> {
        if expression.trim().is_empty() {
            return Ok(None);
        }
        let expr = parse_with_limit(expression, self.config.max_depth)?;
        expr.check_variable_range()?;
        Ok(Some(expr))
    }

    fn build_result(
        &self,
        channel: Channel,
        expression: &str,
        mode: Mode,
    ) -> Result<ChannelResult, PipelineError> {
        let (minimized, netlist) = match self.compile(expression)? {
            Some(expr) => (
                Minimized::from_expr(&expr),
                netlist::generate(channel.label(), &expr, self.config.single_netlist)?,
            ),
            None => (Minimized::from_table(TruthTable::default()), Netlist::default()),
        };

        Ok(ChannelResult {
            mode,
            target: channel,
            sop: minimized.sop,
            pos: minimized.pos,
            minterms: minimized.minterms,
            netlist,
        })
    }

    /// Compile one channel and emit the result
    ///
    /// On success the result is sent to `sink` and returned. On failure the
    /// sink receives a [`ChannelFailure`] instead and the error is returned;
    /// nothing else is emitted for the channel.
    ///
    /// # Errors
    ///
    /// Any [`PipelineError`] from parsing, range checking, netlist generation
    /// or the sink itself.
    pub fn process_equation<S: ResultSink + ?Sized>(
        &self,
        channel: Channel,
        expression: &str,
        mode: Mode,
        sink: &mut S,
    ) -> Result<ChannelResult, PipelineError> {
        debug!("Compiling {} ({}): {:?}", channel, mode, expression);
        match self.build_result(channel, expression, mode) {
            Ok(result) => {
                debug!(
                    "{}: SOP {} | POS {} | {} minterms",
                    channel,
                    result.sop,
                    result.pos,
                    result.minterms.len()
                );
                sink.channel_result(&result)?;
                Ok(result)
            }
            Err(err) => {
                warn!("{} failed to compile: {}", channel, err);
                sink.channel_failure(&ChannelFailure {
                    mode,
                    target: channel,
                    message: err.to_string(),
                    position: err.position(),
                })?;
                Err(err)
            }
        }
    }

    /// Preview an equation without storing it
    ///
    /// The equation is compiled in [`Mode::Preview`], then a combined view is
    /// emitted with `expression` standing in for `channel` and the stored
    /// equations for the other channels. The combined view is emitted even if
    /// the preview itself fails; `state` is only read.
    pub fn process_stateless<S: ResultSink + ?Sized>(
        &self,
        channel: Channel,
        expression: &str,
        state: &ChannelState,
        sink: &mut S,
    ) -> Result<ChannelResult, PipelineError> {
        info!("Previewing {}: {:?}", channel, expression);
        let preview = self.process_equation(channel, expression, Mode::Preview, sink);
        if let Err(PipelineError::Io(_)) = &preview {
            return preview;
        }

        let snapshot = state.snapshot();
        self.send_combined_update(snapshot.with_equation(channel, expression), sink)?;
        preview
    }

    /// Recompute the combined view of all four channels
    ///
    /// A channel that is blank or does not compile contributes no netlist
    /// and an empty minterm list.
    ///
    /// # Errors
    ///
    /// Fails only if the combined netlist exceeds its budget or the sink
    /// fails.
    pub fn send_combined_update<S: ResultSink + ?Sized>(
        &self,
        equations: [&str; 4],
        sink: &mut S,
    ) -> Result<CombinedResult, PipelineError> {
        let mut combined = CombinedResult::default();
        let mut trees: [Option<Expr>; 4] = Default::default();

        for channel in Channel::ALL {
            match self.compile(equations[channel.index()]) {
                Ok(Some(expr)) => {
                    *combined.minterms_mut(channel) = TruthTable::minterms(&expr);
                    trees[channel.index()] = Some(expr);
                }
                Ok(None) => {}
                Err(err) => debug!("{} left out of the combined view: {}", channel, err),
            }
        }

        let channels = Channel::ALL.map(|channel| (channel.label(), trees[channel.index()].as_ref()));
        combined.elements = netlist::generate_combined(&channels, self.config.combined_netlist)?;
        debug!("Combined view: {} elements", combined.elements.len());

        sink.combined_result(&combined)?;
        Ok(combined)
    }

    /// Store the function given by a minterm list as a channel's equation
    ///
    /// `csv` lists the true rows, e.g. `"0, 15, 63"`. The stored equation is
    /// the SOP of the prime implicants; the constant functions are stored as
    /// an empty equation (false) and `A + A'` (true). Returns the stored text.
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_compiler::pipeline::{Channel, ChannelState, Pipeline};
    ///
    /// let state = ChannelState::new();
    /// let stored = Pipeline::default()
    ///     .program_from_minterms(Channel::Y, "1, 3", &state)
    ///     .unwrap();
    /// assert_eq!(stored, "AC'D'E'F'");
    /// assert_eq!(state.equation(Channel::Y), stored);
    /// ```
    pub fn program_from_minterms(
        &self,
        channel: Channel,
        csv: &str,
        state: &ChannelState,
    ) -> Result<String, PipelineError> {
        let table = TruthTable::from_csv(csv)?;
        let equation = equation_from_sop(format_sop(&table.prime_implicants()));
        info!("{} programmed from minterms [{}]: {}", channel, csv.trim(), equation);
        state.set_equation(channel, &equation)?;
        Ok(equation)
    }

    /// Preview the function given by a minterm list without storing it
    ///
    /// Equivalent to [`Pipeline::process_stateless`] on the recovered SOP.
    pub fn preview_minterms<S: ResultSink + ?Sized>(
        &self,
        channel: Channel,
        csv: &str,
        state: &ChannelState,
        sink: &mut S,
    ) -> Result<ChannelResult, PipelineError> {
        let table = TruthTable::from_csv(csv)?;
        let equation = equation_from_sop(table.to_sop());
        debug!("{} minterm preview recovered {:?}", channel, equation);
        self.process_stateless(channel, &equation, state, sink)
    }

    /// Evaluate the stored X and Y equations over a timed input sequence
    /// and emit the report, see [`run_verification`]
    ///
    /// Channels are compiled with this pipeline's limits, so an equation
    /// rejected by [`Pipeline::compile`] reads as 0 throughout.
    pub fn verify<S: ResultSink + ?Sized>(
        &self,
        state: &ChannelState,
        sequence: &str,
        sink: &mut S,
    ) -> Result<VerificationReport, PipelineError> {
        info!("Running verification sequence");
        let report = verification::run_with(self, &state.snapshot(), sequence);
        sink.verification(&report)?;
        Ok(report)
    }

    /// Recompile everything if the state changed since the last poll
    ///
    /// Takes the dirty flag; if it was set, every channel is compiled in
    /// [`Mode::Program`], the validity flags are updated when they differ,
    /// the combined view is emitted and finally a [`StateReport`] with the
    /// outputs at the live input mask. Returns whether anything ran.
    ///
    /// A channel that fails to compile is marked invalid; only sink errors
    /// and combined netlist overflow abort the poll. After a sink error the
    /// state is marked dirty again so the next poll redoes the work.
    pub fn poll<S: ResultSink + ?Sized>(
        &self,
        state: &ChannelState,
        sink: &mut S,
    ) -> Result<bool, PipelineError> {
        if !state.take_dirty() {
            return Ok(false);
        }

        match self.recompile(state, sink) {
            Ok(()) => Ok(true),
            Err(PipelineError::Io(err)) => {
                warn!("Sink failed during poll, keeping the change pending: {}", err);
                state.touch();
                Err(PipelineError::Io(err))
            }
            Err(err) => Err(err),
        }
    }

    fn recompile<S: ResultSink + ?Sized>(
        &self,
        state: &ChannelState,
        sink: &mut S,
    ) -> Result<(), PipelineError> {
        let snapshot = state.snapshot();
        info!("State change detected, recompiling all channels");

        let mut valid = [false; 4];
        let mut outputs = [false; 4];
        for channel in Channel::ALL {
            match self.process_equation(channel, snapshot.equation(channel), Mode::Program, sink) {
                Ok(result) => {
                    valid[channel.index()] = true;
                    outputs[channel.index()] = result.minterms.contains(snapshot.inputs);
                }
                Err(PipelineError::Io(err)) => return Err(PipelineError::Io(err)),
                Err(_) => {}
            }
        }

        if valid != snapshot.valid {
            state.set_validation(valid);
        }

        self.send_combined_update(snapshot.equations(), sink)?;

        let report = StateReport {
            snapshot: StateSnapshot { valid, ..snapshot },
            outputs,
        };
        sink.state(&report)?;
        Ok(())
    }
}
