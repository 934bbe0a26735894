//! Result payloads and the sinks that receive them

use super::state::StateSnapshot;
use super::verification::VerificationReport;
use super::{Channel, Mode};
use crate::cover::TruthTable;
use crate::netlist::Netlist;
use serde::Serialize;
use std::io::{self, Write};

/// Compilation result for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelResult {
    /// Whether this result is persisted or a preview
    pub mode: Mode,
    /// The channel that was compiled
    pub target: Channel,
    /// Minimized sum of products
    pub sop: String,
    /// Minimized product of sums
    pub pos: String,
    /// Rows on which the equation is true
    pub minterms: TruthTable,
    /// Gate-level view of the parsed equation
    pub netlist: Netlist,
}

/// Unified view of all four channels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedResult {
    #[serde(rename = "mintermsX")]
    pub minterms_x: TruthTable,
    #[serde(rename = "mintermsY")]
    pub minterms_y: TruthTable,
    #[serde(rename = "mintermsZ")]
    pub minterms_z: TruthTable,
    #[serde(rename = "mintermsW")]
    pub minterms_w: TruthTable,
    /// One netlist holding every channel that compiled
    pub elements: Netlist,
}

impl CombinedResult {
    /// The minterms of one channel
    pub fn minterms(&self, channel: Channel) -> &TruthTable {
        match channel {
            Channel::X => &self.minterms_x,
            Channel::Y => &self.minterms_y,
            Channel::Z => &self.minterms_z,
            Channel::W => &self.minterms_w,
        }
    }

    pub(crate) fn minterms_mut(&mut self, channel: Channel) -> &mut TruthTable {
        match channel {
            Channel::X => &mut self.minterms_x,
            Channel::Y => &mut self.minterms_y,
            Channel::Z => &mut self.minterms_z,
            Channel::W => &mut self.minterms_w,
        }
    }
}

/// Notification that a channel failed to compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelFailure {
    pub mode: Mode,
    pub target: Channel,
    /// Human-readable reason
    pub message: String,
    /// Byte offset in the equation, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// Channel state broadcast after every recompile
///
/// Serializes as the snapshot's fields plus `outputs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    #[serde(flatten)]
    pub snapshot: StateSnapshot,
    /// Value of each channel at the snapshot's input mask; false for a
    /// channel that does not compile
    pub outputs: [bool; 4],
}

impl StateReport {
    /// Live output of `channel`
    pub fn output(&self, channel: Channel) -> bool {
        self.outputs[channel.index()]
    }
}

/// Receiver of pipeline output
///
/// Implementations decide where results go: a socket, a log, a test
/// buffer. Errors returned by a sink abort the current pipeline call.
pub trait ResultSink {
    /// A channel compiled successfully
    fn channel_result(&mut self, result: &ChannelResult) -> io::Result<()>;

    /// A combined view was recomputed
    fn combined_result(&mut self, result: &CombinedResult) -> io::Result<()>;

    /// A channel failed to compile
    fn channel_failure(&mut self, _failure: &ChannelFailure) -> io::Result<()> {
        Ok(())
    }

    /// A verification run finished
    fn verification(&mut self, _report: &VerificationReport) -> io::Result<()> {
        Ok(())
    }

    /// The stored state was recompiled
    fn state(&mut self, _report: &StateReport) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that keeps everything it receives
///
/// The latest result per channel is kept separately so that a failure can be
/// checked not to disturb an earlier good result.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    /// Every channel result in arrival order
    pub results: Vec<ChannelResult>,
    /// Every combined result in arrival order
    pub combined: Vec<CombinedResult>,
    /// Every failure in arrival order
    pub failures: Vec<ChannelFailure>,
    /// Every verification report in arrival order
    pub reports: Vec<VerificationReport>,
    /// Every state report in arrival order
    pub states: Vec<StateReport>,
    latest: [Option<ChannelResult>; 4],
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        CollectingSink::default()
    }

    /// The most recent successful result for `channel`
    pub fn latest(&self, channel: Channel) -> Option<&ChannelResult> {
        self.latest[channel.index()].as_ref()
    }

    /// The most recent combined result
    pub fn last_combined(&self) -> Option<&CombinedResult> {
        self.combined.last()
    }
}

impl ResultSink for CollectingSink {
    fn channel_result(&mut self, result: &ChannelResult) -> io::Result<()> {
        self.latest[result.target.index()] = Some(result.clone());
        self.results.push(result.clone());
        Ok(())
    }

    fn combined_result(&mut self, result: &CombinedResult) -> io::Result<()> {
        self.combined.push(result.clone());
        Ok(())
    }

    fn channel_failure(&mut self, failure: &ChannelFailure) -> io::Result<()> {
        self.failures.push(failure.clone());
        Ok(())
    }

    fn verification(&mut self, report: &VerificationReport) -> io::Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn state(&mut self, report: &StateReport) -> io::Result<()> {
        self.states.push(report.clone());
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Packet<'a> {
    Result(&'a ChannelResult),
    Combined(&'a CombinedResult),
    Error(&'a ChannelFailure),
    Verification(&'a VerificationReport),
    State(&'a StateReport),
}

/// Sink that writes one JSON object per line
///
/// Each payload carries a `type` field: `result`, `combined`, `error`,
/// `verification` or `state`.
///
/// # Examples
///
/// ```
/// use logic_compiler::pipeline::{Channel, JsonSink, Mode, Pipeline};
///
/// let mut out = Vec::new();
/// let pipeline = Pipeline::default();
/// pipeline
///     .process_equation(Channel::X, "A", Mode::Program, &mut JsonSink::new(&mut out))
///     .unwrap();
///
/// let line = String::from_utf8(out).unwrap();
/// assert!(line.starts_with(r#"{"type":"result","mode":"program","target":"X""#));
/// ```
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        JsonSink { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, packet: Packet<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &packet)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn channel_result(&mut self, result: &ChannelResult) -> io::Result<()> {
        self.emit(Packet::Result(result))
    }

    fn combined_result(&mut self, result: &CombinedResult) -> io::Result<()> {
        self.emit(Packet::Combined(result))
    }

    fn channel_failure(&mut self, failure: &ChannelFailure) -> io::Result<()> {
        self.emit(Packet::Error(failure))
    }

    fn verification(&mut self, report: &VerificationReport) -> io::Result<()> {
        self.emit(Packet::Verification(report))
    }

    fn state(&mut self, report: &StateReport) -> io::Result<()> {
        self.emit(Packet::State(report))
    }
}
