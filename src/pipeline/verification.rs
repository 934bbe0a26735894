//! Scripted input sequences evaluated against the stored equations

use super::state::StateSnapshot;
use super::{Channel, Pipeline};
use crate::expression::Expr;
use log::{debug, warn};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt::Write;

/// Outputs of channels X and Y for one step of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationStep {
    /// Time at which the step starts, the sum of all earlier durations
    pub time: u64,
    /// Input mask applied during the step
    pub mask: u64,
    /// Output of channel X
    pub x: bool,
    /// Output of channel Y
    pub y: bool,
}

/// All steps of one verification run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub steps: Vec<VerificationStep>,
}

impl VerificationReport {
    /// Render as `Time,Mask,X,Y` CSV with one row per step
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Time,Mask,X,Y\n");
        for step in &self.steps {
            // Writing to a String cannot fail
            let _ = writeln!(
                csv,
                "{},{},{},{}",
                step.time,
                step.mask,
                u8::from(step.x),
                u8::from(step.y)
            );
        }
        csv
    }
}

impl Serialize for VerificationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VerificationReport", 2)?;
        state.serialize_field("status", "success")?;
        state.serialize_field("csv", &self.to_csv())?;
        state.end()
    }
}

fn compile_channel(
    pipeline: &Pipeline,
    snapshot: &StateSnapshot,
    channel: Channel,
) -> Option<Expr> {
    match pipeline.compile(snapshot.equation(channel)) {
        Ok(expr) => expr,
        Err(e) => {
            warn!("Channel {} does not compile, treating it as 0: {}", channel, e);
            None
        }
    }
}

fn parse_step(step: &str) -> Option<(u64, u64)> {
    let (mask, duration) = step.split_once(':')?;
    Some((mask.trim().parse().ok()?, duration.trim().parse().ok()?))
}

/// Evaluate channels X and Y over a sequence of timed input masks
///
/// `sequence` is a comma-separated list of `mask:duration` pairs. Each pair
/// produces one step whose time is the sum of the preceding durations.
/// Pairs that do not parse are skipped. A channel that is blank, does not
/// parse or uses a variable outside A-F reads as 0 throughout.
///
/// # Examples
///
/// ```
/// use logic_compiler::pipeline::{run_verification, Channel, ChannelState};
///
/// let state = ChannelState::new();
/// state.set_equation(Channel::X, "A ^ B").unwrap();
/// state.set_equation(Channel::Y, "A * B").unwrap();
///
/// let report = run_verification(&state.snapshot(), "0:100, 1:50, 3:10");
/// assert_eq!(
///     report.to_csv(),
///     "Time,Mask,X,Y\n0,0,0,0\n100,1,1,0\n150,3,0,1\n"
/// );
/// ```
pub fn run_verification(snapshot: &StateSnapshot, sequence: &str) -> VerificationReport {
    run_with(&Pipeline::default(), snapshot, sequence)
}

pub(crate) fn run_with(
    pipeline: &Pipeline,
    snapshot: &StateSnapshot,
    sequence: &str,
) -> VerificationReport {
    let x = compile_channel(pipeline, snapshot, Channel::X);
    let y = compile_channel(pipeline, snapshot, Channel::Y);
    let eval = |expr: &Option<Expr>, mask: u64| expr.as_ref().is_some_and(|e| e.evaluate(mask));

    let mut time = 0u64;
    let mut steps = Vec::new();
    for pair in sequence.split(',') {
        let Some((mask, duration)) = parse_step(pair) else {
            if !pair.trim().is_empty() {
                debug!("Skipping malformed verification step {:?}", pair.trim());
            }
            continue;
        };
        steps.push(VerificationStep {
            time,
            mask,
            x: eval(&x, mask),
            y: eval(&y, mask),
        });
        time = time.saturating_add(duration);
    }

    debug!("Verification finished with {} steps", steps.len());
    VerificationReport { steps }
}
