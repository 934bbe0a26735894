//! Shared channel state
//!
//! [`ChannelState`] is the single store of the four channel equations, the
//! live input mask and the per-channel validity flags. Writers (a network
//! listener, an editor, a K-map programmer) update it through validated
//! setters; the compile loop reads it with [`ChannelState::snapshot`], which
//! copies everything out so the lock is never held while compiling.

use super::error::StateError;
use super::Channel;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum length of a stored equation in bytes
pub const MAX_EQUATION_LEN: usize = 255;

/// Mask of the six input variables A-F
pub const INPUT_MASK: u8 = 0b11_1111;

/// A copy of the channel state at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Equation text per channel, in X, Y, Z, W order
    pub equations: [String; 4],
    /// Live value of the input variables, bit `i` is variable `'A' + i`
    pub inputs: u8,
    /// Whether each channel's equation last compiled successfully
    pub valid: [bool; 4],
    /// Whether anything changed since the dirty flag was last taken
    pub dirty: bool,
}

impl StateSnapshot {
    /// The stored equation of `channel`
    pub fn equation(&self, channel: Channel) -> &str {
        &self.equations[channel.index()]
    }

    /// Whether `channel` last compiled successfully
    pub fn is_valid(&self, channel: Channel) -> bool {
        self.valid[channel.index()]
    }

    /// All four equations, in X, Y, Z, W order
    pub fn equations(&self) -> [&str; 4] {
        Channel::ALL.map(|channel| self.equation(channel))
    }

    /// The four equations with `channel` replaced by `equation`
    ///
    /// Used for what-if views: nothing is written back to the store.
    pub fn with_equation<'a>(&'a self, channel: Channel, equation: &'a str) -> [&'a str; 4] {
        let mut equations = self.equations();
        equations[channel.index()] = equation;
        equations
    }
}

/// Mutex-guarded store of the four channel equations
///
/// A fresh store starts dirty so that the first poll compiles everything.
///
/// # Examples
///
/// ```
/// use logic_compiler::pipeline::{Channel, ChannelState};
///
/// let state = ChannelState::new();
/// assert!(state.take_dirty());
///
/// state.set_equation(Channel::X, "A*B").unwrap();
/// assert!(state.take_dirty());
/// assert!(!state.take_dirty());
///
/// let snapshot = state.snapshot();
/// assert_eq!(snapshot.equation(Channel::X), "A*B");
/// ```
#[derive(Debug)]
pub struct ChannelState {
    inner: Mutex<StateSnapshot>,
}

impl Default for ChannelState {
    fn default() -> Self {
        ChannelState::new()
    }
}

impl ChannelState {
    /// Create an empty, dirty store
    pub fn new() -> Self {
        ChannelState {
            inner: Mutex::new(StateSnapshot {
                dirty: true,
                ..StateSnapshot::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StateSnapshot> {
        // The snapshot has no invariants a panicking writer could break
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy out the whole state
    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().clone()
    }

    /// The stored equation of `channel`
    pub fn equation(&self, channel: Channel) -> String {
        self.lock().equations[channel.index()].clone()
    }

    /// Store a new equation for `channel` and mark the state dirty
    ///
    /// The text is stored as given (after trimming surrounding whitespace);
    /// it is not parsed here.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EquationTooLong`] if the trimmed text exceeds
    /// [`MAX_EQUATION_LEN`] bytes. The stored equation is left unchanged.
    pub fn set_equation(&self, channel: Channel, equation: &str) -> Result<(), StateError> {
        let equation = equation.trim();
        if equation.len() > MAX_EQUATION_LEN {
            return Err(StateError::EquationTooLong {
                channel,
                len: equation.len(),
                max: MAX_EQUATION_LEN,
            });
        }

        let mut state = self.lock();
        state.equations[channel.index()] = equation.to_string();
        state.dirty = true;
        debug!("Channel {} set to {:?}", channel, equation);
        Ok(())
    }

    /// Update the live input mask, keeping only bits A-F
    ///
    /// A change marks the state dirty so the next poll reports the channel
    /// outputs at the new mask.
    pub fn set_inputs(&self, mask: u8) {
        let mut state = self.lock();
        let mask = mask & INPUT_MASK;
        if state.inputs != mask {
            state.inputs = mask;
            state.dirty = true;
        }
    }

    /// The live input mask
    pub fn inputs(&self) -> u8 {
        self.lock().inputs
    }

    /// Record which channels compiled successfully
    ///
    /// This does not mark the state dirty.
    pub fn set_validation(&self, valid: [bool; 4]) {
        self.lock().valid = valid;
    }

    /// Force the next poll to recompile
    pub fn touch(&self) {
        self.lock().dirty = true;
    }

    /// Whether the state changed since the dirty flag was last taken
    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Clear the dirty flag, returning whether it was set
    pub fn take_dirty(&self) -> bool {
        std::mem::take(&mut self.lock().dirty)
    }

    /// Load equations from `CHANNEL = EQUATION` lines
    ///
    /// Blank lines and lines starting with `#` are ignored, channel names
    /// are case-insensitive and the equation may be empty. Later lines for
    /// the same channel replace earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_compiler::pipeline::{Channel, ChannelState};
    ///
    /// let text = "# adder\nX = A ^ B\ny = A * B\n";
    /// let state = ChannelState::load(text.as_bytes()).unwrap();
    /// assert_eq!(state.equation(Channel::X), "A ^ B");
    /// assert_eq!(state.equation(Channel::Y), "A * B");
    /// assert_eq!(state.equation(Channel::Z), "");
    /// ```
    pub fn load<R: BufRead>(reader: R) -> Result<ChannelState, StateError> {
        let state = ChannelState::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let malformed = || StateError::Malformed {
                line: index + 1,
                content: trimmed.to_string(),
            };
            let (name, equation) = trimmed.split_once('=').ok_or_else(malformed)?;
            let channel: Channel = name.trim().parse().map_err(|_| malformed())?;
            state.set_equation(channel, equation)?;
        }
        Ok(state)
    }

    /// Load equations from a file, see [`ChannelState::load`]
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ChannelState, StateError> {
        let path = path.as_ref();
        let state = ChannelState::load(BufReader::new(File::open(path)?))?;
        info!("Loaded channel state from {}", path.display());
        Ok(state)
    }
}
