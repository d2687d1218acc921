//! Feedback cues for game events.
//!
//! Picks which cue an event should trigger and renders it for a terminal.
//! Audio playback itself is left to whatever front end consumes the cue.

use serde::Serialize;
use std::fmt;

use crate::types::OutcomeRecord;

/// Terminal bell.
const BELL: &str = "\x07";

/// Sound cue associated with a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Any slip adjustment.
    Click,
    /// A roll has started.
    Roll,
    /// Paid out more than the stake, or a deposit landed.
    Win,
    /// Everything else once a roll settles.
    Lose,
}

impl Cue {
    /// Cue for a settled round. Only a payout above the stake counts as a win.
    pub fn for_outcome(record: &OutcomeRecord) -> Self {
        if record.payout > record.bet_amount {
            Cue::Win
        } else {
            Cue::Lose
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Click => write!(f, "click"),
            Cue::Roll => write!(f, "roll"),
            Cue::Win => write!(f, "win"),
            Cue::Lose => write!(f, "lose"),
        }
    }
}

/// Mute state plus rendering of cues.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    muted: bool,
}

impl Feedback {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute state. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Terminal rendering of `cue`, or `None` if muted or silent.
    ///
    /// Only win/lose ring the bell; clicks and roll starts stay quiet in a
    /// terminal.
    pub fn signal(&self, cue: Cue) -> Option<&'static str> {
        if self.muted {
            return None;
        }
        match cue {
            Cue::Win | Cue::Lose => Some(BELL),
            Cue::Click | Cue::Roll => None,
        }
    }
}
