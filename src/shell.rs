//! Terminal shell: command parsing and rendering.
//!
//! Turns text commands into session calls and session state into text.
//! Timing of the roll reveal is left to the caller (see `main.rs`): a
//! `roll` command returns a `PendingRoll` which is settled later with
//! `Shell::finish_roll`.

use anyhow::{anyhow, bail, Result};
use std::str::FromStr;
use tracing::debug;

use crate::engine::RandomSource;
use crate::feedback::{Cue, Feedback};
use crate::history::CumulativePoint;
use crate::session::{PendingRoll, Session};
use crate::types::{Direction, DEPOSIT_PRESETS};

pub const HELP: &str = "\
commands:
  roll                 roll with the current slip
  over | under         pick the direction
  target <n|+n|-n>     set or nudge the target (3-97)
  bet <n|+n|-n>        set or nudge the bet (0-balance)
  half | max           bet half / all of the balance
  deposit [n]          add funds (default 100)
  status               balance, slip and odds
  history              recent rounds, newest first
  stats                profit, wagered, wins and losses
  graph                cumulative profit sparkline
  mute                 toggle sound cues
  help                 this text
  quit                 leave";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Absolute value or relative nudge. Values cover the full `u64` range so
/// any amount `deposit` accepts can also be bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Set(u64),
    Up(u64),
    Down(u64),
}

impl FromStr for Adjust {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(rest) = s.strip_prefix('+') {
            Adjust::Up(parse_amount(rest)?)
        } else if let Some(rest) = s.strip_prefix('-') {
            Adjust::Down(parse_amount(rest)?)
        } else {
            Adjust::Set(parse_amount(s)?)
        };
        Ok(parsed)
    }
}

fn parse_amount(s: &str) -> Result<u64> {
    s.parse()
        .map_err(|e| anyhow!("`{s}` is not a whole number up to {}: {e}", u64::MAX))
}

/// Target nudges beyond `i64` clamp to the range anyway.
fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Roll,
    Direction(Direction),
    Target(Adjust),
    Bet(Adjust),
    Half,
    Max,
    Deposit(u64),
    Status,
    History,
    Stats,
    Graph,
    Mute,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(head) = parts.next() else {
            bail!("Empty command");
        };
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("Too many arguments: {s}");
        }

        let needs_arg = |name: &str| arg.ok_or_else(|| anyhow!("`{name}` needs a value"));

        let command = match head.to_lowercase().as_str() {
            "roll" | "r" => Command::Roll,
            "over" | "under" | "o" | "u" => Command::Direction(head.parse()?),
            "target" | "t" => Command::Target(needs_arg("target")?.parse()?),
            "bet" | "b" => Command::Bet(needs_arg("bet")?.parse()?),
            "half" => Command::Half,
            "max" => Command::Max,
            "deposit" | "d" => Command::Deposit(match arg {
                Some(amount) => amount.parse()?,
                None => DEPOSIT_PRESETS[0],
            }),
            "status" | "s" => Command::Status,
            "history" | "h" => Command::History,
            "stats" => Command::Stats,
            "graph" | "g" => Command::Graph,
            "mute" | "m" => Command::Mute,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command: {other} (try `help`)"),
        };
        Ok(command)
    }
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

/// What the caller should do after a command.
#[derive(Debug)]
pub enum Step {
    /// Print and keep going.
    Output(String),
    /// A roll started; settle `pending` once the reveal delay elapses.
    Rolling { pending: PendingRoll, output: String },
    Quit,
}

pub struct Shell {
    session: Session,
    feedback: Feedback,
    rng: Box<dyn RandomSource>,
}

impl Shell {
    pub fn new(session: Session, feedback: Feedback, rng: Box<dyn RandomSource>) -> Self {
        Self {
            session,
            feedback,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn execute(&mut self, command: Command) -> Step {
        debug!(?command, "Executing command");

        let output = match command {
            Command::Roll => {
                return match self.session.begin_roll() {
                    Ok(pending) => Step::Rolling {
                        output: self.with_cue(
                            Cue::Roll,
                            format!("Rolling {}...", pending.request()),
                        ),
                        pending,
                    },
                    Err(e) => Step::Output(format!("Can't roll: {e}")),
                };
            }
            Command::Direction(direction) => {
                self.session.set_direction(direction);
                let line = format!("{direction} {}", self.session.odds());
                self.with_cue(Cue::Click, line)
            }
            Command::Target(adjust) => {
                let target = match adjust {
                    Adjust::Set(value) => self.session.set_target(saturating_i64(value)),
                    Adjust::Up(delta) => self.session.adjust_target(saturating_i64(delta)),
                    Adjust::Down(delta) => self.session.adjust_target(-saturating_i64(delta)),
                };
                let line = format!("target={target} {}", self.session.odds());
                self.with_cue(Cue::Click, line)
            }
            Command::Bet(adjust) => {
                let bet = match adjust {
                    Adjust::Set(value) => self.session.set_bet(value),
                    Adjust::Up(delta) => self.session.raise_bet(delta),
                    Adjust::Down(delta) => self.session.lower_bet(delta),
                };
                let line = format!("bet={bet} potential={}", self.session.potential_win());
                self.with_cue(Cue::Click, line)
            }
            Command::Half => {
                let bet = self.session.half_bet();
                self.with_cue(Cue::Click, format!("bet={bet}"))
            }
            Command::Max => {
                let bet = self.session.max_bet();
                self.with_cue(Cue::Click, format!("bet={bet}"))
            }
            Command::Deposit(amount) => match self.session.deposit(amount) {
                Ok(balance) => {
                    self.with_cue(Cue::Win, format!("Deposited {amount}. balance={balance}"))
                }
                Err(e) => format!("Deposit refused: {e}"),
            },
            Command::Status => self.session.to_string(),
            Command::History => render_history(&self.session),
            Command::Stats => self.session.history().stats().to_string(),
            Command::Graph => render_sparkline(&self.session.history().profit_series()),
            Command::Mute => {
                if self.feedback.toggle_mute() {
                    "Sound off".to_string()
                } else {
                    "Sound on".to_string()
                }
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Step::Quit,
        };
        Step::Output(output)
    }

    /// Settle a roll started by `execute(Command::Roll)`.
    pub fn finish_roll(&mut self, pending: PendingRoll) -> String {
        match self.session.settle(pending, self.rng.as_mut()) {
            Ok(record) => {
                let verdict = if record.won() { "WIN" } else { "LOSS" };
                let line = format!(
                    "{verdict} rolled {:.2} | payout={} | balance={}",
                    record.roll,
                    record.payout,
                    self.session.balance()
                );
                self.with_cue(Cue::for_outcome(&record), line)
            }
            Err(e) => format!("Roll failed: {e}"),
        }
    }

    fn with_cue(&self, cue: Cue, line: String) -> String {
        match self.feedback.signal(cue) {
            Some(signal) => format!("{line}{signal}"),
            None => line,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_history(session: &Session) -> String {
    if session.history().is_empty() {
        return "No games played yet".to_string();
    }
    session
        .history()
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per point, scaled between the series min and max.
pub fn render_sparkline(points: &[CumulativePoint]) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "No games played yet".to_string();
    };

    let min = points.iter().map(|p| p.cumulative_profit).min().unwrap_or(0);
    let max = points.iter().map(|p| p.cumulative_profit).max().unwrap_or(0);
    let span = (max - min).max(1) as f64;

    let line: String = points
        .iter()
        .map(|p| {
            let level = ((p.cumulative_profit - min) as f64 / span * 7.0).round() as usize;
            SPARKS[level.min(7)]
        })
        .collect();

    let sign = if last.cumulative_profit >= 0 { "+" } else { "" };
    format!(
        "{line}\n{} → {}  profit={sign}{} (min {min}, max {max})",
        first.timestamp_label, last.timestamp_label, last.cumulative_profit
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
