//! Pilot command vocabulary shared with the external store.
//!
//! The store delivers commands as (command-name, target-identity, amount)
//! triples where the amount is numeric or a string. [`PilotCommand::parse`]
//! turns a triple into a typed command or a parse error; [`CommandQueue`] is
//! the FIFO the driver drains. Execution semantics beyond parsing belong to
//! the driver: this crate never applies a command to a body itself.

use std::collections::VecDeque;

use bevy::prelude::*;

/// The raw amount field of a command triple, as the store delivers it.
#[derive(Clone, Debug, PartialEq)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric reading of the amount; text that parses as a float counts
    /// (the original client sends angles as stringified numbers).
    fn as_number(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.parse().ok(),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Amount::Text(s)
    }
}

/// Direction of an RCS translation burn, in the target's orbital frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RcsDirection {
    /// Angle in radians relative to the craft's facing.
    Angle(f64),
    Prograde,
    Retrograde,
}

/// One parsed pilot command.
#[derive(Clone, Debug, PartialEq)]
pub enum PilotCommand {
    /// Adjust the target's angular acceleration by a signed step.
    FireVerniers { target: String, amount: f64 },
    /// Signed throttle step for the target's main engines.
    ChangeEngines { target: String, amount: f64 },
    /// Translation burn in the given direction.
    FireRcs {
        target: String,
        direction: RcsDirection,
    },
    /// Signed step applied to the simulation time scale.
    AccelerateTime { steps: f64 },
    /// Hand a save name/path to the store; opaque to the core.
    Open { path: String },
}

/// A triple the store delivered that does not parse as a command.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("command '{command}' requires a target entity")]
    MissingTarget { command: &'static str },

    #[error("command '{command}' expects a numeric amount, got '{got}'")]
    BadAmount { command: &'static str, got: String },
}

impl PilotCommand {
    /// Parse a (name, target, amount) triple.
    ///
    /// `accelerate_time` and `open` are session-wide and carry no target;
    /// a target given for them is ignored, matching the store's habit of
    /// omitting the field entirely.
    pub fn parse(
        name: &str,
        target: Option<&str>,
        amount: Amount,
    ) -> Result<Self, CommandError> {
        match name {
            "fire_verniers" => Ok(Self::FireVerniers {
                target: required_target("fire_verniers", target)?.to_string(),
                amount: numeric("fire_verniers", &amount)?,
            }),
            "change_engines" => Ok(Self::ChangeEngines {
                target: required_target("change_engines", target)?.to_string(),
                amount: numeric("change_engines", &amount)?,
            }),
            "fire_rcs" => {
                let target = required_target("fire_rcs", target)?.to_string();
                let direction = match &amount {
                    Amount::Text(s) if s == "prograde" => RcsDirection::Prograde,
                    Amount::Text(s) if s == "retrograde" => RcsDirection::Retrograde,
                    other => RcsDirection::Angle(numeric("fire_rcs", other)?),
                };
                Ok(Self::FireRcs { target, direction })
            }
            "accelerate_time" => Ok(Self::AccelerateTime {
                steps: numeric("accelerate_time", &amount)?,
            }),
            "open" => match amount {
                Amount::Text(path) => Ok(Self::Open { path }),
                Amount::Number(n) => Err(CommandError::BadAmount {
                    command: "open",
                    got: n.to_string(),
                }),
            },
            other => Err(CommandError::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }
}

fn required_target<'a>(
    command: &'static str,
    target: Option<&'a str>,
) -> Result<&'a str, CommandError> {
    target.ok_or(CommandError::MissingTarget { command })
}

fn numeric(command: &'static str, amount: &Amount) -> Result<f64, CommandError> {
    amount.as_number().ok_or_else(|| CommandError::BadAmount {
        command,
        got: match amount {
            Amount::Number(n) => n.to_string(),
            Amount::Text(s) => s.clone(),
        },
    })
}

/// FIFO of parsed commands awaiting execution by the driver.
#[derive(Resource, Clone, Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<PilotCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: PilotCommand) {
        self.commands.push_back(command);
    }

    pub fn pop(&mut self) -> Option<PilotCommand> {
        self.commands.pop_front()
    }

    /// Drain everything queued so far, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = PilotCommand> + '_ {
        self.commands.drain(..)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
