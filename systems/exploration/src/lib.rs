#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure exploration system that translates player intent into commands.
//!
//! The host samples its input devices once per frame, distills the result
//! into an [`ExplorationInput`], and hands it here together with the world's
//! latest event batch. The system answers with movement commands and drives
//! the level cycle: a restart request or the final gem pickup both schedule
//! a fresh generation.

use gem_caverns_core::{Command, Direction, Event};

/// Input snapshot distilled from host-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplorationInput {
    /// Direction the player pushed on this frame, if any.
    pub move_direction: Option<Direction>,
    /// Indicates whether the player requested a level restart on this frame.
    pub restart_requested: bool,
}

impl ExplorationInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(move_direction: Option<Direction>, restart_requested: bool) -> Self {
        Self {
            move_direction,
            restart_requested,
        }
    }
}

impl Default for ExplorationInput {
    fn default() -> Self {
        Self {
            move_direction: None,
            restart_requested: false,
        }
    }
}

/// Exploration system that emits movement and regeneration commands.
#[derive(Debug, Clone)]
pub struct Exploration {
    level_cleared: bool,
}

impl Default for Exploration {
    fn default() -> Self {
        Self::new()
    }
}

impl Exploration {
    /// Creates a new exploration system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level_cleared: false,
        }
    }

    /// Consumes world events and frame input to emit exploration commands.
    ///
    /// Regeneration takes precedence over movement: on the frame the last
    /// gem is collected, or when a restart is requested, the system emits a
    /// reset followed by a full generation and discards any movement input.
    pub fn handle(&mut self, events: &[Event], input: ExplorationInput, out: &mut Vec<Command>) {
        for event in events {
            if let Event::GemCollected { remaining: 0, .. } = event {
                self.level_cleared = true;
            }
        }

        if input.restart_requested || self.level_cleared {
            self.level_cleared = false;
            out.push(Command::Reset);
            out.push(Command::Generate);
            return;
        }

        if let Some(direction) = input.move_direction {
            out.push(Command::MovePlayer { direction });
        }
    }
}
