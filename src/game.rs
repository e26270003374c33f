use std::io;

use log::{debug, info};
use thiserror::Error;

use crate::core::{Board, GameUpdate, step};
use crate::input::InputSource;
use crate::render::{Renderer, TurnInfo};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("input failed: {0}")]
    Input(#[source] io::Error),
    #[error("rendering failed: {0}")]
    Render(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    InputExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub outcome: Outcome,
    /// Commands that changed the board.
    pub moves: usize,
    /// Commands read from the input, including rejected ones.
    pub commands: usize,
}

/// Turn loop tying a board to one input source and one renderer.
pub struct Game<I: InputSource, R: Renderer> {
    board: Board,
    input: I,
    renderer: R,
}

impl<I: InputSource, R: Renderer> Game<I, R> {
    pub fn new(board: Board, input: I, renderer: R) -> Self {
        Self {
            board,
            input,
            renderer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_parts(self) -> (Board, I, R) {
        (self.board, self.input, self.renderer)
    }

    /// Plays until the puzzle is solved or the input runs out.
    pub fn run(&mut self) -> Result<GameSummary, GameError> {
        let mut turn = TurnInfo::default();
        let mut commands = 0;

        let outcome = loop {
            if self.board.is_solved() {
                break Outcome::Solved;
            }
            self.renderer
                .render(&self.board, &turn)
                .map_err(GameError::Render)?;

            let Some(action) = self.input.next_action().map_err(GameError::Input)? else {
                break Outcome::InputExhausted;
            };
            commands += 1;
            if let GameUpdate::NextState(change) = step(&mut self.board, action) {
                turn.moves += 1;
                turn.last_change = Some(change);
                debug!("turn {}: {:?}", commands, change);
            }
        };

        let rendered = match outcome {
            Outcome::Solved => self.renderer.render_success(&self.board, &turn),
            Outcome::InputExhausted => self.renderer.render_failure(&self.board, &turn),
        };
        rendered.map_err(GameError::Render)?;

        info!(
            "game over: {:?} after {} moves ({} commands)",
            outcome, turn.moves, commands
        );
        Ok(GameSummary {
            outcome,
            moves: turn.moves,
            commands,
        })
    }
}
