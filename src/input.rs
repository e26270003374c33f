use std::collections::VecDeque;
use std::io::{self, BufRead};

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::{Direction, UserAction};

/// Source of player commands. `Ok(None)` signals that no more input will come.
pub trait InputSource {
    fn next_action(&mut self) -> io::Result<Option<UserAction>>;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn next_action(&mut self) -> io::Result<Option<UserAction>> {
        (**self).next_action()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid move {ch:?} at index {index}, expected one of u, d, l, r")]
pub struct ScriptError {
    pub ch: char,
    pub index: usize,
}

/// Single-letter command used by scripts and line input.
pub fn direction_from_letter(ch: char) -> Option<Direction> {
    match ch.to_ascii_lowercase() {
        'u' => Some(Direction::Up),
        'd' => Some(Direction::Down),
        'l' => Some(Direction::Left),
        'r' => Some(Direction::Right),
        _ => None,
    }
}

/// Replays a fixed list of moves, then ends.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    actions: VecDeque<UserAction>,
}

impl ScriptedInput {
    pub fn new(directions: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            actions: directions.into_iter().map(UserAction::Move).collect(),
        }
    }

    /// Parses a move string such as `"rrdl"`. Whitespace is ignored.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut directions = Vec::new();
        for (index, ch) in script.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let direction = direction_from_letter(ch).ok_or(ScriptError { ch, index })?;
            directions.push(direction);
        }
        Ok(Self::new(directions))
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_action(&mut self) -> io::Result<Option<UserAction>> {
        Ok(self.actions.pop_front())
    }
}

/// Reads one command per line: `u`, `d`, `l`, `r` or the full direction name.
/// Lines that are not commands are skipped.
pub struct LineInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_action(&mut self) -> io::Result<Option<UserAction>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let command = line.trim().to_ascii_lowercase();
            let direction = match command.as_str() {
                "" => continue,
                "up" => Some(Direction::Up),
                "down" => Some(Direction::Down),
                "left" => Some(Direction::Left),
                "right" => Some(Direction::Right),
                _ => {
                    let mut chars = command.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => direction_from_letter(ch),
                        _ => None,
                    }
                }
            };
            match direction {
                Some(direction) => return Ok(Some(UserAction::Move(direction))),
                None => warn!("ignoring unknown command {:?}", command),
            }
        }
    }
}

/// Random walk of bounded length, reproducible from its seed.
#[derive(Debug)]
pub struct RandomInput {
    rng: StdRng,
    remaining: usize,
}

impl RandomInput {
    pub fn new(seed: u64, moves: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: moves,
        }
    }
}

impl InputSource for RandomInput {
    fn next_action(&mut self) -> io::Result<Option<UserAction>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        Ok(Some(UserAction::Move(direction)))
    }
}
