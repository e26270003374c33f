//! Level text formats.
//!
//! `Plaintext` is the game's own format: a `WIDTH HEIGHT` header line followed
//! by the rows of the board.
//!
//! - `#` = Wall
//! - ` ` or `.` = Floor
//! - `G` = Goal
//! - `P` = Player
//! - `B` = Box
//! - `O` = Explosive
//! - `X` = Breakable wall
//!
//! Cells not covered by the rows are floor.
//!
//! `Xsb` is the usual Sokoban interchange format without a header: `@` player,
//! `+` player on goal, `$` box, `*` box on goal, `.` goal, `#` wall, and ` `,
//! `-` or `_` floor. `O` and `X` carry the same meaning as in `Plaintext`.

use std::fs;
use std::io;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::core::{Board, BoardBuilder, BoardError, Tile, Vec2};

/// Largest board, in cells, a level may describe.
pub const MAX_CELLS: i64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    Plaintext,
    Xsb,
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read level: {0}")]
    Io(#[from] io::Error),
    #[error("level is empty")]
    Empty,
    #[error("invalid header {0:?}, expected \"WIDTH HEIGHT\"")]
    InvalidHeader(String),
    #[error("a {width}x{height} board is larger than {} cells", MAX_CELLS)]
    TooLarge { width: i64, height: i64 },
    #[error("invalid character {ch:?} at {at}")]
    UnknownSymbol { ch: char, at: Vec2 },
    #[error("row {row} is {len} cells wide but the board is {width} wide")]
    RowTooWide { row: i32, len: usize, width: i32 },
    #[error("level has {rows} rows but the board is {height} high")]
    TooManyRows { rows: usize, height: i32 },
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

pub fn parse_level(text: &str, format: LevelFormat) -> Result<Board, LevelError> {
    let board = match format {
        LevelFormat::Plaintext => parse_plaintext(text)?,
        LevelFormat::Xsb => parse_xsb(text)?,
    };
    info!(
        "loaded {}x{} level with {} entities",
        board.width(),
        board.height(),
        board.entity_count()
    );
    Ok(board)
}

pub fn load_level(path: impl AsRef<Path>, format: LevelFormat) -> Result<Board, LevelError> {
    let text = fs::read_to_string(path)?;
    parse_level(&text, format)
}

fn parse_plaintext(text: &str) -> Result<Board, LevelError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(LevelError::Empty)?;
    let (width, height) = parse_header(header)?;

    let rows: Vec<&str> = lines.collect();
    // A trailing newline in a file should not count as an extra row.
    let rows = trim_trailing_blank(&rows);
    if rows.len() > height as usize {
        return Err(LevelError::TooManyRows {
            rows: rows.len(),
            height,
        });
    }

    let mut builder = BoardBuilder::new(width, height);
    for (y, line) in (1..).zip(rows) {
        let len = line.chars().count();
        if len > width as usize {
            return Err(LevelError::RowTooWide { row: y, len, width });
        }
        for (x, ch) in (1..).zip(line.chars()) {
            let at = Vec2::new(x, y);
            match ch {
                '#' => builder.set_tile(at, Tile::Wall),
                ' ' | '.' => {}
                'G' => builder.set_goal(at),
                'P' => {
                    builder.set_player(at);
                }
                'B' => {
                    builder.add_box(at);
                }
                'O' => {
                    builder.add_explosive(at);
                }
                'X' => {
                    builder.add_breakable_wall(at);
                }
                _ => return Err(LevelError::UnknownSymbol { ch, at }),
            }
        }
    }

    Ok(builder.build()?)
}

fn parse_header(header: &str) -> Result<(i32, i32), LevelError> {
    let invalid = || LevelError::InvalidHeader(header.to_string());
    let (width, height) = header.trim_end().split_once(' ').ok_or_else(invalid)?;
    let width: i32 = width.parse().map_err(|_| invalid())?;
    let height: i32 = height.parse().map_err(|_| invalid())?;
    if width < 1 || height < 1 {
        return Err(invalid());
    }
    check_size(width as i64, height as i64)?;
    Ok((width, height))
}

fn check_size(width: i64, height: i64) -> Result<(), LevelError> {
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(LevelError::TooLarge { width, height }),
    }
}

fn parse_xsb(text: &str) -> Result<Board, LevelError> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .ok_or(LevelError::Empty)?;
    let rows = trim_trailing_blank(&lines[start..]);

    let width = rows
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    check_size(width as i64, rows.len() as i64)?;
    let (width, height) = (width as i32, rows.len() as i32);

    let mut builder = BoardBuilder::new(width, height);
    for (y, line) in (1..).zip(rows) {
        for (x, ch) in (1..).zip(line.chars()) {
            let at = Vec2::new(x, y);
            match ch {
                '#' => builder.set_tile(at, Tile::Wall),
                ' ' | '-' | '_' => {}
                '.' => builder.set_goal(at),
                '@' => {
                    builder.set_player(at);
                }
                '+' => {
                    builder.set_goal(at);
                    builder.set_player(at);
                }
                '$' => {
                    builder.add_box(at);
                }
                '*' => {
                    builder.set_goal(at);
                    builder.add_box(at);
                }
                'O' => {
                    builder.add_explosive(at);
                }
                'X' => {
                    builder.add_breakable_wall(at);
                }
                _ => return Err(LevelError::UnknownSymbol { ch, at }),
            }
        }
    }

    Ok(builder.build()?)
}

fn trim_trailing_blank<'a, 'b>(rows: &'b [&'a str]) -> &'b [&'a str] {
    let end = rows
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);
    &rows[..end]
}
