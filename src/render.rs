use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::core::{Board, EntityKind, GameChangeType, Tile, Vec2};
use crate::level::LevelFormat;

/// Game progress shown next to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnInfo {
    /// Commands that changed the board so far.
    pub moves: usize,
    pub last_change: Option<GameChangeType>,
}

/// Passive view of a board after every turn and at the end of a game.
pub trait Renderer {
    fn render(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()>;
    fn render_success(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()>;
    fn render_failure(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()>;
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn render(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        (**self).render(board, turn)
    }

    fn render_success(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        (**self).render_success(board, turn)
    }

    fn render_failure(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        (**self).render_failure(board, turn)
    }
}

/// Glyph for a single cell. Entities are drawn over their tile.
pub fn cell_glyph(tile: Tile, entity: Option<EntityKind>, format: LevelFormat) -> char {
    match format {
        LevelFormat::Plaintext => match (entity, tile) {
            (Some(EntityKind::Player), _) => 'P',
            (Some(EntityKind::Box), _) => 'B',
            (Some(EntityKind::Explosive), _) => 'O',
            (Some(EntityKind::BreakableWall), _) => 'X',
            (None, Tile::Floor) => '.',
            (None, Tile::Wall) => '#',
            (None, Tile::Goal) => 'G',
        },
        LevelFormat::Xsb => match (entity, tile) {
            (Some(EntityKind::Player), Tile::Goal) => '+',
            (Some(EntityKind::Player), _) => '@',
            (Some(EntityKind::Box), Tile::Goal) => '*',
            (Some(EntityKind::Box), _) => '$',
            (Some(EntityKind::Explosive), _) => 'O',
            (Some(EntityKind::BreakableWall), _) => 'X',
            (None, Tile::Floor) => ' ',
            (None, Tile::Wall) => '#',
            (None, Tile::Goal) => '.',
        },
    }
}

pub fn render_board_to_string(board: &Board, format: LevelFormat) -> String {
    let mut result = String::new();
    for y in 1..=board.height() {
        for x in 1..=board.width() {
            let pos = Vec2::new(x, y);
            result.push(cell_glyph(board.tile_at(pos), board.entity_at(pos), format));
        }
        result.push('\n');
    }
    result
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board_to_string(self, LevelFormat::Plaintext))
    }
}

/// Prints the board as text after every turn, then `Success!` or `Failure!`.
pub struct PlaintextRenderer<W: Write> {
    out: W,
    format: LevelFormat,
}

impl<W: Write> PlaintextRenderer<W> {
    pub fn new(out: W, format: LevelFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlaintextRenderer<W> {
    fn render(&mut self, board: &Board, _turn: &TurnInfo) -> io::Result<()> {
        writeln!(self.out, "{}", render_board_to_string(board, self.format))
    }

    fn render_success(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.render(board, turn)?;
        writeln!(self.out, "Success!")
    }

    fn render_failure(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.render(board, turn)?;
        writeln!(self.out, "Failure!")
    }
}

#[derive(Serialize, Debug)]
struct JsonFrame {
    frame: usize,
    width: i32,
    height: i32,
    rows: Vec<String>,
    entities: Vec<JsonEntity>,
    moves: usize,
    last_change: Option<GameChangeType>,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'static str>,
}

#[derive(Serialize, Debug)]
struct JsonEntity {
    kind: EntityKind,
    x: i32,
    y: i32,
}

/// Writes one JSON object per line for every rendered frame.
pub struct JsonRenderer<W: Write> {
    out: W,
    frame: usize,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frame: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(
        &mut self,
        board: &Board,
        turn: &TurnInfo,
        result: Option<&'static str>,
    ) -> io::Result<()> {
        let rows = render_board_to_string(board, LevelFormat::Plaintext)
            .lines()
            .map(str::to_string)
            .collect();
        let entities = board
            .entities()
            .into_iter()
            .map(|(_, kind, pos)| JsonEntity {
                kind,
                x: pos.x,
                y: pos.y,
            })
            .collect();
        let frame = JsonFrame {
            frame: self.frame,
            width: board.width(),
            height: board.height(),
            rows,
            entities,
            moves: turn.moves,
            last_change: turn.last_change,
            solved: board.is_solved(),
            result,
        };
        self.frame += 1;

        serde_json::to_writer(&mut self.out, &frame)?;
        writeln!(self.out)
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.write_frame(board, turn, None)
    }

    fn render_success(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.write_frame(board, turn, Some("success"))
    }

    fn render_failure(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.write_frame(board, turn, Some("failure"))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _board: &Board, _turn: &TurnInfo) -> io::Result<()> {
        Ok(())
    }

    fn render_success(&mut self, _board: &Board, _turn: &TurnInfo) -> io::Result<()> {
        Ok(())
    }

    fn render_failure(&mut self, _board: &Board, _turn: &TurnInfo) -> io::Result<()> {
        Ok(())
    }
}
