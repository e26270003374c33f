use serde::Serialize;

/// Fixed terrain of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Tile {
    Floor,
    Wall,
    Goal,
}

/// Board coordinate or displacement. Board positions are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
}

/// Handle to an entity owned by a [`crate::core::Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Player,
    Box,
    Explosive,
    BreakableWall,
}

/// What happens when an entity tries to move into the cell of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    /// The obstacle stays put and the destination remains occupied.
    Blocked,
    /// The obstacle is moved by the same delta before the mover re-checks.
    Push,
    /// Obstacle and mover are both removed from the board.
    DestroyBoth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    Moved {
        entity: EntityId,
        kind: EntityKind,
        from: Vec2,
        to: Vec2,
    },
    Destroyed {
        entity: EntityId,
        kind: EntityKind,
        at: Vec2,
    },
}

/// Result of a single move attempt, including everything the push chain did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
    pub moved: bool,
    pub events: Vec<BoardEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameUpdate {
    NextState(GameChangeType),
    NoChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameChangeType {
    PlayerMove,
    Push { pushed: usize },
    Detonation,
}
