mod board;
mod bounded_grid;
mod bounds;
mod builder;
mod collision;
mod model_helpers;
mod models;
mod update;

pub use board::{Board, BoardError};
pub use builder::BoardBuilder;
pub use models::{
    BoardEvent, Collision, Direction, EntityId, EntityKind, GameChangeType, GameUpdate,
    MoveReport, Tile, UserAction, Vec2,
};
pub use update::step;
