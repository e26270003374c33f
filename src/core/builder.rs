use std::collections::HashMap;

use bimap::BiMap;

use crate::core::board::{Board, BoardError};
use crate::core::bounded_grid::BoundedGrid;
use crate::core::{EntityId, EntityKind, Tile, Vec2};

/// Accumulates tiles and entities for a board of fixed size.
///
/// Every cell starts out as [`Tile::Floor`]. Positions outside the board and
/// placing two entities on one cell are caller bugs and panic; whether the
/// finished layout is playable is reported by [`BoardBuilder::build`].
#[derive(Debug)]
pub struct BoardBuilder {
    tiles: BoundedGrid<Tile>,
    placements: BiMap<Vec2, EntityId>,
    kinds: HashMap<EntityId, EntityKind>,
    players: Vec<EntityId>,
    next_id: usize,
}

impl BoardBuilder {
    pub fn new(width: i32, height: i32) -> BoardBuilder {
        BoardBuilder {
            tiles: BoundedGrid::new_with_size(width, height, Tile::Floor),
            placements: BiMap::new(),
            kinds: HashMap::new(),
            players: Vec::new(),
            next_id: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.size().extent.x
    }

    pub fn height(&self) -> i32 {
        self.tiles.size().extent.y
    }

    pub fn tile_at(&self, pos: Vec2) -> Tile {
        self.tiles[&pos]
    }

    pub fn entity_at(&self, pos: Vec2) -> Option<EntityKind> {
        self.placements
            .get_by_left(&pos)
            .and_then(|id| self.kinds.get(id))
            .copied()
    }

    pub fn set_tile(&mut self, pos: Vec2, tile: Tile) {
        self.tiles[&pos] = tile;
    }

    pub fn set_goal(&mut self, pos: Vec2) {
        self.set_tile(pos, Tile::Goal);
    }

    pub fn set_player(&mut self, pos: Vec2) -> EntityId {
        let id = self.place(pos, EntityKind::Player);
        self.players.push(id);
        id
    }

    pub fn add_box(&mut self, pos: Vec2) -> EntityId {
        self.place(pos, EntityKind::Box)
    }

    pub fn add_explosive(&mut self, pos: Vec2) -> EntityId {
        self.place(pos, EntityKind::Explosive)
    }

    pub fn add_breakable_wall(&mut self, pos: Vec2) -> EntityId {
        self.place(pos, EntityKind::BreakableWall)
    }

    /// Finishes the board, checking that it has exactly one player, at least
    /// one goal, and no more boxes than goals.
    pub fn build(self) -> Result<Board, BoardError> {
        let player = match self.players.as_slice() {
            [] => return Err(BoardError::NoPlayer),
            [player] => *player,
            players => return Err(BoardError::MultiplePlayers(players.len())),
        };
        let board = Board::from_parts(self.tiles, self.placements, self.kinds, player);
        board.validate()?;
        Ok(board)
    }

    fn place(&mut self, pos: Vec2, kind: EntityKind) -> EntityId {
        assert!(
            self.tiles.contains(&pos),
            "cannot place {} at {}: outside the {}x{} board",
            kind,
            pos,
            self.width(),
            self.height()
        );
        if let Some(existing) = self.entity_at(pos) {
            panic!("cannot place {} at {}: already holds a {}", kind, pos, existing);
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.placements.insert(pos, id);
        self.kinds.insert(id, kind);
        id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_to_floor() {
        let builder = BoardBuilder::new(2, 3);
        assert_eq!(builder.width(), 2);
        assert_eq!(builder.height(), 3);
        assert_eq!(builder.tile_at(Vec2::new(2, 3)), Tile::Floor);
    }

    #[test]
    fn test_build_valid_board() {
        let mut builder = BoardBuilder::new(3, 1);
        builder.set_player(Vec2::new(1, 1));
        builder.add_box(Vec2::new(2, 1));
        builder.set_goal(Vec2::new(3, 1));

        let board = builder.build().unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 1);
        assert_eq!(board.player_position(), Vec2::new(1, 1));
        assert_eq!(board.goals().collect::<Vec<_>>(), vec![Vec2::new(3, 1)]);
        assert_eq!(board.box_positions().collect::<Vec<_>>(), vec![Vec2::new(2, 1)]);
    }

    #[test]
    fn test_no_player() {
        let mut builder = BoardBuilder::new(2, 1);
        builder.set_goal(Vec2::new(2, 1));
        assert_eq!(builder.build().unwrap_err(), BoardError::NoPlayer);
    }

    #[test]
    fn test_multiple_players() {
        let mut builder = BoardBuilder::new(3, 1);
        builder.set_player(Vec2::new(1, 1));
        builder.set_player(Vec2::new(2, 1));
        builder.set_goal(Vec2::new(3, 1));
        assert_eq!(builder.build().unwrap_err(), BoardError::MultiplePlayers(2));
    }

    #[test]
    fn test_no_goal() {
        let mut builder = BoardBuilder::new(2, 1);
        builder.set_player(Vec2::new(1, 1));
        assert_eq!(builder.build().unwrap_err(), BoardError::NoGoal);
    }

    #[test]
    fn test_more_boxes_than_goals() {
        let mut builder = BoardBuilder::new(4, 1);
        builder.set_player(Vec2::new(1, 1));
        builder.add_box(Vec2::new(2, 1));
        builder.add_box(Vec2::new(3, 1));
        builder.set_goal(Vec2::new(4, 1));
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::TooManyBoxes { boxes: 2, goals: 1 }
        );
    }

    #[test]
    fn test_fewer_boxes_than_goals_is_fine() {
        let mut builder = BoardBuilder::new(3, 1);
        builder.set_player(Vec2::new(1, 1));
        builder.set_goal(Vec2::new(2, 1));
        builder.set_goal(Vec2::new(3, 1));
        let board = builder.build().unwrap();
        assert!(board.is_solved());
    }

    #[test]
    fn test_entity_on_wall_is_rejected() {
        let mut builder = BoardBuilder::new(3, 1);
        builder.set_player(Vec2::new(1, 1));
        let crate_id = builder.add_box(Vec2::new(2, 1));
        builder.set_goal(Vec2::new(3, 1));
        builder.set_tile(Vec2::new(2, 1), Tile::Wall);
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::EntityOnWall {
                entity: crate_id,
                at: Vec2::new(2, 1)
            }
        );
    }

    #[test]
    #[should_panic(expected = "already holds a box")]
    fn test_double_placement_panics() {
        let mut builder = BoardBuilder::new(2, 1);
        builder.add_box(Vec2::new(1, 1));
        builder.set_player(Vec2::new(1, 1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_placement_outside_panics() {
        let mut builder = BoardBuilder::new(2, 1);
        builder.add_explosive(Vec2::new(0, 1));
    }
}
