use std::collections::{BTreeSet, HashMap};

use bimap::BiMap;
use log::debug;
use thiserror::Error;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::{BoardEvent, Collision, Direction, EntityId, EntityKind, MoveReport, Tile, Vec2};

/// Structural problems that make a board unplayable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no player on the board")]
    NoPlayer,
    #[error("expected exactly one player, found {0}")]
    MultiplePlayers(usize),
    #[error("no goal tile on the board")]
    NoGoal,
    #[error("{boxes} boxes but only {goals} goal tiles")]
    TooManyBoxes { boxes: usize, goals: usize },
    #[error("{entity:?} is placed outside the board at {at}")]
    OutOfBounds { entity: EntityId, at: Vec2 },
    #[error("{entity:?} stands on a wall at {at}")]
    EntityOnWall { entity: EntityId, at: Vec2 },
    #[error("{0:?} is alive but has no position")]
    Unplaced(EntityId),
    #[error("{0:?} has a position but no entity record")]
    Orphaned(EntityId),
}

/// Authoritative game state: a fixed tile grid plus the movable entities on it.
///
/// The placement map is the only record of where entities are. The occupant of
/// a tile is derived from it, so tile and board can never disagree, and the
/// bimap keeps at most one entity per position and one position per entity.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: BoundedGrid<Tile>,
    placements: BiMap<Vec2, EntityId>,
    kinds: HashMap<EntityId, EntityKind>,
    player: EntityId,
    goals: BTreeSet<Vec2>,
    boxes: BTreeSet<EntityId>,
}

impl Board {
    /// Assembles a board from builder output. Callers validate the result.
    pub(crate) fn from_parts(
        tiles: BoundedGrid<Tile>,
        placements: BiMap<Vec2, EntityId>,
        kinds: HashMap<EntityId, EntityKind>,
        player: EntityId,
    ) -> Board {
        let goals = tiles
            .size()
            .positions()
            .filter(|pos| tiles[pos].is_goal())
            .collect();
        let boxes = kinds
            .iter()
            .filter(|(_, kind)| **kind == EntityKind::Box)
            .map(|(&id, _)| id)
            .collect();

        Board {
            tiles,
            placements,
            kinds,
            player,
            goals,
            boxes,
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.size().extent.x
    }

    pub fn height(&self) -> i32 {
        self.tiles.size().extent.y
    }

    /// Whether `pos` lies on the board.
    pub fn contains(&self, pos: Vec2) -> bool {
        self.tiles.contains(&pos)
    }

    /// Every board position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> {
        self.tiles.size().positions()
    }

    pub fn tile_at(&self, pos: Vec2) -> Tile {
        self.tiles[&pos]
    }

    pub fn has_entity_at(&self, pos: Vec2) -> bool {
        self.occupant_at(pos).is_some()
    }

    /// The entity occupying the tile at `pos`, if any. Panics if `pos` is off the board.
    pub fn occupant_at(&self, pos: Vec2) -> Option<EntityId> {
        self.assert_on_board(pos);
        self.placements.get_by_left(&pos).copied()
    }

    pub fn entity_at(&self, pos: Vec2) -> Option<EntityKind> {
        self.occupant_at(pos).map(|id| self.expect_kind(id))
    }

    pub fn kind_of(&self, entity: EntityId) -> Option<EntityKind> {
        self.kinds.get(&entity).copied()
    }

    pub fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.placements.get_by_right(&entity).copied()
    }

    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.placements.contains_right(&entity)
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.expect_position(self.player)
    }

    pub fn goals(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.goals.iter().copied()
    }

    pub fn box_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.boxes.iter().map(|&id| self.expect_position(id))
    }

    /// Live entities ordered by position, top row first.
    pub fn entities(&self) -> Vec<(EntityId, EntityKind, Vec2)> {
        let mut entities: Vec<_> = self
            .placements
            .iter()
            .map(|(&pos, &id)| (id, self.expect_kind(id), pos))
            .collect();
        entities.sort_by_key(|&(_, _, pos)| (pos.y, pos.x));
        entities
    }

    pub fn entity_count(&self) -> usize {
        self.placements.len()
    }

    /// All boxes rest on goal tiles.
    pub fn is_solved(&self) -> bool {
        self.box_positions().all(|pos| self.tile_at(pos).is_goal())
    }

    pub fn move_player(&mut self, direction: Direction) -> MoveReport {
        self.attempt_move(self.player, direction.delta())
    }

    /// Tries to move `entity` by `delta`, pushing or destroying whatever is in
    /// the way according to the collision rules. A move that cannot happen
    /// leaves the board untouched and reports `moved: false`.
    ///
    /// Panics if `entity` is not on the board.
    pub fn attempt_move(&mut self, entity: EntityId, delta: Vec2) -> MoveReport {
        let mut events = Vec::new();
        let moved = self.resolve_move(entity, delta, &mut events);
        debug_assert_eq!(self.validate(), Ok(()));
        MoveReport { moved, events }
    }

    /// Removes an explosive or breakable wall from the board, returning where it was.
    ///
    /// Players and boxes are never removed; doing so would break the game.
    pub fn remove_entity(&mut self, entity: EntityId) -> Vec2 {
        let kind = self.expect_kind(entity);
        assert!(
            matches!(kind, EntityKind::Explosive | EntityKind::BreakableWall),
            "a {} can never be removed from the board",
            kind
        );
        let at = self.expect_position(entity);
        self.leave(at, entity);
        self.kinds.remove(&entity);
        debug!("removed {} at {}", kind, at);
        debug_assert_eq!(self.validate(), Ok(()));
        at
    }

    /// Checks every structural invariant of the board.
    pub fn validate(&self) -> Result<(), BoardError> {
        let players = self
            .kinds
            .values()
            .filter(|kind| **kind == EntityKind::Player)
            .count();
        match players {
            0 => return Err(BoardError::NoPlayer),
            1 => {}
            n => return Err(BoardError::MultiplePlayers(n)),
        }
        if self.kind_of(self.player) != Some(EntityKind::Player) {
            return Err(BoardError::NoPlayer);
        }
        if self.goals.is_empty() {
            return Err(BoardError::NoGoal);
        }
        if self.boxes.len() > self.goals.len() {
            return Err(BoardError::TooManyBoxes {
                boxes: self.boxes.len(),
                goals: self.goals.len(),
            });
        }
        for (&at, &entity) in self.placements.iter() {
            if !self.tiles.contains(&at) {
                return Err(BoardError::OutOfBounds { entity, at });
            }
            if !self.tile_at(at).can_be_occupied() {
                return Err(BoardError::EntityOnWall { entity, at });
            }
            if !self.kinds.contains_key(&entity) {
                return Err(BoardError::Orphaned(entity));
            }
        }
        for &entity in self.kinds.keys() {
            if !self.placements.contains_right(&entity) {
                return Err(BoardError::Unplaced(entity));
            }
        }
        Ok(())
    }

    fn resolve_move(&mut self, entity: EntityId, delta: Vec2, events: &mut Vec<BoardEvent>) -> bool {
        let kind = self.expect_kind(entity);
        let origin = self.expect_position(entity);
        let destination = origin + delta;

        if !self.contains(destination) {
            debug!("{} at {} would leave the board", kind, origin);
            return false;
        }

        if let Some(obstacle) = self.occupant_at(destination) {
            self.collide(obstacle, entity, delta, events);
        }

        // The collision may have moved or destroyed anything, the mover included.
        let free = self.occupant_at(destination).is_none();
        let walkable = self.tile_at(destination).can_be_occupied();
        if !(free && walkable && self.contains_entity(entity)) {
            debug!("{} at {} cannot move to {}", kind, origin, destination);
            return false;
        }

        self.leave(origin, entity);
        self.enter(destination, entity);
        events.push(BoardEvent::Moved {
            entity,
            kind,
            from: origin,
            to: destination,
        });
        true
    }

    fn collide(
        &mut self,
        obstacle: EntityId,
        mover: EntityId,
        delta: Vec2,
        events: &mut Vec<BoardEvent>,
    ) {
        let obstacle_kind = self.expect_kind(obstacle);
        let mover_kind = self.expect_kind(mover);

        match obstacle_kind.collide_with(mover_kind) {
            Collision::Blocked => {}
            Collision::Push => {
                debug!("{} pushes {}", mover_kind, obstacle_kind);
                self.resolve_move(obstacle, delta, events);
            }
            Collision::DestroyBoth => {
                debug!("{} destroys {}", mover_kind, obstacle_kind);
                self.destroy(obstacle, events);
                self.destroy(mover, events);
            }
        }
    }

    fn destroy(&mut self, entity: EntityId, events: &mut Vec<BoardEvent>) {
        let kind = self.expect_kind(entity);
        let at = self.remove_entity(entity);
        events.push(BoardEvent::Destroyed { entity, kind, at });
    }

    /// Records `entity` as the occupant of `pos`. The tile must be empty.
    fn enter(&mut self, pos: Vec2, entity: EntityId) {
        self.assert_on_board(pos);
        if let Some(current) = self.placements.get_by_left(&pos) {
            panic!("cannot enter {}: already occupied by {:?}", pos, current);
        }
        if let Err((_, entity)) = self.placements.insert_no_overwrite(pos, entity) {
            panic!("{:?} is already placed elsewhere", entity);
        }
    }

    /// Clears `pos`, which must currently be occupied by `entity`.
    fn leave(&mut self, pos: Vec2, entity: EntityId) {
        match self.placements.get_by_left(&pos) {
            Some(&current) if current == entity => {}
            current => panic!(
                "{:?} cannot leave {}: occupant is {:?}",
                entity, pos, current
            ),
        }
        self.placements.remove_by_left(&pos);
    }

    fn assert_on_board(&self, pos: Vec2) {
        assert!(
            self.contains(pos),
            "position {} is outside the {}x{} board",
            pos,
            self.width(),
            self.height()
        );
    }

    fn expect_kind(&self, entity: EntityId) -> EntityKind {
        match self.kinds.get(&entity) {
            Some(&kind) => kind,
            None => panic!("{:?} is not on the board", entity),
        }
    }

    fn expect_position(&self, entity: EntityId) -> Vec2 {
        match self.placements.get_by_right(&entity) {
            Some(&pos) => pos,
            None => panic!("{:?} is not on the board", entity),
        }
    }
}
