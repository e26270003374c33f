use std::fmt;
use std::ops::{Add, Sub};

use crate::core::{Direction, EntityKind, GameChangeType, Tile, Vec2};

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Vec2 {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction; y grows downwards.
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0, -1),
            Direction::Down => Vec2::new(0, 1),
            Direction::Left => Vec2::new(-1, 0),
            Direction::Right => Vec2::new(1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl Tile {
    pub fn can_be_occupied(&self) -> bool {
        match self {
            Tile::Floor | Tile::Goal => true,
            Tile::Wall => false,
        }
    }

    pub fn is_goal(&self) -> bool {
        *self == Tile::Goal
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Player => write!(f, "player"),
            EntityKind::Box => write!(f, "box"),
            EntityKind::Explosive => write!(f, "explosive"),
            EntityKind::BreakableWall => write!(f, "breakable wall"),
        }
    }
}

impl fmt::Display for GameChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameChangeType::PlayerMove => write!(f, "move"),
            GameChangeType::Push { pushed: 1 } => write!(f, "push"),
            GameChangeType::Push { pushed } => write!(f, "push x{}", pushed),
            GameChangeType::Detonation => write!(f, "detonation"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vec2_add_and_sub() {
        let p = Vec2::new(2, 3);
        assert_eq!(p + Direction::Right.delta(), Vec2::new(3, 3));
        assert_eq!(p + Direction::Up.delta(), Vec2::new(2, 2));
        assert_eq!(p + Direction::Down.delta() - p, Direction::Down.delta());
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let origin = Vec2::new(5, 5);
        assert_eq!(origin + Direction::Left.delta() + Direction::Right.delta(), origin);
        assert_eq!(origin + Direction::Up.delta() + Direction::Down.delta(), origin);
    }

    #[test]
    fn test_tile_flags() {
        assert!(Tile::Floor.can_be_occupied());
        assert!(!Tile::Floor.is_goal());
        assert!(!Tile::Wall.can_be_occupied());
        assert!(!Tile::Wall.is_goal());
        assert!(Tile::Goal.can_be_occupied());
        assert!(Tile::Goal.is_goal());
    }
}
