use crate::core::{Collision, EntityKind};

impl EntityKind {
    /// Called on the entity sitting at the destination when `mover` tries to
    /// step into it. Any pair not listed keeps the destination blocked.
    pub fn collide_with(self, mover: EntityKind) -> Collision {
        use EntityKind::*;

        match (self, mover) {
            (Box, Player) => Collision::Push,
            (Explosive, Player) => Collision::Push,
            (BreakableWall, Explosive) => Collision::DestroyBoth,
            _ => Collision::Blocked,
        }
    }
}
