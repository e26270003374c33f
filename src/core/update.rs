use log::debug;

use crate::core::{Board, BoardEvent, EntityKind, GameChangeType, GameUpdate, UserAction};

/// Applies one player action to the board and classifies what changed.
pub fn step(board: &mut Board, action: UserAction) -> GameUpdate {
    let UserAction::Move(direction) = action;
    let report = board.move_player(direction);

    if report.events.is_empty() {
        debug!("move {} rejected", direction);
        return GameUpdate::NoChange;
    }

    let detonated = report
        .events
        .iter()
        .any(|event| matches!(event, BoardEvent::Destroyed { .. }));
    let pushed = report
        .events
        .iter()
        .filter(|event| {
            matches!(event, BoardEvent::Moved { kind, .. } if *kind != EntityKind::Player)
        })
        .count();

    let change = if detonated {
        GameChangeType::Detonation
    } else if pushed > 0 {
        GameChangeType::Push { pushed }
    } else {
        GameChangeType::PlayerMove
    };
    debug!("move {}: {:?}", direction, change);
    GameUpdate::NextState(change)
}
