use crate::core::{Board, GameChangeType};
use crate::render::TurnInfo;

/// Everything the terminal view shows for one frame.
pub struct GameRenderState {
    pub board_text: String,
    pub moves: usize,
    pub last_change: Option<GameChangeType>,
    pub boxes_on_goals: usize,
    pub boxes: usize,
    pub status: RenderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Playing,
    Won,
    Lost,
}

impl RenderStatus {
    /// Whether the final frame stays up until a key is pressed.
    ///
    /// A lost game ended because input stopped: the player quit or a script ran out.
    pub fn holds_final_frame(self) -> bool {
        self == RenderStatus::Won
    }
}

impl GameRenderState {
    pub fn from_board(
        board: &Board,
        board_text: String,
        turn: &TurnInfo,
        status: RenderStatus,
    ) -> Self {
        let boxes_on_goals = board
            .box_positions()
            .filter(|&pos| board.tile_at(pos).is_goal())
            .count();
        Self {
            board_text,
            moves: turn.moves,
            last_change: turn.last_change,
            boxes_on_goals,
            boxes: board.box_positions().count(),
            status,
        }
    }

    pub fn status_line(&self) -> String {
        let controls = match self.status {
            RenderStatus::Playing => "Controls: WASD or Arrow keys to move, Q to quit",
            RenderStatus::Won => "You Win! Press any key to quit.",
            RenderStatus::Lost => "Game over.",
        };
        let last = match self.last_change {
            Some(change) => change.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} | Moves: {} | Last: {} | Boxes on goals: {}/{}",
            controls, self.moves, last, self.boxes_on_goals, self.boxes
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::level::{LevelFormat, parse_level};

    #[test]
    fn test_only_a_win_holds_the_final_frame() {
        assert!(RenderStatus::Won.holds_final_frame());
        assert!(!RenderStatus::Lost.holds_final_frame());
        assert!(!RenderStatus::Playing.holds_final_frame());
    }

    #[test]
    fn test_status_line_shows_moves_and_last_change() {
        let board = parse_level("#@*$.#", LevelFormat::Xsb).unwrap();
        let turn = TurnInfo {
            moves: 7,
            last_change: Some(GameChangeType::Detonation),
        };
        let state = GameRenderState::from_board(&board, String::new(), &turn, RenderStatus::Lost);
        assert_eq!(
            state.status_line(),
            "Game over. | Moves: 7 | Last: detonation | Boxes on goals: 1/2"
        );

        let fresh = GameRenderState::from_board(
            &board,
            String::new(),
            &TurnInfo::default(),
            RenderStatus::Playing,
        );
        assert!(fresh.status_line().contains("Moves: 0 | Last: -"));
    }
}
