use crate::core::*;
use crate::test::test_util::GameTestState;
use Direction::*;

#[test]
fn when_move_right_observes_move_right() {
    let level = r#"
#@ .#
"#;
    let mut game = GameTestState::new(level);
    let update = game.assert_move(Right);

    let expected_level = r#"
# @.#
"#;
    game.assert_matches(expected_level);
    assert_eq!(update, GameUpdate::NextState(GameChangeType::PlayerMove));
}

#[test]
fn when_push_pushes() {
    let level = r#"
#@$ .#
"#;
    let mut game = GameTestState::new(level);
    let update = game.assert_move(Right);

    let expected_level = r#"
# @$.#
"#;
    game.assert_matches(expected_level);
    assert_eq!(
        update,
        GameUpdate::NextState(GameChangeType::Push { pushed: 1 })
    );
}

#[test]
fn when_push_onto_goal_game_is_solved() {
    let level = r#"
#@$ .#
"#;
    let mut game = GameTestState::new(level);
    game.assert_moves(&[Right, Right]);

    let expected_level = r#"
#  @*#
"#;
    game.assert_matches(expected_level);
    assert!(game.board.is_solved());
}

#[test]
fn when_block_pushed_into_block_remains_two_blocks() {
    let level = r#"
#@$$ ..#
"#;
    let mut game = GameTestState::new(level);
    let update = game.try_move(Right);

    let expected_level = r#"
#@$$ ..#
"#;
    game.assert_matches(expected_level);
    assert_eq!(update, GameUpdate::NoChange);
}

#[test]
fn when_block_pushed_into_wall_nothing_moves() {
    let level = r#"
#####
#@$##
#  .#
#####
"#;
    let mut game = GameTestState::new(level);
    assert_eq!(game.try_move(Right), GameUpdate::NoChange);

    let expected_level = r#"
#####
#@$##
#  .#
#####
"#;
    game.assert_matches(expected_level);
}

#[test]
fn when_walking_into_wall_repeatedly_nothing_changes() {
    let level = r#"
####
#@.#
####
"#;
    let mut game = GameTestState::new(level);
    let before = game.board.entities();
    for _ in 0..3 {
        assert_eq!(game.try_move(Up), GameUpdate::NoChange);
        assert_eq!(game.try_move(Left), GameUpdate::NoChange);
    }
    assert_eq!(game.board.entities(), before);
}

#[test]
fn when_player_walks_off_the_edge_move_is_rejected() {
    let level = r#"
@.
"#;
    let mut game = GameTestState::new(level);
    assert_eq!(game.try_move(Left), GameUpdate::NoChange);
    assert_eq!(game.try_move(Up), GameUpdate::NoChange);
    assert_eq!(game.board.player_position(), Vec2::new(1, 1));
}

#[test]
fn push_chain_moves_player_and_box_in_one_call() {
    let mut builder = BoardBuilder::new(5, 3);
    builder.set_player(Vec2::new(2, 2));
    let crate_id = builder.add_box(Vec2::new(3, 2));
    builder.set_goal(Vec2::new(5, 2));
    let mut board = builder.build().unwrap();

    let report = board.move_player(Right);
    assert!(report.moved);
    assert_eq!(board.player_position(), Vec2::new(3, 2));
    assert_eq!(board.position_of(crate_id), Some(Vec2::new(4, 2)));
}

#[test]
fn three_by_one_corridor_scenario() {
    let mut builder = BoardBuilder::new(3, 1);
    builder.set_player(Vec2::new(1, 1));
    let crate_id = builder.add_box(Vec2::new(2, 1));
    builder.set_goal(Vec2::new(3, 1));
    let mut board = builder.build().unwrap();
    assert!(!board.is_solved());

    assert_eq!(
        step(&mut board, UserAction::Move(Right)),
        GameUpdate::NextState(GameChangeType::Push { pushed: 1 })
    );
    assert_eq!(board.player_position(), Vec2::new(2, 1));
    assert_eq!(board.position_of(crate_id), Some(Vec2::new(3, 1)));
    assert!(board.is_solved());

    // The box sits against the edge of the board.
    assert_eq!(step(&mut board, UserAction::Move(Right)), GameUpdate::NoChange);
    assert_eq!(board.player_position(), Vec2::new(2, 1));
    assert_eq!(board.position_of(crate_id), Some(Vec2::new(3, 1)));
    assert!(board.is_solved());
}

#[test]
fn pushing_box_off_goal_unsolves() {
    let level = r#"
#@*  #
#.   #
"#;
    let mut game = GameTestState::new(level);
    assert!(game.board.is_solved());
    game.assert_move(Right);

    let expected_level = r#"
# @$ #
#.   #
"#;
    game.assert_matches(expected_level);
    assert!(!game.board.is_solved());
}

#[test]
fn player_steps_over_goal() {
    let level = r#"
#@.$.#
"#;
    let mut game = GameTestState::new(level);
    game.assert_move(Right);
    game.assert_matches("# +$.#");
    game.assert_move(Right);
    game.assert_matches("# .@*#");
    assert!(game.board.is_solved());
}
