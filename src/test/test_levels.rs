use crate::assert_eq_text;
use crate::core::*;
use crate::game::{Game, Outcome};
use crate::input::ScriptedInput;
use crate::level::{LevelFormat, parse_level};
use crate::render::{NullRenderer, render_board_to_string};

const PLAINTEXT_LEVEL: &str = "\
7 5
#######
#P  G #
# B O #
#   X #
#######
";

const XSB_LEVEL: &str = r#"
  #####
###   #
#.@$  #
### $.#
#.##$ #
# # . ##
#$ *$$.#
#   .  #
########
"#;

#[test]
fn plaintext_round_trip() {
    let board = parse_level(PLAINTEXT_LEVEL, LevelFormat::Plaintext).unwrap();
    let rendered = render_board_to_string(&board, LevelFormat::Plaintext);
    let expected = "\
#######
#P..G.#
#.B.O.#
#...X.#
#######
";
    assert_eq_text!(expected, rendered.as_str());

    let header = format!("{} {}\n", board.width(), board.height());
    let reparsed = parse_level(&(header + &rendered), LevelFormat::Plaintext).unwrap();
    assert_eq!(reparsed.entities(), board.entities());
    assert_eq!(
        reparsed.goals().collect::<Vec<_>>(),
        board.goals().collect::<Vec<_>>()
    );
}

#[test]
fn xsb_round_trip_pads_short_rows() {
    let board = parse_level(XSB_LEVEL, LevelFormat::Xsb).unwrap();
    assert_eq!((board.width(), board.height()), (8, 9));
    assert_eq!(board.box_positions().count(), 7);
    assert_eq!(board.goals().count(), 7);

    let rendered = render_board_to_string(&board, LevelFormat::Xsb);
    let expected = XSB_LEVEL
        .trim_matches('\n')
        .lines()
        .map(|line| format!("{:<8}\n", line))
        .collect::<String>();
    assert_eq_text!(expected.as_str(), rendered.as_str());
}

#[test]
fn formats_agree_on_the_same_board() {
    let xsb = parse_level("#@$.#\n#OX #", LevelFormat::Xsb).unwrap();
    let plain = parse_level("5 2\n#PBG#\n#OX #", LevelFormat::Plaintext).unwrap();
    assert_eq!(xsb.entities(), plain.entities());
    for pos in xsb.positions() {
        assert_eq!(xsb.tile_at(pos), plain.tile_at(pos), "tile at {}", pos);
    }
}

#[test]
fn parsed_level_plays_to_completion() {
    let level = "5 3\n#####\n#PBG#\n#####";
    let board = parse_level(level, LevelFormat::Plaintext).unwrap();
    let mut game = Game::new(board, ScriptedInput::parse("r").unwrap(), NullRenderer);
    let summary = game.run().unwrap();
    assert_eq!(summary.outcome, Outcome::Solved);
    assert_eq!(
        game.board().to_string(),
        "#####\n#.PB#\n#####\n"
    );
}
