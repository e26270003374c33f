// Terminal push-box puzzle.
// Controls (keys input): W/A/S/D or arrow keys. Q to quit.
// Plaintext levels: '#' wall, 'P' player, 'B' box, 'G' goal, 'O' explosive, 'X' breakable wall.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;
use thiserror::Error;

use pushbox::console_interface::{KeyboardInput, TerminalRenderer};
use pushbox::core::Board;
use pushbox::game::{Game, Outcome};
use pushbox::input::{InputSource, LineInput, RandomInput, ScriptedInput};
use pushbox::level::{LevelFormat, load_level, parse_level};
use pushbox::render::{JsonRenderer, NullRenderer, PlaintextRenderer, Renderer};

const BUILTIN_LEVEL: &str = "\
9 7
#########
#  G    #
#  B    #
#  P O X#
#  B   G#
#  G    #
#########";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Plaintext,
    Xsb,
}

impl From<Format> for LevelFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plaintext => LevelFormat::Plaintext,
            Format::Xsb => LevelFormat::Xsb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputKind {
    /// Interactive key presses
    Keys,
    /// One command per line on stdin (u, d, l, r)
    Lines,
    /// The moves given with --moves
    Script,
    /// A seeded random walk
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    Terminal,
    Plain,
    Json,
    None,
}

#[derive(Parser, Debug)]
#[command(name = "pushbox")]
#[command(about = "A push-box puzzle for the terminal", long_about = None)]
struct Args {
    /// Level file; a built-in level is used when omitted
    #[arg(value_name = "FILE")]
    level_file: Option<PathBuf>,

    /// Level file format
    #[arg(short, long, value_enum, default_value = "plaintext")]
    format: Format,

    /// Where moves come from
    #[arg(short, long, value_enum, default_value = "keys")]
    input: InputKind,

    /// Move letters for --input script, e.g. "rrdlu"
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Seed for --input random
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Number of moves for --input random
    #[arg(long, default_value = "1000")]
    max_moves: usize,

    /// How the board is shown [default: terminal for keys, plain otherwise]
    #[arg(short, long, value_enum)]
    output: Option<OutputKind>,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum UsageError {
    #[error("--input keys reads key presses from the terminal view; use --output terminal")]
    KeysNeedTerminal,
    #[error("--input lines reads stdin, which the terminal view takes over; use another --output")]
    LinesNeedStdin,
}

/// Output to use for `input`, rejecting pairs that fight over the terminal.
fn pick_output(input: InputKind, output: Option<OutputKind>) -> Result<OutputKind, UsageError> {
    match (input, output) {
        (InputKind::Keys, None | Some(OutputKind::Terminal)) => Ok(OutputKind::Terminal),
        (InputKind::Keys, Some(_)) => Err(UsageError::KeysNeedTerminal),
        (InputKind::Lines, Some(OutputKind::Terminal)) => Err(UsageError::LinesNeedStdin),
        (_, None) => Ok(OutputKind::Plain),
        (_, Some(output)) => Ok(output),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(Outcome::Solved) => ExitCode::SUCCESS,
        Ok(Outcome::InputExhausted) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Outcome, Box<dyn StdError>> {
    let output = pick_output(args.input, args.output)?;
    let format = LevelFormat::from(args.format);
    let board = match &args.level_file {
        Some(path) => load_level(path, format)?,
        None => parse_level(BUILTIN_LEVEL, LevelFormat::Plaintext)?,
    };

    let input: Box<dyn InputSource> = match args.input {
        InputKind::Keys => Box::new(KeyboardInput),
        InputKind::Lines => Box::new(LineInput::new(io::stdin().lock())),
        InputKind::Script => Box::new(ScriptedInput::parse(&args.moves)?),
        InputKind::Random => Box::new(RandomInput::new(args.seed, args.max_moves)),
    };

    let renderer: Box<dyn Renderer> = match output {
        OutputKind::Terminal => Box::new(TerminalRenderer::new(format)?),
        OutputKind::Plain => Box::new(PlaintextRenderer::new(io::stdout(), format)),
        OutputKind::Json => Box::new(JsonRenderer::new(io::stdout())),
        OutputKind::None => Box::new(NullRenderer),
    };

    play(board, input, renderer)
}

fn play(
    board: Board,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
) -> Result<Outcome, Box<dyn StdError>> {
    let mut game = Game::new(board, input, renderer);
    let summary = game.run()?;
    // Drop the renderer first so a terminal session is restored before printing.
    drop(game);
    println!(
        "{} after {} moves",
        match summary.outcome {
            Outcome::Solved => "Solved",
            Outcome::InputExhausted => "Not solved",
        },
        summary.moves
    );
    Ok(summary.outcome)
}
