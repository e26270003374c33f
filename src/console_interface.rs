use crate::core::{Board, Direction, UserAction};
use crate::input::InputSource;
use crate::level::LevelFormat;
use crate::models::{GameRenderState, RenderStatus};
use crate::render::{Renderer, TurnInfo, render_board_to_string};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> io::Result<ConsoleTerminal> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(terminal: &mut ConsoleTerminal, state: &GameRenderState) -> io::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        // Game area
        let game_paragraph = Paragraph::new(state.board_text.as_str())
            .block(Block::default().borders(Borders::ALL).title("Sokoban"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        // Status
        let instruction_paragraph = Paragraph::new(state.status_line())
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[1]);
    })?;
    Ok(())
}

/// Full-screen ratatui view. The terminal is restored when this is dropped.
pub struct TerminalRenderer {
    terminal: ConsoleTerminal,
    format: LevelFormat,
}

impl TerminalRenderer {
    pub fn new(format: LevelFormat) -> io::Result<Self> {
        Ok(Self {
            terminal: setup_terminal()?,
            format,
        })
    }

    fn draw(&mut self, board: &Board, turn: &TurnInfo, status: RenderStatus) -> io::Result<()> {
        let text = render_board_to_string(board, self.format);
        let state = GameRenderState::from_board(board, text, turn, status);
        render_game(&mut self.terminal, &state)?;
        if status.holds_final_frame() {
            wait_for_any_key()?;
        }
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.draw(board, turn, RenderStatus::Playing)
    }

    fn render_success(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.draw(board, turn, RenderStatus::Won)
    }

    fn render_failure(&mut self, board: &Board, turn: &TurnInfo) -> io::Result<()> {
        self.draw(board, turn, RenderStatus::Lost)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = cleanup_terminal() {
            warn!("failed to restore terminal: {}", err);
        }
    }
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> io::Result<ConsoleInput> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Up))
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Down))
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Left))
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Right))
                }
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

fn wait_for_any_key() -> io::Result<()> {
    loop {
        match handle_input()? {
            ConsoleInput::Timeout => {}
            _ => return Ok(()),
        }
    }
}

/// Keyboard commands read through crossterm. Quitting ends the input.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn next_action(&mut self) -> io::Result<Option<UserAction>> {
        loop {
            match handle_input()? {
                ConsoleInput::UserAction(action) => return Ok(Some(action)),
                ConsoleInput::Quit => return Ok(None),
                ConsoleInput::Timeout | ConsoleInput::Unknown => {}
            }
        }
    }
}
