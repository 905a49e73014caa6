//! Play command implementation - interactive terminal session
//!
//! Keys are translated into core [`Intent`]s and every frame is drawn from a
//! fresh [`GameSnapshot`]. Key mapping and rendering are plain functions so
//! they can be tested without a terminal.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};
use std::time::Duration;

use crate::config::Config;
use crate::error::CliError;
use seqalign_core::{EditSession, Game, GameSnapshot, Generator, Intent, SessionStatus, SystemClock};

const FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Apply(Intent),
    Quit,
}

/// Map one key press to an action for the current mode
pub fn action_for_key(key: KeyEvent, name_entry: bool, row_length: usize) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let row = row_length.max(1) as isize;

    if name_entry {
        return match key.code {
            KeyCode::Char(c) => Some(Action::Apply(Intent::NameChar(c))),
            KeyCode::Backspace => Some(Action::Apply(Intent::NameBackspace)),
            KeyCode::Enter => Some(Action::Apply(Intent::NameCommit)),
            // Skip the name and start a new round
            KeyCode::Tab => Some(Action::Apply(Intent::Restart)),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
    }

    let intent = match key.code {
        KeyCode::Left => Intent::MoveCursor(-1),
        KeyCode::Right => Intent::MoveCursor(1),
        KeyCode::Up => Intent::MoveCursor(-row),
        KeyCode::Down => Intent::MoveCursor(row),
        KeyCode::Char(' ') => Intent::InsertGap,
        KeyCode::Backspace => Intent::DeleteGap,
        KeyCode::Enter => Intent::Submit,
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Intent::MoveOffset(-1),
            'd' => Intent::MoveOffset(1),
            'w' => Intent::MoveOffset(-row),
            's' => Intent::MoveOffset(row),
            'h' => Intent::ToggleHint,
            'r' => Intent::Restart,
            'q' => return Some(Action::Quit),
            _ => return None,
        },
        _ => return None,
    };
    Some(Action::Apply(intent))
}

/// Text lines for one frame
pub fn render_lines(snapshot: &GameSnapshot, row_length: usize) -> Vec<String> {
    let row_length = row_length.max(1);
    let genome: Vec<char> = snapshot.genome.chars().collect();
    let read: Vec<char> = snapshot.read.chars().collect();
    let read_span = snapshot.offset..snapshot.offset + read.len();

    let mut lines = vec![
        format!(
            "score {:>5}   time {:>6.1}s   offset {}",
            snapshot.score.to_string(),
            snapshot.elapsed,
            snapshot.offset
        ),
        String::new(),
    ];

    for row_start in (0..genome.len()).step_by(row_length) {
        let row_end = (row_start + row_length).min(genome.len());
        lines.push(format!("{:>4} {}", row_start, genome[row_start..row_end].iter().collect::<String>()));

        let read_row: String = (row_start..row_end)
            .map(|column| {
                if read_span.contains(&column) {
                    read[column - snapshot.offset]
                } else {
                    ' '
                }
            })
            .collect();
        lines.push(format!("     {}", read_row));

        let marker = match snapshot.cursor {
            Some(column) if (row_start..row_end).contains(&column) => {
                format!("     {}^", " ".repeat(column - row_start))
            }
            _ => String::new(),
        };
        lines.push(marker);
    }

    if let Some(counts) = snapshot.breakdown {
        lines.push(format!(
            "{} matches  {} mismatches  {} gaps",
            counts.matches,
            counts.mismatches,
            counts.gaps()
        ));
    }
    if let Some(hint) = snapshot.hint {
        lines.push(format!("hint: best offset {} scores {}", hint.offset, hint.score));
    }

    lines.push(String::new());
    match (snapshot.status, snapshot.result) {
        (SessionStatus::Won, Some(result)) if snapshot.name_entry => {
            lines.push(format!("You made the board with {} in {:.1}s!", result.score, result.time));
            lines.push(format!("name: {}_", snapshot.name));
            lines.push("enter: save  tab: play again  esc: quit".to_string());
        }
        (SessionStatus::Won, Some(result)) => {
            lines.push(format!("Won with {} in {:.1}s. r: play again  q: quit", result.score, result.time));
        }
        (SessionStatus::Lost, Some(result)) => {
            lines.push(format!("{} in {:.1}s did not make the board. r: play again  q: quit", result.score, result.time));
        }
        _ => lines.push(
            "arrows: cursor  a/d w/s: shift read  space: gap  backspace: delete gap  enter: submit  h: hint  r: restart  q: quit"
                .to_string(),
        ),
    }

    lines.push(String::new());
    lines.push("Leaderboard".to_string());
    for (rank, entry) in snapshot.leaderboard.iter().enumerate() {
        lines.push(format!("{:>2}. {:<15} {:>5} {:>7.1}s", rank + 1, entry.name, entry.score, entry.time));
    }

    lines
}

/// Raw mode and the alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    for (i, line) in lines.iter().enumerate() {
        let attribute = if i == 0 { Attribute::Bold } else { Attribute::Reset };
        queue!(out, cursor::MoveTo(0, i as u16), SetAttribute(attribute), Print(line), SetAttribute(Attribute::Reset))?;
    }
    out.flush()
}

pub fn execute(config: &Config, seed: Option<u64>) -> Result<()> {
    let generator = Generator::new(config.puzzle_params(seed)).map_err(CliError::from)?;
    let session = EditSession::new(generator, SystemClock::new())
        .map_err(CliError::from)?
        .with_scoring(config.scoring_params())
        .with_aligner(config.aligner());
    let mut game = Game::new(session, config.leaderboard());
    let row_length = config.play.row_length;

    log::info!("Starting interactive session");
    let _guard = TerminalGuard::enter().map_err(|e| CliError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();

    loop {
        let snapshot = game.snapshot();
        draw(&mut stdout, &render_lines(&snapshot, row_length))
            .map_err(|e| CliError::terminal(e.to_string()))?;

        if !event::poll(FRAME).map_err(|e| CliError::terminal(e.to_string()))? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(|e| CliError::terminal(e.to_string()))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for_key(key, snapshot.name_entry, row_length) {
            Some(Action::Quit) => break,
            Some(Action::Apply(intent)) => {
                game.apply(intent).map_err(CliError::from)?;
            }
            None => {}
        }
    }

    log::info!("Session ended");
    Ok(())
}
