use crate::entity::{Direction, Position};
use crate::game::{Colour, EndReason, Game, GameState};
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Terminal rows used below the board for score and messages
pub const INFO_LINES: u16 = 4;

pub struct CliRenderer {
    last_render: Instant,
    target_frame_time: Duration,
    /// Last frame was drawn for a finished game; redraw only on change
    drew_game_over: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
            drew_game_over: false,
        }
    }

    fn colour_of(colour: Colour) -> Color {
        match colour {
            Colour::Body => Color::White,
            Colour::Apple => Color::Green,
            Colour::BombArmed => Color::Red,
            Colour::BombExploding => Color::DarkYellow,
        }
    }

    fn draw_info(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        let height = game.config().height as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, height + 1),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "Score: {}  Length: {}",
                game.score(),
                game.snake().current_length()
            ))
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, height + 2),
            Print("Controls: Arrow Keys/WASD to turn | Q to quit | R to restart")
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, height + 3),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        if let GameState::Over(reason) = game.state() {
            let cause = match reason {
                EndReason::OutOfBounds => "You left the board",
                EndReason::Bomb => "Caught by a bomb",
                EndReason::SelfCollision => "You bit yourself",
                EndReason::BoardFull => "The board is full",
            };
            queue!(
                stdout,
                SetForegroundColor(Color::Red),
                Print(format!("GAME OVER! {}. Press R to restart", cause)),
                ResetColor
            )?;
        }

        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let over = game.state() != GameState::Playing;
        if over && self.drew_game_over {
            return Ok(());
        }

        // Frame rate limiting: skip rendering if not enough time has passed,
        // but always show the final frame of a game
        if !over && self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();
        self.drew_game_over = over;

        // Later categories win so the blast paints over the snake
        let mut painted: HashMap<Position, Color> = HashMap::new();
        for (colour, cells) in game.as_colours() {
            for cell in cells {
                painted.insert(cell, Self::colour_of(colour));
            }
        }

        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        // Row 0 on screen is the top of the board (largest y)
        let config = game.config();
        for y in (0..config.height).rev() {
            for x in 0..config.width {
                let background = painted
                    .get(&Position::new(x, y))
                    .copied()
                    .unwrap_or(Color::Black);
                queue!(stdout, SetBackgroundColor(background), Print("  "))?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_info(game, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Release {
                    return Ok(None);
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(Some(Input::Quit));
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        self.drew_game_over = false;
                        return Ok(Some(Input::Restart));
                    }
                    KeyCode::Up | KeyCode::Char('w') => return Ok(Some(Input::Direction(Direction::Up))),
                    KeyCode::Down | KeyCode::Char('s') => return Ok(Some(Input::Direction(Direction::Down))),
                    KeyCode::Left | KeyCode::Char('a') => return Ok(Some(Input::Direction(Direction::Left))),
                    KeyCode::Right | KeyCode::Char('d') => return Ok(Some(Input::Direction(Direction::Right))),
                    _ => {}
                }
            }
        }
        Ok(None)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
