//! Line-oriented terminal presentation of session snapshots and events.

use std::io::Write;

use anyhow::Result;
use hue_hunt_core::{CellIndex, Color, Event, Round, SessionState};
use hue_hunt_session::query::SessionSnapshot;

use crate::input::InputError;

/// Seconds between countdown announcements.
const ANNOUNCE_EVERY: u64 = 5;

const HELP: &str = "\
controls:
  s / start     start a new game
  a / abandon   give up the current game
  q / quit      leave
  c4 | 4 3 | 18 pick a cell by column letter and row, by row and column, or by number";

/// Writes game output to a terminal-like sink.
#[derive(Debug)]
pub(crate) struct Renderer<W> {
    out: W,
    color: bool,
    grid_size: u32,
    announced_secs: u64,
}

impl<W: Write> Renderer<W> {
    /// Creates a renderer for grids `grid_size` cells wide.
    pub(crate) fn new(out: W, color: bool, grid_size: u32) -> Self {
        Self {
            out,
            color,
            grid_size,
            announced_secs: 0,
        }
    }

    /// Greets the player and prints the controls.
    pub(crate) fn welcome(&mut self, seed: u64) -> Result<()> {
        writeln!(self.out, "Hue Hunt: find the cell that is a shade off. (seed {seed})")?;
        self.help()
    }

    /// Prints the controls.
    pub(crate) fn help(&mut self) -> Result<()> {
        writeln!(self.out, "{HELP}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Explains why a line of input was ignored.
    pub(crate) fn rejected(&mut self, error: &InputError) -> Result<()> {
        writeln!(self.out, "? {error}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Presents the events produced by one command and the resulting snapshot.
    pub(crate) fn present(&mut self, snapshot: &SessionSnapshot, events: &[Event]) -> Result<()> {
        if events.is_empty() && snapshot.state != SessionState::Active {
            writeln!(self.out, "no game running, type s to start")?;
        }

        let mut redraw = false;
        for event in events {
            match event {
                Event::SessionStarted => {
                    self.announced_secs = snapshot.time_remaining.as_secs();
                    writeln!(self.out, "Go! {}s on the clock.", self.announced_secs)?;
                }
                Event::RoundGenerated { .. } => redraw = true,
                Event::TimeAdvanced { remaining, .. } => {
                    let secs = remaining.as_secs();
                    if secs < self.announced_secs && secs % ANNOUNCE_EVERY == 0 && secs > 0 {
                        writeln!(self.out, "{secs}s left")?;
                    }
                    self.announced_secs = secs;
                }
                Event::SelectionResolved { outcome } if outcome.correct => {
                    let label = self.label(outcome.cell);
                    writeln!(
                        self.out,
                        "+ {label} correct, score {}, {:.1}s left",
                        snapshot.score,
                        snapshot.time_remaining.as_secs_f32()
                    )?;
                }
                Event::SelectionResolved { .. } => {}
                Event::Celebrate { score } => {
                    writeln!(self.out, "*** {score} spotted! keep going ***")?;
                }
                Event::Shake { cell } => {
                    let label = self.label(*cell);
                    writeln!(
                        self.out,
                        "~ {label} is not it, {:.1}s left",
                        snapshot.time_remaining.as_secs_f32()
                    )?;
                }
                Event::SessionAbandoned => {
                    writeln!(self.out, "Game abandoned. Type s to play again.")?;
                }
                Event::SessionEnded { score, rank } => {
                    writeln!(self.out, "Time's up! Final score: {score}")?;
                    writeln!(self.out, "{}: {}", rank.title, rank.description)?;
                    writeln!(self.out, "Type s to play again or q to quit.")?;
                }
            }
        }

        if redraw {
            if let Some(round) = &snapshot.round {
                self.draw_grid(round, snapshot.level.get())?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw_grid(&mut self, round: &Round, level: u32) -> Result<()> {
        writeln!(self.out, "level {level}")?;
        let header: String = (0..self.grid_size)
            .map(|column| format!("{:^12}", column_letter(column)))
            .collect();
        writeln!(self.out, "   {}", header.trim_end())?;

        for (row, cells) in round.cells().chunks(self.grid_size as usize).enumerate() {
            let line: Vec<String> = cells.iter().map(|color| self.swatch(*color)).collect();
            writeln!(self.out, "{:>2} {}", row + 1, line.join(" "))?;
        }
        Ok(())
    }

    fn swatch(&self, color: Color) -> String {
        if self.color {
            let (red, green, blue) = color.to_rgb();
            format!("\x1b[48;2;{red};{green};{blue}m           \x1b[0m")
        } else {
            format!("{:<11}", color.display_string())
        }
    }

    fn label(&self, cell: CellIndex) -> String {
        format!(
            "{}{}",
            column_letter(cell.column(self.grid_size)),
            cell.row(self.grid_size) + 1
        )
    }
}

fn column_letter(column: u32) -> char {
    char::from_u32(u32::from('A') + column).unwrap_or('?')
}
