use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::{Config, Coords, GameError, Result};
use crate::view::{BodyPart, Fill, Frame, Renderer};

type ScreenPos = (u16, u16);

// Each grid cell is drawn two columns wide so it looks roughly square.
const CELL_COLUMNS: u16 = 2;
const HUD_ROWS: u16 = 2;

const LABEL_COLOR: Color = Color::Rgb { r: 55, g: 155, b: 50 };
const VALUE_COLOR: Color = Color::Rgb { r: 100, g: 150, b: 100 };
const MAX_COLOR: Color = Color::Rgb { r: 155, g: 55, b: 50 };
const OUTLINE_COLOR: Color = Color::Rgb { r: 150, g: 150, b: 150 };
const FOOD_COLOR: Color = Color::Rgb { r: 200, g: 30, b: 50 };

const BODY_GLYPH: &str = "██";
const NEAR_TAIL_GLYPH: &str = "▓▓";
const TAIL_GLYPH: &str = "▒▒";
const FOOD_GLYPH: &str = "()";
const EMPTY_GLYPH: &str = "  ";

pub struct TermManager {
    stdout: Stdout,
    size: ScreenPos,
    field: ScreenPos,
    cell_size: i32,
    drawn: Vec<ScreenPos>,
    active: bool,
}

impl TermManager {
    /// Checks that the configured field, its border and the HUD fit on screen.
    pub fn new(config: &Config) -> Result<Self> {
        let size = terminal::size()?;
        let (field, needed) = screen_extent(config)
            .ok_or(GameError::TerminalTooSmall { needed: (u16::MAX, u16::MAX), actual: size })?;

        if needed.0 > size.0 || needed.1 > size.1 {
            return Err(GameError::TerminalTooSmall { needed, actual: size });
        }

        Ok(TermManager {
            stdout: stdout(),
            size,
            field,
            cell_size: config.cell_size,
            drawn: vec![],
            active: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains whatever key presses are pending without waiting for more.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.drawn.clear();
        Ok(())
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = (self.field.0 + 2, self.field.1 + 2);
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {"+"} else {"-"};
            self.print_at((x, 0), ch, LABEL_COLOR)?;
            self.print_at((x, end_y), ch, LABEL_COLOR)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), "|", LABEL_COLOR)?;
            self.print_at((end_x, y), "|", LABEL_COLOR)?;
        }

        self.flush()
    }

    /// Centred box of text over the play field.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = ((self.field.0 + 2) / 2, (self.field.1 + 2) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        self.print_at(top_left, &blank, VALUE_COLOR)?;
        self.print_at((top_left.0, top_left.1 + msg_height - 1), &blank, VALUE_COLOR)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            self.print_at((top_left.0, y), &padded_line, VALUE_COLOR)?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: ScreenPos, text: &str, color: Color) -> Result<()> {
        queue!(self.stdout,
               cursor::MoveTo(pos.0, pos.1),
               style::SetForegroundColor(color),
               style::Print(text),
               style::ResetColor)?;
        Ok(())
    }

    fn cell_pos(&self, pos: Coords) -> Result<ScreenPos> {
        let column = u16::try_from(pos.0 / self.cell_size).ok()
            .and_then(|c| c.checked_mul(CELL_COLUMNS))
            .filter(|c| *c < self.field.0);
        let row = u16::try_from(pos.1 / self.cell_size).ok()
            .filter(|r| *r < self.field.1);

        match (column, row) {
            (Some(column), Some(row)) => Ok((1 + column, 1 + row)),
            _ => Err(GameError::OffGrid(pos)),
        }
    }

    fn draw_hud(&mut self, frame: &Frame) -> Result<()> {
        let hud = frame.hud;
        let top = self.field.1 + 2;
        let line_width = self.size.0 as usize;

        let score = format!("{:<18}", hud.score_text());
        let first_line = format!("{}{}", score, hud.space_left_text());
        self.print_at((0, top), &format!("{:<w$}", first_line, w = line_width), VALUE_COLOR)?;

        let speed = hud.speed_text();
        self.print_at((0, top + 1), &format!("{:<w$}", speed, w = line_width), VALUE_COLOR)?;
        if hud.speed_max {
            // repaint the "(MAX)" suffix in the warning color
            let suffix_at = speed.len() as u16 - 5;
            self.print_at((suffix_at, top + 1), "(MAX)", MAX_COLOR)?;
        }

        Ok(())
    }
}

impl Renderer for TermManager {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        for pos in std::mem::take(&mut self.drawn) {
            self.print_at(pos, EMPTY_GLYPH, OUTLINE_COLOR)?;
        }

        if let Some(food) = frame.food {
            let pos = self.cell_pos(food)?;
            self.print_at(pos, FOOD_GLYPH, FOOD_COLOR)?;
            self.drawn.push(pos);
        }

        // Tail first so the head wins when segments overlap.
        for segment in frame.segments.iter().rev() {
            let pos = self.cell_pos(segment.pos)?;
            let color = fill_color(segment.style.fill);

            match segment.style.part {
                BodyPart::Head => {
                    let ch = frame.heading.head_char();
                    self.print_at(pos, &format!("{0}{0}", ch), OUTLINE_COLOR)?;
                },
                BodyPart::Middle => self.print_at(pos, BODY_GLYPH, color)?,
                BodyPart::NearTail => self.print_at(pos, NEAR_TAIL_GLYPH, color)?,
                BodyPart::Tail => self.print_at(pos, TAIL_GLYPH, color)?,
            }
            self.drawn.push(pos);
        }

        self.draw_hud(frame)?;
        self.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn fill_color(fill: Fill) -> Color {
    match fill {
        Fill::Odd => Color::Rgb { r: 100, g: 120, b: 30 },
        Fill::Even => Color::Rgb { r: 100, g: 170, b: 30 },
        Fill::Third => Color::Rgb { r: 100, g: 170, b: 80 },
    }
}

/// Screen size of the play field and of the whole game (border and HUD
/// included), or `None` when the field cannot be addressed on a terminal.
fn screen_extent(config: &Config) -> Option<(ScreenPos, ScreenPos)> {
    let columns = u16::try_from(config.columns()).ok()?.checked_mul(CELL_COLUMNS)?;
    let rows = u16::try_from(config.rows()).ok()?;
    let needed = (columns.checked_add(2)?, rows.checked_add(2 + HUD_ROWS)?);
    Some(((columns, rows), needed))
}
