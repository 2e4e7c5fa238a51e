//! Terminal host built on crossterm
//!
//! The fixed 1280×720 logical window is scaled onto the terminal's character
//! grid. Draw commands are rasterized into a cell buffer and the whole buffer
//! is written once per frame.
//!
//! Input model: a dedicated thread blocks on `event::read` and forwards
//! events over a channel. Terminals with the keyboard enhancement protocol
//! report releases, so a key is held from its press until its release.
//! Elsewhere each key remembers the frame of its last press or repeat and
//! counts as held while that is within `HOLD_WINDOW` frames. On those
//! terminals a key held past the window, before OS autorepeat kicks in,
//! drops out and comes back as a fresh press.

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Color as TermColor, Print};
use crossterm::{ExecutableCommand, QueueableCommand, cursor, terminal};

use super::{Host, HostError};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::input::{Key, KeyboardState};
use crate::renderer::{Color, DrawCommand, FillMode};

/// A key stays held this many frames after its last press/repeat event.
/// About 130 ms at 60 FPS, shorter than typical OS repeat intervals.
const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::WHITE,
    bg: Color::BACKGROUND,
};

/// Character-cell buffer addressed in logical window pixels
#[derive(Debug)]
struct CellGrid {
    cols: u16,
    rows: u16,
    /// Logical window size mapped onto the grid
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl CellGrid {
    fn new(cols: u16, rows: u16, width: i32, height: i32) -> Self {
        Self {
            cols,
            rows,
            width,
            height,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    /// Grid for the game's logical window
    fn for_window(cols: u16, rows: u16) -> Self {
        Self::new(cols, rows, WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Logical x → column (may be out of range)
    fn col_of(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64 / self.width.max(1) as i64) as i32
    }

    fn row_of(&self, y: i32) -> i32 {
        (y as i64 * self.rows as i64 / self.height.max(1) as i64) as i32
    }

    /// Centre of a cell in logical pixels
    fn cell_center(&self, col: i32, row: i32) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width as f32 / self.cols.max(1) as f32,
            (row as f32 + 0.5) * self.height as f32 / self.rows.max(1) as f32,
        )
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols as usize + col as usize)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn paint(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
                fill,
            } => self.rect(*x, *y, *width, *height, *color, *fill),
            DrawCommand::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
                color,
                ..
            } => self.ellipse(*x, *y, *radius_x, *radius_y, *color),
            DrawCommand::Text { x, y, text } => self.text(*x, *y, text),
        }
    }

    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, fill: FillMode) {
        let (c0, r0) = (self.col_of(x), self.row_of(y));
        let (c1, r1) = (self.col_of(x + width), self.row_of(y + height));

        match fill {
            FillMode::Solid => {
                for row in r0..r1.max(r0 + 1) {
                    for col in c0..c1.max(c0 + 1) {
                        if let Some(cell) = self.cell_mut(col, row) {
                            *cell = Cell {
                                ch: ' ',
                                fg: color,
                                bg: color,
                            };
                        }
                    }
                }
            }
            FillMode::Wireframe => {
                for col in c0 + 1..c1 {
                    self.put(col, r0, '─', color);
                    self.put(col, r1, '─', color);
                }
                for row in r0 + 1..r1 {
                    self.put(c0, row, '│', color);
                    self.put(c1, row, '│', color);
                }
                self.put(c0, r0, '┌', color);
                self.put(c1, r0, '┐', color);
                self.put(c0, r1, '└', color);
                self.put(c1, r1, '┘', color);
            }
        }
    }

    fn ellipse(&mut self, x: i32, y: i32, radius_x: i32, radius_y: i32, color: Color) {
        let (rx, ry) = (radius_x.max(1) as f32, radius_y.max(1) as f32);
        let (c0, r0) = (self.col_of(x - radius_x), self.row_of(y - radius_y));
        let (c1, r1) = (self.col_of(x + radius_x), self.row_of(y + radius_y));

        let mut covered = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let (cx, cy) = self.cell_center(col, row);
                let (dx, dy) = ((cx - x as f32) / rx, (cy - y as f32) / ry);
                if dx * dx + dy * dy <= 1.0 {
                    self.put(col, row, '█', color);
                    covered = true;
                }
            }
        }
        // Circles smaller than a cell still show up
        if !covered {
            self.put(self.col_of(x), self.row_of(y), '●', color);
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str) {
        let (col, row) = (self.col_of(x), self.row_of(y));
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, Color::WHITE);
        }
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b, _) = color.rgba();
    TermColor::Rgb { r, g, b }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            'a' => Some(Key::A),
            's' => Some(Key::S),
            'd' => Some(Key::D),
            ' ' => Some(Key::Space),
            '1' => Some(Key::Digit1),
            '2' => Some(Key::Digit2),
            '3' => Some(Key::Digit3),
            _ => None,
        },
        _ => None,
    }
}

/// Which keys are down, built from press/repeat/release events
#[derive(Debug, Default)]
struct HeldKeys {
    /// Each held key → the frame it was last seen (press or repeat)
    last_seen: HashMap<Key, u64>,
    /// Terminal sends release events
    releases: bool,
}

impl HeldKeys {
    fn new(releases: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            releases,
        }
    }

    fn press(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    fn is_held(&self, key: Key, frame: u64) -> bool {
        match self.last_seen.get(&key) {
            Some(_) if self.releases => true,
            Some(&last) => frame.saturating_sub(last) <= HOLD_WINDOW,
            None => false,
        }
    }
}

pub struct TerminalHost {
    out: BufWriter<Stdout>,
    rx: Receiver<Event>,
    grid: CellGrid,
    keys: HeldKeys,
    mouse: (i32, i32),
    frame: u64,
    frame_start: Instant,
    frame_budget: Duration,
    keyboard_enhanced: bool,
    closed: bool,
    finalized: bool,
}

impl TerminalHost {
    /// Take over the terminal: raw mode, alternate screen, mouse capture
    pub fn initialize(title: &str, target_fps: u32) -> Result<Self, HostError> {
        let mut out = BufWriter::new(stdout());

        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;
        out.execute(terminal::SetTitle(title))?;

        // Must be asked before the reader thread owns stdin
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            out.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }

        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        let (cols, rows) = terminal::size()?;
        log::info!(
            "Terminal host {cols}x{rows} cells, keyboard enhancement {}",
            if keyboard_enhanced { "on" } else { "off" }
        );

        Ok(Self {
            out,
            rx,
            grid: CellGrid::for_window(cols, rows),
            keys: HeldKeys::new(keyboard_enhanced),
            mouse: (WINDOW_WIDTH / 2, WINDOW_HEIGHT / 2),
            frame: 0,
            frame_start: Instant::now(),
            frame_budget: Duration::from_secs(1) / target_fps.max(1),
            keyboard_enhanced,
            closed: false,
            finalized: false,
        })
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key_event;

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.closed = true;
            return;
        }
        let Some(key) = map_key(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.keys.press(key, self.frame),
            KeyEventKind::Release => self.keys.release(key),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                let (x, y) = self
                    .grid
                    .cell_center(mouse.column as i32, mouse.row as i32);
                self.mouse = (x as i32, y as i32);
            }
            _ => {}
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.grid.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.grid.cols as usize;
            for cell in &self.grid.cells[start..start + self.grid.cols as usize] {
                if fg != Some(cell.fg) {
                    self.out
                        .queue(style::SetForegroundColor(term_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    self.out
                        .queue(style::SetBackgroundColor(term_color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl Host for TerminalHost {
    fn process_messages(&mut self) -> Result<bool, HostError> {
        loop {
            match self.rx.try_recv() {
                Ok(Event::Key(key_event)) => self.handle_key(key_event),
                Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                Ok(Event::Resize(cols, rows)) => {
                    log::debug!("Terminal resized to {cols}x{rows}");
                    self.grid.resize(cols, rows);
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(HostError::InputDisconnected),
            }
        }
        Ok(!self.closed)
    }

    fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
        self.frame += 1;
        self.grid.clear();
    }

    fn keyboard(&self) -> KeyboardState {
        let mut keys = KeyboardState::default();
        for key in Key::ALL {
            keys.set(key, self.keys.is_held(key, self.frame));
        }
        keys
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.mouse
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.grid.paint(command);
    }

    fn end_frame(&mut self) -> Result<(), HostError> {
        self.present()?;

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_budget {
            thread::sleep(self.frame_budget - elapsed);
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), HostError> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        // Every step runs; the first failure is reported
        let mut steps = Vec::with_capacity(5);
        if self.keyboard_enhanced {
            steps.push(self.out.execute(PopKeyboardEnhancementFlags).map(drop));
        }
        steps.push(self.out.execute(DisableMouseCapture).map(drop));
        steps.push(self.out.execute(cursor::Show).map(drop));
        steps.push(self.out.execute(terminal::LeaveAlternateScreen).map(drop));
        steps.push(terminal::disable_raw_mode());
        first_error(steps)
    }
}

fn first_error(steps: Vec<std::io::Result<()>>) -> Result<(), HostError> {
    match steps.into_iter().find_map(Result::err) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        // Never leave the user's terminal in raw mode
        let _ = self.finalize();
    }
}
