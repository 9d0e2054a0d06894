//! Presentation surfaces
//!
//! The terminal surface draws each frame with upper-half-block characters,
//! two pixel rows per text row, nearest-neighbour sampled to the terminal
//! size. Esc, `q` or Ctrl-C request a stop.

use crate::frame::FrameBuffer;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color, widgets::Widget, Terminal};
use std::io;
use std::time::Duration;

/// Where finished frames go
pub trait Display {
    /// Show one frame
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()>;

    /// Poll for a stop request without blocking
    fn stop_requested(&mut self) -> io::Result<bool>;
}

/// Renders a frame into a ratatui buffer
pub struct FrameView<'a> {
    frame: &'a FrameBuffer,
}

impl<'a> FrameView<'a> {
    pub fn new(frame: &'a FrameBuffer) -> Self {
        Self { frame }
    }
}

impl Widget for FrameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (fw, fh) = (self.frame.width(), self.frame.height());
        if fw == 0 || fh == 0 || area.width == 0 || area.height == 0 {
            return;
        }
        let cols = area.width as usize;
        let rows = area.height as usize * 2;

        for ty in 0..area.height {
            for tx in 0..area.width {
                let x = tx as usize * fw / cols;
                let upper = (ty as usize * 2) * fh / rows;
                let lower = (ty as usize * 2 + 1) * fh / rows;
                let [r1, g1, b1] = self.frame.pixel(x, upper);
                let [r2, g2, b2] = self.frame.pixel(x, lower);
                buf.get_mut(area.x + tx, area.y + ty)
                    .set_char('▀')
                    .set_fg(Color::Rgb(r1, g1, b1))
                    .set_bg(Color::Rgb(r2, g2, b2));
            }
        }
    }
}

/// Full-screen terminal surface; restores the terminal when dropped
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    restored: bool,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = undo_on_error(Self::enter(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn enter() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }

    /// Leave the alternate screen and raw mode
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Display for TerminalDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.terminal.draw(|f| f.render_widget(FrameView::new(frame), f.size()))?;
        Ok(())
    }

    fn stop_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_stop_key(&key) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Run `undo` if `result` failed, then pass the result through
fn undo_on_error<T, F: FnOnce()>(result: io::Result<T>, undo: F) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Esc, `q`, or Ctrl-C (raw mode swallows SIGINT)
pub fn is_stop_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
