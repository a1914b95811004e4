/// Terminal front end: rasterizes the cube session into a character grid
use anyhow::{Context, Result};
use crossterm::{
    cursor, event,
    style::{Attribute, ResetColor, SetAttribute},
    terminal::{self},
    QueueableCommand,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use termcube_core::{Action, Camera, Session};

pub mod grid;
pub mod input;
pub mod renderer;

pub use grid::{Cell, PixelGrid};
pub use input::Input;
pub use renderer::{Rasterizer, ScreenVertex};

/// Main application struct for terminal cube rendering
pub struct TerminalApp {
    session: Session,
    camera: Camera,
    rasterizer: Rasterizer,
    running: bool,
    target_frame_time: Duration,
    last_fps_update: Instant,
    frame_count: u32,
    fps: u32,
}

impl TerminalApp {
    /// Size the grid to the current terminal.
    pub fn new(session: Session) -> Result<Self> {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        Ok(Self::with_size(session, width, height))
    }

    pub fn with_size(session: Session, width: u16, height: u16) -> Self {
        let config = session.config();
        let camera = Camera::new(width, height, config.camera.fov_degrees);
        let rasterizer = Rasterizer::new(width, height, &config.render);
        let target_frame_time = Duration::from_secs_f64(1.0 / config.render.target_fps as f64);
        Self {
            session,
            camera,
            rasterizer,
            running: true,
            target_frame_time,
            last_fps_update: Instant::now(),
            frame_count: 0,
            fps: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;

        let result = enter_screen(&mut stdout())
            .context("failed to enter the alternate screen")
            .and_then(|()| {
                log::info!(
                    "started on a {}x{} grid",
                    self.rasterizer.width(),
                    self.rasterizer.height()
                );
                self.main_loop()
            });

        // Always try to restore terminal state, even after a failure above.
        let screen = leave_screen(&mut stdout());
        let raw = terminal::disable_raw_mode();
        log::info!("stopped with moves {:?}", self.session.moves().to_string());

        result.and(screen.and(raw).context("failed to restore the terminal"))
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut out = stdout();

        while self.running {
            let frame_start = Instant::now();

            let action = self.poll_input()?;
            if !self.running {
                break;
            }
            self.frame(action);

            self.rasterizer.present(&mut out)?;
            out.flush()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            let window = now - self.last_fps_update;
            if window.as_secs() >= 1 {
                self.fps = (self.frame_count as f32 / window.as_secs_f32()).round() as u32;
                self.frame_count = 0;
                self.last_fps_update = now;
            }
        }

        Ok(())
    }

    /// Take at most one event from the terminal without blocking.
    fn poll_input(&mut self) -> Result<Option<Action>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match input::map_event(event::read()?) {
            Some(Input::Quit) => {
                self.running = false;
                Ok(None)
            }
            Some(Input::Resize(width, height)) => {
                self.resize(width, height);
                Ok(None)
            }
            Some(Input::Action(action)) => Ok(Some(action)),
            None => Ok(None),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        log::debug!("resize to {width}x{height}");
        self.rasterizer.resize(width, height);
        self.camera.resize(width, height);
    }

    /// Advance the session one tick and draw it, HUD included, into the grid.
    pub fn frame(&mut self, action: Option<Action>) {
        self.session.step(action);
        self.session.orbit().apply(&mut self.camera);

        self.rasterizer.begin_frame();
        self.rasterizer.render_cube(self.session.cube(), &self.camera);
        self.rasterizer.draw_hud(self.fps, self.session.moves());
    }
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.flush()
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_leave_screen_restores_cursor_and_screen() {
        let mut out = Vec::new();
        leave_screen(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?25h"), "cursor shown: {text:?}");
        assert!(text.ends_with("\x1b[?1049l"), "screen left: {text:?}");
    }

    #[test]
    fn test_enter_screen_hides_cursor() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\x1b[?1049h\x1b[?25l");
    }

    #[test]
    fn test_screen_errors_are_reported() {
        assert!(leave_screen(&mut Broken).is_err());
        assert!(enter_screen(&mut Broken).is_err());
    }
}
