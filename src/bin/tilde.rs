use anyhow::Result;
use crossterm::event;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tildeterm::app::TerminalApp;
use tildeterm::config::Config;
use tildeterm::logging;
use tildeterm::runtime::{FrontendAdapter, Runtime, TerminalEvent};
use tildeterm::terminal;
use tildeterm::ui::render::render_app;
use tracing::warn;

struct ManagedTuiFrontend {
    terminal: terminal::TerminalType,
    quit: bool,
}

impl ManagedTuiFrontend {
    fn new() -> Result<Self> {
        let terminal = terminal::setup()?;
        Self::drain_startup_events();
        Ok(Self {
            terminal,
            quit: false,
        })
    }

    fn drain_startup_events() {
        for _ in 0..1024 {
            match event::poll(Duration::from_millis(0)) {
                Ok(true) => {
                    if event::read().is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => break,
            }
        }
    }
}

impl Drop for ManagedTuiFrontend {
    fn drop(&mut self) {
        if let Err(err) = terminal::restore() {
            warn!(%err, "failed to restore terminal");
        }
    }
}

impl FrontendAdapter for ManagedTuiFrontend {
    fn poll_event(&mut self) -> Option<TerminalEvent> {
        let Ok(has_event) = event::poll(Duration::from_millis(0)) else {
            self.quit = true;
            return None;
        };
        if !has_event {
            return None;
        }

        match event::read() {
            Ok(ev) => TerminalEvent::from_crossterm(ev),
            Err(err) => {
                warn!(%err, "terminal input closed");
                self.quit = true;
                None
            }
        }
    }

    fn render(&mut self, app: &mut TerminalApp) {
        let size = match self.terminal.size() {
            Ok(size) => size,
            Err(err) => {
                warn!(%err, "failed to read terminal size");
                self.quit = true;
                return;
            }
        };
        app.update_geometry(Rect::new(0, 0, size.width, size.height));

        let app = &*app;
        if let Err(err) = self.terminal.draw(|frame| render_app(frame, app)) {
            warn!(%err, "failed to draw frame");
            self.quit = true;
        }
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;
    logging::init(&config)?;

    let app = TerminalApp::new(&config, Instant::now());
    let mut runtime = Runtime::new(app);
    let mut frontend = ManagedTuiFrontend::new()?;
    runtime.run(&mut frontend).await;
    Ok(())
}
