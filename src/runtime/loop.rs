use crate::app::TerminalApp;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::frontend::FrontendAdapter;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_EVENTS_PER_FRAME: usize = 64;

pub struct Runtime {
    pub app: TerminalApp,
}

impl Runtime {
    pub fn new(app: TerminalApp) -> Self {
        Self { app }
    }

    /// Draw, drain input, advance timers; once per frame until either side
    /// asks to stop.
    pub async fn run<F: FrontendAdapter>(&mut self, frontend: &mut F) {
        let mut tick = tokio::time::interval(FRAME_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("terminal session started");

        let mut dirty = true;
        while !self.should_stop(frontend) {
            if dirty {
                frontend.render(&mut self.app);
                dirty = false;
            }

            for _ in 0..MAX_EVENTS_PER_FRAME {
                let Some(event) = frontend.poll_event() else {
                    break;
                };
                dirty |= self.app.handle_event(event, Instant::now());
                if self.app.quit_requested() {
                    break;
                }
            }

            tick.tick().await;
            dirty |= self.app.tick(Instant::now());
        }

        info!(
            commands = self.app.history().len(),
            "terminal session finished"
        );
    }

    fn should_stop<F: FrontendAdapter>(&self, frontend: &F) -> bool {
        self.app.quit_requested() || frontend.should_quit()
    }
}
