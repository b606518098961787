use crate::app::TerminalApp;

use super::event::TerminalEvent;

/// Host surface the runtime drives: a real terminal or a scripted stand-in.
pub trait FrontendAdapter {
    /// Next pending event, without blocking.
    fn poll_event(&mut self) -> Option<TerminalEvent>;
    /// Measures the frame into `app` and draws it.
    fn render(&mut self, app: &mut TerminalApp);
    fn should_quit(&self) -> bool;
}
