use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

pub const RELOAD_LABEL: &str = "[reload]";
pub const RELOAD_TOOLTIP: &str = "Reset the terminal";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalLayout {
    pub header: Rect,
    pub reload: Rect,
    pub body: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Reload,
    Surface,
    Outside,
}

pub fn split_terminal_layout(area: Rect) -> TerminalLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let header = chunks[0];
    let label_width = (RELOAD_LABEL.len() as u16).min(header.width);
    let reload = Rect::new(
        header.x + header.width.saturating_sub(label_width),
        header.y,
        label_width,
        header.height,
    );

    TerminalLayout {
        header,
        reload,
        body: chunks[1],
    }
}

impl TerminalLayout {
    /// The header outside the reload control is part of the display surface.
    pub fn hit_test(&self, column: u16, row: u16) -> HitTarget {
        let position = Position::new(column, row);
        if self.reload.contains(position) {
            HitTarget::Reload
        } else if self.body.contains(position) || self.header.contains(position) {
            HitTarget::Surface
        } else {
            HitTarget::Outside
        }
    }

    /// Row under the header where the reload tooltip is drawn.
    pub fn tooltip_area(&self) -> Option<Rect> {
        if self.body.height == 0 {
            return None;
        }
        let width = (RELOAD_TOOLTIP.len() as u16 + 2).min(self.body.width);
        let x = (self.reload.x + self.reload.width)
            .saturating_sub(width)
            .max(self.body.x);
        Some(Rect::new(x, self.body.y, width, 1))
    }
}
