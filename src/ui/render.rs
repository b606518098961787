use crate::app::{Focus, TerminalApp};
use crate::state::ScrollbackEntry;
use crate::ui::input_metrics::{display_width, truncate_to_display_width, wrap_segments, Segment};
use crate::ui::layout::{split_terminal_layout, TerminalLayout, RELOAD_LABEL, RELOAD_TOOLTIP};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

const BACKGROUND: Color = Color::Rgb(26, 26, 26);

fn prompt_style() -> Style {
    Style::default().fg(Color::Rgb(169, 169, 169))
}

fn text_style() -> Style {
    Style::default().fg(Color::White)
}

fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

fn suggestion_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

fn caret_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

pub fn entry_segments(entry: &ScrollbackEntry, prompt: &str) -> Vec<Segment> {
    if entry.is_placeholder {
        return vec![Segment::new(entry.text.clone(), placeholder_style())];
    }
    let (prefix, rest) = entry.split_prompt(prompt);
    let mut segments = Vec::with_capacity(2);
    if !prefix.is_empty() {
        segments.push(Segment::new(prefix, prompt_style()));
    }
    segments.push(Segment::new(rest, text_style()));
    segments
}

/// The live prompt line: committed text, the drawn caret and the dimmed
/// suggestion. The caret cell covers the character that would otherwise sit
/// there: the first suggestion character, the next buffer character, or a
/// blank at the end of the line.
pub fn input_line_segments(
    prompt: &str,
    buffer: &str,
    cursor: usize,
    suggestion: &str,
    caret_visible: bool,
) -> Vec<Segment> {
    let mut cursor = cursor.min(buffer.len());
    while cursor > 0 && !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    let (before, after) = buffer.split_at(cursor);

    let mut segments = vec![
        Segment::new(prompt, prompt_style()),
        Segment::new(" ", text_style()),
    ];
    if !before.is_empty() {
        segments.push(Segment::new(before, text_style()));
    }

    let (caret_glyph, caret_base, suggestion_rest, after_rest) =
        if let Some(first) = suggestion.chars().next() {
            (first, suggestion_style(), &suggestion[first.len_utf8()..], after)
        } else if let Some(first) = after.chars().next() {
            (first, text_style(), "", &after[first.len_utf8()..])
        } else {
            (' ', text_style(), "", "")
        };

    let caret_cell_style = if caret_visible {
        caret_style(caret_base)
    } else {
        caret_base
    };
    segments.push(Segment::new(caret_glyph.to_string(), caret_cell_style));
    if !suggestion_rest.is_empty() {
        segments.push(Segment::new(suggestion_rest, suggestion_style()));
    }
    if !after_rest.is_empty() {
        segments.push(Segment::new(after_rest, text_style()));
    }
    segments
}

pub fn body_lines(app: &TerminalApp, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in app.scrollback() {
        push_wrapped(&mut lines, &entry_segments(entry, app.prompt()), width);
    }
    let input = input_line_segments(
        app.prompt(),
        app.input(),
        app.cursor(),
        app.suggestion(),
        app.caret_visible(),
    );
    push_wrapped(&mut lines, &input, width);
    lines
}

pub fn body_rows(app: &TerminalApp, width: usize) -> usize {
    body_lines(app, width).len()
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, segments: &[Segment], width: usize) {
    for row in wrap_segments(segments, width) {
        let spans: Vec<Span<'static>> = row
            .into_iter()
            .map(|segment| Span::styled(segment.text, segment.style))
            .collect();
        lines.push(Line::from(spans));
    }
}

pub fn render_app(frame: &mut Frame<'_>, app: &TerminalApp) {
    let area = frame.area();
    let layout = app.layout().unwrap_or_else(|| split_terminal_layout(area));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(BACKGROUND)),
        area,
    );

    render_header(frame, &layout, app);
    render_body(frame, layout.body, app);
    if app.reload_hovered() {
        render_tooltip(frame, &layout);
    }
}

fn render_header(frame: &mut Frame<'_>, layout: &TerminalLayout, app: &TerminalApp) {
    let header = layout.header;
    if header.height == 0 || header.width == 0 {
        return;
    }

    let focus_hint = match app.focus() {
        Focus::Input => "",
        Focus::Surface => "  (space to type)",
        Focus::Detached => "  (unfocused)",
    };
    let title = format!(" {} terminal{focus_hint}", app.prompt());
    let title_width = header.width.saturating_sub(layout.reload.width) as usize;
    frame.render_widget(
        Paragraph::new(truncate_line(&title, title_width))
            .style(Style::default().fg(Color::DarkGray)),
        Rect::new(header.x, header.y, title_width as u16, header.height),
    );

    let reload_style = if app.reload_hovered() {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(truncate_to_display_width(
            RELOAD_LABEL,
            layout.reload.width as usize,
        ))
        .style(reload_style),
        layout.reload,
    );
}

fn render_body(frame: &mut Frame<'_>, area: Rect, app: &TerminalApp) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let lines = body_lines(app, area.width as usize);
    let offset = app.scroll().offset().min(u16::MAX as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_tooltip(frame: &mut Frame<'_>, layout: &TerminalLayout) {
    let Some(area) = layout.tooltip_area() else {
        return;
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!(" {RELOAD_TOOLTIP} ")).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(230, 230, 230)),
        ),
        area,
    );
}

fn truncate_line(input: &str, width: usize) -> String {
    if display_width(input) <= width {
        return input.to_string();
    }
    if width < 4 {
        return truncate_to_display_width(input, width);
    }
    let mut out = truncate_to_display_width(input, width - 3);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn texts(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn caret_covers_first_suggestion_char() {
        let segments = input_line_segments("~", "ab", 2, "out", true);
        assert_eq!(texts(&segments), vec!["~", " ", "ab", "o", "ut"]);
        assert!(segments[3].style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(segments[4].style, suggestion_style());
    }

    #[test]
    fn caret_covers_next_char_mid_line() {
        let segments = input_line_segments("~", "ab", 1, "", true);
        assert_eq!(texts(&segments), vec!["~", " ", "a", "b"]);
        assert!(segments[3].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn hidden_caret_keeps_natural_style() {
        let segments = input_line_segments("~", "", 0, "", false);
        assert_eq!(texts(&segments), vec!["~", " ", " "]);
        assert_eq!(segments[2].style, text_style());
    }

    #[test]
    fn command_entries_split_prompt() {
        let entry = ScrollbackEntry::command("~", "help");
        let segments = entry_segments(&entry, "~");
        assert_eq!(texts(&segments), vec!["~", " help"]);
        assert_eq!(segments[0].style, prompt_style());
    }

    #[test]
    fn render_draws_welcome_prompt_and_reload() {
        let config = Config::default();
        let mut app = TerminalApp::new(&config, Instant::now());
        app.update_geometry(Rect::new(0, 0, 70, 6));

        let backend = TestBackend::new(70, 6);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| render_app(frame, &app))
            .expect("draw");

        let buffer = terminal.backend().buffer().clone();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("~ terminal"));
        assert!(row(0).ends_with(RELOAD_LABEL));
        assert!(row(1).starts_with("Welcome to my terminal!"));
        assert!(row(2).starts_with("~"));
    }
}
