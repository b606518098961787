use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// A run of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Hard-wraps styled segments at `width` display columns, splitting segments
/// that straddle a row boundary. Always yields at least one row.
pub fn wrap_segments(segments: &[Segment], width: usize) -> Vec<Vec<Segment>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<Segment>> = vec![Vec::new()];
    let mut row_width = 0usize;

    for segment in segments {
        let mut current = String::new();
        for ch in segment.text.chars() {
            if ch == '\r' || ch == '\n' {
                continue;
            }
            let ch_width = char_display_width(ch);
            if row_width + ch_width > width && row_width > 0 {
                if !current.is_empty() {
                    push_segment(&mut rows, std::mem::take(&mut current), segment.style);
                }
                rows.push(Vec::new());
                row_width = 0;
            }
            current.push(ch);
            row_width += ch_width;
        }
        if !current.is_empty() {
            push_segment(&mut rows, current, segment.style);
        }
    }
    rows
}

fn push_segment(rows: &mut [Vec<Segment>], text: String, style: Style) {
    if let Some(row) = rows.last_mut() {
        row.push(Segment { text, style });
    }
}

pub fn truncate_to_display_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = char_display_width(ch);
        if used + ch_width > max_width && used > 0 {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

pub fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_display_width).sum()
}
