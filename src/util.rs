/// Parse "true"/"false"/"1"/"0" from a &str.
pub fn parse_bool_str(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Collapses line breaks and tabs into single spaces so pasted text fits on
/// the one-line prompt.
pub fn flatten_to_single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_break = false;
    for ch in text.chars() {
        match ch {
            '\r' => continue,
            '\n' | '\t' => {
                if !last_was_break {
                    out.push(' ');
                }
                last_was_break = true;
            }
            _ => {
                out.push(ch);
                last_was_break = false;
            }
        }
    }
    out
}

pub fn is_single_line(text: &str) -> bool {
    !text.contains('\n') && !text.contains('\r')
}
