//! Display helpers

/// Format a duration in milliseconds: `"850ms"` below one second,
/// `"1.25s"` above
pub fn format_time(milliseconds: f64) -> String {
    if milliseconds < 1000.0 {
        format!("{}ms", milliseconds.round() as i64)
    } else {
        format!("{:.2}s", milliseconds / 1000.0)
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
