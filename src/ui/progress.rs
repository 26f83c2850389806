/// "3 / 10" style counter for the header
pub fn progress_label(position: usize, total: usize) -> String {
    format!("{} / {}", (position + 1).min(total), total)
}

/// Clamp an optional fraction into a ratio a gauge accepts
pub fn gauge_ratio(fraction: Option<f64>) -> f64 {
    fraction.unwrap_or(0.0).clamp(0.0, 1.0)
}

/// Lines a piece of text occupies when wrapped at `max_per_line` columns
pub fn occupied_lines(text_width: usize, max_per_line: u16) -> u16 {
    if max_per_line == 0 {
        return 1;
    }
    if text_width <= max_per_line as usize {
        return 1;
    }
    // one extra line absorbs word-wrap slack
    ((text_width as f64 / max_per_line as f64).ceil() + 1.0) as u16
}
