use unicode_width::UnicodeWidthStr;

const GIB: f64 = (1u64 << 30) as f64;

/// Renders a byte count in GiB with two decimals, e.g. `1.50 GiB`.
pub fn format_binary_size(bytes: u64) -> String {
    format!("{:.2} GiB", bytes as f64 / GIB)
}

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Left-aligns `s` in a column of `width` cells. Longer input is kept whole.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let used = s.width();
    let mut result = String::with_capacity(s.len() + width.saturating_sub(used));
    result.push_str(s);
    result.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    result
}

/// Keeps at most `max_chars` characters, then pads to `column_width` cells.
/// Text wider than the column still gets the `column_width - max_chars`
/// separator so the next column never touches it.
pub fn fit_column(s: &str, max_chars: usize, column_width: usize) -> String {
    let cut = truncate_chars(s, max_chars);
    let gap = column_width.saturating_sub(max_chars);
    let width = column_width.max(cut.width() + gap);
    pad_to_width(&cut, width)
}
