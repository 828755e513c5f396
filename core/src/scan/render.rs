use crossterm::style::Stylize;

use crate::extract::MismatchPair;

pub const EXPECTED_LABEL: &str = "expect: ";
pub const ACTUAL_LABEL: &str = "actual: ";
/// Width of both labels; the caret line is indented by this plus the divergence index.
pub const LABEL_WIDTH: usize = 8;

/// Three-line expected/actual display with a caret under the divergence point.
///
/// The expected line is assembled from the actual prefix and the expected suffix, so when the
/// strings differ in length before the divergence point it does not show `expected` verbatim.
/// A negative index is treated as 0.
pub fn render_highlight(pair: &MismatchPair, divergence: isize, color: bool) -> String {
    let d = divergence.max(0) as usize;
    let (a_head, a_tail) = split_at_char(&pair.actual, d);
    let (_, e_tail) = split_at_char(&pair.expected, d);

    let mut out = String::new();
    out.push_str(EXPECTED_LABEL);
    out.push_str(&paint(a_head, e_tail, color));
    out.push('\n');
    out.push_str(ACTUAL_LABEL);
    out.push_str(&paint(a_head, a_tail, color));
    out.push('\n');
    out.push_str(&" ".repeat(LABEL_WIDTH + d));
    out.push('^');
    out
}

fn paint(matched: &str, diverged: &str, color: bool) -> String {
    if color {
        format!("{}{}", matched.green(), diverged.red().bold())
    } else {
        format!("{matched}{diverged}")
    }
}

/// Split at the `n`-th char; past the end gives `(s, "")`.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(idx)
}
