//! Text helpers for behavioural step arguments and generated content.

/// Strips one layer of matching quotes from a step argument.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| trimmed.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(trimmed)
}

/// Reformats Rust source without changing its tokens: every line is
/// re-indented by `extra` spaces and a blank line follows each item close.
///
/// Used to check that signatures ignore layout.
#[must_use]
pub fn reflow(source: &str, extra: usize) -> String {
    let indent = " ".repeat(extra);
    let mut out = String::with_capacity(source.len() * 2);
    for line in source.lines() {
        if !line.trim().is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
        out.push('\n');
        if line.starts_with('}') {
            out.push('\n');
        }
    }
    out
}

/// Joins every argument list split across lines onto its opening line and
/// drops the trailing comma, as a formatter does when the call fits.
///
/// A list opens on a line ending in `(` and closes on a line starting with
/// `)`; nested lists are joined into the outermost one.
#[must_use]
pub fn join_call_arguments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut joined = String::new();
    let mut depth = 0_usize;
    for line in source.lines() {
        let trimmed = line.trim();
        if depth == 0 {
            if trimmed.ends_with('(') {
                joined.push_str(line.trim_end());
                depth = 1;
            } else {
                out.push_str(line);
                out.push('\n');
            }
            continue;
        }

        if trimmed.starts_with(')') {
            if joined.ends_with(',') {
                joined.pop();
            }
            depth -= 1;
        } else if !joined.ends_with('(') {
            joined.push(' ');
        }
        joined.push_str(trimmed);
        if trimmed.ends_with('(') {
            depth += 1;
        }
        if depth == 0 {
            out.push_str(&joined);
            out.push('\n');
            joined.clear();
        }
    }
    out.push_str(&joined);
    out
}

/// Counts the lines of `source` declaring a function.
#[must_use]
pub fn count_fn_lines(source: &str) -> usize {
    source
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("pub fn ") || line.starts_with("fn "))
        .count()
}
