//! Helpers for cleaning free-form text before it is stored as a JSON string.
//! The parser and writer never call these.

const DEL: char = '\x7F';

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_control(c: char) -> bool {
    c < ' ' || c == DEL
}

/// Drops ASCII control characters, turning each tab, line feed and carriage
/// return into a space.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if is_control(c) => None,
            c => Some(c),
        })
        .collect()
}

/// Removes every double quote.
pub fn remove_quotes(s: &str) -> String {
    s.chars().filter(|&c| c != '"').collect()
}

/// Collapses each whitespace run into one space, trims both ends and drops
/// the remaining control characters.
pub fn remove_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut need_space = false;

    for c in s.chars() {
        if is_space(c) {
            need_space = true;
            continue;
        }

        if is_control(c) {
            continue;
        }

        if need_space && !out.is_empty() {
            out.push(' ');
        }

        out.push(c);
        need_space = false;
    }

    out
}
