//! Helpers for putting server-supplied text into single-line log records.

/// Collapse `s` to one line for logging.
///
/// Runs of whitespace (including newlines) become one space, other control
/// characters are shown as `\xNN`, and anything past `max_chars` is cut with `…`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max_chars) + 4);
    let mut count = 0;
    let mut pending_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if count >= max_chars {
            out.push('…');
            return out;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
            count += 1;
        }
        pending_space = false;
        if ch.is_control() {
            use std::fmt::Write;
            let _ = write!(&mut out, "\\x{:02X}", ch as u32);
        } else {
            out.push(ch);
        }
        count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn folds_lines_and_tabs() {
        assert_eq!(
            preview("You are in a maze.\n\tExits:  N, E\r\n", 100),
            "You are in a maze. Exits: N, E"
        );
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("abc", 3), "abc");
    }

    #[test]
    fn shows_control_characters() {
        assert_eq!(preview("a\u{1}b", 10), "a\\x01b");
    }
}
