/// Re-flow every physical line of `text` to at most `width` columns.
///
/// Continuation lines repeat the source line's leading whitespace (unless that
/// indent would eat more than half the width). Breaks go after the last
/// whitespace or punctuation that fits, otherwise hard at the width. A width
/// of zero returns the text unchanged.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| wrap_line(line, width).join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_break_punct(ch: char) -> bool {
    matches!(ch, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '.')
}

fn is_hspace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= width {
        return vec![line.to_string()];
    }

    let indent_len = chars.iter().take_while(|&&c| is_hspace(c)).count();
    let indent: String = chars[..indent_len].iter().collect();
    let continuation = if indent_len * 2 > width {
        String::new()
    } else {
        indent.clone()
    };

    let mut out = Vec::new();
    let mut prefix = indent;
    let mut rest: &[char] = &chars[indent_len..];

    loop {
        let room = width.saturating_sub(prefix.chars().count()).max(1);
        if rest.len() <= room {
            out.push(format!("{prefix}{}", rest.iter().collect::<String>()));
            break;
        }

        let split = find_break(rest, room);
        let head: String = rest[..split].iter().collect();
        out.push(format!("{prefix}{}", head.trim_end()));

        let skip = rest[split..].iter().take_while(|&&c| is_hspace(c)).count();
        rest = &rest[split + skip..];
        prefix = continuation.clone();
        if rest.is_empty() {
            break;
        }
    }
    out
}

/// Split point in `rest` (exclusive) no greater than `room`.
fn find_break(rest: &[char], room: usize) -> usize {
    // A break may sit right after the last char that fits, so look one past `room`
    // for whitespace.
    let limit = room.min(rest.len() - 1);
    for i in (1..=limit).rev() {
        let prev = rest[i - 1];
        let next = rest[i];
        if is_hspace(next) && !is_hspace(prev) {
            return i;
        }
        if is_break_punct(prev) && !is_hspace(next) {
            return i;
        }
    }
    room
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_untouched() {
        let text = "def f():\n    return 1";
        assert_eq!(wrap_text(text, 80), text);
    }

    #[test]
    fn test_zero_width_disables() {
        let text = "a very long line that would otherwise wrap";
        assert_eq!(wrap_text(text, 0), text);
    }

    #[test]
    fn test_breaks_at_whitespace_and_keeps_indent() {
        let text = "    print(alpha, beta, gamma, delta)";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20, "{line:?} too long");
            assert!(line.starts_with("    "), "{line:?} lost indent");
        }
        let rejoined: String = wrapped
            .lines()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined.replace("( ", "("), "print(alpha, beta, gamma, delta)");
    }

    #[test]
    fn test_hard_break_without_boundaries() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let wrapped = wrap_text(text, 10);
        assert_eq!(wrapped, "abcdefghij\nklmnopqrst\nuvwxyz");
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let text = "x = compute(first_argument, second_argument, third_argument)\n\nfor i in range(10):\n        deeply_nested_call(with_some_arguments, and_more_arguments)";
        let once = wrap_text(text, 24);
        let twice = wrap_text(&once, 24);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let text = "a\n\nb";
        assert_eq!(wrap_text(text, 5), "a\n\nb");
    }

    #[test]
    fn test_no_trailing_whitespace_after_break() {
        let wrapped = wrap_text("one two three four five six", 9);
        for line in wrapped.lines() {
            assert_eq!(line, line.trim_end());
        }
    }
}
