/// Offsets where each line of `target` begins. Always starts with 0.
pub fn line_starts(target: &[char]) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        target
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch == '\n')
            .map(|(i, _)| i + 1),
    );
    starts
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub size: usize,
    pub lines_before: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: 10,
            lines_before: 2,
        }
    }
}

/// Visible slice of the target, as both a line range and a char range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub current_line: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub start_char: usize,
    pub end_char: usize,
}

impl Window {
    pub fn for_cursor(
        target: &[char],
        line_starts: &[usize],
        typed_len: usize,
        config: WindowConfig,
    ) -> Self {
        let upto = typed_len.min(target.len());
        let newlines = target[..upto].iter().filter(|&&ch| ch == '\n').count();
        compute_window(line_starts, target.len(), newlines, config)
    }
}

pub fn compute_window(
    line_starts: &[usize],
    text_len: usize,
    newlines_before_cursor: usize,
    config: WindowConfig,
) -> Window {
    let total_lines = line_starts.len().max(1);
    let size = config.size.max(1);

    let current_line = newlines_before_cursor.min(total_lines - 1);
    let max_start = total_lines.saturating_sub(size);
    let start_line = current_line
        .saturating_sub(config.lines_before)
        .min(max_start);
    let end_line = (start_line + size).min(total_lines);

    let start_char = line_starts.get(start_line).copied().unwrap_or(0);
    let end_char = if end_line < total_lines {
        line_starts[end_line]
    } else {
        text_len
    };

    Window {
        current_line,
        start_line,
        end_line,
        start_char,
        end_char,
    }
}
