use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::diff::{CharCell, CharStatus};
use crate::ui::theme::Theme;

/// Renders a run of classified target cells, one target line per row.
pub struct TypingArea<'a> {
    cells: &'a [CharCell],
    typed: &'a [char],
    theme: &'a Theme,
    title: String,
    scroll: u16,
    show_cursor: bool,
}

impl<'a> TypingArea<'a> {
    pub fn new(cells: &'a [CharCell], typed: &'a [char], theme: &'a Theme) -> Self {
        Self {
            cells,
            typed,
            theme,
            title: String::new(),
            scroll: 0,
            show_cursor: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }
}

/// What to draw for a cell. Wrong whitespace gets a visible marker, other
/// wrong chars show what was actually typed.
fn display_for(cell: &CharCell, typed: &[char]) -> String {
    match (cell.status, cell.ch) {
        (CharStatus::Wrong, '\n') => "\u{21b5}".to_string(), // ↵
        (CharStatus::Wrong, ' ') => "\u{00b7}".to_string(),  // ·
        (CharStatus::Wrong, '\t') => "\u{2192}".to_string(), // →
        (CharStatus::Wrong, _) => match typed.get(cell.idx) {
            Some('\n') => "\u{21b5}".to_string(),
            Some(' ') => "\u{00b7}".to_string(),
            Some(&actual) => actual.to_string(),
            None => cell.ch.to_string(),
        },
        (_, '\n') => String::new(),
        (_, '\t') => "    ".to_string(),
        (_, ch) => ch.to_string(),
    }
}

pub fn build_lines(
    cells: &[CharCell],
    typed: &[char],
    theme: &Theme,
    show_cursor: bool,
) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let cursor = typed.len();
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];

    for cell in cells {
        let is_cursor = show_cursor && cell.idx == cursor;
        let style = if is_cursor {
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg())
        } else {
            match cell.status {
                CharStatus::Correct => Style::default().fg(colors.text_correct()),
                CharStatus::Wrong if cell.ch.is_whitespace() => Style::default()
                    .fg(colors.whitespace_marker())
                    .bg(colors.text_incorrect_bg()),
                CharStatus::Wrong => Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
                CharStatus::Pending => Style::default().fg(colors.text_pending()),
            }
        };

        let mut display = display_for(cell, typed);
        // The cursor has to stay visible at the end of a line.
        if display.is_empty() && is_cursor {
            display.push(' ');
        }
        if !display.is_empty() {
            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(display, style));
            }
        }
        if cell.ch == '\n' {
            lines.push(Vec::new());
        }
    }

    lines.into_iter().map(Line::from).collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines = build_lines(self.cells, self.typed, self.theme, self.show_cursor);

        let mut block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        if !self.title.is_empty() {
            block = block.title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(colors.accent()),
            ));
        }

        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
