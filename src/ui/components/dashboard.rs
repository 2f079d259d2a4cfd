use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::stats::SessionStats;
use crate::ui::components::stats_sidebar::accuracy_color;
use crate::ui::theme::Theme;

/// Final numbers for a finished run.
pub struct Dashboard<'a> {
    pub stats: SessionStats,
    pub subject: String,
    pub best_wpm: Option<u32>,
    pub recent_avg_wpm: Option<f64>,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(stats: SessionStats, subject: String, theme: &'a Theme) -> Self {
        Self {
            stats,
            subject,
            best_wpm: None,
            recent_avg_wpm: None,
            theme,
        }
    }

    pub fn history(mut self, best_wpm: Option<u32>, recent_avg_wpm: Option<f64>) -> Self {
        self.best_wpm = best_wpm;
        self.recent_avg_wpm = recent_avg_wpm;
        self
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Run Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            self.subject,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let stats = self.stats;
        let speed_line = Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} WPM", stats.wpm),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} raw)", stats.raw_wpm),
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(speed_line).render(layout[1], buf);

        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}%", stats.accuracy),
                Style::default()
                    .fg(accuracy_color(colors, stats.accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  in {:.1}s", stats.elapsed_ms as f64 / 1000.0),
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let mut history_spans = vec![Span::styled(
            "  Best:     ",
            Style::default().fg(colors.fg()),
        )];
        match self.best_wpm {
            Some(best) => history_spans.push(Span::styled(
                format!("{best} WPM"),
                Style::default().fg(colors.success()),
            )),
            None => history_spans.push(Span::styled(
                "-",
                Style::default().fg(colors.text_pending()),
            )),
        }
        if let Some(avg) = self.recent_avg_wpm {
            history_spans.push(Span::styled(
                format!("  (last 10 avg {avg:.0})"),
                Style::default().fg(colors.text_pending()),
            ));
        }
        Paragraph::new(Line::from(history_spans)).render(layout[3], buf);
    }
}
