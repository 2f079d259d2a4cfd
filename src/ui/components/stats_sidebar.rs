use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Phase;
use crate::session::result::RunRecord;
use crate::session::stats::SessionStats;
use crate::ui::theme::{Theme, ThemeColors};

pub struct StatsSidebar<'a> {
    stats: SessionStats,
    phase: Phase,
    last_record: Option<&'a RunRecord>,
    recent_avg_wpm: Option<f64>,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        stats: SessionStats,
        phase: Phase,
        last_record: Option<&'a RunRecord>,
        recent_avg_wpm: Option<f64>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            stats,
            phase,
            last_record,
            recent_avg_wpm,
            theme,
        }
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "ready",
        Phase::Running => "typing",
        Phase::Done => "done",
    }
}

pub fn accuracy_color(colors: &ThemeColors, accuracy: u32) -> ratatui::style::Color {
    if accuracy >= 95 {
        colors.success()
    } else if accuracy >= 85 {
        colors.warning()
    } else {
        colors.error()
    }
}

/// Format a delta value with arrow indicator
fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("\u{2191}+{delta:.1}")
    } else if delta < 0.0 {
        format!("\u{2193}{delta:.1}")
    } else {
        "=".to_string()
    }
}

/// Filled and empty cell counts for a `width`-wide bar at `percent`.
pub fn bar_cells(percent: u32, width: usize) -> (usize, usize) {
    let filled = (width * percent.min(100) as usize + 50) / 100;
    (filled, width - filled)
}

fn progress_line(percent: u32, width: usize, colors: &ThemeColors) -> Line<'static> {
    let (filled, empty) = bar_cells(percent, width);
    Line::from(vec![
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(colors.bar_filled())),
        Span::styled("\u{2591}".repeat(empty), Style::default().fg(colors.bar_empty())),
    ])
}

fn row<'s>(label: &'s str, value: String, style: Style, colors: &ThemeColors) -> Line<'s> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(colors.fg())),
        Span::styled(value, style),
    ])
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(11), Constraint::Length(7)])
            .split(area);

        let stats = self.stats;
        let lines = vec![
            row(
                "WPM:      ",
                stats.wpm.to_string(),
                Style::default().fg(colors.accent()),
                colors,
            ),
            row(
                "Raw:      ",
                stats.raw_wpm.to_string(),
                Style::default().fg(colors.text_pending()),
                colors,
            ),
            Line::from(""),
            row(
                "Accuracy: ",
                format!("{}%", stats.accuracy),
                Style::default().fg(accuracy_color(colors, stats.accuracy)),
                colors,
            ),
            row(
                "Progress: ",
                format!("{}%", stats.progress),
                Style::default().fg(colors.accent()),
                colors,
            ),
            progress_line(stats.progress, area.width.saturating_sub(2) as usize, colors),
            Line::from(""),
            row(
                "Time:     ",
                format!("{:.1}s", stats.elapsed_ms as f64 / 1000.0),
                Style::default().fg(colors.fg()),
                colors,
            ),
            row(
                "State:    ",
                phase_label(self.phase).to_string(),
                Style::default().fg(colors.accent_dim()),
                colors,
            ),
        ];

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(lines).block(block).render(sections[0], buf);

        let mut last_lines = Vec::new();
        match self.last_record {
            Some(last) => {
                last_lines.push(row(
                    "WPM:      ",
                    last.wpm.to_string(),
                    Style::default().fg(colors.accent()),
                    colors,
                ));
                if let Some(avg) = self.recent_avg_wpm {
                    let delta = f64::from(last.wpm) - avg;
                    let color = if delta > 0.0 {
                        colors.success()
                    } else if delta < 0.0 {
                        colors.error()
                    } else {
                        colors.text_pending()
                    };
                    last_lines.push(Line::from(vec![
                        Span::styled("  vs avg: ", Style::default().fg(colors.text_pending())),
                        Span::styled(format_delta(delta), Style::default().fg(color)),
                    ]));
                }
                last_lines.push(row(
                    "Accuracy: ",
                    format!("{}%", last.accuracy),
                    Style::default().fg(accuracy_color(colors, last.accuracy)),
                    colors,
                ));
            }
            None => last_lines.push(Line::from(Span::styled(
                "No runs yet",
                Style::default().fg(colors.text_pending()),
            ))),
        }

        let block = Block::bordered()
            .title(" Last Run ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(last_lines).block(block).render(sections[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(2.5), "\u{2191}+2.5");
        assert_eq!(format_delta(-1.0), "\u{2193}-1.0");
        assert_eq!(format_delta(0.0), "=");
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0, 20), (0, 20));
        assert_eq!(bar_cells(50, 20), (10, 10));
        assert_eq!(bar_cells(100, 20), (20, 0));
        assert_eq!(bar_cells(250, 8), (8, 0));
        assert_eq!(bar_cells(40, 0), (0, 0));
    }

    #[test]
    fn test_progress_line_uses_bar_colors() {
        let colors = ThemeColors::default();
        let line = progress_line(25, 8, &colors);
        assert_eq!(line.spans[0].content.chars().count(), 2);
        assert_eq!(line.spans[0].style.fg, Some(colors.bar_filled()));
        assert_eq!(line.spans[1].content.chars().count(), 6);
        assert_eq!(line.spans[1].style.fg, Some(colors.bar_empty()));
    }

    #[test]
    fn test_accuracy_color_bands() {
        let colors = ThemeColors::default();
        assert_eq!(accuracy_color(&colors, 99), colors.success());
        assert_eq!(accuracy_color(&colors, 90), colors.warning());
        assert_eq!(accuracy_color(&colors, 50), colors.error());
    }
}
