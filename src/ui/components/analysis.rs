use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::store::schema::{SessionRecord, TestResultRecord};
use crate::ui::theme::Theme;

const TABS: [&str; 3] = ["Sessions", "Tests", "The Sergeant"];

pub struct AnalysisView<'a> {
    pub sessions: &'a [SessionRecord],
    pub results: &'a [TestResultRecord],
    pub analysis: Option<&'a str>,
    pub tab: usize,
    pub selected: usize,
    pub confirm_delete: bool,
    pub generating: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for AnalysisView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Analysis ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(inner);

        let mut tab_spans = Vec::new();
        for (idx, name) in TABS.iter().enumerate() {
            let style = if idx == self.tab {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            tab_spans.push(Span::styled(format!(" {name} "), style));
            tab_spans.push(Span::styled("|", Style::default().fg(colors.border())));
        }
        tab_spans.pop();
        Paragraph::new(Line::from(tab_spans)).render(layout[0], buf);

        match self.tab {
            0 => self.render_sessions(layout[1], buf),
            1 => self.render_results(layout[1], buf),
            _ => self.render_report(layout[1], buf),
        }
    }
}

impl AnalysisView<'_> {
    fn render_sessions(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if self.sessions.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No sessions recorded yet.",
                Style::default().fg(colors.muted()),
            )))
            .render(area, buf);
            return;
        }

        let mut y = area.y;
        // Newest first.
        for (idx, record) in self.sessions.iter().enumerate().rev() {
            if y >= area.y + area.height {
                break;
            }
            let position = self.sessions.len() - 1 - idx;
            let selected = position == self.selected;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let breach_color = if record.breaches == 0 {
                colors.success()
            } else {
                colors.error()
            };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(colors.accent())),
                Span::styled(
                    record.timestamp.format("%m-%d %H:%M ").to_string(),
                    Style::default().fg(colors.muted()),
                ),
                Span::styled(format!("{:<26}", record.task), style),
                Span::styled(
                    format!(" {:>3} min ", record.duration_min),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("{} breaches", record.breaches),
                    Style::default().fg(breach_color),
                ),
            ];
            if record.video_id.is_some() {
                spans.push(Span::styled(
                    "  [video: w to rewatch]",
                    Style::default().fg(colors.answer_selected()),
                ));
            }
            if selected && self.confirm_delete {
                spans.push(Span::styled(
                    "  delete? press d again",
                    Style::default().fg(colors.error()),
                ));
            }
            buf.set_line(area.x, y, &Line::from(spans), area.width);
            y += 1;
        }
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if self.results.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No tests taken yet.",
                Style::default().fg(colors.muted()),
            )))
            .render(area, buf);
            return;
        }

        let mut y = area.y;
        for record in self.results.iter().rev() {
            if y >= area.y + area.height {
                break;
            }
            let pct = if record.total > 0 {
                record.score as f64 / record.total as f64
            } else {
                0.0
            };
            let score_color = if pct >= 0.7 {
                colors.success()
            } else if pct >= 0.4 {
                colors.warning()
            } else {
                colors.error()
            };
            let line = Line::from(vec![
                Span::styled(
                    record.timestamp.format("  %m-%d %H:%M ").to_string(),
                    Style::default().fg(colors.muted()),
                ),
                Span::styled(format!("{:<34}", record.test_title), Style::default().fg(colors.fg())),
                Span::styled(
                    format!(" {}/{} ", record.score, record.total),
                    Style::default().fg(score_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("({} breaches)", record.breaches),
                    Style::default().fg(colors.muted()),
                ),
            ]);
            buf.set_line(area.x, y, &line, area.width);
            y += 1;
        }
    }

    fn render_report(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let text = match (self.analysis, self.generating) {
            (_, Some(label)) => format!("{label}..."),
            (Some(report), None) => report.to_string(),
            (None, None) => "Press s to request a performance review.".to_string(),
        };
        Paragraph::new(text)
            .style(Style::default().fg(colors.fg()))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
