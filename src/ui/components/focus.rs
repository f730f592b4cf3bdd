use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::timer::{SessionTimer, TaskKind, TimerPhase};
use crate::ui::theme::Theme;

pub struct FocusView<'a> {
    pub timer: &'a SessionTimer,
    pub theme: &'a Theme,
}

impl Widget for FocusView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let task = self.timer.task();

        let border_color = match self.timer.phase() {
            TimerPhase::Running => colors.accent(),
            TimerPhase::Paused => colors.warning(),
            _ => colors.border(),
        };
        let block = Block::bordered()
            .title(format!(" Focus: {} ", task.title))
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let secs = self.timer.time_left();
        let clock = format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
        Paragraph::new(Line::from(Span::styled(
            clock,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let phase_text = match self.timer.phase() {
            TimerPhase::Idle => "ready",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Completed => "completed",
        };
        let breach_style = if self.timer.breaches() > 0 {
            Style::default().fg(colors.error())
        } else {
            Style::default().fg(colors.muted())
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}  ·  {phase_text}  ·  ", task.category),
                Style::default().fg(colors.muted()),
            ),
            Span::styled(format!("{} breaches", self.timer.breaches()), breach_style),
        ]))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        if let TaskKind::Video { video_url, .. } = &task.kind {
            Paragraph::new(Line::from(Span::styled(
                format!("Watching: {video_url}"),
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(layout[3], buf);
        }

        let hint = match self.timer.phase() {
            TimerPhase::Idle => "space: start   esc: back",
            TimerPhase::Running => "space: pause   f: finish & save   esc: back",
            TimerPhase::Paused => "space: resume   f: finish & save   esc: back",
            TimerPhase::Completed => "saving...",
        };
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[4], buf);
    }
}
