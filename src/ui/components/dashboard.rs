use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::schedule::{BlockStatus, DailySchedule};
use crate::store::schema::ProfileData;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct Dashboard<'a> {
    pub profile: &'a ProfileData,
    pub schedule: Option<&'a DailySchedule>,
    pub selected: usize,
    pub target_minutes: u32,
    pub generating: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Command Center ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(inner);

        let score_color = if self.profile.discipline_score >= 85 {
            colors.success()
        } else if self.profile.discipline_score >= 50 {
            colors.warning()
        } else {
            colors.error()
        };
        let stats_line = Line::from(vec![
            Span::styled("  Discipline: ", Style::default().fg(colors.fg())),
            Span::styled(
                self.profile.discipline_score.to_string(),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Hours: {:.1}", self.profile.total_hours_studied),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!(
                    "   Streak: {}d (best {}d)",
                    self.profile.streak_days, self.profile.best_streak
                ),
                Style::default().fg(colors.muted()),
            ),
        ]);
        Paragraph::new(stats_line).render(layout[0], buf);

        let done = self.schedule.map_or(0, |s| s.total_minutes_done);
        let ratio = self
            .schedule
            .map_or(0.0, |s| s.day_progress(self.target_minutes));
        ProgressBar::new("Day Progress", ratio, self.theme)
            .detail(format!("{done} / {} min", self.target_minutes))
            .render(layout[1], buf);

        match self.schedule {
            Some(schedule) if !schedule.blocks.is_empty() => {
                self.render_blocks(schedule, layout[2], buf);
            }
            _ => {
                let text = match self.generating {
                    Some(label) => format!("{label}..."),
                    None => "No plan yet. Press g to generate today's schedule.".to_string(),
                };
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(colors.muted()),
                )))
                .alignment(Alignment::Center)
                .render(layout[2], buf);
            }
        }
    }
}

impl Dashboard<'_> {
    fn render_blocks(&self, schedule: &DailySchedule, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut y = area.y;

        for (idx, block) in schedule.blocks.iter().enumerate() {
            if y >= area.y + area.height {
                break;
            }
            let selected = idx == self.selected;
            let marker = if selected { "> " } else { "  " };
            let (status, status_color) = match block.status {
                BlockStatus::Completed => ("done", colors.success()),
                BlockStatus::Pending => ("pending", colors.muted()),
            };
            let title_style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(colors.accent())),
                Span::styled(format!("{:<28}", truncate(&block.title, 28)), title_style),
                Span::styled(
                    format!(" {:>3}/{:<3} min ", block.completed_min, block.duration_min),
                    Style::default().fg(colors.muted()),
                ),
                Span::styled(
                    format!("[{:>3.0}%] ", block.progress() * 100.0),
                    Style::default().fg(colors.bar_filled()),
                ),
                Span::styled(status, Style::default().fg(status_color)),
            ]);
            buf.set_line(area.x, y, &line, area.width);
            y += 1;
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
