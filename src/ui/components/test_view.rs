use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::test::TestSession;
use crate::ui::theme::Theme;

pub struct TestView<'a> {
    pub session: &'a TestSession,
    pub theme: &'a Theme,
}

impl Widget for TestView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;

        let secs = session.time_left();
        let urgent = secs < 60 && !session.is_submitted();
        let clock_color = if urgent { colors.error() } else { colors.fg() };
        let title = format!(
            " {} · {:02}:{:02} ",
            session.test.title,
            secs / 60,
            secs % 60
        );
        let block = Block::bordered()
            .title(title)
            .title_style(Style::default().fg(clock_color))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(6),
                Constraint::Min(2),
            ])
            .split(inner);

        let header = if session.is_submitted() {
            Line::from(vec![
                Span::styled(
                    format!(
                        "Result: {}/{}  ",
                        session.score(),
                        session.test.questions.len()
                    ),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("breaches: {}", session.breaches()),
                    Style::default().fg(colors.muted()),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    format!(
                        "Q {}/{}  ",
                        session.current + 1,
                        session.test.questions.len()
                    ),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!(
                        "answered: {}/{}  lang: {}",
                        session.answered_count(),
                        session.test.questions.len(),
                        session.language.label()
                    ),
                    Style::default().fg(colors.muted()),
                ),
            ])
        };
        Paragraph::new(header).render(layout[0], buf);

        let question = session.current_question();
        Paragraph::new(Line::from(Span::styled(
            format!(
                "{}. {}",
                session.current + 1,
                question.question_text(session.language)
            ),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[1], buf);

        let chosen = session.response(session.current);
        let mut option_lines = Vec::new();
        for (idx, option) in question
            .option_texts(session.language)
            .iter()
            .enumerate()
        {
            let marker = if chosen == Some(idx) { "(x)" } else { "( )" };
            let style = if session.is_submitted() {
                if idx == question.correct_index {
                    Style::default().fg(colors.answer_correct())
                } else if chosen == Some(idx) {
                    Style::default().fg(colors.answer_wrong())
                } else {
                    Style::default().fg(colors.muted())
                }
            } else if chosen == Some(idx) {
                Style::default()
                    .fg(colors.answer_selected())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            option_lines.push(Line::from(Span::styled(
                format!("  {} {}. {}", marker, idx + 1, option),
                style,
            )));
        }
        Paragraph::new(option_lines)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);

        if session.is_submitted() {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "Explanation",
                    Style::default().fg(colors.header_fg()),
                )),
                Line::from(Span::styled(
                    question.explanation_text(session.language),
                    Style::default().fg(colors.muted()),
                )),
            ])
            .wrap(Wrap { trim: true })
            .render(layout[3], buf);
        }
    }
}
