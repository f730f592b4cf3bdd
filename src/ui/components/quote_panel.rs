use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::test::Language;
use crate::quotes::Verse;
use crate::ui::theme::Theme;

/// Sidebar panel: one Gita verse per day plus a motivational line.
pub struct QuotePanel<'a> {
    pub verse: &'a Verse,
    pub translated: bool,
    pub lang: Language,
    pub motivation: &'a str,
    pub theme: &'a Theme,
}

impl Widget for QuotePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Verse of the Day ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1), Constraint::Min(3)])
            .split(inner);

        let verse_text = if self.translated {
            match self.lang {
                Language::En => self.verse.english,
                Language::Hi => self.verse.hindi,
            }
        } else {
            self.verse.sanskrit
        };
        let hint = hint_line(self.translated, self.lang);

        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("\u{201c}{verse_text}\u{201d}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(hint, Style::default().fg(colors.muted()))),
        ])
        .wrap(Wrap { trim: true })
        .render(layout[0], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Study Motivation", Style::default().fg(colors.header_fg())),
        ]))
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", self.motivation),
            Style::default().fg(colors.fg()).add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[2], buf);
    }
}

// The dashboard binds `t` to toggle translation and `h` to switch the
// translated language; the hint has to name the same keys.
fn hint_line(translated: bool, lang: Language) -> String {
    if translated {
        format!("t: original   h: {}", lang.toggle().label())
    } else {
        "t: translate".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_names_the_bound_keys() {
        assert_eq!(hint_line(false, Language::En), "t: translate");
        assert_eq!(hint_line(true, Language::En), "t: original   h: हिंदी");
        assert_eq!(hint_line(true, Language::Hi), "t: original   h: English");
    }
}
