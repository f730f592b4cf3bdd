use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::vocab::VocabEntry;
use crate::ui::theme::Theme;

pub struct VocabView<'a> {
    pub current: &'a [VocabEntry],
    pub history_count: usize,
    pub selected: usize,
    pub generating: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for VocabView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Vocabulary · {} in history ", self.history_count))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.current.is_empty() {
            let text = match self.generating {
                Some(label) => format!("{label}..."),
                None => "Press n for 20 new words, r for a revision test.".to_string(),
            };
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        // Selection scrolls the window when the list outgrows the pane.
        let visible = inner.height as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));
        let mut y = inner.y;
        for (idx, entry) in self.current.iter().enumerate().skip(offset) {
            if y >= inner.y + inner.height {
                break;
            }
            let selected = idx == self.selected;
            let marker = if selected { "> " } else { "  " };
            let word_style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(colors.accent())),
                Span::styled(format!("{:<16}", entry.word), word_style),
                Span::styled(
                    format!("{:<12}", entry.hindi),
                    Style::default().fg(colors.answer_selected()),
                ),
                Span::styled(
                    format!("({:<4}) ", entry.kind),
                    Style::default().fg(colors.muted()),
                ),
                Span::styled(entry.meaning.clone(), Style::default().fg(colors.fg())),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }
    }
}
