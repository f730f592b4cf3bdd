use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::MaterialForm;
use crate::store::schema::{Material, MaterialKind};
use crate::ui::theme::Theme;

pub struct LibraryView<'a> {
    pub materials: &'a [Material],
    pub selected: usize,
    pub form: Option<&'a MaterialForm>,
    pub generating: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for LibraryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Library ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(form) = self.form {
            render_form(form, inner, buf, self.theme);
            return;
        }

        if self.materials.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Library is empty. Press a to add material.",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        let mut y = inner.y;
        for (idx, material) in self.materials.iter().enumerate() {
            if y >= inner.y + inner.height {
                break;
            }
            let selected = idx == self.selected;
            let marker = if selected { "> " } else { "  " };
            let kind = match material.kind {
                MaterialKind::Text => "text",
                MaterialKind::Pdf => "file",
            };
            let style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(colors.accent())),
                Span::styled(material.title.clone(), style),
                Span::styled(
                    format!("  [{kind}]  {}", material.timestamp.format("%Y-%m-%d")),
                    Style::default().fg(colors.muted()),
                ),
            ];
            if selected && self.generating.is_some() {
                if let Some(label) = self.generating {
                    spans.push(Span::styled(
                        format!("  {label}..."),
                        Style::default().fg(colors.warning()),
                    ));
                }
            }
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
            y += 1;
        }
    }
}

fn render_form(form: &MaterialForm, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let colors = &theme.colors;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Line::from(Span::styled(
        "Add material (tab: next field, enter: save, esc: cancel)",
        Style::default().fg(colors.header_fg()),
    )))
    .render(layout[0], buf);

    let fields = [
        ("Title", form.title.value(), 0),
        ("Content or file path", form.content.value(), 1),
        ("Test instruction", form.instruction.value(), 2),
    ];
    for (label, value, idx) in fields {
        let active = form.field == idx;
        let label_style = if active {
            Style::default().fg(colors.border_focused())
        } else {
            Style::default().fg(colors.muted())
        };
        let cursor = if active { "_" } else { "" };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label:<22}"), label_style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(colors.fg())),
        ]))
        .render(layout[idx + 1], buf);
    }
}
