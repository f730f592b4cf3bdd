mod ai;
mod app;
mod config;
mod diag;
mod engine;
mod event;
mod quotes;
mod store;
mod ui;
mod video;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::event::{
    DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen, SessionFormKind};
use engine::test::Language;
use event::{AppEvent, EventHandler};
use ui::components::analysis::AnalysisView;
use ui::components::dashboard::Dashboard;
use ui::components::focus::FocusView;
use ui::components::library::LibraryView;
use ui::components::quote_panel::QuotePanel;
use ui::components::test_view::TestView;
use ui::components::vocab::VocabView;
use ui::layout::AppLayout;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(
    name = "studyr",
    version,
    about = "Terminal study command center for exam aspirants"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Test language (en, hi)")]
    language: Option<String>,

    #[arg(long, help = "Override the data directory")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(cli.data_dir);

    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
        }
    }
    if let Some(language) = cli.language {
        app.config.language = language;
        app.config.normalize();
    }
    if app.config.language == "hi" {
        app.verse_lang = Language::Hi;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // Focus change reporting is what breach detection hangs off.
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(200));
    app.set_gen_sender(events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::FocusGained => app.on_focus_gained(),
            AppEvent::FocusLost => app.on_focus_lost(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Gen(seq, outcome) => app.apply_gen(seq, outcome),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Open forms capture all input first.
    if app.session_form.is_some() {
        handle_session_form_key(app, key);
        return;
    }
    if app.material_form.is_some() {
        handle_material_form_key(app, key);
        return;
    }

    match app.screen {
        AppScreen::Dashboard => handle_dashboard_key(app, key),
        AppScreen::Focus => handle_focus_key(app, key),
        AppScreen::Test => handle_test_key(app, key),
        AppScreen::Library => handle_library_key(app, key),
        AppScreen::Vocab => handle_vocab_key(app, key),
        AppScreen::Analysis => handle_analysis_key(app, key),
    }
}

fn handle_session_form_key(app: &mut App, key: KeyEvent) {
    let Some(form) = app.session_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.field = (form.field + 1) % form.field_count();
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = (form.field + form.field_count() - 1) % form.field_count();
        }
        _ => match form.active_input().handle(key) {
            InputResult::Submit => app.submit_session_form(),
            InputResult::Cancel => app.session_form = None,
            InputResult::Continue => {}
        },
    }
}

fn handle_material_form_key(app: &mut App, key: KeyEvent) {
    let Some(form) = app.material_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.field = (form.field + 1) % 3;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = (form.field + 2) % 3;
        }
        _ => match form.active_input().handle(key) {
            InputResult::Submit => app.submit_material_form(),
            InputResult::Cancel => app.material_form = None,
            InputResult::Continue => {}
        },
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    let block_count = app.schedule.as_ref().map_or(0, |s| s.blocks.len());
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('g') => app.request_plan(),
        KeyCode::Char('b') => app.screen = AppScreen::Library,
        KeyCode::Char('v') => app.screen = AppScreen::Vocab,
        KeyCode::Char('a') => app.screen = AppScreen::Analysis,
        KeyCode::Char('n') => app.open_session_form(SessionFormKind::Custom),
        KeyCode::Char('u') => app.open_session_form(SessionFormKind::Video),
        KeyCode::Char('x') => app.cancel_generation(),
        KeyCode::Char('t') => app.verse_translated = !app.verse_translated,
        KeyCode::Char('h') => app.verse_lang = app.verse_lang.toggle(),
        KeyCode::Char('j') | KeyCode::Down => {
            if block_count > 0 {
                app.dashboard_selected = (app.dashboard_selected + 1).min(block_count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.dashboard_selected = app.dashboard_selected.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('s') => {
            if block_count > 0 {
                app.start_scheduled_block(app.dashboard_selected);
            }
        }
        _ => {}
    }
}

fn handle_focus_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => {
            if let Some(timer) = app.timer.as_mut() {
                timer.toggle();
            }
        }
        KeyCode::Char('f') => app.finish_session_early(),
        KeyCode::Esc => app.finish_session_early(),
        _ => {}
    }
}

fn handle_test_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_test(),
        KeyCode::Enter => app.submit_test(),
        KeyCode::Char('t') => {
            if let Some(test) = app.test.as_mut() {
                test.toggle_language();
            }
        }
        KeyCode::Char(ch @ '1'..='4') => {
            if let Some(test) = app.test.as_mut() {
                let option = ch as usize - '1' as usize;
                test.select_option(option);
            }
        }
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
            if let Some(test) = app.test.as_mut() {
                test.next_question();
            }
        }
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
            if let Some(test) = app.test.as_mut() {
                test.prev_question();
            }
        }
        _ => {}
    }
}

fn handle_library_key(app: &mut App, key: KeyEvent) {
    let count = app.materials.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Dashboard,
        KeyCode::Char('a') => app.open_material_form(),
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.library_selected = (app.library_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.library_selected = app.library_selected.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('t') => {
            if count > 0 {
                app.request_material_test(app.library_selected);
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if count > 0 {
                app.delete_material(app.library_selected);
            }
        }
        _ => {}
    }
}

fn handle_vocab_key(app: &mut App, key: KeyEvent) {
    let count = app.vocab_current.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Dashboard,
        KeyCode::Char('n') => app.request_vocab(),
        KeyCode::Char('r') => app.request_vocab_test(),
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.vocab_selected = (app.vocab_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.vocab_selected = app.vocab_selected.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_analysis_key(app: &mut App, key: KeyEvent) {
    // Double-press delete confirmation on the sessions tab.
    if app.confirm_delete {
        match key.code {
            KeyCode::Char('d') => {
                let index = app
                    .sessions
                    .len()
                    .saturating_sub(1)
                    .saturating_sub(app.analysis_selected);
                app.delete_session_record(index);
                app.confirm_delete = false;
            }
            _ => app.confirm_delete = false,
        }
        return;
    }

    let count = app.sessions.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Dashboard,
        KeyCode::Tab => app.analysis_tab = (app.analysis_tab + 1) % 3,
        KeyCode::BackTab => app.analysis_tab = (app.analysis_tab + 2) % 3,
        KeyCode::Char('1') => app.analysis_tab = 0,
        KeyCode::Char('2') => app.analysis_tab = 1,
        KeyCode::Char('3') => app.analysis_tab = 2,
        KeyCode::Char('s') => app.request_analysis(),
        KeyCode::Char('j') | KeyCode::Down => {
            if app.analysis_tab == 0 && count > 0 {
                app.analysis_selected = (app.analysis_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.analysis_selected = app.analysis_selected.saturating_sub(1);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.analysis_tab == 0 && count > 0 {
                app.confirm_delete = true;
            }
        }
        KeyCode::Char('w') => {
            if app.analysis_tab == 0 && count > 0 {
                // Rows render newest first; map back to storage order.
                let index = count - 1 - app.analysis_selected.min(count - 1);
                app.rewatch_session(index);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let background = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(background, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.screen {
        AppScreen::Dashboard => {
            let dashboard = Dashboard {
                profile: &app.profile,
                schedule: app.schedule.as_ref(),
                selected: app.dashboard_selected,
                target_minutes: app.config.target_minutes,
                generating: app.generating.as_deref(),
                theme: app.theme,
            };
            frame.render_widget(dashboard, layout.main);

            if let Some(sidebar) = layout.sidebar {
                let verse = quotes::verse_of_day(Local::now().date_naive());
                let panel = QuotePanel {
                    verse,
                    translated: app.verse_translated,
                    lang: app.verse_lang,
                    motivation: app.motivation,
                    theme: app.theme,
                };
                frame.render_widget(panel, sidebar);
            }
        }
        AppScreen::Focus => {
            if let Some(timer) = &app.timer {
                let centered = ui::layout::centered_rect(70, 60, layout.main);
                frame.render_widget(FocusView { timer, theme: app.theme }, centered);
            }
        }
        AppScreen::Test => {
            if let Some(session) = &app.test {
                frame.render_widget(TestView { session, theme: app.theme }, layout.main);
            }
        }
        AppScreen::Library => {
            let view = LibraryView {
                materials: &app.materials,
                selected: app.library_selected,
                form: app.material_form.as_ref(),
                generating: app.generating.as_deref(),
                theme: app.theme,
            };
            frame.render_widget(view, layout.main);
        }
        AppScreen::Vocab => {
            let view = VocabView {
                current: &app.vocab_current,
                history_count: app.vocab_history.len(),
                selected: app.vocab_selected,
                generating: app.generating.as_deref(),
                theme: app.theme,
            };
            frame.render_widget(view, layout.main);
        }
        AppScreen::Analysis => {
            let view = AnalysisView {
                sessions: &app.sessions,
                results: &app.test_results,
                analysis: app.analysis.as_deref(),
                tab: app.analysis_tab,
                selected: app.analysis_selected,
                confirm_delete: app.confirm_delete,
                generating: app.generating.as_deref(),
                theme: app.theme,
            };
            frame.render_widget(view, layout.main);
        }
    }

    if app.session_form.is_some() {
        render_session_form(frame, app, area);
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let tabs = [
        (AppScreen::Dashboard, "Dashboard"),
        (AppScreen::Library, "Library [b]"),
        (AppScreen::Vocab, "Vocab [v]"),
        (AppScreen::Analysis, "Analysis [a]"),
    ];

    let mut spans = vec![Span::styled(
        " studyr ",
        Style::default()
            .fg(colors.accent())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    for (screen, label) in tabs {
        let style = if app.screen == screen {
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted()).bg(colors.header_bg())
        };
        spans.push(Span::styled(format!("  {label}"), style));
    }
    if let Some(label) = &app.generating {
        spans.push(Span::styled(
            format!("   {label}... [x cancels]"),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().style(Style::default().bg(colors.header_bg())));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let text = if let Some(status) = &app.status {
        status.clone()
    } else {
        match app.screen {
            AppScreen::Dashboard => {
                " g: plan  n: session  u: video  b/v/a: screens  j/k + enter: blocks  q: quit "
                    .to_string()
            }
            AppScreen::Focus => " space: start/pause  f: finish  esc: back ".to_string(),
            AppScreen::Test => {
                " 1-4: answer  arrows: navigate  t: language  enter: submit  esc: close "
                    .to_string()
            }
            AppScreen::Library => {
                " a: add  enter: generate test  x: delete  esc: back ".to_string()
            }
            AppScreen::Vocab => " n: new words  r: revision test  esc: back ".to_string(),
            AppScreen::Analysis => {
                " tab: switch  s: sergeant review  d: delete  w: rewatch  esc: back ".to_string()
            }
        }
    };
    let style = if app.status.is_some() {
        Style::default().fg(colors.warning())
    } else {
        Style::default().fg(colors.muted())
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

fn render_session_form(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let Some(form) = &app.session_form else {
        return;
    };
    let colors = &app.theme.colors;
    let centered = ui::layout::centered_rect(50, 40, area);

    let title = match form.kind {
        SessionFormKind::Custom => " New Focus Session ",
        SessionFormKind::Video => " Video Revision Session ",
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.header_bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let mut lines = vec![Line::from(Span::styled(
        "tab: next field  enter: start  esc: cancel",
        Style::default().fg(colors.muted()),
    ))];

    let mut fields: Vec<(&str, &str, usize)> = Vec::new();
    match form.kind {
        SessionFormKind::Custom => {
            fields.push(("Title", form.title.value(), 0));
            fields.push(("Minutes", form.minutes.value(), 1));
        }
        SessionFormKind::Video => {
            fields.push(("YouTube URL", form.url.value(), 0));
            fields.push(("Title", form.title.value(), 1));
            fields.push(("Minutes", form.minutes.value(), 2));
        }
    }
    for (label, value, idx) in fields {
        let active = form.field == idx;
        let label_style = if active {
            Style::default().fg(colors.border_focused())
        } else {
            Style::default().fg(colors.muted())
        };
        let cursor = if active { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<14}"), label_style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(colors.fg())),
        ]));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(colors.error()),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
