use std::fs::{self, OpenOptions};
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use codedrill::app::{self, App, AppScreen, SETTINGS_ROWS};
use codedrill::config::Config;
use codedrill::event::{self, AppEvent, EventHandler};
use codedrill::generator::{self, Concept, Language, MAX_BLOCKS, MIN_BLOCKS};
use codedrill::store::json_store::APP_DIR;
use codedrill::ui::components::dashboard::Dashboard;
use codedrill::ui::components::stats_sidebar::{StatsSidebar, phase_label};
use codedrill::ui::components::typing_area::TypingArea;
use codedrill::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(
    name = "codedrill",
    version,
    about = "Terminal typing practice on generated code snippets"
)]
struct Cli {
    #[arg(short, long, value_enum, help = "Snippet language")]
    language: Option<Language>,

    #[arg(short, long, value_enum, help = "Concept to practice")]
    concept: Option<Concept>,

    #[arg(short, long, help = "Fragments per snippet (1-10)")]
    blocks: Option<usize>,

    #[arg(long, help = "Seed for reproducible snippets")]
    seed: Option<u64>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Don't mirror indentation after Enter")]
    no_auto_indent: bool,

    #[arg(long, help = "Restart with the same snippet instead of a new one")]
    repeat: bool,

    #[arg(long, help = "Wrap snippets at this width (0 disables)")]
    wrap: Option<usize>,

    #[arg(long, help = "Print one generated snippet and exit")]
    print: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(concept) = self.concept {
            config.concept = concept;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(blocks) = self.blocks {
            config.block_count = blocks;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(wrap) = self.wrap {
            config.wrap_width = wrap;
        }
        if self.no_auto_indent {
            config.auto_indent = false;
        }
        if self.repeat {
            config.repeat_same_test = true;
        }
        config.normalize();
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join(APP_DIR)) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("codedrill.log"))
    else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    generator::validate_registry().context("snippet registry is inconsistent")?;

    let mut config = Config::load();
    cli.apply(&mut config);

    if cli.print {
        let mut rng = app::seeded_rng(cli.seed);
        println!("{}", app::build_target(&config, &mut rng));
        return Ok(());
    }

    let mut app = App::new(config, cli.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Needed to tell Ctrl+Enter apart from Enter.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
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
            AppEvent::Paste(text) => handle_paste(app, &text),
            // Ticks only refresh the live stats.
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Drill => handle_drill_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_to_settings();
        return;
    }

    if app.session.is_done() {
        let max_scroll = app.session.line_starts().len().saturating_sub(1) as u16;
        match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('r') | KeyCode::Enter => app.restart(),
            KeyCode::Down | KeyCode::Char('j') => {
                app.review_scroll = (app.review_scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.review_scroll = app.review_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => app.review_scroll = (app.review_scroll + 10).min(max_scroll),
            KeyCode::PageUp => app.review_scroll = app.review_scroll.saturating_sub(10),
            _ => {}
        }
        return;
    }

    if let Some(input) = event::translate_key(&key, app.session.typed()) {
        app.apply_input(input, Utc::now());
    }
}

fn handle_paste(app: &mut App, text: &str) {
    if app.screen != AppScreen::Drill {
        return;
    }
    let input = event::translate_paste(text, app.session.typed());
    app.apply_input(input, Utc::now());
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.save_config();
            app.go_to_drill();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_ROWS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

fn subject(app: &App) -> String {
    format!(
        "{} \u{00b7} {} \u{00b7} {} block{}",
        app.config.language,
        app.config.concept,
        app.config.block_count,
        if app.config.block_count == 1 { "" } else { "s" }
    )
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    render_drill(frame, app);
    if app.screen == AppScreen::Settings {
        render_settings(frame, app);
    }
}

fn render_drill(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let now = Utc::now();
    let session = &app.session;
    let stats = session.stats(now);

    let hints: &[&str] = if session.is_done() {
        &[
            "[Enter/r] next",
            "[\u{2191}/\u{2193}] scroll review",
            "[Esc] settings",
            "[q] quit",
        ]
    } else {
        &[
            "[Tab] skip indent",
            "[Ctrl+R] restart",
            "[Ctrl+W] delete word",
            "[Esc] settings",
            "[Ctrl+C] quit",
        ]
    };
    let hint_lines = pack_hint_lines(hints, area.width as usize);
    let app_layout = AppLayout::new(area, hint_lines.len().max(1) as u16);

    let mut header_spans = vec![Span::styled(
        format!(" codedrill  {} ", subject(app)),
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    if !app_layout.tier.show_sidebar() {
        header_spans.push(Span::styled(
            format!(
                "| WPM: {} | Acc: {}% | {}% {}",
                stats.wpm,
                stats.accuracy,
                stats.progress,
                phase_label(session.phase())
            ),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    if session.is_done() {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)])
            .split(app_layout.main);

        let dashboard = Dashboard::new(stats, subject(app), &app.theme)
            .history(app.history.best_wpm(), app.history.recent_average_wpm(10));
        frame.render_widget(dashboard, main_layout[0]);

        let cells = session.review_cells().unwrap_or_default();
        let review = TypingArea::new(&cells, session.typed(), &app.theme)
            .title("Review")
            .show_cursor(false)
            .scroll(app.review_scroll);
        frame.render_widget(review, main_layout[1]);
    } else {
        let cells = session.visible_cells(app.config.window_config());
        let typing = TypingArea::new(&cells, session.typed(), &app.theme);
        frame.render_widget(typing, app_layout.main);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(
            stats,
            session.phase(),
            app.last_record.as_ref(),
            app.history.prior_average_wpm(10),
            &app.theme,
        );
        frame.render_widget(sidebar, sidebar_area);
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), app_layout.footer);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = centered_rect(60, 80, area);
    frame.render_widget(Clear, centered);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let on_off = |b: bool| String::from(if b { "on" } else { "off" });
    let wrap = match app.config.wrap_width {
        0 => "off".to_string(),
        w => format!("{w} cols"),
    };
    let fields: [(&str, String); SETTINGS_ROWS] = [
        ("Language", app.config.language.to_string()),
        ("Concept", app.config.concept.to_string()),
        (
            "Blocks",
            format!("{} ({MIN_BLOCKS}-{MAX_BLOCKS})", app.config.block_count),
        ),
        ("Auto-indent on Enter", on_off(app.config.auto_indent)),
        ("Repeat same snippet", on_off(app.config.repeat_same_test)),
        ("Wrap width", wrap),
        ("Theme", app.config.theme.clone()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Arrows to navigate, Enter/Right to change",
        Style::default().fg(colors.text_pending()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(2)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_pending()
        });

        let line = Line::from(vec![
            Span::styled(format!("{indicator}{label:<22}"), label_style),
            Span::styled(format!("< {value} >"), value_style),
        ]);
        Paragraph::new(line).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [Esc] Save & back",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
