mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::Context;
use app::App;
use core::actions::{find_action, generate_command_bar_items};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use models::CompressedSize;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io;
use std::time::Duration;
use ui::{
    CommandBar, Dialog, DialogKind, LayoutMode, ManifestTable, StatusBar, Theme, WarningScreen,
};
use utils::config::Settings;
use utils::formatter::{compression_ratio, format_file_size, truncate_path};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    if let Some(path) = settings.log.file_path() {
        if !utils::logger::init(&path, settings.log.level_filter()) {
            eprintln!("warning: logging disabled ({} not writable)", path.display());
        }
    }
    info!("starting with tool '{}'", settings.tool.program);

    let initial_archive = std::env::args_os().nth(1);
    let mut app = App::new(settings);
    if let Some(path) = initial_archive {
        app.open_archive(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        warn!("terminal loop failed: {}", err);
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();
            app.layout.update(size);

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::Full | LayoutMode::Compact => render_main_ui(f, app),
            }
        })?;

        let poll_timeout = if app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        handle_dialog_keys(app, key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }
        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if let (KeyModifiers::NONE, KeyCode::Char(c)) = (modifiers, code) {
        if app.handle_sequence_key(c) {
            return;
        }
    } else {
        app.clear_pending_key();
    }

    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match &app.dialog {
        Some(DialogKind::Input { .. }) => handle_input_dialog_keys(app, modifiers, code),
        Some(DialogKind::Confirm { .. }) | Some(DialogKind::Overwrite { .. }) => {
            handle_button_dialog_keys(app, modifiers, code)
        }
        Some(DialogKind::Help { .. }) => handle_help_dialog_keys(app, code),
        Some(DialogKind::Error { .. }) | Some(DialogKind::Message { .. }) => {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.close_dialog();
            }
        }
        None => {}
    }
}

/// 입력 다이얼로그 키 처리
fn handle_input_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        (_, KeyCode::Enter) => app.dialog_submit(),
        (_, KeyCode::Esc) => app.dialog_cancel(),
        (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
            app.dialog_toggle_button();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.dialog_input_delete_prev_word(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.dialog_input_char(c),
        (_, KeyCode::Backspace) => app.dialog_input_backspace(),
        (_, KeyCode::Delete) => app.dialog_input_delete(),
        (_, KeyCode::Left) => app.dialog_input_left(),
        (_, KeyCode::Right) => app.dialog_input_right(),
        (_, KeyCode::Home) => app.dialog_input_home(),
        (_, KeyCode::End) => app.dialog_input_end(),
        _ => {}
    }
}

/// 확인/덮어쓰기 다이얼로그 키 처리
fn handle_button_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        (_, KeyCode::Tab)
        | (_, KeyCode::BackTab)
        | (_, KeyCode::Left)
        | (_, KeyCode::Right)
        | (_, KeyCode::Char('h'))
        | (_, KeyCode::Char('l')) => app.dialog_toggle_button(),
        (_, KeyCode::Enter) => app.dialog_submit(),
        (_, KeyCode::Esc) => app.dialog_cancel(),
        _ => {}
    }
}

/// 도움말 다이얼로그 키 처리
fn handle_help_dialog_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_dialog();
        }
        KeyCode::Char('j') | KeyCode::Down => app.dialog_help_scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.dialog_help_scroll_up(),
        _ => {}
    }
}

/// 제목 줄: 앱 이름 + 열린 압축 파일 경로
fn render_title_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let style = Style::default()
        .fg(theme.title_bar_fg.to_color())
        .bg(theme.title_bar_bg.to_color());
    let name = " CobaltArchiver ";
    let path = app
        .manifest
        .as_ref()
        .map(|m| {
            let max = (area.width as usize).saturating_sub(name.len() + 3);
            truncate_path(m.archive_path(), max)
        })
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(name, style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("| {}", path), style),
    ]);
    f.render_widget(Paragraph::new(line).style(style), area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let (files, dirs) = app.entry_counts();
    let (total, packed) = app
        .manifest
        .as_ref()
        .map(|m| {
            let original = m.total_original_size();
            let compressed = m.total_compressed_size();
            let packed = match compression_ratio(original, CompressedSize::Known(compressed)) {
                Some(ratio) => format!("{} ({}%)", format_file_size(compressed), ratio),
                None => format_file_size(compressed),
            };
            (format_file_size(original), packed)
        })
        .unwrap_or_else(|| (format_file_size(0), format_file_size(0)));

    let status_bar = StatusBar::new()
        .counts(files, dirs)
        .sizes(&total, &packed)
        .right_label(app.tool().program())
        .message(app.toast_display())
        .theme(theme);
    f.render_widget(status_bar, area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();

    render_title_bar(f, app, theme, areas.title_bar);

    let title = app
        .manifest
        .as_ref()
        .and_then(|m| m.archive_path().file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "No archive".to_string());
    let table = ManifestTable::new()
        .title(&title)
        .entries(app.entries())
        .selected_index(app.selected_index)
        .scroll_offset(app.scroll_offset)
        .compact(app.layout.mode() == LayoutMode::Compact)
        .empty_message(app.empty_message())
        .theme(theme);
    f.render_widget(table, areas.table);

    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new()
        .commands(generate_command_bar_items(app.is_archive_open()))
        .theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
