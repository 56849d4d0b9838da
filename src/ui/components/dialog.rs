//! 다이얼로그 시스템
//!
//! 경로 입력, 삭제 확인, 덮어쓰기 확인, 에러/메시지, 단축키 도움말

use crate::core::actions::generate_help_entries;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;
/// 덮어쓰기 다이얼로그에 나열하는 최대 파일 수
const OVERWRITE_LIST_MAX: usize = 8;

/// 입력 다이얼로그 목적
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    /// 열 압축 파일 경로
    OpenArchive,
    /// 추가할 파일 목록 (셸 규칙으로 분리)
    AddFiles,
    /// 압축 해제 대상 디렉토리
    ExtractDestination,
    /// 열지 않고 바로 풀 압축 파일 경로
    ExtractArchivePath,
    /// 위 압축 파일의 대상 디렉토리
    ExtractArchiveDestination,
    /// 새 압축 파일 경로 + 원본 파일 목록
    CompressArchive,
}

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    Input {
        title: String,
        prompt: String,
        value: String,
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        purpose: InputPurpose,
    },
    /// 확인 다이얼로그 (OK/Cancel)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    /// 압축 해제 덮어쓰기 확인
    Overwrite {
        destination: String,
        files: Vec<String>,
        selected_button: usize, // 0: Overwrite, 1: Abort
    },
    Error {
        title: String,
        message: String,
    },
    Message {
        title: String,
        message: String,
    },
    /// 단축키 도움말
    Help { scroll_offset: usize },
}

impl DialogKind {
    /// 새 입력 다이얼로그 생성 (커서는 끝)
    pub fn input(
        title: impl Into<String>,
        prompt: impl Into<String>,
        initial: impl Into<String>,
        purpose: InputPurpose,
    ) -> Self {
        let value: String = initial.into();
        let cursor_pos = value.len();
        DialogKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            value,
            cursor_pos,
            selected_button: 0,
            purpose,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    /// 기본 선택은 Abort
    pub fn overwrite(destination: impl Into<String>, files: Vec<String>) -> Self {
        DialogKind::Overwrite {
            destination: destination.into(),
            files,
            selected_button: 1,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
    warning_color: Color,
    error_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
            warning_color: Color::Rgb(255, 165, 0),
            error_color: Color::Rgb(244, 71, 71),
        }
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.dialog_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.dialog_border.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.entry_selected_bg.to_color();
        self.button_selected_fg = theme.entry_selected.to_color();
        self.input_bg = theme.bg_primary.to_color();
        self.warning_color = theme.warning.to_color();
        self.error_color = theme.error.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { .. } => (60u16, 7u16),
            DialogKind::Confirm { .. } => (50, 8),
            DialogKind::Overwrite { files, .. } => {
                let listed = files.len().min(OVERWRITE_LIST_MAX + 1) as u16;
                (60, 8 + listed)
            }
            DialogKind::Error { message, .. } | DialogKind::Message { message, .. } => {
                let lines = message.lines().count().max(1) as u16;
                (60, 6 + lines)
            }
            DialogKind::Help { .. } => (60, sh.saturating_sub(4)),
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(2));

        Rect {
            x: screen.x + sw.saturating_sub(width) / 2,
            y: screen.y + sh.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) -> Rect {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 렌더링. 그려진 너비 반환
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, selected: bool) -> u16 {
        let (bg, fg) = if selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };
        let padded = format!(" {} ", label);
        buf.set_string(x, y, &padded, Style::default().fg(fg).bg(bg));
        padded.width() as u16
    }

    fn render_buttons(&self, buf: &mut Buffer, area: Rect, labels: [&str; 2], selected: usize) {
        let total: u16 = labels.iter().map(|l| l.width() as u16 + 2).sum::<u16>() + 2;
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        let y = area.y + area.height.saturating_sub(2);
        for (i, label) in labels.iter().enumerate() {
            x += self.render_button(buf, x, y, label, selected == i) + 2;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_input(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        prompt: &str,
        value: &str,
        cursor_pos: usize,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, self.title_color);
        buf.set_string(inner.x, inner.y, prompt, Style::default().fg(self.fg_color));

        let input_y = inner.y + 1;
        buf.set_style(
            Rect::new(inner.x, input_y, inner.width, 1),
            Style::default().bg(self.input_bg),
        );

        // cursor_pos는 바이트 인덱스, 화면 표시는 display width 기반
        let max_display = (inner.width as usize).saturating_sub(2);
        let cursor_col: usize = value[..cursor_pos].width();
        let (display_value, cursor_display_col) = if cursor_col < max_display {
            (value, cursor_col)
        } else {
            // 커서가 오른쪽 끝에 오도록 앞부분을 잘라낸다
            let target = cursor_col + 1 - max_display;
            let mut skipped = 0;
            let mut start_byte = value.len();
            for (i, c) in value.char_indices() {
                if skipped >= target {
                    start_byte = i;
                    break;
                }
                skipped += UnicodeWidthChar::width(c).unwrap_or(0);
            }
            (&value[start_byte..], cursor_col - skipped)
        };
        buf.set_stringn(
            inner.x + 1,
            input_y,
            display_value,
            max_display,
            Style::default().fg(self.fg_color).bg(self.input_bg),
        );

        let cursor_x = inner.x + 1 + cursor_display_col as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
            if cursor_pos < value.len() {
                cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
            } else {
                cell.set_char('▏');
                cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
            }
        }

        self.render_buttons(buf, area, ["OK", "Cancel"], selected_button);
    }

    fn render_confirm(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, self.title_color);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    height: inner.height.saturating_sub(2),
                    ..inner
                },
                buf,
            );
        self.render_buttons(buf, area, ["OK", "Cancel"], selected_button);
    }

    fn render_overwrite(
        &self,
        buf: &mut Buffer,
        area: Rect,
        destination: &str,
        files: &[String],
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, "Files Exist", self.warning_color);
        let msg_style = Style::default().fg(self.fg_color);
        let name_style = Style::default().fg(self.warning_color);

        let header = format!(
            "{} file(s) already exist in {}:",
            files.len(),
            destination
        );
        buf.set_stringn(inner.x, inner.y, header, inner.width as usize, msg_style);

        let mut y = inner.y + 1;
        for name in files.iter().take(OVERWRITE_LIST_MAX) {
            if y >= area.y + area.height.saturating_sub(3) {
                break;
            }
            buf.set_stringn(
                inner.x + 2,
                y,
                name,
                (inner.width as usize).saturating_sub(2),
                name_style,
            );
            y += 1;
        }
        if files.len() > OVERWRITE_LIST_MAX {
            let more = format!("... and {} more", files.len() - OVERWRITE_LIST_MAX);
            buf.set_string(inner.x + 2, y, more, msg_style);
        }

        self.render_buttons(buf, area, ["Overwrite", "Abort"], selected_button);
    }

    fn render_text(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, accent: Color) {
        let inner = self.frame(buf, area, title, accent);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(
                Rect {
                    height: inner.height.saturating_sub(2),
                    ..inner
                },
                buf,
            );
        let hint = "Enter/Esc: close";
        let x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(
            x,
            area.y + area.height.saturating_sub(2),
            hint,
            Style::default().fg(self.button_fg).add_modifier(Modifier::DIM),
        );
    }

    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        let inner = self.frame(buf, area, "Keys", self.title_color);

        let mut lines: Vec<(String, Style)> = Vec::new();
        for (category, items) in generate_help_entries() {
            lines.push((
                category.to_string(),
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            ));
            for (key, label) in items {
                lines.push((
                    format!("  {:<12} {}", key, label),
                    Style::default().fg(self.fg_color),
                ));
            }
            lines.push((String::new(), Style::default()));
        }

        for (row, (text, style)) in lines
            .iter()
            .skip(scroll_offset)
            .take(inner.height as usize)
            .enumerate()
        {
            buf.set_stringn(inner.x, inner.y + row as u16, text, inner.width as usize, *style);
        }
    }
}

/// 도움말 전체 줄 수 (스크롤 한계 계산용)
pub fn help_line_count() -> usize {
    generate_help_entries()
        .iter()
        .map(|(_, items)| items.len() + 2)
        .sum()
}

impl Widget for Dialog<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = self.calculate_area(screen);
        Clear.render(area, buf);

        match self.kind {
            DialogKind::Input {
                title,
                prompt,
                value,
                cursor_pos,
                selected_button,
                ..
            } => self.render_input(buf, area, title, prompt, value, *cursor_pos, *selected_button),
            DialogKind::Confirm {
                title,
                message,
                selected_button,
            } => self.render_confirm(buf, area, title, message, *selected_button),
            DialogKind::Overwrite {
                destination,
                files,
                selected_button,
            } => self.render_overwrite(buf, area, destination, files, *selected_button),
            DialogKind::Error { title, message } => {
                self.render_text(buf, area, title, message, self.error_color)
            }
            DialogKind::Message { title, message } => {
                self.render_text(buf, area, title, message, self.title_color)
            }
            DialogKind::Help { scroll_offset } => self.render_help(buf, area, *scroll_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: &DialogKind) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Dialog::new(kind).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_input_dialog_cursor_at_end() {
        let kind = DialogKind::input("Open", "Archive path:", "/tmp/a.7z", InputPurpose::OpenArchive);
        match &kind {
            DialogKind::Input {
                cursor_pos, value, ..
            } => assert_eq!(*cursor_pos, value.len()),
            other => panic!("unexpected dialog: {:?}", other),
        }
        let text = render(&kind);
        assert!(text.contains("Archive path:"));
        assert!(text.contains("/tmp/a.7z"));
        assert!(text.contains("Cancel"));
    }

    #[test]
    fn test_overwrite_dialog_defaults_to_abort_and_lists_files() {
        let files: Vec<String> = (0..10).map(|i| format!("file{}.txt", i)).collect();
        let kind = DialogKind::overwrite("/srv/out", files);
        assert!(matches!(
            kind,
            DialogKind::Overwrite {
                selected_button: 1,
                ..
            }
        ));

        let text = render(&kind);
        assert!(text.contains("10 file(s) already exist in /srv/out"));
        assert!(text.contains("file0.txt"));
        assert!(text.contains("... and 2 more"));
        assert!(text.contains("Overwrite"));
        assert!(text.contains("Abort"));
    }

    #[test]
    fn test_error_dialog_shows_diagnostic() {
        let kind = DialogKind::error("Add Failed", "WARNING: No more files");
        let text = render(&kind);
        assert!(text.contains("Add Failed"));
        assert!(text.contains("WARNING: No more files"));
    }

    #[test]
    fn test_help_dialog_lists_categories() {
        let text = render(&DialogKind::help());
        assert!(text.contains("Navigation"));
        assert!(text.contains("Extract"));
        assert!(help_line_count() > 10);
    }
}
