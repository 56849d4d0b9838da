// Status bar component - 상태바 컴포넌트
//
// 항목 수, 원본/압축 총 크기, 토스트 메시지 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 메시지 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

pub struct StatusBar<'a> {
    file_count: usize,
    dir_count: usize,
    total_size: &'a str,
    packed_size: &'a str,
    /// 우측 표시 (도구 이름 등)
    right_label: &'a str,
    message: Option<(&'a str, MessageLevel)>,
    bg_color: Color,
    fg_color: Color,
    warning_color: Color,
    error_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            total_size: "0 B",
            packed_size: "0 B",
            right_label: "",
            message: None,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            warning_color: Color::Yellow,
            error_color: Color::Red,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(mut self, files: usize, dirs: usize) -> Self {
        self.file_count = files;
        self.dir_count = dirs;
        self
    }

    pub fn sizes(mut self, total: &'a str, packed: &'a str) -> Self {
        self.total_size = total;
        self.packed_size = packed;
        self
    }

    pub fn right_label(mut self, label: &'a str) -> Self {
        self.right_label = label;
        self
    }

    /// 메시지가 있으면 통계 대신 표시
    pub fn message(mut self, message: Option<(&'a str, MessageLevel)>) -> Self {
        self.message = message;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.warning_color = theme.warning.to_color();
        self.error_color = theme.error.to_color();
        self
    }

    fn left_text(&self) -> String {
        match self.message {
            Some((text, _)) => format!(" {}", text),
            None => format!(
                " {} files, {} dirs | {} -> {}",
                self.file_count, self.dir_count, self.total_size, self.packed_size
            ),
        }
    }

    fn left_style(&self) -> Style {
        match self.message {
            Some((_, MessageLevel::Warning)) => Style::default()
                .fg(self.warning_color)
                .add_modifier(Modifier::BOLD),
            Some((_, MessageLevel::Error)) => Style::default()
                .fg(self.error_color)
                .add_modifier(Modifier::BOLD),
            Some((_, MessageLevel::Info)) | None => Style::default().fg(self.fg_color),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left = self.left_text();
        let right = format!("[{}] ", self.right_label);
        let padding_len = (area.width as usize).saturating_sub(left.width() + right.width());

        let line = Line::from(vec![
            Span::styled(left.clone(), self.left_style()),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
