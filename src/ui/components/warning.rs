// Warning screen component - 터미널이 너무 작을 때 표시

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;

pub struct WarningScreen {
    current_size: (u16, u16),
    warning_color: Color,
    bg_color: Color,
    fg_color: Color,
    error_color: Color,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self {
            current_size: (0, 0),
            warning_color: Color::Yellow,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            error_color: Color::Red,
        }
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.warning_color = theme.warning.to_color();
        self.bg_color = theme.bg_primary.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.error_color = theme.error.to_color();
        self
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled("Terminal Too Small", bold(self.warning_color))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Current: ", Style::default().fg(self.fg_color)),
                Span::styled(
                    format!("{}x{}", self.current_size.0, self.current_size.1),
                    bold(self.error_color),
                ),
            ]),
            Line::from(vec![
                Span::styled("Required: ", Style::default().fg(self.fg_color)),
                Span::styled(format!("{}x{}", MIN_WIDTH, MIN_HEIGHT), bold(self.fg_color)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.warning_color));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_screen_shows_sizes() {
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        WarningScreen::new().current_size(30, 8).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("30x8"));
        assert!(text.contains("40x10"));
    }
}
