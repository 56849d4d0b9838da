// Manifest table component - 압축 파일 항목 목록
//
// 열: 이름 | 크기 | 압축 크기 | 수정 시각 | 속성
// 좁은 터미널에서는 수정 시각과 속성 열을 숨긴다.

use crate::models::{CompressedSize, Entry};
use crate::ui::Theme;
use crate::utils::formatter::{format_compressed_size, format_file_size, truncate_to_width};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const SIZE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 19;
const ATTR_WIDTH: usize = 6;

pub struct ManifestTable<'a> {
    title: &'a str,
    entries: &'a [Entry],
    selected_index: usize,
    scroll_offset: usize,
    compact: bool,
    /// 항목이 없을 때 표시할 문구
    empty_message: &'a str,
    border_color: Color,
    header_color: Color,
    fg_color: Color,
    selected_fg: Color,
    selected_bg: Color,
    directory_color: Color,
    unknown_color: Color,
    bg_color: Color,
}

impl Default for ManifestTable<'_> {
    fn default() -> Self {
        Self {
            title: "",
            entries: &[],
            selected_index: 0,
            scroll_offset: 0,
            compact: false,
            empty_message: "",
            border_color: Color::Rgb(0, 120, 212),
            header_color: Color::Rgb(150, 150, 150),
            fg_color: Color::Rgb(212, 212, 212),
            selected_fg: Color::White,
            selected_bg: Color::Rgb(0, 120, 212),
            directory_color: Color::Rgb(86, 156, 214),
            unknown_color: Color::Rgb(128, 128, 128),
            bg_color: Color::Rgb(30, 30, 30),
        }
    }
}

struct ColumnLayout {
    name_width: usize,
    show_details: bool,
}

impl<'a> ManifestTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn entries(mut self, entries: &'a [Entry]) -> Self {
        self.entries = entries;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.table_border.to_color();
        self.header_color = theme.table_header.to_color();
        self.fg_color = theme.entry_normal.to_color();
        self.selected_fg = theme.entry_selected.to_color();
        self.selected_bg = theme.entry_selected_bg.to_color();
        self.directory_color = theme.directory.to_color();
        self.unknown_color = theme.size_unknown.to_color();
        self.bg_color = theme.bg_primary.to_color();
        self
    }

    fn column_layout(&self, width: usize) -> ColumnLayout {
        let show_details = !self.compact;
        let fixed = 1 + (SIZE_WIDTH + 1) * 2
            + if show_details {
                DATE_WIDTH + 1 + ATTR_WIDTH + 1
            } else {
                0
            };
        ColumnLayout {
            name_width: width.saturating_sub(fixed),
            show_details,
        }
    }

    fn render_header(&self, layout: &ColumnLayout, inner: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.header_color)
            .add_modifier(Modifier::BOLD);
        let mut text = format!(
            " {:<name$} {:>size$} {:>size$}",
            "Name",
            "Size",
            "Packed",
            name = layout.name_width,
            size = SIZE_WIDTH
        );
        if layout.show_details {
            text.push_str(&format!(" {:<DATE_WIDTH$} {:<ATTR_WIDTH$}", "Modified", "Attr"));
        }
        buf.set_string(inner.x, inner.y, text, style);
    }

    fn render_entry(
        &self,
        entry: &Entry,
        is_cursor: bool,
        layout: &ColumnLayout,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let base = if is_cursor {
            Style::default().fg(self.selected_fg).bg(self.selected_bg)
        } else if entry.is_directory() {
            Style::default().fg(self.directory_color)
        } else {
            Style::default().fg(self.fg_color)
        };
        let packed_style = if !is_cursor && !entry.compressed_size.is_known() {
            base.fg(self.unknown_color)
        } else {
            base
        };

        let name = truncate_to_width(&entry.filename, layout.name_width);
        let name_padding = " ".repeat(layout.name_width.saturating_sub(name.width()));
        let size = if entry.is_directory() && entry.original_size == 0 {
            "<DIR>".to_string()
        } else {
            format_file_size(entry.original_size)
        };
        let packed = match entry.compressed_size {
            CompressedSize::Unknown if entry.is_directory() => String::new(),
            other => format_compressed_size(other),
        };

        let mut spans = vec![
            Span::styled(" ", base),
            Span::styled(format!("{}{}", name, name_padding), base),
            Span::styled(format!(" {:>SIZE_WIDTH$}", size), base),
            Span::styled(format!(" {:>SIZE_WIDTH$}", packed), packed_style),
        ];
        if layout.show_details {
            spans.push(Span::styled(
                format!(
                    " {} {} {:<ATTR_WIDTH$}",
                    entry.date_display(),
                    entry.time_display(),
                    truncate_to_width(&entry.attributes, ATTR_WIDTH)
                ),
                base,
            ));
        }

        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        spans.push(Span::styled(
            " ".repeat((area.width as usize).saturating_sub(used)),
            base,
        ));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

impl Widget for ManifestTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(self.border_color)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            Paragraph::new(self.empty_message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.header_color))
                .render(
                    Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
                    buf,
                );
            return;
        }

        let layout = self.column_layout(inner.width as usize);
        self.render_header(&layout, inner, buf);

        let rows = inner.height.saturating_sub(1) as usize;
        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(rows)
            .enumerate()
        {
            let row_area = Rect::new(inner.x, inner.y + 1 + row as u16, inner.width, 1);
            self.render_entry(entry, index == self.selected_index, &layout, row_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::listing::parse_line;

    fn entries() -> Vec<Entry> {
        [
            "2024-01-01 12:00:00 D.... 0  docs",
            "2024-01-01 12:00:00 ....A 1024 512 docs/readme.txt",
            "2024-02-03 08:15:30 ....A 2048  docs/notes.txt",
        ]
        .iter()
        .filter_map(|line| parse_line(line))
        .collect()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_header_and_rows() {
        let entries = entries();
        let area = Rect::new(0, 0, 100, 8);
        let mut buf = Buffer::empty(area);
        ManifestTable::new()
            .title("test.7z")
            .entries(&entries)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("test.7z"));
        let header = row_text(&buf, 1);
        assert!(header.contains("Name"));
        assert!(header.contains("Modified"));
        assert!(row_text(&buf, 2).contains("<DIR>"));
        let readme = row_text(&buf, 3);
        assert!(readme.contains("docs/readme.txt"));
        assert!(readme.contains("512 B"));
        assert!(readme.contains("2024-01-01 12:00:00"));
        assert!(row_text(&buf, 4).contains("N/A"));
    }

    #[test]
    fn test_compact_hides_details() {
        let entries = entries();
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ManifestTable::new()
            .entries(&entries)
            .compact(true)
            .render(area, &mut buf);

        assert!(!row_text(&buf, 1).contains("Modified"));
        assert!(!row_text(&buf, 3).contains("2024-01-01"));
    }

    #[test]
    fn test_scroll_offset_skips_rows() {
        let entries = entries();
        let area = Rect::new(0, 0, 100, 5);
        let mut buf = Buffer::empty(area);
        ManifestTable::new()
            .entries(&entries)
            .scroll_offset(1)
            .selected_index(1)
            .render(area, &mut buf);

        assert!(row_text(&buf, 2).contains("docs/readme.txt"));
        assert!(row_text(&buf, 3).contains("docs/notes.txt"));
    }

    #[test]
    fn test_empty_message() {
        let area = Rect::new(0, 0, 60, 7);
        let mut buf = Buffer::empty(area);
        ManifestTable::new()
            .empty_message("No files found in archive")
            .render(area, &mut buf);

        let all: String = (0..area.height).map(|y| row_text(&buf, y)).collect();
        assert!(all.contains("No files found in archive"));
    }
}
