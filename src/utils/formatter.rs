// Formatters - 크기, 압축률, 표시 너비 포맷팅

use crate::models::CompressedSize;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const PATH_ELLIPSIS: &str = "/...";

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// # Examples
/// ```
/// use cobaltarchiver::utils::formatter::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 압축 크기 표시. 알 수 없으면 "N/A"
pub fn format_compressed_size(size: CompressedSize) -> String {
    match size {
        CompressedSize::Known(bytes) => format_file_size(bytes),
        CompressedSize::Unknown => "N/A".to_string(),
    }
}

/// 압축률 (압축 크기 / 원본 크기). 원본이 0이거나 압축 크기를 모르면 None
pub fn compression_ratio(original: u64, compressed: CompressedSize) -> Option<u8> {
    match compressed {
        CompressedSize::Known(packed) if original > 0 => {
            let percent = (packed as f64 / original as f64 * 100.0).round();
            Some(percent.min(u8::MAX as f64) as u8)
        }
        _ => None,
    }
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 표시 너비 기준으로 자르고, 잘린 경우 끝에 "..."를 붙인다.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }
    let prefix = take_prefix_by_width(text, max_width - ELLIPSIS.width());
    format!("{}{}", prefix, ELLIPSIS)
}

/// 경로를 최대 너비에 맞춰 축약한다.
/// 규칙: HOME 경로는 `~`로 표시하고, 길면 `앞/.../뒤` 형태로 생략한다.
pub fn truncate_path(path: &Path, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let path = shorten_home(&path.to_string_lossy());
    if path.width() <= max_width {
        return path;
    }

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() <= 2 {
        return truncate_from_start(&path, max_width);
    }

    let first = if path.starts_with('~') {
        "~".to_string()
    } else if path.starts_with('/') {
        format!("/{}", parts[0])
    } else {
        parts[0].to_string()
    };

    let first_width = first.width() + PATH_ELLIPSIS.width();
    if first_width >= max_width {
        return truncate_from_start(&path, max_width);
    }
    let available_width = max_width - first_width;

    let mut end_parts: Vec<&str> = Vec::new();
    let mut current_width = 0;
    for part in parts.iter().skip(1).rev() {
        let part_width = part.width() + 1; // '/'
        if current_width + part_width > available_width {
            break;
        }
        end_parts.insert(0, part);
        current_width += part_width;
    }

    if end_parts.is_empty() {
        return truncate_from_start(&path, max_width);
    }

    format!("{}{}/{}", first, PATH_ELLIPSIS, end_parts.join("/"))
}

fn shorten_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if home.is_empty() {
        return path.to_string();
    }

    if path == home {
        "~".to_string()
    } else {
        match path.strip_prefix(&*home) {
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => path.to_string(),
        }
    }
}

fn truncate_from_start(text: &str, max_width: usize) -> String {
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }
    let suffix = take_suffix_by_width(text, max_width - ELLIPSIS.width());
    format!("{}{}", ELLIPSIS, suffix)
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.into_iter().rev().collect()
}
