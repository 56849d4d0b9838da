//! 7-Zip 목록(`7z l`) 출력 파서
//!
//! 도구의 출력 형식은 버전 계약이 아니므로 줄 단위 best-effort 매칭을 한다.
//! 문법에 맞지 않는 줄(헤더, 구분선, 요약 등)은 조용히 건너뛴다.
//! 요약 줄은 이름이 `files` 인 경우뿐 아니라 실제 7-Zip 이 폴더 수까지 붙인
//! `files, N folders` 인 경우도 일부러 제외한다.

use crate::models::{CompressedSize, Entry};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// date, time, attributes, original size, compressed size(비어 있을 수 있음), filename
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2})\s+(\S+)\s+(\d+)\s+(\d*)\s+(.+)$")
        .expect("listing pattern is valid")
});

/// 마지막 집계 줄이 파일 이름 자리에 남기는 토큰
///
/// "3 files" 는 크기 열이 한 칸씩 밀려 "files" 만 남고, 폴더가 있으면
/// "files, 1 folders" 형태가 된다.
static SUMMARY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^files(, \d+ folders)?$").expect("summary pattern is valid"));

/// 한 번의 목록 파싱 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    pub entries: Vec<Entry>,
    /// UTF-8 디코딩에 실패해 Latin-1로 대체했는지 여부
    pub decode_fallback: bool,
}

impl ParsedListing {
    /// 일치하는 줄이 하나도 없음 (실행 오류와 구분되는 결과 상태)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 원시 바이트 출력을 파싱
pub fn parse_listing(raw: &[u8]) -> ParsedListing {
    let (text, decode_fallback) = decode_output(raw);
    if decode_fallback {
        warn!("listing output is not valid UTF-8, decoded as Latin-1");
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for entry in text.lines().filter_map(parse_line) {
        if seen.insert(entry.filename.clone()) {
            entries.push(entry);
        } else {
            debug!("duplicate listing entry skipped: {}", entry.filename);
        }
    }

    ParsedListing {
        entries,
        decode_fallback,
    }
}

/// UTF-8 우선, 실패 시 바이트 보존 단일 바이트(Latin-1) 디코딩
pub fn decode_output(raw: &[u8]) -> (String, bool) {
    match std::str::from_utf8(raw) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (raw.iter().map(|&b| char::from(b)).collect(), true),
    }
}

/// 한 줄 파싱. 문법 불일치, 잘못된 날짜/시각, 오버플로, 집계 줄은 `None`
pub fn parse_line(line: &str) -> Option<Entry> {
    let caps = LINE_PATTERN.captures(line)?;

    let filename = &caps[6];
    if SUMMARY_PATTERN.is_match(filename) {
        return None;
    }

    let modified_date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let modified_time = NaiveTime::parse_from_str(&caps[2], "%H:%M:%S").ok()?;
    let original_size = caps[4].parse::<u64>().ok()?;
    let compressed_size = match &caps[5] {
        "" => CompressedSize::Unknown,
        digits => CompressedSize::Known(digits.parse::<u64>().ok()?),
    };

    Some(Entry {
        filename: filename.to_string(),
        original_size,
        compressed_size,
        modified_date,
        modified_time,
        attributes: caps[3].to_string(),
    })
}
