use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// 압축 크기
///
/// 7-Zip 목록에서 압축 크기 열이 비어 있으면(디렉토리, solid 블록의 후속 파일 등)
/// `Unknown`으로 남긴다. 0으로 대체하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedSize {
    /// 도구가 보고한 바이트 수
    Known(u64),
    /// 열이 비어 있음
    Unknown,
}

impl CompressedSize {
    pub fn is_known(&self) -> bool {
        matches!(self, CompressedSize::Known(_))
    }
}

impl fmt::Display for CompressedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressedSize::Known(bytes) => write!(f, "{}", bytes),
            CompressedSize::Unknown => write!(f, "N/A"),
        }
    }
}

/// 압축 파일 내부 엔트리 (목록 한 줄)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 목록에 표시된 그대로의 이름 (경로 구분자 포함 가능)
    pub filename: String,
    /// 원본 크기 (바이트)
    pub original_size: u64,
    /// 압축 크기
    pub compressed_size: CompressedSize,
    /// 수정 날짜
    pub modified_date: NaiveDate,
    /// 수정 시각
    pub modified_time: NaiveTime,
    /// 플랫폼 속성 토큰 (예: "....A", "D....") - 해석하지 않고 보관
    pub attributes: String,
}

impl Entry {
    /// 디렉토리 여부 (표시 전용)
    pub fn is_directory(&self) -> bool {
        self.attributes.starts_with('D')
    }

    /// "YYYY-MM-DD" 형식 날짜
    pub fn date_display(&self) -> String {
        self.modified_date.format("%Y-%m-%d").to_string()
    }

    /// "HH:MM:SS" 형식 시각
    pub fn time_display(&self) -> String {
        self.modified_time.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(attributes: &str) -> Entry {
        Entry {
            filename: "docs/readme.txt".to_string(),
            original_size: 1024,
            compressed_size: CompressedSize::Known(512),
            modified_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            modified_time: NaiveTime::from_hms_opt(9, 5, 7).expect("valid time"),
            attributes: attributes.to_string(),
        }
    }

    #[test]
    fn test_compressed_size_display() {
        assert_eq!(CompressedSize::Known(512).to_string(), "512");
        assert_eq!(CompressedSize::Unknown.to_string(), "N/A");
        assert!(CompressedSize::Known(0).is_known());
        assert!(!CompressedSize::Unknown.is_known());
    }

    #[test]
    fn test_entry_date_time_display_zero_padded() {
        let entry = sample_entry("....A");
        assert_eq!(entry.date_display(), "2024-01-01");
        assert_eq!(entry.time_display(), "09:05:07");
    }

    #[test]
    fn test_entry_directory_check() {
        assert!(sample_entry("D....").is_directory());
        assert!(!sample_entry("....A").is_directory());
    }
}
