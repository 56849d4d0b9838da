//! 열린 압축 파일 하나의 매니페스트
//!
//! 디스크의 압축 파일이 항상 유일한 원본이다. 변경 작업이 성공하면 전체 목록을
//! 다시 읽어 상태를 통째로 교체하며, 명령의 성격으로 항목을 추론해 부분 수정하지
//! 않는다. 실패한 작업은 캐시된 상태를 건드리지 않는다.

use crate::models::{CompressedSize, Entry};
use crate::system::listing::ParsedListing;
use crate::system::tool::ArchiveTool;
use crate::utils::error::{CobaltError, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Manifest {
    archive_path: PathBuf,
    entries: Vec<Entry>,
    decode_fallback: bool,
}

impl Manifest {
    /// 압축 파일을 열어 목록을 읽는다
    pub fn open(tool: &ArchiveTool, archive_path: impl Into<PathBuf>) -> Result<Self> {
        let archive_path = archive_path.into();
        let listing = tool.list(&archive_path)?;
        info!(
            "opened {} ({} entries)",
            archive_path.display(),
            listing.entries.len()
        );

        let mut manifest = Self {
            archive_path,
            entries: Vec::new(),
            decode_fallback: false,
        };
        manifest.replace(listing);
        Ok(manifest)
    }

    /// 도구를 다시 실행하지 않고 캐시된 항목을 반환
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    /// 파일 추가 후 전체 재조회. 빈 목록이면 아무것도 하지 않는다.
    pub fn add(&mut self, tool: &ArchiveTool, paths: &[PathBuf]) -> Result<&[Entry]> {
        if paths.is_empty() {
            debug!("add with no paths ignored");
            return Ok(&self.entries);
        }

        tool.add(&self.archive_path, paths)?;
        self.refresh(tool)
    }

    /// 항목 하나 삭제 후 전체 재조회
    pub fn remove(&mut self, tool: &ArchiveTool, filename: &str) -> Result<&[Entry]> {
        if filename.is_empty() {
            return Err(CobaltError::RemoveFailed {
                path: self.archive_path.clone(),
                filename: String::new(),
                reason: "Empty filename".to_string(),
            });
        }

        tool.delete(&self.archive_path, filename)?;
        self.refresh(tool)
    }

    /// 목록을 다시 읽어 상태를 교체. 실패 시 이전 스냅샷 유지
    pub fn refresh(&mut self, tool: &ArchiveTool) -> Result<&[Entry]> {
        let listing = tool.list(&self.archive_path)?;
        self.replace(listing);
        Ok(&self.entries)
    }

    fn replace(&mut self, listing: ParsedListing) {
        self.entries = listing.entries;
        self.decode_fallback = listing.decode_fallback;
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// 마지막 목록에 일치하는 줄이 없었음
    pub fn is_empty_listing(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn decode_fallback(&self) -> bool {
        self.decode_fallback
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.filename.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_original_size(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.original_size))
    }

    /// 알려진 압축 크기만 합산
    pub fn total_compressed_size(&self) -> u64 {
        self.entries
            .iter()
            .filter_map(|e| match e.compressed_size {
                CompressedSize::Known(size) => Some(size),
                CompressedSize::Unknown => None,
            })
            .fold(0u64, |acc, size| acc.saturating_add(size))
    }
}
