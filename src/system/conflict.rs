//! 압축 해제 전 파일 이름 충돌 검사
//!
//! 압축 파일의 이름 목록과 대상 디렉토리의 최상위 이름을 정확한 문자열 비교로
//! 교차시킨다. 경로 정규화나 재귀 탐색은 하지 않는다.

use crate::models::{ExtractDecision, ExtractOutcome};
use crate::system::manifest::Manifest;
use crate::system::tool::ArchiveTool;
use crate::utils::error::{CobaltError, Result};
use log::info;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// 압축 파일 목록 순서를 유지한 교집합 (중복 제거)
pub fn find_overlap<'a, I>(archive_names: I, destination_names: &BTreeSet<String>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    archive_names
        .into_iter()
        .filter(|name| destination_names.contains(*name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// 대상 디렉토리의 최상위 이름 집합
pub fn destination_filenames(dir: &Path) -> Result<BTreeSet<String>> {
    if !dir.is_dir() {
        return Err(CobaltError::ExtractFailed {
            path: dir.to_path_buf(),
            reason: "Destination is not a directory".to_string(),
        });
    }

    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// 충돌 검사가 끝난 압축 해제 계획
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractPlan {
    pub archive_path: PathBuf,
    pub destination: PathBuf,
    /// 이미 대상에 존재하는 이름들
    pub overlap: Vec<String>,
}

impl ExtractPlan {
    /// 압축 파일을 새로 조회해 계획 생성
    pub fn prepare(tool: &ArchiveTool, archive: &Path, destination: &Path) -> Result<Self> {
        let existing = destination_filenames(destination)?;
        let listing = tool.list(archive)?;
        let overlap = find_overlap(
            listing.entries.iter().map(|e| e.filename.as_str()),
            &existing,
        );
        Ok(Self {
            archive_path: archive.to_path_buf(),
            destination: destination.to_path_buf(),
            overlap,
        })
    }

    /// 열린 매니페스트의 캐시된 목록으로 계획 생성
    pub fn from_manifest(manifest: &Manifest, destination: &Path) -> Result<Self> {
        let existing = destination_filenames(destination)?;
        Ok(Self {
            archive_path: manifest.archive_path().to_path_buf(),
            destination: destination.to_path_buf(),
            overlap: find_overlap(manifest.filenames(), &existing),
        })
    }

    pub fn has_conflicts(&self) -> bool {
        !self.overlap.is_empty()
    }

    /// 계획 실행. `decide`는 충돌이 있을 때만 호출되며, 취소 시 명령을 실행하지 않는다.
    pub fn execute<F>(&self, tool: &ArchiveTool, decide: F) -> Result<ExtractOutcome>
    where
        F: FnOnce(&[String]) -> ExtractDecision,
    {
        let overwrite = if self.has_conflicts() {
            match decide(&self.overlap) {
                ExtractDecision::Overwrite => true,
                ExtractDecision::Abort => {
                    info!(
                        "extract of {} aborted ({} conflicts)",
                        self.archive_path.display(),
                        self.overlap.len()
                    );
                    return Ok(ExtractOutcome::Aborted);
                }
            }
        } else {
            false
        };

        tool.extract(&self.archive_path, &self.destination, overwrite)?;
        Ok(ExtractOutcome::Extracted { overwrite })
    }
}
