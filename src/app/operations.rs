use super::dialogs::expand_user_path;
use super::*;
use crate::models::{ExtractDecision, ExtractOutcome};
use crate::ui::InputPurpose;
use crate::utils::error::{CobaltError, Result};
use crate::utils::formatter::pluralize;
use log::{info, warn};
use std::path::{Path, PathBuf};

impl App {
    // === 열기 / 닫기 / 새로고침 ===

    /// 경로 입력 다이얼로그 표시
    pub fn start_open(&mut self) {
        let initial = self
            .manifest
            .as_ref()
            .and_then(|m| m.archive_path().parent())
            .map(|dir| format!("{}/", dir.display()))
            .unwrap_or_default();
        self.dialog = Some(DialogKind::input(
            "Open Archive",
            "Archive path:",
            initial,
            InputPurpose::OpenArchive,
        ));
    }

    /// 압축 파일 열기. 실패 시 기존 매니페스트 유지
    pub fn open_archive(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        match Manifest::open(&self.tool, path.clone()) {
            Ok(manifest) => {
                info!("opened {} ({} entries)", path.display(), manifest.len());
                self.manifest = Some(manifest);
                self.reset_selection();
                self.notify_listing_state();
            }
            Err(e) => self.show_failure("Open Failed", &e),
        }
    }

    pub fn close_archive(&mut self) {
        if let Some(manifest) = self.manifest.take() {
            info!("closed {}", manifest.archive_path().display());
        }
        self.reset_selection();
    }

    /// 목록 다시 조회. 실패 시 이전 목록 유지
    pub fn refresh_archive(&mut self) {
        let Some(manifest) = self.manifest.as_mut() else {
            return;
        };
        if let Err(e) = manifest.refresh(&self.tool).map(|_| ()) {
            self.show_failure("Refresh Failed", &e);
            return;
        }
        self.clamp_selection();
        self.notify_listing_state();
    }

    // === 추가 ===

    pub fn start_add(&mut self) {
        if self.manifest.is_none() {
            return;
        }
        self.dialog = Some(DialogKind::input(
            "Add Files",
            "Files to add (space separated, quote names with spaces):",
            "",
            InputPurpose::AddFiles,
        ));
    }

    /// 셸 규칙으로 분리한 경로들을 압축 파일에 추가
    pub fn confirm_add(&mut self, input: &str) {
        let paths = match split_paths(input) {
            Ok(paths) => paths,
            Err(message) => {
                self.show_error("Add Failed", &message);
                return;
            }
        };
        if paths.is_empty() {
            return;
        }

        let Some(manifest) = self.manifest.as_mut() else {
            return;
        };
        match manifest.add(&self.tool, &paths).map(|_| ()) {
            Ok(()) => {
                self.clamp_selection();
                let message = format!("Added {}", pluralize(paths.len(), "file", "files"));
                self.set_toast(&message, MessageLevel::Info);
                self.notify_decode_fallback();
            }
            Err(e) => self.show_failure("Add Failed", &e),
        }
    }

    // === 삭제 ===

    /// 선택 항목 삭제 확인
    pub fn start_remove(&mut self) {
        let Some(name) = self.selected_entry().map(|e| e.filename.clone()) else {
            self.set_toast("Nothing selected", MessageLevel::Warning);
            return;
        };
        self.dialog = Some(DialogKind::confirm(
            "Remove",
            format!("Remove '{}' from the archive?", name),
        ));
        self.pending_remove = Some(name);
    }

    pub fn confirm_remove(&mut self) {
        let Some(name) = self.pending_remove.take() else {
            return;
        };
        let Some(manifest) = self.manifest.as_mut() else {
            return;
        };
        match manifest.remove(&self.tool, &name).map(|_| ()) {
            Ok(()) => {
                self.clamp_selection();
                self.set_toast(&format!("Removed {}", name), MessageLevel::Info);
                self.notify_decode_fallback();
            }
            Err(e) => self.show_failure("Remove Failed", &e),
        }
    }

    // === 압축 해제 ===

    /// 대상 디렉토리 입력 (설정 기본값 또는 압축 파일 디렉토리)
    pub fn start_extract(&mut self) {
        let Some(manifest) = self.manifest.as_ref() else {
            return;
        };
        let destination = self.default_destination(manifest.archive_path());
        self.dialog = Some(DialogKind::input(
            "Extract",
            "Destination directory:",
            destination.display().to_string(),
            InputPurpose::ExtractDestination,
        ));
    }

    /// 열린 목록으로 충돌 검사 후 바로 실행하거나 덮어쓰기 확인 표시
    pub fn confirm_extract_destination(&mut self, input: &str) {
        let destination = expand_user_path(input.trim());
        let Some(manifest) = self.manifest.as_ref() else {
            return;
        };
        match ExtractPlan::from_manifest(manifest, &destination) {
            Ok(plan) => self.stage_extract(plan),
            Err(e) => self.show_failure("Extract Failed", &e),
        }
    }

    /// 열지 않은 압축 파일 풀기: 먼저 압축 파일 경로 입력
    pub fn start_extract_archive(&mut self) {
        let initial = self
            .manifest
            .as_ref()
            .map(|m| m.archive_path().display().to_string())
            .unwrap_or_default();
        self.dialog = Some(DialogKind::input(
            "Extract Archive",
            "Archive path:",
            initial,
            InputPurpose::ExtractArchivePath,
        ));
    }

    pub fn confirm_extract_archive_path(&mut self, input: &str) {
        let archive = expand_user_path(input.trim());
        if archive.as_os_str().is_empty() {
            return;
        }
        let destination = self.default_destination(&archive);
        self.dialog = Some(DialogKind::input(
            "Extract Archive",
            "Destination directory:",
            destination.display().to_string(),
            InputPurpose::ExtractArchiveDestination,
        ));
        self.pending_extract_archive = Some(archive);
    }

    /// 압축 파일을 새로 조회해 충돌 검사
    pub fn confirm_extract_archive_destination(&mut self, input: &str) {
        let Some(archive) = self.pending_extract_archive.take() else {
            return;
        };
        let destination = expand_user_path(input.trim());
        match ExtractPlan::prepare(&self.tool, &archive, &destination) {
            Ok(plan) => self.stage_extract(plan),
            Err(e) => self.show_failure("Extract Failed", &e),
        }
    }

    /// 충돌이 있으면 결정을 기다리고, 없으면 `-y` 없이 바로 실행
    fn stage_extract(&mut self, plan: ExtractPlan) {
        if plan.has_conflicts() {
            self.dialog = Some(DialogKind::overwrite(
                plan.destination.display().to_string(),
                plan.overlap.clone(),
            ));
            self.pending_extract = Some(plan);
            return;
        }

        // 충돌이 없으면 결정 함수는 호출되지 않는다
        let result = plan.execute(&self.tool, |_| ExtractDecision::Abort);
        self.report_extract(&plan, result);
    }

    /// 대기 중인 계획을 결정과 함께 실행
    pub fn resolve_overwrite(&mut self, decision: ExtractDecision) {
        self.dialog = None;
        let Some(plan) = self.pending_extract.take() else {
            return;
        };
        let result = plan.execute(&self.tool, |_| decision);
        self.report_extract(&plan, result);
    }

    fn report_extract(&mut self, plan: &ExtractPlan, result: Result<ExtractOutcome>) {
        match result {
            Ok(ExtractOutcome::Extracted { overwrite }) => {
                let message = if overwrite {
                    format!("Extracted to {} (overwritten)", plan.destination.display())
                } else {
                    format!("Extracted to {}", plan.destination.display())
                };
                self.set_toast(&message, MessageLevel::Info);
            }
            Ok(ExtractOutcome::Aborted) => {
                self.set_toast("Extraction aborted", MessageLevel::Warning);
            }
            Err(e) => self.show_failure("Extract Failed", &e),
        }
    }

    /// 설정의 기본 대상, 없으면 압축 파일이 있는 디렉토리
    fn default_destination(&self, archive: &Path) -> PathBuf {
        self.settings
            .extract
            .default_destination
            .clone()
            .or_else(|| archive.parent().map(Path::to_path_buf))
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    // === 새 압축 파일 ===

    pub fn start_compress(&mut self) {
        self.dialog = Some(DialogKind::input(
            "Compress",
            "New archive path, then files:",
            "",
            InputPurpose::CompressArchive,
        ));
    }

    /// 첫 단어는 새 압축 파일, 나머지는 원본. 성공하면 새 압축 파일을 연다
    pub fn confirm_compress(&mut self, input: &str) {
        let mut parts = match split_paths(input) {
            Ok(parts) => parts.into_iter(),
            Err(message) => {
                self.show_error("Compress Failed", &message);
                return;
            }
        };
        let Some(archive) = parts.next() else {
            return;
        };
        let sources: Vec<PathBuf> = parts.collect();

        match self.tool.compress(&archive, &sources) {
            Ok(()) => {
                self.open_archive(archive);
                if self.dialog.is_none() {
                    let message = format!(
                        "Compressed {}",
                        pluralize(sources.len(), "item", "items")
                    );
                    self.set_toast(&message, MessageLevel::Info);
                }
            }
            Err(e) => self.show_failure("Compress Failed", &e),
        }
    }

    // === 공통 ===

    fn show_failure(&mut self, title: &str, error: &CobaltError) {
        warn!("{}: {}", title, error);
        self.show_error(title, &error.to_string());
    }

    /// 빈 목록 / 디코딩 대체 알림
    fn notify_listing_state(&mut self) {
        let empty = self
            .manifest
            .as_ref()
            .is_some_and(|m| m.is_empty_listing());
        if empty {
            self.set_toast(EMPTY_LISTING_MESSAGE, MessageLevel::Info);
        }
        self.notify_decode_fallback();
    }

    fn notify_decode_fallback(&mut self) {
        if self.manifest.as_ref().is_some_and(|m| m.decode_fallback()) {
            self.set_toast(
                "Listing was not valid UTF-8; some names may be shown incorrectly",
                MessageLevel::Warning,
            );
        }
    }
}

/// 셸 인용 규칙으로 경로 분리
fn split_paths(input: &str) -> std::result::Result<Vec<PathBuf>, String> {
    let words = shlex::split(input).ok_or_else(|| "Unbalanced quotes in input".to_string())?;
    Ok(words.iter().map(|w| expand_user_path(w)).collect())
}
