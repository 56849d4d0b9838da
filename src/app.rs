use crate::models::Entry;
use crate::system::{ArchiveTool, ExtractPlan, Manifest};
use crate::ui::{DialogKind, LayoutManager, MessageLevel, ThemeManager};
use crate::utils::config::Settings;
use log::warn;
use std::path::PathBuf;
use std::time::Instant;

mod dialogs;
mod navigation;
mod operations;
mod text_edit;

#[cfg(test)]
mod tests;

/// 빈 목록일 때 표시 문구
pub const EMPTY_LISTING_MESSAGE: &str = "No files found in archive";

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    pub settings: Settings,
    /// 7-Zip 호출 경계
    tool: ArchiveTool,
    /// 현재 열린 압축 파일
    pub manifest: Option<Manifest>,
    /// 선택된 항목 인덱스
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 덮어쓰기 결정을 기다리는 압축 해제 계획
    pending_extract: Option<ExtractPlan>,
    /// 대상 디렉토리 입력을 기다리는 압축 파일 (열지 않고 풀기)
    pending_extract_archive: Option<PathBuf>,
    /// 삭제 확인 대기 중인 항목 이름
    pending_remove: Option<String>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    /// 대기 키 입력 시각
    pub pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, MessageLevel, Instant)>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let tool = ArchiveTool::new(settings.tool.program.clone());
        Self::with_tool(settings, tool)
    }

    /// 실행기를 주입한 도구로 생성
    pub fn with_tool(settings: Settings, tool: ArchiveTool) -> Self {
        let mut theme_manager = ThemeManager::new();
        if let Err(e) = theme_manager.load_themes_from_config_dir() {
            warn!("theme directory not loaded: {}", e);
        }
        if let Err(e) = theme_manager.switch_theme(&settings.ui.theme) {
            warn!("{}", e);
        }

        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager,
            settings,
            tool,
            manifest: None,
            selected_index: 0,
            scroll_offset: 0,
            dialog: None,
            pending_extract: None,
            pending_extract_archive: None,
            pending_remove: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
        }
    }

    pub fn tool(&self) -> &ArchiveTool {
        &self.tool
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_archive_open(&self) -> bool {
        self.manifest.is_some()
    }

    /// 현재 표시할 항목 (열린 압축 파일이 없으면 빈 목록)
    pub fn entries(&self) -> &[Entry] {
        self.manifest.as_ref().map(|m| m.list()).unwrap_or(&[])
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries().get(self.selected_index)
    }

    /// (파일 수, 디렉토리 수)
    pub fn entry_counts(&self) -> (usize, usize) {
        let dirs = self.entries().iter().filter(|e| e.is_directory()).count();
        (self.entries().len() - dirs, dirs)
    }

    /// 테이블 빈 목록 문구
    pub fn empty_message(&self) -> &'static str {
        match &self.manifest {
            Some(_) => EMPTY_LISTING_MESSAGE,
            None => "Press 'o' to open an archive or 'c' to create one",
        }
    }
}
