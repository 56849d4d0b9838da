use super::*;
use crate::core::actions::{find_sequence_action, is_sequence_prefix, Action};
use crate::ui::components::dialog::help_line_count;

impl App {
    /// 액션 실행 (키 바인딩 테이블에서 조회된 결과)
    pub fn execute_action(&mut self, action: Action) {
        if action.needs_archive() && !self.is_archive_open() {
            self.set_toast("No archive open", MessageLevel::Warning);
            return;
        }

        match action {
            Action::Quit => self.quit(),
            Action::MoveUp => self.move_selection_up(),
            Action::MoveDown => self.move_selection_down(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::PageUp => self.move_selection_page_up(),
            Action::PageDown => self.move_selection_page_down(),
            Action::OpenArchive => self.start_open(),
            Action::CloseArchive => self.close_archive(),
            Action::AddFiles => self.start_add(),
            Action::RemoveEntry => self.start_remove(),
            Action::Extract => self.start_extract(),
            Action::ExtractArchive => self.start_extract_archive(),
            Action::Compress => self.start_compress(),
            Action::Refresh => self.refresh_archive(),
            Action::ShowHelp => self.dialog = Some(DialogKind::help()),
        }
    }

    /// 일반 모드 문자 키 처리. 시퀀스(gg)로 소비되면 true
    pub fn handle_sequence_key(&mut self, c: char) -> bool {
        if let Some(prefix) = self.pending_key {
            self.clear_pending_key();
            if let Some(action) = find_sequence_action(prefix, c) {
                self.execute_action(action);
                return true;
            }
        }

        if is_sequence_prefix(c) {
            self.set_pending_key(c);
            return true;
        }
        false
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.adjust_scroll_offset();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.max_index() {
            self.selected_index += 1;
            self.adjust_scroll_offset();
        }
    }

    pub fn move_selection_page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.page_size());
        self.adjust_scroll_offset();
    }

    pub fn move_selection_page_down(&mut self) {
        self.selected_index = (self.selected_index + self.page_size()).min(self.max_index());
        self.adjust_scroll_offset();
    }

    /// 맨 위로 이동 (Home / gg)
    pub fn go_to_top(&mut self) {
        self.selected_index = 0;
        self.adjust_scroll_offset();
    }

    /// 맨 아래로 이동 (End / G)
    pub fn go_to_bottom(&mut self) {
        self.selected_index = self.max_index();
        self.adjust_scroll_offset();
    }

    /// 목록이 바뀐 뒤 선택 위치를 범위 안으로
    pub(super) fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.max_index());
        self.adjust_scroll_offset();
    }

    pub(super) fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    fn max_index(&self) -> usize {
        self.entries().len().saturating_sub(1)
    }

    fn page_size(&self) -> usize {
        self.layout.visible_rows().max(1)
    }

    /// 스크롤 오프셋을 현재 선택 위치에 맞게 조정
    pub(super) fn adjust_scroll_offset(&mut self) {
        let visible = self.page_size();
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index + 1 - visible;
        }
    }

    // === 키 시퀀스 ===

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    /// 대기 키 만료 여부 (800ms)
    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .is_some_and(|t| t.elapsed().as_millis() > 800)
    }

    // === 토스트 ===

    pub fn set_toast(&mut self, message: &str, level: MessageLevel) {
        self.toast_message = Some((message.to_string(), level, Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, _, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= 3 {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<(&str, MessageLevel)> {
        self.toast_message.as_ref().and_then(|(msg, level, time)| {
            if time.elapsed().as_secs() < 3 {
                Some((msg.as_str(), *level))
            } else {
                None
            }
        })
    }

    // === 도움말 스크롤 ===

    pub fn dialog_help_scroll_down(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            if *scroll_offset + 1 < help_line_count() {
                *scroll_offset += 1;
            }
        }
    }

    pub fn dialog_help_scroll_up(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = scroll_offset.saturating_sub(1);
        }
    }
}
