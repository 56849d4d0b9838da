use super::text_edit::LineEdit;
use super::*;
use crate::models::ExtractDecision;
use crate::ui::InputPurpose;

impl App {
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기. 대기 중인 작업도 함께 취소
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.pending_extract = None;
        self.pending_extract_archive = None;
        self.pending_remove = None;
    }

    pub fn show_error(&mut self, title: &str, message: &str) {
        self.dialog = Some(DialogKind::error(title, message));
    }

    // === 입력 다이얼로그 ===

    /// 입력 다이얼로그 편집 공통
    fn edit_input(&mut self, f: impl FnOnce(&mut LineEdit)) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            f(&mut LineEdit::new(value, cursor_pos));
        }
    }

    pub fn dialog_input_char(&mut self, c: char) {
        self.edit_input(|e| e.insert(c));
    }

    pub fn dialog_input_backspace(&mut self) {
        self.edit_input(|e| e.backspace());
    }

    /// 이전 단어 삭제 (Ctrl+W)
    pub fn dialog_input_delete_prev_word(&mut self) {
        self.edit_input(|e| e.delete_prev_word());
    }

    pub fn dialog_input_delete(&mut self) {
        self.edit_input(|e| e.delete());
    }

    pub fn dialog_input_left(&mut self) {
        self.edit_input(|e| e.left());
    }

    pub fn dialog_input_right(&mut self) {
        self.edit_input(|e| e.right());
    }

    pub fn dialog_input_home(&mut self) {
        self.edit_input(|e| e.home());
    }

    pub fn dialog_input_end(&mut self) {
        self.edit_input(|e| e.end());
    }

    /// 버튼 전환 (OK <-> Cancel). 모든 2버튼 다이얼로그 공용
    pub fn dialog_toggle_button(&mut self) {
        match &mut self.dialog {
            Some(DialogKind::Input {
                selected_button, ..
            })
            | Some(DialogKind::Confirm {
                selected_button, ..
            })
            | Some(DialogKind::Overwrite {
                selected_button, ..
            }) => {
                *selected_button = 1 - (*selected_button).min(1);
            }
            _ => {}
        }
    }

    /// Enter 처리: 선택된 버튼에 따라 확정 또는 취소
    pub fn dialog_submit(&mut self) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };

        match dialog {
            DialogKind::Input {
                value,
                selected_button,
                purpose,
                ..
            } => {
                if selected_button != 0 {
                    self.close_dialog();
                    return;
                }
                self.dialog = None;
                self.confirm_input(purpose, &value);
            }
            DialogKind::Confirm {
                selected_button, ..
            } => {
                if selected_button == 0 {
                    self.dialog = None;
                    self.confirm_remove();
                } else {
                    self.close_dialog();
                }
            }
            DialogKind::Overwrite {
                selected_button, ..
            } => {
                let decision = if selected_button == 0 {
                    ExtractDecision::Overwrite
                } else {
                    ExtractDecision::Abort
                };
                self.resolve_overwrite(decision);
            }
            DialogKind::Error { .. } | DialogKind::Message { .. } | DialogKind::Help { .. } => {
                self.close_dialog();
            }
        }
    }

    /// Esc 처리. 덮어쓰기 확인 중이면 Abort로 확정
    pub fn dialog_cancel(&mut self) {
        if matches!(self.dialog, Some(DialogKind::Overwrite { .. })) {
            self.resolve_overwrite(ExtractDecision::Abort);
        } else {
            self.close_dialog();
        }
    }

    fn confirm_input(&mut self, purpose: InputPurpose, value: &str) {
        match purpose {
            InputPurpose::OpenArchive => {
                let path = expand_user_path(value.trim());
                if path.as_os_str().is_empty() {
                    return;
                }
                self.open_archive(path);
            }
            InputPurpose::AddFiles => self.confirm_add(value),
            InputPurpose::ExtractDestination => self.confirm_extract_destination(value),
            InputPurpose::ExtractArchivePath => self.confirm_extract_archive_path(value),
            InputPurpose::ExtractArchiveDestination => {
                self.confirm_extract_archive_destination(value)
            }
            InputPurpose::CompressArchive => self.confirm_compress(value),
        }
    }
}

/// 앞의 `~`를 홈 디렉토리로 확장
pub(super) fn expand_user_path(input: &str) -> std::path::PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    std::path::PathBuf::from(input)
}
