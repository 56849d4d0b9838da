//! 액션 시스템: 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩, 커맨드바 항목, 도움말 내용이 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    // Archive
    OpenArchive,
    CloseArchive,
    AddFiles,
    RemoveEntry,
    Extract,
    ExtractArchive,
    Compress,
    // System
    Refresh,
    ShowHelp,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Archive,
    System,
}

impl ActionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::Archive => "Archive",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
    /// 열린 압축 파일이 있어야 실행 가능
    pub needs_archive: bool,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        label: "Move up",
        category: ActionCategory::Navigation,
        shortcut_display: Some("j / k"),
        command_bar: None,
        needs_archive: false,
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
        needs_archive: false,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        label: "Top",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gg / Home"),
        command_bar: None,
        needs_archive: false,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        label: "Bottom",
        category: ActionCategory::Navigation,
        shortcut_display: Some("G / End"),
        command_bar: None,
        needs_archive: false,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        label: "Half page up",
        category: ActionCategory::Navigation,
        shortcut_display: Some("^U / PgUp"),
        command_bar: None,
        needs_archive: false,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        label: "Half page down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("^D / PgDn"),
        command_bar: None,
        needs_archive: false,
    },
    // Archive
    ActionDef {
        action: Action::OpenArchive,
        id: "archive_open",
        label: "Open archive",
        category: ActionCategory::Archive,
        shortcut_display: Some("o"),
        command_bar: Some(CommandBarEntry {
            key: "o",
            label: "Open",
            priority: 10,
        }),
        needs_archive: false,
    },
    ActionDef {
        action: Action::CloseArchive,
        id: "archive_close",
        label: "Close archive",
        category: ActionCategory::Archive,
        shortcut_display: Some("w"),
        command_bar: None,
        needs_archive: true,
    },
    ActionDef {
        action: Action::AddFiles,
        id: "archive_add",
        label: "Add files",
        category: ActionCategory::Archive,
        shortcut_display: Some("a"),
        command_bar: Some(CommandBarEntry {
            key: "a",
            label: "Add",
            priority: 11,
        }),
        needs_archive: true,
    },
    ActionDef {
        action: Action::RemoveEntry,
        id: "archive_remove",
        label: "Remove entry",
        category: ActionCategory::Archive,
        shortcut_display: Some("d / Del"),
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Del",
            priority: 12,
        }),
        needs_archive: true,
    },
    ActionDef {
        action: Action::Extract,
        id: "archive_extract",
        label: "Extract",
        category: ActionCategory::Archive,
        shortcut_display: Some("x"),
        command_bar: Some(CommandBarEntry {
            key: "x",
            label: "Extract",
            priority: 13,
        }),
        needs_archive: true,
    },
    ActionDef {
        action: Action::ExtractArchive,
        id: "archive_extract_file",
        label: "Extract archive file",
        category: ActionCategory::Archive,
        shortcut_display: Some("X"),
        command_bar: Some(CommandBarEntry {
            key: "X",
            label: "Unpack",
            priority: 15,
        }),
        needs_archive: false,
    },
    ActionDef {
        action: Action::Compress,
        id: "archive_compress",
        label: "New archive",
        category: ActionCategory::Archive,
        shortcut_display: Some("c"),
        command_bar: Some(CommandBarEntry {
            key: "c",
            label: "New",
            priority: 14,
        }),
        needs_archive: false,
    },
    // System
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        label: "Refresh",
        category: ActionCategory::System,
        shortcut_display: Some("r / ^R"),
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Reload",
            priority: 20,
        }),
        needs_archive: true,
    },
    ActionDef {
        action: Action::ShowHelp,
        id: "help_keys",
        label: "Keyboard help",
        category: ActionCategory::System,
        shortcut_display: Some("? / F1"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Keys",
            priority: 21,
        }),
        needs_archive: false,
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 30,
        }),
        needs_archive: false,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        // 탐색: Vim
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('G'),
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::GoToTop,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::PageUp,
            modifiers: None,
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageDown,
        },
        KeyBinding {
            code: KeyCode::PageDown,
            modifiers: None,
            action: Action::PageDown,
        },
        // 압축 파일
        KeyBinding {
            code: KeyCode::Char('o'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::OpenArchive,
        },
        KeyBinding {
            code: KeyCode::Char('w'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::CloseArchive,
        },
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::AddFiles,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::RemoveEntry,
        },
        KeyBinding {
            code: KeyCode::Delete,
            modifiers: None,
            action: Action::RemoveEntry,
        },
        KeyBinding {
            code: KeyCode::Char('x'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Extract,
        },
        KeyBinding {
            code: KeyCode::Char('X'),
            modifiers: None,
            action: Action::ExtractArchive,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Compress,
        },
        // 시스템
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ShowHelp,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true, // any modifier
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

static SEQUENCE_BINDINGS: &[SequenceBinding] = &[SequenceBinding {
    prefix: 'g',
    key: 'g',
    action: Action::GoToTop,
}];

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    SEQUENCE_BINDINGS
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    SEQUENCE_BINDINGS.iter().any(|binding| binding.prefix == c)
}

impl Action {
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }

    pub fn def(&self) -> Option<&'static ActionDef> {
        ACTION_DEFS.iter().find(|d| d.action == *self)
    }

    pub fn needs_archive(&self) -> bool {
        self.def().is_some_and(|d| d.needs_archive)
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
///
/// 압축 파일이 열려 있지 않으면 해당 항목은 비활성 표시
pub fn generate_command_bar_items(archive_open: bool) -> Vec<CommandItem> {
    let mut entries: Vec<(&CommandBarEntry, &ActionDef)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (cb, def)))
        .collect();

    entries.sort_by_key(|(cb, _)| cb.priority);

    entries
        .into_iter()
        .map(|(cb, def)| {
            CommandItem::new(cb.key, cb.label).enabled(archive_open || !def.needs_archive)
        })
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    [
        ActionCategory::Navigation,
        ActionCategory::Archive,
        ActionCategory::System,
    ]
    .iter()
    .map(|cat| {
        let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
            .iter()
            .filter(|d| d.category == *cat)
            .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
            .collect();
        (cat.title(), items)
    })
    .filter(|(_, items)| !items.is_empty())
    .collect()
}
