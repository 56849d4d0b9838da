// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 전체 열 표시 (이름, 크기, 압축 크기, 날짜, 속성)
// - 40-79 cols: 축약 모드 (이름, 크기, 압축 크기)
// - <40 cols 또는 <10 rows: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;
pub const FULL_MIN_WIDTH: u16 = 80;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Full,
    Compact,
    /// 터미널이 너무 작음
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 제목 (압축 파일 경로)
    pub title_bar: Rect,
    /// 목록 테이블
    pub table: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// TooSmall 모드에서 사용
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::Full,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < FULL_MIN_WIDTH {
            LayoutMode::Compact
        } else {
            LayoutMode::Full
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::Full | LayoutMode::Compact => Self::calculate_areas(area),
        };
    }

    fn calculate_areas(area: Rect) -> LayoutAreas {
        // 제목 | 테이블 | 상태바 | 커맨드바
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        LayoutAreas {
            title_bar: chunks[0],
            table: chunks[1],
            status_bar: chunks[2],
            command_bar: chunks[3],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 테이블 본문에 보이는 행 수 (테두리 2줄 + 헤더 1줄 제외)
    pub fn visible_rows(&self) -> usize {
        self.areas.table.height.saturating_sub(3) as usize
    }
}
