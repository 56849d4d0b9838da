//! 압축 작업 모델
//!
//! 압축 해제 충돌 결정과 결과

/// 덮어쓰기 충돌 시 사용자 결정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractDecision {
    /// 모두 덮어쓰기 (`-y`)
    Overwrite,
    /// 압축 해제 취소
    Abort,
}

/// 압축 해제 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// 압축 해제 명령이 성공적으로 실행됨
    Extracted {
        /// `-y` 플래그 사용 여부
        overwrite: bool,
    },
    /// 사용자가 취소하여 명령을 실행하지 않음
    Aborted,
}
