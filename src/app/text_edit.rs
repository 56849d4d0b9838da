//! 입력 다이얼로그 한 줄 편집
//!
//! 커서는 바이트 인덱스이며 항상 UTF-8 문자 경계에 놓인다.

/// 입력 값과 커서를 빌려 편집하는 뷰
pub(super) struct LineEdit<'a> {
    value: &'a mut String,
    cursor: &'a mut usize,
}

impl<'a> LineEdit<'a> {
    pub(super) fn new(value: &'a mut String, cursor: &'a mut usize) -> Self {
        *cursor = (*cursor).min(value.len());
        Self { value, cursor }
    }

    pub(super) fn insert(&mut self, c: char) {
        self.value.insert(*self.cursor, c);
        *self.cursor += c.len_utf8();
    }

    pub(super) fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary(*self.cursor) {
            self.value.remove(prev);
            *self.cursor = prev;
        }
    }

    pub(super) fn delete(&mut self) {
        if *self.cursor < self.value.len() {
            self.value.remove(*self.cursor);
        }
    }

    pub(super) fn left(&mut self) {
        if let Some(prev) = self.prev_boundary(*self.cursor) {
            *self.cursor = prev;
        }
    }

    pub(super) fn right(&mut self) {
        if let Some(c) = self.value[*self.cursor..].chars().next() {
            *self.cursor += c.len_utf8();
        }
    }

    pub(super) fn home(&mut self) {
        *self.cursor = 0;
    }

    pub(super) fn end(&mut self) {
        *self.cursor = self.value.len();
    }

    /// 커서 앞 경로 구성요소 하나 삭제 (Ctrl+W)
    ///
    /// 구분자(공백, `/`, 따옴표)를 먼저 건너뛴 뒤 다음 구분자까지 지운다.
    pub(super) fn delete_prev_word(&mut self) {
        let end = *self.cursor;
        let head = &self.value[..end];

        let trimmed = head.trim_end_matches(is_separator);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| is_separator(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        self.value.replace_range(start..end, "");
        *self.cursor = start;
    }

    fn prev_boundary(&self, pos: usize) -> Option<usize> {
        self.value[..pos].char_indices().next_back().map(|(i, _)| i)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '\\' | '"' | '\'')
}
