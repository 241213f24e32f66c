/// Focused-index cursor over an open option list.
///
/// The cursor is distinct from the committed selection and is clamped to
/// `[0, len - 1]`. `scroll_offset` follows the cursor with "nearest"
/// alignment: the window only moves when the cursor leaves it.
#[derive(Debug, Clone)]
pub struct Listbox {
    len: usize,
    cursor: Option<usize>,
    scroll_offset: usize,
    viewport: usize,
}

pub const DEFAULT_VIEWPORT: usize = 8;

impl Listbox {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cursor: None,
            scroll_offset: 0,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
        self.scroll_into_view();
    }

    /// Seed the cursor at the committed selection, if any.
    pub fn seed(&mut self, selected: Option<usize>) {
        self.cursor = selected.filter(|index| *index < self.len);
        self.scroll_offset = 0;
        self.scroll_into_view();
    }

    pub fn reset(&mut self) {
        self.cursor = None;
        self.scroll_offset = 0;
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let last = self.len as isize - 1;
        let next = match self.cursor {
            None => 0,
            Some(current) => (current as isize + delta).clamp(0, last),
        };
        self.set_cursor(next as usize);
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.len || self.cursor == Some(index) {
            return false;
        }
        self.cursor = Some(index);
        tracing::trace!(cursor = index, "listbox cursor moved");
        self.scroll_into_view();
        true
    }

    fn scroll_into_view(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        } else if cursor >= self.scroll_offset + self.viewport {
            self.scroll_offset = cursor + 1 - self.viewport;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut listbox = Listbox::new(3);
        listbox.seed(None);
        listbox.move_by(-1);
        assert_eq!(listbox.cursor(), Some(0));
        listbox.move_by(1);
        listbox.move_by(1);
        listbox.move_by(1);
        assert_eq!(listbox.cursor(), Some(2));
        listbox.move_by(-1);
        assert_eq!(listbox.cursor(), Some(1));
    }

    #[test]
    fn seed_ignores_out_of_range_selection() {
        let mut listbox = Listbox::new(2);
        listbox.seed(Some(5));
        assert_eq!(listbox.cursor(), None);
        listbox.seed(Some(1));
        assert_eq!(listbox.cursor(), Some(1));
    }

    #[test]
    fn scrolls_with_nearest_alignment() {
        let mut listbox = Listbox::new(20);
        listbox.set_viewport(5);
        listbox.seed(Some(0));
        for _ in 0..6 {
            listbox.move_by(1);
        }
        assert_eq!(listbox.cursor(), Some(6));
        assert_eq!(listbox.scroll_offset(), 2);
        listbox.move_by(-1);
        assert_eq!(listbox.scroll_offset(), 2);
        listbox.set_cursor(0);
        assert_eq!(listbox.scroll_offset(), 0);
    }

    #[test]
    fn empty_list_never_moves() {
        let mut listbox = Listbox::new(0);
        listbox.move_by(1);
        assert_eq!(listbox.cursor(), None);
        assert!(listbox.is_empty());
    }
}
