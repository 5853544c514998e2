//! Draft text for the wallet and narrative fields.

use unicode_segmentation::UnicodeSegmentation;

use nebula_types::ui::FocusField;

/// Handles text editing with proper Unicode grapheme cluster support.
#[derive(Debug, Default, Clone)]
pub struct DraftInput {
    text: String,
    /// Cursor position in graphemes.
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor.saturating_add(1);
        self.cursor = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        if new_char.is_control() {
            return;
        }
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    /// Insert pasted text; control characters (including newlines) are dropped.
    pub fn enter_text(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
        if cleaned.is_empty() {
            return;
        }
        let index = self.byte_index();
        self.text.insert_str(index, &cleaned);
        let inserted = cleaned.graphemes(true).count();
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(inserted));
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }

        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn delete_word_backwards(&mut self) {
        while self.cursor > 0 && self.grapheme_is_whitespace(self.cursor - 1) {
            self.delete_char();
        }
        while self.cursor > 0 && !self.grapheme_is_whitespace(self.cursor - 1) {
            self.delete_char();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.grapheme_count();
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    fn grapheme_is_whitespace(&self, index: usize) -> bool {
        self.text
            .graphemes(true)
            .nth(index)
            .is_some_and(|grapheme| grapheme.chars().all(char::is_whitespace))
    }

    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.min(self.grapheme_count())
    }
}

/// The two fields of the intent panel plus which one has focus.
#[derive(Debug, Default, Clone)]
pub struct IntentForm {
    pub narrative: DraftInput,
    pub wallet: DraftInput,
    pub focus: FocusField,
}

impl IntentForm {
    #[must_use]
    pub fn focused(&self) -> &DraftInput {
        match self.focus {
            FocusField::Narrative => &self.narrative,
            FocusField::Wallet => &self.wallet,
        }
    }

    pub fn focused_mut(&mut self) -> &mut DraftInput {
        match self.focus {
            FocusField::Narrative => &mut self.narrative,
            FocusField::Wallet => &mut self.wallet,
        }
    }

    /// At least one field has non-whitespace content.
    #[must_use]
    pub fn has_any_input(&self) -> bool {
        !self.wallet.is_blank() || !self.narrative.is_blank()
    }

    pub fn clear(&mut self) {
        self.narrative.clear();
        self.wallet.clear();
    }
}
