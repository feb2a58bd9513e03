//! Terminal-agnostic keyboard input and the badge form.

use crate::{BadgeField, BadgeInputs};

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (commit the focused field).
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (commit and switch field).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Single-line text field.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    buffer: String,
    cursor: usize,
}

impl InputField {
    /// Field holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns `false` for keys that do not edit.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Enter | KeyInput::Tab | KeyInput::Esc => return false,
        }
        true
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

/// The two badge input fields and which one has focus.
#[derive(Debug, Clone)]
pub struct BadgeForm {
    username: InputField,
    repository: InputField,
    focus: BadgeField,
}

impl BadgeForm {
    /// Form pre-filled with `inputs`, username focused.
    pub fn new(inputs: &BadgeInputs) -> Self {
        Self {
            username: InputField::with_text(inputs.username.clone()),
            repository: InputField::with_text(inputs.repository.clone()),
            focus: BadgeField::Username,
        }
    }

    /// Focused field.
    pub fn focus(&self) -> BadgeField {
        self.focus
    }

    /// Move focus to the other field.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Field state for display.
    pub fn field(&self, field: BadgeField) -> &InputField {
        match field {
            BadgeField::Username => &self.username,
            BadgeField::Repository => &self.repository,
        }
    }

    /// Focused field, mutably.
    pub fn focused_mut(&mut self) -> &mut InputField {
        match self.focus {
            BadgeField::Username => &mut self.username,
            BadgeField::Repository => &mut self.repository,
        }
    }
}
