#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub target_is_text_input: bool,
}

impl KeyPress {
    pub fn space() -> Self {
        KeyPress {
            key: Key::Space,
            target_is_text_input: false,
        }
    }

    /// Typing a space into a name field must never count as a guess.
    pub fn is_guess(&self) -> bool {
        self.key == Key::Space && !self.target_is_text_input
    }
}
