/// Windows-style virtual key codes, as delivered by the host framework.
pub mod key {
    pub const BACK: u16 = 0x08;
    pub const RETURN: u16 = 0x0D;
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;
    pub const MENU: u16 = 0x12;
    pub const ESCAPE: u16 = 0x1B;
    pub const SPACE: u16 = 0x20;
    pub const LEFT: u16 = 0x25;
    pub const UP: u16 = 0x26;
    pub const RIGHT: u16 = 0x27;
    pub const DOWN: u16 = 0x28;
    pub const DIGIT_1: u16 = b'1' as u16;
    pub const DIGIT_9: u16 = b'9' as u16;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, control: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, control: false, alt: false };
    pub const CONTROL: Modifiers = Modifiers { shift: false, control: true, alt: false };
    pub const ALT: Modifiers = Modifiers { shift: false, control: false, alt: true };

    /// Bit flags used by the line protocol: 1 = shift, 2 = control, 4 = alt.
    pub fn from_bits(bits: u8) -> Self {
        Self { shift: bits & 1 != 0, control: bits & 2 != 0, alt: bits & 4 != 0 }
    }
}

/// A raw key-down event: character code, virtual key code, modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub char_code: u32,
    pub key_code: u16,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(char_code: u32, key_code: u16, modifiers: Modifiers) -> Self {
        Self { char_code, key_code, modifiers }
    }

    /// A typed character with the key code a US layout would report for it.
    pub fn char(c: char) -> Self {
        let key_code = match c {
            'a'..='z' => c.to_ascii_uppercase() as u16,
            'A'..='Z' | '0'..='9' | ' ' => c as u16,
            _ => 0,
        };
        let modifiers = if c.is_ascii_uppercase() { Modifiers::SHIFT } else { Modifiers::NONE };
        Self::new(c as u32, key_code, modifiers)
    }

    /// A non-character key such as Enter or an arrow.
    pub fn key(key_code: u16) -> Self {
        let char_code = match key_code {
            key::BACK | key::RETURN | key::ESCAPE | key::SPACE => u32::from(key_code),
            _ => 0,
        };
        Self::new(char_code, key_code, Modifiers::NONE)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_char(&self) -> bool {
        self.char_code != 0
    }

    /// Anything above the C0 controls except DEL, non-ASCII included.
    pub fn is_printable_char(&self) -> bool {
        self.char_code > 0x1F && self.char_code != 0x7F
    }

    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.char_code).filter(|_| self.is_char())
    }

    /// Zero-based candidate index for an unshifted `1`..`9` key.
    pub fn selection_index(&self) -> Option<usize> {
        if self.modifiers.shift || !(key::DIGIT_1..=key::DIGIT_9).contains(&self.key_code) {
            return None;
        }
        Some(usize::from(self.key_code - key::DIGIT_1))
    }
}
