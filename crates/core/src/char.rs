//! Characters as code points
//!
//! Generated code treats characters as 16-bit units or full code points
//! depending on the compilation mode, so a `Char` holds any `u32` and only
//! renders through `char` when the value is a valid scalar.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Char(pub u32);

impl Char {
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl From<char> for Char {
    fn from(c: char) -> Self {
        Char(c as u32)
    }
}

impl From<u16> for Char {
    fn from(unit: u16) -> Self {
        Char(unit as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Char::from('a').to_string(), "a");
        assert_eq!(Char::from('\u{00e9}').to_string(), "\u{00e9}");
        // Lone surrogate
        assert_eq!(Char(0xD800).to_string(), "\u{FFFD}");
    }

    #[test]
    fn test_ordering_follows_code() {
        assert!(Char::from('a') < Char::from('b'));
        assert_eq!(Char::default().code(), 0);
    }
}
