use std::fmt;

use clap::ValueEnum;

use crate::error::{Error, Result};

/// One encoded unit: a back-reference into the window plus the byte that follows it.
///
/// `offset` counts backwards from the current position to the start of the
/// match, `length` is the number of matched bytes. A pure literal has both set
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub offset: usize,
    pub length: usize,
    pub literal: u8,
}

impl Code {
    /// A code that carries only `literal`.
    pub fn literal(literal: u8) -> Self {
        Code {
            offset: 0,
            length: 0,
            literal,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.length == 0
    }

    /// Number of input bytes this code accounts for.
    pub fn span(&self) -> usize {
        self.length + 1
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{}}}", self.offset, self.length, self.literal)
    }
}

/// Window-size class: picks both the window bound and the output element width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WindowClass {
    #[value(name = "8")]
    Bits8,
    #[value(name = "16")]
    Bits16,
    #[value(name = "32")]
    Bits32,
}

impl WindowClass {
    pub const ALL: [WindowClass; 3] = [WindowClass::Bits8, WindowClass::Bits16, WindowClass::Bits32];

    /// Maximum window size. The window itself holds at most `window_size() - 1`
    /// bytes, so every offset fits the element width.
    pub fn window_size(self) -> usize {
        match self {
            WindowClass::Bits8 => 1 << 8,
            WindowClass::Bits16 => 1 << 16,
            WindowClass::Bits32 => u32::MAX as usize,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            WindowClass::Bits8 => 8,
            WindowClass::Bits16 => 16,
            WindowClass::Bits32 => 32,
        }
    }

    /// Largest value one output element can hold.
    pub fn max_value(self) -> usize {
        match self {
            WindowClass::Bits8 => u8::MAX as usize,
            WindowClass::Bits16 => u16::MAX as usize,
            WindowClass::Bits32 => u32::MAX as usize,
        }
    }

    /// Start of the window for an encoder sitting at `position`.
    pub fn window_start(self, position: usize) -> usize {
        position.saturating_sub(self.window_size() - 1)
    }
}

impl TryFrom<u32> for WindowClass {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(WindowClass::Bits8),
            16 => Ok(WindowClass::Bits16),
            32 => Ok(WindowClass::Bits32),
            other => Err(Error::UnknownClass(other)),
        }
    }
}

impl fmt::Display for WindowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_bits() {
        assert_eq!(WindowClass::try_from(8u32).unwrap(), WindowClass::Bits8);
        assert_eq!(WindowClass::try_from(16u32).unwrap(), WindowClass::Bits16);
        assert_eq!(WindowClass::try_from(32u32).unwrap(), WindowClass::Bits32);
        assert!(matches!(WindowClass::try_from(12u32), Err(Error::UnknownClass(12))));
    }

    #[test]
    fn test_class_value_names() {
        assert_eq!(WindowClass::from_str("16", false), Ok(WindowClass::Bits16));
        let rejected = WindowClass::from_str("abc", false).unwrap_err();
        assert!(rejected.contains("abc"));
        let names: Vec<String> = WindowClass::value_variants()
            .iter()
            .filter_map(|class| class.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["8", "16", "32"]);
        for class in WindowClass::ALL {
            assert_eq!(WindowClass::from_str(&class.to_string(), false), Ok(class));
        }
    }

    #[test]
    fn test_window_start_keeps_offsets_in_range() {
        for class in WindowClass::ALL {
            let position = class.window_size() + 10;
            let start = class.window_start(position);
            assert_eq!(position - start, class.window_size() - 1);
            assert!(position - start <= class.max_value());
        }
        assert_eq!(WindowClass::Bits8.window_start(100), 0);
    }

    #[test]
    fn test_code_display() {
        let code = Code { offset: 3, length: 3, literal: 1 };
        assert_eq!(code.to_string(), "{3,3,1}");
        assert_eq!(code.span(), 4);
        assert!(Code::literal(7).is_literal());
    }
}
