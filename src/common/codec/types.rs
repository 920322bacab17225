use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

/// Character encoding mode. The discriminant is the 4-bit mode indicator.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Mode {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Numeric => 0,
            Self::Alphanumeric => 1,
            Self::Byte => 2,
            Self::Kanji => unreachable!("Kanji data is rejected before encoding"),
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char as char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(
            Mode::Alphanumeric.contains(char as char),
            "Invalid alphanumeric data: {char}"
        );
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    /// Packs up to 3 digits, 2 alphanumeric chars or 1 byte into a single value.
    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => unreachable!("Kanji data is rejected before encoding"),
        }
    }

    pub fn contains(&self, char: char) -> bool {
        match self {
            Self::Numeric => char.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(char, '0'..='9' | 'A'..='Z' | ' ' | '$' | '%' | '*' | '+' | '-' | '.' | '/' | ':')
            }
            Self::Byte | Self::Kanji => true,
        }
    }

    /// Drops every char outside the mode's alphabet. Byte mode keeps the input as is.
    pub fn filter(&self, data: &str) -> String {
        data.chars().filter(|&c| self.contains(c)).collect()
    }

    // Bit length of `len` chars of character data, excluding header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => unreachable!("Kanji data is rejected before encoding"),
        }
    }
}


// Segment
//------------------------------------------------------------------------------

/// Mode-tagged run of filtered data. `data` holds ASCII chars for numeric and
/// alphanumeric modes and UTF-8 bytes for byte mode.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, data: &'a [u8]) -> Self {
        Self { mode, data }
    }

    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    // Bit length including mode indicator and char count indicator for the given version
    pub fn bit_len(&self, ver: Version) -> usize {
        ver.mode_bits() + ver.char_cnt_bits(self.mode) + self.mode.encoded_len(self.char_count())
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
