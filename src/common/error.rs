use thiserror::Error;

use super::codec::Mode;
use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("Data too long for {mode:?} mode at error correction level {ec_level:?}")]
    CapacityExceeded { mode: Mode, ec_level: ECLevel },

    #[error("Unsupported encoding mode: {0:?}")]
    UnsupportedMode(Mode),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(usize),

    #[error("Invalid masking pattern: {0}")]
    InvalidMaskPattern(u8),
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;
    use crate::common::{codec::Mode, metadata::ECLevel};

    #[test]
    fn test_display() {
        let err = QRError::CapacityExceeded { mode: Mode::Numeric, ec_level: ECLevel::H };
        assert_eq!(err.to_string(), "Data too long for Numeric mode at error correction level H");
        assert_eq!(QRError::UnsupportedMode(Mode::Kanji).to_string(), "Unsupported encoding mode: Kanji");
        assert_eq!(QRError::UnsupportedVersion(41).to_string(), "Unsupported version: 41");
        assert_eq!(QRError::InvalidMaskPattern(8).to_string(), "Invalid masking pattern: 8");
    }
}
