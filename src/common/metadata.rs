use std::ops::Deref;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::version_db::{
    ALIGNMENT_PATTERN_POSITIONS, BLOCK_COUNT, CHAR_COUNT_BITS, DATA_BIT_CAPACITY, ECC_PER_BLOCK,
    VERSION_INFOS,
};

// Module
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Module {
    #[default]
    Unset,
    Dark,
    Light,
}

impl Module {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

// Version
//------------------------------------------------------------------------------

/// Symbol size class. Version `v` is `4 * v + 17` modules wide, excluding the quiet zone.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::UnsupportedVersion(version));
        }
        Ok(Self(version))
    }

    // Versions from self up to and including 40
    pub(crate) fn upwards(self) -> impl Iterator<Item = Version> {
        (self.0..=Self::MAX.0).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        DATA_BIT_CAPACITY[ecl as usize][self.0 - 1]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.data_bit_capacity(ecl) >> 3
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        BLOCK_COUNT[ecl as usize][self.0 - 1]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[ecl as usize][self.0 - 1]
    }

    /// Returns `(block1_size, block1_count, block2_size, block2_count)`. Short blocks come
    /// first; long blocks carry one extra data codeword.
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let data_len = self.data_codewords(ecl);
        let blocks = self.block_count(ecl);
        let block1_size = data_len / blocks;
        let block2_count = data_len % blocks;
        let block1_count = blocks - block2_count;
        let block2_size = if block2_count > 0 { block1_size + 1 } else { 0 };
        (block1_size, block1_count, block2_size, block2_count)
    }

    pub fn total_codewords(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) + self.block_count(ecl) * self.ecc_per_block(ecl)
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    /// Width of the char count indicator for `mode` at this version.
    ///
    /// # Panics
    ///
    /// Panics for `Mode::Kanji`, which has no encoder.
    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let range = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        CHAR_COUNT_BITS[mode.index()][range]
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    pub fn info(self) -> u32 {
        debug_assert!(self.has_version_info(), "Version {} carries no version info", self.0);

        VERSION_INFOS[self.0 - 7]
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::{codec::Mode, error::QRError};

    #[test]
    fn test_new() {
        assert_eq!(*Version::new(1).unwrap(), 1);
        assert_eq!(*Version::new(40).unwrap(), 40);
        assert_eq!(Version::new(0), Err(QRError::UnsupportedVersion(0)));
        assert_eq!(Version::new(41), Err(QRError::UnsupportedVersion(41)));
    }

    #[test]
    fn test_width() {
        assert_eq!(Version::MIN.width(), 21);
        assert_eq!(Version::new(7).unwrap().width(), 45);
        assert_eq!(Version::MAX.width(), 177);
    }

    #[test]
    fn test_upwards() {
        let vers = Version::new(38).unwrap().upwards().map(|v| *v).collect::<Vec<_>>();
        assert_eq!(vers, vec![38, 39, 40]);
    }

    #[test]
    fn test_total_codewords_independent_of_ec_level() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            let total = ver.total_codewords(ECLevel::L);
            for ecl in [ECLevel::M, ECLevel::Q, ECLevel::H] {
                assert_eq!(ver.total_codewords(ecl), total, "Version {v}, Level {ecl:?}");
            }
        }
        assert_eq!(Version::MIN.total_codewords(ECLevel::L), 26);
        assert_eq!(Version::MAX.total_codewords(ECLevel::H), 3706);
    }

    #[test_case(1, ECLevel::L, (19, 1, 0, 0))]
    #[test_case(1, ECLevel::M, (16, 1, 0, 0))]
    #[test_case(5, ECLevel::Q, (15, 2, 16, 2))]
    #[test_case(5, ECLevel::H, (11, 2, 12, 2))]
    #[test_case(40, ECLevel::L, (118, 19, 119, 6))]
    #[test_case(40, ECLevel::H, (15, 20, 16, 61))]
    fn test_data_codewords_per_block(v: usize, ecl: ECLevel, exp: (usize, usize, usize, usize)) {
        let ver = Version::new(v).unwrap();
        assert_eq!(ver.data_codewords_per_block(ecl), exp);
    }

    #[test_case(1, Mode::Numeric, 10)]
    #[test_case(9, Mode::Alphanumeric, 9)]
    #[test_case(9, Mode::Byte, 8)]
    #[test_case(10, Mode::Numeric, 12)]
    #[test_case(26, Mode::Byte, 16)]
    #[test_case(27, Mode::Alphanumeric, 13)]
    #[test_case(40, Mode::Numeric, 14)]
    fn test_char_cnt_bits(v: usize, mode: Mode, exp: usize) {
        assert_eq!(Version::new(v).unwrap().char_cnt_bits(mode), exp);
    }

    #[test]
    #[should_panic(expected = "Kanji data is rejected")]
    fn test_char_cnt_bits_kanji() {
        Version::MIN.char_cnt_bits(Mode::Kanji);
    }

    #[test]
    fn test_version_info() {
        assert!(!Version::new(6).unwrap().has_version_info());
        assert_eq!(Version::new(7).unwrap().info(), 0x07C94);
        assert_eq!(Version::MAX.info(), 0x28C69);
    }
}

// Error correction level
//------------------------------------------------------------------------------

/// Recoverable damage ratio: L ~7%, M ~15%, Q ~25%, H ~30%.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}
