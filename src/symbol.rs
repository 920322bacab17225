use std::fmt;

use crate::common::{
    mask::{compute_penalty, MaskPattern, PenaltyScore},
    metadata::{ECLevel, Module, Version},
};

/// Light border around every symbol, in modules.
pub const QUIET_ZONE_WIDTH: usize = 4;

// Symbol
//------------------------------------------------------------------------------

/// A finished symbol. The grid is square, row major, and includes the quiet zone.
/// It never contains `Module::Unset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    w: usize,
    grid: Vec<Module>,
}

impl Symbol {
    pub(crate) fn new(
        ver: Version,
        ecl: ECLevel,
        mask: MaskPattern,
        w: usize,
        grid: Vec<Module>,
    ) -> Self {
        debug_assert!(grid.len() == w * w, "Grid length {} isn't {w} squared", grid.len());
        Self { ver, ecl, mask, w, grid }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Side length in modules, quiet zone included.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Module at row `r`, column `c`, quiet zone included.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is not below `width()`.
    pub fn get(&self, r: usize, c: usize) -> Module {
        assert!(r < self.w && c < self.w, "Coordinate ({r}, {c}) out of bounds {}", self.w);
        self.grid[r * self.w + c]
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        self.get(r, c).is_dark()
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn to_bools(&self) -> Vec<Vec<bool>> {
        self.grid.chunks_exact(self.w).map(|row| row.iter().map(|m| m.is_dark()).collect()).collect()
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|m| m.is_dark()).count()
    }

    /// Mask penalty of this symbol, quiet zone included.
    pub fn penalty(&self) -> PenaltyScore {
        compute_penalty(self)
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.ver, self.ecl, *self.mask)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks_exact(self.w) {
            let line = row.iter().map(|m| if m.is_dark() { '#' } else { ' ' }).collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod symbol_tests {
    use super::Symbol;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Module, Version};

    fn sample() -> Symbol {
        let grid = vec![Module::Dark, Module::Light, Module::Light, Module::Dark];
        Symbol::new(Version::MIN, ECLevel::Q, MaskPattern::new(5).unwrap(), 2, grid)
    }

    #[test]
    fn test_accessors() {
        let symbol = sample();
        assert_eq!(symbol.width(), 2);
        assert!(symbol.is_dark(0, 0));
        assert!(!symbol.is_dark(0, 1));
        assert_eq!(symbol.get(1, 1), Module::Dark);
        assert_eq!(symbol.count_dark_modules(), 2);
        assert_eq!(symbol.to_bools(), vec![vec![true, false], vec![false, true]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_column_out_of_bounds() {
        // Row major index 2 is in range, the column is not
        sample().get(0, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_row_out_of_bounds() {
        sample().get(2, 0);
    }

    #[test]
    fn test_metadata() {
        assert_eq!(sample().metadata(), "{ Version: 1, Ec level: Q, Mask: 5 }");
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "# \n #\n");
    }
}
