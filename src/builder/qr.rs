use crate::common::{
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{ECLevel, Module, Version},
    version_db::{FORMAT_INFOS, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
};
use crate::symbol::{Symbol, QUIET_ZONE_WIDTH};

// Module of the construction grid, tagged with the region that set it
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Cell {
    Empty,
    Func(Module),
    Version(Module),
    Format(Module),
    Data(Module),
}

impl Cell {
    pub fn module(self) -> Module {
        match self {
            Cell::Empty => Module::Unset,
            Cell::Func(m) | Cell::Version(m) | Cell::Format(m) | Cell::Data(m) => m,
        }
    }
}

/// Mutable grid owned by the builder for the duration of a single construction.
#[derive(Debug, Clone)]
pub(crate) struct QR {
    grid: Vec<Cell>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel, mask: MaskPattern) -> Self {
        let w = ver.width();
        Self { grid: vec![Cell::Empty; w * w], w, ver, ecl, mask }
    }

    /// Draws every pattern and the masked payload, in placement order.
    pub fn with_payload(ver: Version, ecl: ECLevel, mask: MaskPattern, payload: &[u8]) -> Self {
        let mut qr = Self::new(ver, ecl, mask);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);
        qr
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Cell::Empty => '.',
                    Cell::Func(Module::Dark) => 'f',
                    Cell::Func(_) => 'F',
                    Cell::Version(Module::Dark) => 'v',
                    Cell::Version(_) => 'V',
                    Cell::Format(Module::Dark) => 'm',
                    Cell::Format(_) => 'M',
                    Cell::Data(Module::Dark) => 'd',
                    Cell::Data(_) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Cell {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, cell: Cell) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = cell;
    }

    /// Freezes the grid into a symbol surrounded by a light quiet zone.
    pub fn into_symbol(self) -> Symbol {
        debug_assert!(!self.grid.contains(&Cell::Empty), "Empty module found in finished grid");

        let full_w = self.w + 2 * QUIET_ZONE_WIDTH;
        let mut grid = vec![Module::Light; full_w * full_w];
        for (i, row) in self.grid.chunks_exact(self.w).enumerate() {
            let start = (i + QUIET_ZONE_WIDTH) * full_w + QUIET_ZONE_WIDTH;
            for (dst, cell) in grid[start..start + self.w].iter_mut().zip(row) {
                *dst = cell.module();
            }
        }
        Symbol::new(self.ver, self.ecl, self.mask, full_w, grid)
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Includes the light separator, clipped at the symbol edge
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Cell::Func(Module::Light),
                        (3 | -3, _) | (_, 3 | -3) => Cell::Func(Module::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Cell::Func(Module::Light),
                        _ => Cell::Func(Module::Dark),
                    },
                );
            }
        }
    }
}


// Version info
//------------------------------------------------------------------------------

impl QR {
    // Bit k, least significant first, goes to (k / 3, w - 11 + k % 3) and its transpose
    fn draw_version_info(&mut self) {
        if !self.ver.has_version_info() {
            return;
        }
        let ver_info = self.ver.info();
        for k in 0..VERSION_INFO_BIT_LEN {
            let cell = Cell::Version(Module::from_bit((ver_info >> k) & 1 == 1));
            let a = (k / 3) as i16;
            let b = (k % 3) as i16 - 11;
            self.set(a, b, cell);
            self.set(b, a, cell);
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Skips the three positions overlapping finder patterns
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Cell::Func(Module::Dark),
                        _ => Cell::Func(Module::Light),
                    },
                )
            }
        }
    }
}


// Format info
//------------------------------------------------------------------------------

impl QR {
    fn draw_format_info(&mut self) {
        let format_info = FORMAT_INFOS[self.ecl as usize][*self.mask as usize] as u32;
        let off = Cell::Format(Module::Light);
        let on = Cell::Format(Module::Dark);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_SIDE);
        self.set(-8, 8, on);
    }

    // Writes the number most significant bit first along coords
    fn draw_number(&mut self, number: u32, bit_len: usize, off: Cell, on: Cell, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off);
            } else {
                self.set(*r, *c, on);
            }
            mask >>= 1;
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    // Only fills modules not already claimed by other function patterns
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let cell = Cell::Func(Module::from_bit(i & 1 == 0));
            if self.get(6, i) == Cell::Empty {
                self.set(6, i, cell);
            }
            if self.get(i, 6) == Cell::Empty {
                self.set(i, 6, cell);
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::{Cell, QR};
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Module, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QR::new(Version::MIN, ECLevel::L, MaskPattern::new(0).unwrap());
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }

    #[test]
    fn test_timing_pattern_keeps_set_modules() {
        let mut qr = QR::new(Version::MIN, ECLevel::L, MaskPattern::new(0).unwrap());
        qr.set(6, 10, Cell::Data(Module::Light));
        qr.draw_timing_pattern();
        assert_eq!(qr.get(6, 10), Cell::Data(Module::Light));
        assert_eq!(qr.get(6, 12), Cell::Func(Module::Dark));
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_version_info();
        self.draw_alignment_patterns();
        self.draw_format_info();
        self.draw_timing_pattern();
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use super::QR;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_all_function_patterns() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L, MaskPattern::new(0).unwrap());
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM.........................VVvFfffffff\n\
             fFFFFFfFM.........................VvVFfFFFFFf\n\
             fFfffFfFm.........................VvVFfFfffFf\n\
             fFfffFfFM.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mmmMmmfmm...........fffff............mmMMMmMM\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFm...........fffff...........fffff....\n\
             fFfffFfFM....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFm....................................\n\
             fffffffFm....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places payload bits most significant first along the zigzag, masked at placement.
    /// Modules left over once the payload runs out are light and unmasked.
    pub fn draw_encoding_region(&mut self, payload: &[u8]) {
        let mut bits = payload.iter().flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1 == 1));
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.get(r, c) != Cell::Empty {
                continue;
            }
            let module = match bits.next() {
                Some(bit) => Module::from_bit(self.mask.apply(r, c, bit)),
                None => Module::Light,
            };
            self.set(r, c, Cell::Data(module));
        }

        debug_assert!(bits.next().is_none(), "Payload exceeds encoding region of version {}", *self.ver);
        debug_assert!(!self.grid.contains(&Cell::Empty), "Empty module found after data placement");
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
