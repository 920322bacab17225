use std::ops::Deref;

use super::error::{QRError, QRResult};
use super::metadata::Module;
use crate::symbol::Symbol;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub(crate) fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }

    /// Human readable predicate. Modules for which it holds are inverted.
    pub fn formula(self) -> &'static str {
        match *self {
            0b000 => "(row + col) % 2 == 0",
            0b001 => "col % 2 == 0",
            0b010 => "row % 3 == 0",
            0b011 => "(row + col) % 3 == 0",
            0b100 => "(row / 3 + col / 2) % 2 == 0",
            0b101 => "(row * col) % 2 + (row * col) % 3 == 0",
            0b110 => "((row * col) % 2 + (row * col) % 3) % 2 == 0",
            0b111 => "((row * col) % 3 + (row + col) % 2) % 2 == 0",
            _ => unreachable!("Invalid pattern"),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r / 3) + (c >> 1)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p % 3) + ((r + c) & 1) as i32) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::vertical_lines,
            0b010 => mask_functions::horizontal_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }

    // Value of a data bit placed at (r, c) under this mask
    pub fn apply(self, r: i16, c: i16, bit: bool) -> bool {
        bit ^ (self.mask_functions())(r, c)
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Either a fixed mask, or `Auto` to pick the lowest penalty among all eight.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum MaskSelection {
    #[default]
    Auto,
    Fixed(MaskPattern),
}

impl From<MaskPattern> for MaskSelection {
    fn from(mask: MaskPattern) -> Self {
        Self::Fixed(mask)
    }
}

// Penalty
//------------------------------------------------------------------------------

/// Per-rule breakdown of the mask penalty.
///
/// `balance` is signed: symbols lighter than 50% dark reduce the total.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct PenaltyScore {
    pub adjacent: u32,
    pub block: u32,
    pub finder: u32,
    pub balance: i32,
}

impl PenaltyScore {
    pub fn total(&self) -> u32 {
        let sum = (self.adjacent + self.block + self.finder) as i64 + self.balance as i64;
        sum.max(0) as u32
    }
}

pub fn compute_penalty(symbol: &Symbol) -> PenaltyScore {
    PenaltyScore {
        adjacent: compute_adjacent_penalty(symbol),
        block: compute_block_penalty(symbol),
        finder: compute_finder_pattern_penalty(symbol, true)
            + compute_finder_pattern_penalty(symbol, false),
        balance: compute_balance_penalty(symbol),
    }
}

fn line(symbol: &Symbol, i: usize, is_hor: bool) -> impl Iterator<Item = Module> + '_ {
    let w = symbol.width();
    (0..w).map(move |j| if is_hor { symbol.get(i, j) } else { symbol.get(j, i) })
}

// Runs of 5 or more same colored modules add (len - 2)
fn compute_adjacent_penalty(symbol: &Symbol) -> u32 {
    let run_penalty = |len: u32| if len >= 5 { len - 2 } else { 0 };
    let w = symbol.width();
    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let mut last = None;
            let mut run = 0;
            for m in line(symbol, i, is_hor) {
                if last == Some(m) {
                    run += 1;
                } else {
                    pen += run_penalty(run);
                    last = Some(m);
                    run = 1;
                }
            }
            pen += run_penalty(run);
        }
    }
    pen
}

fn compute_block_penalty(symbol: &Symbol) -> u32 {
    let mut pen = 0;
    let w = symbol.width();
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = symbol.get(r, c);
            if clr == symbol.get(r + 1, c)
                && clr == symbol.get(r, c + 1)
                && clr == symbol.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Dark is 1. Longest first, since the 15 module pattern contains the other two
static FINDER_LIKE_PATTERNS: [&[u8]; 3] = [
    &[0, 0, 0, 0, 1, 0, 1, 1, 1, 0, 1, 0, 0, 0, 0],
    &[0, 0, 0, 0, 1, 0, 1, 1, 1, 0, 1],
    &[1, 0, 1, 1, 1, 0, 1, 0, 0, 0, 0],
];

fn compute_finder_pattern_penalty(symbol: &Symbol, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = symbol.width();
    for i in 0..w {
        let bits = line(symbol, i, is_hor).map(|m| m.is_dark() as u8).collect::<Vec<_>>();
        let mut j = 0;
        while j < w {
            let hit = FINDER_LIKE_PATTERNS.iter().find(|p| bits[j..].starts_with(p));
            match hit {
                Some(p) => {
                    pen += 40;
                    j += p.len();
                }
                None => j += 1,
            }
        }
    }
    pen
}

// Deviation of the dark percentage from 50, doubled. Kept signed
fn compute_balance_penalty(symbol: &Symbol) -> i32 {
    let dark_cnt = symbol.count_dark_modules();
    let w = symbol.width();
    let tot = w * w;
    let percent = (dark_cnt * 100 / tot) as i32;
    (percent - 50) * 2
}
