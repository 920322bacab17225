//! # qrforge
//!
//! A Rust library for generating QR code symbols with Reed-Solomon error correction
//! and penalty based mask selection.
//!
//! ## Features
//!
//! - **Numeric, Alphanumeric & Byte modes**: Input is filtered to the mode's alphabet
//! - **Automatic Version Selection**: Picks the smallest of versions 1-40 that fits the data
//! - **Reed-Solomon Error Correction**: All four levels (L, M, Q, H)
//! - **Mask Selection**: Scores all eight masks and keeps the lowest penalty, in parallel with
//!   the `parallel` feature
//!
//! ## Quick Start
//!
//! ### Simple Generation
//!
//! ```rust
//! use qrforge::{generate, ECLevel, MaskSelection, Mode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = generate("HELLO WORLD", Mode::Alphanumeric, ECLevel::Q, MaskSelection::Auto)?;
//!
//! assert_eq!(*symbol.version(), 1);
//! println!("{symbol}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{QRBuilder, ECLevel, MaskPattern, Mode, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new("01234567")
//!     .mode(Mode::Numeric)                  // Encoding mode - defaults to Mode::Byte
//!     .ec_level(ECLevel::M)                 // Error correction level - defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)           // Mask pattern - if not provided, picks the lowest penalty
//!     .min_version(Version::new(2)?)        // Smallest version to consider - defaults to 1
//!     .build()?;
//!
//! assert_eq!(*symbol.mask(), 3);
//! assert_eq!(symbol.width(), 25 + 8);       // Quiet zone of 4 modules on each side
//! # Ok(())
//! # }
//! ```
//!
//! ## Symbol Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules, excluding the quiet zone.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Masks
//! Each mask inverts data modules where its predicate holds, see [`MaskPattern::formula`].
//! The penalty of a symbol is available through [`Symbol::penalty`].

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod symbol;

pub use builder::QRBuilder;
pub use common::codec::Mode;
pub use common::ec::Codewords;
pub use common::error::{QRError, QRResult};
pub use common::mask::{MaskPattern, MaskSelection, PenaltyScore};
pub use common::metadata::{ECLevel, Module, Version};
pub use symbol::Symbol;

/// Generates a symbol for `data` in a single call.
///
/// Characters outside the alphabet of `mode` are dropped before encoding.
pub fn generate(data: &str, mode: Mode, ec_level: ECLevel, mask: MaskSelection) -> QRResult<Symbol> {
    QRBuilder::new(data).mode(mode).ec_level(ec_level).mask(mask).build()
}
