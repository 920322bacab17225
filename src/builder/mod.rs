mod qr;

pub(crate) use qr::QR;

use log::{debug, info, trace};

use crate::common::{
    codec::{encode, Mode},
    ec::{error_correction_capacity, Codewords},
    error::QRResult,
    mask::{MaskPattern, MaskSelection, PenaltyScore},
    metadata::{ECLevel, Version},
};
use crate::symbol::Symbol;

pub struct QRBuilder<'a> {
    data: &'a str,
    mode: Mode,
    ec_level: ECLevel,
    mask: MaskSelection,
    min_version: Option<Version>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            mode: Mode::Byte,
            ec_level: ECLevel::M,
            mask: MaskSelection::Auto,
            min_version: None,
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Accepts a `MaskPattern` to force it, or `MaskSelection::Auto`.
    pub fn mask(&mut self, mask: impl Into<MaskSelection>) -> &mut Self {
        self.mask = mask.into();
        self
    }

    /// Smallest version considered when fitting the data.
    pub fn min_version(&mut self, version: Version) -> &mut Self {
        self.min_version = Some(version);
        self
    }

    pub fn unset_min_version(&mut self) -> &mut Self {
        self.min_version = None;
        self
    }

    pub fn metadata(&self) -> String {
        let min_ver = match self.min_version {
            Some(v) => format!("{}", *v),
            None => "None".to_string(),
        };
        let mask = match self.mask {
            MaskSelection::Auto => "Auto".to_string(),
            MaskSelection::Fixed(m) => format!("{}", *m),
        };
        format!(
            "{{ Mode: {:?}, Ec level: {:?}, Mask: {mask}, Min version: {min_ver} }}",
            self.mode, self.ec_level
        )
    }
}


impl QRBuilder<'_> {
    /// Encodes the data and computes the error correction blocks, stopping short of placement.
    pub fn codewords(&self) -> QRResult<(Version, Codewords)> {
        debug!("Encoding data...");
        let min_ver = self.min_version.unwrap_or(Version::MIN);
        let (encoded_data, version) = encode(self.data, self.mode, self.ec_level, min_ver)?;
        debug!("Selected version {}", *version);

        debug!("Computing error correction codewords...");
        let codewords = Codewords::new(encoded_data.data(), version, self.ec_level);
        Ok((version, codewords))
    }

    pub fn build(&self) -> QRResult<Symbol> {
        debug!("Generating QR {}...", self.metadata());

        let (version, codewords) = self.codewords()?;

        debug!("Interleaving {} blocks...", codewords.block_count());
        let payload = codewords.interleaved();
        debug_assert!(
            payload.len() == version.total_codewords(self.ec_level),
            "Payload length {} doesn't match total codewords {}",
            payload.len(),
            version.total_codewords(self.ec_level)
        );

        let symbol = match self.mask {
            MaskSelection::Fixed(m) => {
                debug!("Drawing QR with mask {}...", *m);
                QR::with_payload(version, self.ec_level, m, &payload).into_symbol()
            }
            MaskSelection::Auto => {
                debug!("Finding best mask...");
                Self::select_best_mask(version, self.ec_level, &payload)
            }
        };

        self.report(&symbol);
        Ok(symbol)
    }

    fn report(&self, symbol: &Symbol) {
        let version = symbol.version();
        let data_len = version.data_codewords(self.ec_level);
        let ec_capacity = error_correction_capacity(version, self.ec_level);
        let total_modules = symbol.width() * symbol.width();
        let dark_modules = symbol.count_dark_modules();

        info!("QR generated: {}", symbol.metadata());
        info!("Data capacity: {data_len}, Error capacity: {ec_capacity}");
        info!(
            "Dark modules: {}, Light modules: {}, Balance: {}%",
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );
    }

    // Ties go to the lowest mask
    fn select_best_mask(version: Version, ec_level: ECLevel, payload: &[u8]) -> Symbol {
        let mut candidates = Self::mask_candidates(version, ec_level, payload);
        for (symbol, pen) in candidates.iter() {
            trace!("Mask {}: {:?}, total {}", *symbol.mask(), pen, pen.total());
        }

        let best = candidates
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, pen))| pen.total())
            .map_or(0, |(i, _)| i);
        let (symbol, pen) = candidates.swap_remove(best);
        debug!("Selected mask {} with penalty {}", *symbol.mask(), pen.total());
        symbol
    }

    #[cfg(feature = "parallel")]
    fn mask_candidates(
        version: Version,
        ec_level: ECLevel,
        payload: &[u8],
    ) -> Vec<(Symbol, PenaltyScore)> {
        use rayon::prelude::*;

        MaskPattern::all()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|m| Self::mask_candidate(version, ec_level, m, payload))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn mask_candidates(
        version: Version,
        ec_level: ECLevel,
        payload: &[u8],
    ) -> Vec<(Symbol, PenaltyScore)> {
        MaskPattern::all().map(|m| Self::mask_candidate(version, ec_level, m, payload)).collect()
    }

    fn mask_candidate(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        payload: &[u8],
    ) -> (Symbol, PenaltyScore) {
        let symbol = QR::with_payload(version, ec_level, mask, payload).into_symbol();
        let pen = symbol.penalty();
        (symbol, pen)
    }
}
