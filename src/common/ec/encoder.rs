use std::ops::Deref;

use super::galois::{EXP_TABLE, GENERATOR_POLYNOMIALS, LOG_TABLE};
use crate::common::metadata::{ECLevel, Version};

// Codewords
//------------------------------------------------------------------------------

/// Data codewords split into blocks, alongside the error correction codewords of each block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codewords {
    pub data_blocks: Vec<Vec<u8>>,
    pub ecc_blocks: Vec<Vec<u8>>,
}

impl Codewords {
    pub fn new(data: &[u8], version: Version, ec_level: ECLevel) -> Self {
        let ecc_size_per_block = version.ecc_per_block(ec_level);
        let data_blocks = blockify(data, version, ec_level);
        let ecc_blocks =
            data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<Vec<_>>();
        let data_blocks = data_blocks.into_iter().map(<[u8]>::to_vec).collect();
        Self { data_blocks, ecc_blocks }
    }

    pub fn block_count(&self) -> usize {
        self.data_blocks.len()
    }

    /// Final codeword sequence: interleaved data blocks followed by interleaved ecc blocks.
    pub fn interleaved(&self) -> Vec<u8> {
        let mut res = interleave(&self.data_blocks);
        res.extend(interleave(&self.ecc_blocks));
        res
    }
}

// Block splitting & interleaving
//------------------------------------------------------------------------------

// Short blocks first, then the blocks carrying one extra codeword
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (short_size, short_count, long_size, long_count) =
        version.data_codewords_per_block(ec_level);
    debug_assert!(
        short_size * short_count + long_size * long_count == data.len(),
        "Data len {} doesn't match block layout of version {} at {ec_level:?}",
        data.len(),
        *version
    );

    let (short, long) = data.split_at(short_size * short_count);
    let mut blocks = short.chunks(short_size).collect::<Vec<_>>();
    if long_count > 0 {
        blocks.extend(long.chunks(long_size));
    }
    blocks
}

// Column-major read across blocks; shorter blocks are skipped once exhausted
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
pub(crate) fn deinterleave(data: &[u8], version: Version, ec_level: ECLevel) -> Codewords {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);
    let total_blocks = block1_count + block2_count;
    let ecc_size = version.ecc_per_block(ec_level);
    let data_len = block1_size * block1_count + block2_size * block2_count;

    let mut data_blocks = (0..total_blocks)
        .map(|i| Vec::with_capacity(if i < block1_count { block1_size } else { block2_size }))
        .collect::<Vec<Vec<u8>>>();
    let max_size = block1_size.max(block2_size);
    let mut it = data[..data_len].iter();
    for i in 0..max_size {
        for (j, b) in data_blocks.iter_mut().enumerate() {
            let size = if j < block1_count { block1_size } else { block2_size };
            if i < size {
                if let Some(&d) = it.next() {
                    b.push(d);
                }
            }
        }
    }

    let mut ecc_blocks = vec![Vec::with_capacity(ecc_size); total_blocks];
    for (i, &e) in data[data_len..].iter().enumerate() {
        ecc_blocks[i % total_blocks].push(e);
    }
    Codewords { data_blocks, ecc_blocks }
}

// Error correction codewords
//------------------------------------------------------------------------------

// Remainder of block(x) * x^n modulo the generator polynomial, computed in a
// shift register of n coefficients. Generator coefficients are stored as logs
pub fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let gen_poly = GENERATOR_POLYNOMIALS[ecc_count];
    debug_assert!(gen_poly.len() == ecc_count, "No generator polynomial of degree {ecc_count}");

    let mut rem = vec![0u8; ecc_count];
    for &b in block {
        let factor = b ^ rem[0];
        rem.rotate_left(1);
        rem[ecc_count - 1] = 0;
        if factor == 0 {
            continue;
        }

        let log_factor = LOG_TABLE[factor as usize] as usize;
        for (r, &g) in rem.iter_mut().zip(gen_poly.iter()) {
            *r ^= EXP_TABLE[(g as usize + log_factor) % 255];
        }
    }
    rem
}

/// Number of erroneous codewords a symbol can recover, excluding misdecode protection codewords
/// reserved by small symbols.
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes = version.block_count(ec_level) * version.ecc_per_block(ec_level);
    (ec_bytes - p) / 2
}
