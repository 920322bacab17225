pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::{debug, trace};

    use super::writer::{pad_remaining_capacity, push_segment};
    use crate::common::{
        bit_utils::BitStream,
        codec::{Mode, Segment},
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    /// Filters `data` to the mode's alphabet, picks the smallest version from `min_ver`
    /// upwards that holds it at `ecl`, and returns the padded data codewords.
    pub fn encode(
        data: &str,
        mode: Mode,
        ecl: ECLevel,
        min_ver: Version,
    ) -> QRResult<(BitStream, Version)> {
        if mode == Mode::Kanji {
            return Err(QRError::UnsupportedMode(mode));
        }

        let filtered = mode.filter(data);
        let dropped = data.chars().count() - filtered.chars().count();
        if dropped > 0 {
            debug!("Dropped {dropped} chars outside {mode:?} alphabet");
        }

        let seg = Segment::new(mode, filtered.as_bytes());
        let ver = find_optimal_version(&seg, ecl, min_ver)?;
        Ok((encode_with_version(&seg, ver, ecl), ver))
    }

    // Header width depends on version, so the bit length is recomputed per candidate
    fn find_optimal_version(seg: &Segment, ecl: ECLevel, min_ver: Version) -> QRResult<Version> {
        for ver in min_ver.upwards() {
            let sz = seg.bit_len(ver);
            let bcap = ver.data_bit_capacity(ecl);
            trace!("Version {}: {sz} bits needed, {bcap} available", *ver);
            if sz <= bcap {
                return Ok(ver);
            }
        }
        Err(QRError::CapacityExceeded { mode: seg.mode, ec_level: ecl })
    }

    fn encode_with_version(seg: &Segment, ver: Version, ecl: ECLevel) -> BitStream {
        let bcap = ver.data_bit_capacity(ecl);
        let mut bs = BitStream::new(bcap);
        push_segment(seg, ver, &mut bs);
        pad_remaining_capacity(&mut bs);
        bs
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::{
        bit_utils::BitStream,
        codec::{Mode, Segment, PADDING_CODEWORDS},
        metadata::Version,
    };

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
        push_header(seg, ver, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
            Mode::Kanji => unreachable!("Kanji data is rejected before encoding"),
        }
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, ver.mode_bits());
        let char_cnt = seg.char_count();
        let len_bits = ver.char_cnt_bits(seg.mode);
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    // 3 digits to 10 bits, trailing 2 digits to 7 bits, trailing digit to 4 bits
    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = (chunk.len() * 10).div_ceil(3);
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    // 2 chars to 11 bits, trailing char to 6 bits
    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = (chunk.len() * 11).div_ceil(2);
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for &b in data {
            out.push_bits(b, 8);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_alphanumeric_data, push_byte_data, push_header, push_numeric_data,
            push_padding_bits, push_padding_codewords, Mode, Segment,
            PADDING_CODEWORDS,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_push_header_v1() {
            let ver = Version::MIN;
            let bit_capacity = ver.data_bit_capacity(ECLevel::L);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
            ];
            let dummy_vec = vec![b'0'; 1023];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [1023, 511, 255];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(bit_capacity);
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                push_header(&seg, ver, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v10() {
            let ver = Version::new(10).unwrap();
            let bit_capacity = ver.data_bit_capacity(ECLevel::L);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111],
                vec![0b00101111, 0b11111110],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let dummy_vec = vec![b'0'; 65535];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [4095, 2047, 65535];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(bit_capacity);
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                push_header(&seg, ver, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v27() {
            let ver = Version::new(27).unwrap();
            let bit_capacity = ver.data_bit_capacity(ECLevel::L);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let dummy_vec = vec![b'0'; 65535];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [16383, 8191, 65535];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(bit_capacity);
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                push_header(&seg, ver, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_numeric_data() {
            let mut bs = BitStream::new(152);
            push_numeric_data("01234567".as_bytes(), &mut bs);
            assert_eq!(bs.data(), vec![0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            assert_eq!(bs.len(), 27);
            let mut bs = BitStream::new(152);
            push_numeric_data("8".as_bytes(), &mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len(), 4);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let mut bs = BitStream::new(152);
            push_alphanumeric_data("AC-42".as_bytes(), &mut bs);
            assert_eq!(bs.data(), vec![0b00111001, 0b11011100, 0b11100100, 0b00100000]);
            assert_eq!(bs.len(), 28);
        }

        #[test]
        fn test_push_byte_data() {
            let mut bs = BitStream::new(152);
            push_byte_data("aé".as_bytes(), &mut bs);
            assert_eq!(bs.data(), vec![0b01100001, 0xC3, 0xA9]);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = BitStream::new(152);
            bs.push(true);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let bit_capacity = Version::MIN.data_bit_capacity(ECLevel::L);
            let mut bs = BitStream::new(bit_capacity);
            bs.push(true);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
