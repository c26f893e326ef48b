//! Static code tables for the Argonaut rank codec
//!
//! The rank code is a fixed, complete prefix code over 256 symbols. Lower
//! ranks (the freshest dictionary entries) are expected to be the most
//! frequent and carry the shortest codes. Patterns are written most
//! significant bit first.

/// A variable-length code: the low `bits` bits of `pattern`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankCode {
    /// Code bits, right-aligned
    pub pattern: u16,
    /// Code length in bits
    pub bits: u8,
}

impl RankCode {
    /// Create a code entry
    pub const fn new(pattern: u16, bits: u8) -> Self {
        Self { pattern, bits }
    }
}

/// Number of ranks, and of codes
pub const RANK_COUNT: usize = 256;

/// Shortest code length
pub const MIN_CODE_BITS: u8 = 3;

/// Longest code length
pub const MAX_CODE_BITS: u8 = 11;

/// Size of the decode table, indexed by a marker bit followed by the code
pub const RANK_DECODE_SIZE: usize = 1 << (MAX_CODE_BITS as usize + 1);

const CODES: [RankCode; RANK_COUNT] = [
    RankCode::new(0b100, 3),
    RankCode::new(0b001, 3),
    RankCode::new(0b11111, 5),
    RankCode::new(0b01010, 5),
    RankCode::new(0b111010, 6),
    RankCode::new(0b110101, 6),
    RankCode::new(0b110011, 6),
    RankCode::new(0b110010, 6),
    RankCode::new(0b110000, 6),
    RankCode::new(0b101100, 6),
    RankCode::new(0b101000, 6),
    RankCode::new(0b011110, 6),
    RankCode::new(0b011101, 6),
    RankCode::new(0b011001, 6),
    RankCode::new(0b010000, 6),
    RankCode::new(0b000110, 6),
    RankCode::new(0b000011, 6),
    RankCode::new(0b1111000, 7),
    RankCode::new(0b1110110, 7),
    RankCode::new(0b1110010, 7),
    RankCode::new(0b1101111, 7),
    RankCode::new(0b1101001, 7),
    RankCode::new(0b1100010, 7),
    RankCode::new(0b1011110, 7),
    RankCode::new(0b1011101, 7),
    RankCode::new(0b1010101, 7),
    RankCode::new(0b1010010, 7),
    RankCode::new(0b0111111, 7),
    RankCode::new(0b0110101, 7),
    RankCode::new(0b0110001, 7),
    RankCode::new(0b0110000, 7),
    RankCode::new(0b0100101, 7),
    RankCode::new(0b0001111, 7),
    RankCode::new(0b0001010, 7),
    RankCode::new(0b0000001, 7),
    RankCode::new(0b0000000, 7),
    RankCode::new(0b11110111, 8),
    RankCode::new(0b11110101, 8),
    RankCode::new(0b11110011, 8),
    RankCode::new(0b11101111, 8),
    RankCode::new(0b11101110, 8),
    RankCode::new(0b11100010, 8),
    RankCode::new(0b11011101, 8),
    RankCode::new(0b11011100, 8),
    RankCode::new(0b11011011, 8),
    RankCode::new(0b11011010, 8),
    RankCode::new(0b11011000, 8),
    RankCode::new(0b11000111, 8),
    RankCode::new(0b10111111, 8),
    RankCode::new(0b10111110, 8),
    RankCode::new(0b10111000, 8),
    RankCode::new(0b10110111, 8),
    RankCode::new(0b10110101, 8),
    RankCode::new(0b10101111, 8),
    RankCode::new(0b10101110, 8),
    RankCode::new(0b10101000, 8),
    RankCode::new(0b10100110, 8),
    RankCode::new(0b01111101, 8),
    RankCode::new(0b01110001, 8),
    RankCode::new(0b01101111, 8),
    RankCode::new(0b01101110, 8),
    RankCode::new(0b01101100, 8),
    RankCode::new(0b01011111, 8),
    RankCode::new(0b01011110, 8),
    RankCode::new(0b01011011, 8),
    RankCode::new(0b01011010, 8),
    RankCode::new(0b01001111, 8),
    RankCode::new(0b01001100, 8),
    RankCode::new(0b01001001, 8),
    RankCode::new(0b01001000, 8),
    RankCode::new(0b01000110, 8),
    RankCode::new(0b00011100, 8),
    RankCode::new(0b00010011, 8),
    RankCode::new(0b00010000, 8),
    RankCode::new(0b00001010, 8),
    RankCode::new(0b00001001, 8),
    RankCode::new(0b00001000, 8),
    RankCode::new(0b00000110, 8),
    RankCode::new(0b111101101, 9),
    RankCode::new(0b111101000, 9),
    RankCode::new(0b111100101, 9),
    RankCode::new(0b111001101, 9),
    RankCode::new(0b111000111, 9),
    RankCode::new(0b111000110, 9),
    RankCode::new(0b111000010, 9),
    RankCode::new(0b111000001, 9),
    RankCode::new(0b110100011, 9),
    RankCode::new(0b110100010, 9),
    RankCode::new(0b110100001, 9),
    RankCode::new(0b101110010, 9),
    RankCode::new(0b101101001, 9),
    RankCode::new(0b101101000, 9),
    RankCode::new(0b101011010, 9),
    RankCode::new(0b101011001, 9),
    RankCode::new(0b101011000, 9),
    RankCode::new(0b011111001, 9),
    RankCode::new(0b011100101, 9),
    RankCode::new(0b011100100, 9),
    RankCode::new(0b011100001, 9),
    RankCode::new(0b011010011, 9),
    RankCode::new(0b010111010, 9),
    RankCode::new(0b010111000, 9),
    RankCode::new(0b010110010, 9),
    RankCode::new(0b010110000, 9),
    RankCode::new(0b010011100, 9),
    RankCode::new(0b010011010, 9),
    RankCode::new(0b010001011, 9),
    RankCode::new(0b000111011, 9),
    RankCode::new(0b000111010, 9),
    RankCode::new(0b000101111, 9),
    RankCode::new(0b000101101, 9),
    RankCode::new(0b000100101, 9),
    RankCode::new(0b000010111, 9),
    RankCode::new(0b000010110, 9),
    RankCode::new(0b000001011, 9),
    RankCode::new(0b000001001, 9),
    RankCode::new(0b1111011001, 10),
    RankCode::new(0b1111011000, 10),
    RankCode::new(0b1111010010, 10),
    RankCode::new(0b1111001001, 10),
    RankCode::new(0b1111001000, 10),
    RankCode::new(0b1110011110, 10),
    RankCode::new(0b1110011001, 10),
    RankCode::new(0b1110000110, 10),
    RankCode::new(0b1110000000, 10),
    RankCode::new(0b1101000001, 10),
    RankCode::new(0b1101000000, 10),
    RankCode::new(0b1100011010, 10),
    RankCode::new(0b1100011001, 10),
    RankCode::new(0b1100011000, 10),
    RankCode::new(0b1011100111, 10),
    RankCode::new(0b1011100110, 10),
    RankCode::new(0b1011011011, 10),
    RankCode::new(0b1011011001, 10),
    RankCode::new(0b1011011000, 10),
    RankCode::new(0b1010100111, 10),
    RankCode::new(0b1010100110, 10),
    RankCode::new(0b1010100100, 10),
    RankCode::new(0b1010011110, 10),
    RankCode::new(0b1010011100, 10),
    RankCode::new(0b0111110000, 10),
    RankCode::new(0b0111001110, 10),
    RankCode::new(0b0110110100, 10),
    RankCode::new(0b0110100101, 10),
    RankCode::new(0b0110100011, 10),
    RankCode::new(0b0110100010, 10),
    RankCode::new(0b0110100000, 10),
    RankCode::new(0b0101110110, 10),
    RankCode::new(0b0101110010, 10),
    RankCode::new(0b0100111010, 10),
    RankCode::new(0b0100110111, 10),
    RankCode::new(0b0100011111, 10),
    RankCode::new(0b0100011101, 10),
    RankCode::new(0b0100011100, 10),
    RankCode::new(0b0100010101, 10),
    RankCode::new(0b0100010100, 10),
    RankCode::new(0b0100010011, 10),
    RankCode::new(0b0100010010, 10),
    RankCode::new(0b0100010000, 10),
    RankCode::new(0b0001011101, 10),
    RankCode::new(0b0001011100, 10),
    RankCode::new(0b0001011001, 10),
    RankCode::new(0b0001001001, 10),
    RankCode::new(0b0001001000, 10),
    RankCode::new(0b0001000111, 10),
    RankCode::new(0b0001000110, 10),
    RankCode::new(0b0001000101, 10),
    RankCode::new(0b0001000100, 10),
    RankCode::new(0b0000011111, 10),
    RankCode::new(0b0000011110, 10),
    RankCode::new(0b0000011101, 10),
    RankCode::new(0b0000011100, 10),
    RankCode::new(0b0000010101, 10),
    RankCode::new(0b0000010100, 10),
    RankCode::new(0b0000010001, 10),
    RankCode::new(0b0000010000, 10),
    RankCode::new(0b11110100111, 11),
    RankCode::new(0b11110100110, 11),
    RankCode::new(0b11100111111, 11),
    RankCode::new(0b11100111110, 11),
    RankCode::new(0b11100111011, 11),
    RankCode::new(0b11100111010, 11),
    RankCode::new(0b11100111001, 11),
    RankCode::new(0b11100111000, 11),
    RankCode::new(0b11100110001, 11),
    RankCode::new(0b11100110000, 11),
    RankCode::new(0b11100001111, 11),
    RankCode::new(0b11100001110, 11),
    RankCode::new(0b11100000011, 11),
    RankCode::new(0b11100000010, 11),
    RankCode::new(0b11011001111, 11),
    RankCode::new(0b11011001110, 11),
    RankCode::new(0b11011001101, 11),
    RankCode::new(0b11011001100, 11),
    RankCode::new(0b11011001011, 11),
    RankCode::new(0b11011001010, 11),
    RankCode::new(0b11011001001, 11),
    RankCode::new(0b11011001000, 11),
    RankCode::new(0b11000110111, 11),
    RankCode::new(0b11000110110, 11),
    RankCode::new(0b10110110101, 11),
    RankCode::new(0b10110110100, 11),
    RankCode::new(0b10101101111, 11),
    RankCode::new(0b10101101110, 11),
    RankCode::new(0b10101101101, 11),
    RankCode::new(0b10101101100, 11),
    RankCode::new(0b10101001011, 11),
    RankCode::new(0b10101001010, 11),
    RankCode::new(0b10100111111, 11),
    RankCode::new(0b10100111110, 11),
    RankCode::new(0b10100111011, 11),
    RankCode::new(0b10100111010, 11),
    RankCode::new(0b01111100011, 11),
    RankCode::new(0b01111100010, 11),
    RankCode::new(0b01110011111, 11),
    RankCode::new(0b01110011110, 11),
    RankCode::new(0b01110011011, 11),
    RankCode::new(0b01110011010, 11),
    RankCode::new(0b01110011001, 11),
    RankCode::new(0b01110011000, 11),
    RankCode::new(0b01110000011, 11),
    RankCode::new(0b01110000010, 11),
    RankCode::new(0b01110000001, 11),
    RankCode::new(0b01110000000, 11),
    RankCode::new(0b01101101111, 11),
    RankCode::new(0b01101101110, 11),
    RankCode::new(0b01101101101, 11),
    RankCode::new(0b01101101100, 11),
    RankCode::new(0b01101101011, 11),
    RankCode::new(0b01101101010, 11),
    RankCode::new(0b01101001001, 11),
    RankCode::new(0b01101001000, 11),
    RankCode::new(0b01101000011, 11),
    RankCode::new(0b01101000010, 11),
    RankCode::new(0b01011101111, 11),
    RankCode::new(0b01011101110, 11),
    RankCode::new(0b01011100111, 11),
    RankCode::new(0b01011100110, 11),
    RankCode::new(0b01011001111, 11),
    RankCode::new(0b01011001110, 11),
    RankCode::new(0b01011001101, 11),
    RankCode::new(0b01011001100, 11),
    RankCode::new(0b01011000111, 11),
    RankCode::new(0b01011000110, 11),
    RankCode::new(0b01011000101, 11),
    RankCode::new(0b01011000100, 11),
    RankCode::new(0b01001110111, 11),
    RankCode::new(0b01001110110, 11),
    RankCode::new(0b01001101101, 11),
    RankCode::new(0b01001101100, 11),
    RankCode::new(0b01000111101, 11),
    RankCode::new(0b01000111100, 11),
    RankCode::new(0b01000100011, 11),
    RankCode::new(0b01000100010, 11),
    RankCode::new(0b00010110001, 11),
    RankCode::new(0b00010110000, 11),
];

/// Rank codes indexed by rank
pub static RANK_CODES: [RankCode; RANK_COUNT] = CODES;

/// Inverse of [`RANK_CODES`], indexed by `(1 << bits) | pattern`
///
/// Holds `rank + 1` where a code of exactly that length ends, 0 elsewhere.
/// The leading marker bit keeps codes of different lengths apart.
pub static RANK_DECODE: [u16; RANK_DECODE_SIZE] = build_rank_decode(&CODES);

const fn build_rank_decode(codes: &[RankCode; RANK_COUNT]) -> [u16; RANK_DECODE_SIZE] {
    let mut table = [0u16; RANK_DECODE_SIZE];
    let mut rank = 0;
    while rank < RANK_COUNT {
        let code = codes[rank];
        let index = (1usize << code.bits) | code.pattern as usize;
        table[index] = rank as u16 + 1;
        rank += 1;
    }
    table
}
