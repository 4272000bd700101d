//! 7-segment glyph tables
//!
//! ## Segment Organization
//!
//! ```text
//!     A
//!    ---
//! F | G | B
//!    ---
//! E |   | C
//!    --- o
//!     D  DP
//! ```
//!
//! With decode mode off, one digit register byte maps to segments as
//! `DP A B C D E F G` from bit 7 down to bit 0.

/// Bit corresponding to segment "G"
pub const SEG_G: u8 = 1 << 0;
/// Bit corresponding to segment "F"
pub const SEG_F: u8 = 1 << 1;
/// Bit corresponding to segment "E"
pub const SEG_E: u8 = 1 << 2;
/// Bit corresponding to segment "D"
pub const SEG_D: u8 = 1 << 3;
/// Bit corresponding to segment "C"
pub const SEG_C: u8 = 1 << 4;
/// Bit corresponding to segment "B"
pub const SEG_B: u8 = 1 << 5;
/// Bit corresponding to segment "A"
pub const SEG_A: u8 = 1 << 6;
/// Bit corresponding to the decimal point
pub const SEG_DP: u8 = 1 << 7;

const BLANK: u8 = 0;
const DIGIT_0: u8 = SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F;
const DIGIT_1: u8 = SEG_B | SEG_C;
const DIGIT_2: u8 = SEG_A | SEG_B | SEG_D | SEG_E | SEG_G;
const DIGIT_3: u8 = SEG_A | SEG_B | SEG_C | SEG_D | SEG_G;
const DIGIT_4: u8 = SEG_B | SEG_C | SEG_F | SEG_G;
const DIGIT_5: u8 = SEG_A | SEG_C | SEG_D | SEG_F | SEG_G;
const DIGIT_6: u8 = SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G;
const DIGIT_7: u8 = SEG_A | SEG_B | SEG_C;
const DIGIT_8: u8 = SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G;
const DIGIT_9: u8 = SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G;
const LETTER_A: u8 = SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G;
const LETTER_B: u8 = SEG_C | SEG_D | SEG_E | SEG_F | SEG_G;
const LETTER_C: u8 = SEG_D | SEG_E | SEG_G;
const LETTER_D: u8 = SEG_B | SEG_C | SEG_D | SEG_E | SEG_G;
const LETTER_E: u8 = SEG_A | SEG_D | SEG_E | SEG_F | SEG_G;
const LETTER_F: u8 = SEG_A | SEG_E | SEG_F | SEG_G;
const LETTER_H: u8 = SEG_B | SEG_C | SEG_E | SEG_F | SEG_G;
const LETTER_L: u8 = SEG_D | SEG_E | SEG_F;
const LETTER_N: u8 = SEG_C | SEG_E | SEG_G;
const LETTER_O: u8 = SEG_C | SEG_D | SEG_E | SEG_G;
const LETTER_P: u8 = SEG_A | SEG_B | SEG_E | SEG_F | SEG_G;

/// Hexadecimal digits 0x0-0xF (lower-case b, c, d)
pub const HEX_TABLE: [u8; 16] = [
    DIGIT_0, DIGIT_1, DIGIT_2, DIGIT_3, DIGIT_4, DIGIT_5, DIGIT_6, DIGIT_7, // 0-7
    DIGIT_8, DIGIT_9, LETTER_A, LETTER_B, LETTER_C, LETTER_D, LETTER_E, LETTER_F, // 8-F
];

/// Glyphs for the low 128 ASCII codes
///
/// Codes 0-15 repeat the hex table. Characters with no sensible 7-segment
/// rendering are blank.
pub const CHAR_TABLE: [u8; 128] = {
    let mut table = [BLANK; 128];

    let mut i = 0;
    while i < 16 {
        table[i] = HEX_TABLE[i];
        i += 1;
    }
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = HEX_TABLE[i];
        i += 1;
    }

    table[b',' as usize] = SEG_DP;
    table[b'-' as usize] = SEG_G;
    table[b'.' as usize] = SEG_DP;
    table[b'_' as usize] = SEG_D;

    table[b'A' as usize] = LETTER_A;
    table[b'B' as usize] = LETTER_B;
    table[b'C' as usize] = LETTER_C;
    table[b'D' as usize] = LETTER_D;
    table[b'E' as usize] = LETTER_E;
    table[b'F' as usize] = LETTER_F;
    table[b'H' as usize] = LETTER_H;
    table[b'L' as usize] = LETTER_L;
    table[b'P' as usize] = LETTER_P;

    table[b'a' as usize] = LETTER_A;
    table[b'b' as usize] = LETTER_B;
    table[b'c' as usize] = LETTER_C;
    table[b'd' as usize] = LETTER_D;
    table[b'e' as usize] = LETTER_E;
    table[b'f' as usize] = LETTER_F;
    table[b'h' as usize] = LETTER_H;
    table[b'l' as usize] = LETTER_L;
    table[b'n' as usize] = LETTER_N;
    table[b'o' as usize] = LETTER_O;
    table[b'p' as usize] = LETTER_P;

    table
};

/// A code to render on one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Hex digit 0-15; anything larger renders nothing
    Hex(u8),
    /// ASCII code; codes >= 128 render as a space
    Char(u8),
}

impl Glyph {
    /// Segment byte for this glyph, with the decimal point if requested
    ///
    /// Returns `None` for a hex value above 15.
    pub fn segments(self, decimal_point: bool) -> Option<u8> {
        let base = match self {
            Glyph::Hex(value) => hex_segments(value)?,
            Glyph::Char(code) => char_segments(code),
        };
        Some(if decimal_point { base | SEG_DP } else { base })
    }
}

/// Segments for a hex digit
pub fn hex_segments(value: u8) -> Option<u8> {
    HEX_TABLE.get(value as usize).copied()
}

/// Segments for an ASCII code, falling back to the space glyph
pub fn char_segments(code: u8) -> u8 {
    let index = if code < 128 { code } else { b' ' };
    CHAR_TABLE[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_digits() {
        assert_eq!(hex_segments(0), Some(0b0111_1110));
        assert_eq!(hex_segments(1), Some(0b0011_0000));
        assert_eq!(hex_segments(8), Some(0b0111_1111));
        assert_eq!(hex_segments(0xF), Some(0b0100_0111));
        assert_eq!(hex_segments(16), None);
    }

    #[test]
    fn test_ascii_digits_match_hex() {
        for d in 0..10u8 {
            assert_eq!(char_segments(b'0' + d), HEX_TABLE[d as usize]);
        }
        assert_eq!(char_segments(b'A'), HEX_TABLE[0xA]);
        assert_eq!(char_segments(b'e'), HEX_TABLE[0xE]);
    }

    #[test]
    fn test_high_codes_render_as_space() {
        assert_eq!(char_segments(b' '), 0);
        assert_eq!(char_segments(128), char_segments(b' '));
        assert_eq!(char_segments(0xFF), char_segments(b' '));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(char_segments(b'-'), SEG_G);
        assert_eq!(char_segments(b'.'), SEG_DP);
        assert_eq!(char_segments(b'_'), SEG_D);
    }

    #[test]
    fn test_glyph_decimal_point() {
        assert_eq!(Glyph::Hex(1).segments(true), Some(SEG_DP | DIGIT_1));
        assert_eq!(Glyph::Hex(16).segments(true), None);
        assert_eq!(Glyph::Char(200).segments(true), Some(SEG_DP));
        assert_eq!(Glyph::Char(b'H').segments(false), Some(LETTER_H));
    }
}
