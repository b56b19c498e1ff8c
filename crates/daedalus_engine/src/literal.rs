//! Base 8 literal encoding.
//!
//! Literals are written with the palette slots 0..=7, one octal digit per cell,
//! least significant digit first. Signed literals use two's complement over a
//! width of `3 * len` bits, so the high bit of the last digit is the sign.

use std::{fmt::Display, str::FromStr};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::{EngineError, PaletteIndex, Result};

const DIGIT_BITS: usize = 3;
const RADIX: u32 = 8;
const SIGN_DIGIT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signedness {
    #[default]
    Unsigned,
    Signed,
}

impl Signedness {
    pub fn is_signed(self) -> bool {
        matches!(self, Signedness::Signed)
    }
}

impl From<bool> for Signedness {
    fn from(is_signed: bool) -> Self {
        if is_signed {
            Signedness::Signed
        } else {
            Signedness::Unsigned
        }
    }
}

/// Octal digits of a literal, least significant first.
///
/// An empty sequence means "no literal" and is distinct from `[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LiteralDigits {
    digits: Vec<PaletteIndex>,
}

impl LiteralDigits {
    pub fn new(digits: Vec<PaletteIndex>) -> Result<Self> {
        if let Some((position, digit)) = digits.iter().enumerate().find(|(_, d)| !d.is_literal_digit()) {
            return Err(EngineError::InvalidLiteralDigit { position, digit: digit.value() });
        }
        Ok(Self { digits })
    }

    /// Builds a sequence from raw values, least significant first.
    pub fn from_digits(digits: &[u8]) -> Result<Self> {
        let mut result = Vec::with_capacity(digits.len());
        for (position, digit) in digits.iter().enumerate() {
            if *digit > PaletteIndex::MAX_LITERAL_DIGIT {
                return Err(EngineError::InvalidLiteralDigit { position, digit: *digit });
            }
            result.push(PaletteIndex::try_from(*digit)?);
        }
        Ok(Self { digits: result })
    }

    pub fn digits(&self) -> &[PaletteIndex] {
        &self.digits
    }

    pub fn raw_digits(&self) -> Vec<u8> {
        self.digits.iter().map(|d| d.value()).collect()
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    fn most_significant(&self) -> Option<u8> {
        self.digits.last().map(|d| d.value())
    }
}

/// Renders the digits most significant first, the way octal numbers are read.
impl Display for LiteralDigits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for digit in self.digits.iter().rev() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// Parses octal digits written most significant first (`"0754"`).
impl FromStr for LiteralDigits {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut digits = Vec::with_capacity(s.len());
        for (position, ch) in s.chars().rev().enumerate() {
            match ch.to_digit(10) {
                Some(value) => digits.push(value as u8),
                None => return Err(EngineError::generic(format!("'{ch}' at position {position} is not an octal digit"))),
            }
        }
        LiteralDigits::from_digits(&digits)
    }
}

/// Encodes `value` as literal digits.
///
/// Negative values cannot be written as unsigned literals; for those the empty
/// sequence is returned.
pub fn encode_literal(value: &BigInt, signedness: Signedness) -> LiteralDigits {
    let raw = if value.is_zero() {
        vec![0]
    } else if value.is_positive() {
        let mut raw = value.magnitude().to_radix_le(RADIX);
        if signedness.is_signed() && raw.last().is_some_and(|d| *d >= SIGN_DIGIT) {
            raw.push(0);
        }
        raw
    } else if signedness.is_signed() {
        encode_negative(value)
    } else {
        log::debug!("encode_literal: {value} is not representable as unsigned literal");
        return LiteralDigits::default();
    };

    LiteralDigits {
        digits: raw.into_iter().filter_map(PaletteIndex::new).collect(),
    }
}

fn encode_negative(value: &BigInt) -> Vec<u8> {
    let magnitude = value.magnitude();
    let mut width = DIGIT_BITS;
    while (BigUint::one() << (width - 1)) < *magnitude {
        width += DIGIT_BITS;
    }
    let wrapped = (BigInt::one() << width) + value;
    let mut raw = wrapped.magnitude().to_radix_le(RADIX);
    raw.resize(width / DIGIT_BITS, 0);
    raw
}

/// Decodes literal digits into their value.
///
/// Decoding is permissive: any digit sequence yields a value, including ones
/// with redundant leading zeros or sign digits.
/// Use [`decode_literal_canonical`] to reject those.
pub fn decode_literal(digits: &LiteralDigits, signedness: Signedness) -> Result<BigInt> {
    let Some(top) = digits.most_significant() else {
        return Err(EngineError::EmptyLiteral);
    };
    let magnitude = BigUint::from_radix_le(&digits.raw_digits(), RADIX).ok_or_else(|| EngineError::generic(format!("invalid octal digits '{digits}'")))?;
    let mut value = BigInt::from(magnitude);
    if signedness.is_signed() && top >= SIGN_DIGIT {
        value -= BigInt::one() << (digits.len() * DIGIT_BITS);
    }
    Ok(value)
}

/// Like [`decode_literal`] but only accepts sequences [`encode_literal`] produces.
pub fn decode_literal_canonical(digits: &LiteralDigits, signedness: Signedness) -> Result<BigInt> {
    let value = decode_literal(digits, signedness)?;
    if encode_literal(&value, signedness) != *digits {
        return Err(EngineError::NonCanonicalLiteral { digits: digits.to_string() });
    }
    Ok(value)
}

pub fn is_canonical(digits: &LiteralDigits, signedness: Signedness) -> bool {
    decode_literal_canonical(digits, signedness).is_ok()
}
