use std::fmt::Display;

use regex::Regex;

use crate::{EngineError, Result};

lazy_static::lazy_static! {
    static ref HEX_REGEX: Regex = Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();

    /// The float channels rounded back to 8 bit. Decoding matches against this
    /// table so that colors produced by a float based renderer resolve exactly.
    static ref ROUNDED_PALETTE: [Color; PaletteIndex::COUNT] = {
        let mut table = [Color::default(); PaletteIndex::COUNT];
        for (slot, channels) in table.iter_mut().zip(PALETTE_F32.iter()) {
            *slot = Color::from(*channels);
        }
        table
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn rgb_f32(&self) -> [f32; 3] {
        [self.r as f32 / 255_f32, self.g as f32 / 255_f32, self.b as f32 / 255_f32]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHexColor`] if the string is not a six digit hex triple.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let Some(cap) = HEX_REGEX.captures(hex.trim()) else {
            return Err(EngineError::InvalidHexColor { value: hex.to_string() });
        };
        let (_, [r, g, b]) = cap.extract();
        let r = u8::from_str_radix(r, 16)?;
        let g = u8::from_str_radix(g, 16)?;
        let b = u8::from_str_radix(b, 16)?;
        Ok(Color::new(r, g, b))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::new(value[0], value[1], value[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> [u8; 3] {
        [value.r, value.g, value.b]
    }
}

/// Channels are rounded, not truncated: `0.3647059 * 255` must land on `0x5d`.
impl From<[f32; 3]> for Color {
    fn from(value: [f32; 3]) -> Self {
        Color::new(channel_to_u8(value[0]), channel_to_u8(value[1]), channel_to_u8(value[2]))
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255_f32).round() as u8
}

/// One of the 16 palette slots.
///
/// Slots 0..=7 double as literal digits, 8..=14 are opcodes and 15 is the
/// background that marks an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteIndex(u8);

impl PaletteIndex {
    pub const COUNT: usize = 16;
    pub const BACKGROUND: PaletteIndex = PaletteIndex(15);
    pub const MAX_LITERAL_DIGIT: u8 = 7;

    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(PaletteIndex(index))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_background(self) -> bool {
        self.0 == Self::BACKGROUND.0
    }

    pub const fn is_literal_digit(self) -> bool {
        self.0 <= Self::MAX_LITERAL_DIGIT
    }

    pub fn all() -> impl Iterator<Item = PaletteIndex> {
        (0..Self::COUNT as u8).map(PaletteIndex)
    }

    pub fn color(self) -> Color {
        DAEDALUS_PALETTE[self.0 as usize]
    }

    pub fn channels_f32(self) -> [f32; 3] {
        PALETTE_F32[self.0 as usize]
    }
}

impl Display for PaletteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PaletteIndex {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self> {
        PaletteIndex::new(value).ok_or(EngineError::InvalidPaletteIndex { index: value })
    }
}

impl From<PaletteIndex> for u8 {
    fn from(value: PaletteIndex) -> u8 {
        value.0
    }
}

/// Exact 24 bit values of the Daedalus palette.
pub const DAEDALUS_PALETTE: [Color; PaletteIndex::COUNT] = [
    Color::new(0x5d, 0x27, 0x5d),
    Color::new(0xb1, 0x3e, 0x53),
    Color::new(0xef, 0x7d, 0x57),
    Color::new(0xff, 0xcd, 0x75),
    Color::new(0xa7, 0xf0, 0x70),
    Color::new(0x38, 0xb7, 0x64),
    Color::new(0x25, 0x71, 0x79),
    Color::new(0x29, 0x36, 0x6f),
    Color::new(0x3b, 0x5d, 0xc9),
    Color::new(0x41, 0xa6, 0xf6),
    Color::new(0x73, 0xef, 0xf7),
    Color::new(0xf4, 0xf4, 0xf4),
    Color::new(0x94, 0xb0, 0xc2),
    Color::new(0x56, 0x6c, 0x86),
    Color::new(0x33, 0x3c, 0x57),
    Color::new(0x1a, 0x1c, 0x2c),
];

/// Normalized channels as handed to the renderer.
pub const PALETTE_F32: [[f32; 3]; PaletteIndex::COUNT] = [
    [0.364_705_9, 0.152_941_18, 0.364_705_9],
    [0.694_117_67, 0.243_137_26, 0.325_490_2],
    [0.937_254_9, 0.490_196_08, 0.341_176_48],
    [1.0, 0.803_921_6, 0.458_823_53],
    [0.654_902, 0.941_176_5, 0.439_215_7],
    [0.219_607_84, 0.717_647_1, 0.392_156_87],
    [0.145_098_05, 0.443_137_26, 0.474_509_8],
    [0.160_784_32, 0.211_764_71, 0.435_294_12],
    [0.231_372_55, 0.364_705_9, 0.788_235_3],
    [0.254_901_98, 0.650_980_4, 0.964_705_9],
    [0.450_980_4, 0.937_254_9, 0.968_627_45],
    [0.956_862_75, 0.956_862_75, 0.956_862_75],
    [0.580_392_2, 0.690_196_1, 0.760_784_3],
    [0.337_254_9, 0.423_529_42, 0.525_490_2],
    [0.2, 0.235_294_12, 0.341_176_48],
    [0.101_960_786, 0.109_803_92, 0.172_549_02],
];

/// Returns both representations of a palette slot.
pub fn channels_of(index: PaletteIndex) -> ([f32; 3], Color) {
    (index.channels_f32(), index.color())
}

/// Resolves a color to its palette slot.
///
/// Despite the name this is an exact match: any color that is not one of the
/// 16 entries yields `None`. Decoding relies on this to stay lossless.
pub fn nearest_index(color: Color) -> Option<PaletteIndex> {
    ROUNDED_PALETTE.iter().position(|c| *c == color).map(|i| PaletteIndex(i as u8))
}
