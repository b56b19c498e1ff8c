use std::fmt::Display;

use crate::{PaletteIndex, Signedness};

/// Opcodes living in the reserved palette slots 8..=15.
///
/// Slots 0..=7 are either literal digits or, behind an [`Opcode::Inst`]
/// marker, stack operations. Telling those apart is up to the caller.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Jmp = 8,
    Ret = 9,
    Halt = 10,
    Set = 11,
    Sbr = 12,
    Cmp = 13,
    Inst = 14,
    Bg = 15,
}

impl Opcode {
    pub const ALL: &'static [Opcode] = &[
        Opcode::Jmp,
        Opcode::Ret,
        Opcode::Halt,
        Opcode::Set,
        Opcode::Sbr,
        Opcode::Cmp,
        Opcode::Inst,
        Opcode::Bg,
    ];

    pub fn index(self) -> PaletteIndex {
        // discriminants are all within 8..=15
        PaletteIndex::new(self as u8).unwrap_or(PaletteIndex::BACKGROUND)
    }

    pub fn from_index(index: PaletteIndex) -> Option<Opcode> {
        Self::ALL.iter().copied().find(|op| *op as u8 == index.value())
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Jmp => "Jmp",
            Opcode::Ret => "Ret",
            Opcode::Halt => "Halt",
            Opcode::Set => "Set",
            Opcode::Sbr => "Sbr",
            Opcode::Cmp => "Cmp",
            Opcode::Inst => "Inst",
            Opcode::Bg => "Bg",
        }
    }

    /// The literal operands that follow the opcode, in order.
    pub fn literal_params(self) -> &'static [Signedness] {
        match self {
            Opcode::Jmp | Opcode::Sbr => &[Signedness::Signed],
            Opcode::Set => &[Signedness::Unsigned, Signedness::Signed],
            Opcode::Ret | Opcode::Halt | Opcode::Cmp | Opcode::Inst | Opcode::Bg => &[],
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<PaletteIndex> for Opcode {
    type Error = PaletteIndex;

    fn try_from(value: PaletteIndex) -> std::result::Result<Self, Self::Error> {
        Opcode::from_index(value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_slots() {
        for op in Opcode::ALL {
            assert!(!op.index().is_literal_digit());
            assert_eq!(Opcode::from_index(op.index()), Some(*op));
        }
        assert_eq!(Opcode::Bg.index(), PaletteIndex::BACKGROUND);
        assert_eq!(Opcode::from_index(PaletteIndex::new(3).unwrap()), None);
    }
}
