use std::fmt;

use crate::MachineError;

/// One decoded instruction. `x`/`y` are register indices, `kk` an 8-bit
/// immediate, `nnn` a 12-bit address and `n` a 4-bit row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Return,
    Jump { nnn: u16 },
    Call { nnn: u16 },
    SkipIfEqualImmediate { x: u8, kk: u8 },
    SkipIfNotEqualImmediate { x: u8, kk: u8 },
    SkipIfEqual { x: u8, y: u8 },
    LoadImmediate { x: u8, kk: u8 },
    AddImmediate { x: u8, kk: u8 },
    Load { x: u8, y: u8 },
    Or { x: u8, y: u8 },
    And { x: u8, y: u8 },
    Xor { x: u8, y: u8 },
    Add { x: u8, y: u8 },
    Sub { x: u8, y: u8 },
    ShiftRight { x: u8 },
    SubNegated { x: u8, y: u8 },
    ShiftLeft { x: u8 },
    SkipIfNotEqual { x: u8, y: u8 },
    LoadIndex { nnn: u16 },
    JumpOffset { nnn: u16 },
    Random { x: u8, kk: u8 },
    Draw { x: u8, y: u8, n: u8 },
    SkipIfKeyDown { x: u8 },
    SkipIfKeyUp { x: u8 },
    LoadDelayTimer { x: u8 },
    WaitForKey { x: u8 },
    SetDelayTimer { x: u8 },
    SetSoundTimer { x: u8 },
    AddIndex { x: u8 },
    LoadFontGlyph { x: u8 },
    StoreBcd { x: u8 },
    StoreRegisters { x: u8 },
    LoadRegisters { x: u8 },
}

impl Instruction {
    /// Decodes a big-endian instruction word. `address` is only used to
    /// label an unknown opcode.
    pub fn decode(word: u16, address: u16) -> Result<Self, MachineError> {
        let x = ((word & 0x0F00) >> 8) as u8;
        let y = ((word & 0x00F0) >> 4) as u8;
        let n = (word & 0x000F) as u8;
        let kk = (word & 0x00FF) as u8;
        let nnn = word & 0x0FFF;

        let instruction = match (word & 0xF000) >> 12 {
            0x0 => match word {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::Return,
                _ => return Err(MachineError::UnknownOpcode { opcode: word, address }),
            },
            0x1 => Self::Jump { nnn },
            0x2 => Self::Call { nnn },
            0x3 => Self::SkipIfEqualImmediate { x, kk },
            0x4 => Self::SkipIfNotEqualImmediate { x, kk },
            0x5 => Self::SkipIfEqual { x, y },
            0x6 => Self::LoadImmediate { x, kk },
            0x7 => Self::AddImmediate { x, kk },
            0x8 => match n {
                0x0 => Self::Load { x, y },
                0x1 => Self::Or { x, y },
                0x2 => Self::And { x, y },
                0x3 => Self::Xor { x, y },
                0x4 => Self::Add { x, y },
                0x5 => Self::Sub { x, y },
                0x6 => Self::ShiftRight { x },
                0x7 => Self::SubNegated { x, y },
                0xE => Self::ShiftLeft { x },
                _ => return Err(MachineError::UnknownOpcode { opcode: word, address }),
            },
            0x9 => Self::SkipIfNotEqual { x, y },
            0xA => Self::LoadIndex { nnn },
            0xB => Self::JumpOffset { nnn },
            0xC => Self::Random { x, kk },
            0xD => Self::Draw { x, y, n },
            0xE => match kk {
                0x9E => Self::SkipIfKeyDown { x },
                0xA1 => Self::SkipIfKeyUp { x },
                _ => return Err(MachineError::UnknownOpcode { opcode: word, address }),
            },
            0xF => match kk {
                0x07 => Self::LoadDelayTimer { x },
                0x0A => Self::WaitForKey { x },
                0x15 => Self::SetDelayTimer { x },
                0x18 => Self::SetSoundTimer { x },
                0x1E => Self::AddIndex { x },
                0x29 => Self::LoadFontGlyph { x },
                0x33 => Self::StoreBcd { x },
                0x55 => Self::StoreRegisters { x },
                0x65 => Self::LoadRegisters { x },
                _ => return Err(MachineError::UnknownOpcode { opcode: word, address }),
            },
            _ => return Err(MachineError::UnknownOpcode { opcode: word, address }),
        };
        Ok(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipIfEqualImmediate { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipIfNotEqualImmediate { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipIfEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImmediate { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImmediate { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Load { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x } => write!(f, "SHR V{:X}", x),
            SubNegated { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            SkipIfNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipIfKeyUp { x } => write!(f, "SKNP V{:X}", x),
            LoadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFontGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
